use crate::side::Side;
use core::ops::Index;
use derivative::Derivative;

/// One value per team, in display order.
#[derive(Derivative)]
#[derivative(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HomeAwayBundle<T> {
    pub home: T,
    pub away: T,
}

impl<T> HomeAwayBundle<T> {
    pub fn iter(&self) -> impl Iterator<Item = (Side, &T)> {
        self.into_iter()
    }
}

impl<T> Index<Side> for HomeAwayBundle<T> {
    type Output = T;

    fn index(&self, side: Side) -> &Self::Output {
        match side {
            Side::Home => &self.home,
            Side::Away => &self.away,
        }
    }
}

pub struct HomeAwayBundleIterator<'a, T> {
    bundle: &'a HomeAwayBundle<T>,
    next: Option<Side>,
}

impl<'a, T> Iterator for HomeAwayBundleIterator<'a, T> {
    type Item = (Side, &'a T);

    fn next(&mut self) -> Option<Self::Item> {
        let side = self.next?;
        self.next = match side {
            Side::Home => Some(Side::Away),
            Side::Away => None,
        };
        let bundle = self.bundle;
        Some((side, &bundle[side]))
    }
}

impl<'a, T> IntoIterator for &'a HomeAwayBundle<T> {
    type Item = (Side, &'a T);
    type IntoIter = HomeAwayBundleIterator<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        HomeAwayBundleIterator {
            bundle: self,
            next: Some(Side::Home),
        }
    }
}
