use crate::{
    network::StateReceiver,
    pacer::{Pacer, PushOutcome},
    serial::SerialLine,
    status::StatusView,
};
use log::*;
use scoreboard_common::game_state::GameState;
use tokio::time::Instant;

/// Forwards received states to the status view and, paced, to the display.
pub struct Bridge<L, V> {
    pacer: Pacer,
    line: L,
    status: V,
}

impl<L: SerialLine, V: StatusView> Bridge<L, V> {
    pub fn new(pacer: Pacer, line: L, status: V) -> Self {
        Self {
            pacer,
            line,
            status,
        }
    }

    pub fn handle(&mut self, state: &GameState, now: Instant) -> PushOutcome {
        self.status.show(state);
        self.pacer.offer(state, now, &mut self.line)
    }

    pub async fn run(mut self, mut receiver: StateReceiver) {
        info!(
            "Forwarding game states, at most one frame every {:?}",
            self.pacer.interval()
        );
        loop {
            let state = receiver.next_state().await;
            let outcome = self.handle(&state, Instant::now());
            trace!("Push outcome: {outcome:?}");
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::pacer::test::FakeLine;
    use tokio::time::Duration;

    #[derive(Default)]
    struct RecordingView {
        seen: Vec<GameState>,
    }

    impl StatusView for RecordingView {
        fn show(&mut self, state: &GameState) {
            self.seen.push(state.clone());
        }
    }

    #[test]
    fn test_every_state_is_shown() {
        let start = Instant::now();
        let mut bridge = Bridge::new(
            Pacer::new(Duration::from_millis(200), start),
            FakeLine::default(),
            RecordingView::default(),
        );

        let mut outcomes = vec![];
        for i in 0..10 {
            let mut state = GameState::default();
            state.home.score = i;
            outcomes.push(bridge.handle(&state, start + Duration::from_millis(50 * i as u64)));
        }

        assert_eq!(bridge.status.seen.len(), 10);
        assert_eq!(bridge.status.seen[9].home.score, 9);

        // Pushed at 250ms
        assert_eq!(
            outcomes
                .iter()
                .filter(|o| **o == PushOutcome::Pushed)
                .count(),
            1
        );
        assert_eq!(outcomes[5], PushOutcome::Pushed);
        assert_eq!(bridge.line.writes.len(), 1);
    }

    #[test]
    fn test_closed_line_keeps_running() {
        let start = Instant::now();
        let mut bridge = Bridge::new(
            Pacer::new(Duration::from_millis(200), start),
            FakeLine {
                closed: true,
                ..Default::default()
            },
            RecordingView::default(),
        );

        let state = GameState::default();
        assert_eq!(
            bridge.handle(&state, start + Duration::from_millis(300)),
            PushOutcome::LineClosed
        );
        assert_eq!(
            bridge.handle(&state, start + Duration::from_millis(600)),
            PushOutcome::LineClosed
        );
        assert!(bridge.line.writes.is_empty());
        assert_eq!(bridge.status.seen.len(), 2);
    }
}
