//! Byte positions of each field within a [`Frame`](crate::frame::Frame).
//!
//! The display controller reads the line positionally, so these ranges are the protocol.

use core::ops::Range;
use scoreboard_common::bundles::HomeAwayBundle;

pub const TAG: Range<usize> = 0..2;
pub const CLOCK_LEFT: Range<usize> = 2..4;
pub const CLOCK_RIGHT: Range<usize> = 4..6;
pub const BONUS: Range<usize> = 6..8;
pub const SHOT_CLOCK: Range<usize> = 8..10;
pub const HOME_SCORE: Range<usize> = 10..13;
pub const AWAY_SCORE: Range<usize> = 13..16;
pub const POSSESSION: Range<usize> = 16..18;
pub const TIMEOUTS_LEFT: Range<usize> = 18..20;
pub const DOUBLE_BONUS: Range<usize> = 20..22;
pub const HOME_FOULS: Range<usize> = 22..24;
pub const AWAY_FOULS: Range<usize> = 24..26;
pub const FOUL_PLAYER: Range<usize> = 26..28;
pub const FOUL_COUNT: Range<usize> = 28..29;
pub const PERIOD: Range<usize> = 29..30;
pub const BUZZER: Range<usize> = 30..31;
pub const HOME_NAME: Range<usize> = 31..39;
pub const AWAY_NAME: Range<usize> = 39..47;
pub const PLAYER_STATS: Range<usize> = 47..98;
pub const CAMERA_CONTROL: Range<usize> = 98..116;
pub const CLOCK_STATUS: Range<usize> = 116..119;
pub const CLOCK_STATUS_PAD: Range<usize> = 119..121;
pub const AWAY_BOTTOM_CENTER: Range<usize> = 121..132;
pub const SCOREBOT_INFO: Range<usize> = 132..138;
pub const TIME_AND_DATE: Range<usize> = 138..150;

pub const NAME_WIDTH: usize = 8;
pub const NAMES: HomeAwayBundle<Range<usize>> = HomeAwayBundle {
    home: HOME_NAME,
    away: AWAY_NAME,
};

/// Per-player statistics and timeout indicators. Not driven by the game state yet.
pub(crate) const PLAYER_STATS_PLACEHOLDER: [&str; 4] = [
    " 00 0 00 0",       // home players 1 & 2
    "   0 0 0 0",       // timeouts
    " 00 0 00 0 00 0 ", // home players 4 & 5, home bottom centre
    " 00 0 00 0 00 0",  // away players 1 to 3
];

/// Away players 4 & 5 and the away bottom centre segment.
pub(crate) const AWAY_BOTTOM_CENTER_PLACEHOLDER: &str = " 00 0 00 0 ";
