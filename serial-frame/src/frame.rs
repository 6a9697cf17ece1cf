use crate::layout::{
    self, AWAY_BOTTOM_CENTER_PLACEHOLDER, NAME_WIDTH, PLAYER_STATS_PLACEHOLDER,
};
use arrayvec::ArrayString;
use core::ops::Range;
use scoreboard_common::{
    bundles::HomeAwayBundle,
    game_state::{GameState, ScoreSet},
    side::Side,
};

/// Frame-type marker understood by the display controller.
const FRAME_TAG: &str = "03";
const DOUBLE_BONUS_FOULS: u32 = 5;
const BONUS_FOULS: u32 = 7;
const POSSESSION_ARROWS: HomeAwayBundle<char> = HomeAwayBundle {
    home: '<',
    away: '>',
};
const FRAME_LEN: usize = layout::TIME_AND_DATE.end;

/// One complete line of the display controller's positional protocol.
///
/// Every numeric field is formatted from the absolute value of its input. Values too wide for
/// their field keep their low-order digits, so the frame length never changes.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub struct Frame(ArrayString<FRAME_LEN>);

impl Frame {
    pub const ENCODED_LEN: usize = FRAME_LEN;
    /// Sent after every frame on the serial line. Not part of the frame itself.
    pub const TERMINATOR: u8 = b'\r';

    pub fn encode(state: &GameState) -> Self {
        let game = &state.game;
        let teams = state.teams();
        let mut line = LineBuilder::new();

        line.literal(FRAME_TAG);
        line.number(game.clock_left.unsigned_abs(), 2);
        line.number(game.clock_right.unsigned_abs(), 2);
        for (_, team) in teams.iter() {
            line.flag(fouls(team) > BONUS_FOULS, 'B');
        }
        line.number(shot_clock_secs(game.shot_clock), 2);
        for (_, team) in teams.iter() {
            line.number(team.score.unsigned_abs(), 3);
        }
        for (side, team) in teams.iter() {
            line.flag(team.poss, POSSESSION_ARROWS[side]);
        }
        for (_, team) in teams.iter() {
            line.number(team.tol.unsigned_abs(), 1);
        }
        for (_, team) in teams.iter() {
            line.flag(fouls(team) > DOUBLE_BONUS_FOULS, 'B');
        }
        for (_, team) in teams.iter() {
            line.number(fouls(team), 2);
        }
        line.literal("00"); // foul player
        line.literal("0"); // foul count
        line.number(game.period.unsigned_abs(), 1);
        line.blank(layout::BUZZER.len());
        for (_, team) in teams.iter() {
            line.text(&team.name, NAME_WIDTH);
        }

        for segment in PLAYER_STATS_PLACEHOLDER {
            line.literal(segment);
        }
        line.blank(layout::CAMERA_CONTROL.len());

        // The shot clock only reports running while the main clock runs
        line.flag_or(game.clock_running, 'R', 'S');
        line.text(&game.clock_middle, 1);
        line.flag_or(game.clock_running && game.shot_clock_running, 'R', 'S');
        line.blank(layout::CLOCK_STATUS_PAD.len());

        line.literal(AWAY_BOTTOM_CENTER_PLACEHOLDER);
        line.blank(layout::SCOREBOT_INFO.len());
        line.blank(layout::TIME_AND_DATE.len());

        debug_assert_eq!(line.0.len(), Self::ENCODED_LEN);
        Self(line.0)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }

    /// The bytes to write to the serial line, including the terminator.
    pub fn to_line(&self) -> Vec<u8> {
        let mut line = Vec::with_capacity(Self::ENCODED_LEN + 1);
        line.extend_from_slice(self.as_bytes());
        line.push(Self::TERMINATOR);
        line
    }

    pub fn field(&self, range: Range<usize>) -> &str {
        &self.0[range]
    }

    pub fn clock_status(&self) -> &str {
        self.field(layout::CLOCK_STATUS)
    }

    pub fn name(&self, side: Side) -> &str {
        self.field(layout::NAMES[side].clone())
    }
}

impl core::fmt::Display for Frame {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "{}", self.0)
    }
}

fn fouls(team: &ScoreSet) -> u32 {
    team.fouls.unsigned_abs()
}

fn shot_clock_secs(shot_clock: f64) -> u32 {
    // `as` truncates toward zero and saturates, NaN becomes 0
    shot_clock.abs() as u32
}

struct LineBuilder(ArrayString<FRAME_LEN>);

impl LineBuilder {
    fn new() -> Self {
        Self(ArrayString::new())
    }

    fn literal(&mut self, text: &str) {
        self.0.push_str(text);
    }

    fn blank(&mut self, width: usize) {
        for _ in 0..width {
            self.0.push(' ');
        }
    }

    /// Zero padded, keeping only the lowest `width` digits.
    fn number(&mut self, value: u32, width: u32) {
        for place in (0..width).rev() {
            let digit = (value / 10u32.pow(place)) % 10;
            self.0.push(char::from(b'0' + digit as u8));
        }
    }

    fn flag(&mut self, set: bool, mark: char) {
        self.flag_or(set, mark, ' ');
    }

    fn flag_or(&mut self, set: bool, mark: char, otherwise: char) {
        self.0.push(if set { mark } else { otherwise });
    }

    /// Cut to `width` characters and right padded with spaces. Anything the display can't
    /// show is replaced with `?` so each character is exactly one byte.
    fn text(&mut self, text: &str, width: usize) {
        let mut written = 0;
        for c in text.chars().take(width) {
            self.0.push(if c == ' ' || c.is_ascii_graphic() {
                c
            } else {
                '?'
            });
            written += 1;
        }
        self.blank(width - written);
    }
}
