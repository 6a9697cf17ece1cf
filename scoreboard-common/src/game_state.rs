use crate::bundles::HomeAwayBundle;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Clock and period data for the game as a whole.
#[derive(Debug, Default, PartialEq, Clone, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GameSettings {
    pub clock_left: i32,
    pub clock_right: i32,
    /// Separator glyph shown between the two halves of the clock, usually `":"` or `"."`
    pub clock_middle: String,
    pub period: i32,
    pub shot_clock: f64,
    pub time_out_clock: f64,
    pub time_out: bool,
    pub clock_running: bool,
    pub shot_clock_running: bool,
    pub shot_clock_disabled: bool,
}

#[derive(Debug, Default, PartialEq, Eq, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoreSet {
    pub name: String,
    pub score: i32,
    pub fouls: i32,
    /// Time-outs left
    pub tol: i32,
    /// Possession
    pub poss: bool,
}

/// A single snapshot of the scoreboard, as received from the score keeping software.
///
/// Fields missing from the JSON take their default value, unknown fields are ignored.
#[derive(Debug, Default, PartialEq, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GameState {
    pub game: GameSettings,
    pub home: ScoreSet,
    pub away: ScoreSet,
}

#[derive(Debug, Error)]
pub enum DecodingError {
    #[error("Datagram is not valid UTF-8: {0}")]
    Utf8(#[from] std::str::Utf8Error),
    #[error("Datagram is not a valid game state: {0}")]
    Json(#[from] serde_json::Error),
}

impl GameState {
    pub fn decode(bytes: &[u8]) -> Result<Self, DecodingError> {
        let text = std::str::from_utf8(bytes)?;
        Ok(serde_json::from_str(text)?)
    }

    pub fn teams(&self) -> HomeAwayBundle<&ScoreSet> {
        HomeAwayBundle {
            home: &self.home,
            away: &self.away,
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::side::Side;

    const FULL: &str = r#"{
        "game": {
            "clockLeft": 5,
            "clockRight": 30,
            "clockMiddle": ":",
            "period": 4,
            "shotClock": 24.0,
            "timeOutClock": 0.0,
            "timeOut": false,
            "clockRunning": true,
            "shotClockRunning": true,
            "shotClockDisabled": false
        },
        "home": { "name": "Lakers", "score": 88, "fouls": 8, "tol": 2, "poss": true },
        "away": { "name": "Celtics", "score": 91, "fouls": 3, "tol": 1, "poss": false }
    }"#;

    #[test]
    fn test_decode_full() {
        let state = GameState::decode(FULL.as_bytes()).unwrap();
        assert_eq!(state.game.clock_left, 5);
        assert_eq!(state.game.clock_right, 30);
        assert_eq!(state.game.clock_middle, ":");
        assert_eq!(state.game.period, 4);
        assert_eq!(state.game.shot_clock, 24.0);
        assert!(state.game.clock_running);
        assert!(state.game.shot_clock_running);
        assert!(!state.game.shot_clock_disabled);
        assert_eq!(
            state.home,
            ScoreSet {
                name: "Lakers".to_string(),
                score: 88,
                fouls: 8,
                tol: 2,
                poss: true,
            }
        );
        assert_eq!(state.teams()[Side::Away].name, "Celtics");
        assert_eq!(state.teams()[Side::Away].score, 91);
        assert_eq!(state.teams()[Side::Home].score, 88);
    }

    #[test]
    fn test_decode_missing_fields_default() {
        let state = GameState::decode(br#"{"home": {"score": 3}, "extra": [1, 2]}"#).unwrap();
        assert_eq!(state.home.score, 3);
        assert_eq!(state.home.name, "");
        assert_eq!(state.away, ScoreSet::default());
        assert_eq!(state.game, GameSettings::default());
    }

    #[test]
    fn test_decode_rejects_garbage() {
        assert!(matches!(
            GameState::decode(b"handshake"),
            Err(DecodingError::Json(_))
        ));
        assert!(matches!(
            GameState::decode(&[0x7b, 0xff, 0xfe, 0x7d]),
            Err(DecodingError::Utf8(_))
        ));
        assert!(matches!(
            GameState::decode(br#"{"home": {"name": null}}"#),
            Err(DecodingError::Json(_))
        ));
        assert!(matches!(
            GameState::decode(br#"{"game": {"period": "four"}}"#),
            Err(DecodingError::Json(_))
        ));
    }

    #[test]
    fn test_serialize_uses_wire_names() {
        let state = GameState::decode(FULL.as_bytes()).unwrap();
        let json = serde_json::to_string(&state).unwrap();
        assert!(json.contains("\"clockLeft\":5"));
        assert!(json.contains("\"shotClockRunning\":true"));
        assert!(json.contains("\"tol\":2"));
        assert_eq!(GameState::decode(json.as_bytes()).unwrap(), state);
    }
}
