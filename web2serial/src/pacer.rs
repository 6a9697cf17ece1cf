use crate::serial::SerialLine;
use log::*;
use scoreboard_common::game_state::GameState;
use serial_frame::Frame;
use tokio::time::{Duration, Instant};

pub const DEFAULT_INTERVAL: Duration = Duration::from_millis(200);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PushOutcome {
    Pushed,
    TooSoon,
    LineClosed,
    WriteFailed,
}

/// Limits how often frames reach the display, however fast states arrive.
#[derive(Debug)]
pub struct Pacer {
    interval: Duration,
    last_push: Instant,
}

impl Pacer {
    /// The stopwatch starts at `now`, so nothing is pushed until one interval has passed.
    pub fn new(interval: Duration, now: Instant) -> Self {
        Self {
            interval,
            last_push: now,
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn elapsed(&self, now: Instant) -> Duration {
        now.saturating_duration_since(self.last_push)
    }

    pub fn reset(&mut self, now: Instant) {
        self.last_push = now;
    }

    pub fn is_due(&self, now: Instant) -> bool {
        self.elapsed(now) > self.interval
    }

    /// Encodes and writes `state` if the interval has passed since the last push.
    ///
    /// A closed line or a failed write only skips this push, the stopwatch restarts either way.
    pub fn offer<L: SerialLine + ?Sized>(
        &mut self,
        state: &GameState,
        now: Instant,
        line: &mut L,
    ) -> PushOutcome {
        trace!("Time passed since last push: {:?}", self.elapsed(now));
        if !self.is_due(now) {
            return PushOutcome::TooSoon;
        }
        self.reset(now);

        if !line.is_open() {
            debug!("Serial line is not open, skipping push");
            return PushOutcome::LineClosed;
        }

        let frame = Frame::encode(state);
        match line.write(&frame.to_line()) {
            Ok(()) => {
                trace!("Pushed frame \"{frame}\"");
                PushOutcome::Pushed
            }
            Err(e) => {
                warn!("Error writing to serial port: {e}");
                PushOutcome::WriteFailed
            }
        }
    }
}
