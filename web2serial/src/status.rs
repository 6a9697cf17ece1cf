use log::*;
use scoreboard_common::{
    game_state::{GameState, ScoreSet},
    side::Side,
};
use std::{
    fmt::{self, Display, Formatter},
    io::{self, IsTerminal, Write},
};

/// Receives every state that arrives, whether or not it gets pushed to the display.
pub trait StatusView {
    fn show(&mut self, state: &GameState);
}

impl<T: StatusView + ?Sized> StatusView for Box<T> {
    fn show(&mut self, state: &GameState) {
        (**self).show(state)
    }
}

/// Human readable rendering of a [`GameState`].
pub struct Status<'a>(pub &'a GameState);

struct Team<'a>(Side, &'a ScoreSet);

impl Display for Team<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let Team(side, team) = self;
        writeln!(f, "{side}: {{")?;
        writeln!(f, "  Name: {}", team.name)?;
        writeln!(f, "  Score: {:02}", team.score)?;
        writeln!(f, "  Fouls: {}", team.fouls)?;
        writeln!(f, "  TOL: {}", team.tol)?;
        writeln!(f, "  Poss? {}", team.poss)?;
        writeln!(f, "}}")
    }
}

impl Display for Status<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let state = self.0;
        for (side, team) in state.teams().iter() {
            write!(f, "{}", Team(side, team))?;
        }

        let game = &state.game;
        writeln!(f, "Game: {{")?;
        writeln!(
            f,
            "  Time: {:02}{}{:02}",
            game.clock_left, game.clock_middle, game.clock_right
        )?;
        writeln!(f, "  Period: {}", game.period)?;
        writeln!(f, "  Shotclock: {}", game.shot_clock)?;
        writeln!(f, "  TimeOut? {}", game.time_out)?;
        writeln!(f, "}}")
    }
}

const CURSOR_HOME: &str = "\x1b[H";
const CLEAR_LINE: &str = "\x1b[K";
const CLEAR_BELOW: &str = "\x1b[J";

/// Redraws the status block on a console.
pub struct ConsoleStatus<W: Write> {
    out: W,
    redraw_in_place: bool,
}

impl ConsoleStatus<io::Stdout> {
    pub fn stdout() -> Self {
        let mut status = Self::new(io::stdout());
        status.redraw_in_place = status.out.is_terminal();
        status
    }
}

impl<W: Write> ConsoleStatus<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            redraw_in_place: false,
        }
    }

    fn draw(&mut self, state: &GameState) -> io::Result<()> {
        if !self.redraw_in_place {
            write!(self.out, "{}", Status(state))?;
            return self.out.flush();
        }

        // Overwrite the previous block line by line, clearing whatever it left behind
        write!(self.out, "{CURSOR_HOME}")?;
        for line in Status(state).to_string().lines() {
            writeln!(self.out, "{line}{CLEAR_LINE}")?;
        }
        write!(self.out, "{CLEAR_BELOW}")?;
        self.out.flush()
    }
}

impl<W: Write> StatusView for ConsoleStatus<W> {
    fn show(&mut self, state: &GameState) {
        if let Err(e) = self.draw(state) {
            warn!("Failed to draw the game state: {e}");
        }
    }
}

/// Sends the status block to the log instead of the console.
#[derive(Debug, Default)]
pub struct LogStatus;

impl StatusView for LogStatus {
    fn show(&mut self, state: &GameState) {
        trace!("Received game state:\n{}", Status(state));
    }
}
