//! Line-oriented console driver.
//!
//! Reads answers from any [`BufRead`] and writes prompts and reports to any
//! [`Write`], so a whole session can be scripted from a string in tests. The
//! driver only validates input and renders results; every rule lives in
//! [`crate::game`]. End of input at any prompt ends the session gracefully.

use std::fmt;
use std::io::{self, BufRead, Write};
use std::str::FromStr;

use tracing::{info, warn};

use crate::config::{PlayerSpec, SessionConfig};
use crate::error::GameError;
use crate::game::{
    MenuChoice, MenuOutcome, MissionCatalog, RandomSource, Registry, Session, SessionState,
    SessionSummary, Territory,
};
use crate::render::{render_battle, render_error, render_map, render_mission, render_victory};

const MAIN_MENU: &str =
    "\n=== MAIN MENU ===\n1 - Show map\n2 - Attack\n0 - Exit\nChoose an option: ";

/// Error that stops the console driver.
#[derive(Debug)]
pub enum ConsoleError {
    /// Reading or writing the terminal failed.
    Io(io::Error),
    /// The engine reported a fatal error.
    Game(GameError),
}

impl fmt::Display for ConsoleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "console I/O failed: {e}"),
            Self::Game(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for ConsoleError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::Game(e) => Some(e),
        }
    }
}

impl From<io::Error> for ConsoleError {
    fn from(e: io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<GameError> for ConsoleError {
    fn from(e: GameError) -> Self {
        Self::Game(e)
    }
}

/// Result type for console operations.
pub type ConsoleResult<T> = Result<T, ConsoleError>;

/// A prompt/answer terminal.
#[derive(Debug)]
pub struct Console<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Console<R, W> {
    /// Wrap an input and an output stream.
    pub const fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Give back the wrapped streams.
    pub fn into_parts(self) -> (R, W) {
        (self.input, self.output)
    }

    /// Write text as-is.
    ///
    /// # Errors
    ///
    /// Returns an error if the output cannot be written.
    pub fn say(&mut self, text: &str) -> io::Result<()> {
        self.output.write_all(text.as_bytes())
    }

    /// Print `prompt` and read one trimmed line. `None` at end of input.
    ///
    /// # Errors
    ///
    /// Returns an error if the terminal cannot be read or written.
    pub fn ask(&mut self, prompt: &str) -> io::Result<Option<String>> {
        self.output.write_all(prompt.as_bytes())?;
        self.output.flush()?;
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    /// Like [`Console::ask`], skipping blank lines.
    ///
    /// # Errors
    ///
    /// Returns an error if the terminal cannot be read or written.
    pub fn ask_text(&mut self, prompt: &str) -> io::Result<Option<String>> {
        loop {
            match self.ask(prompt)? {
                Some(line) if line.is_empty() => {}
                other => return Ok(other),
            }
        }
    }

    /// Ask until the answer parses as `T` and passes `accept`.
    ///
    /// # Errors
    ///
    /// Returns an error if the terminal cannot be read or written.
    pub fn ask_number<T, F>(
        &mut self,
        prompt: &str,
        retry: &str,
        accept: F,
    ) -> io::Result<Option<T>>
    where
        T: FromStr,
        F: Fn(&T) -> bool,
    {
        loop {
            let Some(line) = self.ask(prompt)? else {
                return Ok(None);
            };
            match line.parse::<T>() {
                Ok(value) if accept(&value) => return Ok(Some(value)),
                _ => self.say(retry)?,
            }
        }
    }
}

/// Register territories interactively.
///
/// # Errors
///
/// Returns [`ConsoleError::Game`] with [`GameError::AllocationFailure`] if the
/// map cannot be allocated, or an I/O error.
pub fn register_territories<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    config: &SessionConfig,
) -> ConsoleResult<Option<Registry>> {
    let count = config.territories;
    let mut registry = Registry::create(count)?;

    console.say("=== Territory registration ===\n")?;
    for i in 0..count {
        console.say(&format!("\n--- Territory {} ---\n", i + 1))?;

        let Some(name) = console.ask_text("Territory name (e.g. America, Asia): ")? else {
            return Ok(None);
        };
        let name = config.clip_name(&name);

        let color = loop {
            let Some(color) = console.ask_text("Army color (e.g. Blue, Green, Yellow): ")? else {
                return Ok(None);
            };
            let color = config.clip_color(&color);
            let taken = config
                .unique_territory_colors
                .then(|| registry.territories()[..i].iter().find(|t| t.color == color))
                .flatten();
            match taken {
                Some(owner) => {
                    console.say(&format!(
                        "Color already used by territory {}. Choose another color.\n",
                        owner.name
                    ))?;
                }
                None => break color,
            }
        };

        let Some(troops) = console.ask_number::<u32, _>(
            "Troops: ",
            "Enter a whole number of troops (0 or more).\n",
            |_| true,
        )?
        else {
            return Ok(None);
        };

        registry.set(i, Territory::new(name, color, troops));
    }
    Ok(Some(registry))
}

/// Register players interactively.
///
/// # Errors
///
/// Returns an I/O error if the terminal fails.
pub fn register_players<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    config: &SessionConfig,
) -> ConsoleResult<Option<Vec<PlayerSpec>>> {
    let prompt = format!(
        "\nNumber of players ({}-{}): ",
        config.min_players, config.max_players
    );
    let retry = format!(
        "The number of players must be between {} and {}.\n",
        config.min_players, config.max_players
    );
    let Some(count) =
        console.ask_number::<usize, _>(&prompt, &retry, |n| config.players_allowed(*n))?
    else {
        return Ok(None);
    };

    let mut players = Vec::with_capacity(count);
    for i in 0..count {
        console.say(&format!("\n--- Player {} ---\n", i + 1))?;
        let Some(name) = console.ask_text("Player name: ")? else {
            return Ok(None);
        };
        let Some(color) = console.ask_text("Player color: ")? else {
            return Ok(None);
        };
        players.push(PlayerSpec {
            name: config.clip_name(&name),
            color: config.clip_color(&color),
        });
    }
    Ok(Some(players))
}

/// Run the main menu until the session ends.
///
/// # Errors
///
/// Returns an I/O error if the terminal fails.
pub fn play<R: BufRead, W: Write, D: RandomSource>(
    console: &mut Console<R, W>,
    session: &mut Session<D>,
) -> ConsoleResult<()> {
    while !session.is_over() {
        let Some(line) = console.ask(MAIN_MENU)? else {
            session.menu(MenuChoice::Exit)?;
            break;
        };
        match session.menu(MenuChoice::from_input(&line)) {
            Ok(MenuOutcome::ShowMap) => console.say(&render_map(session.registry()))?,
            Ok(MenuOutcome::AttackPhase { revealed }) => {
                for index in revealed {
                    if let Some(player) = session.players().get(index) {
                        console.say(&render_mission(player))?;
                    }
                }
                attack_phase(console, session)?;
            }
            Ok(MenuOutcome::Exited) => console.say("Leaving the game...\n")?,
            Err(e) if e.is_recoverable() => console.say(&render_error(&e))?,
            Err(e) => return Err(e.into()),
        }
    }
    Ok(())
}

/// Accept attack orders until the players stop or a mission is fulfilled.
fn attack_phase<R: BufRead, W: Write, D: RandomSource>(
    console: &mut Console<R, W>,
    session: &mut Session<D>,
) -> ConsoleResult<()> {
    while session.state() == SessionState::AttackInProgress {
        console.say("\n=== ATTACK PHASE ===\n")?;
        // Both names are read before either lookup, so a bad origin is only
        // reported after the destination has been entered.
        let Some(origin) = console.ask_text("Origin territory: ")? else {
            return end_of_input(session);
        };
        let Some(destination) = console.ask_text("Destination territory: ")? else {
            return end_of_input(session);
        };

        let turn = session.attack(&origin, &destination)?;
        match &turn.battle {
            Ok(report) => console.say(&render_battle(report))?,
            Err(e) => console.say(&render_error(e))?,
        }
        if let Some(victory) = &turn.victory {
            console.say(&render_victory(victory))?;
            return Ok(());
        }
        // A name that matched nothing goes straight back to the origin prompt.
        if matches!(turn.battle, Err(GameError::NotFound(_))) {
            continue;
        }

        let Some(answer) = console.ask("Attack again? (1 - Yes, 0 - No): ")? else {
            return end_of_input(session);
        };
        // Only an explicit 0 stops; anything unreadable keeps attacking.
        let answer = answer.parse::<i64>().unwrap_or(1);
        session.continue_attacking(answer)?;
    }
    Ok(())
}

fn end_of_input<D: RandomSource>(session: &mut Session<D>) -> ConsoleResult<()> {
    if session.state() == SessionState::AttackInProgress {
        session.continue_attacking(0)?;
    }
    session.menu(MenuChoice::Exit)?;
    Ok(())
}

/// Set up and play a whole session.
///
/// Uses the prepared setup from `config` when present, otherwise registers
/// territories and players on the console. Missions are drawn from `dice` in
/// player order before play starts.
///
/// # Errors
///
/// Returns an error on terminal failure or a fatal engine error.
pub fn run<R: BufRead, W: Write, D: RandomSource>(
    console: &mut Console<R, W>,
    config: &SessionConfig,
    dice: D,
    seed: Option<u64>,
) -> ConsoleResult<Option<SessionSummary>> {
    let (registry, roster) = if let Some(setup) = &config.setup {
        let territories = setup
            .territories
            .iter()
            .map(|t| {
                Territory::new(
                    config.clip_name(&t.name),
                    config.clip_color(&t.color),
                    t.troops,
                )
            })
            .collect();
        let roster = setup
            .players
            .iter()
            .map(|p| PlayerSpec {
                name: config.clip_name(&p.name),
                color: config.clip_color(&p.color),
            })
            .collect();
        (Registry::from_territories(territories), roster)
    } else {
        let Some(registry) = register_territories(console, config)? else {
            warn!("input ended during territory registration");
            return Ok(None);
        };
        let Some(roster) = register_players(console, config)? else {
            warn!("input ended during player registration");
            return Ok(None);
        };
        (registry, roster)
    };

    info!(
        seed,
        territories = registry.len(),
        players = roster.len(),
        "session started"
    );

    let catalog = MissionCatalog::standard();
    let mut session = Session::deal(
        registry,
        roster.into_iter().map(|p| (p.name, p.color)),
        &catalog,
        dice,
    );
    if let Some(seed) = seed {
        session = session.with_seed(seed);
    }

    play(console, &mut session)?;
    console.say("Session over.\n")?;
    Ok(Some(session.summary()))
}
