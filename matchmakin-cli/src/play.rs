//! Play command - interactive terminal front-end
//!
//! ## Architecture (4-layer granularity)
//!
//! - Level 1: run() - orchestration
//! - Level 2: open_session(), run_loop()
//! - Level 3: parse_command(), Terminal rendering and prompts
//! - Level 4: names file loading

use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;

use matchmakin_core::{
    parse_names, Intent, NamePrompt, Outcome, PlayerId, PlayerStatus, Roster, RosterView,
    SelectionMode, Session, SessionError,
};

const HELP: &str = "\
commands:
  1-7          press a player (fight, or rename/delete in those modes)
  r, rename    toggle rename mode
  d, delete    toggle delete mode
  u, undo      undo the last fight
  reset        fold the history back into the opponent pool
  n, new       start a new game
  h, help      show this help
  q, quit      leave
";

// ============================================================================
// COMMAND ARGUMENTS (Level 4 - Configuration)
// ============================================================================

#[derive(Args)]
pub struct PlayArgs {
    /// Read the seven starting names from a file instead of prompting
    #[arg(long, value_name = "FILE")]
    pub names: Option<PathBuf>,
}

/// One line of terminal input
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Command {
    Intent(Intent),
    Help,
    Quit,
}

// ============================================================================
// LEVEL 1 - ORCHESTRATION
// ============================================================================

/// Run play command
///
/// 1. Collect the starting roster (file or prompt; cancel exits)
/// 2. Loop: render, read a command, dispatch it
pub fn run(args: PlayArgs) -> Result<()> {
    let stdin = io::stdin();
    let mut terminal = Terminal::new(stdin.lock(), io::stdout());

    let Some(session) = open_session(&args, &mut terminal)? else {
        println!("No roster entered, exiting.");
        return Ok(());
    };

    run_loop(session, &mut terminal)?;
    Ok(())
}

// ============================================================================
// LEVEL 2 - PHASES
// ============================================================================

/// Build the first game; None when the user cancels name entry
fn open_session<R: BufRead, W: Write>(
    args: &PlayArgs,
    terminal: &mut Terminal<R, W>,
) -> Result<Option<Session>> {
    if let Some(path) = &args.names {
        let roster = load_roster(path)?;
        return Ok(Some(Session::with_roster(roster)));
    }

    match Session::start(terminal) {
        Ok(session) => Ok(Some(session)),
        Err(SessionError::Cancelled) => Ok(None),
        Err(err) => Err(err.into()),
    }
}

/// Render and dispatch until quit, EOF, or a cancelled new game
fn run_loop<R: BufRead, W: Write>(
    mut session: Session,
    terminal: &mut Terminal<R, W>,
) -> Result<Session> {
    loop {
        terminal.render(&session.view())?;

        let Some(line) = terminal.read_line() else {
            break;
        };

        let command = match parse_command(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(err) => {
                terminal.say(&format!("{err:#}\n"));
                continue;
            }
        };

        match command {
            Command::Quit => break,
            Command::Help => terminal.say(HELP),
            Command::Intent(intent) => match session.dispatch(intent, &mut *terminal) {
                Ok(Outcome::Ignored) => terminal.say("nothing changed\n"),
                Ok(outcome) => tracing::debug!(?outcome, "applied"),
                Err(SessionError::Cancelled) => break,
                Err(err) => terminal.say(&format!("{err}\n")),
            },
        }
    }

    Ok(session)
}

// ============================================================================
// LEVEL 3 - STEPS
// ============================================================================

/// Parse one input line; empty lines yield None
fn parse_command(line: &str) -> Result<Option<Command>> {
    let word = line.trim().to_ascii_lowercase();

    let command = match word.as_str() {
        "" => return Ok(None),
        "r" | "rename" => Command::Intent(Intent::ToggleRename),
        "d" | "delete" => Command::Intent(Intent::ToggleDelete),
        "u" | "undo" => Command::Intent(Intent::Undo),
        "reset" => Command::Intent(Intent::Reset),
        "n" | "new" => Command::Intent(Intent::NewGame),
        "h" | "help" | "?" => Command::Help,
        "q" | "quit" | "exit" => Command::Quit,
        other => {
            let raw: u8 = other
                .parse()
                .with_context(|| format!("unknown command '{other}' (h for help)"))?;
            Command::Intent(Intent::Player(PlayerId::new(raw)?))
        }
    };

    Ok(Some(command))
}

/// Line-based terminal front-end over any reader/writer pair
pub struct Terminal<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Terminal<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Next line without its line ending; None on EOF
    fn read_line(&mut self) -> Option<String> {
        let mut line = String::new();
        match self.input.read_line(&mut line) {
            Ok(0) => None,
            Ok(_) => Some(line.trim_end_matches(['\r', '\n']).to_string()),
            Err(err) => {
                tracing::warn!("failed to read input: {}", err);
                None
            }
        }
    }

    fn say(&mut self, text: &str) {
        let result = self
            .output
            .write_all(text.as_bytes())
            .and_then(|_| self.output.flush());
        if let Err(err) = result {
            tracing::warn!("failed to write output: {}", err);
        }
    }

    /// Draw player buttons and the two status lines
    fn render(&mut self, view: &RosterView) -> io::Result<()> {
        let buttons: Vec<String> = view
            .players
            .iter()
            .filter_map(|player| match player.status {
                PlayerStatus::Eligible => Some(format!("[{} {}]", player.id, player.name)),
                PlayerStatus::Resting => Some(format!("({} {})", player.id, player.name)),
                PlayerStatus::Deleted => None,
            })
            .collect();

        writeln!(self.output)?;
        writeln!(self.output, "{}", buttons.join("  "))?;
        writeln!(self.output, "{}", view.opponents_line)?;
        writeln!(self.output, "{}", view.history_line)?;
        match view.mode {
            SelectionMode::Normal => {}
            SelectionMode::Rename => writeln!(self.output, "-- rename: press a player --")?,
            SelectionMode::Delete => writeln!(self.output, "-- delete: press a player --")?,
        }
        write!(self.output, "> ")?;
        self.output.flush()
    }
}

impl<R: BufRead, W: Write> NamePrompt for Terminal<R, W> {
    /// Read names until a blank line, re-prompting until there are seven
    fn roster_names(&mut self) -> Option<Vec<String>> {
        loop {
            self.say("Enter 7 names on new lines, then a blank line (Ctrl-D to quit):\n");

            let mut text = String::new();
            loop {
                let line = self.read_line()?;
                if line.trim().is_empty() {
                    if text.is_empty() {
                        continue;
                    }
                    break;
                }
                text.push_str(&line);
                text.push('\n');
            }

            match parse_names(&text) {
                Ok(names) => return Some(names),
                Err(err) => self.say(&format!("{err}\n")),
            }
        }
    }

    fn replacement_name(&mut self, id: PlayerId, current: &str) -> Option<String> {
        self.say(&format!("New name for player {id} [{current}]: "));
        let line = self.read_line()?;
        let name = line.trim();
        if name.is_empty() {
            None
        } else {
            Some(name.to_string())
        }
    }
}

// ============================================================================
// LEVEL 4 - UTILITIES
// ============================================================================

/// Load seven names (one per line, blanks ignored) into a fresh roster
pub fn load_roster(path: &Path) -> Result<Roster> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read names file: {}", path.display()))?;
    let names = parse_names(&text)
        .with_context(|| format!("Invalid names file: {}", path.display()))?;
    Ok(Roster::initialize(names)?)
}

// ============================================================================
// TESTS
// ============================================================================
