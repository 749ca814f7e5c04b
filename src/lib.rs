use std::{fmt::Display, path::PathBuf, str::FromStr, time::Duration};

use clap::Parser;

use codec::Separator;
use deck::{DeckError, DeckStore};
use modes::{pick::pick_title, study::study};
use scheduler::Session;
use terminal::TerminalWrapper;
use training::{TrainingError, TrainingStore};

mod cli;
pub mod codec;
pub mod deck;
mod modes;
mod random;
pub mod scheduler;
mod terminal;
pub mod training;

pub use modes::study::StudySummary;

const DECK_ROOT_DIR_NAME: &str = "decks";
const TRAINING_ROOT_DIR_NAME: &str = "training_data";
const DEFAULT_HOME_BASE_PATH: &str = ".config/quizr";

///Seconds between ambient questions in watch mode.
const PEEK_INTERVAL_SECONDS: u64 = 15;

pub fn run() -> Result<Option<StudySummary>, QuizrError> {
    let cli = cli::QuizrCli::parse();
    let (decks, training) = open_stores(cli.root)?;
    let separator = cli.separator;

    match cli.mode {
        Mode::Study => run_study(&decks, &training, separator, cli.count, cli.title),
        Mode::List => {
            for title in decks.titles()? {
                println!("{title}");
            }
            Ok(None)
        }
        Mode::New => {
            let title = cli.title.ok_or(ArgError::MissingTitle(Mode::New))?;
            decks.create(&title, None, separator)?;
            println!("Created deck \"{title}\"");
            Ok(None)
        }
        Mode::Open => {
            let Some(title) = resolve_title(cli.title, &decks, "Open deck")? else {
                return Ok(None);
            };
            let path = decks.open(&title)?;
            match std::env::var_os("EDITOR") {
                Some(editor) => {
                    let status = std::process::Command::new(editor)
                        .arg(&path)
                        .status()
                        .map_err(|err| DeckError::IoError(path, err))?;
                    if !status.success() {
                        eprintln!("Editor exited with {status}");
                    }
                }
                None => println!("{}", path.display()),
            }
            Ok(None)
        }
        Mode::Delete => {
            let Some(title) = resolve_title(cli.title, &decks, "Delete deck")? else {
                return Ok(None);
            };
            decks.delete(&title)?;
            println!("Deleted deck \"{title}\"");
            Ok(None)
        }
        Mode::Reset => {
            let Some(title) = resolve_title(cli.title, &decks, "Reset training data")? else {
                return Ok(None);
            };
            decks.open(&title)?;
            training.reset(&title)?;
            println!("Reset training data for deck \"{title}\"");
            Ok(None)
        }
        Mode::Peek => {
            let rng = &mut rand::thread_rng();
            loop {
                if let Some(question) = scheduler::peek(&decks, separator, rng)? {
                    println!("{question}");
                }
                if !cli.watch {
                    break;
                }
                std::thread::sleep(Duration::from_secs(PEEK_INTERVAL_SECONDS));
            }
            Ok(None)
        }
    }
}

fn run_study(
    decks: &DeckStore,
    training: &TrainingStore,
    separator: Separator,
    count: Option<usize>,
    title: Option<String>,
) -> Result<Option<StudySummary>, QuizrError> {
    let Some(title) = resolve_title(title, decks, "Select deck")? else {
        return Ok(None);
    };

    let (mut session, invalid_lines) = Session::load(&title, decks, training, separator)?;
    for line in &invalid_lines {
        eprintln!("Warning: deck \"{title}\" line {line} is not a valid card");
    }

    std::panic::catch_unwind(move || -> Result<Option<StudySummary>, QuizrError> {
        //NOTE: stdout/stderr are not usable while the terminal is in
        //raw mode, so panics raised here are caught and reported once
        //the screen is restored.
        let term = &mut TerminalWrapper::new().map_err(UiError::IoError)?;
        let rng = &mut rand::thread_rng();
        study(term, &mut session, training, count, rng).map(Some)
    })
    .map_err(|err| QuizrError::Panic(panic_message(err)))?
}

fn resolve_title(
    title: Option<String>,
    decks: &DeckStore,
    prompt: &str,
) -> Result<Option<String>, QuizrError> {
    if let Some(title) = title {
        return Ok(Some(title));
    }

    let titles = decks.titles()?;
    std::panic::catch_unwind(|| -> Result<Option<String>, QuizrError> {
        let term = &mut TerminalWrapper::new().map_err(UiError::IoError)?;
        pick_title(term, prompt, &titles)
    })
    .map_err(|err| QuizrError::Panic(panic_message(err)))?
}

fn open_stores(root: Option<PathBuf>) -> Result<(DeckStore, TrainingStore), QuizrError> {
    let base = match root {
        Some(base) => base,
        None => {
            let mut path = dirs::home_dir().ok_or(DeckError::NoHomeDir())?;
            path.push(DEFAULT_HOME_BASE_PATH);
            path
        }
    };

    let decks = DeckStore::new(
        base.join(DECK_ROOT_DIR_NAME),
        base.join(TRAINING_ROOT_DIR_NAME),
    )?;
    let training = TrainingStore::new(base.join(TRAINING_ROOT_DIR_NAME))?;

    Ok((decks, training))
}

fn panic_message(err: Box<dyn std::any::Any + Send>) -> String {
    if let Some(msg) = err.downcast_ref::<String>() {
        msg.clone()
    } else if let Some(msg) = err.downcast_ref::<&str>() {
        (*msg).to_owned()
    } else {
        "Unknown panic occurred".to_owned()
    }
}

#[derive(Clone, Copy, Debug)]
pub enum Mode {
    Study,
    List,
    New,
    Open,
    Delete,
    Reset,
    Peek,
}

impl FromStr for Mode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.to_lowercase();

        if s == "study" {
            Ok(Self::Study)
        } else if s == "list" {
            Ok(Self::List)
        } else if s == "new" {
            Ok(Self::New)
        } else if s == "open" {
            Ok(Self::Open)
        } else if s == "delete" {
            Ok(Self::Delete)
        } else if s == "reset" {
            Ok(Self::Reset)
        } else if s == "peek" {
            Ok(Self::Peek)
        } else {
            Err(format!("Mode argument not recognized: {s}"))
        }
    }
}

impl Display for Mode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Mode::Study => "study",
            Mode::List => "list",
            Mode::New => "new",
            Mode::Open => "open",
            Mode::Delete => "delete",
            Mode::Reset => "reset",
            Mode::Peek => "peek",
        })
    }
}

#[derive(Debug)]
pub enum QuizrError {
    Deck(DeckError),
    Training(TrainingError),
    Ui(UiError),
    Arg(ArgError),
    Panic(String),
}

impl Display for QuizrError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Deck(err) => f.write_fmt(format_args!("Deck: {err}")),
            Self::Training(err) => f.write_fmt(format_args!("Training: {err}")),
            Self::Ui(err) => f.write_fmt(format_args!("Ui: {err}")),
            Self::Arg(err) => f.write_fmt(format_args!("Arg: {err}")),
            Self::Panic(err) => f.write_fmt(format_args!("Panicked: {err}")),
        }
    }
}

impl From<DeckError> for QuizrError {
    fn from(err: DeckError) -> Self {
        Self::Deck(err)
    }
}

impl From<TrainingError> for QuizrError {
    fn from(err: TrainingError) -> Self {
        Self::Training(err)
    }
}

impl From<UiError> for QuizrError {
    fn from(err: UiError) -> Self {
        Self::Ui(err)
    }
}

impl From<ArgError> for QuizrError {
    fn from(err: ArgError) -> Self {
        Self::Arg(err)
    }
}

#[derive(Debug)]
pub enum UiError {
    IoError(std::io::Error),
}

impl Display for UiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::IoError(err) => f.write_fmt(format_args!("IoError: {err}")),
        }
    }
}

impl From<std::io::Error> for UiError {
    fn from(err: std::io::Error) -> Self {
        UiError::IoError(err)
    }
}

#[derive(Debug)]
pub enum ArgError {
    MissingTitle(Mode),
}

impl Display for ArgError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingTitle(mode) => f.write_fmt(format_args!(
                "Mode \"{mode}\" requires a deck title argument"
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::Mode;

    #[test]
    fn mode_display_round_trips() {
        for mode in ["study", "list", "new", "open", "delete", "reset", "peek"] {
            let parsed = mode.parse::<Mode>().expect("Unable to parse mode");
            assert_eq!(parsed.to_string(), mode);
        }
    }

    #[test]
    fn unknown_mode_is_rejected() {
        assert!("export".parse::<Mode>().is_err());
    }
}
