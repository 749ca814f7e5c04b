/*
 * Copyright (C) 2024 Clownvin <123clownvin@gmail.com>
 *
 * This file is part of Quizr.
 *
 * Quizr is free software: you can redistribute it and/or modify
 * it under the terms of the GNU General Public License as published by
 * the Free Software Foundation, either version 3 of the License, or
 * (at your option) any later version.
 *
 * Quizr is distributed in the hope that it will be useful,
 * but WITHOUT ANY WARRANTY; without even the implied warranty of
 * MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
 * GNU General Public License for more details.
 *
 * You should have received a copy of the GNU General Public License
 * along with Quizr.  If not, see <http://www.gnu.org/licenses/>.
 */

use std::{
    ffi::OsStr,
    fmt::{Debug, Display},
    fs,
    ops::Deref,
    path::{Path, PathBuf},
};

use crate::{
    codec::{self, Separator},
    training::TRAINING_FILE_EXTENSION,
};

pub const DECK_FILE_EXTENSION: &str = "txt";

///A question/answer pair. Within a deck a card is identified by its
///question text; two cards sharing a question share a training entry.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Flashcard {
    pub question: String,
    pub answer: String,
}

///A named, ordered collection of flashcards backed by one text file.
///Immutable once loaded; external edits require a reload to be seen.
pub struct Deck {
    pub title: String,
    pub cards: Vec<Flashcard>,
}

impl Debug for Deck {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Deck")
            .field("title", &self.title)
            .field("cards", &self.cards.len())
            .finish()
    }
}

impl PartialEq for Deck {
    fn eq(&self, other: &Self) -> bool {
        self.title == other.title
    }
}

impl Deref for Deck {
    type Target = Vec<Flashcard>;

    fn deref(&self) -> &Self::Target {
        &self.cards
    }
}

#[derive(Debug)]
pub enum DeckError {
    InvalidTitle(String),
    NotFound(String),
    TrainingNotFound(String),
    AlreadyExists(String),
    Empty(String),
    IoError(PathBuf, std::io::Error),
    NoHomeDir(),
}

impl Display for DeckError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidTitle(title) => f.write_fmt(format_args!(
                "InvalidTitle: \"{title}\" cannot be used as a deck file name"
            )),
            Self::NotFound(title) => {
                f.write_fmt(format_args!("NotFound: Deck \"{title}\" doesn't exist"))
            }
            Self::TrainingNotFound(title) => f.write_fmt(format_args!(
                "TrainingNotFound: Deck \"{title}\" has no training file to delete"
            )),
            Self::AlreadyExists(title) => {
                f.write_fmt(format_args!("AlreadyExists: Deck \"{title}\" already exists"))
            }
            Self::Empty(title) => f.write_fmt(format_args!(
                "Empty: Deck \"{title}\" doesn't have any valid cards"
            )),
            Self::IoError(path, err) => f.write_fmt(format_args!(
                "IoError: {err}, path: {}",
                path.to_str().unwrap_or("unknown")
            )),
            Self::NoHomeDir() => f.write_str("Unable to find user home directory"),
        }
    }
}

///Resolves deck titles to the file pair behind them: the deck text file
///under one root and its sibling training JSON under another. Both
///files are created and deleted together.
pub struct DeckStore {
    deck_root: PathBuf,
    training_root: PathBuf,
}

impl DeckStore {
    pub fn new(
        deck_root: impl Into<PathBuf>,
        training_root: impl Into<PathBuf>,
    ) -> Result<Self, DeckError> {
        let deck_root = deck_root.into();
        let training_root = training_root.into();

        fs::create_dir_all(&deck_root).map_err(|err| DeckError::IoError(deck_root.clone(), err))?;
        fs::create_dir_all(&training_root)
            .map_err(|err| DeckError::IoError(training_root.clone(), err))?;

        Ok(Self {
            deck_root,
            training_root,
        })
    }

    pub fn deck_path(&self, title: &str) -> Result<PathBuf, DeckError> {
        validate_title(title)?;
        Ok(self
            .deck_root
            .join(format!("{title}.{DECK_FILE_EXTENSION}")))
    }

    pub fn training_path(&self, title: &str) -> Result<PathBuf, DeckError> {
        validate_title(title)?;
        Ok(self
            .training_root
            .join(format!("{title}.{TRAINING_FILE_EXTENSION}")))
    }

    ///Lists deck titles in filesystem order; no sorting is promised.
    pub fn titles(&self) -> Result<Vec<String>, DeckError> {
        let files = fs::read_dir(&self.deck_root)
            .map_err(|err| DeckError::IoError(self.deck_root.clone(), err))?
            .filter_map(|file| file.ok())
            .collect::<Vec<_>>();

        let mut titles = Vec::with_capacity(files.len());
        for file in files {
            let path = file.path();
            if file_extension(&path).is_some_and(|ext| ext == DECK_FILE_EXTENSION) {
                if let Some(stem) = path.file_stem().and_then(OsStr::to_str) {
                    titles.push(stem.to_owned());
                }
            }
        }

        Ok(titles)
    }

    ///Writes the deck file and an empty training file. When `contents`
    ///is omitted a single sample card using the active separator is
    ///written. A failure after the deck file is written is reported
    ///without rolling the deck file back.
    pub fn create(
        &self,
        title: &str,
        contents: Option<&str>,
        separator: Separator,
    ) -> Result<(), DeckError> {
        let deck_path = self.deck_path(title)?;
        if deck_path.exists() {
            return Err(DeckError::AlreadyExists(title.to_owned()));
        }

        let sample;
        let contents = match contents {
            Some(contents) => contents,
            None => {
                sample = format!("Question{}Answer", separator.as_str());
                &sample
            }
        };

        fs::write(&deck_path, contents).map_err(|err| DeckError::IoError(deck_path, err))?;

        let training_path = self.training_path(title)?;
        fs::write(&training_path, "{}")
            .map_err(|err| DeckError::IoError(training_path, err))?;

        Ok(())
    }

    ///Returns the deck file path for an external viewer or editor.
    pub fn open(&self, title: &str) -> Result<PathBuf, DeckError> {
        let deck_path = self.deck_path(title)?;
        if !deck_path.exists() {
            return Err(DeckError::NotFound(title.to_owned()));
        }
        Ok(deck_path)
    }

    ///Deletes the deck file, then the training file. The deck file is
    ///checked first; when it is missing nothing is touched. A missing
    ///training file after the deck file existed means the pair was
    ///inconsistent, which is reported rather than repaired.
    pub fn delete(&self, title: &str) -> Result<(), DeckError> {
        let deck_path = self.deck_path(title)?;
        if !deck_path.exists() {
            return Err(DeckError::NotFound(title.to_owned()));
        }

        fs::remove_file(&deck_path).map_err(|err| DeckError::IoError(deck_path, err))?;

        let training_path = self.training_path(title)?;
        if !training_path.exists() {
            return Err(DeckError::TrainingNotFound(title.to_owned()));
        }

        fs::remove_file(&training_path).map_err(|err| DeckError::IoError(training_path, err))
    }

    ///Reads and parses the deck. Invalid lines are returned alongside
    ///the deck as a warning; only a deck with zero usable cards is an
    ///error.
    pub fn load(
        &self,
        title: &str,
        separator: Separator,
    ) -> Result<(Deck, Vec<usize>), DeckError> {
        let deck_path = self.deck_path(title)?;
        if !deck_path.exists() {
            return Err(DeckError::NotFound(title.to_owned()));
        }

        let content = fs::read_to_string(&deck_path)
            .map_err(|err| DeckError::IoError(deck_path, err))?;
        let parsed = codec::parse(&content, separator);

        if parsed.cards.is_empty() {
            return Err(DeckError::Empty(title.to_owned()));
        }

        Ok((
            Deck {
                title: title.to_owned(),
                cards: parsed.cards,
            },
            parsed.invalid_lines,
        ))
    }
}

///Titles become file name stems verbatim, so anything that would
///escape the deck root is rejected.
fn validate_title(title: &str) -> Result<(), DeckError> {
    if title.is_empty()
        || title == "."
        || title == ".."
        || title.contains(['/', '\\'])
    {
        return Err(DeckError::InvalidTitle(title.to_owned()));
    }
    Ok(())
}

fn file_extension(path: &Path) -> Option<&str> {
    path.extension().and_then(OsStr::to_str)
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::path::{Path, PathBuf};

    use crate::codec::Separator;

    use super::{DeckError, DeckStore};

    fn scratch_store(name: &str) -> (DeckStore, PathBuf) {
        let base = Path::new("./tests").join(name);
        let _ = fs::remove_dir_all(&base);
        let store = DeckStore::new(base.join("decks"), base.join("training_data"))
            .expect("Unable to create deck store");
        (store, base)
    }

    #[test]
    fn create_list_load_delete() {
        let (store, base) = scratch_store("deckstore_lifecycle");

        store
            .create("capitals", Some("France,Paris\nJapan,Tokyo"), Separator::Comma)
            .expect("Unable to create deck");

        assert_eq!(store.titles().expect("Unable to list titles"), vec!["capitals"]);
        assert!(base.join("training_data/capitals.json").exists());

        let (deck, invalid_lines) = store
            .load("capitals", Separator::Comma)
            .expect("Unable to load deck");
        assert_eq!(deck.cards.len(), 2);
        assert_eq!(deck.cards[1].answer, "Tokyo");
        assert!(invalid_lines.is_empty());

        store.delete("capitals").expect("Unable to delete deck");
        assert!(store.titles().expect("Unable to list titles").is_empty());
        assert!(!base.join("training_data/capitals.json").exists());
    }

    #[test]
    fn create_writes_sample_card() {
        let (store, _) = scratch_store("deckstore_sample");

        store
            .create("fresh", None, Separator::DoubleHash)
            .expect("Unable to create deck");

        let (deck, _) = store
            .load("fresh", Separator::DoubleHash)
            .expect("Unable to load deck");
        assert_eq!(deck.cards[0].question, "Question");
        assert_eq!(deck.cards[0].answer, "Answer");
    }

    #[test]
    fn create_existing_title_fails() {
        let (store, _) = scratch_store("deckstore_duplicate");

        store
            .create("dup", None, Separator::Comma)
            .expect("Unable to create deck");
        assert!(store
            .create("dup", None, Separator::Comma)
            .is_err_and(|err| matches!(err, DeckError::AlreadyExists(_))));
    }

    #[test]
    fn delete_missing_deck_leaves_training_untouched() {
        let (store, base) = scratch_store("deckstore_delete_missing");

        let orphan = base.join("training_data/ghost.json");
        fs::write(&orphan, "{}").expect("Unable to write orphan training file");

        assert!(store
            .delete("ghost")
            .is_err_and(|err| matches!(err, DeckError::NotFound(_))));
        assert!(orphan.exists());
    }

    #[test]
    fn delete_with_missing_training_file_fails() {
        let (store, base) = scratch_store("deckstore_delete_inconsistent");

        store
            .create("lonely", None, Separator::Comma)
            .expect("Unable to create deck");
        fs::remove_file(base.join("training_data/lonely.json"))
            .expect("Unable to remove training file");

        assert!(store
            .delete("lonely")
            .is_err_and(|err| matches!(err, DeckError::TrainingNotFound(_))));
    }

    #[test]
    fn load_deck_without_valid_cards_fails() {
        let (store, _) = scratch_store("deckstore_empty");

        store
            .create("blank", Some("no separator at all"), Separator::Comma)
            .expect("Unable to create deck");
        assert!(store
            .load("blank", Separator::Comma)
            .is_err_and(|err| matches!(err, DeckError::Empty(_))));
    }

    #[test]
    fn load_reports_invalid_lines_as_warning() {
        let (store, _) = scratch_store("deckstore_warnings");

        store
            .create("mixed", Some("a,b\nbroken line\nc,d"), Separator::Comma)
            .expect("Unable to create deck");

        let (deck, invalid_lines) = store
            .load("mixed", Separator::Comma)
            .expect("Unable to load deck");
        assert_eq!(deck.cards.len(), 2);
        assert_eq!(invalid_lines, vec![2]);
    }

    #[test]
    fn load_missing_deck_fails() {
        let (store, _) = scratch_store("deckstore_load_missing");

        assert!(store
            .load("nope", Separator::Comma)
            .is_err_and(|err| matches!(err, DeckError::NotFound(_))));
    }

    #[test]
    fn titles_ignore_other_files() {
        let (store, base) = scratch_store("deckstore_stray_files");

        store
            .create("real", None, Separator::Comma)
            .expect("Unable to create deck");
        fs::write(base.join("decks/notes.md"), "not a deck")
            .expect("Unable to write stray file");

        assert_eq!(store.titles().expect("Unable to list titles"), vec!["real"]);
    }

    #[test]
    fn titles_with_path_separators_are_rejected() {
        let (store, _) = scratch_store("deckstore_bad_titles");

        for title in ["", ".", "..", "a/b", "a\\b"] {
            assert!(store
                .create(title, None, Separator::Comma)
                .is_err_and(|err| matches!(err, DeckError::InvalidTitle(_))));
        }
    }
}
