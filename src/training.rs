use std::{fmt::Display, ops::Deref, path::PathBuf};

use serde::{de::Visitor, ser::SerializeMap, Deserialize, Serialize};

use crate::deck::Flashcard;

pub const TRAINING_FILE_EXTENSION: &str = "json";

pub type Level = u8;

pub const LEVEL_MIN: Level = 1;
pub const LEVEL_MAX: Level = 10;
pub const LEVEL_DEFAULT: Level = 5;

#[derive(Debug)]
pub enum TrainingError {
    RecordIsDir(PathBuf),
    IoError(PathBuf, std::io::Error),
    Corrupt(PathBuf, serde_json::Error),
}

impl Display for TrainingError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::RecordIsDir(path) => f.write_fmt(format_args!(
                "Training file is a directory: {}",
                path.to_str().unwrap_or("unknown")
            )),
            Self::IoError(path, err) => f.write_fmt(format_args!(
                "IoError: {err}, path: {}",
                path.to_str().unwrap_or("unknown")
            )),
            Self::Corrupt(path, err) => f.write_fmt(format_args!(
                "Corrupt: {err}, path: {}",
                path.to_str().unwrap_or("unknown")
            )),
        }
    }
}

///Stable key of a question within a training record: the question text
///itself. Reversible and unique as long as questions are unique within
///the deck.
#[derive(PartialEq, Eq, Clone, Debug)]
pub struct QuestionId(String);

impl QuestionId {
    pub fn of(question: &str) -> Self {
        Self(question.to_owned())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Deref for QuestionId {
    type Target = String;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl From<&Flashcard> for QuestionId {
    fn from(card: &Flashcard) -> Self {
        Self::of(&card.question)
    }
}

///Per-deck difficulty levels keyed by question. Entries keep their
///insertion order, which is also the JSON document order of the
///backing file, so selection walks them deterministically.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TrainingRecord {
    entries: Vec<(QuestionId, Level)>,
}

impl TrainingRecord {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn level(&self, id: &QuestionId) -> Option<Level> {
        self.entries
            .iter()
            .find(|(existing, _)| existing == id)
            .map(|(_, level)| *level)
    }

    ///Clamps into the valid range before storing; the record never
    ///holds an out-of-range level.
    pub fn set_level(&mut self, id: QuestionId, level: Level) {
        let level = level.clamp(LEVEL_MIN, LEVEL_MAX);
        match self.entries.iter_mut().find(|(existing, _)| *existing == id) {
            Some(entry) => entry.1 = level,
            None => self.entries.push((id, level)),
        }
    }

    ///Entries in insertion order.
    pub fn entries(&self) -> impl Iterator<Item = (&QuestionId, Level)> {
        self.entries.iter().map(|(id, level)| (id, *level))
    }

    ///Inserts the default level for every card missing from the record,
    ///in deck order. Stale entries are never removed, so the record
    ///only grows as decks are edited. Returns whether anything was
    ///added; re-running on a synced record is a no-op.
    pub fn sync(&mut self, cards: &[Flashcard]) -> bool {
        let mut changed = false;
        for card in cards {
            let id = QuestionId::from(card);
            if self.level(&id).is_none() {
                self.entries.push((id, LEVEL_DEFAULT));
                changed = true;
            }
        }
        changed
    }
}

impl Serialize for TrainingRecord {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (id, level) in &self.entries {
            map.serialize_entry(id.as_str(), level)?;
        }
        map.end()
    }
}

struct RecordVisitor;

impl<'de> Visitor<'de> for RecordVisitor {
    type Value = TrainingRecord;

    fn expecting(&self, formatter: &mut std::fmt::Formatter) -> std::fmt::Result {
        formatter.write_str("a map of question text to level")
    }

    fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
    where
        A: serde::de::MapAccess<'de>,
    {
        let mut entries = match map.size_hint() {
            Some(size) => Vec::with_capacity(size),
            None => vec![],
        };

        while let Some((question, level)) = map.next_entry::<String, Level>()? {
            entries.push((QuestionId(question), level.clamp(LEVEL_MIN, LEVEL_MAX)));
        }

        Ok(TrainingRecord { entries })
    }
}

impl<'de> Deserialize<'de> for TrainingRecord {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        deserializer.deserialize_map(RecordVisitor)
    }
}

///Loads and persists training records under one root, one JSON file
///per deck title.
pub struct TrainingStore {
    root: PathBuf,
}

impl TrainingStore {
    pub fn new(root: impl Into<PathBuf>) -> Result<Self, TrainingError> {
        let root = root.into();
        std::fs::create_dir_all(&root).map_err(|err| TrainingError::IoError(root.clone(), err))?;
        Ok(Self { root })
    }

    pub fn path(&self, title: &str) -> PathBuf {
        self.root.join(format!("{title}.{TRAINING_FILE_EXTENSION}"))
    }

    ///Reads and decodes the record. A malformed file is an error the
    ///caller sees immediately; a missing file loads as an empty record.
    pub fn load(&self, title: &str) -> Result<TrainingRecord, TrainingError> {
        let path = self.path(title);

        if let Ok(metadata) = std::fs::metadata(&path) {
            if metadata.is_file() {
                let json = std::fs::read_to_string(&path)
                    .map_err(|err| TrainingError::IoError(path.clone(), err))?;
                serde_json::from_str(&json).map_err(|err| TrainingError::Corrupt(path, err))
            } else {
                Err(TrainingError::RecordIsDir(path))
            }
        } else {
            Ok(TrainingRecord::new())
        }
    }

    ///Overwrites the file with a full snapshot of the record. Single
    ///writer, last write wins; the write is not staged through a temp
    ///file, so a crash mid-write can leave a torn file behind.
    pub fn persist(&self, title: &str, record: &TrainingRecord) -> Result<(), TrainingError> {
        let path = self.path(title);

        if let Some(parent) = path.parent() {
            if !parent.exists() {
                std::fs::create_dir_all(parent)
                    .map_err(|err| TrainingError::IoError(path.clone(), err))?;
            }
        }

        std::fs::write(
            &path,
            serde_json::to_string(record)
                .map_err(|err| TrainingError::Corrupt(path.clone(), err))?,
        )
        .map_err(|err| TrainingError::IoError(path, err))
    }

    ///Drops every recorded level; the next sync re-seeds defaults.
    pub fn reset(&self, title: &str) -> Result<(), TrainingError> {
        self.persist(title, &TrainingRecord::new())
    }
}

#[cfg(test)]
mod tests {
    use crate::deck::Flashcard;

    use super::{
        QuestionId, TrainingError, TrainingRecord, TrainingStore, LEVEL_DEFAULT, LEVEL_MAX,
        LEVEL_MIN,
    };

    fn cards(questions: &[&str]) -> Vec<Flashcard> {
        questions
            .iter()
            .map(|question| Flashcard {
                question: (*question).to_owned(),
                answer: "answer".to_owned(),
            })
            .collect()
    }

    #[test]
    fn sync_seeds_defaults_in_deck_order() {
        let cards = cards(&["b", "a", "c"]);
        let mut record = TrainingRecord::new();

        assert!(record.sync(&cards));

        let entries = record.entries().collect::<Vec<_>>();
        assert_eq!(entries.len(), 3);
        assert!(entries
            .iter()
            .zip(["b", "a", "c"])
            .all(|((id, level), question)| id.as_str() == question && *level == LEVEL_DEFAULT));
    }

    #[test]
    fn sync_is_idempotent() {
        let cards = cards(&["a", "b"]);
        let mut record = TrainingRecord::new();
        record.sync(&cards);

        let once = record.clone();
        assert!(!record.sync(&cards));
        assert_eq!(record, once);
    }

    #[test]
    fn sync_keeps_stale_entries() {
        let mut record = TrainingRecord::new();
        record.set_level(QuestionId::of("removed from deck"), 9);

        record.sync(&cards(&["a"]));

        assert_eq!(record.level(&QuestionId::of("removed from deck")), Some(9));
        assert_eq!(record.len(), 2);
    }

    #[test]
    fn set_level_clamps_into_range() {
        let mut record = TrainingRecord::new();

        record.set_level(QuestionId::of("low"), 0);
        record.set_level(QuestionId::of("high"), 200);

        assert_eq!(record.level(&QuestionId::of("low")), Some(LEVEL_MIN));
        assert_eq!(record.level(&QuestionId::of("high")), Some(LEVEL_MAX));
    }

    #[test]
    fn record_serializes_as_plain_json_object() {
        let mut record = TrainingRecord::new();
        record.set_level(QuestionId::of("13 * 15 ?"), 5);

        let json = serde_json::to_string(&record).expect("Unable to serialize record");
        assert_eq!(json, r#"{"13 * 15 ?":5}"#);
    }

    #[test]
    fn persist_load_round_trip_keeps_order() {
        let store = TrainingStore::new("./tests/training_round_trip")
            .expect("Unable to create training store");

        let mut record = TrainingRecord::new();
        record.set_level(QuestionId::of("zulu"), 7);
        record.set_level(QuestionId::of("alpha"), 2);
        record.set_level(QuestionId::of("mike"), 10);

        store
            .persist("order", &record)
            .expect("Unable to persist record");
        let loaded = store.load("order").expect("Unable to load record");

        assert_eq!(loaded, record);
        let order = loaded.entries().map(|(id, _)| id.as_str()).collect::<Vec<_>>();
        assert_eq!(order, vec!["zulu", "alpha", "mike"]);
    }

    #[test]
    fn load_missing_file_is_empty_record() {
        let store = TrainingStore::new("./tests/training_missing")
            .expect("Unable to create training store");

        let record = store.load("never persisted").expect("Unable to load record");
        assert!(record.is_empty());
    }

    #[test]
    fn load_corrupt_file_fails() {
        let store = TrainingStore::new("./tests/training_corrupt")
            .expect("Unable to create training store");
        std::fs::write(store.path("broken"), "{not json")
            .expect("Unable to write corrupt file");

        assert!(store
            .load("broken")
            .is_err_and(|err| matches!(err, TrainingError::Corrupt(_, _))));
    }

    #[test]
    fn load_clamps_out_of_range_levels() {
        let store = TrainingStore::new("./tests/training_out_of_range")
            .expect("Unable to create training store");
        std::fs::write(store.path("wild"), r#"{"a":0,"b":42}"#)
            .expect("Unable to write record");

        let record = store.load("wild").expect("Unable to load record");
        assert_eq!(record.level(&QuestionId::of("a")), Some(LEVEL_MIN));
        assert_eq!(record.level(&QuestionId::of("b")), Some(LEVEL_MAX));
    }

    #[test]
    fn reset_leaves_empty_record() {
        let store = TrainingStore::new("./tests/training_reset")
            .expect("Unable to create training store");

        let mut record = TrainingRecord::new();
        record.sync(&cards(&["a", "b"]));
        store
            .persist("wipe", &record)
            .expect("Unable to persist record");

        store.reset("wipe").expect("Unable to reset record");
        assert!(store.load("wipe").expect("Unable to load record").is_empty());
    }
}
