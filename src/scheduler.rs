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

use rand::{rngs::ThreadRng, Rng};

use crate::{
    codec::Separator,
    deck::{Deck, DeckError, DeckStore, Flashcard},
    random::GetRandom,
    training::{
        Level, QuestionId, TrainingRecord, TrainingStore, LEVEL_DEFAULT, LEVEL_MAX, LEVEL_MIN,
    },
    QuizrError,
};

///How a graded answer moves the question's level. Hard questions gain
///weight and come back sooner; easy ones fade.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Outcome {
    Hard,
    Good,
    Easy,
}

impl Outcome {
    pub fn shift(self) -> i16 {
        match self {
            Self::Hard => 3,
            Self::Good => 0,
            Self::Easy => -2,
        }
    }
}

///The active deck and its training record. One session exists at a
///time; selecting another deck replaces it wholesale. Only the record
///is durable.
pub struct Session {
    title: String,
    deck: Deck,
    record: TrainingRecord,
}

impl Session {
    ///Loads the deck, then brings the training record in sync with it.
    ///When sync adds entries the record is persisted right away so the
    ///file pair on disk stays consistent. Invalid deck lines are
    ///returned for the caller to report.
    pub fn load(
        title: &str,
        decks: &DeckStore,
        training: &TrainingStore,
        separator: Separator,
    ) -> Result<(Self, Vec<usize>), QuizrError> {
        let (deck, invalid_lines) = decks.load(title, separator)?;
        let mut record = training.load(title)?;

        if record.sync(&deck.cards) {
            training.persist(title, &record)?;
        }

        Ok((
            Session {
                title: title.to_owned(),
                deck,
                record,
            },
            invalid_lines,
        ))
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn deck(&self) -> &Deck {
        &self.deck
    }

    ///Selects the next card to show, weighted by level.
    ///
    ///A threshold is drawn from `[0, 1 + total levels)` and the record
    ///entries are walked in insertion order until the running level sum
    ///crosses it. The extra 1 keeps the range non-empty for an empty
    ///record and occasionally pushes the threshold past every entry;
    ///then, or when the winning entry no longer matches a card in the
    ///deck, a uniform pick over the deck stands in.
    pub fn next(&self, rng: &mut ThreadRng) -> Result<Flashcard, QuizrError> {
        if self.deck.cards.is_empty() {
            return Err(DeckError::Empty(self.title.clone()).into());
        }

        let total = 1.0
            + self
                .record
                .entries()
                .map(|(_, level)| level as f64)
                .sum::<f64>();
        let threshold = rng.gen_range(0.0..total);

        let mut running = 0.0;
        for (id, level) in self.record.entries() {
            running += level as f64;
            if running >= threshold {
                if let Some(card) = self.find_card(id) {
                    return Ok(card.clone());
                }
                break;
            }
        }

        self.deck
            .cards
            .get_random(rng)
            .cloned()
            .ok_or_else(|| DeckError::Empty(self.title.clone()).into())
    }

    fn find_card(&self, id: &QuestionId) -> Option<&Flashcard> {
        self.deck
            .cards
            .iter()
            .find(|card| QuestionId::from(*card) == *id)
    }

    ///Applies the grading feedback to the card's level and persists the
    ///whole record before returning, so a process exit right after
    ///grading never loses the update.
    pub fn grade(
        &mut self,
        card: &Flashcard,
        outcome: Outcome,
        training: &TrainingStore,
    ) -> Result<(), QuizrError> {
        let id = QuestionId::from(card);
        let level = self.record.level(&id).unwrap_or(LEVEL_DEFAULT);
        let graded = (level as i16 + outcome.shift()).clamp(LEVEL_MIN as i16, LEVEL_MAX as i16);

        self.record.set_level(id, graded as Level);
        training.persist(&self.title, &self.record)?;

        Ok(())
    }
}

///Uniform pick of one question across all decks, for ambient display.
///Deliberately bypasses weighting and needs no session; returns None
///when no decks exist.
pub fn peek(
    decks: &DeckStore,
    separator: Separator,
    rng: &mut ThreadRng,
) -> Result<Option<String>, QuizrError> {
    let titles = decks.titles()?;

    let Some(title) = titles.get_random(rng) else {
        return Ok(None);
    };

    let (deck, _) = decks.load(title, separator)?;
    Ok(deck.cards.get_random(rng).map(|card| card.question.clone()))
}
