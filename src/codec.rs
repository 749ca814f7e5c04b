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

use std::{fmt::Display, str::FromStr};

use crate::deck::Flashcard;

///Marker pair enclosing the hidden span of a fill-in-the-blank line.
const CLOZE_MARKER: &str = "$$";
const CLOZE_BLANK: &str = "___";

///Field separator between the question and answer of a deck line.
///A closed set, chosen by the user per invocation and always passed in;
///the codec never assumes one.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum Separator {
    Space,
    #[default]
    Comma,
    DoubleHash,
}

impl Separator {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Space => " ",
            Self::Comma => ",",
            Self::DoubleHash => "##",
        }
    }
}

impl FromStr for Separator {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.to_lowercase();

        if s == "space" || s == " " {
            Ok(Self::Space)
        } else if s == "comma" || s == "," {
            Ok(Self::Comma)
        } else if s == "double-hash" || s == "##" {
            Ok(Self::DoubleHash)
        } else {
            Err(format!("Separator argument not recognized: {s}"))
        }
    }
}

impl Display for Separator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Space => "space",
            Self::Comma => "comma",
            Self::DoubleHash => "double-hash",
        })
    }
}

///Result of parsing deck text: the usable cards plus the 1-based
///numbers of the lines that fit no card form. The caller decides
///whether invalid lines are fatal.
#[derive(Debug, PartialEq, Eq)]
pub struct ParsedDeck {
    pub cards: Vec<Flashcard>,
    pub invalid_lines: Vec<usize>,
}

///Parses deck text, one card per non-empty line. A line splits on the
///separator into question and answer; extra fields are rejoined so the
///answer may itself contain the separator. Lines without the separator
///are tried as fill-in-the-blank cards before being reported invalid.
///A malformed line never aborts the parse.
///
///Example:
///```
///# use quizr::codec::{parse, Separator};
///let parsed = parse(
///    "13 * 15 ?,195\nYou can change separator,in settings",
///    Separator::Comma,
///);
///assert!(parsed.invalid_lines.is_empty());
///assert_eq!(parsed.cards[0].question, "13 * 15 ?");
///assert_eq!(parsed.cards[1].answer, "in settings");
///```
pub fn parse(content: &str, separator: Separator) -> ParsedDeck {
    let sep = separator.as_str();
    let mut cards = Vec::new();
    let mut invalid_lines = Vec::new();

    for (index, line) in content.lines().enumerate() {
        if line.is_empty() {
            continue;
        }

        let fields = line.split(sep).collect::<Vec<_>>();
        if fields.len() >= 2 {
            cards.push(Flashcard {
                question: fields[0].to_owned(),
                answer: fields[1..].join(sep),
            });
        } else if let Some(card) = parse_cloze(line) {
            cards.push(card);
        } else {
            invalid_lines.push(index + 1);
        }
    }

    ParsedDeck {
        cards,
        invalid_lines,
    }
}

///A cloze line hides every odd-indexed piece between markers, so the
///piece count must be odd and at least three: text, blank, text.
fn parse_cloze(line: &str) -> Option<Flashcard> {
    let pieces = line.split(CLOZE_MARKER).collect::<Vec<_>>();

    if pieces.len() < 3 || pieces.len() % 2 == 0 {
        return None;
    }

    let question = pieces
        .iter()
        .enumerate()
        .map(|(i, piece)| if i % 2 == 1 { CLOZE_BLANK } else { *piece })
        .collect::<String>();

    Some(Flashcard {
        question,
        answer: pieces.concat(),
    })
}

pub fn serialize(cards: &[Flashcard], separator: Separator) -> String {
    let sep = separator.as_str();
    cards
        .iter()
        .map(|card| format!("{}{sep}{}", card.question, card.answer))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use crate::deck::Flashcard;

    use super::{parse, serialize, Separator};

    fn card(question: &str, answer: &str) -> Flashcard {
        Flashcard {
            question: question.to_owned(),
            answer: answer.to_owned(),
        }
    }

    #[test]
    fn parse_comma_lines() {
        let parsed = parse(
            "13 * 15 ?,195\nYou can change separator,in settings",
            Separator::Comma,
        );
        assert_eq!(
            parsed.cards,
            vec![
                card("13 * 15 ?", "195"),
                card("You can change separator", "in settings"),
            ]
        );
        assert!(parsed.invalid_lines.is_empty());
    }

    #[test]
    fn parse_rejoins_answer_fields() {
        let parsed = parse("Largest ocean##Pacific##by far", Separator::DoubleHash);
        assert_eq!(parsed.cards, vec![card("Largest ocean", "Pacific##by far")]);
    }

    #[test]
    fn parse_records_invalid_lines_and_continues() {
        let parsed = parse("a,b\nno separator here\nc,d", Separator::Comma);
        assert_eq!(parsed.cards.len(), 2);
        assert_eq!(parsed.invalid_lines, vec![2]);
    }

    #[test]
    fn parse_skips_empty_lines() {
        let parsed = parse("a,b\n\n\nc,d\n", Separator::Comma);
        assert_eq!(parsed.cards.len(), 2);
        assert!(parsed.invalid_lines.is_empty());
    }

    #[test]
    fn parse_cloze_line() {
        let parsed = parse("The capital of France is $$Paris$$.", Separator::Comma);
        assert_eq!(
            parsed.cards,
            vec![card(
                "The capital of France is ___.",
                "The capital of France is Paris."
            )]
        );
    }

    #[test]
    fn parse_cloze_with_multiple_blanks() {
        let parsed = parse("$$Mercury$$ orbits closer than $$Venus$$", Separator::Comma);
        assert_eq!(
            parsed.cards,
            vec![card("___ orbits closer than ___", "Mercury orbits closer than Venus")]
        );
    }

    #[test]
    fn parse_unbalanced_cloze_is_invalid() {
        let parsed = parse("Dangling $$marker", Separator::Comma);
        assert!(parsed.cards.is_empty());
        assert_eq!(parsed.invalid_lines, vec![1]);
    }

    #[test]
    fn serialize_then_parse_preserves_cards() {
        let cards = vec![card("q1", "a1"), card("q2", "a 2 with spaces")];
        for separator in [Separator::Comma, Separator::DoubleHash] {
            let parsed = parse(&serialize(&cards, separator), separator);
            assert_eq!(parsed.cards, cards);
            assert!(parsed.invalid_lines.is_empty());
        }
    }

    #[test]
    fn separator_display_round_trips() {
        for separator in [Separator::Space, Separator::Comma, Separator::DoubleHash] {
            assert_eq!(separator.to_string().parse(), Ok(separator));
        }
    }

    #[test]
    fn separator_accepts_literal_forms() {
        assert_eq!(" ".parse(), Ok(Separator::Space));
        assert_eq!(",".parse(), Ok(Separator::Comma));
        assert_eq!("##".parse(), Ok(Separator::DoubleHash));
        assert!("::".parse::<Separator>().is_err());
    }
}
