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

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind};
use rand::rngs::ThreadRng;
use widget::StudyWidget;

use crate::{
    scheduler::{Outcome, Session},
    terminal::{clear_and_match_event, TerminalWrapper},
    training::TrainingStore,
    QuizrError,
};

mod widget;

#[derive(Debug, Default)]
pub struct StudySummary {
    pub reviewed: usize,
    pub hard: usize,
    pub good: usize,
    pub easy: usize,
}

impl StudySummary {
    fn count(&mut self, outcome: Outcome) {
        self.reviewed += 1;
        match outcome {
            Outcome::Hard => self.hard += 1,
            Outcome::Good => self.good += 1,
            Outcome::Easy => self.easy += 1,
        }
    }
}

///Question/answer/grade loop over one session. Every grade is written
///through to disk before the next question is drawn.
pub fn study(
    term: &mut TerminalWrapper,
    session: &mut Session,
    training: &TrainingStore,
    count: Option<usize>,
    rng: &mut ThreadRng,
) -> Result<StudySummary, QuizrError> {
    let mut summary = StudySummary::default();

    loop {
        if count.is_some_and(|count| summary.reviewed >= count) {
            break;
        }

        let card = session.next(rng)?;

        match show_question(term, session.title(), &card.question)? {
            Action::Reveal => {}
            Action::Quit => break,
        }

        match show_answer(term, session.title(), &card.question, &card.answer)? {
            Some(outcome) => {
                session.grade(&card, outcome, training)?;
                summary.count(outcome);
            }
            None => break,
        }
    }

    Ok(summary)
}

enum Action {
    Reveal,
    Quit,
}

enum QuestionInput {
    Reveal,
    Quit,
    Resize,
}

fn show_question(
    term: &mut TerminalWrapper,
    title: &str,
    question: &str,
) -> Result<Action, QuizrError> {
    loop {
        term.render_widget(StudyWidget::question(title, question))?;

        match clear_and_match_event(match_question_input)? {
            QuestionInput::Reveal => return Ok(Action::Reveal),
            QuestionInput::Quit => return Ok(Action::Quit),
            QuestionInput::Resize => continue,
        }
    }
}

fn show_answer(
    term: &mut TerminalWrapper,
    title: &str,
    question: &str,
    answer: &str,
) -> Result<Option<Outcome>, QuizrError> {
    loop {
        term.render_widget(StudyWidget::answer(title, question, answer))?;

        match clear_and_match_event(match_answer_input)? {
            AnswerInput::Graded(outcome) => return Ok(Some(outcome)),
            AnswerInput::Quit => return Ok(None),
            AnswerInput::Resize => continue,
        }
    }
}

fn match_question_input(event: Event) -> Option<QuestionInput> {
    match event {
        Event::Key(KeyEvent {
            kind: KeyEventKind::Press,
            code,
            ..
        }) => match code {
            KeyCode::Char(' ') | KeyCode::Enter | KeyCode::Right => Some(QuestionInput::Reveal),
            KeyCode::Esc | KeyCode::Char('q') => Some(QuestionInput::Quit),
            _ => None,
        },
        Event::Resize(_, _) => Some(QuestionInput::Resize),
        _ => None,
    }
}

enum AnswerInput {
    Graded(Outcome),
    Quit,
    Resize,
}

fn match_answer_input(event: Event) -> Option<AnswerInput> {
    match event {
        Event::Key(KeyEvent {
            kind: KeyEventKind::Press,
            code,
            ..
        }) => match code {
            KeyCode::Char('h') | KeyCode::Char('1') => Some(AnswerInput::Graded(Outcome::Hard)),
            KeyCode::Char('g') | KeyCode::Char('2') => Some(AnswerInput::Graded(Outcome::Good)),
            KeyCode::Char('e') | KeyCode::Char('3') => Some(AnswerInput::Graded(Outcome::Easy)),
            KeyCode::Esc | KeyCode::Char('q') => Some(AnswerInput::Quit),
            _ => None,
        },
        Event::Resize(_, _) => Some(AnswerInput::Resize),
        _ => None,
    }
}
