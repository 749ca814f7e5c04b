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

use ratatui::{
    layout::{Constraint, Direction, Layout},
    style::{Style, Stylize},
    widgets::{Paragraph, Widget, Wrap},
};

const REVEAL_HINTS: &str = "space: show answer    q: quit";
const GRADE_HINTS: &str = "h: hard    g: good    e: easy    q: quit";

pub(super) struct StudyWidget<'a> {
    title: &'a str,
    question: &'a str,
    answer: Option<&'a str>,
}

impl<'a> StudyWidget<'a> {
    pub fn question(title: &'a str, question: &'a str) -> Self {
        Self {
            title,
            question,
            answer: None,
        }
    }

    pub fn answer(title: &'a str, question: &'a str, answer: &'a str) -> Self {
        Self {
            title,
            question,
            answer: Some(answer),
        }
    }
}

impl<'a> Widget for StudyWidget<'a> {
    fn render(self, area: ratatui::prelude::Rect, buf: &mut ratatui::prelude::Buffer)
    where
        Self: Sized,
    {
        let (title_area, question_area, answer_area, hint_area) = {
            let layout = Layout::new(
                Direction::Vertical,
                [
                    Constraint::Length(1),
                    Constraint::Ratio(1, 3),
                    Constraint::Min(1),
                    Constraint::Length(1),
                ],
            );

            let split = layout.split(area);
            (split[0], split[1], split[2], split[3])
        };

        Paragraph::new(format!("{}:", self.title))
            .style(Style::new().dim())
            .centered()
            .render(title_area, buf);

        Paragraph::new(self.question)
            .wrap(Wrap { trim: false })
            .centered()
            .render(question_area, buf);

        if let Some(answer) = self.answer {
            Paragraph::new(answer)
                .wrap(Wrap { trim: false })
                .centered()
                .render(answer_area, buf);
        }

        Paragraph::new(if self.answer.is_some() {
            GRADE_HINTS
        } else {
            REVEAL_HINTS
        })
        .style(Style::new().dim())
        .centered()
        .render(hint_area, buf);
    }
}
