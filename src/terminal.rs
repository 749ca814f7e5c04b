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

use std::time::Duration;

use crossterm::{
    event::{self, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    widgets::{StatefulWidget, Widget},
    Frame, Terminal,
};

use crate::{QuizrError, UiError};

///Raw-mode alternate-screen terminal, restored on drop even when the
///render path errors out.
pub struct TerminalWrapper {
    #[allow(unused)]
    alt_screen: AltScreen,
    terminal: Terminal<CrosstermBackend<std::io::Stdout>>,
}

impl TerminalWrapper {
    pub fn new() -> Result<TerminalWrapper, std::io::Error> {
        let raw_mode = RawMode::enable()?;
        let alt_screen = AltScreen::enter(raw_mode)?;
        let terminal = Terminal::new(CrosstermBackend::new(std::io::stdout()))?;

        Ok(TerminalWrapper {
            alt_screen,
            terminal,
        })
    }

    pub fn draw(&mut self, draw_fn: impl FnOnce(&mut Frame)) -> Result<(), QuizrError> {
        self.terminal.draw(draw_fn).map_err(UiError::IoError)?;
        Ok(())
    }

    pub fn render_widget(&mut self, widget: impl Widget) -> Result<(), QuizrError> {
        self.draw(|frame| frame.render_widget(widget, frame.size()))
    }

    pub fn render_stateful_widget<W: StatefulWidget>(
        &mut self,
        widget: W,
        state: &mut W::State,
    ) -> Result<(), QuizrError> {
        self.draw(|frame| frame.render_stateful_widget(widget, frame.size(), state))
    }
}

struct RawMode;

impl RawMode {
    fn enable() -> Result<RawMode, std::io::Error> {
        enable_raw_mode()?;
        Ok(RawMode)
    }
}

impl Drop for RawMode {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
    }
}

#[repr(transparent)]
struct AltScreen(RawMode);

impl AltScreen {
    fn enter(raw_mode: RawMode) -> Result<Self, std::io::Error> {
        execute!(std::io::stdout(), EnterAlternateScreen)?;
        Ok(Self(raw_mode))
    }
}

impl Drop for AltScreen {
    fn drop(&mut self) {
        let _ = execute!(std::io::stdout(), LeaveAlternateScreen);
    }
}

///Drains any queued input, then blocks until `match_fn` maps an event.
///Stale keypresses from before the prompt never count as answers.
pub fn clear_and_match_event<T>(match_fn: impl Fn(Event) -> Option<T>) -> Result<T, QuizrError> {
    loop {
        if event::poll(Duration::from_millis(0)).map_err(UiError::IoError)? {
            event::read().map_err(UiError::IoError)?;
            continue;
        }
        break;
    }

    loop {
        if event::poll(Duration::MAX).map_err(UiError::IoError)? {
            let event = event::read().map_err(UiError::IoError)?;
            if let Some(value) = match_fn(event) {
                return Ok(value);
            }
        }
    }
}
