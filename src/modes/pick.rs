use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::{
    style::{Style, Stylize},
    widgets::{Block, Borders, List, ListItem, ListState},
};

use crate::{
    terminal::{clear_and_match_event, TerminalWrapper},
    QuizrError,
};

enum PickInput {
    Up,
    Down,
    Accept,
    Cancel,
    Resize,
}

///Interactive deck title selection. Returns None when the list is
///empty or the user dismisses the prompt; dismissal aborts the calling
///command without touching any state.
pub fn pick_title(
    term: &mut TerminalWrapper,
    prompt: &str,
    titles: &[String],
) -> Result<Option<String>, QuizrError> {
    if titles.is_empty() {
        return Ok(None);
    }

    let mut state = ListState::default();
    state.select(Some(0));

    loop {
        let list = List::new(titles.iter().map(|title| ListItem::new(title.as_str())))
            .block(Block::default().borders(Borders::ALL).title(prompt.to_owned()))
            .highlight_style(Style::new().reversed())
            .highlight_symbol("> ");
        term.render_stateful_widget(list, &mut state)?;

        let selected = state.selected().unwrap_or(0);
        match clear_and_match_event(match_pick_input)? {
            PickInput::Up => state.select(Some(if selected == 0 {
                titles.len() - 1
            } else {
                selected - 1
            })),
            PickInput::Down => state.select(Some(if selected + 1 == titles.len() {
                0
            } else {
                selected + 1
            })),
            PickInput::Accept => return Ok(titles.get(selected).cloned()),
            PickInput::Cancel => return Ok(None),
            PickInput::Resize => continue,
        }
    }
}

fn match_pick_input(event: Event) -> Option<PickInput> {
    match event {
        Event::Key(KeyEvent {
            kind: KeyEventKind::Press,
            code,
            ..
        }) => match code {
            KeyCode::Up | KeyCode::Char('k') => Some(PickInput::Up),
            KeyCode::Down | KeyCode::Char('j') => Some(PickInput::Down),
            KeyCode::Enter => Some(PickInput::Accept),
            KeyCode::Esc | KeyCode::Char('q') => Some(PickInput::Cancel),
            _ => None,
        },
        Event::Resize(_, _) => Some(PickInput::Resize),
        _ => None,
    }
}
