use crate::app::actions::Action;
use crate::app::events::{Event, InputEvent};
use crate::app::state::{AppState, SearchFocus};
use crate::view::Page;
use crossterm::event::{
    self, Event as CtEvent, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton,
    MouseEvent, MouseEventKind,
};
use tokio::sync::mpsc;

pub fn spawn_input_task(tx: mpsc::Sender<Event>, mouse_enabled: bool) {
    tokio::task::spawn_blocking(move || {
        loop {
            if !event::poll(std::time::Duration::from_millis(250)).unwrap_or(false) {
                if tx.is_closed() {
                    break;
                }
                continue;
            }
            let ev = match event::read() {
                Ok(CtEvent::Key(k)) if k.kind == KeyEventKind::Press => InputEvent::Key(k),
                Ok(CtEvent::Mouse(m)) if mouse_enabled => InputEvent::Mouse(m),
                Ok(CtEvent::Resize(_, _)) => InputEvent::Resize,
                Ok(_) => continue,
                Err(e) => {
                    tracing::debug!(error = %e, "terminal read failed");
                    continue;
                }
            };
            if tx.blocking_send(Event::Input(ev)).is_err() {
                break;
            }
        }
    });
}

pub fn map_input_to_action(state: &AppState, ev: InputEvent) -> Option<Action> {
    match ev {
        InputEvent::Resize => Some(Action::Resize),
        InputEvent::Mouse(m) => map_mouse(state, m),
        InputEvent::Key(k) => {
            if state.show_help {
                return handle_help_overlay(k);
            }
            if state.page == Page::Search && state.search_focus == SearchFocus::Input {
                return handle_search_input(state, k);
            }
            handle_browse(state, k)
        }
    }
}

fn map_mouse(state: &AppState, m: MouseEvent) -> Option<Action> {
    match m.kind {
        MouseEventKind::ScrollUp => Some(Action::ListUp),
        MouseEventKind::ScrollDown => Some(Action::ListDown),
        MouseEventKind::Down(MouseButton::Left) => state.card_at(m.column, m.row).map(Action::ActivateAt),
        _ => None,
    }
}

fn handle_help_overlay(k: KeyEvent) -> Option<Action> {
    match k.code {
        KeyCode::Char('q') => Some(Action::Quit),
        KeyCode::Esc | KeyCode::Char('?') | KeyCode::F(1) | KeyCode::Enter => Some(Action::ToggleHelp),
        _ => None,
    }
}

fn handle_search_input(state: &AppState, k: KeyEvent) -> Option<Action> {
    let ctrl = k.modifiers.contains(KeyModifiers::CONTROL);
    match k.code {
        KeyCode::Esc => Some(Action::SetSearchFocus(SearchFocus::Results)),
        KeyCode::Tab => Some(Action::NextPage),
        KeyCode::BackTab => Some(Action::PrevPage),
        KeyCode::Enter => Some(Action::SubmitSearch),
        KeyCode::Backspace => Some(Action::Backspace),
        KeyCode::Down if state.active().card_count() > 0 => {
            Some(Action::SetSearchFocus(SearchFocus::Results))
        }
        KeyCode::F(1) => Some(Action::ToggleHelp),
        KeyCode::F(5) => Some(Action::Refresh),
        KeyCode::Char('u') if ctrl => Some(Action::ClearInput),
        KeyCode::Char('c') if ctrl => Some(Action::Quit),
        KeyCode::Char(c) if !ctrl => Some(Action::InputChar(c)),
        _ => None,
    }
}

fn handle_browse(state: &AppState, k: KeyEvent) -> Option<Action> {
    let ctrl = k.modifiers.contains(KeyModifiers::CONTROL);
    match k.code {
        KeyCode::Char('q') | KeyCode::Esc => Some(Action::Quit),
        KeyCode::Char('c') if ctrl => Some(Action::Quit),

        // Navigation - vim style
        KeyCode::Up | KeyCode::Char('k') => Some(Action::ListUp),
        KeyCode::Down | KeyCode::Char('j') => Some(Action::ListDown),
        KeyCode::Char('g') | KeyCode::Home => Some(Action::GoTop),
        KeyCode::Char('G') | KeyCode::End => Some(Action::GoBottom),
        KeyCode::Char('d') if ctrl => Some(Action::PageDown),
        KeyCode::Char('u') if ctrl => Some(Action::PageUp),
        KeyCode::PageDown => Some(Action::PageDown),
        KeyCode::PageUp => Some(Action::PageUp),

        // Pages
        KeyCode::Tab | KeyCode::Right | KeyCode::Char('l') => Some(Action::NextPage),
        KeyCode::BackTab | KeyCode::Left | KeyCode::Char('h') => Some(Action::PrevPage),
        KeyCode::Char(c @ '1'..='8') => {
            let index = c as usize - '1' as usize;
            Page::ALL.get(index).copied().map(Action::SetPage)
        }
        KeyCode::Char('/') | KeyCode::Char('i') => {
            if state.page == Page::Search {
                Some(Action::SetSearchFocus(SearchFocus::Input))
            } else {
                Some(Action::SetPage(Page::Search))
            }
        }

        // Playback
        KeyCode::Enter => Some(Action::Activate),
        KeyCode::Char(' ') => Some(Action::TogglePlayback),
        KeyCode::Char('n') => Some(Action::Next),
        KeyCode::Char('p') => Some(Action::Previous),
        KeyCode::Char('s') => Some(Action::Stop),
        KeyCode::Char(']') => Some(Action::SeekForward),
        KeyCode::Char('[') => Some(Action::SeekBack),
        KeyCode::Char('=') | KeyCode::Char('+') => Some(Action::VolumeUp),
        KeyCode::Char('-') | KeyCode::Char('_') => Some(Action::VolumeDown),

        KeyCode::Char('r') if ctrl => Some(Action::Refresh),
        KeyCode::F(5) => Some(Action::Refresh),
        KeyCode::Char('?') | KeyCode::F(1) => Some(Action::ToggleHelp),

        _ => None,
    }
}
