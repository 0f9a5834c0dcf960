//! Root layout:
//! ┌──────────┬─────────────────────────────────────────┐
//! │  Pages   │           Page content                  │
//! │          │     (sections of cards / message)       │
//! ├──────────┴─────────┬───────────────────────────────┤
//! │      Player        │            Lyrics             │
//! └────────────────────┴───────────────────────────────┘

use crate::app::state::AppState;
use crate::tui::theme::get_theme;
use crate::view::Page;
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    widgets::{Block, Borders},
};

use super::{card_list, help, lyrics, now_playing, sidebar};

pub fn render(frame: &mut Frame, state: &mut AppState) {
    let root = frame.area();

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(8), Constraint::Length(7)])
        .split(root);

    let top_cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(20), Constraint::Min(40)])
        .split(rows[0]);

    let bottom_cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
        .split(rows[1]);

    sidebar::render(frame, state, top_cols[0]);
    render_page(frame, state, top_cols[1]);
    now_playing::render(frame, state, bottom_cols[0]);
    lyrics::render(frame, state, bottom_cols[1]);

    if state.show_help {
        // Clicks must not reach cards hidden under the overlay.
        state.card_hits.clear();
        help::render(frame, root);
    }
}

fn render_page(frame: &mut Frame, state: &mut AppState, area: Rect) {
    let theme = get_theme();
    let page = state.page;

    let block = Block::default()
        .borders(Borders::ALL)
        .border_set(theme.border_set())
        .border_style(Style::default().fg(theme.palette.border))
        .title(format!(" {} {} ", theme.icons.page(page), page.title()))
        .title_style(Style::default().fg(theme.palette.accent));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    if page == Page::Search {
        let sub = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(3), Constraint::Min(3)])
            .split(inner);
        card_list::render_search_box(frame, state, sub[0]);
        card_list::render(frame, state, sub[1]);
    } else {
        card_list::render(frame, state, inner);
    }
}
