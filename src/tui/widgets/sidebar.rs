use crate::app::state::AppState;
use crate::tui::theme::get_theme;
use crate::view::Page;
use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState},
};

pub fn render(frame: &mut Frame, state: &AppState, area: Rect) {
    let theme = get_theme();
    let icons = &theme.icons;

    let block = Block::default()
        .borders(Borders::ALL)
        .border_set(theme.border_set())
        .border_style(Style::default().fg(theme.palette.border))
        .title(" Browse ")
        .title_style(Style::default().fg(theme.palette.accent));

    let items: Vec<ListItem> = Page::ALL
        .iter()
        .enumerate()
        .map(|(i, page)| {
            let is_selected = *page == state.page;
            let (style, icon_style) = if is_selected {
                (
                    Style::default()
                        .fg(theme.palette.accent)
                        .add_modifier(Modifier::BOLD),
                    Style::default().fg(theme.palette.accent),
                )
            } else {
                (
                    Style::default().fg(theme.palette.fg_primary),
                    Style::default().fg(theme.palette.fg_secondary),
                )
            };
            let loading = if state.page_state(*page).loading { " ·" } else { "" };

            ListItem::new(Line::from(vec![
                Span::styled(format!("{} ", i + 1), icon_style),
                Span::styled(icons.page(*page), icon_style),
                Span::raw(" "),
                Span::styled(page.title(), style),
                Span::styled(loading, icon_style),
            ]))
        })
        .collect();

    let mut list_state = ListState::default();
    list_state.select(Some(state.page.index()));

    let list = List::new(items)
        .block(block)
        .highlight_style(
            Style::default()
                .fg(theme.palette.bg_primary)
                .bg(theme.palette.accent)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("");

    frame.render_stateful_widget(list, area, &mut list_state);
}
