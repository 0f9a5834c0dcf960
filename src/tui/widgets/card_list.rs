//! Page content: sections of cards with virtual scrolling.

use super::truncate_str;
use crate::app::state::{AppState, CardHit, SearchFocus};
use crate::tui::theme::{Theme, get_theme};
use crate::view::{Page, PageView, Section};
use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};

const SEARCH_HINT: &str = "Type to search songs, videos and playlists";

pub fn render_search_box(frame: &mut Frame, state: &AppState, area: Rect) {
    let theme = get_theme();

    let is_focused = state.search_focus == SearchFocus::Input;
    let border_color = if is_focused {
        theme.palette.border_focus
    } else {
        theme.palette.border
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_set(theme.border_set())
        .border_style(Style::default().fg(border_color))
        .title(" Query ")
        .title_style(Style::default().fg(theme.palette.accent));

    let line = if state.search_query.is_empty() && !is_focused {
        Line::from(Span::styled(
            SEARCH_HINT,
            Style::default().fg(theme.palette.fg_secondary),
        ))
    } else {
        let cursor = if is_focused { "▏" } else { "" };
        let loading = if state.page_state(Page::Search).loading { "  ..." } else { "" };
        Line::from(vec![
            Span::styled(
                format!("{}{cursor}", state.search_query),
                Style::default().fg(theme.palette.fg_primary),
            ),
            Span::styled(loading, Style::default().fg(theme.palette.fg_secondary)),
        ])
    };

    frame.render_widget(Paragraph::new(line).block(block), area);
}

/// One rendered row. `anchor` is the row to keep visible along with a card,
/// its section header when it opens a section.
struct Row {
    line: Line<'static>,
    card: Option<usize>,
    anchor: usize,
}

pub fn render(frame: &mut Frame, state: &mut AppState, area: Rect) {
    let theme = get_theme();
    state.card_hits.clear();

    let page = state.page;
    let ps = state.page_state(page);
    let view = match &ps.view {
        Some(view) => view,
        None => {
            let text = if ps.loading { "Loading..." } else { "Nothing here yet" };
            render_note(frame, theme, text, area);
            return;
        }
    };

    let sections = match view {
        PageView::Message(message) => {
            render_note(frame, theme, message, area);
            return;
        }
        PageView::Sections(sections) => sections,
    };

    let width = area.width.saturating_sub(2) as usize;
    let rows = build_rows(sections, ps.selected, width, theme);
    let total_cards = ps.card_count();
    let selected_row = rows.iter().position(|r| r.card == Some(ps.selected));

    let visible_height = area.height as usize;
    let ps = state.page_state_mut(page);
    if let Some(row) = selected_row {
        ps.scroll_to(rows[row].anchor, visible_height);
        ps.scroll_to(row, visible_height);
    }
    let scroll_offset = ps.scroll_offset;
    let selected = ps.selected;

    let mut lines = Vec::with_capacity(visible_height);
    for (i, row) in rows
        .into_iter()
        .enumerate()
        .skip(scroll_offset)
        .take(visible_height)
    {
        if let Some(index) = row.card {
            state.card_hits.push(CardHit {
                x: area.x,
                y: area.y + (i - scroll_offset) as u16,
                width: area.width,
                index,
            });
        }
        lines.push(row.line);
    }
    frame.render_widget(Paragraph::new(lines), area);

    if total_cards > 0 {
        let pos_text = format!("{}/{}", selected + 1, total_cards);
        let pos_len = pos_text.len() as u16;
        let pos_x = area.x + area.width.saturating_sub(pos_len);
        if pos_x > area.x {
            frame.render_widget(
                Paragraph::new(pos_text).style(Style::default().fg(theme.palette.fg_secondary)),
                Rect::new(pos_x, area.y, pos_len, 1),
            );
        }
    }
}

fn render_note(frame: &mut Frame, theme: &Theme, text: &str, area: Rect) {
    let p = Paragraph::new(Line::from(text.to_string()))
        .style(Style::default().fg(theme.palette.fg_secondary))
        .wrap(Wrap { trim: true });
    frame.render_widget(p, area);
}

fn build_rows(sections: &[Section], selected: usize, width: usize, theme: &Theme) -> Vec<Row> {
    let mut rows = Vec::new();
    let mut index = 0;

    for (s, section) in sections.iter().enumerate() {
        if s > 0 {
            rows.push(Row {
                line: Line::default(),
                card: None,
                anchor: rows.len(),
            });
        }

        let header_row = rows.len();
        let mut header = vec![Span::styled(
            section.title.clone(),
            Style::default()
                .fg(theme.palette.accent)
                .add_modifier(Modifier::BOLD),
        )];
        if let Some(subtitle) = &section.subtitle {
            header.push(Span::styled(
                format!("  {subtitle}"),
                Style::default().fg(theme.palette.fg_secondary),
            ));
        }
        rows.push(Row {
            line: Line::from(header),
            card: None,
            anchor: header_row,
        });

        for (c, card) in section.cards.iter().enumerate() {
            let is_selected = index == selected;
            let (prefix, title_style) = if is_selected {
                (
                    theme.icons.selected,
                    Style::default()
                        .fg(theme.palette.bg_primary)
                        .bg(theme.palette.accent)
                        .add_modifier(Modifier::BOLD),
                )
            } else {
                (
                    theme.icons.unselected,
                    Style::default().fg(theme.palette.fg_primary),
                )
            };

            let title_width = width.saturating_sub(4) * 3 / 5;
            let title = truncate_str(&card.title, title_width);
            let subtitle_width = width.saturating_sub(title.chars().count() + 7);

            let anchor = if c == 0 { header_row } else { rows.len() };
            rows.push(Row {
                line: Line::from(vec![
                    Span::styled(format!("{prefix} "), Style::default().fg(theme.palette.accent)),
                    Span::styled(title, title_style),
                    Span::styled("  ·  ", Style::default().fg(theme.palette.fg_muted)),
                    Span::styled(
                        truncate_str(&card.subtitle, subtitle_width),
                        Style::default().fg(theme.palette.fg_secondary),
                    ),
                ]),
                card: Some(index),
                anchor,
            });
            index += 1;
        }
    }

    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::view::cards;

    fn section(title: &str, terms: &[&str]) -> Section {
        Section {
            title: title.into(),
            subtitle: None,
            cards: terms.iter().map(|t| cards::search_card(t)).collect(),
        }
    }

    #[test]
    fn rows_number_cards_across_sections() {
        let sections = vec![section("A", &["Pop", "Rock"]), section("B", &["Jazz"])];
        let rows = build_rows(&sections, 0, 60, get_theme());

        let cards: Vec<_> = rows.iter().map(|r| r.card).collect();
        assert_eq!(cards, vec![None, Some(0), Some(1), None, None, Some(2)]);
        // First card of a section keeps its header in view.
        assert_eq!(rows[5].anchor, 4);
        assert_eq!(rows[2].anchor, 2);
    }
}
