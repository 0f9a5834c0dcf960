//! Keybinding overlay

use crate::tui::theme::{Theme, get_theme};
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Flex, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
};

pub fn render(frame: &mut Frame, area: Rect) {
    let theme = get_theme();
    let popup = centered(area, 72, 22);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_set(theme.border_set())
        .border_style(Style::default().fg(theme.palette.border_focus))
        .title(format!(" {} Keybinds ", theme.icons.help))
        .title_style(Style::default().fg(theme.palette.accent));
    let inner = block.inner(popup);
    frame.render_widget(Clear, popup);
    frame.render_widget(block, popup);

    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(inner);

    let left = vec![
        section_header("Browse", theme),
        keybind("j / k", "Move down / up", theme),
        keybind("g / G", "Top / bottom", theme),
        keybind("Ctrl+d/u", "Page down / up", theme),
        keybind("Tab / l", "Next page", theme),
        keybind("S-Tab / h", "Previous page", theme),
        keybind("1-8", "Go to page", theme),
        keybind("Enter", "Play or open card", theme),
        keybind("Ctrl+r / F5", "Reload page", theme),
        Line::default(),
        section_header("Search", theme),
        keybind("/ or i", "Focus search box", theme),
        keybind("Enter", "Search now", theme),
        keybind("Ctrl+u", "Clear input", theme),
        keybind("Esc / Down", "Focus results", theme),
    ];

    let right = vec![
        section_header("Playback", theme),
        keybind("Space", "Pause / resume", theme),
        keybind("n", "Next in session", theme),
        keybind("p", "Previous / restart", theme),
        keybind("s", "Stop", theme),
        keybind("] / [", "Seek +/- 5s", theme),
        keybind("+ / -", "Volume up / down", theme),
        Line::default(),
        section_header("General", theme),
        keybind("? / F1", "Toggle this help", theme),
        keybind("q / Esc", "Quit", theme),
    ];

    frame.render_widget(Paragraph::new(left), cols[0]);
    frame.render_widget(Paragraph::new(right), cols[1]);
}

fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let [row] = Layout::vertical([Constraint::Length(height.min(area.height))])
        .flex(Flex::Center)
        .areas(area);
    let [popup] = Layout::horizontal([Constraint::Length(width.min(area.width))])
        .flex(Flex::Center)
        .areas(row);
    popup
}

fn section_header(title: &str, theme: &Theme) -> Line<'static> {
    Line::from(Span::styled(
        format!("━━ {title} ━━"),
        Style::default()
            .fg(theme.palette.accent)
            .add_modifier(Modifier::BOLD),
    ))
}

fn keybind(key: &str, desc: &str, theme: &Theme) -> Line<'static> {
    Line::from(vec![
        Span::raw("  "),
        Span::styled(
            format!("{key:12}"),
            Style::default()
                .fg(theme.palette.accent_alt)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(desc.to_string(), Style::default().fg(theme.palette.fg_primary)),
    ])
}
