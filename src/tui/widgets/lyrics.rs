use super::truncate_str;
use crate::app::state::AppState;
use crate::lyrics::LyricsState;
use crate::tui::theme::get_theme;
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

pub fn render(frame: &mut Frame, state: &AppState, area: Rect) {
    let theme = get_theme();

    let block = Block::default()
        .borders(Borders::ALL)
        .border_set(theme.border_set())
        .border_style(Style::default().fg(theme.palette.border))
        .title(format!(" {} Lyrics ", theme.icons.lyrics))
        .title_style(Style::default().fg(theme.palette.accent));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let padded = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(1),
            Constraint::Length(1),
        ])
        .split(inner)[1];

    let lyrics_state = state.lyrics.state();
    let sync = match lyrics_state {
        LyricsState::Ready(sync) => sync,
        LyricsState::NotLoaded => return,
        other => {
            let text = other.placeholder().unwrap_or_default();
            let p = Paragraph::new(Line::from(Span::styled(
                text,
                Style::default().fg(theme.palette.fg_secondary),
            )))
            .alignment(Alignment::Center);
            frame.render_widget(p, padded);
            return;
        }
    };

    let lines = sync.lines();
    let height = padded.height as usize;
    let active = sync.active();
    let (start, end) = window(lines.len(), active, height);
    let max_width = padded.width.saturating_sub(2) as usize;

    let display: Vec<Line> = (start..end)
        .map(|i| {
            let is_active = active == Some(i);
            let style = if is_active {
                Style::default()
                    .fg(theme.palette.accent)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(theme.palette.fg_secondary)
            };
            let prefix = if is_active { "♪ " } else { "  " };
            Line::from(vec![
                Span::styled(prefix, style),
                Span::styled(truncate_str(&lines[i].text, max_width), style),
            ])
        })
        .collect();

    frame.render_widget(Paragraph::new(display), padded);
}

/// Range of line indices to show: the active line centered when possible,
/// otherwise from the top.
fn window(len: usize, active: Option<usize>, height: usize) -> (usize, usize) {
    if height == 0 || len == 0 {
        return (0, 0);
    }
    let start = match active {
        Some(a) => a.saturating_sub(height / 2).min(len.saturating_sub(height)),
        None => 0,
    };
    (start, (start + height).min(len))
}

#[cfg(test)]
mod tests {
    use super::window;

    #[test]
    fn window_centers_active_line() {
        assert_eq!(window(20, Some(10), 5), (8, 13));
        assert_eq!(window(20, Some(1), 5), (0, 5));
        assert_eq!(window(20, Some(19), 5), (15, 20));
        assert_eq!(window(3, None, 5), (0, 3));
        assert_eq!(window(0, None, 5), (0, 0));
    }
}
