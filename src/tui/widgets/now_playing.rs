//! Now Playing widget - compact text-only player for bottom bar

use super::truncate_str;
use crate::app::state::{AppState, ToastKind};
use crate::session::PlaybackStatus;
use crate::tui::theme::{Icons, get_theme};
use crate::view::cards::{artists_line, track_card};
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

pub fn render(frame: &mut Frame, state: &AppState, area: Rect) {
    let theme = get_theme();
    let icons = &theme.icons;

    let block = Block::default()
        .borders(Borders::ALL)
        .border_set(theme.border_set())
        .border_style(Style::default().fg(theme.palette.border))
        .title(format!(" {} Player ", icons.music))
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

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Title
            Constraint::Length(1), // Artists
            Constraint::Length(1), // Progress bar
            Constraint::Length(1), // Time + controls + volume
            Constraint::Min(0),    // Toast or status
        ])
        .split(padded);

    let content_width = padded.width.saturating_sub(1) as usize;
    let current = state.playback.current();

    let (title, artists) = match (&state.pending_title, current) {
        (Some(pending), _) => (format!("Loading {pending}..."), String::new()),
        (None, Some(np)) => (
            track_card(&np.track).title,
            artists_line(&np.track.artists),
        ),
        (None, None) => ("Not playing".to_string(), String::new()),
    };

    frame.render_widget(
        Paragraph::new(Line::from(Span::styled(
            truncate_str(&title, content_width),
            Style::default()
                .fg(theme.palette.fg_primary)
                .add_modifier(Modifier::BOLD),
        ))),
        rows[0],
    );
    frame.render_widget(
        Paragraph::new(Line::from(Span::styled(
            truncate_str(&artists, content_width),
            Style::default().fg(theme.palette.fg_secondary),
        ))),
        rows[1],
    );

    let ratio = if current.is_some() && state.duration_secs > 0.0 {
        (state.position_secs / state.duration_secs).clamp(0.0, 1.0)
    } else {
        0.0
    };
    frame.render_widget(
        Paragraph::new(Line::from(Span::styled(
            progress_bar(rows[2].width as usize, ratio, icons),
            Style::default().fg(theme.palette.accent),
        ))),
        rows[2],
    );

    let status = state.playback.status();
    let status_icon = match status {
        PlaybackStatus::Playing => icons.play,
        PlaybackStatus::Paused => icons.pause,
        PlaybackStatus::Stopped => icons.stop,
    };
    let vol_icon = if state.volume == 0 {
        icons.volume_mute
    } else if state.volume < 50 {
        icons.volume_low
    } else {
        icons.volume_high
    };

    let controls = Line::from(vec![
        Span::styled(
            format!(
                "{}/{}",
                format_clock(state.position_secs),
                format_clock(state.duration_secs)
            ),
            Style::default().fg(theme.palette.fg_secondary),
        ),
        Span::raw(" "),
        Span::styled(icons.prev, Style::default().fg(theme.palette.fg_secondary)),
        Span::raw(" "),
        Span::styled(status_icon, Style::default().fg(theme.palette.playing)),
        Span::raw(" "),
        Span::styled(icons.next, Style::default().fg(theme.palette.fg_secondary)),
        Span::raw("  "),
        Span::styled(vol_icon, Style::default().fg(theme.palette.fg_secondary)),
        Span::raw(" "),
        Span::styled(
            format!("{}%", state.volume),
            Style::default().fg(theme.palette.fg_secondary),
        ),
    ]);
    frame.render_widget(Paragraph::new(controls), rows[3]);

    let footer = match &state.toast {
        Some(toast) if !toast.is_expired() => {
            let (prefix, color) = match toast.kind {
                ToastKind::Success => (icons.success, theme.palette.playing),
                ToastKind::Error => (icons.error, theme.palette.error),
            };
            Line::from(vec![
                Span::styled(format!("{prefix} "), Style::default().fg(color)),
                Span::styled(
                    truncate_str(&toast.message, content_width.saturating_sub(3)),
                    Style::default().fg(color),
                ),
            ])
        }
        _ => Line::from(Span::styled(
            truncate_str(&state.status, content_width),
            Style::default().fg(theme.palette.fg_secondary),
        )),
    };
    frame.render_widget(Paragraph::new(footer), rows[4]);
}

fn progress_bar(width: usize, ratio: f64, icons: &Icons) -> String {
    if width < 3 {
        return String::new();
    }

    let filled = ((width - 1) as f64 * ratio).round() as usize;
    let empty = width.saturating_sub(filled + 1);

    let mut bar = String::with_capacity(width * 3);
    for _ in 0..filled {
        bar.push_str(icons.progress_full);
    }
    bar.push_str(icons.progress_head);
    for _ in 0..empty {
        bar.push_str(icons.progress_empty);
    }
    bar
}

fn format_clock(secs: f64) -> String {
    let total = secs.max(0.0).floor() as u64;
    format!("{:02}:{:02}", total / 60, total % 60)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clock_formats_minutes_and_seconds() {
        assert_eq!(format_clock(0.0), "00:00");
        assert_eq!(format_clock(75.9), "01:15");
        assert_eq!(format_clock(-3.0), "00:00");
    }

    #[test]
    fn progress_bar_fills_by_ratio() {
        let icons = Icons::nerd();
        assert_eq!(progress_bar(5, 0.0, &icons), "●────");
        assert_eq!(progress_bar(5, 1.0, &icons), "━━━━●");
        assert_eq!(progress_bar(2, 0.5, &icons), "");
    }
}
