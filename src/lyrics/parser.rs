//! LRC format parser
//!
//! Parses synchronized lyrics in LRC format into timed lines:
//! [mm:ss.xx] Lyrics line here
//!
//! Each line runs until the next later timestamp; the last one is unbounded.

use crate::catalog::models::LyricLine;

/// Parse LRC content. Lines without a timestamp start at 0.
pub fn parse_lrc(content: &str) -> Vec<LyricLine> {
    let mut stamped: Vec<(f64, String)> = Vec::new();

    for line in content.lines() {
        let line = line.trim();
        if line.is_empty() || is_metadata(line) {
            continue;
        }

        if let Some((times, text)) = parse_timed_line(line) {
            stamped.extend(times.into_iter().map(|t| (t, text.clone())));
        } else if !line.starts_with('[') {
            stamped.push((0.0, line.to_string()));
        }
    }

    // Stable: lines sharing a timestamp keep file order.
    stamped.sort_by(|a, b| a.0.total_cmp(&b.0));

    let starts: Vec<f64> = stamped.iter().map(|(t, _)| *t).collect();
    stamped
        .into_iter()
        .enumerate()
        .map(|(i, (start, text))| {
            let end = starts[i + 1..]
                .iter()
                .copied()
                .find(|s| *s > start)
                .unwrap_or(f64::INFINITY);
            LyricLine::new(text, start, end)
        })
        .collect()
}

/// Untimed transcript: every line spans the whole track.
pub fn parse_plain(content: &str) -> Vec<LyricLine> {
    content
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .map(|l| LyricLine::new(l, 0.0, f64::INFINITY))
        .collect()
}

/// Metadata tag like [ti:Title]
fn is_metadata(line: &str) -> bool {
    let Some(end) = line.find(']') else {
        return false;
    };
    if !line.starts_with('[') {
        return false;
    }
    let inner = &line[1..end];
    match inner.split_once(':') {
        Some((tag, _)) => {
            !tag.is_empty() && tag.len() <= 6 && tag.chars().all(|c| c.is_ascii_alphabetic())
        }
        None => false,
    }
}

/// [00:12.34]Lyrics or [00:12.34][00:15.00]Lyrics
fn parse_timed_line(line: &str) -> Option<(Vec<f64>, String)> {
    let mut times = Vec::new();
    let mut rest = line;

    while let Some(after) = rest.strip_prefix('[') {
        let end = after.find(']')?;
        match parse_timestamp(&after[..end]) {
            Some(t) => {
                times.push(t);
                rest = &after[end + 1..];
            }
            None => break,
        }
    }

    if times.is_empty() {
        return None;
    }
    Some((times, rest.trim().to_string()))
}

/// "mm:ss", "mm:ss.xx", "mm:ss.xxx" or "mm:ss:xx" to seconds
fn parse_timestamp(s: &str) -> Option<f64> {
    let parts: Vec<&str> = s.split([':', '.']).collect();
    let (min, sec, frac) = match parts.as_slice() {
        [m, s] => (*m, *s, None),
        [m, s, f] => (*m, *s, Some(*f)),
        _ => return None,
    };
    let min: u64 = min.parse().ok()?;
    let sec: u64 = sec.parse().ok()?;
    let ms: u64 = match frac {
        None => 0,
        Some(f) => match f.len() {
            1 => f.parse::<u64>().ok()? * 100,
            2 => f.parse::<u64>().ok()? * 10,
            3 => f.parse().ok()?,
            _ => return None,
        },
    };
    Some((min * 60_000 + sec * 1000 + ms) as f64 / 1000.0)
}
