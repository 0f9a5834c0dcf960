//! Active-line selection against the playback clock.
//!
//! Every tick rescans the whole transcript. Lines are independent intervals,
//! so seeks in either direction need no special handling: the answer depends
//! only on the clock value passed in.

use crate::catalog::models::LyricLine;

/// Result of feeding one clock tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tick {
    pub active: Option<usize>,
    /// The active line differs from the previous tick's.
    pub changed: bool,
}

#[derive(Debug, Clone, Default)]
pub struct LyricsSync {
    lines: Vec<LyricLine>,
    last_active: Option<usize>,
}

impl LyricsSync {
    pub fn new(lines: Vec<LyricLine>) -> Self {
        Self {
            lines,
            last_active: None,
        }
    }

    pub fn lines(&self) -> &[LyricLine] {
        &self.lines
    }

    /// False for plain transcripts where every line spans the whole track.
    pub fn is_timed(&self) -> bool {
        self.lines
            .iter()
            .any(|l| l.start > 0.0 || l.end.is_finite())
    }

    /// Index of the line whose `[start, end)` contains `clock`.
    ///
    /// Overlapping intervals resolve to the last matching line in transcript
    /// order.
    pub fn active_line_at(&self, clock: f64) -> Option<usize> {
        self.lines.iter().rposition(|l| l.contains(clock))
    }

    pub fn tick(&mut self, clock: f64) -> Tick {
        let active = self.active_line_at(clock);
        let changed = active != self.last_active;
        self.last_active = active;
        Tick { active, changed }
    }

    /// Active line as of the most recent tick.
    pub fn active(&self) -> Option<usize> {
        self.last_active
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sync(lines: &[(&str, f64, f64)]) -> LyricsSync {
        LyricsSync::new(
            lines
                .iter()
                .map(|(t, s, e)| LyricLine::new(*t, *s, *e))
                .collect(),
        )
    }

    #[test]
    fn selects_containing_interval() {
        let s = sync(&[("a", 1.0, 3.0), ("b", 3.0, 5.0), ("c", 5.0, f64::INFINITY)]);
        assert_eq!(s.active_line_at(0.5), None);
        assert_eq!(s.active_line_at(1.0), Some(0));
        assert_eq!(s.active_line_at(2.999), Some(0));
        assert_eq!(s.active_line_at(3.0), Some(1));
        assert_eq!(s.active_line_at(600.0), Some(2));
    }

    #[test]
    fn overlap_prefers_last_line() {
        let s = sync(&[("a", 0.0, 10.0), ("b", 2.0, 4.0), ("c", 3.0, 6.0)]);
        assert_eq!(s.active_line_at(1.0), Some(0));
        assert_eq!(s.active_line_at(2.5), Some(1));
        assert_eq!(s.active_line_at(3.5), Some(2));
        assert_eq!(s.active_line_at(7.0), Some(0));
    }

    #[test]
    fn backward_seek_reselects() {
        let mut s = sync(&[("a", 0.0, 2.0), ("b", 2.0, 4.0), ("c", 4.0, 6.0)]);
        assert_eq!(s.tick(5.0), Tick { active: Some(2), changed: true });
        assert_eq!(s.tick(5.5), Tick { active: Some(2), changed: false });
        assert_eq!(s.tick(1.0), Tick { active: Some(0), changed: true });
        assert_eq!(s.active(), Some(0));
    }

    #[test]
    fn gap_before_first_line_has_no_active_line() {
        let mut s = sync(&[("a", 12.0, 15.0)]);
        assert_eq!(s.tick(13.0).active, Some(0));
        let t = s.tick(3.0);
        assert_eq!(t.active, None);
        assert!(t.changed);
    }

    #[test]
    fn nan_clock_matches_nothing() {
        let s = sync(&[("a", 0.0, f64::INFINITY)]);
        assert_eq!(s.active_line_at(f64::NAN), None);
    }

    #[test]
    fn plain_transcript_is_untimed() {
        let s = sync(&[("a", 0.0, f64::INFINITY), ("b", 0.0, f64::INFINITY)]);
        assert!(!s.is_timed());
        // Every line matches, so the last one wins.
        assert_eq!(s.active_line_at(42.0), Some(1));
        assert!(sync(&[("a", 1.0, 2.0)]).is_timed());
    }
}
