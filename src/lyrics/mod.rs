//! Lyrics loading and synchronization
//!
//! This module provides:
//! - [`LyricsLoader`]: fetches a transcript from the catalog, optionally
//!   falling back to LRCLIB, and never fails towards the caller
//! - [`LyricsPanel`]: per-track loading state plus the active-line tracker
//! - [`LyricsSync`]: active-line selection against the playback clock

pub mod lrclib;
pub mod parser;
pub mod sync;

use crate::catalog::StreamResolver;
use crate::catalog::models::{LyricLine, Track};
use crate::error::CatalogError;
use lru::LruCache;
use std::num::NonZeroUsize;
use std::sync::{Arc, Mutex};

pub use lrclib::LrclibClient;
pub use sync::{LyricsSync, Tick};

pub const LOADING_PLACEHOLDER: &str = "Loading synced lyrics...";
pub const EMPTY_PLACEHOLDER: &str = "No lyrics available";
pub const FAILED_PLACEHOLDER: &str = "Failed to load lyrics";

const CACHE_ENTRIES: usize = 64;

/// Outcome of one load attempt.
#[derive(Debug, Clone, PartialEq)]
pub enum LyricsLoad {
    Lines(Vec<LyricLine>),
    /// The source answered but had nothing for this track.
    Empty,
    Failed(String),
}

#[derive(Debug, Clone, Default)]
pub enum LyricsState {
    #[default]
    NotLoaded,
    Loading,
    Ready(LyricsSync),
    Empty,
    Failed(String),
}

impl LyricsState {
    /// Text shown instead of lyrics, if any.
    pub fn placeholder(&self) -> Option<&'static str> {
        match self {
            LyricsState::NotLoaded | LyricsState::Ready(_) => None,
            LyricsState::Loading => Some(LOADING_PLACEHOLDER),
            LyricsState::Empty => Some(EMPTY_PLACEHOLDER),
            LyricsState::Failed(_) => Some(FAILED_PLACEHOLDER),
        }
    }
}

/// Lyrics for whichever track is current.
#[derive(Debug, Clone, Default)]
pub struct LyricsPanel {
    track_id: Option<String>,
    state: LyricsState,
}

impl LyricsPanel {
    pub fn state(&self) -> &LyricsState {
        &self.state
    }

    /// Switch to `track_id` and mark it loading. Returns false when that
    /// track is already loading or loaded.
    pub fn begin(&mut self, track_id: &str) -> bool {
        if self.track_id.as_deref() == Some(track_id)
            && !matches!(self.state, LyricsState::NotLoaded | LyricsState::Failed(_))
        {
            return false;
        }
        self.track_id = Some(track_id.to_string());
        self.state = LyricsState::Loading;
        true
    }

    /// Apply a finished load. Loads for a track that is no longer current
    /// are dropped.
    pub fn apply(&mut self, track_id: &str, load: LyricsLoad) -> bool {
        if self.track_id.as_deref() != Some(track_id) {
            return false;
        }
        self.state = match load {
            LyricsLoad::Lines(lines) if !lines.is_empty() => LyricsState::Ready(LyricsSync::new(lines)),
            LyricsLoad::Lines(_) | LyricsLoad::Empty => LyricsState::Empty,
            LyricsLoad::Failed(reason) => LyricsState::Failed(reason),
        };
        true
    }

    /// Feed a clock tick. `None` unless lyrics are ready.
    pub fn tick(&mut self, clock: f64) -> Option<Tick> {
        match &mut self.state {
            LyricsState::Ready(sync) => Some(sync.tick(clock)),
            _ => None,
        }
    }

    pub fn clear(&mut self) {
        self.track_id = None;
        self.state = LyricsState::NotLoaded;
    }
}

/// Fetches transcripts, with an in-memory cache of recent tracks.
#[derive(Clone)]
pub struct LyricsLoader {
    lrclib: Option<LrclibClient>,
    cache: Arc<Mutex<LruCache<String, Vec<LyricLine>>>>,
}

impl LyricsLoader {
    pub fn new(lrclib: Option<LrclibClient>) -> Self {
        let cap = NonZeroUsize::new(CACHE_ENTRIES).unwrap_or(NonZeroUsize::MIN);
        Self {
            lrclib,
            cache: Arc::new(Mutex::new(LruCache::new(cap))),
        }
    }

    pub async fn load<R>(&self, resolver: &R, track: &Track) -> LyricsLoad
    where
        R: StreamResolver + ?Sized,
    {
        if let Some(lines) = self.cached(&track.video_id) {
            return LyricsLoad::Lines(lines);
        }

        let primary = match resolver.lyrics(&track.video_id).await {
            Ok(lines) if !lines.is_empty() => LyricsLoad::Lines(lines),
            Ok(_) => LyricsLoad::Empty,
            // Any error status counts as "no lyrics" for this track.
            Err(CatalogError::Status { .. }) | Err(CatalogError::EmptyResult(_)) => LyricsLoad::Empty,
            Err(e) => {
                tracing::warn!(track = %track.video_id, error = %e, "lyrics fetch failed");
                LyricsLoad::Failed(e.to_string())
            }
        };

        let load = match (primary, &self.lrclib) {
            (LyricsLoad::Lines(lines), _) => LyricsLoad::Lines(lines),
            (fallback_from, Some(lrclib)) => match lrclib.find(track).await {
                Ok(lines) if !lines.is_empty() => {
                    tracing::debug!(track = %track.video_id, "lyrics from lrclib");
                    LyricsLoad::Lines(lines)
                }
                Ok(_) => fallback_from,
                Err(e) => {
                    tracing::debug!(track = %track.video_id, error = %e, "lrclib lookup failed");
                    fallback_from
                }
            },
            (other, None) => other,
        };

        if let LyricsLoad::Lines(lines) = &load
            && let Ok(mut cache) = self.cache.lock()
        {
            cache.put(track.video_id.clone(), lines.clone());
        }
        load
    }

    fn cached(&self, track_id: &str) -> Option<Vec<LyricLine>> {
        self.cache.lock().ok()?.get(track_id).cloned()
    }
}
