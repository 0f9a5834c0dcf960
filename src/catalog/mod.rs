//! Remote catalog and stream resolver
//!
//! The catalog API is consumed, not designed, here. Everything the playback
//! core needs from it goes through the [`Catalog`] and [`StreamResolver`]
//! traits so the core can run against in-memory fakes.

pub mod client;
pub mod models;

use crate::error::CatalogError;
use async_trait::async_trait;
use models::{LyricLine, Playlist, Podcast, SessionHandle, StreamQuality, Track, Video};

pub use client::CatalogClient;

pub type CatalogResult<T> = std::result::Result<T, CatalogError>;

/// Trending sections as returned by the API.
#[derive(Debug, Clone, Default)]
pub struct Trending {
    pub songs: Vec<Track>,
    pub videos: Vec<Video>,
    pub playlists: Vec<Playlist>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrendingKind {
    All,
    Playlists,
}

impl TrendingKind {
    pub fn as_str(self) -> &'static str {
        match self {
            TrendingKind::All => "all",
            TrendingKind::Playlists => "playlists",
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Library {
    pub songs: Vec<Track>,
    pub playlists: Vec<Playlist>,
}

/// Browse queries, contents expansion and up-next sessions.
#[async_trait]
pub trait Catalog: Send + Sync {
    async fn search(&self, query: &str, page_size: u32) -> CatalogResult<Vec<Track>>;
    async fn charts(&self, limit: u32) -> CatalogResult<Vec<Track>>;
    async fn mood_playlists(&self, mood: &str, limit: u32) -> CatalogResult<Vec<Playlist>>;
    async fn trending(&self, kind: TrendingKind, limit: u32) -> CatalogResult<Trending>;
    async fn library(&self, limit: u32) -> CatalogResult<Library>;
    async fn browse_genre(&self, category: &str, limit: u32) -> CatalogResult<Vec<Track>>;
    async fn search_podcasts(&self, query: &str, limit: u32) -> CatalogResult<Vec<Podcast>>;

    async fn playlist_tracks(&self, playlist_id: &str, limit: u32) -> CatalogResult<Vec<Track>>;
    /// Episodes already mapped to playable tracks (author as artist).
    async fn podcast_episodes(&self, browse_id: &str) -> CatalogResult<Vec<Track>>;

    async fn start_session(&self, track_id: &str) -> CatalogResult<SessionHandle>;
    /// `None` means the queue is exhausted.
    async fn next_in_session(&self, session: &SessionHandle) -> CatalogResult<Option<Track>>;
}

/// Media URLs and synced lyrics for a track.
#[async_trait]
pub trait StreamResolver: Send + Sync {
    async fn resolve_stream(&self, track_id: &str, quality: StreamQuality) -> CatalogResult<String>;
    async fn lyrics(&self, track_id: &str) -> CatalogResult<Vec<LyricLine>>;
}
