use super::models::{
    Episode, LyricLine, Playlist, Podcast, SessionHandle, StreamQuality, Track, Video,
    WireLyricLine,
};
use super::{Catalog, CatalogResult, Library, StreamResolver, Trending, TrendingKind};
use crate::config::ApiConfig;
use crate::error::CatalogError;
use anyhow::Context;
use async_trait::async_trait;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use std::sync::Arc;
use std::time::Duration;

#[derive(Debug)]
struct Inner {
    http: reqwest::Client,
    base_url: String,
}

/// HTTP client for the music catalog API.
#[derive(Debug, Clone)]
pub struct CatalogClient {
    inner: Arc<Inner>,
}

#[derive(Debug, Deserialize)]
struct TrackList {
    #[serde(default, alias = "tracks")]
    results: Vec<Track>,
}

#[derive(Debug, Deserialize)]
struct PlaylistList {
    #[serde(default)]
    playlists: Vec<Playlist>,
}

#[derive(Debug, Default, Deserialize)]
struct TrendingData {
    #[serde(default)]
    songs: Vec<Track>,
    #[serde(default)]
    videos: Vec<Video>,
    #[serde(default)]
    playlists: Vec<Playlist>,
}

#[derive(Debug, Deserialize)]
struct TrendingResponse {
    #[serde(default)]
    data: Option<TrendingData>,
}

#[derive(Debug, Deserialize)]
struct LibraryResponse {
    #[serde(default)]
    songs: Vec<Track>,
    #[serde(default)]
    playlists: Vec<Playlist>,
}

#[derive(Debug, Deserialize)]
struct PodcastList {
    #[serde(default)]
    podcasts: Vec<Podcast>,
}

#[derive(Debug, Deserialize)]
struct EpisodeList {
    #[serde(default)]
    author: Option<String>,
    #[serde(default)]
    episodes: Vec<Episode>,
}

#[derive(Debug, Deserialize)]
struct SessionResponse {
    #[serde(default)]
    session_id: Option<String>,
}

#[derive(Debug, Deserialize)]
struct NextResponse {
    #[serde(default)]
    current: Option<Track>,
}

#[derive(Debug, Deserialize)]
struct StreamResponse {
    #[serde(default)]
    stream_url: Option<String>,
}

#[derive(Debug, Deserialize)]
struct LyricsResponse {
    #[serde(default)]
    lyrics: Option<Vec<WireLyricLine>>,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    error: String,
}

impl CatalogClient {
    const USER_AGENT: &'static str = concat!("cadence/", env!("CARGO_PKG_VERSION"));

    pub fn new(cfg: &ApiConfig) -> anyhow::Result<Self> {
        let http = reqwest::Client::builder()
            .user_agent(Self::USER_AGENT)
            .timeout(Duration::from_secs(cfg.timeout_secs.max(1)))
            .build()
            .context("build reqwest client")?;

        Ok(Self {
            inner: Arc::new(Inner {
                http,
                base_url: cfg.base_url.trim_end_matches('/').to_string(),
            }),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.inner.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.inner.base_url, path)
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> CatalogResult<T> {
        let url = self.url(path);
        tracing::debug!(%url, "catalog GET");
        let response = self.inner.http.get(&url).send().await?;
        decode(response).await
    }

    async fn post_json<T: DeserializeOwned>(&self, path: &str) -> CatalogResult<T> {
        let url = self.url(path);
        tracing::debug!(%url, "catalog POST");
        let response = self.inner.http.post(&url).send().await?;
        decode(response).await
    }
}

async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> CatalogResult<T> {
    let status = response.status();
    let body = response.text().await?;
    if !status.is_success() {
        let message = serde_json::from_str::<ApiErrorBody>(&body)
            .map(|b| b.error)
            .unwrap_or_else(|_| body.chars().take(200).collect());
        return Err(CatalogError::Status { status, message });
    }
    Ok(serde_json::from_str(&body)?)
}

fn enc(s: &str) -> std::borrow::Cow<'_, str> {
    urlencoding::encode(s)
}

#[async_trait]
impl Catalog for CatalogClient {
    async fn search(&self, query: &str, page_size: u32) -> CatalogResult<Vec<Track>> {
        let path = format!("/search?q={}&page_size={page_size}", enc(query));
        let list: TrackList = self.get_json(&path).await?;
        Ok(list.results)
    }

    async fn charts(&self, limit: u32) -> CatalogResult<Vec<Track>> {
        let list: TrackList = self.get_json(&format!("/charts?limit={limit}")).await?;
        Ok(list.results)
    }

    async fn mood_playlists(&self, mood: &str, limit: u32) -> CatalogResult<Vec<Playlist>> {
        let path = format!("/mood?mood={}&limit={limit}", enc(mood));
        let list: PlaylistList = self.get_json(&path).await?;
        Ok(list.playlists)
    }

    async fn trending(&self, kind: TrendingKind, limit: u32) -> CatalogResult<Trending> {
        let path = format!("/trending?type={}&limit={limit}", kind.as_str());
        let r: TrendingResponse = self.get_json(&path).await?;
        let data = r.data.unwrap_or_default();
        Ok(Trending {
            songs: data.songs,
            videos: data.videos,
            playlists: data.playlists,
        })
    }

    async fn library(&self, limit: u32) -> CatalogResult<Library> {
        let r: LibraryResponse = self.get_json(&format!("/user/library?limit={limit}")).await?;
        Ok(Library {
            songs: r.songs,
            playlists: r.playlists,
        })
    }

    async fn browse_genre(&self, category: &str, limit: u32) -> CatalogResult<Vec<Track>> {
        let path = format!("/browse?category={}&limit={limit}", enc(category));
        let list: TrackList = self.get_json(&path).await?;
        Ok(list.results)
    }

    async fn search_podcasts(&self, query: &str, limit: u32) -> CatalogResult<Vec<Podcast>> {
        let path = format!("/podcast/search?query={}&limit={limit}", enc(query));
        let list: PodcastList = self.get_json(&path).await?;
        Ok(list.podcasts)
    }

    async fn playlist_tracks(&self, playlist_id: &str, limit: u32) -> CatalogResult<Vec<Track>> {
        let path = format!("/playlist?id={}&limit={limit}", enc(playlist_id));
        let list: TrackList = self.get_json(&path).await?;
        Ok(list.results)
    }

    async fn podcast_episodes(&self, browse_id: &str) -> CatalogResult<Vec<Track>> {
        let path = format!("/podcast/{}/episodes", enc(browse_id));
        let list: EpisodeList = self.get_json(&path).await?;
        let author = list.author.as_deref();
        Ok(list.episodes.iter().map(|e| e.to_track(author)).collect())
    }

    async fn start_session(&self, track_id: &str) -> CatalogResult<SessionHandle> {
        let path = format!("/song/{}/upnext/start", enc(track_id));
        let r: SessionResponse = self.post_json(&path).await?;
        r.session_id
            .filter(|s| !s.is_empty())
            .map(SessionHandle)
            .ok_or_else(|| CatalogError::empty(format!("no session id for {track_id}")))
    }

    async fn next_in_session(&self, session: &SessionHandle) -> CatalogResult<Option<Track>> {
        let path = format!("/song/upnext/next/{}", enc(&session.0));
        let r: NextResponse = self.post_json(&path).await?;
        Ok(r.current.filter(|t| !t.video_id.is_empty()))
    }
}

#[async_trait]
impl StreamResolver for CatalogClient {
    async fn resolve_stream(&self, track_id: &str, quality: StreamQuality) -> CatalogResult<String> {
        let path = format!("/stream/{}?quality={}", enc(track_id), quality.as_str());
        let r: StreamResponse = self.get_json(&path).await?;
        r.stream_url
            .filter(|u| !u.is_empty())
            .ok_or_else(|| CatalogError::empty(format!("no stream url for {track_id}")))
    }

    async fn lyrics(&self, track_id: &str) -> CatalogResult<Vec<LyricLine>> {
        let path = format!("/song/{}/lyrics", enc(track_id));
        let r: LyricsResponse = self.get_json(&path).await?;
        Ok(r.lyrics
            .unwrap_or_default()
            .into_iter()
            .map(LyricLine::from)
            .collect())
    }
}
