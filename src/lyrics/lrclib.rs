//! LRCLIB fallback source
//!
//! Used when the catalog has nothing for a track. LRCLIB matches on
//! title/artist rather than the catalog's track id.
//! API Documentation: https://lrclib.net/docs

use super::parser;
use crate::catalog::models::{LyricLine, Track};
use anyhow::Context;
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
struct LrclibRecord {
    #[serde(rename = "plainLyrics")]
    plain_lyrics: Option<String>,
    #[serde(rename = "syncedLyrics")]
    synced_lyrics: Option<String>,
}

impl LrclibRecord {
    /// Synced lyrics first, plain as a fallback.
    fn into_lines(self) -> Vec<LyricLine> {
        if let Some(synced) = self.synced_lyrics.filter(|s| !s.trim().is_empty()) {
            return parser::parse_lrc(&synced);
        }
        self.plain_lyrics
            .map(|p| parser::parse_plain(&p))
            .unwrap_or_default()
    }
}

#[derive(Debug, Clone)]
pub struct LrclibClient {
    client: reqwest::Client,
    base_url: String,
}

impl LrclibClient {
    const DEFAULT_BASE_URL: &'static str = "https://lrclib.net/api";
    const USER_AGENT: &'static str = concat!(
        "cadence/",
        env!("CARGO_PKG_VERSION"),
        " (terminal music client)"
    );

    pub fn new() -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(Self::USER_AGENT)
            .timeout(std::time::Duration::from_secs(10))
            .build()
            .context("build lrclib client")?;
        Ok(Self {
            client,
            base_url: Self::DEFAULT_BASE_URL.to_string(),
        })
    }

    /// Timed lines for `track`, or an empty list when LRCLIB has no match.
    pub async fn find(&self, track: &Track) -> anyhow::Result<Vec<LyricLine>> {
        let Some(artist) = track.primary_artist() else {
            return Ok(Vec::new());
        };
        if track.title.is_empty() {
            return Ok(Vec::new());
        }

        if let Some(record) = self.get_exact(track, artist).await? {
            let lines = record.into_lines();
            if !lines.is_empty() {
                return Ok(lines);
            }
        }

        Ok(self
            .search(&track.title, artist)
            .await?
            .map(LrclibRecord::into_lines)
            .unwrap_or_default())
    }

    async fn get_exact(&self, track: &Track, artist: &str) -> anyhow::Result<Option<LrclibRecord>> {
        let mut url = format!(
            "{}/get?track_name={}&artist_name={}",
            self.base_url,
            urlencoding::encode(&track.title),
            urlencoding::encode(artist)
        );
        if !track.album.is_empty() {
            url.push_str(&format!("&album_name={}", urlencoding::encode(&track.album)));
        }
        if let Some(duration) = track.duration_seconds() {
            url.push_str(&format!("&duration={duration}"));
        }

        let response = self.client.get(&url).send().await.context("lrclib get")?;
        match response.status() {
            s if s.is_success() => Ok(Some(response.json().await.context("decode lrclib get")?)),
            reqwest::StatusCode::NOT_FOUND => Ok(None),
            s => anyhow::bail!("LRCLIB API error: {s}"),
        }
    }

    async fn search(&self, title: &str, artist: &str) -> anyhow::Result<Option<LrclibRecord>> {
        let query = format!("{title} {artist}");
        let url = format!("{}/search?q={}", self.base_url, urlencoding::encode(&query));

        let response = self.client.get(&url).send().await.context("lrclib search")?;
        match response.status() {
            s if s.is_success() => {
                let results: Vec<LrclibRecord> =
                    response.json().await.context("decode lrclib search")?;
                // Prefer a result with synced lyrics.
                let pos = results
                    .iter()
                    .position(|r| r.synced_lyrics.as_deref().is_some_and(|s| !s.is_empty()))
                    .unwrap_or(0);
                Ok(results.into_iter().nth(pos))
            }
            reqwest::StatusCode::NOT_FOUND => Ok(None),
            s => anyhow::bail!("LRCLIB search error: {s}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn synced_preferred_over_plain() {
        let r = LrclibRecord {
            plain_lyrics: Some("plain".into()),
            synced_lyrics: Some("[00:01.00]timed".into()),
        };
        let lines = r.into_lines();
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].text, "timed");
        assert_eq!(lines[0].start, 1.0);
    }

    #[test]
    fn blank_synced_falls_back_to_plain() {
        let r = LrclibRecord {
            plain_lyrics: Some("a\nb".into()),
            synced_lyrics: Some("  ".into()),
        };
        assert_eq!(r.into_lines().len(), 2);
    }
}
