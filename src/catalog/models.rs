use serde::{Deserialize, Serialize};

/// A playable item. Field names follow the catalog API's JSON.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Track {
    #[serde(rename = "videoId", alias = "video_id", default)]
    pub video_id: String,
    #[serde(default, deserialize_with = "nullable")]
    pub title: String,
    #[serde(default, deserialize_with = "nullable")]
    pub artists: Vec<String>,
    /// Most-preferred first.
    #[serde(default, deserialize_with = "nullable")]
    pub thumbnails: Vec<String>,
    #[serde(default, deserialize_with = "nullable")]
    pub album: String,
    /// "3:45" style text as sent by the API.
    #[serde(default, deserialize_with = "nullable")]
    pub duration: String,
}

impl Track {
    pub fn duration_seconds(&self) -> Option<u32> {
        parse_duration_text(&self.duration)
    }

    pub fn primary_artist(&self) -> Option<&str> {
        self.artists.first().map(String::as_str)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Playlist {
    #[serde(rename = "playlist_id", alias = "playlistId", default)]
    pub playlist_id: String,
    #[serde(default, deserialize_with = "nullable")]
    pub title: String,
    #[serde(default, deserialize_with = "lenient_count")]
    pub track_count: Option<u32>,
    #[serde(default, deserialize_with = "nullable")]
    pub thumbnails: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Video {
    #[serde(rename = "videoId", alias = "video_id", default)]
    pub video_id: String,
    #[serde(default, deserialize_with = "nullable")]
    pub title: String,
    #[serde(default)]
    pub channel: Option<String>,
    #[serde(default, deserialize_with = "nullable")]
    pub thumbnails: Vec<String>,
}

impl Video {
    /// Videos play through the same path as tracks, with the channel as artist.
    pub fn to_track(&self) -> Track {
        Track {
            video_id: self.video_id.clone(),
            title: self.title.clone(),
            artists: vec![
                self.channel
                    .clone()
                    .filter(|c| !c.is_empty())
                    .unwrap_or_else(|| "Unknown".to_string()),
            ],
            thumbnails: self.thumbnails.clone(),
            ..Track::default()
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Podcast {
    #[serde(rename = "browseId", alias = "browse_id", default)]
    pub browse_id: String,
    #[serde(default, deserialize_with = "nullable")]
    pub title: String,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default, deserialize_with = "nullable")]
    pub thumbnails: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Episode {
    #[serde(rename = "videoId", alias = "video_id", default)]
    pub video_id: String,
    #[serde(default, deserialize_with = "nullable")]
    pub title: String,
    #[serde(default, deserialize_with = "nullable")]
    pub thumbnails: Vec<String>,
}

impl Episode {
    pub fn to_track(&self, author: Option<&str>) -> Track {
        Track {
            video_id: self.video_id.clone(),
            title: self.title.clone(),
            artists: vec![author.unwrap_or("Podcast").to_string()],
            thumbnails: self.thumbnails.clone(),
            ..Track::default()
        }
    }
}

/// Anything a browse page can show as a card.
#[derive(Debug, Clone, PartialEq)]
pub enum Record {
    Track(Track),
    Video(Video),
    Playlist(Playlist),
    Podcast(Podcast),
}

/// Server-issued token for an up-next queue position.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionHandle(pub String);

impl std::fmt::Display for SessionHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// One timed caption. `end` is exclusive and may be `f64::INFINITY`.
#[derive(Debug, Clone, PartialEq)]
pub struct LyricLine {
    pub text: String,
    pub start: f64,
    pub end: f64,
}

impl LyricLine {
    pub fn new(text: impl Into<String>, start: f64, end: f64) -> Self {
        Self {
            text: text.into(),
            start,
            end,
        }
    }

    pub fn contains(&self, clock: f64) -> bool {
        clock >= self.start && clock < self.end
    }
}

/// Lyric entries arrive either as timed objects or as bare strings.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub(crate) enum WireLyricLine {
    Timed {
        #[serde(default)]
        start: Option<f64>,
        #[serde(default)]
        end: Option<f64>,
        #[serde(default)]
        text: Option<String>,
    },
    Plain(String),
}

impl From<WireLyricLine> for LyricLine {
    fn from(w: WireLyricLine) -> Self {
        match w {
            // Zero and null are both "unset" on the wire.
            WireLyricLine::Timed { start, end, text } => LyricLine {
                text: text.unwrap_or_default(),
                start: start.filter(|s| s.is_finite() && *s > 0.0).unwrap_or(0.0),
                end: end
                    .filter(|e| e.is_finite() && *e > 0.0)
                    .unwrap_or(f64::INFINITY),
            },
            WireLyricLine::Plain(text) => LyricLine::new(text, 0.0, f64::INFINITY),
        }
    }
}

/// Audio quality hint passed to the stream resolver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StreamQuality {
    Low,
    Medium,
    #[default]
    High,
}

impl StreamQuality {
    pub fn as_str(self) -> &'static str {
        match self {
            StreamQuality::Low => "low",
            StreamQuality::Medium => "medium",
            StreamQuality::High => "high",
        }
    }
}

impl std::str::FromStr for StreamQuality {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "low" => Ok(Self::Low),
            "medium" => Ok(Self::Medium),
            "high" => Ok(Self::High),
            other => Err(format!("unknown quality '{other}' (use low, medium or high)")),
        }
    }
}

/// `null` decodes like a missing field.
fn nullable<'de, D, T>(d: D) -> Result<T, D::Error>
where
    D: serde::Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(d)?.unwrap_or_default())
}

/// Counts arrive as numbers, numeric strings ("1,204") or null.
fn lenient_count<'de, D>(d: D) -> Result<Option<u32>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let v = serde_json::Value::deserialize(d)?;
    Ok(match v {
        serde_json::Value::Number(n) => n.as_u64().and_then(|n| u32::try_from(n).ok()),
        serde_json::Value::String(s) => s.replace(',', "").trim().parse().ok(),
        _ => None,
    })
}

/// Parse duration text like "3:45" or "1:23:45" into seconds
pub fn parse_duration_text(text: &str) -> Option<u32> {
    let parts: Vec<&str> = text.trim().split(':').collect();
    match parts.len() {
        2 => {
            let mins: u32 = parts[0].parse().ok()?;
            let secs: u32 = parts[1].parse().ok()?;
            mins.checked_mul(60)?.checked_add(secs)
        }
        3 => {
            let hours: u32 = parts[0].parse().ok()?;
            let mins: u32 = parts[1].parse().ok()?;
            let secs: u32 = parts[2].parse().ok()?;
            hours
                .checked_mul(3600)?
                .checked_add(mins.checked_mul(60)?)?
                .checked_add(secs)
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn track_tolerates_missing_fields() {
        let t: Track = serde_json::from_value(json!({ "videoId": "abc" })).unwrap();
        assert_eq!(t.video_id, "abc");
        assert!(t.title.is_empty());
        assert!(t.artists.is_empty());
        assert!(t.thumbnails.is_empty());

        let t: Track =
            serde_json::from_value(json!({ "videoId": "x", "title": null, "album": null }))
                .unwrap();
        assert!(t.title.is_empty());
    }

    #[test]
    fn identifier_aliases() {
        let v: Video = serde_json::from_value(json!({ "video_id": "v1", "title": "Clip" })).unwrap();
        assert_eq!(v.video_id, "v1");
        let p: Playlist =
            serde_json::from_value(json!({ "playlistId": "PL1", "track_count": 12 })).unwrap();
        assert_eq!(p.playlist_id, "PL1");
        assert_eq!(p.track_count, Some(12));
        let p: Playlist = serde_json::from_value(json!({ "track_count": "1,204" })).unwrap();
        assert_eq!(p.track_count, Some(1204));
        let p: Playlist = serde_json::from_value(json!({ "track_count": "many" })).unwrap();
        assert_eq!(p.track_count, None);
    }

    #[test]
    fn video_without_channel_plays_as_unknown_artist() {
        let v = Video {
            video_id: "v".into(),
            title: "t".into(),
            ..Video::default()
        };
        assert_eq!(v.to_track().artists, vec!["Unknown".to_string()]);
    }

    #[test]
    fn wire_lyrics_defaults() {
        let lines: Vec<WireLyricLine> = serde_json::from_value(json!([
            { "start": 1.5, "end": 3.0, "text": "one" },
            { "start": null, "end": null, "text": "two" },
            "three",
            { "start": 4.0, "end": 0, "text": "four" },
        ]))
        .unwrap();
        let lines: Vec<LyricLine> = lines.into_iter().map(Into::into).collect();
        assert_eq!(lines[0], LyricLine::new("one", 1.5, 3.0));
        assert_eq!(lines[1].start, 0.0);
        assert!(lines[1].end.is_infinite());
        assert_eq!(lines[2].text, "three");
        assert!(lines[3].end.is_infinite());
    }

    #[test]
    fn duration_text() {
        assert_eq!(parse_duration_text("3:45"), Some(225));
        assert_eq!(parse_duration_text("1:00:01"), Some(3601));
        assert_eq!(parse_duration_text(""), None);
    }

    #[test]
    fn oversized_duration_is_unknown() {
        assert_eq!(parse_duration_text("99999999:00"), None);
        assert_eq!(parse_duration_text("4000000:00:00"), None);
        let t = Track {
            duration: "99999999:00".into(),
            ..Track::default()
        };
        assert_eq!(t.duration_seconds(), None);
    }

    #[test]
    fn quality_from_str() {
        assert_eq!("HIGH".parse::<StreamQuality>(), Ok(StreamQuality::High));
        assert!("best".parse::<StreamQuality>().is_err());
    }
}
