//! Records to card descriptors.
//!
//! Rendering never fails: missing fields get fixed placeholder values.

use crate::catalog::models::{Playlist, Podcast, Record, Track, Video};

pub const UNTITLED: &str = "Untitled";
pub const UNKNOWN_ARTIST: &str = "Unknown Artist";
pub const UNKNOWN: &str = "Unknown";

/// Blank 200x200 tile shown when a record has no thumbnail.
pub const PLACEHOLDER_THUMBNAIL: &str = "data:image/svg+xml,%3Csvg xmlns=%22http://www.w3.org/2000/svg%22 width=%22200%22 height=%22200%22%3E%3Crect fill=%22%232a2a2a%22 width=%22200%22 height=%22200%22/%3E%3C/svg%3E";

/// What activating a card does.
#[derive(Debug, Clone, PartialEq)]
pub enum CardAction {
    Play(Track),
    /// Fetch the playlist and play its first track.
    ExpandPlaylist(String),
    /// Fetch the podcast's episodes and play the first one.
    ExpandPodcast(String),
    Search(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Card {
    pub title: String,
    pub subtitle: String,
    pub thumbnail_url: String,
    pub action: CardAction,
}

pub fn render_cards(records: &[Record]) -> Vec<Card> {
    records.iter().map(render_card).collect()
}

pub fn render_card(record: &Record) -> Card {
    match record {
        Record::Track(t) => track_card(t),
        Record::Video(v) => video_card(v),
        Record::Playlist(p) => playlist_card(p),
        Record::Podcast(p) => podcast_card(p),
    }
}

pub fn track_card(track: &Track) -> Card {
    Card {
        title: title_or_default(&track.title),
        subtitle: artists_line(&track.artists),
        thumbnail_url: thumbnail_or_default(&track.thumbnails),
        action: CardAction::Play(track.clone()),
    }
}

fn video_card(video: &Video) -> Card {
    Card {
        title: title_or_default(&video.title),
        subtitle: non_empty(video.channel.as_deref()).unwrap_or(UNKNOWN).to_string(),
        thumbnail_url: thumbnail_or_default(&video.thumbnails),
        action: CardAction::Play(video.to_track()),
    }
}

fn playlist_card(playlist: &Playlist) -> Card {
    Card {
        title: title_or_default(&playlist.title),
        subtitle: format!("{} tracks", playlist.track_count.unwrap_or(0)),
        thumbnail_url: thumbnail_or_default(&playlist.thumbnails),
        action: CardAction::ExpandPlaylist(playlist.playlist_id.clone()),
    }
}

fn podcast_card(podcast: &Podcast) -> Card {
    Card {
        title: title_or_default(&podcast.title),
        subtitle: non_empty(podcast.author.as_deref()).unwrap_or(UNKNOWN).to_string(),
        thumbnail_url: thumbnail_or_default(&podcast.thumbnails),
        action: CardAction::ExpandPodcast(podcast.browse_id.clone()),
    }
}

/// A card that runs a search when activated.
pub fn search_card(term: &str) -> Card {
    Card {
        title: term.to_string(),
        subtitle: format!("Explore {}", term.to_lowercase()),
        thumbnail_url: PLACEHOLDER_THUMBNAIL.to_string(),
        action: CardAction::Search(term.to_string()),
    }
}

/// "A, B" or the unknown-artist placeholder.
pub fn artists_line(artists: &[String]) -> String {
    let named: Vec<&str> = artists
        .iter()
        .map(|a| a.trim())
        .filter(|a| !a.is_empty())
        .collect();
    if named.is_empty() {
        UNKNOWN_ARTIST.to_string()
    } else {
        named.join(", ")
    }
}

fn title_or_default(title: &str) -> String {
    non_empty(Some(title)).unwrap_or(UNTITLED).to_string()
}

fn thumbnail_or_default(thumbnails: &[String]) -> String {
    thumbnails
        .iter()
        .map(|t| t.trim())
        .find(|t| !t.is_empty())
        .unwrap_or(PLACEHOLDER_THUMBNAIL)
        .to_string()
}

fn non_empty(s: Option<&str>) -> Option<&str> {
    s.map(str::trim).filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_track_uses_placeholders() {
        let card = render_card(&Record::Track(Track {
            video_id: "abc".into(),
            ..Track::default()
        }));
        assert_eq!(card.title, "Untitled");
        assert_eq!(card.subtitle, "Unknown Artist");
        assert_eq!(card.thumbnail_url, PLACEHOLDER_THUMBNAIL);
        assert!(matches!(card.action, CardAction::Play(ref t) if t.video_id == "abc"));
    }

    #[test]
    fn track_subtitle_joins_artists() {
        let card = track_card(&Track {
            title: "Harder Better".into(),
            artists: vec!["Daft Punk".into(), "".into(), "Guest".into()],
            thumbnails: vec!["".into(), "http://img/2".into()],
            ..Track::default()
        });
        assert_eq!(card.subtitle, "Daft Punk, Guest");
        assert_eq!(card.thumbnail_url, "http://img/2");
    }

    #[test]
    fn per_kind_subtitles() {
        let cards = render_cards(&[
            Record::Video(Video::default()),
            Record::Playlist(Playlist {
                playlist_id: "PL1".into(),
                ..Playlist::default()
            }),
            Record::Playlist(Playlist {
                track_count: Some(42),
                ..Playlist::default()
            }),
            Record::Podcast(Podcast {
                browse_id: "MP1".into(),
                author: Some("Host".into()),
                ..Podcast::default()
            }),
            Record::Podcast(Podcast::default()),
        ]);
        let subtitles: Vec<&str> = cards.iter().map(|c| c.subtitle.as_str()).collect();
        assert_eq!(subtitles, ["Unknown", "0 tracks", "42 tracks", "Host", "Unknown"]);
        assert_eq!(cards[1].action, CardAction::ExpandPlaylist("PL1".into()));
        assert_eq!(cards[3].action, CardAction::ExpandPodcast("MP1".into()));
    }

    #[test]
    fn video_plays_with_channel_as_artist() {
        let card = render_card(&Record::Video(Video {
            video_id: "v1".into(),
            title: "Live".into(),
            channel: Some("Venue".into()),
            ..Video::default()
        }));
        let CardAction::Play(track) = card.action else {
            panic!("video cards play directly");
        };
        assert_eq!(track.artists, vec!["Venue".to_string()]);
    }

    #[test]
    fn search_cards() {
        let card = search_card("Hip-Hop");
        assert_eq!(card.subtitle, "Explore hip-hop");
        assert_eq!(card.action, CardAction::Search("Hip-Hop".into()));
    }
}
