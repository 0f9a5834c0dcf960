use crate::catalog::models::Track;
use crate::error::{CatalogError, PlaybackError};
use crate::lyrics::LyricsLoad;
use crate::session::{NextTicket, Resolved};
use crate::view::{Page, PageView};

#[derive(Debug)]
pub enum Event {
    Input(InputEvent),
    Player(PlayerEvent),
    Network(NetworkEvent),
}

#[derive(Debug, Clone)]
pub enum InputEvent {
    Key(crossterm::event::KeyEvent),
    Mouse(crossterm::event::MouseEvent),
    Resize,
}

/// Reports from the media output. `Position` is the playback clock.
#[derive(Debug, Clone, PartialEq)]
pub enum PlayerEvent {
    Position { seconds: f64 },
    Duration { seconds: f64 },
    Paused,
    Resumed,
    Ended,
    /// The current file could not be loaded or streamed.
    Failed(String),
    Error(String),
}

#[derive(Debug)]
pub enum NetworkEvent {
    PageLoaded {
        page: Page,
        request: u64,
        view: PageView,
    },
    /// The search debounce window elapsed.
    SearchDue(String),
    PlaybackResolved(Resolved),
    PlaybackFailed {
        generation: u64,
        error: PlaybackError,
    },
    NextFetched {
        ticket: NextTicket,
        next: Option<Track>,
    },
    NextFailed {
        generation: u64,
        error: PlaybackError,
    },
    /// A playlist or podcast card resolved to its first track.
    Expanded {
        generation: u64,
        result: Result<Track, CatalogError>,
    },
    LyricsLoaded {
        track_id: String,
        load: LyricsLoad,
    },
}
