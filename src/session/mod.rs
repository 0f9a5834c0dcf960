//! Playback session manager
//!
//! Owns the "now playing" track, the catalog's up-next session handle and a
//! short local history. Starting playback is split into three steps so the
//! network part can run in a spawned task:
//!
//! 1. [`PlaybackSessionManager::begin`] issues a [`PlaybackTicket`] and
//!    bumps the generation counter, superseding any earlier ticket.
//! 2. [`resolve`] asks the catalog for a session and a stream URL.
//! 3. [`PlaybackSessionManager::commit`] checks the ticket is still the
//!    latest, hands the URL to the media output and only then swaps state.
//!
//! A failed or superseded start never touches the current state.

use crate::catalog::models::{SessionHandle, StreamQuality, Track};
use crate::catalog::{Catalog, StreamResolver};
use crate::error::PlaybackError;
use crate::player::MediaOutput;

/// Clock position past which "previous" rewinds instead of going back.
pub const REWIND_THRESHOLD_SECS: f64 = 3.0;

const HISTORY_LIMIT: usize = 50;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlaybackStatus {
    Playing,
    Paused,
    #[default]
    Stopped,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NowPlaying {
    pub track: Track,
    pub url: String,
}

#[derive(Debug, Clone, Default)]
pub struct PlaybackState {
    pub current: Option<NowPlaying>,
    pub session: Option<SessionHandle>,
    pub status: PlaybackStatus,
    /// Previously played tracks, most recent last.
    pub history: Vec<Track>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Next,
    Previous,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Origin {
    Fresh,
    History,
}

/// A pending start. Only the most recently issued ticket can commit.
#[derive(Debug, Clone)]
pub struct PlaybackTicket {
    generation: u64,
    origin: Origin,
    quality: StreamQuality,
    pub track: Track,
}

impl PlaybackTicket {
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

/// Output of [`resolve`], ready to commit.
#[derive(Debug, Clone)]
pub struct Resolved {
    ticket: PlaybackTicket,
    session: SessionHandle,
    url: String,
}

impl Resolved {
    pub fn track(&self) -> &Track {
        &self.ticket.track
    }
}

/// A pending up-next lookup.
#[derive(Debug, Clone)]
pub struct NextTicket {
    generation: u64,
    session: SessionHandle,
}

impl NextTicket {
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

#[derive(Debug, Clone)]
pub enum NextStep {
    /// Ask the catalog for the next track in the session.
    Fetch(NextTicket),
    /// No session to advance; playback was stopped (or already was).
    EndOfQueue { changed: bool },
}

#[derive(Debug, Clone)]
pub enum PreviousStep {
    Rewind,
    Replay(PlaybackTicket),
}

#[derive(Debug, Clone)]
pub enum Toggle {
    Paused,
    Resumed,
    /// Nothing is loaded or the queue ran out.
    Idle,
}

/// What a composed [`PlaybackSessionManager::advance`] did.
#[derive(Debug, Clone, PartialEq)]
pub enum Advanced {
    Started(Track),
    Rewound,
    EndOfQueue,
}

/// Request a session and a stream URL for the ticket's track.
pub async fn resolve<C>(catalog: &C, ticket: PlaybackTicket) -> Result<Resolved, PlaybackError>
where
    C: Catalog + StreamResolver + ?Sized,
{
    let id = ticket.track.video_id.as_str();
    let session = catalog.start_session(id).await?;
    let url = catalog.resolve_stream(id, ticket.quality).await?;
    if url.trim().is_empty() {
        return Err(PlaybackError::MissingUrl(id.to_string()));
    }
    Ok(Resolved {
        ticket,
        session,
        url,
    })
}

/// Ask the catalog what comes after the ticket's session.
pub async fn fetch_next<C>(
    catalog: &C,
    ticket: NextTicket,
) -> Result<(NextTicket, Option<Track>), PlaybackError>
where
    C: Catalog + ?Sized,
{
    let next = catalog.next_in_session(&ticket.session).await?;
    Ok((ticket, next))
}

#[derive(Debug, Default)]
pub struct PlaybackSessionManager {
    state: PlaybackState,
    generation: u64,
    quality: StreamQuality,
}

impl PlaybackSessionManager {
    pub fn new(quality: StreamQuality) -> Self {
        Self {
            quality,
            ..Self::default()
        }
    }

    pub fn state(&self) -> &PlaybackState {
        &self.state
    }

    pub fn current(&self) -> Option<&NowPlaying> {
        self.state.current.as_ref()
    }

    pub fn status(&self) -> PlaybackStatus {
        self.state.status
    }

    /// Supersede whatever is in flight and issue a ticket for `track`.
    pub fn begin(&mut self, track: Track) -> PlaybackTicket {
        self.issue(track, Origin::Fresh)
    }

    fn issue(&mut self, track: Track, origin: Origin) -> PlaybackTicket {
        self.generation += 1;
        tracing::debug!(generation = self.generation, track = %track.video_id, "playback requested");
        PlaybackTicket {
            generation: self.generation,
            origin,
            quality: self.quality,
            track,
        }
    }

    /// Invalidate every outstanding ticket. Used when a play request needs
    /// more fetching before it can call [`Self::begin`].
    pub fn supersede(&mut self) -> u64 {
        self.generation += 1;
        self.generation
    }

    pub fn is_latest(&self, generation: u64) -> bool {
        generation == self.generation
    }

    /// Filter a failed resolution: stale failures become `Superseded`.
    pub fn reject(&self, generation: u64, err: PlaybackError) -> PlaybackError {
        match err {
            PlaybackError::Superseded(_) => err,
            _ if !self.is_latest(generation) => PlaybackError::Superseded(err.to_string()),
            _ => err,
        }
    }

    /// Load the resolved URL and make it current. Stale tickets and output
    /// failures leave state untouched.
    pub async fn commit<O>(&mut self, resolved: Resolved, output: &O) -> Result<&NowPlaying, PlaybackError>
    where
        O: MediaOutput + ?Sized,
    {
        let Resolved {
            ticket,
            session,
            url,
        } = resolved;
        if !self.is_latest(ticket.generation) {
            return Err(PlaybackError::Superseded(ticket.track.video_id));
        }

        output
            .load(&url)
            .await
            .map_err(|e| PlaybackError::Output(format!("{e:#}")))?;

        let previous = self.state.current.take();
        match ticket.origin {
            Origin::History => {
                self.state.history.pop();
            }
            Origin::Fresh => {
                if let Some(prev) = previous {
                    self.state.history.push(prev.track);
                    if self.state.history.len() > HISTORY_LIMIT {
                        self.state.history.remove(0);
                    }
                }
            }
        }

        tracing::info!(track = %ticket.track.video_id, title = %ticket.track.title, "now playing");
        self.state.session = Some(session);
        self.state.status = PlaybackStatus::Playing;
        Ok(self.state.current.insert(NowPlaying {
            track: ticket.track,
            url,
        }))
    }

    /// First step of advancing forward.
    pub fn request_next(&mut self) -> NextStep {
        match self.state.session.clone() {
            Some(session) => {
                self.generation += 1;
                NextStep::Fetch(NextTicket {
                    generation: self.generation,
                    session,
                })
            }
            None => NextStep::EndOfQueue {
                changed: self.finish_queue(),
            },
        }
    }

    /// Apply an up-next answer. `Some` means the returned ticket should be
    /// resolved next.
    pub fn next_fetched(
        &mut self,
        ticket: NextTicket,
        next: Option<Track>,
    ) -> Result<Option<PlaybackTicket>, PlaybackError> {
        if !self.is_latest(ticket.generation) {
            return Err(PlaybackError::Superseded(ticket.session.to_string()));
        }
        match next {
            Some(track) if !track.video_id.is_empty() => Ok(Some(self.begin(track))),
            _ => {
                tracing::debug!(session = %ticket.session, "up-next queue exhausted");
                self.finish_queue();
                Ok(None)
            }
        }
    }

    /// Drop the session and stop, keeping the current track. Returns false
    /// when already in that state.
    fn finish_queue(&mut self) -> bool {
        let changed = self.state.session.is_some() || self.state.status != PlaybackStatus::Stopped;
        self.state.session = None;
        self.state.status = PlaybackStatus::Stopped;
        changed
    }

    /// Rewind unless early in the track with history to go back to.
    pub fn request_previous(&mut self, clock: f64) -> PreviousStep {
        if clock > REWIND_THRESHOLD_SECS || self.state.current.is_none() {
            return PreviousStep::Rewind;
        }
        match self.state.history.last().cloned() {
            Some(track) => PreviousStep::Replay(self.issue(track, Origin::History)),
            None => PreviousStep::Rewind,
        }
    }

    pub fn toggle_playback(&mut self) -> Toggle {
        if self.state.current.is_none() {
            return Toggle::Idle;
        }
        match self.state.status {
            PlaybackStatus::Playing => {
                self.state.status = PlaybackStatus::Paused;
                Toggle::Paused
            }
            PlaybackStatus::Paused => {
                self.state.status = PlaybackStatus::Playing;
                Toggle::Resumed
            }
            PlaybackStatus::Stopped => Toggle::Idle,
        }
    }

    /// Mirror a pause change reported by the output.
    pub fn sync_paused(&mut self, paused: bool) {
        if self.state.current.is_none() || self.state.status == PlaybackStatus::Stopped {
            return;
        }
        self.state.status = if paused {
            PlaybackStatus::Paused
        } else {
            PlaybackStatus::Playing
        };
    }

    /// End playback entirely and cancel anything in flight.
    pub fn stop(&mut self) {
        self.generation += 1;
        self.state.current = None;
        self.state.session = None;
        self.state.status = PlaybackStatus::Stopped;
    }

    /// The output finished the current track.
    pub fn on_track_ended(&mut self) -> NextStep {
        if self.state.status == PlaybackStatus::Stopped {
            return NextStep::EndOfQueue { changed: false };
        }
        self.request_next()
    }

    /// The output gave up on the current track. Playback stops but the track
    /// and session are kept, so a later next still follows the queue.
    /// Returns false when already stopped.
    pub fn on_track_failed(&mut self) -> bool {
        if self.state.current.is_none() || self.state.status == PlaybackStatus::Stopped {
            return false;
        }
        tracing::warn!(
            track = ?self.state.current.as_ref().map(|np| np.track.video_id.as_str()),
            "output failed, stopping"
        );
        self.state.status = PlaybackStatus::Stopped;
        true
    }

    /// Begin, resolve and commit in one call.
    pub async fn start_playback<C, O>(
        &mut self,
        catalog: &C,
        output: &O,
        track: Track,
    ) -> Result<&NowPlaying, PlaybackError>
    where
        C: Catalog + StreamResolver + ?Sized,
        O: MediaOutput + ?Sized,
    {
        let ticket = self.begin(track);
        self.run_ticket(catalog, output, ticket).await
    }

    async fn run_ticket<C, O>(
        &mut self,
        catalog: &C,
        output: &O,
        ticket: PlaybackTicket,
    ) -> Result<&NowPlaying, PlaybackError>
    where
        C: Catalog + StreamResolver + ?Sized,
        O: MediaOutput + ?Sized,
    {
        let generation = ticket.generation;
        match resolve(catalog, ticket).await {
            Ok(resolved) => self.commit(resolved, output).await,
            Err(e) => Err(self.reject(generation, e)),
        }
    }

    /// Move to the next or previous track.
    pub async fn advance<C, O>(
        &mut self,
        direction: Direction,
        clock: f64,
        catalog: &C,
        output: &O,
    ) -> Result<Advanced, PlaybackError>
    where
        C: Catalog + StreamResolver + ?Sized,
        O: MediaOutput + ?Sized,
    {
        match direction {
            Direction::Next => {
                let ticket = match self.request_next() {
                    NextStep::Fetch(ticket) => ticket,
                    NextStep::EndOfQueue { changed } => {
                        if changed {
                            stop_output(output).await;
                        }
                        return Ok(Advanced::EndOfQueue);
                    }
                };
                let (ticket, next) = fetch_next(catalog, ticket).await?;
                match self.next_fetched(ticket, next)? {
                    Some(ticket) => {
                        let np = self.run_ticket(catalog, output, ticket).await?;
                        Ok(Advanced::Started(np.track.clone()))
                    }
                    None => {
                        stop_output(output).await;
                        Ok(Advanced::EndOfQueue)
                    }
                }
            }
            Direction::Previous => match self.request_previous(clock) {
                PreviousStep::Rewind => {
                    if self.state.current.is_some() {
                        output
                            .seek_to(0.0)
                            .await
                            .map_err(|e| PlaybackError::Output(format!("{e:#}")))?;
                    }
                    Ok(Advanced::Rewound)
                }
                PreviousStep::Replay(ticket) => {
                    let np = self.run_ticket(catalog, output, ticket).await?;
                    Ok(Advanced::Started(np.track.clone()))
                }
            },
        }
    }
}

async fn stop_output<O: MediaOutput + ?Sized>(output: &O) {
    if let Err(e) = output.stop().await {
        tracing::warn!(error = %format!("{e:#}"), "failed to stop output");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::models::{LyricLine, Playlist, Podcast};
    use crate::catalog::{CatalogResult, Library, Trending, TrendingKind};
    use crate::error::CatalogError;
    use async_trait::async_trait;
    use std::collections::{HashMap, HashSet};
    use std::sync::Mutex;

    #[derive(Default)]
    struct FakeCatalog {
        /// session id -> next track
        up_next: Mutex<HashMap<String, Track>>,
        broken_streams: HashSet<String>,
        empty_streams: HashSet<String>,
    }

    impl FakeCatalog {
        fn with_next(self, after: &str, next: &str) -> Self {
            self.up_next
                .lock()
                .unwrap()
                .insert(format!("s-{after}"), track(next));
            self
        }
    }

    #[async_trait]
    impl Catalog for FakeCatalog {
        async fn search(&self, _: &str, _: u32) -> CatalogResult<Vec<Track>> {
            Ok(Vec::new())
        }
        async fn charts(&self, _: u32) -> CatalogResult<Vec<Track>> {
            Ok(Vec::new())
        }
        async fn mood_playlists(&self, _: &str, _: u32) -> CatalogResult<Vec<Playlist>> {
            Ok(Vec::new())
        }
        async fn trending(&self, _: TrendingKind, _: u32) -> CatalogResult<Trending> {
            Ok(Trending::default())
        }
        async fn library(&self, _: u32) -> CatalogResult<Library> {
            Ok(Library::default())
        }
        async fn browse_genre(&self, _: &str, _: u32) -> CatalogResult<Vec<Track>> {
            Ok(Vec::new())
        }
        async fn search_podcasts(&self, _: &str, _: u32) -> CatalogResult<Vec<Podcast>> {
            Ok(Vec::new())
        }
        async fn playlist_tracks(&self, _: &str, _: u32) -> CatalogResult<Vec<Track>> {
            Ok(Vec::new())
        }
        async fn podcast_episodes(&self, _: &str) -> CatalogResult<Vec<Track>> {
            Ok(Vec::new())
        }
        async fn start_session(&self, track_id: &str) -> CatalogResult<SessionHandle> {
            Ok(SessionHandle(format!("s-{track_id}")))
        }
        async fn next_in_session(&self, session: &SessionHandle) -> CatalogResult<Option<Track>> {
            Ok(self.up_next.lock().unwrap().get(&session.0).cloned())
        }
    }

    #[async_trait]
    impl StreamResolver for FakeCatalog {
        async fn resolve_stream(&self, track_id: &str, q: StreamQuality) -> CatalogResult<String> {
            if self.broken_streams.contains(track_id) {
                return Err(CatalogError::Status {
                    status: reqwest::StatusCode::NOT_FOUND,
                    message: "Video is unavailable or invalid".into(),
                });
            }
            if self.empty_streams.contains(track_id) {
                return Ok(String::new());
            }
            Ok(format!("http://media/{track_id}?q={}", q.as_str()))
        }
        async fn lyrics(&self, _: &str) -> CatalogResult<Vec<LyricLine>> {
            Ok(Vec::new())
        }
    }

    #[derive(Default)]
    struct FakeOutput {
        loaded: Mutex<Vec<String>>,
        seeks: Mutex<Vec<f64>>,
        stops: Mutex<usize>,
    }

    #[async_trait]
    impl MediaOutput for FakeOutput {
        async fn load(&self, url: &str) -> anyhow::Result<()> {
            self.loaded.lock().unwrap().push(url.to_string());
            Ok(())
        }
        async fn set_paused(&self, _: bool) -> anyhow::Result<()> {
            Ok(())
        }
        async fn seek_to(&self, seconds: f64) -> anyhow::Result<()> {
            self.seeks.lock().unwrap().push(seconds);
            Ok(())
        }
        async fn seek_relative(&self, _: f64) -> anyhow::Result<()> {
            Ok(())
        }
        async fn set_volume(&self, _: u8) -> anyhow::Result<()> {
            Ok(())
        }
        async fn stop(&self) -> anyhow::Result<()> {
            *self.stops.lock().unwrap() += 1;
            Ok(())
        }
    }

    fn track(id: &str) -> Track {
        Track {
            video_id: id.into(),
            title: format!("Title {id}"),
            ..Track::default()
        }
    }

    fn current_id(m: &PlaybackSessionManager) -> Option<&str> {
        m.current().map(|np| np.track.video_id.as_str())
    }

    #[tokio::test]
    async fn start_binds_track_url_and_session_together() {
        let catalog = FakeCatalog::default();
        let output = FakeOutput::default();
        let mut m = PlaybackSessionManager::new(StreamQuality::High);

        let np = m.start_playback(&catalog, &output, track("a")).await.unwrap();
        assert_eq!(np.url, "http://media/a?q=high");
        assert_eq!(current_id(&m), Some("a"));
        assert_eq!(m.state().session, Some(SessionHandle("s-a".into())));
        assert_eq!(m.status(), PlaybackStatus::Playing);
        assert_eq!(*output.loaded.lock().unwrap(), vec!["http://media/a?q=high"]);
    }

    #[tokio::test]
    async fn failed_start_keeps_previous_state() {
        let catalog = FakeCatalog {
            broken_streams: HashSet::from(["bad".to_string()]),
            empty_streams: HashSet::from(["blank".to_string()]),
            ..FakeCatalog::default()
        };
        let output = FakeOutput::default();
        let mut m = PlaybackSessionManager::new(StreamQuality::High);
        m.start_playback(&catalog, &output, track("a")).await.unwrap();

        let err = m.start_playback(&catalog, &output, track("bad")).await.unwrap_err();
        assert!(matches!(err, PlaybackError::Resolution(_)));
        assert!(err.is_user_visible());

        let err = m.start_playback(&catalog, &output, track("blank")).await.unwrap_err();
        assert!(matches!(err, PlaybackError::MissingUrl(_)));

        assert_eq!(current_id(&m), Some("a"));
        assert_eq!(m.current().unwrap().url, "http://media/a?q=high");
        assert_eq!(m.state().session, Some(SessionHandle("s-a".into())));
        assert_eq!(output.loaded.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn stale_resolution_is_discarded() {
        let catalog = FakeCatalog::default();
        let output = FakeOutput::default();
        let mut m = PlaybackSessionManager::new(StreamQuality::Low);

        let slow = m.begin(track("a"));
        let fast = m.begin(track("b"));

        let fast = resolve(&catalog, fast).await.unwrap();
        m.commit(fast, &output).await.unwrap();

        let slow = resolve(&catalog, slow).await.unwrap();
        let err = m.commit(slow, &output).await.unwrap_err();
        assert!(matches!(err, PlaybackError::Superseded(_)));
        assert!(!err.is_user_visible());

        assert_eq!(current_id(&m), Some("b"));
        assert_eq!(*output.loaded.lock().unwrap(), vec!["http://media/b?q=low"]);
    }

    #[test]
    fn stale_failure_is_silent() {
        let mut m = PlaybackSessionManager::default();
        let old = m.begin(track("a"));
        let new = m.begin(track("b"));

        let err = m.reject(old.generation(), PlaybackError::MissingUrl("a".into()));
        assert!(!err.is_user_visible());
        let err = m.reject(new.generation(), PlaybackError::MissingUrl("b".into()));
        assert!(err.is_user_visible());
    }

    #[tokio::test]
    async fn next_follows_the_session() {
        let catalog = FakeCatalog::default().with_next("a", "b");
        let output = FakeOutput::default();
        let mut m = PlaybackSessionManager::new(StreamQuality::High);
        m.start_playback(&catalog, &output, track("a")).await.unwrap();

        let out = m.advance(Direction::Next, 10.0, &catalog, &output).await.unwrap();
        assert_eq!(out, Advanced::Started(track("b")));
        assert_eq!(current_id(&m), Some("b"));
        assert_eq!(m.state().session, Some(SessionHandle("s-b".into())));
        assert_eq!(m.state().history, vec![track("a")]);
    }

    #[tokio::test]
    async fn next_at_end_of_queue_is_idempotent() {
        let catalog = FakeCatalog::default();
        let output = FakeOutput::default();
        let mut m = PlaybackSessionManager::new(StreamQuality::High);
        m.start_playback(&catalog, &output, track("a")).await.unwrap();

        for _ in 0..3 {
            let out = m.advance(Direction::Next, 10.0, &catalog, &output).await.unwrap();
            assert_eq!(out, Advanced::EndOfQueue);
            assert_eq!(current_id(&m), Some("a"));
            assert_eq!(m.status(), PlaybackStatus::Stopped);
            assert!(m.state().session.is_none());
        }
        assert_eq!(*output.stops.lock().unwrap(), 1);
        assert_eq!(output.loaded.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn previous_rewinds_late_in_track() {
        let catalog = FakeCatalog::default().with_next("a", "b");
        let output = FakeOutput::default();
        let mut m = PlaybackSessionManager::new(StreamQuality::High);
        m.start_playback(&catalog, &output, track("a")).await.unwrap();
        m.advance(Direction::Next, 0.0, &catalog, &output).await.unwrap();

        let out = m.advance(Direction::Previous, 42.0, &catalog, &output).await.unwrap();
        assert_eq!(out, Advanced::Rewound);
        assert_eq!(current_id(&m), Some("b"));
        assert_eq!(*output.seeks.lock().unwrap(), vec![0.0]);
    }

    #[tokio::test]
    async fn previous_replays_history_early_in_track() {
        let catalog = FakeCatalog::default().with_next("a", "b");
        let output = FakeOutput::default();
        let mut m = PlaybackSessionManager::new(StreamQuality::High);
        m.start_playback(&catalog, &output, track("a")).await.unwrap();
        m.advance(Direction::Next, 0.0, &catalog, &output).await.unwrap();

        let out = m.advance(Direction::Previous, 1.0, &catalog, &output).await.unwrap();
        assert_eq!(out, Advanced::Started(track("a")));
        assert_eq!(current_id(&m), Some("a"));
        assert!(m.state().history.is_empty());

        // Nothing left to go back to.
        let out = m.advance(Direction::Previous, 1.0, &catalog, &output).await.unwrap();
        assert_eq!(out, Advanced::Rewound);
    }

    #[test]
    fn toggle_without_track_is_noop() {
        let mut m = PlaybackSessionManager::default();
        assert!(matches!(m.toggle_playback(), Toggle::Idle));
        assert_eq!(m.status(), PlaybackStatus::Stopped);
    }

    #[tokio::test]
    async fn toggle_keeps_identity() {
        let catalog = FakeCatalog::default();
        let output = FakeOutput::default();
        let mut m = PlaybackSessionManager::new(StreamQuality::High);
        m.start_playback(&catalog, &output, track("a")).await.unwrap();

        assert!(matches!(m.toggle_playback(), Toggle::Paused));
        assert_eq!(m.status(), PlaybackStatus::Paused);
        assert!(matches!(m.toggle_playback(), Toggle::Resumed));
        assert_eq!(current_id(&m), Some("a"));
        assert_eq!(m.state().session, Some(SessionHandle("s-a".into())));
    }

    #[tokio::test]
    async fn stop_cancels_in_flight_start() {
        let catalog = FakeCatalog::default();
        let output = FakeOutput::default();
        let mut m = PlaybackSessionManager::new(StreamQuality::High);
        let ticket = m.begin(track("a"));
        m.stop();
        let resolved = resolve(&catalog, ticket).await.unwrap();
        assert!(m.commit(resolved, &output).await.is_err());
        assert!(m.current().is_none());
    }

    #[tokio::test]
    async fn ended_track_advances() {
        let catalog = FakeCatalog::default().with_next("a", "b");
        let output = FakeOutput::default();
        let mut m = PlaybackSessionManager::new(StreamQuality::High);
        m.start_playback(&catalog, &output, track("a")).await.unwrap();

        let NextStep::Fetch(ticket) = m.on_track_ended() else {
            panic!("expected an up-next lookup");
        };
        let (ticket, next) = fetch_next(&catalog, ticket).await.unwrap();
        let ticket = m.next_fetched(ticket, next).unwrap().unwrap();
        assert_eq!(ticket.track.video_id, "b");
    }

    #[tokio::test]
    async fn output_failure_stops_but_keeps_queue() {
        let catalog = FakeCatalog::default().with_next("a", "b");
        let output = FakeOutput::default();
        let mut m = PlaybackSessionManager::new(StreamQuality::High);
        m.start_playback(&catalog, &output, track("a")).await.unwrap();

        assert!(m.on_track_failed());
        assert_eq!(m.status(), PlaybackStatus::Stopped);
        assert_eq!(current_id(&m), Some("a"));
        assert!(!m.on_track_failed());

        // A stopped track does not auto-advance, but next still works.
        assert!(matches!(m.on_track_ended(), NextStep::EndOfQueue { changed: false }));
        assert!(matches!(m.request_next(), NextStep::Fetch(_)));
    }
}
