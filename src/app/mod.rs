pub mod actions;
pub mod events;
pub mod state;

use crate::catalog::{Catalog, CatalogClient, StreamResolver};
use crate::catalog::models::Track;
use crate::config::Config;
use crate::error::PlaybackError;
use crate::input;
use crate::lyrics::{LrclibClient, LyricsLoader};
use crate::player::{MediaOutput, MpvHandle};
use crate::search::{self, Debouncer};
use crate::session::{self, NextStep, PlaybackSessionManager, PlaybackTicket, PreviousStep, Toggle};
use crate::tui::{self, TuiTerminal};
use crate::view::{CardAction, Page, pages};
use actions::Action;
use events::{Event, NetworkEvent, PlayerEvent};
use state::{AppState, SearchFocus, Toast};
use std::path::PathBuf;
use std::time::Duration;
use tokio::sync::mpsc;

const SEEK_STEP_SECS: f64 = 5.0;
const VOLUME_STEP: u8 = 5;
const LIST_PAGE: usize = 10;

/// The event loop state. `C` is the catalog the spawned network tasks talk
/// to and `O` the media output; the TUI runs on the HTTP client and mpv.
pub struct App<C = CatalogClient, O = MpvHandle> {
    cfg: Config,
    config_path: PathBuf,
    state: AppState,
    catalog: C,
    lyrics: LyricsLoader,
    output: Option<O>,
    debouncer: Option<Debouncer<Event>>,
}

impl App {
    pub fn new(cfg: Config, config_path: PathBuf) -> anyhow::Result<Self> {
        let catalog = CatalogClient::new(&cfg.api)?;

        let lrclib = if cfg.lyrics.lrclib_fallback {
            match LrclibClient::new() {
                Ok(c) => Some(c),
                Err(e) => {
                    tracing::warn!(error = %format!("{e:#}"), "lrclib fallback disabled");
                    None
                }
            }
        } else {
            None
        };

        Ok(Self::with_parts(cfg, config_path, catalog, LyricsLoader::new(lrclib)))
    }

    pub async fn run(&mut self, terminal: &mut TuiTerminal) -> anyhow::Result<()> {
        let (tx, mut rx) = mpsc::channel::<Event>(256);

        input::spawn_input_task(tx.clone(), self.cfg.input.mouse);
        self.debouncer = Some(Debouncer::new(
            Duration::from_millis(self.cfg.search.debounce_ms),
            tx.clone(),
        ));

        // Playback is optional: browsing still works without mpv.
        let mpv_log = self.cfg.paths.data_dir.join("mpv.log");
        match MpvHandle::spawn(
            tx.clone(),
            self.cfg.player.audio_device.as_deref(),
            self.state.volume,
            Some(&mpv_log),
        )
        .await
        {
            Ok(h) => self.output = Some(h),
            Err(e) => {
                tracing::warn!(error = %format!("{e:#}"), "mpv unavailable");
                self.state.toast = Some(Toast::error(format!("mpv disabled: {e:#}")));
            }
        }

        self.enter_page(&tx);
        tui::draw(terminal, &mut self.state)?;

        while let Some(ev) = rx.recv().await {
            match ev {
                Event::Input(input_ev) => {
                    if let Some(action) = input::map_input_to_action(&self.state, input_ev) {
                        self.handle_action(action, &tx).await;
                    }
                }
                Event::Player(pe) => self.handle_player(pe, &tx).await,
                Event::Network(ne) => self.handle_network(ne, &tx).await,
            }

            if self.state.should_quit {
                break;
            }

            tui::draw(terminal, &mut self.state)?;
        }

        self.save_state_on_quit();
        Ok(())
    }
}

impl<C, O> App<C, O>
where
    C: Catalog + StreamResolver + Clone + 'static,
    O: MediaOutput,
{
    fn with_parts(cfg: Config, config_path: PathBuf, catalog: C, lyrics: LyricsLoader) -> Self {
        let mut state = AppState::new(
            PlaybackSessionManager::new(cfg.api.quality),
            cfg.player.volume,
        );
        if let Some(page) = cfg.ui.last_page.as_deref().and_then(Page::from_slug) {
            state.set_page(page);
        }

        Self {
            cfg,
            config_path,
            state,
            catalog,
            lyrics,
            output: None,
            debouncer: None,
        }
    }

    fn save_state_on_quit(&mut self) {
        self.cfg.player.volume = self.state.volume;
        self.cfg.ui.last_page = Some(self.state.page.slug().to_string());
        if let Err(e) = crate::config::save(&self.cfg, Some(self.config_path.as_path())) {
            tracing::warn!(error = %format!("{e:#}"), "failed to save config");
        }
    }

    async fn handle_action(&mut self, action: Action, tx: &mpsc::Sender<Event>) {
        match action {
            Action::Quit => self.state.should_quit = true,
            Action::NextPage => {
                self.state.set_page(self.state.page.next());
                self.enter_page(tx);
            }
            Action::PrevPage => {
                self.state.set_page(self.state.page.prev());
                self.enter_page(tx);
            }
            Action::SetPage(page) => {
                self.state.set_page(page);
                self.enter_page(tx);
            }
            Action::SetSearchFocus(f) => self.state.search_focus = f,
            Action::ToggleHelp => self.state.show_help = !self.state.show_help,

            Action::ListUp => self.state.active_mut().select_prev(),
            Action::ListDown => self.state.active_mut().select_next(),
            Action::GoTop => self.state.active_mut().select(0),
            Action::GoBottom => self.state.active_mut().select(usize::MAX),
            Action::PageUp => {
                let list = self.state.active_mut();
                list.select(list.selected.saturating_sub(LIST_PAGE));
            }
            Action::PageDown => {
                let list = self.state.active_mut();
                list.select(list.selected + LIST_PAGE);
            }
            Action::Activate => self.activate_selected(tx),
            Action::ActivateAt(index) => {
                self.state.active_mut().select(index);
                self.activate_selected(tx);
            }

            Action::InputChar(c) => {
                self.state.search_query.push(c);
                self.on_query_changed();
            }
            Action::Backspace => {
                self.state.search_query.pop();
                self.on_query_changed();
            }
            Action::ClearInput => {
                self.state.search_query.clear();
                self.on_query_changed();
            }
            Action::SubmitSearch => {
                if let Some(d) = self.debouncer.as_mut() {
                    d.cancel();
                }
                if let Some(q) = search::normalize_query(&self.state.search_query) {
                    let q = q.to_string();
                    self.run_search(q, tx);
                }
            }
            Action::Refresh => {
                let page = self.state.page;
                self.spawn_page_load(page, tx);
            }

            Action::TogglePlayback => self.toggle_playback(tx).await,
            Action::Next => {
                let step = self.state.playback.request_next();
                self.apply_next_step(step, tx).await;
            }
            Action::Previous => match self.state.playback.request_previous(self.state.position_secs) {
                PreviousStep::Rewind => {
                    if let Some(output) = &self.output
                        && self.state.playback.current().is_some()
                    {
                        log_output(output.seek_to(0.0).await, "rewind");
                        self.state.position_secs = 0.0;
                    }
                }
                PreviousStep::Replay(ticket) => self.spawn_resolve(ticket, tx),
            },
            Action::Stop => {
                self.state.playback.stop();
                self.state.pending_title = None;
                self.state.lyrics.clear();
                self.state.reset_clock();
                self.stop_output().await;
                self.state.status = "Stopped".into();
            }
            Action::SeekForward => self.seek(SEEK_STEP_SECS).await,
            Action::SeekBack => self.seek(-SEEK_STEP_SECS).await,
            Action::VolumeUp => self.set_volume(self.state.volume.saturating_add(VOLUME_STEP)).await,
            Action::VolumeDown => self.set_volume(self.state.volume.saturating_sub(VOLUME_STEP)).await,

            // The next draw picks up the new size.
            Action::Resize => {}
        }
    }

    /// Load the current page the first time it is shown.
    fn enter_page(&mut self, tx: &mpsc::Sender<Event>) {
        let page = self.state.page;
        let ps = self.state.page_state(page);
        if ps.view.is_none() && !ps.loading {
            self.spawn_page_load(page, tx);
        }
    }

    fn spawn_page_load(&mut self, page: Page, tx: &mpsc::Sender<Event>) {
        let request = self.state.page_state_mut(page).begin_load();
        let catalog = self.catalog.clone();
        let query = self.state.last_search.clone();
        let page_size = self.cfg.search.page_size;
        let tx = tx.clone();

        tokio::spawn(async move {
            let view = pages::load_page(&catalog, page, query.as_deref(), page_size).await;
            let _ = tx
                .send(Event::Network(NetworkEvent::PageLoaded {
                    page,
                    request,
                    view,
                }))
                .await;
        });
    }

    fn on_query_changed(&mut self) {
        let Some(debouncer) = self.debouncer.as_mut() else {
            return;
        };
        match search::normalize_query(&self.state.search_query) {
            Some(q) => debouncer.push(Event::Network(NetworkEvent::SearchDue(q.to_string()))),
            None => debouncer.cancel(),
        }
    }

    fn run_search(&mut self, query: String, tx: &mpsc::Sender<Event>) {
        tracing::debug!(%query, "search");
        self.state.last_search = Some(query);
        self.state.set_page(Page::Search);
        self.spawn_page_load(Page::Search, tx);
    }

    fn activate_selected(&mut self, tx: &mpsc::Sender<Event>) {
        let Some(card) = self.state.active().selected_card() else {
            return;
        };
        match card.action.clone() {
            CardAction::Play(track) => self.start_play(track, tx),
            action @ (CardAction::ExpandPlaylist(_) | CardAction::ExpandPodcast(_)) => {
                self.spawn_expand(action, tx)
            }
            CardAction::Search(query) => {
                self.state.search_query = query.clone();
                self.run_search(query, tx);
                self.state.search_focus = SearchFocus::Results;
            }
        }
    }

    fn start_play(&mut self, track: Track, tx: &mpsc::Sender<Event>) {
        let ticket = self.state.playback.begin(track);
        self.spawn_resolve(ticket, tx);
    }

    fn spawn_resolve(&mut self, ticket: PlaybackTicket, tx: &mpsc::Sender<Event>) {
        let title = crate::view::cards::track_card(&ticket.track).title;
        self.state.status = format!("Loading {title}...");
        self.state.pending_title = Some(title);

        let catalog = self.catalog.clone();
        let tx = tx.clone();
        tokio::spawn(async move {
            let generation = ticket.generation();
            let ev = match session::resolve(&catalog, ticket).await {
                Ok(resolved) => NetworkEvent::PlaybackResolved(resolved),
                Err(error) => NetworkEvent::PlaybackFailed { generation, error },
            };
            let _ = tx.send(Event::Network(ev)).await;
        });
    }

    fn spawn_expand(&mut self, action: CardAction, tx: &mpsc::Sender<Event>) {
        let generation = self.state.playback.supersede();
        let what = match &action {
            CardAction::ExpandPodcast(_) => "podcast",
            _ => "playlist",
        };
        self.state.status = format!("Opening {what}...");
        self.state.pending_title = Some(what.to_string());
        let catalog = self.catalog.clone();
        let tx = tx.clone();
        tokio::spawn(async move {
            let result = match &action {
                CardAction::ExpandPlaylist(id) => pages::expand_playlist(&catalog, id).await,
                CardAction::ExpandPodcast(id) => pages::expand_podcast(&catalog, id).await,
                _ => return,
            };
            let _ = tx
                .send(Event::Network(NetworkEvent::Expanded { generation, result }))
                .await;
        });
    }

    async fn apply_next_step(&mut self, step: NextStep, tx: &mpsc::Sender<Event>) {
        match step {
            NextStep::Fetch(ticket) => {
                // Any start still in flight has just been superseded.
                self.state.pending_title = None;
                self.state.status = "Loading next track...".into();
                let catalog = self.catalog.clone();
                let tx = tx.clone();
                tokio::spawn(async move {
                    let generation = ticket.generation();
                    let ev = match session::fetch_next(&catalog, ticket).await {
                        Ok((ticket, next)) => NetworkEvent::NextFetched { ticket, next },
                        Err(error) => NetworkEvent::NextFailed { generation, error },
                    };
                    let _ = tx.send(Event::Network(ev)).await;
                });
            }
            NextStep::EndOfQueue { changed } => {
                if changed {
                    self.stop_output().await;
                }
                self.state.status = "End of queue".into();
            }
        }
    }

    async fn toggle_playback(&mut self, tx: &mpsc::Sender<Event>) {
        match self.state.playback.toggle_playback() {
            Toggle::Paused => {
                if let Some(output) = &self.output {
                    log_output(output.set_paused(true).await, "pause");
                }
            }
            Toggle::Resumed => {
                if let Some(output) = &self.output {
                    log_output(output.set_paused(false).await, "resume");
                }
            }
            Toggle::Idle => {
                // A stopped track starts over.
                if let Some(np) = self.state.playback.current() {
                    let track = np.track.clone();
                    self.start_play(track, tx);
                }
            }
        }
    }

    async fn seek(&mut self, delta: f64) {
        if self.state.playback.current().is_none() {
            return;
        }
        if let Some(output) = &self.output {
            log_output(output.seek_relative(delta).await, "seek");
        }
    }

    async fn set_volume(&mut self, volume: u8) {
        self.state.volume = volume.min(100);
        if let Some(output) = &self.output {
            log_output(output.set_volume(self.state.volume).await, "volume");
        }
        self.state.status = format!("Volume {}%", self.state.volume);
    }

    async fn stop_output(&self) {
        if let Some(output) = &self.output {
            log_output(output.stop().await, "stop");
        }
    }

    fn playback_error(&mut self, e: PlaybackError) {
        if !e.is_user_visible() {
            tracing::debug!(error = %e, "dropped stale playback result");
            return;
        }
        tracing::warn!(error = %e, "playback failed");
        self.state.pending_title = None;
        self.state.error(format!("Failed to play song: {e}"));
    }

    fn spawn_lyrics(&mut self, track: Track, tx: &mpsc::Sender<Event>) {
        if !self.state.lyrics.begin(&track.video_id) {
            return;
        }
        let loader = self.lyrics.clone();
        let catalog = self.catalog.clone();
        let tx = tx.clone();
        tokio::spawn(async move {
            let load = loader.load(&catalog, &track).await;
            let _ = tx
                .send(Event::Network(NetworkEvent::LyricsLoaded {
                    track_id: track.video_id,
                    load,
                }))
                .await;
        });
    }

    async fn handle_player(&mut self, pe: PlayerEvent, tx: &mpsc::Sender<Event>) {
        match pe {
            PlayerEvent::Position { seconds } => {
                self.state.position_secs = seconds;
                self.state.lyrics.tick(seconds);
            }
            PlayerEvent::Duration { seconds } => self.state.duration_secs = seconds,
            PlayerEvent::Paused => self.state.playback.sync_paused(true),
            PlayerEvent::Resumed => self.state.playback.sync_paused(false),
            PlayerEvent::Ended => {
                // A start in flight takes precedence over auto-advance.
                if self.state.pending_title.is_some() {
                    return;
                }
                let step = self.state.playback.on_track_ended();
                self.apply_next_step(step, tx).await;
            }
            PlayerEvent::Failed(reason) => {
                if self.state.pending_title.is_some() {
                    return;
                }
                if self.state.playback.on_track_failed() {
                    self.state.reset_clock();
                    self.state.error(format!("Failed to play song: {reason}"));
                }
            }
            PlayerEvent::Error(e) => {
                tracing::warn!(error = %e, "player error");
                self.state.error(e);
            }
        }
    }

    async fn handle_network(&mut self, ne: NetworkEvent, tx: &mpsc::Sender<Event>) {
        match ne {
            NetworkEvent::PageLoaded {
                page,
                request,
                view,
            } => {
                self.state.page_state_mut(page).finish_load(request, view);
            }
            NetworkEvent::SearchDue(query) => {
                // Skip if the input changed after the timer fired.
                if search::normalize_query(&self.state.search_query) == Some(query.as_str()) {
                    tracing::debug!(%query, "search");
                    self.state.last_search = Some(query);
                    self.spawn_page_load(Page::Search, tx);
                }
            }
            NetworkEvent::PlaybackResolved(resolved) => {
                let Some(output) = self.output.as_ref() else {
                    self.state.pending_title = None;
                    self.state.error("Audio output not available");
                    return;
                };
                let committed = self
                    .state
                    .playback
                    .commit(resolved, output)
                    .await
                    .map(|np| np.track.clone());
                match committed {
                    Ok(track) => {
                        self.state.pending_title = None;
                        self.state.reset_clock();
                        let title = crate::view::cards::track_card(&track).title;
                        self.state.status = format!("Playing: {title}");
                        self.state.toast = Some(Toast::success(format!("Now playing {title}")));
                        self.spawn_lyrics(track, tx);
                    }
                    Err(e) => self.playback_error(e),
                }
            }
            NetworkEvent::PlaybackFailed { generation, error } => {
                let e = self.state.playback.reject(generation, error);
                self.playback_error(e);
            }
            NetworkEvent::NextFetched { ticket, next } => {
                match self.state.playback.next_fetched(ticket, next) {
                    Ok(Some(ticket)) => self.spawn_resolve(ticket, tx),
                    Ok(None) => {
                        self.stop_output().await;
                        self.state.status = "End of queue".into();
                    }
                    Err(e) => self.playback_error(e),
                }
            }
            NetworkEvent::NextFailed { generation, error } => {
                let e = self.state.playback.reject(generation, error);
                self.playback_error(e);
            }
            NetworkEvent::Expanded { generation, result } => {
                if !self.state.playback.is_latest(generation) {
                    return;
                }
                match result {
                    Ok(track) => self.start_play(track, tx),
                    Err(e) if e.is_empty_result() => {
                        self.state.pending_title = None;
                        self.state.error("Nothing to play here.");
                    }
                    Err(e) => {
                        self.state.pending_title = None;
                        tracing::warn!(error = %e, "expansion failed");
                        self.state.error(format!("Failed to load: {e}"));
                    }
                }
            }
            NetworkEvent::LyricsLoaded { track_id, load } => {
                if self.state.lyrics.apply(&track_id, load) {
                    self.state.lyrics.tick(self.state.position_secs);
                }
            }
        }
    }
}

fn log_output(res: anyhow::Result<()>, what: &str) {
    if let Err(e) = res {
        tracing::warn!(error = %format!("{e:#}"), "output {what} failed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::models::{LyricLine, Playlist, Podcast, SessionHandle, StreamQuality};
    use crate::catalog::{CatalogResult, Library, Trending, TrendingKind};
    use crate::session::PlaybackStatus;
    use async_trait::async_trait;
    use state::ToastKind;
    use std::sync::Mutex;

    #[derive(Clone, Default)]
    struct FakeCatalog;

    #[async_trait]
    impl Catalog for FakeCatalog {
        async fn search(&self, _: &str, _: u32) -> CatalogResult<Vec<Track>> {
            Ok(vec![track("s1")])
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
            Ok(vec![track("p1")])
        }
        async fn podcast_episodes(&self, _: &str) -> CatalogResult<Vec<Track>> {
            Ok(Vec::new())
        }
        async fn start_session(&self, track_id: &str) -> CatalogResult<SessionHandle> {
            Ok(SessionHandle(format!("s-{track_id}")))
        }
        async fn next_in_session(&self, _: &SessionHandle) -> CatalogResult<Option<Track>> {
            Ok(None)
        }
    }

    #[async_trait]
    impl StreamResolver for FakeCatalog {
        async fn resolve_stream(&self, track_id: &str, _: StreamQuality) -> CatalogResult<String> {
            Ok(format!("http://media/{track_id}"))
        }
        async fn lyrics(&self, _: &str) -> CatalogResult<Vec<LyricLine>> {
            Ok(Vec::new())
        }
    }

    #[derive(Default)]
    struct FakeOutput {
        loaded: Mutex<Vec<String>>,
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
        async fn seek_to(&self, _: f64) -> anyhow::Result<()> {
            Ok(())
        }
        async fn seek_relative(&self, _: f64) -> anyhow::Result<()> {
            Ok(())
        }
        async fn set_volume(&self, _: u8) -> anyhow::Result<()> {
            Ok(())
        }
        async fn stop(&self) -> anyhow::Result<()> {
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

    fn test_app() -> App<FakeCatalog, FakeOutput> {
        let mut app = App::with_parts(
            Config::default(),
            PathBuf::from("unused.toml"),
            FakeCatalog,
            LyricsLoader::new(None),
        );
        app.output = Some(FakeOutput::default());
        app
    }

    fn current_id<C, O>(app: &App<C, O>) -> Option<&str> {
        app.state.playback.current().map(|np| np.track.video_id.as_str())
    }

    /// Wait for the next resolved start, skipping unrelated events.
    async fn resolved(rx: &mut mpsc::Receiver<Event>) -> NetworkEvent {
        let wait = async {
            loop {
                match rx.recv().await {
                    Some(Event::Network(ne @ NetworkEvent::PlaybackResolved(_))) => return ne,
                    Some(_) => continue,
                    None => panic!("event channel closed"),
                }
            }
        };
        tokio::time::timeout(Duration::from_secs(5), wait)
            .await
            .expect("no playback resolution arrived")
    }

    async fn play(
        app: &mut App<FakeCatalog, FakeOutput>,
        id: &str,
        tx: &mpsc::Sender<Event>,
        rx: &mut mpsc::Receiver<Event>,
    ) {
        app.start_play(track(id), tx);
        let ev = resolved(rx).await;
        app.handle_network(ev, tx).await;
        assert_eq!(current_id(app), Some(id));
    }

    #[tokio::test]
    async fn ended_waits_for_a_pending_start() {
        let (tx, mut rx) = mpsc::channel(64);
        let mut app = test_app();
        play(&mut app, "a", &tx, &mut rx).await;

        app.start_play(track("b"), &tx);
        app.handle_player(PlayerEvent::Ended, &tx).await;
        assert!(app.state.pending_title.is_some());

        // The user's pick still commits; auto-advance did not supersede it.
        let ev = resolved(&mut rx).await;
        app.handle_network(ev, &tx).await;
        assert_eq!(current_id(&app), Some("b"));
        assert!(app.state.pending_title.is_none());
        let loaded = app.output.as_ref().unwrap().loaded.lock().unwrap().clone();
        assert_eq!(loaded, ["http://media/a", "http://media/b"]);
    }

    #[tokio::test]
    async fn next_without_session_keeps_the_first_start() {
        let (tx, mut rx) = mpsc::channel(64);
        let mut app = test_app();
        app.start_play(track("a"), &tx);
        app.handle_action(Action::Next, &tx).await;
        assert!(app.state.pending_title.is_some());

        let ev = resolved(&mut rx).await;
        app.handle_network(ev, &tx).await;
        assert_eq!(current_id(&app), Some("a"));
    }

    #[tokio::test]
    async fn output_failure_stops_playback() {
        let (tx, mut rx) = mpsc::channel(64);
        let mut app = test_app();
        play(&mut app, "a", &tx, &mut rx).await;

        app.handle_player(PlayerEvent::Failed("loading failed".into()), &tx)
            .await;
        assert_eq!(app.state.playback.status(), PlaybackStatus::Stopped);
        assert_eq!(current_id(&app), Some("a"));
        let toast = app.state.toast.as_ref().unwrap();
        assert_eq!(toast.kind, ToastKind::Error);
        assert!(toast.message.contains("loading failed"));

        // A stopped track is not auto-advanced.
        app.handle_player(PlayerEvent::Ended, &tx).await;
        assert_eq!(app.state.playback.status(), PlaybackStatus::Stopped);
    }

    #[tokio::test]
    async fn search_due_after_an_edit_is_dropped() {
        let (tx, _rx) = mpsc::channel(64);
        let mut app = test_app();
        let page = app.state.page;
        app.state.search_query = "rock".into();

        app.handle_network(NetworkEvent::SearchDue("roc".into()), &tx)
            .await;
        assert_eq!(app.state.last_search, None);
        assert!(!app.state.page_state(Page::Search).loading);

        app.handle_network(NetworkEvent::SearchDue("rock".into()), &tx)
            .await;
        assert_eq!(app.state.last_search.as_deref(), Some("rock"));
        assert!(app.state.page_state(Page::Search).loading);
        // Typing never switches pages on its own.
        assert_eq!(app.state.page, page);
    }

    #[tokio::test]
    async fn stale_expansion_is_dropped() {
        let (tx, _rx) = mpsc::channel(64);
        let mut app = test_app();
        let stale = app.state.playback.supersede();
        let latest = app.state.playback.supersede();

        app.handle_network(
            NetworkEvent::Expanded {
                generation: stale,
                result: Ok(track("p1")),
            },
            &tx,
        )
        .await;
        assert!(app.state.pending_title.is_none());

        app.handle_network(
            NetworkEvent::Expanded {
                generation: latest,
                result: Ok(track("p1")),
            },
            &tx,
        )
        .await;
        assert_eq!(app.state.pending_title.as_deref(), Some("Title p1"));
    }
}
