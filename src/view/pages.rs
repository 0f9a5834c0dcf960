//! Browse pages: which catalog calls each page makes and how the results
//! are grouped into titled sections.

use super::cards::{self, Card};
use crate::catalog::models::{Record, Track};
use crate::catalog::{Catalog, CatalogResult, TrendingKind};
use crate::error::CatalogError;

pub const MOODS: [&str; 6] = ["happy", "sad", "party", "chill", "workout", "romantic"];
pub const GENRES: [&str; 8] = [
    "Pop",
    "Rock",
    "Hip-Hop",
    "Electronic",
    "Jazz",
    "Classical",
    "R&B",
    "Country",
];

const HOME_LIMIT: u32 = 12;
const PREVIEW_LEN: usize = 6;
const BROWSE_LIMIT: u32 = 24;
const LIBRARY_LIMIT: u32 = 50;
const MOOD_LIMIT: u32 = 6;
const PLAYLIST_LIMIT: u32 = 100;
const PODCAST_QUERY: &str = "popular";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Page {
    #[default]
    Home,
    Search,
    Trending,
    Library,
    Playlists,
    Podcasts,
    Moods,
    Genres,
}

impl Page {
    pub const COUNT: usize = 8;

    pub const ALL: [Page; Page::COUNT] = [
        Page::Home,
        Page::Search,
        Page::Trending,
        Page::Library,
        Page::Playlists,
        Page::Podcasts,
        Page::Moods,
        Page::Genres,
    ];

    pub fn title(self) -> &'static str {
        match self {
            Page::Home => "Home",
            Page::Search => "Search",
            Page::Trending => "Trending",
            Page::Library => "Library",
            Page::Playlists => "Playlists",
            Page::Podcasts => "Podcasts",
            Page::Moods => "Moods",
            Page::Genres => "Genres",
        }
    }

    /// Stable name stored in the config file.
    pub fn slug(self) -> &'static str {
        match self {
            Page::Home => "home",
            Page::Search => "search",
            Page::Trending => "trending",
            Page::Library => "library",
            Page::Playlists => "playlists",
            Page::Podcasts => "podcasts",
            Page::Moods => "moods",
            Page::Genres => "genres",
        }
    }

    pub fn from_slug(slug: &str) -> Option<Page> {
        Page::ALL.into_iter().find(|p| p.slug() == slug)
    }

    pub fn index(self) -> usize {
        Page::ALL.iter().position(|p| *p == self).unwrap_or(0)
    }

    pub fn next(self) -> Page {
        Page::ALL[(self.index() + 1) % Page::ALL.len()]
    }

    pub fn prev(self) -> Page {
        Page::ALL[(self.index() + Page::ALL.len() - 1) % Page::ALL.len()]
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Section {
    pub title: String,
    pub subtitle: Option<String>,
    pub cards: Vec<Card>,
}

impl Section {
    fn new(title: impl Into<String>, cards: Vec<Card>) -> Self {
        Self {
            title: title.into(),
            subtitle: None,
            cards,
        }
    }

    fn with_subtitle(mut self, subtitle: impl Into<String>) -> Self {
        self.subtitle = Some(subtitle.into());
        self
    }
}

/// What the content pane shows.
#[derive(Debug, Clone, PartialEq)]
pub enum PageView {
    Sections(Vec<Section>),
    /// Inline notice in place of content (failure, empty result, hint).
    Message(String),
}

impl PageView {
    /// Card at `index`, counting across sections in display order.
    pub fn card(&self, index: usize) -> Option<&Card> {
        match self {
            PageView::Sections(sections) => sections.iter().flat_map(|s| s.cards.iter()).nth(index),
            PageView::Message(_) => None,
        }
    }

    pub fn card_count(&self) -> usize {
        match self {
            PageView::Sections(sections) => sections.iter().map(|s| s.cards.len()).sum(),
            PageView::Message(_) => 0,
        }
    }

    fn sections_or(sections: Vec<Section>, empty: &str) -> Self {
        let sections: Vec<Section> = sections.into_iter().filter(|s| !s.cards.is_empty()).collect();
        if sections.is_empty() {
            PageView::Message(empty.to_string())
        } else {
            PageView::Sections(sections)
        }
    }

    fn failed(page: Page, message: &str, err: &CatalogError) -> Self {
        tracing::warn!(page = page.slug(), error = %err, "page load failed");
        PageView::Message(message.to_string())
    }
}

fn track_cards<'a>(tracks: impl IntoIterator<Item = &'a Track>) -> Vec<Card> {
    tracks.into_iter().map(cards::track_card).collect()
}

fn record_cards<T: Clone>(items: &[T], wrap: fn(T) -> Record) -> Vec<Card> {
    let records: Vec<Record> = items.iter().cloned().map(wrap).collect();
    cards::render_cards(&records)
}

/// Fetch and compose `page`. Never fails: errors become a message.
pub async fn load_page<C>(catalog: &C, page: Page, query: Option<&str>, page_size: u32) -> PageView
where
    C: Catalog + ?Sized,
{
    match page {
        Page::Home => home(catalog).await,
        Page::Search => match query.and_then(crate::search::normalize_query) {
            Some(q) => search(catalog, q, page_size).await,
            None => PageView::Message(
                "Type to search for songs, artists, albums and podcasts.".to_string(),
            ),
        },
        Page::Trending => trending(catalog).await,
        Page::Library => library(catalog).await,
        Page::Playlists => playlists(catalog).await,
        Page::Podcasts => podcasts(catalog).await,
        Page::Moods => moods(catalog).await,
        Page::Genres => genres(),
    }
}

async fn home<C: Catalog + ?Sized>(catalog: &C) -> PageView {
    let res = futures::try_join!(
        catalog.charts(HOME_LIMIT),
        catalog.mood_playlists("happy", HOME_LIMIT)
    );
    let (charts, collections) = match res {
        Ok(r) => r,
        Err(e) => {
            return PageView::failed(
                Page::Home,
                "Unable to load content. Please ensure the API server is running.",
                &e,
            );
        }
    };

    let mut sections = Vec::new();
    if let Some(featured) = charts.first() {
        sections.push(
            Section::new("Featured Track", vec![cards::track_card(featured)])
                .with_subtitle("Premium sound. Immersive experience."),
        );
    }
    sections.push(
        Section::new("Trending Now", track_cards(charts.iter().take(PREVIEW_LEN)))
            .with_subtitle("The hottest tracks of the moment"),
    );
    let preview: Vec<_> = collections.into_iter().take(PREVIEW_LEN).collect();
    sections.push(
        Section::new("Curated Collections", record_cards(&preview, Record::Playlist))
            .with_subtitle("Handpicked playlists for every mood"),
    );
    PageView::sections_or(sections, "Nothing to show yet.")
}

/// Search results for an already-normalized query.
pub async fn search<C: Catalog + ?Sized>(catalog: &C, query: &str, page_size: u32) -> PageView {
    match catalog.search(query, page_size).await {
        Ok(results) => PageView::sections_or(
            vec![
                Section::new("Search Results", track_cards(&results))
                    .with_subtitle(format!("{} results for \"{query}\"", results.len())),
            ],
            "No results found. Try different keywords.",
        ),
        Err(e) if e.is_empty_result() => {
            PageView::Message("No results found. Try different keywords.".to_string())
        }
        Err(e) => PageView::failed(Page::Search, "Search failed. Please try again.", &e),
    }
}

async fn trending<C: Catalog + ?Sized>(catalog: &C) -> PageView {
    match catalog.trending(TrendingKind::All, BROWSE_LIMIT).await {
        Ok(t) => PageView::sections_or(
            vec![
                Section::new("Trending Songs", track_cards(&t.songs)),
                Section::new("Trending Videos", record_cards(&t.videos, Record::Video)),
                Section::new("Trending Playlists", record_cards(&t.playlists, Record::Playlist)),
            ],
            "Nothing is trending right now.",
        ),
        Err(e) => PageView::failed(Page::Trending, "Failed to load trending content.", &e),
    }
}

async fn library<C: Catalog + ?Sized>(catalog: &C) -> PageView {
    match catalog.library(LIBRARY_LIMIT).await {
        Ok(lib) => PageView::sections_or(
            vec![
                Section::new("Your Library", track_cards(&lib.songs)),
                Section::new("Your Playlists", record_cards(&lib.playlists, Record::Playlist)),
            ],
            "Your library is empty.",
        ),
        Err(e) => PageView::failed(Page::Library, "Failed to load library.", &e),
    }
}

async fn playlists<C: Catalog + ?Sized>(catalog: &C) -> PageView {
    match catalog.trending(TrendingKind::Playlists, BROWSE_LIMIT).await {
        Ok(t) => PageView::sections_or(
            vec![Section::new(
                "Popular Playlists",
                record_cards(&t.playlists, Record::Playlist),
            )],
            "No playlists found.",
        ),
        Err(e) => PageView::failed(Page::Playlists, "Failed to load playlists.", &e),
    }
}

async fn podcasts<C: Catalog + ?Sized>(catalog: &C) -> PageView {
    match catalog.search_podcasts(PODCAST_QUERY, BROWSE_LIMIT).await {
        Ok(list) => PageView::sections_or(
            vec![Section::new("Popular Podcasts", record_cards(&list, Record::Podcast))],
            "No podcasts found.",
        ),
        Err(e) => PageView::failed(Page::Podcasts, "Failed to load podcasts.", &e),
    }
}

/// One section per mood. All fetches run concurrently and the page renders
/// once every one has settled; failed moods are left out.
async fn moods<C: Catalog + ?Sized>(catalog: &C) -> PageView {
    let results =
        futures::future::join_all(MOODS.iter().map(|m| catalog.mood_playlists(m, MOOD_LIMIT)))
            .await;

    let mut sections = Vec::new();
    let mut last_err = None;
    for (mood, res) in MOODS.iter().zip(results) {
        match res {
            Ok(list) => sections.push(
                Section::new(format!("{} Vibes", capitalize(mood)), record_cards(&list, Record::Playlist))
                    .with_subtitle(format!("Perfect for {mood} moments")),
            ),
            Err(e) => {
                tracing::warn!(mood, error = %e, "mood fetch failed");
                last_err = Some(e);
            }
        }
    }

    match last_err {
        Some(e) if sections.is_empty() => {
            PageView::failed(Page::Moods, "Failed to load moods.", &e)
        }
        _ => PageView::sections_or(sections, "No mood playlists found."),
    }
}

fn genres() -> PageView {
    PageView::Sections(vec![Section::new(
        "Browse Genres",
        GENRES.iter().map(|g| cards::search_card(g)).collect(),
    )])
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// First playable track of a playlist.
pub async fn expand_playlist<C: Catalog + ?Sized>(catalog: &C, playlist_id: &str) -> CatalogResult<Track> {
    first_playable(catalog.playlist_tracks(playlist_id, PLAYLIST_LIMIT).await?)
        .ok_or_else(|| CatalogError::empty(format!("playlist {playlist_id} has no tracks")))
}

/// Newest episode of a podcast, as a track.
pub async fn expand_podcast<C: Catalog + ?Sized>(catalog: &C, browse_id: &str) -> CatalogResult<Track> {
    first_playable(catalog.podcast_episodes(browse_id).await?)
        .ok_or_else(|| CatalogError::empty(format!("podcast {browse_id} has no episodes")))
}

fn first_playable(tracks: Vec<Track>) -> Option<Track> {
    tracks.into_iter().find(|t| !t.video_id.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::models::{Playlist, Podcast, SessionHandle};
    use crate::catalog::{Library, Trending};
    use crate::view::cards::CardAction;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Default)]
    struct FakeCatalog {
        down: bool,
        failing_mood: Option<&'static str>,
        mood_calls: AtomicUsize,
    }

    fn unavailable() -> CatalogError {
        CatalogError::Status {
            status: reqwest::StatusCode::SERVICE_UNAVAILABLE,
            message: "down".into(),
        }
    }

    fn track(id: &str) -> Track {
        Track {
            video_id: id.into(),
            title: id.to_uppercase(),
            ..Track::default()
        }
    }

    #[async_trait]
    impl Catalog for FakeCatalog {
        async fn search(&self, query: &str, _: u32) -> CatalogResult<Vec<Track>> {
            if self.down {
                return Err(unavailable());
            }
            Ok(if query == "nothing" {
                Vec::new()
            } else {
                vec![track("s1"), track("s2")]
            })
        }
        async fn charts(&self, _: u32) -> CatalogResult<Vec<Track>> {
            if self.down {
                return Err(unavailable());
            }
            Ok((0..8).map(|i| track(&format!("c{i}"))).collect())
        }
        async fn mood_playlists(&self, mood: &str, _: u32) -> CatalogResult<Vec<Playlist>> {
            self.mood_calls.fetch_add(1, Ordering::SeqCst);
            if self.down || self.failing_mood == Some(mood) {
                return Err(unavailable());
            }
            Ok(vec![Playlist {
                playlist_id: format!("PL-{mood}"),
                title: mood.into(),
                ..Playlist::default()
            }])
        }
        async fn trending(&self, _: TrendingKind, _: u32) -> CatalogResult<Trending> {
            Ok(Trending {
                songs: vec![track("t1")],
                ..Trending::default()
            })
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
        async fn playlist_tracks(&self, id: &str, _: u32) -> CatalogResult<Vec<Track>> {
            Ok(match id {
                "empty" => Vec::new(),
                _ => vec![Track::default(), track("p1"), track("p2")],
            })
        }
        async fn podcast_episodes(&self, _: &str) -> CatalogResult<Vec<Track>> {
            Ok(Vec::new())
        }
        async fn start_session(&self, id: &str) -> CatalogResult<SessionHandle> {
            Ok(SessionHandle(id.into()))
        }
        async fn next_in_session(&self, _: &SessionHandle) -> CatalogResult<Option<Track>> {
            Ok(None)
        }
    }

    #[tokio::test]
    async fn home_sections() {
        let view = load_page(&FakeCatalog::default(), Page::Home, None, 24).await;
        let PageView::Sections(sections) = &view else {
            panic!("expected sections, got {view:?}");
        };
        let titles: Vec<&str> = sections.iter().map(|s| s.title.as_str()).collect();
        assert_eq!(titles, ["Featured Track", "Trending Now", "Curated Collections"]);
        assert_eq!(sections[1].cards.len(), PREVIEW_LEN);
        assert_eq!(view.card_count(), 1 + PREVIEW_LEN + 1);
    }

    #[tokio::test]
    async fn failures_become_inline_messages() {
        let down = FakeCatalog {
            down: true,
            ..FakeCatalog::default()
        };
        assert_eq!(
            load_page(&down, Page::Home, None, 24).await,
            PageView::Message(
                "Unable to load content. Please ensure the API server is running.".into()
            )
        );
        assert_eq!(
            load_page(&down, Page::Search, Some("jazz"), 24).await,
            PageView::Message("Search failed. Please try again.".into())
        );
        assert_eq!(
            load_page(&down, Page::Moods, None, 24).await,
            PageView::Message("Failed to load moods.".into())
        );
    }

    #[tokio::test]
    async fn search_empty_and_blank() {
        let catalog = FakeCatalog::default();
        assert_eq!(
            load_page(&catalog, Page::Search, Some("nothing"), 24).await,
            PageView::Message("No results found. Try different keywords.".into())
        );
        let view = load_page(&catalog, Page::Search, Some("   "), 24).await;
        assert!(matches!(view, PageView::Message(_)));

        let view = load_page(&catalog, Page::Search, Some(" lofi "), 24).await;
        let PageView::Sections(sections) = view else {
            panic!("expected results");
        };
        assert_eq!(sections[0].subtitle.as_deref(), Some("2 results for \"lofi\""));
    }

    #[tokio::test]
    async fn moods_wait_for_every_fetch() {
        let catalog = FakeCatalog {
            failing_mood: Some("sad"),
            ..FakeCatalog::default()
        };
        let view = load_page(&catalog, Page::Moods, None, 24).await;
        assert_eq!(catalog.mood_calls.load(Ordering::SeqCst), MOODS.len());
        let PageView::Sections(sections) = view else {
            panic!("expected sections");
        };
        let titles: Vec<&str> = sections.iter().map(|s| s.title.as_str()).collect();
        assert_eq!(
            titles,
            ["Happy Vibes", "Party Vibes", "Chill Vibes", "Workout Vibes", "Romantic Vibes"]
        );
    }

    #[tokio::test]
    async fn empty_sections_are_dropped() {
        let view = load_page(&FakeCatalog::default(), Page::Trending, None, 24).await;
        let PageView::Sections(sections) = view else {
            panic!("expected sections");
        };
        assert_eq!(sections.len(), 1);

        assert_eq!(
            load_page(&FakeCatalog::default(), Page::Library, None, 24).await,
            PageView::Message("Your library is empty.".into())
        );
    }

    #[tokio::test]
    async fn genres_dispatch_searches() {
        let view = load_page(&FakeCatalog::default(), Page::Genres, None, 24).await;
        assert_eq!(view.card_count(), GENRES.len());
        assert_eq!(
            view.card(2).map(|c| &c.action),
            Some(&CardAction::Search("Hip-Hop".into()))
        );
    }

    #[tokio::test]
    async fn playlist_expansion_skips_unplayable() {
        let catalog = FakeCatalog::default();
        let first = expand_playlist(&catalog, "PL1").await.unwrap();
        assert_eq!(first.video_id, "p1");

        let err = expand_playlist(&catalog, "empty").await.unwrap_err();
        assert!(err.is_empty_result());
        assert!(expand_podcast(&catalog, "MP1").await.unwrap_err().is_empty_result());
    }

    #[test]
    fn page_cycle_and_slugs() {
        assert_eq!(Page::Home.prev(), Page::Genres);
        assert_eq!(Page::Genres.next(), Page::Home);
        for p in Page::ALL {
            assert_eq!(Page::from_slug(p.slug()), Some(p));
        }
        assert_eq!(Page::from_slug("queue"), None);
    }
}
