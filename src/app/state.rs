use crate::lyrics::LyricsPanel;
use crate::session::PlaybackSessionManager;
use crate::view::{Card, Page, PageView};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SearchFocus {
    #[default]
    Input,
    Results,
}

#[derive(Debug, Clone)]
pub struct Toast {
    pub message: String,
    pub kind: ToastKind,
    pub created_at: std::time::Instant,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
}

impl Toast {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            kind: ToastKind::Success,
            created_at: std::time::Instant::now(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            kind: ToastKind::Error,
            created_at: std::time::Instant::now(),
        }
    }

    pub fn is_expired(&self) -> bool {
        self.created_at.elapsed() > std::time::Duration::from_secs(4)
    }
}

/// Per-page content and selection, so each page keeps its own place.
#[derive(Debug, Clone, Default)]
pub struct PageState {
    pub view: Option<PageView>,
    pub loading: bool,
    /// Latest load issued; older responses are dropped.
    pub request: u64,
    pub selected: usize,
    pub scroll_offset: usize,
}

impl PageState {
    pub fn card_count(&self) -> usize {
        self.view.as_ref().map_or(0, PageView::card_count)
    }

    pub fn selected_card(&self) -> Option<&Card> {
        self.view.as_ref()?.card(self.selected)
    }

    pub fn select_prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    pub fn select_next(&mut self) {
        self.select(self.selected + 1);
    }

    pub fn select(&mut self, index: usize) {
        self.selected = index.min(self.card_count().saturating_sub(1));
    }

    /// Start a load and return its request number.
    pub fn begin_load(&mut self) -> u64 {
        self.request += 1;
        self.loading = true;
        self.request
    }

    /// Install a loaded view unless a newer load has been issued since.
    pub fn finish_load(&mut self, request: u64, view: PageView) -> bool {
        if request != self.request {
            return false;
        }
        self.view = Some(view);
        self.loading = false;
        self.selected = 0;
        self.scroll_offset = 0;
        true
    }

    /// Scroll the minimum needed to keep `row` on screen.
    pub fn scroll_to(&mut self, row: usize, visible_height: usize) {
        if visible_height == 0 {
            return;
        }
        if row < self.scroll_offset {
            self.scroll_offset = row;
        } else if row >= self.scroll_offset + visible_height {
            self.scroll_offset = row - visible_height + 1;
        }
    }
}

pub struct AppState {
    pub should_quit: bool,
    pub show_help: bool,

    pub page: Page,
    pub pages: [PageState; Page::COUNT],

    // Search
    pub search_query: String,
    /// Query the search page currently shows results for.
    pub last_search: Option<String>,
    pub search_focus: SearchFocus,

    // Playback
    pub playback: PlaybackSessionManager,
    pub position_secs: f64,
    pub duration_secs: f64,
    pub volume: u8,
    /// A start is in flight for this title.
    pub pending_title: Option<String>,

    pub lyrics: LyricsPanel,

    pub toast: Option<Toast>,
    pub status: String,

    /// Screen rows of the cards drawn last frame, for mouse clicks.
    pub card_hits: Vec<CardHit>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CardHit {
    pub x: u16,
    pub y: u16,
    pub width: u16,
    pub index: usize,
}

impl AppState {
    pub fn new(playback: PlaybackSessionManager, volume: u8) -> Self {
        Self {
            should_quit: false,
            show_help: false,
            page: Page::default(),
            pages: Default::default(),
            search_query: String::new(),
            last_search: None,
            search_focus: SearchFocus::default(),
            playback,
            position_secs: 0.0,
            duration_secs: 0.0,
            volume: volume.min(100),
            pending_title: None,
            lyrics: LyricsPanel::default(),
            toast: None,
            status: String::new(),
            card_hits: Vec::new(),
        }
    }

    pub fn page_state(&self, page: Page) -> &PageState {
        &self.pages[page.index()]
    }

    pub fn page_state_mut(&mut self, page: Page) -> &mut PageState {
        &mut self.pages[page.index()]
    }

    pub fn active(&self) -> &PageState {
        self.page_state(self.page)
    }

    pub fn active_mut(&mut self) -> &mut PageState {
        let page = self.page;
        self.page_state_mut(page)
    }

    pub fn set_page(&mut self, page: Page) {
        self.page = page;
        if page == Page::Search {
            self.search_focus = SearchFocus::Input;
        }
    }

    /// Reset the clock for a newly loaded track.
    pub fn reset_clock(&mut self) {
        self.position_secs = 0.0;
        self.duration_secs = 0.0;
    }

    pub fn card_at(&self, column: u16, row: u16) -> Option<usize> {
        self.card_hits
            .iter()
            .find(|h| h.y == row && column >= h.x && column < h.x + h.width)
            .map(|h| h.index)
    }

    pub fn error(&mut self, message: impl Into<String>) {
        let message = message.into();
        self.status = message.clone();
        self.toast = Some(Toast::error(message));
    }
}
