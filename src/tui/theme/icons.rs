//! Nerd Font glyphs. Requires a Nerd Font in the terminal.

use crate::view::Page;

#[derive(Debug, Clone)]
pub struct Icons {
    pub play: &'static str,
    pub pause: &'static str,
    pub stop: &'static str,
    pub next: &'static str,
    pub prev: &'static str,

    pub volume_mute: &'static str,
    pub volume_low: &'static str,
    pub volume_high: &'static str,

    pub home: &'static str,
    pub search: &'static str,
    pub trending: &'static str,
    pub library: &'static str,
    pub playlist: &'static str,
    pub podcast: &'static str,
    pub mood: &'static str,
    pub genre: &'static str,
    pub help: &'static str,

    pub success: &'static str,
    pub error: &'static str,
    pub music: &'static str,
    pub lyrics: &'static str,

    pub selected: &'static str,
    pub unselected: &'static str,

    pub progress_full: &'static str,
    pub progress_empty: &'static str,
    pub progress_head: &'static str,
}

impl Icons {
    pub const fn nerd() -> Self {
        Self {
            play: "\u{f04b}",       // nf-fa-play
            pause: "\u{f04c}",      // nf-fa-pause
            stop: "\u{f04d}",       // nf-fa-stop
            next: "\u{f051}",       // nf-fa-step_forward
            prev: "\u{f048}",       // nf-fa-step_backward

            volume_mute: "\u{f026}", // nf-fa-volume_off
            volume_low: "\u{f027}",  // nf-fa-volume_down
            volume_high: "\u{f028}", // nf-fa-volume_up

            home: "\u{f015}",       // nf-fa-home
            search: "\u{f002}",     // nf-fa-search
            trending: "\u{f06d}",   // nf-fa-fire
            library: "\u{f02d}",    // nf-fa-book
            playlist: "\u{f0cb}",   // nf-fa-list_ol
            podcast: "\u{f130}",    // nf-fa-microphone
            mood: "\u{f118}",       // nf-fa-smile_o
            genre: "\u{f02c}",      // nf-fa-tags
            help: "\u{f059}",       // nf-fa-question_circle

            success: "\u{f00c}",    // nf-fa-check
            error: "\u{f00d}",      // nf-fa-times
            music: "\u{f001}",      // nf-fa-music
            lyrics: "\u{f15c}",     // nf-fa-file_text_o

            selected: "\u{f054}",   // nf-fa-chevron_right
            unselected: " ",

            progress_full: "━",
            progress_empty: "─",
            progress_head: "●",
        }
    }

    pub fn page(&self, page: Page) -> &'static str {
        match page {
            Page::Home => self.home,
            Page::Search => self.search,
            Page::Trending => self.trending,
            Page::Library => self.library,
            Page::Playlists => self.playlist,
            Page::Podcasts => self.podcast,
            Page::Moods => self.mood,
            Page::Genres => self.genre,
        }
    }
}
