//! Colors, glyphs and border set shared by every widget.

pub mod icons;
pub mod palette;

pub use icons::Icons;
pub use palette::Palette;

use once_cell::sync::Lazy;
use ratatui::symbols::border;

#[derive(Debug, Clone)]
pub struct Theme {
    pub palette: Palette,
    pub icons: Icons,
}

static THEME: Lazy<Theme> = Lazy::new(|| Theme {
    palette: Palette::SLATE,
    icons: Icons::nerd(),
});

impl Theme {
    pub fn border_set(&self) -> border::Set<'static> {
        border::ROUNDED
    }
}

pub fn get_theme() -> &'static Theme {
    &THEME
}
