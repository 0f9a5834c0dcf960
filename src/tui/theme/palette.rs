use ratatui::style::Color;

#[derive(Debug, Clone, Copy)]
pub struct Palette {
    pub bg_primary: Color,
    pub fg_primary: Color,
    pub fg_secondary: Color,
    pub fg_muted: Color,
    pub accent: Color,
    pub accent_alt: Color,
    pub border: Color,
    pub border_focus: Color,
    pub playing: Color,
    pub error: Color,
}

impl Palette {
    /// Dark slate with a warm accent. Card thumbnails fall back to #2a2a2a,
    /// so the muted tone matches it.
    pub const SLATE: Self = Self {
        bg_primary: Color::Rgb(16, 16, 20),
        fg_primary: Color::Rgb(236, 236, 240),
        fg_secondary: Color::Rgb(150, 150, 160),
        fg_muted: Color::Rgb(42, 42, 42),
        accent: Color::Rgb(255, 138, 76),
        accent_alt: Color::Rgb(255, 196, 150),
        border: Color::Rgb(70, 70, 82),
        border_focus: Color::Rgb(255, 138, 76),
        playing: Color::Rgb(120, 220, 160),
        error: Color::Rgb(240, 96, 96),
    };
}
