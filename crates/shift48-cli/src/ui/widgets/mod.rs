pub use self::{board_display::*, session_display::*};

mod board_display;
mod session_display;

mod color {
    use ratatui::style::Color;

    // Common colors as associated constants
    pub const WHITE: Color = Color::Rgb(255, 255, 255);
    pub const RED: Color = Color::Rgb(255, 0, 0);
    pub const YELLOW: Color = Color::Rgb(255, 255, 0);
    pub const DARK_TEXT: Color = Color::Rgb(119, 110, 101);
    pub const EMPTY_CELL: Color = Color::Rgb(205, 193, 180);
}

pub(crate) mod style {
    use ratatui::style::{Color, Style};

    use crate::ui::widgets::color;

    pub const DEFAULT: Style = Style::new().fg(Color::White).bg(Color::Black);
    pub const EMPTY: Style = Style::new().fg(color::EMPTY_CELL).bg(Color::Black);
    pub const CURSOR: Style = Style::new().fg(color::YELLOW).bg(Color::Black);

    /// Tile styling follows the classic warm palette: light tiles with dark
    /// text up to 4, then orange through gold, with everything past 2048
    /// collapsing to near-black.
    pub fn tile(value: u32) -> Style {
        let (fg, bg) = match value {
            2 => (color::DARK_TEXT, Color::Rgb(238, 228, 218)),
            4 => (color::DARK_TEXT, Color::Rgb(237, 224, 200)),
            8 => (color::WHITE, Color::Rgb(242, 177, 121)),
            16 => (color::WHITE, Color::Rgb(245, 149, 99)),
            32 => (color::WHITE, Color::Rgb(246, 124, 95)),
            64 => (color::WHITE, Color::Rgb(246, 94, 59)),
            128 => (color::WHITE, Color::Rgb(237, 207, 114)),
            256 => (color::WHITE, Color::Rgb(237, 204, 97)),
            512 => (color::WHITE, Color::Rgb(237, 200, 80)),
            1024 => (color::WHITE, Color::Rgb(237, 197, 63)),
            2048 => (color::WHITE, Color::Rgb(237, 194, 46)),
            _ => (color::WHITE, Color::Rgb(60, 58, 50)),
        };
        Style::new().fg(fg).bg(bg)
    }
}
