use clap::ValueEnum;
use ratatui::style::Color;

// Centralized theme colors. Kept as small helpers so swapping palettes
// stays a one-file change.

pub fn bar_bg() -> Color {
    Color::DarkGray
}
pub fn bar_fg() -> Color {
    Color::White
}
pub fn bar_selected_bg() -> Color {
    Color::Gray
}
pub fn bar_selected_fg() -> Color {
    Color::Black
}

// Submenu panels
pub fn panel_bg() -> Color {
    Color::DarkGray
}
pub fn panel_fg() -> Color {
    Color::White
}
pub fn panel_border() -> Color {
    Color::Gray
}
pub fn item_selected_bg() -> Color {
    Color::Gray
}
pub fn item_selected_fg() -> Color {
    Color::Black
}

// Designer overlays
pub fn drop_guide() -> Color {
    Color::Yellow
}
pub fn drop_outline() -> Color {
    Color::Yellow
}
pub fn portion_highlight_bg() -> Color {
    Color::Cyan
}
pub fn portion_highlight_fg() -> Color {
    Color::Black
}

/// Per-skin fixed gutter metrics, in canvas cells.
///
/// These mirror the fixed per-look-and-feel offsets a menu item is drawn
/// with: an icon column on the left, an accelerator column on the right.
/// They are an approximation shared by every item of a skin, not a measured
/// layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Skin {
    /// Compact single-cell icon column.
    Plain,
    /// Wider columns, closer to a desktop menu with 16px icons.
    Wide,
}

impl Skin {
    /// Width of the icon column when the item carries an icon.
    pub fn icon_gutter(self) -> u16 {
        match self {
            Skin::Plain => 2,
            Skin::Wide => 4,
        }
    }

    /// Width of the leading inset when the item has no icon.
    pub fn no_icon_gutter(self) -> u16 {
        match self {
            Skin::Plain => 1,
            Skin::Wide => 2,
        }
    }

    /// Width of the accelerator column when the item carries one.
    pub fn accel_gutter(self) -> u16 {
        match self {
            Skin::Plain => 8,
            Skin::Wide => 10,
        }
    }
}
