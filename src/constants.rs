//! Shared crate-wide constants.

/// Edge-zone width (in canvas cells) on a top-level menu-bar item.
///
/// A horizontal drop gesture landing within this many cells of the item's
/// left or right edge means "insert before" / "insert after" rather than
/// "merge into the menu". Units: canvas cells.
pub const BAR_EDGE_MARGIN: u16 = 8;

/// Edge-zone width (in canvas cells) on the right side of a submenu item.
///
/// Submenu rows are wider than bar titles and carry the accelerator column
/// on the right, so the "nest into this submenu" zone stops well before the
/// right edge. Units: canvas cells.
pub const SUBMENU_EDGE_MARGIN: u16 = 30;

/// Minimum inner width of a submenu panel so short labels still leave room
/// for the icon and accelerator gutters.
pub const PANEL_MIN_INNER_WIDTH: u16 = 12;

/// Horizontal padding on each side of a top-level menu title on the bar.
pub const BAR_TITLE_PAD: u16 = 1;
