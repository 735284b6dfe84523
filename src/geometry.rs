//! Pure point/region classification for menu items.
//!
//! Everything in this module is a free function over plain geometry inputs:
//! no canvas access, no state. Points are item-local (cell coordinates
//! relative to the item's top-left corner) and signed so callers can pass
//! positions that drifted outside the item without pre-clamping.

use crate::constants::{BAR_EDGE_MARGIN, SUBMENU_EDGE_MARGIN};
use crate::theme::Skin;

/// Which visual band of a menu item a point (or a selection highlight)
/// refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SelectedPortion {
    Icon,
    Text,
    Accelerator,
    /// The whole item. Also the fallback for points outside the item.
    #[default]
    All,
}

/// Rendered metrics of one menu item, as laid out by the current pass.
#[derive(Debug, Clone, Copy)]
pub struct ItemMetrics {
    pub width: u16,
    pub height: u16,
    pub has_icon: bool,
    pub has_accelerator: bool,
}

/// Rightmost cell of the icon band, or -1 when the item has no icon band.
pub fn icon_right_edge(skin: Skin, metrics: ItemMetrics) -> i32 {
    if metrics.has_icon {
        skin.icon_gutter() as i32 - 1
    } else {
        -1
    }
}

/// Rightmost cell still belonging to the text band; cells to its right are
/// the accelerator band. Equals `width - 1` when there is no accelerator.
pub fn accelerator_left_edge(skin: Skin, metrics: ItemMetrics) -> i32 {
    let width = metrics.width as i32;
    if metrics.has_accelerator {
        width - skin.accel_gutter() as i32 - 1
    } else {
        width - 1
    }
}

/// Classify which band of `metrics` the item-local point `(x, y)` falls in.
///
/// The icon boundary is inclusive (`x <= icon_right` is Icon) while the
/// accelerator boundary is exclusive (`x == accel_left` is still Text).
/// Points outside the item rectangle classify as `All`.
pub fn classify_portion(skin: Skin, metrics: ItemMetrics, x: i32, y: i32) -> SelectedPortion {
    if x < 0 || y < 0 || x >= metrics.width as i32 || y >= metrics.height as i32 {
        return SelectedPortion::All;
    }
    if x <= icon_right_edge(skin, metrics) {
        SelectedPortion::Icon
    } else if x > accelerator_left_edge(skin, metrics) {
        SelectedPortion::Accelerator
    } else {
        SelectedPortion::Text
    }
}

/// True when an item-local x sits in the left edge zone of a bar item.
pub fn is_left_edge(x: i32) -> bool {
    x < BAR_EDGE_MARGIN as i32
}

/// True when an item-local x sits in the right edge zone of a bar item.
pub fn is_bar_right_edge(x: i32, width: u16) -> bool {
    x > width as i32 - BAR_EDGE_MARGIN as i32
}

/// True when an item-local x sits in the right edge zone of a submenu row.
/// Submenu rows use a wider margin than bar titles.
pub fn is_submenu_right_edge(x: i32, width: u16) -> bool {
    x > width as i32 - SUBMENU_EDGE_MARGIN as i32
}

/// True when an item-local y is in the lower half of the item, meaning an
/// inter-item drop gap renders below it rather than above.
pub fn is_below_item(y: i32, height: u16) -> bool {
    y > height as i32 / 2
}

#[cfg(test)]
mod tests {
    use super::*;

    fn metrics(width: u16, icon: bool, accel: bool) -> ItemMetrics {
        ItemMetrics {
            width,
            height: 1,
            has_icon: icon,
            has_accelerator: accel,
        }
    }

    #[test]
    fn icon_boundary_is_inclusive() {
        let skin = Skin::Plain;
        let m = metrics(40, true, true);
        let edge = icon_right_edge(skin, m);
        assert_eq!(classify_portion(skin, m, edge, 0), SelectedPortion::Icon);
        assert_eq!(
            classify_portion(skin, m, edge + 1, 0),
            SelectedPortion::Text
        );
    }

    #[test]
    fn accelerator_boundary_is_exclusive() {
        let skin = Skin::Plain;
        let m = metrics(40, true, true);
        let edge = accelerator_left_edge(skin, m);
        assert_eq!(classify_portion(skin, m, edge, 0), SelectedPortion::Text);
        assert_eq!(
            classify_portion(skin, m, edge + 1, 0),
            SelectedPortion::Accelerator
        );
    }

    #[test]
    fn missing_icon_removes_the_icon_band() {
        let skin = Skin::Plain;
        let m = metrics(40, false, true);
        assert_eq!(classify_portion(skin, m, 0, 0), SelectedPortion::Text);
    }

    #[test]
    fn missing_accelerator_keeps_text_to_the_right_edge() {
        let skin = Skin::Plain;
        let m = metrics(40, true, false);
        assert_eq!(classify_portion(skin, m, 39, 0), SelectedPortion::Text);
    }

    #[test]
    fn out_of_range_points_fall_back_to_all() {
        let skin = Skin::Plain;
        let m = metrics(40, true, true);
        assert_eq!(classify_portion(skin, m, -1, 0), SelectedPortion::All);
        assert_eq!(classify_portion(skin, m, 40, 0), SelectedPortion::All);
        assert_eq!(classify_portion(skin, m, 5, 3), SelectedPortion::All);
    }

    #[test]
    fn bar_edge_zones() {
        assert!(is_left_edge(0));
        assert!(is_left_edge(7));
        assert!(!is_left_edge(8));
        assert!(!is_bar_right_edge(32, 40));
        assert!(is_bar_right_edge(33, 40));
    }

    #[test]
    fn submenu_right_margin_is_wider() {
        // width 40: bar zone starts after 32, submenu zone after 10
        assert!(is_submenu_right_edge(11, 40));
        assert!(!is_submenu_right_edge(10, 40));
        assert!(!is_bar_right_edge(11, 40));
    }

    #[test]
    fn below_item_uses_the_half_height() {
        assert!(!is_below_item(1, 3));
        assert!(is_below_item(2, 3));
        assert!(!is_below_item(0, 1));
        assert!(is_below_item(1, 1));
    }
}
