//! Per-frame bounds computation.
//!
//! Visual bounds live on the tree nodes but are owned by this pass: every
//! frame recomputes the bar row, the rects of visible submenu panels
//! (cascading per the popup positioning rule), and the per-item rows inside
//! each panel. Nothing here is cached between frames, so painting and
//! hit-testing always see geometry consistent with the latest tree.

use ratatui::prelude::Rect;

use crate::constants::{BAR_TITLE_PAD, PANEL_MIN_INNER_WIDTH};
use crate::geometry::ItemMetrics;
use crate::popup::{OpenSubmenuRegistry, location_for};
use crate::theme::Skin;
use crate::tree::{MenuId, MenuTree};

fn label_width(tree: &MenuTree, id: MenuId) -> u16 {
    tree.get(id)
        .map(|n| n.label().chars().count() as u16)
        .unwrap_or(0)
}

fn depth(tree: &MenuTree, id: MenuId) -> usize {
    let mut d = 0;
    let mut cur = id;
    while let Some(p) = tree.parent(cur) {
        d += 1;
        cur = p;
    }
    d
}

/// Width one panel row needs for `id`: leading gutter, label, and the
/// accelerator column when the item carries one.
fn required_item_width(tree: &MenuTree, skin: Skin, id: MenuId) -> u16 {
    let Some(node) = tree.get(id) else {
        return 0;
    };
    let leading = if node.has_icon() {
        skin.icon_gutter()
    } else {
        skin.no_icon_gutter()
    };
    let trailing = if node.accelerator().is_some() {
        // one separating cell before the accelerator column
        skin.accel_gutter().saturating_add(1)
    } else {
        0
    };
    leading
        .saturating_add(label_width(tree, id))
        .saturating_add(trailing)
}

/// Rendered metrics of `id` for the geometry classifier, derived from the
/// bounds of the current pass.
pub fn item_metrics(tree: &MenuTree, id: MenuId) -> ItemMetrics {
    let bounds = tree.bounds(id);
    let (has_icon, has_accelerator) = tree
        .get(id)
        .map(|n| (n.has_icon(), n.accelerator().is_some()))
        .unwrap_or((false, false));
    ItemMetrics {
        width: bounds.width,
        height: bounds.height,
        has_icon,
        has_accelerator,
    }
}

/// Recompute all visual bounds for one frame.
///
/// The bar occupies the top row of `area`. Visible panels are laid out
/// ancestors-first so a nested panel can anchor on its parent's freshly
/// computed item bounds.
pub fn layout_pass(
    tree: &mut MenuTree,
    registry: &mut OpenSubmenuRegistry,
    skin: Skin,
    area: Rect,
) {
    layout_bar(tree, area);

    let mut owners = registry.visible_owners();
    owners.sort_by_key(|owner| depth(tree, *owner));
    for owner in owners {
        layout_panel(tree, registry, skin, area, owner);
    }
}

fn layout_bar(tree: &mut MenuTree, area: Rect) {
    tree.set_bounds(tree.root(), Rect::new(area.x, area.y, area.width, 1));
    let mut x = area.x;
    let right = area.x.saturating_add(area.width);
    let bar: Vec<MenuId> = tree.children(tree.root()).to_vec();
    for id in bar {
        let width = label_width(tree, id).saturating_add(BAR_TITLE_PAD * 2);
        let width = width.min(right.saturating_sub(x));
        tree.set_bounds(id, Rect::new(x, area.y, width, 1));
        x = x.saturating_add(width);
    }
}

fn layout_panel(
    tree: &mut MenuTree,
    registry: &mut OpenSubmenuRegistry,
    skin: Skin,
    area: Rect,
    owner: MenuId,
) {
    let items: Vec<MenuId> = tree.children(owner).to_vec();
    registry.refresh_items(owner, items.clone());

    let inner_width = items
        .iter()
        .map(|id| required_item_width(tree, skin, *id))
        .max()
        .unwrap_or(0)
        .max(PANEL_MIN_INNER_WIDTH);
    let outer_width = inner_width.saturating_add(2);
    let outer_height = (items.len() as u16).saturating_add(2);

    let anchor = location_for(tree, owner);
    // Keep the panel on the canvas; shift left/up rather than clipping
    // content away.
    let max_x = area
        .x
        .saturating_add(area.width)
        .saturating_sub(outer_width.min(area.width));
    let max_y = area
        .y
        .saturating_add(area.height)
        .saturating_sub(outer_height.min(area.height));
    let rect = Rect::new(
        anchor.x.min(max_x),
        anchor.y.min(max_y),
        outer_width.min(area.width),
        outer_height.min(area.height),
    );
    registry.set_rect(owner, rect);

    let inner_x = rect.x.saturating_add(1);
    let inner_width = rect.width.saturating_sub(2);
    for (i, id) in items.iter().enumerate() {
        let y = rect.y.saturating_add(1).saturating_add(i as u16);
        let visible_row = y < rect.y.saturating_add(rect.height.saturating_sub(1));
        let height = if visible_row { 1 } else { 0 };
        tree.set_bounds(*id, Rect::new(inner_x, y, inner_width, height));
    }
}
