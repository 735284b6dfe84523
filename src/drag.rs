//! Drag-and-drop target resolution.
//!
//! Pure hit-testing from a canvas point to the `(node, kind)` pair the
//! designer state holder stores. Panels layer above the bar, so they are
//! tested first, deepest panel first. Drop application is the only place a
//! drag mutates the tree.

use ratatui::layout::Position;

use crate::geometry;
use crate::popup::OpenSubmenuRegistry;
use crate::state::DropKind;
use crate::tree::{MenuId, MenuTree, TreeError};

/// The visible item under `point`, panels before the bar.
pub fn hit_test(
    tree: &MenuTree,
    registry: &OpenSubmenuRegistry,
    point: Position,
) -> Option<MenuId> {
    let mut owners = registry.visible_owners();
    // Deepest panel first: a nested panel overlaps its parent's right edge.
    owners.sort_by_key(|owner| {
        let mut depth = 0usize;
        let mut cur = *owner;
        while let Some(p) = tree.parent(cur) {
            depth += 1;
            cur = p;
        }
        usize::MAX - depth
    });
    for owner in owners {
        let Some(panel) = registry.panel(owner) else {
            continue;
        };
        if !panel.rect().contains(point) {
            continue;
        }
        for id in panel.items() {
            if tree.bounds(*id).contains(point) {
                return Some(*id);
            }
        }
        // panel chrome: swallows the point without naming a target
        return None;
    }
    tree.children(tree.root())
        .iter()
        .copied()
        .find(|id| tree.bounds(*id).contains(point))
}

/// Classify where a drag at `point` would land.
///
/// Bar items: the 8-cell edge zones mean "insert before/after" (inter-menu
/// gap), the center means "merge into the menu". Panel rows: a submenu row
/// hovered inside its wide right-edge zone nests the payload; everything
/// else is an inter-item gap.
pub fn resolve_drop(
    tree: &MenuTree,
    registry: &OpenSubmenuRegistry,
    point: Position,
) -> Option<(MenuId, DropKind)> {
    let target = hit_test(tree, registry, point)?;
    let bounds = tree.bounds(target);
    let local_x = point.x as i32 - bounds.x as i32;
    let kind = if tree.parent(target) == Some(tree.root()) {
        if geometry::is_left_edge(local_x) || geometry::is_bar_right_edge(local_x, bounds.width) {
            DropKind::InterMenu
        } else {
            DropKind::IntoSubmenu
        }
    } else if tree.is_submenu(target) && geometry::is_submenu_right_edge(local_x, bounds.width) {
        DropKind::IntoSubmenu
    } else {
        DropKind::InterMenu
    };
    Some((target, kind))
}

/// Apply a finished drag: move `payload` to where `target`/`kind`/`point`
/// resolve. The sibling-gap side comes from the same edge and half-height
/// tests the guides render with. A payload dropped into its own subtree is
/// refused and nothing moves.
pub fn apply_drop(
    tree: &mut MenuTree,
    payload: MenuId,
    target: MenuId,
    kind: DropKind,
    point: Position,
) -> Result<(), TreeError> {
    match kind {
        DropKind::None => Ok(()),
        DropKind::IntoSubmenu => {
            let index = tree.children(target).len();
            tree.move_node(payload, target, index)
        }
        DropKind::InterMenu => {
            let parent = tree.parent(target).ok_or(TreeError::UnknownNode(target))?;
            let index = tree.child_index(target).unwrap_or(0);
            let bounds = tree.bounds(target);
            let after = if parent == tree.root() {
                let local_x = point.x as i32 - bounds.x as i32;
                !geometry::is_left_edge(local_x)
            } else {
                let local_y = point.y as i32 - bounds.y as i32;
                geometry::is_below_item(local_y, bounds.height)
            };
            let index = if after { index + 1 } else { index };
            tree.move_node(payload, parent, index)
        }
    }
}
