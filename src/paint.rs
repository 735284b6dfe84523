//! Overlay painting.
//!
//! A pure rendering step: consumes the selection/drop-target state, the
//! open-submenu registry and the bounds of the current layout pass, and
//! draws the menu bar, visible panels, drop guides and selection
//! highlights. No state is mutated; all geometry is read from the live
//! tree, never cached.

use ratatui::prelude::Rect;
use ratatui::style::Style;

use crate::canvas::CanvasFrame;
use crate::geometry::{self, SelectedPortion};
use crate::popup::OpenSubmenuRegistry;
use crate::state::{DesignerState, DropKind};
use crate::theme::{self, Skin};
use crate::tree::{MenuId, MenuTree, NodeKind};

/// Everything one frame of painting consumes.
pub struct Scene<'a> {
    pub tree: &'a MenuTree,
    pub state: &'a DesignerState,
    pub registry: &'a OpenSubmenuRegistry,
    pub skin: Skin,
    /// Node currently being dragged, if any. While it is a separator the
    /// sub-region highlight layer stays suspended.
    pub drag_payload: Option<MenuId>,
    /// In-progress rename text for the node in `state.editing()`.
    pub edit_text: Option<&'a str>,
}

pub fn render(frame: &mut CanvasFrame<'_>, scene: &Scene<'_>) {
    render_bar(frame, scene);
    for owner in panels_in_paint_order(scene) {
        render_panel(frame, scene, owner);
    }
    render_overlays(frame, scene);
}

fn panels_in_paint_order(scene: &Scene<'_>) -> Vec<MenuId> {
    let mut owners = scene.registry.visible_owners();
    owners.sort_by_key(|owner| {
        let mut depth = 0usize;
        let mut cur = *owner;
        while let Some(p) = scene.tree.parent(cur) {
            depth += 1;
            cur = p;
        }
        depth
    });
    owners
}

fn fill(frame: &mut CanvasFrame<'_>, rect: Rect, style: Style) {
    let clipped = rect.intersection(frame.area());
    if clipped.width > 0 && clipped.height > 0 {
        frame.buffer_mut().set_style(clipped, style);
    }
}

fn render_bar(frame: &mut CanvasFrame<'_>, scene: &Scene<'_>) {
    let tree = scene.tree;
    let bar = tree.bounds(tree.root());
    fill(
        frame,
        bar,
        Style::default().bg(theme::bar_bg()).fg(theme::bar_fg()),
    );
    for id in tree.children(tree.root()) {
        let rect = tree.bounds(*id);
        if rect.width == 0 {
            continue;
        }
        let selected = scene.state.selected_component() == Some(*id);
        let style = if selected {
            Style::default()
                .bg(theme::bar_selected_bg())
                .fg(theme::bar_selected_fg())
        } else {
            Style::default().bg(theme::bar_bg()).fg(theme::bar_fg())
        };
        fill(frame, rect, style);
        let label = display_label(scene, *id);
        frame.set_string(rect.x.saturating_add(1), rect.y, &label, style);
    }
}

fn display_label(scene: &Scene<'_>, id: MenuId) -> String {
    if scene.state.editing() == Some(id)
        && let Some(text) = scene.edit_text
    {
        // trailing cell marks the insertion point
        return format!("{}_", text);
    }
    scene
        .tree
        .get(id)
        .map(|n| n.label().to_string())
        .unwrap_or_default()
}

fn render_panel(frame: &mut CanvasFrame<'_>, scene: &Scene<'_>, owner: MenuId) {
    let Some(panel) = scene.registry.panel(owner) else {
        return;
    };
    let rect = panel.rect();
    if rect.width < 2 || rect.height < 2 {
        return;
    }
    fill(
        frame,
        rect,
        Style::default().bg(theme::panel_bg()).fg(theme::panel_fg()),
    );
    outline_rect(frame, rect, Style::default().fg(theme::panel_border()));

    for id in panel.items() {
        let Some(node) = scene.tree.get(*id) else {
            continue;
        };
        let row = node.bounds();
        if row.height == 0 || row.width == 0 {
            continue;
        }
        let selected = scene.state.selected_component() == Some(*id);
        let style = if selected {
            Style::default()
                .bg(theme::item_selected_bg())
                .fg(theme::item_selected_fg())
        } else {
            Style::default().bg(theme::panel_bg()).fg(theme::panel_fg())
        };
        fill(frame, row, style);
        if node.kind() == NodeKind::Separator {
            let line = "─".repeat(row.width as usize);
            frame.set_string(row.x, row.y, &line, style);
            continue;
        }
        if node.has_icon() {
            frame.set_string(row.x, row.y, "•", style);
        }
        let leading = if node.has_icon() {
            scene.skin.icon_gutter()
        } else {
            scene.skin.no_icon_gutter()
        };
        let label = display_label(scene, *id);
        frame.set_string(row.x.saturating_add(leading), row.y, &label, style);
        if let Some(accel) = node.accelerator() {
            let accel_w = (accel.chars().count() as u16).min(scene.skin.accel_gutter());
            let x = row
                .x
                .saturating_add(row.width)
                .saturating_sub(accel_w);
            frame.set_string(x, row.y, accel, style);
        }
    }
}

fn render_overlays(frame: &mut CanvasFrame<'_>, scene: &Scene<'_>) {
    // (a) highlight around the selected or targeted top-level menu
    let top = scene
        .state
        .drop_target()
        .map(|t| t.node)
        .or(scene.state.selected_component())
        .map(|id| scene.tree.top_level_ancestor(id));
    if let Some(top) = top
        && scene.tree.parent(top).is_some()
    {
        let rect = scene.tree.bounds(top);
        fill(
            frame,
            rect,
            Style::default()
                .bg(theme::bar_selected_bg())
                .fg(theme::bar_selected_fg()),
        );
    }

    if let Some(target) = scene.state.drop_target() {
        let bounds = scene.tree.bounds(target.node);
        match target.kind {
            DropKind::InterMenu => render_insertion_guide(frame, scene, target.node, target.point),
            DropKind::IntoSubmenu => {
                if bounds.height >= 2 {
                    outline_rect(frame, bounds, Style::default().fg(theme::drop_outline()));
                } else {
                    fill(frame, bounds, Style::default().bg(theme::drop_outline()));
                }
            }
            DropKind::None => {}
        }
    }

    render_portion_highlight(frame, scene);
}

/// Insertion guide for an inter-item gap: a vertical line at the left or
/// right edge for bar targets, a horizontal line above or below for panel
/// rows.
fn render_insertion_guide(
    frame: &mut CanvasFrame<'_>,
    scene: &Scene<'_>,
    node: MenuId,
    point: ratatui::layout::Position,
) {
    let bounds = scene.tree.bounds(node);
    if bounds.width == 0 {
        return;
    }
    let style = Style::default().fg(theme::drop_guide());
    let on_bar = scene.tree.parent(node) == Some(scene.tree.root());
    if on_bar {
        let local_x = point.x as i32 - bounds.x as i32;
        let x = if geometry::is_left_edge(local_x) {
            bounds.x
        } else {
            bounds.x.saturating_add(bounds.width.saturating_sub(1))
        };
        for y in bounds.y..bounds.y.saturating_add(bounds.height) {
            if let Some(cell) = frame.cell_mut(x, y) {
                cell.set_symbol("┃");
                cell.set_style(style);
            }
        }
    } else {
        let local_y = point.y as i32 - bounds.y as i32;
        let y = if geometry::is_below_item(local_y, bounds.height) {
            bounds.y.saturating_add(bounds.height)
        } else {
            bounds.y.saturating_sub(1)
        };
        for x in bounds.x..bounds.x.saturating_add(bounds.width) {
            if let Some(cell) = frame.cell_mut(x, y) {
                cell.set_symbol("━");
                cell.set_style(style);
            }
        }
    }
}

fn render_portion_highlight(frame: &mut CanvasFrame<'_>, scene: &Scene<'_>) {
    // While a separator is being dragged the handle layer underneath it is
    // suspended, so skip the sub-region box.
    if let Some(payload) = scene.drag_payload
        && scene
            .tree
            .get(payload)
            .is_some_and(|n| n.kind() == NodeKind::Separator)
    {
        return;
    }
    let Some(sel) = scene.state.single_selection() else {
        return;
    };
    // Sub-region bands only exist on panel rows; bar titles and whole-item
    // selections are already shown by the selection tint.
    match scene.tree.parent(sel) {
        Some(p) if p != scene.tree.root() => {}
        _ => return,
    }
    let bounds = scene.tree.bounds(sel);
    if bounds.width == 0 || bounds.height == 0 {
        return;
    }
    let metrics = crate::layout::item_metrics(scene.tree, sel);
    let rect = match scene.state.portion() {
        SelectedPortion::All => return,
        SelectedPortion::Icon => {
            let edge = geometry::icon_right_edge(scene.skin, metrics);
            if edge < 0 {
                return;
            }
            Rect::new(bounds.x, bounds.y, (edge + 1) as u16, bounds.height)
        }
        SelectedPortion::Text => {
            let start = geometry::icon_right_edge(scene.skin, metrics) + 1;
            let end = geometry::accelerator_left_edge(scene.skin, metrics);
            if end < start {
                return;
            }
            Rect::new(
                bounds.x.saturating_add(start as u16),
                bounds.y,
                (end - start + 1) as u16,
                bounds.height,
            )
        }
        SelectedPortion::Accelerator => {
            if !metrics.has_accelerator {
                return;
            }
            let start = geometry::accelerator_left_edge(scene.skin, metrics) + 1;
            Rect::new(
                bounds.x.saturating_add(start.max(0) as u16),
                bounds.y,
                bounds.width.saturating_sub(start.max(0) as u16),
                bounds.height,
            )
        }
    };
    fill(
        frame,
        rect,
        Style::default()
            .bg(theme::portion_highlight_bg())
            .fg(theme::portion_highlight_fg()),
    );
}

/// Draw a single-line rectangle outline, clipped to the canvas.
fn outline_rect(frame: &mut CanvasFrame<'_>, rect: Rect, style: Style) {
    if rect.width == 0 || rect.height == 0 {
        return;
    }
    let right = rect.x.saturating_add(rect.width.saturating_sub(1));
    let bottom = rect.y.saturating_add(rect.height.saturating_sub(1));
    for x in rect.x..=right {
        for (y, sym) in [(rect.y, "─"), (bottom, "─")] {
            if let Some(cell) = frame.cell_mut(x, y) {
                cell.set_symbol(sym);
                cell.set_style(style);
            }
        }
    }
    for y in rect.y..=bottom {
        for (x, sym) in [(rect.x, "│"), (right, "│")] {
            if let Some(cell) = frame.cell_mut(x, y) {
                cell.set_symbol(sym);
                cell.set_style(style);
            }
        }
    }
    for (x, y, sym) in [
        (rect.x, rect.y, "┌"),
        (right, rect.y, "┐"),
        (rect.x, bottom, "└"),
        (right, bottom, "┘"),
    ] {
        if let Some(cell) = frame.cell_mut(x, y) {
            cell.set_symbol(sym);
            cell.set_style(style);
        }
    }
}
