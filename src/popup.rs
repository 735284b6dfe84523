//! Popup override layer.
//!
//! A real menu toolkit would open each submenu in its own toplevel popup
//! window, which would escape the designer canvas's paint pipeline and
//! z-order. Instead, submenu popups are redirected to lightweight in-canvas
//! panels tracked by the [`OpenSubmenuRegistry`], so overlay painting can
//! draw on top of an "open" submenu.
//!
//! The factory is an explicit strategy object threaded through the call
//! path, never a globally installed override: substitution stays local to
//! one designer canvas and is testable against a plain registry.

use std::collections::BTreeMap;

use ratatui::layout::Position;
use ratatui::prelude::Rect;

use crate::tree::{MenuId, MenuTree};

/// One in-canvas panel standing in for a submenu popup.
#[derive(Debug, Clone)]
pub struct PopupPanel {
    owner: MenuId,
    /// Outer panel rect in canvas coordinates, including the border.
    /// Recomputed by the layout pass; empty until the owner has been laid
    /// out at least once.
    rect: Rect,
    /// Realized children, stacked vertically in panel order.
    items: Vec<MenuId>,
}

impl PopupPanel {
    pub fn owner(&self) -> MenuId {
        self.owner
    }

    pub fn rect(&self) -> Rect {
        self.rect
    }

    pub fn items(&self) -> &[MenuId] {
        &self.items
    }
}

#[derive(Debug, Clone)]
struct PanelEntry {
    panel: PopupPanel,
    visible: bool,
}

/// Registry of submenu panels, keyed by the owning menu's id.
///
/// At most one panel may be visible among panels that are not on a common
/// ancestor chain: showing a panel force-hides every registered panel whose
/// owner is neither the shown menu nor one of its ancestors.
#[derive(Debug, Default, Clone)]
pub struct OpenSubmenuRegistry {
    entries: BTreeMap<MenuId, PanelEntry>,
}

impl OpenSubmenuRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn panel(&self, owner: MenuId) -> Option<&PopupPanel> {
        self.entries.get(&owner).map(|e| &e.panel)
    }

    pub fn is_registered(&self, owner: MenuId) -> bool {
        self.entries.contains_key(&owner)
    }

    pub fn is_visible(&self, owner: MenuId) -> bool {
        self.entries.get(&owner).is_some_and(|e| e.visible)
    }

    /// Owners of currently visible panels, in id order. Callers that need
    /// paint order sort by tree depth (ancestors first).
    pub fn visible_owners(&self) -> Vec<MenuId> {
        self.entries
            .iter()
            .filter_map(|(owner, e)| e.visible.then_some(*owner))
            .collect()
    }

    /// Hide every registered panel whose owner is neither `menu` nor an
    /// ancestor of `menu`. Opening a nested submenu therefore keeps its own
    /// parent chain open while closing unrelated branches and siblings.
    pub fn hide_other_menus(&mut self, tree: &MenuTree, menu: MenuId) {
        for (owner, entry) in self.entries.iter_mut() {
            if *owner != menu && !tree.is_ancestor(*owner, menu) {
                entry.visible = false;
            }
        }
    }

    pub fn hide_all(&mut self) {
        for entry in self.entries.values_mut() {
            entry.visible = false;
        }
    }

    /// Drop panels whose owner no longer exists in the tree.
    pub fn prune(&mut self, tree: &MenuTree) {
        self.entries.retain(|owner, _| tree.get(*owner).is_some());
    }

    pub(crate) fn set_rect(&mut self, owner: MenuId, rect: Rect) {
        if let Some(e) = self.entries.get_mut(&owner) {
            e.panel.rect = rect;
        }
    }

    pub(crate) fn refresh_items(&mut self, owner: MenuId, items: Vec<MenuId>) {
        if let Some(e) = self.entries.get_mut(&owner) {
            e.panel.items = items;
        }
    }

    fn show(&mut self, tree: &MenuTree, owner: MenuId) {
        self.hide_other_menus(tree, owner);
        if let Some(e) = self.entries.get_mut(&owner) {
            e.visible = true;
        }
    }
}

/// Panel anchor position per the cascading-menu rule: a nested submenu goes
/// to the right of its parent's bounds, a top-level menu's panel goes below
/// its bar item. An owner that has not been laid out yet anchors at its
/// zero-size bounds; the panel stays empty until the next layout pass.
pub fn location_for(tree: &MenuTree, owner: MenuId) -> Position {
    let bounds = tree.bounds(owner);
    let nested = tree
        .parent(owner)
        .is_some_and(|parent| parent != tree.root());
    if nested {
        Position::new(bounds.x.saturating_add(bounds.width), bounds.y)
    } else {
        Position::new(bounds.x, bounds.y.saturating_add(bounds.height))
    }
}

/// Handle to one submenu panel, as returned by a [`PopupFactory`].
#[derive(Debug, Clone, Copy)]
pub struct PopupHandle {
    owner: MenuId,
}

impl PopupHandle {
    pub fn owner(&self) -> MenuId {
        self.owner
    }

    /// Enforce mutual exclusion, then make the panel visible.
    pub fn show(&self, registry: &mut OpenSubmenuRegistry, tree: &MenuTree) {
        registry.show(tree, self.owner);
    }

    /// Deliberately a no-op. Panels are hidden only through the mutual
    /// exclusion in [`PopupHandle::show`] when a non-descendant opens;
    /// callers rely on this asymmetry for the cascading-menu effect.
    pub fn hide(&self) {}
}

/// Strategy for producing submenu popups.
pub trait PopupFactory {
    fn get_popup(
        &self,
        registry: &mut OpenSubmenuRegistry,
        tree: &MenuTree,
        owner: MenuId,
    ) -> PopupHandle;
}

/// The designer's factory: builds (or reuses) an in-canvas panel for the
/// owner and registers it, instead of opening a toplevel popup window.
#[derive(Debug, Default, Clone, Copy)]
pub struct DesignerPopupFactory;

impl PopupFactory for DesignerPopupFactory {
    fn get_popup(
        &self,
        registry: &mut OpenSubmenuRegistry,
        tree: &MenuTree,
        owner: MenuId,
    ) -> PopupHandle {
        if !registry.is_registered(owner) {
            let anchor = location_for(tree, owner);
            let panel = PopupPanel {
                owner,
                rect: Rect::new(anchor.x, anchor.y, 0, 0),
                items: tree.children(owner).to_vec(),
            };
            registry.entries.insert(
                owner,
                PanelEntry {
                    panel,
                    visible: false,
                },
            );
        }
        PopupHandle { owner }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::prelude::Rect;

    fn show(
        factory: &DesignerPopupFactory,
        registry: &mut OpenSubmenuRegistry,
        tree: &MenuTree,
        owner: MenuId,
    ) {
        let handle = factory.get_popup(registry, tree, owner);
        handle.show(registry, tree);
    }

    #[test]
    fn sibling_show_hides_the_other_branch() {
        let mut tree = MenuTree::new();
        let file = tree.add_menu(tree.root(), "File").unwrap();
        let edit = tree.add_menu(tree.root(), "Edit").unwrap();
        let factory = DesignerPopupFactory;
        let mut registry = OpenSubmenuRegistry::new();

        show(&factory, &mut registry, &tree, file);
        assert!(registry.is_visible(file));
        show(&factory, &mut registry, &tree, edit);
        assert!(!registry.is_visible(file));
        assert!(registry.is_visible(edit));
    }

    #[test]
    fn nested_show_keeps_the_ancestor_chain_open() {
        let mut tree = MenuTree::new();
        let file = tree.add_menu(tree.root(), "File").unwrap();
        let recent = tree.add_menu(file, "Recent").unwrap();
        let edit = tree.add_menu(tree.root(), "Edit").unwrap();
        let factory = DesignerPopupFactory;
        let mut registry = OpenSubmenuRegistry::new();

        show(&factory, &mut registry, &tree, file);
        show(&factory, &mut registry, &tree, edit);
        assert!(!registry.is_visible(file));
        show(&factory, &mut registry, &tree, file);
        show(&factory, &mut registry, &tree, recent);
        // opening a nested submenu does not close its own parent
        assert!(registry.is_visible(file));
        assert!(registry.is_visible(recent));
        assert!(!registry.is_visible(edit));
    }

    #[test]
    fn hide_is_a_no_op() {
        let mut tree = MenuTree::new();
        let file = tree.add_menu(tree.root(), "File").unwrap();
        let factory = DesignerPopupFactory;
        let mut registry = OpenSubmenuRegistry::new();

        let handle = factory.get_popup(&mut registry, &tree, file);
        handle.show(&mut registry, &tree);
        handle.hide();
        assert!(registry.is_visible(file));
    }

    #[test]
    fn panels_anchor_below_bar_items_and_right_of_nested_menus() {
        let mut tree = MenuTree::new();
        let file = tree.add_menu(tree.root(), "File").unwrap();
        let recent = tree.add_menu(file, "Recent").unwrap();
        tree.set_bounds(file, Rect::new(2, 0, 6, 1));
        tree.set_bounds(recent, Rect::new(3, 4, 14, 1));

        assert_eq!(location_for(&tree, file), Position::new(2, 1));
        assert_eq!(location_for(&tree, recent), Position::new(17, 4));
    }

    #[test]
    fn unrealized_owner_yields_an_empty_panel() {
        let mut tree = MenuTree::new();
        let file = tree.add_menu(tree.root(), "File").unwrap();
        let factory = DesignerPopupFactory;
        let mut registry = OpenSubmenuRegistry::new();

        show(&factory, &mut registry, &tree, file);
        let panel = registry.panel(file).unwrap();
        assert_eq!(panel.rect().width, 0);
        assert!(panel.items().is_empty());
    }
}
