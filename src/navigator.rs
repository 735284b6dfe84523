//! Keyboard navigator.
//!
//! Maps navigation actions onto selection-state transitions over the menu
//! tree. The navigator tracks the *current menu* (the container whose
//! children are being traversed) separately from the selected node within
//! it. No transition errors: out-of-range indices clamp at the tree root
//! and wrap at the ends of the top-level bar.

use crate::keybindings::Action;
use crate::popup::{OpenSubmenuRegistry, PopupFactory};
use crate::state::DesignerState;
use crate::tree::{MenuId, MenuTree};

#[derive(Debug, Clone, Copy)]
pub struct KeyboardNavigator {
    current_menu: MenuId,
}

impl KeyboardNavigator {
    pub fn new(tree: &MenuTree) -> Self {
        Self {
            current_menu: tree.root(),
        }
    }

    /// The container whose children Up/Down currently traverse. Always an
    /// existing node on the root's ancestor chain.
    pub fn current_menu(&self) -> MenuId {
        self.current_menu
    }

    /// Follow an out-of-band selection change (mouse click): make `menu`
    /// the container Up/Down traverse. Unknown ids are ignored.
    pub fn set_current_menu(&mut self, tree: &MenuTree, menu: MenuId) {
        if tree.get(menu).is_some() {
            self.current_menu = menu;
        }
    }

    /// Re-anchor at the bar if the current menu was removed from under us.
    fn ensure_valid(&mut self, tree: &MenuTree) {
        if tree.get(self.current_menu).is_none() {
            self.current_menu = tree.root();
        }
    }

    pub fn handle_action(
        &mut self,
        action: Action,
        tree: &MenuTree,
        state: &mut DesignerState,
        registry: &mut OpenSubmenuRegistry,
        factory: &dyn PopupFactory,
    ) -> bool {
        self.ensure_valid(tree);
        match action {
            Action::SelectNext => self.select_next(tree, state, registry),
            Action::SelectPrev => self.select_prev(tree, state, registry),
            Action::NavLeft => self.nav_left(tree, state, registry),
            Action::NavRight => self.nav_right(tree, state, registry, factory),
            Action::SiblingCycleNext => self.sibling_cycle(1, tree, state, registry),
            Action::SiblingCyclePrev => self.sibling_cycle(-1, tree, state, registry),
            Action::EditLabel => {
                let Some(sel) = state.single_selection() else {
                    return false;
                };
                state.begin_editing(sel);
            }
            _ => return false,
        }
        true
    }

    /// Select `id` and close submenu branches unrelated to it.
    fn select(
        &mut self,
        tree: &MenuTree,
        state: &mut DesignerState,
        registry: &mut OpenSubmenuRegistry,
        id: MenuId,
    ) {
        state.select_only(id);
        registry.hide_other_menus(tree, id);
    }

    /// Index of the selection within the current menu, if it lives there.
    fn selected_index_here(&self, tree: &MenuTree, state: &DesignerState) -> Option<usize> {
        let sel = state.single_selection()?;
        if tree.parent(sel)? != self.current_menu {
            return None;
        }
        tree.child_index(sel)
    }

    fn select_next(
        &mut self,
        tree: &MenuTree,
        state: &mut DesignerState,
        registry: &mut OpenSubmenuRegistry,
    ) {
        let children = tree.children(self.current_menu);
        let Some(idx) = self.selected_index_here(tree, state) else {
            if let Some(first) = children.first().copied() {
                self.select(tree, state, registry, first);
            }
            return;
        };
        if let Some(next) = children.get(idx + 1).copied() {
            self.select(tree, state, registry, next);
            return;
        }
        // Past the end: go up one level and continue from there. Iterative
        // so the walk terminates at the bar root instead of recursing.
        let mut node = self.current_menu;
        while let Some(parent) = tree.parent(node) {
            if let Some(next) = tree.next_sibling(node) {
                self.current_menu = parent;
                self.select(tree, state, registry, next);
                return;
            }
            node = parent;
        }
        // Last sibling of the bar itself: clamp.
    }

    fn select_prev(
        &mut self,
        tree: &MenuTree,
        state: &mut DesignerState,
        registry: &mut OpenSubmenuRegistry,
    ) {
        let children = tree.children(self.current_menu);
        let Some(idx) = self.selected_index_here(tree, state) else {
            if let Some(last) = children.last().copied() {
                self.select(tree, state, registry, last);
            }
            return;
        };
        if idx > 0 {
            let prev = children[idx - 1];
            self.select(tree, state, registry, prev);
        } else {
            self.go_up_one_level(tree, state, registry);
        }
    }

    /// Escape the current submenu: the submenu header itself becomes the
    /// selection, and its container becomes the current menu. No-op at the
    /// bar root.
    pub fn go_up_one_level(
        &mut self,
        tree: &MenuTree,
        state: &mut DesignerState,
        registry: &mut OpenSubmenuRegistry,
    ) {
        let Some(parent) = tree.parent(self.current_menu) else {
            return;
        };
        let header = self.current_menu;
        self.current_menu = parent;
        self.select(tree, state, registry, header);
    }

    fn nav_right(
        &mut self,
        tree: &MenuTree,
        state: &mut DesignerState,
        registry: &mut OpenSubmenuRegistry,
        factory: &dyn PopupFactory,
    ) {
        if let Some(sel) = state.single_selection()
            && tree.is_submenu(sel)
        {
            self.descend(tree, state, registry, factory, sel);
            return;
        }
        self.move_top_level(1, tree, state, registry);
    }

    fn nav_left(
        &mut self,
        tree: &MenuTree,
        state: &mut DesignerState,
        registry: &mut OpenSubmenuRegistry,
    ) {
        if self.current_menu != tree.root() {
            self.go_up_one_level(tree, state, registry);
            return;
        }
        self.move_top_level(-1, tree, state, registry);
    }

    /// Enter `menu`: its popup panel opens and its first child (if any)
    /// becomes the selection.
    pub fn descend(
        &mut self,
        tree: &MenuTree,
        state: &mut DesignerState,
        registry: &mut OpenSubmenuRegistry,
        factory: &dyn PopupFactory,
        menu: MenuId,
    ) {
        self.current_menu = menu;
        let handle = factory.get_popup(registry, tree, menu);
        handle.show(registry, tree);
        if let Some(first) = tree.children(menu).first().copied() {
            self.select(tree, state, registry, first);
        } else {
            self.select(tree, state, registry, menu);
        }
    }

    /// Move across the top-level bar menus, wrapping at both ends.
    fn move_top_level(
        &mut self,
        step: isize,
        tree: &MenuTree,
        state: &mut DesignerState,
        registry: &mut OpenSubmenuRegistry,
    ) {
        let bar = tree.children(tree.root());
        if bar.is_empty() {
            return;
        }
        let idx = state
            .single_selection()
            .map(|sel| tree.top_level_ancestor(sel))
            .and_then(|top| bar.iter().position(|c| *c == top));
        let next = match idx {
            Some(idx) => ((idx as isize + step).rem_euclid(bar.len() as isize)) as usize,
            None => 0,
        };
        self.current_menu = tree.root();
        let target = bar[next];
        self.select(tree, state, registry, target);
    }

    /// Cycle the selection among its actual siblings, wrapping.
    fn sibling_cycle(
        &mut self,
        step: isize,
        tree: &MenuTree,
        state: &mut DesignerState,
        registry: &mut OpenSubmenuRegistry,
    ) {
        let Some(sel) = state.single_selection() else {
            self.move_top_level(step, tree, state, registry);
            return;
        };
        let Some(parent) = tree.parent(sel) else {
            return;
        };
        let siblings = tree.children(parent);
        let Some(idx) = siblings.iter().position(|c| *c == sel) else {
            return;
        };
        let next = ((idx as isize + step).rem_euclid(siblings.len() as isize)) as usize;
        self.current_menu = parent;
        let target = siblings[next];
        self.select(tree, state, registry, target);
    }
}
