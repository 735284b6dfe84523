use ratatui::layout::Position;

use crate::geometry::SelectedPortion;
use crate::tree::MenuId;

/// Where a drag in progress would land if released now.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropKind {
    /// No meaningful target under the cursor.
    None,
    /// Insert as a sibling in the gap next to the target.
    InterMenu,
    /// Nest as a child of the target.
    IntoSubmenu,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DropTarget {
    pub node: MenuId,
    pub point: Position,
    pub kind: DropKind,
}

/// Single authoritative owner of selection and drop-target state.
///
/// Every mutator ends by raising the repaint flag; the render loop drains it
/// with [`DesignerState::take_repaint`]. All fields of the drop target are
/// replaced together, so readers never observe a half-updated tuple.
#[derive(Debug, Default, Clone)]
pub struct DesignerState {
    selected: Vec<MenuId>,
    portion: SelectedPortion,
    painted_selection: Option<MenuId>,
    drop: Option<DropTarget>,
    editing: Option<MenuId>,
    repaint_needed: bool,
}

impl DesignerState {
    pub fn new() -> Self {
        Self::default()
    }

    fn repaint(&mut self) {
        self.repaint_needed = true;
    }

    /// Drain the repaint flag; `true` means a redraw is due.
    pub fn take_repaint(&mut self) -> bool {
        let due = self.repaint_needed;
        self.repaint_needed = false;
        due
    }

    /// Raise the repaint flag for a change made outside this holder
    /// (e.g. the in-progress rename buffer).
    pub fn request_repaint(&mut self) {
        self.repaint();
    }

    /// Replace the drop target with an unknown-kind tuple.
    pub fn set_drop_target(&mut self, node: MenuId, point: Position) {
        self.set_drop_target_kind(node, point, DropKind::None);
    }

    /// Replace the whole drop-target tuple at once.
    pub fn set_drop_target_kind(&mut self, node: MenuId, point: Position, kind: DropKind) {
        self.drop = Some(DropTarget { node, point, kind });
        self.repaint();
    }

    pub fn clear_drop_target(&mut self) {
        self.drop = None;
        self.repaint();
    }

    pub fn drop_target(&self) -> Option<DropTarget> {
        self.drop
    }

    /// Rendering-level fast path: the single component the paint routine
    /// should treat as selected. Not domain selection state.
    pub fn set_selected_component(&mut self, id: Option<MenuId>) {
        self.painted_selection = id;
        self.repaint();
    }

    pub fn selected_component(&self) -> Option<MenuId> {
        self.painted_selection
    }

    /// Make `id` the sole selected node. Portion resets to `All`.
    pub fn select_only(&mut self, id: MenuId) {
        self.selected.clear();
        self.selected.push(id);
        self.portion = SelectedPortion::All;
        self.painted_selection = Some(id);
        self.repaint();
    }

    pub fn clear_selection(&mut self) {
        self.selected.clear();
        self.portion = SelectedPortion::All;
        self.painted_selection = None;
        self.repaint();
    }

    pub fn selection(&self) -> &[MenuId] {
        &self.selected
    }

    /// The selected node when exactly one is selected.
    pub fn single_selection(&self) -> Option<MenuId> {
        match self.selected.as_slice() {
            [one] => Some(*one),
            _ => None,
        }
    }

    /// Set the highlighted sub-region. Only meaningful for a single
    /// selection; with any other selection size the portion stays `All`.
    pub fn set_portion(&mut self, portion: SelectedPortion) {
        self.portion = if self.selected.len() == 1 {
            portion
        } else {
            SelectedPortion::All
        };
        self.repaint();
    }

    pub fn portion(&self) -> SelectedPortion {
        self.portion
    }

    /// Begin in-place renaming of `id`.
    pub fn begin_editing(&mut self, id: MenuId) {
        self.editing = Some(id);
        self.repaint();
    }

    pub fn finish_editing(&mut self) -> Option<MenuId> {
        let done = self.editing.take();
        if done.is_some() {
            self.repaint();
        }
        done
    }

    pub fn editing(&self) -> Option<MenuId> {
        self.editing
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::MenuTree;

    #[test]
    fn drop_target_replaced_atomically() {
        let mut tree = MenuTree::new();
        let a = tree.add_menu(tree.root(), "A").unwrap();
        let b = tree.add_menu(tree.root(), "B").unwrap();

        let mut s = DesignerState::new();
        s.set_drop_target_kind(a, Position::new(3, 0), DropKind::InterMenu);
        s.set_drop_target(b, Position::new(9, 0));
        let t = s.drop_target().unwrap();
        assert_eq!(t.node, b);
        assert_eq!(t.point, Position::new(9, 0));
        // the kind-less setter defaults the kind
        assert_eq!(t.kind, DropKind::None);
        s.clear_drop_target();
        assert!(s.drop_target().is_none());
    }

    #[test]
    fn every_mutation_requests_a_repaint() {
        let mut tree = MenuTree::new();
        let a = tree.add_menu(tree.root(), "A").unwrap();

        let mut s = DesignerState::new();
        assert!(!s.take_repaint());
        s.select_only(a);
        assert!(s.take_repaint());
        // drained
        assert!(!s.take_repaint());
        s.clear_drop_target();
        assert!(s.take_repaint());
    }

    #[test]
    fn portion_requires_a_single_selection() {
        let mut tree = MenuTree::new();
        let a = tree.add_menu(tree.root(), "A").unwrap();

        let mut s = DesignerState::new();
        s.set_portion(crate::geometry::SelectedPortion::Icon);
        assert_eq!(s.portion(), crate::geometry::SelectedPortion::All);
        s.select_only(a);
        s.set_portion(crate::geometry::SelectedPortion::Icon);
        assert_eq!(s.portion(), crate::geometry::SelectedPortion::Icon);
        // selecting again resets
        s.select_only(a);
        assert_eq!(s.portion(), crate::geometry::SelectedPortion::All);
    }
}
