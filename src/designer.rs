//! The designer facade.
//!
//! Owns the tree, the selection/drop-target state, the open-submenu
//! registry and the keyboard navigator, and routes input events between
//! them. This is the only type the demo binary talks to.

use crossterm::event::{Event, KeyCode, KeyEvent, MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::Position;
use ratatui::prelude::Rect;
use tracing::debug;

use crate::canvas::CanvasFrame;
use crate::drag::{apply_drop, hit_test, resolve_drop};
use crate::geometry::classify_portion;
use crate::keybindings::{Action, KeyBindings};
use crate::layout::{item_metrics, layout_pass};
use crate::navigator::KeyboardNavigator;
use crate::paint::{self, Scene};
use crate::popup::{DesignerPopupFactory, OpenSubmenuRegistry, PopupFactory};
use crate::state::DesignerState;
use crate::theme::Skin;
use crate::tree::{MenuId, MenuTree};

pub struct Designer {
    tree: MenuTree,
    state: DesignerState,
    registry: OpenSubmenuRegistry,
    navigator: KeyboardNavigator,
    bindings: KeyBindings,
    factory: DesignerPopupFactory,
    skin: Skin,
    drag: Option<MenuId>,
    edit_buffer: String,
}

impl Designer {
    pub fn new(tree: MenuTree, skin: Skin) -> Self {
        let navigator = KeyboardNavigator::new(&tree);
        Self {
            tree,
            state: DesignerState::new(),
            registry: OpenSubmenuRegistry::new(),
            navigator,
            bindings: KeyBindings::default(),
            factory: DesignerPopupFactory,
            skin,
            drag: None,
            edit_buffer: String::new(),
        }
    }

    pub fn tree(&self) -> &MenuTree {
        &self.tree
    }

    pub fn tree_mut(&mut self) -> &mut MenuTree {
        &mut self.tree
    }

    pub fn state(&self) -> &DesignerState {
        &self.state
    }

    pub fn registry(&self) -> &OpenSubmenuRegistry {
        &self.registry
    }

    pub fn navigator(&self) -> &KeyboardNavigator {
        &self.navigator
    }

    pub fn bindings(&self) -> &KeyBindings {
        &self.bindings
    }

    pub fn skin(&self) -> Skin {
        self.skin
    }

    /// Drain the repaint flag raised by the last state mutation.
    pub fn take_repaint(&mut self) -> bool {
        self.state.take_repaint()
    }

    pub fn handle_event(&mut self, event: &Event) -> bool {
        match event {
            Event::Key(key) => self.handle_key(key),
            Event::Mouse(mouse) => self.handle_mouse(mouse),
            _ => false,
        }
    }

    fn handle_key(&mut self, key: &KeyEvent) -> bool {
        if self.state.editing().is_some() {
            return self.handle_edit_key(key);
        }
        let Some(action) = self.bindings.action_for_key(key) else {
            return false;
        };
        match action {
            Action::Quit => false,
            Action::DeleteNode => self.delete_selection(),
            _ => {
                let handled = self.navigator.handle_action(
                    action,
                    &self.tree,
                    &mut self.state,
                    &mut self.registry,
                    &self.factory,
                );
                if handled && action == Action::EditLabel
                    && let Some(id) = self.state.editing()
                {
                    self.edit_buffer = self
                        .tree
                        .get(id)
                        .map(|n| n.label().to_string())
                        .unwrap_or_default();
                }
                handled
            }
        }
    }

    fn handle_edit_key(&mut self, key: &KeyEvent) -> bool {
        match key.code {
            KeyCode::Enter => {
                if let Some(id) = self.state.finish_editing() {
                    let label = self.edit_buffer.clone();
                    if self.tree.set_label(id, &label).is_err() {
                        debug!("rename target vanished before commit");
                    }
                }
                self.edit_buffer.clear();
                true
            }
            KeyCode::Esc => {
                self.state.finish_editing();
                self.edit_buffer.clear();
                true
            }
            KeyCode::Backspace => {
                self.edit_buffer.pop();
                self.state.request_repaint();
                true
            }
            KeyCode::Char(c) => {
                self.edit_buffer.push(c);
                self.state.request_repaint();
                true
            }
            _ => false,
        }
    }

    fn delete_selection(&mut self) -> bool {
        let Some(sel) = self.state.single_selection() else {
            return false;
        };
        if self.tree.remove(sel).is_err() {
            return false;
        }
        self.registry.prune(&self.tree);
        self.state.clear_selection();
        true
    }

    fn handle_mouse(&mut self, mouse: &MouseEvent) -> bool {
        let point = Position::new(mouse.column, mouse.row);
        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => self.press(point),
            MouseEventKind::Drag(MouseButton::Left) => self.drag_move(point),
            MouseEventKind::Up(MouseButton::Left) => self.release(point),
            _ => false,
        }
    }

    /// Click: select the item under the cursor (classifying which visual
    /// band was hit), open its submenu when it has one, and arm a drag.
    fn press(&mut self, point: Position) -> bool {
        let Some(item) = hit_test(&self.tree, &self.registry, point) else {
            self.state.clear_selection();
            self.registry.hide_all();
            return true;
        };
        self.state.select_only(item);
        self.registry.hide_other_menus(&self.tree, item);
        let parent = self.tree.parent(item).unwrap_or(self.tree.root());
        self.navigator.set_current_menu(&self.tree, parent);

        let bounds = self.tree.bounds(item);
        let metrics = item_metrics(&self.tree, item);
        let portion = classify_portion(
            self.skin,
            metrics,
            point.x as i32 - bounds.x as i32,
            point.y as i32 - bounds.y as i32,
        );
        self.state.set_portion(portion);

        if self.tree.is_submenu(item) {
            let handle = self.factory.get_popup(&mut self.registry, &self.tree, item);
            handle.show(&mut self.registry, &self.tree);
        }
        self.drag = Some(item);
        true
    }

    fn drag_move(&mut self, point: Position) -> bool {
        if self.drag.is_none() {
            return false;
        }
        match resolve_drop(&self.tree, &self.registry, point) {
            Some((node, kind)) => self.state.set_drop_target_kind(node, point, kind),
            None => self.state.clear_drop_target(),
        }
        true
    }

    fn release(&mut self, point: Position) -> bool {
        let Some(payload) = self.drag.take() else {
            return false;
        };
        let target = self.state.drop_target();
        self.state.clear_drop_target();
        let Some(target) = target else {
            return true;
        };
        // A click without movement resolves to the pressed item itself;
        // only apply real moves.
        if target.node == payload {
            return true;
        }
        match apply_drop(&mut self.tree, payload, target.node, target.kind, point) {
            Ok(()) => {
                debug!(?target.kind, "drop applied");
                self.registry.prune(&self.tree);
            }
            Err(err) => debug!(%err, "drop refused"),
        }
        true
    }

    /// Node currently being dragged, if any.
    pub fn drag_payload(&self) -> Option<MenuId> {
        self.drag
    }

    /// Run the layout pass and paint one frame into `area`.
    pub fn render(&mut self, frame: &mut CanvasFrame<'_>, area: Rect) {
        layout_pass(&mut self.tree, &mut self.registry, self.skin, area);
        let edit_text = self.state.editing().map(|_| self.edit_buffer.as_str());
        let scene = Scene {
            tree: &self.tree,
            state: &self.state,
            registry: &self.registry,
            skin: self.skin,
            drag_payload: self.drag,
            edit_text,
        };
        paint::render(frame, &scene);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyModifiers, MouseEventKind};
    use ratatui::buffer::Buffer;

    fn designer() -> (Designer, MenuId, MenuId) {
        let mut tree = MenuTree::new();
        let file = tree.add_menu(tree.root(), "File (first menu)").unwrap();
        let edit = tree.add_menu(tree.root(), "Edit (second menu)").unwrap();
        tree.add_item(file, "New", true, Some("Ctrl+N")).unwrap();
        tree.add_item(file, "Open", false, Some("Ctrl+O")).unwrap();
        tree.add_item(file, "Save", false, Some("Ctrl+S")).unwrap();
        let mut d = Designer::new(tree, Skin::Plain);
        // one layout pass so bounds exist for hit-testing
        relayout(&mut d);
        (d, file, edit)
    }

    fn relayout(d: &mut Designer) {
        let area = Rect::new(0, 0, 80, 24);
        let mut buffer = Buffer::empty(area);
        let mut frame = CanvasFrame::from_parts(area, &mut buffer);
        d.render(&mut frame, area);
    }

    fn mouse(kind: MouseEventKind, x: u16, y: u16) -> Event {
        Event::Mouse(MouseEvent {
            kind,
            column: x,
            row: y,
            modifiers: KeyModifiers::NONE,
        })
    }

    #[test]
    fn clicking_a_bar_menu_selects_it_and_opens_its_panel() {
        let (mut d, file, _edit) = designer();
        let rect = d.tree().bounds(file);
        let ev = mouse(
            MouseEventKind::Down(MouseButton::Left),
            rect.x + rect.width / 2,
            rect.y,
        );
        assert!(d.handle_event(&ev));
        assert_eq!(d.state().single_selection(), Some(file));
        assert!(d.registry().is_visible(file));
    }

    #[test]
    fn drag_within_a_panel_reorders_items() {
        let (mut d, file, _edit) = designer();
        // open File's panel and lay the rows out
        let rect = d.tree().bounds(file);
        d.handle_event(&mouse(
            MouseEventKind::Down(MouseButton::Left),
            rect.x + rect.width / 2,
            rect.y,
        ));
        d.handle_event(&mouse(
            MouseEventKind::Up(MouseButton::Left),
            rect.x + rect.width / 2,
            rect.y,
        ));
        relayout(&mut d);

        // grab "Save" and drop it into the gap before "New"
        let new = d.tree().children(file)[0];
        let open = d.tree().children(file)[1];
        let save = d.tree().children(file)[2];
        let save_row = d.tree().bounds(save);
        d.handle_event(&mouse(
            MouseEventKind::Down(MouseButton::Left),
            save_row.x + 1,
            save_row.y,
        ));
        let new_row = d.tree().bounds(new);
        d.handle_event(&mouse(
            MouseEventKind::Drag(MouseButton::Left),
            new_row.x + 1,
            new_row.y,
        ));
        assert!(d.state().drop_target().is_some());
        d.handle_event(&mouse(
            MouseEventKind::Up(MouseButton::Left),
            new_row.x + 1,
            new_row.y,
        ));

        assert_eq!(d.tree().children(file), &[save, new, open]);
        assert!(d.state().drop_target().is_none());
        assert!(d.drag_payload().is_none());
    }

    #[test]
    fn rename_flow_commits_on_enter() {
        let (mut d, file, _edit) = designer();
        let key = |code| Event::Key(KeyEvent::new(code, KeyModifiers::NONE));
        d.handle_event(&mouse(
            MouseEventKind::Down(MouseButton::Left),
            d.tree().bounds(file).x + 1,
            0,
        ));
        d.handle_event(&mouse(
            MouseEventKind::Up(MouseButton::Left),
            d.tree().bounds(file).x + 1,
            0,
        ));
        d.handle_event(&key(KeyCode::F(2)));
        assert_eq!(d.state().editing(), Some(file));
        for _ in 0.."File (first menu)".len() {
            d.handle_event(&key(KeyCode::Backspace));
        }
        for c in "Project".chars() {
            d.handle_event(&key(KeyCode::Char(c)));
        }
        d.handle_event(&key(KeyCode::Enter));
        assert_eq!(d.tree().get(file).unwrap().label(), "Project");
        assert_eq!(d.state().editing(), None);
    }

    #[test]
    fn delete_removes_the_selected_subtree() {
        let (mut d, file, edit) = designer();
        d.handle_event(&mouse(
            MouseEventKind::Down(MouseButton::Left),
            d.tree().bounds(file).x + 1,
            0,
        ));
        d.handle_event(&mouse(
            MouseEventKind::Up(MouseButton::Left),
            d.tree().bounds(file).x + 1,
            0,
        ));
        d.handle_event(&Event::Key(KeyEvent::new(
            KeyCode::Delete,
            KeyModifiers::NONE,
        )));
        assert!(d.tree().get(file).is_none());
        assert_eq!(d.tree().children(d.tree().root()), &[edit]);
    }
}
