//! Arena-backed menu tree.
//!
//! Nodes are addressed by stable [`MenuId`]s; parent links are plain id
//! lookups rather than object back-pointers, so the tree stays acyclic at
//! the ownership level while parent lookup remains O(1). The root node is
//! the menu bar itself; its children are the top-level menus.

use std::collections::BTreeMap;

use ratatui::prelude::Rect;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct MenuId(u32);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    /// A menu: may carry children and opens a submenu panel.
    Menu,
    /// A plain invokable item.
    Item,
    /// A separator row.
    Separator,
}

#[derive(Debug, Clone)]
pub struct MenuNode {
    id: MenuId,
    label: String,
    kind: NodeKind,
    has_icon: bool,
    accelerator: Option<String>,
    parent: Option<MenuId>,
    children: Vec<MenuId>,
    // Visual bounds in canvas coordinates; owned by the layout pass and
    // recomputed every frame. Zero until the first pass.
    bounds: Rect,
}

impl MenuNode {
    pub fn id(&self) -> MenuId {
        self.id
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn kind(&self) -> NodeKind {
        self.kind
    }

    pub fn has_icon(&self) -> bool {
        self.has_icon
    }

    pub fn accelerator(&self) -> Option<&str> {
        self.accelerator.as_deref()
    }

    pub fn parent(&self) -> Option<MenuId> {
        self.parent
    }

    pub fn children(&self) -> &[MenuId] {
        &self.children
    }

    pub fn bounds(&self) -> Rect {
        self.bounds
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TreeError {
    #[error("unknown menu node {0:?}")]
    UnknownNode(MenuId),
    #[error("the menu bar root cannot be detached")]
    DetachRoot,
    #[error("cannot move a node into its own subtree")]
    IntoOwnSubtree,
}

#[derive(Debug, Clone)]
pub struct MenuTree {
    nodes: BTreeMap<MenuId, MenuNode>,
    root: MenuId,
    next: u32,
}

impl MenuTree {
    pub fn new() -> Self {
        let root = MenuId(0);
        let mut nodes = BTreeMap::new();
        nodes.insert(
            root,
            MenuNode {
                id: root,
                label: String::new(),
                kind: NodeKind::Menu,
                has_icon: false,
                accelerator: None,
                parent: None,
                children: Vec::new(),
                bounds: Rect::default(),
            },
        );
        Self {
            nodes,
            root,
            next: 1,
        }
    }

    /// The menu bar node.
    pub fn root(&self) -> MenuId {
        self.root
    }

    pub fn get(&self, id: MenuId) -> Option<&MenuNode> {
        self.nodes.get(&id)
    }

    fn node(&self, id: MenuId) -> Result<&MenuNode, TreeError> {
        self.nodes.get(&id).ok_or(TreeError::UnknownNode(id))
    }

    fn alloc(&mut self) -> MenuId {
        let id = MenuId(self.next);
        self.next += 1;
        id
    }

    fn attach(
        &mut self,
        parent: MenuId,
        label: String,
        kind: NodeKind,
        has_icon: bool,
        accelerator: Option<String>,
    ) -> Result<MenuId, TreeError> {
        self.node(parent)?;
        let id = self.alloc();
        self.nodes.insert(
            id,
            MenuNode {
                id,
                label,
                kind,
                has_icon,
                accelerator,
                parent: Some(parent),
                children: Vec::new(),
                bounds: Rect::default(),
            },
        );
        self.nodes
            .get_mut(&parent)
            .expect("parent checked above")
            .children
            .push(id);
        Ok(id)
    }

    /// Append a submenu node under `parent`.
    pub fn add_menu(&mut self, parent: MenuId, label: &str) -> Result<MenuId, TreeError> {
        self.attach(parent, label.to_string(), NodeKind::Menu, false, None)
    }

    /// Append a plain item under `parent`.
    pub fn add_item(
        &mut self,
        parent: MenuId,
        label: &str,
        has_icon: bool,
        accelerator: Option<&str>,
    ) -> Result<MenuId, TreeError> {
        self.attach(
            parent,
            label.to_string(),
            NodeKind::Item,
            has_icon,
            accelerator.map(str::to_string),
        )
    }

    /// Append a separator under `parent`.
    pub fn add_separator(&mut self, parent: MenuId) -> Result<MenuId, TreeError> {
        self.attach(parent, String::new(), NodeKind::Separator, false, None)
    }

    /// Detach `id` from its parent and drop its whole subtree.
    pub fn remove(&mut self, id: MenuId) -> Result<(), TreeError> {
        let parent = self.node(id)?.parent.ok_or(TreeError::DetachRoot)?;
        if let Some(p) = self.nodes.get_mut(&parent) {
            p.children.retain(|c| *c != id);
        }
        let mut stack = vec![id];
        while let Some(n) = stack.pop() {
            if let Some(node) = self.nodes.remove(&n) {
                stack.extend(node.children);
            }
        }
        Ok(())
    }

    /// Move `id` under `new_parent` at `index` (clamped to the child count).
    ///
    /// Refuses to move a node into its own subtree; the tree is left
    /// untouched on error.
    pub fn move_node(
        &mut self,
        id: MenuId,
        new_parent: MenuId,
        index: usize,
    ) -> Result<(), TreeError> {
        let old_parent = self.node(id)?.parent.ok_or(TreeError::DetachRoot)?;
        self.node(new_parent)?;
        if id == new_parent || self.is_ancestor(id, new_parent) {
            return Err(TreeError::IntoOwnSubtree);
        }
        let mut index = index;
        if old_parent == new_parent {
            // Removing first shifts later positions left by one.
            let old_index = self.child_index(id).unwrap_or(0);
            if index > old_index {
                index = index.saturating_sub(1);
            }
        }
        if let Some(p) = self.nodes.get_mut(&old_parent) {
            p.children.retain(|c| *c != id);
        }
        let parent = self
            .nodes
            .get_mut(&new_parent)
            .expect("new parent checked above");
        let index = index.min(parent.children.len());
        parent.children.insert(index, id);
        self.nodes.get_mut(&id).expect("node checked above").parent = Some(new_parent);
        Ok(())
    }

    /// Rename `id` in place.
    pub fn set_label(&mut self, id: MenuId, label: &str) -> Result<(), TreeError> {
        self.node(id)?;
        self.nodes
            .get_mut(&id)
            .expect("node checked above")
            .label = label.to_string();
        Ok(())
    }

    /// True when `a` is a strict ancestor of `b`.
    pub fn is_ancestor(&self, a: MenuId, b: MenuId) -> bool {
        let mut cur = self.get(b).and_then(MenuNode::parent);
        while let Some(p) = cur {
            if p == a {
                return true;
            }
            cur = self.get(p).and_then(MenuNode::parent);
        }
        false
    }

    pub fn parent(&self, id: MenuId) -> Option<MenuId> {
        self.get(id).and_then(MenuNode::parent)
    }

    pub fn children(&self, id: MenuId) -> &[MenuId] {
        self.get(id).map(MenuNode::children).unwrap_or(&[])
    }

    /// Position of `id` within its parent's child list.
    pub fn child_index(&self, id: MenuId) -> Option<usize> {
        let parent = self.parent(id)?;
        self.children(parent).iter().position(|c| *c == id)
    }

    pub fn next_sibling(&self, id: MenuId) -> Option<MenuId> {
        let parent = self.parent(id)?;
        let idx = self.child_index(id)?;
        self.children(parent).get(idx + 1).copied()
    }

    pub fn prev_sibling(&self, id: MenuId) -> Option<MenuId> {
        let parent = self.parent(id)?;
        let idx = self.child_index(id)?;
        idx.checked_sub(1)
            .and_then(|i| self.children(parent).get(i).copied())
    }

    /// The top-level bar menu containing `id` (or `id` itself when it is a
    /// bar child). Returns the root for the root itself.
    pub fn top_level_ancestor(&self, id: MenuId) -> MenuId {
        let mut cur = id;
        while let Some(p) = self.parent(cur) {
            if p == self.root {
                return cur;
            }
            cur = p;
        }
        cur
    }

    /// True for nodes that open a submenu panel.
    pub fn is_submenu(&self, id: MenuId) -> bool {
        self.get(id).is_some_and(|n| n.kind == NodeKind::Menu)
    }

    pub fn set_bounds(&mut self, id: MenuId, bounds: Rect) {
        if let Some(n) = self.nodes.get_mut(&id) {
            n.bounds = bounds;
        }
    }

    pub fn bounds(&self, id: MenuId) -> Rect {
        self.get(id).map(MenuNode::bounds).unwrap_or_default()
    }
}

impl Default for MenuTree {
    fn default() -> Self {
        Self::new()
    }
}
