use std::collections::HashMap;
use std::fmt;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    Quit,
    // Selection movement within the current menu
    SelectNext,
    SelectPrev,
    // Across top-level menus / submenu descent
    NavLeft,
    NavRight,
    // In-place rename
    EditLabel,
    // Sibling cycle shortcut
    SiblingCycleNext,
    SiblingCyclePrev,
    // Structure editing
    DeleteNode,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Action::Quit => "Quit",
            Action::SelectNext => "Select next item (Down)",
            Action::SelectPrev => "Select previous item (Up)",
            Action::NavLeft => "Previous menu / leave submenu",
            Action::NavRight => "Next menu / enter submenu",
            Action::EditLabel => "Rename item (Space, F2)",
            Action::SiblingCycleNext => "Cycle sibling forward (a)",
            Action::SiblingCyclePrev => "Cycle sibling backward (Shift+A)",
            Action::DeleteNode => "Delete item",
        };
        write!(f, "{}", s)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyCombo {
    pub code: KeyCode,
    pub mods: KeyModifiers,
}

impl KeyCombo {
    pub fn new(code: KeyCode, mods: KeyModifiers) -> Self {
        Self { code, mods }
    }

    pub fn matches(&self, key: &KeyEvent) -> bool {
        key.code == self.code && key.modifiers == self.mods
    }

    pub fn display(&self) -> String {
        let mut parts = Vec::new();
        if self.mods.contains(KeyModifiers::CONTROL) {
            parts.push("Ctrl".to_string());
        }
        if self.mods.contains(KeyModifiers::SHIFT) {
            parts.push("Shift".to_string());
        }
        if self.mods.contains(KeyModifiers::ALT) {
            parts.push("Alt".to_string());
        }
        let code = match self.code {
            KeyCode::Char(' ') => "Space".to_string(),
            KeyCode::Char(c) => c.to_ascii_uppercase().to_string(),
            KeyCode::Esc => "Esc".to_string(),
            KeyCode::Enter => "Enter".to_string(),
            KeyCode::Left => "Left".to_string(),
            KeyCode::Right => "Right".to_string(),
            KeyCode::Up => "Up".to_string(),
            KeyCode::Down => "Down".to_string(),
            KeyCode::Delete => "Delete".to_string(),
            KeyCode::F(n) => format!("F{}", n),
            _ => format!("{:?}", self.code),
        };
        parts.push(code);
        parts.join("+")
    }
}

impl fmt::Display for KeyCombo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display())
    }
}

#[derive(Debug, Clone)]
pub struct KeyBindings {
    map: HashMap<Action, Vec<KeyCombo>>,
}

impl KeyBindings {
    pub fn new() -> Self {
        Self {
            map: HashMap::new(),
        }
    }

    pub fn add(&mut self, action: Action, combo: KeyCombo) {
        self.map.entry(action).or_default().push(combo);
    }

    pub fn matches(&self, action: Action, key: &KeyEvent) -> bool {
        if let Some(list) = self.map.get(&action) {
            list.iter().any(|c| c.matches(key))
        } else {
            false
        }
    }

    pub fn action_for_key(&self, key: &KeyEvent) -> Option<Action> {
        for (act, list) in &self.map {
            if list.iter().any(|c| c.matches(key)) {
                return Some(*act);
            }
        }
        None
    }

    /// Display strings for all combos mapped to `action`.
    pub fn combos_for(&self, action: Action) -> Vec<String> {
        self.map
            .get(&action)
            .map(|list| list.iter().map(|c| c.display()).collect())
            .unwrap_or_default()
    }
}

impl Default for KeyBindings {
    fn default() -> Self {
        use Action::*;
        let mut kb = Self::new();
        kb.add(
            Quit,
            KeyCombo::new(KeyCode::Char('q'), KeyModifiers::CONTROL),
        );
        kb.add(SelectNext, KeyCombo::new(KeyCode::Down, KeyModifiers::NONE));
        kb.add(SelectPrev, KeyCombo::new(KeyCode::Up, KeyModifiers::NONE));
        kb.add(NavLeft, KeyCombo::new(KeyCode::Left, KeyModifiers::NONE));
        kb.add(NavRight, KeyCombo::new(KeyCode::Right, KeyModifiers::NONE));
        kb.add(
            EditLabel,
            KeyCombo::new(KeyCode::Char(' '), KeyModifiers::NONE),
        );
        kb.add(EditLabel, KeyCombo::new(KeyCode::F(2), KeyModifiers::NONE));
        kb.add(
            SiblingCycleNext,
            KeyCombo::new(KeyCode::Char('a'), KeyModifiers::NONE),
        );
        kb.add(
            SiblingCyclePrev,
            KeyCombo::new(KeyCode::Char('A'), KeyModifiers::SHIFT),
        );
        kb.add(
            DeleteNode,
            KeyCombo::new(KeyCode::Delete, KeyModifiers::NONE),
        );
        kb
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyEvent;

    #[test]
    fn defaults_match_quit() {
        let kb = KeyBindings::default();
        let ev = KeyEvent::new(KeyCode::Char('q'), KeyModifiers::CONTROL);
        assert!(kb.matches(Action::Quit, &ev));
    }

    #[test]
    fn space_and_f2_both_start_renaming() {
        let kb = KeyBindings::default();
        let space = KeyEvent::new(KeyCode::Char(' '), KeyModifiers::NONE);
        let f2 = KeyEvent::new(KeyCode::F(2), KeyModifiers::NONE);
        assert_eq!(kb.action_for_key(&space), Some(Action::EditLabel));
        assert_eq!(kb.action_for_key(&f2), Some(Action::EditLabel));
    }

    #[test]
    fn sibling_cycle_distinguishes_shift() {
        let kb = KeyBindings::default();
        let fwd = KeyEvent::new(KeyCode::Char('a'), KeyModifiers::NONE);
        let back = KeyEvent::new(KeyCode::Char('A'), KeyModifiers::SHIFT);
        assert_eq!(kb.action_for_key(&fwd), Some(Action::SiblingCycleNext));
        assert_eq!(kb.action_for_key(&back), Some(Action::SiblingCyclePrev));
    }
}
