//! Keyboard bindings configuration.

use crate::model::key_action::KeyAction;
use crate::state::KeyContext;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::collections::HashMap;

/// Maps keyboard events to domain actions, per screen context.
///
/// On the search form, unbound printable keys are text input and are not
/// looked up here.
#[derive(Debug, Clone)]
pub struct KeyBindings {
    bindings: HashMap<KeyContext, HashMap<KeyEvent, KeyAction>>,
}

impl KeyBindings {
    /// Look up the action for a key event in a context.
    pub fn get(&self, context: KeyContext, key: KeyEvent) -> Option<KeyAction> {
        self.bindings
            .get(&context)
            .and_then(|map| map.get(&normalize(key)))
            .copied()
    }

    /// Keys bound to `action` in `context`, for hint rendering.
    pub fn keys_for(&self, context: KeyContext, action: KeyAction) -> Vec<KeyEvent> {
        let mut keys: Vec<KeyEvent> = self
            .bindings
            .get(&context)
            .into_iter()
            .flat_map(|map| map.iter())
            .filter(|(_, a)| **a == action)
            .map(|(k, _)| *k)
            .collect();
        keys.sort_by_key(|k| format_key(*k));
        keys
    }
}

/// Drop press/release kind and state so lookups match regardless of
/// terminal keyboard enhancement flags.
fn normalize(key: KeyEvent) -> KeyEvent {
    KeyEvent::new(key.code, key.modifiers)
}

fn key(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::NONE)
}

fn ctrl(c: char) -> KeyEvent {
    KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
}

/// Human-readable key name, e.g. "Enter", "Ctrl+l", "j".
pub fn format_key(key: KeyEvent) -> String {
    let base = match key.code {
        KeyCode::Char(' ') => "Space".to_string(),
        KeyCode::Char(c) => c.to_string(),
        KeyCode::Enter => "Enter".to_string(),
        KeyCode::Esc => "Esc".to_string(),
        KeyCode::Backspace => "Backspace".to_string(),
        KeyCode::Up => "↑".to_string(),
        KeyCode::Down => "↓".to_string(),
        KeyCode::Left => "←".to_string(),
        KeyCode::Right => "→".to_string(),
        KeyCode::Home => "Home".to_string(),
        KeyCode::End => "End".to_string(),
        KeyCode::F(n) => format!("F{n}"),
        other => format!("{other:?}"),
    };
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        format!("Ctrl+{base}")
    } else {
        base
    }
}

impl Default for KeyBindings {
    fn default() -> Self {
        let mut form = HashMap::new();
        form.insert(key(KeyCode::Enter), KeyAction::SubmitSearch);
        form.insert(ctrl('l'), KeyAction::SearchByLocation);
        form.insert(key(KeyCode::Backspace), KeyAction::DeleteBack);
        form.insert(key(KeyCode::Left), KeyAction::CursorLeft);
        form.insert(key(KeyCode::Right), KeyAction::CursorRight);
        form.insert(key(KeyCode::Home), KeyAction::CursorHome);
        form.insert(ctrl('a'), KeyAction::CursorHome);
        form.insert(key(KeyCode::End), KeyAction::CursorEnd);
        form.insert(ctrl('e'), KeyAction::CursorEnd);
        form.insert(key(KeyCode::F(1)), KeyAction::Help);
        form.insert(key(KeyCode::Esc), KeyAction::Back);
        form.insert(ctrl('c'), KeyAction::Quit);

        // Shared by the list and detail screens
        let mut common = HashMap::new();
        common.insert(key(KeyCode::Esc), KeyAction::Back);
        common.insert(key(KeyCode::Backspace), KeyAction::Back);
        common.insert(key(KeyCode::Char('h')), KeyAction::Back);
        common.insert(key(KeyCode::Left), KeyAction::Back);
        common.insert(key(KeyCode::Char('?')), KeyAction::Help);
        common.insert(key(KeyCode::F(1)), KeyAction::Help);
        common.insert(key(KeyCode::Char('q')), KeyAction::Quit);
        common.insert(ctrl('c'), KeyAction::Quit);

        let mut list = common.clone();
        list.insert(key(KeyCode::Char('k')), KeyAction::SelectPrev);
        list.insert(key(KeyCode::Up), KeyAction::SelectPrev);
        list.insert(key(KeyCode::Char('j')), KeyAction::SelectNext);
        list.insert(key(KeyCode::Down), KeyAction::SelectNext);
        list.insert(key(KeyCode::Char('g')), KeyAction::SelectFirst);
        list.insert(key(KeyCode::Home), KeyAction::SelectFirst);
        list.insert(
            KeyEvent::new(KeyCode::Char('G'), KeyModifiers::SHIFT),
            KeyAction::SelectLast,
        );
        list.insert(key(KeyCode::Char('G')), KeyAction::SelectLast);
        list.insert(key(KeyCode::End), KeyAction::SelectLast);
        list.insert(key(KeyCode::Enter), KeyAction::OpenSelected);
        list.insert(key(KeyCode::Char('l')), KeyAction::OpenSelected);
        list.insert(key(KeyCode::Right), KeyAction::OpenSelected);

        let detail = common;

        let mut bindings = HashMap::new();
        bindings.insert(KeyContext::Form, form);
        bindings.insert(KeyContext::List, list);
        bindings.insert(KeyContext::Detail, detail);

        Self { bindings }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn enter_submits_on_form_and_opens_on_list() {
        let kb = KeyBindings::default();
        assert_eq!(
            kb.get(KeyContext::Form, key(KeyCode::Enter)),
            Some(KeyAction::SubmitSearch)
        );
        assert_eq!(
            kb.get(KeyContext::List, key(KeyCode::Enter)),
            Some(KeyAction::OpenSelected)
        );
        assert_eq!(kb.get(KeyContext::Detail, key(KeyCode::Enter)), None);
    }

    #[test]
    fn letters_are_unbound_on_form() {
        let kb = KeyBindings::default();
        for c in ['q', 'j', 'k', 'h', '?', 'G'] {
            assert_eq!(
                kb.get(KeyContext::Form, key(KeyCode::Char(c))),
                None,
                "{c} must stay typeable"
            );
        }
    }

    #[test]
    fn ctrl_l_searches_by_location() {
        let kb = KeyBindings::default();
        assert_eq!(
            kb.get(KeyContext::Form, ctrl('l')),
            Some(KeyAction::SearchByLocation)
        );
    }

    #[test]
    fn backspace_deletes_on_form_but_goes_back_elsewhere() {
        let kb = KeyBindings::default();
        let bs = key(KeyCode::Backspace);
        assert_eq!(kb.get(KeyContext::Form, bs), Some(KeyAction::DeleteBack));
        assert_eq!(kb.get(KeyContext::List, bs), Some(KeyAction::Back));
        assert_eq!(kb.get(KeyContext::Detail, bs), Some(KeyAction::Back));
    }

    #[test]
    fn vim_navigation_on_list() {
        let kb = KeyBindings::default();
        assert_eq!(
            kb.get(KeyContext::List, key(KeyCode::Char('j'))),
            Some(KeyAction::SelectNext)
        );
        assert_eq!(
            kb.get(KeyContext::List, key(KeyCode::Char('k'))),
            Some(KeyAction::SelectPrev)
        );
        assert_eq!(
            kb.get(
                KeyContext::List,
                KeyEvent::new(KeyCode::Char('G'), KeyModifiers::SHIFT)
            ),
            Some(KeyAction::SelectLast)
        );
    }

    #[test]
    fn ctrl_c_quits_everywhere() {
        let kb = KeyBindings::default();
        for ctx in [KeyContext::Form, KeyContext::List, KeyContext::Detail] {
            assert_eq!(kb.get(ctx, ctrl('c')), Some(KeyAction::Quit));
        }
    }

    #[test]
    fn lookup_ignores_event_kind() {
        let kb = KeyBindings::default();
        let mut event = key(KeyCode::Enter);
        event.kind = crossterm::event::KeyEventKind::Repeat;
        assert_eq!(kb.get(KeyContext::Form, event), Some(KeyAction::SubmitSearch));
    }

    #[test]
    fn keys_for_lists_bindings_sorted() {
        let kb = KeyBindings::default();
        let keys: Vec<_> = kb
            .keys_for(KeyContext::List, KeyAction::SelectNext)
            .into_iter()
            .map(format_key)
            .collect();
        assert_eq!(keys, vec!["j", "↓"]);
    }

    #[test]
    fn format_key_names() {
        assert_eq!(format_key(ctrl('l')), "Ctrl+l");
        assert_eq!(format_key(key(KeyCode::Esc)), "Esc");
        assert_eq!(format_key(key(KeyCode::F(1))), "F1");
    }
}
