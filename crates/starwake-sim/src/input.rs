//! Keyboard bindings and held-key state.
//!
//! Keys are named the way the browser prototype's key library named
//! them: special keys in angle brackets (`<up>`, `<shift>`, `<space>`)
//! and printable keys as single upper-case characters (`Q`, `E`).
//! Held keys repeat their command every tick; boost is an edge action.

use std::collections::{BTreeSet, HashMap};

use log::trace;
use serde::{Deserialize, Serialize};

use starwake_core::commands::PlayerCommand;

/// Something the player can do with a key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Action {
    Forward,
    Backward,
    TurnLeft,
    TurnRight,
    BankLeft,
    BankRight,
    Boost,
    Fire,
}

impl Action {
    /// The command this action repeats while held, if it repeats at all.
    pub fn repeat_command(self) -> Option<PlayerCommand> {
        match self {
            Action::Forward => Some(PlayerCommand::Forward),
            Action::Backward => Some(PlayerCommand::Backward),
            Action::TurnLeft => Some(PlayerCommand::TurnLeft),
            Action::TurnRight => Some(PlayerCommand::TurnRight),
            Action::BankLeft => Some(PlayerCommand::BankLeft),
            Action::BankRight => Some(PlayerCommand::BankRight),
            Action::Fire => Some(PlayerCommand::Fire),
            Action::Boost => None,
        }
    }
}

/// A raw key transition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "key")]
pub enum KeyEvent {
    Down(String),
    Up(String),
}

/// Canonical form of a key name: `<name>` lower-cased, single characters upper-cased.
pub fn normalize_key(key: &str) -> String {
    let key = key.trim();
    if key.starts_with('<') && key.ends_with('>') {
        key.to_ascii_lowercase()
    } else if key.chars().count() == 1 {
        key.to_ascii_uppercase()
    } else {
        format!("<{}>", key.to_ascii_lowercase())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct KeyBindings {
    bindings: HashMap<String, Action>,
}

impl Default for KeyBindings {
    fn default() -> Self {
        let mut bindings = Self::empty();
        bindings.bind("<up>", Action::Forward);
        bindings.bind("<down>", Action::Backward);
        bindings.bind("<left>", Action::TurnLeft);
        bindings.bind("<right>", Action::TurnRight);
        bindings.bind("Q", Action::BankLeft);
        bindings.bind("E", Action::BankRight);
        bindings.bind("<shift>", Action::Boost);
        bindings.bind("<space>", Action::Fire);
        bindings
    }
}

impl KeyBindings {
    pub fn empty() -> Self {
        Self {
            bindings: HashMap::new(),
        }
    }

    /// Bind `key` to `action`, replacing any previous binding for that key.
    pub fn bind(&mut self, key: &str, action: Action) {
        self.bindings.insert(normalize_key(key), action);
    }

    pub fn action_for(&self, key: &str) -> Option<Action> {
        self.bindings.get(&normalize_key(key)).copied()
    }
}

/// Which actions are currently held, plus edge commands awaiting the next tick.
#[derive(Debug, Clone, Default)]
pub struct InputState {
    held: BTreeSet<Action>,
    pending: Vec<PlayerCommand>,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply a key transition. Unbound keys are ignored.
    pub fn handle(&mut self, bindings: &KeyBindings, event: &KeyEvent) {
        let (key, down) = match event {
            KeyEvent::Down(key) => (key, true),
            KeyEvent::Up(key) => (key, false),
        };
        let Some(action) = bindings.action_for(key) else {
            trace!("unbound key {key}");
            return;
        };

        let changed = if down {
            self.held.insert(action)
        } else {
            self.held.remove(&action)
        };

        // Key repeat from the OS must not re-trigger edges.
        if changed && action == Action::Boost {
            self.pending.push(PlayerCommand::SetBoost { engaged: down });
        }
    }

    pub fn is_held(&self, action: Action) -> bool {
        self.held.contains(&action)
    }

    /// Commands for one tick: pending edges first, then one per held repeating action.
    pub fn commands(&mut self) -> Vec<PlayerCommand> {
        let mut commands = std::mem::take(&mut self.pending);
        commands.extend(self.held.iter().filter_map(|a| a.repeat_command()));
        commands
    }

    /// Release everything, emitting the boost release edge if needed.
    pub fn release_all(&mut self) {
        if self.held.remove(&Action::Boost) {
            self.pending.push(PlayerCommand::SetBoost { engaged: false });
        }
        self.held.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn down(k: &str) -> KeyEvent {
        KeyEvent::Down(k.to_string())
    }

    fn up(k: &str) -> KeyEvent {
        KeyEvent::Up(k.to_string())
    }

    #[test]
    fn key_names_are_normalized() {
        assert_eq!(normalize_key("q"), "Q");
        assert_eq!(normalize_key("<UP>"), "<up>");
        assert_eq!(normalize_key("space"), "<space>");
    }

    #[test]
    fn default_bindings_cover_every_action() {
        let b = KeyBindings::default();
        assert_eq!(b.action_for("<up>"), Some(Action::Forward));
        assert_eq!(b.action_for("q"), Some(Action::BankLeft));
        assert_eq!(b.action_for("E"), Some(Action::BankRight));
        assert_eq!(b.action_for("<shift>"), Some(Action::Boost));
        assert_eq!(b.action_for("<space>"), Some(Action::Fire));
        assert_eq!(b.action_for("X"), None);
    }

    #[test]
    fn held_keys_repeat_every_tick() {
        let b = KeyBindings::default();
        let mut input = InputState::new();
        input.handle(&b, &down("<up>"));

        assert_eq!(input.commands(), vec![PlayerCommand::Forward]);
        assert_eq!(input.commands(), vec![PlayerCommand::Forward]);

        input.handle(&b, &up("<up>"));
        assert!(input.commands().is_empty());
    }

    #[test]
    fn boost_emits_edges_only() {
        let b = KeyBindings::default();
        let mut input = InputState::new();
        input.handle(&b, &down("<shift>"));
        input.handle(&b, &down("<shift>"));

        assert_eq!(input.commands(), vec![PlayerCommand::SetBoost { engaged: true }]);
        assert!(input.commands().is_empty());

        input.handle(&b, &up("<shift>"));
        assert_eq!(input.commands(), vec![PlayerCommand::SetBoost { engaged: false }]);
    }

    #[test]
    fn release_all_drops_boost() {
        let b = KeyBindings::default();
        let mut input = InputState::new();
        input.handle(&b, &down("<shift>"));
        input.handle(&b, &down("<space>"));
        input.commands();

        input.release_all();
        assert_eq!(input.commands(), vec![PlayerCommand::SetBoost { engaged: false }]);
        assert!(!input.is_held(Action::Fire));
    }

    #[test]
    fn key_event_json_shape() {
        let json = serde_json::to_string(&down("<space>")).unwrap();
        assert_eq!(json, r#"{"type":"Down","key":"<space>"}"#);
    }
}
