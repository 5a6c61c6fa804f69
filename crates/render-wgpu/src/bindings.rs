use freelook_input::Key;
use std::collections::{BTreeSet, HashMap, HashSet};
use winit::keyboard::KeyCode;

/// Physical key codes mapped onto logical keys.
#[derive(Debug, Clone)]
pub struct KeyBindings {
    map: HashMap<KeyCode, Key>,
}

impl Default for KeyBindings {
    /// WASD plus arrows, Space up, left Shift down, Escape to exit.
    fn default() -> Self {
        let map = [
            (KeyCode::KeyW, Key::Forward),
            (KeyCode::ArrowUp, Key::Forward),
            (KeyCode::KeyS, Key::Back),
            (KeyCode::ArrowDown, Key::Back),
            (KeyCode::KeyA, Key::Left),
            (KeyCode::ArrowLeft, Key::Left),
            (KeyCode::KeyD, Key::Right),
            (KeyCode::ArrowRight, Key::Right),
            (KeyCode::Space, Key::Up),
            (KeyCode::ShiftLeft, Key::Down),
            (KeyCode::Escape, Key::Exit),
        ]
        .into_iter()
        .collect();
        Self { map }
    }
}

impl KeyBindings {
    /// Bindings with nothing mapped.
    pub fn empty() -> Self {
        Self {
            map: HashMap::new(),
        }
    }

    /// Map `code` to `key`, replacing any previous binding for `code`.
    pub fn bind(&mut self, code: KeyCode, key: Key) {
        self.map.insert(code, key);
    }

    pub fn resolve(&self, code: KeyCode) -> Option<Key> {
        self.map.get(&code).copied()
    }

    /// Logical keys currently held, given the held physical keys.
    pub fn held_keys(&self, held: &HashSet<KeyCode>) -> BTreeSet<Key> {
        held.iter().filter_map(|code| self.resolve(*code)).collect()
    }
}
