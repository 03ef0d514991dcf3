//! The key-shadow tracker (C3): which output KEY codes the translator
//! currently believes are held down.

use crate::device::attribute_set::AttributeSet;
use crate::device::constants::KeyCode;

#[derive(Default)]
pub struct KeyShadow {
    held: AttributeSet<KeyCode>,
}

impl KeyShadow {
    pub fn new() -> Self {
        KeyShadow { held: AttributeSet::new() }
    }

    pub fn is_held(&self, key: KeyCode) -> bool {
        self.held.contains(key)
    }

    /// Must be called strictly after a successful emission of a KEY event.
    pub fn record(&mut self, key: KeyCode, value: i32) {
        self.held.set(key, value > 0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_clear() {
        let shadow = KeyShadow::new();
        assert!(!shadow.is_held(KeyCode::KEY_A));
    }

    #[test]
    fn tracks_press_and_release() {
        let mut shadow = KeyShadow::new();
        shadow.record(KeyCode::KEY_A, 1);
        assert!(shadow.is_held(KeyCode::KEY_A));
        shadow.record(KeyCode::KEY_A, 0);
        assert!(!shadow.is_held(KeyCode::KEY_A));
    }

    #[test]
    fn autorepeat_value_counts_as_held() {
        let mut shadow = KeyShadow::new();
        shadow.record(KeyCode::KEY_A, 2);
        assert!(shadow.is_held(KeyCode::KEY_A));
    }
}
