use std::collections::VecDeque;

use crate::constants::NUM_KEYS;

/// # Keypad
/// Input is generated with a 16 key hexadecimal keypad.
///
/// The interpreter only ever reads from a keypad:
/// - `is_pressed` answers whether a key is currently held
/// - `next_press` hands over the next key that went down, and is how a program waiting
///   on a key gets one without the interpreter spinning
pub trait Keypad {
    fn is_pressed(&self, key: u8) -> bool;

    fn next_press(&mut self) -> Option<u8>;
}

/// An in-memory keypad that hosts feed from whatever input source they have.
///
/// Holds at most `NUM_KEYS` undelivered presses; older ones are dropped first.
#[derive(Clone, Debug, Default)]
pub struct KeyState {
    pressed: [bool; NUM_KEYS],
    presses: VecDeque<u8>,
}

impl KeyState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the pressed status of key
    ///
    /// # Arguments
    /// * `key` the 8-bit representation of the key that was pressed
    pub fn press(&mut self, key: u8) {
        let Some(slot) = self.pressed.get_mut(key as usize) else {
            return;
        };
        if !*slot {
            if self.presses.len() == NUM_KEYS {
                self.presses.pop_front();
            }
            self.presses.push_back(key);
        }
        *slot = true;
    }

    /// Unset the pressed status of key
    ///
    /// # Arguments
    /// * `key` the 8-bit representation of the key that was released
    pub fn release(&mut self, key: u8) {
        if let Some(slot) = self.pressed.get_mut(key as usize) {
            *slot = false;
        }
    }

    /// Releases every key and forgets pending presses
    pub fn clear(&mut self) {
        self.pressed = [false; NUM_KEYS];
        self.presses.clear();
    }
}

impl Keypad for KeyState {
    fn is_pressed(&self, key: u8) -> bool {
        self.pressed.get(key as usize).copied().unwrap_or(false)
    }

    fn next_press(&mut self) -> Option<u8> {
        self.presses.pop_front()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_press_and_release() {
        let mut keys = KeyState::new();
        keys.press(0xA);
        assert!(keys.is_pressed(0xA));
        keys.release(0xA);
        assert!(!keys.is_pressed(0xA));
    }

    #[test]
    fn test_presses_queue_in_order() {
        let mut keys = KeyState::new();
        keys.press(0x3);
        keys.press(0x1);
        assert_eq!(keys.next_press(), Some(0x3));
        assert_eq!(keys.next_press(), Some(0x1));
        assert_eq!(keys.next_press(), None);
    }

    #[test]
    fn test_held_key_only_queues_once() {
        let mut keys = KeyState::new();
        keys.press(0x5);
        keys.press(0x5);
        assert_eq!(keys.next_press(), Some(0x5));
        assert_eq!(keys.next_press(), None);
    }

    #[test]
    fn test_ignores_out_of_range_keys() {
        let mut keys = KeyState::new();
        keys.press(0x10);
        keys.release(0xFF);
        assert!(!keys.is_pressed(0x10));
        assert_eq!(keys.next_press(), None);
    }

    #[test]
    fn test_press_queue_is_bounded() {
        let mut keys = KeyState::new();
        for _ in 0..1000 {
            keys.press(0x1);
            keys.release(0x1);
        }
        keys.press(0x2);
        let mut queued = Vec::new();
        while let Some(key) = keys.next_press() {
            queued.push(key);
        }
        assert_eq!(queued.len(), NUM_KEYS);
        assert_eq!(queued.last(), Some(&0x2));
    }
}
