use std::time::{Duration, Instant};

use term8_core::constants::NUM_KEYS;
use term8_core::{KeyState, Keypad};

/// How long a key counts as held when the terminal can't report releases.
/// Long enough to bridge the gap before the terminal's key repeat kicks in.
const HOLD_WINDOW: Duration = Duration::from_millis(250);

/// The keypad as seen through a terminal.
///
/// Terminals that support keyboard enhancement report real key releases. Others only
/// report presses (and repeats while a key is held), so there every press holds the key
/// down for `HOLD_WINDOW` and repeats keep extending it.
pub struct TerminalKeypad {
    keys: KeyState,
    held_until: [Option<Instant>; NUM_KEYS],
    reports_release: bool,
}

impl TerminalKeypad {
    pub fn new(reports_release: bool) -> Self {
        TerminalKeypad {
            keys: KeyState::new(),
            held_until: [None; NUM_KEYS],
            reports_release,
        }
    }

    pub fn key_down(&mut self, key: u8, now: Instant) {
        self.keys.press(key);
        if !self.reports_release {
            if let Some(deadline) = self.held_until.get_mut(key as usize) {
                *deadline = Some(now + HOLD_WINDOW);
            }
        }
    }

    pub fn key_up(&mut self, key: u8) {
        self.keys.release(key);
        if let Some(deadline) = self.held_until.get_mut(key as usize) {
            *deadline = None;
        }
    }

    /// Releases every key whose hold window has run out
    pub fn expire(&mut self, now: Instant) {
        for key in 0..NUM_KEYS as u8 {
            if matches!(self.held_until[key as usize], Some(deadline) if deadline <= now) {
                self.key_up(key);
            }
        }
    }

    pub fn clear(&mut self) {
        self.keys.clear();
        self.held_until = [None; NUM_KEYS];
    }
}

impl Keypad for TerminalKeypad {
    fn is_pressed(&self, key: u8) -> bool {
        self.keys.is_pressed(key)
    }

    fn next_press(&mut self) -> Option<u8> {
        self.keys.next_press()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_press_expires_without_release_reports() {
        let mut keypad = TerminalKeypad::new(false);
        let start = Instant::now();
        keypad.key_down(0x5, start);
        keypad.expire(start + HOLD_WINDOW / 2);
        assert!(keypad.is_pressed(0x5));
        keypad.expire(start + HOLD_WINDOW);
        assert!(!keypad.is_pressed(0x5));
    }

    #[test]
    fn test_repeat_extends_hold() {
        let mut keypad = TerminalKeypad::new(false);
        let start = Instant::now();
        keypad.key_down(0x5, start);
        keypad.key_down(0x5, start + HOLD_WINDOW / 2);
        keypad.expire(start + HOLD_WINDOW);
        assert!(keypad.is_pressed(0x5));
        // only the first press counts as a new press
        assert_eq!(keypad.next_press(), Some(0x5));
        assert_eq!(keypad.next_press(), None);
    }

    #[test]
    fn test_holds_until_release_when_reported() {
        let mut keypad = TerminalKeypad::new(true);
        let start = Instant::now();
        keypad.key_down(0xA, start);
        keypad.expire(start + HOLD_WINDOW * 10);
        assert!(keypad.is_pressed(0xA));
        keypad.key_up(0xA);
        assert!(!keypad.is_pressed(0xA));
    }

    #[test]
    fn test_clear() {
        let mut keypad = TerminalKeypad::new(false);
        keypad.key_down(0x1, Instant::now());
        keypad.clear();
        assert!(!keypad.is_pressed(0x1));
        assert_eq!(keypad.next_press(), None);
    }
}
