use crossterm::event::KeyCode;

/// # Keymap
/// Input is generated with a hexadecimal keypad.
///
/// This original layout is mapped to the left 4 alphanumeric columns.
/// ```text
/// |1|2|3|C|      |1|2|3|4|
/// |4|5|6|D|  ->  |Q|W|E|R|
/// |7|8|9|E|  ->  |A|S|D|F|
/// |A|0|B|F|      |Z|X|C|V|
/// ```
pub fn keymap(key: KeyCode) -> Option<u8> {
    let KeyCode::Char(c) = key else {
        return None;
    };
    match c.to_ascii_lowercase() {
        'x' => Some(0x0),
        '1' => Some(0x1),
        '2' => Some(0x2),
        '3' => Some(0x3),
        'q' => Some(0x4),
        'w' => Some(0x5),
        'e' => Some(0x6),
        'a' => Some(0x7),
        's' => Some(0x8),
        'd' => Some(0x9),
        'z' => Some(0xA),
        'c' => Some(0xB),
        '4' => Some(0xC),
        'r' => Some(0xD),
        'f' => Some(0xE),
        'v' => Some(0xF),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_maps_every_key_once() {
        let mut seen = [false; 16];
        for c in "1234qwerasdfzxcv".chars() {
            let key = keymap(KeyCode::Char(c)).unwrap();
            assert!(!seen[key as usize], "{} mapped twice", key);
            seen[key as usize] = true;
        }
        assert!(seen.iter().all(|&s| s));
    }

    #[test]
    fn test_layout_corners() {
        assert_eq!(keymap(KeyCode::Char('1')), Some(0x1));
        assert_eq!(keymap(KeyCode::Char('4')), Some(0xC));
        assert_eq!(keymap(KeyCode::Char('z')), Some(0xA));
        assert_eq!(keymap(KeyCode::Char('v')), Some(0xF));
    }

    #[test]
    fn test_ignores_case() {
        assert_eq!(keymap(KeyCode::Char('Q')), Some(0x4));
    }

    #[test]
    fn test_unmapped_keys() {
        assert_eq!(keymap(KeyCode::Char('p')), None);
        assert_eq!(keymap(KeyCode::Enter), None);
        assert_eq!(keymap(KeyCode::F(5)), None);
    }
}
