/// # Opcodes
///
/// Every instruction is one big-endian 16-bit word, read here as four nibbles `f x y n`.
/// The leading nibble `f` picks the operation family. Families that hold several
/// operations tell them apart by `n` (`8XY_`), by the low byte (`EX__`, `FX__`) or by
/// the whole word (`00E0`, `00EE`).
///
/// The remaining nibbles are operands, and which ones apply depends on the family:
///
/// | field  | bits   | used as                                   |
/// |--------|--------|-------------------------------------------|
/// | `x`    | `_X__` | register Vx, or the last register of V0..Vx |
/// | `y`    | `__Y_` | register Vy                               |
/// | `n`    | `___N` | sprite height                             |
/// | `kk`   | `__KK` | byte immediate                            |
/// | `addr` | `_NNN` | 12-bit address                            |
///
/// Any word decodes; whether it means anything is up to the dispatch table.
pub trait Opcode {
    /// `(f, x, y, n)`
    fn nibbles(&self) -> (u8, u8, u8, u8);

    fn family(&self) -> u8;

    fn x(&self) -> u8;

    fn y(&self) -> u8;

    fn n(&self) -> u8;

    fn kk(&self) -> u8;

    fn addr(&self) -> u16;
}

impl Opcode for u16 {
    fn nibbles(&self) -> (u8, u8, u8, u8) {
        (self.family(), self.x(), self.y(), self.n())
    }

    fn family(&self) -> u8 {
        (self >> 12) as u8
    }

    fn x(&self) -> u8 {
        (self >> 8) as u8 & 0xF
    }

    fn y(&self) -> u8 {
        (self >> 4) as u8 & 0xF
    }

    fn n(&self) -> u8 {
        *self as u8 & 0xF
    }

    fn kk(&self) -> u8 {
        *self as u8
    }

    fn addr(&self) -> u16 {
        self & 0x0FFF
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_draw_operands() {
        let op: u16 = 0xD3A5;
        assert_eq!(op.nibbles(), (0xD, 0x3, 0xA, 0x5));
        assert_eq!(op.family(), 0xD);
        assert_eq!(op.x(), 0x3);
        assert_eq!(op.y(), 0xA);
        assert_eq!(op.n(), 0x5);
    }

    #[test]
    fn test_immediate_operands() {
        let op: u16 = 0x7E42;
        assert_eq!(op.x(), 0xE);
        assert_eq!(op.kk(), 0x42);
    }

    #[test]
    fn test_address_operand() {
        let op: u16 = 0x2ABC;
        assert_eq!(op.family(), 0x2);
        assert_eq!(op.addr(), 0xABC);
    }

    #[test]
    fn test_every_word_decodes_in_range() {
        for op in [0x0000u16, 0xFFFF, 0x8FF0, 0x00EE, 0xF165] {
            let (f, x, y, n) = op.nibbles();
            assert!(f <= 0xF && x <= 0xF && y <= 0xF && n <= 0xF);
            assert_eq!(u16::from(x) << 8 | u16::from(op.kk()), op.addr());
            assert_eq!(op.kk() & 0xF, n);
        }
    }
}
