use crate::constants::{
    MEMORY_SIZE, NUM_REGISTERS, PROGRAM_START, SPRITE_SHEET, STACK_DEPTH,
};
use crate::frame::FrameBuffer;

/// # Memory
/// 4096 bytes of addressable memory.
///
/// - `0x000..0x200` is reserved; the hex digit sprite sheet lives at its start
/// - `0x200..0x1000` holds the loaded program
///
/// Every access wraps modulo the memory size so no address can fall outside of it.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Memory {
    bytes: [u8; MEMORY_SIZE],
}

impl Memory {
    pub fn new() -> Self {
        Memory {
            bytes: [0; MEMORY_SIZE],
        }
    }

    pub fn read(&self, addr: u16) -> u8 {
        self.bytes[Self::wrap(addr)]
    }

    pub fn write(&mut self, addr: u16, value: u8) {
        self.bytes[Self::wrap(addr)] = value;
    }

    /// Reads the big-endian 16-bit word starting at `addr`.
    pub fn read_word(&self, addr: u16) -> u16 {
        u16::from(self.read(addr)) << 8 | u16::from(self.read(addr.wrapping_add(1)))
    }

    /// Copies `data` into memory starting at `start`
    pub fn load(&mut self, start: u16, data: &[u8]) {
        for (offset, byte) in data.iter().enumerate() {
            self.write(start.wrapping_add(offset as u16), *byte);
        }
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.bytes
    }

    fn wrap(addr: u16) -> usize {
        addr as usize % MEMORY_SIZE
    }
}

impl Default for Memory {
    fn default() -> Self {
        Self::new()
    }
}

/// # Call Stack
/// Holds up to `STACK_DEPTH` return addresses.
///
/// Pushing onto a full stack and popping from an empty one are ignored
/// rather than corrupting neighbouring state; callers learn about it from the return value.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub struct CallStack {
    slots: [u16; STACK_DEPTH],
    sp: usize,
}

impl CallStack {
    /// Returns false (and leaves the stack untouched) if the stack is full
    pub fn push(&mut self, addr: u16) -> bool {
        if self.is_full() {
            return false;
        }
        self.slots[self.sp] = addr;
        self.sp += 1;
        true
    }

    pub fn pop(&mut self) -> Option<u16> {
        if self.is_empty() {
            return None;
        }
        self.sp -= 1;
        Some(self.slots[self.sp])
    }

    pub fn len(&self) -> usize {
        self.sp
    }

    pub fn is_empty(&self) -> bool {
        self.sp == 0
    }

    pub fn is_full(&self) -> bool {
        self.sp == STACK_DEPTH
    }
}

/// The interpreter's internal state
///
/// ## CPU
/// Registers
/// - (v) 16 primary 8-bit registers (V0..VF)
///     - the first 15 (V0..VE) are general purpose registers
///     - the 16th (VF) is the carry/borrow/collision flag and is clobbered by several operations
/// - (i) a 16-bit index register
///
/// Counter
/// - (pc) a program counter that always lies within memory
///
/// Timers
/// - 2 8-bit countdown timers (delay & sound)
///
/// ## Memory
/// - a 16 entry call stack of return addresses
/// - 4096 bytes of addressable memory
/// - a 64x32 frame buffer
///
/// ## Input
/// - Execution halts until a key's value is written to `register_needing_key`
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct State {
    pub v: [u8; NUM_REGISTERS],
    pub i: u16,
    pc: u16,
    pub delay_timer: u8,
    pub sound_timer: u8,
    pub stack: CallStack,
    pub memory: Memory,
    pub frame_buffer: FrameBuffer,
    pub draw_flag: bool,
    pub register_needing_key: Option<u8>,
    pub delay_counter: u32,
}

impl State {
    /// A zeroed state with the sprite sheet in place and the pc at the program start
    pub fn new() -> Self {
        let mut memory = Memory::new();
        memory.load(0x000, &SPRITE_SHEET);

        State {
            v: [0; NUM_REGISTERS],
            i: 0,
            pc: PROGRAM_START,
            delay_timer: 0,
            sound_timer: 0,
            stack: CallStack::default(),
            memory,
            frame_buffer: FrameBuffer::new(),
            draw_flag: false,
            register_needing_key: None,
            delay_counter: 0,
        }
    }

    pub fn pc(&self) -> u16 {
        self.pc
    }

    /// Every write to the pc wraps it back into memory
    pub fn set_pc(&mut self, pc: u16) {
        self.pc = (pc as usize % MEMORY_SIZE) as u16;
    }

    /// Moves the pc past one instruction
    pub fn advance_pc(&mut self) {
        self.set_pc(self.pc.wrapping_add(2));
    }

    pub fn set_flag(&mut self, flag: bool) {
        self.v[0xF] = u8::from(flag);
    }
}

impl Default for State {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_starts_at_program() {
        let state = State::new();
        assert_eq!(state.pc(), 0x200);
        assert_eq!(state.v, [0; 16]);
        assert_eq!(state.memory.as_slice()[0..5], [0xF0, 0x90, 0x90, 0x90, 0xF0]);
    }

    #[test]
    fn test_pc_wraps() {
        let mut state = State::new();
        state.set_pc(0x0FFE);
        state.advance_pc();
        assert_eq!(state.pc(), 0x000);
        state.set_pc(0x1234);
        assert_eq!(state.pc(), 0x234);
    }

    #[test]
    fn test_memory_wraps() {
        let mut memory = Memory::new();
        memory.write(0x1005, 0xAB);
        assert_eq!(memory.read(0x005), 0xAB);
    }

    #[test]
    fn test_memory_reads_words_across_the_end() {
        let mut memory = Memory::new();
        memory.write(0xFFF, 0x12);
        memory.write(0x000, 0x34);
        assert_eq!(memory.read_word(0xFFF), 0x1234);
    }

    #[test]
    fn test_stack_is_lifo() {
        let mut stack = CallStack::default();
        assert!(stack.push(0x202));
        assert!(stack.push(0x204));
        assert_eq!(stack.pop(), Some(0x204));
        assert_eq!(stack.pop(), Some(0x202));
        assert_eq!(stack.pop(), None);
    }

    #[test]
    fn test_stack_ignores_push_when_full() {
        let mut stack = CallStack::default();
        for addr in 0..STACK_DEPTH as u16 {
            assert!(stack.push(addr));
        }
        assert!(stack.is_full());
        assert!(!stack.push(0xFFF));
        assert_eq!(stack.len(), STACK_DEPTH);
        assert_eq!(stack.pop(), Some(STACK_DEPTH as u16 - 1));
    }

    #[test]
    fn test_set_flag() {
        let mut state = State::new();
        state.set_flag(true);
        assert_eq!(state.v[0xF], 1);
        state.set_flag(false);
        assert_eq!(state.v[0xF], 0);
    }
}
