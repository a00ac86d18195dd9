use std::fs::File;
use std::io::Read;
use std::path::Path;

use log::{debug, trace};

use crate::config::Config;
use crate::constants::{PROGRAM_MAX_LEN, PROGRAM_START};
use crate::display::Display;
use crate::error::LoadError;
use crate::frame::FrameBuffer;
use crate::instruction::from_op;
use crate::keypad::Keypad;
use crate::operations::Context;
use crate::random::RandomStream;
use crate::state::State;

/// Where the interpreter is in its lifecycle
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Status {
    /// No program has been loaded; ticking does nothing
    Idle,
    /// Executing one instruction per tick
    Running,
    /// Halted on `FX0A` until the keypad reports a press for `register`
    AwaitingKey { register: u8 },
}

/// # Chip-8
/// Chip-8 is a virtual machine and corresponding interpreted language.
///
/// Tracks:
///  - current `state`
///  - the loaded `program` so it can be reloaded on reset
///  - the `rng` backing the random opcode
///
/// Supplies interfaces for:
/// - loading programs
/// - advancing the CPU and its timers one tick at a time
/// - handing finished frames to some display
/// - inspecting registers and memory
pub struct Chip8 {
    state: State,
    config: Config,
    rng: RandomStream,
    program: Option<Vec<u8>>,
}

impl Chip8 {
    pub fn new() -> Self {
        Self::with_config(Config::default())
    }

    pub fn with_config(config: Config) -> Self {
        let rng = match config.seed {
            Some(seed) => RandomStream::from_seed(seed),
            None => RandomStream::from_entropy(),
        };
        Chip8 {
            state: State::new(),
            config,
            rng,
            program: None,
        }
    }

    /// Power-cycles the machine and loads a program image at `PROGRAM_START`.
    /// Anything past `PROGRAM_MAX_LEN` bytes is dropped.
    ///
    /// Returns the number of bytes loaded.
    pub fn load_program(&mut self, program: &[u8]) -> usize {
        let program = &program[..program.len().min(PROGRAM_MAX_LEN)];
        self.program = Some(program.to_vec());
        self.reset();
        program.len()
    }

    /// Load a program from a source
    ///
    /// # Arguments
    /// * `reader` a reader that yields a program image
    pub fn load_rom(&mut self, reader: &mut dyn Read) -> Result<usize, LoadError> {
        let mut program = Vec::with_capacity(PROGRAM_MAX_LEN);
        reader
            .take(PROGRAM_MAX_LEN as u64)
            .read_to_end(&mut program)?;
        Ok(self.load_program(&program))
    }

    /// Load a program from the file at `path`
    pub fn load_file<P: AsRef<Path>>(&mut self, path: P) -> Result<usize, LoadError> {
        let path = path.as_ref();
        let mut file = File::open(path).map_err(|source| LoadError::Open {
            path: path.to_path_buf(),
            source,
        })?;
        let loaded = self.load_rom(&mut file)?;
        debug!("loaded {} bytes from {}", loaded, path.display());
        Ok(loaded)
    }

    /// Returns every register, memory byte, timer and pixel to its power-on value and
    /// reloads the current program. Any pending wait for a key is abandoned.
    pub fn reset(&mut self) {
        self.state = State::new();
        if let Some(program) = &self.program {
            self.state.memory.load(PROGRAM_START, program);
        }
        debug!("reset; status is now {:?}", self.status());
    }

    pub fn status(&self) -> Status {
        match (&self.program, self.state.register_needing_key) {
            (None, _) => Status::Idle,
            (Some(_), Some(register)) => Status::AwaitingKey { register },
            (Some(_), None) => Status::Running,
        }
    }

    /// Advances the machine by a single tick
    /// - does nothing until a program is loaded
    /// - if awaiting a keypress, takes the next press from the keypad instead of executing
    /// - otherwise discards any queued presses, then fetches and executes the next opcode
    /// - then advances the timers
    pub fn tick(&mut self, keypad: &mut dyn Keypad) -> Status {
        match self.status() {
            Status::Idle => return Status::Idle,
            Status::AwaitingKey { register } => {
                if let Some(key) = keypad.next_press() {
                    trace!("key {:X} stored in v{:X}", key, register);
                    self.state.v[register as usize] = key;
                    self.state.register_needing_key = None;
                }
            }
            Status::Running => {
                // A wait only accepts keys that go down after it starts
                while keypad.next_press().is_some() {}
                self.advance_cpu(keypad);
            }
        }
        self.advance_timers();
        self.status()
    }

    /// Gets and executes the opcode at the pc
    fn advance_cpu(&mut self, keypad: &dyn Keypad) {
        let op = self.get_op();
        self.state.advance_pc();
        trace!(
            "{:04X} v{:02X?} i{:04X} pc{:04X}",
            op,
            self.state.v,
            self.state.i,
            self.state.pc()
        );
        let mut ctx = Context {
            keypad,
            rng: &mut self.rng,
        };
        from_op(op)(op, &mut self.state, &mut ctx);
    }

    /// Handles delay counter and timers
    /// - decrements the delay counter
    /// - decrements timers when the counter hits 0 and resets the counter to `cycles_per_timer_tick - 1`
    fn advance_timers(&mut self) {
        if self.state.delay_counter == 0 {
            self.state.delay_counter = self.config.cycles_per_timer_tick.saturating_sub(1);

            if self.state.delay_timer > 0 {
                self.state.delay_timer -= 1;
            }

            if self.state.sound_timer > 0 {
                self.state.sound_timer -= 1;
            }
        } else {
            self.state.delay_counter -= 1;
        }
    }

    /// Gets the opcode currently pointed at by the pc.
    /// Memory is stored as bytes, but opcodes are 16 bits so we combine two subsequent bytes.
    fn get_op(&self) -> u16 {
        self.state.memory.read_word(self.state.pc())
    }

    /// Whether the frame buffer changed since it was last handed out
    pub fn has_new_frame(&self) -> bool {
        self.state.draw_flag
    }

    /// Returns the FrameBuffer if the display should be redrawn, marking it as handed out
    pub fn take_frame(&mut self) -> Option<&FrameBuffer> {
        if self.state.draw_flag {
            self.state.draw_flag = false;
            Some(&self.state.frame_buffer)
        } else {
            None
        }
    }

    /// Renders the frame on `display` if it changed; returns whether anything was drawn
    pub fn draw_frame<D: Display + ?Sized>(&mut self, display: &mut D) -> Result<bool, D::Error> {
        match self.take_frame() {
            Some(frame) => display.render(frame).map(|_| true),
            None => Ok(false),
        }
    }

    pub fn frame(&self) -> &FrameBuffer {
        &self.state.frame_buffer
    }

    pub fn registers(&self) -> &[u8; 16] {
        &self.state.v
    }

    pub fn register(&self, x: u8) -> u8 {
        self.state.v[x as usize & 0xF]
    }

    pub fn index(&self) -> u16 {
        self.state.i
    }

    pub fn pc(&self) -> u16 {
        self.state.pc()
    }

    pub fn delay_timer(&self) -> u8 {
        self.state.delay_timer
    }

    pub fn sound_timer(&self) -> u8 {
        self.state.sound_timer
    }

    /// Whether a host should be beeping
    pub fn sound_active(&self) -> bool {
        self.state.sound_timer > 0
    }

    pub fn stack_depth(&self) -> usize {
        self.state.stack.len()
    }

    pub fn memory(&self) -> &[u8] {
        self.state.memory.as_slice()
    }
}

impl Default for Chip8 {
    fn default() -> Self {
        Self::new()
    }
}
