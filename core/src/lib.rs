pub use chip8::{Chip8, Status};
pub use config::Config;
pub use constants::CLOCK_SPEED;
pub use display::Display;
pub use error::LoadError;
pub use frame::FrameBuffer;
pub use keypad::{KeyState, Keypad};
pub use opcode::Opcode;

mod chip8;
mod config;
pub mod constants;
mod display;
mod error;
mod frame;
mod instruction;
mod keypad;
mod opcode;
mod operations;
mod random;
mod state;
