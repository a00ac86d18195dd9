pub use display::TerminalDisplay;

mod display;
