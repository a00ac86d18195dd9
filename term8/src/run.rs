use std::io::{self, Write};
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::event::{
    self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, KeyboardEnhancementFlags,
    PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
};
use crossterm::{cursor, execute, terminal};
use log::{debug, info, warn};

use term8_core::{Chip8, Display};
use term8_display::TerminalDisplay;

use crate::input::TerminalKeypad;
use crate::keymap::keymap;

/// What the host should do in response to a key
#[derive(Debug, PartialEq, Eq)]
enum Action {
    Continue,
    Reset,
    Quit,
}

/// Puts the terminal into raw mode on an alternate screen and restores it when dropped,
/// however the run loop exits.
struct TerminalGuard {
    reports_release: bool,
}

impl TerminalGuard {
    fn enter(out: &mut impl Write) -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        execute!(
            out,
            terminal::EnterAlternateScreen,
            cursor::Hide,
            terminal::Clear(terminal::ClearType::All)
        )?;
        let reports_release = terminal::supports_keyboard_enhancement().unwrap_or(false);
        if reports_release {
            execute!(
                out,
                PushKeyboardEnhancementFlags(KeyboardEnhancementFlags::REPORT_EVENT_TYPES)
            )?;
        }
        debug!("terminal ready; key releases reported: {}", reports_release);
        Ok(TerminalGuard { reports_release })
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let mut out = io::stdout();
        if self.reports_release {
            let _ = execute!(out, PopKeyboardEnhancementFlags);
        }
        let _ = execute!(out, cursor::Show, terminal::LeaveAlternateScreen);
        let _ = terminal::disable_raw_mode();
    }
}

/// Runs a loaded program until the user quits.
///
/// Each iteration renders a pending frame, drains terminal input into the keypad,
/// ticks once and then sleeps off the rest of the cycle.
pub fn run(mut chip8: Chip8, clock_speed: u32) -> Result<()> {
    let guard = TerminalGuard::enter(&mut io::stdout()).context("unable to prepare the terminal")?;
    let mut display = TerminalDisplay::new(io::stdout());
    check_terminal_size()?;
    let mut keypad = TerminalKeypad::new(guard.reports_release);

    // Set initial timing
    let cycle_time = Duration::from_secs_f64(1.0 / f64::from(clock_speed.max(1)));
    let mut last_cycle = Instant::now();

    'event: loop {
        // Render the current frame if it changed
        chip8
            .draw_frame(&mut display)
            .context("unable to draw frame")?;

        // Handle input
        while event::poll(Duration::ZERO)? {
            match event::read()? {
                Event::Key(key) => match handle_key(key, &mut keypad, Instant::now()) {
                    Action::Quit => break 'event,
                    Action::Reset => {
                        info!("resetting");
                        chip8.reset();
                        keypad.clear();
                        display.render(chip8.frame())?;
                    }
                    Action::Continue => {}
                },
                Event::Resize(..) => {
                    check_terminal_size()?;
                    display.render(chip8.frame())?;
                }
                _ => {}
            }
        }
        keypad.expire(Instant::now());

        // Update state
        chip8.tick(&mut keypad);

        // Handle timing
        let elapsed_cycle_time = last_cycle.elapsed();
        if cycle_time > elapsed_cycle_time {
            std::thread::sleep(cycle_time - elapsed_cycle_time);
        }
        last_cycle = Instant::now();
    }

    info!("quitting");
    Ok(())
}

/// Warns when the terminal can't show a whole frame
fn check_terminal_size() -> io::Result<()> {
    let (needed_cols, needed_rows) = TerminalDisplay::<io::Stdout>::size();
    let (cols, rows) = terminal::size()?;
    if cols < needed_cols || rows < needed_rows {
        warn!(
            "terminal is {}x{} but a frame needs {}x{}",
            cols, rows, needed_cols, needed_rows
        );
    }
    Ok(())
}

fn handle_key(key: KeyEvent, keypad: &mut TerminalKeypad, now: Instant) -> Action {
    let down = key.kind != KeyEventKind::Release;
    match key.code {
        KeyCode::Esc if down => Action::Quit,
        KeyCode::Char('c') if down && key.modifiers.contains(KeyModifiers::CONTROL) => {
            Action::Quit
        }
        KeyCode::F(5) if down => Action::Reset,
        code => {
            if let Some(k) = keymap(code) {
                if down {
                    keypad.key_down(k, now);
                } else {
                    keypad.key_up(k);
                }
            }
            Action::Continue
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyEventState;
    use term8_core::Keypad;

    fn key(code: KeyCode, modifiers: KeyModifiers, kind: KeyEventKind) -> KeyEvent {
        KeyEvent {
            code,
            modifiers,
            kind,
            state: KeyEventState::NONE,
        }
    }

    #[test]
    fn test_quit_keys() {
        let mut keypad = TerminalKeypad::new(true);
        let now = Instant::now();
        let esc = key(KeyCode::Esc, KeyModifiers::NONE, KeyEventKind::Press);
        let ctrl_c = key(KeyCode::Char('c'), KeyModifiers::CONTROL, KeyEventKind::Press);
        assert_eq!(handle_key(esc, &mut keypad, now), Action::Quit);
        assert_eq!(handle_key(ctrl_c, &mut keypad, now), Action::Quit);
    }

    #[test]
    fn test_plain_c_is_a_keypad_key() {
        let mut keypad = TerminalKeypad::new(true);
        let c = key(KeyCode::Char('c'), KeyModifiers::NONE, KeyEventKind::Press);
        assert_eq!(handle_key(c, &mut keypad, Instant::now()), Action::Continue);
        assert!(keypad.is_pressed(0xB));
    }

    #[test]
    fn test_reset_key() {
        let mut keypad = TerminalKeypad::new(true);
        let f5 = key(KeyCode::F(5), KeyModifiers::NONE, KeyEventKind::Press);
        assert_eq!(handle_key(f5, &mut keypad, Instant::now()), Action::Reset);
    }

    #[test]
    fn test_release_lifts_key() {
        let mut keypad = TerminalKeypad::new(true);
        let now = Instant::now();
        handle_key(
            key(KeyCode::Char('w'), KeyModifiers::NONE, KeyEventKind::Press),
            &mut keypad,
            now,
        );
        assert!(keypad.is_pressed(0x5));
        handle_key(
            key(KeyCode::Char('w'), KeyModifiers::NONE, KeyEventKind::Release),
            &mut keypad,
            now,
        );
        assert!(!keypad.is_pressed(0x5));
    }
}
