use std::io::{self, Write};

use crossterm::style::{PrintStyledContent, Stylize};
use crossterm::{cursor, queue};

use term8_core::constants::{DISPLAY_HEIGHT, DISPLAY_WIDTH};
use term8_core::{Display, FrameBuffer};

const LIT: &str = "██";
const UNLIT: &str = "  ";

/// # Display
/// The display is composed of 64x32 black/white pixels.
/// Each pixel is drawn as two terminal cells so that it comes out roughly square.
/// The display only gets a call to `render` when the frame buffer is updated.
pub struct TerminalDisplay<W: Write> {
    out: W,
}

impl<W: Write> TerminalDisplay<W> {
    /// Creates a new display that writes to `out`, usually stdout in raw mode.
    pub fn new(out: W) -> Self {
        TerminalDisplay { out }
    }

    /// Number of terminal columns and rows needed to show a whole frame
    pub fn size() -> (u16, u16) {
        ((DISPLAY_WIDTH * LIT.chars().count()) as u16, DISPLAY_HEIGHT as u16)
    }

    /// Formats a frame as one line of text per row.
    ///
    /// # Arguments
    /// * `frame` the frame to format
    pub fn frame_to_rows(frame: &FrameBuffer) -> Vec<String> {
        frame
            .rows()
            .map(|row| {
                row.iter()
                    .map(|&lit| if lit { LIT } else { UNLIT })
                    .collect::<String>()
            })
            .collect()
    }

    #[cfg(test)]
    fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Display for TerminalDisplay<W> {
    type Error = io::Error;

    /// Repaints every row of the frame starting at the top-left corner of the terminal.
    fn render(&mut self, frame: &FrameBuffer) -> io::Result<()> {
        for (y, row) in Self::frame_to_rows(frame).iter().enumerate() {
            queue!(
                self.out,
                cursor::MoveTo(0, y as u16),
                PrintStyledContent(row.as_str().white())
            )?;
        }
        self.out.flush()
    }
}
