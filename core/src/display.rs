use crate::frame::FrameBuffer;

/// # Display
/// Anything that can show a frame: a terminal, a window, a test recorder.
///
/// `render` only gets called when the frame buffer changed. It borrows the frame,
/// so an implementation that wants to keep it around has to copy it.
pub trait Display {
    type Error;

    fn render(&mut self, frame: &FrameBuffer) -> Result<(), Self::Error>;
}
