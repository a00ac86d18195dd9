use crate::constants::{DISPLAY_HEIGHT, DISPLAY_WIDTH};

/// # Frame Buffer
/// The display is composed of 64x32 monochrome pixels stored row-major,
/// so pixel `(x, y)` lives at index `y * DISPLAY_WIDTH + x`.
///
/// Pixels only change by clearing the whole buffer or by XOR-ing a sprite onto it.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct FrameBuffer {
    pixels: [bool; DISPLAY_WIDTH * DISPLAY_HEIGHT],
}

impl FrameBuffer {
    pub fn new() -> Self {
        FrameBuffer {
            pixels: [false; DISPLAY_WIDTH * DISPLAY_HEIGHT],
        }
    }

    pub fn clear(&mut self) {
        self.pixels = [false; DISPLAY_WIDTH * DISPLAY_HEIGHT];
    }

    /// Whether the pixel at column `x`, row `y` is lit; anything off-screen is unlit
    pub fn pixel(&self, x: usize, y: usize) -> bool {
        x < DISPLAY_WIDTH && y < DISPLAY_HEIGHT && self.pixels[y * DISPLAY_WIDTH + x]
    }

    pub fn as_slice(&self) -> &[bool] {
        &self.pixels
    }

    /// Iterates over the rows of the frame from top to bottom
    pub fn rows(&self) -> impl Iterator<Item = &[bool]> {
        self.pixels.chunks(DISPLAY_WIDTH)
    }

    pub fn is_blank(&self) -> bool {
        self.pixels.iter().all(|pixel| !pixel)
    }

    /// XORs an 8-pixel wide sprite onto the frame with its top-left corner at `(x, y)`.
    ///
    /// Each byte of `sprite` is one row, most significant bit leftmost.
    /// The origin wraps onto the screen but the sprite itself is clipped at the edges.
    /// Returns true if any lit pixel was turned off.
    pub fn draw_sprite(&mut self, x: u8, y: u8, sprite: &[u8]) -> bool {
        let origin_x = x as usize % DISPLAY_WIDTH;
        let origin_y = y as usize % DISPLAY_HEIGHT;
        let mut collision = false;

        for (row, byte) in sprite.iter().enumerate() {
            let py = origin_y + row;
            if py >= DISPLAY_HEIGHT {
                break;
            }
            for bit in 0..8 {
                let px = origin_x + bit;
                if px >= DISPLAY_WIDTH {
                    break;
                }
                if (byte >> (7 - bit)) & 1 == 1 {
                    let pixel = &mut self.pixels[py * DISPLAY_WIDTH + px];
                    collision |= *pixel;
                    *pixel = !*pixel;
                }
            }
        }

        collision
    }
}

impl Default for FrameBuffer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_draws_msb_first() {
        let mut frame = FrameBuffer::new();
        let collided = frame.draw_sprite(0, 0, &[0b1100_0000]);
        assert!(!collided);
        assert!(frame.pixel(0, 0));
        assert!(frame.pixel(1, 0));
        assert!(!frame.pixel(2, 0));
    }

    #[test]
    fn test_collides_and_erases() {
        let mut frame = FrameBuffer::new();
        frame.draw_sprite(3, 4, &[0xFF, 0x81]);
        assert!(frame.draw_sprite(3, 4, &[0xFF, 0x81]));
        assert!(frame.is_blank());
    }

    #[test]
    fn test_xor_without_overlap_doesnt_collide() {
        let mut frame = FrameBuffer::new();
        frame.draw_sprite(0, 0, &[0b1010_0000]);
        assert!(!frame.draw_sprite(0, 0, &[0b0101_0000]));
        assert!(frame.pixel(0, 0) && frame.pixel(1, 0) && frame.pixel(2, 0) && frame.pixel(3, 0));
    }

    #[test]
    fn test_clips_right_edge() {
        let mut frame = FrameBuffer::new();
        frame.draw_sprite(60, 0, &[0xFF]);
        let lit: Vec<usize> = (0..DISPLAY_WIDTH).filter(|&x| frame.pixel(x, 0)).collect();
        assert_eq!(lit, vec![60, 61, 62, 63]);
        // nothing wrapped around onto the next row or the left edge
        assert!(!frame.pixel(0, 0));
        assert!(!frame.pixel(0, 1));
    }

    #[test]
    fn test_clips_bottom_edge() {
        let mut frame = FrameBuffer::new();
        frame.draw_sprite(0, 30, &[0x80, 0x80, 0x80, 0x80]);
        assert!(frame.pixel(0, 30));
        assert!(frame.pixel(0, 31));
        assert!(!frame.pixel(0, 0));
        assert!(!frame.pixel(0, 1));
    }

    #[test]
    fn test_origin_wraps() {
        let mut frame = FrameBuffer::new();
        // 70 % 64 = 6, 33 % 32 = 1
        frame.draw_sprite(70, 33, &[0x80]);
        assert!(frame.pixel(6, 1));
    }

    #[test]
    fn test_rows_are_row_major() {
        let mut frame = FrameBuffer::new();
        frame.draw_sprite(2, 1, &[0x80]);
        let rows: Vec<&[bool]> = frame.rows().collect();
        assert_eq!(rows.len(), DISPLAY_HEIGHT);
        assert!(rows[1][2]);
        assert!(frame.as_slice()[DISPLAY_WIDTH + 2]);
    }

    #[test]
    fn test_clear() {
        let mut frame = FrameBuffer::new();
        frame.draw_sprite(0, 0, &[0xFF]);
        frame.clear();
        assert!(frame.is_blank());
    }
}
