//! 1bpp framebuffer laid out the way the memory LCD takes it.

use core::convert::Infallible;

use embedded_graphics::{
    pixelcolor::BinaryColor,
    prelude::{DrawTarget, OriginDimensions, Pixel, Point, Size},
};

use crate::config::{SCREEN_HEIGHT, SCREEN_WIDTH};

const WIDTH: usize = SCREEN_WIDTH as usize;
const HEIGHT: usize = SCREEN_HEIGHT as usize;
pub const ROW_BYTES: usize = WIDTH / 8;
pub const ROWS: usize = HEIGHT;

/// One bit per pixel, MSB first within a byte; a set bit is a white pixel.
///
/// A copy of what the panel last received is kept so a flush only sends
/// lines whose final contents differ, however often they were redrawn. A
/// line counts as received only once the driver reports it sent.
pub struct FrameBuffer {
    rows: [[u8; ROW_BYTES]; HEIGHT],
    shown: [[u8; ROW_BYTES]; HEIGHT],
    stale: [bool; HEIGHT],
}

impl Default for FrameBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameBuffer {
    /// A black screen with every row pending, so the first flush is full.
    pub const fn new() -> Self {
        Self {
            rows: [[0; ROW_BYTES]; HEIGHT],
            shown: [[0; ROW_BYTES]; HEIGHT],
            stale: [true; HEIGHT],
        }
    }

    /// Forgets what the panel shows, e.g. after it was cleared.
    pub fn invalidate(&mut self) {
        self.stale = [true; HEIGHT];
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<BinaryColor> {
        let (x, y) = (x as usize, y as usize);
        if x >= WIDTH || y >= HEIGHT {
            return None;
        }
        let on = self.rows[y][x / 8] & (0x80 >> (x % 8)) != 0;
        Some(BinaryColor::from(on))
    }

    fn set_pixel(&mut self, x: usize, y: usize, on: bool) {
        let byte = &mut self.rows[y][x / 8];
        let mask = 0x80 >> (x % 8);
        if on {
            *byte |= mask;
        } else {
            *byte &= !mask;
        }
    }

    pub fn row(&self, y: usize) -> &[u8; ROW_BYTES] {
        &self.rows[y]
    }

    /// True if row `y` differs from what the panel last received.
    pub fn is_pending(&self, y: usize) -> bool {
        self.stale[y] || self.shown[y] != self.rows[y]
    }

    pub fn pending_rows(&self) -> impl Iterator<Item = usize> + '_ {
        (0..HEIGHT).filter(move |&y| self.is_pending(y))
    }

    /// Records row `y` as received by the panel.
    pub fn mark_sent(&mut self, y: usize) {
        self.shown[y] = self.rows[y];
        self.stale[y] = false;
    }
}

impl DrawTarget for FrameBuffer {
    type Color = BinaryColor;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(Point { x, y }, color) in pixels {
            if x < 0 || y < 0 {
                continue;
            }
            let (x, y) = (x as usize, y as usize);
            if x >= WIDTH || y >= HEIGHT {
                continue;
            }
            self.set_pixel(x, y, color.is_on());
        }
        Ok(())
    }
}

impl OriginDimensions for FrameBuffer {
    fn size(&self) -> Size {
        Size::new(SCREEN_WIDTH, SCREEN_HEIGHT)
    }
}
