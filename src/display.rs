use std::io;
use tui::backend::CrosstermBackend;
use tui::layout::Rect;
use tui::style::{Color, Style};
use tui::symbols::Marker;
use tui::widgets::canvas::{Canvas, Points};
use tui::widgets::{Block, Borders};
use tui::Terminal;

/// display width in pixels
pub const DISPLAY_WIDTH: usize = 64;
/// display height in pixels
pub const DISPLAY_HEIGHT: usize = 32;
/// bit-packed size of one frame
pub const DISPLAY_SIZE_BYTES: usize = DISPLAY_WIDTH * DISPLAY_HEIGHT / 8;

/// The machine's own view of the screen: 64x32 one-bit cells, packed
/// row-major with the most significant bit leftmost. Cells are only ever
/// toggled by sprite draws or zeroed wholesale by the clear operation.
pub struct FrameBuffer {
    bits: [u8; DISPLAY_SIZE_BYTES],
}

impl FrameBuffer {
    pub fn new() -> Self {
        FrameBuffer {
            bits: [0; DISPLAY_SIZE_BYTES],
        }
    }

    pub fn clear(&mut self) {
        self.bits = [0; DISPLAY_SIZE_BYTES];
    }

    pub fn pixel(&self, x: usize, y: usize) -> bool {
        let n = y * DISPLAY_WIDTH + x;
        self.bits[n / 8] >> (7 - n % 8) & 1 == 1
    }

    /// XOR an 8-wide sprite into the buffer with its top-left corner at
    /// (x mod 64, y mod 32). Both coordinates wrap toroidally per pixel, so
    /// a sprite off the right edge re-enters on the left rather than being
    /// clipped. Returns true if any previously-set pixel was turned off.
    pub fn draw_sprite(&mut self, x: u8, y: u8, rows: &[u8]) -> bool {
        let origin_x = x as usize % DISPLAY_WIDTH;
        let origin_y = y as usize % DISPLAY_HEIGHT;
        let mut collision = false;
        for (row, byte) in rows.iter().enumerate() {
            let py = (origin_y + row) % DISPLAY_HEIGHT;
            for col in 0..8 {
                if byte >> (7 - col) & 1 == 0 {
                    continue;
                }
                let px = (origin_x + col) % DISPLAY_WIDTH;
                let n = py * DISPLAY_WIDTH + px;
                let mask = 1 << (7 - n % 8);
                if self.bits[n / 8] & mask != 0 {
                    collision = true;
                }
                self.bits[n / 8] ^= mask;
            }
        }
        collision
    }

    /// packed bits, sized for Display::draw
    pub fn as_bytes(&self) -> &[u8] {
        &self.bits
    }
}

impl Default for FrameBuffer {
    fn default() -> Self {
        Self::new()
    }
}

/// Display is used by the host to put the machine's framebuffer on an actual
/// screen. It should abstract the implementation details, so a variety of
/// kinds of screen would work.
pub trait Display {
    /// draw one bit-packed frame
    fn draw(&mut self, data: &[u8]) -> Result<(), io::Error>;

    /// how big the frame data should be
    fn get_display_size_bytes(&mut self) -> usize;
}

// store useful metadata about the terminal
struct Resolution(usize, usize);

impl Resolution {
    fn pixel_count(&self) -> usize {
        self.0 * self.1
    }

    fn byte_count(&self) -> usize {
        self.0 * self.1 / 8
    }

    fn x_bounds(&self) -> [f64; 2] {
        [0.0, (self.0 - 1) as f64]
    }

    fn y_bounds(&self) -> [f64; 2] {
        [-1.0 * (self.1 - 1) as f64, 0.0]
    }

    /// expand one bitplane of packed data into x, y float coords suitable
    /// for a TUI canvas
    fn bitplane_from_data<'a>(
        &self,
        data: &'a [u8],
        bitplane: u8,
    ) -> impl std::iter::Iterator<Item = (f64, f64)> + 'a {
        let mut count = self.pixel_count();
        let w = self.0;
        std::iter::from_fn(move || {
            while count > 0 {
                count -= 1;
                let bit = 1 & (data[count / 8] >> (7 - count % 8));
                if bit == bitplane {
                    return Some((
                        (count % w) as f64,        // x
                        -1.0 * (count / w) as f64, // y
                    ));
                }
            }
            None
        })
    }
}

/// monochrome display in a terminal, rendered using TUI over crossterm
pub struct MonoTermDisplay {
    terminal: Terminal<CrosstermBackend<io::Stdout>>,
    resolution: Resolution,
}

impl MonoTermDisplay {
    pub fn new(x: usize, y: usize) -> Result<MonoTermDisplay, io::Error> {
        let backend = CrosstermBackend::new(io::stdout());
        let terminal = Terminal::new(backend)?;
        Ok(MonoTermDisplay {
            terminal,
            resolution: Resolution(x, y),
        })
    }
}

impl Display for MonoTermDisplay {
    fn draw(&mut self, data: &[u8]) -> Result<(), io::Error> {
        // make sure we're given exactly the right amount of data to draw
        assert_eq!(
            data.len(),
            self.resolution.byte_count(),
            "MonoTermDisplay must have correct-sized data to draw"
        );

        // for now this assumes a 1:1 ratio between terminal, chip8 and the
        // internal TUI canvas
        self.terminal.draw(|f| {
            let size = Rect::new(
                0,
                0,
                2 + self.resolution.0 as u16,
                2 + self.resolution.1 as u16,
            );

            let canvas = Canvas::default()
                .block(
                    Block::default()
                        .title("vip8")
                        .borders(Borders::ALL)
                        .style(Style::default().bg(Color::Black)),
                )
                .x_bounds(self.resolution.x_bounds())
                .y_bounds(self.resolution.y_bounds())
                .marker(Marker::Block)
                .paint(|ctx| {
                    ctx.draw(&Points {
                        coords: &self
                            .resolution
                            .bitplane_from_data(data, 0)
                            .collect::<Vec<_>>(),
                        color: Color::Black,
                    });
                    ctx.draw(&Points {
                        coords: &self
                            .resolution
                            .bitplane_from_data(data, 1)
                            .collect::<Vec<_>>(),
                        color: Color::White,
                    });
                });
            f.render_widget(canvas, size);
        })?;
        Ok(())
    }

    fn get_display_size_bytes(&mut self) -> usize {
        self.resolution.byte_count()
    }
}

/// useful for testing non-display routines
pub struct DummyDisplay;

impl DummyDisplay {
    #[allow(dead_code)]
    pub fn new() -> Result<DummyDisplay, io::Error> {
        Ok(DummyDisplay {})
    }
}

impl Display for DummyDisplay {
    #[allow(unused)]
    fn draw(&mut self, data: &[u8]) -> Result<(), io::Error> {
        Ok(())
    }

    fn get_display_size_bytes(&mut self) -> usize {
        DISPLAY_SIZE_BYTES
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // FrameBuffer tests
    #[test]
    fn test_new_framebuffer_blank() {
        let fb = FrameBuffer::new();
        assert!(fb.as_bytes().iter().all(|&b| b == 0));
    }

    #[test]
    fn test_draw_sets_pixels() {
        let mut fb = FrameBuffer::new();
        let hit = fb.draw_sprite(8, 4, &[0b1010_0001]);
        assert!(!hit);
        assert!(fb.pixel(8, 4));
        assert!(!fb.pixel(9, 4));
        assert!(fb.pixel(10, 4));
        assert!(fb.pixel(15, 4));
    }

    #[test]
    fn test_draw_reports_collision() {
        let mut fb = FrameBuffer::new();
        assert!(!fb.draw_sprite(0, 0, &[0x80]));
        assert!(fb.draw_sprite(0, 0, &[0x80]));
        assert!(!fb.pixel(0, 0));
    }

    #[test]
    fn test_draw_wraps_both_axes() {
        let mut fb = FrameBuffer::new();
        fb.draw_sprite(62, 31, &[0xff, 0xff]);
        // columns 62, 63 then wrap to 0..=5; rows 31 then wrap to 0
        assert!(fb.pixel(62, 31));
        assert!(fb.pixel(63, 31));
        assert!(fb.pixel(0, 31));
        assert!(fb.pixel(5, 31));
        assert!(fb.pixel(62, 0));
        assert!(fb.pixel(5, 0));
        assert!(!fb.pixel(6, 0));
    }

    #[test]
    fn test_origin_wraps_modulo_display() {
        let mut fb = FrameBuffer::new();
        fb.draw_sprite(64 + 3, 32 + 2, &[0x80]);
        assert!(fb.pixel(3, 2));
    }

    #[test]
    fn test_clear_zeroes_everything() {
        let mut fb = FrameBuffer::new();
        fb.draw_sprite(10, 10, &[0xff; 15]);
        fb.clear();
        assert!(fb.as_bytes().iter().all(|&b| b == 0));
    }

    // Resolution tests
    #[test]
    fn test_pixel_count() {
        let r = Resolution(64, 32);
        assert_eq!(r.pixel_count(), 2048)
    }

    #[test]
    fn test_byte_count() {
        let r = Resolution(64, 32);
        assert_eq!(r.byte_count(), 256)
    }

    #[test]
    fn test_x_bounds() {
        let r = Resolution(64, 32);
        assert_eq!(r.x_bounds(), [0.0, 63.0]);
    }

    #[test]
    fn test_y_bounds() {
        let r = Resolution(64, 32);
        assert_eq!(r.y_bounds(), [-31.0, 0.0]);
    }

    #[test]
    fn test_bitplane_iterator() {
        let r = Resolution(64, 32);
        assert_eq!(r.bitplane_from_data(&[0; 256], 1).count(), 0);
        assert_eq!(r.bitplane_from_data(&[0; 256], 0).count(), 2048);
    }

    // DummyDisplay tests
    #[test]
    fn test_dummy_display_size() {
        let mut d = DummyDisplay::new().unwrap();
        assert_eq!(d.get_display_size_bytes(), 256);
    }
}
