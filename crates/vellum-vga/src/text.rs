// crates/vellum-vga/src/text.rs: character/string output, line wrap, scroll.

use crate::color;
use crate::crtc;
use crate::surface::Surface;
use crate::{
    BLANK_CHAR, CELL_BYTES, COLS, LINE_SPAN_BYTES, ROWS, SCROLL_SPAN_BYTES, SURFACE_BYTES,
    VgaError,
};
use vellum_hal::PortBus;

/// Fixed geometry plus the cursor the driver came up with, reported once at
/// bring-up.
#[derive(Clone, Copy)]
pub struct VgaInitReport {
    pub rows: usize,
    pub cols: usize,
    pub surface_bytes: usize,
    pub cursor: usize,
}

/// Text-mode driver: owns the port bus for cursor access and the mapped cell
/// buffer. Single writer, no internal locking; callers needing mutual
/// exclusion serialize outside.
pub struct TextVga<B: PortBus, S: Surface> {
    bus: B,
    surface: S,
}

impl<B: PortBus, S: Surface> TextVga<B, S> {
    pub const fn new(bus: B, surface: S) -> Self {
        Self { bus, surface }
    }

    /// Read-only view of the cell buffer.
    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn init_report(&mut self) -> Result<VgaInitReport, VgaError> {
        Ok(VgaInitReport {
            rows: ROWS,
            cols: COLS,
            surface_bytes: self.surface.len(),
            cursor: self.cursor()?,
        })
    }

    /// Current cursor as a byte offset. The hardware registers are the
    /// source of truth; a register value pointing outside the surface is
    /// reported, not used.
    pub fn cursor(&mut self) -> Result<usize, VgaError> {
        let offset = crtc::read_cursor(&mut self.bus);
        if offset >= SURFACE_BYTES {
            return Err(VgaError::OffsetOutOfRange);
        }
        Ok(offset)
    }

    /// Move the hardware cursor. Offsets must be cell-aligned and inside the
    /// surface.
    pub fn set_cursor(&mut self, offset: usize) -> Result<(), VgaError> {
        if offset % CELL_BYTES != 0 {
            return Err(VgaError::UnalignedOffset);
        }
        if offset >= SURFACE_BYTES {
            return Err(VgaError::OffsetOutOfRange);
        }
        crtc::write_cursor(&mut self.bus, offset);
        Ok(())
    }

    /// Put one character at `offset` in the named color.
    pub fn print_char(&mut self, ch: u8, color: &str, offset: usize) -> Result<(), VgaError> {
        self.write_cell(ch, color::attribute(color::resolve_color(color)), offset)
    }

    /// Put one character at `offset` in the default color.
    pub fn print_char_default(&mut self, ch: u8, offset: usize) -> Result<(), VgaError> {
        self.write_cell(ch, color::DEFAULT_ATTR, offset)
    }

    fn write_cell(&mut self, ch: u8, attr: u8, offset: usize) -> Result<(), VgaError> {
        if offset % CELL_BYTES != 0 {
            return Err(VgaError::UnalignedOffset);
        }
        self.surface.store(offset, ch)?;
        self.surface.store(offset + 1, attr)
    }

    /// Write `message` at the cursor, wrapping on newlines and scrolling
    /// when output runs past the end of the surface.
    ///
    /// The cursor is read once up front, advanced in a local working offset,
    /// and committed once at the end, so a string costs two hardware
    /// round-trips regardless of length. The committed cursor is always
    /// cell-aligned and inside the surface.
    pub fn print_string(&mut self, message: &str, color: &str) -> Result<(), VgaError> {
        let attr = color::attribute(color::resolve_color(color));
        let mut offset = self.cursor()?;
        for byte in message.bytes() {
            offset = self.scrolled_into_range(offset)?;
            if byte == b'\n' {
                // The newline consumes its cell, then jumps to the next
                // line boundary. No glyph is stored for it.
                offset += CELL_BYTES;
                offset += line_wrap_gap(offset);
            } else {
                self.write_cell(byte, attr, offset)?;
                offset += CELL_BYTES;
            }
        }
        let offset = self.scrolled_into_range(offset)?;
        self.set_cursor(offset)
    }

    /// Scroll until `offset` is back inside the surface: one scroll per line
    /// overflowed, compensating by one line span each time.
    fn scrolled_into_range(&mut self, mut offset: usize) -> Result<usize, VgaError> {
        while offset >= SURFACE_BYTES {
            self.scroll_down()?;
            offset -= LINE_SPAN_BYTES;
        }
        Ok(offset)
    }

    /// Discard the oldest line: move everything up by one line span, park
    /// the cursor at the vacated line and blank it.
    pub fn scroll_down(&mut self) -> Result<(), VgaError> {
        for offset in 0..SCROLL_SPAN_BYTES {
            let byte = self.surface.load(offset + LINE_SPAN_BYTES)?;
            self.surface.store(offset, byte)?;
        }
        self.set_cursor(SCROLL_SPAN_BYTES)?;
        self.fill_row_with_char(SCROLL_SPAN_BYTES, BLANK_CHAR)
    }

    /// Write `ch` with the default attribute into one line span starting at
    /// `start`.
    pub fn fill_row_with_char(&mut self, start: usize, ch: u8) -> Result<(), VgaError> {
        let mut offset = start;
        while offset < start + LINE_SPAN_BYTES {
            self.write_cell(ch, color::DEFAULT_ATTR, offset)?;
            offset += CELL_BYTES;
        }
        Ok(())
    }

    /// Park the cursor at the origin and write `ch` into every cell.
    pub fn fill_screen_with_char(&mut self, ch: u8) -> Result<(), VgaError> {
        self.set_cursor(0)?;
        let mut start = 0;
        while start < SURFACE_BYTES {
            self.fill_row_with_char(start, ch)?;
            start += LINE_SPAN_BYTES;
        }
        Ok(())
    }

    /// Blank the whole surface; the cursor ends at the origin.
    pub fn clear_screen(&mut self) -> Result<(), VgaError> {
        self.fill_screen_with_char(BLANK_CHAR)
    }
}

/// Bytes from `offset` to the start of the next line.
///
/// An offset already on a boundary gets a full line span, so a newline at
/// the start of a line skips to the next one.
const fn line_wrap_gap(offset: usize) -> usize {
    LINE_SPAN_BYTES - (offset % LINE_SPAN_BYTES)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::DEFAULT_ATTR;
    use crate::crtc::SoftCrtc;
    use crate::surface::ShadowSurface;

    fn console() -> TextVga<SoftCrtc, ShadowSurface> {
        TextVga::new(SoftCrtc::new(), ShadowSurface::new())
    }

    #[test]
    fn prints_string_at_cursor_with_resolved_color() {
        let mut vga = console();
        vga.print_string("AB", "red").unwrap();
        assert_eq!(&vga.surface().bytes()[0..4], &[b'A', 0x4, b'B', 0x4]);
        assert_eq!(vga.cursor().unwrap(), 4);
    }

    #[test]
    fn cursor_advances_two_bytes_per_character() {
        let mut vga = console();
        vga.print_string("0123456789", "white").unwrap();
        assert_eq!(vga.cursor().unwrap(), 20);
    }

    #[test]
    fn unknown_color_prints_white() {
        let mut vga = console();
        vga.print_char(b'Q', "chartreuse", 0).unwrap();
        assert_eq!(&vga.surface().bytes()[0..2], &[b'Q', 0xF]);
    }

    #[test]
    fn newline_jumps_to_next_line_boundary() {
        let mut vga = console();
        vga.print_string("A\nB", "white").unwrap();
        let bytes = vga.surface().bytes();
        assert_eq!(bytes[0], b'A');
        // the newline's own cell is left untouched
        assert_eq!(&bytes[2..4], &[0, 0]);
        assert_eq!(bytes[LINE_SPAN_BYTES], b'B');
        assert_eq!(vga.cursor().unwrap(), LINE_SPAN_BYTES + CELL_BYTES);
    }

    #[test]
    fn newline_on_a_boundary_skips_a_full_line() {
        let mut vga = console();
        vga.set_cursor(LINE_SPAN_BYTES - CELL_BYTES).unwrap();
        vga.print_string("\nZ", "white").unwrap();
        // consuming the last cell of the line lands exactly on a boundary,
        // and the wrap gap from there is a whole line span
        assert_eq!(vga.surface().bytes()[2 * LINE_SPAN_BYTES], b'Z');
        assert_eq!(vga.cursor().unwrap(), 2 * LINE_SPAN_BYTES + CELL_BYTES);
    }

    #[test]
    fn writing_past_the_end_scrolls_one_line() {
        let mut vga = console();
        vga.print_char(b'M', "green", LINE_SPAN_BYTES).unwrap();
        vga.set_cursor(SURFACE_BYTES - CELL_BYTES).unwrap();
        vga.print_string("XY", "white").unwrap();
        let cursor = vga.cursor().unwrap();
        let bytes = vga.surface().bytes();
        // the marker moved up by one line span
        assert_eq!(&bytes[0..2], &[b'M', 0x2]);
        assert_eq!(&bytes[LINE_SPAN_BYTES..LINE_SPAN_BYTES + 2], &[0, 0]);
        // 'X' went in just before the scroll and moved with everything else
        assert_eq!(bytes[SURFACE_BYTES - CELL_BYTES - LINE_SPAN_BYTES], b'X');
        // 'Y' starts the vacated line
        assert_eq!(bytes[SCROLL_SPAN_BYTES], b'Y');
        assert_eq!(cursor, SCROLL_SPAN_BYTES + CELL_BYTES);
        // the rest of the vacated line is blank in the default attribute
        let mut offset = SCROLL_SPAN_BYTES + CELL_BYTES;
        while offset < SURFACE_BYTES {
            assert_eq!(bytes[offset], BLANK_CHAR);
            assert_eq!(bytes[offset + 1], DEFAULT_ATTR);
            offset += CELL_BYTES;
        }
    }

    #[test]
    fn long_output_scrolls_once_per_line_overflowed() {
        let mut vga = console();
        vga.set_cursor(SCROLL_SPAN_BYTES).unwrap();
        // two full lines from the last line's start: overflows twice, and
        // the cursor comes back to the start of the vacated line
        let message = [b'a'; 2 * LINE_SPAN_BYTES / CELL_BYTES];
        vga.print_string(core::str::from_utf8(&message).unwrap(), "white")
            .unwrap();
        assert_eq!(vga.cursor().unwrap(), SCROLL_SPAN_BYTES);
        // both lines of glyphs are still on screen, one span apart
        let bytes = vga.surface().bytes();
        assert_eq!(bytes[SCROLL_SPAN_BYTES - 2 * LINE_SPAN_BYTES], b'a');
        assert_eq!(bytes[SCROLL_SPAN_BYTES - LINE_SPAN_BYTES], b'a');
    }

    #[test]
    fn newline_at_surface_end_converges_into_range() {
        let mut vga = console();
        vga.set_cursor(SURFACE_BYTES - CELL_BYTES).unwrap();
        vga.print_string("\n", "white").unwrap();
        let cursor = vga.cursor().unwrap();
        assert_eq!(cursor, SCROLL_SPAN_BYTES);
        assert_eq!(cursor % CELL_BYTES, 0);
    }

    #[test]
    fn scroll_down_shifts_copies_and_blanks() {
        let mut vga = console();
        vga.print_string("top", "blue").unwrap();
        vga.scroll_down().unwrap();
        let cursor = vga.cursor().unwrap();
        let bytes = vga.surface().bytes();
        // "top" was in the discarded first line
        assert_ne!(&bytes[0..2], &[b't', 0x1]);
        assert_eq!(cursor, SCROLL_SPAN_BYTES);
        let mut offset = SCROLL_SPAN_BYTES;
        while offset < SURFACE_BYTES {
            assert_eq!(bytes[offset], BLANK_CHAR);
            assert_eq!(bytes[offset + 1], DEFAULT_ATTR);
            offset += CELL_BYTES;
        }
    }

    #[test]
    fn clear_screen_blanks_every_cell_and_homes_cursor() {
        let mut vga = console();
        vga.print_string("hello\nworld", "cyan").unwrap();
        vga.clear_screen().unwrap();
        let bytes = vga.surface().bytes();
        let mut offset = 0;
        while offset < SURFACE_BYTES {
            assert_eq!(bytes[offset], BLANK_CHAR);
            assert_eq!(bytes[offset + 1], DEFAULT_ATTR);
            offset += CELL_BYTES;
        }
        assert_eq!(vga.cursor().unwrap(), 0);
    }

    #[test]
    fn fill_screen_writes_given_glyph_everywhere() {
        let mut vga = console();
        vga.fill_screen_with_char(b'#').unwrap();
        let bytes = vga.surface().bytes();
        assert_eq!(bytes[0], b'#');
        assert_eq!(bytes[SURFACE_BYTES - CELL_BYTES], b'#');
        assert_eq!(bytes[SURFACE_BYTES / 2], b'#');
        assert_eq!(vga.cursor().unwrap(), 0);
    }

    #[test]
    fn cursor_round_trips_through_the_driver() {
        let mut vga = console();
        for offset in [0usize, 2, 160, 2048, SURFACE_BYTES - CELL_BYTES] {
            vga.set_cursor(offset).unwrap();
            assert_eq!(vga.cursor().unwrap(), offset);
        }
    }

    #[test]
    fn rejects_unaligned_and_out_of_range_offsets() {
        let mut vga = console();
        assert_eq!(
            vga.print_char_default(b'x', 3),
            Err(VgaError::UnalignedOffset)
        );
        assert_eq!(
            vga.print_char_default(b'x', SURFACE_BYTES),
            Err(VgaError::OffsetOutOfRange)
        );
        assert_eq!(vga.set_cursor(1), Err(VgaError::UnalignedOffset));
        assert_eq!(vga.set_cursor(SURFACE_BYTES), Err(VgaError::OffsetOutOfRange));
    }

    #[test]
    fn out_of_range_hardware_cursor_is_reported() {
        let mut bus = SoftCrtc::new();
        crtc::write_cursor(&mut bus, SURFACE_BYTES);
        let mut vga = TextVga::new(bus, ShadowSurface::new());
        assert_eq!(vga.cursor(), Err(VgaError::OffsetOutOfRange));
        assert_eq!(
            vga.print_string("x", "white"),
            Err(VgaError::OffsetOutOfRange)
        );
    }

    #[test]
    fn init_report_carries_geometry() {
        let mut vga = console();
        let report = vga.init_report().unwrap();
        assert_eq!(report.rows, 25);
        assert_eq!(report.cols, 80);
        assert_eq!(report.surface_bytes, 4000);
        assert_eq!(report.cursor, 0);
    }

    #[test]
    fn wrap_gap_matches_line_arithmetic() {
        assert_eq!(line_wrap_gap(4), 46);
        assert_eq!(line_wrap_gap(LINE_SPAN_BYTES), LINE_SPAN_BYTES);
        assert_eq!(line_wrap_gap(LINE_SPAN_BYTES - 2), 2);
    }
}
