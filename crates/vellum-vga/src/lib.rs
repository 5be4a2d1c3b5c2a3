#![no_std]

// crates/vellum-vga/src/lib.rs: VGA text-mode display driver core.
//
// Character cells are two bytes (glyph, attribute) in a 25x80 grid mapped at
// 0xB8000. The CRT controller's cursor registers are the sole source of truth
// for where output continues; this crate reads and writes them through a
// `PortBus` and touches the cell buffer only through a bounds-checked
// `Surface`, so the whole driver also runs against software stand-ins.

mod color;
mod crtc;
mod surface;
mod text;

#[cfg(target_arch = "x86_64")]
pub mod global;

pub use color::{Color, DEFAULT_ATTR, DEFAULT_COLOR, attribute, resolve_color};
pub use crtc::SoftCrtc;
pub use surface::{MappedSurface, ShadowSurface, Surface};
pub use text::{TextVga, VgaInitReport};

pub const ROWS: usize = 25;
pub const COLS: usize = 80;
pub const CELL_BYTES: usize = 2;
pub const SURFACE_BYTES: usize = ROWS * COLS * CELL_BYTES;

/// Physical base of the text-mode framebuffer.
pub const VGA_TEXT_BASE: usize = 0xB8000;

/// Glyph used when blanking cells.
pub const BLANK_CHAR: u8 = b' ';

/// Span of one text line in the wrap/scroll arithmetic: 2 * ROWS bytes, i.e.
/// 25 cells. The arithmetic uses the row count where the column count would
/// be expected, so the driver wraps and scrolls in 25-cell lines rather than
/// 80-cell rows; preserved because callers and tests pin the on-screen
/// behavior.
pub const LINE_SPAN_BYTES: usize = 2 * ROWS;

/// Bytes moved by one scroll: every line except the vacated last one.
pub const SCROLL_SPAN_BYTES: usize = LINE_SPAN_BYTES * (COLS - 1);

#[derive(Clone, Copy, Eq, PartialEq, Debug)]
pub enum VgaError {
    OffsetOutOfRange,
    UnalignedOffset,
    NotInitialized,
}

impl VgaError {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::OffsetOutOfRange => "offset_out_of_range",
            Self::UnalignedOffset => "unaligned_offset",
            Self::NotInitialized => "not_initialized",
        }
    }
}
