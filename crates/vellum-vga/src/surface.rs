// crates/vellum-vga/src/surface.rs: bounds-checked access to the cell buffer.

use crate::{SURFACE_BYTES, VGA_TEXT_BASE, VgaError};

/// Byte-granular access to the display surface. Implementations report
/// out-of-range offsets instead of touching memory.
pub trait Surface {
    fn len(&self) -> usize;
    fn load(&self, offset: usize) -> Result<u8, VgaError>;
    fn store(&mut self, offset: usize, value: u8) -> Result<(), VgaError>;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// The live text framebuffer. Accesses are volatile; the mapping is device
/// memory, not RAM.
pub struct MappedSurface {
    base: *mut u8,
    len: usize,
}

// SAFETY: the mapping is process-wide device memory and the driver holding
// the surface is the only writer in this model.
unsafe impl Send for MappedSurface {}

impl MappedSurface {
    /// # Safety
    ///
    /// `base..base + len` must be a valid, live device mapping that nothing
    /// else accesses while this surface exists.
    pub const unsafe fn new(base: *mut u8, len: usize) -> Self {
        Self { base, len }
    }

    /// The standard text-mode buffer at 0xB8000.
    ///
    /// # Safety
    ///
    /// Only meaningful where that physical range is identity-mapped and the
    /// adapter is in text mode.
    pub const unsafe fn vga_text() -> Self {
        // SAFETY: forwarded to the caller's contract above.
        unsafe { Self::new(VGA_TEXT_BASE as *mut u8, SURFACE_BYTES) }
    }
}

impl Surface for MappedSurface {
    fn len(&self) -> usize {
        self.len
    }

    fn load(&self, offset: usize) -> Result<u8, VgaError> {
        if offset >= self.len {
            return Err(VgaError::OffsetOutOfRange);
        }
        // SAFETY: offset is inside the mapping guaranteed by `new`; volatile
        // keeps MMIO semantics.
        Ok(unsafe { core::ptr::read_volatile(self.base.add(offset)) })
    }

    fn store(&mut self, offset: usize, value: u8) -> Result<(), VgaError> {
        if offset >= self.len {
            return Err(VgaError::OffsetOutOfRange);
        }
        // SAFETY: as in `load`.
        unsafe { core::ptr::write_volatile(self.base.add(offset), value) };
        Ok(())
    }
}

/// Plain in-memory surface with the standard geometry, for hosted runs and
/// tests.
pub struct ShadowSurface {
    bytes: [u8; SURFACE_BYTES],
}

impl ShadowSurface {
    pub const fn new() -> Self {
        Self {
            bytes: [0; SURFACE_BYTES],
        }
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }
}

impl Default for ShadowSurface {
    fn default() -> Self {
        Self::new()
    }
}

impl Surface for ShadowSurface {
    fn len(&self) -> usize {
        SURFACE_BYTES
    }

    fn load(&self, offset: usize) -> Result<u8, VgaError> {
        self.bytes
            .get(offset)
            .copied()
            .ok_or(VgaError::OffsetOutOfRange)
    }

    fn store(&mut self, offset: usize, value: u8) -> Result<(), VgaError> {
        match self.bytes.get_mut(offset) {
            Some(slot) => {
                *slot = value;
                Ok(())
            }
            None => Err(VgaError::OffsetOutOfRange),
        }
    }
}
