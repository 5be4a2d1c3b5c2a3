// crates/vellum-vga/src/crtc.rs: hardware cursor access through the CRT controller.

use crate::CELL_BYTES;
use vellum_hal::PortBus;

pub const CRTC_ADDR_PORT: u16 = 0x3D4;
pub const CRTC_DATA_PORT: u16 = 0x3D5;
pub const CURSOR_HIGH_REG: u8 = 14;
pub const CURSOR_LOW_REG: u8 = 15;

/// Read the cursor cell index from CRTC registers 14/15 and convert it to a
/// byte offset. Each access selects the register on the address port first.
pub fn read_cursor<B: PortBus>(bus: &mut B) -> usize {
    bus.write(CRTC_ADDR_PORT, CURSOR_HIGH_REG);
    let high = bus.read(CRTC_DATA_PORT) as usize;
    bus.write(CRTC_ADDR_PORT, CURSOR_LOW_REG);
    let low = bus.read(CRTC_DATA_PORT) as usize;
    ((high << 8) | low) * CELL_BYTES
}

/// Write a byte offset to the CRTC cursor registers as a cell index, high
/// byte first.
pub fn write_cursor<B: PortBus>(bus: &mut B, offset: usize) {
    let cell = offset / CELL_BYTES;
    bus.write(CRTC_ADDR_PORT, CURSOR_HIGH_REG);
    bus.write(CRTC_DATA_PORT, (cell >> 8) as u8);
    bus.write(CRTC_ADDR_PORT, CURSOR_LOW_REG);
    bus.write(CRTC_DATA_PORT, (cell & 0xFF) as u8);
}

/// Software CRT controller: the indexed register file behind the address and
/// data port pair, for hosted runs and tests.
pub struct SoftCrtc {
    selected: u8,
    regs: [u8; 256],
}

impl SoftCrtc {
    pub const fn new() -> Self {
        Self {
            selected: 0,
            regs: [0; 256],
        }
    }

    /// Raw register value, bypassing the port protocol.
    pub fn register(&self, index: u8) -> u8 {
        self.regs[index as usize]
    }
}

impl Default for SoftCrtc {
    fn default() -> Self {
        Self::new()
    }
}

impl PortBus for SoftCrtc {
    fn read(&mut self, port: u16) -> u8 {
        match port {
            CRTC_DATA_PORT => self.regs[self.selected as usize],
            _ => 0,
        }
    }

    fn write(&mut self, port: u16, value: u8) {
        match port {
            CRTC_ADDR_PORT => self.selected = value,
            CRTC_DATA_PORT => self.regs[self.selected as usize] = value,
            _ => {}
        }
    }
}
