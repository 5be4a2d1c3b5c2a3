// crates/vellum-hal/src/local.rs: ring-0 port bus over the CPU's IN/OUT instructions.

use crate::PortBus;
use x86_64::instructions::port::Port;

/// Port bus backed by direct x86 port I/O.
pub struct LocalPorts {
    _private: (),
}

impl LocalPorts {
    /// # Safety
    ///
    /// Port I/O faults outside ring 0. The caller asserts the code runs
    /// privileged for as long as this value is used.
    pub const unsafe fn new() -> Self {
        Self { _private: () }
    }
}

impl PortBus for LocalPorts {
    fn read(&mut self, port: u16) -> u8 {
        let mut port: Port<u8> = Port::new(port);
        // SAFETY: constructing `LocalPorts` asserted ring-0 execution.
        unsafe { port.read() }
    }

    fn write(&mut self, port: u16, value: u8) {
        let mut port: Port<u8> = Port::new(port);
        // SAFETY: constructing `LocalPorts` asserted ring-0 execution.
        unsafe { port.write(value) }
    }
}
