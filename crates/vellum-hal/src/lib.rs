#![no_std]

// crates/vellum-hal/src/lib.rs: byte-granularity port access behind a swappable bus.

/// Byte-wide I/O on a 16-bit port address space.
///
/// The display driver only talks to hardware through this trait, so the same
/// code drives the real CRT controller in ring 0 and a software register file
/// in hosted runs and tests.
pub trait PortBus {
    fn read(&mut self, port: u16) -> u8;
    fn write(&mut self, port: u16, value: u8);
}

#[cfg(target_arch = "x86_64")]
mod local;

#[cfg(target_arch = "x86_64")]
pub use local::LocalPorts;
