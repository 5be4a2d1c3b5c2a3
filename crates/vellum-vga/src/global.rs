// crates/vellum-vga/src/global.rs: process-wide console over the real hardware.

use crate::VgaError;
use crate::surface::MappedSurface;
use crate::text::{TextVga, VgaInitReport};
use spin::Mutex;
use vellum_hal::LocalPorts;

type HwConsole = TextVga<LocalPorts, MappedSurface>;

static CONSOLE: Mutex<Option<HwConsole>> = Mutex::new(None);

/// Bring the console up over the text buffer at 0xB8000 and report its
/// geometry and cursor.
///
/// # Safety
///
/// Requires ring 0 and an identity-mapped text-mode framebuffer. Call once,
/// before anything prints.
pub unsafe fn init() -> Result<VgaInitReport, VgaError> {
    // SAFETY: the caller guarantees ring 0 and a live text-mode mapping.
    let mut console = unsafe { TextVga::new(LocalPorts::new(), MappedSurface::vga_text()) };
    let report = console.init_report()?;
    *CONSOLE.lock() = Some(console);
    Ok(report)
}

fn with_console<T>(f: impl FnOnce(&mut HwConsole) -> Result<T, VgaError>) -> Result<T, VgaError> {
    match CONSOLE.lock().as_mut() {
        Some(console) => f(console),
        None => Err(VgaError::NotInitialized),
    }
}

pub fn print_string(message: &str, color: &str) -> Result<(), VgaError> {
    with_console(|console| console.print_string(message, color))
}

pub fn print_char(ch: u8, color: &str, offset: usize) -> Result<(), VgaError> {
    with_console(|console| console.print_char(ch, color, offset))
}

pub fn print_char_default(ch: u8, offset: usize) -> Result<(), VgaError> {
    with_console(|console| console.print_char_default(ch, offset))
}

pub fn clear_screen() -> Result<(), VgaError> {
    with_console(|console| console.clear_screen())
}

pub fn get_cursor() -> Result<usize, VgaError> {
    with_console(|console| console.cursor())
}

pub fn set_cursor(offset: usize) -> Result<(), VgaError> {
    with_console(|console| console.set_cursor(offset))
}
