// xtask/src/main.rs: hosted dev harness for the display driver.

use anyhow::{Result, anyhow, bail};
use vellum_vga::{CELL_BYTES, COLS, ROWS, ShadowSurface, SoftCrtc, TextVga, VgaError};

type HostConsole = TextVga<SoftCrtc, ShadowSurface>;

fn main() -> Result<()> {
    let mut args = std::env::args().skip(1);
    match args.next().as_deref() {
        Some("demo") => demo(),
        Some(other) => bail!("unknown task `{other}` (expected: demo)"),
        None => bail!("usage: cargo run -p xtask -- demo"),
    }
}

/// Drive the console against the software CRTC and shadow surface, then dump
/// the resulting grid. Lets the output path be eyeballed without a VGA
/// device or ring 0.
fn demo() -> Result<()> {
    let mut vga = HostConsole::new(SoftCrtc::new(), ShadowSurface::new());
    render(&mut vga).map_err(vga_failure)?;
    let report = vga.init_report().map_err(vga_failure)?;
    println!(
        "surface {}x{} ({} bytes), cursor at byte {}",
        report.cols, report.rows, report.surface_bytes, report.cursor
    );
    dump(&vga);
    Ok(())
}

fn render(vga: &mut HostConsole) -> Result<(), VgaError> {
    vga.clear_screen()?;
    vga.print_string("vellum text console\n", "light_green")?;
    vga.print_string("palette: ", "white")?;
    for color in ["red", "yellow", "light_blue", "magenta"] {
        vga.print_string(color, color)?;
        vga.print_string(" ", "white")?;
    }
    vga.print_string("\nwrap and scroll are exercised by the test suite", "light_gray")?;
    Ok(())
}

fn dump(vga: &HostConsole) {
    let bytes = vga.surface().bytes();
    println!("+{}+", "-".repeat(COLS));
    for row in 0..ROWS {
        let mut line = String::with_capacity(COLS);
        for col in 0..COLS {
            let glyph = bytes[(row * COLS + col) * CELL_BYTES];
            if glyph.is_ascii_graphic() || glyph == b' ' {
                line.push(glyph as char);
            } else {
                line.push('.');
            }
        }
        println!("|{line}|");
    }
    println!("+{}+", "-".repeat(COLS));
}

fn vga_failure(error: VgaError) -> anyhow::Error {
    anyhow!("vga: {}", error.as_str())
}
