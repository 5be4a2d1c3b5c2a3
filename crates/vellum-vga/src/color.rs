// crates/vellum-vga/src/color.rs: 16-entry text-mode palette and name lookup.

/// The 16 foreground colors of the standard text-mode palette, in hardware
/// order.
#[derive(Clone, Copy, Eq, PartialEq, Debug)]
#[repr(u8)]
pub enum Color {
    Black = 0x0,
    Blue,
    Green,
    Cyan,
    Red,
    Magenta,
    Brown,
    LightGray,
    DarkGray,
    LightBlue,
    LightGreen,
    LightCyan,
    LightRed,
    LightMagenta,
    Yellow,
    White,
}

/// Fallback for names no palette entry matches.
pub const DEFAULT_COLOR: Color = Color::White;

/// Attribute byte for blanked cells and default-color output: white on black.
pub const DEFAULT_ATTR: u8 = attribute(DEFAULT_COLOR);

const NAMES: [(&str, Color); 16] = [
    ("black", Color::Black),
    ("blue", Color::Blue),
    ("green", Color::Green),
    ("cyan", Color::Cyan),
    ("red", Color::Red),
    ("magenta", Color::Magenta),
    ("brown", Color::Brown),
    ("light_gray", Color::LightGray),
    ("dark_gray", Color::DarkGray),
    ("light_blue", Color::LightBlue),
    ("light_green", Color::LightGreen),
    ("light_cyan", Color::LightCyan),
    ("light_red", Color::LightRed),
    ("light_magenta", Color::LightMagenta),
    ("yellow", Color::Yellow),
    ("white", Color::White),
];

/// Build an attribute byte from a foreground color. The background nibble
/// stays black; background selection is not part of this driver.
pub const fn attribute(fg: Color) -> u8 {
    fg as u8
}

/// Map a human-readable color name to its palette entry, ignoring ASCII
/// case. Total: anything unrecognized, including the empty string, resolves
/// to white.
pub fn resolve_color(name: &str) -> Color {
    for (candidate, color) in NAMES {
        if candidate.eq_ignore_ascii_case(name) {
            return color;
        }
    }
    DEFAULT_COLOR
}
