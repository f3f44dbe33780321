//! Colour themes for the terminal user interface.

use ratatui::style::Color;

/// A render palette. Two ship: light and dark, toggled at runtime with the
/// persisted dark-mode flag.
pub struct Theme {
    pub fg: Color,
    pub dim: Color,
    pub accent: Color,
    pub highlight_bg: Color,
    pub highlight_fg: Color,
    pub overdue: Color,
    pub bar_bg: Color,
    pub bar_fg: Color,
}

pub const DARK: Theme = Theme {
    fg: Color::White,
    dim: Color::DarkGray,
    accent: Color::Cyan,
    highlight_bg: Color::Gray,
    highlight_fg: Color::Black,
    overdue: Color::Rgb(239, 68, 68),
    bar_bg: Color::Rgb(30, 41, 59),
    bar_fg: Color::White,
};

pub const LIGHT: Theme = Theme {
    fg: Color::Black,
    dim: Color::Gray,
    accent: Color::Blue,
    highlight_bg: Color::Blue,
    highlight_fg: Color::White,
    overdue: Color::Rgb(185, 28, 28),
    bar_bg: Color::Rgb(226, 232, 240),
    bar_fg: Color::Black,
};

/// Select the palette for the current dark-mode flag.
pub fn theme(dark_mode: bool) -> &'static Theme {
    if dark_mode {
        &DARK
    } else {
        &LIGHT
    }
}

/// Parse a "#RRGGBB" hex string into a terminal color. Anything else maps
/// to the theme-neutral default.
pub fn hex_color(hex: &str) -> Color {
    let hex = hex.trim_start_matches('#');
    if hex.len() != 6 || !hex.is_ascii() {
        return Color::Reset;
    }
    match (
        u8::from_str_radix(&hex[0..2], 16),
        u8::from_str_radix(&hex[2..4], 16),
        u8::from_str_radix(&hex[4..6], 16),
    ) {
        (Ok(r), Ok(g), Ok(b)) => Color::Rgb(r, g, b),
        _ => Color::Reset,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_color() {
        assert_eq!(hex_color("#EF4444"), Color::Rgb(0xEF, 0x44, 0x44));
        assert_eq!(hex_color("EF4444"), Color::Rgb(0xEF, 0x44, 0x44));
        assert_eq!(hex_color("#nope"), Color::Reset);
    }
}
