use crossterm::style::Color as TermColor;

/// 24-bit RGB colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const TEXT:    Self = Self { r: 0xcd, g: 0xd6, b: 0xf4 }; // #cdd6f4
    pub const MUTED:   Self = Self { r: 0xa6, g: 0xad, b: 0xc8 }; // #a6adc8
    pub const PURPLE:  Self = Self { r: 0xcb, g: 0xa6, b: 0xf7 }; // #cba6f7

    /// Parse a CSS-style hex color string (`#RRGGBB` or `#RGB`).
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.trim().trim_start_matches('#');
        if !hex.is_ascii() {
            return None;
        }

        let byte = |s: &str| -> Option<u8> { u8::from_str_radix(s, 16).ok() };
        // `#abc` is shorthand for `#aabbcc`.
        let nibble = |s: &str| -> Option<u8> { byte(s).map(|n| n * 0x11) };

        match hex.len() {
            6 => Some(Self {
                r: byte(&hex[0..2])?,
                g: byte(&hex[2..4])?,
                b: byte(&hex[4..6])?,
            }),
            3 => Some(Self {
                r: nibble(&hex[0..1])?,
                g: nibble(&hex[1..2])?,
                b: nibble(&hex[2..3])?,
            }),
            _ => None,
        }
    }

    /// Convert to a [`crossterm`] colour for styling terminal output.
    #[inline]
    pub fn to_term(self) -> TermColor {
        TermColor::Rgb {
            r: self.r,
            g: self.g,
            b: self.b,
        }
    }
}
