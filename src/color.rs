use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// A color as written in config files or the badge palettes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Color {
    Ansi256(u8),
    Hex { r: u8, g: u8, b: u8 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColorDepth {
    #[default]
    TrueColor,
    Color256,
    Color16,
}

#[derive(Debug, Error)]
#[error("invalid color value for field \"{field}\": \"{value}\"")]
pub struct ColorParseError {
    pub field: String,
    pub value: String,
}

impl Color {
    /// `#RRGGBB` literal usable in `const` tables.
    pub const fn rgb(hex: u32) -> Self {
        Color::Hex {
            r: ((hex >> 16) & 0xff) as u8,
            g: ((hex >> 8) & 0xff) as u8,
            b: (hex & 0xff) as u8,
        }
    }

    /// Parse a color string with a field name for error reporting.
    ///
    /// Accepts `"0"` through `"255"` (ANSI-256 index), `"#RRGGBB"` and
    /// `"#RGB"`.
    pub fn parse(s: &str, field: &str) -> Result<Self, ColorParseError> {
        let make_err = || ColorParseError {
            field: field.to_owned(),
            value: s.to_owned(),
        };

        if let Some(hex) = s.strip_prefix('#') {
            let channel = |range: std::ops::Range<usize>| {
                hex.get(range)
                    .and_then(|h| u8::from_str_radix(h, 16).ok())
                    .ok_or_else(make_err)
            };
            match hex.len() {
                6 => Ok(Color::Hex {
                    r: channel(0..2)?,
                    g: channel(2..4)?,
                    b: channel(4..6)?,
                }),
                3 => Ok(Color::Hex {
                    r: channel(0..1)? * 17,
                    g: channel(1..2)? * 17,
                    b: channel(2..3)? * 17,
                }),
                _ => Err(make_err()),
            }
        } else {
            let n: u16 = s.parse().map_err(|_| make_err())?;
            u8::try_from(n).map(Color::Ansi256).map_err(|_| make_err())
        }
    }

    /// Convert to a `crossterm::style::Color` at the given terminal color depth.
    ///
    /// ANSI indices 0–15 go through crossterm's named variants so the terminal
    /// applies its own 16-color palette.
    pub fn to_crossterm_color(self, depth: ColorDepth) -> crossterm::style::Color {
        match (depth, self) {
            (ColorDepth::TrueColor, Color::Hex { r, g, b }) => {
                crossterm::style::Color::Rgb { r, g, b }
            }
            (ColorDepth::Color256, Color::Hex { r, g, b }) => {
                crossterm::style::Color::AnsiValue(approximate_ansi256(r, g, b))
            }
            (ColorDepth::TrueColor | ColorDepth::Color256, Color::Ansi256(n)) => {
                ansi_to_crossterm(n)
            }
            (ColorDepth::Color16, _) => {
                let (r, g, b) = self.to_rgb();
                ansi_to_crossterm(approximate_ansi16(r, g, b))
            }
        }
    }

    /// Whether dark text reads better than light text on this background.
    pub fn is_light(self) -> bool {
        let (r, g, b) = self.to_rgb();
        // ITU-R BT.601 luma.
        let luma = 299 * u32::from(r) + 587 * u32::from(g) + 114 * u32::from(b);
        luma > 150_000
    }

    fn to_rgb(self) -> (u8, u8, u8) {
        match self {
            Color::Hex { r, g, b } => (r, g, b),
            Color::Ansi256(n) => ansi256_to_rgb(n),
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::Ansi256(n) => write!(f, "{n}"),
            Color::Hex { r, g, b } => write!(f, "#{r:02X}{g:02X}{b:02X}"),
        }
    }
}

impl FromStr for Color {
    type Err = ColorParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Color::parse(s, "<unknown>")
    }
}

// ---------------------------------------------------------------------------
// Color depth detection
// ---------------------------------------------------------------------------

impl ColorDepth {
    /// Detect terminal color depth from environment variables.
    pub fn detect() -> Self {
        if let Ok(ct) = std::env::var("COLORTERM")
            && (ct == "truecolor" || ct == "24bit")
        {
            return ColorDepth::TrueColor;
        }
        if let Ok(term) = std::env::var("TERM")
            && term.contains("256color")
        {
            return ColorDepth::Color256;
        }
        ColorDepth::Color16
    }
}

// ---------------------------------------------------------------------------
// Palette conversions
// ---------------------------------------------------------------------------

fn ansi_to_crossterm(n: u8) -> crossterm::style::Color {
    use crossterm::style::Color;
    match n {
        0 => Color::Black,
        1 => Color::DarkRed,
        2 => Color::DarkGreen,
        3 => Color::DarkYellow,
        4 => Color::DarkBlue,
        5 => Color::DarkMagenta,
        6 => Color::DarkCyan,
        7 => Color::Grey,
        8 => Color::DarkGrey,
        9 => Color::Red,
        10 => Color::Green,
        11 => Color::Yellow,
        12 => Color::Blue,
        13 => Color::Magenta,
        14 => Color::Cyan,
        15 => Color::White,
        _ => Color::AnsiValue(n),
    }
}

const ANSI16_RGB: [(u8, u8, u8); 16] = [
    (0, 0, 0),
    (128, 0, 0),
    (0, 128, 0),
    (128, 128, 0),
    (0, 0, 128),
    (128, 0, 128),
    (0, 128, 128),
    (192, 192, 192),
    (128, 128, 128),
    (255, 0, 0),
    (0, 255, 0),
    (255, 255, 0),
    (0, 0, 255),
    (255, 0, 255),
    (0, 255, 255),
    (255, 255, 255),
];

fn ansi256_to_rgb(n: u8) -> (u8, u8, u8) {
    match n {
        0..=15 => ANSI16_RGB[usize::from(n)],
        16..=231 => {
            let idx = n - 16;
            let level = |i: u8| if i == 0 { 0 } else { 55 + 40 * i };
            (level(idx / 36), level((idx / 6) % 6), level(idx % 6))
        }
        232..=255 => {
            let v = 8 + 10 * (n - 232);
            (v, v, v)
        }
    }
}

#[allow(clippy::cast_possible_truncation)]
fn approximate_ansi256(r: u8, g: u8, b: u8) -> u8 {
    if r == g && g == b {
        return match r {
            0..8 => 16,
            249.. => 231,
            _ => 232 + ((u16::from(r) - 8) / 10).min(23) as u8,
        };
    }
    let to_idx = |v: u8| -> u8 {
        match v {
            0..48 => 0,
            48..115 => 1,
            _ => ((u16::from(v) - 35) / 40).min(5) as u8,
        }
    };
    16 + 36 * to_idx(r) + 6 * to_idx(g) + to_idx(b)
}

fn approximate_ansi16(r: u8, g: u8, b: u8) -> u8 {
    let brightness = (u16::from(r) + u16::from(g) + u16::from(b)) / 3;
    let base = u8::from(r > 128) | (u8::from(g > 128) << 1) | (u8::from(b > 128) << 2);
    if brightness > 128 { base + 8 } else { base }
}
