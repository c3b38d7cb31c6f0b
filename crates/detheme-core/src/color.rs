//! Color values and their canonical hex rendering.
//!
//! Every color notation the resolver understands ends up as an [`Rgba`] and is
//! written back out through [`Rgba::to_hex`]:
//!
//! - Hex: `#rgb`, `#rgba`, `#rrggbb`, `#rrggbbaa` (case insensitive)
//! - RGB components: `rgb(255, 107, 53)` / `rgba(255, 107, 53, 0.5)`
//! - HSL: `hsl(20, 100%, 60%)` / `hsla(20, 100%, 60%, 0.5)`
//!
//! The textual matching of those notations lives in [`crate::resolve`]; this
//! module only deals with the numeric side.
//!
//! # Example
//!
//! ```rust
//! use detheme_core::color::Rgba;
//!
//! let orange = Rgba::parse_hex("#ff6b35").unwrap();
//! assert_eq!(orange.with_alpha(0.5).to_hex(), "#ff6b3580");
//!
//! let red = Rgba::from_hsl(0.0, 100.0, 50.0);
//! assert_eq!(red.to_hex(), "#ff0000");
//! ```

/// An sRGB color with an optional alpha channel.
///
/// `a` is `None` when the source notation carried no alpha component; such
/// colors render as 6-digit hex.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: Option<u8>,
}

impl Rgba {
    /// Creates an opaque color without an alpha channel.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: None }
    }

    /// Parses a hex color code, including the leading `#`.
    ///
    /// Accepts 3, 4, 6 or 8 hex digits. Short forms double each digit.
    pub fn parse_hex(s: &str) -> Result<Self, String> {
        let hex = s
            .strip_prefix('#')
            .ok_or_else(|| format!("Invalid hex color: {} (missing '#')", s))?;

        if !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(format!("Invalid hex: {}", hex));
        }

        let nibble = |i: usize| {
            u8::from_str_radix(&hex[i..i + 1], 16)
                .map(|n| n * 17)
                .map_err(|_| format!("Invalid hex: {}", hex))
        };
        let byte = |i: usize| {
            u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| format!("Invalid hex: {}", hex))
        };

        match hex.len() {
            // #rgb -> #rrggbb
            3 => Ok(Self::rgb(nibble(0)?, nibble(1)?, nibble(2)?)),
            // #rgba -> #rrggbbaa
            4 => Ok(Self {
                a: Some(nibble(3)?),
                ..Self::rgb(nibble(0)?, nibble(1)?, nibble(2)?)
            }),
            6 => Ok(Self::rgb(byte(0)?, byte(2)?, byte(4)?)),
            8 => Ok(Self {
                a: Some(byte(6)?),
                ..Self::rgb(byte(0)?, byte(2)?, byte(4)?)
            }),
            _ => Err(format!(
                "Invalid hex color: #{} (must be 3, 4, 6 or 8 digits)",
                hex
            )),
        }
    }

    /// Converts HSL to RGB.
    ///
    /// `h` is in degrees and wraps around 360; `s` and `l` are percentages and
    /// are clamped to `0..=100`.
    pub fn from_hsl(h: f64, s: f64, l: f64) -> Self {
        let h = h.rem_euclid(360.0);
        let s = s.clamp(0.0, 100.0) / 100.0;
        let l = l.clamp(0.0, 100.0) / 100.0;

        let c = (1.0 - (2.0 * l - 1.0).abs()) * s;
        let x = c * (1.0 - ((h / 60.0) % 2.0 - 1.0).abs());
        let m = l - c / 2.0;

        let (r, g, b) = match h {
            h if h < 60.0 => (c, x, 0.0),
            h if h < 120.0 => (x, c, 0.0),
            h if h < 180.0 => (0.0, c, x),
            h if h < 240.0 => (0.0, x, c),
            h if h < 300.0 => (x, 0.0, c),
            _ => (c, 0.0, x),
        };

        Self::rgb(unit_to_byte(r + m), unit_to_byte(g + m), unit_to_byte(b + m))
    }

    /// Returns this color with its alpha channel set from a `0..=1` factor.
    ///
    /// The factor is clamped and rounded to the nearest byte, so `0.5` becomes
    /// `0x80`.
    pub fn with_alpha(self, alpha: f64) -> Self {
        Self {
            a: Some(unit_to_byte(alpha)),
            ..self
        }
    }

    /// Renders the color as lowercase web hex, `#rrggbb` or `#rrggbbaa`.
    pub fn to_hex(&self) -> String {
        match self.a {
            Some(a) => format!("#{:02x}{:02x}{:02x}{:02x}", self.r, self.g, self.b, a),
            None => format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b),
        }
    }
}

/// Maps a `0.0..=1.0` value onto `0..=255`, clamping out-of-range input.
fn unit_to_byte(v: f64) -> u8 {
    (v.clamp(0.0, 1.0) * 255.0).round() as u8
}
