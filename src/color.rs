//! Canonical RGBA color and its two textual encodings.
//!
//! VS Code themes carry colors as `#RRGGBB` / `#RRGGBBAA` hex strings; Xcode
//! themes carry them as four space-separated component floats. Everything in
//! between works on this normalized value.

use crate::error::Error;

/// A normalized RGBA color, components in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f64,
    pub g: f64,
    pub b: f64,
    pub a: f64,
}

impl Color {
    pub const BLACK: Color = Color { r: 0.0, g: 0.0, b: 0.0, a: 1.0 };
    pub const WHITE: Color = Color { r: 1.0, g: 1.0, b: 1.0, a: 1.0 };

    /// Parse `#RRGGBB` or `#RRGGBBAA` (leading `#` optional). A missing
    /// alpha component means fully opaque. Returns `None` for any other
    /// length or for non-hex characters; callers treat that as "color not
    /// found" rather than a hard error.
    pub fn from_hex(hex: &str) -> Option<Color> {
        let digits = hex.strip_prefix('#').unwrap_or(hex);
        if digits.len() != 6 && digits.len() != 8 {
            return None;
        }

        let byte_at = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16).ok();
        let r = byte_at(0)?;
        let g = byte_at(2)?;
        let b = byte_at(4)?;
        let a = if digits.len() == 8 { byte_at(6)? } else { 255 };

        Some(Color {
            r: f64::from(r) / 255.0,
            g: f64::from(g) / 255.0,
            b: f64::from(b) / 255.0,
            a: f64::from(a) / 255.0,
        })
    }

    /// Encode as uppercase `#RRGGBB`, appending the alpha byte only when the
    /// color is not fully opaque.
    pub fn to_hex(&self) -> String {
        let byte = |v: f64| (v * 255.0).round() as u8;
        let mut out = format!("#{:02X}{:02X}{:02X}", byte(self.r), byte(self.g), byte(self.b));
        if self.a < 1.0 {
            out.push_str(&format!("{:02X}", byte(self.a)));
        }
        out
    }

    /// Parse the component-string encoding: four space-separated decimal
    /// floats `r g b a`, each in `[0, 1]`.
    pub fn from_components(text: &str) -> Result<Color, Error> {
        let parts: Vec<&str> = text.split_whitespace().collect();
        if parts.len() != 4 {
            return Err(Error::Parse(format!(
                "expected 4 color components, got {}: `{text}`",
                parts.len()
            )));
        }

        let mut values = [0.0f64; 4];
        for (slot, part) in values.iter_mut().zip(&parts) {
            let value: f64 = part
                .parse()
                .map_err(|_| Error::Parse(format!("malformed color component `{part}`")))?;
            if !(0.0..=1.0).contains(&value) {
                return Err(Error::Parse(format!(
                    "color component `{part}` out of range [0, 1]"
                )));
            }
            *slot = value;
        }

        Ok(Color {
            r: values[0],
            g: values[1],
            b: values[2],
            a: values[3],
        })
    }

    /// Encode as the component string `r g b a`.
    pub fn to_components(&self) -> String {
        format!("{:?} {:?} {:?} {:?}", self.r, self.g, self.b, self.a)
    }

    /// Re-interpret the same numeric components under the destination
    /// display's color profile.
    ///
    /// VS Code renders theme colors in the display's native color space
    /// instead of treating them as sRGB, so matching its on-screen
    /// appearance means carrying the raw components over unconverted
    /// (microsoft/vscode#87275). Headless, there is no display profile to
    /// attach, so the components pass through unchanged.
    pub fn using_display_profile(self) -> Color {
        self
    }
}
