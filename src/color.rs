//! Colors and the default star palette

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Opaque color, serialized as a `#rrggbb` string
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const WHITE: Rgb = Rgb::new(255, 255, 255);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse `#rrggbb` or the `#rgb` shorthand (leading `#` optional)
    pub fn from_hex(s: &str) -> Result<Self, ConfigError> {
        let invalid = || ConfigError::InvalidColor(s.to_string());
        let hex = s.trim().trim_start_matches('#');
        if !hex.is_ascii() {
            return Err(invalid());
        }
        let channel = |h: &str| u8::from_str_radix(h, 16).map_err(|_| invalid());

        match hex.len() {
            6 => Ok(Self::new(
                channel(&hex[0..2])?,
                channel(&hex[2..4])?,
                channel(&hex[4..6])?,
            )),
            3 => {
                // #abc == #aabbcc
                let r = channel(&hex[0..1])?;
                let g = channel(&hex[1..2])?;
                let b = channel(&hex[2..3])?;
                Ok(Self::new(r * 17, g * 17, b * 17))
            }
            _ => Err(invalid()),
        }
    }

    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    pub fn with_alpha(self, a: f32) -> Rgba {
        Rgba {
            r: self.r,
            g: self.g,
            b: self.b,
            a,
        }
    }
}

impl TryFrom<String> for Rgb {
    type Error = ConfigError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::from_hex(&s)
    }
}

impl From<Rgb> for String {
    fn from(c: Rgb) -> Self {
        c.to_hex()
    }
}

/// Color with straight alpha, used for gradient stops
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f32,
}

impl Rgba {
    /// CSS color string; alpha is rounded to two decimals
    pub fn to_css(self) -> String {
        format!(
            "rgba({}, {}, {}, {:.2})",
            self.r,
            self.g,
            self.b,
            self.a.clamp(0.0, 1.0)
        )
    }
}

/// Cool whites and pale blues
pub const DEFAULT_PALETTE: [Rgb; 5] = [
    Rgb::new(0xff, 0xff, 0xff),
    Rgb::new(0xd0, 0xe6, 0xf7),
    Rgb::new(0xa6, 0xd0, 0xff),
    Rgb::new(0xf0, 0xf8, 0xff),
    Rgb::new(0xcc, 0xe7, 0xff),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_long_and_short_hex() {
        assert_eq!(Rgb::from_hex("#d0e6f7").unwrap(), Rgb::new(0xd0, 0xe6, 0xf7));
        assert_eq!(Rgb::from_hex("A6D0FF").unwrap(), Rgb::new(0xa6, 0xd0, 0xff));
        assert_eq!(Rgb::from_hex("#fff").unwrap(), Rgb::WHITE);
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(Rgb::from_hex("#12345").is_err());
        assert!(Rgb::from_hex("#gggggg").is_err());
        assert!(Rgb::from_hex("").is_err());
        assert!(Rgb::from_hex("#ééé").is_err());
    }

    #[test]
    fn test_serde_as_hex_string() {
        let json = serde_json::to_string(&Rgb::new(0xcc, 0xe7, 0xff)).unwrap();
        assert_eq!(json, "\"#cce7ff\"");

        let back: Rgb = serde_json::from_str("\"#f0f8ff\"").unwrap();
        assert_eq!(back, DEFAULT_PALETTE[3]);

        assert!(serde_json::from_str::<Rgb>("\"blue\"").is_err());
    }

    #[test]
    fn test_css_alpha_two_decimals() {
        assert_eq!(Rgb::WHITE.with_alpha(0.456).to_css(), "rgba(255, 255, 255, 0.46)");
        assert_eq!(Rgb::WHITE.with_alpha(0.0).to_css(), "rgba(255, 255, 255, 0.00)");
        assert_eq!(Rgb::WHITE.with_alpha(1.7).to_css(), "rgba(255, 255, 255, 1.00)");
    }
}
