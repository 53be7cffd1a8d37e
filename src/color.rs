//! sRGB hex colors.

use std::fmt;
use std::str::FromStr;

use glam::Vec3;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::ConfigError;

/// An sRGB color with components in `0.0..=1.0`.
///
/// Serialized as a `#rrggbb` string.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgb {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Rgb {
    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Create from a hex integer (0xRRGGBB).
    pub fn from_hex(hex: u32) -> Self {
        Self {
            r: ((hex >> 16) & 0xFF) as f32 / 255.0,
            g: ((hex >> 8) & 0xFF) as f32 / 255.0,
            b: (hex & 0xFF) as f32 / 255.0,
        }
    }

    /// Parse `#rrggbb`, `rrggbb`, `#rgb` or `rgb`.
    pub fn from_hex_str(s: &str) -> Result<Self, ConfigError> {
        let digits = s.strip_prefix('#').unwrap_or(s);
        if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(ConfigError::Color(s.to_string()));
        }
        let hex = match digits.len() {
            6 => u32::from_str_radix(digits, 16).map_err(|_| ConfigError::Color(s.to_string()))?,
            3 => {
                // #abc -> #aabbcc
                let short = u32::from_str_radix(digits, 16)
                    .map_err(|_| ConfigError::Color(s.to_string()))?;
                let (r, g, b) = ((short >> 8) & 0xF, (short >> 4) & 0xF, short & 0xF);
                (r * 0x11) << 16 | (g * 0x11) << 8 | (b * 0x11)
            }
            _ => return Err(ConfigError::Color(s.to_string())),
        };
        Ok(Self::from_hex(hex))
    }

    /// Convert to hex integer.
    pub fn to_hex(&self) -> u32 {
        let channel = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u32;
        (channel(self.r) << 16) | (channel(self.g) << 8) | channel(self.b)
    }

    /// Convert from sRGB to linear space.
    ///
    /// The surface is an sRGB format, so anything written to it or blended
    /// on it has to be linear first.
    pub fn to_linear(&self) -> Vec3 {
        let to_linear = |c: f32| {
            if c <= 0.04045 {
                c / 12.92
            } else {
                ((c + 0.055) / 1.055).powf(2.4)
            }
        };
        Vec3::new(to_linear(self.r), to_linear(self.g), to_linear(self.b))
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:06x}", self.to_hex())
    }
}

impl FromStr for Rgb {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex_str(s)
    }
}

impl Serialize for Rgb {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Rgb {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Rgb::from_hex_str(&s).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_long_form() {
        let c = Rgb::from_hex_str("#8ad5ff").unwrap();
        assert_eq!(c.to_hex(), 0x8ad5ff);
        assert_eq!(c.to_string(), "#8ad5ff");
    }

    #[test]
    fn test_parse_without_hash_and_short_form() {
        assert_eq!(Rgb::from_hex_str("0b1020").unwrap().to_hex(), 0x0b1020);
        assert_eq!(Rgb::from_hex_str("#fa0").unwrap().to_hex(), 0xffaa00);
    }

    #[test]
    fn test_rejects_garbage() {
        assert!(Rgb::from_hex_str("#12345").is_err());
        assert!(Rgb::from_hex_str("#gg0000").is_err());
        assert!(Rgb::from_hex_str("").is_err());
        assert!(Rgb::from_hex_str("#+12345").is_err());
    }

    #[test]
    fn test_linear_endpoints() {
        let black = Rgb::new(0.0, 0.0, 0.0).to_linear();
        let white = Rgb::new(1.0, 1.0, 1.0).to_linear();
        assert_eq!(black, Vec3::ZERO);
        assert!((white - Vec3::ONE).abs().max_element() < 1e-6);

        // Mid grey is darker in linear space
        let grey = Rgb::new(0.5, 0.5, 0.5).to_linear();
        assert!(grey.x > 0.2 && grey.x < 0.22);
    }

    #[test]
    fn test_serde_as_string() {
        let c = Rgb::from_hex(0x0b1020);
        let json = serde_json::to_string(&c).unwrap();
        assert_eq!(json, "\"#0b1020\"");
        let back: Rgb = serde_json::from_str(&json).unwrap();
        assert_eq!(back.to_hex(), 0x0b1020);
        assert!(serde_json::from_str::<Rgb>("\"blue\"").is_err());
    }
}
