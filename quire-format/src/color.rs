//! RGBA colors used by font formats

use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

/// An 8-bit-per-channel RGBA color.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Color {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
    pub alpha: u8,
}

impl Color {
    pub const BLACK: Self = Self::rgb(0, 0, 0);
    pub const WHITE: Self = Self::rgb(255, 255, 255);

    pub const fn rgb(red: u8, green: u8, blue: u8) -> Self {
        Self { red, green, blue, alpha: 255 }
    }

    pub const fn rgba(red: u8, green: u8, blue: u8, alpha: u8) -> Self {
        Self { red, green, blue, alpha }
    }

    pub fn is_opaque(self) -> bool {
        self.alpha == 255
    }

    /// CSS representation: `#rrggbb` for opaque colors, `rgba(...)` otherwise.
    pub fn to_css(self) -> String {
        if self.is_opaque() {
            format!("#{:02x}{:02x}{:02x}", self.red, self.green, self.blue)
        } else {
            format!(
                "rgba({}, {}, {}, {:.3})",
                self.red,
                self.green,
                self.blue,
                f32::from(self.alpha) / 255.0
            )
        }
    }
}

/// Hex representation used in attributes: `#rrggbb` or `#rrggbbaa`.
impl Display for Color {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.red, self.green, self.blue)?;
        if !self.is_opaque() {
            write!(f, "{:02x}", self.alpha)?;
        }
        Ok(())
    }
}

impl FromStr for Color {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let hex = s
            .strip_prefix('#')
            .ok_or_else(|| format!("color \"{s}\" must start with '#'"))?;
        if !hex.is_ascii() || (hex.len() != 6 && hex.len() != 8) {
            return Err(format!("color \"{s}\" must be #rrggbb or #rrggbbaa"));
        }

        let channel = |index: usize| {
            u8::from_str_radix(&hex[index..index + 2], 16)
                .map_err(|_| format!("color \"{s}\" contains invalid hex digits"))
        };

        let alpha = if hex.len() == 8 { channel(6)? } else { 255 };
        Ok(Self::rgba(channel(0)?, channel(2)?, channel(4)?, alpha))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_opaque_and_translucent_colors() {
        assert_eq!("#ff8000".parse::<Color>(), Ok(Color::rgb(255, 128, 0)));
        assert_eq!("#00000080".parse::<Color>(), Ok(Color::rgba(0, 0, 0, 128)));
    }

    #[test]
    fn rejects_malformed_colors() {
        assert!("ff8000".parse::<Color>().is_err());
        assert!("#ff80".parse::<Color>().is_err());
        assert!("#gg0000".parse::<Color>().is_err());
    }

    #[test]
    fn display_matches_attribute_form() {
        assert_eq!(Color::rgb(18, 52, 86).to_string(), "#123456");
        assert_eq!(Color::rgba(18, 52, 86, 0).to_string(), "#12345600");
    }

    #[test]
    fn css_uses_rgba_for_translucent_colors() {
        assert_eq!(Color::WHITE.to_css(), "#ffffff");
        assert_eq!(Color::rgba(0, 0, 0, 0).to_css(), "rgba(0, 0, 0, 0.000)");
    }
}
