//! Styling shared by every field.

use std::fmt;

use serde::Serialize;

/// Font families offered by the font picker.
pub const FONT_CHOICES: [&str; 8] = [
    "Kantumruy Pro",
    "Arial",
    "Times New Roman",
    "Courier New",
    "Georgia",
    "Verdana",
    "Comic Sans MS",
    "Trebuchet MS",
];

/// Colour and font applied to all ten fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Style {
    /// Text colour as typed by the user (normally `#rrggbb`).
    pub color: String,

    /// Font family name.
    pub font_family: String,
}

impl Default for Style {
    fn default() -> Self {
        Self {
            color: "#eece69".to_string(),
            font_family: "Kantumruy Pro".to_string(),
        }
    }
}

impl Style {
    pub fn new(color: impl Into<String>, font_family: impl Into<String>) -> Self {
        Self {
            color: color.into(),
            font_family: font_family.into(),
        }
    }

    /// Parsed text colour. An unparsable value draws as opaque black, the
    /// same colour a 2D canvas keeps when it rejects a fill style.
    pub fn text_color(&self) -> TextColor {
        TextColor::parse(&self.color).unwrap_or_else(|| {
            tracing::debug!(color = %self.color, "Unparsable text colour, using black");
            TextColor::BLACK
        })
    }
}

/// An RGBA colour parsed from a hex string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl TextColor {
    pub const BLACK: TextColor = TextColor::rgb(0, 0, 0);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Parse `#rgb`, `#rrggbb`, or `#rrggbbaa`.
    pub fn parse(input: &str) -> Option<Self> {
        let hex = input.trim().strip_prefix('#')?;
        if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return None;
        }
        let channel = |s: &str| u8::from_str_radix(s, 16).ok();
        match hex.len() {
            3 => {
                let mut it = hex.chars().map(|c| c.to_digit(16).map(|d| (d * 17) as u8));
                Some(Self::rgb(it.next()??, it.next()??, it.next()??))
            }
            6 => Some(Self::rgb(
                channel(&hex[0..2])?,
                channel(&hex[2..4])?,
                channel(&hex[4..6])?,
            )),
            8 => Some(Self {
                r: channel(&hex[0..2])?,
                g: channel(&hex[2..4])?,
                b: channel(&hex[4..6])?,
                a: channel(&hex[6..8])?,
            }),
            _ => None,
        }
    }

    pub fn to_rgba(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }

    pub fn to_rgb(self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }
}

impl fmt::Display for TextColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)?;
        if self.a != 255 {
            write!(f, "{:02x}", self.a)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_forms() {
        assert_eq!(TextColor::parse("#eece69"), Some(TextColor::rgb(0xee, 0xce, 0x69)));
        assert_eq!(TextColor::parse("#FFF"), Some(TextColor::rgb(255, 255, 255)));
        assert_eq!(TextColor::parse("#ff000080").unwrap().a, 0x80);
        assert!(TextColor::parse("gold").is_none());
        assert!(TextColor::parse("#12345").is_none());
        assert!(TextColor::parse("").is_none());
    }

    #[test]
    fn test_parse_requires_hash() {
        assert!(TextColor::parse("ff0000").is_none());
        assert!(TextColor::parse("fff").is_none());
        assert!(TextColor::parse("##ff0000").is_none());
        assert_eq!(TextColor::parse(" #ff0000 "), Some(TextColor::rgb(255, 0, 0)));

        let style = Style::new("ff0000", "Arial");
        assert_eq!(style.text_color(), TextColor::BLACK);
    }

    #[test]
    fn test_display_roundtrip() {
        let c = TextColor::rgb(0xee, 0xce, 0x69);
        assert_eq!(c.to_string(), "#eece69");
        assert_eq!(TextColor::parse(&c.to_string()), Some(c));
    }

    #[test]
    fn test_invalid_style_colour_falls_back_to_black() {
        let style = Style::new("not-a-colour", "Arial");
        assert_eq!(style.text_color(), TextColor::BLACK);
        assert_eq!(Style::default().text_color(), TextColor::rgb(0xee, 0xce, 0x69));
    }

    #[test]
    fn test_default_font_is_first_choice() {
        assert_eq!(Style::default().font_family, FONT_CHOICES[0]);
    }
}
