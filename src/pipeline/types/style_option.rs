use std::fmt;

use image::Rgb;
use serde::{Deserialize, Serialize};

use crate::error::CatalogError;
use crate::pipeline::types::RegionLabel;

/// `#RRGGBB` color, validated when the catalog is loaded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct HexColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl HexColor {
    pub fn parse(hex: &str) -> Result<Self, CatalogError> {
        let digits = hex
            .strip_prefix('#')
            .filter(|d| d.len() == 6 && d.chars().all(|c| c.is_ascii_hexdigit()))
            .ok_or_else(|| CatalogError::InvalidColor(hex.to_string()))?;

        let channel = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&digits[range], 16)
                .map_err(|_| CatalogError::InvalidColor(hex.to_string()))
        };

        Ok(Self {
            r: channel(0..2)?,
            g: channel(2..4)?,
            b: channel(4..6)?,
        })
    }

    /// Pixel in the channel order of `image::RgbImage`.
    pub fn to_rgb(self) -> Rgb<u8> {
        Rgb([self.r, self.g, self.b])
    }
}

impl From<Rgb<u8>> for HexColor {
    fn from(px: Rgb<u8>) -> Self {
        let [r, g, b] = px.0;
        Self { r, g, b }
    }
}

impl TryFrom<String> for HexColor {
    type Error = CatalogError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<HexColor> for String {
    fn from(color: HexColor) -> Self {
        color.to_string()
    }
}

impl fmt::Display for HexColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

/// One catalog recommendation for a region.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StyleOption {
    pub color: HexColor,
    pub texture: String,
    pub material: String,
    pub finish: String,
    pub rating: f64,
    pub keywords: Vec<String>,
}

/// The style picked for one mask.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Resolution {
    pub label: RegionLabel,
    pub option: StyleOption,
}

impl Resolution {
    pub fn new(label: RegionLabel, option: StyleOption) -> Self {
        Self { label, option }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_round_trip_through_native_pixel() {
        let color = HexColor::parse("#FF0000").unwrap();
        let px = color.to_rgb();
        assert_eq!(px, Rgb([255, 0, 0]));
        assert_eq!(HexColor::from(px).to_string(), "#FF0000");
    }

    #[test]
    fn test_lowercase_hex_is_accepted() {
        let color = HexColor::parse("#aabbcc").unwrap();
        assert_eq!(color.to_rgb(), Rgb([0xAA, 0xBB, 0xCC]));
        assert_eq!(color.to_string(), "#AABBCC");
    }

    #[test]
    fn test_malformed_hex_is_rejected() {
        for bad in ["FF0000", "#FF00", "#GG0000", "#FF00001", "", "#"] {
            assert!(
                matches!(HexColor::parse(bad), Err(CatalogError::InvalidColor(_))),
                "{bad} should be rejected"
            );
        }
    }

    #[test]
    fn test_style_option_requires_every_field() {
        let missing_finish = r##"{"color":"#AABBCC","texture":"t","material":"m","rating":4,"keywords":[]}"##;
        assert!(serde_json::from_str::<StyleOption>(missing_finish).is_err());

        let complete = r##"{"color":"#AABBCC","texture":"t","material":"m","finish":"f","rating":4,"keywords":["k"]}"##;
        let option: StyleOption = serde_json::from_str(complete).unwrap();
        assert_eq!(option.rating, 4.0);
        assert_eq!(option.keywords, vec!["k".to_string()]);
    }
}
