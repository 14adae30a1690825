//! Colors of the plane and iso-surface layers
//!
//! Channels are in `<0;1>`.

use nalgebra::{vector, Vector3, Vector4};

use crate::error::{ColorErrorKind, LayerError};

pub type RGB = Vector3<f32>;
pub type RGBA = Vector4<f32>;

pub fn new(r: f32, g: f32, b: f32) -> RGB {
    vector![r, g, b]
}

pub fn white() -> RGB {
    vector![1.0, 1.0, 1.0]
}

pub fn with_alpha(color: RGB, a: f32) -> RGBA {
    vector![color.x, color.y, color.z, a]
}

pub fn transparent() -> RGBA {
    vector![0.0, 0.0, 0.0, 0.0]
}

/// Parse `#rrggbb` or the short `#rgb` form, leading `#` optional
pub fn parse_hex(hex: &str) -> Result<RGB, LayerError> {
    let raw = hex.strip_prefix('#').unwrap_or(hex);

    let full: String = match raw.len() {
        3 => raw.chars().flat_map(|ch| [ch, ch]).collect(),
        6 => raw.to_owned(),
        _ => return Err(LayerError::Color(ColorErrorKind::Length)),
    };
    if !full.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(LayerError::Color(ColorErrorKind::Digit));
    }

    let int_val =
        u32::from_str_radix(&full, 16).map_err(|_| LayerError::Color(ColorErrorKind::Digit))?;
    let r = (int_val >> 16) & 0xff;
    let g = (int_val >> 8) & 0xff;
    let b = int_val & 0xff;

    Ok(vector![r, g, b].map(|c| c as f32 / 255.0))
}

/// Inverse of [`parse_hex`], always the long form
pub fn to_hex(color: &RGB) -> String {
    let c = color.map(|v| (v.clamp(0.0, 1.0) * 255.0).round() as u8);
    format!("#{:02x}{:02x}{:02x}", c.x, c.y, c.z)
}

#[cfg(test)]
mod test {

    use super::*;

    #[test]
    fn long_form() {
        assert_eq!(parse_hex("#ff0000"), Ok(new(1.0, 0.0, 0.0)));
        assert_eq!(parse_hex("00ff00"), Ok(new(0.0, 1.0, 0.0)));
    }

    #[test]
    fn short_form_expands() {
        assert_eq!(parse_hex("#fff"), Ok(white()));
        assert_eq!(parse_hex("#f50"), parse_hex("#ff5500"));
    }

    #[test]
    fn bad_input() {
        assert_eq!(
            parse_hex("#ff00"),
            Err(LayerError::Color(ColorErrorKind::Length))
        );
        assert_eq!(
            parse_hex("#gg0000"),
            Err(LayerError::Color(ColorErrorKind::Digit))
        );
    }

    #[test]
    fn sign_is_not_a_digit() {
        assert_eq!(
            parse_hex("+fffff"),
            Err(LayerError::Color(ColorErrorKind::Digit))
        );
        assert_eq!(
            parse_hex("#+ff"),
            Err(LayerError::Color(ColorErrorKind::Digit))
        );
    }

    #[test]
    fn hex_roundtrip() {
        assert_eq!(to_hex(&parse_hex("#f50000").unwrap()), "#f50000");
        assert_eq!(to_hex(&new(2.0, -1.0, 0.5)), "#ff0080");
    }
}
