//! Theme color token resolution.
//!
//! Tokens are six hexadecimal digits, optionally prefixed with a single
//! marker character such as `#`. Resolution is pure and total over
//! well-formed tokens.

use crate::error::{Error, Result};

/// An RGB triple as embedded in DrawingML `srgbClr` values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Uppercase six-digit hex form, e.g. `0B1220`.
    pub fn to_hex(self) -> String {
        format!("{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

/// Resolve a color token into an [`Rgb`] triple.
///
/// A single leading non-hex marker character (typically `#`) is ignored.
/// The next six characters are read as three 2-digit hex byte pairs;
/// anything after them is ignored.
pub fn resolve_color(token: &str) -> Result<Rgb> {
    let digits = match token.chars().next() {
        Some(c) if !c.is_ascii_hexdigit() => &token[c.len_utf8()..],
        _ => token,
    };

    let bytes = digits.as_bytes();
    if bytes.len() < 6 || !bytes[..6].iter().all(u8::is_ascii_hexdigit) {
        return Err(Error::InvalidColorFormat(token.to_string()));
    }

    let byte_at = |idx: usize| {
        // Validated as ASCII hex above, so slicing and parsing cannot fail.
        u8::from_str_radix(&digits[idx..idx + 2], 16).unwrap_or_default()
    };

    Ok(Rgb::new(byte_at(0), byte_at(2), byte_at(4)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_byte_pairs() {
        assert_eq!(resolve_color("0b1220").unwrap(), Rgb::new(11, 18, 32));
        assert_eq!(resolve_color("ffffff").unwrap(), Rgb::new(255, 255, 255));
        assert_eq!(resolve_color("d4af37").unwrap(), Rgb::new(0xd4, 0xaf, 0x37));
    }

    #[test]
    fn leading_marker_is_stripped() {
        assert_eq!(
            resolve_color("#0b1220").unwrap(),
            resolve_color("0b1220").unwrap()
        );
    }

    #[test]
    fn trailing_characters_are_ignored() {
        assert_eq!(resolve_color("0b1220ff").unwrap(), Rgb::new(11, 18, 32));
    }

    #[test]
    fn short_tokens_are_rejected() {
        assert!(matches!(
            resolve_color("fff"),
            Err(Error::InvalidColorFormat(_))
        ));
        assert!(matches!(
            resolve_color("#fff"),
            Err(Error::InvalidColorFormat(_))
        ));
        assert!(matches!(resolve_color(""), Err(Error::InvalidColorFormat(_))));
    }

    #[test]
    fn non_hex_pairs_are_rejected() {
        assert!(matches!(
            resolve_color("0b12zz"),
            Err(Error::InvalidColorFormat(_))
        ));
        assert!(matches!(
            resolve_color("##0b1220"),
            Err(Error::InvalidColorFormat(_))
        ));
    }

    #[test]
    fn hex_form_is_uppercase() {
        assert_eq!(Rgb::new(11, 18, 32).to_hex(), "0B1220");
    }
}
