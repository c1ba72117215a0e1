use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ColorError {
    #[error("invalid hex color '{input}': {reason}")]
    InvalidHex { input: String, reason: String },
}

/// RGB triple on the 0-255 scale.
///
/// Channels are floats so blend arithmetic can run without intermediate
/// rounding; they may leave [0, 255] until encoded by [`rgb_to_hex`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgb {
    pub r: f64,
    pub g: f64,
    pub b: f64,
}

impl Rgb {
    pub const fn new(r: f64, g: f64, b: f64) -> Self {
        Self { r, g, b }
    }

    pub fn channels(&self) -> [f64; 3] {
        [self.r, self.g, self.b]
    }

    /// Apply `f` to each channel pair of `self` and `other`.
    pub fn zip_with(self, other: Rgb, f: impl Fn(f64, f64) -> f64) -> Rgb {
        Rgb {
            r: f(self.r, other.r),
            g: f(self.g, other.g),
            b: f(self.b, other.b),
        }
    }

    pub fn channel_sum(&self) -> f64 {
        self.r + self.g + self.b
    }
}

/// Parse a `#rrggbb` (or `rrggbb`) color. Case-insensitive.
///
/// Anything other than exactly six hex digits is rejected, including the
/// three-digit shorthand.
pub fn hex_to_rgb(hex: &str) -> Result<Rgb, ColorError> {
    let trimmed = hex.trim();
    let digits = trimmed.strip_prefix('#').unwrap_or(trimmed);

    let invalid = |reason: String| ColorError::InvalidHex {
        input: hex.to_string(),
        reason,
    };

    if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(invalid("contains non-hex characters".to_string()));
    }
    if digits.len() != 6 {
        return Err(invalid(format!("expected 6 hex digits, got {}", digits.len())));
    }

    let channel = |range: std::ops::Range<usize>| {
        u8::from_str_radix(&digits[range], 16)
            .map(f64::from)
            .map_err(|e| invalid(e.to_string()))
    };

    Ok(Rgb {
        r: channel(0..2)?,
        g: channel(2..4)?,
        b: channel(4..6)?,
    })
}

/// Encode as lowercase `#rrggbb`, rounding and clamping each channel.
pub fn rgb_to_hex(rgb: Rgb) -> String {
    // NaN casts to 0
    let to_byte = |c: f64| c.round().clamp(0.0, 255.0) as u8;
    format!(
        "#{:02x}{:02x}{:02x}",
        to_byte(rgb.r),
        to_byte(rgb.g),
        to_byte(rgb.b)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_standard_hex() {
        assert_eq!(hex_to_rgb("#FF4D8D").unwrap(), Rgb::new(255.0, 77.0, 141.0));
    }

    #[test]
    fn test_parses_without_hash() {
        assert_eq!(hex_to_rgb("000000").unwrap(), Rgb::new(0.0, 0.0, 0.0));
        assert_eq!(hex_to_rgb(" ffffff ").unwrap(), Rgb::new(255.0, 255.0, 255.0));
    }

    #[test]
    fn test_rejects_malformed() {
        for bad in ["#ZZZZZZ", "#FFF", "", "#", "#12345", "#1234567", "+f+f+f", "#ff ff f"] {
            let err = hex_to_rgb(bad).unwrap_err();
            assert!(
                matches!(err, ColorError::InvalidHex { .. }),
                "expected rejection for {:?}",
                bad
            );
        }
    }

    #[test]
    fn test_rejects_non_ascii() {
        assert!(hex_to_rgb("#ｆｆｆｆｆｆ").is_err());
    }

    #[test]
    fn test_error_message_names_input() {
        let err = hex_to_rgb("#FFF").unwrap_err();
        assert_eq!(
            err.to_string(),
            "invalid hex color '#FFF': expected 6 hex digits, got 3"
        );
    }

    #[test]
    fn test_encodes_lowercase() {
        assert_eq!(rgb_to_hex(Rgb::new(255.0, 77.0, 141.0)), "#ff4d8d");
        assert_eq!(rgb_to_hex(Rgb::new(0.0, 0.0, 0.0)), "#000000");
    }

    #[test]
    fn test_clamps_and_rounds() {
        assert_eq!(rgb_to_hex(Rgb::new(300.0, 0.0, 0.0)), "#ff0000");
        assert_eq!(rgb_to_hex(Rgb::new(-10.0, 0.0, 0.0)), "#000000");
        assert_eq!(rgb_to_hex(Rgb::new(15.4, 15.5, 254.6)), "#0f10ff");
    }

    #[test]
    fn test_non_finite_channels_encode_safely() {
        assert_eq!(
            rgb_to_hex(Rgb::new(f64::NAN, f64::INFINITY, f64::NEG_INFINITY)),
            "#00ff00"
        );
    }

    #[test]
    fn test_zip_with() {
        let a = Rgb::new(10.0, 20.0, 30.0);
        let b = Rgb::new(1.0, 2.0, 3.0);
        assert_eq!(a.zip_with(b, |x, y| x + y), Rgb::new(11.0, 22.0, 33.0));
        assert_eq!(a.channel_sum(), 60.0);
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn hex_round_trip(r in any::<u8>(), g in any::<u8>(), b in any::<u8>(), upper in any::<bool>()) {
                let hex = format!("#{:02x}{:02x}{:02x}", r, g, b);
                let input = if upper { hex.to_uppercase() } else { hex.clone() };
                prop_assert_eq!(rgb_to_hex(hex_to_rgb(&input).unwrap()), hex);
            }

            #[test]
            fn encoding_always_valid(r in any::<f64>(), g in any::<f64>(), b in any::<f64>()) {
                let hex = rgb_to_hex(Rgb::new(r, g, b));
                prop_assert_eq!(hex.len(), 7);
                prop_assert!(hex_to_rgb(&hex).is_ok());
            }
        }
    }
}
