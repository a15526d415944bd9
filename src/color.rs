//! Perceptual brightness classification for bulb colors.
//!
//! A `"#RRGGBB"` string is sampled into its three channels and weighted
//! into a perceived luminance. Colors above the luminance cutoff get the
//! high-contrast ("bright") presentation so the label stays readable on
//! light icon fills.

/// Weighted luminance above which a color counts as bright.
///
/// Classic perceived-brightness cutoff on a 0-255 scale. The comparison
/// is strict: a luminance of exactly 186 is not bright.
pub const BRIGHT_LUMINANCE_CUTOFF: f64 = 186.0;

/// One RGB sample taken from a `"#RRGGBB"` string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorSample {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl ColorSample {
    /// Parse a color of the form `"#RRGGBB"`.
    ///
    /// Channels are read from fixed offsets (1-2, 3-4, 5-6); the leading
    /// byte is not inspected. Returns `None` if the string is too short,
    /// a channel is not valid hex, or an offset splits a multi-byte
    /// character.
    pub fn parse(color: &str) -> Option<Self> {
        let channel = |range| {
            color
                .get(range)
                .and_then(|hex| u8::from_str_radix(hex, 16).ok())
        };

        Some(Self {
            r: channel(1..3)?,
            g: channel(3..5)?,
            b: channel(5..7)?,
        })
    }

    /// Perceived luminance on a 0-255 scale.
    pub fn luminance(&self) -> f64 {
        f64::from(self.r) * 0.299 + f64::from(self.g) * 0.587 + f64::from(self.b) * 0.114
    }

    /// Whether this color needs the high-contrast presentation.
    pub fn is_bright(&self) -> bool {
        self.luminance() > BRIGHT_LUMINANCE_CUTOFF
    }
}

/// Classify an arbitrary color string.
///
/// Malformed input classifies as not-bright rather than erroring; the
/// caller never needs to pre-validate what the device or the user hands
/// over.
pub fn is_bright(color: &str) -> bool {
    ColorSample::parse(color).is_some_and(|sample| sample.is_bright())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_channels() {
        let sample = ColorSample::parse("#1a2b3c").unwrap();
        assert_eq!(sample, ColorSample { r: 0x1a, g: 0x2b, b: 0x3c });
    }

    #[test]
    fn test_parse_ignores_leading_byte() {
        // Only the channel offsets are inspected.
        assert_eq!(
            ColorSample::parse("xff00ff"),
            ColorSample::parse("#ff00ff")
        );
    }

    #[test]
    fn test_parse_rejects_short_and_non_hex() {
        assert_eq!(ColorSample::parse(""), None);
        assert_eq!(ColorSample::parse("#fff"), None);
        assert_eq!(ColorSample::parse("#ff00"), None);
        assert_eq!(ColorSample::parse("#gg0000"), None);
        assert_eq!(ColorSample::parse("#ff00zz"), None);
    }

    #[test]
    fn test_parse_survives_multibyte_input() {
        // Offsets landing inside a multi-byte character must not panic.
        assert_eq!(ColorSample::parse("#é0000"), None);
        assert_eq!(ColorSample::parse("日本語テキスト"), None);
    }

    #[test]
    fn test_luminance_extremes() {
        assert_eq!(ColorSample::parse("#000000").unwrap().luminance(), 0.0);
        assert_eq!(ColorSample::parse("#ffffff").unwrap().luminance(), 255.0);
    }

    #[test]
    fn test_cutoff_is_strict() {
        // Grey #bababa lands exactly on the cutoff and must not be bright.
        assert!(!is_bright("#bababa"));
        assert!(!is_bright("#b9b9b9"));
        assert!(is_bright("#bbbbbb"));
    }

    #[test]
    fn test_classification_endpoints() {
        assert!(!is_bright("#000000"));
        assert!(is_bright("#ffffff"));
        // Yellow carries enough weighted luminance; single primaries do not.
        assert!(is_bright("#ffff00"));
        assert!(!is_bright("#ff0000"));
        assert!(!is_bright("#00ff00"));
        assert!(!is_bright("#0000ff"));
    }

    #[test]
    fn test_malformed_is_not_bright() {
        assert!(!is_bright(""));
        assert!(!is_bright("white"));
        assert!(!is_bright("#ffff"));
    }

    #[test]
    fn test_deterministic() {
        for color in ["#123456", "#fedcba", "#bababa", "nonsense"] {
            assert_eq!(is_bright(color), is_bright(color));
        }
    }
}
