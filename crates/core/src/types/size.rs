//! Garment sizes.

use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Serialize};

/// Error returned when a size label is not one of the known sizes.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown size: {0:?}")]
pub struct ParseSizeError(pub String);

/// A garment size.
///
/// Serialized as its label (`"S"`, `"M"`, `"L"`, `"XL"`), which is also the
/// text shown on the size buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default)]
pub enum Size {
    S,
    #[default]
    M,
    L,
    XL,
}

impl Size {
    /// Every size, smallest first.
    pub const ALL: [Self; 4] = [Self::S, Self::M, Self::L, Self::XL];

    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::S => "S",
            Self::M => "M",
            Self::L => "L",
            Self::XL => "XL",
        }
    }
}

impl fmt::Display for Size {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Size {
    type Err = ParseSizeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Self::ALL
            .into_iter()
            .find(|size| size.label().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| ParseSizeError(trimmed.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_labels() {
        assert_eq!("S".parse::<Size>(), Ok(Size::S));
        assert_eq!("xl".parse::<Size>(), Ok(Size::XL));
        assert_eq!(" m ".parse::<Size>(), Ok(Size::M));
        assert!("XXL".parse::<Size>().is_err());
        assert!("".parse::<Size>().is_err());
    }

    #[test]
    fn test_default_is_medium() {
        assert_eq!(Size::default(), Size::M);
    }

    #[test]
    fn test_display_matches_label() {
        for size in Size::ALL {
            assert_eq!(size.to_string(), size.label());
        }
    }
}
