//! Frame picture types.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Picture type of a frame, as reported by ffprobe's `pict_type`.
///
/// `None` never comes from the decoder: it marks aggregates that no longer
/// stand for a single frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PictureType {
    /// Keyframe.
    I,
    B,
    P,
    None,
}

impl PictureType {
    /// Fixed string token for this variant.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::I => "I",
            Self::B => "B",
            Self::P => "P",
            Self::None => "None",
        }
    }

    pub fn is_keyframe(self) -> bool {
        self == Self::I
    }

    /// Whether this type can describe a single decoded frame.
    pub fn is_frame_type(self) -> bool {
        !matches!(self, Self::None)
    }
}

impl fmt::Display for PictureType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a token names no [`PictureType`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unrecognized picture type token: {0:?}")]
pub struct ParsePictureTypeError(pub String);

impl FromStr for PictureType {
    type Err = ParsePictureTypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "I" => Ok(Self::I),
            "B" => Ok(Self::B),
            "P" => Ok(Self::P),
            "None" => Ok(Self::None),
            other => Err(ParsePictureTypeError(other.to_string())),
        }
    }
}
