use thiserror::Error;

use super::codec::Mode;
use super::metadata::{ECLevel, Version};

// Error
//------------------------------------------------------------------------------

#[derive(Debug, Error, PartialEq, Eq, Copy, Clone)]
pub enum QRError {
    // Capacity
    #[error("{len} {mode} chars overflow the version {ver}-{ecl} data capacity")]
    CapacityOverflow { len: usize, mode: Mode, ver: Version, ecl: ECLevel },
    #[error("{len} {mode} chars do not fit in any version between {min} and {max}")]
    NoFittingVersion { len: usize, mode: Mode, min: Version, max: Version },

    // Mode
    #[error("{0} mode cannot represent the input")]
    UnsupportedChars(Mode),

    // Range
    #[error("version must be between 1 and 40, got {0}")]
    InvalidVersion(u8),
    #[error("version {ver} is outside the allowed range {min}..={max}")]
    VersionOutsideRange { ver: u8, min: u8, max: u8 },
    #[error("min version {0} exceeds max version {1}")]
    InvertedVersionRange(u8, u8),
    #[error("version info is only defined for versions 7 through 40, got {0}")]
    VersionInfoUndefined(Version),

    // Field arithmetic, unreachable with correct inputs
    #[error("division by zero in GF(256)")]
    DivisionByZero,
    #[error("logarithm of zero in GF(256)")]
    LogOfZero,

    // Internal consistency, unreachable with correct capacity tables
    #[error("block split produced {got} data codewords, expected {expected}")]
    BlockSizeMismatch { got: usize, expected: usize },
}

pub type QRResult<T> = Result<T, QRError>;
