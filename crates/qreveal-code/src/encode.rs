use std::fmt;
use std::str::FromStr;

use qrcode::bits::Bits;
use qrcode::types::QrError;
use qrcode::{EcLevel, QrCode, Version};
use serde::{Deserialize, Serialize};

/// Largest normal QR version.
pub const MAX_VERSION: i16 = 40;

/// QR error-correction level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ErrorCorrection {
    /// ~7% recovery.
    #[default]
    L,
    /// ~15% recovery.
    M,
    /// ~25% recovery.
    Q,
    /// ~30% recovery.
    H,
}

impl From<ErrorCorrection> for EcLevel {
    fn from(ec: ErrorCorrection) -> Self {
        match ec {
            ErrorCorrection::L => EcLevel::L,
            ErrorCorrection::M => EcLevel::M,
            ErrorCorrection::Q => EcLevel::Q,
            ErrorCorrection::H => EcLevel::H,
        }
    }
}

impl fmt::Display for ErrorCorrection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::L => "L",
            Self::M => "M",
            Self::Q => "Q",
            Self::H => "H",
        };
        f.write_str(s)
    }
}

impl FromStr for ErrorCorrection {
    type Err = EncodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "L" => Ok(Self::L),
            "M" => Ok(Self::M),
            "Q" => Ok(Self::Q),
            "H" => Ok(Self::H),
            _ => Err(EncodeError::UnknownLevel(s.to_string())),
        }
    }
}

/// Encoder configuration. Data is always a single byte-mode segment, so text
/// is never case folded or re-segmented.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EncodeOptions {
    pub error_correction: ErrorCorrection,
    /// Smallest version to try; larger versions are used when the data does not fit.
    pub min_version: i16,
}

impl Default for EncodeOptions {
    fn default() -> Self {
        Self {
            error_correction: ErrorCorrection::L,
            min_version: 1,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EncodeError {
    #[error("version hint {0} is outside 1..=40")]
    InvalidVersion(i16),
    #[error("{bytes} bytes do not fit any version at level {level}")]
    DataTooLong { bytes: usize, level: ErrorCorrection },
    #[error("unknown error correction level `{0}`")]
    UnknownLevel(String),
    #[error("qr encoder failed: {0}")]
    Encoder(#[from] QrError),
}

/// Encode `text` as the smallest byte-mode symbol at or above the version hint.
pub fn encode(text: &str, options: &EncodeOptions) -> Result<QrCode, EncodeError> {
    if !(1..=MAX_VERSION).contains(&options.min_version) {
        return Err(EncodeError::InvalidVersion(options.min_version));
    }
    let data = text.as_bytes();
    let level = EcLevel::from(options.error_correction);
    for v in options.min_version..=MAX_VERSION {
        match byte_mode_bits(data, Version::Normal(v), level) {
            Ok(bits) => return Ok(QrCode::with_bits(bits, level)?),
            Err(QrError::DataTooLong) => continue,
            Err(err) => return Err(err.into()),
        }
    }
    Err(EncodeError::DataTooLong {
        bytes: data.len(),
        level: options.error_correction,
    })
}

fn byte_mode_bits(data: &[u8], version: Version, level: EcLevel) -> Result<Bits, QrError> {
    let mut bits = Bits::new(version);
    bits.push_byte_data(data)?;
    bits.push_terminator(level)?;
    Ok(bits)
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case("l", ErrorCorrection::L)]
    #[test_case("M", ErrorCorrection::M)]
    #[test_case(" q ", ErrorCorrection::Q)]
    #[test_case("H", ErrorCorrection::H)]
    fn level_parses(input: &str, expected: ErrorCorrection) {
        assert_eq!(input.parse::<ErrorCorrection>().unwrap(), expected);
        assert_eq!(expected.to_string().parse::<ErrorCorrection>().unwrap(), expected);
    }

    #[test]
    fn unknown_level_is_rejected() {
        assert_eq!(
            "X".parse::<ErrorCorrection>(),
            Err(EncodeError::UnknownLevel("X".into()))
        );
    }

    #[test_case(0)]
    #[test_case(41)]
    #[test_case(-3)]
    fn version_hint_out_of_range(v: i16) {
        let options = EncodeOptions { min_version: v, ..Default::default() };
        assert_eq!(encode("A", &options).err(), Some(EncodeError::InvalidVersion(v)));
    }

    #[test]
    fn version_hint_sets_minimum_size() {
        let options = EncodeOptions { min_version: 5, ..Default::default() };
        let qr = encode("A", &options).unwrap();
        assert_eq!(qr.width(), 37);
        assert_eq!(qr.version(), Version::Normal(5));
    }

    #[test]
    fn grows_version_until_data_fits() {
        // 17 bytes is the byte-mode capacity of 1-L; one more needs version 2.
        assert_eq!(encode(&"a".repeat(17), &EncodeOptions::default()).unwrap().width(), 21);
        assert_eq!(encode(&"a".repeat(18), &EncodeOptions::default()).unwrap().width(), 25);
    }

    #[test]
    fn oversized_input_reports_length() {
        let text = "z".repeat(3000);
        assert_eq!(
            encode(&text, &EncodeOptions::default()).err(),
            Some(EncodeError::DataTooLong { bytes: 3000, level: ErrorCorrection::L })
        );
    }
}
