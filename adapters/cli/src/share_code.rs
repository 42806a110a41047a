use std::{error::Error, fmt};

use base64::{engine::general_purpose::STANDARD_NO_PAD, Engine as _};
use froggies_core::{EngineConfig, Seed};
use serde::{Deserialize, Serialize};

const CODE_DOMAIN: &str = "frogs";
const CODE_VERSION: &str = "v1";

/// Identifier prefix emitted before the encoded game payload.
pub(crate) const CODE_HEADER: &str = "frogs:v1";
const FIELD_DELIMITER: char = ':';

/// Everything needed to rebuild an identical board on another machine.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub(crate) struct ShareCode {
    /// Seed that generated the board.
    pub(crate) seed: Seed,
    /// Edge length of the square board.
    pub(crate) grid_size: u32,
    /// Frogs placed on the board.
    pub(crate) frog_count: u32,
    /// Move budget of the session.
    pub(crate) max_moves: u32,
}

impl ShareCode {
    /// Captures the shareable parts of a running session.
    #[must_use]
    pub(crate) fn new(seed: Seed, config: &EngineConfig) -> Self {
        Self {
            seed,
            grid_size: config.grid_size,
            frog_count: config.frog_count,
            max_moves: config.max_moves,
        }
    }

    /// Applies the shared board parameters over the provided tuning.
    #[must_use]
    pub(crate) fn apply_to(&self, mut config: EngineConfig) -> EngineConfig {
        config.grid_size = self.grid_size;
        config.frog_count = self.frog_count;
        config.max_moves = self.max_moves;
        config
    }

    /// Encodes the code into a single line suitable for pasting into chat.
    #[must_use]
    pub(crate) fn encode(&self) -> String {
        // A struct of integers always serializes.
        let json = serde_json::to_vec(self).unwrap_or_default();
        format!("{CODE_HEADER}:{}", STANDARD_NO_PAD.encode(json))
    }

    /// Decodes a share code from its string form.
    pub(crate) fn decode(value: &str) -> Result<Self, ShareCodeError> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ShareCodeError::EmptyCode);
        }

        let mut parts = trimmed.splitn(3, FIELD_DELIMITER);
        let domain = parts.next().ok_or(ShareCodeError::MissingPrefix)?;
        let version = parts.next().ok_or(ShareCodeError::MissingVersion)?;
        let payload = parts.next().ok_or(ShareCodeError::MissingPayload)?;

        if domain != CODE_DOMAIN {
            return Err(ShareCodeError::InvalidPrefix(domain.to_owned()));
        }
        if version != CODE_VERSION {
            return Err(ShareCodeError::UnsupportedVersion(version.to_owned()));
        }

        let bytes = STANDARD_NO_PAD
            .decode(payload.as_bytes())
            .map_err(ShareCodeError::InvalidEncoding)?;
        serde_json::from_slice(&bytes).map_err(ShareCodeError::InvalidPayload)
    }
}

/// Errors that can occur while decoding share codes.
#[derive(Debug)]
pub(crate) enum ShareCodeError {
    /// The provided string was empty or contained only whitespace.
    EmptyCode,
    /// The prefix segment was missing.
    MissingPrefix,
    /// The version segment was missing.
    MissingVersion,
    /// The payload segment was missing.
    MissingPayload,
    /// The code used an unexpected prefix segment.
    InvalidPrefix(String),
    /// The code used an unsupported version identifier.
    UnsupportedVersion(String),
    /// The base64 payload could not be decoded.
    InvalidEncoding(base64::DecodeError),
    /// The decoded payload could not be deserialised.
    InvalidPayload(serde_json::Error),
}

impl fmt::Display for ShareCodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyCode => write!(f, "share code was empty"),
            Self::MissingPrefix => write!(f, "share code is missing the prefix"),
            Self::MissingVersion => write!(f, "share code is missing the version"),
            Self::MissingPayload => write!(f, "share code is missing the payload"),
            Self::InvalidPrefix(prefix) => write!(f, "share code prefix '{prefix}' is not supported"),
            Self::UnsupportedVersion(version) => {
                write!(f, "share code version '{version}' is not supported")
            }
            Self::InvalidEncoding(error) => write!(f, "could not decode share code: {error}"),
            Self::InvalidPayload(error) => write!(f, "could not parse share code payload: {error}"),
        }
    }
}

impl Error for ShareCodeError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::InvalidEncoding(error) => Some(error),
            Self::InvalidPayload(error) => Some(error),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn code_carries_header_and_rebuilds_config() {
        let config = EngineConfig {
            grid_size: 12,
            frog_count: 7,
            max_moves: 40,
            ..EngineConfig::default()
        };
        let code = ShareCode::new(Seed::new(424_242), &config);

        let encoded = code.encode();
        assert!(encoded.starts_with(&format!("{CODE_HEADER}:")));

        let decoded = ShareCode::decode(&encoded).expect("share code decodes");
        assert_eq!(decoded, code);
        assert_eq!(decoded.apply_to(EngineConfig::default()), config);
    }

    #[test]
    fn decoding_tolerates_surrounding_whitespace() {
        let code = ShareCode::new(Seed::new(1), &EngineConfig::default());
        let padded = format!("  {}\n", code.encode());
        assert_eq!(ShareCode::decode(&padded).expect("decodes"), code);
    }

    #[test]
    fn malformed_codes_report_the_failing_segment() {
        assert!(matches!(ShareCode::decode("   "), Err(ShareCodeError::EmptyCode)));
        assert!(matches!(
            ShareCode::decode("frogs"),
            Err(ShareCodeError::MissingVersion)
        ));
        assert!(matches!(
            ShareCode::decode("frogs:v1"),
            Err(ShareCodeError::MissingPayload)
        ));
        assert!(matches!(
            ShareCode::decode("maze:v1:abc"),
            Err(ShareCodeError::InvalidPrefix(prefix)) if prefix == "maze"
        ));
        assert!(matches!(
            ShareCode::decode("frogs:v2:abc"),
            Err(ShareCodeError::UnsupportedVersion(version)) if version == "v2"
        ));
        assert!(matches!(
            ShareCode::decode("frogs:v1:!!!"),
            Err(ShareCodeError::InvalidEncoding(_))
        ));

        let not_json = STANDARD_NO_PAD.encode(b"not json");
        let error = ShareCode::decode(&format!("frogs:v1:{not_json}")).expect_err("bad payload");
        assert!(matches!(error, ShareCodeError::InvalidPayload(_)));
        assert!(error.source().is_some());
    }
}
