//! Single-line share codes that reproduce a maze on another machine.
//!
//! A code reads `maze:v1:<W>x<H>:<payload>`, where the payload is the
//! unpadded base64 of a JSON object carrying the seed and goal placement.

use std::{error::Error, fmt};

use base64::{engine::general_purpose::STANDARD_NO_PAD, Engine as _};
use maze_game_core::{GoalPlacement, MazeError, MazeSize};
use serde::{Deserialize, Serialize};

const CODE_DOMAIN: &str = "maze";
const CODE_VERSION: &str = "v1";

/// Identifier prefix emitted before the maze dimensions and payload.
pub(crate) const CODE_HEADER: &str = "maze:v1";
/// Delimiter used to separate the prefix, maze dimensions and payload.
const FIELD_DELIMITER: char = ':';

/// Everything needed to carve the same maze again.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct MazeCode {
    /// Dimensions of the maze.
    pub(crate) size: MazeSize,
    /// Seed fed to the generator.
    pub(crate) seed: u64,
    /// Goal placement strategy.
    pub(crate) placement: GoalPlacement,
}

impl MazeCode {
    /// Encodes the maze into a single-line string that can be shared.
    pub(crate) fn encode(&self) -> Result<String, MazeCodeError> {
        let payload = CodePayload {
            seed: self.seed,
            placement: self.placement,
        };
        let json = serde_json::to_vec(&payload).map_err(MazeCodeError::InvalidPayload)?;
        let encoded = STANDARD_NO_PAD.encode(json);
        Ok(format!(
            "{CODE_HEADER}:{}x{}:{encoded}",
            self.size.width(),
            self.size.height()
        ))
    }

    /// Decodes a maze code from its string representation.
    pub(crate) fn decode(value: &str) -> Result<Self, MazeCodeError> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(MazeCodeError::EmptyCode);
        }

        let mut parts = trimmed.split(FIELD_DELIMITER);
        // `split` always yields a first segment; the empty case is handled above.
        let domain = parts.next().unwrap_or_default();
        let version = parts.next().ok_or(MazeCodeError::MissingVersion)?;
        let dimensions = parts.next().ok_or(MazeCodeError::MissingDimensions)?;
        let payload = parts.next().ok_or(MazeCodeError::MissingPayload)?;
        if parts.next().is_some() {
            return Err(MazeCodeError::TrailingData);
        }

        if domain != CODE_DOMAIN {
            return Err(MazeCodeError::InvalidPrefix(domain.to_owned()));
        }
        if version != CODE_VERSION {
            return Err(MazeCodeError::UnsupportedVersion(version.to_owned()));
        }

        let size = parse_dimensions(dimensions)?;
        let bytes = STANDARD_NO_PAD
            .decode(payload.as_bytes())
            .map_err(MazeCodeError::InvalidEncoding)?;
        let decoded: CodePayload =
            serde_json::from_slice(&bytes).map_err(MazeCodeError::InvalidPayload)?;

        Ok(Self {
            size,
            seed: decoded.seed,
            placement: decoded.placement,
        })
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct CodePayload {
    seed: u64,
    placement: GoalPlacement,
}

/// Errors that can occur while encoding or decoding maze codes.
#[derive(Debug)]
pub(crate) enum MazeCodeError {
    /// The provided string was empty or contained only whitespace.
    EmptyCode,
    /// The code did not contain a version segment.
    MissingVersion,
    /// The code did not include maze dimensions.
    MissingDimensions,
    /// The code did not include the payload segment.
    MissingPayload,
    /// The code carried more segments than expected.
    TrailingData,
    /// The code used an unexpected prefix segment.
    InvalidPrefix(String),
    /// The code used an unsupported version identifier.
    UnsupportedVersion(String),
    /// The maze dimensions could not be parsed.
    InvalidDimensions(String),
    /// The maze dimensions parsed but describe no valid maze.
    InvalidSize(MazeError),
    /// The base64 payload could not be decoded.
    InvalidEncoding(base64::DecodeError),
    /// The payload could not be serialised or deserialised.
    InvalidPayload(serde_json::Error),
}

impl fmt::Display for MazeCodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyCode => write!(f, "maze code was empty"),
            Self::MissingVersion => write!(f, "maze code is missing the version"),
            Self::MissingDimensions => write!(f, "maze code is missing the maze dimensions"),
            Self::MissingPayload => write!(f, "maze code is missing the payload"),
            Self::TrailingData => write!(f, "maze code has unexpected trailing segments"),
            Self::InvalidPrefix(prefix) => write!(f, "maze code prefix '{prefix}' is not supported"),
            Self::UnsupportedVersion(version) => {
                write!(f, "maze code version '{version}' is not supported")
            }
            Self::InvalidDimensions(dimensions) => {
                write!(f, "could not parse maze dimensions '{dimensions}'")
            }
            Self::InvalidSize(_) => write!(f, "maze code describes an invalid maze size"),
            Self::InvalidEncoding(error) => write!(f, "could not decode maze payload: {error}"),
            Self::InvalidPayload(error) => write!(f, "could not parse maze payload: {error}"),
        }
    }
}

impl Error for MazeCodeError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::InvalidSize(error) => Some(error),
            Self::InvalidEncoding(error) => Some(error),
            Self::InvalidPayload(error) => Some(error),
            _ => None,
        }
    }
}

fn parse_dimensions(dimensions: &str) -> Result<MazeSize, MazeCodeError> {
    let (width, height) = dimensions
        .split_once(['x', 'X'])
        .ok_or_else(|| MazeCodeError::InvalidDimensions(dimensions.to_owned()))?;

    let width = width
        .trim()
        .parse::<u32>()
        .map_err(|_| MazeCodeError::InvalidDimensions(dimensions.to_owned()))?;
    let height = height
        .trim()
        .parse::<u32>()
        .map_err(|_| MazeCodeError::InvalidDimensions(dimensions.to_owned()))?;

    MazeSize::new(width, height).map_err(MazeCodeError::InvalidSize)
}
