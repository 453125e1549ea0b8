//! File envelope and payload encodings.
//!
//! Layout (integers little-endian):
//! - 4 bytes: magic (`VDSC`)
//! - 2 bytes: format version
//! - 1 byte: payload encoding
//! - 2 bytes: tag of the root descriptor
//! - N bytes: payload
//!
//! JSON payloads are self-describing: fields added later with
//! `#[serde(default)]` are filled in when an older file is read. Bincode
//! payloads are positional, so their layout is fixed per format version and
//! any change to a descriptor's fields needs a [`FORMAT_VERSION`] bump.

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use crate::descriptor::Descriptor;
use crate::error::{PersistError, Result};
use crate::schema;

pub const MAGIC: [u8; 4] = *b"VDSC";

/// Newest envelope version this build reads and the one it writes.
pub const FORMAT_VERSION: u16 = 1;

pub const HEADER_SIZE: usize = 9;

/// Payload encoding.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Encoding {
    /// Compact bincode payload. Only readable by builds with the same
    /// descriptor layout.
    Binary,
    /// Self-describing JSON payload. Tolerates fields added later.
    #[default]
    Json,
}

impl Encoding {
    pub fn from_byte(byte: u8) -> Option<Self> {
        match byte {
            0 => Some(Self::Binary),
            1 => Some(Self::Json),
            _ => None,
        }
    }

    pub fn to_byte(self) -> u8 {
        match self {
            Self::Binary => 0,
            Self::Json => 1,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Binary => "binary",
            Self::Json => "json",
        }
    }
}

impl fmt::Display for Encoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Encoding {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "binary" | "bincode" => Ok(Self::Binary),
            "json" => Ok(Self::Json),
            other => Err(format!("unknown encoding '{}'", other)),
        }
    }
}

/// Decoded file header.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Header {
    pub version: u16,
    pub encoding: Encoding,
    pub tag: u16,
}

/// Encode a root descriptor into a complete file image.
pub fn encode<T: Descriptor>(value: &T, encoding: Encoding) -> Result<Vec<u8>> {
    let tag = T::tag()?;

    let payload = match encoding {
        Encoding::Binary => bincode::serialize(value).map_err(|e| PersistError::Serialization {
            what: T::NAME,
            source: Box::new(e),
        })?,
        Encoding::Json => serde_json::to_vec_pretty(value).map_err(|e| {
            PersistError::Serialization {
                what: T::NAME,
                source: Box::new(e),
            }
        })?,
    };

    let mut output = Vec::with_capacity(HEADER_SIZE + payload.len());
    output.extend_from_slice(&MAGIC);
    output.extend_from_slice(&FORMAT_VERSION.to_le_bytes());
    output.push(encoding.to_byte());
    output.extend_from_slice(&tag.value().to_le_bytes());
    output.extend_from_slice(&payload);
    Ok(output)
}

/// Validate the envelope. `path` is only used for error reporting.
pub fn read_header(bytes: &[u8], path: &Path) -> Result<Header> {
    if bytes.len() < HEADER_SIZE {
        return Err(PersistError::InvalidFormat {
            path: path.to_path_buf(),
            reason: "File too small".to_string(),
        });
    }

    if bytes[0..4] != MAGIC {
        return Err(PersistError::InvalidFormat {
            path: path.to_path_buf(),
            reason: "Not an editor file (invalid magic bytes)".to_string(),
        });
    }

    let version = u16::from_le_bytes([bytes[4], bytes[5]]);
    if version > FORMAT_VERSION {
        return Err(PersistError::UnsupportedVersion {
            found: version,
            max_supported: FORMAT_VERSION,
            path: path.to_path_buf(),
        });
    }

    let encoding = Encoding::from_byte(bytes[6]).ok_or_else(|| PersistError::InvalidFormat {
        path: path.to_path_buf(),
        reason: format!("Unknown payload encoding {}", bytes[6]),
    })?;

    let tag = u16::from_le_bytes([bytes[7], bytes[8]]);

    Ok(Header {
        version,
        encoding,
        tag,
    })
}

/// Decode a file image whose root record must be a `T`.
pub fn decode<T: Descriptor>(bytes: &[u8], path: &Path) -> Result<T> {
    let header = read_header(bytes, path)?;

    let expected = T::tag()?;
    if header.tag != expected.value() {
        return Err(PersistError::TagMismatch {
            path: path.to_path_buf(),
            expected,
            expected_name: T::NAME,
            found: header.tag,
            found_name: schema::tag_name(header.tag),
        });
    }

    let payload = &bytes[HEADER_SIZE..];
    match header.encoding {
        Encoding::Binary => bincode::deserialize(payload).map_err(|e| {
            PersistError::Deserialization {
                path: path.to_path_buf(),
                source: Box::new(e),
            }
        }),
        Encoding::Json => serde_json::from_slice(payload).map_err(|e| {
            PersistError::Deserialization {
                path: path.to_path_buf(),
                source: Box::new(e),
            }
        }),
    }
}
