use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::OidError;

/// Opaque content-addressed identifier for a stored object.
///
/// An `Oid` is the BLAKE3 hash of an object's serialized form. The core
/// never interprets it structurally; it only renders, parses, compares, and
/// uses it as a map key. Rendering is lowercase hex and round-trips:
/// `render(x).parse() == x`.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Oid([u8; 32]);

impl Oid {
    /// Compute an `Oid` directly from raw bytes.
    pub fn from_bytes(data: &[u8]) -> Self {
        Self(*blake3::hash(data).as_bytes())
    }

    /// Create an `Oid` from a pre-computed hash.
    pub const fn from_hash(hash: [u8; 32]) -> Self {
        Self(hash)
    }

    /// The raw 32-byte hash.
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Full hex-encoded rendering (64 characters).
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// Short hex rendering (first 8 characters), for logs and Debug output.
    pub fn short_hex(&self) -> String {
        hex::encode(&self.0[..4])
    }

    /// Parse from a hex rendering.
    pub fn from_hex(s: &str) -> Result<Self, OidError> {
        let bytes = hex::decode(s).map_err(|e| OidError::InvalidHex(e.to_string()))?;
        if bytes.len() != 32 {
            return Err(OidError::InvalidLength {
                expected: 32,
                actual: bytes.len(),
            });
        }
        let mut arr = [0u8; 32];
        arr.copy_from_slice(&bytes);
        Ok(Self(arr))
    }
}

impl fmt::Debug for Oid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Oid({})", self.short_hex())
    }
}

impl fmt::Display for Oid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl FromStr for Oid {
    type Err = OidError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

impl From<[u8; 32]> for Oid {
    fn from(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }
}

impl From<Oid> for [u8; 32] {
    fn from(id: Oid) -> Self {
        id.0
    }
}
