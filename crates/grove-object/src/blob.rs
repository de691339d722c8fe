use std::fmt;
use std::io::Read;

use grove_types::BlobOid;

use crate::error::ObjectError;

/// The contents of a blob.
///
/// Contents come in three shapes: a fully buffered byte vector, a lazy
/// pull-based stream, or a stream with a declared total length. Streaming
/// shapes exist so large blobs never have to be buffered whole; a consumer
/// pulls bytes through [`Read`] at its own pace.
///
/// Value equality is defined only between two [`Bytes`](Self::Bytes)
/// variants. A stream is never compared by value; comparing one always
/// yields `false`.
pub enum BlobContents {
    /// Fully buffered contents.
    Bytes(Vec<u8>),
    /// A lazy stream of unknown total length.
    Stream(Box<dyn Read + Send>),
    /// A lazy stream with a declared total length in bytes.
    SizedStream {
        reader: Box<dyn Read + Send>,
        length: u64,
    },
}

impl BlobContents {
    /// Returns `true` if the contents are fully buffered in memory.
    pub fn is_buffered(&self) -> bool {
        matches!(self, Self::Bytes(_))
    }

    /// The total length, when known without consuming the contents.
    pub fn declared_length(&self) -> Option<u64> {
        match self {
            Self::Bytes(data) => Some(data.len() as u64),
            Self::Stream(_) => None,
            Self::SizedStream { length, .. } => Some(*length),
        }
    }

    /// Drain the contents into a buffered byte vector.
    ///
    /// Buffered contents are returned as-is. Streams are read to the end;
    /// a sized stream that yields a different number of bytes than it
    /// declared fails with [`ObjectError::LengthMismatch`].
    pub fn into_bytes(self) -> Result<Vec<u8>, ObjectError> {
        match self {
            Self::Bytes(data) => Ok(data),
            Self::Stream(mut reader) => {
                let mut data = Vec::new();
                reader.read_to_end(&mut data)?;
                Ok(data)
            }
            Self::SizedStream { mut reader, length } => {
                let mut data = Vec::with_capacity(length as usize);
                reader.read_to_end(&mut data)?;
                if data.len() as u64 != length {
                    return Err(ObjectError::LengthMismatch {
                        declared: length,
                        actual: data.len() as u64,
                    });
                }
                Ok(data)
            }
        }
    }
}

impl PartialEq for BlobContents {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Bytes(a), Self::Bytes(b)) => a == b,
            _ => false,
        }
    }
}

impl fmt::Debug for BlobContents {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bytes(data) => f.debug_tuple("Bytes").field(&data.len()).finish(),
            Self::Stream(_) => f.write_str("Stream(..)"),
            Self::SizedStream { length, .. } => {
                f.debug_struct("SizedStream").field("length", length).finish()
            }
        }
    }
}

impl From<Vec<u8>> for BlobContents {
    fn from(data: Vec<u8>) -> Self {
        Self::Bytes(data)
    }
}

impl From<&[u8]> for BlobContents {
    fn from(data: &[u8]) -> Self {
        Self::Bytes(data.to_vec())
    }
}

/// Raw content object: an identifier plus contents.
#[derive(Debug, PartialEq)]
pub struct Blob {
    /// Content-addressed identifier of this blob.
    pub oid: BlobOid,
    /// The contents, buffered or streaming.
    pub contents: BlobContents,
}

impl Blob {
    /// Create a blob from an identifier and contents.
    pub fn new(oid: BlobOid, contents: BlobContents) -> Self {
        Self { oid, contents }
    }
}
