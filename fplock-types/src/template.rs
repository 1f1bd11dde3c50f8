//! Fingerprint template blob

use bytes::Bytes;
use std::fmt;

/// One enrolled fingerprint as produced by the module's merge operation.
///
/// The content is opaque to the engine: it is moved in and out of the
/// module verbatim and compared only by the module itself. Identity is
/// assigned by the caller at persistence time, not stored here.
#[derive(Clone, PartialEq, Eq)]
pub struct Template(Bytes);

impl Template {
    /// Wrap raw template bytes
    pub fn from_bytes(bytes: impl Into<Bytes>) -> Self {
        Self(bytes.into())
    }

    /// Template content
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Template size in bytes
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Check whether the template is empty
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Vec<u8>> for Template {
    fn from(bytes: Vec<u8>) -> Self {
        Self(Bytes::from(bytes))
    }
}

impl From<Bytes> for Template {
    fn from(bytes: Bytes) -> Self {
        Self(bytes)
    }
}

impl fmt::Debug for Template {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let preview = hex::encode(&self.0[..self.0.len().min(4)]);
        write!(f, "Template({} bytes, {}…)", self.0.len(), preview)
    }
}
