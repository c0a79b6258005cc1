//! Ordered payloads with a canonical JSON form
//!
//! Both sides of the protocol must serialize a logical payload to identical
//! bytes or decryption of the authenticated box fails. The canonical form is
//! a compact UTF-8 JSON object (no whitespace) with fields emitted in
//! insertion order, so every call site fixes its field order once and keeps
//! it stable.

use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::{CryptoError, CryptoResult};

/// String-valued JSON object with caller-controlled field order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrderedPayload {
    fields: Vec<(String, String)>,
}

impl OrderedPayload {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a field, preserving insertion order
    pub fn field(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.fields.push((name.into(), value.into()));
        self
    }

    /// Number of fields in the payload
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Serialize to the canonical JSON byte form used for encryption
    pub fn to_canonical_json(&self) -> CryptoResult<Vec<u8>> {
        serde_json::to_vec(self).map_err(|e| CryptoError::Encryption(e.to_string()))
    }
}

impl Serialize for OrderedPayload {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for (name, value) in &self.fields {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}
