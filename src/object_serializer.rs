use serde::de::DeserializeOwned;

use crate::error::SerializationError;

/// Converts arbitrary application values to and from raw bytes and text.
///
/// The actor serializer delegates every value that is not one of its special
/// cases to an implementation of this trait.
///
/// Implementations must be stateless: every call is an independent, bounded
/// transform that is safe to invoke concurrently.
pub trait ObjectSerializer {
    /// Serializes a value to raw bytes.
    ///
    /// Returning `Ok(None)` means the value has no byte representation; an
    /// envelope built from it carries no payload field.
    fn to_bytes(
        &self,
        value: &dyn erased_serde::Serialize,
    ) -> Result<Option<Vec<u8>>, SerializationError>;

    /// Serializes a value to its textual form.
    fn to_string(&self, value: &dyn erased_serde::Serialize)
        -> Result<String, SerializationError>;

    /// Deserializes a value from raw bytes.
    fn from_bytes<T: DeserializeOwned>(&self, bytes: &[u8]) -> Result<T, SerializationError>;

    /// Deserializes a value from its textual form.
    fn from_str<T: DeserializeOwned>(&self, text: &str) -> Result<T, SerializationError>;
}

/// The default [`ObjectSerializer`], backed by `serde_json`.
///
/// This matches what the actor runtime expects for ordinary state payloads.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonObjectSerializer;

impl JsonObjectSerializer {
    /// Creates a new serializer instance.
    pub fn new() -> JsonObjectSerializer {
        JsonObjectSerializer
    }
}

impl ObjectSerializer for JsonObjectSerializer {
    fn to_bytes(
        &self,
        value: &dyn erased_serde::Serialize,
    ) -> Result<Option<Vec<u8>>, SerializationError> {
        serde_json::to_vec(value)
            .map(Some)
            .map_err(|error| SerializationError::Serialization(error.to_string()))
    }

    fn to_string(
        &self,
        value: &dyn erased_serde::Serialize,
    ) -> Result<String, SerializationError> {
        serde_json::to_string(value)
            .map_err(|error| SerializationError::Serialization(error.to_string()))
    }

    fn from_bytes<T: DeserializeOwned>(&self, bytes: &[u8]) -> Result<T, SerializationError> {
        serde_json::from_slice(bytes)
            .map_err(|error| SerializationError::Deserialization(error.to_string()))
    }

    fn from_str<T: DeserializeOwned>(&self, text: &str) -> Result<T, SerializationError> {
        serde_json::from_str(text)
            .map_err(|error| SerializationError::Deserialization(error.to_string()))
    }
}
