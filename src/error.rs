use thiserror::Error;

/// Errors that can occur while encoding or decoding wire payloads.
///
/// Parse and format errors are surfaced to the caller immediately; recovery
/// and retries belong to the transport layer, not to this codec.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum SerializationError {
    /// A duration string did not match the runtime's duration grammar.
    #[error("malformed duration {0:?}")]
    MalformedDuration(String),

    /// An envelope payload was not parseable JSON.
    #[error("malformed envelope: {0}")]
    MalformedEnvelope(#[source] serde_json::Error),

    /// A required field was absent from an inbound payload.
    #[error("missing required field `{0}`")]
    MissingField(&'static str),

    /// A value could not be serialized.
    #[error("could not serialize value: {0}")]
    Serialization(String),

    /// An inbound payload could not be converted into the requested type.
    #[error("could not deserialize payload: {0}")]
    Deserialization(String),
}
