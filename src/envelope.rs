//! The JSON envelope exchanged with the actor runtime.
//!
//! Opaque payloads travel as `{"data":"<base64>"}`; an envelope without a
//! payload is `{}`. The envelope exists only for the duration of a single
//! wrap or unwrap call and is never exposed.

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::actor_serializer::ActorSerializer;
use crate::error::SerializationError;
use crate::object_serializer::ObjectSerializer;
use crate::wire_value::Payload;

/// The envelope's wire shape.
#[derive(Serialize)]
struct Envelope {
    #[serde(with = "base64_field", skip_serializing_if = "Option::is_none")]
    data: Option<Vec<u8>>,
}

/// The envelope's binary-field convention: payload bytes travel as a base64
/// text node.
mod base64_field {
    use base64::engine::general_purpose::STANDARD;
    use base64::Engine as _;
    use serde::Serializer;

    pub fn serialize<S: Serializer>(
        bytes: &Option<Vec<u8>>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match bytes {
            Some(bytes) => serializer.serialize_str(&STANDARD.encode(bytes)),
            // Unreachable through the envelope, which skips absent data.
            None => serializer.serialize_none(),
        }
    }

    /// Reads the binary payload out of a parsed `data` node. Anything that is
    /// not a base64 text node counts as an absent payload, not as an error.
    pub fn decode_node(node: &serde_json::Value) -> Option<Vec<u8>> {
        node.as_str().and_then(|text| STANDARD.decode(text).ok())
    }
}

impl<S: ObjectSerializer> ActorSerializer<S> {
    /// Wraps a value into the runtime's JSON envelope.
    ///
    /// `None` wraps to `None`; no empty envelope is ever built for it.
    /// Otherwise the value is serialized to bytes by the injected serializer
    /// and carried base64-encoded under the `data` field. A value without a
    /// byte representation produces `{}`.
    pub fn wrap<T: Serialize>(&self, value: Option<&T>) -> Result<Option<String>, SerializationError> {
        let value = match value {
            Some(value) => value,
            None => return Ok(None),
        };

        let data = self.object_serializer().to_bytes(value)?;
        log::debug!(
            "wrapping payload of {} bytes",
            data.as_ref().map(Vec::len).unwrap_or(0)
        );

        let text = serde_json::to_string(&Envelope { data })
            .map_err(|error| SerializationError::Serialization(error.to_string()))?;
        Ok(Some(text))
    }

    /// Extracts the payload of a runtime envelope and deserializes it.
    ///
    /// `None` unwraps to `None`, as does a well-formed envelope without a
    /// usable `data` field. A payload that is not JSON at all fails with
    /// [`SerializationError::MalformedEnvelope`]. The extracted bytes are
    /// interpreted as UTF-8 text and handed to
    /// [`deserialize`](ActorSerializer::deserialize), so an unwrapped payload
    /// may itself be one of the special descriptor kinds.
    pub fn unwrap<T>(&self, payload: Option<&str>) -> Result<Option<T>, SerializationError>
    where
        T: DeserializeOwned + 'static,
    {
        let payload = match payload {
            Some(payload) => payload,
            None => return Ok(None),
        };

        let root: serde_json::Value =
            serde_json::from_str(payload).map_err(SerializationError::MalformedEnvelope)?;

        let data = match root.get("data").and_then(base64_field::decode_node) {
            Some(data) => data,
            None => return Ok(None),
        };
        log::debug!("unwrapping payload of {} bytes", data.len());

        let text = String::from_utf8(data)
            .map_err(|error| SerializationError::Deserialization(error.to_string()))?;

        self.deserialize(Payload::Text(&text)).map(Some)
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use serde::de::DeserializeOwned;
    use serde::{Deserialize, Serialize};

    use crate::actor_serializer::ActorSerializer;
    use crate::error::SerializationError;
    use crate::object_serializer::ObjectSerializer;
    use crate::reminder::ReminderDescriptor;

    #[derive(Serialize, Deserialize, Debug, PartialEq)]
    struct CounterState {
        count: u64,
    }

    #[test]
    fn wrapping_none_yields_none() -> Result<(), anyhow::Error> {
        let serializer = ActorSerializer::new();
        assert_eq!(serializer.wrap(Option::<&String>::None)?, None);
        Ok(())
    }

    // Golden envelope for a serializer that encodes strings as their raw
    // UTF-8 bytes: `aGk=` is the base64 encoding of `hi`.
    #[test]
    fn wrapping_encodes_the_payload_as_base64() -> Result<(), anyhow::Error> {
        let serializer = ActorSerializer::with_object_serializer(RawStringSerializer);
        let json = serializer.wrap(Some(&"hi"))?;
        assert_eq!(json.as_deref(), Some(r#"{"data":"aGk="}"#));
        Ok(())
    }

    // Verifies that a value without a byte representation produces an empty
    // envelope instead of a data field.
    #[test]
    fn wrapping_a_value_without_bytes_emits_an_empty_envelope() -> Result<(), anyhow::Error> {
        let serializer = ActorSerializer::with_object_serializer(NoBytesSerializer);
        let json = serializer.wrap(Some(&"anything"))?;
        assert_eq!(json.as_deref(), Some("{}"));
        Ok(())
    }

    #[test]
    fn unwrapping_none_yields_none() -> Result<(), anyhow::Error> {
        let serializer = ActorSerializer::new();
        assert_eq!(serializer.unwrap::<CounterState>(None)?, None);
        Ok(())
    }

    // An envelope without a usable payload is not an error; the runtime sends
    // `{}` for absent state.
    #[test]
    fn unwrapping_an_envelope_without_data_yields_none() -> Result<(), anyhow::Error> {
        let serializer = ActorSerializer::new();

        assert_eq!(serializer.unwrap::<CounterState>(Some("{}"))?, None);
        assert_eq!(
            serializer.unwrap::<CounterState>(Some(r#"{"other":1}"#))?,
            None
        );
        assert_eq!(serializer.unwrap::<CounterState>(Some("[1,2,3]"))?, None);
        assert_eq!(
            serializer.unwrap::<CounterState>(Some(r#"{"data":5}"#))?,
            None
        );
        assert_eq!(
            serializer.unwrap::<CounterState>(Some(r#"{"data":"not base64!"}"#))?,
            None
        );

        Ok(())
    }

    // Distinct from the missing-data case: JSON that does not parse at all is
    // a malformed envelope.
    #[test]
    fn unwrapping_unparsable_json_is_an_error() {
        let serializer = ActorSerializer::new();
        let result = serializer.unwrap::<CounterState>(Some(r#"{"data": "#));
        assert!(matches!(
            result,
            Err(SerializationError::MalformedEnvelope(_))
        ));
    }

    #[test]
    fn round_trips_application_state() -> Result<(), anyhow::Error> {
        let serializer = ActorSerializer::new();
        let state = CounterState { count: 42 };

        let envelope = serializer.wrap(Some(&state))?;
        let unwrapped: Option<CounterState> = serializer.unwrap(envelope.as_deref())?;

        assert_eq!(unwrapped, Some(state));
        Ok(())
    }

    // Reminders fetched from the runtime arrive wrapped; unwrapping must route
    // through the special-cased reminder decoding.
    #[test]
    fn unwrapped_payloads_can_be_reminders() -> Result<(), anyhow::Error> {
        use base64::engine::general_purpose::STANDARD;
        use base64::Engine as _;

        let serializer = ActorSerializer::new();
        let reminder_json = r#"{"dueTime":"0h0m5s0ms","period":"0h1m0s0ms","data":"hello"}"#;
        let envelope = format!(r#"{{"data":"{}"}}"#, STANDARD.encode(reminder_json));

        let reminder: Option<ReminderDescriptor> = serializer.unwrap(Some(&envelope))?;
        let reminder = reminder.expect("reminder");

        assert_eq!(reminder.due_time(), Duration::from_secs(5));
        assert_eq!(reminder.period(), Duration::from_secs(60));
        assert_eq!(reminder.data(), Some("hello"));

        Ok(())
    }

    /// Encodes strings as their raw UTF-8 bytes, the way the runtime's own
    /// default serializer treats plain string state.
    struct RawStringSerializer;

    impl ObjectSerializer for RawStringSerializer {
        fn to_bytes(
            &self,
            value: &dyn erased_serde::Serialize,
        ) -> Result<Option<Vec<u8>>, SerializationError> {
            let node = serde_json::to_value(value)
                .map_err(|error| SerializationError::Serialization(error.to_string()))?;
            match node {
                serde_json::Value::String(text) => Ok(Some(text.into_bytes())),
                other => Ok(Some(other.to_string().into_bytes())),
            }
        }

        fn to_string(
            &self,
            value: &dyn erased_serde::Serialize,
        ) -> Result<String, SerializationError> {
            self.to_bytes(value).map(|bytes| {
                String::from_utf8_lossy(&bytes.unwrap_or_default()).into_owned()
            })
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

    /// Reports every value as having no byte representation.
    struct NoBytesSerializer;

    impl ObjectSerializer for NoBytesSerializer {
        fn to_bytes(
            &self,
            _value: &dyn erased_serde::Serialize,
        ) -> Result<Option<Vec<u8>>, SerializationError> {
            Ok(None)
        }

        fn to_string(
            &self,
            _value: &dyn erased_serde::Serialize,
        ) -> Result<String, SerializationError> {
            Ok(String::new())
        }

        fn from_bytes<T: DeserializeOwned>(
            &self,
            _bytes: &[u8],
        ) -> Result<T, SerializationError> {
            Err(SerializationError::Deserialization(
                "no byte representation".to_owned(),
            ))
        }

        fn from_str<T: DeserializeOwned>(&self, _text: &str) -> Result<T, SerializationError> {
            Err(SerializationError::Deserialization(
                "no byte representation".to_owned(),
            ))
        }
    }
}
