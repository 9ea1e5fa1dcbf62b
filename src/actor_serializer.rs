use std::any::{Any, TypeId};

use serde::de::DeserializeOwned;

use crate::error::SerializationError;
use crate::object_serializer::{JsonObjectSerializer, ObjectSerializer};
use crate::reminder::{self, ReminderDescriptor};
use crate::timer;
use crate::wire_value::{Payload, WireValue};

/// Serializes and deserializes actor-related values for the runtime wire.
///
/// Timer and reminder descriptors are encoded through hand-built compact JSON
/// mappers; every other value is delegated to the injected
/// [`ObjectSerializer`]. All operations are synchronous and stateless, so a
/// single instance can be shared freely across threads.
pub struct ActorSerializer<S = JsonObjectSerializer> {
    object_serializer: S,
}

impl ActorSerializer<JsonObjectSerializer> {
    /// Creates a serializer backed by the default JSON object serializer.
    pub fn new() -> ActorSerializer<JsonObjectSerializer> {
        ActorSerializer {
            object_serializer: JsonObjectSerializer::new(),
        }
    }
}

impl Default for ActorSerializer<JsonObjectSerializer> {
    fn default() -> ActorSerializer<JsonObjectSerializer> {
        ActorSerializer::new()
    }
}

impl<S: ObjectSerializer> ActorSerializer<S> {
    /// Creates a serializer that delegates generic values to
    /// `object_serializer`.
    pub fn with_object_serializer(object_serializer: S) -> ActorSerializer<S> {
        ActorSerializer { object_serializer }
    }

    /// Serializes a value to its textual wire form.
    ///
    /// `None` serializes to `None`; timers and reminders take their compact
    /// mappers; everything else goes through the injected serializer.
    pub fn serialize_to_string(
        &self,
        value: Option<WireValue<'_>>,
    ) -> Result<Option<String>, SerializationError> {
        match value {
            None => Ok(None),
            Some(value) => self.serialize_value(value).map(Some),
        }
    }

    fn serialize_value(&self, value: WireValue<'_>) -> Result<String, SerializationError> {
        match value {
            WireValue::Timer(timer) => timer::encode(timer, self),
            WireValue::Reminder(reminder) => reminder::encode(reminder),
            WireValue::Value(value) => self.object_serializer.to_string(value),
        }
    }

    /// Deserializes an inbound payload into `T`.
    ///
    /// Requests for [`ReminderDescriptor`] are decoded by the reminder mapper,
    /// which accepts both the textual and the raw-byte shape of the payload;
    /// every other target type is delegated to the injected serializer. There
    /// is no matching special case for timers: the runtime never sends a
    /// timer registration back through this path.
    pub fn deserialize<'a, T>(&self, value: impl Into<Payload<'a>>) -> Result<T, SerializationError>
    where
        T: DeserializeOwned + 'static,
    {
        let payload = value.into();

        if TypeId::of::<T>() == TypeId::of::<ReminderDescriptor>() {
            let decoded = reminder::decode(payload)?;
            let boxed: Box<dyn Any> = Box::new(decoded);
            return match boxed.downcast::<T>() {
                Ok(reminder) => Ok(*reminder),
                Err(_) => Err(SerializationError::Deserialization(
                    "reminder target type mismatch".to_owned(),
                )),
            };
        }

        match payload {
            Payload::Bytes(bytes) => self.object_serializer.from_bytes(bytes),
            Payload::Text(text) => self.object_serializer.from_str(text),
        }
    }

    pub(crate) fn object_serializer(&self) -> &S {
        &self.object_serializer
    }
}
