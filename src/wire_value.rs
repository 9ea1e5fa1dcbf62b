use crate::reminder::ReminderDescriptor;
use crate::timer::TimerDescriptor;

/// A value handed to [`ActorSerializer::serialize_to_string`].
///
/// The serializer special-cases exactly the two descriptor kinds; everything
/// else goes through the [`Value`] arm and the injected
/// [`ObjectSerializer`]. The dispatch is a plain variant check, so a type that
/// merely wraps or resembles a descriptor is still serialized generically.
///
/// [`ActorSerializer::serialize_to_string`]: crate::ActorSerializer::serialize_to_string
/// [`Value`]: WireValue::Value
/// [`ObjectSerializer`]: crate::ObjectSerializer
pub enum WireValue<'a> {
    /// A scheduled timer registration.
    Timer(&'a TimerDescriptor),

    /// Parameters of a durable reminder.
    Reminder(&'a ReminderDescriptor),

    /// Any other application value, serialized generically.
    Value(&'a dyn erased_serde::Serialize),
}

impl<'a> WireValue<'a> {
    /// Wraps an ordinary application value for generic serialization.
    pub fn value<T: serde::Serialize>(value: &'a T) -> WireValue<'a> {
        WireValue::Value(value)
    }
}

impl<'a> From<&'a TimerDescriptor> for WireValue<'a> {
    fn from(timer: &'a TimerDescriptor) -> WireValue<'a> {
        WireValue::Timer(timer)
    }
}

impl<'a> From<&'a ReminderDescriptor> for WireValue<'a> {
    fn from(reminder: &'a ReminderDescriptor) -> WireValue<'a> {
        WireValue::Reminder(reminder)
    }
}

/// An inbound payload, either raw bytes or text.
///
/// The runtime hands back payloads in both shapes depending on the API that
/// produced them, so [`ActorSerializer::deserialize`] accepts either.
///
/// [`ActorSerializer::deserialize`]: crate::ActorSerializer::deserialize
#[derive(Debug, Clone, Copy)]
pub enum Payload<'a> {
    /// A raw byte payload.
    Bytes(&'a [u8]),

    /// A textual payload.
    Text(&'a str),
}

impl<'a> From<&'a [u8]> for Payload<'a> {
    fn from(bytes: &'a [u8]) -> Payload<'a> {
        Payload::Bytes(bytes)
    }
}

impl<'a> From<&'a str> for Payload<'a> {
    fn from(text: &'a str) -> Payload<'a> {
        Payload::Text(text)
    }
}
