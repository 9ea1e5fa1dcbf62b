use std::time::Duration;

use serde::{Deserialize, Deserializer, Serialize};

use crate::duration;
use crate::error::SerializationError;
use crate::wire_value::Payload;

/// Parameters of a durable reminder persisted by the actor runtime.
///
/// Unlike a timer's state, the `data` carried by a reminder is already a
/// pre-serialized string; it travels through the wire format verbatim and is
/// never re-encoded. Descriptors are built by application code before
/// registration and by [`decode`](crate::ActorSerializer::deserialize) when the
/// runtime hands a reminder back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReminderDescriptor {
    due_time: Duration,
    period: Duration,
    data: Option<String>,
}

impl ReminderDescriptor {
    /// Creates a new descriptor.
    pub fn new(due_time: Duration, period: Duration, data: Option<String>) -> ReminderDescriptor {
        ReminderDescriptor {
            due_time,
            period,
            data,
        }
    }

    /// Time until the first invocation.
    pub fn due_time(&self) -> Duration {
        self.due_time
    }

    /// Interval between repeated invocations.
    pub fn period(&self) -> Duration {
        self.period
    }

    /// The pre-serialized reminder payload, if any.
    pub fn data(&self) -> Option<&str> {
        self.data.as_deref()
    }
}

/// The reminder's wire shape. Field declaration order pins the emission order.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ReminderFields<'a> {
    due_time: String,
    period: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<&'a str>,
}

pub(crate) fn encode(reminder: &ReminderDescriptor) -> Result<String, SerializationError> {
    let fields = ReminderFields {
        due_time: duration::encode(reminder.due_time()),
        period: duration::encode(reminder.period()),
        data: reminder.data(),
    };

    serde_json::to_string(&fields)
        .map_err(|error| SerializationError::Serialization(error.to_string()))
}

pub(crate) fn decode(payload: Payload<'_>) -> Result<ReminderDescriptor, SerializationError> {
    let node: serde_json::Value = match payload {
        Payload::Bytes(bytes) => serde_json::from_slice(bytes),
        Payload::Text(text) => serde_json::from_str(text),
    }
    .map_err(|error| SerializationError::Deserialization(error.to_string()))?;

    decode_node(&node)
}

fn decode_node(node: &serde_json::Value) -> Result<ReminderDescriptor, SerializationError> {
    let due_time = duration::decode(required_text(node, "dueTime")?)?;
    let period = duration::decode(required_text(node, "period")?)?;
    let data = node
        .get("data")
        .and_then(serde_json::Value::as_str)
        .map(str::to_owned);

    Ok(ReminderDescriptor {
        due_time,
        period,
        data,
    })
}

fn required_text<'a>(
    node: &'a serde_json::Value,
    field: &'static str,
) -> Result<&'a str, SerializationError> {
    node.get(field)
        .and_then(serde_json::Value::as_str)
        .ok_or(SerializationError::MissingField(field))
}

/// Hand-written so that decoding through a generic serializer yields the same
/// result as the dispatcher's special case.
impl<'de> Deserialize<'de> for ReminderDescriptor {
    fn deserialize<D>(deserializer: D) -> Result<ReminderDescriptor, D::Error>
    where
        D: Deserializer<'de>,
    {
        let node = serde_json::Value::deserialize(deserializer)?;
        decode_node(&node).map_err(serde::de::Error::custom)
    }
}
