use std::fmt;
use std::time::Duration;

use serde::Serialize;

use crate::actor_serializer::ActorSerializer;
use crate::duration;
use crate::error::SerializationError;
use crate::object_serializer::ObjectSerializer;
use crate::reminder::ReminderDescriptor;
use crate::wire_value::WireValue;

/// A scheduled, possibly repeating invocation registered against an actor.
///
/// Descriptors are built by application code before registration, serialized
/// once per registration call and never mutated afterwards. The attached
/// state, when present, is serialized recursively at encode time, so it may
/// itself be one of the special descriptor kinds.
pub struct TimerDescriptor {
    due_time: Duration,
    period: Duration,
    callback: String,
    state: Option<TimerState>,
}

impl TimerDescriptor {
    /// Creates a descriptor without attached state.
    pub fn new(due_time: Duration, period: Duration, callback: &str) -> TimerDescriptor {
        TimerDescriptor {
            due_time,
            period,
            callback: callback.to_owned(),
            state: None,
        }
    }

    /// Creates a descriptor carrying state for the callback.
    pub fn with_state(
        due_time: Duration,
        period: Duration,
        callback: &str,
        state: TimerState,
    ) -> TimerDescriptor {
        TimerDescriptor {
            due_time,
            period,
            callback: callback.to_owned(),
            state: Some(state),
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

    /// Name of the actor method invoked when the timer fires.
    pub fn callback(&self) -> &str {
        &self.callback
    }

    /// The attached state, if any.
    pub fn state(&self) -> Option<&TimerState> {
        self.state.as_ref()
    }
}

impl fmt::Debug for TimerDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TimerDescriptor")
            .field("due_time", &self.due_time)
            .field("period", &self.period)
            .field("callback", &self.callback)
            .field("state", &self.state)
            .finish()
    }
}

/// Type-erased state attached to a timer.
pub enum TimerState {
    /// The state is itself a timer descriptor.
    Timer(Box<TimerDescriptor>),

    /// The state is a reminder descriptor.
    Reminder(ReminderDescriptor),

    /// Any other application value, serialized generically.
    Value(Box<dyn erased_serde::Serialize + Send + Sync>),
}

impl TimerState {
    /// Wraps an ordinary application value.
    pub fn value<T>(value: T) -> TimerState
    where
        T: Serialize + Send + Sync + 'static,
    {
        TimerState::Value(Box::new(value))
    }

    pub(crate) fn as_wire_value(&self) -> WireValue<'_> {
        match self {
            TimerState::Timer(timer) => WireValue::Timer(timer),
            TimerState::Reminder(reminder) => WireValue::Reminder(reminder),
            TimerState::Value(value) => WireValue::Value(&**value),
        }
    }
}

impl From<TimerDescriptor> for TimerState {
    fn from(timer: TimerDescriptor) -> TimerState {
        TimerState::Timer(Box::new(timer))
    }
}

impl From<ReminderDescriptor> for TimerState {
    fn from(reminder: ReminderDescriptor) -> TimerState {
        TimerState::Reminder(reminder)
    }
}

impl fmt::Debug for TimerState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TimerState::Timer(timer) => f.debug_tuple("Timer").field(timer).finish(),
            TimerState::Reminder(reminder) => f.debug_tuple("Reminder").field(reminder).finish(),
            TimerState::Value(_) => f.write_str("Value(..)"),
        }
    }
}

/// The timer's wire shape. Field declaration order pins the emission order.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct TimerFields<'a> {
    due_time: String,
    period: String,
    callback: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<String>,
}

pub(crate) fn encode<S: ObjectSerializer>(
    timer: &TimerDescriptor,
    serializer: &ActorSerializer<S>,
) -> Result<String, SerializationError> {
    let data = match timer.state() {
        Some(state) => serializer.serialize_to_string(Some(state.as_wire_value()))?,
        None => None,
    };

    let fields = TimerFields {
        due_time: duration::encode(timer.due_time()),
        period: duration::encode(timer.period()),
        callback: timer.callback(),
        data,
    };

    serde_json::to_string(&fields)
        .map_err(|error| SerializationError::Serialization(error.to_string()))
}
