//! Wire-format serialization for a virtual-actor runtime.
//!
//! The runtime exchanges three kinds of values with an application: ordinary
//! actor state, scheduled timers and durable reminders. State is opaque to the
//! runtime and travels base64-encoded inside a JSON envelope; timers and
//! reminders have fixed compact JSON shapes of their own, with durations
//! rendered in the runtime's textual format.
//!
//! [`ActorSerializer`] is the entry point. It special-cases the two descriptor
//! kinds and delegates everything else to an injected [`ObjectSerializer`]
//! (JSON by default):
//!
//! ```
//! use std::time::Duration;
//!
//! use actor_wire::{ActorSerializer, TimerDescriptor, WireValue};
//!
//! let serializer = ActorSerializer::new();
//! let timer = TimerDescriptor::new(Duration::from_secs(5), Duration::from_secs(0), "tick");
//!
//! let json = serializer.serialize_to_string(Some(WireValue::from(&timer)))?;
//! assert_eq!(
//!     json.as_deref(),
//!     Some(r#"{"dueTime":"0h0m5s0ms","period":"0h0m0s0ms","callback":"tick"}"#)
//! );
//! # Ok::<(), actor_wire::SerializationError>(())
//! ```
//!
//! Opaque payloads are wrapped into and out of the runtime envelope with
//! [`ActorSerializer::wrap`] and [`ActorSerializer::unwrap`]. Transport to the
//! runtime is out of scope; callers hand the produced strings to whatever
//! client they use.

pub use crate::actor_serializer::ActorSerializer;
pub use crate::error::SerializationError;
pub use crate::object_serializer::{JsonObjectSerializer, ObjectSerializer};
pub use crate::reminder::ReminderDescriptor;
pub use crate::timer::{TimerDescriptor, TimerState};
pub use crate::wire_value::{Payload, WireValue};

mod actor_serializer;
pub mod duration;
mod envelope;
mod error;
mod object_serializer;
mod reminder;
mod timer;
mod wire_value;
