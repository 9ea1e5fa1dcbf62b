//! Conversions between [`Duration`] and the actor runtime's textual duration
//! format.
//!
//! The runtime expresses time spans as `<hours>h<minutes>m<seconds>s<millis>ms`,
//! for example `4h15m50s60ms`. Days are folded into the hours span, so two days
//! and four hours come out as `52h0m0s0ms`. The format has no sign and no
//! resolution below one millisecond.

use std::time::Duration;

use crate::error::SerializationError;

const SECS_PER_HOUR: u64 = 3600;
const SECS_PER_MINUTE: u64 = 60;

/// Converts a duration to the runtime's textual format.
///
/// Zero encodes as `0h0m0s0ms`. Precision below one millisecond is below the
/// resolution of the format and truncates.
pub fn encode(duration: Duration) -> String {
    let total_secs = duration.as_secs();
    let hours = total_secs / SECS_PER_HOUR;
    let minutes = (total_secs % SECS_PER_HOUR) / SECS_PER_MINUTE;
    let seconds = total_secs % SECS_PER_MINUTE;
    let millis = duration.subsec_millis();

    format!("{}h{}m{}s{}ms", hours, minutes, seconds, millis)
}

/// Parses a duration from the runtime's textual format.
///
/// The milliseconds span may be empty (`1h2m3sms`), which the runtime emits
/// for some spans and which decodes as zero milliseconds. Everything else that
/// deviates from the grammar fails with
/// [`SerializationError::MalformedDuration`].
pub fn decode(text: &str) -> Result<Duration, SerializationError> {
    let malformed = || SerializationError::MalformedDuration(text.to_owned());

    let (hours, rest) = split_span(text, 'h').ok_or_else(malformed)?;
    let (minutes, rest) = split_span(rest, 'm').ok_or_else(malformed)?;
    let (seconds, rest) = split_span(rest, 's').ok_or_else(malformed)?;

    let millis_span = rest.strip_suffix("ms").ok_or_else(malformed)?;
    let millis = if millis_span.is_empty() {
        0
    } else {
        parse_span(millis_span).ok_or_else(malformed)?
    };

    let total_secs = hours
        .checked_mul(SECS_PER_HOUR)
        .and_then(|secs| minutes.checked_mul(SECS_PER_MINUTE).and_then(|m| secs.checked_add(m)))
        .and_then(|secs| secs.checked_add(seconds))
        .ok_or_else(malformed)?;

    Duration::from_secs(total_secs)
        .checked_add(Duration::from_millis(millis))
        .ok_or_else(malformed)
}

/// Splits `text` at the first occurrence of `marker`, parsing everything in
/// front of it as a decimal span.
fn split_span(text: &str, marker: char) -> Option<(u64, &str)> {
    let index = text.find(marker)?;
    let value = parse_span(&text[..index])?;
    Some((value, &text[index + 1..]))
}

fn parse_span(span: &str) -> Option<u64> {
    // u64::from_str would also accept a leading `+`, which the runtime never
    // emits.
    if !span.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    span.parse().ok()
}
