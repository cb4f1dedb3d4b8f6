//! Transcript parser for exported chats.
//!
//! Each message starts on a line shaped like
//!
//! ```text
//! DD/MM/YY, HH:MM - Sender: Body
//! ```
//!
//! Lines that don't have that shape continue the previous message's body.
//! Blank lines, and anything before the first recognized message, are
//! dropped. Parsing never fails.
//!
//! # Example
//!
//! ```rust
//! use chatsift::parser::parse;
//!
//! let messages = parse("01/02/23, 09:00 - Prof: Exam moved\nto Hall B\n\n02/02/23, 10:15 - Ana: ok");
//! assert_eq!(messages.len(), 2);
//! assert_eq!(messages[0].body, "Exam moved\nto Hall B");
//! assert_eq!(messages[1].sender, "Ana");
//! ```

use std::sync::LazyLock;

use chrono::{Duration, NaiveDate, NaiveDateTime};
use regex::{Captures, Regex};
use tracing::{debug, trace};

use crate::Message;

/// `DD/MM/YY, HH:MM - Sender: Body`. The match may start anywhere in the line.
/// Digits are ASCII only and the body stops at a carriage return.
const MESSAGE_LINE_PATTERN: &str =
    r"([0-9]{2})/([0-9]{2})/([0-9]{2}),\s([0-9]{2}):([0-9]{2})\s-\s([^:]+):\s([^\r\n]+)";

static MESSAGE_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(MESSAGE_LINE_PATTERN).expect("message line pattern compiles"));

/// Parses a transcript into messages in file order.
///
/// The returned messages are unclassified: `important` is `false`, `score`
/// is `0` and `categories` is empty.
pub fn parse(content: &str) -> Vec<Message> {
    let mut messages: Vec<Message> = Vec::new();
    let mut dropped = 0usize;

    for line in content.split('\n') {
        if let Some(message) = MESSAGE_LINE
            .captures(line)
            .and_then(|caps| message_from_captures(&caps))
        {
            messages.push(message);
            continue;
        }

        let trimmed = line.trim();
        match messages.last_mut() {
            Some(last) if !trimmed.is_empty() => {
                trace!(sender = %last.sender, "continuation line");
                last.push_line(trimmed);
            }
            _ => dropped += 1,
        }
    }

    debug!(messages = messages.len(), dropped, "parsed transcript");
    messages
}

/// Returns `None` when a field doesn't parse or the body is blank, so the
/// line is handled like any other unstructured line.
fn message_from_captures(caps: &Captures<'_>) -> Option<Message> {
    let field = |i: usize| caps.get(i).map_or("", |m| m.as_str());
    let number = |i: usize| field(i).parse::<u32>().ok();

    let body = field(7).trim();
    if body.is_empty() {
        return None;
    }

    let timestamp = build_timestamp(
        2000 + number(3)? as i32,
        number(2)?,
        number(1)?,
        number(4)?,
        number(5)?,
    );

    Some(Message::new(timestamp, field(6).trim(), body))
}

/// Builds a wall-clock timestamp from raw export fields.
///
/// Fields aren't range-checked. Values outside their calendar range carry
/// into the next larger unit, so month 13 is January of the following year,
/// day 0 is the last day of the previous month and hour 24 is midnight of
/// the next day.
pub fn build_timestamp(year: i32, month: u32, day: u32, hour: u32, minute: u32) -> NaiveDateTime {
    let months_since_epoch = i64::from(year) * 12 + i64::from(month) - 1;
    let year = months_since_epoch.div_euclid(12) as i32;
    let month = months_since_epoch.rem_euclid(12) as u32 + 1;

    // Year and month are in range here; day one of any month exists.
    let first_of_month = NaiveDate::from_ymd_opt(year, month, 1)
        .unwrap_or(NaiveDate::MIN)
        .and_time(chrono::NaiveTime::MIN);

    first_of_month
        + Duration::days(i64::from(day) - 1)
        + Duration::hours(i64::from(hour))
        + Duration::minutes(i64::from(minute))
}
