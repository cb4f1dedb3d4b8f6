//! Message records produced by the parser and annotated by the classifier.
//!
//! A [`Message`] starts life in [`crate::parser`] with only `timestamp`,
//! `sender` and `body` filled in. The classifier then sets `important`,
//! `score` and `categories` on the same record.
//!
//! # Example
//!
//! ```
//! use chatsift::Message;
//! use chrono::NaiveDate;
//!
//! let ts = NaiveDate::from_ymd_opt(2023, 2, 1)
//!     .unwrap()
//!     .and_hms_opt(9, 0, 0)
//!     .unwrap();
//! let msg = Message::new(ts, "Prof", "urgent meeting");
//!
//! assert_eq!(msg.sender(), "Prof");
//! assert!(!msg.is_important());
//! assert!(msg.categories().is_empty());
//! ```

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// A single chat message, with its classification once scored.
///
/// | Field | Type | Set by |
/// |-------|------|--------|
/// | `timestamp` | `NaiveDateTime` | parser |
/// | `sender` | `String` | parser |
/// | `body` | `String` | parser (continuation lines appended) |
/// | `important` | `bool` | classifier |
/// | `score` | `f64` | classifier |
/// | `categories` | `Vec<String>` | classifier, first-matched order |
///
/// Timestamps carry no time zone: exports record wall-clock time only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    /// Wall-clock time the message was sent.
    pub timestamp: NaiveDateTime,

    /// Display name of the author, trimmed, case preserved.
    pub sender: String,

    /// Message text. Multi-line messages use embedded `\n`.
    pub body: String,

    /// Whether the score reached the configured threshold.
    #[serde(default)]
    pub important: bool,

    /// Sum of all keyword, pattern and sender contributions.
    #[serde(default)]
    pub score: f64,

    /// Keyword categories that matched, without duplicates.
    #[serde(default)]
    pub categories: Vec<String>,
}

impl Message {
    /// Creates an unclassified message.
    pub fn new(
        timestamp: NaiveDateTime,
        sender: impl Into<String>,
        body: impl Into<String>,
    ) -> Self {
        Self {
            timestamp,
            sender: sender.into(),
            body: body.into(),
            important: false,
            score: 0.0,
            categories: Vec::new(),
        }
    }

    /// Appends a continuation line to the body.
    pub(crate) fn push_line(&mut self, line: &str) {
        self.body.push('\n');
        self.body.push_str(line);
    }

    /// Returns the timestamp.
    pub fn timestamp(&self) -> NaiveDateTime {
        self.timestamp
    }

    /// Returns the sender name.
    pub fn sender(&self) -> &str {
        &self.sender
    }

    /// Returns the message body.
    pub fn body(&self) -> &str {
        &self.body
    }

    /// Returns `true` if the classifier flagged this message.
    pub fn is_important(&self) -> bool {
        self.important
    }

    /// Returns the importance score.
    pub fn score(&self) -> f64 {
        self.score
    }

    /// Returns the matched keyword categories in first-matched order.
    pub fn categories(&self) -> &[String] {
        &self.categories
    }
}
