//! Plain-text report of important messages, grouped by category.
//!
//! # Layout
//!
//! ```text
//! IMPORTANT MESSAGES:
//!
//! Found 2 important messages
//! ============================================================
//!
//! IMPORTANT (1 messages):
//!  ----------------------------------------
//! 2/1/2023, 9:00:00 AM - Prof (score: 9):
//! urgent meeting in Hall A
//!
//! ============================================================
//!
//! GENERAL (1 messages):
//!  ----------------------------------------
//! ...
//! ```
//!
//! Groups appear in the order their category is first met while walking the
//! important messages. A message with several categories is printed in full
//! under each of them; one with none goes under `GENERAL`. When nothing is
//! important the report is exactly [`NO_IMPORTANT_MESSAGES`].

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::Message;

/// The whole report when no message is important.
pub const NO_IMPORTANT_MESSAGES: &str = "There are no recent important messages.";

/// Group for important messages that matched no keyword category.
pub const GENERAL_CATEGORY: &str = "General";

/// Timestamp layout used in message headers, e.g. `2/1/2023, 9:00:00 AM`.
pub const TIMESTAMP_FORMAT: &str = "%-m/%-d/%Y, %-I:%M:%S %p";

const MAJOR_RULE_WIDTH: usize = 60;
const MINOR_RULE_WIDTH: usize = 40;

/// Report text plus the counts a caller shows next to it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessReport {
    /// The rendered report.
    pub report: String,
    /// Number of parsed messages.
    pub message_count: usize,
    /// Number of messages flagged important.
    pub important_count: usize,
}

impl ProcessReport {
    /// Renders the report for classified messages and counts them.
    pub fn from_messages(messages: &[Message]) -> Self {
        Self {
            report: render_report(messages),
            message_count: messages.len(),
            important_count: messages.iter().filter(|m| m.important).count(),
        }
    }

    /// Returns `true` if at least one message is important.
    pub fn has_important(&self) -> bool {
        self.important_count > 0
    }
}

/// Renders the categorized report for classified messages.
pub fn render_report(messages: &[Message]) -> String {
    let important: Vec<&Message> = messages.iter().filter(|m| m.important).collect();

    if important.is_empty() {
        return NO_IMPORTANT_MESSAGES.to_string();
    }

    let groups = group_by_category(&important);
    let major_rule = "=".repeat(MAJOR_RULE_WIDTH);
    let minor_rule = "-".repeat(MINOR_RULE_WIDTH);

    let mut report = String::from("IMPORTANT MESSAGES:\n\n");
    report.push_str(&format!("Found {} important messages\n", important.len()));
    report.push_str(&major_rule);
    report.push_str("\n\n");

    for (category, group) in &groups {
        report.push_str(&format!(
            "{} ({} messages):\n {}\n",
            category.to_uppercase(),
            group.len(),
            minor_rule
        ));
        for msg in group {
            report.push_str(&format!(
                "{} - {} (score: {}):\n{}\n\n",
                format_timestamp(msg),
                msg.sender,
                msg.score,
                msg.body
            ));
        }
        report.push_str(&major_rule);
        report.push_str("\n\n");
    }

    report
}

/// Groups messages by category, keeping first-seen category order and the
/// messages' own order within each group.
pub fn group_by_category<'a>(messages: &[&'a Message]) -> IndexMap<&'a str, Vec<&'a Message>> {
    let mut groups: IndexMap<&'a str, Vec<&'a Message>> = IndexMap::new();

    for &msg in messages {
        if msg.categories.is_empty() {
            groups.entry(GENERAL_CATEGORY).or_default().push(msg);
        } else {
            for category in &msg.categories {
                groups.entry(category.as_str()).or_default().push(msg);
            }
        }
    }

    groups
}

fn format_timestamp(msg: &Message) -> String {
    msg.timestamp.format(TIMESTAMP_FORMAT).to_string()
}
