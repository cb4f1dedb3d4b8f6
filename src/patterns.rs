//! Fixed structural patterns recognized in message bodies.
//!
//! The set is closed: configuration can switch each pattern on or off but
//! can't add new ones or change their definitions.
//!
//! | Pattern | Matches |
//! |---------|---------|
//! | `date` | `DD/MM/YY` token, e.g. `05/03/24` |
//! | `time` | `HH:MM` token, e.g. `14:30` |
//! | `link` | `http://` or `https://` URL |
//! | `place` | room word followed by an identifier, e.g. `Hall B2`, `lab 3` |

use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

/// One of the four built-in structural patterns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PatternKind {
    /// Two-digit/two-digit/two-digit numeric date
    Date,
    /// Two-digit colon two-digit time
    Time,
    /// `http://` or `https://` URL
    Link,
    /// classroom/hall/auditorium/lab/laboratory followed by an identifier
    Place,
}

impl PatternKind {
    /// All patterns in scoring order.
    pub const ALL: [PatternKind; 4] = [
        PatternKind::Date,
        PatternKind::Time,
        PatternKind::Link,
        PatternKind::Place,
    ];

    /// Returns the regex source for this pattern.
    pub fn pattern(self) -> &'static str {
        match self {
            PatternKind::Date => r"\b[0-9]{2}/[0-9]{2}/[0-9]{2}\b",
            PatternKind::Time => r"\b[0-9]{2}:[0-9]{2}\b",
            PatternKind::Link => r"https?://\S+",
            PatternKind::Place => r"(?i)(classroom|hall|auditorium|lab|laboratory)\s+[A-Z0-9]+",
        }
    }

    /// Returns the configuration name of this pattern.
    pub fn name(self) -> &'static str {
        match self {
            PatternKind::Date => "date",
            PatternKind::Time => "time",
            PatternKind::Link => "link",
            PatternKind::Place => "place",
        }
    }

    /// Returns all patterns in scoring order.
    pub fn all() -> &'static [PatternKind] {
        &Self::ALL
    }

    fn index(self) -> usize {
        match self {
            PatternKind::Date => 0,
            PatternKind::Time => 1,
            PatternKind::Link => 2,
            PatternKind::Place => 3,
        }
    }

    /// Returns `true` if the pattern occurs anywhere in `text`.
    pub fn is_match(self, text: &str) -> bool {
        PATTERN_TABLE[self.index()].is_match(text)
    }
}

/// Compiled patterns, indexed by [`PatternKind::index`].
static PATTERN_TABLE: LazyLock<[Regex; 4]> = LazyLock::new(|| {
    PatternKind::ALL.map(|kind| Regex::new(kind.pattern()).expect("built-in pattern compiles"))
});

impl fmt::Display for PatternKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for PatternKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "date" => Ok(PatternKind::Date),
            "time" => Ok(PatternKind::Time),
            "link" => Ok(PatternKind::Link),
            "place" => Ok(PatternKind::Place),
            _ => Err(format!(
                "Unknown pattern: '{}'. Expected one of: date, time, link, place",
                s
            )),
        }
    }
}
