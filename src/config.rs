//! Filter configuration: keyword categories, structural patterns, trusted
//! senders and score weights.
//!
//! [`FilterConfiguration`] is the second input of the pipeline next to the
//! transcript text. It's a plain serde struct, so it can be loaded from JSON
//! (always available) or TOML (feature `toml-config`), or built in code.
//!
//! # Document format
//!
//! ```json
//! {
//!   "keywordCategories": { "important": ["urgent", "mandatory"] },
//!   "structuralPatterns": { "date": true, "time": true, "link": true, "place": true },
//!   "trustedSenders": ["Prof", "Ms"],
//!   "scoreWeights": { "keywordScore": 3, "patternScore": 2, "senderScore": 2, "threshold": 5 }
//! }
//! ```
//!
//! The older field names `keywords`, `patterns`, `importantSenders` and
//! `scores` are accepted as aliases.
//!
//! # Example
//!
//! ```rust
//! use chatsift::config::{FilterConfiguration, ScoreWeights};
//! use chatsift::patterns::PatternKind;
//!
//! let config = FilterConfiguration::empty()
//!     .with_category("exam", ["partial", "exam"])
//!     .with_pattern(PatternKind::Place, true)
//!     .with_trusted_senders(["Prof"])
//!     .with_weights(ScoreWeights::new(3.0, 2.0, 2.0, 5.0));
//!
//! assert!(config.validate().is_ok());
//! ```

use std::fs;
use std::path::Path;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::{Result, SiftError};
use crate::patterns::PatternKind;

/// Everything the classifier needs to score a message.
///
/// All four fields are required when deserializing; a document missing one
/// of them is a configuration error rather than something to patch up.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterConfiguration {
    /// Category name → keywords. Iteration order is document order and
    /// decides the order categories are reported in.
    #[serde(alias = "keywords")]
    pub keyword_categories: IndexMap<String, Vec<String>>,

    /// Which of the fixed structural patterns contribute to the score.
    #[serde(alias = "patterns")]
    pub structural_patterns: StructuralPatterns,

    /// Substrings matched case-insensitively against sender names.
    #[serde(alias = "importantSenders")]
    pub trusted_senders: Vec<String>,

    /// Score contributions and the importance threshold.
    #[serde(alias = "scores")]
    pub score_weights: ScoreWeights,
}

/// On/off switch for each [`PatternKind`].
///
/// A pattern left out of a configuration document is disabled. Unknown
/// pattern names are rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StructuralPatterns {
    #[serde(default)]
    pub date: bool,
    #[serde(default)]
    pub time: bool,
    #[serde(default)]
    pub link: bool,
    #[serde(default)]
    pub place: bool,
}

impl StructuralPatterns {
    /// All patterns enabled.
    pub fn all_enabled() -> Self {
        Self {
            date: true,
            time: true,
            link: true,
            place: true,
        }
    }

    /// All patterns disabled.
    pub fn none_enabled() -> Self {
        Self {
            date: false,
            time: false,
            link: false,
            place: false,
        }
    }

    /// Returns whether `kind` is switched on.
    pub fn is_enabled(&self, kind: PatternKind) -> bool {
        match kind {
            PatternKind::Date => self.date,
            PatternKind::Time => self.time,
            PatternKind::Link => self.link,
            PatternKind::Place => self.place,
        }
    }

    /// Switches `kind` on or off.
    pub fn set(&mut self, kind: PatternKind, enabled: bool) {
        match kind {
            PatternKind::Date => self.date = enabled,
            PatternKind::Time => self.time = enabled,
            PatternKind::Link => self.link = enabled,
            PatternKind::Place => self.place = enabled,
        }
    }

    /// Iterates over the enabled patterns in scoring order.
    pub fn enabled(&self) -> impl Iterator<Item = PatternKind> + '_ {
        PatternKind::all()
            .iter()
            .copied()
            .filter(|kind| self.is_enabled(*kind))
    }
}

impl Default for StructuralPatterns {
    fn default() -> Self {
        Self::all_enabled()
    }
}

/// Score contributions and threshold.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreWeights {
    /// Added per matching keyword.
    pub keyword_score: f64,
    /// Added per enabled pattern found in the body.
    pub pattern_score: f64,
    /// Added once when the sender is trusted.
    pub sender_score: f64,
    /// Messages scoring at least this much are important.
    pub threshold: f64,
}

impl ScoreWeights {
    pub fn new(keyword_score: f64, pattern_score: f64, sender_score: f64, threshold: f64) -> Self {
        Self {
            keyword_score,
            pattern_score,
            sender_score,
            threshold,
        }
    }

    fn fields(&self) -> [(&'static str, f64); 4] {
        [
            ("keywordScore", self.keyword_score),
            ("patternScore", self.pattern_score),
            ("senderScore", self.sender_score),
            ("threshold", self.threshold),
        ]
    }
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self::new(3.0, 2.0, 2.0, 5.0)
    }
}

/// Starter keywords for the `important` category.
pub const DEFAULT_IMPORTANT_KEYWORDS: &[&str] =
    &["urgent", "important", "attention", "mandatory", "attendance"];

/// Starter trusted sender substrings.
pub const DEFAULT_TRUSTED_SENDERS: &[&str] = &["SYS", "CS", "IT", "Ms", "Mr", "Prof"];

impl Default for FilterConfiguration {
    /// The starter configuration: one `important` category, every pattern
    /// enabled, a handful of staff-like sender markers and weights 3/2/2/5.
    fn default() -> Self {
        Self::empty()
            .with_category("important", DEFAULT_IMPORTANT_KEYWORDS.iter().copied())
            .with_trusted_senders(DEFAULT_TRUSTED_SENDERS.iter().copied())
    }
}

impl FilterConfiguration {
    /// Creates the starter configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a configuration with no categories, no trusted senders, all
    /// patterns enabled and the default weights.
    pub fn empty() -> Self {
        Self {
            keyword_categories: IndexMap::new(),
            structural_patterns: StructuralPatterns::all_enabled(),
            trusted_senders: Vec::new(),
            score_weights: ScoreWeights::default(),
        }
    }

    // =========================================================================
    // Builder methods
    // =========================================================================

    /// Adds or replaces a keyword category.
    #[must_use]
    pub fn with_category<I, S>(mut self, name: impl Into<String>, keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.keyword_categories
            .insert(name.into(), keywords.into_iter().map(Into::into).collect());
        self
    }

    /// Switches a structural pattern on or off.
    #[must_use]
    pub fn with_pattern(mut self, kind: PatternKind, enabled: bool) -> Self {
        self.structural_patterns.set(kind, enabled);
        self
    }

    /// Replaces the trusted sender list.
    #[must_use]
    pub fn with_trusted_senders<I, S>(mut self, senders: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.trusted_senders = senders.into_iter().map(Into::into).collect();
        self
    }

    /// Replaces the score weights.
    #[must_use]
    pub fn with_weights(mut self, weights: ScoreWeights) -> Self {
        self.score_weights = weights;
        self
    }

    // =========================================================================
    // Editing
    // =========================================================================

    /// Adds an empty category. The name is trimmed and lower-cased.
    ///
    /// Returns `false` without changing anything if the cleaned name is blank
    /// or already exists.
    pub fn add_category(&mut self, name: &str) -> bool {
        let clean = clean_category_name(name);
        if clean.is_empty() || self.keyword_categories.contains_key(&clean) {
            return false;
        }
        self.keyword_categories.insert(clean, Vec::new());
        true
    }

    /// Removes a category, returning its keywords.
    pub fn remove_category(&mut self, name: &str) -> Option<Vec<String>> {
        self.keyword_categories.shift_remove(name)
    }

    /// Renames a category in place, keeping its position and keywords.
    ///
    /// The new name is trimmed and lower-cased. Returns `false` when `old`
    /// doesn't exist, the new name is blank or unchanged, or another category
    /// already uses it.
    pub fn rename_category(&mut self, old: &str, new: &str) -> bool {
        let clean = clean_category_name(new);
        if clean.is_empty() || clean == old || self.keyword_categories.contains_key(&clean) {
            return false;
        }
        let Some(index) = self.keyword_categories.get_index_of(old) else {
            return false;
        };
        let Some(keywords) = self.keyword_categories.shift_remove(old) else {
            return false;
        };
        self.keyword_categories.shift_insert(index, clean, keywords);
        true
    }

    /// Sets a category's keywords from a comma-separated list, creating the
    /// category if needed. Entries are trimmed and blanks dropped.
    pub fn set_keywords(&mut self, category: &str, list: &str) {
        self.keyword_categories
            .insert(category.to_string(), parse_list(list));
    }

    /// Sets the trusted senders from a comma-separated list.
    pub fn set_trusted_senders(&mut self, list: &str) {
        self.trusted_senders = parse_list(list);
    }

    // =========================================================================
    // Validation and loading
    // =========================================================================

    /// Checks that every weight is a positive, finite number.
    pub fn validate(&self) -> Result<()> {
        for (name, value) in self.score_weights.fields() {
            if !value.is_finite() || value <= 0.0 {
                return Err(SiftError::configuration(format!(
                    "{name} must be a positive number, got {value}"
                )));
            }
        }
        Ok(())
    }

    /// Parses and validates a JSON configuration document.
    pub fn from_json_str(input: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(input)?;
        config.validate()?;
        Ok(config)
    }

    /// Parses and validates a TOML configuration document.
    ///
    /// ```toml
    /// trustedSenders = ["Prof"]
    ///
    /// [keywordCategories]
    /// important = ["urgent"]
    ///
    /// [structuralPatterns]
    /// date = true
    /// time = true
    /// link = true
    /// place = false
    ///
    /// [scoreWeights]
    /// keywordScore = 3
    /// patternScore = 2
    /// senderScore = 2
    /// threshold = 5
    /// ```
    #[cfg(feature = "toml-config")]
    pub fn from_toml_str(input: &str) -> Result<Self> {
        let config: Self = toml::from_str(input)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads a configuration file. `.toml` files are read as TOML, anything
    /// else as JSON.
    pub fn from_path(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let is_toml = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("toml"));

        if is_toml {
            #[cfg(feature = "toml-config")]
            return Self::from_toml_str(&content);
            #[cfg(not(feature = "toml-config"))]
            return Err(SiftError::configuration(
                "TOML configuration requires the `toml-config` feature",
            ));
        }
        Self::from_json_str(&content)
    }

    /// Serializes the configuration as pretty-printed JSON.
    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

fn clean_category_name(name: &str) -> String {
    name.trim().to_lowercase()
}

/// Splits a comma-separated list, trimming entries and dropping blanks.
///
/// ```rust
/// use chatsift::config::parse_list;
///
/// assert_eq!(parse_list(" exam, , quiz ,"), vec!["exam", "quiz"]);
/// ```
pub fn parse_list(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(String::from)
        .collect()
}
