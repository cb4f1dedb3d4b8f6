//! Importance scoring for parsed messages.
//!
//! A message's score is the sum of three independent contributions:
//!
//! | Contribution | Added | When |
//! |--------------|-------|------|
//! | keyword | `keywordScore` per keyword | keyword occurs in the body as a whole word, any case |
//! | pattern | `patternScore` per pattern | enabled structural pattern occurs in the body |
//! | sender | `senderScore` once | sender contains a trusted substring, any case |
//!
//! Two matching keywords from the same category add twice; the category
//! itself is recorded once. A message is important when its score reaches
//! the threshold.
//!
//! # Example
//!
//! ```rust
//! use chatsift::classifier::Classifier;
//! use chatsift::config::FilterConfiguration;
//!
//! # fn main() -> chatsift::Result<()> {
//! let classifier = Classifier::new(&FilterConfiguration::default())?;
//! let result = classifier.classify("Prof", "urgent meeting in Hall A http://x.io");
//!
//! assert_eq!(result.score, 9.0);
//! assert!(result.important);
//! assert_eq!(result.categories, vec!["important"]);
//! # Ok(())
//! # }
//! ```

use regex::{Regex, RegexBuilder};
use serde::{Deserialize, Serialize};
use tracing::{trace, warn};

use crate::Message;
use crate::config::{FilterConfiguration, ScoreWeights};
use crate::error::{Result, SiftError};
use crate::patterns::PatternKind;

/// Outcome of scoring one message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Classification {
    pub important: bool,
    pub score: f64,
    /// Matched categories in configuration order, no duplicates.
    pub categories: Vec<String>,
}

struct KeywordCategory {
    name: String,
    matchers: Vec<Regex>,
}

/// A configuration compiled for scoring.
///
/// Build one per run and reuse it for every message; keyword matchers are
/// compiled once here instead of per message.
pub struct Classifier {
    categories: Vec<KeywordCategory>,
    patterns: Vec<PatternKind>,
    trusted_senders: Vec<String>,
    weights: ScoreWeights,
}

impl Classifier {
    /// Compiles `config` into a classifier.
    ///
    /// Keywords are trimmed before matching, so `" urgent "` matches the word
    /// `urgent`. Blank keywords and blank trusted senders are skipped. Keywords
    /// are plain text: regex metacharacters in them match literally.
    pub fn new(config: &FilterConfiguration) -> Result<Self> {
        let mut categories = Vec::with_capacity(config.keyword_categories.len());

        for (name, keywords) in &config.keyword_categories {
            let mut matchers = Vec::with_capacity(keywords.len());
            for keyword in keywords {
                let keyword = keyword.trim();
                if keyword.is_empty() {
                    warn!(category = %name, "ignoring blank keyword");
                    continue;
                }
                matchers.push(whole_word_matcher(keyword)?);
            }
            categories.push(KeywordCategory {
                name: name.clone(),
                matchers,
            });
        }

        let trusted_senders = config
            .trusted_senders
            .iter()
            .filter_map(|sender| {
                if sender.trim().is_empty() {
                    warn!("ignoring blank trusted sender");
                    None
                } else {
                    Some(sender.to_lowercase())
                }
            })
            .collect();

        Ok(Self {
            categories,
            patterns: config.structural_patterns.enabled().collect(),
            trusted_senders,
            weights: config.score_weights,
        })
    }

    /// Scores a message body from the given sender.
    pub fn classify(&self, sender: &str, body: &str) -> Classification {
        let mut score = 0.0;
        let mut categories = Vec::new();

        for category in &self.categories {
            let hits = category.matchers.iter().filter(|m| m.is_match(body)).count();
            if hits > 0 {
                score += self.weights.keyword_score * hits as f64;
                categories.push(category.name.clone());
            }
        }

        let pattern_hits = self.patterns.iter().filter(|p| p.is_match(body)).count();
        score += self.weights.pattern_score * pattern_hits as f64;

        if self.is_trusted(sender) {
            score += self.weights.sender_score;
        }

        let important = score >= self.weights.threshold;
        trace!(sender, score, important, "classified message");

        Classification {
            important,
            score,
            categories,
        }
    }

    /// Scores `message` and stores the result on it.
    pub fn annotate(&self, message: &mut Message) {
        let Classification {
            important,
            score,
            categories,
        } = self.classify(&message.sender, &message.body);
        message.important = important;
        message.score = score;
        message.categories = categories;
    }

    /// Scores every message in place.
    pub fn annotate_all(&self, messages: &mut [Message]) {
        for message in messages {
            self.annotate(message);
        }
    }

    /// Returns `true` if `sender` contains any trusted substring, ignoring case.
    pub fn is_trusted(&self, sender: &str) -> bool {
        let sender = sender.to_lowercase();
        self.trusted_senders
            .iter()
            .any(|trusted| sender.contains(trusted.as_str()))
    }

    /// Returns the weights this classifier scores with.
    pub fn weights(&self) -> &ScoreWeights {
        &self.weights
    }
}

/// Scores a single message against `config`.
///
/// Compiles the configuration on every call; use [`Classifier`] directly when
/// scoring many messages.
pub fn classify(message: &Message, config: &FilterConfiguration) -> Result<Classification> {
    Ok(Classifier::new(config)?.classify(&message.sender, &message.body))
}

fn whole_word_matcher(keyword: &str) -> Result<Regex> {
    RegexBuilder::new(&format!(r"\b{}\b", regex::escape(keyword)))
        .case_insensitive(true)
        .build()
        .map_err(|e| SiftError::invalid_keyword(keyword, e))
}
