//! # Chatsift
//!
//! A Rust library for picking the important messages out of exported chat
//! transcripts and summarizing them in a categorized plain-text report.
//!
//! ## Overview
//!
//! Chatsift reads transcripts where every message starts on a line like
//! `01/02/23, 09:00 - Sender: Body` and runs them through three stages:
//!
//! - **Parser** - turns text into [`Message`] records, joining multi-line bodies
//! - **Classifier** - scores each message by keywords, structural patterns
//!   (dates, times, links, places) and trusted senders
//! - **Reporter** - groups the important messages by category and renders a
//!   fixed-format report
//!
//! Scoring is purely lexical and fully driven by a [`FilterConfiguration`].
//!
//! ## Quick Start
//!
//! ```rust
//! use chatsift::prelude::*;
//!
//! fn main() -> Result<()> {
//!     let text = "01/02/23, 09:00 - Prof: urgent meeting in Hall A http://x.io";
//!     let result = process(text, &FilterConfiguration::default())?;
//!
//!     println!("{}", result.report);
//!     assert_eq!(result.important_count, 1);
//!     Ok(())
//! }
//! ```
//!
//! ## Module Structure
//!
//! - [`pipeline`] - [`process`](pipeline::process), [`process_file`](pipeline::process_file), [`annotate`](pipeline::annotate)
//! - [`parser`] - [`parse`](parser::parse)
//! - [`classifier`] - [`Classifier`](classifier::Classifier), [`Classification`](classifier::Classification)
//! - [`report`] - [`render_report`](report::render_report), [`ProcessReport`](report::ProcessReport)
//! - [`config`] - [`FilterConfiguration`], [`ScoreWeights`](config::ScoreWeights), [`StructuralPatterns`](config::StructuralPatterns)
//! - [`patterns`] - [`PatternKind`](patterns::PatternKind)
//! - [`cli`] - CLI arguments (feature `cli`)
//! - [`error`] - [`SiftError`], [`Result`]
//! - [`prelude`] - Convenient re-exports

#[cfg(feature = "cli")]
pub mod cli;
pub mod classifier;
pub mod config;
pub mod error;
pub mod message;
pub mod parser;
pub mod patterns;
pub mod pipeline;
pub mod report;

// Re-export the main types at the crate root for convenience
pub use config::FilterConfiguration;
pub use error::{Result, SiftError};
pub use message::Message;

/// Convenient re-exports for common usage.
///
/// ```rust
/// use chatsift::prelude::*;
/// ```
pub mod prelude {
    pub use crate::Message;

    pub use crate::error::{Result, SiftError};

    pub use crate::config::{FilterConfiguration, ScoreWeights, StructuralPatterns};
    pub use crate::patterns::PatternKind;

    pub use crate::classifier::{Classification, Classifier};
    pub use crate::parser::parse;
    pub use crate::pipeline::{annotate, process, process_file};
    pub use crate::report::{ProcessReport, render_report};
}
