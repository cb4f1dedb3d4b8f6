//! Parse → classify → report in one call.
//!
//! These are the entry points callers normally use. They own the checks that
//! sit at the boundary of the core: empty transcripts are rejected and the
//! configuration is validated before anything is parsed.
//!
//! # Example
//!
//! ```rust
//! use chatsift::config::FilterConfiguration;
//! use chatsift::pipeline::process;
//!
//! # fn main() -> chatsift::Result<()> {
//! let text = "01/02/23, 09:00 - Prof: urgent meeting in Hall A http://x.io\n\
//!             01/02/23, 09:05 - Ana: ok";
//! let result = process(text, &FilterConfiguration::default())?;
//!
//! assert_eq!(result.message_count, 2);
//! assert_eq!(result.important_count, 1);
//! assert!(result.report.starts_with("IMPORTANT MESSAGES:"));
//! # Ok(())
//! # }
//! ```

use std::fs;
use std::path::Path;

use tracing::{debug, info_span};

use crate::Message;
use crate::classifier::Classifier;
use crate::config::FilterConfiguration;
use crate::error::{Result, SiftError};
use crate::parser::parse;
use crate::report::ProcessReport;

/// Parses and classifies a transcript without rendering a report.
pub fn annotate(text: &str, config: &FilterConfiguration) -> Result<Vec<Message>> {
    if text.trim().is_empty() {
        return Err(SiftError::EmptyInput);
    }
    config.validate()?;

    let classifier = Classifier::new(config)?;
    let mut messages = parse(text);
    classifier.annotate_all(&mut messages);

    debug!(
        messages = messages.len(),
        important = messages.iter().filter(|m| m.important).count(),
        threshold = classifier.weights().threshold,
        "classified transcript"
    );
    Ok(messages)
}

/// Runs the whole pipeline on transcript text.
pub fn process(text: &str, config: &FilterConfiguration) -> Result<ProcessReport> {
    let _span = info_span!("process", bytes = text.len()).entered();
    let messages = annotate(text, config)?;
    Ok(ProcessReport::from_messages(&messages))
}

/// Reads a transcript file and runs the whole pipeline on it.
pub fn process_file(path: &Path, config: &FilterConfiguration) -> Result<ProcessReport> {
    let bytes = fs::read(path)?;
    let text = String::from_utf8(bytes).map_err(|e| SiftError::utf8("reading chat export", e))?;
    debug!(path = %path.display(), "read chat export");
    process(&text, config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ScoreWeights;
    use crate::report::NO_IMPORTANT_MESSAGES;

    #[test]
    fn test_empty_input_rejected() {
        let config = FilterConfiguration::default();
        assert!(process("", &config).unwrap_err().is_empty_input());
        assert!(process(" \n\t\n", &config).unwrap_err().is_empty_input());
    }

    #[test]
    fn test_invalid_configuration_rejected() {
        let config =
            FilterConfiguration::default().with_weights(ScoreWeights::new(3.0, 2.0, 2.0, 0.0));
        let err = process("01/02/23, 09:00 - Ana: hi", &config).unwrap_err();
        assert!(err.is_configuration());
    }

    #[test]
    fn test_text_without_messages() {
        let result = process("just some notes\nno messages", &FilterConfiguration::default())
            .unwrap();
        assert_eq!(result.message_count, 0);
        assert_eq!(result.important_count, 0);
        assert_eq!(result.report, NO_IMPORTANT_MESSAGES);
    }

    #[test]
    fn test_annotate_returns_classified_messages() {
        let text = "01/02/23, 09:00 - Prof: mandatory attendance\n01/02/23, 09:05 - Ana: ok";
        let messages = annotate(text, &FilterConfiguration::default()).unwrap();
        assert_eq!(messages.len(), 2);
        assert!(messages[0].important);
        assert!(!messages[1].important);
    }

    #[test]
    fn test_process_file_rejects_invalid_utf8() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("chat.txt");
        fs::write(&path, [0xff, 0xfe, 0x00]).unwrap();
        let err = process_file(&path, &FilterConfiguration::default()).unwrap_err();
        assert!(err.to_string().contains("UTF-8"));
    }

    #[test]
    fn test_process_file_missing() {
        let err = process_file(Path::new("/nonexistent/chat.txt"), &FilterConfiguration::default())
            .unwrap_err();
        assert!(err.is_io());
    }
}
