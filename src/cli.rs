//! Command-line interface definition using clap.
//!
//! This module defines:
//! - [`Args`] - CLI argument structure (for use with clap)
//! - [`ReportFormat`] - How the report is written out
//!
//! [`Args::filter_configuration`] turns the flags into the
//! [`FilterConfiguration`] the pipeline runs with: a `--config` file (or the
//! starter defaults) with any command-line overrides applied on top.

use std::fmt;
use std::path::{Path, PathBuf};

use clap::{Parser, ValueEnum};
use serde::{Deserialize, Serialize};

use crate::config::{FilterConfiguration, parse_list};
use crate::error::{Result, SiftError};
use crate::patterns::PatternKind;
use crate::report::ProcessReport;

/// Default report file name.
pub const DEFAULT_OUTPUT: &str = "important_messages.txt";

/// Pick the important messages out of a chat export and write a
/// categorized report.
#[derive(Parser, Debug, Clone)]
#[command(name = "chatsift")]
#[command(version, about, long_about = None)]
#[command(after_help = "EXAMPLES:
    chatsift chat.txt
    chatsift chat.txt --stdout
    chatsift chat.txt -c filter.toml -o summary.txt
    chatsift chat.txt -k scholar=exam,partial,lab --trusted Prof,Ms
    chatsift chat.txt --disable-pattern time --threshold 6 -f json
    chatsift --print-config > filter.json")]
pub struct Args {
    /// Path to the exported chat (TXT)
    #[arg(required_unless_present = "print_config")]
    pub input: Option<PathBuf>,

    /// Filter configuration file (JSON, or TOML with a .toml extension)
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Path to the report file
    #[arg(short, long, default_value = DEFAULT_OUTPUT)]
    pub output: PathBuf,

    /// Print the report to stdout instead of writing a file
    #[arg(long)]
    pub stdout: bool,

    /// Report format
    #[arg(short, long, value_enum, default_value = "text")]
    pub format: ReportFormat,

    /// Add or replace a keyword category (CATEGORY=word,word)
    #[arg(short, long = "keywords", value_name = "CATEGORY=WORDS", value_parser = parse_category)]
    pub keywords: Vec<(String, Vec<String>)>,

    /// Replace the trusted sender list (comma-separated)
    #[arg(long, value_name = "SENDERS")]
    pub trusted: Option<String>,

    /// Turn off a structural pattern (date, time, link, place)
    #[arg(long = "disable-pattern", value_name = "PATTERN")]
    pub disable_pattern: Vec<PatternKind>,

    /// Score added per matching keyword
    #[arg(long, value_name = "SCORE")]
    pub keyword_score: Option<f64>,

    /// Score added per matching structural pattern
    #[arg(long, value_name = "SCORE")]
    pub pattern_score: Option<f64>,

    /// Score added for a trusted sender
    #[arg(long, value_name = "SCORE")]
    pub sender_score: Option<f64>,

    /// Minimum score for a message to be important
    #[arg(long, value_name = "SCORE")]
    pub threshold: Option<f64>,

    /// Print the effective configuration as JSON and exit
    #[arg(long)]
    pub print_config: bool,

    /// Log level when RUST_LOG is not set (error, warn, info, debug, trace)
    #[arg(long, default_value = "warn", value_name = "LEVEL")]
    pub log_level: String,
}

impl Args {
    /// Builds the configuration: `--config` file or starter defaults, then
    /// command-line overrides. The result is validated.
    pub fn filter_configuration(&self) -> Result<FilterConfiguration> {
        let mut config = match &self.config {
            Some(path) => FilterConfiguration::from_path(path)?,
            None => FilterConfiguration::default(),
        };

        for (category, keywords) in &self.keywords {
            config
                .keyword_categories
                .insert(category.clone(), keywords.clone());
        }

        if let Some(trusted) = &self.trusted {
            config.set_trusted_senders(trusted);
        }

        for kind in &self.disable_pattern {
            config.structural_patterns.set(*kind, false);
        }

        let weights = &mut config.score_weights;
        if let Some(score) = self.keyword_score {
            weights.keyword_score = score;
        }
        if let Some(score) = self.pattern_score {
            weights.pattern_score = score;
        }
        if let Some(score) = self.sender_score {
            weights.sender_score = score;
        }
        if let Some(threshold) = self.threshold {
            weights.threshold = threshold;
        }

        config.validate()?;
        Ok(config)
    }
}

/// Parses `CATEGORY=word,word` into a cleaned category name and keywords.
fn parse_category(input: &str) -> std::result::Result<(String, Vec<String>), String> {
    let (name, words) = input
        .split_once('=')
        .ok_or_else(|| format!("expected CATEGORY=WORDS, got '{input}'"))?;
    let name = name.trim().to_lowercase();
    if name.is_empty() {
        return Err(format!("category name is empty in '{input}'"));
    }
    Ok((name, parse_list(words)))
}

/// How the report is written out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    /// The report text, verbatim
    #[default]
    Text,

    /// `{report, messageCount, importantCount}` as JSON
    Json,
}

impl ReportFormat {
    /// Returns the file extension for this format (without dot).
    pub fn extension(&self) -> &'static str {
        match self {
            ReportFormat::Text => "txt",
            ReportFormat::Json => "json",
        }
    }

    /// Renders a processed report in this format.
    pub fn render(&self, result: &ProcessReport) -> Result<String> {
        match self {
            ReportFormat::Text => Ok(result.report.clone()),
            ReportFormat::Json => Ok(serde_json::to_string_pretty(result)?),
        }
    }
}

impl fmt::Display for ReportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReportFormat::Text => write!(f, "Text"),
            ReportFormat::Json => write!(f, "JSON"),
        }
    }
}

/// Adjusts the report file extension to the format when the default output
/// name is in use.
pub fn adjust_output_extension(output: &Path, format: ReportFormat) -> PathBuf {
    if output != Path::new(DEFAULT_OUTPUT) {
        return output.to_path_buf();
    }
    output.with_extension(format.extension())
}

/// Returns an error when `--stdout` and `--output` are both given explicitly.
pub fn check_output_flags(args: &Args) -> Result<()> {
    if args.stdout && args.output != Path::new(DEFAULT_OUTPUT) {
        return Err(SiftError::configuration(
            "--stdout and --output cannot be used together",
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ScoreWeights;

    fn args(argv: &[&str]) -> Args {
        let mut full = vec!["chatsift"];
        full.extend_from_slice(argv);
        Args::try_parse_from(full).unwrap()
    }

    #[test]
    fn test_defaults() {
        let a = args(&["chat.txt"]);
        assert_eq!(a.input.as_deref(), Some(Path::new("chat.txt")));
        assert_eq!(a.output, PathBuf::from(DEFAULT_OUTPUT));
        assert_eq!(a.format, ReportFormat::Text);
        assert!(!a.stdout);
        assert_eq!(a.filter_configuration().unwrap(), FilterConfiguration::default());
    }

    #[test]
    fn test_input_required_unless_print_config() {
        assert!(Args::try_parse_from(["chatsift"]).is_err());
        assert!(Args::try_parse_from(["chatsift", "--print-config"]).is_ok());
    }

    #[test]
    fn test_overrides_applied() {
        let a = args(&[
            "chat.txt",
            "-k",
            "Scholar=exam, partial,,lab",
            "--keywords",
            "important=urgent",
            "--trusted",
            "Prof, Ms",
            "--disable-pattern",
            "time",
            "--disable-pattern",
            "date",
            "--keyword-score",
            "4",
            "--threshold",
            "6.5",
        ]);
        let config = a.filter_configuration().unwrap();

        let names: Vec<_> = config.keyword_categories.keys().cloned().collect();
        assert_eq!(names, vec!["important", "scholar"]);
        assert_eq!(config.keyword_categories["important"], vec!["urgent"]);
        assert_eq!(config.keyword_categories["scholar"], vec!["exam", "partial", "lab"]);
        assert_eq!(config.trusted_senders, vec!["Prof", "Ms"]);
        assert!(!config.structural_patterns.time);
        assert!(!config.structural_patterns.date);
        assert!(config.structural_patterns.link);
        assert_eq!(config.score_weights, ScoreWeights::new(4.0, 2.0, 2.0, 6.5));
    }

    #[test]
    fn test_invalid_override_rejected() {
        let a = args(&["chat.txt", "--threshold", "0"]);
        assert!(a.filter_configuration().unwrap_err().is_configuration());
    }

    #[test]
    fn test_bad_keyword_flag() {
        assert!(Args::try_parse_from(["chatsift", "chat.txt", "-k", "nowords"]).is_err());
        assert!(Args::try_parse_from(["chatsift", "chat.txt", "-k", " =a,b"]).is_err());
    }

    #[test]
    fn test_bad_pattern_flag() {
        assert!(
            Args::try_parse_from(["chatsift", "chat.txt", "--disable-pattern", "attached_file"])
                .is_err()
        );
    }

    #[test]
    fn test_adjust_output_extension() {
        assert_eq!(
            adjust_output_extension(Path::new(DEFAULT_OUTPUT), ReportFormat::Json),
            PathBuf::from("important_messages.json")
        );
        assert_eq!(
            adjust_output_extension(Path::new("out.log"), ReportFormat::Json),
            PathBuf::from("out.log")
        );
    }

    #[test]
    fn test_check_output_flags() {
        assert!(check_output_flags(&args(&["chat.txt", "--stdout"])).is_ok());
        assert!(check_output_flags(&args(&["chat.txt", "--stdout", "-o", "x.txt"])).is_err());
    }

    #[test]
    fn test_format_flag_values() {
        assert_eq!(args(&["chat.txt", "-f", "json"]).format, ReportFormat::Json);
        assert_eq!(args(&["chat.txt", "--format", "text"]).format, ReportFormat::Text);
        assert!(Args::try_parse_from(["chatsift", "chat.txt", "-f", "csv"]).is_err());
    }

    #[test]
    fn test_report_format_render() {
        let result = ProcessReport {
            report: "There are no recent important messages.".into(),
            message_count: 2,
            important_count: 0,
        };
        assert_eq!(ReportFormat::Text.render(&result).unwrap(), result.report);
        let json = ReportFormat::Json.render(&result).unwrap();
        assert!(json.contains("\"messageCount\": 2"));
    }
}
