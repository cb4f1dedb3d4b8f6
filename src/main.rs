//! # chatsift CLI
//!
//! Command-line interface for the chatsift library.

use std::fs;
use std::process;
use std::time::Instant;

use clap::Parser as ClapParser;

use chatsift::SiftError;
use chatsift::cli::{Args, adjust_output_extension, check_output_flags};
use chatsift::pipeline::process_file;
use chatsift::report::NO_IMPORTANT_MESSAGES;

fn main() {
    let args = <Args as ClapParser>::parse();
    setup_logging(&args.log_level);

    if let Err(e) = run(&args) {
        tracing::error!(error = %e, "chatsift failed");
        eprintln!("❌ Error: {}", e);
        process::exit(1);
    }
}

fn run(args: &Args) -> Result<(), SiftError> {
    let total_start = Instant::now();
    check_output_flags(args)?;
    let config = args.filter_configuration()?;

    if args.print_config {
        println!("{}", config.to_json_pretty()?);
        return Ok(());
    }

    let Some(input) = args.input.as_deref() else {
        return Err(SiftError::configuration("no input file given"));
    };

    if args.stdout {
        let result = process_file(input, &config)?;
        print!("{}", args.format.render(&result)?);
        return Ok(());
    }

    let output_path = adjust_output_extension(&args.output, args.format);

    // Print header
    println!("🔎 chatsift v{}", env!("CARGO_PKG_VERSION"));
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!("📂 Input:      {}", input.display());
    println!("💾 Output:     {}", output_path.display());
    println!("📄 Format:     {}", args.format);
    if let Some(config_path) = &args.config {
        println!("⚙️  Config:     {}", config_path.display());
    }
    println!(
        "🏷️  Categories: {}",
        config
            .keyword_categories
            .keys()
            .cloned()
            .collect::<Vec<_>>()
            .join(", ")
    );
    println!("🎯 Threshold:  {}", config.score_weights.threshold);
    println!();

    println!("⏳ Scoring messages...");
    let process_start = Instant::now();
    let result = process_file(input, &config)?;
    println!(
        "   Found {} messages, {} important ({:.2}s)",
        result.message_count,
        result.important_count,
        process_start.elapsed().as_secs_f64()
    );

    println!("💾 Writing {}...", args.format);
    fs::write(&output_path, args.format.render(&result)?)?;

    println!();
    println!("✅ Done! Report saved to {}", output_path.display());
    if !result.has_important() {
        println!("   {}", NO_IMPORTANT_MESSAGES);
    }
    println!(
        "⚡ Total time: {:.2}s",
        total_start.elapsed().as_secs_f64()
    );

    Ok(())
}

/// Set up tracing on stderr. `RUST_LOG` wins over `--log-level`.
fn setup_logging(level: &str) {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
