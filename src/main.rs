use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

use lcov_merger::cli;

/// lcov-merger: merge LCOV coverage reports into a single report.
#[derive(Parser)]
#[command(name = "lcov-merger", version, about)]
struct Cli {
    /// LCOV files to merge, in order. Missing files are skipped.
    #[arg(required = true)]
    files: Vec<PathBuf>,

    /// Write the merged report to this file instead of stdout.
    #[arg(short, long)]
    out_file: Option<PathBuf>,

    /// Rewrite source file paths to be relative to the current directory.
    #[arg(long)]
    prepend_source_files: bool,

    /// Relative path from each LCOV file's directory to the project root
    /// (default: "..").
    #[arg(long, allow_hyphen_values = true)]
    prepend_path_fix: Option<String>,

    /// JSON options file (camelCase or kebab-case keys). Flags take precedence.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Enable debug logging on stderr.
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level)),
        )
        .init();

    let config = cli::resolve_config(
        cli.config.as_deref(),
        cli.prepend_source_files,
        cli.prepend_path_fix.as_deref(),
    )?;

    let output = cli::cmd_merge(&cli.files, &config)?;
    cli::write_output(cli.out_file.as_deref(), &output)
}
