// Copyright 2026 review-sift Contributors
// SPDX-License-Identifier: Apache-2.0

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;

use review_sift::cli;
use review_sift::config::{Config, Overrides};
use review_sift::source::Source;

#[derive(Parser)]
#[command(
    name = "review-sift",
    about = "review-sift — find a movie's user reviews and sort them into positive and negative",
    version,
    after_help = "Run 'review-sift <command> --help' for details on each command.\nRun 'review-sift' with no command to enter interactive mode."
)]
struct Cli {
    /// Output results as JSON (machine-readable)
    #[arg(long, global = true)]
    json: bool,

    /// Suppress non-essential output
    #[arg(long, short, global = true)]
    quiet: bool,

    /// Enable verbose/debug logging
    #[arg(long, short, global = true)]
    verbose: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    no_color: bool,

    /// Request timeout in milliseconds
    #[arg(long, global = true)]
    timeout: Option<u64>,

    /// Path to a Chromium binary for the browser source
    #[arg(long, global = true)]
    chromium: Option<String>,

    /// Review source used by interactive mode
    #[arg(long, value_enum, default_value_t = Source::Imdb)]
    source: Source,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Find a movie and show its positive and negative reviews
    Search {
        /// Movie title (e.g. "The Dark Knight")
        #[arg(required = true, num_args = 1..)]
        title: Vec<String>,
        /// Where to get reviews from
        #[arg(long, short, value_enum, default_value_t = Source::Imdb)]
        source: Source,
        /// Maximum reviews shown per list
        #[arg(long, default_value = "5")]
        limit: usize,
    },
    /// List available review sources
    Sources,
    /// Check network configuration and Chromium availability
    Doctor,
    /// Generate shell completion scripts
    Completions {
        /// Shell type (bash, zsh, fish, powershell)
        shell: Shell,
    },
}

fn init_tracing(verbose: bool) {
    let default = if verbose {
        "review_sift=debug"
    } else {
        "review_sift=warn"
    };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set global flags via environment variables so all modules can check them
    if cli.json {
        std::env::set_var("REVIEW_SIFT_JSON", "1");
    }
    if cli.quiet {
        std::env::set_var("REVIEW_SIFT_QUIET", "1");
    }
    if cli.verbose {
        std::env::set_var("REVIEW_SIFT_VERBOSE", "1");
    }
    if cli.no_color {
        std::env::set_var("REVIEW_SIFT_NO_COLOR", "1");
    }

    init_tracing(cli.verbose);

    let mut overrides = Overrides {
        timeout_ms: cli.timeout,
        limit: None,
        chromium_path: cli.chromium.clone(),
    };

    let result = match cli.command {
        // No subcommand → interactive prompt
        None => match Config::resolve(&overrides).context("invalid configuration") {
            Ok(config) => cli::repl::run(config, cli.source).await,
            Err(e) => Err(e),
        },

        Some(Commands::Search {
            title,
            source,
            limit,
        }) => {
            overrides.limit = Some(limit);
            match Config::resolve(&overrides).context("invalid configuration") {
                Ok(config) => cli::search_cmd::run(&title.join(" "), source, &config).await,
                Err(e) => Err(e),
            }
        }
        Some(Commands::Sources) => cli::sources_cmd::run(),
        Some(Commands::Doctor) => match Config::resolve(&overrides).context("invalid configuration") {
            Ok(config) => cli::doctor::run(&config).await,
            Err(e) => Err(e),
        },
        Some(Commands::Completions { shell }) => {
            let mut cmd = Cli::command();
            clap_complete::generate(shell, &mut cmd, "review-sift", &mut std::io::stdout());
            Ok(())
        }
    };

    // Consistent exit codes: 0=success, 1=error
    if let Err(e) = &result {
        if !cli::output::is_quiet() && !cli::output::is_json() {
            eprintln!("  Error: {e:#}");
        }
        if cli::output::is_json() {
            cli::output::print_json(&serde_json::json!({
                "error": true,
                "message": format!("{e:#}"),
            }));
        }
        std::process::exit(1);
    }

    result
}
