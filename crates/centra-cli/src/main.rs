#![forbid(unsafe_code)]

mod cmd;
mod output;

use centra_core::config::{self, resolve_config};
use clap::{CommandFactory, Parser, Subcommand};
use output::{OutputMode, fail, resolve_output_mode};
use std::env;
use std::path::PathBuf;
use tracing::debug;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "centra: centrality scores for directed actor graphs",
    long_about = None
)]
struct Cli {
    /// Enable verbose logging.
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Output format (default: pretty on a terminal, text when piped).
    #[arg(long, global = true, value_enum)]
    format: Option<OutputMode>,

    /// Shorthand for `--format json`.
    #[arg(long, global = true, hide = true)]
    json: bool,

    /// Config file (default: $CENTRA_CONFIG, then the user config dir).
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    fn output_mode(&self) -> OutputMode {
        resolve_output_mode(self.format, self.json)
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    #[command(
        next_help_heading = "Registry",
        about = "List admitted centralities",
        long_about = "Reload the centrality registry from the manifest and list what it admitted and rejected.",
        after_help = "EXAMPLES:\n    # Show the built-in set\n    centra list\n\n    # Load from a manifest file\n    centra list --manifest centralities.txt\n\n    # Emit machine-readable output\n    centra list --format json"
    )]
    List(cmd::list::ListArgs),

    #[command(
        next_help_heading = "Scoring",
        about = "Score a graph file",
        long_about = "Load a JSON graph file and score it with the selected centralities (all admitted ones by default).",
        after_help = "EXAMPLES:\n    # Run every admitted centrality\n    centra compute graph.json\n\n    # Top five brokers only\n    centra compute graph.json -c Betweenness --top 5\n\n    # Pin a version and emit JSON\n    centra compute graph.json -c PageRank@1 --format json"
    )]
    Compute(cmd::compute::ComputeArgs),

    #[command(
        next_help_heading = "Setup",
        about = "Generate shell completions",
        after_help = "EXAMPLES:\n    # Bash\n    centra completions bash > /etc/bash_completion.d/centra\n\n    # Zsh\n    centra completions zsh > ~/.zfunc/_centra"
    )]
    Completions(cmd::completions::CompletionsArgs),
}

fn init_tracing(verbose: bool) {
    let filter = EnvFilter::try_from_env("CENTRA_LOG").unwrap_or_else(|_| {
        EnvFilter::new(if env::var("DEBUG").is_ok() {
            "centra=debug,info"
        } else if verbose {
            "centra=info,warn"
        } else {
            "centra=warn,error"
        })
    });

    let format = env::var("CENTRA_LOG_FORMAT").unwrap_or_else(|_| "compact".to_string());

    let registry = tracing_subscriber::registry().with(filter);

    // Logs go to stderr; stdout carries command output.
    match format.as_str() {
        "json" => {
            registry
                .with(fmt::layer().json().with_ansi(false).with_writer(std::io::stderr))
                .init();
        }
        _ => {
            registry
                .with(fmt::layer().compact().with_writer(std::io::stderr))
                .init();
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let output = cli.output_mode();

    if let Commands::Completions(args) = &cli.command {
        let mut command = Cli::command();
        return cmd::completions::run_completions(args.shell, &mut command);
    }

    let config = resolve_config(cli.config.as_deref())
        .map_err(|e| fail(output, config::error_code(&e), format!("{e:#}")))?;
    debug!(?config, "config resolved");

    match &cli.command {
        Commands::List(args) => cmd::list::run_list(args, &config, output),
        Commands::Compute(args) => cmd::compute::run_compute(args, &config, output),
        Commands::Completions(_) => Ok(()),
    }
}
