mod cmd;
mod output;
mod tools;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "expedientes",
    about = "Case lookup and activity timelines for a labor-law practice",
    version,
    propagate_version = true
)]
struct Cli {
    /// YAML config file (store collections, timeline thresholds)
    #[arg(long, global = true, env = "EXPEDIENTES_CONFIG")]
    config: Option<PathBuf>,

    /// Output as JSON
    #[arg(long, global = true, short = 'j')]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Search cases by client name
    Search {
        /// Full or partial client name (e.g. "Perez Juan")
        #[arg(required = true, num_args = 1..)]
        name: Vec<String>,
    },

    /// Show the activity timeline of a case
    Timeline {
        /// Case id as returned by `search`
        id: i64,

        /// Force a track: ordinario, despido or administrativo
        #[arg(long)]
        track: Option<String>,
    },

    /// Run as an MCP stdio server
    Mcp,
}

fn main() {
    let cli = Cli::parse();

    let default_level = match &cli.command {
        Commands::Mcp => tracing::Level::INFO,
        _ => tracing::Level::WARN,
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(default_level.into()),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let config_path = cli.config.as_deref();

    let result = match cli.command {
        Commands::Search { name } => cmd::search::run(config_path, &name.join(" "), cli.json),
        Commands::Timeline { id, track } => {
            cmd::timeline::run(config_path, id, track.as_deref(), cli.json)
        }
        Commands::Mcp => cmd::mcp::run(config_path),
    };

    if let Err(e) = result {
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}
