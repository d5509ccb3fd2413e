mod cmd;
mod output;
mod root;

use clap::{Parser, Subcommand};
use cmd::config::ConfigSubcommand;
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "sdlc-guide",
    about = "SDLC prompt engineering guide: browse stage prompts, render the page, serve it",
    version,
    propagate_version = true
)]
struct Cli {
    /// Project root (default: auto-detect from .sdlc-guide/ or .git/)
    #[arg(long, global = true, env = "SDLC_GUIDE_ROOT")]
    root: Option<PathBuf>,

    /// Output as JSON
    #[arg(long, global = true, short = 'j')]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List lifecycle stages
    Stages,

    /// Show a stage, or one of its prompt templates
    Stage {
        /// Stage key (Requirements, Feasibility, Design, ...)
        key: String,

        /// Print only the prompt template at this index
        #[arg(long)]
        prompt: Option<usize>,
    },

    /// Render the guide page as HTML
    Render {
        /// Write to this file instead of stdout (relative to the root)
        #[arg(long, short = 'o')]
        out: Option<PathBuf>,
    },

    /// Initialize guide config in the current project
    Init {
        /// Also write an editable copy of the builtin stage table
        #[arg(long)]
        with_data: bool,
    },

    /// Inspect and validate the guide configuration
    Config {
        #[command(subcommand)]
        subcommand: ConfigSubcommand,
    },

    /// Serve the guide over HTTP
    Serve {
        /// Port to listen on (0 = OS-assigned)
        #[arg(long, default_value = "3141")]
        port: u16,

        /// Don't open browser automatically
        #[arg(long)]
        no_open: bool,
    },
}

fn main() {
    let cli = Cli::parse();

    let default_level = match &cli.command {
        Commands::Serve { .. } => tracing::Level::INFO,
        _ => tracing::Level::WARN,
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(default_level.into()),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let root = root::resolve_root(cli.root.as_deref());

    let result = match cli.command {
        Commands::Stages => cmd::stages::run(&root, cli.json),
        Commands::Stage { key, prompt } => cmd::stage::run(&root, &key, prompt, cli.json),
        Commands::Render { out } => cmd::render::run(&root, out.as_deref(), cli.json),
        Commands::Init { with_data } => cmd::init::run(&root, with_data),
        Commands::Config { subcommand } => cmd::config::run(&root, subcommand, cli.json),
        Commands::Serve { port, no_open } => cmd::serve::run(&root, port, no_open),
    };

    if let Err(e) = result {
        // Print the full error chain (anyhow's alternate Display)
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}
