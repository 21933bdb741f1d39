mod cmd;
mod output;
mod root;

use clap::{Parser, Subcommand};
use cmd::{config::ConfigSubcommand, ConfigOverrides};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "svgflat",
    about = "Normalize SVG icons with picosvg, strip a fill attribute, and flatten them into one folder",
    version,
    propagate_version = true
)]
struct Cli {
    /// Icon root directory (default: current directory)
    #[arg(long, global = true, env = "SVGFLAT_ROOT")]
    root: Option<PathBuf>,

    /// Output as JSON
    #[arg(long, global = true, short = 'j')]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Normalize, clean, and flatten every SVG under the root, then prune empty folders
    Run {
        /// Show what would happen without running picosvg or touching files
        #[arg(long)]
        dry_run: bool,

        #[command(flatten)]
        overrides: ConfigOverrides,
    },

    /// List matched SVG files and their flattened destinations
    Scan {
        #[command(flatten)]
        overrides: ConfigOverrides,
    },

    /// Remove empty folders under the root
    Prune,

    /// Show, validate, or initialize .svgflat.yaml
    Config {
        #[command(subcommand)]
        subcommand: ConfigSubcommand,
    },

    /// Report which picosvg command would be used
    Doctor {
        #[command(flatten)]
        overrides: ConfigOverrides,
    },
}

fn main() {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let root = root::resolve_root(cli.root.as_deref());

    let result = match cli.command {
        Commands::Run { dry_run, overrides } => cmd::run::run(&root, overrides, dry_run, cli.json),
        Commands::Scan { overrides } => cmd::scan::run(&root, overrides, cli.json),
        Commands::Prune => cmd::prune::run(&root, cli.json),
        Commands::Config { subcommand } => cmd::config::run(&root, subcommand, cli.json),
        Commands::Doctor { overrides } => cmd::doctor::run(&root, overrides, cli.json),
    };

    if let Err(e) = result {
        // Print the full error chain (anyhow's alternate Display)
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}
