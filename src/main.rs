//! Texproj CLI entry point

use anyhow::Context;
use clap::{Parser, Subcommand};
use std::fs::File;
use std::path::PathBuf;
use std::sync::Mutex;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;

const LOG_TARGET: &str = "texproj::main";

#[derive(Parser)]
#[command(name = "texproj")]
#[command(about = "Flatten LaTeX projects and find the files they never use", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Do not log to the console
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Also append log records to this file
    #[arg(long, global = true, value_name = "PATH")]
    log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Flat all .tex files in the project to a single .tex file
    Flat {
        /// The LaTeX project main .tex file
        root: PathBuf,

        /// The output .tex file [default: out.tex]
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// List all unused files in the project
    #[command(name = "find_unused")]
    FindUnused {
        /// The LaTeX project main .tex file
        root: PathBuf,

        /// Directories (relative to the project root) to ignore, comma separated
        #[arg(long, default_value = "")]
        exclude_dirs: String,

        /// File extensions to ignore, comma separated
        #[arg(long, default_value = "")]
        exclude_extensions: String,
    },
    #[command(external_subcommand)]
    Unrecognized(Vec<String>),
}

fn init_logging(cli: &Cli) -> anyhow::Result<()> {
    let log_level = if cli.verbose { "debug" } else { "info" };

    let console = (!cli.quiet)
        .then(|| tracing_subscriber::fmt::layer().with_writer(std::io::stderr));
    let file = match &cli.log_file {
        Some(path) => {
            let file = File::options()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("Cannot open log file {}", path.display()))?;
            Some(
                tracing_subscriber::fmt::layer()
                    .with_ansi(false)
                    .with_writer(Mutex::new(file)),
            )
        }
        None => None,
    };

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(format!("texproj={}", log_level)))
        .with(console)
        .with(file)
        .init();
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(&cli)?;

    tracing::debug!(target: LOG_TARGET, "Texproj v{}", env!("CARGO_PKG_VERSION"));

    match cli.command {
        Some(Commands::Flat { root, output }) => commands::flat(root, output),
        Some(Commands::FindUnused {
            root,
            exclude_dirs,
            exclude_extensions,
        }) => commands::find_unused(root, &exclude_dirs, &exclude_extensions),
        Some(Commands::Unrecognized(args)) => {
            let operation = args.first().map(String::as_str).unwrap_or_default();
            tracing::error!(target: LOG_TARGET, "Unrecognized operation: {}", operation);
            Ok(())
        }
        None => {
            tracing::error!(target: LOG_TARGET, "No operation given");
            Ok(())
        }
    }
}
