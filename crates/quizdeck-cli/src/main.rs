//! The `quizdeck` binary.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "quizdeck", version, about = "Self-hosted quiz viewer and question-bank toolkit")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP server
    Serve {
        /// Directory of question files
        #[arg(long)]
        data_dir: Option<PathBuf>,

        /// User-accounts JSON file
        #[arg(long)]
        users_file: Option<PathBuf>,

        /// Listen address (host:port)
        #[arg(long)]
        bind: Option<String>,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Validate question files
    Validate {
        /// Path to a question file or directory
        path: PathBuf,
    },

    /// List question files in a data directory
    List {
        /// Data directory
        dir: PathBuf,

        /// Sort order: id, alphabetical, reverse_alphabetical, category
        #[arg(long, default_value = "id")]
        sort: String,
    },

    /// Show the normalized questions in a file
    Inspect {
        /// Question file
        file: PathBuf,

        /// Only show the question at this position (zero-based)
        #[arg(long)]
        index: Option<usize>,

        /// Dump the normalized questions as JSON
        #[arg(long)]
        raw: bool,
    },

    /// Create a starter config, data folder, and users file
    Init,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("quizdeck=info".parse().unwrap()),
        )
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Serve {
            data_dir,
            users_file,
            bind,
            config,
        } => commands::serve::execute(data_dir, users_file, bind, config).await,
        Commands::Validate { path } => commands::validate::execute(path),
        Commands::List { dir, sort } => commands::list::execute(dir, sort),
        Commands::Inspect { file, index, raw } => commands::inspect::execute(file, index, raw),
        Commands::Init => commands::init::execute(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
