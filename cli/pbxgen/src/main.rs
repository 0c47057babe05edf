//! pbxgen CLI — generate and maintain skeletal Xcode project descriptors.

mod commands;
mod scaffold;

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "pbxgen", version, about = "Xcode project descriptor tool")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a skeletal single-target iOS app project
    Init {
        /// Project (and product) name
        name: String,
        /// Bundle identifier (default: com.example.<name>)
        #[arg(long)]
        bundle_id: Option<String>,
        /// Minimum iOS version
        #[arg(long, default_value = "17.0")]
        deployment_target: String,
        /// Directory to create the project in (default: current directory)
        #[arg(long)]
        directory: Option<PathBuf>,
    },
    /// Check that a project descriptor parses
    Validate {
        /// Path to a project.pbxproj file
        path: PathBuf,
        /// Also require every object reference to resolve
        #[arg(long)]
        strict: bool,
    },
    /// Rewrite a project descriptor in canonical form
    Fmt {
        /// Path to a project.pbxproj file
        path: PathBuf,
        /// Fail instead of rewriting when the file is not canonical
        #[arg(long)]
        check: bool,
    },
    /// Summarize a project descriptor
    Inspect {
        /// Path to a project.pbxproj file
        path: PathBuf,
        /// Output format (human, json)
        #[arg(long, default_value = "human")]
        format: String,
    },
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("error: {e:#}");
        process::exit(1);
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Commands::Init {
            name,
            bundle_id,
            deployment_target,
            directory,
        } => {
            let directory = match directory {
                Some(dir) => dir,
                None => std::env::current_dir()?,
            };
            commands::init::run(&directory, &name, bundle_id.as_deref(), &deployment_target)
        }
        Commands::Validate { path, strict } => commands::validate::run(&path, strict),
        Commands::Fmt { path, check } => commands::fmt::run(&path, check),
        Commands::Inspect { path, format } => commands::inspect::run(&path, &format),
    }
}
