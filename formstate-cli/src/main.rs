//! formstate CLI
//!
//! Loads a JSON form definition and replays scripted events against it.
//!
//! # Usage
//!
//! ```bash
//! formstate check sign-in.json
//! formstate run sign-in.json events.txt
//! formstate run sign-in.json events.txt --format json
//! ```

mod paths;
mod runner;
mod script;

use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use formstate::prelude::*;
use simplelog::{Config, LevelFilter, WriteLogger};

use runner::{OutputFormat, Runner};

#[derive(Parser)]
#[command(name = "formstate")]
#[command(version)]
#[command(about = "Drive form definitions from the command line", long_about = None)]
struct Cli {
    /// Log file (defaults to latest.log in the platform cache directory)
    #[arg(long, env = "FORMSTATE_LOG_FILE")]
    log_file: Option<PathBuf>,

    /// Log debug output
    #[arg(long, short)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Load a definition and print its initial state
    Check {
        /// Form definition (JSON)
        definition: PathBuf,

        /// Output format
        #[arg(long, short, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
    /// Replay a script of events against a definition
    Run {
        /// Form definition (JSON)
        definition: PathBuf,

        /// Event script, one command per line
        script: PathBuf,

        /// Output format
        #[arg(long, short, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
}

fn init_logging(cli: &Cli) {
    let path = match &cli.log_file {
        Some(path) => Some(path.clone()),
        None => paths::cache_dir().and_then(|dir| {
            fs::create_dir_all(&dir).ok()?;
            paths::rotate_logs(&dir);
            paths::log_file()
        }),
    };

    let Some(path) = path else {
        eprintln!("No log directory available; logging disabled");
        return;
    };

    let level = if cli.verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };

    match File::create(&path) {
        Ok(file) => {
            if let Err(e) = WriteLogger::init(level, Config::default(), file) {
                eprintln!("Failed to initialize logger: {}", e);
            }
        }
        Err(e) => eprintln!("Failed to create log file {}: {}", path.display(), e),
    }
}

fn load_definition(path: &Path) -> Result<FormDefinition> {
    FormDefinition::from_path(path)
        .with_context(|| format!("loading form definition {}", path.display()))
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&cli);

    match cli.command {
        Commands::Check { definition, format } => {
            let definition = load_definition(&definition)?;
            if let Some(title) = &definition.title {
                println!("{}", title);
            }
            let mut runner = Runner::new(definition, format, io::stdout());
            runner.print_state()?;
        }
        Commands::Run {
            definition,
            script,
            format,
        } => {
            let definition = load_definition(&definition)?;
            let commands = script::load(&script)
                .with_context(|| format!("loading script {}", script.display()))?;

            log::info!("Running {} scripted commands", commands.len());
            let mut runner = Runner::new(definition, format, io::stdout());
            runner.run(commands).await?;
            log::info!("Script finished, form valid={}", runner.form().is_valid());
        }
    }

    Ok(())
}
