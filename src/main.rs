//! Ad Locator - Main entrypoint.
//!
//! Loads configuration, initializes logging, and either serves the stdio
//! protocol or runs a one-shot command against a declaration file.

use ad_locator_lib::config::{self, AdLocatorConfig, ConfigLoader, LogConfig, ENV_PREFIX};
use ad_locator_lib::error::{
    get_error_reporting, set_error_reporter, AdLocatorError, AdLocatorResult, ErrorContext,
    TracingErrorReporter,
};
use ad_locator_lib::protocol::Session;
use ad_locator_lib::LocationStore;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::process;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Command line arguments for the Ad Locator.
#[derive(Parser, Debug)]
#[clap(name = "Ad Locator", version, author, about)]
struct Args {
    /// Path to configuration file (config/default.toml is used when present)
    #[clap(short, long, value_parser)]
    config: Option<PathBuf>,

    /// Command to execute
    #[clap(subcommand)]
    command: Option<Command>,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Command {
    /// Serve search/normalize/reload/load commands over stdin and stdout
    Serve {
        /// Declaration file to load before serving (overrides store.data_file)
        #[clap(short, long, value_parser)]
        data: Option<PathBuf>,
    },

    /// Load a declaration file and print the advertisers for each location
    Lookup {
        /// Declaration file to load
        #[clap(short, long, value_parser)]
        data: PathBuf,

        /// Locations to look up
        #[clap(required = true)]
        locations: Vec<String>,
    },

    /// Print the canonical form of a location
    Normalize {
        /// Location to normalize
        location: String,
    },

    /// Validate the configuration file
    Validate,

    /// Generate a default configuration file
    GenConfig {
        /// Path to output configuration file
        #[clap(short, long, value_parser)]
        output: PathBuf,
    },
}

/// Initialize the logging system. Logs go to stderr; stdout carries protocol output.
fn init_logging(log: &LogConfig) -> AdLocatorResult<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&log.level));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_file(log.source_location)
        .with_line_number(log.source_location)
        .with_thread_names(true);

    let installed = if log.json {
        tracing::subscriber::set_global_default(builder.json().finish())
    } else {
        tracing::subscriber::set_global_default(builder.pretty().finish())
    };

    installed.map_err(|e| {
        AdLocatorError::Custom(format!("Failed to set global tracing subscriber: {e}"))
    })
}

/// Write the default configuration as TOML.
fn gen_config(output: &Path) -> AdLocatorResult<()> {
    if let Some(parent) = output.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let toml = toml::to_string_pretty(&AdLocatorConfig::default())
        .map_err(|e| AdLocatorError::Custom(format!("Failed to serialize config: {e}")))?;
    std::fs::write(output, toml)?;

    println!("Default configuration written to {}", output.display());
    Ok(())
}

async fn run(args: Args) -> AdLocatorResult<()> {
    let config_path = args.config.or_else(config::default_config_path);
    let loaded = ConfigLoader::new(config_path.as_deref(), ENV_PREFIX).load()?;
    init_logging(&loaded.log)?;
    set_error_reporter(Arc::new(TracingErrorReporter));
    tracing::debug!(config = ?config_path, "Configuration loaded");

    match args.command.unwrap_or(Command::Serve { data: None }) {
        Command::Serve { data } => {
            let store = Arc::new(LocationStore::new());
            if let Some(path) = data.or_else(|| loaded.store.data_file.clone()) {
                store.reload_from_path(&path, loaded.store.max_input_bytes)?;
            }

            info!(version = ad_locator_lib::VERSION, "Serving on stdio");
            let session = Session::new(store, &loaded.protocol, &loaded.store);
            let stdin = tokio::io::BufReader::new(tokio::io::stdin());
            session.run(stdin, tokio::io::stdout()).await?;
            Ok(())
        }
        Command::Lookup { data, locations } => {
            let store = LocationStore::new();
            store.reload_from_path(&data, loaded.store.max_input_bytes)?;

            for location in &locations {
                let line = serde_json::json!({
                    "location": location,
                    "normalized": LocationStore::normalize(location),
                    "advertisers": store.search(location),
                });
                println!("{line}");
            }
            Ok(())
        }
        Command::Normalize { location } => {
            match LocationStore::normalize(&location) {
                Some(normalized) => println!("{normalized}"),
                None => println!(),
            }
            Ok(())
        }
        Command::Validate => {
            info!("Configuration validated successfully");
            Ok(())
        }
        Command::GenConfig { output } => gen_config(&output),
    }
}

/// Main entry point for the application.
#[tokio::main]
async fn main() {
    let args = Args::parse();

    if let Err(e) = run(args).await {
        get_error_reporting().report(ErrorContext::new(e, "main"));
        process::exit(1);
    }
}
