//! FreshPod - command-line front end for the website core
//!
//! Browses the blog and gallery catalogs, renders the world map, runs the
//! ROI calculator and submits contact requests.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use freshpod_core::config::SiteConfig;

mod calc_cli;
mod catalog_cli;
mod config_cli;
mod contact_cli;
mod map_cli;

/// Modules that can be traced individually
#[derive(Debug, Clone, ValueEnum)]
enum TraceModule {
    Catalog,
    Geo,
    Contact,
    Cache,
    All,
}

/// Log levels
#[derive(Debug, Clone, ValueEnum)]
enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    fn to_filter_directive(&self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }
}

#[derive(Parser, Debug)]
#[clap(
    name = "freshpod",
    about = "FreshPod website core: catalogs, world map, ROI calculator and contact form",
    version
)]
struct Cli {
    #[clap(subcommand)]
    command: Command,

    /// Enable structured tracing (comma-separated: catalog,geo,contact,cache,all)
    #[clap(long, value_delimiter = ',', global = true)]
    trace: Vec<TraceModule>,

    /// Set log level
    #[clap(long, default_value = "info", global = true)]
    log_level: LogLevel,

    /// Override site configuration file path
    #[clap(long, global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Browse blog posts
    Blog(catalog_cli::BlogCommand),

    /// Browse the image gallery
    Gallery(catalog_cli::GalleryArgs),

    /// Render and inspect the world map
    Map(map_cli::MapCommand),

    /// Project distributor income and days to ROI
    Calc(calc_cli::CalcArgs),

    /// Submit the contact form
    Contact(contact_cli::ContactCommand),

    /// Show or initialize site configuration
    Config(config_cli::ConfigCommand),
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    initialize_tracing(&cli.log_level, &cli.trace);

    // Commands that never read settings run without a config directory
    let config_path = cli.config.as_deref();

    match cli.command {
        Command::Blog(cmd) => cmd.execute(&load_config(config_path)?),
        Command::Gallery(args) => catalog_cli::execute_gallery(args, &load_config(config_path)?),
        Command::Map(cmd) => cmd.execute(config_path).await,
        Command::Calc(args) => calc_cli::execute(args),
        Command::Contact(cmd) => cmd.execute(&load_config(config_path)?).await,
        Command::Config(cmd) => cmd.execute(&load_config(config_path)?, config_path),
    }
}

pub(crate) fn load_config(path: Option<&std::path::Path>) -> Result<SiteConfig> {
    match path {
        Some(path) => SiteConfig::load_from_path(path)
            .with_context(|| format!("Failed to load config from {}", path.display())),
        None => SiteConfig::load().context("Failed to load site config"),
    }
}

fn initialize_tracing(log_level: &LogLevel, trace_modules: &[TraceModule]) {
    let mut filter = EnvFilter::new(log_level.to_filter_directive());

    for module in trace_modules {
        let directive = match module {
            TraceModule::Catalog => "freshpod_core::catalog=trace",
            TraceModule::Geo => "freshpod_core::geo=trace",
            TraceModule::Contact => "freshpod_core::contact=trace",
            TraceModule::Cache => "freshpod_core::cache=trace",
            TraceModule::All => "freshpod_core=trace",
        };

        if let Ok(parsed) = directive.parse() {
            filter = filter.add_directive(parsed);
        }
    }

    if !trace_modules.is_empty() {
        // JSON output for structured tracing, on stderr so stdout stays clean
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_target(true)
            .with_thread_ids(true)
            .with_thread_names(true)
            .with_file(true)
            .with_line_number(true)
            .with_writer(std::io::stderr)
            .init();

        tracing::info!(trace_modules = ?trace_modules, "FreshPod tracing enabled");
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_writer(std::io::stderr)
            .init();
    }
}
