//! RatePoster CLI: headless poster rendering and inspection.
//!
//! Usage:
//!   rateposter render --image <PATH> [OPTIONS]   Compose a poster and save it as PNG
//!   rateposter layers <PATH> [--json]            Show PSD layer metadata
//!   rateposter fields [--at <TIME>]              Show the ten fields with their defaults
//!   rateposter fonts                             Check which font choices are installed
//!   rateposter config [--init]                   Show settings, optionally write defaults

use std::path::PathBuf;

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(
    name = "rateposter",
    about = "Exchange-rate poster composer",
    version,
    author
)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compose a poster onto an image and save it as PNG
    Render {
        /// Background image (PNG or JPEG)
        #[arg(short, long)]
        image: PathBuf,

        /// Output file; defaults to exchange-rate-<millis>.png in the export directory
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Override a field's text, e.g. --set buying-rate=4025
        #[arg(long = "set", value_name = "FIELD=TEXT")]
        set: Vec<String>,

        /// Move a field's anchor in percent, e.g. --pos currency=20,60
        #[arg(long = "pos", value_name = "FIELD=X,Y")]
        pos: Vec<String>,

        /// Set a field's font size in pixels, e.g. --size selling-rate=120
        #[arg(long = "size", value_name = "FIELD=PX")]
        size: Vec<String>,

        /// Text colour as hex
        #[arg(long)]
        color: Option<String>,

        /// Font family
        #[arg(long)]
        font: Option<String>,

        /// Local time to derive date and time fields from (YYYY-MM-DDTHH:MM)
        #[arg(long)]
        at: Option<String>,
    },

    /// Show layer metadata of a PSD document
    Layers {
        /// Path to the PSD file
        path: PathBuf,

        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Show every field with its derived default text, position, and size
    Fields {
        /// Local time to derive from (YYYY-MM-DDTHH:MM)
        #[arg(long)]
        at: Option<String>,
    },

    /// Check which of the selectable fonts resolve on this system
    Fonts,

    /// Show the config file location and effective settings
    Config {
        /// Write the default settings if no config file exists yet
        #[arg(long)]
        init: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = rateposter_common::AppConfig::load();

    // Initialize logging
    let mut logging = config.logging.clone();
    if cli.verbose {
        logging.level = "debug".to_string();
    }
    rateposter_common::logging::init_logging(&logging);

    match cli.command {
        Commands::Render {
            image,
            output,
            set,
            pos,
            size,
            color,
            font,
            at,
        } => {
            let overrides = commands::render::Overrides {
                set,
                pos,
                size,
                color,
                font,
            };
            commands::render::run(&config, image, output, overrides, at).await
        }
        Commands::Layers { path, json } => commands::layers::run(path, json),
        Commands::Fields { at } => commands::fields::run(&config, at),
        Commands::Fonts => commands::fonts::run(&config),
        Commands::Config { init } => commands::config::run(&config, init),
    }
}
