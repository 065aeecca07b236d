//! linkpeek - terminal link preview driven by a scripted view-state source
//!
//! This is the binary entry point. All logic lives in the library.

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use linkpeek::{parse_location, LaunchOptions};
use linkpeek_app::config::{init_config_dir, load_settings};
use linkpeek_core::prelude::*;
use linkpeek_core::Location;

/// linkpeek - preview a page the way a link preview would show it
#[derive(Parser, Debug)]
#[command(name = "linkpeek")]
#[command(about = "Terminal link preview driven by a scripted view-state source", long_about = None)]
struct Args {
    /// NDJSON script of view states and inputs (built-in demo when omitted)
    #[arg(value_name = "SCRIPT")]
    script: Option<PathBuf>,

    /// Title of the previewed page
    #[arg(long)]
    title: Option<String>,

    /// Wiki language code (overrides the config file)
    #[arg(long)]
    language: Option<String>,

    /// Open the preview as if from the places map
    #[arg(long)]
    places: bool,

    /// Treat the account as logged in
    #[arg(long)]
    logged_in: bool,

    /// The page is already on the watchlist
    #[arg(long)]
    watched: bool,

    /// The page is already in a reading list
    #[arg(long)]
    saved: bool,

    /// Location of the place, as LAT,LON
    #[arg(long, value_parser = parse_location, allow_hyphen_values = true)]
    location: Option<Location>,

    /// Last known location of the user, as LAT,LON
    #[arg(long, value_parser = parse_location, allow_hyphen_values = true)]
    here: Option<Location>,

    /// Run in headless mode (NDJSON output, no TUI)
    #[arg(long)]
    headless: bool,

    /// Idle milliseconds before a headless script is considered finished
    #[arg(long, value_name = "MS")]
    settle_ms: Option<u64>,

    /// Write a default .linkpeek/config.toml and exit
    #[arg(long)]
    init_config: bool,
}

impl Args {
    fn launch_options(self) -> LaunchOptions {
        LaunchOptions {
            script: self.script,
            title: self.title,
            language: self.language,
            places: self.places,
            logged_in: self.logged_in,
            watched: self.watched,
            in_reading_list: self.saved,
            location: self.location,
            here: self.here,
            headless: self.headless,
            settle: self.settle_ms.map(Duration::from_millis),
        }
    }
}

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    let args = Args::parse();

    let base_path = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));

    if args.init_config {
        init_config_dir(&base_path)?;
        eprintln!("Wrote {}", base_path.join(".linkpeek").join("config.toml").display());
        return Ok(());
    }

    linkpeek_core::logging::init()?;
    let settings = load_settings(&base_path);
    info!("Config loaded from {}", base_path.display());

    if let Err(e) = linkpeek::run(args.launch_options(), settings).await {
        error!("linkpeek failed: {}", e);
        return Err(e.into());
    }
    Ok(())
}
