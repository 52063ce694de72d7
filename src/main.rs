//! Property Finder - Entry Point

use clap::Parser;
use propfinder::config::CliOverrides;
use std::path::PathBuf;
use tracing::info;

/// Property Finder - search property listings from the terminal
#[derive(Parser, Debug)]
#[command(name = "propfinder")]
#[command(version)]
#[command(about = "Search for houses to buy by place name, postcode or location")]
pub struct Args {
    /// Initial search text (place name or postcode)
    #[arg(value_name = "PLACE", conflicts_with = "place")]
    pub place_arg: Option<String>,

    /// Initial search text, as an option
    #[arg(long)]
    pub place: Option<String>,

    /// Device position for location searches, as "LAT,LON"
    #[arg(long, value_name = "LAT,LON", allow_hyphen_values = true)]
    pub location: Option<String>,

    /// Listings API endpoint
    #[arg(long, value_name = "URL")]
    pub api_url: Option<String>,

    /// Run the initial search immediately on startup
    #[arg(short, long)]
    pub search: bool,

    /// Disable colors
    #[arg(long)]
    pub no_color: bool,

    /// Path to configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,
}

impl Args {
    fn overrides(&self) -> CliOverrides {
        CliOverrides {
            api_base_url: self.api_url.clone(),
            location: self.location.clone(),
            search: self.place_arg.clone().or_else(|| self.place.clone()),
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    // Load configuration with full precedence chain:
    // Defaults → Config File → Env Vars → CLI Args
    let config = {
        let config_file = propfinder::config::load_config_with_precedence(args.config.clone())?;
        let merged = propfinder::config::merge_config(config_file)?;
        let with_env = propfinder::config::apply_env_overrides(merged)?;
        propfinder::config::apply_cli_overrides(with_env, args.overrides())?
    };

    propfinder::logging::init(&config.log_file_path)?;

    info!(
        config = ?config,
        "Configuration loaded and resolved"
    );

    propfinder::view::run(
        &config,
        propfinder::view::LaunchOptions {
            search_on_start: args.search,
            colors_disabled: args.no_color,
        },
    )?;

    Ok(())
}
