use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use inquire::{CustomType, Password, PasswordDisplayMode};
use openuv_core::{Coordinates, OPENUV_API_URL, SkinType, UvClient, http_client};
use std::time::Duration;
use tracing::Level;

use crate::config::Config;

const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "openuv", version, about = "UV index, sun times and safe exposure from OpenUV")]
pub struct Cli {
    /// Logging verbosity. Allowed values are 'trace', 'debug', 'info', 'warn', and 'error'
    /// (case insensitive)
    #[arg(long, global = true, default_value_t = Level::WARN)]
    pub log_level: Level,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Store the API key and a default location.
    Configure {
        /// OpenUV API key; prompted for when absent.
        #[arg(long)]
        api_key: Option<String>,

        #[command(flatten)]
        location: LocationArgs,
    },

    /// Fetch and print the current UV report.
    Show {
        #[command(flatten)]
        location: LocationArgs,

        /// OpenUV API key; falls back to the configured one.
        #[arg(long, env = "OPENUV_API_KEY", hide_env_values = true)]
        api_key: Option<String>,

        /// Base URL of the OpenUV API.
        #[arg(long)]
        api_url: Option<String>,

        /// Request timeout in seconds; 0 waits indefinitely.
        #[arg(long)]
        timeout_secs: Option<u64>,

        /// Print the decoded report as JSON instead of text.
        #[arg(long)]
        json: bool,

        /// Append a legend of the Fitzpatrick skin types to the text report.
        #[arg(long, conflicts_with = "json")]
        legend: bool,
    },
}

#[derive(Debug, Clone, Copy, Default, Args)]
pub struct LocationArgs {
    /// Latitude in decimal degrees.
    #[arg(long, requires = "lon", allow_negative_numbers = true)]
    pub lat: Option<f64>,

    /// Longitude in decimal degrees.
    #[arg(long, requires = "lat", allow_negative_numbers = true)]
    pub lon: Option<f64>,
}

impl LocationArgs {
    fn coordinates(&self) -> Option<Coordinates> {
        match (self.lat, self.lon) {
            (Some(lat), Some(lon)) => Some(Coordinates::new(lat, lon)),
            _ => None,
        }
    }
}

impl Cli {
    pub async fn run(self) -> Result<()> {
        match self.command {
            Command::Configure { api_key, location } => configure(api_key, location),
            Command::Show { location, api_key, api_url, timeout_secs, json, legend } => {
                let request =
                    ShowRequest::resolve(Config::load, location, api_key, api_url, timeout_secs)?;
                show(request, json, legend).await
            }
        }
    }
}

fn configure(api_key: Option<String>, location: LocationArgs) -> Result<()> {
    let mut cfg = Config::load()?;

    let api_key = match api_key {
        Some(key) => key,
        None => Password::new("OpenUV API key:")
            .without_confirmation()
            .with_display_mode(PasswordDisplayMode::Masked)
            .prompt()
            .context("Failed to read API key")?,
    };

    let coordinates = match location.coordinates() {
        Some(c) => c,
        None => {
            let current = cfg.location;
            let lat = prompt_degrees("Latitude:", current.map(|l| l.lat))?;
            let lon = prompt_degrees("Longitude:", current.map(|l| l.lon))?;
            Coordinates::new(lat, lon)
        }
    };

    cfg.set_api_key(api_key.trim().to_string());
    cfg.set_location(coordinates);

    let path = cfg.save()?;
    println!("Configuration saved to {}", path.display());

    Ok(())
}

fn prompt_degrees(message: &str, current: Option<f64>) -> Result<f64> {
    let mut prompt = CustomType::<f64>::new(message)
        .with_error_message("Please type a number of decimal degrees, e.g. 52.52");
    if let Some(current) = current {
        prompt = prompt.with_default(current);
    }

    prompt.prompt().with_context(|| format!("Failed to read {message}"))
}

/// Inputs of `show` after merging flags, environment and the config file.
#[derive(Debug, Clone, PartialEq)]
struct ShowRequest {
    coordinates: Coordinates,
    api_key: String,
    api_url: String,
    timeout: Option<Duration>,
}

impl ShowRequest {
    /// `load` runs only when a flag is missing. A config that cannot be read
    /// is fatal only if it has to supply the key or the location.
    fn resolve(
        load: impl FnOnce() -> Result<Config>,
        location: LocationArgs,
        api_key: Option<String>,
        api_url: Option<String>,
        timeout_secs: Option<u64>,
    ) -> Result<Self> {
        let api_key = api_key.filter(|k| !k.trim().is_empty());

        let cfg = if location.coordinates().is_none() || api_key.is_none() {
            load()?
        } else if api_url.is_none() || timeout_secs.is_none() {
            load().unwrap_or_else(|e| {
                tracing::warn!(message = "ignoring unreadable config", error = %e);
                Config::default()
            })
        } else {
            Config::default()
        };

        let coordinates = match location.coordinates() {
            Some(c) => c,
            None => cfg.coordinates()?,
        };

        let api_key = match api_key {
            Some(key) => key,
            None => cfg.api_key()?.to_string(),
        };

        let api_url = api_url
            .or_else(|| cfg.api_url.clone())
            .unwrap_or_else(|| OPENUV_API_URL.to_string());

        let timeout = match timeout_secs.or(cfg.timeout_secs).unwrap_or(DEFAULT_TIMEOUT_SECS) {
            0 => None,
            secs => Some(Duration::from_secs(secs)),
        };

        Ok(Self { coordinates, api_key, api_url, timeout })
    }
}

async fn show(request: ShowRequest, json: bool, legend: bool) -> Result<()> {
    let client = UvClient::with_client(
        http_client(request.timeout)?,
        &request.api_url,
        request.api_key,
    )?;

    let coordinates = request.coordinates;
    tracing::info!(
        message = "fetching UV report",
        coordinates = %coordinates,
        api_url = %client.base_url()
    );

    let report = client
        .fetch(coordinates)
        .await
        .with_context(|| format!("Failed to fetch UV report for {coordinates}"))?;

    if json {
        let out = serde_json::to_string_pretty(&report).context("Failed to serialize report")?;
        println!("{out}");
    } else {
        println!("{report}");
        if legend {
            println!("\n{}", skin_legend());
        }
    }

    Ok(())
}

fn skin_legend() -> String {
    let mut out = String::from("Skin types:");
    for skin in SkinType::all() {
        out.push_str(&format!("\n  {}: {}", skin.index(), skin.description()));
    }
    out
}
