//! Command-line configuration

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use rand::rngs::StdRng;

use crate::api::{ClientConfig, DEFAULT_ENDPOINT, DEFAULT_ICON_HOST};
use crate::particles::particle_rng;

/// Look up the current weather for a city
#[derive(Parser, Debug, Clone)]
#[command(name = "skycast", version)]
#[command(about = "Terminal weather lookup with themed backdrops and particle effects")]
pub struct Args {
    /// Weather endpoint, called with `POST` and a form-encoded `city`
    #[arg(long, default_value = DEFAULT_ENDPOINT)]
    pub endpoint: String,

    /// Host serving condition icons
    #[arg(long, default_value = DEFAULT_ICON_HOST)]
    pub icon_host: String,

    /// City to search for on startup
    #[arg(long, short)]
    pub city: Option<String>,

    /// Request timeout in seconds
    #[arg(long, default_value_t = 10)]
    pub timeout_secs: u64,

    /// Seed for particle placement; random when omitted
    #[arg(long)]
    pub seed: Option<u64>,

    /// Animation frame interval in milliseconds
    #[arg(long, default_value_t = 80, value_parser = clap::value_parser!(u64).range(1..))]
    pub tick_ms: u64,

    /// Directory for log files
    #[arg(long)]
    pub log_dir: Option<PathBuf>,
}

impl Args {
    pub fn client_config(&self) -> ClientConfig {
        ClientConfig {
            endpoint: self.endpoint.clone(),
            timeout: Duration::from_secs(self.timeout_secs),
            icon_host: self.icon_host.clone(),
        }
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_ms)
    }

    pub fn rng(&self) -> StdRng {
        particle_rng(self.seed)
    }

    /// Initial search, if a non-blank `--city` was given.
    pub fn initial_city(&self) -> Option<&str> {
        self.city.as_deref().map(str::trim).filter(|c| !c.is_empty())
    }
}
