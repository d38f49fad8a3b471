//! Command-line interface

use clap::Parser;
use std::path::PathBuf;

use crate::Result;
use crate::config::TrackerConfig;
use crate::providers::SourceKind;

/// Codec 8 GPS tracker simulator
#[derive(Parser, Debug)]
#[command(
    name = "avl-tracker",
    version,
    about = "Codec 8 GPS tracker simulator",
    after_help = "Examples:\n  \
        avl-tracker --server=localhost:5027 --imei=359633107700001\n  \
        avl-tracker --server=192.168.1.100:5027 --imei=359633107700001 --lat=40.7128 --lon=-74.0060 --verbose"
)]
pub struct Cli {
    /// Server address (host:port)
    #[arg(short, long)]
    pub server: Option<String>,

    /// Device IMEI (15 digits)
    #[arg(short, long)]
    pub imei: Option<String>,

    /// Data send interval in seconds [default: 30]
    #[arg(long)]
    pub interval: Option<u64>,

    /// Starting latitude
    #[arg(long, allow_negative_numbers = true)]
    pub lat: Option<f64>,

    /// Starting longitude
    #[arg(long, allow_negative_numbers = true)]
    pub lon: Option<f64>,

    /// Altitude in meters [default: 100]
    #[arg(long, allow_negative_numbers = true)]
    pub altitude: Option<i32>,

    /// Initial heading in degrees (0-359)
    #[arg(long)]
    pub heading: Option<i32>,

    /// Position source strategy [default: stationary]
    #[arg(long, value_enum)]
    pub simulation: Option<SourceKind>,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,

    /// YAML config file; flags override its values
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}

impl Cli {
    /// Merge the config file (if any) with the flags
    pub fn into_config(self) -> Result<TrackerConfig> {
        let mut config = match &self.config {
            Some(path) => TrackerConfig::load(path)?,
            None => TrackerConfig::default(),
        };

        if let Some(server) = self.server {
            config.server = server;
        }
        if let Some(imei) = self.imei {
            config.imei = imei;
        }
        if let Some(interval) = self.interval {
            config.interval_secs = interval;
        }
        if let Some(lat) = self.lat {
            config.latitude = lat;
        }
        if let Some(lon) = self.lon {
            config.longitude = lon;
        }
        if let Some(altitude) = self.altitude {
            config.altitude = altitude;
        }
        if let Some(heading) = self.heading {
            config.heading = heading;
        }
        if let Some(simulation) = self.simulation {
            config.simulation = simulation;
        }
        config.verbose |= self.verbose;

        Ok(config)
    }
}
