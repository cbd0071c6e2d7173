//! Handles settings for the application. Configuration is written in
//! `config/tandem.toml`, can be overridden with `TANDEM__SECTION__KEY`
//! environment variables and, for a few keys, command line flags.
//!
//! See `config/tandem.toml` for the configuration.
use clap::Parser;
use config::{Config, ConfigError, Environment, File};
use engine::PartyConfig;
use serde::Deserialize;

const DEFAULT_CONFIG_PATH: &str = "config/tandem";

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct App {
    pub level: String,
    /// IANA zone deciding which calendar day is "today".
    pub timezone: String,
}

impl Default for App {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            timezone: "Asia/Kolkata".to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct PartiesSettings {
    pub a: PartyConfig,
    pub b: PartyConfig,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Database {
    Memory,
    Sqlite(String),
}

#[derive(Debug, Deserialize)]
pub struct Server {
    pub bind: Option<String>,
    pub port: u16,
    pub database: Database,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Reports {
    /// Days covered by the daily spending series.
    pub trend_days: u32,
}

impl Default for Reports {
    fn default() -> Self {
        Self { trend_days: 7 }
    }
}

#[derive(Debug, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub app: App,
    pub parties: PartiesSettings,
    pub server: Server,
    #[serde(default)]
    pub reports: Reports,
}

#[derive(Debug, Parser)]
#[command(name = "tandem", version)]
struct Args {
    /// Optional config file path (TOML).
    #[arg(long)]
    config: Option<String>,
    /// Override log level (e.g. debug).
    #[arg(long)]
    level: Option<String>,
    /// Override the listening address.
    #[arg(long)]
    bind: Option<String>,
    /// Override the listening port.
    #[arg(long)]
    port: Option<u16>,
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        let args = Args::parse();

        let config_path = args.config.as_deref().unwrap_or(DEFAULT_CONFIG_PATH);
        let mut settings: Settings = Config::builder()
            .add_source(File::with_name(config_path).required(false))
            .add_source(Environment::with_prefix("TANDEM").separator("__"))
            .build()?
            .try_deserialize()?;

        if let Some(level) = args.level {
            settings.app.level = level;
        }
        if let Some(bind) = args.bind {
            settings.server.bind = Some(bind);
        }
        if let Some(port) = args.port {
            settings.server.port = port;
        }

        Ok(settings)
    }
}
