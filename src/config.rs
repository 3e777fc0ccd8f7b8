use serde::{Deserialize, Serialize};

use std::{env, fs, path::Path, path::PathBuf};

pub const DEFAULT_PORT: u16 = 8000;
pub const DEFAULT_RECIPIENT: &str = "hello@hijrahassalam.com";
pub const DEFAULT_RELAY_PATH: &str = "/contact.php";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_port")]
    pub port: u16,
    /// Address every contact message is delivered to
    #[serde(default = "default_recipient")]
    pub recipient: String,
    /// Fixed `From` address. When unset the submitter's address is used.
    #[serde(default)]
    pub sender: Option<String>,
    #[serde(default = "default_relay_path")]
    pub relay_path: String,
    /// Directory with the static site, served for every unmatched route
    #[serde(default)]
    pub site_dir: Option<PathBuf>,
    #[serde(default)]
    pub transport: TransportConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum TransportConfig {
    Sendmail {
        #[serde(default)]
        command: Option<String>,
    },
    Smtp {
        relay: String,
        #[serde(default)]
        port: Option<u16>,
        username: String,
        password: String,
    },
    File {
        output_dir: PathBuf,
    },
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self::Sendmail { command: None }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            recipient: DEFAULT_RECIPIENT.to_string(),
            sender: None,
            relay_path: DEFAULT_RELAY_PATH.to_string(),
            site_dir: None,
            transport: TransportConfig::default(),
        }
    }
}

const fn default_port() -> u16 {
    DEFAULT_PORT
}

fn default_recipient() -> String {
    DEFAULT_RECIPIENT.to_string()
}

fn default_relay_path() -> String {
    DEFAULT_RELAY_PATH.to_string()
}

impl Config {
    /// Route paths must be absolute for the router
    #[must_use]
    pub fn normalized(mut self) -> Self {
        if !self.relay_path.starts_with('/') {
            self.relay_path = format!("/{}", self.relay_path);
        }
        self
    }
}

fn parse_yaml(path: &str) -> Result<Config, Box<dyn std::error::Error>> {
    let contents = fs::read_to_string(path)?;
    serde_yaml::from_str(&contents).map_err(Into::into)
}

/// Builds a config from variables resolved through `lookup`, falling back to
/// defaults for everything that is not set.
pub fn load_from_vars<F>(lookup: F) -> Result<Config, Box<dyn std::error::Error>>
where
    F: Fn(&str) -> Option<String>,
{
    let mut config = Config::default();

    if let Some(port) = lookup("PORT") {
        config.port = port
            .parse::<u16>()
            .map_err(|e| format!("Failed to parse PORT: {e}"))?;
    }
    if let Some(relay_path) = lookup("RELAY_PATH") {
        config.relay_path = relay_path;
    }
    config.sender = lookup("CONTACT_SENDER");
    config.site_dir = lookup("SITE_DIR").map(PathBuf::from);

    config.transport = match lookup("MAIL_TRANSPORT").as_deref() {
        None | Some("sendmail") => TransportConfig::Sendmail {
            command: lookup("SENDMAIL_COMMAND"),
        },
        Some("smtp") => TransportConfig::Smtp {
            relay: lookup("SMTP_RELAY").ok_or("SMTP_RELAY environment variable is required")?,
            port: lookup("SMTP_PORT")
                .map(|p| p.parse::<u16>())
                .transpose()
                .map_err(|e| format!("Failed to parse SMTP_PORT: {e}"))?,
            username: lookup("SMTP_USERNAME")
                .ok_or("SMTP_USERNAME environment variable is required")?,
            password: lookup("SMTP_PASS").ok_or("SMTP_PASS environment variable is required")?,
        },
        Some("file") => TransportConfig::File {
            output_dir: lookup("MAIL_OUTPUT_DIR")
                .ok_or("MAIL_OUTPUT_DIR environment variable is required")?
                .into(),
        },
        Some(other) => return Err(format!("Unknown MAIL_TRANSPORT '{other}'").into()),
    };

    Ok(apply_overrides(config, lookup))
}

/// The recipient can always be overridden from the environment, whichever
/// source the rest of the config came from.
fn apply_overrides<F>(mut config: Config, lookup: F) -> Config
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(recipient) = lookup("CONTACT_RECIPIENT") {
        config.recipient = recipient;
    }
    config.normalized()
}

pub fn load_config() -> Result<Config, Box<dyn std::error::Error>> {
    let lookup = |key: &str| env::var(key).ok();

    // Retrieve env variable
    let config_path =
        env::var("CONTACT_RELAY_CONFIG").unwrap_or_else(|_| "config.yaml".to_string());

    // Try env path
    if Path::new(&config_path).exists() {
        return Ok(apply_overrides(parse_yaml(&config_path)?, lookup));
    }

    // Fallback to config.yaml
    if Path::new("config.yaml").exists() {
        tracing::warn!(
            "Config file '{}' not found, falling back to 'config.yaml'",
            config_path
        );
        return Ok(apply_overrides(parse_yaml("config.yaml")?, lookup));
    }

    // Fallback to config.example.yaml
    if Path::new("config.example.yaml").exists() {
        tracing::warn!(
            "Config file '{}' and 'config.yaml' not found, falling back to 'config.example.yaml'\
             \n This file should not be used and should be replaced with actual data",
            config_path
        );
        return Ok(apply_overrides(parse_yaml("config.example.yaml")?, lookup));
    }

    // Fallback to environment variables
    tracing::info!(
        "No config file found, attempting to load configuration from environment variables"
    );
    match load_from_vars(lookup) {
        Ok(config) => {
            tracing::info!("Successfully loaded configuration from environment variables");
            Ok(config)
        }
        Err(e) => Err(format!(
            "Config file not found and environment variables are invalid. \
             Tried: '{config_path}', 'config.yaml', 'config.example.yaml', and environment variables. \
             Error: {e}"
        )
        .into()),
    }
}
