use std::fs;
use std::path::Path;
use std::path::PathBuf;

use serde::Deserialize;
use serde::Serialize;

use crate::reveal::DEFAULT_CHARS_PER_TICK;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq, Eq)]
#[serde(default)]
pub struct Config {
    pub console: ConsoleConfig,
    pub content: ContentConfig,
    pub server: ServerConfig,
    pub mail: MailConfig,
}

impl Config {
    /// Reads `path`; a missing file yields the defaults.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let raw = match fs::read_to_string(path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "no config file, using defaults");
                return Ok(Self::default());
            }
            Err(source) => {
                return Err(ConfigError::Io {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };
        toml::from_str(&raw).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Applies the `PORT` override the hosting environment may set.
    pub fn apply_port_override(&mut self, port: Option<&str>) {
        let Some(port) = port.and_then(|port| port.trim().parse::<u16>().ok()) else {
            return;
        };
        let host = self
            .server
            .bind
            .rsplit_once(':')
            .map(|(host, _)| host.to_string())
            .unwrap_or_else(|| "0.0.0.0".to_string());
        self.server.bind = format!("{host}:{port}");
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct ConsoleConfig {
    pub chars_per_tick: usize,
    pub tick_interval_ms: u64,
    pub gui_redirect_delay_ms: u64,
    pub matrix_duration_ms: u64,
    pub prompt: String,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            chars_per_tick: DEFAULT_CHARS_PER_TICK,
            tick_interval_ms: 15,
            gui_redirect_delay_ms: 1000,
            matrix_duration_ms: 3000,
            prompt: "visitor@portfolio:~$".to_string(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq, Eq)]
#[serde(default)]
pub struct ContentConfig {
    pub path: Option<PathBuf>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct ServerConfig {
    pub bind: String,
    pub allowed_origin: String,
    pub resume_path: PathBuf,
    pub resume_download_name: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: "127.0.0.1:5000".to_string(),
            allowed_origin: "http://localhost:5173".to_string(),
            resume_path: PathBuf::from("files/Resume.pdf"),
            resume_download_name: "Resume.pdf".to_string(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct MailConfig {
    pub sender: String,
    pub recipient: Option<String>,
    pub spool_dir: PathBuf,
}

impl MailConfig {
    pub fn recipient(&self) -> &str {
        self.recipient
            .as_deref()
            .filter(|recipient| !recipient.trim().is_empty())
            .unwrap_or(&self.sender)
    }
}

impl Default for MailConfig {
    fn default() -> Self {
        Self {
            sender: "portfolio@localhost".to_string(),
            recipient: None,
            spool_dir: PathBuf::from("mail-spool"),
        }
    }
}
