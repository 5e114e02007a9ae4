//! Configuration for the pawshaven service.
//!
//! Settings resolve in three layers, later layers winning:
//!
//! 1. built-in defaults
//! 2. an optional TOML file (`pawshaven.toml` or `--config PATH`)
//! 3. environment variables (`PORT`, `ADMIN_API_KEY`, `SUPABASE_URL`, ...)
//!
//! - [`Config`] - Root configuration struct
//! - [`RemoteSection`] - Remote table settings as written in the file
//! - [`RemoteConfig`] - Resolved remote settings, present only when complete

use anyhow::{Context, Result};
use serde::Deserialize;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;
use url::Url;

use crate::constants;

/// Result of configuration validation.
#[derive(Debug, Default)]
pub struct ValidationResult {
    /// Non-fatal warnings that should be logged but don't prevent operation.
    pub warnings: Vec<String>,
}

impl ValidationResult {
    /// Returns true if there are any warnings.
    #[must_use]
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }
}

/// Local storage engine for pet records.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackendKind {
    #[default]
    File,
    Sqlite,
    Memory,
}

impl FromStr for BackendKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "file" | "json" => Ok(Self::File),
            "sqlite" => Ok(Self::Sqlite),
            "memory" => Ok(Self::Memory),
            other => anyhow::bail!("Unknown backend '{other}'. Valid backends: file, sqlite, memory"),
        }
    }
}

impl fmt::Display for BackendKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::File => "file",
            Self::Sqlite => "sqlite",
            Self::Memory => "memory",
        })
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

impl FromStr for LogFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pretty" | "text" => Ok(Self::Pretty),
            "json" => Ok(Self::Json),
            other => anyhow::bail!("Unknown log format '{other}'. Valid formats: pretty, json"),
        }
    }
}

/// `[remote]` table as written in the config file.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RemoteSection {
    pub url: Option<String>,
    pub key: Option<String>,
}

/// Resolved remote table settings.
#[derive(Debug, Clone)]
pub struct RemoteConfig {
    pub url: String,
    pub key: String,
    pub timeout: Duration,
}

/// Root configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    pub port: u16,
    pub host: String,
    pub admin_api_key: Option<String>,
    pub backend: BackendKind,
    pub data_dir: PathBuf,
    pub remote: RemoteSection,
    pub remote_timeout_secs: u64,
    pub request_timeout_secs: u64,
    pub log_format: LogFormat,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: constants::DEFAULT_PORT,
            host: constants::DEFAULT_HOST.to_string(),
            admin_api_key: None,
            backend: BackendKind::default(),
            data_dir: PathBuf::from(constants::DEFAULT_DATA_DIR),
            remote: RemoteSection::default(),
            remote_timeout_secs: constants::DEFAULT_REMOTE_TIMEOUT_SECS,
            request_timeout_secs: constants::DEFAULT_REQUEST_TIMEOUT_SECS,
            log_format: LogFormat::default(),
        }
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

impl Config {
    /// Load configuration from the given file (or `pawshaven.toml` in the
    /// current directory when present), then apply environment overrides.
    ///
    /// # Errors
    ///
    /// Returns an error if an explicit config file is missing or invalid,
    /// or an environment variable holds an unparseable value.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let mut config = match explicit {
            Some(path) => Self::load_from(path)?,
            None if Path::new(constants::CONFIG_FILE_NAME).exists() => {
                Self::load_from(constants::CONFIG_FILE_NAME)?
            },
            None => Self::default(),
        };
        config.apply_env(|name| std::env::var(name).ok())?;
        Ok(config)
    }

    /// Load configuration from the specified TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The file cannot be read (IO error)
    /// - The file contains invalid TOML syntax
    /// - Fields have invalid types or values
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    /// Overlay values from environment variables, read through `lookup`.
    ///
    /// # Errors
    ///
    /// Returns an error if a numeric or enumerated variable cannot be parsed.
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(port) = lookup("PORT") {
            self.port = port
                .trim()
                .parse()
                .with_context(|| format!("Invalid PORT value: {port}"))?;
        }
        if let Some(host) = lookup("HOST") {
            self.host = host;
        }
        if let Some(key) = lookup("ADMIN_API_KEY") {
            self.admin_api_key = Some(key);
        }
        if let Some(backend) = lookup("PAWSHAVEN_BACKEND") {
            self.backend = backend.parse()?;
        }
        if let Some(dir) = lookup("PAWSHAVEN_DATA_DIR") {
            self.data_dir = PathBuf::from(dir);
        }
        if let Some(url) = lookup("SUPABASE_URL") {
            self.remote.url = Some(url);
        }
        if let Some(key) = lookup("SUPABASE_KEY") {
            self.remote.key = Some(key);
        }
        if let Some(secs) = lookup("PAWSHAVEN_REMOTE_TIMEOUT") {
            self.remote_timeout_secs = secs
                .trim()
                .parse()
                .with_context(|| format!("Invalid PAWSHAVEN_REMOTE_TIMEOUT value: {secs}"))?;
        }
        if let Some(secs) = lookup("PAWSHAVEN_REQUEST_TIMEOUT") {
            self.request_timeout_secs = secs
                .trim()
                .parse()
                .with_context(|| format!("Invalid PAWSHAVEN_REQUEST_TIMEOUT value: {secs}"))?;
        }
        if let Some(format) = lookup("PAWSHAVEN_LOG_FORMAT") {
            self.log_format = format.parse()?;
        }
        Ok(())
    }

    /// The shared admin secret, if one is set. An empty value counts as unset.
    pub fn admin_api_key(&self) -> Option<&str> {
        non_empty(self.admin_api_key.as_deref())
    }

    /// Remote table settings, present only when both url and key are set.
    pub fn remote(&self) -> Option<RemoteConfig> {
        let url = non_empty(self.remote.url.as_deref())?;
        let key = non_empty(self.remote.key.as_deref())?;
        Some(RemoteConfig {
            url: url.to_string(),
            key: key.to_string(),
            timeout: Duration::from_secs(self.remote_timeout_secs),
        })
    }

    /// Timeout applied to each HTTP request.
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Pet document used by the file backend.
    pub fn pets_file(&self) -> PathBuf {
        self.data_dir.join(constants::PETS_FILE_NAME)
    }

    /// Database used by the SQLite backend.
    pub fn sqlite_file(&self) -> PathBuf {
        self.data_dir.join(constants::SQLITE_FILE_NAME)
    }

    /// Document used by the local adoption sink.
    pub fn adoptions_file(&self) -> PathBuf {
        self.data_dir.join(constants::ADOPTIONS_FILE_NAME)
    }

    /// Validate configuration.
    ///
    /// Returns a `ValidationResult` containing any non-fatal warnings.
    ///
    /// # Errors
    ///
    /// Returns an error if validation fails with one or more errors:
    /// - Port 0
    /// - Zero timeouts
    /// - A remote url that cannot be parsed
    pub fn validate(&self) -> Result<ValidationResult> {
        let mut errors = Vec::new();
        let mut warnings = Vec::new();

        if self.port == 0 {
            errors.push(
                "Server port cannot be 0. Use a valid port number (1-65535)\n  \
                 Common ports: 3000 (default), 8080, 8000"
                    .to_string(),
            );
        } else if self.port < 1024 {
            warnings.push(format!(
                "Server port {} is a system/privileged port (< 1024)\n  \
                 Recommendation: Use ports >= 1024 (e.g., 3000, 8080, 8000) to avoid permission issues",
                self.port
            ));
        }

        if self.remote_timeout_secs == 0 {
            errors.push("remote_timeout_secs cannot be 0".to_string());
        }
        if self.request_timeout_secs == 0 {
            errors.push("request_timeout_secs cannot be 0".to_string());
        }

        let url = non_empty(self.remote.url.as_deref());
        let key = non_empty(self.remote.key.as_deref());
        match (url, key) {
            (Some(_), None) => warnings.push(
                "SUPABASE_URL is set without SUPABASE_KEY; the remote table is disabled".to_string(),
            ),
            (None, Some(_)) => warnings.push(
                "SUPABASE_KEY is set without SUPABASE_URL; the remote table is disabled".to_string(),
            ),
            _ => {},
        }

        if let Some(url) = url {
            match Url::parse(url) {
                Ok(parsed) if parsed.scheme() != "https" => warnings.push(format!(
                    "Remote url {url} does not use https\n  \
                     The service key will be sent in clear text"
                )),
                Ok(_) => {},
                Err(e) => errors.push(format!("Remote url '{url}' is invalid: {e}")),
            }
        }

        if !errors.is_empty() {
            anyhow::bail!(
                "Configuration validation failed:\n  - {}",
                errors.join("\n  - ")
            );
        }

        Ok(ValidationResult { warnings })
    }
}
