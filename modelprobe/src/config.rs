use config::{Config as ConfigLoader, Environment};
use modelprobe_llm::ClientConfig;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::collections::HashMap;
use std::ffi::OsString;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use thiserror::Error;

use crate::overrides::PROMPTS_DIR;

pub const DEFAULT_MODEL: &str = "gpt-5";
pub const DOTENV_FILE: &str = ".env";
pub const DEFAULT_LOG_LEVEL: &str = "warn";

/// Only this exact value turns TLS verification off
const INSECURE_SSL_FLAG: &str = "1";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing OPENAI_API_KEY environment variable.")]
    MissingCredential,

    #[error("Invalid value for {key}: {value}")]
    InvalidValue { key: &'static str, value: String },

    #[error("Failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),
}

/// Environment variables captured once at startup.
///
/// Entries from `.env` sit underneath the process environment: a variable
/// already set in the process is never replaced by the file.
#[derive(Debug, Clone, Default)]
pub struct EnvSnapshot {
    vars: HashMap<String, String>,
    dotenv_issue: Option<String>,
    skipped: Vec<String>,
}

impl EnvSnapshot {
    /// Read `./.env` and the process environment
    pub fn capture() -> Self {
        Self::from_os_sources(Path::new(DOTENV_FILE), std::env::vars_os())
    }

    /// Like `from_sources`, but drops process variables whose name or value
    /// is not valid UTF-8. Their names are kept for `skipped()`.
    pub fn from_os_sources(
        dotenv_path: &Path,
        process_vars: impl IntoIterator<Item = (OsString, OsString)>,
    ) -> Self {
        let mut skipped = Vec::new();
        let mut usable = Vec::new();

        for (key, value) in process_vars {
            match (key.into_string(), value.into_string()) {
                (Ok(key), Ok(value)) => usable.push((key, value)),
                (Ok(key), Err(_)) => skipped.push(key),
                (Err(key), _) => skipped.push(key.to_string_lossy().into_owned()),
            }
        }

        let mut snapshot = Self::from_sources(dotenv_path, usable);
        snapshot.skipped = skipped;
        snapshot
    }

    pub fn from_sources(
        dotenv_path: &Path,
        process_vars: impl IntoIterator<Item = (String, String)>,
    ) -> Self {
        let mut vars = HashMap::new();
        let mut dotenv_issue = None;

        match dotenvy::from_path_iter(dotenv_path) {
            Ok(entries) => {
                for entry in entries {
                    match entry {
                        Ok((key, value)) => {
                            vars.insert(key, value);
                        }
                        Err(e) => {
                            dotenv_issue.get_or_insert_with(|| format!("{}: {}", dotenv_path.display(), e));
                        }
                    }
                }
            }
            Err(e) if e.not_found() => {}
            Err(e) => dotenv_issue = Some(format!("{}: {}", dotenv_path.display(), e)),
        }

        vars.extend(process_vars);

        Self {
            vars,
            dotenv_issue,
            skipped: Vec::new(),
        }
    }

    pub fn from_pairs<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            vars: pairs.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
            dotenv_issue: None,
            skipped: Vec::new(),
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.vars.get(key).map(String::as_str)
    }

    /// Problem found while reading `.env`, if any. The file is optional,
    /// so a bad line is reported and skipped rather than fatal.
    pub fn dotenv_issue(&self) -> Option<&str> {
        self.dotenv_issue.as_deref()
    }

    /// Process variables ignored because they are not valid UTF-8
    pub fn skipped(&self) -> &[String] {
        &self.skipped
    }

    /// Deserialize every `{PREFIX}_*` variable into `T`. Empty values count as unset.
    fn section<T: DeserializeOwned>(&self, prefix: &str) -> Result<T, config::ConfigError> {
        ConfigLoader::builder()
            .add_source(
                Environment::with_prefix(prefix)
                    .ignore_empty(true)
                    .source(Some(self.vars.clone().into_iter().collect())),
            )
            .build()?
            .try_deserialize()
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct OpenAiVars {
    api_key: Option<String>,
    base_url: Option<String>,
    allow_insecure_ssl: Option<String>,
    model: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ProbeVars {
    log_level: Option<String>,
    log_format: Option<String>,
    prompts_dir: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    #[default]
    Compact,
    Pretty,
    Json,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "compact" => Ok(LogFormat::Compact),
            "pretty" => Ok(LogFormat::Pretty),
            "json" => Ok(LogFormat::Json),
            other => Err(other.to_string()),
        }
    }
}

impl fmt::Display for LogFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            LogFormat::Compact => "compact",
            LogFormat::Pretty => "pretty",
            LogFormat::Json => "json",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LoggingConfig {
    pub level: String,
    pub format: LogFormat,
    /// Raw `RUST_LOG` directive; wins over `level` when present
    pub filter: Option<String>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: DEFAULT_LOG_LEVEL.to_string(),
            format: LogFormat::default(),
            filter: None,
        }
    }
}

/// Resolved settings for one probe run
#[derive(Debug, Clone)]
pub struct ProbeConfig {
    pub client: ClientConfig,
    pub model: String,
    pub prompts_dir: PathBuf,
    pub logging: LoggingConfig,
}

impl ProbeConfig {
    /// Resolve configuration from a captured environment.
    ///
    /// The credential is checked before anything else is validated.
    pub fn from_env(env: &EnvSnapshot) -> Result<Self, ConfigError> {
        let openai: OpenAiVars = env.section("OPENAI")?;
        let api_key = openai.api_key.ok_or(ConfigError::MissingCredential)?;

        let allow_insecure_tls = openai.allow_insecure_ssl.as_deref() == Some(INSECURE_SSL_FLAG);
        let client = ClientConfig::new(api_key)
            .with_base_url(openai.base_url)
            .with_insecure_tls(allow_insecure_tls);

        let probe: ProbeVars = env.section("MODELPROBE")?;
        let format = match probe.log_format {
            Some(raw) => raw.parse().map_err(|value| ConfigError::InvalidValue {
                key: "MODELPROBE_LOG_FORMAT",
                value,
            })?,
            None => LogFormat::default(),
        };
        let logging = LoggingConfig {
            level: probe.log_level.unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string()),
            format,
            filter: env.get("RUST_LOG").filter(|f| !f.is_empty()).map(str::to_string),
        };

        Ok(Self {
            client,
            model: openai.model.unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            prompts_dir: probe.prompts_dir.unwrap_or_else(|| PathBuf::from(PROMPTS_DIR)),
            logging,
        })
    }
}
