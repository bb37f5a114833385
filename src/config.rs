//! Configuration for the submission pipeline
//!
//! Every value has a baked-in default. Resolution priority per value:
//! 1. CLI flag
//! 2. Environment variable (`CONTACT_*`)
//! 3. JSON config file (`<config_dir>/contact-relay/config.json`)
//! 4. Default

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;
use url::Url;

/// Relay endpoint the form posts to
pub const DEFAULT_ENDPOINT: &str = "https://script.google.com/macros/s/AKfycbz_1RSNn_WZqxAakMaTdMw6pVArWMSIJ-p7nEKHG4t6RBeIjIOivswJU35YotAuyKbC/exec";

/// Site key registered with the verification service
pub const DEFAULT_SITE_KEY: &str = "6LeSZQYsAAAAAMbJjwH5BBfCpPapxXLBuk61fqii";

/// Verification action name
pub const DEFAULT_ACTION: &str = "contact";

/// Address shown to the user when a submission fails
pub const DEFAULT_FALLBACK_EMAIL: &str = "joe@websitegeneration.co.uk";

/// Largest accepted attachment (5 MiB)
pub const MAX_ATTACHMENT_BYTES: u64 = 5 * 1024 * 1024;

/// Form key carrying the anti-abuse token
pub const TOKEN_FIELD: &str = "g-recaptcha-response";

/// Default HTTP request timeout in seconds
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Default delay before a success notice clears itself
const DEFAULT_NOTICE_CLEAR_SECS: u64 = 8;

/// How attachments are put on the wire
///
/// Submissions without an attachment are always url-encoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EncodingMode {
    /// `multipart/form-data` with the raw file as a part
    Multipart,
    /// JSON body with the file base64-encoded in `fileData`
    #[default]
    InlineBase64,
}

impl fmt::Display for EncodingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Multipart => write!(f, "multipart"),
            Self::InlineBase64 => write!(f, "inline-base64"),
        }
    }
}

impl FromStr for EncodingMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "multipart" => Ok(Self::Multipart),
            "inline-base64" | "base64" | "json" => Ok(Self::InlineBase64),
            other => Err(Error::Config(format!(
                "unknown encoding mode '{other}' (expected 'multipart' or 'inline-base64')"
            ))),
        }
    }
}

/// Bounded polling policy for verification readiness
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReadinessPolicy {
    /// Wait between readiness checks
    pub interval: Duration,
    /// Number of checks before giving up
    pub max_attempts: u32,
}

impl ReadinessPolicy {
    /// Total time the policy may wait
    pub fn budget(&self) -> Duration {
        self.interval * self.max_attempts
    }
}

impl Default for ReadinessPolicy {
    fn default() -> Self {
        Self {
            interval: Duration::from_millis(100),
            max_attempts: 40,
        }
    }
}

/// Resolved pipeline configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactConfig {
    /// Relay endpoint URL
    pub endpoint: String,
    /// Verification site key
    pub site_key: String,
    /// Verification action name
    pub action: String,
    /// Address named in error notices
    pub fallback_email: String,
    /// Attachment encoding policy
    pub encoding: EncodingMode,
    /// Attachment size limit in bytes
    pub max_attachment_bytes: u64,
    /// Verification readiness polling
    pub readiness: ReadinessPolicy,
    /// Delay before a success notice clears
    pub notice_clear_delay: Duration,
    /// HTTP request timeout
    pub request_timeout: Duration,
    /// External token helper program
    pub verify_command: Option<String>,
    /// Pre-issued verification token
    pub verify_token: Option<String>,
}

impl Default for ContactConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            site_key: DEFAULT_SITE_KEY.to_string(),
            action: DEFAULT_ACTION.to_string(),
            fallback_email: DEFAULT_FALLBACK_EMAIL.to_string(),
            encoding: EncodingMode::default(),
            max_attachment_bytes: MAX_ATTACHMENT_BYTES,
            readiness: ReadinessPolicy::default(),
            notice_clear_delay: Duration::from_secs(DEFAULT_NOTICE_CLEAR_SECS),
            request_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            verify_command: None,
            verify_token: None,
        }
    }
}

/// Where a configuration value came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigSource {
    /// Command-line flag
    Flag,
    /// Environment variable
    Env(&'static str),
    /// Config file
    File,
    /// Built-in default
    Default,
}

impl fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Flag => write!(f, "flag"),
            Self::Env(var) => write!(f, "env {var}"),
            Self::File => write!(f, "config file"),
            Self::Default => write!(f, "default"),
        }
    }
}

/// Values supplied on the command line
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    /// `--endpoint`
    pub endpoint: Option<String>,
    /// `--mode`
    pub encoding: Option<EncodingMode>,
    /// `--config`
    pub config_file: Option<PathBuf>,
}

/// On-disk config file shape
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "snake_case", deny_unknown_fields)]
pub struct FileConfig {
    /// Relay endpoint URL
    pub endpoint: Option<String>,
    /// Verification site key
    pub site_key: Option<String>,
    /// Address named in error notices
    pub fallback_email: Option<String>,
    /// Attachment encoding policy
    pub encoding: Option<EncodingMode>,
    /// External token helper program
    pub verify_command: Option<String>,
}

/// Configuration plus the origin of each user-settable value
#[derive(Debug, Clone)]
pub struct LoadedConfig {
    /// The resolved configuration
    pub config: ContactConfig,
    /// `(setting, source)` pairs in display order
    pub sources: Vec<(&'static str, ConfigSource)>,
    /// Config file location consulted, if any
    pub file: Option<PathBuf>,
    /// Whether that file existed and was read
    pub file_found: bool,
}

/// Default config file location
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("contact-relay").join("config.json"))
}

/// Read a JSON config file; a missing file is not an error
pub fn read_config_file(path: &Path) -> Result<Option<FileConfig>> {
    match std::fs::read_to_string(path) {
        Ok(raw) => {
            let parsed = serde_json::from_str(&raw)
                .map_err(|e| Error::Config(format!("{}: {e}", path.display())))?;
            Ok(Some(parsed))
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e.into()),
    }
}

/// Load configuration from flags, the process environment and the config file
pub fn load_config(overrides: &ConfigOverrides) -> Result<LoadedConfig> {
    let path = overrides.config_file.clone().or_else(default_config_path);
    let file = match &path {
        Some(p) => read_config_file(p)?,
        None => None,
    };
    let mut loaded = resolve_config(overrides, file.as_ref(), |var| env::var(var).ok())?;
    loaded.file = path;
    loaded.file_found = file.is_some();
    Ok(loaded)
}

/// Resolve configuration from explicit layers
///
/// `lookup_env` stands in for `std::env::var` so resolution can be tested
/// without touching the process environment.
pub fn resolve_config(
    overrides: &ConfigOverrides,
    file: Option<&FileConfig>,
    lookup_env: impl Fn(&str) -> Option<String>,
) -> Result<LoadedConfig> {
    let mut config = ContactConfig::default();
    let mut sources = Vec::new();

    let env_value = |var: &'static str| {
        lookup_env(var)
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .map(|v| (v, ConfigSource::Env(var)))
    };
    let file_value = |pick: fn(&FileConfig) -> Option<String>| {
        file.and_then(pick).map(|v| (v, ConfigSource::File))
    };

    // endpoint
    let (endpoint, source) = overrides
        .endpoint
        .clone()
        .map(|v| (v, ConfigSource::Flag))
        .or_else(|| env_value("CONTACT_ENDPOINT"))
        .or_else(|| file_value(|f| f.endpoint.clone()))
        .unwrap_or_else(|| (DEFAULT_ENDPOINT.to_string(), ConfigSource::Default));
    config.endpoint = validate_endpoint(&endpoint)?;
    sources.push(("endpoint", source));

    // site key
    let (site_key, source) = env_value("CONTACT_SITE_KEY")
        .or_else(|| file_value(|f| f.site_key.clone()))
        .unwrap_or_else(|| (DEFAULT_SITE_KEY.to_string(), ConfigSource::Default));
    config.site_key = site_key;
    sources.push(("site_key", source));

    // fallback email
    let (fallback, source) = env_value("CONTACT_FALLBACK_EMAIL")
        .or_else(|| file_value(|f| f.fallback_email.clone()))
        .unwrap_or_else(|| (DEFAULT_FALLBACK_EMAIL.to_string(), ConfigSource::Default));
    config.fallback_email = fallback;
    sources.push(("fallback_email", source));

    // encoding
    let encoding = if let Some(mode) = overrides.encoding {
        (mode, ConfigSource::Flag)
    } else if let Some((raw, source)) = env_value("CONTACT_ENCODING") {
        (raw.parse()?, source)
    } else if let Some(mode) = file.and_then(|f| f.encoding) {
        (mode, ConfigSource::File)
    } else {
        (EncodingMode::default(), ConfigSource::Default)
    };
    config.encoding = encoding.0;
    sources.push(("encoding", encoding.1));

    // verification
    if let Some((cmd, source)) =
        env_value("CONTACT_VERIFY_CMD").or_else(|| file_value(|f| f.verify_command.clone()))
    {
        config.verify_command = Some(cmd);
        sources.push(("verify_command", source));
    }
    if let Some((token, source)) = env_value("CONTACT_VERIFY_TOKEN") {
        config.verify_token = Some(token);
        sources.push(("verify_token", source));
    }

    Ok(LoadedConfig {
        config,
        sources,
        file: None,
        file_found: false,
    })
}

/// Check that an endpoint is an absolute http(s) URL
pub fn validate_endpoint(raw: &str) -> Result<String> {
    let url = Url::parse(raw.trim())
        .map_err(|e| Error::Config(format!("invalid endpoint '{raw}': {e}")))?;

    match url.scheme() {
        "http" | "https" => Ok(url.to_string()),
        scheme => Err(Error::Config(format!(
            "endpoint must use http or https, got '{scheme}'"
        ))),
    }
}
