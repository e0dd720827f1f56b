//! XML configuration support.
//! - Loads settings from config.xml (quick_xml + serde).
//! - Creates a secure template if the default file is missing (never when
//!   TASKMATE_CONFIG names the file).
//!
//! Unknown XML fields are rejected so typos surface instead of silently
//! falling back to defaults.

use anyhow::{Context, Result, bail};
use quick_xml::de::from_str as from_xml_str;
use serde::Deserialize;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, info, warn};

use super::paths::{default_config_path, default_log_path, path_has_symlink_ancestor};
use super::types::{Config, LogLevel, parse_extension_list};
use super::{CONFIG_ENV_VAR, DEFAULT_HTTP_TIMEOUT_SECS, DEFAULT_IMAGE_DESTINATION};
use crate::platform::{set_dir_mode_0700, set_file_mode_0600, write_config_secure_new_0600};
use crate::relocate::{DEFAULT_MAX_ATTEMPTS, DEFAULT_RETRY_DELAY};

/// Struct mirroring the XML config for deserialization. Values are kept as
/// strings so surrounding whitespace in hand-edited files is tolerated.
#[derive(Debug, Default, Deserialize)]
#[serde(rename = "config")]
#[serde(deny_unknown_fields)]
struct XmlConfig {
    log_level: Option<String>,
    log_file: Option<String>,
    retry_attempts: Option<String>,
    retry_delay_ms: Option<String>,
    image_extensions: Option<String>,
    image_destination: Option<String>,
    http_timeout_seconds: Option<String>,
}

/// What `load_or_init` found.
#[derive(Debug)]
pub enum LoadResult {
    /// Parsed from the file at the given path.
    Loaded(Config, PathBuf),
    /// No default config existed; a commented template was written there and
    /// built-in defaults apply for this run.
    CreatedTemplate(PathBuf),
    /// No usable file (template creation refused or failed); defaults apply.
    Defaults,
}

impl LoadResult {
    /// The effective config for this run.
    pub fn into_config(self) -> Config {
        match self {
            LoadResult::Loaded(cfg, _) => cfg,
            LoadResult::CreatedTemplate(_) | LoadResult::Defaults => Config::default(),
        }
    }
}

/// Resolve the config path, load it if present, or write a template at the
/// default location.
///
/// A missing file named by `TASKMATE_CONFIG` is an error: the user asked for
/// that file explicitly.
pub fn load_or_init() -> Result<LoadResult> {
    let env_set = env::var_os(CONFIG_ENV_VAR).is_some_and(|v| !v.is_empty());
    let cfg_path = default_config_path()?;

    if cfg_path.exists() {
        let cfg = load_config_from_xml_path(&cfg_path)?;
        debug!(path = %cfg_path.display(), "Loaded config");
        return Ok(LoadResult::Loaded(cfg, cfg_path));
    }

    if env_set {
        bail!(
            "{} points to '{}', which does not exist",
            CONFIG_ENV_VAR,
            cfg_path.display()
        );
    }

    match create_template_config(&cfg_path) {
        Ok(()) => Ok(LoadResult::CreatedTemplate(cfg_path)),
        Err(e) => {
            warn!(
                path = %cfg_path.display(),
                error = %e,
                "Could not create template config; using defaults"
            );
            Ok(LoadResult::Defaults)
        }
    }
}

/// Load a Config from a specific XML file path.
pub fn load_config_from_xml_path(path: &Path) -> Result<Config> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("read config xml '{}'", path.display()))?;
    let parsed: XmlConfig = from_xml_str(&contents)
        .with_context(|| format!("parse config xml '{}'", path.display()))?;
    xml_to_config(parsed).with_context(|| format!("invalid value in '{}'", path.display()))
}

fn non_empty(s: Option<&str>) -> Option<&str> {
    s.map(str::trim).filter(|s| !s.is_empty())
}

fn parse_number<T: std::str::FromStr>(field: &str, raw: Option<&str>) -> Result<Option<T>> {
    match non_empty(raw) {
        None => Ok(None),
        Some(s) => match s.parse::<T>() {
            Ok(v) => Ok(Some(v)),
            Err(_) => bail!("<{field}> must be a non-negative integer, got '{s}'"),
        },
    }
}

// Map XmlConfig -> Config; absent or blank fields keep their defaults.
fn xml_to_config(parsed: XmlConfig) -> Result<Config> {
    let mut cfg = Config::default();

    if let Some(s) = non_empty(parsed.log_level.as_deref()) {
        match LogLevel::parse(s) {
            Some(level) => cfg.log_level = level,
            None => bail!("<log_level> must be one of quiet, normal, info, debug; got '{s}'"),
        }
    }
    if let Some(s) = non_empty(parsed.log_file.as_deref()) {
        cfg.log_file = Some(PathBuf::from(s));
    }
    if let Some(n) = parse_number::<u32>("retry_attempts", parsed.retry_attempts.as_deref())? {
        cfg.retry_attempts = n.max(1);
    }
    if let Some(ms) = parse_number::<u64>("retry_delay_ms", parsed.retry_delay_ms.as_deref())? {
        cfg.retry_delay = Duration::from_millis(ms);
    }
    if let Some(list) = non_empty(parsed.image_extensions.as_deref()) {
        let exts = parse_extension_list(list);
        if exts.is_empty() {
            bail!("<image_extensions> contains no extensions");
        }
        cfg.image_extensions = exts;
    }
    if let Some(s) = non_empty(parsed.image_destination.as_deref()) {
        cfg.image_destination = PathBuf::from(s);
    }
    if let Some(secs) =
        parse_number::<u64>("http_timeout_seconds", parsed.http_timeout_seconds.as_deref())?
    {
        cfg.http_timeout = Duration::from_secs(secs.max(1));
    }

    Ok(cfg)
}

/// Create the commented template config file and its parent directory.
/// Refuses when any existing ancestor is a symlink.
pub fn create_template_config(path: &Path) -> Result<()> {
    if path_has_symlink_ancestor(path)? {
        bail!(
            "Refusing to create config: ancestor of {} is a symlink",
            path.display()
        );
    }

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("create config dir '{}'", parent.display()))?;
        let _ = set_dir_mode_0700(parent);
    }

    let suggested_log = default_log_path()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|_| "/path/to/taskmate.log".into());

    let content = format!(
        "<!--\n  taskmate configuration (XML)\n\n  log_level             -> quiet | normal | info | debug\n  log_file              -> path to log file (optional; console output is kept)\n  retry_attempts        -> total attempts per image move (>= 1)\n  retry_delay_ms        -> pause between attempts, in milliseconds\n  image_extensions      -> comma-separated list, e.g. jpg,jpeg,png\n  image_destination     -> default folder images are moved into\n  http_timeout_seconds  -> timeout for webpage and stock price requests\n\n  CLI flags override values set here.\n-->\n<config>\n  <log_level>normal</log_level>\n  <log_file>{}</log_file>\n  <retry_attempts>{}</retry_attempts>\n  <retry_delay_ms>{}</retry_delay_ms>\n  <image_extensions>jpg,jpeg,png</image_extensions>\n  <image_destination>{}</image_destination>\n  <http_timeout_seconds>{}</http_timeout_seconds>\n</config>\n",
        suggested_log,
        DEFAULT_MAX_ATTEMPTS,
        DEFAULT_RETRY_DELAY.as_millis(),
        DEFAULT_IMAGE_DESTINATION,
        DEFAULT_HTTP_TIMEOUT_SECS,
    );

    write_config_secure_new_0600(path, content.as_bytes())?;
    let _ = set_file_mode_0600(path);

    info!("Created template config at {}", path.display());
    Ok(())
}
