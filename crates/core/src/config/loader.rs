//! Loading of the `pgf` TOML configuration.
//!
//! A configuration file names one or more profiles, each pointing at a
//! content repository checkout. Loading picks the active profile and turns
//! its paths into absolute ones.

use std::path::{Path, PathBuf};
use std::{env, fs};

use dirs::home_dir;
use thiserror::Error;

use crate::config::types::{ConfigFile, LoggingConfig, Profile, ResolvedConfig};

/// File name of the content configuration inside a repository.
pub const DEFAULT_SCHEMA_FILE: &str = ".pages.yml";

/// Profile used when neither the command line nor the file picks one.
const FALLBACK_PROFILE: &str = "default";

const SUPPORTED_VERSION: u32 = 1;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("no pgf configuration at {0}")]
    NotFound(String),

    #[error("cannot read pgf configuration {0}: {1}")]
    Unreadable(String, #[source] std::io::Error),

    #[error("pgf configuration {0} is not valid TOML: {1}")]
    ParseError(String, #[source] toml::de::Error),

    #[error("pgf configuration has no profile named '{0}'")]
    ProfileNotFound(String),

    #[error("pgf configuration declares no [profiles]")]
    NoProfiles,

    #[error("pgf configuration version {0} cannot be read, only version 1 is known")]
    BadVersion(u32),

    #[error("cannot expand '~' without a home directory")]
    HomeUnavailable,
}

pub struct ConfigLoader;

impl ConfigLoader {
    /// Read the configuration at `config_path` (or the default location) and
    /// resolve the profile chosen by `profile_override`, the file's `profile`
    /// key, or `default`, in that order.
    pub fn load(
        config_path: Option<&Path>,
        profile_override: Option<&str>,
    ) -> Result<ResolvedConfig, ConfigError> {
        let path = config_path.map_or_else(default_config_path, Path::to_path_buf);
        let file = read_config_file(&path)?;

        let name = profile_override
            .or(file.profile.as_deref())
            .unwrap_or(FALLBACK_PROFILE);
        let profile = file
            .profiles
            .get(name)
            .ok_or_else(|| ConfigError::ProfileNotFound(name.to_string()))?;

        let resolved = resolve(name, profile, &file.logging)?;
        tracing::debug!(profile = %resolved.active_profile, repo_root = %resolved.repo_root.display(), "configuration loaded");
        Ok(resolved)
    }
}

fn read_config_file(path: &Path) -> Result<ConfigFile, ConfigError> {
    let shown = || path.display().to_string();
    if !path.exists() {
        return Err(ConfigError::NotFound(shown()));
    }

    let text = fs::read_to_string(path).map_err(|e| ConfigError::Unreadable(shown(), e))?;
    let file: ConfigFile = toml::from_str(&text).map_err(|e| ConfigError::ParseError(shown(), e))?;

    if file.version != SUPPORTED_VERSION {
        return Err(ConfigError::BadVersion(file.version));
    }
    if file.profiles.is_empty() {
        return Err(ConfigError::NoProfiles);
    }
    Ok(file)
}

/// Expand `~`, environment variables and `{{repo_root}}` in a profile.
fn resolve(
    name: &str,
    profile: &Profile,
    logging: &LoggingConfig,
) -> Result<ResolvedConfig, ConfigError> {
    let repo_root = expand_path(&profile.repo_root)?;
    let in_repo = |raw: &str| {
        expand_path(&raw.replace("{{repo_root}}", &repo_root.to_string_lossy()))
    };

    let schema_path = match profile.schema.as_deref() {
        Some(raw) => in_repo(raw)?,
        None => repo_root.join(DEFAULT_SCHEMA_FILE),
    };
    let log_file = match &logging.file {
        Some(raw) => Some(in_repo(&raw.to_string_lossy())?),
        None => None,
    };

    Ok(ResolvedConfig {
        active_profile: name.to_string(),
        schema_path,
        logging: LoggingConfig { file: log_file, ..logging.clone() },
        repo_root,
    })
}

/// `$XDG_CONFIG_HOME/pagefields/config.toml`, else `~/.config/pagefields/config.toml`.
pub fn default_config_path() -> PathBuf {
    let config_dir = match env::var_os("XDG_CONFIG_HOME") {
        Some(xdg) => PathBuf::from(xdg),
        None => home_dir().unwrap_or_else(|| PathBuf::from("~")).join(".config"),
    };
    config_dir.join("pagefields").join("config.toml")
}

fn expand_path(raw: &str) -> Result<PathBuf, ConfigError> {
    shellexpand::full(raw)
        .map(|expanded| PathBuf::from(expanded.into_owned()))
        .map_err(|_| ConfigError::HomeUnavailable)
}
