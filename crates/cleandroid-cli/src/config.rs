//! Application configuration.
//!
//! [`AppConfig`] is loaded once at startup and passed down by value.  The
//! CLI layer owns config; the core crate never sees it.
//!
//! # Resolution order (highest priority first)
//!
//! 1. CLI flags (handled at the call-site, not here)
//! 2. Environment variables: `CLEANDROID_DEFAULTS__DEPENDENCY_METHOD=catalog`
//! 3. The file passed with `--config`
//! 4. `.cleandroid.toml` in the current directory
//! 5. `config.toml` in the user config directory
//! 6. Built-in defaults (always present)

use std::path::{Path, PathBuf};

use anyhow::{Context, bail};
use cleandroid_core::domain::{DependencyMethod, PermissionLevel, find_dependency};
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};

use crate::cli::OutputFormat;

/// File name of the per-directory configuration.
pub const LOCAL_CONFIG_FILE: &str = ".cleandroid.toml";

const ENV_PREFIX: &str = "CLEANDROID";

/// Application configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Selections used when a command is run without them.
    pub defaults: Defaults,
    /// Output settings.
    pub output: OutputConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Defaults {
    /// Permission categories, e.g. `["basic"]`.
    pub permission_categories: Vec<String>,
    /// `auto`, `gradle` or `catalog`.
    pub dependency_method: String,
    /// Library names from `cleandroid list dependencies`.
    pub libraries: Vec<String>,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            permission_categories: Vec::new(),
            dependency_method: "auto".into(),
            libraries: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub no_color: bool,
    /// `auto`, `human`, `plain` or `json`.
    pub format: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            no_color: false,
            format: "auto".into(),
        }
    }
}

/// A configuration file layer.
#[derive(Debug, Clone)]
struct FileLayer {
    path: PathBuf,
    required: bool,
}

impl AppConfig {
    /// Load configuration from every layer.
    ///
    /// `config_file` is the path the user passed via `--config`; unlike the
    /// user and local files it must exist.
    pub fn load(config_file: Option<&Path>) -> anyhow::Result<Self> {
        let mut files = Vec::new();
        if let Some(path) = Self::global_path() {
            files.push(FileLayer {
                path,
                required: false,
            });
        }
        files.push(FileLayer {
            path: PathBuf::from(LOCAL_CONFIG_FILE),
            required: false,
        });
        if let Some(path) = config_file {
            files.push(FileLayer {
                path: path.to_path_buf(),
                required: true,
            });
        }

        Self::build(&files, Self::environment())
    }

    fn environment() -> Environment {
        Environment::with_prefix(ENV_PREFIX)
            .prefix_separator("_")
            .separator("__")
            .list_separator(",")
            .with_list_parse_key("defaults.permission_categories")
            .with_list_parse_key("defaults.libraries")
            .try_parsing(true)
    }

    fn build(files: &[FileLayer], env: Environment) -> anyhow::Result<Self> {
        let mut builder = Config::builder().add_source(
            Config::try_from(&Self::default()).context("Failed to encode default configuration")?,
        );
        for file in files {
            builder = builder.add_source(File::from(file.path.as_path()).required(file.required));
        }

        let config: Self = builder
            .add_source(env)
            .build()
            .context("Failed to read configuration")?
            .try_deserialize()
            .context("Invalid configuration")?;

        config.validate()?;
        Ok(config)
    }

    /// Parse and validate a standalone TOML document.
    pub fn from_toml_str(text: &str) -> anyhow::Result<Self> {
        let config: Self = toml::from_str(text).context("Invalid configuration file")?;
        config.validate()?;
        Ok(config)
    }

    /// Reject names that no command would accept.
    pub fn validate(&self) -> anyhow::Result<()> {
        for name in &self.defaults.permission_categories {
            name.parse::<PermissionLevel>()
                .context("defaults.permission_categories")?;
        }
        self.dependency_method()
            .context("defaults.dependency_method")?;
        for name in &self.defaults.libraries {
            find_dependency(name).context("defaults.libraries")?;
        }
        if OutputFormat::from_name(&self.output.format).is_none() {
            bail!(
                "output.format: expected one of {}, got '{}'",
                OutputFormat::NAMES.join(", "),
                self.output.format
            );
        }
        Ok(())
    }

    /// Configured permission categories, in file order.
    pub fn permission_levels(&self) -> Vec<PermissionLevel> {
        self.defaults
            .permission_categories
            .iter()
            .filter_map(|name| name.parse().ok())
            .collect()
    }

    /// `Ok(None)` means auto-detect.
    pub fn dependency_method(&self) -> anyhow::Result<Option<DependencyMethod>> {
        let method = self.defaults.dependency_method.trim();
        if method.is_empty() || method.eq_ignore_ascii_case("auto") {
            return Ok(None);
        }
        Ok(Some(method.parse()?))
    }

    /// Path to the user configuration file, if the platform has a config dir.
    pub fn global_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "cleandroid", "cleandroid")
            .map(|d| d.config_dir().join("config.toml"))
    }

    /// Path `cleandroid init` and `config set` write to.
    ///
    /// Uses `directories::ProjectDirs` for cross-platform correctness,
    /// falling back to `.cleandroid.toml` in the current directory.
    pub fn config_path() -> PathBuf {
        Self::global_path().unwrap_or_else(|| PathBuf::from(LOCAL_CONFIG_FILE))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn no_env() -> Environment {
        Environment::with_prefix(ENV_PREFIX).source(Some(config::Map::new()))
    }

    fn layer(path: PathBuf, required: bool) -> FileLayer {
        FileLayer { path, required }
    }

    #[test]
    fn defaults_auto_detect_and_select_nothing() {
        let cfg = AppConfig::default();
        assert_eq!(cfg.dependency_method().unwrap(), None);
        assert!(cfg.permission_levels().is_empty());
        assert!(!cfg.output.no_color);
    }

    #[test]
    fn missing_optional_files_give_defaults() {
        let dir = TempDir::new().unwrap();
        let cfg = AppConfig::build(&[layer(dir.path().join("absent.toml"), false)], no_env())
            .unwrap();
        assert_eq!(cfg, AppConfig::default());
    }

    #[test]
    fn missing_required_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        assert!(AppConfig::build(&[layer(dir.path().join("absent.toml"), true)], no_env()).is_err());
    }

    #[test]
    fn later_files_override_earlier_ones() {
        let dir = TempDir::new().unwrap();
        let user = dir.path().join("user.toml");
        let local = dir.path().join("local.toml");
        fs::write(
            &user,
            "[defaults]\ndependency_method = \"gradle\"\npermission_categories = [\"basic\"]\n",
        )
        .unwrap();
        fs::write(&local, "[defaults]\ndependency_method = \"catalog\"\n").unwrap();

        let cfg = AppConfig::build(&[layer(user, false), layer(local, false)], no_env()).unwrap();

        assert_eq!(
            cfg.dependency_method().unwrap(),
            Some(DependencyMethod::VersionCatalog)
        );
        assert_eq!(cfg.permission_levels(), vec![PermissionLevel::Basic]);
    }

    #[test]
    fn environment_overrides_files() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("config.toml");
        fs::write(&file, "[defaults]\nlibraries = [\"glide\"]\n").unwrap();

        let mut vars = config::Map::new();
        vars.insert(
            "CLEANDROID_DEFAULTS__LIBRARIES".to_string(),
            "retrofit,okhttp".to_string(),
        );
        let env = AppConfig::environment().source(Some(vars));

        let cfg = AppConfig::build(&[layer(file, true)], env).unwrap();
        assert_eq!(cfg.defaults.libraries, vec!["retrofit", "okhttp"]);
    }

    #[test]
    fn unknown_names_are_rejected() {
        assert!(AppConfig::from_toml_str("[defaults]\npermission_categories = [\"expert\"]\n").is_err());
        assert!(AppConfig::from_toml_str("[defaults]\ndependency_method = \"maven\"\n").is_err());
        assert!(AppConfig::from_toml_str("[defaults]\nlibraries = [\"picasso\"]\n").is_err());
        assert!(AppConfig::from_toml_str("[output]\nformat = \"yaml\"\n").is_err());
    }

    #[test]
    fn default_config_round_trips_through_toml() {
        let text = toml::to_string_pretty(&AppConfig::default()).unwrap();
        assert_eq!(AppConfig::from_toml_str(&text).unwrap(), AppConfig::default());
    }

    #[test]
    fn config_path_is_not_empty() {
        assert!(!AppConfig::config_path().as_os_str().is_empty());
    }
}
