//! Generator configuration: input CSV paths, output directory, collision policy.
//!
//! Resolution order, highest first:
//!
//! 1. command-line overrides ([`ConfigOverrides`])
//! 2. a TOML file: `--config`, else `DHF_CHECKGEN_CONFIG`, else
//!    `dhf-checkgen.toml` in the working directory when present
//! 3. built-in defaults
//!
//! ```toml
//! output_dir = "config/validation"
//! on_key_collision = "fail"
//!
//! [inputs]
//! analysis_checks = "data/Analysis_Checks_-_Enhanced.csv"
//! cross_phase_checks = "data/Cross-Phase_Checks.csv"
//! estar_checks = "data/eSTAR-Specific_Checks.csv"
//! ```

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use dhf_generate::CollisionPolicy;

/// Environment variable naming a configuration file.
pub const CONFIG_ENV_VAR: &str = "DHF_CHECKGEN_CONFIG";

/// Configuration file picked up from the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "dhf-checkgen.toml";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config {path}: {source}")]
    Toml {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GeneratorConfig {
    /// Directory receiving the YAML files. Must exist.
    pub output_dir: PathBuf,
    pub on_key_collision: CollisionPolicy,
    pub inputs: InputPaths,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct InputPaths {
    pub analysis_checks: PathBuf,
    pub cross_phase_checks: PathBuf,
    pub estar_checks: PathBuf,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("config/validation"),
            on_key_collision: CollisionPolicy::default(),
            inputs: InputPaths::default(),
        }
    }
}

impl Default for InputPaths {
    fn default() -> Self {
        Self {
            analysis_checks: PathBuf::from("data/Analysis_Checks_-_Enhanced.csv"),
            cross_phase_checks: PathBuf::from("data/Cross-Phase_Checks.csv"),
            estar_checks: PathBuf::from("data/eSTAR-Specific_Checks.csv"),
        }
    }
}

/// Values given on the command line; `None` keeps the configured value.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub output_dir: Option<PathBuf>,
    pub analysis_checks: Option<PathBuf>,
    pub cross_phase_checks: Option<PathBuf>,
    pub estar_checks: Option<PathBuf>,
    pub on_key_collision: Option<CollisionPolicy>,
}

impl GeneratorConfig {
    /// Parse a configuration file. Missing keys take their defaults.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&content).map_err(|source| ConfigError::Toml {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Load the configuration file chosen by [`config_path`], or defaults.
    ///
    /// Returns the file that was used, if any.
    pub fn resolve(explicit: Option<&Path>) -> Result<(Self, Option<PathBuf>), ConfigError> {
        match config_path(explicit, std::env::var_os(CONFIG_ENV_VAR)) {
            Some(path) => Ok((Self::load_from(&path)?, Some(path))),
            None => Ok((Self::default(), None)),
        }
    }

    pub fn apply_overrides(&mut self, overrides: ConfigOverrides) {
        if let Some(dir) = overrides.output_dir {
            self.output_dir = dir;
        }
        if let Some(path) = overrides.analysis_checks {
            self.inputs.analysis_checks = path;
        }
        if let Some(path) = overrides.cross_phase_checks {
            self.inputs.cross_phase_checks = path;
        }
        if let Some(path) = overrides.estar_checks {
            self.inputs.estar_checks = path;
        }
        if let Some(policy) = overrides.on_key_collision {
            self.on_key_collision = policy;
        }
    }
}

/// Pick the configuration file: explicit path, then the environment, then
/// [`DEFAULT_CONFIG_FILE`] if it exists.
pub fn config_path(explicit: Option<&Path>, env_value: Option<OsString>) -> Option<PathBuf> {
    if let Some(path) = explicit {
        return Some(path.to_path_buf());
    }
    if let Some(value) = env_value.filter(|value| !value.is_empty()) {
        return Some(PathBuf::from(value));
    }
    let fallback = PathBuf::from(DEFAULT_CONFIG_FILE);
    fallback.is_file().then_some(fallback)
}
