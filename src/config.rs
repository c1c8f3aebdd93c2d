//! Application configuration management.
//!
//! Settings are layered, later sources overriding earlier ones:
//!
//! 1. Built-in defaults
//! 2. `config.toml` in the platform configuration directory, or the file
//!    given with `--config`
//! 3. `DUPEHUNTER_*` environment variables (e.g. `DUPEHUNTER_IO_THREADS=8`)
//! 4. Command-line flags, via [`Config::merge_cli`]
//!
//! ```toml
//! io_threads = 8
//! follow_symlinks = false
//! skip_hidden = true
//! extensions = ["jpg", "png"]
//! use_trash = true
//! output = "text"
//! ```

use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};

use crate::actions::DeleteMethod;
use crate::cli::{Cli, OutputFormat};

/// Prefix of environment variables read into the configuration.
pub const ENV_PREFIX: &str = "DUPEHUNTER_";

/// Errors raised while loading an explicitly requested configuration file.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The file does not exist.
    #[error("config file not found: {0}")]
    NotFound(PathBuf),

    /// The file (or an environment override) could not be parsed.
    #[error("invalid configuration in {path}: {source}")]
    Invalid {
        path: PathBuf,
        #[source]
        source: Box<figment::Error>,
    },
}

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Worker threads used for hashing
    pub io_threads: usize,
    /// Descend through symbolic links
    pub follow_symlinks: bool,
    /// Ignore dot-files and dot-directories
    pub skip_hidden: bool,
    /// Extension allowlist; empty accepts every file
    pub extensions: Vec<String>,
    /// Move deleted copies to the trash
    pub use_trash: bool,
    /// Report format
    pub output: OutputFormat,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            io_threads: 4,
            follow_symlinks: false,
            skip_hidden: false,
            extensions: Vec::new(),
            use_trash: false,
            output: OutputFormat::Text,
        }
    }
}

impl Config {
    /// Load from the default platform-specific path.
    ///
    /// A missing file means defaults. A broken file is reported and ignored.
    #[must_use]
    pub fn load() -> Self {
        let Some(path) = Self::config_path() else {
            log::debug!("No configuration directory available, using defaults");
            return Self::from_figment(Self::figment(None)).unwrap_or_default();
        };

        match Self::from_figment(Self::figment(Some(&path))) {
            Ok(config) => config,
            Err(e) => {
                log::warn!(
                    "Ignoring configuration in {}: {}",
                    path.display(),
                    e
                );
                Self::from_figment(Self::figment(None)).unwrap_or_default()
            }
        }
    }

    /// Load from an explicit file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::NotFound`] if `path` does not exist and
    /// [`ConfigError::Invalid`] if it cannot be parsed.
    pub fn load_from_path(path: &Path) -> Result<Self, ConfigError> {
        if !path.is_file() {
            return Err(ConfigError::NotFound(path.to_path_buf()));
        }
        Self::from_figment(Self::figment(Some(path))).map_err(|source| ConfigError::Invalid {
            path: path.to_path_buf(),
            source: Box::new(source),
        })
    }

    /// The provider stack: defaults, then `file` if given, then environment.
    #[must_use]
    pub fn figment(file: Option<&Path>) -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Config::default()));
        if let Some(file) = file {
            figment = figment.merge(Toml::file(file));
        }
        figment.merge(Env::prefixed(ENV_PREFIX))
    }

    fn from_figment(figment: Figment) -> Result<Self, figment::Error> {
        let mut config: Self = figment.extract()?;
        config.io_threads = config.io_threads.max(1);
        Ok(config)
    }

    /// Apply command-line flags on top of the loaded values.
    ///
    /// Boolean flags can only switch a setting on. Extensions given on the
    /// command line are added to the configured list.
    pub fn merge_cli(&mut self, cli: &Cli) {
        if let Some(threads) = cli.io_threads {
            self.io_threads = usize::from(threads);
        }
        if let Some(output) = cli.output {
            self.output = output;
        }
        self.follow_symlinks |= cli.follow_symlinks;
        self.skip_hidden |= cli.skip_hidden;
        self.use_trash |= cli.trash;
        self.extensions.extend(cli.extensions.iter().cloned());
    }

    /// Deletion method implied by `use_trash`.
    #[must_use]
    pub fn delete_method(&self) -> DeleteMethod {
        if self.use_trash {
            DeleteMethod::Trash
        } else {
            DeleteMethod::Remove
        }
    }

    /// Default platform-specific configuration path.
    #[must_use]
    pub fn config_path() -> Option<PathBuf> {
        ProjectDirs::from("", "", "dupehunter").map(|dirs| dirs.config_dir().join("config.toml"))
    }
}
