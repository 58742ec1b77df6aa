//! Session configuration.

use std::path::PathBuf;
use std::time::Duration;

use gosnip_exec::DEFAULT_TOOLCHAIN;

/// Hidden folder created under the working directory by default.
pub const DEFAULT_SCRATCH_FOLDER: &str = ".gosnip";

/// Subdirectory of the scratch root that gosnip owns and purges.
pub const SCRATCH_SUBDIR: &str = "files";

/// Generated files are deleted after each run unless configured otherwise.
pub const DEFAULT_RETAIN_SCRATCH_FILES: bool = false;

pub const ENV_SCRATCH_DIR: &str = "GOSNIP_SCRATCH_DIR";
pub const ENV_TOOLCHAIN: &str = "GOSNIP_TOOLCHAIN";
pub const ENV_KEEP_FILES: &str = "GOSNIP_KEEP_FILES";
pub const ENV_TIMEOUT_SECS: &str = "GOSNIP_TIMEOUT_SECS";

/// Configuration for an evaluation [`Session`](crate::Session).
#[derive(Debug, Clone, PartialEq)]
pub struct EvalConfig {
    /// Directory under which the managed scratch folder is created.
    pub scratch_root: PathBuf,
    /// Keep generated programs on disk after each run.
    pub retain_scratch_files: bool,
    /// Command that runs a program file (`<toolchain> run <file>`).
    pub toolchain: String,
    /// Kill programs that run longer than this.
    pub timeout: Option<Duration>,
    /// Packages imported in addition to `fmt`.
    pub libraries: Vec<String>,
}

impl Default for EvalConfig {
    fn default() -> Self {
        Self {
            scratch_root: default_scratch_root(),
            retain_scratch_files: DEFAULT_RETAIN_SCRATCH_FILES,
            toolchain: DEFAULT_TOOLCHAIN.to_string(),
            timeout: None,
            libraries: Vec::new(),
        }
    }
}

impl EvalConfig {
    /// Create config from environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Create config from any key/value source, falling back to defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        let scratch_root = lookup(ENV_SCRATCH_DIR)
            .filter(|v| !v.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or(defaults.scratch_root);

        let toolchain = lookup(ENV_TOOLCHAIN)
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .unwrap_or(defaults.toolchain);

        let retain_scratch_files = lookup(ENV_KEEP_FILES)
            .map(|v| parse_flag(&v))
            .unwrap_or(defaults.retain_scratch_files);

        let timeout = lookup(ENV_TIMEOUT_SECS)
            .and_then(|v| parse_timeout(&v))
            .or(defaults.timeout);

        Self {
            scratch_root,
            retain_scratch_files,
            toolchain,
            timeout,
            libraries: defaults.libraries,
        }
    }

    /// The directory gosnip creates files in and purges.
    pub fn scratch_dir(&self) -> PathBuf {
        self.scratch_root.join(SCRATCH_SUBDIR)
    }

    /// Create a builder for configuration.
    pub fn builder() -> EvalConfigBuilder {
        EvalConfigBuilder::default()
    }
}

fn default_scratch_root() -> PathBuf {
    std::env::current_dir()
        .unwrap_or_else(|_| PathBuf::from("."))
        .join(DEFAULT_SCRATCH_FOLDER)
}

fn parse_flag(value: &str) -> bool {
    matches!(
        value.trim().to_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

/// Seconds, fractional allowed. Zero, negative or garbage means no timeout.
pub fn parse_timeout(value: &str) -> Option<Duration> {
    value
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|secs| *secs > 0.0)
        .and_then(|secs| Duration::try_from_secs_f64(secs).ok())
}

/// Builder for evaluation configuration.
#[derive(Debug, Default)]
pub struct EvalConfigBuilder {
    config: EvalConfig,
}

impl EvalConfigBuilder {
    /// Start from an existing configuration, e.g. [`EvalConfig::from_env`].
    pub fn from_config(config: EvalConfig) -> Self {
        Self { config }
    }

    pub fn scratch_root(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.scratch_root = path.into();
        self
    }

    pub fn retain_scratch_files(mut self, retain: bool) -> Self {
        self.config.retain_scratch_files = retain;
        self
    }

    pub fn toolchain(mut self, toolchain: impl Into<String>) -> Self {
        self.config.toolchain = toolchain.into();
        self
    }

    pub fn timeout(mut self, timeout: Option<Duration>) -> Self {
        self.config.timeout = timeout;
        self
    }

    pub fn library(mut self, name: impl Into<String>) -> Self {
        self.config.libraries.push(name.into());
        self
    }

    pub fn libraries<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.config.libraries.extend(names.into_iter().map(Into::into));
        self
    }

    pub fn build(self) -> EvalConfig {
        self.config
    }
}
