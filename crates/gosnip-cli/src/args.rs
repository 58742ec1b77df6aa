//! Arguments shared between the top-level command and subcommands.

use std::ffi::OsString;
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use clap::Args;
use gosnip_driver::{parse_timeout, EvalConfig, EvalConfigBuilder, Mode};

/// Where the snippet comes from and how to wrap it.
#[derive(Debug, Args)]
pub struct SourceArgs {
    /// Read the snippet from a file (takes precedence over --content)
    #[arg(short, long, value_name = "PATH")]
    pub file: Option<PathBuf>,

    /// The snippet to evaluate
    #[arg(short, long, value_name = "CODE", allow_hyphen_values = true)]
    pub content: Option<String>,

    /// auto-print, program-body, verbatim, or auto to guess from the snippet
    #[arg(short, long, value_name = "MODE", default_value = "auto-print", value_parser = parse_mode)]
    pub mode: ModeArg,

    /// Packages to import, comma separated
    #[arg(short, long, value_name = "LIBS", default_value = "fmt")]
    pub libs: String,
}

impl SourceArgs {
    /// The trimmed snippet text. Empty when neither source was given.
    pub fn snippet(&self) -> miette::Result<String> {
        match &self.file {
            Some(path) => fs::read_to_string(path)
                .map(|source| source.trim().to_string())
                .map_err(|e| miette::miette!("Failed to read {}: {}", path.display(), e)),
            None => Ok(self.content.as_deref().unwrap_or_default().trim().to_string()),
        }
    }

    pub fn libraries(&self) -> Vec<&str> {
        split_libraries(&self.libs)
    }

    pub fn mode_for(&self, snippet: &str) -> Mode {
        self.mode.resolve(snippet)
    }
}

/// Overrides for the environment-derived configuration.
#[derive(Debug, Args)]
pub struct ConfigArgs {
    /// Keep generated programs on disk after each run
    #[arg(long)]
    pub keep: bool,

    /// Directory to create the scratch folder in
    #[arg(long, value_name = "DIR")]
    pub scratch_dir: Option<PathBuf>,

    /// Command used to run programs, as in `<CMD> run file.go`
    #[arg(long, value_name = "CMD")]
    pub toolchain: Option<String>,

    /// Kill programs that run longer than this many seconds
    #[arg(long, value_name = "SECS", value_parser = parse_secs)]
    pub timeout: Option<Duration>,
}

impl ConfigArgs {
    /// Environment configuration with command-line overrides applied.
    pub fn config(&self) -> EvalConfig {
        let mut builder = EvalConfigBuilder::from_config(EvalConfig::from_env());

        if let Some(dir) = &self.scratch_dir {
            builder = builder.scratch_root(dir.clone());
        }
        if let Some(toolchain) = &self.toolchain {
            builder = builder.toolchain(toolchain.clone());
        }
        if self.keep {
            builder = builder.retain_scratch_files(true);
        }
        if self.timeout.is_some() {
            builder = builder.timeout(self.timeout);
        }

        builder.build()
    }
}

/// Everything the top-level evaluation needs.
#[derive(Debug, Args)]
pub struct EvalArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    #[command(flatten)]
    pub config: ConfigArgs,

    /// Print `{"output", "error"}` as JSON instead of plain output
    #[arg(long)]
    pub json: bool,
}

/// A fixed mode, or `auto` to pick one per snippet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModeArg {
    Fixed(Mode),
    Auto,
}

impl ModeArg {
    pub fn resolve(self, snippet: &str) -> Mode {
        match self {
            ModeArg::Fixed(mode) => mode,
            ModeArg::Auto => Mode::classify(snippet),
        }
    }
}

fn parse_mode(value: &str) -> Result<ModeArg, String> {
    if value.trim() == "auto" {
        Ok(ModeArg::Auto)
    } else {
        value.parse::<Mode>().map(ModeArg::Fixed)
    }
}

fn parse_secs(value: &str) -> Result<Duration, String> {
    parse_timeout(value)
        .ok_or_else(|| format!("expected a positive number of seconds, got `{}`", value))
}

/// Long flags the original tool spelled with a single dash.
const LEGACY_FLAGS: [&str; 4] = ["file", "content", "mode", "libs"];

/// Flags whose next argument is a value and must not be rewritten.
const VALUE_FLAGS: [&str; 11] = [
    "-f",
    "--file",
    "-c",
    "--content",
    "-m",
    "--mode",
    "-l",
    "--libs",
    "--scratch-dir",
    "--toolchain",
    "--timeout",
];

/// Rewrite `-file`, `-content`, `-mode` and `-libs` (also with `=value`) to
/// their `--` spelling so clap does not read them as bundled short flags.
pub fn expand_legacy_flags<I>(args: I) -> Vec<OsString>
where
    I: IntoIterator,
    I::Item: Into<OsString>,
{
    let mut expanded: Vec<OsString> = Vec::new();
    let mut args = args.into_iter().map(Into::<OsString>::into);
    let mut takes_value = false;

    while let Some(arg) = args.next() {
        if takes_value {
            takes_value = false;
            expanded.push(arg);
            continue;
        }
        if arg == "--" {
            expanded.push(arg);
            expanded.extend(args.by_ref());
            break;
        }

        let arg = arg
            .to_str()
            .and_then(legacy_long_form)
            .map(OsString::from)
            .unwrap_or(arg);
        takes_value = arg.to_str().is_some_and(|text| VALUE_FLAGS.contains(&text));
        expanded.push(arg);
    }

    expanded
}

fn legacy_long_form(arg: &str) -> Option<String> {
    let rest = arg.strip_prefix('-')?;
    if rest.starts_with('-') {
        return None;
    }
    let name = rest.split_once('=').map_or(rest, |(name, _)| name);
    LEGACY_FLAGS.contains(&name).then(|| format!("-{}", arg))
}

/// `"fmt, strings,,os"` -> `["fmt", "strings", "os"]`
pub fn split_libraries(libs: &str) -> Vec<&str> {
    libs.split(',')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .collect()
}
