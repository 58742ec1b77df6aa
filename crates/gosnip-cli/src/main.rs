//! gosnip CLI - evaluate Go snippets from the command line.

use clap::{Parser, Subcommand};

mod args;
mod commands;

use args::{ConfigArgs, EvalArgs, SourceArgs};

/// gosnip - Run a Go snippet and print what it printed
#[derive(Parser)]
#[command(name = "gosnip")]
#[command(author, version, about, long_about = None)]
#[command(args_conflicts_with_subcommands = true)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(flatten)]
    eval: EvalArgs,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the program a snippet turns into, without running it
    Emit {
        #[command(flatten)]
        source: SourceArgs,
    },

    /// Remove the scratch directory, including kept files
    Purge {
        #[command(flatten)]
        config: ConfigArgs,
    },

    /// Show version and effective configuration
    Info {
        #[command(flatten)]
        config: ConfigArgs,
    },
}

fn main() -> miette::Result<()> {
    let cli = Cli::parse_from(args::expand_legacy_flags(std::env::args_os()));

    // Logs go to stderr; stdout carries program output only.
    let filter = if cli.verbose { "debug" } else { "warn" };
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new(filter))
        .with_writer(std::io::stderr)
        .without_time()
        .finish();
    tracing::subscriber::set_global_default(subscriber).ok();

    match cli.command {
        None => commands::eval::run(&cli.eval),
        Some(Commands::Emit { source }) => commands::emit::run(&source),
        Some(Commands::Purge { config }) => commands::purge::run(&config),
        Some(Commands::Info { config }) => commands::info::run(&config),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use args::ModeArg;
    use clap::CommandFactory;
    use gosnip_driver::Mode;
    use std::path::PathBuf;
    use std::time::Duration;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_defaults() {
        let cli = Cli::try_parse_from(["gosnip", "-c", "3 + 2"]).unwrap();

        assert!(cli.command.is_none());
        assert!(!cli.verbose);
        assert_eq!(cli.eval.source.content.as_deref(), Some("3 + 2"));
        assert_eq!(cli.eval.source.mode, ModeArg::Fixed(Mode::AutoPrint));
        assert_eq!(cli.eval.source.libs, "fmt");
        assert!(!cli.eval.json);
        assert!(!cli.eval.config.keep);
    }

    #[test]
    fn test_eval_flags() {
        let cli = Cli::try_parse_from([
            "gosnip",
            "--file",
            "snippet.go",
            "--mode",
            "auto",
            "--libs",
            "strings, os",
            "--keep",
            "--timeout",
            "2",
            "--json",
            "-v",
        ])
        .unwrap();

        assert_eq!(cli.eval.source.file, Some(PathBuf::from("snippet.go")));
        assert_eq!(cli.eval.source.mode, ModeArg::Auto);
        assert_eq!(cli.eval.source.libraries(), vec!["strings", "os"]);
        assert!(cli.eval.config.keep);
        assert_eq!(cli.eval.config.timeout, Some(Duration::from_secs(2)));
        assert!(cli.eval.json);
        assert!(cli.verbose);
    }

    fn parse_legacy(argv: &[&str]) -> Cli {
        Cli::try_parse_from(args::expand_legacy_flags(argv.iter().copied())).unwrap()
    }

    #[test]
    fn test_single_dash_long_flags() {
        let cli = parse_legacy(&["gosnip", "-content", "3 + 2", "-libs", "strings, os"]);
        assert_eq!(cli.eval.source.content.as_deref(), Some("3 + 2"));
        assert_eq!(cli.eval.source.libraries(), vec!["strings", "os"]);

        let cli = parse_legacy(&["gosnip", "-content=3+2", "-libs=strings"]);
        assert_eq!(cli.eval.source.content.as_deref(), Some("3+2"));
        assert_eq!(cli.eval.source.libs, "strings");

        let cli = parse_legacy(&["gosnip", "-mode", "raw", "-file", "main.go"]);
        assert_eq!(cli.eval.source.mode, ModeArg::Fixed(Mode::Verbatim));
        assert_eq!(cli.eval.source.file, Some(PathBuf::from("main.go")));

        let cli = parse_legacy(&["gosnip", "emit", "-mode=normal", "-content", "func main() {}"]);
        match cli.command {
            Some(Commands::Emit { source }) => {
                assert_eq!(source.mode, ModeArg::Fixed(Mode::ProgramBody));
                assert_eq!(source.content.as_deref(), Some("func main() {}"));
            }
            _ => panic!("expected emit"),
        }
    }

    #[test]
    fn test_negative_literal_content() {
        let cli = Cli::try_parse_from(["gosnip", "-c", "-3 + 1"]).unwrap();
        assert_eq!(cli.eval.source.content.as_deref(), Some("-3 + 1"));
    }

    #[test]
    fn test_rejects_bad_values() {
        assert!(Cli::try_parse_from(["gosnip", "-m", "fancy", "-c", "1"]).is_err());
        assert!(Cli::try_parse_from(["gosnip", "--timeout", "0", "-c", "1"]).is_err());
    }

    #[test]
    fn test_subcommands() {
        let cli = Cli::try_parse_from(["gosnip", "emit", "-m", "raw", "-c", "package main"])
            .unwrap();
        match cli.command {
            Some(Commands::Emit { source }) => {
                assert_eq!(source.mode, ModeArg::Fixed(Mode::Verbatim));
            }
            _ => panic!("expected emit"),
        }

        let cli = Cli::try_parse_from(["gosnip", "purge", "--scratch-dir", "/tmp/x"]).unwrap();
        match cli.command {
            Some(Commands::Purge { config }) => {
                assert_eq!(config.scratch_dir, Some(PathBuf::from("/tmp/x")));
            }
            _ => panic!("expected purge"),
        }

        let cli = Cli::try_parse_from(["gosnip", "info", "-v"]).unwrap();
        assert!(matches!(cli.command, Some(Commands::Info { .. })));
        assert!(cli.verbose);
    }

    #[test]
    fn test_eval_flags_conflict_with_subcommands() {
        assert!(Cli::try_parse_from(["gosnip", "-c", "1", "purge"]).is_err());
    }
}
