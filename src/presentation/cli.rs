//! CLI Argument Parsing
//!
//! This module defines the CLI interface using clap.

use clap::Parser;

#[derive(clap::ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorWhen {
    Auto,
    Always,
    Never,
}

/// LazyDeploy - deploy only what changed since the last deploy
#[derive(Parser, Debug)]
#[command(name = "lazy")]
#[command(author, version, about, long_about = None)]
#[command(after_help = "The first run in a project only records the current commit.")]
pub struct Cli {
    /// Forget tracked files and register the current commit as the baseline
    #[arg(short, long)]
    pub reset: bool,

    /// Color output mode
    #[arg(long, value_enum)]
    pub color: Option<ColorWhen>,

    /// Verbosity level (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    /// Default tracing filter for the requested verbosity
    pub fn log_filter(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "info",
            _ => "debug",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parse_no_args() {
        let cli = Cli::try_parse_from(["lazy"]).unwrap();
        assert!(!cli.reset);
        assert_eq!(cli.verbose, 0);
        assert!(cli.color.is_none());
    }

    #[test]
    fn test_cli_parse_reset() {
        assert!(Cli::try_parse_from(["lazy", "-r"]).unwrap().reset);
        assert!(Cli::try_parse_from(["lazy", "--reset"]).unwrap().reset);
    }

    #[test]
    fn test_cli_parse_verbosity() {
        let cli = Cli::try_parse_from(["lazy", "-vv"]).unwrap();
        assert_eq!(cli.verbose, 2);
        assert_eq!(cli.log_filter(), "debug");
        assert_eq!(Cli::try_parse_from(["lazy"]).unwrap().log_filter(), "warn");
    }

    #[test]
    fn test_cli_parse_color() {
        let cli = Cli::try_parse_from(["lazy", "--color", "never"]).unwrap();
        assert_eq!(cli.color, Some(ColorWhen::Never));
    }

    #[test]
    fn test_cli_rejects_unknown_arguments() {
        let err = Cli::try_parse_from(["lazy", "deploy"]).unwrap_err();
        assert_eq!(err.exit_code(), 2);
        assert!(Cli::try_parse_from(["lazy", "--force"]).is_err());
    }
}
