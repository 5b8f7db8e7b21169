//! CLI argument parsing.
//!
//! Supports:
//! - `-c` / `--command`: Execute a command string and exit
//! - Positional script argument: Execute a script file and exit
//!
//! With neither, the shell runs its interactive loop.

use clap::Parser;
use std::path::PathBuf;

/// psh - Small POSIX command-line interpreter
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct CliArgs {
    /// Command string to execute instead of reading from stdin
    #[arg(short = 'c', long = "command")]
    pub command: Option<String>,

    /// Script file to execute
    #[arg(index = 1, conflicts_with = "command")]
    pub script: Option<PathBuf>,
}

impl CliArgs {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_args_means_interactive() {
        let args = CliArgs::parse_from(["psh"]);
        assert!(args.command.is_none());
        assert!(args.script.is_none());
    }

    #[test]
    fn test_command_string() {
        let args = CliArgs::parse_from(["psh", "-c", "echo hi"]);
        assert_eq!(args.command.as_deref(), Some("echo hi"));
    }

    #[test]
    fn test_script_positional() {
        let args = CliArgs::parse_from(["psh", "setup.sh"]);
        assert_eq!(args.script, Some(PathBuf::from("setup.sh")));
    }

    #[test]
    fn test_command_and_script_conflict() {
        assert!(CliArgs::try_parse_from(["psh", "-c", "echo", "file.sh"]).is_err());
    }
}
