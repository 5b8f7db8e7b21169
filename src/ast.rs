//! Data model for parsed command lines.
//!
//! Defines the per-stage command record produced by the parser and consumed
//! by the executor.

use std::fmt;
use std::path::PathBuf;

/// One stage of a pipeline: a program invocation with optional redirections.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Command {
    /// Argument vector; `args[0]` is the program name. Never empty in a
    /// parser-produced command.
    pub args: Vec<String>,
    /// Input redirection target. Overridden by the upstream pipe on any
    /// stage other than the first.
    pub stdin_path: Option<PathBuf>,
    /// Output redirection target. Overridden by the downstream pipe on any
    /// stage other than the last.
    pub stdout_path: Option<PathBuf>,
    /// Append instead of truncate; meaningful only when `stdout_path` is set.
    pub stdout_append: bool,
}

impl Command {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_args<I, S>(args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            args: args.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    /// The program name, i.e. `args[0]`.
    pub fn program(&self) -> &str {
        &self.args[0]
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.args.join(" "))?;
        if let Some(path) = &self.stdin_path {
            write!(f, " < {}", path.display())?;
        }
        if let Some(path) = &self.stdout_path {
            let op = if self.stdout_append { ">>" } else { ">" };
            write!(f, " {} {}", op, path.display())?;
        }
        Ok(())
    }
}

/// An ordered sequence of stages connected by pipes. The background flag is
/// not part of the pipeline; the driver carries it separately.
pub type Pipeline = Vec<Command>;
