//! Pipeline execution.
//!
//! Forks one child per stage, wires the stages together with anonymous
//! pipes, applies redirections in the children, and waits for completion.
//! The single load-bearing invariant is descriptor hygiene: every pipe end
//! is closed in the parent and in every child that does not need it, or the
//! readers never see EOF.

use std::fmt::Display;
use std::fs::{File, OpenOptions};
use std::io;
use std::os::unix::fs::OpenOptionsExt;
use std::os::unix::io::AsRawFd;
use std::path::Path;

use thiserror::Error;

use crate::ast::Command;
use crate::posix::{self, ExitStatus};
use crate::resolver;

/// Parent-side failures. Everything that goes wrong after a successful fork
/// is reported by the child itself: a message on stderr and exit status 1.
#[derive(Debug, Error)]
pub enum ExecError {
    #[error("cannot create pipe: {0}")]
    Pipe(#[source] io::Error),
    #[error("cannot fork: {0}")]
    Fork(#[source] io::Error),
}

/// Run a pipeline and return its exit status.
///
/// Foreground: waits for every stage in spawn order and returns the last
/// stage's status; a stage that was signaled or could not be awaited counts
/// as 1. Background: returns 0 immediately. Background children are launched
/// and forgotten — no job table and no reaping, so they stay zombies until
/// the shell exits.
pub fn run_pipeline(pipeline: &[Command], background: bool) -> Result<i32, ExecError> {
    let n = pipeline.len();
    if n == 0 {
        return Ok(0);
    }

    let mut pipes = Vec::with_capacity(n - 1);
    for _ in 1..n {
        pipes.push(posix::pipe().map_err(ExecError::Pipe)?);
    }

    let mut pids = Vec::with_capacity(n);
    for (i, cmd) in pipeline.iter().enumerate() {
        match posix::fork().map_err(ExecError::Fork)? {
            0 => run_child(i, cmd, &pipes),
            pid => {
                log::debug!("spawned `{}` (pid {})", cmd, pid);
                pids.push(pid);
            }
        }
    }

    // Every pipe end now lives only in the children.
    drop(pipes);

    if background {
        log::debug!("background pipeline, not waiting on {:?}", pids);
        return Ok(0);
    }

    let mut statuses = Vec::with_capacity(pids.len());
    for pid in pids {
        let status = match posix::waitpid(pid) {
            Ok((_, ExitStatus::Exited(code))) => code as i32,
            Ok((_, other)) => {
                log::debug!("pid {} did not exit normally: {:?}", pid, other);
                1
            }
            Err(err) => {
                log::debug!("waitpid({}) failed: {}", pid, err);
                1
            }
        };
        statuses.push(status);
    }

    Ok(statuses.last().copied().unwrap_or(0))
}

/// Child side: rewire stdin/stdout, release every pipe end, exec.
///
/// The wiring order makes the pipes win: file redirections are only
/// considered on the first stage's stdin and the last stage's stdout, so an
/// inner stage's recorded paths are never opened.
fn run_child(i: usize, cmd: &Command, pipes: &[(File, File)]) -> ! {
    let last = pipes.len(); // n - 1

    // Stdin wiring.
    if i == 0 {
        if let Some(path) = &cmd.stdin_path {
            match File::open(path) {
                Ok(file) => redirect_fd(file, 0, path),
                Err(_) => command_not_found(path.display()),
            }
        }
    } else {
        let _ = posix::dup2(pipes[i - 1].0.as_raw_fd(), 0);
    }

    // Stdout wiring, symmetric.
    if i == last {
        if let Some(path) = &cmd.stdout_path {
            match open_output(path, cmd.stdout_append) {
                Ok(file) => redirect_fd(file, 1, path),
                Err(_) => command_not_found(path.display()),
            }
        }
    } else {
        let _ = posix::dup2(pipes[i].1.as_raw_fd(), 1);
    }

    // Close both ends of every pipe, errors ignored: descriptors that served
    // as a dup2 source above are already duplicated where they belong.
    for (read, write) in pipes {
        posix::close(read.as_raw_fd());
        posix::close(write.as_raw_fd());
    }

    let program = cmd.program();
    let Some(path) = resolver::resolve(program) else {
        command_not_found(program);
    };
    let _ = posix::execv(&path, &cmd.args);
    command_not_found(program);
}

/// Duplicate an opened file onto a standard descriptor; failure is reported
/// like the open failing. Dropping the file closes the original descriptor.
fn redirect_fd(file: File, target: i32, path: &Path) {
    if posix::dup2(file.as_raw_fd(), target).is_err() {
        command_not_found(path.display());
    }
}

fn open_output(path: &Path, append: bool) -> io::Result<File> {
    OpenOptions::new()
        .write(true)
        .create(true)
        .append(append)
        .truncate(!append)
        .mode(0o666)
        .open(path)
}

fn command_not_found(name: impl Display) -> ! {
    eprintln!("{}: command not found", name);
    posix::_exit(1);
}
