//! Executable resolution.
//!
//! Turns a program name into the path handed to `execv`. A name containing
//! `/` is taken as a path and checked directly; anything else is looked up
//! in the directories of `PATH`, first hit wins. The lookup is pure: no
//! caching across invocations.

use std::env;
use std::ffi::OsStr;
use std::path::{Path, PathBuf};

use crate::posix;

/// Resolve a program name against the current environment.
pub fn resolve(name: &str) -> Option<PathBuf> {
    if name.contains('/') {
        let path = Path::new(name);
        if is_executable_file(path) {
            return Some(path.to_path_buf());
        }
        return None;
    }

    // Unset PATH searches no directories at all.
    let path_var = env::var_os("PATH").unwrap_or_default();
    search_path(name, &path_var)
}

/// Walk the directories of a `PATH`-style value in order, skipping empty
/// entries, and return the first executable regular file named `name`.
pub fn search_path(name: &str, path_var: &OsStr) -> Option<PathBuf> {
    env::split_paths(path_var)
        .filter(|dir| !dir.as_os_str().is_empty())
        .map(|dir| dir.join(name))
        .find(|candidate| is_executable_file(candidate))
}

fn is_executable_file(path: &Path) -> bool {
    path.is_file() && posix::is_executable(path)
}
