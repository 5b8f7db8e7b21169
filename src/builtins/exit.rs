//! exit - Terminate the shell.

use crate::builtins::BuiltinResult;

/// Always exits with status 0; extra arguments are ignored.
pub fn execute(_args: &[String]) -> BuiltinResult {
    BuiltinResult::exit(0)
}
