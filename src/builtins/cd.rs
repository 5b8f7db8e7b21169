//! cd - Change the shell's working directory.

use std::env;

use crate::builtins::BuiltinResult;

/// Change directory to the first argument, or to `$HOME` when none is
/// given, or to `/` when `HOME` is unset too.
pub fn execute(args: &[String]) -> BuiltinResult {
    let target = match args.first() {
        Some(dir) => dir.clone(),
        None => env::var("HOME").unwrap_or_else(|_| "/".to_string()),
    };

    match env::set_current_dir(&target) {
        Ok(()) => BuiltinResult::success(),
        Err(err) => BuiltinResult::failure(1, format!("cd: {}: {}\n", target, err)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cd_changes_parent_directory() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().canonicalize().unwrap();
        let previous = env::current_dir().unwrap();

        let result = execute(&[target.to_str().unwrap().to_string()]);
        assert_eq!(result.status, 0);
        assert!(result.error.is_none());
        assert_eq!(env::current_dir().unwrap(), target);

        env::set_current_dir(previous).unwrap();
    }

    #[test]
    fn test_cd_failure_reports_and_continues() {
        let result = execute(&["/nonexistent/target/dir".to_string()]);
        assert_eq!(result.status, 1);
        assert!(result.error.unwrap().starts_with("cd: /nonexistent/target/dir:"));
        assert!(!result.should_exit);
    }
}
