//! Parser for the shell language.
//!
//! Converts a token vector into a pipeline of command records. The parser is
//! total: malformed input yields an empty pipeline or a best-effort one,
//! never an error.

use std::path::PathBuf;

use crate::ast::{Command, Pipeline};
use crate::lexer;

/// Parse a token sequence into a pipeline.
///
/// Tokens equal to `|` split the sequence into stages; within a stage, `<`,
/// `>` and `>>` capture the following token as a redirection target and
/// everything else becomes an argument. A stage with no arguments is
/// discarded together with any redirections attached to it.
pub fn parse(tokens: &[String]) -> Pipeline {
    let mut pipeline = Pipeline::new();

    for segment in tokens.split(|t| t == "|") {
        let mut cmd = Command::new();
        let mut iter = segment.iter();

        while let Some(token) = iter.next() {
            match token.as_str() {
                ">" => {
                    // A dangling operator clears the target; a later `>`
                    // also drops any append mode a previous `>>` set.
                    cmd.stdout_path = iter.next().map(PathBuf::from);
                    cmd.stdout_append = false;
                }
                ">>" => match iter.next() {
                    Some(target) => {
                        cmd.stdout_path = Some(PathBuf::from(target));
                        cmd.stdout_append = true;
                    }
                    None => cmd.stdout_path = None,
                },
                "<" => {
                    cmd.stdin_path = iter.next().map(PathBuf::from);
                }
                _ => cmd.args.push(token.clone()),
            }
        }

        if !cmd.args.is_empty() {
            pipeline.push(cmd);
        }
    }

    pipeline
}

/// Convenience function to tokenize and parse a line in one step.
pub fn parse_line(input: &str) -> Pipeline {
    parse(&lexer::tokenize(input))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple_command() {
        let pipeline = parse_line("ls -la");
        assert_eq!(pipeline.len(), 1);
        assert_eq!(pipeline[0].args, vec!["ls", "-la"]);
        assert_eq!(pipeline[0].stdin_path, None);
        assert_eq!(pipeline[0].stdout_path, None);
    }

    #[test]
    fn test_pipeline_split() {
        let pipeline = parse_line("ls | grep foo | wc -l");
        assert_eq!(pipeline.len(), 3);
        assert_eq!(pipeline[0].args, vec!["ls"]);
        assert_eq!(pipeline[1].args, vec!["grep", "foo"]);
        assert_eq!(pipeline[2].args, vec!["wc", "-l"]);
    }

    #[test]
    fn test_output_redirect() {
        let pipeline = parse_line("echo hello > out.txt");
        assert_eq!(pipeline[0].args, vec!["echo", "hello"]);
        assert_eq!(pipeline[0].stdout_path, Some(PathBuf::from("out.txt")));
        assert!(!pipeline[0].stdout_append);
    }

    #[test]
    fn test_append_redirect() {
        let pipeline = parse_line("echo hello >> out.txt");
        assert_eq!(pipeline[0].stdout_path, Some(PathBuf::from("out.txt")));
        assert!(pipeline[0].stdout_append);
    }

    #[test]
    fn test_input_redirect() {
        let pipeline = parse_line("wc -c < in.txt");
        assert_eq!(pipeline[0].args, vec!["wc", "-c"]);
        assert_eq!(pipeline[0].stdin_path, Some(PathBuf::from("in.txt")));
    }

    #[test]
    fn test_redirects_on_inner_stages_accepted() {
        // The executor lets the pipes win; the parser just records them.
        let pipeline = parse_line("cat < a | sort > b | uniq");
        assert_eq!(pipeline.len(), 3);
        assert_eq!(pipeline[0].stdin_path, Some(PathBuf::from("a")));
        assert_eq!(pipeline[1].stdout_path, Some(PathBuf::from("b")));
    }

    #[test]
    fn test_dangling_operator_clears_target() {
        let pipeline = parse_line("echo hi > out >");
        assert_eq!(pipeline[0].args, vec!["echo", "hi"]);
        assert_eq!(pipeline[0].stdout_path, None);

        let pipeline = parse_line("cat < in <");
        assert_eq!(pipeline[0].stdin_path, None);
    }

    #[test]
    fn test_repeated_redirect_overwrites() {
        let pipeline = parse_line("echo hi > a > b");
        assert_eq!(pipeline[0].stdout_path, Some(PathBuf::from("b")));
        assert!(!pipeline[0].stdout_append);
    }

    #[test]
    fn test_overwrite_after_append_clears_mode() {
        let pipeline = parse_line("echo hi >> a > b");
        assert_eq!(pipeline[0].stdout_path, Some(PathBuf::from("b")));
        assert!(!pipeline[0].stdout_append);
    }

    #[test]
    fn test_empty_input() {
        assert!(parse_line("").is_empty());
        assert!(parse_line("   ").is_empty());
    }

    #[test]
    fn test_empty_segments_discarded() {
        assert!(parse_line("|").is_empty());
        let pipeline = parse_line("ls | | wc");
        assert_eq!(pipeline.len(), 2);
        assert_eq!(pipeline[0].args, vec!["ls"]);
        assert_eq!(pipeline[1].args, vec!["wc"]);
    }

    #[test]
    fn test_redirect_only_segment_discarded() {
        assert!(parse_line("> out").is_empty());
        let pipeline = parse_line("ls | > out");
        assert_eq!(pipeline.len(), 1);
        assert_eq!(pipeline[0].args, vec!["ls"]);
    }

    #[test]
    fn test_no_stage_without_args() {
        for line in ["", "|", "> x", "< y | >> z", "a | b | c", "\"\""] {
            for cmd in parse_line(line) {
                assert!(!cmd.args.is_empty());
            }
        }
    }
}
