//! The shell driver.
//!
//! Owns the read-eval-print loop: prompt, line reading, the trailing-`&`
//! background flag, builtin dispatch, and exit-status reporting. Everything
//! between reading a line and spawning processes is delegated to the parser
//! and the executor.

use std::env;
use std::io::{self, BufRead, ErrorKind, Write};
use std::path::Path;

use anyhow::Context;

use crate::builtins::Builtins;
use crate::executor;
use crate::parser;

/// The main shell struct.
pub struct Shell {
    /// Built-in commands handler
    builtins: Builtins,
    /// Whether the shell should exit
    should_exit: bool,
    /// Exit code to return
    exit_code: i32,
}

impl Shell {
    pub fn new() -> Self {
        Self {
            builtins: Builtins::new(),
            should_exit: false,
            exit_code: 0,
        }
    }

    /// Run the interactive read-eval-print loop.
    pub fn run(&mut self) -> i32 {
        let interactive = atty::is(atty::Stream::Stdin);
        let stdin = io::stdin();
        let mut reader = stdin.lock();

        loop {
            if interactive {
                self.show_prompt();
            }

            let mut input = String::new();
            match reader.read_line(&mut input) {
                Ok(0) => break, // EOF
                Ok(_) => {
                    self.execute_line(&input);
                    if self.should_exit {
                        break;
                    }
                }
                Err(err) if err.kind() == ErrorKind::Interrupted => {
                    println!();
                    continue;
                }
                Err(err) => {
                    eprintln!("psh: error reading input: {}", err);
                    break;
                }
            }
        }

        self.exit_code
    }

    /// Execute a single line of input and return its status.
    pub fn execute_line(&mut self, input: &str) -> i32 {
        let mut line = input.trim();

        // Exactly one trailing `&` marks the pipeline as background; any
        // earlier `&` stays an ordinary word.
        let mut background = false;
        if let Some(stripped) = line.strip_suffix('&') {
            background = true;
            line = stripped.trim_end();
        }

        let pipeline = parser::parse_line(line);
        if pipeline.is_empty() {
            return 0;
        }
        log::trace!("parsed: {:?}, background: {}", pipeline, background);

        // Builtins bypass the executor, but only outside pipelines.
        if pipeline.len() == 1 {
            let cmd = &pipeline[0];
            if self.builtins.is_builtin(cmd.program()) {
                let result = self.builtins.execute(cmd.program(), &cmd.args[1..]);
                if let Some(error) = &result.error {
                    eprint!("{}", error);
                }
                if result.should_exit {
                    self.should_exit = true;
                    self.exit_code = result.status;
                }
                return result.status;
            }
        }

        match executor::run_pipeline(&pipeline, background) {
            Ok(status) => {
                if !background && status != 0 {
                    eprintln!("Program terminated with exit code {}.", status);
                }
                status
            }
            Err(err) => {
                eprintln!("psh: {}", err);
                1
            }
        }
    }

    /// Execute a command string line by line (the `-c` mode).
    pub fn execute_command(&mut self, command: &str) -> i32 {
        let mut last_status = 0;

        for line in command.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            last_status = self.execute_line(line);
            if self.should_exit {
                break;
            }
        }

        last_status
    }

    /// Execute a script file.
    pub fn execute_script(&mut self, path: &Path) -> anyhow::Result<i32> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("cannot read script {}", path.display()))?;
        Ok(self.execute_command(&content))
    }

    /// Check if shell should exit.
    pub fn should_exit(&self) -> bool {
        self.should_exit
    }

    /// Get exit code.
    pub fn exit_code(&self) -> i32 {
        self.exit_code
    }

    fn show_prompt(&self) {
        print!("{}", get_prompt());
        let _ = io::stdout().flush();
    }
}

impl Default for Shell {
    fn default() -> Self {
        Self::new()
    }
}

/// The prompt string: `PS1` when set, `"$ "` otherwise.
pub fn get_prompt() -> String {
    env::var("PS1").unwrap_or_else(|_| "$ ".to_string())
}
