//! # Console I/O
//!
//! The line-oriented prompt protocol, behind a trait so the interactive
//! flows can be driven by a script in tests.
//!
//! ```text
//! ┌──────────────────────┐        ┌──────────────────────────────────────┐
//! │  AuthGate / Ledger / │        │  TerminalConsole                     │
//! │  menu loops          │──dyn──►│   stdin/stdout, dialoguer password   │
//! │                      │Console │                                      │
//! │                      │        │  ScriptedConsole (tests only)        │
//! └──────────────────────┘        │   queued answers, captured output    │
//!                                 └──────────────────────────────────────┘
//! ```
//!
//! `Ok(None)` from a read means standard input is closed.

use dialoguer::Password;
use std::io::{self, BufRead, IsTerminal, Write};

/// Prompt/response channel to the operator.
pub trait Console {
    /// Prints `prompt` and reads one line, without its line terminator.
    fn read_line(&mut self, prompt: &str) -> io::Result<Option<String>>;

    /// Like `read_line`, but the typed text is not echoed.
    fn read_password(&mut self, prompt: &str) -> io::Result<Option<String>>;

    /// Prints one line of output.
    fn say(&mut self, message: &str) -> io::Result<()>;
}

/// The real terminal.
#[derive(Debug, Default)]
pub struct TerminalConsole;

impl TerminalConsole {
    pub fn new() -> Self {
        TerminalConsole
    }
}

impl Console for TerminalConsole {
    fn read_line(&mut self, prompt: &str) -> io::Result<Option<String>> {
        let mut stdout = io::stdout().lock();
        write!(stdout, "{prompt}")?;
        stdout.flush()?;

        let mut line = String::new();
        if io::stdin().lock().read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(strip_line_ending(line)))
    }

    fn read_password(&mut self, prompt: &str) -> io::Result<Option<String>> {
        // Piped input has no echo to suppress
        if !io::stdin().is_terminal() {
            return self.read_line(prompt);
        }

        let prompt = prompt.trim_end().trim_end_matches(':');
        Password::new()
            .with_prompt(prompt)
            .allow_empty_password(true)
            .interact()
            .map(Some)
            .map_err(io::Error::other)
    }

    fn say(&mut self, message: &str) -> io::Result<()> {
        writeln!(io::stdout().lock(), "{message}")
    }
}

fn strip_line_ending(mut line: String) -> String {
    if line.ends_with('\n') {
        line.pop();
        if line.ends_with('\r') {
            line.pop();
        }
    }
    line
}

// =============================================================================
// Scripted console (tests)
// =============================================================================

/// Replays queued answers and records everything printed.
#[cfg(test)]
#[derive(Debug, Default)]
pub struct ScriptedConsole {
    answers: std::collections::VecDeque<String>,
    pub output: Vec<String>,
    pub password_prompts: usize,
}

#[cfg(test)]
impl ScriptedConsole {
    pub fn new(answers: &[&str]) -> Self {
        ScriptedConsole {
            answers: answers.iter().map(|a| a.to_string()).collect(),
            ..Default::default()
        }
    }

    /// All printed lines joined with newlines.
    pub fn transcript(&self) -> String {
        self.output.join("\n")
    }

    /// Answers not consumed yet.
    pub fn remaining(&self) -> usize {
        self.answers.len()
    }
}

#[cfg(test)]
impl Console for ScriptedConsole {
    fn read_line(&mut self, prompt: &str) -> io::Result<Option<String>> {
        self.output.push(prompt.to_string());
        Ok(self.answers.pop_front())
    }

    fn read_password(&mut self, prompt: &str) -> io::Result<Option<String>> {
        self.password_prompts += 1;
        self.read_line(prompt)
    }

    fn say(&mut self, message: &str) -> io::Result<()> {
        self.output.push(message.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_line_ending() {
        assert_eq!(strip_line_ending("abc\n".to_string()), "abc");
        assert_eq!(strip_line_ending("abc\r\n".to_string()), "abc");
        assert_eq!(strip_line_ending("abc".to_string()), "abc");
        assert_eq!(strip_line_ending(" a b \n".to_string()), " a b ");
    }

    #[test]
    fn test_scripted_console() {
        let mut console = ScriptedConsole::new(&["one", "secret"]);
        assert_eq!(console.read_line("> ").unwrap().as_deref(), Some("one"));
        assert_eq!(console.read_password("pw: ").unwrap().as_deref(), Some("secret"));
        assert_eq!(console.read_line("> ").unwrap(), None);
        console.say("done").unwrap();

        assert_eq!(console.password_prompts, 1);
        assert_eq!(console.remaining(), 0);
        assert!(console.transcript().ends_with("done"));
    }
}
