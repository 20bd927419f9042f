use std::io::{self, BufRead, Write};

use crate::utils::error::{AppError, AppResult};

/// Radbaserad fråga/svar mot operatören
pub trait Console {
    /// Visa `prompt` och läs en rad. Stängd inmatning ger `InputClosed`.
    fn read_line(&mut self, prompt: &str) -> AppResult<String>;

    fn say(&mut self, line: &str);
}

/// Terminal via stdin/stdout
#[derive(Default)]
pub struct StdConsole;

impl StdConsole {
    pub fn new() -> Self {
        Self
    }
}

impl Console for StdConsole {
    fn read_line(&mut self, prompt: &str) -> AppResult<String> {
        let mut stdout = io::stdout();
        write!(stdout, "{}", prompt)?;
        stdout.flush()?;

        let mut buf = String::new();
        if io::stdin().lock().read_line(&mut buf)? == 0 {
            return Err(AppError::InputClosed);
        }

        Ok(buf.trim_end_matches(['\r', '\n']).to_string())
    }

    fn say(&mut self, line: &str) {
        println!("{}", line);
    }
}

/// Förinspelade svar för tester
#[cfg(test)]
pub struct ScriptedConsole {
    answers: std::collections::VecDeque<String>,
    pub prompts: Vec<String>,
    pub output: Vec<String>,
}

#[cfg(test)]
impl ScriptedConsole {
    pub fn new(answers: &[&str]) -> Self {
        Self {
            answers: answers.iter().map(|s| s.to_string()).collect(),
            prompts: Vec::new(),
            output: Vec::new(),
        }
    }

    pub fn remaining(&self) -> usize {
        self.answers.len()
    }

    pub fn said(&self, needle: &str) -> bool {
        self.output.iter().any(|line| line.contains(needle))
    }
}

#[cfg(test)]
impl Console for ScriptedConsole {
    fn read_line(&mut self, prompt: &str) -> AppResult<String> {
        self.prompts.push(prompt.to_string());
        self.answers.pop_front().ok_or(AppError::InputClosed)
    }

    fn say(&mut self, line: &str) {
        self.output.push(line.to_string());
    }
}
