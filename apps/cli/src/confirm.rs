use crate::error::CliResult;
use anyhow::Context;
use std::io::{self, BufRead, Write};

/// Asks the user before anything is sent that changes state on the exchange
pub trait Prompt {
    fn confirm(&self, question: &str) -> CliResult<bool>;
}

/// Reads the answer from stdin; only `y` or `Y` proceeds
pub struct StdinPrompt;

impl Prompt for StdinPrompt {
    fn confirm(&self, question: &str) -> CliResult<bool> {
        print!("{} [y/N] ", question);
        io::stdout().flush().context("Failed to write prompt")?;

        let mut input = String::new();
        io::stdin()
            .lock()
            .read_line(&mut input)
            .context("Failed to read confirmation")?;
        Ok(is_yes(&input))
    }
}

/// Used with `-y/--yes`
pub struct AssumeYes;

impl Prompt for AssumeYes {
    fn confirm(&self, _question: &str) -> CliResult<bool> {
        Ok(true)
    }
}

pub fn is_yes(answer: &str) -> bool {
    answer.trim().eq_ignore_ascii_case("y")
}
