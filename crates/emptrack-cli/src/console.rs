//! Line-based terminal prompter.
//!
//! Questions are written to the output, answers read one line at a time.
//! Choices are numbered; the user types a number (or several, comma
//! separated, for multi-select). End of input closes the session.

use std::fmt::Display;
use std::io::{ErrorKind, Write};

use async_trait::async_trait;
use crossterm::style::Stylize;
use emptrack_control::{PromptError, Prompter, Table, Tone};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, Lines};

use crate::table;

/// A [`Prompter`] over a line reader and a writer.
pub struct ConsolePrompter<R, W> {
    lines: Lines<R>,
    out: W,
}

impl<R, W> ConsolePrompter<R, W>
where
    R: AsyncBufRead + Unpin + Send,
    W: Write + Send,
{
    /// Create a prompter reading answers from `input` and writing to `out`.
    pub fn new(input: R, out: W) -> Self {
        Self {
            lines: input.lines(),
            out,
        }
    }

    fn emit(&mut self, text: impl Display) {
        if let Err(err) = writeln!(self.out, "{text}") {
            tracing::warn!(error = %err, "Failed to write to terminal");
        }
    }

    /// A line that is not valid UTF-8 is dropped and the prompt shown again.
    async fn ask_line(&mut self, prompt: impl Display) -> Result<String, PromptError> {
        loop {
            write!(self.out, "{} {prompt} ", "?".green().bold())?;
            self.out.flush()?;
            match self.lines.next_line().await {
                Ok(line) => return line.ok_or(PromptError::Closed),
                Err(err) if err.kind() == ErrorKind::InvalidData => {
                    tracing::debug!(error = %err, "Discarding unreadable input line");
                    self.emit("Could not read that answer, please type it again.".yellow());
                }
                Err(err) => return Err(err.into()),
            }
        }
    }

    fn list_choices(&mut self, choices: &[&str]) {
        for (i, choice) in choices.iter().enumerate() {
            self.emit(format!("  {}) {choice}", i + 1));
        }
    }
}

/// Parse a 1-based choice number.
fn parse_choice(answer: &str, count: usize) -> Option<usize> {
    let n: usize = answer.trim().parse().ok()?;
    (1..=count).contains(&n).then(|| n - 1)
}

/// Parse comma-separated 1-based choice numbers; empty means none.
fn parse_choices(answer: &str, count: usize) -> Option<Vec<usize>> {
    let mut picked = answer
        .split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(|part| parse_choice(part, count))
        .collect::<Option<Vec<_>>>()?;
    picked.sort_unstable();
    picked.dedup();
    Some(picked)
}

fn parse_yes_no(answer: &str, default: bool) -> Option<bool> {
    match answer.trim().to_ascii_lowercase().as_str() {
        "" => Some(default),
        "y" | "yes" => Some(true),
        "n" | "no" => Some(false),
        _ => None,
    }
}

#[async_trait]
impl<R, W> Prompter for ConsolePrompter<R, W>
where
    R: AsyncBufRead + Unpin + Send,
    W: Write + Send,
{
    async fn input(&mut self, message: &str) -> Result<String, PromptError> {
        self.ask_line(message.bold()).await
    }

    async fn confirm(&mut self, message: &str, default: bool) -> Result<bool, PromptError> {
        let hint = if default { "(Y/n)" } else { "(y/N)" };
        loop {
            let answer = self
                .ask_line(format!("{} {}", message.bold(), hint.dark_grey()))
                .await?;
            if let Some(yes) = parse_yes_no(&answer, default) {
                return Ok(yes);
            }
            self.emit("Please answer y or n.".yellow());
        }
    }

    async fn select(&mut self, message: &str, choices: &[&str]) -> Result<usize, PromptError> {
        loop {
            self.emit(message.bold());
            self.list_choices(choices);
            let answer = self.ask_line(format!("Choose 1-{}:", choices.len())).await?;
            if let Some(index) = parse_choice(&answer, choices.len()) {
                return Ok(index);
            }
            self.emit(format!("Please enter a number between 1 and {}.", choices.len()).yellow());
        }
    }

    async fn multi_select(
        &mut self,
        message: &str,
        choices: &[&str],
    ) -> Result<Vec<usize>, PromptError> {
        loop {
            self.emit(message.bold());
            self.list_choices(choices);
            let answer = self
                .ask_line("Choose numbers separated by commas (Enter for none):")
                .await?;
            if let Some(picked) = parse_choices(&answer, choices.len()) {
                return Ok(picked);
            }
            self.emit(format!("Please enter numbers between 1 and {}.", choices.len()).yellow());
        }
    }

    fn notify(&mut self, tone: Tone, message: &str) {
        match tone {
            Tone::Info => self.emit(message),
            Tone::Success => self.emit(message.green()),
            Tone::Warning => self.emit(message.yellow()),
            Tone::Error => self.emit(message.red()),
        }
    }

    fn table(&mut self, table: &Table) {
        self.emit(table::render(table));
    }
}
