//! The terminal seam.
//!
//! Flows ask questions and print results only through [`Prompter`], so the same
//! controller runs against a real console or a scripted one in tests.

use async_trait::async_trait;
use thiserror::Error;

/// Errors raised by a prompter.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PromptError {
    /// Input ended (EOF or interrupt). The session stops normally.
    #[error("input closed")]
    Closed,

    /// Reading or writing the terminal failed.
    #[error("terminal I/O failed: {0}")]
    Io(String),
}

impl From<std::io::Error> for PromptError {
    fn from(err: std::io::Error) -> Self {
        match err.kind() {
            std::io::ErrorKind::UnexpectedEof | std::io::ErrorKind::Interrupted => Self::Closed,
            _ => Self::Io(err.to_string()),
        }
    }
}

/// How a notice should be presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    /// Neutral information.
    Info,
    /// An operation completed.
    Success,
    /// An answer was rejected; the question will be asked again.
    Warning,
    /// An operation failed.
    Error,
}

/// A titled grid of already-formatted cells.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table {
    /// Caption printed above the grid.
    pub title: String,
    /// Column headers.
    pub headers: Vec<String>,
    /// Rows; each has one cell per header.
    pub rows: Vec<Vec<String>>,
}

impl Table {
    /// Create an empty table with the given caption and headers.
    #[must_use]
    pub fn new(title: impl Into<String>, headers: &[&str]) -> Self {
        Self {
            title: title.into(),
            headers: headers.iter().map(ToString::to_string).collect(),
            rows: Vec::new(),
        }
    }

    /// Append a row.
    pub fn push_row(&mut self, cells: Vec<String>) {
        debug_assert_eq!(cells.len(), self.headers.len());
        self.rows.push(cells);
    }
}

/// Interactive input and output for one session.
///
/// Only one call is ever in flight; each `await` suspends the flow until the
/// user answers.
#[async_trait]
pub trait Prompter: Send {
    /// Ask for a line of free text. The raw answer is returned untrimmed.
    async fn input(&mut self, message: &str) -> Result<String, PromptError>;

    /// Ask a yes/no question.
    async fn confirm(&mut self, message: &str, default: bool) -> Result<bool, PromptError>;

    /// Ask the user to pick exactly one choice; returns its index.
    async fn select(&mut self, message: &str, choices: &[&str]) -> Result<usize, PromptError>;

    /// Ask the user to pick any number of choices; returns their indices in
    /// ascending order.
    async fn multi_select(
        &mut self,
        message: &str,
        choices: &[&str],
    ) -> Result<Vec<usize>, PromptError>;

    /// Show a one-line message.
    fn notify(&mut self, tone: Tone, message: &str);

    /// Show a table.
    fn table(&mut self, table: &Table);
}

#[cfg(any(test, feature = "test-utils"))]
pub use scripted::{ScriptedPrompter, Transcript};

#[cfg(any(test, feature = "test-utils"))]
mod scripted {
    use std::collections::VecDeque;

    use async_trait::async_trait;

    use super::{PromptError, Prompter, Table, Tone};

    /// Something the session showed or asked.
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub enum Transcript {
        /// A question was asked.
        Asked(String),
        /// A notice was shown.
        Notice(Tone, String),
        /// A table was shown.
        Table(Table),
    }

    /// A prompter that replays canned answers.
    ///
    /// Every answer is a string: free text for `input`, `"y"`/`"n"` for
    /// `confirm`, the choice label for `select`, and comma-separated labels for
    /// `multi_select`. When the script runs out, the next question fails with
    /// `PromptError::Closed`, which ends the session.
    #[derive(Debug, Default)]
    pub struct ScriptedPrompter {
        answers: VecDeque<String>,
        transcript: Vec<Transcript>,
    }

    impl ScriptedPrompter {
        /// Create a prompter with the given answers.
        #[must_use]
        pub fn new<I, A>(answers: I) -> Self
        where
            I: IntoIterator<Item = A>,
            A: Into<String>,
        {
            Self {
                answers: answers.into_iter().map(Into::into).collect(),
                transcript: Vec::new(),
            }
        }

        /// Everything shown or asked so far.
        #[must_use]
        pub fn transcript(&self) -> &[Transcript] {
            &self.transcript
        }

        /// Questions asked, in order.
        #[must_use]
        pub fn asked(&self) -> Vec<&str> {
            self.transcript
                .iter()
                .filter_map(|t| match t {
                    Transcript::Asked(q) => Some(q.as_str()),
                    _ => None,
                })
                .collect()
        }

        /// Notices of the given tone, in order.
        #[must_use]
        pub fn notices(&self, tone: Tone) -> Vec<&str> {
            self.transcript
                .iter()
                .filter_map(|t| match t {
                    Transcript::Notice(shown, message) if *shown == tone => Some(message.as_str()),
                    _ => None,
                })
                .collect()
        }

        /// Tables shown, in order.
        #[must_use]
        pub fn tables(&self) -> Vec<&Table> {
            self.transcript
                .iter()
                .filter_map(|t| match t {
                    Transcript::Table(table) => Some(table),
                    _ => None,
                })
                .collect()
        }

        /// Answers not yet consumed.
        #[must_use]
        pub fn remaining(&self) -> usize {
            self.answers.len()
        }

        fn next(&mut self, message: &str) -> Result<String, PromptError> {
            self.transcript.push(Transcript::Asked(message.to_string()));
            self.answers.pop_front().ok_or(PromptError::Closed)
        }

        fn index_of(message: &str, choices: &[&str], label: &str) -> usize {
            choices
                .iter()
                .position(|c| *c == label)
                .unwrap_or_else(|| panic!("{message:?}: no choice {label:?} in {choices:?}"))
        }
    }

    #[async_trait]
    impl Prompter for ScriptedPrompter {
        async fn input(&mut self, message: &str) -> Result<String, PromptError> {
            self.next(message)
        }

        async fn confirm(&mut self, message: &str, _default: bool) -> Result<bool, PromptError> {
            let answer = self.next(message)?;
            match answer.as_str() {
                "y" => Ok(true),
                "n" => Ok(false),
                other => panic!("{message:?}: expected \"y\" or \"n\", got {other:?}"),
            }
        }

        async fn select(&mut self, message: &str, choices: &[&str]) -> Result<usize, PromptError> {
            let answer = self.next(message)?;
            Ok(Self::index_of(message, choices, &answer))
        }

        async fn multi_select(
            &mut self,
            message: &str,
            choices: &[&str],
        ) -> Result<Vec<usize>, PromptError> {
            let answer = self.next(message)?;
            let mut picked: Vec<usize> = answer
                .split(',')
                .map(str::trim)
                .filter(|label| !label.is_empty())
                .map(|label| Self::index_of(message, choices, label))
                .collect();
            picked.sort_unstable();
            picked.dedup();
            Ok(picked)
        }

        fn notify(&mut self, tone: Tone, message: &str) {
            self.transcript
                .push(Transcript::Notice(tone, message.to_string()));
        }

        fn table(&mut self, table: &Table) {
            self.transcript.push(Transcript::Table(table.clone()));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn scripted_answers_in_order() {
        let mut prompter = ScriptedPrompter::new(["Ada", "y", "Entry", "Name, Salary"]);

        assert_eq!(prompter.input("First name?").await.unwrap(), "Ada");
        assert!(prompter.confirm("Sure?", false).await.unwrap());
        assert_eq!(
            prompter.select("Mode?", &["View", "Entry"]).await.unwrap(),
            1
        );
        assert_eq!(
            prompter
                .multi_select("Fields?", &["Salary", "Title", "Name"])
                .await
                .unwrap(),
            vec![0, 2]
        );
        assert_eq!(prompter.asked(), vec!["First name?", "Sure?", "Mode?", "Fields?"]);
        assert_eq!(prompter.remaining(), 0);
    }

    #[tokio::test]
    async fn exhausted_script_closes() {
        let mut prompter = ScriptedPrompter::new(Vec::<String>::new());
        assert_eq!(prompter.input("Anything?").await, Err(PromptError::Closed));
    }

    #[test]
    fn eof_maps_to_closed() {
        let err = std::io::Error::new(std::io::ErrorKind::UnexpectedEof, "eof");
        assert_eq!(PromptError::from(err), PromptError::Closed);
    }
}
