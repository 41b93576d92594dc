//! The top-level prompt loop.
//!
//! [`Controller`] owns one session: it shows the main menu, hands off to the
//! view, entry, and edit sub-flows, and decides what happens after each
//! attempt. Entry attempts run in an explicit loop; a cancelled or failed
//! attempt starts over from the first question with no carried-over answers.

use emptrack_core::parse_id;
use emptrack_store::Store;

use crate::error::{FlowError, Result};
use crate::prompt::{PromptError, Prompter, Tone};
use crate::questions::{Answers, Question, Reference};
use crate::types::{ControlConfig, EntryKind, FlowOutcome, Mode, Next, Saved};

/// Drives one interactive session against a store.
pub struct Controller<'a, S: ?Sized, P: ?Sized> {
    pub(crate) store: &'a S,
    pub(crate) prompter: &'a mut P,
    config: ControlConfig,
}

impl<'a, S, P> Controller<'a, S, P>
where
    S: Store + ?Sized,
    P: Prompter + ?Sized,
{
    /// Create a controller. The store handle is used for every read and write
    /// of the session.
    #[must_use]
    pub fn new(store: &'a S, prompter: &'a mut P, config: ControlConfig) -> Self {
        Self {
            store,
            prompter,
            config,
        }
    }

    /// Run until the user picks Exit or input ends.
    ///
    /// # Errors
    ///
    /// Returns an error if the terminal fails for a reason other than end of
    /// input. Storage failures are reported to the user and never end the
    /// session.
    pub async fn run(&mut self) -> Result<()> {
        match self.main_menu().await {
            Err(err) if err.is_closed() => {
                tracing::debug!("Input closed, ending session");
                Ok(())
            }
            other => other,
        }
    }

    async fn main_menu(&mut self) -> Result<()> {
        loop {
            let mode = self
                .choose("What would you like to do?", &Mode::ALL, Mode::label)
                .await?;
            tracing::debug!(?mode, "Mode selected");

            match mode {
                Mode::View => self.view().await?,
                Mode::Entry => {
                    if self.entry().await? == Next::Exit {
                        break;
                    }
                }
                Mode::Edit => self.edit().await?,
                Mode::Exit => break,
            }
        }

        self.prompter.notify(Tone::Info, "Goodbye!");
        Ok(())
    }

    async fn entry(&mut self) -> Result<Next> {
        let kind = self
            .choose(
                "What type of entry would you like to make?",
                &EntryKind::ALL,
                EntryKind::label,
            )
            .await?;
        tracing::debug!(?kind, "Entry type selected");

        let mut failures = 0;
        loop {
            match self.attempt(kind).await? {
                FlowOutcome::Saved(saved) => {
                    failures = 0;
                    self.prompter.notify(Tone::Success, &saved.message());

                    let next = self
                        .choose("What would you like to do next?", &Next::ALL, Next::label)
                        .await?;
                    tracing::debug!(?next, "Repeat-or-exit selected");
                    if next != Next::Another {
                        return Ok(next);
                    }
                }
                FlowOutcome::Cancelled => {
                    tracing::debug!(?kind, "Entry cancelled");
                    self.prompter
                        .notify(Tone::Info, "Entry cancelled. Starting over.");
                }
                FlowOutcome::Failed(reason) => {
                    failures += 1;
                    self.prompter.notify(
                        Tone::Error,
                        &format!("Could not save the entry: {reason}. Please try again."),
                    );
                    if failures >= self.config.max_attempts {
                        tracing::warn!(?kind, failures, "Giving up on entry");
                        self.prompter.notify(
                            Tone::Error,
                            "Too many failed attempts. Returning to the main menu.",
                        );
                        return Ok(Next::Menu);
                    }
                }
            }
        }
    }

    /// One attempt of an entry sub-flow. Storage errors become
    /// [`FlowOutcome::Failed`]; everything else propagates.
    async fn attempt(&mut self, kind: EntryKind) -> Result<FlowOutcome<Saved>> {
        let result = match kind {
            EntryKind::Employee => self.add_employee().await,
            EntryKind::Manager => self.add_manager().await,
            EntryKind::Department => self.add_department().await,
            EntryKind::Role => self.add_role().await,
        };

        match result {
            Err(FlowError::Store(err)) => {
                tracing::error!(?kind, error = %err, "Entry failed");
                Ok(FlowOutcome::Failed(err.to_string()))
            }
            other => other,
        }
    }

    // =========================================================================
    // Prompt helpers
    // =========================================================================

    /// Ask a single-choice question over a fixed list of options.
    pub(crate) async fn choose<T: Copy>(
        &mut self,
        message: &str,
        options: &[T],
        label: fn(T) -> &'static str,
    ) -> Result<T> {
        let labels: Vec<&str> = options.iter().map(|o| label(*o)).collect();
        let index = self.prompter.select(message, &labels).await?;
        options
            .get(index)
            .copied()
            .ok_or_else(|| PromptError::Io(format!("choice {index} out of range")).into())
    }

    /// Ask every question in order, re-prompting each until it is accepted.
    pub(crate) async fn ask_all(
        &mut self,
        questions: &[Question],
        answers: &mut Answers,
    ) -> Result<()> {
        for question in questions {
            let value = self.ask(question).await?;
            answers.insert(question.field, value);
        }
        Ok(())
    }

    /// Ask one question until the answer passes its rule and, for fields that
    /// point at another table, names an existing row.
    pub(crate) async fn ask(&mut self, question: &Question) -> Result<String> {
        loop {
            let raw = self.prompter.input(&question.message).await?;

            if let Err(err) = question.accept(&raw) {
                self.prompter.notify(Tone::Warning, &err.message);
                continue;
            }

            if let Some(reference) = question.field.reference() {
                if !self.exists(reference, &raw).await? {
                    tracing::warn!(reference = reference.noun(), id = %raw, "Unknown id entered");
                    self.prompter.notify(
                        Tone::Warning,
                        &format!("No {} with ID {raw}.", reference.noun()),
                    );
                    continue;
                }
            }

            return Ok(raw);
        }
    }

    /// Empty answers (an optional id left blank) always exist.
    async fn exists(&self, reference: Reference, raw: &str) -> Result<bool> {
        if raw.is_empty() {
            return Ok(true);
        }
        let found = match reference {
            Reference::Role => self.store.get_role(parse_id(raw)?).await?.is_some(),
            Reference::Department => self.store.get_department(parse_id(raw)?).await?.is_some(),
            Reference::Manager => self.store.get_manager(parse_id(raw)?).await?.is_some(),
        };
        Ok(found)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prompt::ScriptedPrompter;
    use crate::questions::{self, RoleBranch};
    use emptrack_store::{MemoryStore, NewRole};
    use rust_decimal::Decimal;

    #[tokio::test]
    async fn exit_immediately() {
        let store = MemoryStore::new();
        let mut prompter = ScriptedPrompter::new(["Exit"]);

        Controller::new(&store, &mut prompter, ControlConfig::default())
            .run()
            .await
            .unwrap();

        assert_eq!(prompter.notices(Tone::Info), vec!["Goodbye!"]);
        assert_eq!(store.counts().reads, 0);
    }

    #[tokio::test]
    async fn end_of_input_is_not_an_error() {
        let store = MemoryStore::new();
        let mut prompter = ScriptedPrompter::new(["Entry", "Employee", "Ada"]);

        let result = Controller::new(&store, &mut prompter, ControlConfig::default())
            .run()
            .await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn ask_reprompts_until_valid() {
        let store = MemoryStore::new();
        let mut prompter = ScriptedPrompter::new(["", "abc", "12a", "4"]);
        let question = questions::target("employee").remove(0);

        let mut controller = Controller::new(&store, &mut prompter, ControlConfig::default());
        let answer = controller.ask(&question).await.unwrap();

        assert_eq!(answer, "4");
        assert_eq!(
            prompter.notices(Tone::Warning),
            vec!["Please enter a valid ID (numeric)."; 3]
        );
    }

    #[tokio::test]
    async fn ask_rejects_unknown_role() {
        let store = MemoryStore::new();
        let role = store
            .insert_role(&NewRole {
                title: "Engineer".to_string(),
                salary: Decimal::new(1000, 0),
                department_id: None,
            })
            .await
            .unwrap();
        let mut prompter = ScriptedPrompter::new(["99".to_string(), role.to_string()]);
        let question = questions::role(RoleBranch::Existing).remove(0);

        let mut controller = Controller::new(&store, &mut prompter, ControlConfig::default());
        let answer = controller.ask(&question).await.unwrap();

        assert_eq!(answer, role.to_string());
        assert_eq!(prompter.notices(Tone::Warning), vec!["No role with ID 99."]);
    }

    #[tokio::test]
    async fn blank_manager_skips_lookup() {
        let store = MemoryStore::new();
        let mut prompter = ScriptedPrompter::new([""]);
        let question = questions::manager().remove(0);

        let mut controller = Controller::new(&store, &mut prompter, ControlConfig::default());
        assert_eq!(controller.ask(&question).await.unwrap(), "");
        assert_eq!(store.counts().reads, 0);
    }
}
