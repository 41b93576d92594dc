//! Edit sub-flow: partial updates of an existing row.
//!
//! The user picks a table, the row id, and which columns to change. Only the
//! selected columns are asked for and only those are written.

use emptrack_core::{parse_id, DepartmentId, EmployeeId, ManagerId, RoleId};
use emptrack_store::{DepartmentChanges, EmployeeChanges, ManagerChanges, RoleChanges, Store};

use crate::error::{FlowError, Result};
use crate::flow::Controller;
use crate::prompt::{Prompter, Tone};
use crate::questions::{self, Answers, Field};

/// Which table an edit targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditTable {
    /// `employees`
    Employee,
    /// `managers`
    Manager,
    /// `departments`
    Department,
    /// `roles`
    Role,
}

impl EditTable {
    /// Menu order.
    pub const ALL: [Self; 4] = [Self::Employee, Self::Manager, Self::Department, Self::Role];

    /// Menu label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Employee => "Employee",
            Self::Manager => "Manager",
            Self::Department => "Department",
            Self::Role => "Role",
        }
    }

    /// Lower-case noun for messages.
    #[must_use]
    pub const fn noun(self) -> &'static str {
        match self {
            Self::Employee => "employee",
            Self::Manager => "manager",
            Self::Department => "department",
            Self::Role => "role",
        }
    }

    /// Editable columns with their menu labels.
    #[must_use]
    pub const fn fields(self) -> &'static [(Field, &'static str)] {
        match self {
            Self::Employee => &[
                (Field::FirstName, "First name"),
                (Field::LastName, "Last name"),
                (Field::RoleId, "Role"),
                (Field::ManagerId, "Manager"),
            ],
            Self::Manager => &[
                (Field::FirstName, "First name"),
                (Field::LastName, "Last name"),
                (Field::DepartmentId, "Department"),
                (Field::RoleId, "Role"),
            ],
            Self::Department => &[(Field::DepartmentName, "Name")],
            Self::Role => &[
                (Field::RoleTitle, "Title"),
                (Field::Salary, "Salary"),
                (Field::OptionalDepartmentId, "Department"),
            ],
        }
    }
}

/// What an update did.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Update {
    Applied,
    /// The row does not exist.
    Missing,
    /// The new natural key belongs to another row; the message says which.
    Taken(String),
}

/// Read `field` only if it was selected for change.
fn changed<T>(
    answers: &Answers,
    field: Field,
    read: impl FnOnce(&Answers, Field) -> Result<T>,
) -> Result<Option<T>> {
    if answers.contains(field) {
        read(answers, field).map(Some)
    } else {
        Ok(None)
    }
}

impl<S, P> Controller<'_, S, P>
where
    S: Store + ?Sized,
    P: Prompter + ?Sized,
{
    /// Run one edit. Storage failures are reported and the session goes back
    /// to the main menu.
    pub(crate) async fn edit(&mut self) -> Result<()> {
        let table = self
            .choose(
                "Which table would you like to edit?",
                &EditTable::ALL,
                EditTable::label,
            )
            .await?;
        tracing::debug!(?table, "Edit table selected");

        match self.edit_row(table).await {
            Err(FlowError::Store(err)) => {
                tracing::error!(?table, error = %err, "Edit failed");
                self.prompter.notify(
                    Tone::Error,
                    &format!("Could not update the {}: {err}", table.noun()),
                );
                Ok(())
            }
            other => other,
        }
    }

    async fn edit_row(&mut self, table: EditTable) -> Result<()> {
        let target = self.ask(&questions::target(table.noun()).remove(0)).await?;

        let labels: Vec<&str> = table.fields().iter().map(|(_, label)| *label).collect();
        let picked = self
            .prompter
            .multi_select("Which fields would you like to change?", &labels)
            .await?;
        if picked.is_empty() {
            self.prompter
                .notify(Tone::Info, "No fields selected. Nothing was changed.");
            return Ok(());
        }

        let mut answers = Answers::default();
        for index in picked {
            if let Some((field, _)) = table.fields().get(index) {
                let value = self.ask(&questions::replacement(*field)).await?;
                answers.insert(*field, value);
            }
        }

        let update = match table {
            EditTable::Employee => self.update_employee(parse_id(&target)?, &answers).await?,
            EditTable::Manager => self.update_manager(parse_id(&target)?, &answers).await?,
            EditTable::Department => {
                self.update_department(parse_id(&target)?, &answers)
                    .await?
            }
            EditTable::Role => self.update_role(parse_id(&target)?, &answers).await?,
        };

        match update {
            Update::Applied => {
                tracing::info!(?table, id = %target, "Updated row");
                self.prompter.notify(
                    Tone::Success,
                    &format!("Updated {} with ID: {target}", table.noun()),
                );
            }
            Update::Missing => self.prompter.notify(
                Tone::Warning,
                &format!("No {} with ID {target}.", table.noun()),
            ),
            Update::Taken(message) => {
                tracing::warn!(?table, id = %target, "Edit would duplicate an existing row");
                self.prompter.notify(Tone::Warning, &message);
            }
        }
        Ok(())
    }

    // Nothing is written unless these return `Update::Applied`.

    async fn update_employee(&self, id: EmployeeId, answers: &Answers) -> Result<Update> {
        if self.store.get_employee(id).await?.is_none() {
            return Ok(Update::Missing);
        }
        let changes = EmployeeChanges {
            first_name: changed(answers, Field::FirstName, Answers::text)?,
            last_name: changed(answers, Field::LastName, Answers::text)?,
            role_id: changed(answers, Field::RoleId, Answers::id::<RoleId>)?,
            manager_id: changed(answers, Field::ManagerId, Answers::optional_id::<ManagerId>)?,
        };
        self.store.update_employee(id, &changes).await?;
        Ok(Update::Applied)
    }

    async fn update_manager(&self, id: ManagerId, answers: &Answers) -> Result<Update> {
        if self.store.get_manager(id).await?.is_none() {
            return Ok(Update::Missing);
        }
        let changes = ManagerChanges {
            first_name: changed(answers, Field::FirstName, Answers::text)?,
            last_name: changed(answers, Field::LastName, Answers::text)?,
            department_id: changed(answers, Field::DepartmentId, Answers::id::<DepartmentId>)?,
            role_id: changed(answers, Field::RoleId, Answers::id::<RoleId>)?,
        };
        self.store.update_manager(id, &changes).await?;
        Ok(Update::Applied)
    }

    /// Department names stay unique: renaming onto another department's name
    /// is refused.
    async fn update_department(&self, id: DepartmentId, answers: &Answers) -> Result<Update> {
        if self.store.get_department(id).await?.is_none() {
            return Ok(Update::Missing);
        }
        let changes = DepartmentChanges {
            name: changed(answers, Field::DepartmentName, Answers::text)?,
        };
        if let Some(name) = &changes.name {
            if let Some(other) = self.store.find_department_by_name(name).await? {
                if other.id != id {
                    return Ok(Update::Taken(format!(
                        "A department named {name} already exists (ID {}).",
                        other.id
                    )));
                }
            }
        }
        self.store.update_department(id, &changes).await?;
        Ok(Update::Applied)
    }

    /// (title, department) stays unique across roles, checked on the merged
    /// values so changing either half is covered.
    async fn update_role(&self, id: RoleId, answers: &Answers) -> Result<Update> {
        let Some(current) = self.store.get_role(id).await? else {
            return Ok(Update::Missing);
        };
        let changes = RoleChanges {
            title: changed(answers, Field::RoleTitle, Answers::text)?,
            salary: changed(answers, Field::Salary, Answers::money)?,
            department_id: changed(
                answers,
                Field::OptionalDepartmentId,
                Answers::optional_id::<DepartmentId>,
            )?,
        };
        if changes.title.is_some() || changes.department_id.is_some() {
            let title = changes.title.as_deref().unwrap_or(&current.title);
            let department = changes.department_id.unwrap_or(current.department_id);
            if let Some(other) = self.store.find_role(title, department).await? {
                if other.id != id {
                    let place = department.map_or_else(
                        || "with no department".to_string(),
                        |d| format!("in department {d}"),
                    );
                    return Ok(Update::Taken(format!(
                        "A role titled {title} already exists {place} (ID {}).",
                        other.id
                    )));
                }
            }
        }
        self.store.update_role(id, &changes).await?;
        Ok(Update::Applied)
    }
}
