//! Entry sub-flows: employee, manager, department, and role.
//!
//! Each attempt collects its answers into a plan, shows a summary, and asks for
//! confirmation. Only after the user confirms are departments and roles
//! resolved and the final row inserted, so a cancelled attempt writes nothing.

use emptrack_core::{DepartmentId, ManagerId, RoleId};
use emptrack_store::{NewEmployee, NewManager, Store};
use rust_decimal::Decimal;

use crate::error::{FlowError, Result};
use crate::flow::Controller;
use crate::prompt::{Prompter, Tone};
use crate::questions::{self, Answers, DepartmentBranch, Field, Person, RoleBranch};
use crate::resolve::{resolve_department, resolve_role};
use crate::types::{FlowOutcome, Saved};

/// Where a department comes from once the attempt is confirmed.
#[derive(Debug, Clone, PartialEq, Eq)]
enum DepartmentPlan {
    New(String),
    Existing(DepartmentId),
    None,
}

impl DepartmentPlan {
    fn from_answers(branch: DepartmentBranch, answers: &Answers) -> Result<Self> {
        Ok(match branch {
            DepartmentBranch::New => Self::New(answers.text(Field::DepartmentName)?),
            DepartmentBranch::Existing => Self::Existing(answers.id(Field::DepartmentId)?),
            DepartmentBranch::None => Self::None,
        })
    }

    fn describe(&self) -> String {
        match self {
            Self::New(name) => name.clone(),
            Self::Existing(id) => format!("ID {id}"),
            Self::None => "none".to_string(),
        }
    }
}

/// Where a role comes from once the attempt is confirmed.
#[derive(Debug, Clone, PartialEq, Eq)]
enum RolePlan {
    Existing(RoleId),
    New {
        title: String,
        salary: Decimal,
        department: DepartmentPlan,
    },
}

impl RolePlan {
    fn describe(&self) -> String {
        match self {
            Self::Existing(id) => format!("ID {id}"),
            Self::New {
                title,
                salary,
                department,
            } => format!(
                "{title} (salary {salary}, department {})",
                department.describe()
            ),
        }
    }
}

impl<S, P> Controller<'_, S, P>
where
    S: Store + ?Sized,
    P: Prompter + ?Sized,
{
    pub(crate) async fn add_employee(&mut self) -> Result<FlowOutcome<Saved>> {
        let mut answers = Answers::default();
        self.ask_all(&questions::person(Person::Employee), &mut answers)
            .await?;

        let role = if self.prompter.confirm("Is this a new role?", false).await? {
            self.ask_all(&questions::role(RoleBranch::New), &mut answers)
                .await?;
            let department = self.plan_department(&mut answers).await?;
            RolePlan::New {
                title: answers.text(Field::RoleTitle)?,
                salary: answers.money(Field::Salary)?,
                department,
            }
        } else {
            self.ask_all(&questions::role(RoleBranch::Existing), &mut answers)
                .await?;
            RolePlan::Existing(answers.id(Field::RoleId)?)
        };

        self.ask_all(&questions::manager(), &mut answers).await?;
        let manager_id: Option<ManagerId> = answers.optional_id(Field::ManagerId)?;

        let first_name = answers.text(Field::FirstName)?;
        let last_name = answers.text(Field::LastName)?;
        let summary = [
            format!("Name: {first_name} {last_name}"),
            format!("Role: {}", role.describe()),
            format!(
                "Manager: {}",
                manager_id.map_or_else(|| "none".to_string(), |id| format!("ID {id}"))
            ),
        ];
        if !self.confirm_summary(Person::Employee.noun(), &summary).await? {
            return Ok(FlowOutcome::Cancelled);
        }

        let role_id = self.settle_role(&role).await?;
        let id = self
            .store
            .insert_employee(&NewEmployee {
                first_name,
                last_name,
                role_id,
                manager_id,
            })
            .await?;
        tracing::info!(employee_id = %id, %role_id, ?manager_id, "Added employee");
        Ok(FlowOutcome::Saved(Saved::Employee(id)))
    }

    pub(crate) async fn add_manager(&mut self) -> Result<FlowOutcome<Saved>> {
        let mut answers = Answers::default();
        self.ask_all(&questions::person(Person::Manager), &mut answers)
            .await?;

        let branch = if self
            .prompter
            .confirm("Is this a new department?", false)
            .await?
        {
            DepartmentBranch::New
        } else {
            DepartmentBranch::Existing
        };
        self.ask_all(&questions::department(branch), &mut answers)
            .await?;
        let department = DepartmentPlan::from_answers(branch, &answers)?;

        let role = if self.prompter.confirm("Is this a new role?", false).await? {
            self.ask_all(&questions::role(RoleBranch::New), &mut answers)
                .await?;
            RolePlan::New {
                title: answers.text(Field::RoleTitle)?,
                salary: answers.money(Field::Salary)?,
                department: department.clone(),
            }
        } else {
            self.ask_all(&questions::role(RoleBranch::Existing), &mut answers)
                .await?;
            RolePlan::Existing(answers.id(Field::RoleId)?)
        };

        let first_name = answers.text(Field::FirstName)?;
        let last_name = answers.text(Field::LastName)?;
        let summary = [
            format!("Name: {first_name} {last_name}"),
            format!("Department: {}", department.describe()),
            format!("Role: {}", role.describe()),
        ];
        if !self.confirm_summary(Person::Manager.noun(), &summary).await? {
            return Ok(FlowOutcome::Cancelled);
        }

        let department_id = self
            .settle_department(&department)
            .await?
            .ok_or(FlowError::MissingAnswer(Field::DepartmentId))?;
        // A new role lands in the department just settled; resolving again is a
        // lookup, not a second insert.
        let role_id = self.settle_role(&role).await?;
        let id = self
            .store
            .insert_manager(&NewManager {
                first_name,
                last_name,
                department_id,
                role_id,
            })
            .await?;
        tracing::info!(manager_id = %id, %department_id, %role_id, "Added manager");
        Ok(FlowOutcome::Saved(Saved::Manager(id)))
    }

    pub(crate) async fn add_department(&mut self) -> Result<FlowOutcome<Saved>> {
        let mut answers = Answers::default();
        self.ask_all(&questions::department(DepartmentBranch::New), &mut answers)
            .await?;
        let name = answers.text(Field::DepartmentName)?;

        if !self
            .confirm_summary("department", &[format!("Name: {name}")])
            .await?
        {
            return Ok(FlowOutcome::Cancelled);
        }

        let resolved = resolve_department(self.store, &name).await?;
        Ok(FlowOutcome::Saved(Saved::Department(resolved)))
    }

    pub(crate) async fn add_role(&mut self) -> Result<FlowOutcome<Saved>> {
        let mut answers = Answers::default();
        self.ask_all(&questions::role(RoleBranch::New), &mut answers)
            .await?;
        let department = self.plan_department(&mut answers).await?;
        let title = answers.text(Field::RoleTitle)?;
        let salary = answers.money(Field::Salary)?;

        let summary = [
            format!("Title: {title}"),
            format!("Salary: {salary}"),
            format!("Department: {}", department.describe()),
        ];
        if !self.confirm_summary("role", &summary).await? {
            return Ok(FlowOutcome::Cancelled);
        }

        let department_id = self.settle_department(&department).await?;
        let resolved = resolve_role(self.store, &title, department_id, salary).await?;
        Ok(FlowOutcome::Saved(Saved::Role(resolved)))
    }

    // =========================================================================
    // Helpers
    // =========================================================================

    /// Ask where a new role's department comes from, then its name or id.
    async fn plan_department(&mut self, answers: &mut Answers) -> Result<DepartmentPlan> {
        let index = self
            .prompter
            .select(
                "Which department does this role belong to?",
                &DepartmentBranch::CHOICES,
            )
            .await?;
        let branch = DepartmentBranch::from_index(index);
        self.ask_all(&questions::department(branch), answers).await?;
        DepartmentPlan::from_answers(branch, answers)
    }

    async fn confirm_summary(&mut self, noun: &str, lines: &[String]) -> Result<bool> {
        self.prompter
            .notify(Tone::Info, &format!("New {noun}:\n  {}", lines.join("\n  ")));
        let confirmed = self
            .prompter
            .confirm(&format!("Save this {noun}?"), true)
            .await?;
        Ok(confirmed)
    }

    async fn settle_department(&self, plan: &DepartmentPlan) -> Result<Option<DepartmentId>> {
        Ok(match plan {
            DepartmentPlan::New(name) => Some(resolve_department(self.store, name).await?.id),
            DepartmentPlan::Existing(id) => Some(*id),
            DepartmentPlan::None => None,
        })
    }

    async fn settle_role(&self, plan: &RolePlan) -> Result<RoleId> {
        Ok(match plan {
            RolePlan::Existing(id) => *id,
            RolePlan::New {
                title,
                salary,
                department,
            } => {
                let department_id = self.settle_department(department).await?;
                resolve_role(self.store, title, department_id, *salary).await?.id
            }
        })
    }
}
