//! Read-only reports.

use emptrack_store::{Department, Employee, Manager, Role, SalaryRow, Store};

use crate::error::Result;
use crate::flow::Controller;
use crate::prompt::{Prompter, Table, Tone};

/// The fixed set of reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Report {
    /// Every table, one after another.
    All,
    /// `departments`
    Departments,
    /// `roles`
    Roles,
    /// `employees`
    Employees,
    /// `managers`
    Managers,
    /// Employees joined with their role's title and salary.
    Salaries,
}

impl Report {
    /// Menu order.
    pub const ALL: [Self; 6] = [
        Self::All,
        Self::Departments,
        Self::Roles,
        Self::Employees,
        Self::Managers,
        Self::Salaries,
    ];

    /// Menu label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::All => "All Tables",
            Self::Departments => "All Departments",
            Self::Roles => "All Roles",
            Self::Employees => "All Employees",
            Self::Managers => "All Managers",
            Self::Salaries => "Employee Salaries",
        }
    }
}

fn optional<T: ToString>(value: Option<T>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

fn departments_table(rows: &[Department]) -> Table {
    let mut table = Table::new("Departments", &["id", "department_name"]);
    for row in rows {
        table.push_row(vec![row.id.to_string(), row.name.clone()]);
    }
    table
}

fn roles_table(rows: &[Role]) -> Table {
    let mut table = Table::new("Roles", &["id", "title", "salary", "department_id"]);
    for row in rows {
        table.push_row(vec![
            row.id.to_string(),
            row.title.clone(),
            row.salary.to_string(),
            optional(row.department_id),
        ]);
    }
    table
}

fn employees_table(rows: &[Employee]) -> Table {
    let mut table = Table::new(
        "Employees",
        &["id", "first_name", "last_name", "role_id", "manager_id"],
    );
    for row in rows {
        table.push_row(vec![
            row.id.to_string(),
            row.first_name.clone(),
            row.last_name.clone(),
            row.role_id.to_string(),
            optional(row.manager_id),
        ]);
    }
    table
}

fn managers_table(rows: &[Manager]) -> Table {
    let mut table = Table::new(
        "Managers",
        &["id", "first_name", "last_name", "department_id", "role_id"],
    );
    for row in rows {
        table.push_row(vec![
            row.id.to_string(),
            row.first_name.clone(),
            row.last_name.clone(),
            row.department_id.to_string(),
            row.role_id.to_string(),
        ]);
    }
    table
}

fn salaries_table(rows: &[SalaryRow]) -> Table {
    let mut table = Table::new("Salaries", &["first_name", "last_name", "title", "salary"]);
    for row in rows {
        table.push_row(vec![
            row.first_name.clone(),
            row.last_name.clone(),
            row.title.clone(),
            row.salary.to_string(),
        ]);
    }
    table
}

impl<S, P> Controller<'_, S, P>
where
    S: Store + ?Sized,
    P: Prompter + ?Sized,
{
    /// Pick a report and show it. A storage failure is reported and the
    /// session goes back to the main menu.
    pub(crate) async fn view(&mut self) -> Result<()> {
        let report = self
            .choose("What would you like to view?", &Report::ALL, Report::label)
            .await?;
        tracing::debug!(?report, "Report selected");

        match self.load(report).await {
            Ok(tables) => {
                for table in &tables {
                    self.prompter.table(table);
                }
            }
            Err(err) => {
                tracing::error!(?report, error = %err, "Report failed");
                self.prompter
                    .notify(Tone::Error, &format!("Could not load the report: {err}"));
            }
        }
        Ok(())
    }

    async fn load(&self, report: Report) -> emptrack_store::Result<Vec<Table>> {
        let store = self.store;
        Ok(match report {
            Report::All => vec![
                departments_table(&store.list_departments().await?),
                roles_table(&store.list_roles().await?),
                employees_table(&store.list_employees().await?),
                managers_table(&store.list_managers().await?),
            ],
            Report::Departments => vec![departments_table(&store.list_departments().await?)],
            Report::Roles => vec![roles_table(&store.list_roles().await?)],
            Report::Employees => vec![employees_table(&store.list_employees().await?)],
            Report::Managers => vec![managers_table(&store.list_managers().await?)],
            Report::Salaries => vec![salaries_table(&store.list_salaries().await?)],
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use emptrack_core::{EmployeeId, ManagerId, RoleId};

    #[test]
    fn employees_render_nulls_as_blank() {
        let table = employees_table(&[Employee {
            id: EmployeeId::new(1),
            first_name: "Ada".to_string(),
            last_name: "Lovelace".to_string(),
            role_id: RoleId::new(2),
            manager_id: None,
        }]);
        assert_eq!(table.rows, vec![vec!["1", "Ada", "Lovelace", "2", ""]]);

        let managed = employees_table(&[Employee {
            id: EmployeeId::new(2),
            first_name: "Grace".to_string(),
            last_name: "Hopper".to_string(),
            role_id: RoleId::new(2),
            manager_id: Some(ManagerId::new(5)),
        }]);
        assert_eq!(managed.rows[0][4], "5");
    }

    #[test]
    fn report_menu_has_six_entries() {
        assert_eq!(Report::ALL.len(), 6);
        assert_eq!(Report::Employees.label(), "All Employees");
    }
}
