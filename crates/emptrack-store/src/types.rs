//! Domain types stored in the database.
//!
//! These types represent the persisted rows of departments, roles, employees,
//! and managers, plus the insert payloads and partial-update change sets used
//! by the [`Store`](crate::Store) trait.

use emptrack_core::{DepartmentId, EmployeeId, ManagerId, RoleId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A department record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Department {
    /// Primary key.
    pub id: DepartmentId,
    /// Department name. Unique by lookup-before-insert.
    pub name: String,
}

/// A role record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Role {
    /// Primary key.
    pub id: RoleId,
    /// Job title.
    pub title: String,
    /// Yearly salary.
    pub salary: Decimal,
    /// Owning department, if any.
    pub department_id: Option<DepartmentId>,
}

/// An employee record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employee {
    /// Primary key.
    pub id: EmployeeId,
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// The employee's role.
    pub role_id: RoleId,
    /// Reporting manager, if any.
    pub manager_id: Option<ManagerId>,
}

/// A manager record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Manager {
    /// Primary key.
    pub id: ManagerId,
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Managed department.
    pub department_id: DepartmentId,
    /// The manager's role.
    pub role_id: RoleId,
}

/// One line of the salary report: an employee joined with their role.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SalaryRow {
    /// Employee given name.
    pub first_name: String,
    /// Employee family name.
    pub last_name: String,
    /// Role title.
    pub title: String,
    /// Role salary.
    pub salary: Decimal,
}

// =============================================================================
// Insert payloads
// =============================================================================

/// Fields for inserting a role.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewRole {
    /// Job title.
    pub title: String,
    /// Yearly salary.
    pub salary: Decimal,
    /// Owning department, if any.
    pub department_id: Option<DepartmentId>,
}

/// Fields for inserting an employee.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewEmployee {
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// The employee's role.
    pub role_id: RoleId,
    /// Reporting manager, if any.
    pub manager_id: Option<ManagerId>,
}

/// Fields for inserting a manager.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewManager {
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Managed department.
    pub department_id: DepartmentId,
    /// The manager's role.
    pub role_id: RoleId,
}

// =============================================================================
// Partial updates
// =============================================================================
//
// `None` leaves a column untouched. For nullable columns the inner `Option`
// is the new value, so `Some(None)` clears the column.

/// Column changes for a department.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DepartmentChanges {
    /// New name.
    pub name: Option<String>,
}

impl DepartmentChanges {
    /// Returns true if no column would change.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.name.is_none()
    }

    /// Apply the changes to an in-memory row.
    pub fn apply_to(&self, department: &mut Department) {
        if let Some(name) = &self.name {
            department.name.clone_from(name);
        }
    }
}

/// Column changes for a role.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RoleChanges {
    /// New title.
    pub title: Option<String>,
    /// New salary.
    pub salary: Option<Decimal>,
    /// New department (`Some(None)` detaches the role).
    pub department_id: Option<Option<DepartmentId>>,
}

impl RoleChanges {
    /// Returns true if no column would change.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.title.is_none() && self.salary.is_none() && self.department_id.is_none()
    }

    /// Apply the changes to an in-memory row.
    pub fn apply_to(&self, role: &mut Role) {
        if let Some(title) = &self.title {
            role.title.clone_from(title);
        }
        if let Some(salary) = self.salary {
            role.salary = salary;
        }
        if let Some(department_id) = self.department_id {
            role.department_id = department_id;
        }
    }
}

/// Column changes for an employee.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EmployeeChanges {
    /// New given name.
    pub first_name: Option<String>,
    /// New family name.
    pub last_name: Option<String>,
    /// New role.
    pub role_id: Option<RoleId>,
    /// New manager (`Some(None)` clears it).
    pub manager_id: Option<Option<ManagerId>>,
}

impl EmployeeChanges {
    /// Returns true if no column would change.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.first_name.is_none()
            && self.last_name.is_none()
            && self.role_id.is_none()
            && self.manager_id.is_none()
    }

    /// Apply the changes to an in-memory row.
    pub fn apply_to(&self, employee: &mut Employee) {
        if let Some(first_name) = &self.first_name {
            employee.first_name.clone_from(first_name);
        }
        if let Some(last_name) = &self.last_name {
            employee.last_name.clone_from(last_name);
        }
        if let Some(role_id) = self.role_id {
            employee.role_id = role_id;
        }
        if let Some(manager_id) = self.manager_id {
            employee.manager_id = manager_id;
        }
    }
}

/// Column changes for a manager.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ManagerChanges {
    /// New given name.
    pub first_name: Option<String>,
    /// New family name.
    pub last_name: Option<String>,
    /// New department.
    pub department_id: Option<DepartmentId>,
    /// New role.
    pub role_id: Option<RoleId>,
}

impl ManagerChanges {
    /// Returns true if no column would change.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.first_name.is_none()
            && self.last_name.is_none()
            && self.department_id.is_none()
            && self.role_id.is_none()
    }

    /// Apply the changes to an in-memory row.
    pub fn apply_to(&self, manager: &mut Manager) {
        if let Some(first_name) = &self.first_name {
            manager.first_name.clone_from(first_name);
        }
        if let Some(last_name) = &self.last_name {
            manager.last_name.clone_from(last_name);
        }
        if let Some(department_id) = self.department_id {
            manager.department_id = department_id;
        }
        if let Some(role_id) = self.role_id {
            manager.role_id = role_id;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn employee() -> Employee {
        Employee {
            id: EmployeeId::new(1),
            first_name: "Ada".to_string(),
            last_name: "Lovelace".to_string(),
            role_id: RoleId::new(2),
            manager_id: Some(ManagerId::new(3)),
        }
    }

    #[test]
    fn empty_changes_leave_row_untouched() {
        let changes = EmployeeChanges::default();
        assert!(changes.is_empty());

        let mut row = employee();
        changes.apply_to(&mut row);
        assert_eq!(row, employee());
    }

    #[test]
    fn partial_changes_touch_only_selected_columns() {
        let changes = EmployeeChanges {
            last_name: Some("King".to_string()),
            manager_id: Some(None),
            ..Default::default()
        };
        assert!(!changes.is_empty());

        let mut row = employee();
        changes.apply_to(&mut row);
        assert_eq!(row.first_name, "Ada");
        assert_eq!(row.last_name, "King");
        assert_eq!(row.role_id, RoleId::new(2));
        assert_eq!(row.manager_id, None);
    }

    #[test]
    fn role_changes_can_detach_department() {
        let mut role = Role {
            id: RoleId::new(1),
            title: "Engineer".to_string(),
            salary: Decimal::new(90000, 0),
            department_id: Some(DepartmentId::new(4)),
        };
        RoleChanges {
            department_id: Some(None),
            ..Default::default()
        }
        .apply_to(&mut role);
        assert_eq!(role.department_id, None);
        assert_eq!(role.salary, Decimal::new(90000, 0));
    }

    #[test]
    fn salary_serializes_as_string() {
        let row = SalaryRow {
            first_name: "Ada".to_string(),
            last_name: "Lovelace".to_string(),
            title: "Engineer".to_string(),
            salary: Decimal::new(9_000_050, 2),
        };
        let json = serde_json::to_value(&row).unwrap();
        assert_eq!(json["salary"], "90000.50");
    }
}
