//! Menu choices, sub-flow outcomes, and controller configuration.

use emptrack_core::{DepartmentId, EmployeeId, ManagerId, RoleId};

use crate::resolve::Resolved;

/// Top-level menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Read-only reports.
    View,
    /// Create records.
    Entry,
    /// Change existing records.
    Edit,
    /// Leave the program.
    Exit,
}

impl Mode {
    /// Menu order.
    pub const ALL: [Self; 4] = [Self::View, Self::Entry, Self::Edit, Self::Exit];

    /// Menu label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::View => "View",
            Self::Entry => "Entry",
            Self::Edit => "Edit",
            Self::Exit => "Exit",
        }
    }
}

/// Which record an entry sub-flow creates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    /// An employee, with role and optional manager.
    Employee,
    /// A manager, with department and role.
    Manager,
    /// A department alone.
    Department,
    /// A role alone.
    Role,
}

impl EntryKind {
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
}

/// What to do after a record was saved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Next {
    /// Run the same sub-flow again.
    Another,
    /// Go back to the top-level menu.
    Menu,
    /// Leave the program.
    Exit,
}

impl Next {
    /// Menu order.
    pub const ALL: [Self; 3] = [Self::Another, Self::Menu, Self::Exit];

    /// Menu label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Another => "Make another entry",
            Self::Menu => "Back to main menu",
            Self::Exit => "Exit",
        }
    }
}

/// Result of one sub-flow attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FlowOutcome<T> {
    /// The record was written.
    Saved(T),
    /// The user declined at confirmation; nothing was written.
    Cancelled,
    /// A storage call failed; the message is fit for the terminal.
    Failed(String),
}

/// A record written by an entry sub-flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Saved {
    /// A new employee.
    Employee(EmployeeId),
    /// A new manager.
    Manager(ManagerId),
    /// A department, created or reused.
    Department(Resolved<DepartmentId>),
    /// A role, created or reused.
    Role(Resolved<RoleId>),
}

impl Saved {
    /// Success line shown to the user.
    #[must_use]
    pub fn message(&self) -> String {
        match self {
            Self::Employee(id) => format!("Employee added successfully with ID: {id}"),
            Self::Manager(id) => format!("Manager added successfully with ID: {id}"),
            Self::Department(r) if r.created => {
                format!("Department added successfully with ID: {}", r.id)
            }
            Self::Department(r) => format!("Department already exists with ID: {}", r.id),
            Self::Role(r) if r.created => format!("Role added successfully with ID: {}", r.id),
            Self::Role(r) => format!("Role already exists with ID: {}", r.id),
        }
    }
}

/// Configuration for the flow controller.
#[derive(Debug, Clone)]
pub struct ControlConfig {
    /// Consecutive failed attempts of one sub-flow before returning to the menu.
    pub max_attempts: u32,
}

impl Default for ControlConfig {
    fn default() -> Self {
        Self { max_attempts: 3 }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn saved_messages() {
        assert_eq!(
            Saved::Employee(EmployeeId::new(4)).message(),
            "Employee added successfully with ID: 4"
        );
        let reused = Resolved {
            id: DepartmentId::new(2),
            created: false,
        };
        assert_eq!(
            Saved::Department(reused).message(),
            "Department already exists with ID: 2"
        );
    }

    #[test]
    fn menu_labels_are_unique() {
        fn unique(labels: &[&str]) -> bool {
            labels.iter().collect::<HashSet<_>>().len() == labels.len()
        }
        assert!(unique(&Mode::ALL.map(Mode::label)));
        assert!(unique(&EntryKind::ALL.map(EntryKind::label)));
        assert!(unique(&Next::ALL.map(Next::label)));
        assert!(!unique(&["View", "Edit", "View"]));
    }

    #[test]
    fn control_config_defaults() {
        assert_eq!(ControlConfig::default().max_attempts, 3);
    }
}
