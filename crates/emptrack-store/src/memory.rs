//! In-process storage implementation.
//!
//! `MemoryStore` keeps the four tables in vectors behind a mutex and hands out
//! sequential IDs starting at 1, like `AUTO_INCREMENT`. It also counts how many
//! reads, inserts, and updates it has served.

use std::sync::atomic::{AtomicU32, Ordering};

use async_trait::async_trait;
use emptrack_core::{DepartmentId, EmployeeId, ManagerId, RoleId};
use parking_lot::Mutex;

use crate::error::{Result, StoreError};
use crate::types::{
    Department, DepartmentChanges, Employee, EmployeeChanges, Manager, ManagerChanges,
    NewEmployee, NewManager, NewRole, Role, RoleChanges, SalaryRow,
};
use crate::Store;

/// Number of calls served, by kind.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OperationCounts {
    /// `find_*`, `get_*`, and `list_*` calls.
    pub reads: u32,
    /// `insert_*` calls.
    pub inserts: u32,
    /// `update_*` calls.
    pub updates: u32,
}

#[derive(Debug, Default)]
struct Tables {
    departments: Vec<Department>,
    roles: Vec<Role>,
    employees: Vec<Employee>,
    managers: Vec<Manager>,
    next_department: u64,
    next_role: u64,
    next_employee: u64,
    next_manager: u64,
    counts: OperationCounts,
}

fn next_key(counter: &mut u64) -> u64 {
    *counter += 1;
    *counter
}

/// In-memory storage implementation.
#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: Mutex<Tables>,
    failures: AtomicU32,
}

impl MemoryStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Calls served so far.
    #[must_use]
    pub fn counts(&self) -> OperationCounts {
        self.tables.lock().counts
    }

    /// Make the next `n` inserts or updates fail with a database error.
    #[cfg(any(test, feature = "test-utils"))]
    pub fn fail_next_writes(&self, n: u32) {
        self.failures.store(n, Ordering::SeqCst);
    }

    fn check_write(&self) -> Result<()> {
        let injected = self
            .failures
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1));
        if injected.is_ok() {
            return Err(StoreError::Database("injected write failure".to_string()));
        }
        Ok(())
    }

    fn read<T>(&self, f: impl FnOnce(&Tables) -> T) -> T {
        let mut tables = self.tables.lock();
        tables.counts.reads += 1;
        f(&tables)
    }

    fn insert<T>(&self, f: impl FnOnce(&mut Tables) -> T) -> Result<T> {
        self.check_write()?;
        let mut tables = self.tables.lock();
        tables.counts.inserts += 1;
        Ok(f(&mut tables))
    }

    fn update(&self, f: impl FnOnce(&mut Tables) -> Result<()>) -> Result<()> {
        self.check_write()?;
        let mut tables = self.tables.lock();
        tables.counts.updates += 1;
        f(&mut tables)
    }
}

#[async_trait]
impl Store for MemoryStore {
    // =========================================================================
    // Department Operations
    // =========================================================================

    async fn find_department_by_name(&self, name: &str) -> Result<Option<Department>> {
        Ok(self.read(|t| t.departments.iter().find(|d| d.name == name).cloned()))
    }

    async fn get_department(&self, id: DepartmentId) -> Result<Option<Department>> {
        Ok(self.read(|t| t.departments.iter().find(|d| d.id == id).cloned()))
    }

    async fn insert_department(&self, name: &str) -> Result<DepartmentId> {
        self.insert(|t| {
            let id = DepartmentId::new(next_key(&mut t.next_department));
            t.departments.push(Department {
                id,
                name: name.to_string(),
            });
            id
        })
    }

    async fn list_departments(&self) -> Result<Vec<Department>> {
        Ok(self.read(|t| t.departments.clone()))
    }

    async fn update_department(
        &self,
        id: DepartmentId,
        changes: &DepartmentChanges,
    ) -> Result<()> {
        self.update(|t| {
            let row = t
                .departments
                .iter_mut()
                .find(|d| d.id == id)
                .ok_or(StoreError::NotFound)?;
            changes.apply_to(row);
            Ok(())
        })
    }

    // =========================================================================
    // Role Operations
    // =========================================================================

    async fn find_role(
        &self,
        title: &str,
        department_id: Option<DepartmentId>,
    ) -> Result<Option<Role>> {
        Ok(self.read(|t| {
            t.roles
                .iter()
                .find(|r| r.title == title && r.department_id == department_id)
                .cloned()
        }))
    }

    async fn get_role(&self, id: RoleId) -> Result<Option<Role>> {
        Ok(self.read(|t| t.roles.iter().find(|r| r.id == id).cloned()))
    }

    async fn insert_role(&self, role: &NewRole) -> Result<RoleId> {
        self.insert(|t| {
            let id = RoleId::new(next_key(&mut t.next_role));
            t.roles.push(Role {
                id,
                title: role.title.clone(),
                salary: role.salary,
                department_id: role.department_id,
            });
            id
        })
    }

    async fn list_roles(&self) -> Result<Vec<Role>> {
        Ok(self.read(|t| t.roles.clone()))
    }

    async fn update_role(&self, id: RoleId, changes: &RoleChanges) -> Result<()> {
        self.update(|t| {
            let row = t
                .roles
                .iter_mut()
                .find(|r| r.id == id)
                .ok_or(StoreError::NotFound)?;
            changes.apply_to(row);
            Ok(())
        })
    }

    // =========================================================================
    // Employee Operations
    // =========================================================================

    async fn get_employee(&self, id: EmployeeId) -> Result<Option<Employee>> {
        Ok(self.read(|t| t.employees.iter().find(|e| e.id == id).cloned()))
    }

    async fn insert_employee(&self, employee: &NewEmployee) -> Result<EmployeeId> {
        self.insert(|t| {
            let id = EmployeeId::new(next_key(&mut t.next_employee));
            t.employees.push(Employee {
                id,
                first_name: employee.first_name.clone(),
                last_name: employee.last_name.clone(),
                role_id: employee.role_id,
                manager_id: employee.manager_id,
            });
            id
        })
    }

    async fn list_employees(&self) -> Result<Vec<Employee>> {
        Ok(self.read(|t| t.employees.clone()))
    }

    async fn update_employee(&self, id: EmployeeId, changes: &EmployeeChanges) -> Result<()> {
        self.update(|t| {
            let row = t
                .employees
                .iter_mut()
                .find(|e| e.id == id)
                .ok_or(StoreError::NotFound)?;
            changes.apply_to(row);
            Ok(())
        })
    }

    async fn list_salaries(&self) -> Result<Vec<SalaryRow>> {
        Ok(self.read(|t| {
            t.employees
                .iter()
                .filter_map(|e| {
                    let role = t.roles.iter().find(|r| r.id == e.role_id)?;
                    Some(SalaryRow {
                        first_name: e.first_name.clone(),
                        last_name: e.last_name.clone(),
                        title: role.title.clone(),
                        salary: role.salary,
                    })
                })
                .collect()
        }))
    }

    // =========================================================================
    // Manager Operations
    // =========================================================================

    async fn get_manager(&self, id: ManagerId) -> Result<Option<Manager>> {
        Ok(self.read(|t| t.managers.iter().find(|m| m.id == id).cloned()))
    }

    async fn insert_manager(&self, manager: &NewManager) -> Result<ManagerId> {
        self.insert(|t| {
            let id = ManagerId::new(next_key(&mut t.next_manager));
            t.managers.push(Manager {
                id,
                first_name: manager.first_name.clone(),
                last_name: manager.last_name.clone(),
                department_id: manager.department_id,
                role_id: manager.role_id,
            });
            id
        })
    }

    async fn list_managers(&self) -> Result<Vec<Manager>> {
        Ok(self.read(|t| t.managers.clone()))
    }

    async fn update_manager(&self, id: ManagerId, changes: &ManagerChanges) -> Result<()> {
        self.update(|t| {
            let row = t
                .managers
                .iter_mut()
                .find(|m| m.id == id)
                .ok_or(StoreError::NotFound)?;
            changes.apply_to(row);
            Ok(())
        })
    }
}
