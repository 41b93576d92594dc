//! MySQL storage layer for emptrack.
//!
//! This crate is the persistence gateway: every row the tracker reads or
//! writes goes through the [`Store`] trait.
//!
//! # Architecture
//!
//! The canonical schema has four tables (see [`schema`]):
//!
//! - `departments`: `id`, `department_name`
//! - `roles`: `id`, `title`, `salary`, `department_id` (nullable)
//! - `managers`: `id`, `first_name`, `last_name`, `department_id`, `role_id`
//! - `employees`: `id`, `first_name`, `last_name`, `role_id`, `manager_id` (nullable)
//!
//! [`MySqlStore`] talks to a real server through a `sqlx` pool;
//! [`MemoryStore`] keeps the same tables in process.
//!
//! # Example
//!
//! ```no_run
//! use emptrack_store::{DatabaseConfig, MySqlStore, Store};
//!
//! # async fn example() -> emptrack_store::Result<()> {
//! let store = MySqlStore::connect(&DatabaseConfig::default()).await?;
//! for department in store.list_departments().await? {
//!     println!("{} {}", department.id, department.name);
//! }
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod config;
pub mod error;
pub mod memory;
pub mod mysql;
pub mod schema;
pub mod types;

pub use config::DatabaseConfig;
pub use error::{Result, StoreError};
pub use memory::{MemoryStore, OperationCounts};
pub use mysql::MySqlStore;
pub use types::{
    Department, DepartmentChanges, Employee, EmployeeChanges, Manager, ManagerChanges, NewEmployee,
    NewManager, NewRole, Role, RoleChanges, SalaryRow,
};

use async_trait::async_trait;
use emptrack_core::{DepartmentId, EmployeeId, ManagerId, RoleId};

/// The storage trait defining all database operations.
///
/// This trait abstracts the storage layer, allowing for different implementations
/// (e.g., MySQL, in-memory for testing). Calls are issued one at a time by a
/// single session; implementations need no cross-call atomicity.
#[async_trait]
pub trait Store: Send + Sync {
    // =========================================================================
    // Department Operations
    // =========================================================================

    /// Find a department by exact name.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    async fn find_department_by_name(&self, name: &str) -> Result<Option<Department>>;

    /// Get a department by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    async fn get_department(&self, id: DepartmentId) -> Result<Option<Department>>;

    /// Insert a department and return its generated ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    async fn insert_department(&self, name: &str) -> Result<DepartmentId>;

    /// List all departments ordered by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    async fn list_departments(&self) -> Result<Vec<Department>>;

    /// Update the given columns of a department.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::NotFound` if the department doesn't exist.
    async fn update_department(&self, id: DepartmentId, changes: &DepartmentChanges)
        -> Result<()>;

    // =========================================================================
    // Role Operations
    // =========================================================================

    /// Find a role by its natural key: exact title plus department.
    ///
    /// A `None` department matches only roles without a department.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    async fn find_role(&self, title: &str, department_id: Option<DepartmentId>)
        -> Result<Option<Role>>;

    /// Get a role by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    async fn get_role(&self, id: RoleId) -> Result<Option<Role>>;

    /// Insert a role and return its generated ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    async fn insert_role(&self, role: &NewRole) -> Result<RoleId>;

    /// List all roles ordered by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    async fn list_roles(&self) -> Result<Vec<Role>>;

    /// Update the given columns of a role.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::NotFound` if the role doesn't exist.
    async fn update_role(&self, id: RoleId, changes: &RoleChanges) -> Result<()>;

    // =========================================================================
    // Employee Operations
    // =========================================================================

    /// Get an employee by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    async fn get_employee(&self, id: EmployeeId) -> Result<Option<Employee>>;

    /// Insert an employee and return the generated ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    async fn insert_employee(&self, employee: &NewEmployee) -> Result<EmployeeId>;

    /// List all employees ordered by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    async fn list_employees(&self) -> Result<Vec<Employee>>;

    /// Update the given columns of an employee.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::NotFound` if the employee doesn't exist.
    async fn update_employee(&self, id: EmployeeId, changes: &EmployeeChanges) -> Result<()>;

    /// List every employee with their role title and salary.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    async fn list_salaries(&self) -> Result<Vec<SalaryRow>>;

    // =========================================================================
    // Manager Operations
    // =========================================================================

    /// Get a manager by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    async fn get_manager(&self, id: ManagerId) -> Result<Option<Manager>>;

    /// Insert a manager and return the generated ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    async fn insert_manager(&self, manager: &NewManager) -> Result<ManagerId>;

    /// List all managers ordered by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    async fn list_managers(&self) -> Result<Vec<Manager>>;

    /// Update the given columns of a manager.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::NotFound` if the manager doesn't exist.
    async fn update_manager(&self, id: ManagerId, changes: &ManagerChanges) -> Result<()>;
}
