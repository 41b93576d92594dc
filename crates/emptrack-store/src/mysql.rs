//! MySQL storage implementation.
//!
//! This module provides the `MySqlStore` implementation of the `Store` trait.
//! Every statement is parameterized; only table and column names, which come
//! from constants, are spliced into SQL text.

use async_trait::async_trait;
use emptrack_core::{DepartmentId, EmployeeId, ManagerId, RoleId};
use rust_decimal::Decimal;
use sqlx::mysql::{MySqlConnectOptions, MySqlPool, MySqlPoolOptions};
use sqlx::{FromRow, MySql, QueryBuilder};

use crate::config::DatabaseConfig;
use crate::error::{Result, StoreError};
use crate::schema::{all_tables, table, CREATE_TABLES};
use crate::types::{
    Department, DepartmentChanges, Employee, EmployeeChanges, Manager, ManagerChanges,
    NewEmployee, NewManager, NewRole, Role, RoleChanges, SalaryRow,
};
use crate::Store;

/// MySQL-backed storage implementation.
#[derive(Debug, Clone)]
pub struct MySqlStore {
    pool: MySqlPool,
}

impl MySqlStore {
    /// Open a connection pool using the given settings.
    ///
    /// # Errors
    ///
    /// Returns an error if the server cannot be reached or rejects the login.
    pub async fn connect(config: &DatabaseConfig) -> Result<Self> {
        if config.pool_size == 0 {
            return Err(StoreError::Config("pool size must be at least 1".to_string()));
        }

        let options = MySqlConnectOptions::new()
            .host(&config.host)
            .port(config.port)
            .username(&config.user)
            .password(&config.password)
            .database(&config.database);

        let pool = MySqlPoolOptions::new()
            .max_connections(config.pool_size)
            .acquire_timeout(config.connect_timeout())
            .connect_with(options)
            .await?;

        tracing::info!(
            host = %config.host,
            port = config.port,
            database = %config.database,
            pool_size = config.pool_size,
            "Connected to MySQL"
        );

        Ok(Self { pool })
    }

    /// Wrap an existing pool.
    #[must_use]
    pub const fn from_pool(pool: MySqlPool) -> Self {
        Self { pool }
    }

    /// Get a reference to the connection pool.
    #[must_use]
    pub const fn pool(&self) -> &MySqlPool {
        &self.pool
    }

    /// Create any missing tables.
    ///
    /// # Errors
    ///
    /// Returns an error if a `CREATE TABLE` statement fails.
    pub async fn ensure_schema(&self) -> Result<()> {
        for (name, ddl) in all_tables().into_iter().zip(CREATE_TABLES) {
            tracing::debug!(table = name, "Creating table if missing");
            sqlx::query(ddl).execute(&self.pool).await?;
        }
        tracing::info!("Schema is in place");
        Ok(())
    }

    /// Distinguish "no such row" from "row already had these values".
    ///
    /// MySQL reports zero affected rows in both cases.
    async fn ensure_exists(&self, table: &str, id: u64) -> Result<()> {
        let sql = format!("SELECT id FROM {table} WHERE id = ?");
        let found: Option<(u64,)> = sqlx::query_as(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        found.map(|_| ()).ok_or(StoreError::NotFound)
    }

    /// Run a built `UPDATE` and map "nothing matched" to `NotFound`.
    async fn run_update(
        &self,
        mut builder: QueryBuilder<'_, MySql>,
        table: &str,
        id: u64,
    ) -> Result<()> {
        builder.push(" WHERE id = ").push_bind(id);
        let result = builder.build().execute(&self.pool).await?;
        if result.rows_affected() == 0 {
            self.ensure_exists(table, id).await?;
        }
        Ok(())
    }
}

// =============================================================================
// Row mappings
// =============================================================================

#[derive(FromRow)]
struct DepartmentRow {
    id: u64,
    department_name: String,
}

impl From<DepartmentRow> for Department {
    fn from(row: DepartmentRow) -> Self {
        Self {
            id: DepartmentId::new(row.id),
            name: row.department_name,
        }
    }
}

#[derive(FromRow)]
struct RoleRow {
    id: u64,
    title: String,
    salary: Decimal,
    department_id: Option<u64>,
}

impl From<RoleRow> for Role {
    fn from(row: RoleRow) -> Self {
        Self {
            id: RoleId::new(row.id),
            title: row.title,
            salary: row.salary,
            department_id: row.department_id.map(DepartmentId::new),
        }
    }
}

#[derive(FromRow)]
struct EmployeeRow {
    id: u64,
    first_name: String,
    last_name: String,
    role_id: u64,
    manager_id: Option<u64>,
}

impl From<EmployeeRow> for Employee {
    fn from(row: EmployeeRow) -> Self {
        Self {
            id: EmployeeId::new(row.id),
            first_name: row.first_name,
            last_name: row.last_name,
            role_id: RoleId::new(row.role_id),
            manager_id: row.manager_id.map(ManagerId::new),
        }
    }
}

#[derive(FromRow)]
struct ManagerRow {
    id: u64,
    first_name: String,
    last_name: String,
    department_id: u64,
    role_id: u64,
}

impl From<ManagerRow> for Manager {
    fn from(row: ManagerRow) -> Self {
        Self {
            id: ManagerId::new(row.id),
            first_name: row.first_name,
            last_name: row.last_name,
            department_id: DepartmentId::new(row.department_id),
            role_id: RoleId::new(row.role_id),
        }
    }
}

#[derive(FromRow)]
struct SalaryRecord {
    first_name: String,
    last_name: String,
    title: String,
    salary: Decimal,
}

impl From<SalaryRecord> for SalaryRow {
    fn from(row: SalaryRecord) -> Self {
        Self {
            first_name: row.first_name,
            last_name: row.last_name,
            title: row.title,
            salary: row.salary,
        }
    }
}

#[async_trait]
impl Store for MySqlStore {
    // =========================================================================
    // Department Operations
    // =========================================================================

    // Natural keys compare byte for byte, whatever the table collation, so
    // "Sales" and "sales" are different departments here as in `MemoryStore`.
    async fn find_department_by_name(&self, name: &str) -> Result<Option<Department>> {
        let row = sqlx::query_as::<_, DepartmentRow>(
            "SELECT id, department_name FROM departments \
             WHERE CAST(department_name AS BINARY) = CAST(? AS BINARY) ORDER BY id LIMIT 1",
        )
        .bind(name)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Department::from))
    }

    async fn get_department(&self, id: DepartmentId) -> Result<Option<Department>> {
        let row = sqlx::query_as::<_, DepartmentRow>(
            "SELECT id, department_name FROM departments WHERE id = ?",
        )
        .bind(id.get())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Department::from))
    }

    async fn insert_department(&self, name: &str) -> Result<DepartmentId> {
        let result = sqlx::query("INSERT INTO departments (department_name) VALUES (?)")
            .bind(name)
            .execute(&self.pool)
            .await?;

        Ok(DepartmentId::new(result.last_insert_id()))
    }

    async fn list_departments(&self) -> Result<Vec<Department>> {
        let rows = sqlx::query_as::<_, DepartmentRow>(
            "SELECT id, department_name FROM departments ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Department::from).collect())
    }

    async fn update_department(
        &self,
        id: DepartmentId,
        changes: &DepartmentChanges,
    ) -> Result<()> {
        if changes.is_empty() {
            return self.ensure_exists(table::DEPARTMENTS, id.get()).await;
        }

        let mut builder = QueryBuilder::<MySql>::new("UPDATE departments SET ");
        if let Some(name) = &changes.name {
            builder.push("department_name = ").push_bind(name.clone());
        }
        self.run_update(builder, table::DEPARTMENTS, id.get()).await
    }

    // =========================================================================
    // Role Operations
    // =========================================================================

    async fn find_role(
        &self,
        title: &str,
        department_id: Option<DepartmentId>,
    ) -> Result<Option<Role>> {
        // `<=>` is MySQL's null-safe equality, so a NULL department matches NULL.
        let row = sqlx::query_as::<_, RoleRow>(
            "SELECT id, title, salary, department_id FROM roles \
             WHERE CAST(title AS BINARY) = CAST(? AS BINARY) AND department_id <=> ? ORDER BY id LIMIT 1",
        )
        .bind(title)
        .bind(department_id.map(DepartmentId::get))
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Role::from))
    }

    async fn get_role(&self, id: RoleId) -> Result<Option<Role>> {
        let row = sqlx::query_as::<_, RoleRow>(
            "SELECT id, title, salary, department_id FROM roles WHERE id = ?",
        )
        .bind(id.get())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Role::from))
    }

    async fn insert_role(&self, role: &NewRole) -> Result<RoleId> {
        let result =
            sqlx::query("INSERT INTO roles (title, salary, department_id) VALUES (?, ?, ?)")
                .bind(&role.title)
                .bind(role.salary)
                .bind(role.department_id.map(DepartmentId::get))
                .execute(&self.pool)
                .await?;

        Ok(RoleId::new(result.last_insert_id()))
    }

    async fn list_roles(&self) -> Result<Vec<Role>> {
        let rows = sqlx::query_as::<_, RoleRow>(
            "SELECT id, title, salary, department_id FROM roles ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Role::from).collect())
    }

    async fn update_role(&self, id: RoleId, changes: &RoleChanges) -> Result<()> {
        if changes.is_empty() {
            return self.ensure_exists(table::ROLES, id.get()).await;
        }

        let mut builder = QueryBuilder::<MySql>::new("UPDATE roles SET ");
        {
            let mut set = builder.separated(", ");
            if let Some(title) = &changes.title {
                set.push("title = ").push_bind_unseparated(title.clone());
            }
            if let Some(salary) = changes.salary {
                set.push("salary = ").push_bind_unseparated(salary);
            }
            if let Some(department_id) = changes.department_id {
                set.push("department_id = ")
                    .push_bind_unseparated(department_id.map(DepartmentId::get));
            }
        }
        self.run_update(builder, table::ROLES, id.get()).await
    }

    // =========================================================================
    // Employee Operations
    // =========================================================================

    async fn get_employee(&self, id: EmployeeId) -> Result<Option<Employee>> {
        let row = sqlx::query_as::<_, EmployeeRow>(
            "SELECT id, first_name, last_name, role_id, manager_id FROM employees WHERE id = ?",
        )
        .bind(id.get())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Employee::from))
    }

    async fn insert_employee(&self, employee: &NewEmployee) -> Result<EmployeeId> {
        let result = sqlx::query(
            "INSERT INTO employees (first_name, last_name, role_id, manager_id) VALUES (?, ?, ?, ?)",
        )
        .bind(&employee.first_name)
        .bind(&employee.last_name)
        .bind(employee.role_id.get())
        .bind(employee.manager_id.map(ManagerId::get))
        .execute(&self.pool)
        .await?;

        Ok(EmployeeId::new(result.last_insert_id()))
    }

    async fn list_employees(&self) -> Result<Vec<Employee>> {
        let rows = sqlx::query_as::<_, EmployeeRow>(
            "SELECT id, first_name, last_name, role_id, manager_id FROM employees ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Employee::from).collect())
    }

    async fn update_employee(&self, id: EmployeeId, changes: &EmployeeChanges) -> Result<()> {
        if changes.is_empty() {
            return self.ensure_exists(table::EMPLOYEES, id.get()).await;
        }

        let mut builder = QueryBuilder::<MySql>::new("UPDATE employees SET ");
        {
            let mut set = builder.separated(", ");
            if let Some(first_name) = &changes.first_name {
                set.push("first_name = ")
                    .push_bind_unseparated(first_name.clone());
            }
            if let Some(last_name) = &changes.last_name {
                set.push("last_name = ").push_bind_unseparated(last_name.clone());
            }
            if let Some(role_id) = changes.role_id {
                set.push("role_id = ").push_bind_unseparated(role_id.get());
            }
            if let Some(manager_id) = changes.manager_id {
                set.push("manager_id = ")
                    .push_bind_unseparated(manager_id.map(ManagerId::get));
            }
        }
        self.run_update(builder, table::EMPLOYEES, id.get()).await
    }

    async fn list_salaries(&self) -> Result<Vec<SalaryRow>> {
        let rows = sqlx::query_as::<_, SalaryRecord>(
            "SELECT e.first_name, e.last_name, r.title, r.salary \
             FROM employees e JOIN roles r ON r.id = e.role_id ORDER BY e.id",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(SalaryRow::from).collect())
    }

    // =========================================================================
    // Manager Operations
    // =========================================================================

    async fn get_manager(&self, id: ManagerId) -> Result<Option<Manager>> {
        let row = sqlx::query_as::<_, ManagerRow>(
            "SELECT id, first_name, last_name, department_id, role_id FROM managers WHERE id = ?",
        )
        .bind(id.get())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Manager::from))
    }

    async fn insert_manager(&self, manager: &NewManager) -> Result<ManagerId> {
        let result = sqlx::query(
            "INSERT INTO managers (first_name, last_name, department_id, role_id) VALUES (?, ?, ?, ?)",
        )
        .bind(&manager.first_name)
        .bind(&manager.last_name)
        .bind(manager.department_id.get())
        .bind(manager.role_id.get())
        .execute(&self.pool)
        .await?;

        Ok(ManagerId::new(result.last_insert_id()))
    }

    async fn list_managers(&self) -> Result<Vec<Manager>> {
        let rows = sqlx::query_as::<_, ManagerRow>(
            "SELECT id, first_name, last_name, department_id, role_id FROM managers ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Manager::from).collect())
    }

    async fn update_manager(&self, id: ManagerId, changes: &ManagerChanges) -> Result<()> {
        if changes.is_empty() {
            return self.ensure_exists(table::MANAGERS, id.get()).await;
        }

        let mut builder = QueryBuilder::<MySql>::new("UPDATE managers SET ");
        {
            let mut set = builder.separated(", ");
            if let Some(first_name) = &changes.first_name {
                set.push("first_name = ")
                    .push_bind_unseparated(first_name.clone());
            }
            if let Some(last_name) = &changes.last_name {
                set.push("last_name = ").push_bind_unseparated(last_name.clone());
            }
            if let Some(department_id) = changes.department_id {
                set.push("department_id = ")
                    .push_bind_unseparated(department_id.get());
            }
            if let Some(role_id) = changes.role_id {
                set.push("role_id = ").push_bind_unseparated(role_id.get());
            }
        }
        self.run_update(builder, table::MANAGERS, id.get()).await
    }
}
