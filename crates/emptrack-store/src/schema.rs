//! Canonical table layout.
//!
//! The DDL is applied with `CREATE TABLE IF NOT EXISTS`, so running it against
//! an existing database is a no-op. Tables are listed in dependency order.
//! Department names and role titles use a binary collation so they compare
//! exactly.

/// Table names.
pub mod table {
    /// Department rows.
    pub const DEPARTMENTS: &str = "departments";

    /// Role rows, optionally owned by a department.
    pub const ROLES: &str = "roles";

    /// Manager rows, each owning a department and holding a role.
    pub const MANAGERS: &str = "managers";

    /// Employee rows, each holding a role and optionally reporting to a manager.
    pub const EMPLOYEES: &str = "employees";
}

/// `CREATE TABLE` statements in dependency order.
pub const CREATE_TABLES: [&str; 4] = [
    "CREATE TABLE IF NOT EXISTS departments (
        id BIGINT UNSIGNED NOT NULL AUTO_INCREMENT PRIMARY KEY,
        department_name VARCHAR(30) CHARACTER SET utf8mb4 COLLATE utf8mb4_bin NOT NULL
    )",
    "CREATE TABLE IF NOT EXISTS roles (
        id BIGINT UNSIGNED NOT NULL AUTO_INCREMENT PRIMARY KEY,
        title VARCHAR(30) CHARACTER SET utf8mb4 COLLATE utf8mb4_bin NOT NULL,
        salary DECIMAL(10, 2) NOT NULL,
        department_id BIGINT UNSIGNED NULL,
        FOREIGN KEY (department_id) REFERENCES departments (id) ON DELETE SET NULL
    )",
    "CREATE TABLE IF NOT EXISTS managers (
        id BIGINT UNSIGNED NOT NULL AUTO_INCREMENT PRIMARY KEY,
        first_name VARCHAR(30) NOT NULL,
        last_name VARCHAR(30) NOT NULL,
        department_id BIGINT UNSIGNED NOT NULL,
        role_id BIGINT UNSIGNED NOT NULL,
        FOREIGN KEY (department_id) REFERENCES departments (id),
        FOREIGN KEY (role_id) REFERENCES roles (id)
    )",
    "CREATE TABLE IF NOT EXISTS employees (
        id BIGINT UNSIGNED NOT NULL AUTO_INCREMENT PRIMARY KEY,
        first_name VARCHAR(30) NOT NULL,
        last_name VARCHAR(30) NOT NULL,
        role_id BIGINT UNSIGNED NOT NULL,
        manager_id BIGINT UNSIGNED NULL,
        FOREIGN KEY (role_id) REFERENCES roles (id),
        FOREIGN KEY (manager_id) REFERENCES managers (id) ON DELETE SET NULL
    )",
];

/// Returns all table names in creation order.
#[must_use]
pub fn all_tables() -> Vec<&'static str> {
    vec![
        table::DEPARTMENTS,
        table::ROLES,
        table::MANAGERS,
        table::EMPLOYEES,
    ]
}
