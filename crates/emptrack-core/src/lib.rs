//! Core types and utilities for emptrack.
//!
//! This crate provides the foundational types used throughout the employee tracker:
//!
//! - **Identifiers**: Strongly-typed IDs for departments, roles, employees, and managers
//! - **Validation**: The answer rules applied to every interactive prompt
//! - **Error types**: Common error definitions shared across crates
//!
//! # Example
//!
//! ```
//! use emptrack_core::{Rule, RoleId};
//!
//! assert!(Rule::Numeric.check("42").is_ok());
//! assert!(Rule::OptionalNumeric.check("").is_ok());
//!
//! let role_id: RoleId = "42".parse().unwrap();
//! assert_eq!(role_id.get(), 42);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod error;
pub mod ids;
pub mod validate;

pub use error::{CoreError, Result};
pub use ids::{DepartmentId, EmployeeId, IdError, ManagerId, RoleId};
pub use validate::{
    parse_id, parse_money, parse_optional_id, Rule, ValidationError, MAX_TEXT_LEN, SALARY_LIMIT,
};
