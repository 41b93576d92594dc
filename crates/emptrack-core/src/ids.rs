//! Core identifier types for emptrack.
//!
//! Every table uses an auto-increment `BIGINT UNSIGNED` primary key. The
//! newtypes here keep a role id from being passed where a manager id is
//! expected, which the raw integers could not.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

macro_rules! numeric_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(u64);

        impl $name {
            /// Wrap a raw database key.
            #[must_use]
            pub const fn new(raw: u64) -> Self {
                Self(raw)
            }

            /// Return the raw database key.
            #[must_use]
            pub const fn get(self) -> u64 {
                self.0
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!(stringify!($name), "({})"), self.0)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl FromStr for $name {
            type Err = IdError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                parse_key(s).map(Self)
            }
        }

        impl From<u64> for $name {
            fn from(raw: u64) -> Self {
                Self(raw)
            }
        }

        impl From<$name> for u64 {
            fn from(id: $name) -> Self {
                id.0
            }
        }
    };
}

numeric_id! {
    /// Primary key of a row in `departments`.
    DepartmentId
}

numeric_id! {
    /// Primary key of a row in `roles`.
    RoleId
}

numeric_id! {
    /// Primary key of a row in `employees`.
    EmployeeId
}

numeric_id! {
    /// Primary key of a row in `managers`.
    ManagerId
}

fn parse_key(s: &str) -> Result<u64, IdError> {
    let s = s.trim();
    if s.is_empty() {
        return Err(IdError::Empty);
    }
    if !s.bytes().all(|b| b.is_ascii_digit()) {
        return Err(IdError::NotNumeric(s.to_string()));
    }
    s.parse().map_err(|_| IdError::OutOfRange(s.to_string()))
}

/// Errors that can occur when parsing identifiers.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IdError {
    /// The input was empty.
    #[error("identifier is empty")]
    Empty,

    /// The input contains something other than ASCII digits.
    #[error("identifier is not numeric: {0}")]
    NotNumeric(String),

    /// The input does not fit in a 64-bit key.
    #[error("identifier out of range: {0}")]
    OutOfRange(String),
}
