//! Lookup-or-insert for departments and roles.
//!
//! A department is identified by its name; a role by its title together with
//! its department. An existing row is returned as-is: a caller-supplied salary
//! never overwrites the stored one.

use emptrack_core::{DepartmentId, RoleId};
use emptrack_store::{NewRole, Result, Store};
use rust_decimal::Decimal;

/// The identifier of a resolved row and whether this call created it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resolved<Id> {
    /// Row identifier.
    pub id: Id,
    /// True if the row was inserted by this call.
    pub created: bool,
}

impl<Id> Resolved<Id> {
    const fn existing(id: Id) -> Self {
        Self { id, created: false }
    }

    const fn inserted(id: Id) -> Self {
        Self { id, created: true }
    }
}

/// Return the id of the department named `name`, inserting it if needed.
///
/// # Errors
///
/// Returns a storage error if the lookup or the insert fails. Nothing is retried.
pub async fn resolve_department<S: Store + ?Sized>(
    store: &S,
    name: &str,
) -> Result<Resolved<DepartmentId>> {
    if let Some(department) = store.find_department_by_name(name).await? {
        tracing::debug!(department_id = %department.id, name, "Reusing department");
        return Ok(Resolved::existing(department.id));
    }

    let id = store.insert_department(name).await?;
    tracing::info!(department_id = %id, name, "Created department");
    Ok(Resolved::inserted(id))
}

/// Return the id of the role `title` in `department_id`, inserting it with
/// `salary` if needed.
///
/// # Errors
///
/// Returns a storage error if the lookup or the insert fails. Nothing is retried.
pub async fn resolve_role<S: Store + ?Sized>(
    store: &S,
    title: &str,
    department_id: Option<DepartmentId>,
    salary: Decimal,
) -> Result<Resolved<RoleId>> {
    if let Some(role) = store.find_role(title, department_id).await? {
        if role.salary != salary {
            tracing::debug!(
                role_id = %role.id,
                stored = %role.salary,
                requested = %salary,
                "Keeping stored salary for existing role"
            );
        }
        return Ok(Resolved::existing(role.id));
    }

    let id = store
        .insert_role(&NewRole {
            title: title.to_string(),
            salary,
            department_id,
        })
        .await?;
    tracing::info!(
        role_id = %id,
        title,
        department_id = ?department_id,
        "Created role"
    );
    Ok(Resolved::inserted(id))
}
