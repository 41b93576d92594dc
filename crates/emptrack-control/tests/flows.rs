//! End-to-end prompt sessions against the in-memory store.
//!
//! Each test scripts a whole session with `ScriptedPrompter`, runs the
//! controller until the script says Exit (or runs out), and then inspects the
//! store and the transcript.

use emptrack_control::{ControlConfig, Controller, ScriptedPrompter, Tone};
use emptrack_core::{EmployeeId, RoleId};
use emptrack_store::{MemoryStore, NewEmployee, NewRole, Store};
use rust_decimal::Decimal;

async fn run(store: &MemoryStore, script: &[&str]) -> ScriptedPrompter {
    run_with(store, script, ControlConfig::default()).await
}

async fn run_with(store: &MemoryStore, script: &[&str], config: ControlConfig) -> ScriptedPrompter {
    let mut prompter = ScriptedPrompter::new(script.iter().copied());
    Controller::new(store, &mut prompter, config)
        .run()
        .await
        .expect("session ends cleanly");
    prompter
}

/// One employee with a new role in a new department, no manager.
const ADA: [&str; 9] = [
    "Ada",
    "Lovelace",
    "y",
    "Engineer",
    "90000",
    "New department",
    "R&D",
    "",
    "y",
];

async fn seed_employee(store: &MemoryStore) -> (RoleId, EmployeeId) {
    let role = store
        .insert_role(&NewRole {
            title: "Engineer".to_string(),
            salary: Decimal::new(90000, 0),
            department_id: None,
        })
        .await
        .unwrap();
    let employee = store
        .insert_employee(&NewEmployee {
            first_name: "Ada".to_string(),
            last_name: "Lovelace".to_string(),
            role_id: role,
            manager_id: None,
        })
        .await
        .unwrap();
    (role, employee)
}

// =============================================================================
// Entry
// =============================================================================

#[tokio::test]
async fn employee_with_new_role_and_department() {
    let store = MemoryStore::new();
    let mut script = vec!["Entry", "Employee"];
    script.extend(ADA);
    script.push("Exit");

    let prompter = run(&store, &script).await;

    let departments = store.list_departments().await.unwrap();
    let roles = store.list_roles().await.unwrap();
    let employees = store.list_employees().await.unwrap();
    assert_eq!(departments.len(), 1);
    assert_eq!(departments[0].name, "R&D");
    assert_eq!(roles.len(), 1);
    assert_eq!(roles[0].title, "Engineer");
    assert_eq!(roles[0].salary, Decimal::new(90000, 0));
    assert_eq!(roles[0].department_id, Some(departments[0].id));
    assert_eq!(employees.len(), 1);
    assert_eq!(employees[0].role_id, roles[0].id);
    assert_eq!(employees[0].manager_id, None);

    assert_eq!(
        prompter.notices(Tone::Success),
        vec!["Employee added successfully with ID: 1"]
    );
    assert_eq!(prompter.remaining(), 0);
}

#[tokio::test]
async fn second_employee_reuses_role() {
    let store = MemoryStore::new();
    let mut script = vec!["Entry", "Employee"];
    script.extend(ADA);
    script.push("Make another entry");
    script.extend([
        "Grace",
        "Hopper",
        "y",
        "Engineer",
        "120000",
        "New department",
        "R&D",
        "",
        "y",
    ]);
    script.push("Exit");

    run(&store, &script).await;

    let employees = store.list_employees().await.unwrap();
    assert_eq!(employees.len(), 2);
    assert_eq!(employees[0].role_id, employees[1].role_id);

    let roles = store.list_roles().await.unwrap();
    assert_eq!(roles.len(), 1);
    // The first salary sticks.
    assert_eq!(roles[0].salary, Decimal::new(90000, 0));
    assert_eq!(store.list_departments().await.unwrap().len(), 1);
    // department, role, employee, then employee alone.
    assert_eq!(store.counts().inserts, 4);
}

#[tokio::test]
async fn cancel_restarts_without_writing() {
    let store = MemoryStore::new();
    let mut script = vec!["Entry", "Employee"];
    script.extend(&ADA[..8]);
    script.push("n");

    let prompter = run(&store, &script).await;

    assert_eq!(store.counts().inserts, 0);
    assert_eq!(store.counts().reads, 0);
    let asked = prompter.asked();
    let first_name = "Enter the employee's first name:";
    assert_eq!(asked.iter().filter(|q| **q == first_name).count(), 2);
    assert_eq!(asked.last(), Some(&first_name));
    assert_eq!(
        prompter.notices(Tone::Info).first().copied(),
        Some("New employee:\n  Name: Ada Lovelace\n  Role: Engineer (salary 90000, department R&D)\n  Manager: none")
    );
}

#[tokio::test]
async fn unknown_role_id_is_asked_again() {
    let store = MemoryStore::new();
    let (role, _) = seed_employee(&store).await;
    let role = role.to_string();

    let prompter = run(
        &store,
        &["Entry", "Employee", "Grace", "Hopper", "n", "7", role.as_str(), "", "y", "Exit"],
    )
    .await;

    assert_eq!(prompter.notices(Tone::Warning), vec!["No role with ID 7."]);
    let employees = store.list_employees().await.unwrap();
    assert_eq!(employees.len(), 2);
    assert_eq!(employees[1].role_id.to_string(), role);
}

#[tokio::test]
async fn unknown_manager_id_is_asked_again() {
    let store = MemoryStore::new();
    let (role, _) = seed_employee(&store).await;
    let role = role.to_string();

    let prompter = run(
        &store,
        &["Entry", "Employee", "Grace", "Hopper", "n", role.as_str(), "3", "", "y", "Exit"],
    )
    .await;

    assert_eq!(prompter.notices(Tone::Warning), vec!["No manager with ID 3."]);
    assert_eq!(store.list_employees().await.unwrap()[1].manager_id, None);
}

#[tokio::test]
async fn invalid_answers_are_asked_again() {
    let store = MemoryStore::new();

    let prompter = run(
        &store,
        &[
            "Entry", "Role", "  ", "Analyst", "-5", "0", "12.345", "55000.5", "No department",
            "y", "Exit",
        ],
    )
    .await;

    let warnings = prompter.notices(Tone::Warning);
    assert_eq!(warnings.len(), 4);
    assert_eq!(warnings[0], "Please enter a valid role title.");
    let roles = store.list_roles().await.unwrap();
    assert_eq!(roles.len(), 1);
    assert_eq!(roles[0].salary, Decimal::new(550_005, 1));
    assert_eq!(roles[0].department_id, None);
}

#[tokio::test]
async fn manager_with_new_department_and_role() {
    let store = MemoryStore::new();

    let prompter = run(
        &store,
        &[
            "Entry", "Manager", "Grace", "Hopper", "y", "Ops", "y", "Director", "150000", "y",
            "Exit",
        ],
    )
    .await;

    let departments = store.list_departments().await.unwrap();
    let roles = store.list_roles().await.unwrap();
    let managers = store.list_managers().await.unwrap();
    assert_eq!(departments.len(), 1);
    assert_eq!(roles.len(), 1);
    assert_eq!(roles[0].department_id, Some(departments[0].id));
    assert_eq!(managers.len(), 1);
    assert_eq!(managers[0].department_id, departments[0].id);
    assert_eq!(managers[0].role_id, roles[0].id);
    assert_eq!(
        prompter.notices(Tone::Success),
        vec!["Manager added successfully with ID: 1"]
    );
}

#[tokio::test]
async fn existing_department_is_reported_as_reused() {
    let store = MemoryStore::new();
    store.insert_department("Sales").await.unwrap();

    let prompter = run(&store, &["Entry", "Department", "Sales", "y", "Back to main menu", "Exit"]).await;

    assert_eq!(store.list_departments().await.unwrap().len(), 1);
    assert_eq!(
        prompter.notices(Tone::Success),
        vec!["Department already exists with ID: 1"]
    );
}

#[tokio::test]
async fn failed_save_restarts_the_sub_flow() {
    let store = MemoryStore::new();
    store.fail_next_writes(1);

    let prompter = run(
        &store,
        &["Entry", "Department", "Sales", "y", "Sales", "y", "Exit"],
    )
    .await;

    assert_eq!(prompter.notices(Tone::Error).len(), 1);
    assert!(prompter.notices(Tone::Error)[0].contains("injected write failure"));
    assert_eq!(store.list_departments().await.unwrap().len(), 1);
}

#[tokio::test]
async fn repeated_failures_return_to_menu() {
    let store = MemoryStore::new();
    store.fail_next_writes(2);

    let prompter = run_with(
        &store,
        &["Entry", "Department", "Ops", "y", "Ops", "y", "Exit"],
        ControlConfig { max_attempts: 2 },
    )
    .await;

    let errors = prompter.notices(Tone::Error);
    assert_eq!(errors.len(), 3);
    assert_eq!(errors[2], "Too many failed attempts. Returning to the main menu.");
    assert!(store.list_departments().await.unwrap().is_empty());
    assert_eq!(prompter.notices(Tone::Info).last().copied(), Some("Goodbye!"));
}

// =============================================================================
// View
// =============================================================================

#[tokio::test]
async fn view_employees_reads_once() {
    let store = MemoryStore::new();
    seed_employee(&store).await;
    let before = store.counts();

    let prompter = run(&store, &["View", "All Employees", "Exit"]).await;

    assert_eq!(store.counts().reads - before.reads, 1);
    let tables = prompter.tables();
    assert_eq!(tables.len(), 1);
    assert_eq!(tables[0].title, "Employees");
    assert_eq!(tables[0].rows, vec![vec!["1", "Ada", "Lovelace", "1", ""]]);
}

#[tokio::test]
async fn view_all_tables_and_salaries() {
    let store = MemoryStore::new();
    seed_employee(&store).await;

    let prompter = run(
        &store,
        &["View", "All Tables", "View", "Employee Salaries", "Exit"],
    )
    .await;

    let titles: Vec<&str> = prompter.tables().iter().map(|t| t.title.as_str()).collect();
    assert_eq!(
        titles,
        vec!["Departments", "Roles", "Employees", "Managers", "Salaries"]
    );
    let salaries = prompter.tables()[4];
    assert_eq!(salaries.rows, vec![vec!["Ada", "Lovelace", "Engineer", "90000"]]);
}

// =============================================================================
// Edit
// =============================================================================

#[tokio::test]
async fn edit_changes_only_selected_columns() {
    let store = MemoryStore::new();
    let (role, employee) = seed_employee(&store).await;

    let prompter = run(&store, &["Edit", "Employee", "1", "Last name", "King", "Exit"]).await;

    let row = store.get_employee(employee).await.unwrap().unwrap();
    assert_eq!(row.first_name, "Ada");
    assert_eq!(row.last_name, "King");
    assert_eq!(row.role_id, role);
    assert_eq!(row.manager_id, None);
    assert_eq!(
        prompter.notices(Tone::Success),
        vec!["Updated employee with ID: 1"]
    );
}

#[tokio::test]
async fn edit_missing_row_writes_nothing() {
    let store = MemoryStore::new();

    let prompter = run(&store, &["Edit", "Role", "42", "Title", "Lead", "Exit"]).await;

    assert_eq!(prompter.notices(Tone::Warning), vec!["No role with ID 42."]);
    assert_eq!(store.counts().updates, 0);
}

#[tokio::test]
async fn edit_with_no_fields_is_a_no_op() {
    let store = MemoryStore::new();
    seed_employee(&store).await;

    let prompter = run(&store, &["Edit", "Employee", "1", "", "Exit"]).await;

    assert_eq!(store.counts().updates, 0);
    assert_eq!(
        prompter.notices(Tone::Info).first().copied(),
        Some("No fields selected. Nothing was changed.")
    );
}

#[tokio::test]
async fn edit_role_can_detach_department() {
    let store = MemoryStore::new();
    let department = store.insert_department("R&D").await.unwrap();
    let role = store
        .insert_role(&NewRole {
            title: "Engineer".to_string(),
            salary: Decimal::new(90000, 0),
            department_id: Some(department),
        })
        .await
        .unwrap();

    run(&store, &["Edit", "Role", "1", "Salary, Department", "95000", "", "Exit"]).await;

    let row = store.get_role(role).await.unwrap().unwrap();
    assert_eq!(row.title, "Engineer");
    assert_eq!(row.salary, Decimal::new(95000, 0));
    assert_eq!(row.department_id, None);
}

#[tokio::test]
async fn edit_refuses_duplicate_department_name() {
    let store = MemoryStore::new();
    store.insert_department("Sales").await.unwrap();
    let ops = store.insert_department("Ops").await.unwrap();

    let prompter = run(&store, &["Edit", "Department", "2", "Name", "Sales", "Exit"]).await;

    assert_eq!(
        prompter.notices(Tone::Warning),
        vec!["A department named Sales already exists (ID 1)."]
    );
    assert!(prompter.notices(Tone::Success).is_empty());
    assert_eq!(store.get_department(ops).await.unwrap().unwrap().name, "Ops");
    assert_eq!(store.counts().updates, 0);
}

#[tokio::test]
async fn edit_department_may_keep_its_own_name() {
    let store = MemoryStore::new();
    store.insert_department("Sales").await.unwrap();

    let prompter = run(&store, &["Edit", "Department", "1", "Name", "Sales", "Exit"]).await;

    assert_eq!(
        prompter.notices(Tone::Success),
        vec!["Updated department with ID: 1"]
    );
}

#[tokio::test]
async fn edit_refuses_duplicate_role() {
    let store = MemoryStore::new();
    let department = store.insert_department("R&D").await.unwrap();
    let other = store.insert_department("Ops").await.unwrap();
    for (title, department_id) in [
        ("Engineer", Some(department)),
        ("Analyst", Some(department)),
        ("Engineer", Some(other)),
    ] {
        store
            .insert_role(&NewRole {
                title: title.to_string(),
                salary: Decimal::new(50000, 0),
                department_id,
            })
            .await
            .unwrap();
    }

    // Retitling onto an existing title in the same department.
    let prompter = run(&store, &["Edit", "Role", "2", "Title", "Engineer", "Exit"]).await;
    assert_eq!(
        prompter.notices(Tone::Warning),
        vec!["A role titled Engineer already exists in department 1 (ID 1)."]
    );

    // Moving a role into a department that already has its title.
    let prompter = run(&store, &["Edit", "Role", "3", "Department", "1", "Exit"]).await;
    assert_eq!(
        prompter.notices(Tone::Warning),
        vec!["A role titled Engineer already exists in department 1 (ID 1)."]
    );

    assert_eq!(store.counts().updates, 0);
    let roles: Vec<_> = store
        .list_roles()
        .await
        .unwrap()
        .into_iter()
        .map(|r| (r.title, r.department_id))
        .collect();
    assert_eq!(
        roles,
        vec![
            ("Engineer".to_string(), Some(department)),
            ("Analyst".to_string(), Some(department)),
            ("Engineer".to_string(), Some(other)),
        ]
    );
}
