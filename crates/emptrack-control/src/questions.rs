//! Declarative question lists.
//!
//! Each branch of a sub-flow builds a fresh list from the answers given so far.
//! Lists are never edited in place; a branch that skips a question simply does
//! not include it.

use std::collections::BTreeMap;
use std::str::FromStr;

use emptrack_core::{parse_id, parse_money, parse_optional_id, IdError, Rule, ValidationError};
use rust_decimal::Decimal;

use crate::error::{FlowError, Result};

/// The answer a question fills in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Field {
    /// Person's given name.
    FirstName,
    /// Person's family name.
    LastName,
    /// Title of a new role.
    RoleTitle,
    /// Salary of a new role.
    Salary,
    /// An existing role.
    RoleId,
    /// Name of a new department.
    DepartmentName,
    /// An existing department.
    DepartmentId,
    /// An existing department, or empty for none.
    OptionalDepartmentId,
    /// An existing manager, or empty for none.
    ManagerId,
    /// The row picked for editing. Not checked for existence when asked.
    TargetId,
}

/// A table the answer of a field must point into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reference {
    /// `roles.id`
    Role,
    /// `departments.id`
    Department,
    /// `managers.id`
    Manager,
}

impl Reference {
    /// Lower-case noun for messages.
    #[must_use]
    pub const fn noun(self) -> &'static str {
        match self {
            Self::Role => "role",
            Self::Department => "department",
            Self::Manager => "manager",
        }
    }
}

impl Field {
    /// The table this field's answer must exist in, if any.
    #[must_use]
    pub const fn reference(self) -> Option<Reference> {
        match self {
            Self::RoleId => Some(Reference::Role),
            Self::DepartmentId | Self::OptionalDepartmentId => Some(Reference::Department),
            Self::ManagerId => Some(Reference::Manager),
            _ => None,
        }
    }
}

/// One prompt: what to ask, how to validate, and what to say on rejection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    /// Answer slot.
    pub field: Field,
    /// Prompt text.
    pub message: String,
    /// Format rule.
    pub rule: Rule,
    /// Message shown when the rule rejects an answer.
    pub invalid: &'static str,
}

impl Question {
    fn new(field: Field, message: impl Into<String>, rule: Rule, invalid: &'static str) -> Self {
        Self {
            field,
            message: message.into(),
            rule,
            invalid,
        }
    }

    /// Check an answer against the rule, with this question's message.
    ///
    /// Identifier fields must also fit in a database key.
    ///
    /// # Errors
    ///
    /// Returns the rejection to show before asking again.
    pub fn accept(&self, raw: &str) -> std::result::Result<(), ValidationError> {
        self.rule
            .check(raw)
            .map_err(|e| e.with_message(self.invalid))?;

        let overflow = matches!(self.rule, Rule::Numeric | Rule::OptionalNumeric)
            && !raw.is_empty()
            && raw.parse::<u64>().is_err();
        if overflow {
            return Err(ValidationError::new(self.rule, self.invalid));
        }
        Ok(())
    }
}

/// Whose name is being collected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Person {
    /// An employee record.
    Employee,
    /// A manager record.
    Manager,
}

impl Person {
    /// Lower-case noun for prompts.
    #[must_use]
    pub const fn noun(self) -> &'static str {
        match self {
            Self::Employee => "employee",
            Self::Manager => "manager",
        }
    }
}

/// Whether a role is created or referenced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoleBranch {
    /// Collect a title and salary; resolve through the upsert.
    New,
    /// Collect the id of an existing role.
    Existing,
}

/// Where a new role's department comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DepartmentBranch {
    /// Collect a department name; resolve through the upsert.
    New,
    /// Collect the id of an existing department.
    Existing,
    /// The role has no department.
    None,
}

impl DepartmentBranch {
    /// Choice labels, in the order of [`DepartmentBranch::from_index`].
    pub const CHOICES: [&'static str; 3] = ["New department", "Existing department", "No department"];

    /// Map a selected choice back to the branch.
    #[must_use]
    pub const fn from_index(index: usize) -> Self {
        match index {
            0 => Self::New,
            1 => Self::Existing,
            _ => Self::None,
        }
    }
}

/// First and last name of a person.
#[must_use]
pub fn person(person: Person) -> Vec<Question> {
    let noun = person.noun();
    vec![
        Question::new(
            Field::FirstName,
            format!("Enter the {noun}'s first name:"),
            Rule::NonEmpty,
            "Please enter a valid first name.",
        ),
        Question::new(
            Field::LastName,
            format!("Enter the {noun}'s last name:"),
            Rule::NonEmpty,
            "Please enter a valid last name.",
        ),
    ]
}

/// Role questions for the chosen branch.
#[must_use]
pub fn role(branch: RoleBranch) -> Vec<Question> {
    match branch {
        RoleBranch::New => vec![
            Question::new(
                Field::RoleTitle,
                "Enter the role title:",
                Rule::NonEmpty,
                "Please enter a valid role title.",
            ),
            Question::new(
                Field::Salary,
                "Enter the role's salary:",
                Rule::PositiveMoney,
                "Please enter a salary greater than zero (e.g. 52000 or 52000.50).",
            ),
        ],
        RoleBranch::Existing => vec![Question::new(
            Field::RoleId,
            "Enter the role ID:",
            Rule::Numeric,
            "Please enter a valid role ID (numeric).",
        )],
    }
}

/// Department questions for the chosen branch.
#[must_use]
pub fn department(branch: DepartmentBranch) -> Vec<Question> {
    match branch {
        DepartmentBranch::New => vec![Question::new(
            Field::DepartmentName,
            "Enter the department name:",
            Rule::NonEmpty,
            "Please enter a valid department name.",
        )],
        DepartmentBranch::Existing => vec![Question::new(
            Field::DepartmentId,
            "Enter the department ID:",
            Rule::Numeric,
            "Please enter a valid department ID (numeric).",
        )],
        DepartmentBranch::None => Vec::new(),
    }
}

/// The optional reporting manager of an employee.
#[must_use]
pub fn manager() -> Vec<Question> {
    vec![Question::new(
        Field::ManagerId,
        "Enter the employee's manager ID (optional, press Enter to skip):",
        Rule::OptionalNumeric,
        "Please enter a valid manager ID (numeric) or leave it empty.",
    )]
}

/// The id of the row to edit.
#[must_use]
pub fn target(noun: &str) -> Vec<Question> {
    vec![Question::new(
        Field::TargetId,
        format!("Enter the ID of the {noun} to edit:"),
        Rule::Numeric,
        "Please enter a valid ID (numeric).",
    )]
}

/// Replacement value for one editable column.
#[must_use]
pub fn replacement(field: Field) -> Question {
    match field {
        Field::FirstName => Question::new(
            field,
            "Enter the new first name:",
            Rule::NonEmpty,
            "Please enter a valid first name.",
        ),
        Field::LastName => Question::new(
            field,
            "Enter the new last name:",
            Rule::NonEmpty,
            "Please enter a valid last name.",
        ),
        Field::RoleTitle => Question::new(
            field,
            "Enter the new title:",
            Rule::NonEmpty,
            "Please enter a valid role title.",
        ),
        Field::Salary => Question::new(
            field,
            "Enter the new salary:",
            Rule::PositiveMoney,
            "Please enter a salary greater than zero (e.g. 52000 or 52000.50).",
        ),
        Field::RoleId => Question::new(
            field,
            "Enter the new role ID:",
            Rule::Numeric,
            "Please enter a valid role ID (numeric).",
        ),
        Field::DepartmentName => Question::new(
            field,
            "Enter the new department name:",
            Rule::NonEmpty,
            "Please enter a valid department name.",
        ),
        Field::DepartmentId => Question::new(
            field,
            "Enter the new department ID:",
            Rule::Numeric,
            "Please enter a valid department ID (numeric).",
        ),
        Field::OptionalDepartmentId => Question::new(
            field,
            "Enter the new department ID (press Enter for none):",
            Rule::OptionalNumeric,
            "Please enter a valid department ID (numeric) or leave it empty.",
        ),
        Field::ManagerId => Question::new(
            field,
            "Enter the new manager ID (press Enter for none):",
            Rule::OptionalNumeric,
            "Please enter a valid manager ID (numeric) or leave it empty.",
        ),
        Field::TargetId => target("record").remove(0),
    }
}

/// Accepted answers of one sub-flow attempt, keyed by field.
#[derive(Debug, Clone, Default)]
pub struct Answers {
    values: BTreeMap<Field, String>,
}

impl Answers {
    /// Record an accepted answer.
    pub fn insert(&mut self, field: Field, value: String) {
        self.values.insert(field, value);
    }

    /// Returns true if the field was answered.
    #[must_use]
    pub fn contains(&self, field: Field) -> bool {
        self.values.contains_key(&field)
    }

    fn raw(&self, field: Field) -> Result<&str> {
        self.values
            .get(&field)
            .map(String::as_str)
            .ok_or(FlowError::MissingAnswer(field))
    }

    /// Trimmed text answer.
    ///
    /// # Errors
    ///
    /// Returns `FlowError::MissingAnswer` if the field was never asked.
    pub fn text(&self, field: Field) -> Result<String> {
        Ok(self.raw(field)?.trim().to_string())
    }

    /// Required identifier answer.
    ///
    /// # Errors
    ///
    /// Returns an error if the field was never asked or does not parse.
    pub fn id<T>(&self, field: Field) -> Result<T>
    where
        T: FromStr<Err = IdError>,
    {
        Ok(parse_id(self.raw(field)?)?)
    }

    /// Optional identifier answer; empty means `None`.
    ///
    /// # Errors
    ///
    /// Returns an error if the field was never asked or does not parse.
    pub fn optional_id<T>(&self, field: Field) -> Result<Option<T>>
    where
        T: FromStr<Err = IdError>,
    {
        Ok(parse_optional_id(self.raw(field)?)?)
    }

    /// Salary answer.
    ///
    /// # Errors
    ///
    /// Returns an error if the field was never asked or does not parse.
    pub fn money(&self, field: Field) -> Result<Decimal> {
        Ok(parse_money(self.raw(field)?)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use emptrack_core::{ManagerId, RoleId};

    fn fields(questions: &[Question]) -> Vec<Field> {
        questions.iter().map(|q| q.field).collect()
    }

    #[test]
    fn role_branches_ask_different_questions() {
        assert_eq!(fields(&role(RoleBranch::New)), vec![Field::RoleTitle, Field::Salary]);
        assert_eq!(fields(&role(RoleBranch::Existing)), vec![Field::RoleId]);
    }

    #[test]
    fn department_branches() {
        assert_eq!(
            fields(&department(DepartmentBranch::New)),
            vec![Field::DepartmentName]
        );
        assert_eq!(
            fields(&department(DepartmentBranch::Existing)),
            vec![Field::DepartmentId]
        );
        assert!(department(DepartmentBranch::None).is_empty());
    }

    #[test]
    fn lists_are_built_fresh() {
        // Building one branch must not affect the next.
        let mut first = role(RoleBranch::New);
        first.clear();
        assert_eq!(role(RoleBranch::New).len(), 2);
    }

    #[test]
    fn person_wording_follows_kind() {
        let questions = person(Person::Manager);
        assert_eq!(questions[0].message, "Enter the manager's first name:");
        assert_eq!(questions[1].message, "Enter the manager's last name:");
    }

    #[test]
    fn accept_uses_field_message() {
        let question = role(RoleBranch::Existing).remove(0);
        let err = question.accept("abc").unwrap_err();
        assert_eq!(err.message, "Please enter a valid role ID (numeric).");
        assert!(question.accept("12").is_ok());
    }

    #[test]
    fn accept_rejects_oversized_ids() {
        let question = manager().remove(0);
        assert!(question.accept("").is_ok());
        assert!(question.accept("99999999999999999999999").is_err());
    }

    #[test]
    fn accept_rejects_answers_too_large_for_columns() {
        let title = role(RoleBranch::New).remove(0);
        assert!(title.accept(&"T".repeat(30)).is_ok());
        let err = title.accept(&"T".repeat(31)).unwrap_err();
        assert_eq!(err.message, "Please enter a valid role title.");

        let salary = replacement(Field::Salary);
        assert!(salary.accept("99999999.99").is_ok());
        assert!(salary.accept("100000000").is_err());
    }

    #[test]
    fn references() {
        assert_eq!(Field::RoleId.reference(), Some(Reference::Role));
        assert_eq!(Field::ManagerId.reference(), Some(Reference::Manager));
        assert_eq!(Field::TargetId.reference(), None);
    }

    #[test]
    fn typed_answers() {
        let mut answers = Answers::default();
        answers.insert(Field::FirstName, "  Ada ".to_string());
        answers.insert(Field::RoleId, "7".to_string());
        answers.insert(Field::ManagerId, String::new());
        answers.insert(Field::Salary, "90000".to_string());

        assert_eq!(answers.text(Field::FirstName).unwrap(), "Ada");
        assert_eq!(answers.id::<RoleId>(Field::RoleId).unwrap(), RoleId::new(7));
        assert_eq!(answers.optional_id::<ManagerId>(Field::ManagerId).unwrap(), None);
        assert_eq!(answers.money(Field::Salary).unwrap(), Decimal::new(90000, 0));
        assert!(matches!(
            answers.text(Field::LastName),
            Err(FlowError::MissingAnswer(Field::LastName))
        ));
    }
}
