use crate::form::{rule_error, FormInput};
use crate::todo::{Todo, DATE_FORMAT};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

pub const TITLE_MAX_LEN: u64 = 200;
pub const DESCRIPTION_MAX_LEN: u64 = 5000;

/// Raw fields of the add/edit form, exactly as posted.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
pub struct TodoForm {
    #[serde(default)]
    #[validate(
        custom(function = "required_title"),
        length(max = TITLE_MAX_LEN, message = "Title must be at most 200 characters.")
    )]
    pub title: String,
    #[serde(default)]
    #[validate(length(max = DESCRIPTION_MAX_LEN, message = "Description must be at most 5000 characters."))]
    pub description: Option<String>,
    #[serde(default, rename = "dueDate")]
    #[validate(custom(function = "iso_date"))]
    pub due_date: Option<String>,
}

fn required_title(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(rule_error("required", "Title is required."));
    }
    Ok(())
}

fn iso_date(value: &str) -> Result<(), ValidationError> {
    let value = value.trim();
    if value.is_empty() {
        return Ok(());
    }
    NaiveDate::parse_from_str(value, DATE_FORMAT)
        .map(|_| ())
        .map_err(|_| rule_error("date", "Not a valid date value."))
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

impl FormInput for TodoForm {
    type Model = Todo;

    fn into_model(self) -> Todo {
        let due_date = non_empty(self.due_date)
            .and_then(|d| NaiveDate::parse_from_str(d.trim(), DATE_FORMAT).ok());

        Todo {
            description: non_empty(self.description),
            due_date,
            ..Todo::new(self.title.trim())
        }
    }
}

/// Pre-fills the edit form from a stored record.
impl From<&Todo> for TodoForm {
    fn from(todo: &Todo) -> Self {
        Self {
            title: todo.title.clone(),
            description: todo.description.clone(),
            due_date: todo.due_date.map(|d| d.format(DATE_FORMAT).to_string()),
        }
    }
}
