use crate::filters;
use serde::Serialize;
use shared::{FieldErrors, ListOptions, Todo, TodoForm};
use tera::{Context, Tera};

pub type RenderError = tera::Error;

const TEMPLATES: [(&str, &str); 6] = [
    ("base.html", include_str!("../templates/base.html")),
    ("_form_fields.html", include_str!("../templates/_form_fields.html")),
    ("index.html", include_str!("../templates/index.html")),
    ("add.html", include_str!("../templates/add.html")),
    ("update.html", include_str!("../templates/update.html")),
    ("view.html", include_str!("../templates/view.html")),
];

const FORM_FIELDS: [&str; 3] = ["title", "description", "due_date"];

#[derive(Debug, Serialize)]
struct Choice {
    value: &'static str,
    label: &'static str,
}

const fn choice(value: &'static str, label: &'static str) -> Choice {
    Choice { value, label }
}

const STATUS_CHOICES: [Choice; 3] = [
    choice("all", "All"),
    choice("pending", "Pending"),
    choice("completed", "Completed"),
];

const SORT_CHOICES: [Choice; 3] = [
    choice("createdAt", "Created"),
    choice("dueDate", "Due date"),
    choice("title", "Title"),
];

const ORDER_CHOICES: [Choice; 2] = [choice("asc", "Ascending"), choice("desc", "Descending")];

/// Server-side HTML pages of the todo app.
pub struct Views {
    tera: Tera,
}

impl Views {
    pub fn new() -> Result<Self, RenderError> {
        let mut tera = Tera::default();
        tera.add_raw_templates(TEMPLATES)?;
        tera.register_filter("format_utc", filters::format_utc);
        Ok(Self { tera })
    }

    pub fn index(
        &self,
        todos: &[Todo],
        options: &ListOptions,
        invalid: bool,
    ) -> Result<String, RenderError> {
        let mut context = Context::new();
        context.insert("todos", todos);
        context.insert("options", options);
        context.insert("invalid", &invalid);
        context.insert("status_choices", &STATUS_CHOICES);
        context.insert("sort_choices", &SORT_CHOICES);
        context.insert("order_choices", &ORDER_CHOICES);
        self.tera.render("index.html", &context)
    }

    pub fn add(&self, form: &TodoForm, errors: &FieldErrors) -> Result<String, RenderError> {
        let context = form_context(form, errors);
        self.tera.render("add.html", &context)
    }

    pub fn update(
        &self,
        todo: &Todo,
        form: &TodoForm,
        errors: &FieldErrors,
    ) -> Result<String, RenderError> {
        let mut context = form_context(form, errors);
        context.insert("todo", todo);
        self.tera.render("update.html", &context)
    }

    pub fn view(&self, todo: &Todo) -> Result<String, RenderError> {
        let mut context = Context::new();
        context.insert("todo", todo);
        self.tera.render("view.html", &context)
    }
}

fn form_context(form: &TodoForm, errors: &FieldErrors) -> Context {
    // Templates index every field's messages, so absent fields get an empty list.
    let mut errors = errors.clone();
    for field in FORM_FIELDS {
        errors.entry(field.to_string()).or_default();
    }

    let mut context = Context::new();
    context.insert("form", form);
    context.insert("errors", &errors);
    context
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, TimeZone, Utc};
    use shared::{Order, SortKey, Status};

    fn views() -> Views {
        Views::new().unwrap()
    }

    fn sample() -> Todo {
        Todo::new("Test Task")
            .with_id(3)
            .with_description("Test description")
            .with_due_date(NaiveDate::from_ymd_opt(2026, 1, 31).unwrap())
            .with_created_at(Utc.with_ymd_and_hms(2026, 1, 1, 10, 0, 0).unwrap())
    }

    #[test]
    fn index_lists_todos_and_marks_selected_options() {
        let options = ListOptions::new(Status::Pending, SortKey::Title, Order::Asc);
        let html = views().index(&[sample()], &options, false).unwrap();

        assert!(html.contains("Test Task"));
        assert!(html.contains("href=\"/view/3\""));
        assert!(html.contains("<option value=\"pending\" selected>"));
        assert!(html.contains("<option value=\"title\" selected>"));
        assert!(html.contains("<option value=\"asc\" selected>"));
        assert!(!html.contains("Invalid filter options"));
    }

    #[test]
    fn index_flags_invalid_options() {
        let html = views().index(&[], &ListOptions::default(), true).unwrap();
        assert!(html.contains("Invalid filter options"));
        assert!(html.contains("No todos."));
    }

    #[test]
    fn titles_are_escaped() {
        let todo = Todo::new("<script>alert(1)</script>").with_id(1);
        let html = views().view(&todo).unwrap();
        assert!(!html.contains("<script>alert(1)</script>"));
        assert!(html.contains("&lt;script&gt;"));
    }

    #[test]
    fn view_shows_formatted_creation_time() {
        let html = views().view(&sample()).unwrap();
        assert!(html.contains("January 01, 2026 at 10:00 UTC"));
        assert!(html.contains("2026-01-31"));
    }

    #[test]
    fn add_form_shows_field_errors() {
        let mut errors = FieldErrors::new();
        errors.insert("title".into(), vec!["Title is required.".into()]);

        let html = views().add(&TodoForm::default(), &errors).unwrap();
        assert!(html.contains("Title is required."));
    }

    #[test]
    fn update_form_is_prefilled() {
        let todo = sample();
        let html = views()
            .update(&todo, &TodoForm::from(&todo), &FieldErrors::new())
            .unwrap();
        assert!(html.contains("value=\"Test Task\""));
        assert!(html.contains("value=\"2026-01-31\""));
        assert!(html.contains("Test description"));
    }
}
