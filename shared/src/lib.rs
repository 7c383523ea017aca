mod form;
mod list_options;
mod list_options_form;
mod todo;
mod todo_form;

pub use form::{FieldErrors, FormError, FormInput, ValidatedInput, Validation};
pub use list_options::{ListOptions, Order, SortKey, Status, UnknownOption};
pub use list_options_form::ListOptionsForm;
pub use todo::{Todo, DATE_FORMAT};
pub use todo_form::{TodoForm, DESCRIPTION_MAX_LEN, TITLE_MAX_LEN};
