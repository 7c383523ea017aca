//! HTML presentation for the todo app, rendered on the server with Tera.

mod filters;
mod views;

pub use views::{RenderError, Views};
