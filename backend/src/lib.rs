//! Server side of the todo app: JSON file storage, the todo service, and the
//! axum routes that render pages through `frontend`.

pub mod config;
pub mod error;
pub mod routes;
pub mod service;
pub mod store;

pub use config::Config;
pub use error::{AppError, AppResult};
pub use routes::{router, AppState};
pub use service::TodoService;
pub use store::JsonStore;
