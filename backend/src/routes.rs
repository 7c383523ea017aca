use crate::error::AppResult;
use crate::service::TodoService;
use axum::{
    extract::{Path, Query, State},
    response::{Html, IntoResponse, Redirect, Response},
    routing::get,
    Form, Router,
};
use frontend::Views;
use shared::{FieldErrors, ListOptionsForm, TodoForm, ValidatedInput};
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::debug;

#[derive(Clone)]
pub struct AppState {
    pub service: Arc<TodoService>,
    pub views: Arc<Views>,
}

impl AppState {
    pub fn new(service: TodoService, views: Views) -> Self {
        Self {
            service: Arc::new(service),
            views: Arc::new(views),
        }
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/add", get(add_form).post(add))
        .route("/view/:id", get(view))
        .route("/update/:id", get(update_form).post(update))
        .route("/complete/:id", get(complete))
        .route("/incomplete/:id", get(incomplete))
        .route("/delete/:id", get(delete))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn index(
    State(state): State<AppState>,
    Query(query): Query<ListOptionsForm>,
) -> AppResult<Html<String>> {
    let mut form = ValidatedInput::new(query);
    let invalid = !form.validate();
    if invalid {
        debug!(errors = ?form.errors(), "invalid list options, using defaults");
        form.reset_to_default();
    }

    let options = form.into_model()?;
    let todos = state.service.list_filtered(&options)?;
    Ok(Html(state.views.index(&todos, &options, invalid)?))
}

async fn add_form(State(state): State<AppState>) -> AppResult<Html<String>> {
    Ok(Html(
        state.views.add(&TodoForm::default(), &FieldErrors::new())?,
    ))
}

async fn add(State(state): State<AppState>, Form(raw): Form<TodoForm>) -> AppResult<Response> {
    let mut form = ValidatedInput::new(raw);
    if !form.validate() {
        let html = state.views.add(form.input(), &form.errors())?;
        return Ok(Html(html).into_response());
    }

    state.service.add(form.into_model()?)?;
    Ok(Redirect::to("/").into_response())
}

async fn view(State(state): State<AppState>, Path(id): Path<u64>) -> AppResult<Html<String>> {
    let todo = state.service.get(id)?;
    Ok(Html(state.views.view(&todo)?))
}

async fn update_form(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> AppResult<Html<String>> {
    let todo = state.service.get(id)?;
    let html = state
        .views
        .update(&todo, &TodoForm::from(&todo), &FieldErrors::new())?;
    Ok(Html(html))
}

async fn update(
    State(state): State<AppState>,
    Path(id): Path<u64>,
    Form(raw): Form<TodoForm>,
) -> AppResult<Response> {
    let todo = state.service.get(id)?;

    let mut form = ValidatedInput::new(raw);
    if !form.validate() {
        let html = state.views.update(&todo, form.input(), &form.errors())?;
        return Ok(Html(html).into_response());
    }

    state.service.update(form.into_model()?.with_id(id))?;
    Ok(Redirect::to(&format!("/view/{id}")).into_response())
}

async fn complete(State(state): State<AppState>, Path(id): Path<u64>) -> AppResult<Redirect> {
    state.service.set_completed(id, true)?;
    Ok(Redirect::to("/"))
}

async fn incomplete(State(state): State<AppState>, Path(id): Path<u64>) -> AppResult<Redirect> {
    state.service.set_completed(id, false)?;
    Ok(Redirect::to("/"))
}

async fn delete(State(state): State<AppState>, Path(id): Path<u64>) -> AppResult<Redirect> {
    state.service.delete(id)?;
    Ok(Redirect::to("/"))
}
