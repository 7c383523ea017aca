use crate::error::{AppError, AppResult};
use crate::store::JsonStore;
use parking_lot::Mutex;
use shared::{ListOptions, Order, SortKey, Status, Todo};
use std::cmp::Ordering;
use tracing::{debug, info};

/// CRUD and listing over the persisted todo collection.
///
/// Every call reloads the file; mutations rewrite it in full. The mutex only
/// serializes callers within this process.
pub struct TodoService {
    store: JsonStore,
    lock: Mutex<()>,
}

impl TodoService {
    pub fn new(store: JsonStore) -> Self {
        Self {
            store,
            lock: Mutex::new(()),
        }
    }

    pub fn list(&self) -> AppResult<Vec<Todo>> {
        self.list_filtered(&ListOptions::default())
    }

    pub fn list_filtered(&self, options: &ListOptions) -> AppResult<Vec<Todo>> {
        let mut todos = {
            let _guard = self.lock.lock();
            self.store.load()?
        };
        apply_options(&mut todos, options);
        Ok(todos)
    }

    pub fn get(&self, id: u64) -> AppResult<Todo> {
        let _guard = self.lock.lock();
        self.store
            .load()?
            .into_iter()
            .find(|t| t.id == id)
            .ok_or(AppError::NotFound(id))
    }

    /// Stores `todo` under the next id, one past the highest stored id.
    pub fn add(&self, mut todo: Todo) -> AppResult<Todo> {
        let _guard = self.lock.lock();
        let mut todos = self.store.load()?;

        let max_id = todos.iter().map(|t| t.id).max().unwrap_or(0);
        todo.id = max_id.checked_add(1).ok_or(AppError::IdsExhausted(max_id))?;
        todos.push(todo.clone());
        self.store.save(&todos)?;

        info!(id = todo.id, title = %todo.title, "added todo");
        Ok(todo)
    }

    /// Replaces title, description and due date; id, creation time and
    /// completion are kept from the stored record.
    pub fn update(&self, updated: Todo) -> AppResult<Todo> {
        self.modify(updated.id, |todo| {
            todo.title = updated.title;
            todo.description = updated.description;
            todo.due_date = updated.due_date;
        })
    }

    pub fn set_completed(&self, id: u64, completed: bool) -> AppResult<Todo> {
        self.modify(id, |todo| todo.is_completed = completed)
    }

    pub fn delete(&self, id: u64) -> AppResult<()> {
        let _guard = self.lock.lock();
        let mut todos = self.store.load()?;

        let before = todos.len();
        todos.retain(|t| t.id != id);
        if todos.len() == before {
            return Err(AppError::NotFound(id));
        }

        self.store.save(&todos)?;
        info!(id, "deleted todo");
        Ok(())
    }

    fn modify(&self, id: u64, change: impl FnOnce(&mut Todo)) -> AppResult<Todo> {
        let _guard = self.lock.lock();
        let mut todos = self.store.load()?;

        let todo = todos
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or(AppError::NotFound(id))?;
        change(todo);
        let todo = todo.clone();

        self.store.save(&todos)?;
        debug!(id, completed = todo.is_completed, "updated todo");
        Ok(todo)
    }
}

/// Filters by completion status, then stable-sorts by the requested key.
pub fn apply_options(todos: &mut Vec<Todo>, options: &ListOptions) {
    match options.status {
        Status::Completed => todos.retain(|t| t.is_completed),
        Status::Pending => todos.retain(|t| !t.is_completed),
        Status::All => {}
    }

    todos.sort_by(|a, b| compare(a, b, options));
}

fn compare(a: &Todo, b: &Todo, options: &ListOptions) -> Ordering {
    let directed = |ordering: Ordering| match options.order {
        Order::Asc => ordering,
        Order::Desc => ordering.reverse(),
    };

    match options.sort {
        SortKey::Title => directed(a.title_key().cmp(&b.title_key())),
        // Undated items trail in both directions.
        SortKey::DueDate => match (a.due_date, b.due_date) {
            (Some(x), Some(y)) => directed(x.cmp(&y)),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        },
        SortKey::CreatedAt => directed(a.created_at.cmp(&b.created_at)),
    }
}
