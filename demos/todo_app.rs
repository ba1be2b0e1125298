//! Todo list driven by a single reducer.
//!
//! Run with `RUST_LOG=trace cargo run --example todo_app` to also see the
//! store's own subscription and fan-out events.

use tracing_subscriber::EnvFilter;
use unistore::Store;

#[derive(Clone, Debug)]
struct Todo {
    id: u64,
    name: String,
    complete: bool,
}

#[derive(Debug)]
enum Action {
    AddTodo(Todo),
    RemoveTodo(u64),
    ToggleTodo(u64),
}

fn add_todo(id: u64, name: &str) -> Action {
    Action::AddTodo(Todo {
        id,
        name: name.to_string(),
        complete: false,
    })
}

fn todos(state: Option<&Vec<Todo>>, action: &Action) -> Vec<Todo> {
    let state = state.map(Vec::as_slice).unwrap_or_default();
    match action {
        Action::AddTodo(todo) => state.iter().cloned().chain([todo.clone()]).collect(),
        Action::RemoveTodo(id) => state.iter().filter(|todo| todo.id != *id).cloned().collect(),
        Action::ToggleTodo(id) => state
            .iter()
            .map(|todo| Todo {
                complete: todo.complete != (todo.id == *id),
                ..todo.clone()
            })
            .collect(),
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let store = Store::new(todos);

    // Log the state after every dispatch.
    let logger = store.subscribe({
        let store = store.downgrade();
        move || {
            let Some(store) = store.upgrade() else { return };
            store.read(|state| {
                for todo in state.into_iter().flatten() {
                    tracing::info!(id = todo.id, name = %todo.name, complete = todo.complete, "todo");
                }
            });
        }
    });

    store.dispatch(add_todo(0, "Walk the dog"))?;
    store.dispatch(add_todo(1, "Wash the car"))?;
    store.dispatch(add_todo(2, "Go to the gym"))?;
    store.dispatch(Action::ToggleTodo(0))?;
    store.dispatch(Action::RemoveTodo(1))?;

    logger.unsubscribe();
    store.dispatch(Action::ToggleTodo(2))?;

    let remaining = store.read(|state| state.map_or(0, |todos| todos.iter().filter(|t| !t.complete).count()));
    tracing::info!(remaining, "done");
    Ok(())
}
