//! Todos and goals managed by one store through a composed root reducer.

use tracing_subscriber::EnvFilter;
use unistore::{combine_reducers, Store};

#[derive(Clone, Debug)]
struct Todo {
    id: u64,
    name: String,
    complete: bool,
}

#[derive(Clone, Debug)]
struct Goal {
    id: u64,
    name: String,
}

#[derive(Debug)]
enum Action {
    AddTodo(Todo),
    ToggleTodo(u64),
    AddGoal(Goal),
    RemoveGoal(u64),
}

#[derive(Debug)]
struct AppState {
    todos: Vec<Todo>,
    goals: Vec<Goal>,
}

fn todos(state: Option<&Vec<Todo>>, action: &Action) -> Vec<Todo> {
    let state = state.map(Vec::as_slice).unwrap_or_default();
    match action {
        Action::AddTodo(todo) => state.iter().cloned().chain([todo.clone()]).collect(),
        Action::ToggleTodo(id) => state
            .iter()
            .map(|todo| Todo {
                complete: todo.complete != (todo.id == *id),
                ..todo.clone()
            })
            .collect(),
        _ => state.to_vec(),
    }
}

fn goals(state: Option<&Vec<Goal>>, action: &Action) -> Vec<Goal> {
    let state = state.map(Vec::as_slice).unwrap_or_default();
    match action {
        Action::AddGoal(goal) => state.iter().cloned().chain([goal.clone()]).collect(),
        Action::RemoveGoal(id) => state.iter().filter(|goal| goal.id != *id).cloned().collect(),
        _ => state.to_vec(),
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let store = Store::new(combine_reducers!(AppState, Action {
        todos: todos,
        goals: goals,
    }));

    // Listeners hold a weak handle so the store can still be freed.
    let _logger = store.subscribe({
        let store = store.downgrade();
        move || {
            let Some(store) = store.upgrade() else { return };
            store.read(|state| {
                let Some(state) = state else { return };
                for todo in &state.todos {
                    tracing::info!(id = todo.id, name = %todo.name, complete = todo.complete, "todo");
                }
                for goal in &state.goals {
                    tracing::info!(id = goal.id, name = %goal.name, "goal");
                }
            });
        }
    });

    // A listener that refuses to see more than three goals stops the fan-out.
    let _guard = store.subscribe_fallible({
        let store = store.downgrade();
        move || {
            let goals = store
                .upgrade()
                .map_or(0, |store| store.read(|state| state.map_or(0, |s| s.goals.len())));
            match goals {
                n if n > 3 => Err(format!("too many goals: {n}")),
                _ => Ok(()),
            }
        }
    });

    store.dispatch(Action::AddTodo(Todo {
        id: 0,
        name: "Walk the dog".to_string(),
        complete: false,
    }))?;
    store.dispatch(Action::ToggleTodo(0))?;

    for (id, name) in ["Learn Rust", "Run a marathon", "Read more", "Sleep in"]
        .into_iter()
        .enumerate()
    {
        let goal = Goal {
            id: id as u64,
            name: name.to_string(),
        };
        if let Err(err) = store.dispatch(Action::AddGoal(goal)) {
            tracing::warn!(error = %err, "dispatch reported a failure");
        }
    }
    store.dispatch(Action::RemoveGoal(0))?;

    if let Some(state) = store.get_state() {
        let names: Vec<&str> = state.goals.iter().map(|goal| goal.name.as_str()).collect();
        tracing::info!(todos = state.todos.len(), goals = ?names, "final state");
    }
    Ok(())
}
