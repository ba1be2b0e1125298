//! Todos and goals domain shared by the integration tests.

#![allow(dead_code)]

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Todo {
    pub id: u64,
    pub name: String,
    pub complete: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Goal {
    pub id: u64,
    pub name: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Action {
    AddTodo(Todo),
    RemoveTodo(u64),
    ToggleTodo(u64),
    AddGoal(Goal),
    RemoveGoal(u64),
    Unknown,
}

pub fn add_todo(id: u64, name: &str) -> Action {
    Action::AddTodo(Todo {
        id,
        name: name.to_string(),
        complete: false,
    })
}

pub fn remove_todo(id: u64) -> Action {
    Action::RemoveTodo(id)
}

pub fn toggle_todo(id: u64) -> Action {
    Action::ToggleTodo(id)
}

pub fn add_goal(id: u64, name: &str) -> Action {
    Action::AddGoal(Goal {
        id,
        name: name.to_string(),
    })
}

pub fn remove_goal(id: u64) -> Action {
    Action::RemoveGoal(id)
}

pub fn todos(state: Option<&Vec<Todo>>, action: &Action) -> Vec<Todo> {
    let state = state.map(Vec::as_slice).unwrap_or_default();
    match action {
        Action::AddTodo(todo) => state.iter().cloned().chain([todo.clone()]).collect(),
        Action::RemoveTodo(id) => state.iter().filter(|todo| todo.id != *id).cloned().collect(),
        Action::ToggleTodo(id) => state
            .iter()
            .map(|todo| {
                if todo.id == *id {
                    Todo {
                        complete: !todo.complete,
                        ..todo.clone()
                    }
                } else {
                    todo.clone()
                }
            })
            .collect(),
        _ => state.to_vec(),
    }
}

pub fn goals(state: Option<&Vec<Goal>>, action: &Action) -> Vec<Goal> {
    let state = state.map(Vec::as_slice).unwrap_or_default();
    match action {
        Action::AddGoal(goal) => state.iter().cloned().chain([goal.clone()]).collect(),
        Action::RemoveGoal(id) => state.iter().filter(|goal| goal.id != *id).cloned().collect(),
        _ => state.to_vec(),
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AppState {
    pub todos: Vec<Todo>,
    pub goals: Vec<Goal>,
}
