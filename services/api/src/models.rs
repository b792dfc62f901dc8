//! API models for request and response payloads

use common::models::Todo;
use serde::{Deserialize, Serialize};

/// Home page view model
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HomeResponse {
    pub logged_in: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wallet_address: Option<String>,
    pub completed_tutorial: bool,
}

/// To-do page view model
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TodosResponse {
    pub wallet_address: String,
    pub display_address: String,
    pub todos: Vec<Todo>,
}

/// Request setting a to-do item's completion
#[derive(Debug, Deserialize)]
pub struct SetTodoRequest {
    pub name: String,
    pub completed: bool,
}
