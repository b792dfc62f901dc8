//! API service routes

use axum::{
    Json, Router,
    extract::State,
    response::{IntoResponse, Redirect, Response},
    routing::get,
};
use common::{models::display_wallet_address, validation::validate_todo_name};
use serde_json::json;
use tracing::{error, info, warn};

use crate::{
    error::ApiResult,
    middleware::Session,
    models::{HomeResponse, SetTodoRequest, TodosResponse},
    repositories::{TodoRepository, tutorial_completed},
    state::AppState,
};

/// Create the router for the API service
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/api/home", get(home))
        .route("/api/todos", get(list_todos).post(set_todo_completion))
        .with_state(state)
}

/// Health check endpoint
pub async fn health_check() -> impl IntoResponse {
    Json(json!({
        "status": "ok",
        "service": "api-service"
    }))
}

/// Home page data; never redirects
pub async fn home(State(state): State<AppState>, session: Option<Session>) -> Json<HomeResponse> {
    let Some(session) = session else {
        return Json(HomeResponse {
            logged_in: false,
            wallet_address: None,
            completed_tutorial: false,
        });
    };

    let client = state.backend.scoped(Some(&session.token));
    let completed_tutorial = tutorial_completed(&client, session.wallet_address())
        .await
        .unwrap_or_else(|e| {
            warn!("Failed to read tutorial completion: {}", e);
            false
        });

    Json(HomeResponse {
        logged_in: true,
        wallet_address: Some(session.claims.wallet_address),
        completed_tutorial,
    })
}

/// To-do page data; requires a session and redirects home otherwise
pub async fn list_todos(State(state): State<AppState>, session: Option<Session>) -> Response {
    let Some(session) = session else {
        info!("No valid session for todo page, redirecting home");
        return Redirect::to("/").into_response();
    };

    let repository = TodoRepository::new(state.backend.scoped(Some(&session.token)));
    let wallet_address = session.wallet_address();

    match repository.list_or_create_defaults(wallet_address).await {
        Ok(todos) => Json(TodosResponse {
            wallet_address: wallet_address.to_string(),
            display_address: display_wallet_address(wallet_address),
            todos,
        })
        .into_response(),
        Err(e) => {
            error!("Failed to load todos for wallet {}: {}", wallet_address, e);
            Redirect::to("/").into_response()
        }
    }
}

/// Set a to-do item's completion for the session's wallet
pub async fn set_todo_completion(
    State(state): State<AppState>,
    session: Session,
    Json(payload): Json<SetTodoRequest>,
) -> ApiResult<impl IntoResponse> {
    validate_todo_name(&payload.name).map_err(crate::error::ApiError::BadRequest)?;

    let repository = TodoRepository::new(state.backend.scoped(Some(&session.token)));
    let todo = repository
        .set_completed(session.wallet_address(), &payload.name, payload.completed)
        .await?;

    info!(
        "Todo '{}' set to completed={} for wallet {}",
        todo.name,
        todo.completed,
        session.wallet_address()
    );

    Ok(Json(todo))
}
