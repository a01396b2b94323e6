pub mod blogs;
pub mod login;
pub mod middleware;
pub mod users;

use crate::state::AppState;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::{Json, Router, routing::get, routing::post, routing::put};
use serde_json::json;
use std::sync::Arc;
use uuid::Uuid;

pub(crate) fn parse_uuid_param(raw: &str, what: &str) -> Result<Uuid, Response> {
    raw.parse::<Uuid>().map_err(|_| {
        (
            StatusCode::BAD_REQUEST,
            Json(json!({"error": format!("Invalid {} id", what)})),
        )
            .into_response()
    })
}

pub fn build_api_routes(state: Arc<AppState>) -> Router {
    Router::new()
        // Blog routes; PUT requires no token
        .route("/blogs", get(blogs::list_blogs).post(blogs::create_blog))
        .route(
            "/blogs/{id}",
            put(blogs::update_blog).delete(blogs::delete_blog),
        )
        // User routes
        .route("/users", get(users::list_users).post(users::create_user))
        // Login
        .route("/login", post(login::login))
        .with_state(state)
}
