use crate::auth::hash_password;
use crate::state::AppState;
use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use blaek_common::validation::validate_credentials;
use blaek_db::{BlogRepo, BlogRow, UserRepo, UserRow};
use serde::Deserialize;
use serde_json::json;
use std::collections::HashMap;
use std::sync::Arc;
use uuid::Uuid;

#[derive(Debug, Deserialize)]
pub struct CreateUserRequest {
    pub username: Option<String>,
    pub name: Option<String>,
    pub password: Option<String>,
}

fn user_json(user: &UserRow, blogs: &[&BlogRow]) -> serde_json::Value {
    let blogs_json: Vec<serde_json::Value> = blogs
        .iter()
        .map(|b| {
            json!({
                "id": b.blog_id,
                "title": b.title,
                "author": b.author,
                "url": b.url,
                "likes": b.likes,
            })
        })
        .collect();
    json!({
        "id": user.user_id,
        "username": user.username,
        "name": user.name,
        "blogs": blogs_json,
    })
}

/// GET /api/users - List users with their owned blogs populated
#[tracing::instrument(skip(state))]
pub async fn list_users(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let users = match UserRepo::list(&state.pool).await {
        Ok(u) => u,
        Err(e) => {
            tracing::error!("Failed to list users: {:#}", e);
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({"error": "Internal server error"})),
            )
                .into_response();
        }
    };

    let blogs = match BlogRepo::list_with_owner(&state.pool).await {
        Ok(b) => b,
        Err(e) => {
            tracing::error!("Failed to list blogs for users: {:#}", e);
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({"error": "Internal server error"})),
            )
                .into_response();
        }
    };

    let by_id: HashMap<Uuid, BlogRow> = blogs
        .into_iter()
        .map(|b| {
            (
                b.blog_id,
                BlogRow {
                    blog_id: b.blog_id,
                    title: b.title,
                    author: b.author,
                    url: b.url,
                    likes: b.likes,
                    owner_id: b.owner_id,
                    created_at: b.created_at,
                },
            )
        })
        .collect();

    // Populate each user's blogs in back-reference order
    let users_json: Vec<serde_json::Value> = users
        .iter()
        .map(|u| {
            let owned: Vec<&BlogRow> = u.blog_ids.iter().filter_map(|id| by_id.get(id)).collect();
            user_json(u, &owned)
        })
        .collect();

    Json(users_json).into_response()
}

/// POST /api/users - Register a new user
#[tracing::instrument(skip(state, req))]
pub async fn create_user(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CreateUserRequest>,
) -> impl IntoResponse {
    let (username, password) = match (req.username.as_deref(), req.password.as_deref()) {
        (Some(u), Some(p)) => (u, p),
        _ => {
            return (
                StatusCode::BAD_REQUEST,
                Json(json!({"error": "username and password are required"})),
            )
                .into_response();
        }
    };

    if let Err(e) = validate_credentials(username, password) {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({"error": e.to_string()})),
        )
            .into_response();
    }

    match UserRepo::get_by_username(&state.pool, username).await {
        Ok(Some(_)) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(json!({"error": "username must be unique"})),
            )
                .into_response();
        }
        Ok(None) => {}
        Err(e) => {
            tracing::error!("Failed to check username: {:#}", e);
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({"error": "Internal server error"})),
            )
                .into_response();
        }
    }

    let password_hash = match hash_password(password) {
        Ok(h) => h,
        Err(e) => {
            tracing::error!("Failed to hash password: {:#}", e);
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({"error": "Internal server error"})),
            )
                .into_response();
        }
    };

    let user_id = Uuid::new_v4();
    if let Err(e) = UserRepo::create(
        &state.pool,
        user_id,
        username,
        req.name.as_deref(),
        &password_hash,
    )
    .await
    {
        tracing::error!("Failed to create user: {:#}", e);
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({"error": "Internal server error"})),
        )
            .into_response();
    }

    (
        StatusCode::CREATED,
        Json(json!({
            "id": user_id,
            "username": username,
            "name": req.name,
            "blogs": [],
        })),
    )
        .into_response()
}
