use crate::blog_mutations::{self, MutationError};
use crate::state::AppState;
use crate::web::api::middleware::AuthUser;
use crate::web::api::parse_uuid_param;
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use blaek_common::models::blog::{BlogUpdateRequest, NewBlogRequest};
use blaek_db::{BlogRepo, BlogWithOwnerRow};
use serde_json::json;
use std::sync::Arc;

/// Public JSON shape of a blog, owner summary included when one is set
fn blog_json(blog: &BlogWithOwnerRow) -> serde_json::Value {
    let user = blog.owner_username.as_ref().map(|username| {
        json!({
            "username": username,
            "name": blog.owner_name,
        })
    });
    json!({
        "id": blog.blog_id,
        "title": blog.title,
        "author": blog.author,
        "url": blog.url,
        "likes": blog.likes,
        "user": user,
    })
}

fn mutation_error_response(err: MutationError) -> Response {
    match err {
        MutationError::Validation(msg) => {
            (StatusCode::BAD_REQUEST, Json(json!({"error": msg}))).into_response()
        }
        MutationError::UnknownUser => (
            StatusCode::UNAUTHORIZED,
            Json(json!({"error": err.to_string()})),
        )
            .into_response(),
        MutationError::NotOwner => (
            StatusCode::FORBIDDEN,
            Json(json!({"error": err.to_string()})),
        )
            .into_response(),
        MutationError::Internal(e) => {
            tracing::error!("Blog mutation failed: {:#}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({"error": "Internal server error"})),
            )
                .into_response()
        }
    }
}

/// GET /api/blogs - List all blogs with owner summaries
#[tracing::instrument(skip(state))]
pub async fn list_blogs(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    match BlogRepo::list_with_owner(&state.pool).await {
        Ok(blogs) => {
            let blogs_json: Vec<serde_json::Value> = blogs.iter().map(blog_json).collect();
            Json(blogs_json).into_response()
        }
        Err(e) => {
            tracing::error!("Failed to list blogs: {:#}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({"error": "Internal server error"})),
            )
                .into_response()
        }
    }
}

/// POST /api/blogs - Create a blog owned by the authenticated user
#[tracing::instrument(skip(state, auth, req))]
pub async fn create_blog(
    State(state): State<Arc<AppState>>,
    auth: AuthUser,
    Json(req): Json<NewBlogRequest>,
) -> impl IntoResponse {
    match blog_mutations::create_blog(&state.pool, &auth.0, req).await {
        Ok(blog) => (StatusCode::CREATED, Json(blog_json(&blog))).into_response(),
        Err(e) => mutation_error_response(e),
    }
}

/// PUT /api/blogs/:id - Partial update; answers `null` when the id is absent
#[tracing::instrument(skip(state, req))]
pub async fn update_blog(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(req): Json<BlogUpdateRequest>,
) -> impl IntoResponse {
    let blog_id = match parse_uuid_param(&id, "blog") {
        Ok(id) => id,
        Err(resp) => return resp,
    };

    match blog_mutations::update_blog(&state.pool, blog_id, req).await {
        Ok(Some(blog)) => Json(blog_json(&blog)).into_response(),
        Ok(None) => Json(serde_json::Value::Null).into_response(),
        Err(e) => mutation_error_response(e),
    }
}

/// DELETE /api/blogs/:id - Creator-only delete, idempotent on absent ids
#[tracing::instrument(skip(state, auth))]
pub async fn delete_blog(
    State(state): State<Arc<AppState>>,
    auth: AuthUser,
    Path(id): Path<String>,
) -> impl IntoResponse {
    let blog_id = match parse_uuid_param(&id, "blog") {
        Ok(id) => id,
        Err(resp) => return resp,
    };

    match blog_mutations::delete_blog(&state.pool, &auth.0, blog_id).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => mutation_error_response(e),
    }
}
