//! Blog create/update/delete orchestration.
//!
//! Shared by the API handlers. This module owns both sides of the
//! blog-to-user relation: a blog's `owner_id` and the owner's `blog_ids`
//! list are only ever written here, within a single mutation. The blog
//! write and the back-reference write are two single-row statements, not
//! one transaction, so a crash between them can leave an orphaned blog
//! (create) or a dangling reference (delete).

use blaek_common::models::auth::Claims;
use blaek_common::models::blog::{BlogUpdateRequest, NewBlogRequest};
use blaek_common::validation::{validate_blog_update, validate_new_blog};
use blaek_db::{BlogRepo, BlogUpdate, BlogWithOwnerRow, UserRepo, UserRow};
use sqlx::PgPool;
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum MutationError {
    /// Missing or malformed field in the request payload -> 400
    #[error("{0}")]
    Validation(String),
    /// Token subject does not resolve to an existing user -> 401
    #[error("invalid or unknown user")]
    UnknownUser,
    /// Delete attempted by anyone but the blog's creator -> 403
    #[error("only the creator of a blog may delete it")]
    NotOwner,
    /// Database or other infrastructure failure -> 500
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

/// Resolve the subject of a verified token to a user row.
///
/// The token signature was already checked by the extractor; a subject
/// that is not a UUID or matches no user is still an auth failure, since
/// the account may have been deleted after the token was issued.
pub async fn resolve_authenticated(pool: &PgPool, claims: &Claims) -> Result<UserRow, MutationError> {
    let user_id: Uuid = claims.sub.parse().map_err(|_| MutationError::UnknownUser)?;
    UserRepo::get_by_id(pool, user_id)
        .await?
        .ok_or(MutationError::UnknownUser)
}

/// Create a blog owned by the authenticated user and record it in the
/// owner's blog list.
#[tracing::instrument(skip(pool, claims, req))]
pub async fn create_blog(
    pool: &PgPool,
    claims: &Claims,
    req: NewBlogRequest,
) -> Result<BlogWithOwnerRow, MutationError> {
    let user = resolve_authenticated(pool, claims).await?;

    let fields = validate_new_blog(&req).map_err(|e| MutationError::Validation(e.to_string()))?;

    let blog = BlogRepo::create(
        pool,
        Uuid::new_v4(),
        &fields.title,
        &fields.author,
        &fields.url,
        fields.likes,
        Some(user.user_id),
    )
    .await?;

    // Back-reference second: the list entry must carry the final blog id
    UserRepo::append_blog_ref(pool, user.user_id, blog.blog_id).await?;

    tracing::info!("User {} created blog {}", user.username, blog.blog_id);

    Ok(BlogWithOwnerRow {
        blog_id: blog.blog_id,
        title: blog.title,
        author: blog.author,
        url: blog.url,
        likes: blog.likes,
        owner_id: blog.owner_id,
        created_at: blog.created_at,
        owner_username: Some(user.username),
        owner_name: user.name,
    })
}

/// Apply a partial update to a blog. Returns `Ok(None)` when no blog with
/// that id exists; callers treat that as a successful empty result, not an
/// error. Ownership is never touched.
#[tracing::instrument(skip(pool, req))]
pub async fn update_blog(
    pool: &PgPool,
    blog_id: Uuid,
    req: BlogUpdateRequest,
) -> Result<Option<BlogWithOwnerRow>, MutationError> {
    validate_blog_update(&req).map_err(|e| MutationError::Validation(e.to_string()))?;

    let update = BlogUpdate {
        title: req.title,
        author: req.author,
        url: req.url,
        likes: req.likes,
    };

    let Some(updated) = BlogRepo::update(pool, blog_id, &update).await? else {
        return Ok(None);
    };

    // Re-populate the owner summary for the response
    let populated = BlogRepo::get_with_owner(pool, updated.blog_id).await?;
    Ok(populated)
}

/// Delete a blog, creator-only. Deleting an id that no longer exists is a
/// success with no side effect.
#[tracing::instrument(skip(pool, claims))]
pub async fn delete_blog(
    pool: &PgPool,
    claims: &Claims,
    blog_id: Uuid,
) -> Result<(), MutationError> {
    let user = resolve_authenticated(pool, claims).await?;

    let Some(blog) = BlogRepo::get(pool, blog_id).await? else {
        return Ok(());
    };

    // An ownerless blog has no creator, so nobody may delete it
    if blog.owner_id != Some(user.user_id) {
        return Err(MutationError::NotOwner);
    }

    BlogRepo::delete(pool, blog_id).await?;
    UserRepo::remove_blog_ref(pool, user.user_id, blog_id).await?;

    tracing::info!("User {} deleted blog {}", user.username, blog_id);

    Ok(())
}
