use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct UserRow {
    pub user_id: Uuid,
    pub username: String,
    pub name: Option<String>,
    pub password_hash: String,
    pub blog_ids: Vec<Uuid>,
    pub created_at: DateTime<Utc>,
}

pub struct UserRepo;

impl UserRepo {
    pub async fn create(
        pool: &PgPool,
        user_id: Uuid,
        username: &str,
        name: Option<&str>,
        password_hash: &str,
    ) -> Result<()> {
        sqlx::query(
            r#"INSERT INTO "user" (user_id, username, name, password_hash) VALUES ($1, $2, $3, $4)"#,
        )
        .bind(user_id)
        .bind(username)
        .bind(name)
        .bind(password_hash)
        .execute(pool)
        .await
        .context("Failed to create user")?;
        Ok(())
    }

    pub async fn get_by_id(pool: &PgPool, user_id: Uuid) -> Result<Option<UserRow>> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"SELECT user_id, username, name, password_hash, blog_ids, created_at FROM "user" WHERE user_id = $1"#,
        )
        .bind(user_id)
        .fetch_optional(pool)
        .await
        .context("Failed to get user by id")?;
        Ok(row)
    }

    pub async fn get_by_username(pool: &PgPool, username: &str) -> Result<Option<UserRow>> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"SELECT user_id, username, name, password_hash, blog_ids, created_at FROM "user" WHERE username = $1"#,
        )
        .bind(username)
        .fetch_optional(pool)
        .await
        .context("Failed to get user by username")?;
        Ok(row)
    }

    pub async fn list(pool: &PgPool) -> Result<Vec<UserRow>> {
        let rows = sqlx::query_as::<_, UserRow>(
            r#"SELECT user_id, username, name, password_hash, blog_ids, created_at FROM "user" ORDER BY created_at"#,
        )
        .fetch_all(pool)
        .await
        .context("Failed to list users")?;
        Ok(rows)
    }

    /// Append a blog id to the user's owned-blog list. Append order is
    /// preserved; the list mirrors `blog.owner_id` and is only written by
    /// the mutation service.
    pub async fn append_blog_ref(pool: &PgPool, user_id: Uuid, blog_id: Uuid) -> Result<()> {
        sqlx::query(
            r#"UPDATE "user" SET blog_ids = array_append(blog_ids, $2) WHERE user_id = $1"#,
        )
        .bind(user_id)
        .bind(blog_id)
        .execute(pool)
        .await
        .context("Failed to append blog reference")?;
        Ok(())
    }

    /// Remove all occurrences of a blog id from the user's owned-blog list.
    pub async fn remove_blog_ref(pool: &PgPool, user_id: Uuid, blog_id: Uuid) -> Result<()> {
        sqlx::query(
            r#"UPDATE "user" SET blog_ids = array_remove(blog_ids, $2) WHERE user_id = $1"#,
        )
        .bind(user_id)
        .bind(blog_id)
        .execute(pool)
        .await
        .context("Failed to remove blog reference")?;
        Ok(())
    }
}
