use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct BlogRow {
    pub blog_id: Uuid,
    pub title: String,
    pub author: String,
    pub url: String,
    pub likes: i64,
    pub owner_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
}

/// Blog row joined with a summary of its owner (username and display name)
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct BlogWithOwnerRow {
    pub blog_id: Uuid,
    pub title: String,
    pub author: String,
    pub url: String,
    pub likes: i64,
    pub owner_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub owner_username: Option<String>,
    pub owner_name: Option<String>,
}

/// Fields applied by a partial update. `None` leaves the column untouched.
#[derive(Debug, Clone, Default)]
pub struct BlogUpdate {
    pub title: Option<String>,
    pub author: Option<String>,
    pub url: Option<String>,
    pub likes: Option<i64>,
}

pub struct BlogRepo;

impl BlogRepo {
    pub async fn create(
        pool: &PgPool,
        blog_id: Uuid,
        title: &str,
        author: &str,
        url: &str,
        likes: i64,
        owner_id: Option<Uuid>,
    ) -> Result<BlogRow> {
        let row = sqlx::query_as::<_, BlogRow>(
            r#"INSERT INTO blog (blog_id, title, author, url, likes, owner_id)
               VALUES ($1, $2, $3, $4, $5, $6)
               RETURNING blog_id, title, author, url, likes, owner_id, created_at"#,
        )
        .bind(blog_id)
        .bind(title)
        .bind(author)
        .bind(url)
        .bind(likes)
        .bind(owner_id)
        .fetch_one(pool)
        .await
        .context("Failed to create blog")?;
        Ok(row)
    }

    pub async fn get(pool: &PgPool, blog_id: Uuid) -> Result<Option<BlogRow>> {
        let row = sqlx::query_as::<_, BlogRow>(
            r#"SELECT blog_id, title, author, url, likes, owner_id, created_at FROM blog WHERE blog_id = $1"#,
        )
        .bind(blog_id)
        .fetch_optional(pool)
        .await
        .context("Failed to get blog")?;
        Ok(row)
    }

    pub async fn get_with_owner(pool: &PgPool, blog_id: Uuid) -> Result<Option<BlogWithOwnerRow>> {
        let row = sqlx::query_as::<_, BlogWithOwnerRow>(
            r#"SELECT b.blog_id, b.title, b.author, b.url, b.likes, b.owner_id, b.created_at,
                      u.username AS owner_username, u.name AS owner_name
               FROM blog b
               LEFT JOIN "user" u ON u.user_id = b.owner_id
               WHERE b.blog_id = $1"#,
        )
        .bind(blog_id)
        .fetch_optional(pool)
        .await
        .context("Failed to get blog with owner")?;
        Ok(row)
    }

    pub async fn list_with_owner(pool: &PgPool) -> Result<Vec<BlogWithOwnerRow>> {
        let rows = sqlx::query_as::<_, BlogWithOwnerRow>(
            r#"SELECT b.blog_id, b.title, b.author, b.url, b.likes, b.owner_id, b.created_at,
                      u.username AS owner_username, u.name AS owner_name
               FROM blog b
               LEFT JOIN "user" u ON u.user_id = b.owner_id
               ORDER BY b.created_at"#,
        )
        .fetch_all(pool)
        .await
        .context("Failed to list blogs")?;
        Ok(rows)
    }

    pub async fn list_by_owner(pool: &PgPool, owner_id: Uuid) -> Result<Vec<BlogRow>> {
        let rows = sqlx::query_as::<_, BlogRow>(
            r#"SELECT blog_id, title, author, url, likes, owner_id, created_at
               FROM blog WHERE owner_id = $1 ORDER BY created_at"#,
        )
        .bind(owner_id)
        .fetch_all(pool)
        .await
        .context("Failed to list blogs by owner")?;
        Ok(rows)
    }

    /// Apply a partial update. Returns the updated row, or `None` when no
    /// blog with that id exists. Ownership is immutable and not part of
    /// the update surface.
    pub async fn update(
        pool: &PgPool,
        blog_id: Uuid,
        update: &BlogUpdate,
    ) -> Result<Option<BlogRow>> {
        let row = sqlx::query_as::<_, BlogRow>(
            r#"UPDATE blog
               SET title = COALESCE($2, title),
                   author = COALESCE($3, author),
                   url = COALESCE($4, url),
                   likes = COALESCE($5, likes)
               WHERE blog_id = $1
               RETURNING blog_id, title, author, url, likes, owner_id, created_at"#,
        )
        .bind(blog_id)
        .bind(update.title.as_deref())
        .bind(update.author.as_deref())
        .bind(update.url.as_deref())
        .bind(update.likes)
        .fetch_optional(pool)
        .await
        .context("Failed to update blog")?;
        Ok(row)
    }

    /// Delete a blog. Deleting an absent id is a no-op, not an error.
    pub async fn delete(pool: &PgPool, blog_id: Uuid) -> Result<()> {
        sqlx::query(r#"DELETE FROM blog WHERE blog_id = $1"#)
            .bind(blog_id)
            .execute(pool)
            .await
            .context("Failed to delete blog")?;
        Ok(())
    }
}
