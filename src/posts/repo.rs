use sqlx::PgPool;

use crate::posts::repo_types::{MediaType, Post, PostWithOwner};

impl Post {
    pub async fn insert(
        db: &PgPool,
        title: &str,
        description: Option<&str>,
        s3_key: &str,
        media_type: MediaType,
        file_size: i64,
        owner_id: i64,
    ) -> sqlx::Result<Post> {
        sqlx::query_as::<_, Post>(
            r#"
            INSERT INTO posts (title, description, s3_key, media_type, file_size, owner_id)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, title, description, s3_key, media_type, file_size, owner_id, created_at
            "#,
        )
        .bind(title)
        .bind(description)
        .bind(s3_key)
        .bind(media_type)
        .bind(file_size)
        .bind(owner_id)
        .fetch_one(db)
        .await
    }

    pub async fn get(db: &PgPool, id: i64) -> sqlx::Result<Option<PostWithOwner>> {
        sqlx::query_as::<_, PostWithOwner>(
            r#"
            SELECT p.id, p.title, p.description, p.s3_key, p.media_type,
                   p.file_size, p.owner_id, u.username AS owner_username, p.created_at
            FROM posts p
            JOIN users u ON u.id = p.owner_id
            WHERE p.id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(db)
        .await
    }

    pub async fn list(db: &PgPool, limit: i64, offset: i64) -> sqlx::Result<Vec<PostWithOwner>> {
        sqlx::query_as::<_, PostWithOwner>(
            r#"
            SELECT p.id, p.title, p.description, p.s3_key, p.media_type,
                   p.file_size, p.owner_id, u.username AS owner_username, p.created_at
            FROM posts p
            JOIN users u ON u.id = p.owner_id
            ORDER BY p.created_at DESC
            LIMIT $1 OFFSET $2
            "#,
        )
        .bind(limit)
        .bind(offset)
        .fetch_all(db)
        .await
    }

    pub async fn list_by_owner(db: &PgPool, owner_id: i64) -> sqlx::Result<Vec<PostWithOwner>> {
        sqlx::query_as::<_, PostWithOwner>(
            r#"
            SELECT p.id, p.title, p.description, p.s3_key, p.media_type,
                   p.file_size, p.owner_id, u.username AS owner_username, p.created_at
            FROM posts p
            JOIN users u ON u.id = p.owner_id
            WHERE p.owner_id = $1
            ORDER BY p.created_at DESC
            "#,
        )
        .bind(owner_id)
        .fetch_all(db)
        .await
    }

    pub async fn delete(db: &PgPool, id: i64) -> sqlx::Result<()> {
        sqlx::query("DELETE FROM posts WHERE id = $1")
            .bind(id)
            .execute(db)
            .await?;
        Ok(())
    }
}
