use std::collections::HashMap;

use chrono::{DateTime, Utc};
use magshelf_core::{
    AccountId, Comment, CommentId, Magazine, MagazineFilter, MagazineId, MagazineStore,
    MagazineStoreError,
};
use sqlx::{FromRow, PgPool, Postgres, Transaction};
use uuid::Uuid;

pub struct PostgresMagazineStore {
    pool: PgPool,
}

impl PostgresMagazineStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

const MAGAZINE_COLUMNS: &str = "id, title, description, categories, file_url, cover_image_url, \
                                uploaded_by, created_at, updated_at";

#[derive(FromRow)]
struct MagazineRow {
    id: Uuid,
    title: String,
    description: String,
    categories: Vec<String>,
    file_url: String,
    cover_image_url: String,
    uploaded_by: Uuid,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

#[derive(FromRow)]
struct CommentRow {
    id: Uuid,
    magazine_id: Uuid,
    user_id: Uuid,
    text: String,
    created_at: DateTime<Utc>,
}

fn unexpected(e: sqlx::Error) -> MagazineStoreError {
    MagazineStoreError::UnexpectedError(e.to_string())
}

/// Escapes LIKE wildcards so the search term matches literally.
fn like_pattern(search: &str) -> String {
    let escaped = search
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    format!("%{escaped}%")
}

impl PostgresMagazineStore {
    /// Attaches likes and comments to the fetched rows, keeping row order.
    async fn hydrate(&self, rows: Vec<MagazineRow>) -> Result<Vec<Magazine>, MagazineStoreError> {
        if rows.is_empty() {
            return Ok(Vec::new());
        }
        let ids: Vec<Uuid> = rows.iter().map(|row| row.id).collect();

        let likes: Vec<(Uuid, Uuid)> = sqlx::query_as(
            "SELECT magazine_id, account_id FROM magazine_likes \
             WHERE magazine_id = ANY($1) ORDER BY seq",
        )
        .bind(&ids)
        .fetch_all(&self.pool)
        .await
        .map_err(unexpected)?;

        let comments: Vec<CommentRow> = sqlx::query_as(
            "SELECT id, magazine_id, user_id, text, created_at FROM magazine_comments \
             WHERE magazine_id = ANY($1) ORDER BY seq",
        )
        .bind(&ids)
        .fetch_all(&self.pool)
        .await
        .map_err(unexpected)?;

        let mut likes_by_magazine: HashMap<Uuid, Vec<AccountId>> = HashMap::new();
        for (magazine_id, account_id) in likes {
            likes_by_magazine
                .entry(magazine_id)
                .or_default()
                .push(AccountId::from_uuid(account_id));
        }

        let mut comments_by_magazine: HashMap<Uuid, Vec<Comment>> = HashMap::new();
        for row in comments {
            comments_by_magazine
                .entry(row.magazine_id)
                .or_default()
                .push(Comment {
                    id: CommentId::from_uuid(row.id),
                    user: AccountId::from_uuid(row.user_id),
                    text: row.text,
                    created_at: row.created_at,
                });
        }

        Ok(rows
            .into_iter()
            .map(|row| Magazine {
                id: MagazineId::from_uuid(row.id),
                title: row.title,
                description: row.description,
                categories: row.categories,
                file_url: row.file_url,
                cover_image_url: row.cover_image_url,
                uploaded_by: AccountId::from_uuid(row.uploaded_by),
                likes: likes_by_magazine.remove(&row.id).unwrap_or_default(),
                comments: comments_by_magazine.remove(&row.id).unwrap_or_default(),
                created_at: row.created_at,
                updated_at: row.updated_at,
            })
            .collect())
    }

    async fn fetch_one(
        &self,
        id: MagazineId,
        owner: Option<AccountId>,
    ) -> Result<Magazine, MagazineStoreError> {
        let sql = format!(
            "SELECT {MAGAZINE_COLUMNS} FROM magazines \
             WHERE id = $1 AND ($2::uuid IS NULL OR uploaded_by = $2)"
        );
        let row = sqlx::query_as::<_, MagazineRow>(&sql)
            .bind(id.as_uuid())
            .bind(owner.map(|owner| *owner.as_uuid()))
            .fetch_optional(&self.pool)
            .await
            .map_err(unexpected)?
            .ok_or(MagazineStoreError::MagazineNotFound)?;

        self.hydrate(vec![row])
            .await?
            .pop()
            .ok_or(MagazineStoreError::MagazineNotFound)
    }

    async fn write_engagement(
        tx: &mut Transaction<'_, Postgres>,
        magazine: &Magazine,
    ) -> Result<(), MagazineStoreError> {
        sqlx::query("DELETE FROM magazine_likes WHERE magazine_id = $1")
            .bind(magazine.id.as_uuid())
            .execute(&mut **tx)
            .await
            .map_err(unexpected)?;

        for account_id in &magazine.likes {
            sqlx::query("INSERT INTO magazine_likes (magazine_id, account_id) VALUES ($1, $2)")
                .bind(magazine.id.as_uuid())
                .bind(account_id.as_uuid())
                .execute(&mut **tx)
                .await
                .map_err(unexpected)?;
        }

        // Comments are append-only.
        for comment in &magazine.comments {
            sqlx::query(
                "INSERT INTO magazine_comments (id, magazine_id, user_id, text, created_at) \
                 VALUES ($1, $2, $3, $4, $5) ON CONFLICT (id) DO NOTHING",
            )
            .bind(comment.id.as_uuid())
            .bind(magazine.id.as_uuid())
            .bind(comment.user.as_uuid())
            .bind(&comment.text)
            .bind(comment.created_at)
            .execute(&mut **tx)
            .await
            .map_err(unexpected)?;
        }

        Ok(())
    }
}

#[async_trait::async_trait]
impl MagazineStore for PostgresMagazineStore {
    #[tracing::instrument(name = "Adding magazine to PostgreSQL", skip_all)]
    async fn create(&self, magazine: &Magazine) -> Result<(), MagazineStoreError> {
        let mut tx = self.pool.begin().await.map_err(unexpected)?;

        sqlx::query(
            r#"
                INSERT INTO magazines (id, title, description, categories, file_url,
                                       cover_image_url, uploaded_by, created_at, updated_at)
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            "#,
        )
        .bind(magazine.id.as_uuid())
        .bind(&magazine.title)
        .bind(&magazine.description)
        .bind(&magazine.categories)
        .bind(&magazine.file_url)
        .bind(&magazine.cover_image_url)
        .bind(magazine.uploaded_by.as_uuid())
        .bind(magazine.created_at)
        .bind(magazine.updated_at)
        .execute(&mut *tx)
        .await
        .map_err(unexpected)?;

        Self::write_engagement(&mut tx, magazine).await?;
        tx.commit().await.map_err(unexpected)
    }

    #[tracing::instrument(name = "Listing magazines from PostgreSQL", skip_all)]
    async fn list(&self, filter: &MagazineFilter) -> Result<Vec<Magazine>, MagazineStoreError> {
        let sql = format!(
            "SELECT {MAGAZINE_COLUMNS} FROM magazines \
             WHERE ($1::text IS NULL OR $1 = ANY(categories)) \
               AND ($2::text IS NULL OR title ILIKE $2 OR description ILIKE $2) \
             ORDER BY created_at, id"
        );
        let rows = sqlx::query_as::<_, MagazineRow>(&sql)
            .bind(filter.category())
            .bind(filter.search().map(like_pattern))
            .fetch_all(&self.pool)
            .await
            .map_err(unexpected)?;

        self.hydrate(rows).await
    }

    #[tracing::instrument(name = "Listing owner magazines from PostgreSQL", skip_all)]
    async fn list_by_owner(&self, owner: AccountId) -> Result<Vec<Magazine>, MagazineStoreError> {
        let sql = format!(
            "SELECT {MAGAZINE_COLUMNS} FROM magazines WHERE uploaded_by = $1 ORDER BY created_at, id"
        );
        let rows = sqlx::query_as::<_, MagazineRow>(&sql)
            .bind(owner.as_uuid())
            .fetch_all(&self.pool)
            .await
            .map_err(unexpected)?;

        self.hydrate(rows).await
    }

    #[tracing::instrument(name = "Retrieving magazine from PostgreSQL", skip_all)]
    async fn find_by_id(&self, id: MagazineId) -> Result<Magazine, MagazineStoreError> {
        self.fetch_one(id, None).await
    }

    #[tracing::instrument(name = "Saving magazine to PostgreSQL", skip_all)]
    async fn save(&self, magazine: &Magazine) -> Result<(), MagazineStoreError> {
        let mut tx = self.pool.begin().await.map_err(unexpected)?;

        let result = sqlx::query(
            r#"
                UPDATE magazines
                SET title = $2, description = $3, categories = $4, file_url = $5,
                    cover_image_url = $6, updated_at = $7
                WHERE id = $1
            "#,
        )
        .bind(magazine.id.as_uuid())
        .bind(&magazine.title)
        .bind(&magazine.description)
        .bind(&magazine.categories)
        .bind(&magazine.file_url)
        .bind(&magazine.cover_image_url)
        .bind(magazine.updated_at)
        .execute(&mut *tx)
        .await
        .map_err(unexpected)?;

        if result.rows_affected() == 0 {
            return Err(MagazineStoreError::MagazineNotFound);
        }

        Self::write_engagement(&mut tx, magazine).await?;
        tx.commit().await.map_err(unexpected)
    }

    #[tracing::instrument(name = "Retrieving owned magazine from PostgreSQL", skip_all)]
    async fn find_owned(
        &self,
        id: MagazineId,
        owner: AccountId,
    ) -> Result<Magazine, MagazineStoreError> {
        self.fetch_one(id, Some(owner)).await
    }

    #[tracing::instrument(name = "Deleting owned magazine from PostgreSQL", skip_all)]
    async fn delete_owned(
        &self,
        id: MagazineId,
        owner: AccountId,
    ) -> Result<bool, MagazineStoreError> {
        let result = sqlx::query("DELETE FROM magazines WHERE id = $1 AND uploaded_by = $2")
            .bind(id.as_uuid())
            .bind(owner.as_uuid())
            .execute(&self.pool)
            .await
            .map_err(unexpected)?;

        Ok(result.rows_affected() > 0)
    }
}
