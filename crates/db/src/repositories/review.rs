use sqlx::Row;

use safari_core::domain::package::PackageId;
use safari_core::domain::review::{Review, ReviewId};

use super::{decode_error, parse_timestamp, RepositoryError, ReviewRepository};
use crate::DbPool;

pub struct SqlReviewRepository {
    pool: DbPool,
}

impl SqlReviewRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn row_to_review(row: &sqlx::sqlite::SqliteRow) -> Result<Review, RepositoryError> {
    let id: String = row.try_get("id").map_err(decode_error)?;
    let package_id: String = row.try_get("package_id").map_err(decode_error)?;
    let author_name: String = row.try_get("author_name").map_err(decode_error)?;
    let rating: i64 = row.try_get("rating").map_err(decode_error)?;
    let comment: String = row.try_get("comment").map_err(decode_error)?;
    let approved: i64 = row.try_get("approved").map_err(decode_error)?;
    let created_at_str: String = row.try_get("created_at").map_err(decode_error)?;

    let rating = u8::try_from(rating)
        .map_err(|_| RepositoryError::Decode(format!("rating out of range: {rating}")))?;

    Ok(Review {
        id: ReviewId(id),
        package_id: PackageId(package_id),
        author_name,
        rating,
        comment,
        approved: approved != 0,
        created_at: parse_timestamp("created_at", &created_at_str)?,
    })
}

#[async_trait::async_trait]
impl ReviewRepository for SqlReviewRepository {
    async fn list_approved(&self, package_id: &PackageId) -> Result<Vec<Review>, RepositoryError> {
        let rows = sqlx::query(
            "SELECT id, package_id, author_name, rating, comment, approved, created_at
             FROM reviews
             WHERE package_id = ? AND approved = 1
             ORDER BY created_at DESC, id ASC",
        )
        .bind(&package_id.0)
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(row_to_review).collect()
    }

    async fn create(&self, review: Review) -> Result<(), RepositoryError> {
        sqlx::query(
            "INSERT INTO reviews (id, package_id, author_name, rating, comment, approved, created_at)
             VALUES (?, ?, ?, ?, ?, 0, ?)",
        )
        .bind(&review.id.0)
        .bind(&review.package_id.0)
        .bind(&review.author_name)
        .bind(i64::from(review.rating))
        .bind(&review.comment)
        .bind(review.created_at.to_rfc3339())
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn approve(&self, id: &ReviewId) -> Result<bool, RepositoryError> {
        let result = sqlx::query("UPDATE reviews SET approved = 1 WHERE id = ?")
            .bind(&id.0)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn find_by_id(&self, id: &ReviewId) -> Result<Option<Review>, RepositoryError> {
        let row = sqlx::query(
            "SELECT id, package_id, author_name, rating, comment, approved, created_at
             FROM reviews WHERE id = ?",
        )
        .bind(&id.0)
        .fetch_optional(&self.pool)
        .await?;

        row.as_ref().map(row_to_review).transpose()
    }
}
