use safari_core::domain::inquiry::ContactInquiry;

use super::{ContactInquiryRepository, RepositoryError};
use crate::DbPool;

pub struct SqlContactInquiryRepository {
    pool: DbPool,
}

impl SqlContactInquiryRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait::async_trait]
impl ContactInquiryRepository for SqlContactInquiryRepository {
    async fn create(&self, inquiry: ContactInquiry) -> Result<(), RepositoryError> {
        sqlx::query(
            "INSERT INTO contact_inquiries (id, name, email, phone, subject, message, created_at)
             VALUES (?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(&inquiry.id.0)
        .bind(&inquiry.name)
        .bind(&inquiry.email)
        .bind(&inquiry.phone)
        .bind(&inquiry.subject)
        .bind(&inquiry.message)
        .bind(inquiry.created_at.to_rfc3339())
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}
