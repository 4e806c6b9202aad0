use std::str::FromStr;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use thiserror::Error;

use safari_core::domain::booking::{Booking, BookingId};
use safari_core::domain::inquiry::{ContactInquiry, NewsletterSubscription, SubscribeOutcome};
use safari_core::domain::package::{Package, PackageId};
use safari_core::domain::review::{Review, ReviewId};
use safari_core::errors::ApplicationError;

pub mod booking;
pub mod inquiry;
pub mod memory;
pub mod newsletter;
pub mod package;
pub mod review;

pub use booking::SqlBookingRepository;
pub use inquiry::SqlContactInquiryRepository;
pub use memory::{
    InMemoryBookingRepository, InMemoryContactInquiryRepository, InMemoryNewsletterRepository,
    InMemoryPackageRepository, InMemoryReviewRepository,
};
pub use newsletter::SqlNewsletterRepository;
pub use package::SqlPackageRepository;
pub use review::SqlReviewRepository;

#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("decode error: {0}")]
    Decode(String),
}

impl From<RepositoryError> for ApplicationError {
    fn from(value: RepositoryError) -> Self {
        ApplicationError::Persistence(value.to_string())
    }
}

#[async_trait]
pub trait PackageRepository: Send + Sync {
    /// Active packages ordered by catalog position, then slug.
    async fn list_active(&self) -> Result<Vec<Package>, RepositoryError>;
    async fn find_by_slug(&self, slug: &str) -> Result<Option<Package>, RepositoryError>;
    async fn save(&self, package: Package) -> Result<(), RepositoryError>;
}

#[async_trait]
pub trait BookingRepository: Send + Sync {
    async fn create(&self, booking: Booking) -> Result<(), RepositoryError>;
    async fn find_by_id(&self, id: &BookingId) -> Result<Option<Booking>, RepositoryError>;
}

#[async_trait]
pub trait ReviewRepository: Send + Sync {
    /// Approved reviews for a package, newest first.
    async fn list_approved(&self, package_id: &PackageId) -> Result<Vec<Review>, RepositoryError>;
    /// Stores the review unapproved regardless of the flag it carries.
    async fn create(&self, review: Review) -> Result<(), RepositoryError>;
    /// Returns `false` when no review has that id.
    async fn approve(&self, id: &ReviewId) -> Result<bool, RepositoryError>;
    async fn find_by_id(&self, id: &ReviewId) -> Result<Option<Review>, RepositoryError>;
}

#[async_trait]
pub trait NewsletterRepository: Send + Sync {
    async fn subscribe(
        &self,
        subscription: NewsletterSubscription,
    ) -> Result<SubscribeOutcome, RepositoryError>;
}

#[async_trait]
pub trait ContactInquiryRepository: Send + Sync {
    async fn create(&self, inquiry: ContactInquiry) -> Result<(), RepositoryError>;
}

pub(crate) fn decode_error(error: impl ToString) -> RepositoryError {
    RepositoryError::Decode(error.to_string())
}

pub(crate) fn parse_decimal(column: &str, raw: &str) -> Result<Decimal, RepositoryError> {
    Decimal::from_str(raw.trim())
        .map_err(|error| RepositoryError::Decode(format!("{column} `{raw}`: {error}")))
}

pub(crate) fn parse_timestamp(column: &str, raw: &str) -> Result<DateTime<Utc>, RepositoryError> {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|error| RepositoryError::Decode(format!("{column} `{raw}`: {error}")))
}

#[cfg(test)]
pub(crate) async fn migrated_pool() -> crate::DbPool {
    let pool = crate::connect_with_settings("sqlite::memory:", 1, 30).await.expect("connect");
    crate::migrations::run_pending(&pool).await.expect("run migrations");
    pool
}
