use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::package::PackageId;
use crate::errors::DomainError;

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ReviewId(pub String);

impl ReviewId {
    pub fn generate() -> Self {
        Self(format!("REV-{}", Uuid::new_v4().simple()))
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewReview {
    pub package_id: PackageId,
    pub author_name: String,
    pub rating: u8,
    pub comment: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Review {
    pub id: ReviewId,
    pub package_id: PackageId,
    pub author_name: String,
    pub rating: u8,
    pub comment: String,
    pub approved: bool,
    pub created_at: DateTime<Utc>,
}

impl Review {
    /// New reviews are never visible until a moderator approves them.
    pub fn submit(input: NewReview, now: DateTime<Utc>) -> Result<Self, DomainError> {
        if input.author_name.trim().is_empty() {
            return Err(DomainError::invalid("author_name", "must not be empty"));
        }
        if !(1..=5).contains(&input.rating) {
            return Err(DomainError::invalid("rating", "must be between 1 and 5"));
        }
        if input.comment.trim().is_empty() {
            return Err(DomainError::invalid("comment", "must not be empty"));
        }

        Ok(Self {
            id: ReviewId::generate(),
            package_id: input.package_id,
            author_name: input.author_name.trim().to_string(),
            rating: input.rating,
            comment: input.comment.trim().to_string(),
            approved: false,
            created_at: now,
        })
    }
}
