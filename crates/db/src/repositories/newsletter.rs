use safari_core::domain::inquiry::{NewsletterSubscription, SubscribeOutcome};

use super::{NewsletterRepository, RepositoryError};
use crate::DbPool;

pub struct SqlNewsletterRepository {
    pool: DbPool,
}

impl SqlNewsletterRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait::async_trait]
impl NewsletterRepository for SqlNewsletterRepository {
    async fn subscribe(
        &self,
        subscription: NewsletterSubscription,
    ) -> Result<SubscribeOutcome, RepositoryError> {
        let result = sqlx::query(
            "INSERT INTO newsletter_subscribers (email, subscribed_at)
             VALUES (?, ?)
             ON CONFLICT(email) DO NOTHING",
        )
        .bind(&subscription.email)
        .bind(subscription.subscribed_at.to_rfc3339())
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            Ok(SubscribeOutcome::AlreadySubscribed)
        } else {
            Ok(SubscribeOutcome::Subscribed)
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use safari_core::domain::inquiry::{NewsletterSubscription, SubscribeOutcome};

    use super::SqlNewsletterRepository;
    use crate::repositories::{migrated_pool, NewsletterRepository};

    #[tokio::test]
    async fn second_subscription_with_different_case_is_a_duplicate() {
        let repo = SqlNewsletterRepository::new(migrated_pool().await);

        let first = NewsletterSubscription::new("Traveler@Example.com", Utc::now()).expect("valid");
        let second = NewsletterSubscription::new(" traveler@example.com ", Utc::now()).expect("valid");

        assert_eq!(repo.subscribe(first).await.expect("subscribe"), SubscribeOutcome::Subscribed);
        assert_eq!(
            repo.subscribe(second).await.expect("subscribe"),
            SubscribeOutcome::AlreadySubscribed
        );
    }
}
