use axum::{extract::State, http::StatusCode, Json};
use chrono::Utc;
use safari_core::domain::inquiry::{
    ContactInquiry, NewContactInquiry, NewsletterSubscription, SubscribeOutcome,
};
use safari_core::errors::ApplicationError;
use serde::{Deserialize, Serialize};
use tracing::info;

use super::{api_error, correlation_id, ApiResult, AppState};

#[derive(Debug, Deserialize)]
pub struct NewsletterInput {
    pub email: String,
}

#[derive(Debug, Serialize)]
pub struct NewsletterResponse {
    pub status: SubscribeOutcome,
    pub email: String,
}

#[derive(Debug, Deserialize)]
pub struct ContactInput {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    #[serde(default)]
    pub subject: String,
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct ContactResponse {
    pub inquiry_id: String,
    pub subject: String,
}

/// A repeat signup is not an error: it answers 200 instead of 201.
pub async fn subscribe(
    State(state): State<AppState>,
    Json(input): Json<NewsletterInput>,
) -> ApiResult<(StatusCode, Json<NewsletterResponse>)> {
    let correlation_id = correlation_id();
    let subscription = NewsletterSubscription::new(&input.email, Utc::now())
        .map_err(|error| api_error(ApplicationError::from(error), &correlation_id))?;
    let email = subscription.email.clone();

    let outcome = state
        .newsletter
        .subscribe(subscription)
        .await
        .map_err(|error| api_error(ApplicationError::from(error), &correlation_id))?;

    info!(
        event_name = "newsletter.subscribe",
        correlation_id = %correlation_id,
        outcome = ?outcome,
        "newsletter signup handled"
    );

    let status = match outcome {
        SubscribeOutcome::Subscribed => StatusCode::CREATED,
        SubscribeOutcome::AlreadySubscribed => StatusCode::OK,
    };
    Ok((status, Json(NewsletterResponse { status: outcome, email })))
}

pub async fn contact(
    State(state): State<AppState>,
    Json(input): Json<ContactInput>,
) -> ApiResult<(StatusCode, Json<ContactResponse>)> {
    let correlation_id = correlation_id();
    let inquiry = ContactInquiry::submit(
        NewContactInquiry {
            name: input.name,
            email: input.email,
            phone: input.phone,
            subject: input.subject,
            message: input.message,
        },
        Utc::now(),
    )
    .map_err(|error| api_error(ApplicationError::from(error), &correlation_id))?;

    state
        .inquiries
        .create(inquiry.clone())
        .await
        .map_err(|error| api_error(ApplicationError::from(error), &correlation_id))?;

    info!(
        event_name = "contact.inquiry.created",
        correlation_id = %correlation_id,
        inquiry_id = %inquiry.id.0,
        "contact inquiry stored"
    );

    Ok((
        StatusCode::CREATED,
        Json(ContactResponse { inquiry_id: inquiry.id.0, subject: inquiry.subject }),
    ))
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use serde_json::json;

    use crate::api::test_support::{harness, post};

    #[tokio::test]
    async fn repeat_newsletter_signup_is_reported_not_failed() {
        let harness = harness();

        let (status, body) =
            post(&harness.router, "/api/v1/newsletter", json!({ "email": "Jambo@Example.com" }))
                .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["status"], "subscribed");
        assert_eq!(body["email"], "jambo@example.com");

        let (status, body) =
            post(&harness.router, "/api/v1/newsletter", json!({ "email": "jambo@example.com " }))
                .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "already_subscribed");
    }

    #[tokio::test]
    async fn newsletter_rejects_malformed_email() {
        let harness = harness();
        let (status, body) =
            post(&harness.router, "/api/v1/newsletter", json!({ "email": "jambo" })).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["detail"].as_str().unwrap_or_default().contains("email"));
    }

    #[tokio::test]
    async fn contact_inquiry_is_stored_with_default_subject() {
        let harness = harness();
        let (status, body) = post(
            &harness.router,
            "/api/v1/contact",
            json!({
                "name": "Kamau",
                "email": "kamau@example.com",
                "message": "Can you arrange a Nairobi city tour?"
            }),
        )
        .await;

        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["subject"], "General inquiry");

        let stored = harness.inquiries.all().await;
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].id.0, body["inquiry_id"].as_str().unwrap_or_default());
    }

    #[tokio::test]
    async fn contact_without_message_is_rejected() {
        let harness = harness();
        let (status, _) = post(
            &harness.router,
            "/api/v1/contact",
            json!({ "name": "Kamau", "email": "kamau@example.com", "message": "  " }),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(harness.inquiries.all().await.is_empty());
    }
}
