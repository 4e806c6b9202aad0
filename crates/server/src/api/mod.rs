//! JSON API for the booking site.
//!
//! Catalog:
//! - `GET  /api/v1/packages`                      — active packages, filterable
//! - `GET  /api/v1/packages/{slug}`               — package, highlights, add-ons
//! - `GET  /api/v1/packages/{slug}/add-ons`       — add-ons offered at the package
//!
//! Quotes and bookings:
//! - `POST /api/v1/quotes`                        — price breakdown for a party
//! - `POST /api/v1/quote-requests`                — quote plus a pending booking
//! - `POST /api/v1/bookings`                      — plain booking request
//!
//! Reviews, quiz and engagement:
//! - `GET  /api/v1/packages/{slug}/reviews`       — approved reviews
//! - `POST /api/v1/packages/{slug}/reviews`       — submit a review for moderation
//! - `GET  /api/v1/quiz`                          — quiz definition
//! - `POST /api/v1/quiz/recommendations`          — personality and top matches
//! - `POST /api/v1/newsletter`                    — newsletter signup
//! - `POST /api/v1/contact`                       — contact form

mod bookings;
mod catalog;
mod engagement;
mod quiz;
mod quotes;
mod reviews;

use std::sync::Arc;

use axum::{
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use safari_core::config::{AppConfig, PricingConfig};
use safari_core::domain::add_on::{standard_add_ons, AddOn};
use safari_core::domain::package::Package;
use safari_core::errors::{ApplicationError, InterfaceError};
use safari_core::quote::{DeterministicQuoteEngine, QuoteEngine};
use safari_core::recommend::QuizRecommender;
use safari_db::repositories::{
    BookingRepository, ContactInquiryRepository, NewsletterRepository, PackageRepository,
    ReviewRepository, SqlBookingRepository, SqlContactInquiryRepository, SqlNewsletterRepository,
    SqlPackageRepository, SqlReviewRepository,
};
use safari_db::DbPool;
use serde::Serialize;
use tracing::{error, warn};
use uuid::Uuid;

use crate::messages::QuoteMessageRenderer;

#[derive(Clone)]
pub struct AppState {
    pub packages: Arc<dyn PackageRepository>,
    pub bookings: Arc<dyn BookingRepository>,
    pub reviews: Arc<dyn ReviewRepository>,
    pub newsletter: Arc<dyn NewsletterRepository>,
    pub inquiries: Arc<dyn ContactInquiryRepository>,
    pub quote_engine: Arc<dyn QuoteEngine>,
    pub recommender: Arc<QuizRecommender>,
    pub add_ons: Arc<[AddOn]>,
    pub pricing: PricingConfig,
    pub messages: Arc<QuoteMessageRenderer>,
}

/// Store handles the state is built from; lets tests swap in in-memory stores.
pub struct Stores {
    pub packages: Arc<dyn PackageRepository>,
    pub bookings: Arc<dyn BookingRepository>,
    pub reviews: Arc<dyn ReviewRepository>,
    pub newsletter: Arc<dyn NewsletterRepository>,
    pub inquiries: Arc<dyn ContactInquiryRepository>,
}

impl Stores {
    pub fn sql(pool: DbPool) -> Self {
        Self {
            packages: Arc::new(SqlPackageRepository::new(pool.clone())),
            bookings: Arc::new(SqlBookingRepository::new(pool.clone())),
            reviews: Arc::new(SqlReviewRepository::new(pool.clone())),
            newsletter: Arc::new(SqlNewsletterRepository::new(pool.clone())),
            inquiries: Arc::new(SqlContactInquiryRepository::new(pool)),
        }
    }
}

impl AppState {
    pub fn new(stores: Stores, config: &AppConfig) -> Result<Self, tera::Error> {
        Ok(Self {
            packages: stores.packages,
            bookings: stores.bookings,
            reviews: stores.reviews,
            newsletter: stores.newsletter,
            inquiries: stores.inquiries,
            quote_engine: Arc::new(DeterministicQuoteEngine::new(config.pricing.quote_policy())),
            recommender: Arc::new(
                QuizRecommender::default().with_max_results(config.recommendations.max_results),
            ),
            add_ons: standard_add_ons().into(),
            pricing: config.pricing.clone(),
            messages: Arc::new(QuoteMessageRenderer::new()?),
        })
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/v1/packages", get(catalog::list_packages))
        .route("/api/v1/packages/{slug}", get(catalog::get_package))
        .route("/api/v1/packages/{slug}/add-ons", get(catalog::list_add_ons))
        .route(
            "/api/v1/packages/{slug}/reviews",
            get(reviews::list_reviews).post(reviews::create_review),
        )
        .route("/api/v1/quotes", post(quotes::create_quote))
        .route("/api/v1/quote-requests", post(quotes::create_quote_request))
        .route("/api/v1/bookings", post(bookings::create_booking))
        .route("/api/v1/quiz", get(quiz::get_quiz))
        .route("/api/v1/quiz/recommendations", post(quiz::recommend))
        .route("/api/v1/newsletter", post(engagement::subscribe))
        .route("/api/v1/contact", post(engagement::contact))
        .with_state(state)
}

#[derive(Debug, Serialize)]
pub struct ApiError {
    pub error: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
    pub correlation_id: String,
}

pub type ApiResult<T> = Result<T, (StatusCode, Json<ApiError>)>;

pub(crate) fn correlation_id() -> String {
    format!("req-{}", Uuid::new_v4().simple())
}

/// Maps an application failure onto a status code and a user-safe body.
/// Store failures never leak their cause to the caller.
pub(crate) fn api_error(
    error: ApplicationError,
    correlation_id: &str,
) -> (StatusCode, Json<ApiError>) {
    let interface = error.into_interface(correlation_id);
    let (status, detail) = match &interface {
        InterfaceError::BadRequest { message, .. } => {
            warn!(
                event_name = "api.request.rejected",
                correlation_id = %correlation_id,
                reason = %message,
                "request failed validation"
            );
            (StatusCode::BAD_REQUEST, Some(message.clone()))
        }
        InterfaceError::NotFound { message, .. } => (StatusCode::NOT_FOUND, Some(message.clone())),
        InterfaceError::ServiceUnavailable { message, .. } => {
            error!(
                event_name = "api.store.unavailable",
                correlation_id = %correlation_id,
                error = %message,
                "data store call failed"
            );
            (StatusCode::SERVICE_UNAVAILABLE, None)
        }
        InterfaceError::Internal { message, .. } => {
            error!(
                event_name = "api.internal_error",
                correlation_id = %correlation_id,
                error = %message,
                "unexpected internal failure"
            );
            (StatusCode::INTERNAL_SERVER_ERROR, None)
        }
    };

    (
        status,
        Json(ApiError {
            error: interface.user_message(),
            detail,
            correlation_id: interface.correlation_id().to_string(),
        }),
    )
}

/// Active package by slug; inactive packages are hidden from the public API.
pub(crate) async fn active_package(state: &AppState, slug: &str) -> Result<Package, ApplicationError> {
    state
        .packages
        .find_by_slug(slug)
        .await?
        .filter(|package| package.active)
        .ok_or_else(|| ApplicationError::NotFound(format!("package `{slug}`")))
}

#[cfg(test)]
pub(crate) mod test_support {
    use std::sync::Arc;

    use axum::{
        body::{to_bytes, Body},
        http::{Request, StatusCode},
        Router,
    };
    use rust_decimal::Decimal;
    use safari_core::config::AppConfig;
    use safari_core::domain::package::{Package, PackageId};
    use safari_db::repositories::{
        InMemoryBookingRepository, InMemoryContactInquiryRepository, InMemoryNewsletterRepository,
        InMemoryPackageRepository, InMemoryReviewRepository,
    };
    use serde_json::Value;
    use tower::ServiceExt;

    use super::{router, AppState, Stores};

    pub struct Harness {
        pub router: Router,
        pub bookings: Arc<InMemoryBookingRepository>,
        pub reviews: Arc<InMemoryReviewRepository>,
        pub inquiries: Arc<InMemoryContactInquiryRepository>,
    }

    pub fn package(
        slug: &str,
        name: &str,
        location: &str,
        category: &str,
        prices: (i64, i64),
    ) -> Package {
        Package {
            id: PackageId(format!("pkg-{slug}")),
            slug: slug.to_string(),
            name: name.to_string(),
            location: location.to_string(),
            category: Some(category.to_string()),
            description: Some(format!("{name} in {location}")),
            duration: Some("3 Days / 2 Nights".to_string()),
            price_resident: Decimal::from(prices.0),
            price_non_resident: Decimal::from(prices.1),
            rating: Some(Decimal::new(47, 1)),
            highlights: vec!["Daily game drives".to_string(), "Beachfront hotel".to_string()],
            active: true,
        }
    }

    pub fn catalog() -> Vec<Package> {
        let mut retired = package("tsavo", "Tsavo Explorer", "Tsavo East", "Wildlife Safari", (32_000, 350));
        retired.active = false;
        vec![
            package("mara", "Maasai Mara Safari", "Maasai Mara", "Wildlife Safari", (45_000, 450)),
            package("diani", "Diani Beach Escape", "Diani Beach", "Beach", (60_000, 650)),
            package("mara-luxury", "Mara Luxury Camp", "Maasai Mara", "Luxury Safari", (180_000, 1_800)),
            retired,
        ]
    }

    pub fn harness() -> Harness {
        let bookings = Arc::new(InMemoryBookingRepository::default());
        let reviews = Arc::new(InMemoryReviewRepository::default());
        let inquiries = Arc::new(InMemoryContactInquiryRepository::default());
        let stores = Stores {
            packages: Arc::new(InMemoryPackageRepository::with_packages(catalog())),
            bookings: bookings.clone(),
            reviews: reviews.clone(),
            newsletter: Arc::new(InMemoryNewsletterRepository::default()),
            inquiries: inquiries.clone(),
        };
        let state = AppState::new(stores, &AppConfig::default()).expect("state");
        Harness { router: router(state), bookings, reviews, inquiries }
    }

    pub async fn send(router: &Router, request: Request<Body>) -> (StatusCode, Value) {
        let response = router.clone().oneshot(request).await.expect("router responds");
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.expect("read body");
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).expect("json body")
        };
        (status, body)
    }

    pub async fn get(router: &Router, uri: &str) -> (StatusCode, Value) {
        send(router, Request::get(uri).body(Body::empty()).expect("request")).await
    }

    pub async fn post(router: &Router, uri: &str, body: Value) -> (StatusCode, Value) {
        send(
            router,
            Request::post(uri)
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .expect("request"),
        )
        .await
    }
}
