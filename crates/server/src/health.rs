use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use chrono::{DateTime, Utc};
use safari_db::{ping, DbPool};
use serde::Serialize;
use tracing::warn;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Readiness {
    Ready,
    Degraded,
}

/// Readiness is decided by the store alone; probe errors are logged, not returned.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct HealthResponse {
    pub status: Readiness,
    pub database: Readiness,
    pub checked_at: DateTime<Utc>,
}

pub fn router(db_pool: DbPool) -> Router {
    Router::new().route("/health", get(health)).with_state(db_pool)
}

async fn health(State(pool): State<DbPool>) -> (StatusCode, Json<HealthResponse>) {
    let database = match ping(&pool).await {
        Ok(()) => Readiness::Ready,
        Err(error) => {
            warn!(
                event_name = "system.health.degraded",
                correlation_id = "health",
                error = %error,
                "database health probe failed"
            );
            Readiness::Degraded
        }
    };

    let status_code =
        if database == Readiness::Ready { StatusCode::OK } else { StatusCode::SERVICE_UNAVAILABLE };
    (status_code, Json(HealthResponse { status: database, database, checked_at: Utc::now() }))
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use safari_db::connect_with_settings;

    use super::router;
    use crate::api::test_support::get;

    #[tokio::test]
    async fn reachable_store_reports_ready() {
        let pool = connect_with_settings("sqlite::memory:", 1, 5).await.expect("pool should connect");

        let (status, body) = get(&router(pool.clone()), "/health").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ready");
        assert_eq!(body["database"], "ready");
        assert!(body["checked_at"].is_string());

        pool.close().await;
    }

    #[tokio::test]
    async fn closed_pool_reports_degraded_without_error_detail() {
        let pool = connect_with_settings("sqlite::memory:", 1, 5).await.expect("pool should connect");
        pool.close().await;

        let (status, body) = get(&router(pool), "/health").await;

        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(body["status"], "degraded");
        assert_eq!(body["database"], "degraded");
        assert!(body.get("detail").is_none());
    }
}
