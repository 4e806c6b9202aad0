use axum::{
    extract::{Path, Query, State},
    Json,
};
use safari_core::catalog::{
    classify_highlights, filter_packages, BudgetFilter, FilterState, Highlight, ResidentFilter,
    TripType,
};
use safari_core::domain::add_on::AddOn;
use safari_core::domain::package::Package;
use safari_core::errors::ApplicationError;
use safari_core::quote::available_add_ons;
use serde::{Deserialize, Serialize};
use tracing::info;

use super::{active_package, api_error, correlation_id, ApiResult, AppState};

#[derive(Debug, Default, Deserialize)]
pub struct CatalogQuery {
    pub resident_type: Option<ResidentFilter>,
    pub budget_type: Option<BudgetFilter>,
    pub trip_type: Option<TripType>,
    pub q: Option<String>,
}

impl CatalogQuery {
    fn filter_state(&self) -> FilterState {
        FilterState {
            resident_type: self.resident_type.unwrap_or_default(),
            budget_type: self.budget_type.unwrap_or_default(),
            trip_type: self.trip_type.unwrap_or_default(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct PackageListResponse {
    pub filters: FilterState,
    pub count: usize,
    pub packages: Vec<Package>,
}

#[derive(Debug, Serialize)]
pub struct PackageDetailResponse {
    pub package: Package,
    pub highlights: Vec<Highlight>,
    pub add_ons: Vec<AddOn>,
}

#[derive(Debug, Serialize)]
pub struct AddOnListResponse {
    pub package_slug: String,
    pub add_ons: Vec<AddOn>,
}

pub async fn list_packages(
    State(state): State<AppState>,
    Query(query): Query<CatalogQuery>,
) -> ApiResult<Json<PackageListResponse>> {
    let correlation_id = correlation_id();
    let catalog = state
        .packages
        .list_active()
        .await
        .map_err(|error| api_error(ApplicationError::from(error), &correlation_id))?;

    let filters = query.filter_state();
    let packages = filter_packages(&catalog, &filters, query.q.as_deref())
        .into_iter()
        .cloned()
        .collect::<Vec<_>>();

    Ok(Json(PackageListResponse { filters, count: packages.len(), packages }))
}

pub async fn get_package(
    Path(slug): Path<String>,
    State(state): State<AppState>,
) -> ApiResult<Json<PackageDetailResponse>> {
    let correlation_id = correlation_id();
    let package =
        active_package(&state, &slug).await.map_err(|error| api_error(error, &correlation_id))?;

    let highlights = classify_highlights(&package.highlights);
    let add_ons = available_add_ons(&package, &state.add_ons).into_iter().cloned().collect();

    info!(
        event_name = "catalog.package.viewed",
        correlation_id = %correlation_id,
        package_id = %package.id.0,
        "package detail served"
    );

    Ok(Json(PackageDetailResponse { package, highlights, add_ons }))
}

pub async fn list_add_ons(
    Path(slug): Path<String>,
    State(state): State<AppState>,
) -> ApiResult<Json<AddOnListResponse>> {
    let correlation_id = correlation_id();
    let package =
        active_package(&state, &slug).await.map_err(|error| api_error(error, &correlation_id))?;

    let add_ons = available_add_ons(&package, &state.add_ons).into_iter().cloned().collect();
    Ok(Json(AddOnListResponse { package_slug: package.slug, add_ons }))
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;

    use crate::api::test_support::{get, harness};

    fn slugs(body: &serde_json::Value) -> Vec<String> {
        body["packages"]
            .as_array()
            .expect("packages array")
            .iter()
            .map(|package| package["slug"].as_str().unwrap_or_default().to_string())
            .collect()
    }

    #[tokio::test]
    async fn listing_hides_inactive_packages_and_keeps_catalog_order() {
        let harness = harness();
        let (status, body) = get(&harness.router, "/api/v1/packages").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(slugs(&body), vec!["mara", "diani", "mara-luxury"]);
        assert_eq!(body["count"], 3);
    }

    #[tokio::test]
    async fn listing_applies_filters_and_search() {
        let harness = harness();

        let (_, luxury) = get(&harness.router, "/api/v1/packages?budget_type=luxury").await;
        assert_eq!(slugs(&luxury), vec!["mara-luxury"]);

        let (_, resident_budget) = get(
            &harness.router,
            "/api/v1/packages?resident_type=resident&budget_type=budget",
        )
        .await;
        assert_eq!(slugs(&resident_budget), vec!["mara"]);

        let (_, beach) = get(&harness.router, "/api/v1/packages?trip_type=beach").await;
        assert_eq!(slugs(&beach), vec!["diani"]);

        let (_, search) = get(&harness.router, "/api/v1/packages?q=LUXURY").await;
        assert_eq!(slugs(&search), vec!["mara-luxury"]);
    }

    #[tokio::test]
    async fn unknown_filter_value_is_rejected() {
        let harness = harness();
        let (status, _) = get(&harness.router, "/api/v1/packages?budget_type=cheap").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn detail_includes_classified_highlights_and_location_add_ons() {
        let harness = harness();
        let (status, body) = get(&harness.router, "/api/v1/packages/mara").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["package"]["slug"], "mara");
        assert_eq!(body["highlights"][0]["kind"], "wildlife");
        assert_eq!(body["highlights"][1]["kind"], "beach");

        let add_on_ids = body["add_ons"]
            .as_array()
            .expect("add_ons array")
            .iter()
            .map(|add_on| add_on["id"].as_str().unwrap_or_default().to_string())
            .collect::<Vec<_>>();
        assert!(add_on_ids.contains(&"hot-air-balloon".to_string()));
        assert!(!add_on_ids.contains(&"dhow-cruise".to_string()));
    }

    #[tokio::test]
    async fn unknown_or_inactive_slug_is_not_found() {
        let harness = harness();

        let (status, body) = get(&harness.router, "/api/v1/packages/atlantis").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert!(body["correlation_id"].as_str().unwrap_or_default().starts_with("req-"));

        let (status, _) = get(&harness.router, "/api/v1/packages/tsavo/add-ons").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn add_on_listing_is_scoped_to_location() {
        let harness = harness();
        let (status, body) = get(&harness.router, "/api/v1/packages/diani/add-ons").await;

        assert_eq!(status, StatusCode::OK);
        let ids = body["add_ons"]
            .as_array()
            .expect("add_ons array")
            .iter()
            .map(|add_on| add_on["id"].as_str().unwrap_or_default().to_string())
            .collect::<Vec<_>>();
        assert_eq!(ids, vec!["dhow-cruise", "snorkeling"]);
    }
}
