use axum::{extract::State, Json};
use safari_core::domain::quiz::{QuizAnswer, QuizQuestion};
use safari_core::errors::ApplicationError;
use safari_core::recommend::{Recommendation, RecommendationEngine};
use serde::{Deserialize, Serialize};
use tracing::info;

use super::{api_error, correlation_id, ApiResult, AppState};

#[derive(Debug, Serialize)]
pub struct QuizResponse {
    pub questions: Vec<QuizQuestion>,
}

#[derive(Debug, Deserialize)]
pub struct RecommendationInput {
    #[serde(default)]
    pub answers: Vec<QuizAnswer>,
}

pub async fn get_quiz(State(state): State<AppState>) -> Json<QuizResponse> {
    Json(QuizResponse { questions: state.recommender.quiz().to_vec() })
}

pub async fn recommend(
    State(state): State<AppState>,
    Json(input): Json<RecommendationInput>,
) -> ApiResult<Json<Recommendation>> {
    let correlation_id = correlation_id();
    let catalog = state
        .packages
        .list_active()
        .await
        .map_err(|error| api_error(ApplicationError::from(error), &correlation_id))?;

    let recommendation = state.recommender.recommend(&input.answers, &catalog);
    info!(
        event_name = "quiz.recommendation.served",
        correlation_id = %correlation_id,
        personality = recommendation.personality.title,
        matches = recommendation.matches.len(),
        "quiz recommendation computed"
    );

    Ok(Json(recommendation))
}
