use axum::{extract::State, Json};
use serde::Serialize;

use crate::errors::AppError;
use crate::reviews::AppReview;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct ReviewsResponse {
    pub reviews: Vec<AppReview>,
}

/// GET /api/v1/reviews
pub async fn handle_get_reviews(
    State(state): State<AppState>,
) -> Result<Json<ReviewsResponse>, AppError> {
    let reviews = state.reviews.get().await?;
    Ok(Json(ReviewsResponse {
        reviews: reviews.as_ref().clone(),
    }))
}
