use super::{created, success};
use crate::error::RiffResult;
use crate::server::state::{GuardedSocialManager, ServerState};
use crate::server::JsonBody;
use crate::social::ReviewDraft;
use crate::store::{Review, ReviewLikes};
use axum::{
    extract::{Path, State},
    response::IntoResponse,
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
struct CreateReviewBody {
    pub user_id: String,
    pub album_id: String,
    pub rating: Option<f64>,
    pub text: Option<String>,
    #[serde(default)]
    pub favorite_tracks: Vec<String>,
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
struct LikeBody {
    pub user_id: String,
    pub review_id: String,
}

#[derive(Serialize)]
struct ReviewResponse {
    review: Review,
}

async fn create_review(
    State(social): State<GuardedSocialManager>,
    JsonBody(body): JsonBody<CreateReviewBody>,
) -> RiffResult<impl IntoResponse> {
    let review = social.create_review(ReviewDraft {
        user_id: body.user_id,
        album_id: body.album_id,
        rating: body.rating,
        text: body.text,
        favorite_tracks: body.favorite_tracks,
    })?;
    Ok(created(ReviewResponse { review }))
}

async fn get_review(
    State(social): State<GuardedSocialManager>,
    Path(id): Path<String>,
) -> RiffResult<impl IntoResponse> {
    let review = social.get_review(&id)?;
    Ok(success(ReviewResponse { review }))
}

async fn add_like(
    State(social): State<GuardedSocialManager>,
    JsonBody(body): JsonBody<LikeBody>,
) -> RiffResult<impl IntoResponse> {
    let likes: ReviewLikes = social.add_like(&body.user_id, &body.review_id)?;
    Ok(success(likes))
}

async fn remove_like(
    State(social): State<GuardedSocialManager>,
    JsonBody(body): JsonBody<LikeBody>,
) -> RiffResult<impl IntoResponse> {
    let likes: ReviewLikes = social.remove_like(&body.user_id, &body.review_id)?;
    Ok(success(likes))
}

pub fn make_review_routes(state: ServerState) -> Router {
    Router::new()
        .route("/reviews/create", post(create_review))
        .route("/reviews/{id}", get(get_review))
        .route("/likes/add", post(add_like))
        .route("/likes/remove", post(remove_like))
        .with_state(state)
}
