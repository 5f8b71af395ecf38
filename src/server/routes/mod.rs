//! JSON API under `/v1`. Every body carries `success`; the remaining
//! fields are flattened from a per-endpoint payload.

mod auth_routes;
mod catalog_routes;
mod list_routes;
mod review_routes;
mod user_routes;

use super::state::ServerState;
use axum::{http::StatusCode, Json, Router};
use serde::{Deserialize, Serialize};

#[derive(Serialize, Debug)]
pub struct Success<T: Serialize> {
    pub success: bool,
    #[serde(flatten)]
    pub payload: T,
}

pub fn success<T: Serialize>(payload: T) -> Json<Success<T>> {
    Json(Success {
        success: true,
        payload,
    })
}

pub fn created<T: Serialize>(payload: T) -> (StatusCode, Json<Success<T>>) {
    (StatusCode::CREATED, success(payload))
}

#[derive(Serialize, Debug)]
pub struct Empty {}

#[derive(Deserialize, Debug, Default)]
pub struct LimitQuery {
    pub limit: Option<usize>,
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct UserAlbumBody {
    pub user_id: String,
    pub album_id: String,
}

pub fn make_api_routes(state: ServerState) -> Router {
    Router::new()
        .merge(auth_routes::make_auth_routes(state.clone()))
        .merge(review_routes::make_review_routes(state.clone()))
        .merge(user_routes::make_user_routes(state.clone()))
        .merge(catalog_routes::make_catalog_routes(state.clone()))
        .merge(list_routes::make_list_routes(state))
}
