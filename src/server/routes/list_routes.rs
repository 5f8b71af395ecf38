use super::{created, success, Empty, LimitQuery, UserAlbumBody};
use crate::error::RiffResult;
use crate::server::state::{GuardedSocialManager, ServerState};
use crate::server::{JsonBody, QueryParams};
use crate::store::UserList;
use axum::{
    extract::{Path, State},
    response::IntoResponse,
    routing::{delete, get, post},
    Router,
};
use serde::{Deserialize, Serialize};

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
struct CreateListBody {
    pub user_id: String,
    pub name: String,
    pub description: Option<String>,
    #[serde(default = "default_is_public")]
    pub is_public: bool,
}

fn default_is_public() -> bool {
    true
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
struct OwnerQuery {
    pub user_id: String,
}

#[derive(Deserialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
struct ViewerQuery {
    pub viewer_id: Option<String>,
}

#[derive(Serialize)]
struct ListResponse {
    list: UserList,
}

#[derive(Serialize)]
struct ListsResponse {
    lists: Vec<UserList>,
}

async fn create_list(
    State(social): State<GuardedSocialManager>,
    JsonBody(body): JsonBody<CreateListBody>,
) -> RiffResult<impl IntoResponse> {
    let list = social.create_list(&body.user_id, &body.name, body.description, body.is_public)?;
    Ok(created(ListResponse { list }))
}

async fn get_public_lists(
    State(social): State<GuardedSocialManager>,
    QueryParams(query): QueryParams<LimitQuery>,
) -> RiffResult<impl IntoResponse> {
    let lists = social.public_lists(query.limit)?;
    Ok(success(ListsResponse { lists }))
}

async fn get_list(
    State(social): State<GuardedSocialManager>,
    Path(id): Path<String>,
    QueryParams(query): QueryParams<ViewerQuery>,
) -> RiffResult<impl IntoResponse> {
    let list = social.list(&id, query.viewer_id.as_deref())?;
    Ok(success(ListResponse { list }))
}

async fn delete_list(
    State(social): State<GuardedSocialManager>,
    Path(id): Path<String>,
    QueryParams(query): QueryParams<OwnerQuery>,
) -> RiffResult<impl IntoResponse> {
    social.delete_list(&id, &query.user_id)?;
    Ok(success(Empty {}))
}

async fn add_album_to_list(
    State(social): State<GuardedSocialManager>,
    Path(id): Path<String>,
    JsonBody(body): JsonBody<UserAlbumBody>,
) -> RiffResult<impl IntoResponse> {
    let list = social.add_album_to_list(&id, &body.user_id, &body.album_id)?;
    Ok(success(ListResponse { list }))
}

async fn remove_album_from_list(
    State(social): State<GuardedSocialManager>,
    Path((id, album_id)): Path<(String, String)>,
    QueryParams(query): QueryParams<OwnerQuery>,
) -> RiffResult<impl IntoResponse> {
    let list = social.remove_album_from_list(&id, &query.user_id, &album_id)?;
    Ok(success(ListResponse { list }))
}

async fn get_user_lists(
    State(social): State<GuardedSocialManager>,
    Path(user_id): Path<String>,
    QueryParams(query): QueryParams<ViewerQuery>,
) -> RiffResult<impl IntoResponse> {
    let lists = social.user_lists(&user_id, query.viewer_id.as_deref())?;
    Ok(success(ListsResponse { lists }))
}

pub fn make_list_routes(state: ServerState) -> Router {
    Router::new()
        .route("/lists", post(create_list))
        .route("/lists/public", get(get_public_lists))
        .route("/list/{id}", get(get_list).delete(delete_list))
        .route("/list/{id}/albums", post(add_album_to_list))
        .route("/list/{id}/albums/{album_id}", delete(remove_album_from_list))
        .route("/user/{user_id}/lists", get(get_user_lists))
        .with_state(state)
}
