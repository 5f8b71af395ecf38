use super::{success, LimitQuery, UserAlbumBody};
use crate::error::RiffResult;
use crate::server::state::{GuardedSocialManager, GuardedUserManager, ServerState};
use crate::server::{JsonBody, QueryParams};
use crate::store::{Album, ProfileUpdate, Review, User, UserSummary};
use crate::user::UserProfile;
use axum::{
    extract::{Path, State},
    response::IntoResponse,
    routing::{get, post, put},
    Router,
};
use serde::{Deserialize, Serialize};

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
struct FriendBody {
    pub user_id: String,
    pub friend_id: String,
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
struct UnfollowBody {
    pub unfollow_id: String,
}

#[derive(Serialize)]
struct ProfileResponse {
    user: UserProfile,
}

#[derive(Serialize)]
struct UserResponse {
    user: User,
}

#[derive(Serialize)]
struct FriendsResponse {
    friends: Vec<UserSummary>,
}

#[derive(Serialize)]
struct FollowersResponse {
    followers: Vec<UserSummary>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct IsFriendResponse {
    is_friend: bool,
}

#[derive(Serialize)]
struct AlbumsResponse {
    albums: Vec<Album>,
}

#[derive(Serialize)]
struct ReviewsResponse {
    reviews: Vec<Review>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct FavoritesResponse {
    favorite_albums: Vec<Album>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ListenListResponse {
    listen_list: Vec<Album>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct LikedAlbumsResponse {
    liked_albums: Vec<Album>,
}

async fn get_user(
    State(user_manager): State<GuardedUserManager>,
    Path(user_id): Path<String>,
) -> RiffResult<impl IntoResponse> {
    let user = user_manager.user_profile(&user_id)?;
    Ok(success(ProfileResponse { user }))
}

async fn update_profile(
    State(user_manager): State<GuardedUserManager>,
    Path(user_id): Path<String>,
    JsonBody(update): JsonBody<ProfileUpdate>,
) -> RiffResult<impl IntoResponse> {
    let user = user_manager.update_profile(&user_id, &update)?;
    Ok(success(UserResponse { user }))
}

async fn get_user_reviews(
    State(social): State<GuardedSocialManager>,
    Path(user_id): Path<String>,
    QueryParams(query): QueryParams<LimitQuery>,
) -> RiffResult<impl IntoResponse> {
    let reviews = social.user_reviews(&user_id, query.limit)?;
    Ok(success(ReviewsResponse { reviews }))
}

async fn add_friend(
    State(social): State<GuardedSocialManager>,
    JsonBody(body): JsonBody<FriendBody>,
) -> RiffResult<impl IntoResponse> {
    let friends = social.add_friend(&body.user_id, &body.friend_id)?;
    Ok(success(FriendsResponse { friends }))
}

async fn unfollow(
    State(social): State<GuardedSocialManager>,
    Path(user_id): Path<String>,
    JsonBody(body): JsonBody<UnfollowBody>,
) -> RiffResult<impl IntoResponse> {
    let friends = social.unfollow(&user_id, &body.unfollow_id)?;
    Ok(success(FriendsResponse { friends }))
}

async fn get_friends(
    State(social): State<GuardedSocialManager>,
    Path(user_id): Path<String>,
) -> RiffResult<impl IntoResponse> {
    let friends = social.friends(&user_id)?;
    Ok(success(FriendsResponse { friends }))
}

async fn get_followers(
    State(social): State<GuardedSocialManager>,
    Path(user_id): Path<String>,
) -> RiffResult<impl IntoResponse> {
    let followers = social.followers(&user_id)?;
    Ok(success(FollowersResponse { followers }))
}

async fn get_friends_popular(
    State(social): State<GuardedSocialManager>,
    Path(user_id): Path<String>,
    QueryParams(query): QueryParams<LimitQuery>,
) -> RiffResult<impl IntoResponse> {
    let albums = social.friends_popular_albums(&user_id, query.limit)?;
    Ok(success(AlbumsResponse { albums }))
}

async fn get_friends_reviews(
    State(social): State<GuardedSocialManager>,
    Path(user_id): Path<String>,
    QueryParams(query): QueryParams<LimitQuery>,
) -> RiffResult<impl IntoResponse> {
    let reviews = social.friends_recent_reviews(&user_id, query.limit)?;
    Ok(success(ReviewsResponse { reviews }))
}

async fn get_is_friend(
    State(social): State<GuardedSocialManager>,
    Path((user_id, friend_id)): Path<(String, String)>,
) -> RiffResult<impl IntoResponse> {
    let is_friend = social.is_friend(&user_id, &friend_id)?;
    Ok(success(IsFriendResponse { is_friend }))
}

async fn add_favorite(
    State(social): State<GuardedSocialManager>,
    JsonBody(body): JsonBody<UserAlbumBody>,
) -> RiffResult<impl IntoResponse> {
    let favorite_albums = social.add_favorite_album(&body.user_id, &body.album_id)?;
    Ok(success(FavoritesResponse { favorite_albums }))
}

async fn remove_favorite(
    State(social): State<GuardedSocialManager>,
    JsonBody(body): JsonBody<UserAlbumBody>,
) -> RiffResult<impl IntoResponse> {
    let favorite_albums = social.remove_favorite_album(&body.user_id, &body.album_id)?;
    Ok(success(FavoritesResponse { favorite_albums }))
}

async fn get_favorites(
    State(social): State<GuardedSocialManager>,
    Path(user_id): Path<String>,
) -> RiffResult<impl IntoResponse> {
    let favorite_albums = social.favorite_albums(&user_id)?;
    Ok(success(FavoritesResponse { favorite_albums }))
}

async fn add_to_listen_list(
    State(social): State<GuardedSocialManager>,
    JsonBody(body): JsonBody<UserAlbumBody>,
) -> RiffResult<impl IntoResponse> {
    let listen_list = social.add_to_listen_list(&body.user_id, &body.album_id)?;
    Ok(success(ListenListResponse { listen_list }))
}

async fn remove_from_listen_list(
    State(social): State<GuardedSocialManager>,
    JsonBody(body): JsonBody<UserAlbumBody>,
) -> RiffResult<impl IntoResponse> {
    let listen_list = social.remove_from_listen_list(&body.user_id, &body.album_id)?;
    Ok(success(ListenListResponse { listen_list }))
}

async fn get_listen_list(
    State(social): State<GuardedSocialManager>,
    Path(user_id): Path<String>,
) -> RiffResult<impl IntoResponse> {
    let listen_list = social.listen_list(&user_id)?;
    Ok(success(ListenListResponse { listen_list }))
}

async fn like_album(
    State(social): State<GuardedSocialManager>,
    Path((user_id, album_id)): Path<(String, String)>,
) -> RiffResult<impl IntoResponse> {
    social.set_album_liked(&user_id, &album_id, true)?;
    let liked_albums = social.liked_albums(&user_id)?;
    Ok(success(LikedAlbumsResponse { liked_albums }))
}

async fn unlike_album(
    State(social): State<GuardedSocialManager>,
    Path((user_id, album_id)): Path<(String, String)>,
) -> RiffResult<impl IntoResponse> {
    social.set_album_liked(&user_id, &album_id, false)?;
    let liked_albums = social.liked_albums(&user_id)?;
    Ok(success(LikedAlbumsResponse { liked_albums }))
}

async fn get_liked_albums(
    State(social): State<GuardedSocialManager>,
    Path(user_id): Path<String>,
) -> RiffResult<impl IntoResponse> {
    let liked_albums = social.liked_albums(&user_id)?;
    Ok(success(LikedAlbumsResponse { liked_albums }))
}

pub fn make_user_routes(state: ServerState) -> Router {
    Router::new()
        .route("/user/{user_id}", get(get_user))
        .route("/user/{user_id}/profile", put(update_profile))
        .route("/user/{user_id}/reviews", get(get_user_reviews))
        .route("/friends/add", post(add_friend))
        .route("/user/{user_id}/unfollow", post(unfollow))
        .route("/user/{user_id}/friends", get(get_friends))
        .route("/user/{user_id}/followers", get(get_followers))
        .route("/user/{user_id}/friends/popular", get(get_friends_popular))
        .route("/user/{user_id}/friends/reviews", get(get_friends_reviews))
        .route("/user/{user_id}/is-friend/{friend_id}", get(get_is_friend))
        .route("/favorites/add", post(add_favorite))
        .route("/favorites/remove", post(remove_favorite))
        .route("/user/{user_id}/favorites", get(get_favorites))
        .route("/listen-list/add", post(add_to_listen_list))
        .route("/listen-list/remove", post(remove_from_listen_list))
        .route("/user/{user_id}/listen-list", get(get_listen_list))
        .route(
            "/user/{user_id}/liked-albums/{album_id}",
            post(like_album).delete(unlike_album),
        )
        .route("/user/{user_id}/liked-albums", get(get_liked_albums))
        .with_state(state)
}
