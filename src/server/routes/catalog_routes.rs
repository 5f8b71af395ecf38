use super::{success, LimitQuery};
use crate::catalog::ArtistWithAlbums;
use crate::error::RiffResult;
use crate::server::state::{GuardedCatalogManager, GuardedSocialManager, ServerState};
use crate::server::QueryParams;
use crate::store::{
    Album, AlbumAggregate, AlbumSort, ArtistStats, RankedArtist, Review, ReviewSort,
};
use axum::{
    extract::{Path, State},
    response::IntoResponse,
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};

#[derive(Deserialize, Debug, Default)]
struct AlbumsQuery {
    pub sort: Option<AlbumSort>,
    pub limit: Option<usize>,
    pub offset: Option<usize>,
}

#[derive(Deserialize, Debug, Default)]
struct AlbumReviewsQuery {
    pub sort: Option<ReviewSort>,
    pub limit: Option<usize>,
}

#[derive(Serialize)]
struct AlbumsResponse {
    albums: Vec<Album>,
}

#[derive(Serialize)]
struct AlbumResponse {
    album: Album,
}

#[derive(Serialize)]
struct ReviewsResponse {
    reviews: Vec<Review>,
}

#[derive(Serialize)]
struct ReviewedByResponse {
    reviewed: bool,
    review: Option<Review>,
}

#[derive(Serialize)]
struct AggregateResponse {
    aggregate: AlbumAggregate,
}

#[derive(Serialize)]
struct ArtistsResponse {
    artists: Vec<RankedArtist>,
}

#[derive(Serialize)]
struct ArtistResponse {
    artist: ArtistWithAlbums,
}

#[derive(Serialize)]
struct StatsResponse {
    stats: ArtistStats,
}

async fn list_albums(
    State(catalog): State<GuardedCatalogManager>,
    QueryParams(query): QueryParams<AlbumsQuery>,
) -> RiffResult<impl IntoResponse> {
    let albums =
        catalog.list_albums(query.sort.unwrap_or_default(), query.limit, query.offset)?;
    Ok(success(AlbumsResponse { albums }))
}

async fn get_album(
    State(catalog): State<GuardedCatalogManager>,
    Path(id): Path<String>,
) -> RiffResult<impl IntoResponse> {
    let album = catalog.album(&id)?;
    Ok(success(AlbumResponse { album }))
}

async fn get_album_reviews(
    State(social): State<GuardedSocialManager>,
    Path(id): Path<String>,
    QueryParams(query): QueryParams<AlbumReviewsQuery>,
) -> RiffResult<impl IntoResponse> {
    let reviews = social.album_reviews(&id, query.sort.unwrap_or_default(), query.limit)?;
    Ok(success(ReviewsResponse { reviews }))
}

async fn get_similar_albums(
    State(social): State<GuardedSocialManager>,
    Path(id): Path<String>,
    QueryParams(query): QueryParams<LimitQuery>,
) -> RiffResult<impl IntoResponse> {
    let albums = social.similar_albums(&id, query.limit)?;
    Ok(success(AlbumsResponse { albums }))
}

async fn get_reviewed_by(
    State(social): State<GuardedSocialManager>,
    Path((id, user_id)): Path<(String, String)>,
) -> RiffResult<impl IntoResponse> {
    let review = social.latest_user_review(&user_id, &id)?;
    Ok(success(ReviewedByResponse {
        reviewed: review.is_some(),
        review,
    }))
}

async fn recompute_album(
    State(social): State<GuardedSocialManager>,
    Path(id): Path<String>,
) -> RiffResult<impl IntoResponse> {
    let aggregate = social.recompute_album_aggregates(&id)?;
    Ok(success(AggregateResponse { aggregate }))
}

async fn list_artists(
    State(catalog): State<GuardedCatalogManager>,
    QueryParams(query): QueryParams<LimitQuery>,
) -> RiffResult<impl IntoResponse> {
    let artists = catalog.list_artists(query.limit)?;
    Ok(success(ArtistsResponse { artists }))
}

async fn get_artist(
    State(catalog): State<GuardedCatalogManager>,
    Path(id): Path<String>,
) -> RiffResult<impl IntoResponse> {
    let artist = catalog.artist(&id)?;
    Ok(success(ArtistResponse { artist }))
}

async fn get_artist_stats(
    State(catalog): State<GuardedCatalogManager>,
    Path(id): Path<String>,
) -> RiffResult<impl IntoResponse> {
    let stats = catalog.artist_stats(&id)?;
    Ok(success(StatsResponse { stats }))
}

pub fn make_catalog_routes(state: ServerState) -> Router {
    Router::new()
        .route("/albums", get(list_albums))
        .route("/album/{id}", get(get_album))
        .route("/album/{id}/reviews", get(get_album_reviews))
        .route("/album/{id}/similar", get(get_similar_albums))
        .route("/album/{id}/reviewed-by/{user_id}", get(get_reviewed_by))
        .route("/album/{id}/recompute", post(recompute_album))
        .route("/artists", get(list_artists))
        .route("/artist/{id}", get(get_artist))
        .route("/artist/{id}/stats", get(get_artist_stats))
        .with_state(state)
}
