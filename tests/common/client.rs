//! HTTP client for end-to-end tests
//!
//! This module wraps reqwest and provides one method per endpoint.
//! When API routes or request formats change, update only this file.

#![allow(dead_code)]

use super::constants::*;
use reqwest::Response;
use serde_json::{json, Value};
use std::time::Duration;

pub struct TestClient {
    /// The underlying reqwest client (public for custom requests in tests)
    pub client: reqwest::Client,
    /// The base URL of the test server
    pub base_url: String,
}

impl TestClient {
    pub fn new(base_url: String) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .expect("Failed to build reqwest client");

        Self { client, base_url }
    }

    fn url(&self, path: &str) -> String {
        format!("{}/v1{}", self.base_url, path)
    }

    async fn get(&self, path: &str) -> Response {
        self.client
            .get(self.url(path))
            .send()
            .await
            .expect("GET request failed")
    }

    async fn post(&self, path: &str, body: Value) -> Response {
        self.client
            .post(self.url(path))
            .json(&body)
            .send()
            .await
            .expect("POST request failed")
    }

    async fn put(&self, path: &str, body: Value) -> Response {
        self.client
            .put(self.url(path))
            .json(&body)
            .send()
            .await
            .expect("PUT request failed")
    }

    async fn delete(&self, path: &str) -> Response {
        self.client
            .delete(self.url(path))
            .send()
            .await
            .expect("DELETE request failed")
    }

    // ========================================================================
    // Server
    // ========================================================================

    /// GET /
    pub async fn get_home(&self) -> Response {
        self.client
            .get(format!("{}/", self.base_url))
            .send()
            .await
            .expect("Home request failed")
    }

    // ========================================================================
    // Authentication Endpoints
    // ========================================================================

    /// POST /v1/auth/register
    pub async fn register(&self, handle: &str, password: &str) -> Response {
        self.post(
            "/auth/register",
            json!({ "handle": handle, "password": password }),
        )
        .await
    }

    /// POST /v1/auth/login
    pub async fn login(&self, handle: &str, password: &str) -> Response {
        self.post("/auth/login", json!({ "handle": handle, "password": password }))
            .await
    }

    // ========================================================================
    // Users
    // ========================================================================

    /// GET /v1/user/{id}
    pub async fn get_user(&self, user_id: &str) -> Response {
        self.get(&format!("/user/{}", user_id)).await
    }

    /// PUT /v1/user/{id}/profile
    pub async fn update_profile(&self, user_id: &str, body: Value) -> Response {
        self.put(&format!("/user/{}/profile", user_id), body).await
    }

    /// GET /v1/user/{id}/reviews
    pub async fn get_user_reviews(&self, user_id: &str) -> Response {
        self.get(&format!("/user/{}/reviews", user_id)).await
    }

    // ========================================================================
    // Reviews and likes
    // ========================================================================

    /// POST /v1/reviews/create
    pub async fn create_review(&self, user_id: &str, album_id: &str, rating: Option<f64>) -> Response {
        self.create_review_with(json!({
            "userId": user_id,
            "albumId": album_id,
            "rating": rating,
        }))
        .await
    }

    /// POST /v1/reviews/create with a custom body
    pub async fn create_review_with(&self, body: Value) -> Response {
        self.post("/reviews/create", body).await
    }

    /// GET /v1/reviews/{id}
    pub async fn get_review(&self, review_id: &str) -> Response {
        self.get(&format!("/reviews/{}", review_id)).await
    }

    /// POST /v1/likes/add
    pub async fn add_like(&self, user_id: &str, review_id: &str) -> Response {
        self.post(
            "/likes/add",
            json!({ "userId": user_id, "reviewId": review_id }),
        )
        .await
    }

    /// POST /v1/likes/remove
    pub async fn remove_like(&self, user_id: &str, review_id: &str) -> Response {
        self.post(
            "/likes/remove",
            json!({ "userId": user_id, "reviewId": review_id }),
        )
        .await
    }

    // ========================================================================
    // Friends
    // ========================================================================

    /// POST /v1/friends/add
    pub async fn add_friend(&self, user_id: &str, friend_id: &str) -> Response {
        self.post(
            "/friends/add",
            json!({ "userId": user_id, "friendId": friend_id }),
        )
        .await
    }

    /// POST /v1/user/{id}/unfollow
    pub async fn unfollow(&self, user_id: &str, target_id: &str) -> Response {
        self.post(
            &format!("/user/{}/unfollow", user_id),
            json!({ "unfollowId": target_id }),
        )
        .await
    }

    /// GET /v1/user/{id}/friends
    pub async fn get_friends(&self, user_id: &str) -> Response {
        self.get(&format!("/user/{}/friends", user_id)).await
    }

    /// GET /v1/user/{id}/followers
    pub async fn get_followers(&self, user_id: &str) -> Response {
        self.get(&format!("/user/{}/followers", user_id)).await
    }

    /// GET /v1/user/{id}/is-friend/{friend_id}
    pub async fn is_friend(&self, user_id: &str, friend_id: &str) -> Response {
        self.get(&format!("/user/{}/is-friend/{}", user_id, friend_id))
            .await
    }

    /// GET /v1/user/{id}/friends/popular
    pub async fn get_friends_popular(&self, user_id: &str, limit: Option<usize>) -> Response {
        match limit {
            Some(limit) => {
                self.get(&format!("/user/{}/friends/popular?limit={}", user_id, limit))
                    .await
            }
            None => self.get(&format!("/user/{}/friends/popular", user_id)).await,
        }
    }

    /// GET /v1/user/{id}/friends/reviews
    pub async fn get_friends_reviews(&self, user_id: &str) -> Response {
        self.get(&format!("/user/{}/friends/reviews", user_id)).await
    }

    // ========================================================================
    // Favorites, listen list and album likes
    // ========================================================================

    /// POST /v1/favorites/add
    pub async fn add_favorite(&self, user_id: &str, album_id: &str) -> Response {
        self.post(
            "/favorites/add",
            json!({ "userId": user_id, "albumId": album_id }),
        )
        .await
    }

    /// POST /v1/favorites/remove
    pub async fn remove_favorite(&self, user_id: &str, album_id: &str) -> Response {
        self.post(
            "/favorites/remove",
            json!({ "userId": user_id, "albumId": album_id }),
        )
        .await
    }

    /// GET /v1/user/{id}/favorites
    pub async fn get_favorites(&self, user_id: &str) -> Response {
        self.get(&format!("/user/{}/favorites", user_id)).await
    }

    /// POST /v1/listen-list/add
    pub async fn add_to_listen_list(&self, user_id: &str, album_id: &str) -> Response {
        self.post(
            "/listen-list/add",
            json!({ "userId": user_id, "albumId": album_id }),
        )
        .await
    }

    /// POST /v1/listen-list/remove
    pub async fn remove_from_listen_list(&self, user_id: &str, album_id: &str) -> Response {
        self.post(
            "/listen-list/remove",
            json!({ "userId": user_id, "albumId": album_id }),
        )
        .await
    }

    /// GET /v1/user/{id}/listen-list
    pub async fn get_listen_list(&self, user_id: &str) -> Response {
        self.get(&format!("/user/{}/listen-list", user_id)).await
    }

    /// POST /v1/user/{id}/liked-albums/{album_id}
    pub async fn like_album(&self, user_id: &str, album_id: &str) -> Response {
        self.post(
            &format!("/user/{}/liked-albums/{}", user_id, album_id),
            json!({}),
        )
        .await
    }

    /// DELETE /v1/user/{id}/liked-albums/{album_id}
    pub async fn unlike_album(&self, user_id: &str, album_id: &str) -> Response {
        self.delete(&format!("/user/{}/liked-albums/{}", user_id, album_id))
            .await
    }

    /// GET /v1/user/{id}/liked-albums
    pub async fn get_liked_albums(&self, user_id: &str) -> Response {
        self.get(&format!("/user/{}/liked-albums", user_id)).await
    }

    // ========================================================================
    // Catalog
    // ========================================================================

    /// GET /v1/albums with a raw query string
    pub async fn list_albums(&self, query: &str) -> Response {
        self.get(&format!("/albums{}", query)).await
    }

    /// GET /v1/album/{id}
    pub async fn get_album(&self, album_id: &str) -> Response {
        self.get(&format!("/album/{}", album_id)).await
    }

    /// GET /v1/album/{id}/reviews with a raw query string
    pub async fn get_album_reviews(&self, album_id: &str, query: &str) -> Response {
        self.get(&format!("/album/{}/reviews{}", album_id, query))
            .await
    }

    /// GET /v1/album/{id}/similar
    pub async fn get_similar_albums(&self, album_id: &str, limit: usize) -> Response {
        self.get(&format!("/album/{}/similar?limit={}", album_id, limit))
            .await
    }

    /// GET /v1/album/{id}/reviewed-by/{user_id}
    pub async fn get_reviewed_by(&self, album_id: &str, user_id: &str) -> Response {
        self.get(&format!("/album/{}/reviewed-by/{}", album_id, user_id))
            .await
    }

    /// POST /v1/album/{id}/recompute
    pub async fn recompute_album(&self, album_id: &str) -> Response {
        self.post(&format!("/album/{}/recompute", album_id), json!({}))
            .await
    }

    /// GET /v1/artists
    pub async fn list_artists(&self) -> Response {
        self.get("/artists").await
    }

    /// GET /v1/artist/{id}
    pub async fn get_artist(&self, artist_id: &str) -> Response {
        self.get(&format!("/artist/{}", artist_id)).await
    }

    /// GET /v1/artist/{id}/stats
    pub async fn get_artist_stats(&self, artist_id: &str) -> Response {
        self.get(&format!("/artist/{}/stats", artist_id)).await
    }

    // ========================================================================
    // Lists
    // ========================================================================

    /// POST /v1/lists
    pub async fn create_list(&self, user_id: &str, name: &str, is_public: bool) -> Response {
        self.post(
            "/lists",
            json!({ "userId": user_id, "name": name, "isPublic": is_public }),
        )
        .await
    }

    /// GET /v1/lists/public
    pub async fn get_public_lists(&self) -> Response {
        self.get("/lists/public").await
    }

    /// GET /v1/list/{id}
    pub async fn get_list(&self, list_id: &str, viewer_id: Option<&str>) -> Response {
        match viewer_id {
            Some(viewer) => {
                self.get(&format!("/list/{}?viewerId={}", list_id, viewer))
                    .await
            }
            None => self.get(&format!("/list/{}", list_id)).await,
        }
    }

    /// DELETE /v1/list/{id}?userId=
    pub async fn delete_list(&self, list_id: &str, user_id: &str) -> Response {
        self.delete(&format!("/list/{}?userId={}", list_id, user_id))
            .await
    }

    /// POST /v1/list/{id}/albums
    pub async fn add_album_to_list(&self, list_id: &str, user_id: &str, album_id: &str) -> Response {
        self.post(
            &format!("/list/{}/albums", list_id),
            json!({ "userId": user_id, "albumId": album_id }),
        )
        .await
    }

    /// DELETE /v1/list/{id}/albums/{album_id}?userId=
    pub async fn remove_album_from_list(
        &self,
        list_id: &str,
        user_id: &str,
        album_id: &str,
    ) -> Response {
        self.delete(&format!(
            "/list/{}/albums/{}?userId={}",
            list_id, album_id, user_id
        ))
        .await
    }

    /// GET /v1/user/{id}/lists
    pub async fn get_user_lists(&self, user_id: &str, viewer_id: Option<&str>) -> Response {
        match viewer_id {
            Some(viewer) => {
                self.get(&format!("/user/{}/lists?viewerId={}", user_id, viewer))
                    .await
            }
            None => self.get(&format!("/user/{}/lists", user_id)).await,
        }
    }
}
