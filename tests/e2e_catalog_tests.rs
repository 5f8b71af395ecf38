//! End-to-end tests for album and artist browsing

mod common;

use common::*;
use reqwest::StatusCode;
use serde_json::Value;

fn ids(items: &Value) -> Vec<String> {
    items
        .as_array()
        .unwrap()
        .iter()
        .map(|item| item["id"].as_str().unwrap().to_string())
        .collect()
}

#[tokio::test]
async fn test_get_album_with_tracks_and_genres() {
    let server = TestServer::spawn().await;
    let client = TestClient::new(server.base_url.clone());

    let response = client.get_album(ALBUM_1_ID).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["success"], true);
    assert_eq!(body["album"]["artistId"], ARTIST_1_ID);
    assert_eq!(body["album"]["duration"], ALBUM_1_DURATION);
    assert_eq!(body["album"]["genres"].as_array().unwrap().len(), 2);
    assert_eq!(body["album"]["tracks"].as_array().unwrap().len(), 2);

    let response = client.get_album("no-such-album").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_list_albums_by_popularity_and_rating() {
    let server = TestServer::spawn().await;
    let client = TestClient::new(server.base_url.clone());
    let user_id = server.user_id(TEST_USER);

    client.create_review(&user_id, ALBUM_4_ID, Some(2.0)).await;
    client.create_review(&user_id, ALBUM_4_ID, Some(2.0)).await;
    client.create_review(&user_id, ALBUM_2_ID, Some(5.0)).await;

    let body: Value = client.list_albums("").await.json().await.unwrap();
    let popular = ids(&body["albums"]);
    assert_eq!(popular.len(), 6);
    assert_eq!(popular[0], ALBUM_4_ID);
    assert_eq!(popular[1], ALBUM_2_ID);

    let body: Value = client
        .list_albums("?sort=rating&limit=2")
        .await
        .json()
        .await
        .unwrap();
    assert_eq!(ids(&body["albums"]), vec![ALBUM_2_ID, ALBUM_4_ID]);

    let body: Value = client
        .list_albums("?sort=popularity&limit=2&offset=5")
        .await
        .json()
        .await
        .unwrap();
    assert_eq!(body["albums"].as_array().unwrap().len(), 1);

    let response = client.list_albums("?sort=loudest").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_similar_albums_prefer_other_artists() {
    let server = TestServer::spawn().await;
    let client = TestClient::new(server.base_url.clone());
    let user_id = server.user_id(TEST_USER);

    // Album 6 becomes the most popular match.
    client.create_review(&user_id, ALBUM_6_ID, None).await;

    let response = client.get_similar_albums(ALBUM_1_ID, 6).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = response.json().await.unwrap();
    // Other artists first (popularity desc, id asc), then The Test Band.
    assert_eq!(
        ids(&body["albums"]),
        vec![ALBUM_6_ID, ALBUM_5_ID, ALBUM_3_ID, ALBUM_4_ID]
    );

    let body: Value = client
        .get_similar_albums(ALBUM_1_ID, 1)
        .await
        .json()
        .await
        .unwrap();
    assert_eq!(ids(&body["albums"]), vec![ALBUM_6_ID]);

    // Jazz shares nothing with anyone.
    let body: Value = client
        .get_similar_albums(ALBUM_2_ID, 6)
        .await
        .json()
        .await
        .unwrap();
    assert!(body["albums"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_artist_with_albums() {
    let server = TestServer::spawn().await;
    let client = TestClient::new(server.base_url.clone());

    let response = client.get_artist(ARTIST_1_ID).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["artist"]["name"], "The Test Band");
    assert_eq!(body["artist"]["albums"].as_array().unwrap().len(), 3);

    let response = client.get_artist("no-such-artist").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_artists_ranked_by_popularity() {
    let server = TestServer::spawn().await;
    let client = TestClient::new(server.base_url.clone());
    let user_id = server.user_id(TEST_USER);

    client.create_review(&user_id, ALBUM_5_ID, None).await;
    client.create_review(&user_id, ALBUM_6_ID, None).await;
    client.create_review(&user_id, ALBUM_1_ID, None).await;

    let body: Value = client.list_artists().await.json().await.unwrap();
    let artists = body["artists"].as_array().unwrap();
    assert_eq!(artists.len(), 3);
    assert_eq!(artists[0]["id"], ARTIST_3_ID);
    assert_eq!(artists[0]["popularity"], 2);
    assert_eq!(artists[1]["id"], ARTIST_1_ID);
    assert_eq!(artists[2]["popularity"], 0);
}

#[tokio::test]
async fn test_artist_stats() {
    let server = TestServer::spawn().await;
    let client = TestClient::new(server.base_url.clone());
    let user_id = server.user_id(TEST_USER);
    let friend_id = server.user_id(FRIEND_1);

    client.create_review(&user_id, ALBUM_1_ID, Some(4.0)).await;
    client.create_review(&friend_id, ALBUM_3_ID, Some(1.0)).await;
    client.create_review(&friend_id, ALBUM_3_ID, None).await;

    let response = client.get_artist_stats(ARTIST_1_ID).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = response.json().await.unwrap();
    let stats = &body["stats"];
    assert_eq!(stats["albumCount"], 3);
    assert_eq!(stats["reviewCount"], 3);
    assert_eq!(stats["reviewerCount"], 2);
    assert_eq!(stats["totalRatings"], 2);
    assert_eq!(stats["averageRating"].as_f64().unwrap(), 2.5);
    assert_eq!(stats["minutesListened"], ALBUM_1_DURATION + 30 * 2);

    let response = client.get_artist_stats("no-such-artist").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
