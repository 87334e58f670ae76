//! Integration tests for API endpoints.
//!
//! These tests run against the bundled dataset. Semantic recommendations use
//! a small deterministic embedder instead of a real model, which would need
//! a download and be too slow.

use std::collections::HashSet;
use std::sync::Arc;

use axum::http::StatusCode;
use axum_test::TestServer;
use serde_json::{json, Value};
use song_explorer::catalog::Catalog;
use song_explorer::config::AppConfig;
use song_explorer::inference::{InferenceError, SemanticIndex, TextEmbedder};
use song_explorer::server::{create_router, AppState};

const DIM: usize = 32;

/// Letter-frequency embedder: texts with similar spelling point the same way
struct LetterEmbedder;

impl TextEmbedder for LetterEmbedder {
    fn name(&self) -> &str {
        "letters"
    }

    fn embed(&self, text: &str) -> Result<Vec<f32>, InferenceError> {
        let mut vector = vec![0.0f32; DIM];
        for c in text.to_lowercase().chars().filter(char::is_ascii_alphabetic) {
            vector[(c as usize - 'a' as usize) % DIM] += 1.0;
        }
        Ok(vector)
    }
}

/// Create a test server with default configuration (no embeddings)
fn create_test_server() -> TestServer {
    create_server_with(AppConfig::default(), false)
}

fn create_server_with(config: AppConfig, semantic: bool) -> TestServer {
    let catalog = Catalog::bundled().unwrap();
    let state = if semantic {
        let index = SemanticIndex::build(Arc::new(LetterEmbedder), &catalog).unwrap();
        AppState::new(config, catalog).with_semantic(index)
    } else {
        AppState::new(config, catalog)
    };
    TestServer::new(create_router(state)).unwrap()
}

fn ids(songs: &Value) -> Vec<u64> {
    songs
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["id"].as_u64().unwrap())
        .collect()
}

#[tokio::test]
async fn test_health_degraded_without_embeddings() {
    let server = create_test_server();

    let response = server.get("/api/health").await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["status"], "degraded");
    assert_eq!(body["songCount"], 30);
    assert_eq!(body["embeddingsReady"], false);
}

#[tokio::test]
async fn test_health_healthy_when_embeddings_disabled() {
    let mut config = AppConfig::default();
    config.embedding.enabled = false;
    let server = create_server_with(config, false);

    let body: Value = server.get("/api/health").await.json();
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
async fn test_health_healthy_with_embeddings() {
    let server = create_server_with(AppConfig::default(), true);

    let body: Value = server.get("/api/health").await.json();
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["embeddingsReady"], true);
    assert_eq!(body["embeddingModel"], "letters");
}

#[tokio::test]
async fn test_list_songs() {
    let server = create_test_server();

    let response = server.get("/api/songs").await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["success"], true);
    let songs = ids(&body["songs"]);
    assert_eq!(songs.len(), 30);
    assert_eq!(songs[0], 1);
    assert_eq!(body["songs"][0]["title"], "Tum Hi Ho");
}

#[tokio::test]
async fn test_random_song_is_from_catalog() {
    let server = create_test_server();
    let catalog: HashSet<u64> = (1..=30).collect();

    for _ in 0..20 {
        let response = server.get("/api/random").await;
        response.assert_status_ok();
        let body: Value = response.json();
        assert_eq!(body["success"], true);
        assert!(catalog.contains(&body["song"]["id"].as_u64().unwrap()));
    }
}

#[tokio::test]
async fn test_recommend_metadata_only() {
    let server = create_test_server();

    let response = server
        .post("/api/recommend")
        .json(&json!({ "query": "songs like Tum Hi Ho" }))
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["success"], true);
    assert_eq!(body["targetSong"]["title"], "Tum Hi Ho");
    assert_eq!(body["targetSong"]["artist"], "Arijit Singh");

    let recs = &body["recommendations"];
    let rec_ids = ids(recs);
    assert_eq!(rec_ids.len(), 5);
    assert!(!rec_ids.contains(&1));
    for rec in recs.as_array().unwrap() {
        assert!(rec["reason"].is_string());
        assert!(rec["genre"].is_string());
    }
    assert!(body.get("suggestions").is_none());
}

#[tokio::test]
async fn test_recommend_with_title_hint() {
    let server = create_test_server();

    let body: Value = server
        .post("/api/recommend")
        .json(&json!({ "query": "anything good?", "songTitle": "Perfect" }))
        .await
        .json();

    assert_eq!(body["success"], true);
    assert_eq!(body["targetSong"]["title"], "Perfect");
}

#[tokio::test]
async fn test_recommend_with_embeddings() {
    let server = create_server_with(AppConfig::default(), true);

    let body: Value = server
        .post("/api/recommend")
        .json(&json!({ "query": "similar to Channa Mereya" }))
        .await
        .json();

    assert_eq!(body["success"], true);
    assert_eq!(body["targetSong"]["title"], "Channa Mereya");

    let rec_ids = ids(&body["recommendations"]);
    assert!(!rec_ids.is_empty() && rec_ids.len() <= 5);
    let unique: HashSet<_> = rec_ids.iter().collect();
    assert_eq!(unique.len(), rec_ids.len());
    assert!(!rec_ids.contains(&2));
}

#[tokio::test]
async fn test_recommend_unknown_song_offers_suggestions() {
    let server = create_test_server();

    let response = server
        .post("/api/recommend")
        .json(&json!({ "query": "songs like qqqqzzzzxxxx" }))
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["success"], false);
    assert_eq!(
        body["message"],
        "I couldn't find that song! Try being more specific or check the spelling."
    );
    let suggestions = body["suggestions"].as_array().unwrap();
    assert_eq!(suggestions.len(), 5);
    assert_eq!(suggestions[0], "Tum Hi Ho by Arijit Singh");
    assert!(body.get("recommendations").is_none());
}

#[tokio::test]
async fn test_recommend_without_query_is_not_found() {
    let server = create_test_server();

    let body: Value = server.post("/api/recommend").json(&json!({})).await.json();

    assert_eq!(body["success"], false);
    assert!(body["suggestions"].is_array());
}

#[tokio::test]
async fn test_search_language_and_mood_filters() {
    let server = create_test_server();

    let response = server
        .post("/api/search")
        .json(&json!({ "query": "romantic hindi songs" }))
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["success"], true);
    assert_eq!(body["languageFilter"], "Hindi");
    assert_eq!(body["moodFilter"], "romantic");

    let results = body["results"].as_array().unwrap();
    assert_eq!(ids(&body["results"]), vec![1, 2, 3, 4, 9, 26]);
    for song in results {
        assert_eq!(song["language"], "Hindi");
    }
}

#[tokio::test]
async fn test_search_fuzzy_terms() {
    let server = create_test_server();

    let body: Value = server
        .post("/api/search")
        .json(&json!({ "query": "Ed Sheeran" }))
        .await
        .json();

    assert_eq!(body["success"], true);
    assert!(body.get("languageFilter").is_none());
    let found: HashSet<u64> = ids(&body["results"]).into_iter().collect();
    for id in [17, 18, 23] {
        assert!(found.contains(&id), "missing song {id}");
    }
}

#[tokio::test]
async fn test_search_requires_query() {
    let server = create_test_server();

    let response = server.post("/api/search").json(&json!({})).await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["success"], false);
    assert_eq!(body["code"], "BAD_REQUEST");
}

#[tokio::test]
async fn test_search_empty_query_lists_dataset_head() {
    let server = create_test_server();

    let response = server.post("/api/search").json(&json!({ "query": "" })).await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["success"], true);
    assert_eq!(ids(&body["results"]), (1..=10).collect::<Vec<u64>>());
}

#[tokio::test]
async fn test_malformed_json_gets_failure_envelope() {
    let server = create_test_server();

    let response = server
        .post("/api/recommend")
        .text("{not json")
        .content_type("application/json")
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["success"], false);
    assert_eq!(body["code"], "DESERIALIZATION_ERROR");
}

#[tokio::test]
async fn test_unknown_route() {
    let server = create_test_server();

    let response = server.get("/api/nope").await;

    response.assert_status_not_found();
}
