//! Routes API client against the in-process mock backend.

mod common;

use common::{dead_address, quest_json, start_mock_backend};
use quest_tour::api::{self, ApiError, RoutesClient};
use quest_tour::config::{ApiConfig, AuthMode};
use quest_tour::model::{PointId, QuestId};
use quest_tour::route::RouteEditor;
use serde_json::json;

fn walk() -> serde_json::Value {
    quest_json(7, "Embankment", &[(2, 11, 56.14, 47.25), (1, 10, 56.13, 47.24), (3, 12, 56.15, 47.26)])
}

#[tokio::test]
async fn test_list_paginated_with_query_token() {
    let mock = start_mock_backend(vec![walk()], true).await;
    let client = RoutesClient::from_config(&mock.api_config("secret", AuthMode::Query)).unwrap();

    let quests = client.list_quests().await.unwrap();
    assert_eq!(quests.len(), 1);
    assert_eq!(quests[0].id, QuestId::from(7u64));

    let requests = mock.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].query.get("api_token").map(String::as_str), Some("secret"));
    assert!(requests[0].query.contains_key("v"), "list requests carry a cache-busting version");
    assert!(requests[0].authorization.is_none());
}

#[tokio::test]
async fn test_list_bare_array_skips_invalid_entries() {
    let broken = json!({ "id": 8, "name": "Broken", "points": [
        { "order": 1, "point": { "id": 1, "name": "x", "latitude": 123.0, "longitude": 0.0 } }
    ]});
    let mock = start_mock_backend(vec![walk(), broken], false).await;
    let client = RoutesClient::from_config(&mock.api_config("", AuthMode::Query)).unwrap();

    let quests = client.list_quests().await.unwrap();
    assert_eq!(quests.len(), 1);
    assert_eq!(quests[0].name, "Embankment");
    assert!(mock.requests()[0].query.get("api_token").is_none());
}

#[tokio::test]
async fn test_detail_is_normalized_by_order() {
    let mock = start_mock_backend(vec![walk()], true).await;
    let client = RoutesClient::from_config(&mock.api_config("secret", AuthMode::Bearer)).unwrap();

    let quest = client.get_quest(&QuestId::from(7u64)).await.unwrap();
    let ids: Vec<_> = quest.points.iter().map(|rp| rp.point.id.to_string()).collect();
    assert_eq!(ids, vec!["10", "11", "12"]);
    let orders: Vec<_> = quest.points.iter().map(|rp| rp.order).collect();
    assert_eq!(orders, vec![1, 2, 3]);

    let requests = mock.requests();
    assert_eq!(requests[0].authorization.as_deref(), Some("Bearer secret"));
    assert!(requests[0].query.get("api_token").is_none());
}

#[tokio::test]
async fn test_missing_quest_is_not_found() {
    let mock = start_mock_backend(vec![walk()], true).await;
    let client = RoutesClient::from_config(&mock.api_config("", AuthMode::Query)).unwrap();

    let err = client.get_quest(&QuestId::from(99u64)).await.unwrap_err();
    assert!(matches!(err, ApiError::NotFound(_)), "got {err:?}");
}

#[tokio::test]
async fn test_update_puts_full_quest_with_token() {
    let mock = start_mock_backend(vec![walk()], true).await;
    let client = RoutesClient::from_config(&mock.api_config("secret", AuthMode::Query)).unwrap();

    let mut quest = client.get_quest(&QuestId::from(7u64)).await.unwrap();
    quest.points.reverse();
    client.update_quest(&quest).await.unwrap();

    let put = mock.requests().into_iter().find(|r| r.method == "PUT").unwrap();
    assert_eq!(put.id.as_deref(), Some("7"));
    let body = put.body.unwrap();
    assert_eq!(body["api_token"], "secret");
    assert_eq!(body["points"][0]["point"]["id"], 12);
    assert_eq!(body["points"].as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn test_update_failure_reports_status() {
    let mock = start_mock_backend(vec![walk()], true).await;
    mock.fail_updates(Some(503));
    let client = RoutesClient::from_config(&mock.api_config("", AuthMode::Query)).unwrap();

    let quest = client.get_quest(&QuestId::from(7u64)).await.unwrap();
    match client.update_quest(&quest).await {
        Err(ApiError::Status { status, .. }) => assert_eq!(status, 503),
        other => panic!("expected status error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_unreachable_backend_falls_back_to_samples() {
    let config = ApiConfig {
        base_url: format!("http://{}", dead_address().await),
        timeout_secs: 2,
        ..ApiConfig::default()
    };
    let client = RoutesClient::from_config(&config).unwrap();

    assert!(api::load_catalog(&client, false).await.is_err());

    let quests = api::load_catalog(&client, true).await.unwrap();
    assert!(!quests.is_empty());

    let sample = api::load_quest(&client, &quests[0].id, true).await.unwrap();
    assert_eq!(sample.id, quests[0].id);
    assert!(sample.find_point(&sample.points[0].point.id).is_some());
    assert!(matches!(
        api::load_quest(&client, &QuestId::from(1u64), true).await,
        Err(ApiError::NotFound(_))
    ));
}

#[tokio::test]
async fn test_media_paths_resolve_against_base() {
    let mock = start_mock_backend(vec![walk()], true).await;
    let config = mock.api_config("", AuthMode::Query);
    let client = RoutesClient::from_config(&config).unwrap();

    let quest = client.get_quest(&QuestId::from(7u64)).await.unwrap();
    let point = &quest.find_point(&PointId::from(10u64)).unwrap().point;
    assert_eq!(
        point.photo_url(config.media_base()).as_deref(),
        Some(format!("{}/media/points/10.jpg", mock.base_url()).as_str())
    );
    assert_eq!(
        quest.cover_image(config.media_base(), "/forest.jpg"),
        format!("{}/media/points/10.jpg", mock.base_url())
    );
}

#[tokio::test]
async fn test_save_keeps_fields_the_client_does_not_model() {
    let mut backend = walk();
    backend["coordinates"] = json!([[56.13, 47.24], [56.15, 47.26]]);
    backend["duration_min"] = json!(45);
    backend["points"][0]["id"] = json!(501);
    backend["points"][0]["point"]["address"] = json!("Main st");
    let mock = start_mock_backend(vec![backend], true).await;
    let client = RoutesClient::from_config(&mock.api_config("", AuthMode::Query)).unwrap();

    let quest = client.get_quest(&QuestId::from(7u64)).await.unwrap();
    let mut editor = RouteEditor::new(quest).unwrap();
    editor.move_to(1, 0).unwrap();
    editor.save(&client).await.unwrap();

    let put = mock.requests().into_iter().find(|r| r.method == "PUT").unwrap();
    let body = put.body.unwrap();
    assert_eq!(body["coordinates"], json!([[56.13, 47.24], [56.15, 47.26]]));
    assert_eq!(body["duration_min"], 45);
    assert!(body.as_object().unwrap().contains_key("image_url"));
    assert!(body["image_url"].is_null());

    // Point 11 (route-point 501) was dragged to the front.
    let moved = &body["points"][0];
    assert_eq!(moved["point"]["id"], 11);
    assert_eq!(moved["id"], 501);
    assert_eq!(moved["order"], 1);
    assert_eq!(moved["point"]["address"], "Main st");
    let untouched = body["points"][1]["point"].as_object().unwrap();
    assert!(untouched["audio_file"].is_null());
    assert!(untouched["video"].is_null());
}
