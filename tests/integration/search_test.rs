use crate::{
    mock_backend::{ok, variation_number, MockBackend},
    service_for,
};
use axum::http::StatusCode;
use serde_json::json;
use storyweave::{ApiError, PreferenceSet};

fn preferences(count: u32) -> PreferenceSet {
    PreferenceSet {
        genre: Some("mystery".to_string()),
        tone: Some("dark".to_string()),
        length: Some("long".to_string()),
        theme: Some("Betrayal".to_string()),
        themes: None,
        creativity: Some(6),
        count: Some(count),
    }
}

#[tokio::test]
async fn test_search_fans_out_and_tolerates_one_failure() {
    let backend = MockBackend::spawn(|payload| match variation_number(payload) {
        None => ok(json!({"stories": [
            {"title": "First", "content": "one"},
            {"title": "Second", "content": "two"}
        ]})),
        Some(2) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            json!({"error": "upstream down"}).to_string(),
        ),
        Some(n) => ok(json!({"content": format!("extra {}", n), "model": "m-extra"})),
    })
    .await;
    let service = service_for(&backend.url);

    let result = service
        .search("  a haunted lighthouse  ", &preferences(5))
        .await
        .unwrap();

    let contents: Vec<_> = result.stories.iter().map(|s| s.content.as_str()).collect();
    assert_eq!(contents, vec!["one", "two", "extra 1", "extra 3"]);
    assert_eq!(result.stories[2].model.as_deref(), Some("m-extra"));

    // 1 primary + 3 variations
    assert_eq!(backend.call_count(), 4);
}

#[tokio::test]
async fn test_search_primary_payload_carries_synonyms() {
    let backend = MockBackend::spawn(|_| ok(json!({"completion": "tale"}))).await;
    let service = service_for(&backend.url);

    service
        .search("a haunted lighthouse", &preferences(1))
        .await
        .unwrap();

    let requests = backend.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].content_type.as_deref(), Some("application/json"));

    let body = &requests[0].body;
    assert_eq!(body["prompt"], json!("a haunted lighthouse"));
    assert_eq!(body["inputs"], body["prompt"]);
    assert_eq!(body["mode"], json!("prompt"));
    assert_eq!(body["variations"], json!(true));
    for key in ["limit", "n", "count", "num_results", "num_outputs", "num_samples", "samples", "results", "outputs"] {
        assert_eq!(body[key], json!(1), "{key}");
    }
    assert_eq!(body["max_words"], json!(900));
    assert_eq!(body["temperature"], json!(0.6));
    assert_eq!(body["advancedSettings"]["theme"], json!("Betrayal"));
    assert_eq!(body["ui"]["genre"], json!("mystery"));
    assert!(body.get("seed").is_none());
}

#[tokio::test]
async fn test_search_variation_payloads() {
    let backend = MockBackend::spawn(|payload| match variation_number(payload) {
        None => ok(json!({})),
        Some(n) => ok(json!({"text": format!("v{}", n)})),
    })
    .await;
    let service = service_for(&backend.url);

    let result = service
        .search("a haunted lighthouse", &preferences(3))
        .await
        .unwrap();
    assert_eq!(result.len(), 3);

    let variations: Vec<_> = backend
        .requests()
        .into_iter()
        .filter(|r| variation_number(&r.body).is_some())
        .collect();
    assert_eq!(variations.len(), 3);

    for recorded in &variations {
        let body = &recorded.body;
        assert_eq!(body["variations"], json!(false));
        assert_eq!(body["n"], json!(1));
        assert_eq!(body["num_samples"], json!(1));
        assert_eq!(body["ui"]["limit"], json!(1));
        assert!(body["seed"].is_i64());
        assert!(body["prompt"]
            .as_str()
            .unwrap()
            .starts_with("a haunted lighthouse\n\nConstraints: genre=mystery, tone=dark, length=long, theme=Betrayal, creativity=6."));
    }
}

#[tokio::test]
async fn test_search_truncates_over_returning_backend() {
    let backend = MockBackend::spawn(|_| {
        let stories: Vec<_> = (0..10)
            .map(|i| json!({"title": format!("T{}", i), "content": format!("c{}", i)}))
            .collect();
        ok(json!(stories))
    })
    .await;
    let service = service_for(&backend.url);

    let result = service
        .search("a haunted lighthouse", &preferences(3))
        .await
        .unwrap();

    let titles: Vec<_> = result.stories.iter().map(|s| s.title.as_str()).collect();
    assert_eq!(titles, vec!["T0", "T1", "T2"]);
    assert_eq!(backend.call_count(), 1);
}

#[tokio::test]
async fn test_search_rejects_short_prompt_without_calling_backend() {
    let backend = MockBackend::spawn(|_| ok(json!({"completion": "never"}))).await;
    let service = service_for(&backend.url);

    let err = service.search("  x ", &preferences(2)).await.unwrap_err();

    assert!(matches!(err, ApiError::BadRequest(_)));
    assert_eq!(backend.call_count(), 0);
}

#[tokio::test]
async fn test_search_uses_default_count_when_unset() {
    let backend = MockBackend::spawn(|_| ok(json!({"completion": "same"}))).await;
    let service = service_for(&backend.url);

    let result = service
        .search("a haunted lighthouse", &PreferenceSet::default())
        .await
        .unwrap();

    // default search count is 4: one primary story plus three variations
    assert_eq!(result.len(), 4);
    assert_eq!(backend.call_count(), 4);
    assert_eq!(backend.requests()[0].body["limit"], json!(4));
}
