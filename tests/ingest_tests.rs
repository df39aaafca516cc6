use axum::{
    Json, Router,
    body::Body,
    extract::{Multipart, State},
    http::{Request, StatusCode},
    routing::post,
};
use news_portal::{
    ingest::{FieldMap, FieldValue, IngestError, collect_fields, reconstruct_arrays, to_json},
    storage::{MockStorageService, StorageState},
};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;
use tower::ServiceExt;

// --- Test Utilities ---

const BOUNDARY: &str = "test-boundary-7MA4YWxkTrZu0gW";

/// Builds a multipart/form-data body from (name, filename, value) triples.
fn multipart_body(parts: &[(&str, Option<&str>, &str)]) -> String {
    let mut body = String::new();
    for (name, filename, value) in parts {
        body.push_str(&format!("--{BOUNDARY}\r\n"));
        match filename {
            Some(filename) => {
                body.push_str(&format!(
                    "Content-Disposition: form-data; name=\"{name}\"; filename=\"{filename}\"\r\n"
                ));
                body.push_str("Content-Type: image/png\r\n\r\n");
            }
            None => {
                body.push_str(&format!(
                    "Content-Disposition: form-data; name=\"{name}\"\r\n\r\n"
                ));
            }
        }
        body.push_str(value);
        body.push_str("\r\n");
    }
    body.push_str(&format!("--{BOUNDARY}--\r\n"));
    body
}

/// Probe handler: runs the full ingestion pipeline and echoes the normalized map.
async fn ingest_probe(
    State(storage): State<StorageState>,
    multipart: Multipart,
) -> Result<Json<Value>, StatusCode> {
    let fields = collect_fields(multipart, &storage, None)
        .await
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?;
    let normalized = reconstruct_arrays(fields).map_err(|_| StatusCode::UNPROCESSABLE_ENTITY)?;
    Ok(Json(to_json(&normalized)))
}

fn probe_router(storage: StorageState) -> Router {
    Router::new()
        .route("/ingest", post(ingest_probe))
        .with_state(storage)
}

async fn run_probe(parts: &[(&str, Option<&str>, &str)]) -> (StatusCode, Value) {
    let router = probe_router(Arc::new(MockStorageService::new()));
    let request = Request::builder()
        .method("POST")
        .uri("/ingest")
        .header(
            "content-type",
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(multipart_body(parts)))
        .unwrap();

    let response = router.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

fn text_map(pairs: &[(&str, &str)]) -> FieldMap {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), FieldValue::Text(v.to_string())))
        .collect()
}

// --- Array Reconstructor (pure) ---

#[test]
fn test_reconstruct_orders_by_numeric_index_regardless_of_arrival() {
    // Arrival order scrambled on purpose.
    let fields = text_map(&[("tags[2]", "c"), ("tags[0]", "a"), ("tags[1]", "b")]);

    let normalized = reconstruct_arrays(fields).unwrap();

    assert_eq!(
        normalized.get("tags"),
        Some(&FieldValue::Items(vec![
            "a".to_string(),
            "b".to_string(),
            "c".to_string()
        ]))
    );
    assert!(!normalized.contains_key("tags[0]"));
}

#[test]
fn test_reconstruct_sort_is_numeric_not_lexicographic() {
    // Lexicographic order would yield 1, 10, 2.
    let fields = text_map(&[("tags[10]", "k"), ("tags[2]", "c"), ("tags[1]", "b")]);

    let normalized = reconstruct_arrays(fields).unwrap();

    assert_eq!(
        normalized.get("tags"),
        Some(&FieldValue::Items(vec![
            "b".to_string(),
            "c".to_string(),
            "k".to_string()
        ]))
    );
}

#[test]
fn test_reconstruct_passes_plain_fields_through() {
    let fields = text_map(&[("name", "Test"), ("tags[0]", "a")]);

    let normalized = reconstruct_arrays(fields).unwrap();

    assert_eq!(
        normalized.get("name"),
        Some(&FieldValue::Text("Test".to_string()))
    );
    assert_eq!(normalized.len(), 2);
}

#[test]
fn test_reconstruct_is_idempotent() {
    let fields = text_map(&[("name", "Test"), ("tags[1]", "b"), ("tags[0]", "a")]);

    let once = reconstruct_arrays(fields).unwrap();
    let twice = reconstruct_arrays(once.clone()).unwrap();

    assert_eq!(once, twice);
}

#[test]
fn test_reconstruct_rejects_non_numeric_index() {
    let fields = text_map(&[("tags[abc]", "x")]);

    let result = reconstruct_arrays(fields);

    match result {
        Err(IngestError::BadArrayIndex { key }) => assert_eq!(key, "tags[abc]"),
        other => panic!("expected BadArrayIndex, got {other:?}"),
    }
}

#[test]
fn test_reconstruct_rejects_negative_index() {
    let fields = text_map(&[("tags[-1]", "x")]);

    assert!(matches!(
        reconstruct_arrays(fields),
        Err(IngestError::BadArrayIndex { .. })
    ));
}

#[test]
fn test_reconstruct_groups_multiple_bases_independently() {
    let fields = text_map(&[
        ("tags[1]", "t2"),
        ("tags[0]", "t1"),
        ("authors[0]", "alice"),
    ]);

    let normalized = reconstruct_arrays(fields).unwrap();

    assert_eq!(
        normalized.get("tags"),
        Some(&FieldValue::Items(vec!["t1".to_string(), "t2".to_string()]))
    );
    assert_eq!(
        normalized.get("authors"),
        Some(&FieldValue::Items(vec!["alice".to_string()]))
    );
}

// --- Field Extractor (through the multipart stream) ---

#[tokio::test]
async fn test_field_map_has_one_entry_per_part() {
    // Two value parts plus one file part: exactly three entries.
    let (status, value) = run_probe(&[
        ("name", None, "Test"),
        ("author_name", None, "Reporter"),
        ("image", Some("photo.png"), "binarybytes"),
    ])
    .await;

    assert_eq!(status, StatusCode::OK);
    let object = value.as_object().unwrap();
    assert_eq!(object.len(), 3);
    assert_eq!(object["name"], "Test");
    assert_eq!(object["author_name"], "Reporter");
    // File parts are recorded as the storage backend's returned location.
    assert!(object["image"].as_str().unwrap().contains("mock-bucket"));
}

#[tokio::test]
async fn test_duplicate_field_name_last_write_wins() {
    let (status, value) = run_probe(&[("name", None, "first"), ("name", None, "second")]).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(value["name"], "second");
}

#[tokio::test]
async fn test_end_to_end_normalized_field_map() {
    // The canonical scenario: scalar, indexed tags and a file part together.
    let (status, value) = run_probe(&[
        ("name", None, "Test"),
        ("tags[0]", None, "t1"),
        ("tags[1]", None, "t2"),
        ("image", Some("cover.png"), "bytes"),
    ])
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(value["name"], "Test");
    assert_eq!(value["tags"], serde_json::json!(["t1", "t2"]));
    assert!(value["image"].as_str().unwrap().starts_with("http"));
}

#[tokio::test]
async fn test_indexed_parts_arrival_order_is_irrelevant_over_the_wire() {
    let (status, value) = run_probe(&[
        ("tags[2]", None, "c"),
        ("tags[0]", None, "a"),
        ("tags[1]", None, "b"),
    ])
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(value["tags"], serde_json::json!(["a", "b", "c"]));
}

#[tokio::test]
async fn test_storage_failure_fails_the_request() {
    let router = probe_router(Arc::new(MockStorageService::new_failing()));
    let request = Request::builder()
        .method("POST")
        .uri("/ingest")
        .header(
            "content-type",
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(multipart_body(&[(
            "image",
            Some("photo.png"),
            "bytes",
        )])))
        .unwrap();

    let response = router.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
}

// --- to_json bridging ---

#[test]
fn test_to_json_renders_all_value_shapes() {
    let mut fields: FieldMap = HashMap::new();
    fields.insert("name".to_string(), FieldValue::Text("Test".to_string()));
    fields.insert(
        "tags".to_string(),
        FieldValue::Items(vec!["a".to_string(), "b".to_string()]),
    );

    let value = to_json(&fields);

    assert_eq!(value["name"], "Test");
    assert_eq!(value["tags"], serde_json::json!(["a", "b"]));
}
