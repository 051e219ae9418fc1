//! Document Endpoint Tests
//!
//! Drives the full router:
//! - GET /documents/:id projects records and answers 404 for unknown ids
//! - GET /documents translates public names and reports invalid ones
//! - GET /health

use std::collections::HashMap;
use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use axum::Router;
use biblio_api::field_map::FieldMap;
use biblio_api::http_server::{HttpServer, HttpServerConfig};
use biblio_api::projection::{DerivedFields, LinkBuilder, PostProcessor, Projector};
use biblio_api::rest_api::{ApiState, ListEndpoint, SingleRecordEndpoint};
use biblio_api::store::{MemoryStore, StaticAnnotationIndex};
use serde_json::{json, Value};
use tower::ServiceExt;

// =============================================================================
// Helper Functions
// =============================================================================

const HOST: &str = "library.example.org";

fn router(with_annotation: bool) -> Router {
    let field_map = Arc::new(
        FieldMap::from_value(&json!({
            "record": {"bid": "id", "created": "created"},
            "document": {
                "title": "title",
                "biblio_keywords": "keywords",
                "biblio_contributors": "authors"
            }
        }))
        .unwrap(),
    );

    let store = Arc::new(
        MemoryStore::from_value(&json!({
            "records": {
                "17": {
                    "bid": 17,
                    "created": 915216645,
                    "title": "Salt Marsh Ecology",
                    "biblio_keywords": [
                        {"vocabulary_machine_name": "keywords", "name": "estuary"},
                        {"vocabulary_machine_name": "keywords", "name": "salinity"}
                    ],
                    "biblio_contributors": [
                        {"cid": 3, "biblio_contributor_name": "Rivera, M."}
                    ],
                    "biblio_doi": "10.5555/marsh",
                    "field_attachment": [{"fid": 501}]
                },
                "18": {"bid": 18, "title": "Tidal Flats", "biblio_doi": ""}
            }
        }))
        .unwrap(),
    );

    let projector = Arc::new(Projector::new(
        &field_map,
        PostProcessor::with_defaults(LinkBuilder::new(HOST)),
    ));

    let mut single = SingleRecordEndpoint::new(store.clone(), projector)
        .with_derived(DerivedFields::default());
    if with_annotation {
        let mut documents = HashMap::new();
        documents.insert("501".to_string(), "pQ7".to_string());
        single = single.with_annotation(Arc::new(StaticAnnotationIndex::new(
            "https://annotate.example.com/documents",
            documents,
        )));
    }

    let list = ListEndpoint::new(field_map, store.clone(), store);
    let state = ApiState::new(single, list, HOST);

    HttpServer::new(HttpServerConfig::default(), state).router()
}

async fn get(router: Router, uri: &str) -> (StatusCode, Value) {
    let request = Request::builder()
        .uri(uri)
        .header("host", HOST)
        .body(Body::empty())
        .unwrap();

    let response = router.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

// =============================================================================
// Single-Record Endpoint Tests
// =============================================================================

/// A stored record is projected, grouped by section, with derived fields.
#[tokio::test]
async fn test_single_record() {
    let (status, body) = get(router(false), "/documents/17").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["uri"], json!("library.example.org/documents/17"));
    assert_eq!(body["query_string"], json!(""));
    assert!(body["request_time"].is_i64());
    assert!(body.get("errors").is_none());

    assert_eq!(
        body["record"],
        json!({
            "id": "http://library.example.org/documents/17",
            "created": "1999-01-01T18:50:45+00:00"
        })
    );

    let document = &body["document"];
    assert_eq!(document["title"], json!("Salt Marsh Ecology"));
    assert_eq!(document["keywords"], json!(["estuary", "salinity"]));
    assert_eq!(document["authors"], json!(["Rivera, M."]));
    assert_eq!(
        document["creatorIds"],
        json!(["http://library.example.org/creators/3"])
    );
    assert_eq!(document["identifier"], json!("https://doi.org/10.5555/marsh"));
    assert!(document.get("annotationUrl").is_none());
}

/// Without a DOI the identifier falls back to the local URL.
#[tokio::test]
async fn test_identifier_fallback() {
    let (_, body) = get(router(false), "/documents/18").await;
    assert_eq!(
        body["document"]["identifier"],
        json!("http://library.example.org/documents/18")
    );
}

/// With an annotation service the attached file resolves to a URL.
#[tokio::test]
async fn test_annotation_url() {
    let (_, body) = get(router(true), "/documents/17").await;
    assert_eq!(
        body["document"]["annotationUrl"],
        json!("https://annotate.example.com/documents/pQ7")
    );
}

/// Unknown ids answer 404 with only the metadata.
#[tokio::test]
async fn test_not_found() {
    for uri in ["/documents/999", "/documents/not-a-number"] {
        let (status, body) = get(router(false), uri).await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        let keys: Vec<_> = body.as_object().unwrap().keys().cloned().collect();
        assert_eq!(keys, vec!["request_time", "uri", "query_string"]);
    }
}

// =============================================================================
// List Endpoint Tests
// =============================================================================

/// An unknown parameter yields an empty id list and one error.
#[tokio::test]
async fn test_list_unknown_field() {
    let (status, body) = get(router(false), "/documents?unknownField=x").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["errors"], json!(["Invalid field: unknownField"]));
    assert_eq!(body["document_ids"], json!([]));
    assert_eq!(body["query_string"], json!("unknownField=x"));
}

/// Valid parameters still run next to invalid ones.
#[tokio::test]
async fn test_list_best_effort() {
    let (_, body) = get(router(false), "/documents?keywords=SALIN&nope=1").await;

    assert_eq!(body["errors"], json!(["Invalid field: nope"]));
    assert_eq!(body["document_ids"], json!([17]));
}

/// No parameters lists every record id.
#[tokio::test]
async fn test_list_all() {
    let (_, body) = get(router(false), "/documents").await;
    assert_eq!(body["document_ids"], json!([17, 18]));
    assert!(body.get("errors").is_none());
}

// =============================================================================
// Health Tests
// =============================================================================

#[tokio::test]
async fn test_health() {
    let (status, body) = get(router(false), "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], json!("ok"));
}
