//! Integration tests for the REST record source against a mock server.

use std::time::Duration;

use httpmock::prelude::*;
use ordertrack::records::{fetch_payment, HttpRecordSource, RecordSource};
use ordertrack::OrdertrackError;
use serde_json::json;

fn source(server: &MockServer) -> HttpRecordSource {
    HttpRecordSource::new(&format!("{}/api/", server.base_url()), Duration::from_secs(5)).unwrap()
}

#[tokio::test]
async fn fetches_order_and_item() {
    let server = MockServer::start_async().await;
    let order = server
        .mock_async(|when, then| {
            when.method(GET).path("/api/orders/2");
            then.status(200).json_body(json!({
                "id": 2,
                "details": { "item_id": 1, "query_link": "/ipfs/QmQuery" },
                "state": { "matched_rows": 40, "result_path": "/ipfs/QmResult" }
            }));
        })
        .await;
    let item = server
        .mock_async(|when, then| {
            when.method(GET).path("/api/items/1");
            then.status(200).json_body(json!({
                "id": 1,
                "details": { "name": "Weather 2020", "price": { "PerRow": { "price": "25" } } }
            }));
        })
        .await;

    let payment = fetch_payment(&source(&server), 2).await.unwrap();

    order.assert_async().await;
    item.assert_async().await;
    assert_eq!(payment.item_name, "Weather 2020");
    assert_eq!(payment.amount, 1000);
    assert_eq!(payment.result_path.as_deref(), Some("/ipfs/QmResult"));
}

#[tokio::test]
async fn missing_record_is_not_found() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/api/orders/9");
            then.status(404);
        })
        .await;

    let err = source(&server).order(9).await.unwrap_err();
    assert!(matches!(
        err,
        OrdertrackError::RecordNotFound { what: "order", id: 9 }
    ));
}

#[tokio::test]
async fn server_error_is_fetch_error() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/api/items/1");
            then.status(503);
        })
        .await;

    let err = source(&server).item(1).await.unwrap_err();
    match err {
        OrdertrackError::RecordFetch { message, .. } => assert!(message.contains("503")),
        other => panic!("unexpected error: {}", other),
    }
}

#[tokio::test]
async fn malformed_body_is_fetch_error() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/api/orders/2");
            then.status(200).body("not json");
        })
        .await;

    let err = source(&server).order(2).await.unwrap_err();
    assert!(matches!(err, OrdertrackError::RecordFetch { .. }));
}
