#![allow(clippy::unwrap_used, clippy::expect_used)]

use apidrift_core::alert::{timestamp_from_unix, ALERT_EVENT};
use apidrift_core::errors::ExErrorKind;
use apidrift_core::{
    compare_endpoints, diff_values, dispatch_alert, AlertPayload, DriftConfig, EndpointSchema,
    LogAlertSink, MemoryAlertSink, NoopAlertSink,
};
use serde_json::json;

fn price_change_payload() -> AlertPayload {
    let report = diff_values(
        &json!({"product": {"price": "number"}}),
        &json!({"product": {"price": "string"}}),
        &DriftConfig::default(),
    )
    .unwrap();
    let ts = timestamp_from_unix(1_700_000_000).unwrap();
    AlertPayload::from_report("shopify-products", &report, ts, "production").unwrap()
}

#[test]
fn test_payload_shape() {
    let payload = price_change_payload();
    assert_eq!(payload.event, ALERT_EVENT);
    assert_eq!(payload.subject, "API Schema Changes Detected: shopify-products");
    assert_eq!(payload.metadata.total_changes, 1);
    assert_eq!(payload.metadata.scan_timestamp, 1_700_000_000);

    let value = serde_json::to_value(&payload).unwrap();
    assert!(value["timestamp"]
        .as_str()
        .unwrap()
        .starts_with("2023-11-14T22:13:20"));
    assert_eq!(value["environment"], "production");
    assert_eq!(
        value["changes"],
        json!({"changed": {"product.price": {"old_type": "number", "new_type": "string"}}})
    );
}

#[test]
fn test_endpoint_payload_includes_endpoint_lists() {
    let old = vec![EndpointSchema::new("/products", "GET", json!({"id": "number"}))];
    let new = vec![
        EndpointSchema::new("/products", "GET", json!({"id": "string"})),
        EndpointSchema::new("/orders", "GET", json!({})),
    ];
    let changes = compare_endpoints(&old, &new, &DriftConfig::default()).unwrap();
    let ts = timestamp_from_unix(0).unwrap();
    let payload = AlertPayload::from_endpoint_changes("shop", &changes, ts, "staging").unwrap();

    let value = serde_json::to_value(&payload).unwrap();
    assert_eq!(value["changes"]["added_endpoints"][0]["path"], "/orders");
    assert_eq!(value["changes"]["modified_endpoints"][0]["method"], "GET");
    assert!(value["changes"].get("removed_endpoints").is_none());
    assert_eq!(payload.metadata.total_changes, 3);
}

#[test]
fn test_dispatch_delivers_to_sink() {
    let sink = MemoryAlertSink::new();
    let payload = price_change_payload();

    assert!(dispatch_alert(&sink, Some(&payload)).unwrap());
    assert!(!dispatch_alert(&sink, None).unwrap());

    let delivered = sink.delivered();
    assert_eq!(delivered.len(), 1);
    assert_eq!(delivered[0], payload);
}

#[test]
fn test_log_sink_accepts_payload() {
    assert!(dispatch_alert(&LogAlertSink, Some(&price_change_payload())).unwrap());
}

#[test]
fn test_unconfigured_transport_fails() {
    let err = dispatch_alert(&NoopAlertSink, Some(&price_change_payload())).unwrap_err();
    assert_eq!(err.kind(), ExErrorKind::NotificationUnavailable);
    assert_eq!(err.code(), "ERR_NOTIFICATION_UNAVAILABLE");
}

#[test]
fn test_payload_round_trips_through_json() {
    let payload = price_change_payload();
    let text = serde_json::to_string(&payload).unwrap();
    let back: AlertPayload = serde_json::from_str(&text).unwrap();
    assert_eq!(back, payload);
}
