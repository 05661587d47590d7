//! Shared helpers for the integration tests: golden deliveries and a
//! renderer that writes envelope members in a chosen order.

#![allow(dead_code)]

use checkout_webhooks::EventName;
use serde_json::Value;
use std::fs;
use std::path::PathBuf;

/// One golden delivery per event kind.
pub const FIXTURES: [(EventName, &str); 12] = [
    (EventName::PaymentCreated, "payment-created.json"),
    (EventName::CheckoutCompleted, "checkout-completed.json"),
    (EventName::ReservationCreatedV1, "reservation-created-v1.json"),
    (EventName::ReservationCreatedV2, "reservation-created-v2.json"),
    (EventName::ReservationFailed, "reservation-failed.json"),
    (EventName::ChargeCreated, "charge-created.json"),
    (EventName::ChargeFailed, "charge-failed.json"),
    (EventName::RefundInitiated, "refund-initiated.json"),
    (EventName::RefundCompleted, "refund-completed.json"),
    (EventName::RefundFailed, "refund-failed.json"),
    (EventName::CancelCreated, "cancel-created.json"),
    (EventName::CancelFailed, "cancel-failed.json"),
];

pub fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests").join("fixtures")
}

pub fn load_fixture(name: &str) -> String {
    let path = fixtures_dir().join(name);
    fs::read_to_string(&path).unwrap_or_else(|_| panic!("Failed to read file: {:?}", path))
}

pub fn fixture_value(name: &str) -> Value {
    serde_json::from_str(&load_fixture(name))
        .unwrap_or_else(|_| panic!("Failed to parse JSON: {}", name))
}

/// The `data` member of a golden delivery.
pub fn fixture_data(name: &str) -> Value {
    fixture_value(name)
        .get("data")
        .cloned()
        .unwrap_or_else(|| panic!("Fixture has no data: {}", name))
}

/// Render an object with its members in exactly the given order.
pub fn render(members: &[(&str, &Value)]) -> Vec<u8> {
    let body = members
        .iter()
        .map(|(key, value)| format!("{}:{}", Value::from(*key), value))
        .collect::<Vec<_>>()
        .join(",");
    format!("{{{}}}", body).into_bytes()
}

/// A delivery for `event` carrying `data`, with `data` placed first or last.
pub fn delivery(event: &str, data: &Value, data_first: bool) -> Vec<u8> {
    let id = Value::from("01d9ae0d3d2f4a77b8a6a7a8a9f0c1ff");
    let merchant = Value::from(100017120);
    let timestamp = Value::from("2021-05-04T22:09:55.1130+02:00");
    let event = Value::from(event);

    if data_first {
        render(&[
            ("data", data),
            ("id", &id),
            ("merchantId", &merchant),
            ("timestamp", &timestamp),
            ("event", &event),
        ])
    } else {
        render(&[
            ("id", &id),
            ("merchantId", &merchant),
            ("timestamp", &timestamp),
            ("event", &event),
            ("data", data),
        ])
    }
}
