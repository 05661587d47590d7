//! Per-event payloads and the dispatch table that selects them.

pub mod cancel;
pub mod charge;
pub mod payment;
pub mod refund;
pub mod reservation;

pub use cancel::{CancelCreatedData, CancelFailedData};
pub use charge::{ChargeCreatedData, ChargeFailedData};
pub use payment::{CheckoutCompletedData, PaymentCreatedData};
pub use refund::{RefundCompletedData, RefundFailedData, RefundInitiatedData};
pub use reservation::{ReservationCreatedV1Data, ReservationCreatedV2Data, ReservationFailedData};

use crate::event_name::EventName;
use crate::model::Money;
use crate::wire::{EncodeOptions, WireFormat};
use serde::de::DeserializeSeed;
use serde::{Deserialize, Deserializer, Serializer};

/// A decoded `data` object, tagged by the event it was delivered under.
///
/// The variant is the event name; there is no way to pair a payload with
/// the wrong name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WebhookEvent {
    PaymentCreated(PaymentCreatedData),
    CheckoutCompleted(CheckoutCompletedData),
    ReservationCreatedV1(ReservationCreatedV1Data),
    ReservationCreatedV2(ReservationCreatedV2Data),
    ReservationFailed(ReservationFailedData),
    ChargeCreated(ChargeCreatedData),
    ChargeFailed(ChargeFailedData),
    RefundInitiated(RefundInitiatedData),
    RefundCompleted(RefundCompletedData),
    RefundFailed(RefundFailedData),
    CancelCreated(CancelCreatedData),
    CancelFailed(CancelFailedData),
}

impl WebhookEvent {
    pub fn name(&self) -> EventName {
        match self {
            WebhookEvent::PaymentCreated(_) => EventName::PaymentCreated,
            WebhookEvent::CheckoutCompleted(_) => EventName::CheckoutCompleted,
            WebhookEvent::ReservationCreatedV1(_) => EventName::ReservationCreatedV1,
            WebhookEvent::ReservationCreatedV2(_) => EventName::ReservationCreatedV2,
            WebhookEvent::ReservationFailed(_) => EventName::ReservationFailed,
            WebhookEvent::ChargeCreated(_) => EventName::ChargeCreated,
            WebhookEvent::ChargeFailed(_) => EventName::ChargeFailed,
            WebhookEvent::RefundInitiated(_) => EventName::RefundInitiated,
            WebhookEvent::RefundCompleted(_) => EventName::RefundCompleted,
            WebhookEvent::RefundFailed(_) => EventName::RefundFailed,
            WebhookEvent::CancelCreated(_) => EventName::CancelCreated,
            WebhookEvent::CancelFailed(_) => EventName::CancelFailed,
        }
    }

    pub fn payment_id(&self) -> &str {
        match self {
            WebhookEvent::PaymentCreated(data) => &data.payment_id,
            WebhookEvent::CheckoutCompleted(data) => &data.payment_id,
            WebhookEvent::ReservationCreatedV1(data) => &data.payment_id,
            WebhookEvent::ReservationCreatedV2(data) => &data.payment_id,
            WebhookEvent::ReservationFailed(data) => &data.payment_id,
            WebhookEvent::ChargeCreated(data) => &data.payment_id,
            WebhookEvent::ChargeFailed(data) => &data.payment_id,
            WebhookEvent::RefundInitiated(data) => &data.payment_id,
            WebhookEvent::RefundCompleted(data) => &data.payment_id,
            WebhookEvent::RefundFailed(data) => &data.payment_id,
            WebhookEvent::CancelCreated(data) => &data.payment_id,
            WebhookEvent::CancelFailed(data) => &data.payment_id,
        }
    }

    /// The amount the event concerns; the order total for order-carrying events
    pub fn amount(&self) -> &Money {
        match self {
            WebhookEvent::PaymentCreated(data) => &data.order.amount,
            WebhookEvent::CheckoutCompleted(data) => &data.order.amount,
            WebhookEvent::ReservationCreatedV1(data) => &data.amount,
            WebhookEvent::ReservationCreatedV2(data) => &data.amount,
            WebhookEvent::ReservationFailed(data) => &data.amount,
            WebhookEvent::ChargeCreated(data) => &data.amount,
            WebhookEvent::ChargeFailed(data) => &data.amount,
            WebhookEvent::RefundInitiated(data) => &data.amount,
            WebhookEvent::RefundCompleted(data) => &data.amount,
            WebhookEvent::RefundFailed(data) => &data.amount,
            WebhookEvent::CancelCreated(data) => &data.amount,
            WebhookEvent::CancelFailed(data) => &data.amount,
        }
    }
}

/// Decodes one `data` object with the decoder belonging to `0`
#[derive(Debug, Clone, Copy)]
pub struct PayloadSeed(pub EventName);

impl<'de> DeserializeSeed<'de> for PayloadSeed {
    type Value = WebhookEvent;

    fn deserialize<D>(self, deserializer: D) -> Result<WebhookEvent, D::Error>
    where
        D: Deserializer<'de>,
    {
        let event = match self.0 {
            EventName::PaymentCreated => WebhookEvent::PaymentCreated(Deserialize::deserialize(deserializer)?),
            EventName::CheckoutCompleted => WebhookEvent::CheckoutCompleted(Deserialize::deserialize(deserializer)?),
            EventName::ReservationCreatedV1 => {
                WebhookEvent::ReservationCreatedV1(Deserialize::deserialize(deserializer)?)
            }
            EventName::ReservationCreatedV2 => {
                WebhookEvent::ReservationCreatedV2(Deserialize::deserialize(deserializer)?)
            }
            EventName::ReservationFailed => WebhookEvent::ReservationFailed(Deserialize::deserialize(deserializer)?),
            EventName::ChargeCreated => WebhookEvent::ChargeCreated(Deserialize::deserialize(deserializer)?),
            EventName::ChargeFailed => WebhookEvent::ChargeFailed(Deserialize::deserialize(deserializer)?),
            EventName::RefundInitiated => WebhookEvent::RefundInitiated(Deserialize::deserialize(deserializer)?),
            EventName::RefundCompleted => WebhookEvent::RefundCompleted(Deserialize::deserialize(deserializer)?),
            EventName::RefundFailed => WebhookEvent::RefundFailed(Deserialize::deserialize(deserializer)?),
            EventName::CancelCreated => WebhookEvent::CancelCreated(Deserialize::deserialize(deserializer)?),
            EventName::CancelFailed => WebhookEvent::CancelFailed(Deserialize::deserialize(deserializer)?),
        };
        Ok(event)
    }
}

impl WireFormat for WebhookEvent {
    fn write_wire<S: Serializer>(&self, serializer: S, options: &EncodeOptions) -> Result<S::Ok, S::Error> {
        match self {
            WebhookEvent::PaymentCreated(data) => data.write_wire(serializer, options),
            WebhookEvent::CheckoutCompleted(data) => data.write_wire(serializer, options),
            WebhookEvent::ReservationCreatedV1(data) => data.write_wire(serializer, options),
            WebhookEvent::ReservationCreatedV2(data) => data.write_wire(serializer, options),
            WebhookEvent::ReservationFailed(data) => data.write_wire(serializer, options),
            WebhookEvent::ChargeCreated(data) => data.write_wire(serializer, options),
            WebhookEvent::ChargeFailed(data) => data.write_wire(serializer, options),
            WebhookEvent::RefundInitiated(data) => data.write_wire(serializer, options),
            WebhookEvent::RefundCompleted(data) => data.write_wire(serializer, options),
            WebhookEvent::RefundFailed(data) => data.write_wire(serializer, options),
            WebhookEvent::CancelCreated(data) => data.write_wire(serializer, options),
            WebhookEvent::CancelFailed(data) => data.write_wire(serializer, options),
        }
    }
}
