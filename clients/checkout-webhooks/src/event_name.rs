use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Wire event names the platform delivers.
///
/// The mapping to wire strings is total and injective in both directions.
/// There is deliberately no catch-all variant: an unknown name is an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventName {
    PaymentCreated,
    CheckoutCompleted,
    ReservationCreatedV1,
    ReservationCreatedV2,
    ReservationFailed,
    ChargeCreated,
    ChargeFailed,
    RefundInitiated,
    RefundCompleted,
    RefundFailed,
    CancelCreated,
    CancelFailed,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unrecognized event name `{0}`")]
pub struct UnrecognizedEventName(pub String);

impl EventName {
    pub const ALL: [EventName; 12] = [
        EventName::PaymentCreated,
        EventName::CheckoutCompleted,
        EventName::ReservationCreatedV1,
        EventName::ReservationCreatedV2,
        EventName::ReservationFailed,
        EventName::ChargeCreated,
        EventName::ChargeFailed,
        EventName::RefundInitiated,
        EventName::RefundCompleted,
        EventName::RefundFailed,
        EventName::CancelCreated,
        EventName::CancelFailed,
    ];

    /// Canonical wire identifier
    pub fn as_str(&self) -> &'static str {
        match self {
            EventName::PaymentCreated => "payment.created",
            EventName::CheckoutCompleted => "payment.checkout.completed",
            EventName::ReservationCreatedV1 => "payment.reservation.created",
            EventName::ReservationCreatedV2 => "payment.reservation.created.v2",
            EventName::ReservationFailed => "payment.reservation.failed",
            EventName::ChargeCreated => "payment.charge.created.v2",
            EventName::ChargeFailed => "payment.charge.failed",
            EventName::RefundInitiated => "payment.refund.initiated.v2",
            EventName::RefundCompleted => "payment.refund.completed",
            EventName::RefundFailed => "payment.refund.failed",
            EventName::CancelCreated => "payment.cancel.created",
            EventName::CancelFailed => "payment.cancel.failed",
        }
    }
}

impl FromStr for EventName {
    type Err = UnrecognizedEventName;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "payment.created" => Ok(EventName::PaymentCreated),
            "payment.checkout.completed" => Ok(EventName::CheckoutCompleted),
            "payment.reservation.created" => Ok(EventName::ReservationCreatedV1),
            "payment.reservation.created.v2" => Ok(EventName::ReservationCreatedV2),
            "payment.reservation.failed" => Ok(EventName::ReservationFailed),
            "payment.charge.created.v2" => Ok(EventName::ChargeCreated),
            "payment.charge.failed" => Ok(EventName::ChargeFailed),
            "payment.refund.initiated.v2" => Ok(EventName::RefundInitiated),
            "payment.refund.completed" => Ok(EventName::RefundCompleted),
            "payment.refund.failed" => Ok(EventName::RefundFailed),
            "payment.cancel.created" => Ok(EventName::CancelCreated),
            "payment.cancel.failed" => Ok(EventName::CancelFailed),
            other => Err(UnrecognizedEventName(other.to_string())),
        }
    }
}

impl fmt::Display for EventName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
