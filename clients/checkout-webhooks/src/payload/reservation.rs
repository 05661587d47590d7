use crate::error::ForeignField;
use crate::model::{CardDetails, Money, Order, OrderItems, PaymentError, ReservationConsumer};
use crate::wire::{self, EncodeOptions, WireFormat};
use serde::de::IgnoredAny;
use serde::ser::SerializeStruct;
use serde::{Deserialize, Deserializer, Serializer};

/// `payment.reservation.created`, the original shape carrying card and
/// consumer details
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReservationCreatedV1Data {
    pub payment_id: String,
    pub reservation_id: String,
    pub reservation_reference: String,
    pub card_details: CardDetails,
    pub payment_method: String,
    pub payment_type: String,
    #[serde(default)]
    pub consumer: Option<ReservationConsumer>,
    pub amount: Money,
}

impl WireFormat for ReservationCreatedV1Data {
    fn write_wire<S: Serializer>(&self, serializer: S, options: &EncodeOptions) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("ReservationCreatedV1Data", 8)?;
        state.serialize_field("paymentId", &self.payment_id)?;
        state.serialize_field("reservationId", &self.reservation_id)?;
        state.serialize_field("reservationReference", &self.reservation_reference)?;
        wire::nested(&mut state, "cardDetails", &self.card_details, options)?;
        state.serialize_field("paymentMethod", &self.payment_method)?;
        state.serialize_field("paymentType", &self.payment_type)?;
        wire::optional_nested(&mut state, "consumer", self.consumer.as_ref(), options)?;
        wire::nested(&mut state, "amount", &self.amount, options)?;
        state.end()
    }
}

/// `payment.reservation.created.v2`
///
/// Its required members are a subset of the v1 reservation and of a charge,
/// so members only those events define are rejected instead of dropped.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(try_from = "ReservationCreatedV2Wire")]
pub struct ReservationCreatedV2Data {
    pub payment_id: String,
    pub payment_method: String,
    pub payment_type: String,
    pub amount: Money,
    pub order: Option<Order>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ReservationCreatedV2Wire {
    payment_id: String,
    payment_method: String,
    payment_type: String,
    amount: Money,
    #[serde(default)]
    order: Option<Order>,
    #[serde(default, deserialize_with = "present")]
    card_details: bool,
    #[serde(default, deserialize_with = "present")]
    reservation_id: bool,
    #[serde(default, deserialize_with = "present")]
    reservation_reference: bool,
    #[serde(default, deserialize_with = "present")]
    charge_id: bool,
    #[serde(default, deserialize_with = "present")]
    order_items: bool,
}

/// Marks a member as present whatever its value, `null` included
fn present<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
    IgnoredAny::deserialize(deserializer)?;
    Ok(true)
}

impl TryFrom<ReservationCreatedV2Wire> for ReservationCreatedV2Data {
    type Error = ForeignField;

    fn try_from(wire: ReservationCreatedV2Wire) -> Result<Self, ForeignField> {
        let foreign = [
            (wire.card_details, "cardDetails"),
            (wire.reservation_id, "reservationId"),
            (wire.reservation_reference, "reservationReference"),
            (wire.charge_id, "chargeId"),
            (wire.order_items, "orderItems"),
        ];
        if let Some((_, field)) = foreign.into_iter().find(|(seen, _)| *seen) {
            return Err(ForeignField { field });
        }

        Ok(Self {
            payment_id: wire.payment_id,
            payment_method: wire.payment_method,
            payment_type: wire.payment_type,
            amount: wire.amount,
            order: wire.order,
        })
    }
}

impl WireFormat for ReservationCreatedV2Data {
    fn write_wire<S: Serializer>(&self, serializer: S, options: &EncodeOptions) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("ReservationCreatedV2Data", 5)?;
        state.serialize_field("paymentId", &self.payment_id)?;
        state.serialize_field("paymentMethod", &self.payment_method)?;
        state.serialize_field("paymentType", &self.payment_type)?;
        wire::nested(&mut state, "amount", &self.amount, options)?;
        wire::optional_nested(&mut state, "order", self.order.as_ref(), options)?;
        state.end()
    }
}

/// `payment.reservation.failed`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReservationFailedData {
    pub payment_id: String,
    pub reservation_id: String,
    pub error: PaymentError,
    pub order_items: OrderItems,
    pub amount: Money,
}

impl WireFormat for ReservationFailedData {
    fn write_wire<S: Serializer>(&self, serializer: S, options: &EncodeOptions) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("ReservationFailedData", 5)?;
        state.serialize_field("paymentId", &self.payment_id)?;
        state.serialize_field("reservationId", &self.reservation_id)?;
        wire::nested(&mut state, "error", &self.error, options)?;
        wire::nested(&mut state, "orderItems", &self.order_items, options)?;
        wire::nested(&mut state, "amount", &self.amount, options)?;
        state.end()
    }
}
