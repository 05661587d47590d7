use crate::model::{Money, OrderItems, PaymentError};
use crate::wire::{self, EncodeOptions, WireFormat};
use serde::ser::SerializeStruct;
use serde::{Deserialize, Serializer};

/// `payment.charge.created.v2`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChargeCreatedData {
    pub payment_id: String,
    pub charge_id: String,
    /// Present when the charge was made against a subscription
    #[serde(default)]
    pub subscription_id: Option<String>,
    pub order_items: OrderItems,
    pub payment_method: String,
    pub payment_type: String,
    pub amount: Money,
}

impl WireFormat for ChargeCreatedData {
    fn write_wire<S: Serializer>(&self, serializer: S, options: &EncodeOptions) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("ChargeCreatedData", 7)?;
        state.serialize_field("paymentId", &self.payment_id)?;
        state.serialize_field("chargeId", &self.charge_id)?;
        wire::optional_field(&mut state, "subscriptionId", self.subscription_id.as_ref(), options)?;
        wire::nested(&mut state, "orderItems", &self.order_items, options)?;
        state.serialize_field("paymentMethod", &self.payment_method)?;
        state.serialize_field("paymentType", &self.payment_type)?;
        wire::nested(&mut state, "amount", &self.amount, options)?;
        state.end()
    }
}

/// `payment.charge.failed`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChargeFailedData {
    pub payment_id: String,
    pub charge_id: String,
    pub error: PaymentError,
    pub order_items: OrderItems,
    pub amount: Money,
}

impl WireFormat for ChargeFailedData {
    fn write_wire<S: Serializer>(&self, serializer: S, options: &EncodeOptions) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("ChargeFailedData", 5)?;
        state.serialize_field("paymentId", &self.payment_id)?;
        state.serialize_field("chargeId", &self.charge_id)?;
        wire::nested(&mut state, "error", &self.error, options)?;
        wire::nested(&mut state, "orderItems", &self.order_items, options)?;
        wire::nested(&mut state, "amount", &self.amount, options)?;
        state.end()
    }
}
