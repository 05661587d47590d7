use crate::model::{Money, OrderItems, PaymentError};
use crate::wire::{self, EncodeOptions, WireFormat};
use serde::ser::SerializeStruct;
use serde::{Deserialize, Serializer};

/// `payment.cancel.created`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CancelCreatedData {
    pub payment_id: String,
    pub cancel_id: String,
    pub order_items: OrderItems,
    pub amount: Money,
}

impl WireFormat for CancelCreatedData {
    fn write_wire<S: Serializer>(&self, serializer: S, options: &EncodeOptions) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("CancelCreatedData", 4)?;
        state.serialize_field("paymentId", &self.payment_id)?;
        state.serialize_field("cancelId", &self.cancel_id)?;
        wire::nested(&mut state, "orderItems", &self.order_items, options)?;
        wire::nested(&mut state, "amount", &self.amount, options)?;
        state.end()
    }
}

/// `payment.cancel.failed`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CancelFailedData {
    pub payment_id: String,
    pub cancel_id: String,
    pub error: PaymentError,
    pub order_items: OrderItems,
    pub amount: Money,
}

impl WireFormat for CancelFailedData {
    fn write_wire<S: Serializer>(&self, serializer: S, options: &EncodeOptions) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("CancelFailedData", 5)?;
        state.serialize_field("paymentId", &self.payment_id)?;
        state.serialize_field("cancelId", &self.cancel_id)?;
        wire::nested(&mut state, "error", &self.error, options)?;
        wire::nested(&mut state, "orderItems", &self.order_items, options)?;
        wire::nested(&mut state, "amount", &self.amount, options)?;
        state.end()
    }
}
