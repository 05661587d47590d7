use crate::model::{CheckoutConsumer, Order};
use crate::wire::{self, EncodeOptions, WireFormat};
use serde::ser::SerializeStruct;
use serde::{Deserialize, Serializer};

/// `payment.created`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentCreatedData {
    pub payment_id: String,
    pub order: Order,
}

impl WireFormat for PaymentCreatedData {
    fn write_wire<S: Serializer>(&self, serializer: S, options: &EncodeOptions) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("PaymentCreatedData", 2)?;
        state.serialize_field("paymentId", &self.payment_id)?;
        wire::nested(&mut state, "order", &self.order, options)?;
        state.end()
    }
}

/// `payment.checkout.completed`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutCompletedData {
    pub payment_id: String,
    pub order: Order,
    #[serde(default)]
    pub consumer: Option<CheckoutConsumer>,
}

impl WireFormat for CheckoutCompletedData {
    fn write_wire<S: Serializer>(&self, serializer: S, options: &EncodeOptions) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("CheckoutCompletedData", 3)?;
        state.serialize_field("paymentId", &self.payment_id)?;
        wire::nested(&mut state, "order", &self.order, options)?;
        wire::optional_nested(&mut state, "consumer", self.consumer.as_ref(), options)?;
        state.end()
    }
}
