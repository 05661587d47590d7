use crate::model::{InvoiceDetails, Money, PaymentError};
use crate::wire::{self, EncodeOptions, WireFormat};
use serde::ser::SerializeStruct;
use serde::{Deserialize, Serializer};

/// `payment.refund.initiated.v2`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RefundInitiatedData {
    pub payment_id: String,
    pub refund_id: String,
    pub charge_id: String,
    pub amount: Money,
}

impl WireFormat for RefundInitiatedData {
    fn write_wire<S: Serializer>(&self, serializer: S, options: &EncodeOptions) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("RefundInitiatedData", 4)?;
        state.serialize_field("paymentId", &self.payment_id)?;
        state.serialize_field("refundId", &self.refund_id)?;
        state.serialize_field("chargeId", &self.charge_id)?;
        wire::nested(&mut state, "amount", &self.amount, options)?;
        state.end()
    }
}

/// `payment.refund.completed`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RefundCompletedData {
    pub payment_id: String,
    pub refund_id: String,
    pub amount: Money,
    /// Only set for invoice payments
    #[serde(default)]
    pub invoice_details: Option<InvoiceDetails>,
}

impl WireFormat for RefundCompletedData {
    fn write_wire<S: Serializer>(&self, serializer: S, options: &EncodeOptions) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("RefundCompletedData", 4)?;
        state.serialize_field("paymentId", &self.payment_id)?;
        state.serialize_field("refundId", &self.refund_id)?;
        wire::nested(&mut state, "amount", &self.amount, options)?;
        wire::optional_nested(&mut state, "invoiceDetails", self.invoice_details.as_ref(), options)?;
        state.end()
    }
}

/// `payment.refund.failed`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RefundFailedData {
    pub payment_id: String,
    pub refund_id: String,
    pub error: PaymentError,
    pub amount: Money,
    #[serde(default)]
    pub invoice_details: Option<InvoiceDetails>,
}

impl WireFormat for RefundFailedData {
    fn write_wire<S: Serializer>(&self, serializer: S, options: &EncodeOptions) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("RefundFailedData", 5)?;
        state.serialize_field("paymentId", &self.payment_id)?;
        state.serialize_field("refundId", &self.refund_id)?;
        wire::nested(&mut state, "error", &self.error, options)?;
        wire::nested(&mut state, "amount", &self.amount, options)?;
        wire::optional_nested(&mut state, "invoiceDetails", self.invoice_details.as_ref(), options)?;
        state.end()
    }
}
