use crate::wire::{self, EncodeOptions, WireFormat};
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::de::{self, Visitor};
use serde::ser::SerializeStruct;
use serde::{Deserialize, Deserializer, Serializer};
use std::fmt;

/// Failure details attached to failed charges, refunds, cancellations and
/// reservations. All free text.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
pub struct PaymentError {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub source: Option<String>,
}

impl WireFormat for PaymentError {
    fn write_wire<S: Serializer>(&self, serializer: S, options: &EncodeOptions) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("PaymentError", 3)?;
        wire::optional_field(&mut state, "code", self.code.as_ref(), options)?;
        wire::optional_field(&mut state, "message", self.message.as_ref(), options)?;
        wire::optional_field(&mut state, "source", self.source.as_ref(), options)?;
        state.end()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceDetails {
    pub distribution_type: String,
    #[serde(deserialize_with = "deserialize_due_date")]
    pub invoice_due_date: NaiveDate,
    pub invoice_number: String,
}

/// Due dates are written as midnight local time in this format
const DUE_DATE_WIRE_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

impl WireFormat for InvoiceDetails {
    fn write_wire<S: Serializer>(&self, serializer: S, _options: &EncodeOptions) -> Result<S::Ok, S::Error> {
        let due = self
            .invoice_due_date
            .and_time(NaiveTime::MIN)
            .format(DUE_DATE_WIRE_FORMAT)
            .to_string();

        let mut state = serializer.serialize_struct("InvoiceDetails", 3)?;
        state.serialize_field("distributionType", &self.distribution_type)?;
        state.serialize_field("invoiceDueDate", &due)?;
        state.serialize_field("invoiceNumber", &self.invoice_number)?;
        state.end()
    }
}

struct DueDateVisitor;

impl<'de> Visitor<'de> for DueDateVisitor {
    type Value = NaiveDate;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a calendar date, optionally with a time of day")
    }

    fn visit_str<E: de::Error>(self, value: &str) -> Result<NaiveDate, E> {
        NaiveDate::parse_from_str(value, "%Y-%m-%d")
            .or_else(|_| NaiveDateTime::parse_from_str(value, DUE_DATE_WIRE_FORMAT).map(|dt| dt.date()))
            .or_else(|_| NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f").map(|dt| dt.date()))
            .map_err(|_| E::invalid_value(de::Unexpected::Str(value), &self))
    }
}

fn deserialize_due_date<'de, D>(deserializer: D) -> Result<NaiveDate, D::Error>
where
    D: Deserializer<'de>,
{
    deserializer.deserialize_str(DueDateVisitor)
}
