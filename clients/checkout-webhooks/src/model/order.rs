use crate::error::{EmptyOrderItems, OrderLineError};
use crate::model::Money;
use crate::wire::{self, EncodeOptions, WireFormat};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::de;
use serde::ser::{Error as _, SerializeStruct};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Number;
use std::ops::Deref;
use std::str::FromStr;

/// Tax rates are expressed in basis points: 2500 is 25 %.
const BASIS_POINTS: i64 = 10_000;

/// One purchased line.
///
/// The tax, net and gross totals are always computed from quantity, unit
/// price and tax rate. Values declared on the wire are only compared against
/// them.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(try_from = "OrderLineWire")]
pub struct OrderLine {
    reference: String,
    name: String,
    quantity: Decimal,
    unit: String,
    unit_price: i64,
    tax_rate: Option<i64>,
    tax_amount: i64,
    net_total_amount: i64,
    gross_total_amount: i64,
}

impl OrderLine {
    pub fn new(
        reference: impl Into<String>,
        name: impl Into<String>,
        quantity: Decimal,
        unit: impl Into<String>,
        unit_price: i64,
        tax_rate: Option<i64>,
    ) -> Result<Self, OrderLineError> {
        let reference = reference.into();
        let overflow = || OrderLineError::Overflow {
            reference: reference.clone(),
        };

        let net = quantity
            .checked_mul(Decimal::from(unit_price))
            .and_then(round_to_minor)
            .ok_or_else(overflow)?;

        let tax = match tax_rate {
            Some(rate) => Decimal::from(net)
                .checked_mul(Decimal::from(rate))
                .and_then(|scaled| scaled.checked_div(Decimal::from(BASIS_POINTS)))
                .and_then(round_to_minor)
                .ok_or_else(overflow)?,
            None => 0,
        };

        let gross = net.checked_add(tax).ok_or_else(overflow)?;

        Ok(Self {
            reference,
            name: name.into(),
            quantity,
            unit: unit.into(),
            unit_price,
            tax_rate,
            tax_amount: tax,
            net_total_amount: net,
            gross_total_amount: gross,
        })
    }

    pub fn reference(&self) -> &str {
        &self.reference
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn quantity(&self) -> Decimal {
        self.quantity
    }

    pub fn unit(&self) -> &str {
        &self.unit
    }

    pub fn unit_price(&self) -> i64 {
        self.unit_price
    }

    pub fn tax_rate(&self) -> Option<i64> {
        self.tax_rate
    }

    pub fn tax_amount(&self) -> i64 {
        self.tax_amount
    }

    pub fn net_total_amount(&self) -> i64 {
        self.net_total_amount
    }

    pub fn gross_total_amount(&self) -> i64 {
        self.gross_total_amount
    }

    fn check_declared(&self, field: &'static str, declared: Option<i64>, computed: i64) -> Result<(), OrderLineError> {
        match declared {
            Some(declared) if declared != computed => Err(OrderLineError::Mismatch {
                reference: self.reference.clone(),
                field,
                declared,
                computed,
            }),
            _ => Ok(()),
        }
    }
}

fn round_to_minor(value: Decimal) -> Option<i64> {
    value
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_i64()
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct OrderLineWire {
    reference: String,
    name: String,
    #[serde(deserialize_with = "deserialize_quantity")]
    quantity: Decimal,
    unit: String,
    unit_price: i64,
    #[serde(default)]
    tax_rate: Option<i64>,
    #[serde(default)]
    tax_amount: Option<i64>,
    #[serde(default)]
    net_total_amount: Option<i64>,
    #[serde(default)]
    gross_total_amount: Option<i64>,
}

impl TryFrom<OrderLineWire> for OrderLine {
    type Error = OrderLineError;

    fn try_from(wire: OrderLineWire) -> Result<Self, Self::Error> {
        let line = OrderLine::new(
            wire.reference,
            wire.name,
            wire.quantity,
            wire.unit,
            wire.unit_price,
            wire.tax_rate,
        )?;

        line.check_declared("netTotalAmount", wire.net_total_amount, line.net_total_amount)?;
        line.check_declared("taxAmount", wire.tax_amount, line.tax_amount)?;
        line.check_declared("grossTotalAmount", wire.gross_total_amount, line.gross_total_amount)?;

        Ok(line)
    }
}

/// Quantities are read from the number's text as written, never through a float.
fn deserialize_quantity<'de, D>(deserializer: D) -> Result<Decimal, D::Error>
where
    D: Deserializer<'de>,
{
    let number = Number::deserialize(deserializer)?;
    let text = number.to_string();
    Decimal::from_str(&text)
        .or_else(|_| Decimal::from_scientific(&text))
        .map_err(|_| de::Error::invalid_value(de::Unexpected::Other(&text), &"a decimal quantity"))
}

struct Quantity<'a>(&'a Decimal);

impl Serialize for Quantity<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        if self.0.fract().is_zero() {
            if let Some(whole) = self.0.to_i64() {
                return serializer.serialize_i64(whole);
            }
        }
        let number = Number::from_str(&self.0.normalize().to_string())
            .map_err(|_| S::Error::custom(format!("quantity {} is not representable", self.0)))?;
        number.serialize(serializer)
    }
}

impl WireFormat for OrderLine {
    fn write_wire<S: Serializer>(&self, serializer: S, options: &EncodeOptions) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("OrderLine", 9)?;
        state.serialize_field("reference", &self.reference)?;
        state.serialize_field("name", &self.name)?;
        state.serialize_field("quantity", &Quantity(&self.quantity))?;
        state.serialize_field("unit", &self.unit)?;
        state.serialize_field("unitPrice", &self.unit_price)?;
        wire::optional_field(&mut state, "taxRate", self.tax_rate.as_ref(), options)?;
        state.serialize_field("taxAmount", &self.tax_amount)?;
        state.serialize_field("grossTotalAmount", &self.gross_total_amount)?;
        state.serialize_field("netTotalAmount", &self.net_total_amount)?;
        state.end()
    }
}

/// A non-empty list of order lines
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(try_from = "Vec<OrderLine>")]
pub struct OrderItems(Vec<OrderLine>);

impl OrderItems {
    pub fn new(lines: Vec<OrderLine>) -> Result<Self, EmptyOrderItems> {
        Self::try_from(lines)
    }

    /// Sum of the lines' gross totals, `None` on overflow
    pub fn gross_total(&self) -> Option<i64> {
        self.0
            .iter()
            .try_fold(0i64, |sum, line| sum.checked_add(line.gross_total_amount))
    }

    pub fn into_inner(self) -> Vec<OrderLine> {
        self.0
    }
}

impl TryFrom<Vec<OrderLine>> for OrderItems {
    type Error = EmptyOrderItems;

    fn try_from(lines: Vec<OrderLine>) -> Result<Self, Self::Error> {
        if lines.is_empty() {
            return Err(EmptyOrderItems);
        }
        Ok(Self(lines))
    }
}

impl Deref for OrderItems {
    type Target = [OrderLine];

    fn deref(&self) -> &[OrderLine] {
        &self.0
    }
}

impl WireFormat for OrderItems {
    fn write_wire<S: Serializer>(&self, serializer: S, options: &EncodeOptions) -> Result<S::Ok, S::Error> {
        self.0.as_slice().write_wire(serializer, options)
    }
}

/// The order shared by payment-created, checkout-completed and
/// reservation-created events
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub amount: Money,
    pub reference: String,
    pub order_items: OrderItems,
}

impl WireFormat for Order {
    fn write_wire<S: Serializer>(&self, serializer: S, options: &EncodeOptions) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("Order", 3)?;
        wire::nested(&mut state, "amount", &self.amount, options)?;
        state.serialize_field("reference", &self.reference)?;
        wire::nested(&mut state, "orderItems", &self.order_items, options)?;
        state.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{DecodeError, ErrorKind};
    use crate::wire::{NullPolicy, Wire};
    use serde_json::json;

    fn decode_line(value: serde_json::Value) -> Result<OrderLine, DecodeError> {
        serde_json::from_value(value).map_err(DecodeError::from)
    }

    fn sneaker_line() -> serde_json::Value {
        json!({
            "reference": "Sneaky NE2816-82",
            "name": "Sneaky",
            "quantity": 2,
            "unit": "pcs",
            "unitPrice": 2500,
            "taxRate": 1000,
            "taxAmount": 500,
            "grossTotalAmount": 5500,
            "netTotalAmount": 5000
        })
    }

    #[test]
    fn test_totals_are_computed() {
        let line = OrderLine::new("sku", "Sneaky", Decimal::from(2), "pcs", 2500, Some(1000)).unwrap();
        assert_eq!(line.net_total_amount(), 5000);
        assert_eq!(line.tax_amount(), 500);
        assert_eq!(line.gross_total_amount(), 5500);
    }

    #[test]
    fn test_missing_tax_rate_means_no_tax() {
        let line = OrderLine::new("sku", "Gift card", Decimal::from(1), "pcs", 10000, None).unwrap();
        assert_eq!(line.tax_amount(), 0);
        assert_eq!(line.gross_total_amount(), 10000);
    }

    #[test]
    fn test_fractional_quantity_rounds_half_away_from_zero() {
        // 1.5 * 333 = 499.5
        let line = OrderLine::new("sku", "Cheese", Decimal::new(15, 1), "kg", 333, Some(2500)).unwrap();
        assert_eq!(line.net_total_amount(), 500);
        assert_eq!(line.tax_amount(), 125);
        assert_eq!(line.gross_total_amount(), 625);
    }

    #[test]
    fn test_gross_is_net_plus_tax_across_inputs() {
        for quantity in [Decimal::new(1, 0), Decimal::new(25, 1), Decimal::new(333, 2), Decimal::new(7, 0)] {
            for unit_price in [1, 99, 2500, 123_457] {
                for tax_rate in [None, Some(0), Some(600), Some(1200), Some(2500)] {
                    let line = OrderLine::new("sku", "x", quantity, "pcs", unit_price, tax_rate).unwrap();
                    assert_eq!(
                        line.gross_total_amount(),
                        line.net_total_amount() + line.tax_amount()
                    );
                }
            }
        }
    }

    #[test]
    fn test_overflow_is_reported() {
        let err = OrderLine::new("sku", "x", Decimal::from(i64::MAX), "pcs", i64::MAX, None).unwrap_err();
        assert_eq!(err, OrderLineError::Overflow { reference: "sku".to_string() });
    }

    #[test]
    fn test_decode_line_with_consistent_totals() {
        let line = decode_line(sneaker_line()).unwrap();
        assert_eq!(line.reference(), "Sneaky NE2816-82");
        assert_eq!(line.quantity(), Decimal::from(2));
        assert_eq!(line.gross_total_amount(), 5500);
    }

    #[test]
    fn test_decode_line_without_declared_totals() {
        let mut raw = sneaker_line();
        let object = raw.as_object_mut().unwrap();
        object.remove("taxAmount");
        object.remove("grossTotalAmount");
        object.remove("netTotalAmount");
        let line = decode_line(raw).unwrap();
        assert_eq!(line.tax_amount(), 500);
    }

    #[test]
    fn test_wrong_gross_total_is_inconsistent() {
        let mut raw = sneaker_line();
        raw["grossTotalAmount"] = json!(5600);
        let err = decode_line(raw).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Inconsistency);
        assert!(err.to_string().contains("grossTotalAmount"));
    }

    #[test]
    fn test_wrong_tax_amount_is_inconsistent() {
        let mut raw = sneaker_line();
        raw["taxAmount"] = json!(499);
        let err = decode_line(raw).unwrap_err();
        assert!(matches!(err, DecodeError::Inconsistent(_)));
    }

    #[test]
    fn test_fractional_quantity_is_decoded_exactly() {
        let mut raw = sneaker_line();
        raw["quantity"] = json!(1.5);
        raw.as_object_mut().unwrap().remove("taxAmount");
        raw.as_object_mut().unwrap().remove("grossTotalAmount");
        raw.as_object_mut().unwrap().remove("netTotalAmount");
        let line = decode_line(raw).unwrap();
        assert_eq!(line.quantity(), Decimal::new(15, 1));
        assert_eq!(line.net_total_amount(), 3750);
    }

    #[test]
    fn test_quantity_keeps_every_written_digit() {
        // Seventeen significant digits; the nearest double is 2.5
        let raw = r#"{"reference":"q","name":"Bolt","quantity":2.4999999999999999,"unit":"pcs","unitPrice":1,"netTotalAmount":2}"#;
        let line: OrderLine = serde_json::from_str(raw).unwrap();
        assert_eq!(line.quantity(), Decimal::from_str("2.4999999999999999").unwrap());
        assert_eq!(line.net_total_amount(), 2);
    }

    #[test]
    fn test_quantity_beyond_double_precision_round_trips() {
        let raw = r#"{"reference":"q","name":"Wire","quantity":0.12345678901234567890123,"unit":"m","unitPrice":100000}"#;
        let line: OrderLine = serde_json::from_str(raw).unwrap();
        assert_eq!(line.quantity(), Decimal::from_str("0.12345678901234567890123").unwrap());
        assert_eq!(line.net_total_amount(), 12346);

        let options = EncodeOptions::default();
        let json = serde_json::to_string(&Wire::new(&line, &options)).unwrap();
        assert!(json.contains(r#""quantity":0.12345678901234567890123"#), "{json}");
    }

    #[test]
    fn test_exponent_quantity_is_accepted() {
        let raw = r#"{"reference":"q","name":"Sand","quantity":2.5e1,"unit":"kg","unitPrice":4}"#;
        let line: OrderLine = serde_json::from_str(raw).unwrap();
        assert_eq!(line.quantity(), Decimal::from(25));
        assert_eq!(line.net_total_amount(), 100);
    }

    #[test]
    fn test_string_quantity_is_type_mismatch() {
        let mut raw = sneaker_line();
        raw["quantity"] = json!("2");
        let err = decode_line(raw).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::TypeMismatch);
    }

    #[test]
    fn test_missing_unit_price_names_field() {
        let mut raw = sneaker_line();
        raw.as_object_mut().unwrap().remove("unitPrice");
        let err = decode_line(raw).unwrap_err();
        assert!(matches!(err, DecodeError::MissingField { field } if field == "unitPrice"));
    }

    #[test]
    fn test_empty_items_are_rejected() {
        let err = serde_json::from_value::<OrderItems>(json!([]))
            .map_err(DecodeError::from)
            .unwrap_err();
        assert!(matches!(err, DecodeError::EmptyOrderItems));
        assert!(OrderItems::new(Vec::new()).is_err());
    }

    #[test]
    fn test_items_gross_total() {
        let items: OrderItems = serde_json::from_value(json!([sneaker_line(), sneaker_line()])).unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items.gross_total(), Some(11000));
    }

    #[test]
    fn test_encode_line_writes_computed_totals() {
        let line = OrderLine::new("sku", "Sneaky", Decimal::from(2), "pcs", 2500, Some(1000)).unwrap();
        let options = EncodeOptions::default();
        let value = serde_json::to_value(Wire::new(&line, &options)).unwrap();
        assert_eq!(value["quantity"], json!(2));
        assert_eq!(value["taxAmount"], json!(500));
        assert_eq!(value["netTotalAmount"], json!(5000));
        assert_eq!(value["grossTotalAmount"], json!(5500));
    }

    #[test]
    fn test_encode_fractional_quantity_as_number() {
        let line = OrderLine::new("sku", "Cheese", Decimal::new(15, 1), "kg", 100, None).unwrap();
        let options = EncodeOptions::new(NullPolicy::Emit);
        let value = serde_json::to_value(Wire::new(&line, &options)).unwrap();
        assert_eq!(value["quantity"], json!(1.5));
        assert_eq!(value["taxRate"], serde_json::Value::Null);
    }

    #[test]
    fn test_line_survives_encode_then_decode() {
        let line = OrderLine::new("sku", "Cheese", Decimal::new(125, 2), "kg", 1999, Some(1200)).unwrap();
        let options = EncodeOptions::default();
        let json = serde_json::to_string(&Wire::new(&line, &options)).unwrap();
        let decoded: OrderLine = serde_json::from_str(&json).unwrap();
        assert_eq!(decoded, line);
    }
}
