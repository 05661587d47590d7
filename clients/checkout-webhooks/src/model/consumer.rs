use crate::wire::{self, EncodeOptions, WireFormat};
use serde::de::{self, IgnoredAny, MapAccess, Visitor};
use serde::ser::SerializeStruct;
use serde::{Deserialize, Deserializer, Serializer};
use std::fmt;

// ============================================================================
// CHECKOUT CONSUMER
// ============================================================================

/// Billing or shipping address captured at checkout.
///
/// Older deliveries spell the postcode key `postCode`; the key is matched
/// without regard to case.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Address {
    pub address_line1: Option<String>,
    pub address_line2: Option<String>,
    pub city: Option<String>,
    pub country: Option<String>,
    pub postcode: Option<String>,
    pub receiver_line: Option<String>,
}

enum AddressField {
    AddressLine1,
    AddressLine2,
    City,
    Country,
    Postcode,
    ReceiverLine,
    Ignored,
}

impl<'de> Deserialize<'de> for AddressField {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct FieldVisitor;

        impl<'de> Visitor<'de> for FieldVisitor {
            type Value = AddressField;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("an address field name")
            }

            fn visit_str<E: de::Error>(self, value: &str) -> Result<AddressField, E> {
                Ok(match value {
                    "addressLine1" => AddressField::AddressLine1,
                    "addressLine2" => AddressField::AddressLine2,
                    "city" => AddressField::City,
                    "country" => AddressField::Country,
                    "receiverLine" => AddressField::ReceiverLine,
                    other if other.eq_ignore_ascii_case("postcode") => AddressField::Postcode,
                    _ => AddressField::Ignored,
                })
            }
        }

        deserializer.deserialize_identifier(FieldVisitor)
    }
}

impl<'de> Deserialize<'de> for Address {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct AddressVisitor;

        impl<'de> Visitor<'de> for AddressVisitor {
            type Value = Address;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("an address object")
            }

            fn visit_map<A>(self, mut map: A) -> Result<Address, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut address = Address::default();
                while let Some(field) = map.next_key::<AddressField>()? {
                    let (slot, name) = match field {
                        AddressField::AddressLine1 => (&mut address.address_line1, "addressLine1"),
                        AddressField::AddressLine2 => (&mut address.address_line2, "addressLine2"),
                        AddressField::City => (&mut address.city, "city"),
                        AddressField::Country => (&mut address.country, "country"),
                        AddressField::Postcode => (&mut address.postcode, "postcode"),
                        AddressField::ReceiverLine => (&mut address.receiver_line, "receiverLine"),
                        AddressField::Ignored => {
                            map.next_value::<IgnoredAny>()?;
                            continue;
                        }
                    };
                    if slot.is_some() {
                        return Err(de::Error::duplicate_field(name));
                    }
                    *slot = map.next_value()?;
                }
                Ok(address)
            }
        }

        deserializer.deserialize_map(AddressVisitor)
    }
}

impl WireFormat for Address {
    fn write_wire<S: Serializer>(&self, serializer: S, options: &EncodeOptions) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("Address", 6)?;
        wire::optional_field(&mut state, "addressLine1", self.address_line1.as_ref(), options)?;
        wire::optional_field(&mut state, "addressLine2", self.address_line2.as_ref(), options)?;
        wire::optional_field(&mut state, "city", self.city.as_ref(), options)?;
        wire::optional_field(&mut state, "country", self.country.as_ref(), options)?;
        wire::optional_field(&mut state, "postcode", self.postcode.as_ref(), options)?;
        wire::optional_field(&mut state, "receiverLine", self.receiver_line.as_ref(), options)?;
        state.end()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PhoneNumber {
    pub prefix: String,
    pub number: String,
}

impl WireFormat for PhoneNumber {
    fn write_wire<S: Serializer>(&self, serializer: S, _options: &EncodeOptions) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("PhoneNumber", 2)?;
        state.serialize_field("prefix", &self.prefix)?;
        state.serialize_field("number", &self.number)?;
        state.end()
    }
}

/// The consumer as reported by `payment.checkout.completed`
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutConsumer {
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone_number: Option<PhoneNumber>,
    #[serde(default)]
    pub billing_address: Option<Address>,
    #[serde(default)]
    pub shipping_address: Option<Address>,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub ip: Option<String>,
    #[serde(default)]
    pub merchant_reference: Option<String>,
}

impl WireFormat for CheckoutConsumer {
    fn write_wire<S: Serializer>(&self, serializer: S, options: &EncodeOptions) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("CheckoutConsumer", 9)?;
        wire::optional_field(&mut state, "firstName", self.first_name.as_ref(), options)?;
        wire::optional_field(&mut state, "lastName", self.last_name.as_ref(), options)?;
        wire::optional_nested(&mut state, "billingAddress", self.billing_address.as_ref(), options)?;
        wire::optional_field(&mut state, "country", self.country.as_ref(), options)?;
        wire::optional_field(&mut state, "email", self.email.as_ref(), options)?;
        wire::optional_field(&mut state, "ip", self.ip.as_ref(), options)?;
        wire::optional_nested(&mut state, "phoneNumber", self.phone_number.as_ref(), options)?;
        wire::optional_nested(&mut state, "shippingAddress", self.shipping_address.as_ref(), options)?;
        wire::optional_field(&mut state, "merchantReference", self.merchant_reference.as_ref(), options)?;
        state.end()
    }
}

// ============================================================================
// LEGACY RESERVATION DETAILS
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThreeDSecure {
    pub authentication_enrollment_status: String,
    pub authentication_status: String,
    #[serde(default)]
    pub eci: Option<String>,
}

impl WireFormat for ThreeDSecure {
    fn write_wire<S: Serializer>(&self, serializer: S, options: &EncodeOptions) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("ThreeDSecure", 3)?;
        state.serialize_field("authenticationEnrollmentStatus", &self.authentication_enrollment_status)?;
        state.serialize_field("authenticationStatus", &self.authentication_status)?;
        wire::optional_field(&mut state, "eci", self.eci.as_ref(), options)?;
        state.end()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardDetails {
    pub credit_debit_indicator: String,
    pub expiry_month: u8,
    pub expiry_year: u16,
    pub issuer_country: String,
    pub truncated_pan: String,
    #[serde(default)]
    pub three_d_secure: Option<ThreeDSecure>,
}

impl WireFormat for CardDetails {
    fn write_wire<S: Serializer>(&self, serializer: S, options: &EncodeOptions) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("CardDetails", 6)?;
        state.serialize_field("creditDebitIndicator", &self.credit_debit_indicator)?;
        state.serialize_field("expiryMonth", &self.expiry_month)?;
        state.serialize_field("expiryYear", &self.expiry_year)?;
        state.serialize_field("issuerCountry", &self.issuer_country)?;
        state.serialize_field("truncatedPan", &self.truncated_pan)?;
        wire::optional_nested(&mut state, "threeDSecure", self.three_d_secure.as_ref(), options)?;
        state.end()
    }
}

/// The consumer as reported by the legacy reservation event: only the IP
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ReservationConsumer {
    pub ip: String,
}

impl WireFormat for ReservationConsumer {
    fn write_wire<S: Serializer>(&self, serializer: S, _options: &EncodeOptions) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("ReservationConsumer", 1)?;
        state.serialize_field("ip", &self.ip)?;
        state.end()
    }
}
