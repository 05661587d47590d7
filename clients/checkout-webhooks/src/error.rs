use thiserror::Error;

// Decoders nested inside serde can only report a message, so these phrases
// are shared by the errors raised there and by the classifier below.
const INCONSISTENT_LINE: &str = "inconsistent order line";
const EMPTY_ORDER_ITEMS: &str = "order items must contain at least one line";
const FOREIGN_FIELD: &str = "field belongs to another event: `";

/// Coarse classification of a decode failure.
///
/// Every kind is terminal for the delivery; callers decide whether to
/// leave it unacknowledged or log and drop it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// A required field is missing, duplicated, or a list is empty
    Structural,
    /// The `event` string is not a known event name
    UnrecognizedTag,
    /// Declared order-line totals disagree with the computed ones
    Inconsistency,
    /// A value is present but of the wrong type or outside its domain
    TypeMismatch,
    /// The bytes are not a JSON document
    Syntax,
    /// The body exceeds the configured size limit
    Limit,
}

#[derive(Error, Debug)]
pub enum DecodeError {
    #[error("malformed webhook document: {0}")]
    Malformed(#[source] serde_json::Error),

    #[error("missing required field `{field}`")]
    MissingField { field: String },

    #[error("duplicate field `{field}`")]
    DuplicateField { field: String },

    #[error("incomplete envelope: missing `{0}`")]
    IncompleteEnvelope(&'static str),

    #[error("{message}", message = EMPTY_ORDER_ITEMS)]
    EmptyOrderItems,

    #[error("{prefix}{field}`", prefix = FOREIGN_FIELD)]
    ForeignField { field: String },

    #[error("unrecognized event name `{0}`")]
    UnrecognizedEvent(String),

    #[error("{0}")]
    Inconsistent(String),

    #[error("type mismatch: {0}")]
    TypeMismatch(String),

    #[error("invalid value: {0}")]
    InvalidValue(String),

    #[error("webhook body of {size} bytes exceeds limit of {limit} bytes")]
    TooLarge { size: usize, limit: usize },
}

impl DecodeError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            DecodeError::MissingField { .. }
            | DecodeError::DuplicateField { .. }
            | DecodeError::IncompleteEnvelope(_)
            | DecodeError::EmptyOrderItems
            | DecodeError::ForeignField { .. } => ErrorKind::Structural,
            DecodeError::UnrecognizedEvent(_) => ErrorKind::UnrecognizedTag,
            DecodeError::Inconsistent(_) => ErrorKind::Inconsistency,
            DecodeError::TypeMismatch(_) | DecodeError::InvalidValue(_) => ErrorKind::TypeMismatch,
            DecodeError::Malformed(_) => ErrorKind::Syntax,
            DecodeError::TooLarge { .. } => ErrorKind::Limit,
        }
    }
}

/// Raised inside the order-line decoder and surfaced as
/// [`DecodeError::Inconsistent`] or [`DecodeError::InvalidValue`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum OrderLineError {
    #[error("{prefix} `{reference}`: declared {field} {declared} but computed {computed}", prefix = INCONSISTENT_LINE)]
    Mismatch {
        reference: String,
        field: &'static str,
        declared: i64,
        computed: i64,
    },

    #[error("order line `{reference}` totals overflow")]
    Overflow { reference: String },
}

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("{message}", message = EMPTY_ORDER_ITEMS)]
pub struct EmptyOrderItems;

/// A payload carried a member that only another event kind defines.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("{prefix}{field}`", prefix = FOREIGN_FIELD)]
pub struct ForeignField {
    pub field: &'static str,
}

// serde only hands back a message for errors raised inside nested decoders,
// so the typed variants are recovered from the wording serde and the
// decoders above use.
impl From<serde_json::Error> for DecodeError {
    fn from(err: serde_json::Error) -> Self {
        if !err.is_data() {
            return DecodeError::Malformed(err);
        }

        let message = data_message(&err);

        if let Some(field) = backticked(&message, "missing field `") {
            return DecodeError::MissingField { field };
        }
        if let Some(field) = backticked(&message, "duplicate field `") {
            return DecodeError::DuplicateField { field };
        }
        if let Some(field) = backticked(&message, FOREIGN_FIELD) {
            return DecodeError::ForeignField { field };
        }
        if message.starts_with(INCONSISTENT_LINE) {
            return DecodeError::Inconsistent(message);
        }
        if message == EMPTY_ORDER_ITEMS {
            return DecodeError::EmptyOrderItems;
        }
        if message.starts_with("invalid type:") || message.starts_with("invalid length") {
            return DecodeError::TypeMismatch(message);
        }

        DecodeError::InvalidValue(message)
    }
}

/// The error message without serde_json's trailing position
fn data_message(err: &serde_json::Error) -> String {
    let full = err.to_string();
    let position = format!(" at line {} column {}", err.line(), err.column());
    match full.strip_suffix(&position) {
        Some(message) => message.to_string(),
        None => full,
    }
}

fn backticked(message: &str, prefix: &str) -> Option<String> {
    let rest = message.strip_prefix(prefix)?;
    let end = rest.find('`')?;
    Some(rest[..end].to_string())
}

#[derive(Error, Debug)]
pub enum EncodeError {
    #[error("failed to encode webhook event: {0}")]
    Serialize(#[from] serde_json::Error),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid value for {key}: {value:?}")]
    Invalid { key: &'static str, value: String },
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Deserialize)]
    #[allow(dead_code)]
    struct Probe {
        amount: i64,
        label: String,
    }

    fn probe(json: &str) -> DecodeError {
        DecodeError::from(serde_json::from_str::<Probe>(json).unwrap_err())
    }

    #[test]
    fn test_missing_field_is_structural() {
        let err = probe(r#"{"amount": 5}"#);
        assert!(matches!(&err, DecodeError::MissingField { field } if field == "label"));
        assert_eq!(err.kind(), ErrorKind::Structural);
    }

    #[test]
    fn test_wrong_scalar_type_is_type_mismatch() {
        let err = probe(r#"{"amount": "five", "label": "x"}"#);
        assert!(matches!(err, DecodeError::TypeMismatch(_)));
        assert_eq!(err.kind(), ErrorKind::TypeMismatch);
    }

    #[test]
    fn test_truncated_document_is_syntax() {
        let err = probe(r#"{"amount": 5, "lab"#);
        assert_eq!(err.kind(), ErrorKind::Syntax);
    }

    #[test]
    fn test_position_is_stripped_from_message() {
        let err = probe(r#"{"amount": true, "label": "x"}"#);
        match err {
            DecodeError::TypeMismatch(message) => assert!(!message.contains(" at line ")),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_custom_inconsistency_message_is_recognised() {
        let raised = OrderLineError::Mismatch {
            reference: "sku-1".to_string(),
            field: "grossTotalAmount",
            declared: 5600,
            computed: 5500,
        };
        let json_err = <serde_json::Error as serde::de::Error>::custom(raised);
        let err = DecodeError::from(json_err);
        assert_eq!(err.kind(), ErrorKind::Inconsistency);
        assert!(err.to_string().contains("grossTotalAmount"));
    }

    #[test]
    fn test_custom_empty_items_message_is_recognised() {
        let json_err = <serde_json::Error as serde::de::Error>::custom(EmptyOrderItems);
        assert!(matches!(DecodeError::from(json_err), DecodeError::EmptyOrderItems));
    }

    #[test]
    fn test_custom_foreign_field_message_is_recognised() {
        let json_err = <serde_json::Error as serde::de::Error>::custom(ForeignField { field: "cardDetails" });
        let err = DecodeError::from(json_err);
        assert!(matches!(&err, DecodeError::ForeignField { field } if field == "cardDetails"), "{err}");
        assert_eq!(err.kind(), ErrorKind::Structural);
    }

    #[test]
    fn test_raised_and_classified_messages_agree() {
        assert_eq!(EmptyOrderItems.to_string(), DecodeError::EmptyOrderItems.to_string());
        assert_eq!(
            ForeignField { field: "chargeId" }.to_string(),
            DecodeError::ForeignField {
                field: "chargeId".to_string()
            }
            .to_string()
        );

        let mismatch = OrderLineError::Mismatch {
            reference: "sku-1".to_string(),
            field: "taxAmount",
            declared: 1,
            computed: 2,
        };
        assert!(mismatch.to_string().starts_with(INCONSISTENT_LINE));
        let overflow = OrderLineError::Overflow {
            reference: "sku-1".to_string(),
        };
        assert!(!overflow.to_string().starts_with(INCONSISTENT_LINE));
    }
}
