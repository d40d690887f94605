use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::domain::{ResponseEnvelope, Status};

#[derive(Debug, thiserror::Error)]
/// Failure to decode the response body into a [`ResponseEnvelope`].
///
/// Distinct from transport failures and from logical API errors: the bytes
/// arrived, but they are not the JSON object the gateway promises.
pub enum EnvelopeError {
    #[error("invalid JSON response: {0}")]
    Json(#[from] serde_json::Error),

    #[error("response is not a JSON object")]
    NotAnObject,

    #[error("response is missing the status field")]
    MissingStatus,

    #[error("response status is neither \"success\" nor \"error\": {value}")]
    UnknownStatus { value: String },
}

#[derive(Debug, thiserror::Error)]
/// Failure to extract a typed payload field from a success envelope.
pub enum ExtractError {
    #[error("response field {field} is missing")]
    MissingField { field: &'static str },

    #[error("response field {field} has unexpected shape: {reason}")]
    FieldShape { field: &'static str, reason: String },
}

/// Decode a raw response body into an envelope.
///
/// The body must be a JSON object whose `status` field holds one of the two
/// literals; everything else is kept as-is for the caller.
pub fn decode_envelope(body: &str) -> Result<ResponseEnvelope, EnvelopeError> {
    let value: Value = serde_json::from_str(body)?;
    let Value::Object(mut fields) = value else {
        return Err(EnvelopeError::NotAnObject);
    };

    let status = match fields.remove("status") {
        None => return Err(EnvelopeError::MissingStatus),
        Some(Value::String(literal)) => match literal.as_str() {
            "success" => Status::Success,
            "error" => Status::Error,
            _ => return Err(EnvelopeError::UnknownStatus { value: literal }),
        },
        Some(other) => {
            return Err(EnvelopeError::UnknownStatus {
                value: other.to_string(),
            });
        }
    };

    Ok(ResponseEnvelope::new(status, fields))
}

/// Deserialize a payload field into `T`.
pub fn typed_field<T: DeserializeOwned>(
    envelope: &ResponseEnvelope,
    field: &'static str,
) -> Result<T, ExtractError> {
    let value = envelope
        .field(field)
        .ok_or(ExtractError::MissingField { field })?;
    serde_json::from_value(value.clone()).map_err(|err| ExtractError::FieldShape {
        field,
        reason: err.to_string(),
    })
}

/// Extract a money-like field the gateway renders as JSON number or string.
pub fn money_field(envelope: &ResponseEnvelope, field: &'static str) -> Result<f64, ExtractError> {
    let repr: MoneyRepr = typed_field(envelope, field)?;
    repr.into_f64().ok_or_else(|| ExtractError::FieldShape {
        field,
        reason: "expected a decimal number or numeric string".to_owned(),
    })
}

/// Extract a count/id field the gateway renders as JSON number or string.
pub fn count_field(envelope: &ResponseEnvelope, field: &'static str) -> Result<u64, ExtractError> {
    let repr: CountRepr = typed_field(envelope, field)?;
    repr.into_u64().ok_or_else(|| ExtractError::FieldShape {
        field,
        reason: "expected a non-negative integer or numeric string".to_owned(),
    })
}

/// Extract a plain string field.
pub fn string_field(
    envelope: &ResponseEnvelope,
    field: &'static str,
) -> Result<String, ExtractError> {
    typed_field(envelope, field)
}

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
/// Money-like value: JSON number or numeric string.
pub(crate) enum MoneyRepr {
    Number(f64),
    Text(String),
}

impl MoneyRepr {
    pub(crate) fn into_f64(self) -> Option<f64> {
        match self {
            Self::Number(value) => Some(value),
            Self::Text(value) => value.trim().parse::<f64>().ok(),
        }
    }

    pub(crate) fn into_string(self) -> String {
        match self {
            Self::Number(value) => value.to_string(),
            Self::Text(value) => value,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
/// Count/id value: JSON integer or numeric string.
pub(crate) enum CountRepr {
    Number(u64),
    Text(String),
}

impl CountRepr {
    pub(crate) fn into_u64(self) -> Option<u64> {
        match self {
            Self::Number(value) => Some(value),
            Self::Text(value) => value.trim().parse::<u64>().ok(),
        }
    }
}
