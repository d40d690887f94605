use serde::Deserialize;

use super::envelope::{CountRepr, ExtractError, typed_field};
use crate::domain::{RequestParams, ResponseEnvelope, SenderName};

pub fn encode_confirm_params(id: u64, code: &str) -> RequestParams {
    let mut params = RequestParams::new();
    params.push("id", id.to_string());
    params.push("code", code);
    params
}

pub fn encode_default_params(id: u64) -> RequestParams {
    let mut params = RequestParams::new();
    params.push("id", id.to_string());
    params
}

pub fn encode_delete_params(id: u64) -> RequestParams {
    let mut params = RequestParams::new();
    params.push("id", id.to_string());
    params
}

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum FlagRepr {
    Bool(bool),
    Number(u64),
    Text(String),
}

impl FlagRepr {
    fn into_bool(self) -> bool {
        match self {
            Self::Bool(value) => value,
            Self::Number(value) => value != 0,
            Self::Text(value) => matches!(value.trim(), "1" | "true"),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
struct SenderJson {
    id: CountRepr,
    name: String,
    #[serde(default)]
    status: Option<String>,
    #[serde(default)]
    default: Option<FlagRepr>,
}

pub fn decode_list_response(envelope: &ResponseEnvelope) -> Result<Vec<SenderName>, ExtractError> {
    let senders: Vec<SenderJson> = typed_field(envelope, "list")?;
    senders
        .into_iter()
        .map(|sender| {
            let id = sender.id.into_u64().ok_or(ExtractError::FieldShape {
                field: "list",
                reason: "sender id is not a non-negative integer".to_owned(),
            })?;
            Ok(SenderName {
                id,
                name: sender.name,
                status: sender.status,
                default: sender.default.map(FlagRepr::into_bool).unwrap_or(false),
            })
        })
        .collect()
}
