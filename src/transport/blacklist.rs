use serde::Deserialize;

use super::envelope::{CountRepr, ExtractError, typed_field};
use crate::domain::{BlacklistEntry, RawPhoneNumber, RequestParams, ResponseEnvelope};

pub fn encode_append_params(
    phones: &[RawPhoneNumber],
    description: Option<&str>,
) -> RequestParams {
    let mut params = RequestParams::new();
    params.push_list("phones", phones.iter().map(RawPhoneNumber::raw));
    params.push_opt("description", description);
    params
}

pub fn encode_delete_params(phones: &[RawPhoneNumber]) -> RequestParams {
    let mut params = RequestParams::new();
    params.push_list("phones", phones.iter().map(RawPhoneNumber::raw));
    params
}

#[derive(Debug, Clone, Deserialize)]
struct BlacklistEntryJson {
    id: CountRepr,
    phone: String,
    #[serde(default)]
    description: Option<String>,
}

pub fn decode_list_response(
    envelope: &ResponseEnvelope,
) -> Result<Vec<BlacklistEntry>, ExtractError> {
    let entries: Vec<BlacklistEntryJson> = typed_field(envelope, "list")?;
    entries
        .into_iter()
        .map(|entry| {
            let id = entry.id.into_u64().ok_or(ExtractError::FieldShape {
                field: "list",
                reason: "blacklist entry id is not a non-negative integer".to_owned(),
            })?;
            Ok(BlacklistEntry {
                id,
                phone: entry.phone,
                description: entry.description,
            })
        })
        .collect()
}
