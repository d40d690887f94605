use serde::Deserialize;

use super::envelope::{CountRepr, ExtractError, typed_field};
use crate::domain::{RequestParams, ResponseEnvelope, Tag};

pub fn encode_update_params(id: u64, changes: RequestParams) -> RequestParams {
    let mut params = changes;
    params.push("id", id.to_string());
    params
}

pub fn encode_delete_params(id: u64) -> RequestParams {
    let mut params = RequestParams::new();
    params.push("id", id.to_string());
    params
}

#[derive(Debug, Clone, Deserialize)]
struct TagJson {
    id: CountRepr,
    name: String,
}

pub fn decode_list_response(envelope: &ResponseEnvelope) -> Result<Vec<Tag>, ExtractError> {
    let tags: Vec<TagJson> = typed_field(envelope, "tags")?;
    tags.into_iter()
        .map(|tag| {
            let id = tag.id.into_u64().ok_or(ExtractError::FieldShape {
                field: "tags",
                reason: "tag id is not a non-negative integer".to_owned(),
            })?;
            Ok(Tag { id, name: tag.name })
        })
        .collect()
}
