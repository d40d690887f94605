use serde::Deserialize;

use super::envelope::{CountRepr, ExtractError, typed_field};
use crate::domain::{Bulk, RequestParams, ResponseEnvelope};

pub fn encode_update_params(id: u64, changes: RequestParams) -> RequestParams {
    let mut params = changes;
    params.push("id", id.to_string());
    params
}

pub fn encode_id_params(id: u64) -> RequestParams {
    let mut params = RequestParams::new();
    params.push("id", id.to_string());
    params
}

#[derive(Debug, Clone, Deserialize)]
struct BulkJson {
    id: CountRepr,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    status: Option<String>,
    #[serde(default)]
    count: Option<CountRepr>,
}

pub fn decode_list_response(envelope: &ResponseEnvelope) -> Result<Vec<Bulk>, ExtractError> {
    let bulks: Vec<BulkJson> = typed_field(envelope, "bulks")?;
    bulks
        .into_iter()
        .map(|bulk| {
            let id = bulk.id.into_u64().ok_or(ExtractError::FieldShape {
                field: "bulks",
                reason: "bulk id is not a non-negative integer".to_owned(),
            })?;
            Ok(Bulk {
                id,
                name: bulk.name,
                status: bulk.status,
                count: bulk.count.and_then(CountRepr::into_u64),
            })
        })
        .collect()
}
