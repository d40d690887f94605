use serde::Deserialize;

use super::envelope::{CountRepr, ExtractError, typed_field};
use crate::domain::{RequestParams, ResponseEnvelope, TaskEntry};

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
struct TaskJson {
    id: CountRepr,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    status: Option<String>,
}

pub fn decode_list_response(envelope: &ResponseEnvelope) -> Result<Vec<TaskEntry>, ExtractError> {
    let tasks: Vec<TaskJson> = typed_field(envelope, "tasks")?;
    tasks
        .into_iter()
        .map(|task| {
            let id = task.id.into_u64().ok_or(ExtractError::FieldShape {
                field: "tasks",
                reason: "task id is not a non-negative integer".to_owned(),
            })?;
            Ok(TaskEntry {
                id,
                name: task.name,
                status: task.status,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::JoinStyle;
    use crate::transport::envelope::decode_envelope;

    #[test]
    fn encode_delete_params_carries_the_id() {
        let flat = encode_delete_params(11).flatten(JoinStyle::Comma).unwrap();
        assert_eq!(flat, vec![("id".to_owned(), "11".to_owned())]);
    }

    #[test]
    fn decode_list_response_maps_tasks() {
        let envelope = decode_envelope(
            r#"{"status":"success","tasks":[{"id":5,"name":"daily","status":"active"},{"id":6}]}"#,
        )
        .unwrap();

        let tasks = decode_list_response(&envelope).unwrap();
        assert_eq!(tasks.len(), 2);
        assert_eq!(tasks[0].id, 5);
        assert_eq!(tasks[0].name.as_deref(), Some("daily"));
        assert_eq!(tasks[0].status.as_deref(), Some("active"));
        assert_eq!(tasks[1].id, 6);
        assert_eq!(tasks[1].name, None);
    }
}
