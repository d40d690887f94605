use serde::Deserialize;

use super::envelope::{CountRepr, ExtractError, typed_field};
use crate::domain::{Contact, NewContact, RequestParams, ResponseEnvelope};

pub fn encode_create_params(contact: &NewContact) -> RequestParams {
    let mut params = RequestParams::new();
    params.push("phone", contact.phone().raw());
    params.push_opt("name", contact.name_value());
    params.push_opt("description", contact.description_value());
    if !contact.tag_values().is_empty() {
        params.push_list("tags", contact.tag_values().iter().map(String::as_str));
    }
    params
}

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
#[serde(untagged)]
enum TagsRepr {
    List(Vec<String>),
    Joined(String),
}

impl TagsRepr {
    fn into_vec(self) -> Vec<String> {
        match self {
            Self::List(tags) => tags,
            Self::Joined(joined) => joined
                .split(',')
                .map(str::trim)
                .filter(|tag| !tag.is_empty())
                .map(str::to_owned)
                .collect(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
struct ContactJson {
    id: CountRepr,
    phone: String,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    tags: Option<TagsRepr>,
}

pub fn decode_list_response(envelope: &ResponseEnvelope) -> Result<Vec<Contact>, ExtractError> {
    let contacts: Vec<ContactJson> = typed_field(envelope, "contacts")?;
    contacts
        .into_iter()
        .map(|contact| {
            let id = contact.id.into_u64().ok_or(ExtractError::FieldShape {
                field: "contacts",
                reason: "contact id is not a non-negative integer".to_owned(),
            })?;
            Ok(Contact {
                id,
                phone: contact.phone,
                name: contact.name,
                description: contact.description,
                tags: contact.tags.map(TagsRepr::into_vec).unwrap_or_default(),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{JoinStyle, RawPhoneNumber};
    use crate::transport::envelope::decode_envelope;

    #[test]
    fn encode_create_params_includes_only_set_fields() {
        let contact = NewContact::new(RawPhoneNumber::new("79251234567").unwrap());
        let flat = encode_create_params(&contact)
            .flatten(JoinStyle::Comma)
            .unwrap();
        assert_eq!(flat, vec![("phone".to_owned(), "79251234567".to_owned())]);

        let contact = NewContact::new(RawPhoneNumber::new("79251234567").unwrap())
            .name("Alice")
            .tags(["vip", "ru"]);
        let flat = encode_create_params(&contact)
            .flatten(JoinStyle::Comma)
            .unwrap();
        assert_eq!(
            flat,
            vec![
                ("phone".to_owned(), "79251234567".to_owned()),
                ("name".to_owned(), "Alice".to_owned()),
                ("tags".to_owned(), "vip,ru".to_owned()),
            ]
        );
    }

    #[test]
    fn encode_update_params_appends_id_last() {
        let mut changes = RequestParams::new();
        changes.push("name", "Bob");

        let flat = encode_update_params(42, changes)
            .flatten(JoinStyle::Comma)
            .unwrap();
        assert_eq!(
            flat,
            vec![
                ("name".to_owned(), "Bob".to_owned()),
                ("id".to_owned(), "42".to_owned()),
            ]
        );
    }

    #[test]
    fn encode_delete_params_carries_the_id() {
        let flat = encode_delete_params(7).flatten(JoinStyle::Comma).unwrap();
        assert_eq!(flat, vec![("id".to_owned(), "7".to_owned())]);
    }

    #[test]
    fn decode_list_response_maps_contacts() {
        let envelope = decode_envelope(
            r#"{
              "status": "success",
              "contacts": [
                {"id": 1, "phone": "79251234567", "name": "Alice", "tags": ["vip"]},
                {"id": "2", "phone": "79251234568", "tags": "a, b"}
              ]
            }"#,
        )
        .unwrap();

        let contacts = decode_list_response(&envelope).unwrap();
        assert_eq!(contacts.len(), 2);
        assert_eq!(contacts[0].id, 1);
        assert_eq!(contacts[0].name.as_deref(), Some("Alice"));
        assert_eq!(contacts[0].tags, vec!["vip".to_owned()]);
        assert_eq!(contacts[1].id, 2);
        assert_eq!(contacts[1].tags, vec!["a".to_owned(), "b".to_owned()]);
    }

    #[test]
    fn decode_list_response_requires_the_field() {
        let envelope = decode_envelope(r#"{"status":"success"}"#).unwrap();
        assert!(matches!(
            decode_list_response(&envelope),
            Err(ExtractError::MissingField { field: "contacts" })
        ));
    }
}
