use std::collections::BTreeMap;

use serde::Deserialize;

use super::envelope::{CountRepr, ExtractError, MoneyRepr, money_field, typed_field};
use crate::domain::{
    DeliveryStatus, MessageId, MessageRecord, MessageText, MessageType, RawPhoneNumber,
    RequestParams, ResponseEnvelope, SendMessage, SenderId,
};

pub fn encode_send_params(request: &SendMessage, test_mode: bool) -> RequestParams {
    let mut params = RequestParams::new();
    params.push_list(
        RawPhoneNumber::FIELD,
        request.recipients().iter().map(RawPhoneNumber::raw),
    );
    params.push(MessageText::FIELD, request.message().as_str());

    let options = request.options();
    params.push_opt(SenderId::FIELD, options.sender.as_ref().map(SenderId::as_str));
    params.push(MessageType::FIELD, options.message_type.wire_value());
    if test_mode {
        params.push("test", "1");
    }
    params.extend(options.extra.clone());
    params
}

pub fn encode_status_params(ids: &[MessageId]) -> RequestParams {
    let mut params = RequestParams::new();
    params.push_list(MessageId::FIELD, ids.iter().map(MessageId::as_str));
    params
}

pub fn encode_price_params(recipients: &[RawPhoneNumber], message: &MessageText) -> RequestParams {
    let mut params = RequestParams::new();
    params.push_list(
        RawPhoneNumber::FIELD,
        recipients.iter().map(RawPhoneNumber::raw),
    );
    params.push(MessageText::FIELD, message.as_str());
    params
}

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum IdRepr {
    Number(u64),
    Text(String),
}

impl IdRepr {
    fn into_message_id(self, field: &'static str) -> Result<MessageId, ExtractError> {
        let raw = match self {
            Self::Number(value) => value.to_string(),
            Self::Text(value) => value,
        };
        MessageId::new(raw).map_err(|err| ExtractError::FieldShape {
            field,
            reason: err.to_string(),
        })
    }
}

pub fn decode_send_response(envelope: &ResponseEnvelope) -> Result<Vec<MessageId>, ExtractError> {
    let ids: Vec<IdRepr> = typed_field(envelope, MessageId::FIELD)?;
    ids.into_iter()
        .map(|id| id.into_message_id(MessageId::FIELD))
        .collect()
}

pub fn decode_status_response(
    envelope: &ResponseEnvelope,
) -> Result<BTreeMap<MessageId, DeliveryStatus>, ExtractError> {
    let messages: BTreeMap<String, String> = typed_field(envelope, "messages")?;
    messages
        .into_iter()
        .map(|(key, label)| {
            let id = MessageId::new(key).map_err(|err| ExtractError::FieldShape {
                field: "messages",
                reason: err.to_string(),
            })?;
            Ok((id, DeliveryStatus::from_label(&label)))
        })
        .collect()
}

pub fn decode_price_response(envelope: &ResponseEnvelope) -> Result<f64, ExtractError> {
    money_field(envelope, "price")
}

#[derive(Debug, Clone, Deserialize)]
struct MessageRecordJson {
    id: CountRepr,
    #[serde(default)]
    recipient: Option<String>,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    status: Option<String>,
    #[serde(default)]
    price: Option<MoneyRepr>,
    #[serde(default)]
    created_at: Option<String>,
}

pub fn decode_list_response(
    envelope: &ResponseEnvelope,
) -> Result<Vec<MessageRecord>, ExtractError> {
    let records: Vec<MessageRecordJson> = typed_field(envelope, "list")?;
    records
        .into_iter()
        .map(|record| {
            let id = record.id.into_u64().ok_or(ExtractError::FieldShape {
                field: "list",
                reason: "message id is not a non-negative integer".to_owned(),
            })?;
            Ok(MessageRecord {
                id,
                recipient: record.recipient,
                message: record.message,
                status: record.status,
                price: record.price.map(MoneyRepr::into_string),
                created_at: record.created_at,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{JoinStyle, SendOptions};
    use crate::transport::envelope::decode_envelope;

    fn phone(raw: &str) -> RawPhoneNumber {
        RawPhoneNumber::new(raw).unwrap()
    }

    #[test]
    fn encode_send_params_in_wire_order() {
        let request = SendMessage::new(
            vec![phone("79251234567"), phone("79251234568")],
            MessageText::new("hello").unwrap(),
            SendOptions {
                sender: Some(SenderId::new("MyShop").unwrap()),
                ..Default::default()
            },
        )
        .unwrap();

        let flat = encode_send_params(&request, false)
            .flatten(JoinStyle::Comma)
            .unwrap();
        assert_eq!(
            flat,
            vec![
                (
                    "recipients".to_owned(),
                    "79251234567,79251234568".to_owned()
                ),
                ("message".to_owned(), "hello".to_owned()),
                ("sender".to_owned(), "MyShop".to_owned()),
                ("type".to_owned(), "0".to_owned()),
            ]
        );
    }

    #[test]
    fn encode_send_params_appends_test_flag_in_test_mode() {
        let request = SendMessage::new(
            vec![phone("79251234567")],
            MessageText::new("hello").unwrap(),
            SendOptions::default(),
        )
        .unwrap();

        let flat = encode_send_params(&request, true)
            .flatten(JoinStyle::Comma)
            .unwrap();
        assert!(flat.contains(&("test".to_owned(), "1".to_owned())));

        let flat = encode_send_params(&request, false)
            .flatten(JoinStyle::Comma)
            .unwrap();
        assert!(!flat.iter().any(|(name, _)| name == "test"));
    }

    #[test]
    fn encode_send_params_forwards_extras_after_named_fields() {
        let mut extra = RequestParams::new();
        extra.push("delay", "60");

        let request = SendMessage::new(
            vec![phone("79251234567")],
            MessageText::new("hello").unwrap(),
            SendOptions {
                message_type: MessageType::Flash,
                extra,
                ..Default::default()
            },
        )
        .unwrap();

        let flat = encode_send_params(&request, false)
            .flatten(JoinStyle::Comma)
            .unwrap();
        assert_eq!(
            flat,
            vec![
                ("recipients".to_owned(), "79251234567".to_owned()),
                ("message".to_owned(), "hello".to_owned()),
                ("type".to_owned(), "1".to_owned()),
                ("delay".to_owned(), "60".to_owned()),
            ]
        );
    }

    #[test]
    fn encode_status_params_joins_ids() {
        let ids = vec![
            MessageId::new("101").unwrap(),
            MessageId::new("102").unwrap(),
        ];
        let flat = encode_status_params(&ids).flatten(JoinStyle::Comma).unwrap();
        assert_eq!(flat, vec![("messages_id".to_owned(), "101,102".to_owned())]);
    }

    #[test]
    fn decode_send_response_accepts_numeric_and_string_ids() {
        let envelope =
            decode_envelope(r#"{"status":"success","messages_id":[101,"102"]}"#).unwrap();
        let ids = decode_send_response(&envelope).unwrap();
        assert_eq!(
            ids,
            vec![
                MessageId::new("101").unwrap(),
                MessageId::new("102").unwrap()
            ]
        );
    }

    #[test]
    fn decode_send_response_requires_the_field() {
        let envelope = decode_envelope(r#"{"status":"success"}"#).unwrap();
        assert!(matches!(
            decode_send_response(&envelope),
            Err(ExtractError::MissingField {
                field: "messages_id"
            })
        ));
    }

    #[test]
    fn decode_status_response_maps_labels() {
        let envelope = decode_envelope(
            r#"{"status":"success","messages":{"101":"delivered","102":"send"}}"#,
        )
        .unwrap();
        let statuses = decode_status_response(&envelope).unwrap();
        assert_eq!(
            statuses.get(&MessageId::new("101").unwrap()),
            Some(&DeliveryStatus::Delivered)
        );
        assert_eq!(
            statuses.get(&MessageId::new("102").unwrap()),
            Some(&DeliveryStatus::Sent)
        );
    }

    #[test]
    fn decode_price_response_coerces_strings() {
        let envelope = decode_envelope(r#"{"status":"success","price":"1.20"}"#).unwrap();
        assert_eq!(decode_price_response(&envelope).unwrap(), 1.2);
    }

    #[test]
    fn decode_list_response_maps_records() {
        let envelope = decode_envelope(
            r#"{
              "status": "success",
              "list": [
                {"id": 7, "recipient": "79251234567", "message": "hi", "status": "delivered", "price": 0.5},
                {"id": "8", "created_at": "2013-04-01 10:00:00"}
              ]
            }"#,
        )
        .unwrap();

        let records = decode_list_response(&envelope).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].id, 7);
        assert_eq!(records[0].recipient.as_deref(), Some("79251234567"));
        assert_eq!(records[0].price.as_deref(), Some("0.5"));
        assert_eq!(records[1].id, 8);
        assert_eq!(
            records[1].created_at.as_deref(),
            Some("2013-04-01 10:00:00")
        );
    }
}
