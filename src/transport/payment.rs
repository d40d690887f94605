use serde::Deserialize;

use super::envelope::{CountRepr, ExtractError, MoneyRepr, string_field, typed_field};
use crate::domain::{Payment, PaymentSystem, RequestParams, ResponseEnvelope};

pub fn encode_systems_params() -> RequestParams {
    RequestParams::new()
}

pub fn encode_id_params(id: u64) -> RequestParams {
    let mut params = RequestParams::new();
    params.push("id", id.to_string());
    params
}

#[derive(Debug, Clone, Deserialize)]
struct PaymentSystemJson {
    name: String,
    #[serde(default)]
    title: Option<String>,
}

pub fn decode_systems_response(
    envelope: &ResponseEnvelope,
) -> Result<Vec<PaymentSystem>, ExtractError> {
    let systems: Vec<PaymentSystemJson> = typed_field(envelope, "systems")?;
    Ok(systems
        .into_iter()
        .map(|system| PaymentSystem {
            name: system.name,
            title: system.title,
        })
        .collect())
}

pub fn decode_url_response(envelope: &ResponseEnvelope) -> Result<String, ExtractError> {
    string_field(envelope, "url")
}

#[derive(Debug, Clone, Deserialize)]
struct PaymentJson {
    id: CountRepr,
    #[serde(default)]
    sum: Option<MoneyRepr>,
    #[serde(default)]
    system: Option<String>,
    #[serde(default)]
    status: Option<String>,
}

pub fn decode_list_response(envelope: &ResponseEnvelope) -> Result<Vec<Payment>, ExtractError> {
    let payments: Vec<PaymentJson> = typed_field(envelope, "list")?;
    payments
        .into_iter()
        .map(|payment| {
            let id = payment.id.into_u64().ok_or(ExtractError::FieldShape {
                field: "list",
                reason: "payment id is not a non-negative integer".to_owned(),
            })?;
            Ok(Payment {
                id,
                sum: payment.sum.map(MoneyRepr::into_string),
                system: payment.system,
                status: payment.status,
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
    fn systems_request_carries_no_parameters() {
        assert!(encode_systems_params().is_empty());
    }

    #[test]
    fn encode_id_params_carries_the_id() {
        let flat = encode_id_params(33).flatten(JoinStyle::Comma).unwrap();
        assert_eq!(flat, vec![("id".to_owned(), "33".to_owned())]);
    }

    #[test]
    fn decode_systems_response_maps_providers() {
        let envelope = decode_envelope(
            r#"{
              "status": "success",
              "systems": [
                {"name": "card", "title": "Bank card"},
                {"name": "wallet"}
              ]
            }"#,
        )
        .unwrap();

        let systems = decode_systems_response(&envelope).unwrap();
        assert_eq!(systems.len(), 2);
        assert_eq!(systems[0].name, "card");
        assert_eq!(systems[0].title.as_deref(), Some("Bank card"));
        assert_eq!(systems[1].title, None);
    }

    #[test]
    fn decode_url_response_extracts_the_url() {
        let envelope =
            decode_envelope(r#"{"status":"success","url":"https://pay.example/42"}"#).unwrap();
        assert_eq!(
            decode_url_response(&envelope).unwrap(),
            "https://pay.example/42"
        );
    }

    #[test]
    fn decode_list_response_maps_payments() {
        let envelope = decode_envelope(
            r#"{
              "status": "success",
              "list": [
                {"id": 42, "sum": "100.00", "system": "card", "status": "paid"},
                {"id": 43, "sum": 50}
              ]
            }"#,
        )
        .unwrap();

        let payments = decode_list_response(&envelope).unwrap();
        assert_eq!(payments.len(), 2);
        assert_eq!(payments[0].id, 42);
        assert_eq!(payments[0].sum.as_deref(), Some("100.00"));
        assert_eq!(payments[1].sum.as_deref(), Some("50"));
    }
}
