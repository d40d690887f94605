use super::envelope::{ExtractError, money_field};
use crate::domain::{RequestParams, ResponseEnvelope};

pub fn encode_balance_params() -> RequestParams {
    RequestParams::new()
}

pub fn decode_balance_response(envelope: &ResponseEnvelope) -> Result<f64, ExtractError> {
    money_field(envelope, "balance")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::envelope::decode_envelope;

    #[test]
    fn balance_request_carries_no_parameters() {
        assert!(encode_balance_params().is_empty());
    }

    #[test]
    fn decode_balance_supports_numeric_and_string_money() {
        let envelope = decode_envelope(r#"{"status":"success","balance":"12.50"}"#).unwrap();
        assert_eq!(decode_balance_response(&envelope).unwrap(), 12.5);

        let envelope = decode_envelope(r#"{"status":"success","balance":12.5}"#).unwrap();
        assert_eq!(decode_balance_response(&envelope).unwrap(), 12.5);
    }

    #[test]
    fn decode_balance_requires_the_field() {
        let envelope = decode_envelope(r#"{"status":"success"}"#).unwrap();
        assert!(matches!(
            decode_balance_response(&envelope),
            Err(ExtractError::MissingField { field: "balance" })
        ));
    }
}
