//! Domain layer: strong types with validation and invariants (no I/O).

mod params;
mod request;
mod response;
mod validation;
mod value;

pub use params::{JoinStyle, ParamValue, RequestParams};
pub use request::{MessageType, NewContact, SendMessage, SendOptions};
pub use response::{
    BlacklistEntry, Bulk, Contact, DeliveryStatus, MessageRecord, Payment, PaymentSystem,
    ResponseEnvelope, SenderName, Status, Tag, TaskEntry,
};
pub use validation::ValidationError;
pub use value::{ApiKey, MessageId, MessageText, PhoneNumber, RawPhoneNumber, SenderId, UserLogin};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_login_rejects_empty() {
        assert!(matches!(
            UserLogin::new("   "),
            Err(ValidationError::Empty {
                field: UserLogin::FIELD
            })
        ));
    }

    #[test]
    fn api_key_rejects_empty() {
        assert!(matches!(
            ApiKey::new(""),
            Err(ValidationError::Empty {
                field: ApiKey::FIELD
            })
        ));
    }

    #[test]
    fn send_message_requires_at_least_one_recipient() {
        let msg = MessageText::new("hi").unwrap();
        let err = SendMessage::new(Vec::new(), msg, SendOptions::default()).unwrap_err();
        assert!(matches!(err, ValidationError::NoRecipients));
    }

    #[test]
    fn join_style_delimiters() {
        assert_eq!(JoinStyle::Comma.delimiter(), ",");
        assert_eq!(JoinStyle::CommaSpace.delimiter(), ", ");
        assert_eq!(JoinStyle::default(), JoinStyle::Comma);
    }
}
