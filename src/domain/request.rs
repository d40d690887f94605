use crate::domain::params::RequestParams;
use crate::domain::validation::ValidationError;
use crate::domain::value::{MessageText, RawPhoneNumber, SenderId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
/// Message delivery class (`type`).
pub enum MessageType {
    /// Regular SMS, stored on the handset.
    #[default]
    Default,
    /// Flash SMS, shown immediately and not stored.
    Flash,
    /// Ping SMS, invisible delivery probe.
    Ping,
}

impl MessageType {
    /// Form field name used by LittleSMS (`type`).
    pub const FIELD: &'static str = "type";

    /// Wire representation of the type code.
    pub fn wire_value(self) -> &'static str {
        match self {
            Self::Default => "0",
            Self::Flash => "1",
            Self::Ping => "2",
        }
    }
}

#[derive(Debug, Clone, Default)]
/// Optional knobs for [`SendMessage`].
///
/// `extra` is forwarded verbatim after the named parameters, mirroring the
/// free-form tail the gateway accepts on `message/send`.
pub struct SendOptions {
    pub sender: Option<SenderId>,
    pub message_type: MessageType,
    pub extra: RequestParams,
}

#[derive(Debug, Clone)]
/// Validated `message/send` request.
pub struct SendMessage {
    recipients: Vec<RawPhoneNumber>,
    message: MessageText,
    options: SendOptions,
}

impl SendMessage {
    /// Build a send request for one or more recipients.
    pub fn new(
        recipients: Vec<RawPhoneNumber>,
        message: MessageText,
        options: SendOptions,
    ) -> Result<Self, ValidationError> {
        if recipients.is_empty() {
            return Err(ValidationError::NoRecipients);
        }
        Ok(Self {
            recipients,
            message,
            options,
        })
    }

    pub fn recipients(&self) -> &[RawPhoneNumber] {
        &self.recipients
    }

    pub fn message(&self) -> &MessageText {
        &self.message
    }

    pub fn options(&self) -> &SendOptions {
        &self.options
    }
}

#[derive(Debug, Clone)]
/// Validated `contact/create` request.
pub struct NewContact {
    phone: RawPhoneNumber,
    name: Option<String>,
    description: Option<String>,
    tags: Vec<String>,
}

impl NewContact {
    /// Create a contact with just a phone number.
    pub fn new(phone: RawPhoneNumber) -> Self {
        Self {
            phone,
            name: None,
            description: None,
            tags: Vec::new(),
        }
    }

    /// Set the display name.
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Set the free-form description.
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Attach tag names.
    pub fn tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    pub fn phone(&self) -> &RawPhoneNumber {
        &self.phone
    }

    pub fn name_value(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn description_value(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn tag_values(&self) -> &[String] {
        &self.tags
    }
}
