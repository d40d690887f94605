use serde_json::{Map, Value};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// Top-level outcome reported by every gateway response.
pub enum Status {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq)]
/// Decoded JSON response: the mandatory `status` plus all remaining
/// top-level fields, preserved untouched.
///
/// Typed endpoint methods extract their payload field from this; the
/// envelope itself is what `call` returns and what the error variant of
/// [`crate::LittleSmsError::Api`] carries, so no server-provided detail
/// is lost.
pub struct ResponseEnvelope {
    status: Status,
    fields: Map<String, Value>,
}

impl ResponseEnvelope {
    /// Assemble an envelope from its parts. Mostly useful for test doubles.
    pub fn new(status: Status, fields: Map<String, Value>) -> Self {
        Self { status, fields }
    }

    pub fn status(&self) -> Status {
        self.status
    }

    /// `true` iff `status` was the success literal.
    pub fn is_success(&self) -> bool {
        self.status == Status::Success
    }

    /// Look up a payload field by name.
    pub fn field(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }

    /// All payload fields except `status`, in document order.
    pub fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// Per-message delivery state reported by `message/status`.
///
/// Unknown labels are preserved in `Other` rather than rejected.
pub enum DeliveryStatus {
    Queued,
    Sent,
    Delivered,
    Failed,
    Other(String),
}

impl DeliveryStatus {
    /// Map a wire label onto a known state.
    pub fn from_label(label: &str) -> Self {
        match label {
            "queued" => Self::Queued,
            "send" | "sent" => Self::Sent,
            "delivered" => Self::Delivered,
            "failed" | "error" => Self::Failed,
            other => Self::Other(other.to_owned()),
        }
    }

    /// The wire label for this state.
    pub fn as_label(&self) -> &str {
        match self {
            Self::Queued => "queued",
            Self::Sent => "sent",
            Self::Delivered => "delivered",
            Self::Failed => "failed",
            Self::Other(label) => label,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Address-book entry returned by `contact/list`.
pub struct Contact {
    pub id: u64,
    pub phone: String,
    pub name: Option<String>,
    pub description: Option<String>,
    pub tags: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Tag returned by `tag/list`.
pub struct Tag {
    pub id: u64,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Scheduled job returned by `task/list`.
pub struct TaskEntry {
    pub id: u64,
    pub name: Option<String>,
    pub status: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Sender name registration returned by `sender/list`.
pub struct SenderName {
    pub id: u64,
    pub name: String,
    pub status: Option<String>,
    pub default: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Blocked number returned by `blacklist/list`.
pub struct BlacklistEntry {
    pub id: u64,
    pub phone: String,
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Bulk campaign returned by `bulk/list`.
pub struct Bulk {
    pub id: u64,
    pub name: Option<String>,
    pub status: Option<String>,
    pub count: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Invoice returned by `payment/list`.
pub struct Payment {
    pub id: u64,
    pub sum: Option<String>,
    pub system: Option<String>,
    pub status: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Payment provider returned by `payment/systems`.
pub struct PaymentSystem {
    pub name: String,
    pub title: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Sent-message history record returned by `message/list`.
pub struct MessageRecord {
    pub id: u64,
    pub recipient: Option<String>,
    pub message: Option<String>,
    pub status: Option<String>,
    pub price: Option<String>,
    pub created_at: Option<String>,
}
