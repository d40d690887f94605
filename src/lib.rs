//! Typed Rust client for the LittleSMS HTTP API.
//!
//! The design follows three layers: a domain layer of strong types, a
//! transport layer for wire-format quirks (form encoding, the JSON envelope,
//! the legacy request signature), and a small client layer orchestrating
//! requests. Every endpoint method performs one POST and returns its payload
//! as an explicit value; [`LittleSmsClient::call`] is the raw escape hatch.
//!
//! ```rust,no_run
//! use littlesms::{Auth, LittleSmsClient, MessageText, RawPhoneNumber, SendMessage, SendOptions};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), littlesms::LittleSmsError> {
//!     let client = LittleSmsClient::new(Auth::api_key("login", "key")?)?;
//!     let phone = RawPhoneNumber::new("79251234567")?;
//!     let msg = MessageText::new("hello")?;
//!     let request = SendMessage::new(vec![phone], msg, SendOptions::default())?;
//!     let _ids = client.send_message(request).await?;
//!     Ok(())
//! }
//! ```
#![forbid(unsafe_code)]

pub mod client;
pub mod domain;
mod transport;

pub use client::{Auth, LittleSmsClient, LittleSmsClientBuilder, LittleSmsError};
pub use domain::{
    ApiKey, BlacklistEntry, Bulk, Contact, DeliveryStatus, JoinStyle, MessageId, MessageRecord,
    MessageText, MessageType, NewContact, ParamValue, Payment, PaymentSystem, PhoneNumber,
    RawPhoneNumber, RequestParams, ResponseEnvelope, SendMessage, SendOptions, SenderId,
    SenderName, Status, Tag, TaskEntry, UserLogin, ValidationError,
};
