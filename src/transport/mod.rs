//! Transport layer: wire-format details (form encoding, envelope decoding,
//! the legacy request signature).

pub(crate) mod account;
pub(crate) mod blacklist;
pub(crate) mod bulk;
pub(crate) mod contact;
pub(crate) mod envelope;
pub(crate) mod message;
pub(crate) mod payment;
pub(crate) mod sender;
pub(crate) mod sign;
pub(crate) mod signup;
pub(crate) mod tag;
pub(crate) mod task;

pub use envelope::{EnvelopeError, ExtractError, decode_envelope};
pub use sign::legacy_sign;
