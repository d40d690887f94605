//! Legacy request signature for the signed-request auth mode.
//!
//! The scheme is inherited from the gateway and must be reproduced
//! bit-exactly: concatenate the parameter values in mapping order with no
//! separators, append the secret key, SHA-1 the bytes, then MD5 the
//! lower-hex SHA-1 digest. It is not an HMAC, it is order-dependent, and it
//! should not be used anywhere else; new code paths must not call into this
//! module for anything but gateway compatibility.

use md5::Md5;
use sha1::{Digest, Sha1};

/// Compute the legacy signature over parameter `values` in order.
pub fn legacy_sign<'a, I>(values: I, secret: &str) -> String
where
    I: IntoIterator<Item = &'a str>,
{
    let mut inner = Sha1::new();
    for value in values {
        inner.update(value.as_bytes());
    }
    inner.update(secret.as_bytes());
    let inner_hex = hex::encode(inner.finalize());

    hex::encode(Md5::digest(inner_hex.as_bytes()))
}
