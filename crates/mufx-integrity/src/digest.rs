//! SHA-256 integrity digests.

use std::fmt;
use std::str::FromStr;

use sha2::{Digest, Sha256};

use crate::{Error, Result};

/// Length of the hex-encoded digest.
pub const HASH_LEN: usize = 64;

/// Length of the display-only short form.
pub const SHORT_HASH_LEN: usize = 12;

/// A SHA-256 digest of canonical article content, as 64 lowercase hex
/// characters.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct IntegrityHash(String);

impl IntegrityHash {
    /// Hash the UTF-8 bytes of `text`.
    pub fn compute(text: &str) -> Self {
        Self(format!("{:x}", Sha256::digest(text.as_bytes())))
    }

    /// The full 64-character digest. This is what gets persisted.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The first 12 hex characters, for display only.
    pub fn short(&self) -> &str {
        &self.0[..SHORT_HASH_LEN]
    }
}

impl fmt::Display for IntegrityHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for IntegrityHash {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let valid = s.len() == HASH_LEN
            && s.bytes().all(|b| b.is_ascii_digit() || (b'a'..=b'f').contains(&b));
        if valid {
            Ok(Self(s.to_string()))
        } else {
            Err(Error::InvalidHash(s.to_string()))
        }
    }
}

impl AsRef<str> for IntegrityHash {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
