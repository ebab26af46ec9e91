//! Comment record and its identifier.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::StoreError;

/// Identifier of a comment: a positive integer, unique within a store.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "u64", into = "u64")]
pub struct CommentId(u64);

impl CommentId {
    /// Returns `None` for zero, which is never a valid id.
    pub fn new(raw: u64) -> Option<Self> {
        (raw > 0).then_some(Self(raw))
    }

    pub fn get(self) -> u64 {
        self.0
    }
}

impl TryFrom<u64> for CommentId {
    type Error = StoreError;

    fn try_from(raw: u64) -> Result<Self, Self::Error> {
        Self::new(raw).ok_or_else(|| StoreError::InvalidId(raw.to_string()))
    }
}

impl From<CommentId> for u64 {
    fn from(id: CommentId) -> u64 {
        id.0
    }
}

/// Strict base-10 parse: digits only, no sign, no whitespace, non-zero.
impl FromStr for CommentId {
    type Err = StoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || StoreError::InvalidId(s.to_owned());

        if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }
        s.parse::<u64>()
            .ok()
            .and_then(Self::new)
            .ok_or_else(invalid)
    }
}

impl fmt::Display for CommentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A single comment.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Comment {
    pub id: CommentId,
    pub text: String,
}

impl Comment {
    pub fn new(id: CommentId, text: impl Into<String>) -> Self {
        Self { id, text: text.into() }
    }
}
