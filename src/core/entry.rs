//! Clipboard entry model.
//!
//! [`Entry`] mirrors one row of the `entries` table. [`Payload`] is the
//! application-level view of the same data, which keeps the `encrypted`
//! flag and the key together.

use std::fmt;

use serde::Serialize;

use crate::error::ClipstoreError;

/// A single row of the `entries` table.
#[derive(Clone, PartialEq, Eq, Serialize)]
pub struct Entry {
    /// Unique identifier (primary key).
    pub id: String,
    /// Stored content.
    pub content: String,
    /// Whether the entry is flagged as encrypted.
    pub encrypted: bool,
    /// Key associated with an encrypted entry. Never serialized.
    #[serde(skip_serializing)]
    pub key: Option<String>,
}

impl Entry {
    /// Build the flat row for a payload.
    #[must_use]
    pub fn new(id: impl Into<String>, payload: Payload) -> Self {
        let id = id.into();
        match payload {
            Payload::Plain { content } => Self {
                id,
                content,
                encrypted: false,
                key: None,
            },
            Payload::Encrypted { content, key } => Self {
                id,
                content,
                encrypted: true,
                key: Some(key),
            },
        }
    }

    /// Convert the row back into a payload.
    ///
    /// # Errors
    ///
    /// Returns `ClipstoreError::InconsistentEntry` if the `encrypted` flag
    /// and the `key` column disagree. Rows written by the store never do,
    /// but external writers are not bound by that.
    pub fn payload(&self) -> Result<Payload, ClipstoreError> {
        match (self.encrypted, &self.key) {
            (false, None) => Ok(Payload::Plain {
                content: self.content.clone(),
            }),
            (true, Some(key)) => Ok(Payload::Encrypted {
                content: self.content.clone(),
                key: key.clone(),
            }),
            (true, None) => Err(ClipstoreError::InconsistentEntry {
                id: self.id.clone(),
                reason: "flagged as encrypted but has no key".to_string(),
            }),
            (false, Some(_)) => Err(ClipstoreError::InconsistentEntry {
                id: self.id.clone(),
                reason: "has a key but is not flagged as encrypted".to_string(),
            }),
        }
    }
}

impl fmt::Debug for Entry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Entry")
            .field("id", &self.id)
            .field("content", &self.content)
            .field("encrypted", &self.encrypted)
            .field("key", &self.key.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

/// Content of an entry together with its protection.
#[derive(Clone, PartialEq, Eq)]
pub enum Payload {
    /// Unprotected content.
    Plain { content: String },
    /// Content flagged as encrypted, gated by a key.
    Encrypted { content: String, key: String },
}

impl Payload {
    /// Plain payload if `key` is `None`, encrypted otherwise.
    #[must_use]
    pub fn new(content: impl Into<String>, key: Option<String>) -> Self {
        let content = content.into();
        match key {
            Some(key) => Self::Encrypted { content, key },
            None => Self::Plain { content },
        }
    }

    #[must_use]
    pub fn key(&self) -> Option<&str> {
        match self {
            Self::Plain { .. } => None,
            Self::Encrypted { key, .. } => Some(key.as_str()),
        }
    }
}

impl fmt::Debug for Payload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Plain { content } => f.debug_struct("Plain").field("content", content).finish(),
            Self::Encrypted { content, .. } => f
                .debug_struct("Encrypted")
                .field("content", content)
                .field("key", &"<redacted>")
                .finish(),
        }
    }
}
