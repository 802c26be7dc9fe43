//! Document identity and existence/staleness checks

use crate::connection::Database;
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// Identity of a stored record plus the server's inline error echo
///
/// The underscore-prefixed wire names (`_id`, `_rev`, `_key`) are an
/// ArangoDB convention and must be preserved for compatibility.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Document {
    /// Composite id of the form `"<collection>/<key>"`
    #[serde(rename = "_id", default, skip_serializing_if = "String::is_empty")]
    pub id: String,

    /// Opaque revision token assigned by the server on write
    #[serde(rename = "_rev", default, skip_serializing_if = "String::is_empty")]
    pub rev: String,

    /// The key segment of the id
    #[serde(rename = "_key", default, skip_serializing_if = "String::is_empty")]
    pub key: String,

    /// Inline error flag, populated only when a request against this
    /// document fails
    #[serde(default, skip_serializing_if = "is_false")]
    pub error: bool,

    /// Inline error message
    #[serde(
        rename = "errorMessage",
        default,
        skip_serializing_if = "String::is_empty"
    )]
    pub error_message: String,

    /// HTTP status echoed in the body
    #[serde(default, skip_serializing_if = "is_zero_u16")]
    pub code: u16,

    /// Server-specific error number
    #[serde(rename = "errorNum", default, skip_serializing_if = "is_zero_i64")]
    pub error_num: i64,
}

fn is_false(value: &bool) -> bool {
    !*value
}

fn is_zero_u16(value: &u16) -> bool {
    *value == 0
}

fn is_zero_i64(value: &i64) -> bool {
    *value == 0
}

impl Document {
    /// Create a document identity from a composite id
    ///
    /// The id must split into exactly two non-empty, slash-separated
    /// segments; the key is taken from the second. The empty string fails
    /// the same check.
    pub fn new(id: impl Into<String>) -> Result<Self> {
        let id = id.into();
        let mut segments = id.split('/');
        match (segments.next(), segments.next(), segments.next()) {
            (Some(collection), Some(key), None) if !collection.is_empty() && !key.is_empty() => {
                Ok(Self {
                    key: key.to_string(),
                    id,
                    ..Self::default()
                })
            }
            _ => Err(Error::invalid_document_id(id)),
        }
    }

    /// Check whether the record was updated elsewhere since this revision
    ///
    /// Requires both `id` and `rev`; fails with a precondition error before
    /// any request otherwise. Issues a conditional read with the revision
    /// as a query parameter: 404 (gone) and 412 (revision mismatch) both
    /// answer `true`, meaning the local copy is stale. Any other status answers
    /// `false`.
    pub async fn updated(&self, db: &Database) -> Result<bool> {
        if self.id.is_empty() || self.rev.is_empty() {
            return Err(Error::precondition(
                "document must have both _id and _rev set",
            ));
        }

        let res = db.get("document", &self.id, &[("rev", &self.rev)]).await?;
        match res.status {
            404 | 412 => Ok(true),
            _ => Ok(false),
        }
    }

    /// Check whether the record exists
    ///
    /// Requires `id`; fails with a precondition error before any request
    /// otherwise. Only 404 answers `false`; any other status, error
    /// statuses included, counts as present.
    pub async fn exist(&self, db: &Database) -> Result<bool> {
        if self.id.is_empty() {
            return Err(Error::precondition("document must have _id set"));
        }

        let res = db.get("document", &self.id, &[]).await?;
        match res.status {
            404 => Ok(false),
            _ => Ok(true),
        }
    }

    /// Set the key. No validation performed.
    pub fn set_key(&mut self, key: impl Into<String>) {
        self.key = key.into();
    }

    /// Set the revision token. No validation performed.
    pub fn set_revision(&mut self, rev: impl Into<String>) {
        self.rev = rev.into();
    }
}
