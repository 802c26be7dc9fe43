//! Cursor wire types
//!
//! Field names mirror the ArangoDB HTTP API verbatim and must stay stable
//! for wire compatibility.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One cursor response from the server
///
/// Returned both when a cursor is opened (POST `/_api/cursor`) and when the
/// next batch is requested (PUT `/_api/cursor/{id}`). Later batches omit
/// `id` and `count`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CursorResponse {
    /// Server-assigned cursor id; empty when the stream fits in one batch
    pub id: String,
    /// The current batch of result rows
    pub result: Vec<Value>,
    /// Whether the server holds more rows beyond this batch
    #[serde(rename = "hasMore")]
    pub has_more: bool,
    /// Total row count across the whole query (first response only)
    pub count: u64,
    /// Execution statistics and warnings
    pub extra: CursorExtra,
    /// Whether the result was served from the server's query cache
    pub cached: bool,
    /// Inline error flag
    pub error: bool,
    /// Inline error message, set when `error` is true
    #[serde(rename = "errorMessage")]
    pub error_message: String,
    /// HTTP status echoed in the body
    pub code: u16,
    /// Server-side processing time in seconds
    pub time: f64,
}

/// Extra payload attached to a cursor response
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CursorExtra {
    /// Query execution statistics
    pub stats: CursorStats,
    /// Warnings raised during query execution
    pub warnings: Vec<Value>,
}

/// Query execution statistics
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CursorStats {
    /// Documents written
    #[serde(rename = "writesExecuted")]
    pub writes_executed: u64,
    /// Writes skipped due to errors the query tolerated
    #[serde(rename = "writesIgnored")]
    pub writes_ignored: u64,
    /// Documents scanned via full collection scan
    #[serde(rename = "scannedFull")]
    pub scanned_full: u64,
    /// Documents scanned via index
    #[serde(rename = "scannedIndex")]
    pub scanned_index: u64,
    /// Documents filtered out
    pub filtered: u64,
    /// Query execution time in seconds
    #[serde(rename = "executionTime")]
    pub execution_time: f64,
    /// Total result size ignoring any LIMIT clause
    #[serde(rename = "fullCount")]
    pub full_count: u64,
}
