//! The cursor itself: batch state plus the iteration methods

use super::rows::Rows;
use super::types::{CursorExtra, CursorResponse, CursorStats};
use crate::connection::Database;
use crate::error::{Error, Result};
use reqwest::Method;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;

/// Client-side handle to one open, server-paginated query result stream
///
/// Invariant: `index <= batch.len()` except inside the documented
/// [`fetch_one`](Cursor::fetch_one) overrun, which lets the position pass
/// the end of the batch by one slot.
///
/// A cursor is meant for single-owner, sequential use; concurrent callers
/// must serialize access themselves.
#[derive(Debug)]
pub struct Cursor {
    db: Database,
    id: String,
    batch: Vec<Value>,
    index: usize,
    /// Batch length cached at the last absorb; `fetch_one` and `next`
    /// compare against this rather than the live length.
    max: usize,
    has_more: bool,
    count: u64,
    extra: CursorExtra,
    cached: bool,
    errored: bool,
    error_message: String,
    code: u16,
    time: f64,
}

impl Cursor {
    /// Create an empty cursor bound to a database handle
    ///
    /// Not usable for iteration until populated from an open-query
    /// response; [`Database::query`](crate::Database::query) does both.
    pub fn new(db: Database) -> Self {
        Self {
            db,
            id: String::new(),
            batch: Vec::new(),
            index: 0,
            max: 0,
            has_more: false,
            count: 0,
            extra: CursorExtra::default(),
            cached: false,
            errored: false,
            error_message: String::new(),
            code: 0,
            time: 0.0,
        }
    }

    /// Build a cursor from an open-query response
    pub fn from_response(db: Database, response: CursorResponse) -> Self {
        let mut cursor = Self::new(db);
        cursor.count = response.count;
        cursor.absorb(response);
        cursor
    }

    /// Replace batch state from a server response
    ///
    /// `count` is set once at open time and `id` only when the response
    /// carries one; later batches omit both. The consumption index is left
    /// to the caller.
    fn absorb(&mut self, response: CursorResponse) {
        if !response.id.is_empty() {
            self.id = response.id;
        }
        self.batch = response.result;
        self.max = self.batch.len();
        self.has_more = response.has_more;
        self.extra = response.extra;
        self.cached = response.cached;
        self.errored = response.error;
        self.error_message = response.error_message;
        self.code = response.code;
        self.time = response.time;
    }

    /// Ask the server for the next batch; absorbs it on 200
    async fn refill(&mut self) -> Result<u16> {
        let res = self
            .db
            .send("cursor", &self.id, Method::PUT, None)
            .await?;
        if res.status == 200 {
            let next: CursorResponse = res.decode()?;
            self.absorb(next);
            debug!(id = %self.id, rows = self.batch.len(), has_more = self.has_more, "fetched next batch");
        }
        Ok(res.status)
    }

    // ========================================================================
    // Lifecycle
    // ========================================================================

    /// Delete the cursor on the server, freeing its resources
    ///
    /// Returns `Ok(true)` only when the server confirms with 202. An empty
    /// id means there is nothing to close and no request is made; 404 means
    /// the cursor was already gone. Neither is an error.
    pub async fn delete(&mut self) -> Result<bool> {
        if self.id.is_empty() {
            return Ok(false);
        }
        let res = self
            .db
            .send("cursor", &self.id, Method::DELETE, None)
            .await?;
        match res.status {
            202 => {
                self.id.clear();
                Ok(true)
            }
            404 => Ok(false),
            _ => Ok(false),
        }
    }

    // ========================================================================
    // Iteration
    // ========================================================================

    /// Iterate the remaining rows as `T`
    ///
    /// This is the iteration API to prefer: lazy, single-pass, exact
    /// exhaustion, transparent batch refill, errors as values.
    pub fn rows<T: DeserializeOwned>(&mut self) -> Rows<'_, T> {
        Rows::new(self)
    }

    /// Produce the next row, refilling from the server when the local batch
    /// is exhausted
    pub(super) async fn next_row<T: DeserializeOwned>(&mut self) -> Result<Option<T>> {
        loop {
            if let Some(value) = self.batch.get(self.index) {
                let row = serde_json::from_value(value.clone())?;
                self.index += 1;
                return Ok(Some(row));
            }
            if !self.has_more {
                return Ok(None);
            }
            let status = self.refill().await?;
            if status != 200 {
                return Err(Error::BatchFetch { status });
            }
            self.index = 0;
        }
    }

    /// Bulk-decode the entire current batch into a sequence type
    ///
    /// A non-sequence `T` fails at decode time before any request is made.
    /// On success, if the server holds more rows, the next batch is fetched
    /// eagerly and replaces the local state; it is NOT part of the returned
    /// value. Call `fetch_batch` again to retrieve it; this is a
    /// one-batch-at-a-time bulk reader, not a full drain.
    pub async fn fetch_batch<T: DeserializeOwned>(&mut self) -> Result<T> {
        let rows: T = serde_json::from_value(Value::Array(self.batch.clone()))?;

        if self.has_more {
            // A refill status other than 200 is not surfaced here; only a
            // transport error propagates.
            let _ = self.refill().await?;
        }

        Ok(rows)
    }

    /// Legacy row-at-a-time reader
    ///
    /// Known-quirky and kept only for behavioral compatibility: the
    /// exhaustion check lets the position overrun the batch by one slot, so
    /// each batch yields one extra `true` (with `row` untouched) before
    /// exhaustion is reported. After an inline batch refill it also returns
    /// `true` without decoding; the next call yields the first row of the
    /// new batch. Prefer [`rows`](Cursor::rows) or
    /// [`fetch_next`](Cursor::fetch_next).
    pub async fn fetch_one<T: DeserializeOwned>(&mut self, row: &mut T) -> bool {
        if self.index > self.max {
            if !self.has_more {
                return false;
            }
            match self.refill().await {
                Ok(200) => {
                    self.index = 0;
                    true
                }
                _ => false,
            }
        } else {
            match self.batch.get(self.index).cloned() {
                Some(value) => {
                    self.index += 1;
                    match serde_json::from_value(value) {
                        Ok(decoded) => {
                            *row = decoded;
                            true
                        }
                        Err(_) => false,
                    }
                }
                None => {
                    // index == max: the overrun slot. Nothing to decode,
                    // but the legacy contract still answers `true` here.
                    self.index += 1;
                    true
                }
            }
        }
    }

    /// Row-at-a-time reader with exact exhaustion and typed errors
    ///
    /// Decodes the next row into `row` and returns `Ok(true)`; `Ok(false)`
    /// on terminal exhaustion. A batch refill answered with a status other
    /// than 200 is an [`Error::BatchFetch`].
    pub async fn fetch_next<T: DeserializeOwned>(&mut self, row: &mut T) -> Result<bool> {
        if self.index >= self.batch.len() {
            if !self.has_more {
                return Ok(false);
            }
            let status = self.refill().await?;
            if status != 200 {
                return Err(Error::BatchFetch { status });
            }
            self.index = 0;
        }

        let Some(value) = self.batch.get(self.index).cloned() else {
            return Ok(false);
        };
        let decoded = serde_json::from_value(value)?;
        self.index += 1;
        *row = decoded;
        Ok(true)
    }

    /// Advance the position by one step without decoding a row
    ///
    /// Returns `true` exactly when the advance lands on the end of the
    /// batch, `false` otherwise (including when already at the end). Local
    /// only; never contacts the server.
    pub fn next(&mut self) -> bool {
        if self.index == self.max {
            return false;
        }
        self.index += 1;
        self.index == self.max
    }

    // ========================================================================
    // Accessors: pure reads of the last-known response state
    // ========================================================================

    /// Server-assigned cursor id; empty when never opened or already closed
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Total row count across the whole query, set at open time
    pub fn count(&self) -> u64 {
        self.count
    }

    /// Total result size ignoring any LIMIT clause
    pub fn full_count(&self) -> u64 {
        self.extra.stats.full_count
    }

    /// Whether the server holds more rows beyond the current batch
    pub fn has_more(&self) -> bool {
        self.has_more
    }

    /// Whether the last response carried the server's inline error flag
    pub fn is_errored(&self) -> bool {
        self.errored
    }

    /// Inline error message from the last response
    pub fn error_message(&self) -> &str {
        &self.error_message
    }

    /// HTTP status echoed in the last response body
    pub fn error_code(&self) -> u16 {
        self.code
    }

    /// Query execution statistics
    pub fn stats(&self) -> &CursorStats {
        &self.extra.stats
    }

    /// Warnings raised during query execution
    pub fn warnings(&self) -> &[Value] {
        &self.extra.warnings
    }

    /// Whether the result was served from the server's query cache
    pub fn is_cached(&self) -> bool {
        self.cached
    }

    /// Server-side processing time of the last response, in seconds
    pub fn time(&self) -> f64 {
        self.time
    }
}
