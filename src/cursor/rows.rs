//! Typed row iteration over a cursor

use super::handle::Cursor;
use crate::error::Result;
use serde::de::DeserializeOwned;
use std::marker::PhantomData;

/// A lazy, single-pass stream of decoded rows
///
/// Produced by [`Cursor::rows`]. Each call to [`try_next`](Rows::try_next)
/// yields the next row decoded into `T`, fetching further batches from the
/// server transparently as the local one runs out. Not restartable: rows
/// already consumed through the cursor are gone.
pub struct Rows<'c, T> {
    cursor: &'c mut Cursor,
    _row: PhantomData<fn() -> T>,
}

impl<'c, T: DeserializeOwned> Rows<'c, T> {
    pub(super) fn new(cursor: &'c mut Cursor) -> Self {
        Self {
            cursor,
            _row: PhantomData,
        }
    }

    /// Produce the next row, or `None` on terminal exhaustion
    ///
    /// Decode mismatches and failed batch refills surface as errors; a
    /// refill answered with a status other than 200 is an
    /// [`Error::BatchFetch`](crate::Error::BatchFetch).
    pub async fn try_next(&mut self) -> Result<Option<T>> {
        self.cursor.next_row().await
    }

    /// Drain every remaining row into a vector
    pub async fn collect(mut self) -> Result<Vec<T>> {
        let mut rows = Vec::new();
        while let Some(row) = self.try_next().await? {
            rows.push(row);
        }
        Ok(rows)
    }
}

impl<T> std::fmt::Debug for Rows<'_, T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Rows")
            .field("cursor_id", &self.cursor.id())
            .finish_non_exhaustive()
    }
}
