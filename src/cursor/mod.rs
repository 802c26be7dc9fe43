//! Cursor module
//!
//! A cursor is the client-side handle to one server-paginated AQL result
//! stream: it holds the current batch of rows in memory, tracks how far the
//! caller has consumed it, and fetches the next batch from the server on
//! demand.
//!
//! # Overview
//!
//! [`Rows`] is the iteration API to reach for: a lazy, single-pass sequence
//! of decoded rows with transparent batch refill and errors as values. The
//! `fetch_one` / `fetch_next` / `next` methods predate it and are kept for
//! call-style compatibility; their individual quirks are documented on each
//! method.

mod handle;
mod rows;
mod types;

pub use handle::Cursor;
pub use rows::Rows;
pub use types::{CursorExtra, CursorResponse, CursorStats};

#[cfg(test)]
mod tests;
