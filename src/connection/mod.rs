//! Database connection module
//!
//! Provides the `Database` handle: one `reqwest` client bound to a server
//! endpoint and database name, exposing the raw `send`/`get` operations the
//! cursor and document layers are built on, plus `query` for opening AQL
//! cursors.
//!
//! Requests are sent exactly once; transport errors and unexpected statuses
//! are surfaced to the caller, who decides whether to retry.

mod database;

pub use database::{Database, ServerResponse};
