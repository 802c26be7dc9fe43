//! # ArangoDB HTTP Client
//!
//! A minimal, Rust-native client for the ArangoDB HTTP document API.
//! Covers AQL cursors (server-side paginated result streams) and
//! document existence/staleness checks over plain HTTP + JSON.
//!
//! ## Features
//!
//! - **AQL Cursors**: open a query, stream rows batch by batch
//! - **Typed Rows**: decode each row into any `serde` target type
//! - **Document Checks**: point-in-time existence and revision staleness
//! - **Plain Transport**: one `reqwest` client, basic auth, no hidden retries
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use arango_client::{ConnectionConfig, Database, Result};
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let config = ConnectionConfig::builder()
//!         .endpoint("http://localhost:8529")
//!         .database("_system")
//!         .basic_auth("root", "secret")
//!         .build()?;
//!     let db = Database::connect(config)?;
//!
//!     let mut cursor = db.query("FOR u IN users RETURN u", None).await?;
//!     let mut rows = cursor.rows::<serde_json::Value>();
//!     while let Some(user) = rows.try_next().await? {
//!         // Process rows; batches are fetched from the server on demand.
//!         let _ = user;
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                    Database (connection)                 │
//! │  send()/get() → status + JSON body    query() → Cursor   │
//! └──────────────────────────────────────────────────────────┘
//!                │                              │
//! ┌──────────────┴─────────────┐  ┌─────────────┴────────────┐
//! │           Cursor           │  │         Document         │
//! ├────────────────────────────┤  ├──────────────────────────┤
//! │ rows() / fetch_next        │  │ exist()                  │
//! │ fetch_one / fetch_batch    │  │ updated()                │
//! │ delete()                   │  │ _id / _rev / _key        │
//! └────────────────────────────┘  └──────────────────────────┘
//! ```
//!
//! Every operation that touches the server blocks the calling task until
//! the response (or transport error) returns; there is no retry, backoff,
//! or caching at this layer. Instances are meant for single-owner,
//! sequential use; callers serialize concurrent access themselves.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_errors_doc)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types for the client
pub mod error;

/// Connection configuration
pub mod config;

/// Database handle and HTTP transport
pub mod connection;

/// AQL cursors and row iteration
pub mod cursor;

/// Document identity and existence checks
pub mod document;

// ============================================================================
// Re-exports
// ============================================================================

pub use config::ConnectionConfig;
pub use connection::{Database, ServerResponse};
pub use cursor::{Cursor, CursorStats, Rows};
pub use document::Document;
pub use error::{Error, Result};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
