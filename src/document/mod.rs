//! Document module
//!
//! A [`Document`] names a stored record by its `"<collection>/<key>"`
//! composite id and answers point-in-time existence and staleness questions
//! with single round-trip reads. It is an identity, not the record's
//! payload: cursor batch rows stay generic JSON values, never `Document`
//! instances.

mod identity;

pub use identity::Document;
