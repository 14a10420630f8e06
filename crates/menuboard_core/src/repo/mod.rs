//! Repository layer for persisted menu documents.
//!
//! # Responsibility
//! - Define the document storage contract used by menu services.
//! - Keep file layout and JSON encoding details out of callers.
//!
//! # Invariants
//! - Writes replace a document wholesale; there is no partial update.
//! - Concurrent writers are not coordinated; the last write wins.

pub mod menu_repo;
