//! Linear undo/redo history for edited documents.
//!
//! # Invariants
//! - History is linear: a new edit discards every pending redo entry.
//! - Snapshots are immutable and shared; identity decides no-op edits.

pub mod edit_history;
