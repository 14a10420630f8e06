//! Screen editor support.
//!
//! # Responsibility
//! - Host undo/redo history inside an editing session with save tracking.
//! - Provide list transforms and shortcut mapping used by editor updaters.
//!
//! # Invariants
//! - Editing never writes to storage by itself; saves go through an explicit
//!   persist callback.

pub mod list_ops;
pub mod session;
pub mod shortcut;
