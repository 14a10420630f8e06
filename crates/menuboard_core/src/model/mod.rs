//! Domain vocabulary for menu boards.
//!
//! # Responsibility
//! - Define the closed value sets (dayparts, weekdays, screens) shared by
//!   resolution, editing and persistence.
//! - Keep day-based business rules as data rather than branching logic.
//!
//! # Invariants
//! - String forms are lowercase and stable; they are persisted verbatim.

pub mod daypart;
pub mod menu;
pub mod schedule;
