//! Display-state resolution.
//!
//! # Responsibility
//! - Decide breakfast vs regular mode and the effective weekday.
//! - Rotate multi-slide screens on a timer.
//! - Provide the clock, query-string and timer seams the resolver needs.
//!
//! # See also
//! - `crate::store` for override persistence.

pub mod clock;
pub mod daypart_resolver;
pub mod query;
pub mod slide_rotator;
pub mod ticker;
