//! Durable key/value storage for client-side display preferences.
//!
//! # Responsibility
//! - Abstract the browser-style `get/set/remove` storage behind a trait so
//!   resolution logic can be tested without a real environment.
//!
//! # Invariants
//! - Writes are best-effort: implementations log failures and never return
//!   them to callers.
//! - A key that was never set, or was removed, reads as `None`.
//! - After `reload()`, reads reflect writes made by other handles on the
//!   same backing storage.

mod file;
mod memory;

pub use file::JsonFileStore;
pub use memory::MemoryStore;

/// Storage key holding the persisted daypart override.
pub const DAYPART_OVERRIDE_KEY: &str = "daypartOverride";
/// Storage key holding the persisted day-of-week override.
pub const DAY_OVERRIDE_KEY: &str = "dayOverride";

/// Injected key/value provider.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str);
    fn remove(&mut self, key: &str);
    /// Picks up changes written through other handles. No-op by default.
    fn reload(&mut self) {}
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for &mut S {
    fn get(&self, key: &str) -> Option<String> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) {
        (**self).set(key, value)
    }

    fn remove(&mut self, key: &str) {
        (**self).remove(key)
    }

    fn reload(&mut self) {
        (**self).reload()
    }
}
