//! Snapshot-based undo/redo container.
//!
//! # Responsibility
//! - Track prior and undone snapshots around one live document.
//! - Keep externally loaded documents out of the undo stack.
//!
//! # Invariants
//! - `present` is always defined.
//! - `past` is oldest-first; `future` is nearest-redo-first.
//! - `apply` clears `future` whenever it records an entry.
//! - `load` clears both `past` and `future`.

use std::collections::VecDeque;
use std::sync::Arc;

#[derive(Debug)]
pub struct EditHistory<T> {
    past: Vec<Arc<T>>,
    present: Arc<T>,
    future: VecDeque<Arc<T>>,
}

impl<T> Clone for EditHistory<T> {
    fn clone(&self) -> Self {
        Self {
            past: self.past.clone(),
            present: Arc::clone(&self.present),
            future: self.future.clone(),
        }
    }
}

impl<T> EditHistory<T> {
    pub fn new(initial: T) -> Self {
        Self::from_snapshot(Arc::new(initial))
    }

    pub fn from_snapshot(initial: Arc<T>) -> Self {
        Self {
            past: Vec::new(),
            present: initial,
            future: VecDeque::new(),
        }
    }

    /// Current live document.
    pub fn present(&self) -> &Arc<T> {
        &self.present
    }

    /// Applies `updater` to the live document.
    ///
    /// Returning the same snapshot (`Arc::ptr_eq`) is a no-op. Returns whether
    /// a history entry was recorded.
    pub fn apply<F>(&mut self, updater: F) -> bool
    where
        F: FnOnce(&Arc<T>) -> Arc<T>,
    {
        let next = updater(&self.present);
        if Arc::ptr_eq(&next, &self.present) {
            return false;
        }
        let previous = std::mem::replace(&mut self.present, next);
        self.past.push(previous);
        self.future.clear();
        true
    }

    /// Replaces the live document with an externally sourced one.
    ///
    /// Not undoable: both stacks are cleared.
    pub fn load(&mut self, document: T) {
        self.load_snapshot(Arc::new(document));
    }

    pub fn load_snapshot(&mut self, document: Arc<T>) {
        self.present = document;
        self.past.clear();
        self.future.clear();
    }

    /// Steps back one entry. Returns `false` when there is nothing to undo.
    pub fn undo(&mut self) -> bool {
        let Some(previous) = self.past.pop() else {
            return false;
        };
        let current = std::mem::replace(&mut self.present, previous);
        self.future.push_front(current);
        true
    }

    /// Steps forward one entry. Returns `false` when there is nothing to redo.
    pub fn redo(&mut self) -> bool {
        let Some(next) = self.future.pop_front() else {
            return false;
        };
        let current = std::mem::replace(&mut self.present, next);
        self.past.push(current);
        true
    }

    pub fn can_undo(&self) -> bool {
        !self.past.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.future.is_empty()
    }

    pub fn undo_depth(&self) -> usize {
        self.past.len()
    }

    pub fn redo_depth(&self) -> usize {
        self.future.len()
    }
}

impl<T: Clone> EditHistory<T> {
    /// Applies an in-place mutation to a copy of the live document.
    ///
    /// Always records an entry, even when the mutation leaves the copy equal
    /// to the live snapshot.
    pub fn edit<F>(&mut self, mutate: F)
    where
        F: FnOnce(&mut T),
    {
        self.apply(|current| {
            let mut next = T::clone(current);
            mutate(&mut next);
            Arc::new(next)
        });
    }
}
