//! Editing session hosting one document history.
//!
//! # Responsibility
//! - Own the `EditHistory` for one screen editor.
//! - Track the last persisted snapshot and derive the dirty flag from it.
//! - Drive the save indicator through `idle/saving/saved/error`.
//!
//! # Invariants
//! - Dirtiness is structural (`PartialEq`), never snapshot identity.
//! - `Error` clears only when another save is attempted.
//! - `Saved` returns to `Idle` on the next recorded edit, or once
//!   `SAVED_INDICATOR_HOLD` has passed as observed by `expire_saved`.
//! - A failed initial load keeps the current document untouched.

use crate::editor::shortcut::{history_command, HistoryCommand, KeyChord};
use crate::history::edit_history::EditHistory;
use log::{info, warn};
use serde::Serialize;
use std::fmt::Display;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// How long the `Saved` indicator stays up after a successful save.
pub const SAVED_INDICATOR_HOLD: Duration = Duration::from_secs(2);

/// Save indicator shown next to the editor's save button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SaveState {
    #[default]
    Idle,
    Saving,
    Saved,
    Error,
}

impl SaveState {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Saving => "saving",
            Self::Saved => "saved",
            Self::Error => "error",
        }
    }
}

pub struct EditorSession<T> {
    history: EditHistory<T>,
    last_saved: Arc<T>,
    save_state: SaveState,
    saved_at: Option<Instant>,
    dirty: bool,
}

impl<T: PartialEq> EditorSession<T> {
    /// Starts a session on a built-in default document.
    ///
    /// The default counts as persisted until a real load replaces it.
    pub fn new(default: T) -> Self {
        let snapshot = Arc::new(default);
        Self {
            history: EditHistory::from_snapshot(Arc::clone(&snapshot)),
            last_saved: snapshot,
            save_state: SaveState::Idle,
            saved_at: None,
            dirty: false,
        }
    }

    pub fn document(&self) -> &T {
        self.history.present()
    }

    pub fn history(&self) -> &EditHistory<T> {
        &self.history
    }

    pub fn save_state(&self) -> SaveState {
        self.save_state
    }

    /// Drops `Saved` back to `Idle` once the hold time has passed at `now`.
    pub fn expire_saved(&mut self, now: Instant) -> SaveState {
        if let (SaveState::Saved, Some(saved_at)) = (self.save_state, self.saved_at) {
            if now.saturating_duration_since(saved_at) >= SAVED_INDICATOR_HOLD {
                self.save_state = SaveState::Idle;
                self.saved_at = None;
            }
        }
        self.save_state
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Whether the save action should be enabled.
    pub fn can_save(&self) -> bool {
        self.dirty && self.save_state != SaveState::Saving
    }

    /// Applies an edit through the history. Returns whether it was recorded.
    pub fn apply<F>(&mut self, updater: F) -> bool
    where
        F: FnOnce(&Arc<T>) -> Arc<T>,
    {
        let recorded = self.history.apply(updater);
        if recorded {
            if self.save_state == SaveState::Saved {
                self.save_state = SaveState::Idle;
                self.saved_at = None;
            }
            self.recompute_dirty();
        }
        recorded
    }

    /// Installs a freshly fetched document as both live and persisted state.
    pub fn load(&mut self, document: T) {
        let snapshot = Arc::new(document);
        self.history.load_snapshot(Arc::clone(&snapshot));
        self.last_saved = snapshot;
        self.save_state = SaveState::Idle;
        self.saved_at = None;
        self.dirty = false;
    }

    /// Installs a fetch result, keeping the current document on failure.
    ///
    /// Returns whether the document was replaced.
    pub fn load_result<E: Display>(&mut self, result: Result<T, E>) -> bool {
        match result {
            Ok(document) => {
                self.load(document);
                true
            }
            Err(err) => {
                warn!(
                    "event=editor_load module=editor status=error error_code=load_failed fallback=default error={}",
                    err
                );
                false
            }
        }
    }

    pub fn undo(&mut self) -> bool {
        let moved = self.history.undo();
        if moved {
            self.recompute_dirty();
        }
        moved
    }

    pub fn redo(&mut self) -> bool {
        let moved = self.history.redo();
        if moved {
            self.recompute_dirty();
        }
        moved
    }

    /// Runs a history command, returning whether the document moved.
    pub fn run(&mut self, command: HistoryCommand) -> bool {
        match command {
            HistoryCommand::Undo => self.undo(),
            HistoryCommand::Redo => self.redo(),
        }
    }

    /// Handles a key chord; returns the command it triggered, if any.
    pub fn handle_shortcut(
        &mut self,
        chord: &KeyChord,
        target_is_editable: bool,
    ) -> Option<HistoryCommand> {
        let command = history_command(chord, target_is_editable)?;
        self.run(command);
        Some(command)
    }

    /// Persists the live document through `persist`.
    ///
    /// On success the live snapshot becomes the persisted baseline.
    ///
    /// # Errors
    /// - Returns the persist error after moving the indicator to `Error`.
    pub fn save<E, F>(&mut self, persist: F) -> Result<(), E>
    where
        E: Display,
        F: FnOnce(&T) -> Result<(), E>,
    {
        self.save_state = SaveState::Saving;
        self.saved_at = None;
        let snapshot = Arc::clone(self.history.present());
        match persist(snapshot.as_ref()) {
            Ok(()) => {
                self.last_saved = snapshot;
                self.save_state = SaveState::Saved;
                self.saved_at = Some(Instant::now());
                self.dirty = false;
                info!("event=editor_save module=editor status=ok");
                Ok(())
            }
            Err(err) => {
                self.save_state = SaveState::Error;
                warn!(
                    "event=editor_save module=editor status=error error_code=save_failed error={}",
                    err
                );
                Err(err)
            }
        }
    }

    fn recompute_dirty(&mut self) {
        self.dirty = **self.history.present() != *self.last_saved;
    }
}

#[cfg(test)]
mod tests {
    use super::{EditorSession, SaveState, SAVED_INDICATOR_HOLD};
    use std::sync::Arc;
    use std::time::{Duration, Instant};

    #[test]
    fn structurally_equal_edit_is_not_dirty() {
        let mut session = EditorSession::new(vec![1, 2]);
        assert!(session.apply(|current| Arc::new(current.to_vec())));
        assert!(session.history().can_undo());
        assert!(!session.is_dirty());
        assert!(!session.can_save());
    }

    #[test]
    fn saved_returns_to_idle_on_next_edit() {
        let mut session = EditorSession::new(0);
        session.apply(|_| Arc::new(1));
        session.save(|_| Ok::<(), String>(())).unwrap();
        assert_eq!(session.save_state(), SaveState::Saved);

        session.apply(|_| Arc::new(2));
        assert_eq!(session.save_state(), SaveState::Idle);
        assert!(session.is_dirty());
    }

    #[test]
    fn saved_expires_after_hold() {
        let mut session = EditorSession::new(0);
        session.apply(|_| Arc::new(1));
        session.save(|_| Ok::<(), String>(())).unwrap();
        let saved_at = Instant::now();

        assert_eq!(session.expire_saved(saved_at), SaveState::Saved);
        let later = saved_at + SAVED_INDICATOR_HOLD + Duration::from_millis(100);
        assert_eq!(session.expire_saved(later), SaveState::Idle);
    }

    #[test]
    fn error_does_not_expire() {
        let mut session = EditorSession::new(0);
        session.apply(|_| Arc::new(1));
        assert!(session.save(|_| Err::<(), _>("disk full")).is_err());
        let later = Instant::now() + Duration::from_secs(60);
        assert_eq!(session.expire_saved(later), SaveState::Error);
    }
}
