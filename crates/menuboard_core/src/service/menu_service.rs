//! Menu document use-case service.
//!
//! # Responsibility
//! - Serve the stored document for a screen, seeding the built-in default on
//!   first access.
//! - Overwrite documents wholesale on save.
//!
//! # Invariants
//! - `get_document` never returns "not found": a missing document is created
//!   from the default and returned.
//! - `save_document` accepts any JSON value; schema is not validated.

use crate::model::menu::MenuScreen;
use crate::repo::menu_repo::{MenuRepository, RepoError, RepoResult};
use log::{error, info};
use serde::Serialize;
use serde_json::Value;
use std::time::Instant;

/// Acknowledgement returned after a successful save.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SaveAck {
    pub ok: bool,
}

/// Use-case service over a menu repository.
pub struct MenuService<R: MenuRepository> {
    repo: R,
}

impl<R: MenuRepository> MenuService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    pub fn repository(&self) -> &R {
        &self.repo
    }

    /// Returns the stored document, creating it from the default if absent.
    ///
    /// # Side effects
    /// - Writes the default document the first time a screen is read.
    pub fn get_document(&self, screen: MenuScreen) -> RepoResult<Value> {
        let started_at = Instant::now();
        let result = self.read_or_seed(screen);
        match &result {
            Ok(_) => info!(
                "event=menu_get module=service status=ok screen={} duration_ms={}",
                screen,
                started_at.elapsed().as_millis()
            ),
            Err(err) => error!(
                "event=menu_get module=service status=error screen={} duration_ms={} error={}",
                screen,
                started_at.elapsed().as_millis(),
                err
            ),
        }
        result
    }

    /// Overwrites the stored document for `screen`.
    pub fn save_document(&self, screen: MenuScreen, document: &Value) -> RepoResult<SaveAck> {
        let started_at = Instant::now();
        match self.repo.write_document(screen, document) {
            Ok(()) => {
                info!(
                    "event=menu_save module=service status=ok screen={} duration_ms={}",
                    screen,
                    started_at.elapsed().as_millis()
                );
                Ok(SaveAck { ok: true })
            }
            Err(err) => {
                error!(
                    "event=menu_save module=service status=error screen={} duration_ms={} error={}",
                    screen,
                    started_at.elapsed().as_millis(),
                    err
                );
                Err(err)
            }
        }
    }

    fn read_or_seed(&self, screen: MenuScreen) -> RepoResult<Value> {
        if let Some(document) = self.repo.read_document(screen)? {
            return Ok(document);
        }

        let document = screen
            .default_document()
            .map_err(|source| RepoError::InvalidDefault { screen, source })?;
        self.repo.write_document(screen, &document)?;
        info!(
            "event=menu_seed module=service status=ok screen={}",
            screen
        );
        Ok(document)
    }
}
