//! Menu document repository and JSON-file implementation.
//!
//! # Responsibility
//! - Read and overwrite one JSON document per menu screen.
//!
//! # Invariants
//! - A missing file reads as `Ok(None)`, not an error.
//! - Stored files are pretty-printed with two-space indentation.
//! - A file that exists but does not parse is reported as `RepoError::Json`.

use crate::model::menu::MenuScreen;
use serde_json::Value;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::io;
use std::path::PathBuf;

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for menu document persistence.
#[derive(Debug)]
pub enum RepoError {
    Io { path: PathBuf, source: io::Error },
    Json { path: PathBuf, source: serde_json::Error },
    InvalidDefault { screen: MenuScreen, source: serde_json::Error },
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "menu storage I/O failed at `{}`: {source}", path.display())
            }
            Self::Json { path, source } => {
                write!(f, "invalid menu JSON at `{}`: {source}", path.display())
            }
            Self::InvalidDefault { screen, source } => {
                write!(f, "built-in default for screen {screen} is invalid: {source}")
            }
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Json { source, .. } => Some(source),
            Self::InvalidDefault { source, .. } => Some(source),
        }
    }
}

/// Storage contract for menu documents.
pub trait MenuRepository {
    /// Returns the stored document, or `None` when nothing is stored yet.
    fn read_document(&self, screen: MenuScreen) -> RepoResult<Option<Value>>;
    /// Overwrites the stored document.
    fn write_document(&self, screen: MenuScreen, document: &Value) -> RepoResult<()>;
}

impl<R: MenuRepository + ?Sized> MenuRepository for &R {
    fn read_document(&self, screen: MenuScreen) -> RepoResult<Option<Value>> {
        (**self).read_document(screen)
    }

    fn write_document(&self, screen: MenuScreen, document: &Value) -> RepoResult<()> {
        (**self).write_document(screen, document)
    }
}

/// One `menu-<screen>.json` file per screen under `data_dir`.
#[derive(Debug, Clone)]
pub struct JsonFileMenuRepository {
    data_dir: PathBuf,
}

impl JsonFileMenuRepository {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    pub fn document_path(&self, screen: MenuScreen) -> PathBuf {
        self.data_dir.join(screen.file_name())
    }

    fn ensure_data_dir(&self) -> RepoResult<()> {
        std::fs::create_dir_all(&self.data_dir).map_err(|source| RepoError::Io {
            path: self.data_dir.clone(),
            source,
        })
    }
}

impl MenuRepository for JsonFileMenuRepository {
    fn read_document(&self, screen: MenuScreen) -> RepoResult<Option<Value>> {
        let path = self.document_path(screen);
        let raw = match std::fs::read_to_string(&path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(source) => return Err(RepoError::Io { path, source }),
        };
        let document = serde_json::from_str(&raw).map_err(|source| RepoError::Json {
            path: path.clone(),
            source,
        })?;
        Ok(Some(document))
    }

    fn write_document(&self, screen: MenuScreen, document: &Value) -> RepoResult<()> {
        self.ensure_data_dir()?;
        let path = self.document_path(screen);
        let body = serde_json::to_string_pretty(document).map_err(|source| RepoError::Json {
            path: path.clone(),
            source,
        })?;
        std::fs::write(&path, body).map_err(|source| RepoError::Io { path, source })
    }
}
