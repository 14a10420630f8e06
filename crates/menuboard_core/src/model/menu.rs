//! Editable menu screens and their shipped default documents.
//!
//! Menu documents are opaque JSON: the core only requires that they parse.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt::{Display, Formatter};

const DEFAULT_S2: &str = include_str!("../../defaults/menu-s2.json");
const DEFAULT_S3: &str = include_str!("../../defaults/menu-s3.json");
const DEFAULT_S4: &str = include_str!("../../defaults/menu-s4.json");

/// Screen whose menu content is persisted and editable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MenuScreen {
    /// Hot food, two rotating slides.
    S2,
    /// Pizza price grid.
    S3,
    /// Hot food with breakfast section.
    S4,
}

impl MenuScreen {
    pub const ALL: [MenuScreen; 3] = [MenuScreen::S2, MenuScreen::S3, MenuScreen::S4];

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|screen| value.trim().eq_ignore_ascii_case(screen.as_str()))
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::S2 => "s2",
            Self::S3 => "s3",
            Self::S4 => "s4",
        }
    }

    /// Storage file name inside the data directory.
    pub fn file_name(self) -> String {
        format!("menu-{}.json", self.as_str())
    }

    /// Number of rotating slides the screen cycles through.
    pub fn slide_count(self) -> usize {
        match self {
            Self::S2 => 1,
            Self::S3 | Self::S4 => 2,
        }
    }

    /// Raw default document text shipped with the crate.
    pub fn default_source(self) -> &'static str {
        match self {
            Self::S2 => DEFAULT_S2,
            Self::S3 => DEFAULT_S3,
            Self::S4 => DEFAULT_S4,
        }
    }

    /// Parsed default document.
    ///
    /// # Errors
    /// - Returns the JSON error if the embedded default is malformed.
    pub fn default_document(self) -> serde_json::Result<Value> {
        serde_json::from_str(self.default_source())
    }
}

impl Display for MenuScreen {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
