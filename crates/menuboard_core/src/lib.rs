//! Core logic for menu board displays.
//! Display-state resolution, edit history and menu document persistence.

pub mod config;
pub mod editor;
pub mod history;
pub mod logging;
pub mod model;
pub mod repo;
pub mod resolver;
pub mod service;
pub mod store;

pub use config::{BoardConfig, ConfigError};
pub use editor::list_ops::{chunk_with_start, move_item, remove_item, update_item, MoveDirection};
pub use editor::session::{EditorSession, SaveState, SAVED_INDICATOR_HOLD};
pub use editor::shortcut::{history_command, HistoryCommand, KeyChord};
pub use history::edit_history::EditHistory;
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::daypart::{parse_selection, DayOfWeek, Daypart, OverrideSelection};
pub use model::menu::MenuScreen;
pub use model::schedule::{DailySpecial, PromoSchedule, SpecialsLayout};
pub use repo::menu_repo::{JsonFileMenuRepository, MenuRepository, RepoError, RepoResult};
pub use resolver::clock::{Clock, FixedClock, SystemClock};
pub use resolver::daypart_resolver::{
    resolve, DaypartResolver, DisplayState, ResolutionInputs, ResolutionSource, ResolverSettings,
};
pub use resolver::query::QueryParams;
pub use resolver::slide_rotator::SlideRotator;
pub use resolver::ticker::Ticker;
pub use service::menu_service::{MenuService, SaveAck};
pub use store::{JsonFileStore, KeyValueStore, MemoryStore};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
