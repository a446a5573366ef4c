//! Application use cases. Orchestrate domain logic via ports.

pub mod catalog_service;
pub mod journal_service;
pub mod local_state;
pub mod module_session;
pub mod preferences;

pub use catalog_service::CatalogService;
pub use journal_service::JournalService;
pub use local_state::LocalState;
pub use module_session::{
    Command, Controls, Direction, Effect, ForwardControl, ModuleSession, SessionState,
};
pub use preferences::PreferencesService;
