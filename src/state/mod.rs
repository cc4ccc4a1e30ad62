// State management module
// Handles SQLite persistence and file system locations

pub mod compositions;
pub mod db;
pub mod kv;
pub mod models;
pub mod save_guard;
pub mod storage;

pub use compositions::CompositionStore;
pub use db::{init_db, DbConnection, DbError};
pub use kv::{KeyValueStore, PersistError, PersistResult};
pub use models::{
    normalize_name, Composition, CompositionSummary, LegacyTaal, NameError, StoredComposition,
    TaalRef,
};
pub use save_guard::{SaveGuard, SaveTicket};
