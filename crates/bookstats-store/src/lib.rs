//! Storage collaborator for bookstats populations.
//!
//! Records are written in bulk per entity kind and queried back whole. The
//! SQLite implementation keeps authors, books and the `authors_and_books`
//! association in three tables.

pub mod errors;
pub mod population;
pub mod sqlite;
pub mod store;

pub use errors::{StoreError, StoreResult};
pub use population::{book_records, load_population, persist_population};
pub use sqlite::SqliteStore;
pub use store::{BookRecord, EntityKind, Records, Store};
