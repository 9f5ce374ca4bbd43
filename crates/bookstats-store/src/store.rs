use std::fmt;

use async_trait::async_trait;

use bookstats_core::{Author, AuthorId, Book};

use crate::errors::StoreResult;

/// Kind of entity held by a store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Author,
    Book,
}

impl EntityKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Author => "author",
            Self::Book => "book",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A book together with the ids of the authors linked to it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookRecord {
    pub book: Book,
    pub author_ids: Vec<AuthorId>,
}

/// A batch of records of one kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Records {
    Authors(Vec<Author>),
    Books(Vec<BookRecord>),
}

impl Records {
    pub fn kind(&self) -> EntityKind {
        match self {
            Self::Authors(_) => EntityKind::Author,
            Self::Books(_) => EntityKind::Book,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Self::Authors(authors) => authors.len(),
            Self::Books(books) => books.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Trait implemented by storage backends.
#[async_trait]
pub trait Store: Send + Sync {
    /// Returns the engine identifier (e.g. `sqlite`).
    fn engine(&self) -> &'static str;

    /// Insert a batch in one bulk operation. Fails as a whole.
    async fn store(&self, records: &Records) -> StoreResult<()>;

    /// Fetch every record of `kind`, ascending by id.
    async fn query_all(&self, kind: EntityKind) -> StoreResult<Records>;
}
