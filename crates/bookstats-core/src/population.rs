use std::collections::BTreeSet;

use chrono::NaiveDate;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::types::{AuthorId, BookId, Genre};

/// A person who may write books.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Author {
    pub id: AuthorId,
    pub first_name: String,
    pub last_name: String,
    /// Date of birth; "youngest" means the latest value.
    pub dob: NaiveDate,
    pub birth_city: String,
}

/// A published book.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Book {
    pub id: BookId,
    pub title: String,
    pub category: Genre,
    pub page_count: u32,
    pub published: NaiveDate,
}

/// Association record linking one author to one book.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, JsonSchema,
)]
pub struct Authorship {
    pub author_id: AuthorId,
    pub book_id: BookId,
}

impl Authorship {
    pub fn new(author_id: AuthorId, book_id: BookId) -> Self {
        Self { author_id, book_id }
    }
}

/// Complete set of authors, books and authorship links for one run.
///
/// The two entity collections are independent; the relation between them
/// lives only in `authorships`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Population {
    pub authors: Vec<Author>,
    pub books: Vec<Book>,
    pub authorships: Vec<Authorship>,
}

impl Population {
    pub fn new(authors: Vec<Author>, books: Vec<Book>, authorships: Vec<Authorship>) -> Self {
        Self {
            authors,
            books,
            authorships,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.authors.is_empty() && self.books.is_empty()
    }

    /// Authorships sorted by `(book_id, author_id)` with duplicates removed.
    pub fn canonical_authorships(&self) -> Vec<Authorship> {
        let set: BTreeSet<(BookId, AuthorId)> = self
            .authorships
            .iter()
            .map(|link| (link.book_id, link.author_id))
            .collect();
        set.into_iter()
            .map(|(book_id, author_id)| Authorship::new(author_id, book_id))
            .collect()
    }
}
