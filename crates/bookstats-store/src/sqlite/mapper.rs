use std::collections::BTreeMap;

use bookstats_core::{Author, AuthorId, Book, BookId, Genre};

use super::queries::{RawAuthor, RawBook, RawLink};
use crate::errors::{StoreError, StoreResult};
use crate::store::BookRecord;

pub fn map_authors(rows: Vec<RawAuthor>) -> Vec<Author> {
    rows.into_iter()
        .map(|row| Author {
            id: row.id,
            first_name: row.first_name,
            last_name: row.last_name,
            dob: row.dob,
            birth_city: row.birth_city,
        })
        .collect()
}

/// Attach links to their books. Links whose book row is missing are dropped.
pub fn map_books(rows: Vec<RawBook>, links: Vec<RawLink>) -> StoreResult<Vec<BookRecord>> {
    let mut authors_by_book: BTreeMap<BookId, Vec<AuthorId>> = BTreeMap::new();
    for link in links {
        authors_by_book
            .entry(link.book_id)
            .or_default()
            .push(link.author_id);
    }

    rows.into_iter()
        .map(|row| {
            let category = row.category.parse::<Genre>()?;
            let page_count = u32::try_from(row.page_count).map_err(|_| {
                StoreError::Decode(format!(
                    "book {} has out-of-range page_count {}",
                    row.id, row.page_count
                ))
            })?;
            Ok(BookRecord {
                author_ids: authors_by_book.remove(&row.id).unwrap_or_default(),
                book: Book {
                    id: row.id,
                    title: row.title,
                    category,
                    page_count,
                    published: row.published,
                },
            })
        })
        .collect()
}
