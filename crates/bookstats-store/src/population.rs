use std::collections::BTreeMap;

use tracing::info;

use bookstats_core::{AuthorId, Authorship, BookId, Population};

use crate::errors::{StoreError, StoreResult};
use crate::store::{BookRecord, EntityKind, Records, Store};

/// Books of `population` with their authorship links embedded.
pub fn book_records(population: &Population) -> Vec<BookRecord> {
    let mut links: BTreeMap<BookId, Vec<AuthorId>> = BTreeMap::new();
    for link in population.canonical_authorships() {
        links.entry(link.book_id).or_default().push(link.author_id);
    }

    population
        .books
        .iter()
        .map(|book| BookRecord {
            book: book.clone(),
            author_ids: links.remove(&book.id).unwrap_or_default(),
        })
        .collect()
}

/// Persist authors first, then books with their links.
pub async fn persist_population<S: Store + ?Sized>(
    store: &S,
    population: &Population,
) -> StoreResult<()> {
    store
        .store(&Records::Authors(population.authors.clone()))
        .await?;
    store
        .store(&Records::Books(book_records(population)))
        .await?;

    info!(
        engine = store.engine(),
        authors = population.authors.len(),
        books = population.books.len(),
        authorships = population.authorships.len(),
        "population persisted"
    );
    Ok(())
}

/// Query every author and book back and rebuild the population.
///
/// Authorships come back ordered by `(book_id, author_id)`.
pub async fn load_population<S: Store + ?Sized>(store: &S) -> StoreResult<Population> {
    let authors = match store.query_all(EntityKind::Author).await? {
        Records::Authors(authors) => authors,
        other => return Err(unexpected_kind(EntityKind::Author, other.kind())),
    };
    let records = match store.query_all(EntityKind::Book).await? {
        Records::Books(records) => records,
        other => return Err(unexpected_kind(EntityKind::Book, other.kind())),
    };

    let mut books = Vec::with_capacity(records.len());
    let mut authorships = Vec::new();
    for record in records {
        let mut author_ids = record.author_ids;
        author_ids.sort_unstable();
        authorships.extend(
            author_ids
                .into_iter()
                .map(|author_id| Authorship::new(author_id, record.book.id)),
        );
        books.push(record.book);
    }
    authorships.sort_unstable_by_key(|link| (link.book_id, link.author_id));

    info!(
        engine = store.engine(),
        authors = authors.len(),
        books = books.len(),
        authorships = authorships.len(),
        "population loaded"
    );
    Ok(Population::new(authors, books, authorships))
}

fn unexpected_kind(expected: EntityKind, found: EntityKind) -> StoreError {
    StoreError::Decode(format!("expected {expected} records, found {found} records"))
}
