use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::NaiveDate;

use bookstats_eval::{AnalyticsEngine, AnalyticsOptions};
use bookstats_generate::{DatasetGenerator, GenerateOptions, GenerationResult};
use bookstats_store::{
    EntityKind, Records, SqliteStore, Store, StoreError, book_records, load_population,
    persist_population,
};

fn generate(seed: u64, books: usize, authors: usize) -> Result<GenerationResult> {
    let options = GenerateOptions {
        seed: Some(seed),
        reference_date: NaiveDate::from_ymd_opt(2024, 3, 1),
        ..GenerateOptions::default()
    };
    DatasetGenerator::new(options)
        .context("building generator")?
        .generate(books, authors)
        .context("generating population")
}

fn temp_db_path(label: &str) -> PathBuf {
    let mut path = std::env::temp_dir();
    path.push(format!("bookstats_store_{label}_{}.sqlite3", uuid::Uuid::new_v4()));
    path
}

#[tokio::test]
async fn persisted_population_round_trips() -> Result<()> {
    let generated = generate(11, 1000, 500)?;
    let store = SqliteStore::in_memory().await?;

    persist_population(&store, &generated.population).await?;
    let loaded = load_population(&store).await?;

    assert_eq!(loaded.authors, generated.population.authors);
    assert_eq!(loaded.books, generated.population.books);
    assert_eq!(
        loaded.authorships,
        generated.population.canonical_authorships()
    );
    assert_eq!(loaded, generated.population);
    Ok(())
}

#[tokio::test]
async fn reports_match_before_and_after_persistence() -> Result<()> {
    let generated = generate(12, 300, 200)?;
    let store = SqliteStore::in_memory().await?;
    persist_population(&store, &generated.population).await?;
    let loaded = load_population(&store).await?;

    let before = AnalyticsEngine::new(&generated.population, AnalyticsOptions::default()).run_all();
    let after = AnalyticsEngine::new(&loaded, AnalyticsOptions::default()).run_all();
    assert_eq!(before, after);
    Ok(())
}

#[tokio::test]
async fn on_disk_database_survives_reopen() -> Result<()> {
    let generated = generate(13, 50, 40)?;
    let path = temp_db_path("reopen");

    {
        let store = SqliteStore::open(&path).await?;
        persist_population(&store, &generated.population).await?;
        store.pool().close().await;
    }

    let store = SqliteStore::open(&path).await?;
    let loaded = load_population(&store).await?;
    assert_eq!(loaded, generated.population);

    store.pool().close().await;
    std::fs::remove_file(&path).ok();
    Ok(())
}

#[tokio::test]
async fn query_all_returns_requested_kind() -> Result<()> {
    let generated = generate(14, 20, 30)?;
    let store = SqliteStore::in_memory().await?;
    persist_population(&store, &generated.population).await?;

    let authors = store.query_all(EntityKind::Author).await?;
    assert_eq!(authors.kind(), EntityKind::Author);
    assert_eq!(authors.len(), 30);

    let books = store.query_all(EntityKind::Book).await?;
    assert_eq!(books, Records::Books(book_records(&generated.population)));
    Ok(())
}

#[tokio::test]
async fn books_before_authors_is_a_storage_failure() -> Result<()> {
    let generated = generate(15, 200, 100)?;
    assert!(!generated.population.authorships.is_empty());
    let store = SqliteStore::in_memory().await?;

    let result = store
        .store(&Records::Books(book_records(&generated.population)))
        .await;
    assert!(matches!(result, Err(StoreError::Database(_))));

    // The failed batch leaves nothing behind.
    let books = store.query_all(EntityKind::Book).await?;
    assert!(books.is_empty());
    Ok(())
}

#[tokio::test]
async fn duplicate_ids_are_rejected() -> Result<()> {
    let generated = generate(16, 10, 20)?;
    let store = SqliteStore::in_memory().await?;
    let authors = Records::Authors(generated.population.authors.clone());

    store.store(&authors).await?;
    let result = store.store(&authors).await;
    assert!(matches!(result, Err(StoreError::Database(_))));
    Ok(())
}

#[tokio::test]
async fn empty_store_loads_empty_population() -> Result<()> {
    let store = SqliteStore::in_memory().await?;
    let loaded = load_population(&store).await?;
    assert!(loaded.is_empty());
    assert!(loaded.authorships.is_empty());
    Ok(())
}
