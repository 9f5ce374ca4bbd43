use chrono::NaiveDate;
use sqlx::{Sqlite, SqlitePool, Transaction};

use bookstats_core::{Author, AuthorId, BookId};

use crate::store::BookRecord;

pub const CREATE_TABLES: &[&str] = &[
    "CREATE TABLE IF NOT EXISTS authors (
        id INTEGER PRIMARY KEY,
        first_name TEXT NOT NULL,
        last_name TEXT NOT NULL,
        dob DATE NOT NULL,
        birth_city TEXT NOT NULL
    )",
    "CREATE TABLE IF NOT EXISTS books (
        id INTEGER PRIMARY KEY,
        title TEXT NOT NULL,
        category TEXT NOT NULL,
        page_count INTEGER NOT NULL,
        published DATE NOT NULL
    )",
    "CREATE TABLE IF NOT EXISTS authors_and_books (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        author_id INTEGER NOT NULL REFERENCES authors (id),
        book_id INTEGER NOT NULL REFERENCES books (id)
    )",
    "CREATE INDEX IF NOT EXISTS authors_and_books_author_idx
        ON authors_and_books (author_id, book_id)",
];

#[derive(Debug, sqlx::FromRow)]
pub struct RawAuthor {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub dob: NaiveDate,
    pub birth_city: String,
}

#[derive(Debug, sqlx::FromRow)]
pub struct RawBook {
    pub id: i64,
    pub title: String,
    pub category: String,
    pub page_count: i64,
    pub published: NaiveDate,
}

#[derive(Debug, sqlx::FromRow)]
pub struct RawLink {
    pub author_id: i64,
    pub book_id: i64,
}

pub async fn create_tables(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    for statement in CREATE_TABLES {
        sqlx::query(statement).execute(pool).await?;
    }
    Ok(())
}

pub async fn insert_authors(
    tx: &mut Transaction<'_, Sqlite>,
    authors: &[Author],
) -> Result<(), sqlx::Error> {
    for author in authors {
        sqlx::query(
            "INSERT INTO authors (id, first_name, last_name, dob, birth_city)
             VALUES (?, ?, ?, ?, ?)",
        )
        .bind(author.id)
        .bind(&author.first_name)
        .bind(&author.last_name)
        .bind(author.dob)
        .bind(&author.birth_city)
        .execute(&mut **tx)
        .await?;
    }
    Ok(())
}

pub async fn insert_books(
    tx: &mut Transaction<'_, Sqlite>,
    records: &[BookRecord],
) -> Result<(), sqlx::Error> {
    for record in records {
        let book = &record.book;
        sqlx::query(
            "INSERT INTO books (id, title, category, page_count, published)
             VALUES (?, ?, ?, ?, ?)",
        )
        .bind(book.id)
        .bind(&book.title)
        .bind(book.category.as_str())
        .bind(i64::from(book.page_count))
        .bind(book.published)
        .execute(&mut **tx)
        .await?;

        for author_id in &record.author_ids {
            insert_link(tx, *author_id, book.id).await?;
        }
    }
    Ok(())
}

async fn insert_link(
    tx: &mut Transaction<'_, Sqlite>,
    author_id: AuthorId,
    book_id: BookId,
) -> Result<(), sqlx::Error> {
    sqlx::query("INSERT INTO authors_and_books (author_id, book_id) VALUES (?, ?)")
        .bind(author_id)
        .bind(book_id)
        .execute(&mut **tx)
        .await?;
    Ok(())
}

pub async fn list_authors(pool: &SqlitePool) -> Result<Vec<RawAuthor>, sqlx::Error> {
    sqlx::query_as::<_, RawAuthor>(
        "SELECT id, first_name, last_name, dob, birth_city FROM authors ORDER BY id",
    )
    .fetch_all(pool)
    .await
}

pub async fn list_books(pool: &SqlitePool) -> Result<Vec<RawBook>, sqlx::Error> {
    sqlx::query_as::<_, RawBook>(
        "SELECT id, title, category, page_count, published FROM books ORDER BY id",
    )
    .fetch_all(pool)
    .await
}

pub async fn list_links(pool: &SqlitePool) -> Result<Vec<RawLink>, sqlx::Error> {
    sqlx::query_as::<_, RawLink>(
        "SELECT author_id, book_id FROM authors_and_books ORDER BY book_id, author_id",
    )
    .fetch_all(pool)
    .await
}
