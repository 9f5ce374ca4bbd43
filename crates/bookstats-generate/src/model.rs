use std::collections::BTreeSet;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use bookstats_core::AuthorId;

use crate::errors::GenerationError;
use crate::faker::LocaleKey;

/// Inclusive range of author counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountRange {
    pub min: usize,
    pub max: usize,
}

/// Half-open range for the number of authors linked to each book.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthorsPerBook {
    pub min: usize,
    pub max_exclusive: usize,
}

/// Inclusive range of page counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRange {
    pub min: u32,
    pub max: u32,
}

/// Options for the dataset generator.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerateOptions {
    /// Seed for the default random source. Drawn at random when absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
    /// Faker locale for names, cities and lorem text.
    pub locale: LocaleKey,
    /// Size range of the "authors without books" subset.
    pub authors_without_books: CountRange,
    /// Number of distinct authors linked to each book.
    pub authors_per_book: AuthorsPerBook,
    pub page_count: PageRange,
    pub dob_start: NaiveDate,
    pub dob_end: NaiveDate,
    /// Maximum title length in characters.
    pub title_max_chars: usize,
    /// Upper bound for publication dates. Defaults to today (UTC).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reference_date: Option<NaiveDate>,
}

impl Default for GenerateOptions {
    fn default() -> Self {
        Self {
            seed: None,
            locale: LocaleKey::EnUs,
            authors_without_books: CountRange { min: 15, max: 100 },
            authors_per_book: AuthorsPerBook {
                min: 0,
                max_exclusive: 3,
            },
            page_count: PageRange { min: 15, max: 1000 },
            dob_start: NaiveDate::from_ymd_opt(1960, 1, 1).unwrap_or_default(),
            dob_end: NaiveDate::from_ymd_opt(1999, 12, 31).unwrap_or_default(),
            title_max_chars: 20,
            reference_date: None,
        }
    }
}

impl GenerateOptions {
    /// Validate options that do not depend on the population size.
    pub fn validate(&self) -> Result<(), GenerationError> {
        let without = self.authors_without_books;
        if without.min > without.max {
            return Err(GenerationError::Configuration(
                "authors_without_books.min must be <= authors_without_books.max".to_string(),
            ));
        }

        let per_book = self.authors_per_book;
        if per_book.min >= per_book.max_exclusive {
            return Err(GenerationError::Configuration(
                "authors_per_book.min must be < authors_per_book.max_exclusive".to_string(),
            ));
        }

        if self.page_count.min == 0 {
            return Err(GenerationError::Configuration(
                "page_count.min must be >= 1".to_string(),
            ));
        }
        if self.page_count.min > self.page_count.max {
            return Err(GenerationError::Configuration(
                "page_count.min must be <= page_count.max".to_string(),
            ));
        }

        if self.dob_start > self.dob_end {
            return Err(GenerationError::Configuration(
                "dob_start must be <= dob_end".to_string(),
            ));
        }

        if self.title_max_chars == 0 {
            return Err(GenerationError::Configuration(
                "title_max_chars must be >= 1".to_string(),
            ));
        }

        Ok(())
    }

    /// Validate that the "without books" subset can be drawn from `author_count` authors.
    pub fn validate_author_count(&self, author_count: usize) -> Result<(), GenerationError> {
        if self.authors_without_books.min > author_count {
            return Err(GenerationError::Configuration(format!(
                "cannot leave {} authors without books out of {} authors",
                self.authors_without_books.min, author_count
            )));
        }
        Ok(())
    }
}

/// First day of the century containing `date` (e.g. 2000-01-01 for 2026).
pub fn century_start(date: NaiveDate) -> NaiveDate {
    let year = date.year() - date.year().rem_euclid(100);
    NaiveDate::from_ymd_opt(year, 1, 1).unwrap_or(date)
}

/// Split of the author population decided once per book generation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthorPartition {
    pub without_books: BTreeSet<AuthorId>,
    /// Authors eligible for linking, ascending by id.
    pub with_books: Vec<AuthorId>,
}

/// Summary of a generation run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationReport {
    pub run_id: String,
    /// Seed of the default random source; absent for injected sources.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
    pub locale: LocaleKey,
    pub reference_date: NaiveDate,
    pub authors: u64,
    pub books: u64,
    pub authorships: u64,
    pub authors_without_books: u64,
    pub books_without_authors: u64,
    pub duration_ms: u64,
}
