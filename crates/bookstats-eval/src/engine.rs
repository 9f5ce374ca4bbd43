use std::collections::BTreeMap;
use std::time::Instant;

use tracing::info;

use bookstats_core::{Author, AuthorId, Book, Population};

use crate::join::books_by_author;
use crate::model::{
    AnalyticsOptions, AnalyticsReport, AuthorBookCount, AuthorSummary, AuthorsWithoutBooks,
    AveragePageCount, BiggestBooks, ProlificAuthors, REPORT_VERSION, YoungestAuthors,
};

/// Read-only reports over a materialized population.
#[derive(Debug, Clone)]
pub struct AnalyticsEngine<'a> {
    population: &'a Population,
    options: AnalyticsOptions,
}

impl<'a> AnalyticsEngine<'a> {
    pub fn new(population: &'a Population, options: AnalyticsOptions) -> Self {
        Self {
            population,
            options,
        }
    }

    /// Every book whose page count equals the maximum.
    pub fn biggest_books(&self) -> BiggestBooks {
        let max_pages = self.population.books.iter().map(|book| book.page_count).max();
        let books = match max_pages {
            Some(max) => sorted_books(
                self.population
                    .books
                    .iter()
                    .filter(|book| book.page_count == max),
            ),
            None => Vec::new(),
        };
        BiggestBooks { max_pages, books }
    }

    pub fn average_page_count(&self) -> AveragePageCount {
        let books = self.population.books.len() as u64;
        let average = if books == 0 {
            None
        } else {
            let total: u64 = self
                .population
                .books
                .iter()
                .map(|book| u64::from(book.page_count))
                .sum();
            Some(total as f64 / books as f64)
        };
        AveragePageCount { books, average }
    }

    /// Every author born on the latest date of birth.
    pub fn youngest_authors(&self) -> YoungestAuthors {
        let dob = self.population.authors.iter().map(|author| author.dob).max();
        let authors = match dob {
            Some(latest) => sorted_authors(
                self.population
                    .authors
                    .iter()
                    .filter(|author| author.dob == latest),
            ),
            None => Vec::new(),
        };
        YoungestAuthors { dob, authors }
    }

    pub fn authors_with_no_books(&self) -> AuthorsWithoutBooks {
        let joined = books_by_author(self.population);
        let by_id = authors_by_id(self.population);
        let authors = joined
            .iter()
            .filter(|(_, books)| books.is_empty())
            .filter_map(|(id, _)| by_id.get(id).copied())
            .map(AuthorSummary::from)
            .collect();
        AuthorsWithoutBooks { authors }
    }

    /// Authors with more than `prolific_threshold` distinct books, first
    /// `prolific_limit` by ascending id.
    pub fn prolific_authors(&self) -> ProlificAuthors {
        let joined = books_by_author(self.population);
        let by_id = authors_by_id(self.population);
        let threshold = self.options.prolific_threshold;
        let limit = self.options.prolific_limit;

        let authors = joined
            .iter()
            .filter(|(_, books)| books.len() > threshold)
            .filter_map(|(id, books)| {
                let author = by_id.get(id)?;
                Some(AuthorBookCount {
                    id: author.id,
                    first_name: author.first_name.clone(),
                    last_name: author.last_name.clone(),
                    books: books.len() as u64,
                })
            })
            .take(limit)
            .collect();

        ProlificAuthors {
            threshold,
            limit,
            authors,
        }
    }

    pub fn run_all(&self) -> AnalyticsReport {
        let start = Instant::now();
        let report = AnalyticsReport {
            report_version: REPORT_VERSION.to_string(),
            authors: self.population.authors.len() as u64,
            books: self.population.books.len() as u64,
            authorships: self.population.authorships.len() as u64,
            biggest_books: self.biggest_books(),
            average_page_count: self.average_page_count(),
            youngest_authors: self.youngest_authors(),
            authors_without_books: self.authors_with_no_books(),
            prolific_authors: self.prolific_authors(),
        };

        info!(
            authors = report.authors,
            books = report.books,
            biggest_books = report.biggest_books.books.len(),
            youngest_authors = report.youngest_authors.authors.len(),
            authors_without_books = report.authors_without_books.authors.len(),
            prolific_authors = report.prolific_authors.authors.len(),
            duration_ms = start.elapsed().as_millis() as u64,
            "reports computed"
        );

        report
    }
}

fn sorted_books<'b>(books: impl Iterator<Item = &'b Book>) -> Vec<Book> {
    let mut books: Vec<Book> = books.cloned().collect();
    books.sort_by_key(|book| book.id);
    books
}

fn sorted_authors<'b>(authors: impl Iterator<Item = &'b Author>) -> Vec<Author> {
    let mut authors: Vec<Author> = authors.cloned().collect();
    authors.sort_by_key(|author| author.id);
    authors
}

fn authors_by_id(population: &Population) -> BTreeMap<AuthorId, &Author> {
    population
        .authors
        .iter()
        .map(|author| (author.id, author))
        .collect()
}
