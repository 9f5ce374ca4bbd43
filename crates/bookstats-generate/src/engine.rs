use std::collections::BTreeSet;
use std::time::Instant;

use chrono::{Days, NaiveDate};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::{debug, info};

use bookstats_core::{Author, AuthorId, Authorship, Book, Genre, Population};

use crate::errors::GenerationError;
use crate::faker::FakerCorpus;
use crate::model::{AuthorPartition, GenerateOptions, GenerationReport, century_start};
use crate::sampling::sample_distinct;
use crate::text::{book_title, short_text};

/// Result of a generation run.
#[derive(Debug, Clone)]
pub struct GenerationResult {
    pub population: Population,
    pub partition: AuthorPartition,
    pub report: GenerationReport,
}

/// Books produced by [`DatasetGenerator::generate_books`].
#[derive(Debug, Clone)]
pub struct GeneratedBooks {
    pub books: Vec<Book>,
    /// Links ordered by `(book_id, author_id)`.
    pub authorships: Vec<Authorship>,
    pub partition: AuthorPartition,
}

/// Entry point for generating an authors/books population.
///
/// The random source is injectable through [`DatasetGenerator::with_rng`];
/// [`DatasetGenerator::new`] seeds a `ChaCha8Rng` from the options.
#[derive(Debug, Clone)]
pub struct DatasetGenerator<R = ChaCha8Rng> {
    options: GenerateOptions,
    corpus: FakerCorpus,
    reference_date: NaiveDate,
    seed: Option<u64>,
    rng: R,
}

impl DatasetGenerator<ChaCha8Rng> {
    pub fn new(options: GenerateOptions) -> Result<Self, GenerationError> {
        let seed = options.seed.unwrap_or_else(rand::random);
        let mut generator = Self::with_rng(options, ChaCha8Rng::seed_from_u64(seed))?;
        generator.seed = Some(seed);
        Ok(generator)
    }
}

impl<R: Rng> DatasetGenerator<R> {
    pub fn with_rng(options: GenerateOptions, rng: R) -> Result<Self, GenerationError> {
        options.validate()?;
        let corpus = FakerCorpus::new(options.locale);
        let reference_date = options
            .reference_date
            .unwrap_or_else(|| chrono::Utc::now().date_naive());

        Ok(Self {
            options,
            corpus,
            reference_date,
            seed: None,
            rng,
        })
    }

    /// Seed of the default random source, if one was used.
    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    /// Generate `author_count` authors, then `book_count` books linked to them.
    pub fn generate(
        &mut self,
        book_count: usize,
        author_count: usize,
    ) -> Result<GenerationResult, GenerationError> {
        self.options.validate_author_count(author_count)?;

        let start = Instant::now();
        let run_id = uuid::Uuid::new_v4().to_string();
        info!(
            run_id = %run_id,
            books = book_count,
            authors = author_count,
            seed = self.seed,
            locale = %self.corpus.locale(),
            "generation started"
        );

        let authors = self.generate_authors(author_count);
        let GeneratedBooks {
            books,
            authorships,
            partition,
        } = self.generate_books(book_count, &authors)?;

        let linked_books: BTreeSet<_> = authorships.iter().map(|link| link.book_id).collect();
        let report = GenerationReport {
            run_id: run_id.clone(),
            seed: self.seed,
            locale: self.corpus.locale(),
            reference_date: self.reference_date,
            authors: authors.len() as u64,
            books: books.len() as u64,
            authorships: authorships.len() as u64,
            authors_without_books: partition.without_books.len() as u64,
            books_without_authors: (books.len() - linked_books.len()) as u64,
            duration_ms: start.elapsed().as_millis() as u64,
        };

        info!(
            run_id = %run_id,
            authors = report.authors,
            books = report.books,
            authorships = report.authorships,
            authors_without_books = report.authors_without_books,
            books_without_authors = report.books_without_authors,
            duration_ms = report.duration_ms,
            "generation completed"
        );

        Ok(GenerationResult {
            population: Population::new(authors, books, authorships),
            partition,
            report,
        })
    }

    /// Generate `count` authors with ids `1..=count`.
    pub fn generate_authors(&mut self, count: usize) -> Vec<Author> {
        (1..=count)
            .map(|id| {
                let first_name = self.corpus.first_name(&mut self.rng);
                let last_name = self.corpus.last_name(&mut self.rng);
                let dob = uniform_date(self.options.dob_start, self.options.dob_end, &mut self.rng);
                let birth_city = self.corpus.city(&mut self.rng);
                Author {
                    id: id as AuthorId,
                    first_name,
                    last_name,
                    dob,
                    birth_city,
                }
            })
            .collect()
    }

    /// Generate `count` books with ids `1..=count`, linking each to distinct
    /// authors from the pool left after partitioning `authors`.
    pub fn generate_books(
        &mut self,
        count: usize,
        authors: &[Author],
    ) -> Result<GeneratedBooks, GenerationError> {
        let partition = self.partition_authors(authors)?;
        debug!(
            without_books = partition.without_books.len(),
            pool = partition.with_books.len(),
            "authors partitioned"
        );

        let per_book = self.options.authors_per_book;
        let pages = self.options.page_count;
        let published_from = century_start(self.reference_date);

        let mut books = Vec::with_capacity(count);
        let mut authorships = Vec::new();

        for id in 1..=count {
            let book_id = id as i64;
            let page_count = self.rng.random_range(pages.min..=pages.max);
            let published = uniform_date(published_from, self.reference_date, &mut self.rng);
            let text = short_text(&self.corpus, self.options.title_max_chars, &mut self.rng);
            let title = book_title(&text, self.options.title_max_chars);
            let category = Genre::ALL[self.rng.random_range(0..Genre::ALL.len())];

            books.push(Book {
                id: book_id,
                title,
                category,
                page_count,
                published,
            });

            if partition.with_books.is_empty() {
                continue;
            }
            let author_count = self.rng.random_range(per_book.min..per_book.max_exclusive);
            let mut chosen = sample_distinct(&partition.with_books, author_count, &mut self.rng)?;
            chosen.sort_unstable();
            authorships.extend(
                chosen
                    .into_iter()
                    .map(|author_id| Authorship::new(author_id, book_id)),
            );
        }

        Ok(GeneratedBooks {
            books,
            authorships,
            partition,
        })
    }

    /// Draw the "without books" subset once; the remaining authors form the pool.
    pub fn partition_authors(
        &mut self,
        authors: &[Author],
    ) -> Result<AuthorPartition, GenerationError> {
        self.options.validate_author_count(authors.len())?;

        let range = self.options.authors_without_books;
        let max = range.max.min(authors.len());
        let size = self.rng.random_range(range.min..=max);

        let ids: Vec<AuthorId> = authors.iter().map(|author| author.id).collect();
        let without_books: BTreeSet<AuthorId> =
            sample_distinct(&ids, size, &mut self.rng)?.into_iter().collect();
        let mut with_books: Vec<AuthorId> = ids
            .into_iter()
            .filter(|id| !without_books.contains(id))
            .collect();
        with_books.sort_unstable();

        Ok(AuthorPartition {
            without_books,
            with_books,
        })
    }
}

/// Uniform date in the closed interval `[start, end]`.
fn uniform_date<R: Rng + ?Sized>(start: NaiveDate, end: NaiveDate, rng: &mut R) -> NaiveDate {
    let span = end.signed_duration_since(start).num_days().max(0) as u64;
    let offset = rng.random_range(0..=span);
    start.checked_add_days(Days::new(offset)).unwrap_or(end)
}
