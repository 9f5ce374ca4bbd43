use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use bookstats_core::Population;

use crate::errors::GenerationError;

pub const AUTHORS_FILE: &str = "authors.csv";
pub const BOOKS_FILE: &str = "books.csv";
pub const AUTHORSHIPS_FILE: &str = "authors_and_books.csv";

/// Write the population as three CSV tables under `dir`.
///
/// Rows keep the population's order; authorships are written in
/// `(book_id, author_id)` order. Returns the total bytes written.
pub fn write_population_csv(
    dir: &Path,
    population: &Population,
) -> Result<u64, GenerationError> {
    std::fs::create_dir_all(dir)?;

    let authors = population.authors.iter().map(|author| {
        vec![
            author.id.to_string(),
            author.first_name.clone(),
            author.last_name.clone(),
            author.dob.format("%Y-%m-%d").to_string(),
            author.birth_city.clone(),
        ]
    });
    let mut bytes = write_table(
        &dir.join(AUTHORS_FILE),
        &["id", "first_name", "last_name", "dob", "birth_city"],
        authors,
    )?;

    let books = population.books.iter().map(|book| {
        vec![
            book.id.to_string(),
            book.title.clone(),
            book.category.as_str().to_string(),
            book.page_count.to_string(),
            book.published.format("%Y-%m-%d").to_string(),
        ]
    });
    bytes += write_table(
        &dir.join(BOOKS_FILE),
        &["id", "title", "category", "page_count", "published"],
        books,
    )?;

    let links = population
        .canonical_authorships()
        .into_iter()
        .map(|link| vec![link.author_id.to_string(), link.book_id.to_string()]);
    bytes += write_table(
        &dir.join(AUTHORSHIPS_FILE),
        &["author_id", "book_id"],
        links,
    )?;

    Ok(bytes)
}

fn write_table(
    path: &Path,
    header: &[&str],
    rows: impl Iterator<Item = Vec<String>>,
) -> Result<u64, GenerationError> {
    let writer = BufWriter::new(File::create(path)?);
    let counting = CountingWriter::new(writer);
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(counting);

    writer.write_record(header)?;
    for row in rows {
        writer.write_record(&row)?;
    }

    writer.flush()?;
    let counting = writer
        .into_inner()
        .map_err(|err| GenerationError::Io(err.into_error()))?;
    Ok(counting.bytes_written())
}

struct CountingWriter<W: Write> {
    inner: W,
    bytes: u64,
}

impl<W: Write> CountingWriter<W> {
    fn new(inner: W) -> Self {
        Self { inner, bytes: 0 }
    }

    fn bytes_written(&self) -> u64 {
        self.bytes
    }
}

impl<W: Write> Write for CountingWriter<W> {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        let size = self.inner.write(buf)?;
        self.bytes = self.bytes.saturating_add(size as u64);
        Ok(size)
    }

    fn flush(&mut self) -> std::io::Result<()> {
        self.inner.flush()
    }
}
