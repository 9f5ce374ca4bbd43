use std::fmt::Write;

use clap::ValueEnum;

use bookstats_eval::AnalyticsReport;

use crate::CliError;

const NO_DATA: &str = "no data";

/// Output format for the report printed on stdout.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

pub fn render(report: &AnalyticsReport, format: OutputFormat) -> Result<String, CliError> {
    match format {
        OutputFormat::Text => Ok(render_text(report)),
        OutputFormat::Json => Ok(serde_json::to_string_pretty(report)?),
    }
}

/// Plain-text rendering, one section per report.
pub fn render_text(report: &AnalyticsReport) -> String {
    let mut out = String::new();
    // Writing into a String cannot fail.
    let _ = write_sections(&mut out, report);
    out
}

fn write_sections(out: &mut String, report: &AnalyticsReport) -> std::fmt::Result {
    writeln!(
        out,
        "Population: {} authors, {} books, {} authorships",
        report.authors, report.books, report.authorships
    )?;
    writeln!(out)?;

    let biggest = &report.biggest_books;
    match biggest.max_pages {
        Some(pages) => writeln!(out, "Books with the maximum number of pages ({pages}):")?,
        None => writeln!(out, "Books with the maximum number of pages:")?,
    }
    if biggest.is_no_data() {
        writeln!(out, "  {NO_DATA}")?;
    }
    for book in &biggest.books {
        writeln!(
            out,
            "  {}, {}, {}, {}, {}",
            book.id, book.title, book.category, book.page_count, book.published
        )?;
    }
    writeln!(out)?;

    match report.average_page_count.average {
        Some(average) => writeln!(out, "Average number of pages in books: {average:.2}")?,
        None => writeln!(out, "Average number of pages in books: {NO_DATA}")?,
    }
    writeln!(out)?;

    let youngest = &report.youngest_authors;
    match youngest.dob {
        Some(dob) => writeln!(out, "Youngest authors (born {dob}):")?,
        None => writeln!(out, "Youngest authors:")?,
    }
    if youngest.is_no_data() {
        writeln!(out, "  {NO_DATA}")?;
    }
    for author in &youngest.authors {
        writeln!(out, "  {} {}", author.first_name, author.last_name)?;
    }
    writeln!(out)?;

    writeln!(out, "Authors with no books:")?;
    if report.authors_without_books.authors.is_empty() {
        writeln!(out, "  none")?;
    }
    for author in &report.authors_without_books.authors {
        writeln!(out, "  {} {} {}", author.id, author.first_name, author.last_name)?;
    }
    writeln!(out)?;

    let prolific = &report.prolific_authors;
    writeln!(
        out,
        "Up to {} authors with more than {} books:",
        prolific.limit, prolific.threshold
    )?;
    if prolific.authors.is_empty() {
        writeln!(out, "  none")?;
    }
    for author in &prolific.authors {
        writeln!(
            out,
            "  {} {} {} ({} books)",
            author.id, author.first_name, author.last_name, author.books
        )?;
    }

    Ok(())
}
