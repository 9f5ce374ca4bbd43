use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use bookstats_core::{Author, AuthorId, Book};

/// Report contract version for `reports.json` artifacts.
pub const REPORT_VERSION: &str = "0.1";

/// Options for the analytics engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyticsOptions {
    /// Authors must have strictly more distinct books than this.
    pub prolific_threshold: usize,
    /// Maximum number of prolific authors reported.
    pub prolific_limit: usize,
}

impl Default for AnalyticsOptions {
    fn default() -> Self {
        Self {
            prolific_threshold: 3,
            prolific_limit: 5,
        }
    }
}

/// Every book tied at the maximum page count.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BiggestBooks {
    /// `None` when there are no books.
    pub max_pages: Option<u32>,
    /// Ascending by id.
    pub books: Vec<Book>,
}

impl BiggestBooks {
    pub fn is_no_data(&self) -> bool {
        self.max_pages.is_none()
    }
}

/// Arithmetic mean of page counts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AveragePageCount {
    pub books: u64,
    /// `None` when there are no books.
    pub average: Option<f64>,
}

impl AveragePageCount {
    pub fn is_no_data(&self) -> bool {
        self.average.is_none()
    }
}

/// Every author tied at the latest date of birth.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct YoungestAuthors {
    /// `None` when there are no authors.
    pub dob: Option<NaiveDate>,
    /// Ascending by id.
    pub authors: Vec<Author>,
}

impl YoungestAuthors {
    pub fn is_no_data(&self) -> bool {
        self.dob.is_none()
    }
}

/// Identity and name columns of an author row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthorSummary {
    pub id: AuthorId,
    pub first_name: String,
    pub last_name: String,
}

impl From<&Author> for AuthorSummary {
    fn from(author: &Author) -> Self {
        Self {
            id: author.id,
            first_name: author.first_name.clone(),
            last_name: author.last_name.clone(),
        }
    }
}

/// Authors whose outer join through authorships yields no book.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthorsWithoutBooks {
    /// Ascending by id.
    pub authors: Vec<AuthorSummary>,
}

/// Author row with the number of distinct books linked to it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthorBookCount {
    pub id: AuthorId,
    pub first_name: String,
    pub last_name: String,
    pub books: u64,
}

/// Authors above the distinct-book threshold, first `limit` by id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProlificAuthors {
    pub threshold: usize,
    pub limit: usize,
    pub authors: Vec<AuthorBookCount>,
}

/// All five reports for one population.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalyticsReport {
    pub report_version: String,
    pub authors: u64,
    pub books: u64,
    pub authorships: u64,
    pub biggest_books: BiggestBooks,
    pub average_page_count: AveragePageCount,
    pub youngest_authors: YoungestAuthors,
    pub authors_without_books: AuthorsWithoutBooks,
    pub prolific_authors: ProlificAuthors,
}
