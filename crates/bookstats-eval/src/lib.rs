//! Analytics over an authors/books population.
//!
//! Five read-only reports: biggest books, average page count, youngest
//! authors, authors without books and prolific authors. Extremal reports are
//! tie-inclusive, and every report has an explicit "no data" shape for empty
//! populations.

pub mod engine;
pub mod join;
pub mod model;

pub use engine::AnalyticsEngine;
pub use model::{
    AnalyticsOptions, AnalyticsReport, AuthorBookCount, AuthorSummary, AuthorsWithoutBooks,
    AveragePageCount, BiggestBooks, ProlificAuthors, REPORT_VERSION, YoungestAuthors,
};
