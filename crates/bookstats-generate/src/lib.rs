//! Seeded synthetic dataset generation for bookstats.
//!
//! The generator builds a population of authors and books, partitions the
//! authors into a "without books" subset and an eligible pool, and links each
//! book to up to two distinct pool members.

pub mod engine;
pub mod errors;
pub mod faker;
pub mod model;
pub mod output;
pub mod sampling;
pub mod text;

pub use engine::{DatasetGenerator, GeneratedBooks, GenerationResult};
pub use errors::GenerationError;
pub use model::{
    AuthorPartition, AuthorsPerBook, CountRange, GenerateOptions, GenerationReport, PageRange,
};
