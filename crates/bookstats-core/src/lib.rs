//! Core contracts for bookstats.
//!
//! This crate defines the entity model shared by the generator, the storage
//! collaborator and the analytics engine: authors, books, the authorship
//! association between them and the population that bundles all three.

pub mod error;
pub mod population;
pub mod types;
pub mod validation;

pub use error::{Error, Result};
pub use population::{Author, Authorship, Book, Population};
pub use types::{AuthorId, BookId, Genre};
pub use validation::validate_population;
