use std::collections::BTreeSet;

use crate::error::{Error, Result};
use crate::population::Population;

/// Validate relational consistency of a population.
///
/// This checks:
/// - duplicate author/book ids
/// - empty mandatory text fields and non-positive page counts
/// - duplicate authorship pairs
/// - authorships referencing unknown authors or books
pub fn validate_population(population: &Population) -> Result<()> {
    let mut author_ids = BTreeSet::new();
    for author in &population.authors {
        if !author_ids.insert(author.id) {
            return Err(Error::InvalidPopulation(format!(
                "duplicate author id: {}",
                author.id
            )));
        }
        for (field, value) in [
            ("first_name", &author.first_name),
            ("last_name", &author.last_name),
            ("birth_city", &author.birth_city),
        ] {
            if value.trim().is_empty() {
                return Err(Error::InvalidPopulation(format!(
                    "author {} has an empty {field}",
                    author.id
                )));
            }
        }
    }

    let mut book_ids = BTreeSet::new();
    for book in &population.books {
        if !book_ids.insert(book.id) {
            return Err(Error::InvalidPopulation(format!(
                "duplicate book id: {}",
                book.id
            )));
        }
        if book.title.trim().is_empty() {
            return Err(Error::InvalidPopulation(format!(
                "book {} has an empty title",
                book.id
            )));
        }
        if book.page_count == 0 {
            return Err(Error::InvalidPopulation(format!(
                "book {} has no pages",
                book.id
            )));
        }
    }

    let mut links = BTreeSet::new();
    for link in &population.authorships {
        if !links.insert((link.author_id, link.book_id)) {
            return Err(Error::InvalidPopulation(format!(
                "duplicate authorship: author {} -> book {}",
                link.author_id, link.book_id
            )));
        }
        if !author_ids.contains(&link.author_id) {
            return Err(Error::InvalidPopulation(format!(
                "authorship references unknown author: {}",
                link.author_id
            )));
        }
        if !book_ids.contains(&link.book_id) {
            return Err(Error::InvalidPopulation(format!(
                "dangling authorship: author {} -> unknown book {}",
                link.author_id, link.book_id
            )));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::population::{Author, Authorship, Book};
    use crate::types::Genre;

    fn author(id: i64) -> Author {
        Author {
            id,
            first_name: "Ada".to_string(),
            last_name: "Lovelace".to_string(),
            dob: NaiveDate::from_ymd_opt(1980, 5, 17).unwrap(),
            birth_city: "London".to_string(),
        }
    }

    fn book(id: i64, page_count: u32) -> Book {
        Book {
            id,
            title: "Lorem ipsum".to_string(),
            category: Genre::Essays,
            page_count,
            published: NaiveDate::from_ymd_opt(2010, 1, 1).unwrap(),
        }
    }

    #[test]
    fn accepts_consistent_population() {
        let population = Population::new(
            vec![author(1), author(2)],
            vec![book(1, 100)],
            vec![Authorship::new(1, 1)],
        );
        assert!(validate_population(&population).is_ok());
    }

    #[test]
    fn rejects_duplicate_author_ids() {
        let population = Population::new(vec![author(1), author(1)], Vec::new(), Vec::new());
        let err = validate_population(&population).unwrap_err();
        assert!(err.to_string().contains("duplicate author id"));
    }

    #[test]
    fn rejects_zero_page_books() {
        let population = Population::new(Vec::new(), vec![book(1, 0)], Vec::new());
        assert!(matches!(
            validate_population(&population),
            Err(Error::InvalidPopulation(_))
        ));
    }

    #[test]
    fn rejects_dangling_authorship() {
        let population = Population::new(
            vec![author(1)],
            vec![book(1, 10)],
            vec![Authorship::new(1, 7)],
        );
        let err = validate_population(&population).unwrap_err();
        assert!(err.to_string().contains("dangling authorship"));
    }

    #[test]
    fn rejects_duplicate_links() {
        let population = Population::new(
            vec![author(1)],
            vec![book(1, 10)],
            vec![Authorship::new(1, 1), Authorship::new(1, 1)],
        );
        let err = validate_population(&population).unwrap_err();
        assert!(err.to_string().contains("duplicate authorship"));
    }
}
