use std::collections::{BTreeMap, BTreeSet};

use bookstats_core::{AuthorId, BookId, Population};

/// Left outer join Author -> Authorship -> Book, grouped by author.
///
/// Every author gets an entry. A link contributes only when its book id
/// resolves to a book in the population, so dangling links count as "no
/// book". Links for unknown authors are dropped. Sets make the count
/// per-distinct-book.
pub fn books_by_author(population: &Population) -> BTreeMap<AuthorId, BTreeSet<BookId>> {
    let book_ids: BTreeSet<BookId> = population.books.iter().map(|book| book.id).collect();

    let mut joined: BTreeMap<AuthorId, BTreeSet<BookId>> = population
        .authors
        .iter()
        .map(|author| (author.id, BTreeSet::new()))
        .collect();

    for link in &population.authorships {
        if !book_ids.contains(&link.book_id) {
            continue;
        }
        if let Some(books) = joined.get_mut(&link.author_id) {
            books.insert(link.book_id);
        }
    }

    joined
}

#[cfg(test)]
mod tests {
    use bookstats_core::Authorship;
    use chrono::NaiveDate;

    use super::*;
    use bookstats_core::{Author, Book, Genre};

    fn author(id: AuthorId) -> Author {
        Author {
            id,
            first_name: format!("First{id}"),
            last_name: format!("Last{id}"),
            dob: NaiveDate::from_ymd_opt(1980, 1, 1).unwrap(),
            birth_city: "Lisbon".to_string(),
        }
    }

    fn book(id: BookId) -> Book {
        Book {
            id,
            title: format!("Book {id}"),
            category: Genre::Mystery,
            page_count: 100,
            published: NaiveDate::from_ymd_opt(2010, 1, 1).unwrap(),
        }
    }

    #[test]
    fn every_author_appears_even_without_links() {
        let population = Population::new(vec![author(1), author(2)], vec![book(1)], vec![
            Authorship::new(1, 1),
        ]);
        let joined = books_by_author(&population);
        assert_eq!(joined.len(), 2);
        assert_eq!(joined[&1], BTreeSet::from([1]));
        assert!(joined[&2].is_empty());
    }

    #[test]
    fn dangling_and_duplicate_links_are_collapsed() {
        let population = Population::new(vec![author(1)], vec![book(1)], vec![
            Authorship::new(1, 1),
            Authorship::new(1, 1),
            Authorship::new(1, 99),
            Authorship::new(42, 1),
        ]);
        let joined = books_by_author(&population);
        assert_eq!(joined.len(), 1);
        assert_eq!(joined[&1], BTreeSet::from([1]));
    }
}
