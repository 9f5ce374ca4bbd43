use std::fs;
use std::path::PathBuf;

use chrono::NaiveDate;

use bookstats_generate::output::csv::{AUTHORS_FILE, AUTHORSHIPS_FILE, BOOKS_FILE};
use bookstats_generate::output::write_population_csv;
use bookstats_generate::{DatasetGenerator, GenerateOptions, GenerationError};

fn temp_out_dir(label: &str) -> PathBuf {
    let mut dir = std::env::temp_dir();
    dir.push(format!("bookstats_generate_{label}_{}", uuid::Uuid::new_v4()));
    fs::create_dir_all(&dir).expect("create temp out dir");
    dir
}

fn options() -> GenerateOptions {
    GenerateOptions {
        seed: Some(21),
        reference_date: NaiveDate::from_ymd_opt(2025, 1, 15),
        ..GenerateOptions::default()
    }
}

#[test]
fn writes_three_tables_with_headers() {
    let result = DatasetGenerator::new(options())
        .expect("build generator")
        .generate(40, 60)
        .expect("generate");
    let out_dir = temp_out_dir("tables");

    let bytes = write_population_csv(&out_dir, &result.population).expect("write csv");
    assert!(bytes > 0);

    let authors = fs::read_to_string(out_dir.join(AUTHORS_FILE)).expect("read authors.csv");
    let mut lines = authors.lines();
    assert_eq!(lines.next(), Some("id,first_name,last_name,dob,birth_city"));
    assert_eq!(lines.count(), 60);

    let mut reader = csv::Reader::from_path(out_dir.join(BOOKS_FILE)).expect("open books.csv");
    assert_eq!(reader.records().count(), 40);

    let mut reader =
        csv::Reader::from_path(out_dir.join(AUTHORSHIPS_FILE)).expect("open authors_and_books.csv");
    assert_eq!(
        reader.records().count(),
        result.population.authorships.len()
    );

    let total: u64 = [AUTHORS_FILE, BOOKS_FILE, AUTHORSHIPS_FILE]
        .iter()
        .map(|name| fs::metadata(out_dir.join(name)).expect("stat csv").len())
        .sum();
    assert_eq!(bytes, total);
}

#[test]
fn export_is_deterministic_for_a_seed() {
    let dir_a = temp_out_dir("run_a");
    let dir_b = temp_out_dir("run_b");

    for dir in [&dir_a, &dir_b] {
        let result = DatasetGenerator::new(options())
            .expect("build generator")
            .generate(25, 30)
            .expect("generate");
        write_population_csv(dir, &result.population).expect("write csv");
    }

    let books_a = fs::read_to_string(dir_a.join(BOOKS_FILE)).expect("read books.csv A");
    let books_b = fs::read_to_string(dir_b.join(BOOKS_FILE)).expect("read books.csv B");
    assert_eq!(books_a, books_b, "books.csv should be deterministic");
}

#[test]
fn unwritable_target_is_an_io_error() {
    let result = DatasetGenerator::new(options())
        .expect("build generator")
        .generate(5, 20)
        .expect("generate");
    let dir = temp_out_dir("blocked");
    let blocker = dir.join("not_a_dir");
    fs::write(&blocker, b"occupied").expect("write blocker file");

    let err = write_population_csv(&blocker, &result.population).unwrap_err();
    assert!(matches!(err, GenerationError::Io(_)), "unexpected error: {err}");
}
