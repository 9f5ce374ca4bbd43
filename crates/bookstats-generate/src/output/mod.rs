pub mod csv;

pub use self::csv::write_population_csv;
