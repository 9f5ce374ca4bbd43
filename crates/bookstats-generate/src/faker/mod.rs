pub mod adapter;

pub use adapter::{FakerCorpus, LocaleKey};
