use std::path::Path;

use serde::{Deserialize, Serialize};

use bookstats_eval::AnalyticsOptions;
use bookstats_generate::GenerateOptions;

use crate::CliError;

/// Contents of a `bookstats.toml` file. Every table and field is optional.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct BookstatsConfig {
    pub generate: GenerateOptions,
    pub analytics: AnalyticsOptions,
}

impl BookstatsConfig {
    pub fn from_toml(content: &str) -> Result<Self, CliError> {
        toml::from_str(content).map_err(|err| CliError::InvalidConfig(err.to_string()))
    }

    /// Load `path` when given, otherwise fall back to defaults.
    pub fn load(path: Option<&Path>) -> Result<Self, CliError> {
        match path {
            Some(path) => {
                let content = std::fs::read_to_string(path).map_err(|err| {
                    CliError::InvalidConfig(format!("cannot read {}: {err}", path.display()))
                })?;
                Self::from_toml(&content)
            }
            None => Ok(Self::default()),
        }
    }

    /// Apply command-line overrides on top of file values.
    pub fn with_seed(mut self, seed: Option<u64>) -> Self {
        if seed.is_some() {
            self.generate.seed = seed;
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use bookstats_generate::faker::LocaleKey;

    use super::*;

    #[test]
    fn empty_file_yields_defaults() {
        let config = BookstatsConfig::from_toml("").unwrap();
        assert_eq!(config.generate.title_max_chars, 20);
        assert_eq!(config.generate.page_count.min, 15);
        assert_eq!(config.analytics.prolific_threshold, 3);
        assert_eq!(config.analytics.prolific_limit, 5);
    }

    #[test]
    fn partial_tables_keep_remaining_defaults() {
        let config = BookstatsConfig::from_toml(
            r#"
            [generate]
            seed = 7
            locale = "pt_BR"
            reference_date = "2024-06-30"

            [generate.page_count]
            min = 100
            max = 200

            [analytics]
            prolific_limit = 10
            "#,
        )
        .unwrap();

        assert_eq!(config.generate.seed, Some(7));
        assert_eq!(config.generate.locale, LocaleKey::PtBr);
        assert_eq!(
            config.generate.reference_date,
            NaiveDate::from_ymd_opt(2024, 6, 30)
        );
        assert_eq!(config.generate.page_count.max, 200);
        assert_eq!(config.generate.authors_without_books.max, 100);
        assert_eq!(config.analytics.prolific_limit, 10);
        assert_eq!(config.analytics.prolific_threshold, 3);
    }

    #[test]
    fn malformed_file_is_a_config_error() {
        let err = BookstatsConfig::from_toml("[generate]\nseed = \"abc\"").unwrap_err();
        assert!(matches!(err, CliError::InvalidConfig(_)));
    }

    #[test]
    fn unsupported_locale_is_a_config_error() {
        let err = BookstatsConfig::from_toml("[generate]\nlocale = \"fr_FR\"").unwrap_err();
        assert!(matches!(err, CliError::InvalidConfig(_)));
        assert!(err.to_string().contains("fr_FR"));
    }

    #[test]
    fn seed_flag_overrides_file_value() {
        let config = BookstatsConfig::from_toml("[generate]\nseed = 1").unwrap();
        assert_eq!(config.clone().with_seed(Some(9)).generate.seed, Some(9));
        assert_eq!(config.with_seed(None).generate.seed, Some(1));
    }

    #[test]
    fn missing_file_is_reported() {
        let path = std::env::temp_dir().join(format!(
            "bookstats_missing_{}.toml",
            uuid::Uuid::new_v4()
        ));
        let err = BookstatsConfig::load(Some(&path)).unwrap_err();
        assert!(err.to_string().contains("cannot read"));
    }
}
