use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error(
        "load factor must be a finite number of at least {}, got {}",
        TableConfig::MIN_LOAD_FACTOR,
        .0
    )]
    InvalidLoadFactor(f32),
    #[error("failed to parse table config: {}", .0)]
    Parse(#[from] toml::de::Error),
}

/// Construction-time settings for hash tables and sets.
///
/// ```toml
/// initial_capacity = 64
/// load_factor = 0.5
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TableConfig {
    /// Number of entries the table should hold before its first rehash.
    pub initial_capacity: usize,
    /// Rehash once `entries > buckets * load_factor`.
    pub load_factor: f32,
}

impl TableConfig {
    pub const DEFAULT_LOAD_FACTOR: f32 = 0.75;
    /// Smaller factors would double the bucket array on almost every insert.
    pub const MIN_LOAD_FACTOR: f32 = 0.01;

    pub fn from_toml_str(raw: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(raw)?;
        config.validate()
    }

    pub fn validate(self) -> Result<Self, ConfigError> {
        if !self.load_factor.is_finite() || self.load_factor < Self::MIN_LOAD_FACTOR {
            return Err(ConfigError::InvalidLoadFactor(self.load_factor));
        }
        Ok(self)
    }

    pub fn with_initial_capacity(mut self, initial_capacity: usize) -> Self {
        self.initial_capacity = initial_capacity;
        self
    }

    pub fn with_load_factor(mut self, load_factor: f32) -> Self {
        self.load_factor = load_factor;
        self
    }
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            initial_capacity: 0,
            load_factor: Self::DEFAULT_LOAD_FACTOR,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{ConfigError, TableConfig};
    use rstest::rstest;

    #[test]
    fn missing_fields_use_defaults() {
        let config = TableConfig::from_toml_str("initial_capacity = 64").unwrap();
        assert_eq!(config.initial_capacity, 64);
        assert_eq!(config.load_factor, TableConfig::DEFAULT_LOAD_FACTOR);

        let empty = TableConfig::from_toml_str("").unwrap();
        assert_eq!(empty, TableConfig::default());
    }

    #[rstest]
    #[case("load_factor = 0.0")]
    #[case("load_factor = -1.5")]
    #[case("load_factor = nan")]
    #[case("load_factor = inf")]
    #[case("load_factor = 0.000001")]
    #[case("load_factor = 0.009")]
    fn rejects_bad_load_factor(#[case] raw: &str) {
        assert!(matches!(
            TableConfig::from_toml_str(raw),
            Err(ConfigError::InvalidLoadFactor(_))
        ));
    }

    #[test]
    fn accepts_any_capacity() {
        let config = TableConfig::from_toml_str(
            "initial_capacity = 9223372036854775807\nload_factor = 0.5",
        )
        .unwrap();
        assert_eq!(config.initial_capacity, i64::MAX as usize);
        assert_eq!(config.load_factor, 0.5);
    }

    #[rstest]
    #[case("load_factor = \"high\"")]
    #[case("buckets = 4")]
    fn rejects_malformed(#[case] raw: &str) {
        assert!(matches!(
            TableConfig::from_toml_str(raw),
            Err(ConfigError::Parse(_))
        ));
    }
}
