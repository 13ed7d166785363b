//! Compile-time settings shared by every query built with a
//! [`QueryCompiler`](crate::QueryCompiler).
//!
//! The values are read on every compile call and never written by the crate.
//! Load them however the application loads the rest of its configuration;
//! every field has a default, so partial documents deserialize fine:
//!
//! ```rust
//! use paginate_sql::Config;
//!
//! let config: Config = serde_json::from_str(r#"{"max_items_per_page": 250, "debug": true}"#).unwrap();
//! assert_eq!(config.max_items_per_page, 250);
//! assert_eq!(config.default_items_per_page, 10);
//! ```

use serde::Deserialize;

pub const DEFAULT_ITEMS_PER_PAGE: i64 = 10;
pub const MAX_ITEMS_PER_PAGE: i64 = 100;
pub const DEFAULT_ESTIMATE_FUNCTION: &str = "count_estimate";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Page size used by the builder when none (or a non-positive one) is given
    pub default_items_per_page: i64,
    /// Upper bound the builder clamps requested page sizes to
    pub max_items_per_page: i64,
    /// Emit one `tracing` debug event per compiled query
    pub debug: bool,
    /// Database function wrapping count queries in vacuum mode
    pub estimate_function: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_items_per_page: DEFAULT_ITEMS_PER_PAGE,
            max_items_per_page: MAX_ITEMS_PER_PAGE,
            debug: false,
            estimate_function: DEFAULT_ESTIMATE_FUNCTION.to_string(),
        }
    }
}

impl Config {
    #[must_use]
    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    #[must_use]
    pub fn with_default_items_per_page(mut self, items: i64) -> Self {
        self.default_items_per_page = items;
        self
    }

    #[must_use]
    pub fn with_max_items_per_page(mut self, items: i64) -> Self {
        self.max_items_per_page = items;
        self
    }

    #[must_use]
    pub fn with_estimate_function(mut self, function: impl Into<String>) -> Self {
        self.estimate_function = function.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.default_items_per_page, 10);
        assert_eq!(config.max_items_per_page, 100);
        assert!(!config.debug);
        assert_eq!(config.estimate_function, "count_estimate");
    }

    #[test]
    fn test_partial_deserialize_keeps_defaults() {
        let config: Config = serde_json::from_str(r#"{"debug": true}"#).unwrap();
        assert!(config.debug);
        assert_eq!(config.max_items_per_page, MAX_ITEMS_PER_PAGE);
        assert_eq!(config.estimate_function, DEFAULT_ESTIMATE_FUNCTION);
    }

    #[test]
    fn test_with_methods() {
        let config = Config::default()
            .with_default_items_per_page(25)
            .with_max_items_per_page(500)
            .with_estimate_function("row_estimate");
        assert_eq!(config.default_items_per_page, 25);
        assert_eq!(config.max_items_per_page, 500);
        assert_eq!(config.estimate_function, "row_estimate");
    }
}
