use crate::query::types::SortOrder;

/// Analyzer of words fields whose config names none
pub const DEFAULT_ANALYZER: &str = "simple";

#[derive(Debug, Clone)]
pub struct Config {
    pub default_limit: usize,        // Applied when a query leaves limit at 0
    pub default_sort: SortOrder,     // Applied when a query leaves sort empty
    pub max_nesting_depth: usize,    // Deepest nested record a schema may describe
    pub default_analyzer: String,    // Analyzer for words fields without one configured
}

impl Default for Config {
    fn default() -> Self {
        Config {
            default_limit: 10,
            default_sort: SortOrder::Asc,
            max_nesting_depth: 32,
            default_analyzer: DEFAULT_ANALYZER.to_string(),
        }
    }
}

impl Config {
    pub fn with_default_limit(mut self, limit: usize) -> Self {
        self.default_limit = limit;
        self
    }

    pub fn with_max_nesting_depth(mut self, depth: usize) -> Self {
        self.max_nesting_depth = depth;
        self
    }

    pub fn with_default_analyzer(mut self, analyzer: &str) -> Self {
        self.default_analyzer = analyzer.to_string();
        self
    }
}
