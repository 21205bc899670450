use serde::{Deserialize, Serialize};

/// Optimizer statistics for one column. Every field is optional: stale or
/// absent statistics degrade selectivity estimates to a neutral default, they
/// never fail an analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnStatistics {
    pub table: String,
    pub column: String,
    pub distinct_cardinality: Option<u64>,
    pub null_fraction: Option<f64>,
    pub avg_length: Option<u32>,
}

impl ColumnStatistics {
    pub fn new(table: &str, column: &str) -> Self {
        Self {
            table: table.to_string(),
            column: column.to_string(),
            distinct_cardinality: None,
            null_fraction: None,
            avg_length: None,
        }
    }

    pub fn with_distinct(mut self, distinct_cardinality: u64) -> Self {
        self.distinct_cardinality = Some(distinct_cardinality);
        self
    }

    pub fn with_null_fraction(mut self, null_fraction: f64) -> Self {
        self.null_fraction = Some(null_fraction);
        self
    }

    pub fn with_avg_length(mut self, avg_length: u32) -> Self {
        self.avg_length = Some(avg_length);
        self
    }
}
