use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::analyzer::Recommendation;
use crate::catalog::IndexMetadata;
use crate::parser::ParsedQuery;

/// The assembled result of one analysis: what was understood, what the
/// catalog held at fetch time, and the ranked advice derived from both.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisArtifact {
    pub parsed_query: ParsedQuery,
    pub indexes: Vec<IndexMetadata>,
    pub recommendations: Vec<Recommendation>,
    /// Optimizer hint strings for the top recommendation per table; only
    /// populated when the request asked for hints.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub hints: Vec<String>,
    pub timing_ms: u64,
    pub analysis_id: String,
    pub analyzed_at: DateTime<Utc>,
}
