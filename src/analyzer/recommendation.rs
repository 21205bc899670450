use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RecommendationKind {
    #[serde(rename = "CREATE_INDEX")]
    CreateIndex,
    #[serde(rename = "EXTEND_INDEX")]
    ExtendIndex,
    #[serde(rename = "DROP_REDUNDANT")]
    DropRedundant,
}

/// Machine-readable reason behind a recommendation; the free text in
/// `Rationale` is for display only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ReasonCode {
    #[serde(rename = "MISSING_INDEX")]
    MissingIndex,
    #[serde(rename = "PARTIAL_COVERAGE")]
    PartialCoverage,
    #[serde(rename = "REDUNDANT_PREFIX")]
    RedundantPrefix,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Rationale {
    pub code: ReasonCode,
    pub text: String,
}

/// One ranked piece of advice. A pure value: recommendations are derived
/// from the query and a catalog snapshot, never persisted or executed here.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Recommendation {
    pub kind: RecommendationKind,
    pub table: String,
    pub columns: Vec<String>,
    pub benefit_score: f64,
    pub rationale: Rationale,
    pub generated_ddl: String,
}
