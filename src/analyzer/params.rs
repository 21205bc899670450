/// Tunable constants of the coverage analysis. The decision thresholds and
/// score weights are parameters, not contract: callers may adjust them, and
/// only monotonicity is guaranteed by the scoring.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalyzerParams {
    /// Full-list coverage at or above this needs no new index.
    pub create_coverage_threshold: f64,
    /// Minimum coverage of the predicate portion (equality + range columns)
    /// for an exact-prefix index to be extended instead of replaced.
    pub extend_coverage_threshold: f64,
    /// Selectivity assumed for a column without usable statistics.
    pub neutral_selectivity: f64,
    /// Floor applied to range predicates: a range scan reads more than a
    /// point lookup even on a high-cardinality column.
    pub range_selectivity_floor: f64,
    /// Weight of the selectivity term in the benefit score.
    pub selectivity_weight: f64,
    /// Added when the index order also satisfies the statement's sort.
    pub sort_avoidance_bonus: f64,
    /// Added when the index would cover the projection.
    pub covering_bonus: f64,
    /// Score assigned to drop-redundant recommendations.
    pub drop_redundant_score: f64,
}

impl Default for AnalyzerParams {
    fn default() -> Self {
        Self {
            create_coverage_threshold: 0.80,
            extend_coverage_threshold: 0.50,
            neutral_selectivity: 0.5,
            range_selectivity_floor: 0.10,
            selectivity_weight: 75.0,
            sort_avoidance_bonus: 15.0,
            covering_bonus: 10.0,
            drop_redundant_score: 25.0,
        }
    }
}

impl AnalyzerParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_create_coverage_threshold(mut self, threshold: f64) -> Self {
        self.create_coverage_threshold = threshold.clamp(0.0, 1.0);
        self
    }

    pub fn with_extend_coverage_threshold(mut self, threshold: f64) -> Self {
        self.extend_coverage_threshold = threshold.clamp(0.0, 1.0);
        self
    }

    pub fn with_neutral_selectivity(mut self, selectivity: f64) -> Self {
        self.neutral_selectivity = selectivity.clamp(0.0, 1.0);
        self
    }

    pub fn with_sort_avoidance_bonus(mut self, bonus: f64) -> Self {
        self.sort_avoidance_bonus = bonus.max(0.0);
        self
    }

    pub fn with_covering_bonus(mut self, bonus: f64) -> Self {
        self.covering_bonus = bonus.max(0.0);
        self
    }
}
