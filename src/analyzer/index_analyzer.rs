use tracing::{debug, warn};

use crate::analyzer::{
    AnalysisError, AnalyzerParams, IdealIndex, Rationale, ReasonCode, Recommendation, RecommendationKind,
    SelectivityMap, coverage, ddl,
};
use crate::catalog::{ColumnStatistics, IndexMetadata};
use crate::parser::{ColumnRef, ParsedQuery, TableRef};

/// Scores existing indexes against the ideal column order of each table and
/// emits ranked create/extend/drop recommendations.
///
/// `analyze` is a pure function of its inputs: same query and catalog
/// snapshot, same recommendations, byte for byte.
#[derive(Debug, Clone, Default)]
pub struct IndexCoverageAnalyzer {
    params: AnalyzerParams,
}

impl IndexCoverageAnalyzer {
    pub fn new() -> Self {
        Self { params: AnalyzerParams::default() }
    }

    pub fn with_params(params: AnalyzerParams) -> Self {
        Self { params }
    }

    pub fn params(&self) -> &AnalyzerParams {
        &self.params
    }

    pub fn analyze(
        &self,
        query: &ParsedQuery,
        indexes: &[IndexMetadata],
        statistics: &[ColumnStatistics],
    ) -> Vec<Recommendation> {
        if let Err(violation) = Self::check_invariants(query) {
            warn!("{}; returning a degraded empty analysis", violation);
            return vec![];
        }

        let map = SelectivityMap::build(statistics);
        let mut recommendations: Vec<Recommendation> = vec![];

        for table in &query.tables {
            let table_indexes: Vec<&IndexMetadata> =
                indexes.iter().filter(|index| index.is_on(&table.name)).collect();

            self.check_redundancy(table, &table_indexes, &mut recommendations);

            match IdealIndex::build(query, table, &map, &self.params) {
                Some(ideal) => {
                    self.check_coverage(query, table, &ideal, &table_indexes, &mut recommendations);
                }
                None => debug!(table = %table.name, "no usable candidate columns"),
            }
        }

        recommendations.sort_by(|a, b| {
            b.benefit_score
                .total_cmp(&a.benefit_score)
                .then_with(|| a.table.cmp(&b.table))
                .then_with(|| a.columns.cmp(&b.columns))
        });

        recommendations
    }

    /// Resolution guarantees every recorded column belongs to a known table;
    /// a violation here means a bug upstream, answered with a degraded
    /// result instead of a crash.
    fn check_invariants(query: &ParsedQuery) -> Result<(), AnalysisError> {
        for predicate in &query.predicates {
            if query.table(&predicate.table).is_none() {
                return Err(AnalysisError::InternalInvariantViolation(format!(
                    "predicate on '{}.{}' references a table absent from the query",
                    predicate.table, predicate.column
                )));
            }
        }
        for column in query.group_by.iter().chain(query.order_by.iter()) {
            if query.table(&column.table).is_none() {
                return Err(AnalysisError::InternalInvariantViolation(format!(
                    "sort column '{}' references a table absent from the query",
                    column
                )));
            }
        }
        Ok(())
    }

    fn check_redundancy(
        &self,
        table: &TableRef,
        indexes: &[&IndexMetadata],
        out: &mut Vec<Recommendation>,
    ) {
        for candidate in indexes {
            // a unique index carries a constraint no wider index replaces
            if candidate.unique {
                continue;
            }

            let covering = indexes
                .iter()
                .find(|other| coverage::is_strict_prefix_of(candidate, other));

            if let Some(covering) = covering {
                out.push(Recommendation {
                    kind: RecommendationKind::DropRedundant,
                    table: table.name.clone(),
                    columns: candidate.column_names().iter().map(|name| name.to_string()).collect(),
                    benefit_score: self.params.drop_redundant_score,
                    rationale: Rationale {
                        code: ReasonCode::RedundantPrefix,
                        text: format!(
                            "Index {} is a leading prefix of {} and provides no lookup capability the wider index does not",
                            candidate.index_name, covering.index_name
                        ),
                    },
                    generated_ddl: ddl::drop_index(candidate.owner.as_deref(), &candidate.index_name),
                });
            }
        }
    }

    fn check_coverage(
        &self,
        query: &ParsedQuery,
        table: &TableRef,
        ideal: &IdealIndex,
        indexes: &[&IndexMetadata],
        out: &mut Vec<Recommendation>,
    ) {
        let best_coverage = indexes
            .iter()
            .map(|index| coverage::prefix_coverage(index, &ideal.columns))
            .fold(0.0, f64::max);

        if best_coverage >= self.params.create_coverage_threshold {
            debug!(table = %table.name, coverage = best_coverage, "existing coverage sufficient");
            return;
        }

        let benefit_score = self.benefit_score(query, table, ideal);
        let owner = table.owner.as_deref();

        // An index whose columns are exactly a leading prefix of the ideal
        // order, covering the whole equality prefix, is cheaper to extend
        // than to replace.
        let extend = indexes
            .iter()
            .filter(|index| !index.unique)
            .filter_map(|index| {
                coverage::exact_prefix_len(index, &ideal.columns).map(|len| (index, len))
            })
            .filter(|(_, len)| *len >= ideal.equality_len && *len < ideal.columns.len())
            .filter(|(_, len)| self.predicate_portion_covered(*len, ideal))
            .max_by(|(a, len_a), (b, len_b)| {
                len_a.cmp(len_b).then_with(|| b.index_name.cmp(&a.index_name))
            });

        match extend {
            Some((existing, len)) => out.push(Recommendation {
                kind: RecommendationKind::ExtendIndex,
                table: table.name.clone(),
                columns: ideal.columns.clone(),
                benefit_score,
                rationale: Rationale {
                    code: ReasonCode::PartialCoverage,
                    text: format!(
                        "Index {} already covers {} of {} ideal columns; extending it with the trailing columns is cheaper than a new index",
                        existing.index_name,
                        len,
                        ideal.columns.len()
                    ),
                },
                generated_ddl: ddl::create_index(owner, &table.name, &ideal.columns),
            }),
            None => out.push(Recommendation {
                kind: RecommendationKind::CreateIndex,
                table: table.name.clone(),
                columns: ideal.columns.clone(),
                benefit_score,
                rationale: Rationale {
                    code: ReasonCode::MissingIndex,
                    text: format!(
                        "No existing index covers ({}); best prefix coverage is {:.0}%",
                        ideal.columns.join(", "),
                        best_coverage * 100.0
                    ),
                },
                generated_ddl: ddl::create_index(owner, &table.name, &ideal.columns),
            }),
        }
    }

    /// Coverage of the predicate-driven part of the ideal order (equality
    /// plus range columns); trailing sort columns do not count against an
    /// extension candidate.
    fn predicate_portion_covered(&self, prefix_len: usize, ideal: &IdealIndex) -> bool {
        let predicate_len = ideal.predicate_len();
        if predicate_len == 0 {
            return prefix_len >= 1;
        }
        let covered = prefix_len.min(predicate_len) as f64 / predicate_len as f64;
        covered >= self.params.extend_coverage_threshold
    }

    fn benefit_score(&self, query: &ParsedQuery, table: &TableRef, ideal: &IdealIndex) -> f64 {
        let mut score =
            self.params.selectivity_weight * (1.0 - ideal.combined_equality_selectivity);

        let sort_columns: Vec<&ColumnRef> = query
            .group_by
            .iter()
            .chain(query.order_by.iter())
            .filter(|column| column.table.eq_ignore_ascii_case(&table.name))
            .collect();
        if !sort_columns.is_empty() && Self::all_contained(&sort_columns, &ideal.columns) {
            score += self.params.sort_avoidance_bonus;
        }

        let projected: Vec<&ColumnRef> = query
            .select_columns
            .iter()
            .filter(|column| column.table.eq_ignore_ascii_case(&table.name))
            .collect();
        if !query.wildcard_projection
            && !projected.is_empty()
            && Self::all_contained(&projected, &ideal.columns)
        {
            score += self.params.covering_bonus;
        }

        score.clamp(0.0, 100.0)
    }

    fn all_contained(columns: &[&ColumnRef], ideal: &[String]) -> bool {
        columns.iter().all(|column| {
            ideal.iter().any(|name| name.eq_ignore_ascii_case(&column.column))
        })
    }
}

#[cfg(test)]
mod tests {
    use crate::analyzer::{IndexCoverageAnalyzer, RecommendationKind};
    use crate::catalog::{ColumnStatistics, IndexMetadata};
    use crate::parser::ParsedQuery;

    fn query(sql: &str) -> ParsedQuery {
        ParsedQuery::parse(sql).expect("Failed to parse query")
    }

    #[test]
    pub fn test_scenario_create_index() {
        let analyzer = IndexCoverageAnalyzer::new();
        let query = query("SELECT * FROM emp WHERE dept_id = :1 AND hire_date > :2 ORDER BY last_name");

        let result = analyzer.analyze(&query, &[], &[]);

        assert_eq!(result.len(), 1);
        assert_eq!(result[0].kind, RecommendationKind::CreateIndex);
        assert_eq!(result[0].table, "emp");
        assert_eq!(result[0].columns, vec!["dept_id", "hire_date", "last_name"]);
        assert!(result[0].benefit_score > 0.0);
        assert!(result[0].generated_ddl.starts_with("CREATE INDEX"));
    }

    #[test]
    pub fn test_scenario_extend_index() {
        let analyzer = IndexCoverageAnalyzer::new();
        let query = query("SELECT * FROM emp WHERE dept_id = :1 AND hire_date > :2 ORDER BY last_name");
        let indexes = [IndexMetadata::btree("IDX_EMP_DEPT", "emp", &["dept_id"])];

        let result = analyzer.analyze(&query, &indexes, &[]);

        assert_eq!(result.len(), 1);
        assert_eq!(result[0].kind, RecommendationKind::ExtendIndex);
        assert_eq!(result[0].columns, vec!["dept_id", "hire_date", "last_name"]);
        assert!(result[0].rationale.text.contains("IDX_EMP_DEPT"));
    }

    #[test]
    pub fn test_scenario_drop_redundant() {
        let analyzer = IndexCoverageAnalyzer::new();
        let query = query("SELECT * FROM emp WHERE dept_id = :1 AND hire_date > :2");
        let indexes = [
            IndexMetadata::btree("IDX_A", "emp", &["dept_id"]),
            IndexMetadata::btree("IDX_B", "emp", &["dept_id", "hire_date"]),
        ];

        let result = analyzer.analyze(&query, &indexes, &[]);

        let drop: Vec<_> = result
            .iter()
            .filter(|r| r.kind == RecommendationKind::DropRedundant)
            .collect();
        assert_eq!(drop.len(), 1);
        assert_eq!(drop[0].columns, vec!["dept_id"]);
        assert!(drop[0].rationale.text.contains("IDX_A"));
        assert!(drop[0].generated_ddl.starts_with("DROP INDEX"));
    }

    #[test]
    pub fn test_unique_prefix_never_dropped() {
        let analyzer = IndexCoverageAnalyzer::new();
        let query = query("SELECT * FROM emp WHERE dept_id = :1");
        let indexes = [
            IndexMetadata::btree("IDX_A", "emp", &["dept_id"]).with_unique(true),
            IndexMetadata::btree("IDX_B", "emp", &["dept_id", "hire_date"]),
        ];

        let result = analyzer.analyze(&query, &indexes, &[]);

        assert!(result.iter().all(|r| r.kind != RecommendationKind::DropRedundant));
    }

    #[test]
    pub fn test_or_grouped_columns_never_recommended() {
        let analyzer = IndexCoverageAnalyzer::new();
        let query = query("SELECT * FROM t WHERE a = 1 OR b = 2");

        let result = analyzer.analyze(&query, &[], &[]);

        for recommendation in &result {
            assert!(recommendation.kind == RecommendationKind::DropRedundant
                || (!recommendation.columns.contains(&"a".to_string())
                    && !recommendation.columns.contains(&"b".to_string())));
        }
        assert!(result.is_empty());
    }

    #[test]
    pub fn test_non_prefix_like_excluded() {
        let analyzer = IndexCoverageAnalyzer::new();

        let suffix = query("SELECT * FROM emp WHERE last_name LIKE '%son'");
        assert!(analyzer.analyze(&suffix, &[], &[]).is_empty());

        let prefix = query("SELECT * FROM emp WHERE last_name LIKE 'Smi%'");
        let result = analyzer.analyze(&prefix, &[], &[]);
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].columns, vec!["last_name"]);
    }

    #[test]
    pub fn test_sufficient_coverage_yields_nothing() {
        let analyzer = IndexCoverageAnalyzer::new();
        let query = query("SELECT * FROM emp WHERE dept_id = :1");
        let indexes = [IndexMetadata::btree("IDX_EMP_DEPT", "emp", &["dept_id"])];

        let result = analyzer.analyze(&query, &indexes, &[]);

        assert!(result.is_empty());
    }

    #[test]
    pub fn test_misordered_index_is_replaced_not_extended() {
        let analyzer = IndexCoverageAnalyzer::new();
        let query = query("SELECT * FROM emp WHERE dept_id = :1 AND hire_date > :2");
        let indexes = [IndexMetadata::btree("IDX_WRONG", "emp", &["hire_date", "dept_id"])];

        let result = analyzer.analyze(&query, &indexes, &[]);

        assert_eq!(result.len(), 1);
        assert_eq!(result[0].kind, RecommendationKind::CreateIndex);
    }

    #[test]
    pub fn test_join_columns_recommended_for_both_tables() {
        let analyzer = IndexCoverageAnalyzer::new();
        let query = query("SELECT e.id FROM emp e JOIN dept d ON e.dept_id = d.id WHERE d.region = 'EMEA'");

        let result = analyzer.analyze(&query, &[], &[]);

        let tables: Vec<&str> = result.iter().map(|r| r.table.as_str()).collect();
        assert!(tables.contains(&"emp"));
        assert!(tables.contains(&"dept"));

        let dept = result.iter().find(|r| r.table == "dept").unwrap();
        // equality columns: region (literal) and id (join); both present
        assert!(dept.columns.contains(&"region".to_string()));
        assert!(dept.columns.contains(&"id".to_string()));
    }

    #[test]
    pub fn test_selectivity_orders_recommendations() {
        let analyzer = IndexCoverageAnalyzer::new();
        let query = query(
            "SELECT e.id FROM emp e JOIN dept d ON e.dept_id = d.id WHERE e.badge_no = :1 AND d.kind = :2",
        );
        let statistics = [
            ColumnStatistics::new("emp", "badge_no").with_distinct(100_000),
            ColumnStatistics::new("dept", "kind").with_distinct(2),
        ];

        let result = analyzer.analyze(&query, &[], &statistics);

        assert_eq!(result.len(), 2);
        // the highly selective emp recommendation outranks the dept one
        assert_eq!(result[0].table, "emp");
        assert!(result[0].benefit_score > result[1].benefit_score);
    }

    #[test]
    pub fn test_determinism() {
        let analyzer = IndexCoverageAnalyzer::new();
        let query = query(
            "SELECT e.id FROM emp e JOIN dept d ON e.dept_id = d.id WHERE e.status = 'A' AND d.region = 'EMEA' ORDER BY e.hire_date",
        );
        let indexes = [
            IndexMetadata::btree("IDX_A", "emp", &["status"]),
            IndexMetadata::btree("IDX_B", "dept", &["region", "id"]),
        ];
        let statistics = [
            ColumnStatistics::new("emp", "status").with_distinct(4),
            ColumnStatistics::new("dept", "region").with_distinct(7),
        ];

        let first = analyzer.analyze(&query, &indexes, &statistics);
        let second = analyzer.analyze(&query, &indexes, &statistics);

        assert_eq!(first, second);
    }

    #[test]
    pub fn test_missing_statistics_still_scores_positive() {
        let analyzer = IndexCoverageAnalyzer::new();
        let query = query("SELECT * FROM emp WHERE dept_id = :1");

        let with_stats = analyzer.analyze(
            &query,
            &[],
            &[ColumnStatistics::new("emp", "dept_id").with_distinct(1000)],
        );
        let without_stats = analyzer.analyze(&query, &[], &[]);

        assert!(without_stats[0].benefit_score > 0.0);
        // better statistics never lower the score below the neutral default
        assert!(with_stats[0].benefit_score >= without_stats[0].benefit_score);
    }

    #[test]
    pub fn test_covering_projection_bonus_is_monotone() {
        let analyzer = IndexCoverageAnalyzer::new();

        let covered = query("SELECT dept_id FROM emp WHERE dept_id = :1");
        let uncovered = query("SELECT salary FROM emp WHERE dept_id = :1");

        let covered_score = analyzer.analyze(&covered, &[], &[])[0].benefit_score;
        let uncovered_score = analyzer.analyze(&uncovered, &[], &[])[0].benefit_score;

        assert!(covered_score > uncovered_score);
    }
}
