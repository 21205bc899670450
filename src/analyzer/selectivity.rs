use std::collections::HashMap;

use crate::analyzer::{AnalyzerParams, PredicateClass};
use crate::catalog::ColumnStatistics;
use crate::parser::{Operand, Predicate};

/// Per-column selectivity estimates derived from catalog statistics.
///
/// The estimate is the expected matched-row fraction of an equality probe:
/// `(1 - null_fraction) / distinct_cardinality`. Smaller is more selective.
/// Columns without usable statistics are absent; callers fall back to the
/// configured neutral value rather than treating them as worthless.
#[derive(Debug, Default)]
pub struct SelectivityMap {
    estimates: HashMap<(String, String), f64>,
}

impl SelectivityMap {
    pub fn build(statistics: &[ColumnStatistics]) -> Self {
        let mut estimates = HashMap::new();
        for stat in statistics {
            let Some(distinct) = stat.distinct_cardinality else { continue };
            if distinct == 0 {
                continue;
            }
            let non_null = 1.0 - stat.null_fraction.unwrap_or(0.0).clamp(0.0, 1.0);
            let estimate = (non_null / distinct as f64).clamp(f64::MIN_POSITIVE, 1.0);
            estimates.insert(
                (stat.table.to_ascii_uppercase(), stat.column.to_ascii_uppercase()),
                estimate,
            );
        }
        Self { estimates }
    }

    pub fn lookup(&self, table: &str, column: &str) -> Option<f64> {
        self.estimates
            .get(&(table.to_ascii_uppercase(), column.to_ascii_uppercase()))
            .copied()
    }

    pub fn estimate_or(&self, table: &str, column: &str, neutral: f64) -> f64 {
        self.lookup(table, column).unwrap_or(neutral)
    }

    /// Matched-row estimate for one predicate. Literal operands refine the
    /// estimate (an IN-list matches up to its item count); binds and
    /// subqueries stay at the column's base estimate or the neutral default.
    pub fn of_predicate(&self, predicate: &Predicate, params: &AnalyzerParams) -> f64 {
        let base = self.estimate_or(&predicate.table, &predicate.column, params.neutral_selectivity);

        match PredicateClass::of(predicate) {
            PredicateClass::Equality => match &predicate.operand {
                Operand::List(items) => (base * items.len() as f64).clamp(0.0, 1.0),
                _ => base,
            },
            PredicateClass::Range => base.max(params.range_selectivity_floor),
            PredicateClass::Excluded => 1.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::analyzer::{AnalyzerParams, SelectivityMap};
    use crate::catalog::ColumnStatistics;
    use crate::parser::{Operand, Predicate, PredicateOp, ast::Literal};

    fn predicate(column: &str, operator: PredicateOp, operand: Operand) -> Predicate {
        Predicate {
            table: "emp".to_string(),
            column: column.to_string(),
            operator,
            operand,
            or_group: false,
            negated: false,
        }
    }

    #[test]
    pub fn test_estimate_from_distinct_and_nulls() {
        let map = SelectivityMap::build(&[
            ColumnStatistics::new("emp", "dept_id").with_distinct(40),
            ColumnStatistics::new("emp", "flag").with_distinct(2).with_null_fraction(0.5),
        ]);

        assert_eq!(map.lookup("EMP", "DEPT_ID"), Some(1.0 / 40.0));
        assert_eq!(map.lookup("emp", "flag"), Some(0.25));
        assert_eq!(map.lookup("emp", "missing"), None);
    }

    #[test]
    pub fn test_zero_distinct_is_unknown() {
        let map = SelectivityMap::build(&[ColumnStatistics::new("emp", "empty").with_distinct(0)]);

        assert_eq!(map.lookup("emp", "empty"), None);
    }

    #[test]
    pub fn test_in_list_scales_with_item_count() {
        let params = AnalyzerParams::default();
        let map = SelectivityMap::build(&[ColumnStatistics::new("emp", "dept_id").with_distinct(10)]);

        let one = predicate("dept_id", PredicateOp::Eq, Operand::Literal(Literal::Int(1)));
        let three = predicate(
            "dept_id",
            PredicateOp::In,
            Operand::List(vec![
                Operand::Literal(Literal::Int(1)),
                Operand::Literal(Literal::Int(2)),
                Operand::Literal(Literal::Int(3)),
            ]),
        );

        let s_one = map.of_predicate(&one, &params);
        let s_three = map.of_predicate(&three, &params);

        assert!(s_one < s_three);
        assert_eq!(s_three, 0.3);
    }

    #[test]
    pub fn test_range_has_floor() {
        let params = AnalyzerParams::default();
        let map = SelectivityMap::build(&[ColumnStatistics::new("emp", "hire_date").with_distinct(10_000)]);

        let range = predicate("hire_date", PredicateOp::Gt, Operand::Bind("1".to_string()));

        assert_eq!(map.of_predicate(&range, &params), params.range_selectivity_floor);
    }

    #[test]
    pub fn test_unknown_column_is_neutral() {
        let params = AnalyzerParams::default();
        let map = SelectivityMap::build(&[]);

        let eq = predicate("dept_id", PredicateOp::Eq, Operand::Bind("1".to_string()));

        assert_eq!(map.of_predicate(&eq, &params), params.neutral_selectivity);
    }
}
