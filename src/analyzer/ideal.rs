use crate::analyzer::{AnalyzerParams, PredicateClass, SelectivityMap};
use crate::parser::{ParsedQuery, TableRef};

/// The ideal composite index column order for one table of a query:
/// equality columns first (most selective leading), then at most one range
/// column, then the table's group-by/order-by columns in statement order.
///
/// Only one range column is kept: index columns after the first range column
/// cannot prune the scan any further.
#[derive(Debug, Clone, PartialEq)]
pub struct IdealIndex {
    pub table: String,
    pub columns: Vec<String>,
    pub equality_len: usize,
    pub range_len: usize,
    /// Product of the per-predicate estimates of the equality columns;
    /// 1.0 when there are none.
    pub combined_equality_selectivity: f64,
}

impl IdealIndex {
    /// `None` when the table contributes no usable column at all (every
    /// predicate OR-grouped or otherwise excluded, and no sort columns).
    pub fn build(
        query: &ParsedQuery,
        table: &TableRef,
        map: &SelectivityMap,
        params: &AnalyzerParams,
    ) -> Option<IdealIndex> {
        // (column, estimate, first source position)
        let mut equality: Vec<(String, f64, usize)> = vec![];
        let mut range: Option<(String, f64)> = None;

        for (position, predicate) in query.predicates_of(&table.name).enumerate() {
            match PredicateClass::of(predicate) {
                PredicateClass::Equality => {
                    let estimate = map.of_predicate(predicate, params);
                    match equality
                        .iter_mut()
                        .find(|(name, _, _)| name.eq_ignore_ascii_case(&predicate.column))
                    {
                        Some(entry) => entry.1 = entry.1.min(estimate),
                        None => equality.push((predicate.column.clone(), estimate, position)),
                    }
                }
                PredicateClass::Range => {
                    let estimate = map.of_predicate(predicate, params);
                    match &range {
                        Some((_, best)) if *best <= estimate => {}
                        _ => range = Some((predicate.column.clone(), estimate)),
                    }
                }
                PredicateClass::Excluded => {}
            }
        }

        // more selective columns lead; source order settles ties
        equality.sort_by(|a, b| a.1.total_cmp(&b.1).then(a.2.cmp(&b.2)));

        let mut columns: Vec<String> = vec![];
        let mut combined = 1.0;
        for (name, estimate, _) in &equality {
            columns.push(name.clone());
            combined *= estimate;
        }
        let equality_len = columns.len();

        let mut range_len = 0;
        if let Some((name, _)) = range {
            if !contains_ci(&columns, &name) {
                columns.push(name);
                range_len = 1;
            }
        }

        for sort_column in query.group_by.iter().chain(query.order_by.iter()) {
            if !sort_column.table.eq_ignore_ascii_case(&table.name) {
                continue;
            }
            if !contains_ci(&columns, &sort_column.column) {
                columns.push(sort_column.column.clone());
            }
        }

        if columns.is_empty() {
            return None;
        }

        Some(IdealIndex {
            table: table.name.clone(),
            columns,
            equality_len,
            range_len,
            combined_equality_selectivity: combined,
        })
    }

    /// Columns driven by predicates rather than sort avoidance.
    pub fn predicate_len(&self) -> usize {
        self.equality_len + self.range_len
    }
}

fn contains_ci(columns: &[String], candidate: &str) -> bool {
    columns.iter().any(|column| column.eq_ignore_ascii_case(candidate))
}
