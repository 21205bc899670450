use crate::parser::{Operand, Predicate, PredicateOp, ast::Literal};

/// Index-design class of a predicate.
///
/// Equality-class columns can lead a composite index; range-class columns are
/// useful once, after every equality column; excluded predicates contribute
/// nothing (OR-grouped, negated, non-prefix LIKE, IS NULL, function results).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PredicateClass {
    Equality,
    Range,
    Excluded,
}

impl PredicateClass {
    pub fn of(predicate: &Predicate) -> PredicateClass {
        if predicate.or_group || predicate.negated {
            return PredicateClass::Excluded;
        }

        match predicate.operator {
            PredicateOp::Eq => match &predicate.operand {
                // a same-table column comparison is not a lookup key
                Operand::Column(other) if other.table.eq_ignore_ascii_case(&predicate.table) => {
                    PredicateClass::Excluded
                }
                Operand::Literal(_) | Operand::Bind(_) | Operand::Column(_) => PredicateClass::Equality,
                _ => PredicateClass::Excluded,
            },

            PredicateOp::In => match &predicate.operand {
                Operand::List(items) => {
                    let all_scalar = items
                        .iter()
                        .all(|item| matches!(item, Operand::Literal(_) | Operand::Bind(_)));
                    if all_scalar {
                        PredicateClass::Equality
                    } else {
                        PredicateClass::Excluded
                    }
                }
                // an IN-subquery is an equality semi-join on the probed column
                Operand::Subquery => PredicateClass::Equality,
                _ => PredicateClass::Excluded,
            },

            PredicateOp::Lt | PredicateOp::LtEq | PredicateOp::Gt | PredicateOp::GtEq => {
                match &predicate.operand {
                    Operand::Literal(_) | Operand::Bind(_) => PredicateClass::Range,
                    _ => PredicateClass::Excluded,
                }
            }

            PredicateOp::Between => match &predicate.operand {
                Operand::Range { .. } => PredicateClass::Range,
                _ => PredicateClass::Excluded,
            },

            PredicateOp::Like => match &predicate.operand {
                Operand::Literal(Literal::String(pattern)) => {
                    match Self::like_prefix(pattern) {
                        Some(_) => PredicateClass::Range,
                        None => PredicateClass::Excluded,
                    }
                }
                // the shape of a bind pattern is unknown at analysis time
                _ => PredicateClass::Excluded,
            },

            PredicateOp::NotEq | PredicateOp::IsNull => PredicateClass::Excluded,
        }
    }

    /// Literal prefix of a LIKE pattern, up to the first wildcard. `None`
    /// when the pattern starts with a wildcard — such a predicate cannot use
    /// an index range scan.
    pub fn like_prefix(pattern: &str) -> Option<&str> {
        let wildcard = pattern.find(['%', '_']).unwrap_or(pattern.len());
        if wildcard == 0 {
            return None;
        }
        Some(&pattern[..wildcard])
    }
}
