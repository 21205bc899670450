use indexmap::IndexMap;

use crate::parser::{
    ParseError, ParseErrorKind,
    ast::{ColumnExpr, ComparatorOp, Condition, JoinType, SelectItem, SelectStatement, TableSource, ValueExpr},
    resolve::{ColumnRef, JoinEdge, Operand, ParsedQuery, Predicate, PredicateOp, TableRef},
};

/// What a visible name (alias or table name) refers to.
enum Scope {
    Base(usize),
    Derived,
}

/// Flattens a parsed `SelectStatement` into a `ParsedQuery`: aliases are
/// resolved, join constraints and implicit comma-joins are normalized into
/// the same edge shape, and the boolean tree becomes a flat predicate list
/// with OR membership recorded per predicate.
///
/// Nested statements are resolved leniently: a column referencing an outer
/// scope (correlated subquery) is dropped rather than rejected, since the
/// nested query is attached for display only.
pub struct QueryResolver<'a> {
    statement: &'a SelectStatement,
    tables: Vec<TableRef>,
    scopes: IndexMap<String, Scope>,
    lenient: bool,
}

impl<'a> QueryResolver<'a> {
    pub fn resolve(statement: &SelectStatement) -> Result<ParsedQuery, ParseError> {
        Self::resolve_scoped(statement, false)
    }

    fn resolve_scoped(statement: &SelectStatement, lenient: bool) -> Result<ParsedQuery, ParseError> {
        let mut resolver = QueryResolver {
            statement,
            tables: vec![],
            scopes: IndexMap::new(),
            lenient,
        };
        resolver.run()
    }

    fn run(&mut self) -> Result<ParsedQuery, ParseError> {
        let statement = self.statement;
        let mut query = ParsedQuery::default();

        // 1) visible names: FROM sources first, then joined sources
        for source in &statement.tables {
            self.register_source(source, &mut query)?;
        }
        for join in &statement.joins {
            self.register_source(&join.source, &mut query)?;
        }
        query.tables = self.tables.clone();

        // 2) join constraints: equality edges plus flat predicates
        for join in &statement.joins {
            self.flatten_condition(&join.constraint, false, Some(join.join_type), &mut query)?;
        }

        // 3) WHERE tree; cross-table equalities normalize to inner join edges
        if let Some(criteria) = &statement.criteria {
            self.flatten_condition(criteria, false, None, &mut query)?;
        }

        // 4) group by / order by, order preserved
        for column in &statement.group_by {
            if let Some(resolved) = self.resolve_column(column)? {
                query.group_by.push(resolved);
            }
        }
        for order in &statement.order_by {
            if let Some(resolved) = self.resolve_column(&order.column)? {
                query.order_by.push(resolved);
            }
        }

        // 5) projection columns, wildcard collapses to "unknown set"
        for item in &statement.projection {
            match item {
                SelectItem::WildCard | SelectItem::WildCardWithTable(_) => {
                    query.wildcard_projection = true;
                }
                SelectItem::Expr { expr, .. } => {
                    let mut columns = vec![];
                    expr.collect_columns(&mut columns);
                    for column in columns {
                        if let Some(resolved) = self.resolve_column(column)? {
                            if !query.select_columns.contains(&resolved) {
                                query.select_columns.push(resolved);
                            }
                        }
                    }
                }
            }
        }

        Ok(query)
    }

    fn register_source(&mut self, source: &TableSource, query: &mut ParsedQuery) -> Result<(), ParseError> {
        match source {
            TableSource::Table { owner, name, alias } => {
                let alias = alias.clone().unwrap_or_else(|| name.clone());
                let key = alias.to_ascii_uppercase();
                if self.scopes.contains_key(&key) {
                    return ParseError::resolution(
                        ParseErrorKind::MalformedSyntax,
                        &format!("duplicate table alias '{}'", alias),
                    )
                    .err();
                }
                self.tables.push(TableRef {
                    owner: owner.clone(),
                    name: name.clone(),
                    alias,
                });
                self.scopes.insert(key, Scope::Base(self.tables.len() - 1));
            }
            TableSource::Derived { query: nested, alias } => {
                let resolved = Self::resolve_scoped(nested, true)?;
                query.subqueries.push(resolved);
                if let Some(alias) = alias {
                    let key = alias.to_ascii_uppercase();
                    if self.scopes.contains_key(&key) {
                        return ParseError::resolution(
                            ParseErrorKind::MalformedSyntax,
                            &format!("duplicate table alias '{}'", alias),
                        )
                        .err();
                    }
                    self.scopes.insert(key, Scope::Derived);
                }
            }
        }
        Ok(())
    }

    /// Resolves a column reference to its base table. `Ok(None)` means the
    /// reference points at a derived source (or an outer scope, when lenient)
    /// and is dropped from the flat model.
    fn resolve_column(&self, column: &ColumnExpr) -> Result<Option<ColumnRef>, ParseError> {
        match &column.qualifier {
            Some(qualifier) => match self.scopes.get(&qualifier.to_ascii_uppercase()) {
                Some(Scope::Base(index)) => {
                    Ok(Some(ColumnRef::new(&self.tables[*index].name, &column.name)))
                }
                Some(Scope::Derived) => Ok(None),
                None => {
                    if self.lenient {
                        return Ok(None);
                    }
                    ParseError::unresolved_column(&format!("{}.{}", qualifier, column.name)).err()
                }
            },
            None => {
                let mut base_tables = self.scopes.values().filter_map(|scope| match scope {
                    Scope::Base(index) => Some(*index),
                    Scope::Derived => None,
                });
                match (base_tables.next(), base_tables.next()) {
                    (Some(index), None) => {
                        Ok(Some(ColumnRef::new(&self.tables[index].name, &column.name)))
                    }
                    _ if self.lenient => Ok(None),
                    _ => ParseError::unresolved_column(&column.name).err(),
                }
            }
        }
    }

    fn flatten_condition(
        &self,
        condition: &Condition,
        or_group: bool,
        join_type: Option<JoinType>,
        query: &mut ParsedQuery,
    ) -> Result<(), ParseError> {
        match condition {
            Condition::And(items) => {
                for item in items {
                    self.flatten_condition(item, or_group, join_type, query)?;
                }
            }
            Condition::Or(items) => {
                for item in items {
                    self.flatten_condition(item, true, join_type, query)?;
                }
            }
            Condition::Compare { left, op, right } => {
                self.flatten_compare(left, *op, right, or_group, join_type, query)?;
            }
            Condition::Between { expr, low, high, negated } => {
                if let Some(column) = self.value_column(expr)? {
                    let low = self.value_operand(low)?;
                    let high = self.value_operand(high)?;
                    let operand = match (low, high) {
                        (Some(low), Some(high)) => {
                            Operand::Range { low: Box::new(low), high: Box::new(high) }
                        }
                        _ => Operand::None,
                    };
                    query.predicates.push(Predicate {
                        table: column.table,
                        column: column.column,
                        operator: PredicateOp::Between,
                        operand,
                        or_group,
                        negated: *negated,
                    });
                }
            }
            Condition::InList { expr, list, negated } => {
                if let Some(column) = self.value_column(expr)? {
                    let mut items = vec![];
                    for value in list {
                        items.push(self.value_operand(value)?.unwrap_or(Operand::None));
                    }
                    query.predicates.push(Predicate {
                        table: column.table,
                        column: column.column,
                        operator: PredicateOp::In,
                        operand: Operand::List(items),
                        or_group,
                        negated: *negated,
                    });
                }
            }
            Condition::InSelect { expr, query: nested, negated } => {
                let resolved = Self::resolve_scoped(nested, true)?;
                query.subqueries.push(resolved);
                if let Some(column) = self.value_column(expr)? {
                    query.predicates.push(Predicate {
                        table: column.table,
                        column: column.column,
                        operator: PredicateOp::In,
                        operand: Operand::Subquery,
                        or_group,
                        negated: *negated,
                    });
                }
            }
            Condition::Like { expr, pattern, negated } => {
                if let Some(column) = self.value_column(expr)? {
                    let operand = self.value_operand(pattern)?.unwrap_or(Operand::None);
                    query.predicates.push(Predicate {
                        table: column.table,
                        column: column.column,
                        operator: PredicateOp::Like,
                        operand,
                        or_group,
                        negated: *negated,
                    });
                }
            }
            Condition::IsNull { expr, negated } => {
                if let Some(column) = self.value_column(expr)? {
                    query.predicates.push(Predicate {
                        table: column.table,
                        column: column.column,
                        operator: PredicateOp::IsNull,
                        operand: Operand::None,
                        or_group,
                        negated: *negated,
                    });
                }
            }
        }
        Ok(())
    }

    fn flatten_compare(
        &self,
        left: &ValueExpr,
        op: ComparatorOp,
        right: &ValueExpr,
        or_group: bool,
        join_type: Option<JoinType>,
        query: &mut ParsedQuery,
    ) -> Result<(), ParseError> {
        let operator = Self::comparator_to_op(op);
        let left_column = self.value_column(left)?;
        let right_column = self.value_column(right)?;

        match (left_column, right_column) {
            (Some(left), Some(right)) => {
                let cross_table = !left.table.eq_ignore_ascii_case(&right.table);

                // An un-OR-ed cross-table equality is a join edge, whether it
                // came from ON or from the WHERE clause of a comma-join.
                if cross_table && operator == PredicateOp::Eq && !or_group {
                    query.joins.push(JoinEdge {
                        left_table: left.table.clone(),
                        left_column: left.column.clone(),
                        right_table: right.table.clone(),
                        right_column: right.column.clone(),
                        join_type: join_type.unwrap_or(JoinType::Inner),
                    });
                }

                query.predicates.push(Predicate {
                    table: left.table.clone(),
                    column: left.column.clone(),
                    operator,
                    operand: Operand::Column(right.clone()),
                    or_group,
                    negated: false,
                });
                query.predicates.push(Predicate {
                    table: right.table,
                    column: right.column,
                    operator: operator.flipped(),
                    operand: Operand::Column(left),
                    or_group,
                    negated: false,
                });
            }
            (Some(column), None) => {
                if let Some(operand) = self.value_operand(right)? {
                    query.predicates.push(Predicate {
                        table: column.table,
                        column: column.column,
                        operator,
                        operand,
                        or_group,
                        negated: false,
                    });
                }
            }
            (None, Some(column)) => {
                if let Some(operand) = self.value_operand(left)? {
                    query.predicates.push(Predicate {
                        table: column.table,
                        column: column.column,
                        operator: operator.flipped(),
                        operand,
                        or_group,
                        negated: false,
                    });
                }
            }
            // no resolvable column on either side, nothing to record
            (None, None) => {}
        }

        Ok(())
    }

    /// The column behind a scalar position, when there is exactly one plain
    /// column reference there. Function applications are not index-usable
    /// and yield `None`.
    fn value_column(&self, value: &ValueExpr) -> Result<Option<ColumnRef>, ParseError> {
        match value {
            ValueExpr::Column(column) => self.resolve_column(column),
            _ => Ok(None),
        }
    }

    /// Literal and bind operands survive into the flat model; anything else
    /// (function result, wildcard) yields `None`.
    fn value_operand(&self, value: &ValueExpr) -> Result<Option<Operand>, ParseError> {
        match value {
            ValueExpr::Literal(literal) => Ok(Some(Operand::Literal(literal.clone()))),
            ValueExpr::Bind(name) => Ok(Some(Operand::Bind(name.clone()))),
            ValueExpr::Column(column) => Ok(self.resolve_column(column)?.map(Operand::Column)),
            _ => Ok(None),
        }
    }

    fn comparator_to_op(op: ComparatorOp) -> PredicateOp {
        match op {
            ComparatorOp::Eq => PredicateOp::Eq,
            ComparatorOp::NotEq => PredicateOp::NotEq,
            ComparatorOp::Lt => PredicateOp::Lt,
            ComparatorOp::LtEq => PredicateOp::LtEq,
            ComparatorOp::Gt => PredicateOp::Gt,
            ComparatorOp::GtEq => PredicateOp::GtEq,
        }
    }
}
