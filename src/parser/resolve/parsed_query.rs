use std::fmt;

use serde::Serialize;

use crate::parser::{ParseError, StatementParser, ast::{JoinType, Literal, SelectStatement}, resolve::QueryResolver};

/// A table referenced by the statement, with its alias resolved (the alias
/// defaults to the table name). No two entries of a query share an alias.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TableRef {
    pub owner: Option<String>,
    pub name: String,
    pub alias: String,
}

impl TableRef {
    pub fn qualified_name(&self) -> String {
        match &self.owner {
            Some(owner) => format!("{}.{}", owner, self.name),
            None => self.name.clone(),
        }
    }
}

impl fmt::Display for TableRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.qualified_name())?;
        if !self.alias.eq_ignore_ascii_case(&self.name) {
            write!(f, " {}", self.alias)?;
        }
        Ok(())
    }
}

/// A resolved column: `table` is the canonical table name (not the alias).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnRef {
    pub table: String,
    pub column: String,
}

impl ColumnRef {
    pub fn new(table: &str, column: &str) -> Self {
        Self { table: table.to_string(), column: column.to_string() }
    }
}

impl fmt::Display for ColumnRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.table, self.column)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum PredicateOp {
    #[serde(rename = "=")]
    Eq,
    #[serde(rename = "<>")]
    NotEq,
    #[serde(rename = "<")]
    Lt,
    #[serde(rename = "<=")]
    LtEq,
    #[serde(rename = ">")]
    Gt,
    #[serde(rename = ">=")]
    GtEq,
    #[serde(rename = "BETWEEN")]
    Between,
    #[serde(rename = "IN")]
    In,
    #[serde(rename = "LIKE")]
    Like,
    #[serde(rename = "IS NULL")]
    IsNull,
}

impl PredicateOp {
    /// The operator as seen from the other side of a comparison
    /// (`10 < col` reads as `col > 10`).
    pub fn flipped(&self) -> PredicateOp {
        match self {
            PredicateOp::Lt => PredicateOp::Gt,
            PredicateOp::LtEq => PredicateOp::GtEq,
            PredicateOp::Gt => PredicateOp::Lt,
            PredicateOp::GtEq => PredicateOp::LtEq,
            other => *other,
        }
    }
}

impl fmt::Display for PredicateOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PredicateOp::Eq => write!(f, "="),
            PredicateOp::NotEq => write!(f, "<>"),
            PredicateOp::Lt => write!(f, "<"),
            PredicateOp::LtEq => write!(f, "<="),
            PredicateOp::Gt => write!(f, ">"),
            PredicateOp::GtEq => write!(f, ">="),
            PredicateOp::Between => write!(f, "BETWEEN"),
            PredicateOp::In => write!(f, "IN"),
            PredicateOp::Like => write!(f, "LIKE"),
            PredicateOp::IsNull => write!(f, "IS NULL"),
        }
    }
}

/// Right-hand side of a predicate. Only `Literal` operands can refine
/// selectivity later; binds and subqueries stay "unknown".
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Operand {
    Literal(Literal),
    Bind(String),
    Column(ColumnRef),
    Range { low: Box<Operand>, high: Box<Operand> },
    List(Vec<Operand>),
    Subquery,
    None,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Predicate {
    pub table: String,
    pub column: String,
    pub operator: PredicateOp,
    pub operand: Operand,
    /// True when the predicate sits under an OR anywhere above it; such
    /// columns never enter the ideal index computation.
    pub or_group: bool,
    pub negated: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JoinEdge {
    pub left_table: String,
    pub left_column: String,
    pub right_table: String,
    pub right_column: String,
    pub join_type: JoinType,
}

/// Structured table/column usage of one SELECT statement. Immutable once
/// built; the analyzer treats it as a pure input.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ParsedQuery {
    pub tables: Vec<TableRef>,
    pub predicates: Vec<Predicate>,
    pub joins: Vec<JoinEdge>,
    pub group_by: Vec<ColumnRef>,
    pub order_by: Vec<ColumnRef>,
    pub select_columns: Vec<ColumnRef>,
    /// True when the projection contains `*` or `t.*`; the covering-index
    /// bonus is suppressed because the full column set is unknown.
    pub wildcard_projection: bool,
    pub subqueries: Vec<ParsedQuery>,
}

impl ParsedQuery {
    /// Parses a single SELECT statement into its structured representation.
    pub fn parse(sql: &str) -> Result<ParsedQuery, ParseError> {
        let mut parser = StatementParser::new(sql);
        let statement = SelectStatement::parse(&mut parser)?;
        QueryResolver::resolve(&statement)
    }

    pub fn table(&self, name: &str) -> Option<&TableRef> {
        self.tables.iter().find(|table| table.name.eq_ignore_ascii_case(name))
    }

    /// Fills in the owner of every unqualified table, used when the caller
    /// supplies a target schema.
    pub fn qualify_owner(&mut self, owner: &str) {
        for table in &mut self.tables {
            if table.owner.is_none() {
                table.owner = Some(owner.to_string());
            }
        }
        for subquery in &mut self.subqueries {
            subquery.qualify_owner(owner);
        }
    }

    /// Predicates of one table, in source order.
    pub fn predicates_of<'a>(&'a self, table: &'a str) -> impl Iterator<Item = &'a Predicate> + 'a {
        self.predicates.iter().filter(move |p| p.table.eq_ignore_ascii_case(table))
    }
}
