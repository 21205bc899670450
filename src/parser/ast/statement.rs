use crate::parser::{
    ParseError, ParseErrorKind, Phase, StatementParser,
    ast::{ColumnExpr, Condition, GroupByParser, JoinClause, OrderByExpr, ProjectionParser, SelectItem, TableSource},
};

/// Raw parse result of a single SELECT statement, before alias/column
/// resolution. Clause order follows the cursor's `Phase` progression.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SelectStatement {
    pub distinct: bool,
    pub projection: Vec<SelectItem>,
    pub tables: Vec<TableSource>,
    pub joins: Vec<JoinClause>,
    pub criteria: Option<Condition>,
    pub group_by: Vec<ColumnExpr>,
    pub having: Option<Condition>,
    pub order_by: Vec<OrderByExpr>,
}

impl SelectStatement {
    pub fn parse(parser: &mut StatementParser) -> Result<Self, ParseError> {
        parser.next_non_whitespace();

        if parser.comparers.at_unsupported_statement(parser) {
            return ParseError::with_kind(
                ParseErrorKind::UnsupportedStatementType,
                "Only single SELECT statements are supported",
                parser.position,
                parser,
            )
            .err();
        }

        if !parser.comparers.select.compare(parser) {
            return ParseError::new("Invalid statement, expected SELECT", parser.position, parser).err();
        }

        let mut statement = SelectStatement::default();

        while parser.phase != Phase::EOF {
            match parser.phase {
                Phase::Projection => {
                    let (distinct, projection) = ProjectionParser::parse(parser)?;
                    statement.distinct = distinct;
                    statement.projection = projection;
                }
                Phase::Tables => statement.tables = TableSource::parse_from_clause(parser)?,
                Phase::Joins => statement.joins = JoinClause::parse(parser)?,
                Phase::Criteria => {
                    if !parser.comparers.r#where.compare(parser) {
                        return ParseError::new("Invalid WHERE clause", parser.position, parser).err();
                    }
                    parser.jump(parser.comparers.r#where.length);
                    statement.criteria = Some(Condition::parse(parser)?);
                    Self::finish_clause(parser, Phase::Criteria)?;
                }
                Phase::GroupBy => statement.group_by = GroupByParser::parse(parser)?,
                Phase::Having => {
                    if !parser.comparers.having.compare(parser) {
                        return ParseError::new("Invalid HAVING clause", parser.position, parser).err();
                    }
                    parser.jump(parser.comparers.having.length);
                    statement.having = Some(Condition::parse(parser)?);
                    Self::finish_clause(parser, Phase::Having)?;
                }
                Phase::OrderBy => statement.order_by = OrderByExpr::parse(parser)?,
                Phase::EOF => {}
            }
        }

        Ok(statement)
    }

    /// A clause parser that stopped without reaching the next clause must be
    /// sitting on one now (or on the end of an enclosing subquery).
    fn finish_clause(parser: &mut StatementParser, phase: Phase) -> Result<(), ParseError> {
        if parser.phase != phase {
            return Ok(());
        }
        parser.next_non_whitespace();
        if parser.check_next_phase() {
            return Ok(());
        }
        ParseError::new("Unexpected token", parser.position, parser).err()
    }

    /// Parses a nested `(SELECT ...)`; the caller has consumed the opening
    /// parenthesis and verified SELECT follows. Consumes the closing one.
    /// Only one level of nesting is accepted.
    pub fn parse_subquery(parser: &mut StatementParser) -> Result<Self, ParseError> {
        if parser.subquery_depth >= 1 {
            return ParseError::with_kind(
                ParseErrorKind::NestingTooDeep,
                "Subqueries may only nest one level deep",
                parser.position,
                parser,
            )
            .err();
        }

        parser.subquery_depth += 1;
        let saved_phase = parser.phase;
        parser.phase = Phase::Projection;

        let statement = Self::parse(parser)?;

        parser.next_non_whitespace();
        if parser.current() != ')' {
            return ParseError::new("Unterminated subquery", parser.position, parser).err();
        }
        parser.next();

        parser.subquery_depth -= 1;
        parser.phase = saved_phase;

        Ok(statement)
    }
}

impl TryFrom<&str> for SelectStatement {
    type Error = ParseError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let mut parser = StatementParser::new(value);
        SelectStatement::parse(&mut parser)
    }
}
