use crate::parser::{ParseError, StatementParser, ast::{ComparatorOp, SelectStatement, ValueExpr}};

/// Boolean expression tree over scalar comparisons. `And`/`Or` keep their
/// operands flat; SQL precedence (AND over OR) is applied when the flat
/// connector list is folded in `combine`.
#[derive(Debug, Clone, PartialEq)]
pub enum Condition {
    And(Vec<Condition>),
    Or(Vec<Condition>),

    Compare { left: ValueExpr, op: ComparatorOp, right: ValueExpr },
    Between { expr: ValueExpr, low: ValueExpr, high: ValueExpr, negated: bool },
    InList { expr: ValueExpr, list: Vec<ValueExpr>, negated: bool },
    InSelect { expr: ValueExpr, query: Box<SelectStatement>, negated: bool },
    Like { expr: ValueExpr, pattern: ValueExpr, negated: bool },
    IsNull { expr: ValueExpr, negated: bool },
}

enum Connector {
    And,
    Or,
}

impl Condition {
    pub fn parse(parser: &mut StatementParser) -> Result<Self, ParseError> {
        Self::parse_all(parser, 0)
    }

    pub fn parse_single(parser: &mut StatementParser) -> Result<Self, ParseError> {
        let left = ValueExpr::parse(parser, false)?;

        parser.next_non_whitespace();
        let pivot = parser.position;

        if let Some(op) = ComparatorOp::check(parser) {
            let right = ValueExpr::parse(parser, false)?;
            return Ok(Self::Compare { left, op, right });
        }

        if parser.comparers.is_not_null.compare(parser) {
            parser.jump(parser.comparers.is_not_null.length);
            return Ok(Self::IsNull { expr: left, negated: true });
        }

        if parser.comparers.is_null.compare(parser) {
            parser.jump(parser.comparers.is_null.length);
            return Ok(Self::IsNull { expr: left, negated: false });
        }

        if parser.comparers.not_between.compare(parser) {
            parser.jump(parser.comparers.not_between.length);
            return Self::parse_between_tail(parser, left, true);
        }

        if parser.comparers.between.compare(parser) {
            parser.jump(parser.comparers.between.length);
            return Self::parse_between_tail(parser, left, false);
        }

        if parser.comparers.not_in.compare(parser) {
            parser.jump(parser.comparers.not_in.length);
            return Self::parse_in_tail(parser, left, true);
        }

        if parser.comparers.r#in.compare(parser) {
            parser.jump(parser.comparers.r#in.length);
            return Self::parse_in_tail(parser, left, false);
        }

        if parser.comparers.not_like.compare(parser) {
            parser.jump(parser.comparers.not_like.length);
            let pattern = ValueExpr::parse(parser, false)?;
            return Ok(Self::Like { expr: left, pattern, negated: true });
        }

        if parser.comparers.like.compare(parser) {
            parser.jump(parser.comparers.like.length);
            let pattern = ValueExpr::parse(parser, false)?;
            return Ok(Self::Like { expr: left, pattern, negated: false });
        }

        ParseError::new("Invalid condition", pivot, parser).err()
    }

    fn parse_between_tail(parser: &mut StatementParser, expr: ValueExpr, negated: bool) -> Result<Self, ParseError> {
        let low = ValueExpr::parse(parser, false)?;

        parser.next_non_whitespace();
        if !parser.comparers.and.compare(parser) {
            return ParseError::new("Invalid BETWEEN, expected AND", parser.position, parser).err();
        }
        parser.jump(parser.comparers.and.length);

        let high = ValueExpr::parse(parser, false)?;

        Ok(Self::Between { expr, low, high, negated })
    }

    fn parse_in_tail(parser: &mut StatementParser, expr: ValueExpr, negated: bool) -> Result<Self, ParseError> {
        parser.next_non_whitespace();
        let pivot = parser.position;

        if parser.current() != '(' {
            return ParseError::new("Invalid IN, expected '('", pivot, parser).err();
        }
        parser.next();
        parser.next_non_whitespace();

        if parser.comparers.select.compare(parser) {
            let query = SelectStatement::parse_subquery(parser)?;
            return Ok(Self::InSelect { expr, query: Box::new(query), negated });
        }

        let mut list: Vec<ValueExpr> = vec![];
        loop {
            list.push(ValueExpr::parse(parser, false)?);
            parser.next_non_whitespace();

            if parser.current() == ',' {
                parser.next();
                continue;
            }

            if parser.current() == ')' {
                parser.next();
                return Ok(Self::InList { expr, list, negated });
            }

            return ParseError::new("Invalid IN list", pivot, parser).err();
        }
    }

    fn parse_all(parser: &mut StatementParser, depth: usize) -> Result<Self, ParseError> {
        let pivot = parser.position;
        let mut items: Vec<Condition> = vec![];
        let mut connectors: Vec<Connector> = vec![];

        loop {
            parser.next_non_whitespace();

            // A close paren either ends a group (depth > 0, consumed by the
            // caller) or ends the enclosing subquery (depth == 0, left for the
            // subquery machinery).
            if parser.current() == ')' {
                break;
            }

            if parser.check_next_phase() {
                break;
            }

            if parser.current() == '(' {
                parser.next();
                let inner = Self::parse_all(parser, depth + 1)?;
                parser.next_non_whitespace();
                if parser.current() != ')' {
                    return ParseError::new("Unterminated condition group", parser.position, parser).err();
                }
                parser.next();
                items.push(inner);
            } else {
                items.push(Self::parse_single(parser)?);
            }

            parser.next_non_whitespace();

            if parser.comparers.and.compare(parser) {
                parser.jump(parser.comparers.and.length);
                connectors.push(Connector::And);
                continue;
            }

            if parser.comparers.or.compare(parser) {
                parser.jump(parser.comparers.or.length);
                connectors.push(Connector::Or);
                continue;
            }

            break;
        }

        if items.is_empty() || connectors.len() != items.len() - 1 {
            return ParseError::new("Invalid condition", pivot, parser).err();
        }

        Ok(Self::combine(items, connectors))
    }

    /// Folds the flat item/connector lists, AND binding tighter than OR:
    /// `a AND b OR c` becomes `Or([And([a, b]), c])`.
    fn combine(items: Vec<Condition>, connectors: Vec<Connector>) -> Condition {
        fn collapse(mut run: Vec<Condition>) -> Condition {
            if run.len() == 1 {
                run.pop().unwrap()
            } else {
                Condition::And(run)
            }
        }

        let mut items = items.into_iter();
        let mut or_groups: Vec<Condition> = vec![];
        let mut run: Vec<Condition> = vec![items.next().unwrap()];

        for (connector, item) in connectors.into_iter().zip(items) {
            match connector {
                Connector::And => run.push(item),
                Connector::Or => {
                    or_groups.push(collapse(std::mem::take(&mut run)));
                    run.push(item);
                }
            }
        }
        or_groups.push(collapse(run));

        if or_groups.len() == 1 {
            or_groups.pop().unwrap()
        } else {
            Condition::Or(or_groups)
        }
    }
}
