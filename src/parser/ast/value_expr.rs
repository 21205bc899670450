use std::fmt;

use crate::parser::{ParseError, StatementParser, TextCollector, ast::{ColumnExpr, Literal}};

#[derive(Debug, Clone, PartialEq)]
pub struct FunctionExpr {
    pub name: String,
    pub args: Vec<ValueExpr>,
    pub distinct: bool,
}

/// A scalar position in the statement: predicate side, projection item,
/// function argument. Wildcards are only legal where the caller allows them.
#[derive(Clone, PartialEq)]
pub enum ValueExpr {
    Literal(Literal),
    Bind(String),
    Column(ColumnExpr),
    Function(FunctionExpr),
    WildCard,
    WildCardWithTable(String),
}

impl ValueExpr {
    pub fn parse(parser: &mut StatementParser, allow_wildcard: bool) -> Result<ValueExpr, ParseError> {
        parser.next_non_whitespace();

        if parser.eof() {
            return ParseError::new("Invalid scalar value", parser.position, parser).err();
        }

        if parser.current() == ':' {
            return Literal::parse_bind_name(parser).map(ValueExpr::Bind);
        }

        if Literal::is_number_start(parser) {
            return Literal::parse_number(parser).map(ValueExpr::Literal);
        }

        if Literal::is_string_delimiter(parser) {
            return Literal::parse_string(parser).map(ValueExpr::Literal);
        }

        if let Some(literal) = Literal::parse_keyword(parser) {
            return Ok(ValueExpr::Literal(literal));
        }

        Self::parse_column_or_function(parser, allow_wildcard)
    }

    fn parse_column_or_function(parser: &mut StatementParser, allow_wildcard: bool) -> Result<ValueExpr, ParseError> {
        let pivot = parser.position;

        if parser.current() == '*' {
            if !allow_wildcard {
                return ParseError::new("Wildcard not allowed here", pivot, parser).err();
            }
            parser.next();
            return Ok(ValueExpr::WildCard);
        }

        if parser.current().is_ascii_digit() {
            return ParseError::new("Invalid scalar value", pivot, parser).err();
        }

        let first = TextCollector::collect(parser)?;
        if first.is_empty() {
            return ParseError::new("Invalid scalar value", pivot, parser).err();
        }

        if parser.current() == '(' {
            let (args, distinct) = Self::parse_args(parser)?;
            return Ok(ValueExpr::Function(FunctionExpr { name: first, args, distinct }));
        }

        if parser.current() != '.' {
            return Ok(ValueExpr::Column(ColumnExpr { qualifier: None, name: first }));
        }

        parser.next();

        if parser.current() == '*' {
            if !allow_wildcard {
                return ParseError::new("Wildcard not allowed here", parser.position, parser).err();
            }
            parser.next();
            return Ok(ValueExpr::WildCardWithTable(first));
        }

        let pivot = parser.position;
        let second = TextCollector::collect(parser)?;
        if second.is_empty() || parser.current() == '.' {
            return ParseError::new("Invalid column", pivot, parser).err();
        }

        if parser.current() == '(' {
            let (args, distinct) = Self::parse_args(parser)?;
            return Ok(ValueExpr::Function(FunctionExpr {
                name: format!("{}.{}", first, second),
                args,
                distinct,
            }));
        }

        Ok(ValueExpr::Column(ColumnExpr { qualifier: Some(first), name: second }))
    }

    fn parse_args(parser: &mut StatementParser) -> Result<(Vec<ValueExpr>, bool), ParseError> {
        let pivot = parser.position;
        parser.next(); // consume '('
        parser.next_non_whitespace();

        let mut distinct = false;
        if parser.comparers.distinct.compare(parser) {
            parser.jump(parser.comparers.distinct.length);
            distinct = true;
        }

        let mut args: Vec<ValueExpr> = vec![];

        parser.next_non_whitespace();
        if parser.current() == ')' {
            parser.next();
            return Ok((args, distinct));
        }

        loop {
            args.push(ValueExpr::parse(parser, true)?);
            parser.next_non_whitespace();

            if parser.current() == ',' {
                parser.next();
                continue;
            }

            if parser.current() == ')' {
                parser.next();
                return Ok((args, distinct));
            }

            return ParseError::new("Invalid function arguments", pivot, parser).err();
        }
    }

    /// Collects every column referenced by this expression into `out`.
    pub fn collect_columns<'a>(&'a self, out: &mut Vec<&'a ColumnExpr>) {
        match self {
            ValueExpr::Column(column) => out.push(column),
            ValueExpr::Function(function) => {
                for arg in &function.args {
                    arg.collect_columns(out);
                }
            }
            _ => {}
        }
    }
}

impl fmt::Display for ValueExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValueExpr::Literal(literal) => write!(f, "{}", literal),
            ValueExpr::Bind(name) => write!(f, ":{}", name),
            ValueExpr::Column(column) => write!(f, "{}", column),
            ValueExpr::Function(function) => write!(f, "{}(...)", function.name),
            ValueExpr::WildCard => write!(f, "*"),
            ValueExpr::WildCardWithTable(table) => write!(f, "{}.*", table),
        }
    }
}

impl fmt::Debug for ValueExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValueExpr::Literal(_) => write!(f, "Literal({})", self),
            ValueExpr::Bind(_) => write!(f, "Bind({})", self),
            ValueExpr::Column(_) => write!(f, "Column({})", self),
            ValueExpr::Function(_) => write!(f, "Function({})", self),
            ValueExpr::WildCard => write!(f, "WildCard(*)"),
            ValueExpr::WildCardWithTable(table) => write!(f, "WildCardWithTable({}.*)", table),
        }
    }
}
