use ordered_float::NotNan;
use serde::Serialize;
use std::fmt::{self, Display};

use crate::parser::{ParseError, StatementParser, TextCollector};

#[derive(Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(untagged)]
pub enum Literal {
    String(String),
    Int(i64),
    Float(NotNan<f64>),
    Bool(bool),
    Null,
}

impl Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Literal::String(s) => write!(f, "'{}'", s),
            Literal::Int(i) => write!(f, "{}", i),
            Literal::Float(n) => write!(f, "{}", n.into_inner()),
            Literal::Bool(b) => write!(f, "{}", b),
            Literal::Null => write!(f, "NULL"),
        }
    }
}

impl fmt::Debug for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Literal::String(_) => write!(f, "String({})", self),
            Literal::Int(_) => write!(f, "Int({})", self),
            Literal::Float(_) => write!(f, "Float({})", self),
            Literal::Bool(_) => write!(f, "Bool({})", self),
            Literal::Null => write!(f, "Null"),
        }
    }
}

impl Literal {
    pub fn is_number_start(parser: &StatementParser) -> bool {
        let current = parser.current();
        current.is_ascii_digit() || (current == '-' && parser.peek(1).is_ascii_digit())
    }

    pub fn is_string_delimiter(parser: &StatementParser) -> bool {
        let current = parser.current();
        current == '\'' || current == '"'
    }

    pub fn parse_number(parser: &mut StatementParser) -> Result<Literal, ParseError> {
        let pivot = parser.position;
        if parser.current() == '-' {
            parser.next();
        }

        let mut dots = 0usize;
        while !parser.eof() && (parser.current().is_ascii_digit() || parser.current() == '.') {
            if parser.current() == '.' {
                dots += 1;
                if dots > 1 {
                    return ParseError::new("Invalid number", pivot, parser).err();
                }
            }
            parser.next();
        }

        let text = parser.text_from_pivot(pivot);
        if dots == 0 {
            return match text.parse::<i64>() {
                Ok(value) => Ok(Literal::Int(value)),
                Err(_) => ParseError::new("Invalid number", pivot, parser).err(),
            };
        }

        match text.parse::<f64>() {
            Ok(value) => match NotNan::new(value) {
                Ok(value) => Ok(Literal::Float(value)),
                Err(_) => ParseError::new("Invalid number", pivot, parser).err(),
            },
            Err(_) => ParseError::new("Invalid number", pivot, parser).err(),
        }
    }

    /// Parses a quoted string. A doubled delimiter inside the body escapes it
    /// (`'O''Brien'`).
    pub fn parse_string(parser: &mut StatementParser) -> Result<Literal, ParseError> {
        let pivot = parser.position;
        let delimiter = parser.current();
        parser.next();

        let mut value = String::new();
        while !parser.eof() {
            let current = parser.current();
            if current == delimiter {
                if parser.peek(1) == delimiter {
                    value.push(delimiter);
                    parser.jump(2);
                    continue;
                }
                parser.next();
                return Ok(Literal::String(value));
            }
            value.push(current);
            parser.next();
        }

        ParseError::new("Unterminated string literal", pivot, parser).err()
    }

    pub fn parse_keyword(parser: &mut StatementParser) -> Option<Literal> {
        if parser.comparers.b_true.compare(parser) {
            parser.jump(parser.comparers.b_true.length);
            return Some(Literal::Bool(true));
        }

        if parser.comparers.b_false.compare(parser) {
            parser.jump(parser.comparers.b_false.length);
            return Some(Literal::Bool(false));
        }

        if parser.comparers.null.compare(parser) {
            parser.jump(parser.comparers.null.length);
            return Some(Literal::Null);
        }

        None
    }

    /// Parses a bind variable after the `:` marker (`:1`, `:dept_id`).
    pub fn parse_bind_name(parser: &mut StatementParser) -> Result<String, ParseError> {
        let pivot = parser.position;
        parser.next();
        let name = TextCollector::collect(parser)?;
        if name.is_empty() {
            return ParseError::new("Invalid bind variable", pivot, parser).err();
        }
        Ok(name)
    }
}
