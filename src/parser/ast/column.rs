use std::fmt;

use crate::parser::{ParseError, StatementParser, TextCollector};

/// A column reference as written in the source: optionally qualified by a
/// table name or alias (`e.last_name`), resolution happens later.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct ColumnExpr {
    pub qualifier: Option<String>,
    pub name: String,
}

impl ColumnExpr {
    pub fn new(qualifier: Option<&str>, name: &str) -> Self {
        Self {
            qualifier: qualifier.map(|q| q.to_string()),
            name: name.to_string(),
        }
    }

    /// Parses `name` or `qualifier.name`. The cursor must sit on the first
    /// identifier character.
    pub fn parse(parser: &mut StatementParser) -> Result<ColumnExpr, ParseError> {
        parser.next_non_whitespace();
        let pivot = parser.position;

        if parser.current().is_ascii_digit() {
            return ParseError::new("Invalid column", pivot, parser).err();
        }

        let first = TextCollector::collect(parser)?;
        if first.is_empty() {
            return ParseError::new("Invalid column", pivot, parser).err();
        }

        if parser.current() != '.' {
            return Ok(ColumnExpr { qualifier: None, name: first });
        }

        parser.next();
        let pivot = parser.position;
        let second = TextCollector::collect(parser)?;
        if second.is_empty() || parser.current() == '.' {
            return ParseError::new("Invalid column", pivot, parser).err();
        }

        Ok(ColumnExpr { qualifier: Some(first), name: second })
    }
}

impl fmt::Display for ColumnExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.qualifier {
            Some(qualifier) => write!(f, "{}.{}", qualifier, self.name),
            None => write!(f, "{}", self.name),
        }
    }
}

impl fmt::Debug for ColumnExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ColumnExpr({})", self)
    }
}

#[cfg(test)]
mod tests {
    use crate::parser::{StatementParser, ast::ColumnExpr};

    #[test]
    pub fn test_column_plain() {
        let mut parser = StatementParser::new("last_name ");

        let result = ColumnExpr::parse(&mut parser).expect("Failed to parse column");

        assert_eq!(result.qualifier, None);
        assert_eq!(result.name, "last_name");
    }

    #[test]
    pub fn test_column_qualified() {
        let mut parser = StatementParser::new("e.last_name,");

        let result = ColumnExpr::parse(&mut parser).expect("Failed to parse column");

        assert_eq!(result.qualifier.unwrap(), "e");
        assert_eq!(result.name, "last_name");
    }

    #[test]
    pub fn test_column_double_dot_fails() {
        let mut parser = StatementParser::new("a.b.c");

        let result = ColumnExpr::parse(&mut parser);

        assert!(result.is_err());
    }

    #[test]
    pub fn test_column_leading_digit_fails() {
        let mut parser = StatementParser::new("9col");

        let result = ColumnExpr::parse(&mut parser);

        match result {
            Ok(_) => panic!(),
            Err(err) => assert_eq!(err.text, "9"),
        }
    }
}
