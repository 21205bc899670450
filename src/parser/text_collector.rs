use crate::parser::{ParseError, StatementParser, WordComparer};

pub struct TextCollector;

pub type Stopper = dyn Fn(char) -> bool;

/// Valid characters inside an unquoted identifier. `$` and `#` appear in
/// Oracle data-dictionary names (`V$SQL`, `SYS#...`).
fn is_identifier_char(ch: char) -> bool {
    ch.is_ascii_alphanumeric() || ch == '_' || ch == '$' || ch == '#'
}

impl TextCollector {
    pub fn collect(parser: &mut StatementParser) -> Result<String, ParseError> {
        TextCollector::collect_with_stopper(parser, &|_| false)
    }

    pub fn collect_with_stopper(parser: &mut StatementParser, stopper: &Stopper) -> Result<String, ParseError> {
        let pivot = parser.position;
        while !parser.eof() && !WordComparer::is_any_delimiter(parser.current()) && !stopper(parser.current()) {
            if !is_identifier_char(parser.current()) {
                return Err(ParseError::new("Invalid identifier", pivot, parser));
            }
            parser.next();
        }
        Ok(parser.text_from_pivot(pivot))
    }
}

#[cfg(test)]
mod tests {
    use crate::parser::{StatementParser, TextCollector};

    #[test]
    pub fn test_collect_plain() {
        let mut parser = StatementParser::new("emp ");

        let result = TextCollector::collect(&mut parser).expect("Failed to collect identifier");

        assert_eq!(result, "emp");
    }

    #[test]
    pub fn test_collect_eof() {
        let mut parser = StatementParser::new("emp");

        let result = TextCollector::collect(&mut parser).expect("Failed to collect identifier");

        assert_eq!(result, "emp");
    }

    #[test]
    pub fn test_collect_oracle_chars() {
        let mut parser = StatementParser::new("v$session,");

        let result = TextCollector::collect(&mut parser).expect("Failed to collect identifier");

        assert_eq!(result, "v$session");
    }

    #[test]
    pub fn test_collect_stops_at_dot() {
        let mut parser = StatementParser::new("hr.employees");

        let result = TextCollector::collect(&mut parser).expect("Failed to collect identifier");

        assert_eq!(result, "hr");
        assert_eq!(parser.current(), '.');
    }

    #[test]
    pub fn test_collect_with_stopper() {
        let mut parser = StatementParser::new("emp*");

        let result = TextCollector::collect_with_stopper(&mut parser, &|current| current == '*')
            .expect("Failed to collect identifier");

        assert_eq!(result, "emp");
    }

    #[test]
    pub fn test_collect_rejects_invalid_char() {
        let mut parser = StatementParser::new("em%p");

        let result = TextCollector::collect(&mut parser);

        match result {
            Ok(_) => panic!(),
            Err(err) => {
                assert_eq!(err.text, "em%");
                assert_eq!(err.start, 0);
                assert_eq!(err.end, 2);
            }
        }
    }
}
