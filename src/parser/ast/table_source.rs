use crate::parser::{ParseError, Phase, StatementParser, TextCollector, ast::SelectStatement};

/// A FROM-clause entry: a base table (optionally `owner.`-qualified) or a
/// one-level derived table.
#[derive(Debug, Clone, PartialEq)]
pub enum TableSource {
    Table { owner: Option<String>, name: String, alias: Option<String> },
    Derived { query: Box<SelectStatement>, alias: Option<String> },
}

impl TableSource {
    pub fn parse(parser: &mut StatementParser) -> Result<TableSource, ParseError> {
        parser.next_non_whitespace();
        let pivot = parser.position;

        if parser.current() == '(' {
            parser.next();
            parser.next_non_whitespace();
            if !parser.comparers.select.compare(parser) {
                return ParseError::new("Invalid derived table, expected SELECT", pivot, parser).err();
            }
            let query = SelectStatement::parse_subquery(parser)?;
            let alias = Self::parse_alias(parser)?;
            return Ok(TableSource::Derived { query: Box::new(query), alias });
        }

        if parser.current().is_ascii_digit() {
            return ParseError::new("Invalid table name", pivot, parser).err();
        }

        let first = TextCollector::collect(parser)?;
        if first.is_empty() {
            return ParseError::new("Invalid table name", pivot, parser).err();
        }

        let (owner, name) = if parser.current() == '.' {
            parser.next();
            let pivot = parser.position;
            let second = TextCollector::collect(parser)?;
            if second.is_empty() || parser.current() == '.' {
                return ParseError::new("Invalid table name", pivot, parser).err();
            }
            (Some(first), second)
        } else {
            (None, first)
        };

        let alias = Self::parse_alias(parser)?;

        Ok(TableSource::Table { owner, name, alias })
    }

    /// Consumes an optional alias (`AS x` or bare `x`). Returns `None` when
    /// the next token starts another clause, a join, an `ON` constraint, or
    /// the source list continues.
    fn parse_alias(parser: &mut StatementParser) -> Result<Option<String>, ParseError> {
        parser.next_non_whitespace();

        if parser.current() == ',' || parser.current() == ')' || parser.eof() {
            return Ok(None);
        }

        if parser.comparers.alias.compare(parser) {
            parser.jump(parser.comparers.alias.length);
            parser.next_non_whitespace();
            let pivot = parser.position;
            let alias = TextCollector::collect(parser)?;
            if alias.is_empty() {
                return ParseError::new("Invalid table alias", pivot, parser).err();
            }
            return Ok(Some(alias));
        }

        if parser.comparers.on.compare(parser) {
            return Ok(None);
        }

        if parser.check_next_phase() {
            return Ok(None);
        }

        let pivot = parser.position;
        if parser.current().is_ascii_digit() {
            return ParseError::new("Invalid table alias", pivot, parser).err();
        }
        let alias = TextCollector::collect(parser)?;
        if alias.is_empty() {
            return ParseError::new("Invalid table alias", pivot, parser).err();
        }
        Ok(Some(alias))
    }

    /// Parses the whole FROM clause (the cursor must sit on `FROM`).
    pub fn parse_from_clause(parser: &mut StatementParser) -> Result<Vec<TableSource>, ParseError> {
        if !parser.comparers.from.compare(parser) {
            return ParseError::new("Invalid statement, expected FROM", parser.position, parser).err();
        }
        parser.jump(parser.comparers.from.length);

        let mut sources: Vec<TableSource> = vec![];
        loop {
            sources.push(Self::parse(parser)?);
            parser.next_non_whitespace();

            if parser.current() == ',' {
                parser.next();
                continue;
            }

            if parser.phase > Phase::Tables {
                break;
            }

            if parser.check_next_phase() {
                break;
            }

            return ParseError::new("Invalid FROM clause", parser.position, parser).err();
        }

        Ok(sources)
    }
}
