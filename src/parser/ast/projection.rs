use crate::parser::{ParseError, Phase, StatementParser, TextCollector, ast::ValueExpr};

#[derive(Debug, Clone, PartialEq)]
pub enum SelectItem {
    WildCard,
    WildCardWithTable(String),
    Expr { expr: ValueExpr, alias: Option<String> },
}

pub struct ProjectionParser;

impl ProjectionParser {
    /// Parses `SELECT [DISTINCT] item, item, ...` up to the next clause.
    pub fn parse(parser: &mut StatementParser) -> Result<(bool, Vec<SelectItem>), ParseError> {
        if !parser.comparers.select.compare(parser) {
            return ParseError::new("Invalid statement, expected SELECT", parser.position, parser).err();
        }
        parser.jump(parser.comparers.select.length);
        parser.next_non_whitespace();

        let mut distinct = false;
        if parser.comparers.distinct.compare(parser) {
            parser.jump(parser.comparers.distinct.length);
            distinct = true;
        }

        let mut items: Vec<SelectItem> = vec![];
        loop {
            let expr = ValueExpr::parse(parser, true)?;
            let item = match expr {
                ValueExpr::WildCard => SelectItem::WildCard,
                ValueExpr::WildCardWithTable(table) => SelectItem::WildCardWithTable(table),
                expr => {
                    let alias = Self::parse_alias(parser)?;
                    SelectItem::Expr { expr, alias }
                }
            };
            items.push(item);

            parser.next_non_whitespace();

            if parser.current() == ',' {
                parser.next();
                continue;
            }

            if parser.phase > Phase::Projection {
                break;
            }

            if parser.check_next_phase() {
                break;
            }

            return ParseError::new("Invalid projection", parser.position, parser).err();
        }

        Ok((distinct, items))
    }

    fn parse_alias(parser: &mut StatementParser) -> Result<Option<String>, ParseError> {
        parser.next_non_whitespace();

        if parser.current() == ',' || parser.eof() {
            return Ok(None);
        }

        if parser.comparers.alias.compare(parser) {
            parser.jump(parser.comparers.alias.length);
            parser.next_non_whitespace();
            let pivot = parser.position;
            let alias = TextCollector::collect(parser)?;
            if alias.is_empty() {
                return ParseError::new("Invalid projection alias", pivot, parser).err();
            }
            return Ok(Some(alias));
        }

        if parser.check_next_phase() {
            return Ok(None);
        }

        let pivot = parser.position;
        if parser.current().is_ascii_digit() {
            return ParseError::new("Invalid projection alias", pivot, parser).err();
        }
        let alias = TextCollector::collect(parser)?;
        if alias.is_empty() {
            return ParseError::new("Invalid projection alias", pivot, parser).err();
        }
        Ok(Some(alias))
    }
}
