use crate::parser::{ParseError, Phase, StatementParser, ast::ColumnExpr};

pub struct GroupByParser;

impl GroupByParser {
    pub fn parse(parser: &mut StatementParser) -> Result<Vec<ColumnExpr>, ParseError> {
        if !parser.comparers.group_by.compare(parser) {
            return ParseError::new("Invalid GROUP BY", parser.position, parser).err();
        }
        parser.jump(parser.comparers.group_by.length);

        let mut columns: Vec<ColumnExpr> = vec![];
        loop {
            columns.push(ColumnExpr::parse(parser)?);
            parser.next_non_whitespace();

            if parser.current() == ',' {
                parser.next();
                continue;
            }

            if parser.phase > Phase::GroupBy {
                break;
            }

            if parser.check_next_phase() {
                break;
            }

            return ParseError::new("Invalid GROUP BY", parser.position, parser).err();
        }

        Ok(columns)
    }
}
