use crate::parser::{ParseError, Phase, StatementParser, ast::ColumnExpr};

#[derive(Debug, Clone, PartialEq)]
pub struct OrderByExpr {
    pub column: ColumnExpr,
    pub ascending: bool,
}

impl OrderByExpr {
    pub fn parse_single(parser: &mut StatementParser) -> Result<Self, ParseError> {
        let column = ColumnExpr::parse(parser)?;
        parser.next_non_whitespace();

        if parser.comparers.asc.compare(parser) {
            parser.jump(parser.comparers.asc.length);
            return Ok(OrderByExpr { column, ascending: true });
        }

        if parser.comparers.desc.compare(parser) {
            parser.jump(parser.comparers.desc.length);
            return Ok(OrderByExpr { column, ascending: false });
        }

        Ok(OrderByExpr { column, ascending: true })
    }

    pub fn parse(parser: &mut StatementParser) -> Result<Vec<Self>, ParseError> {
        if !parser.comparers.order_by.compare(parser) {
            return ParseError::new("Invalid ORDER BY", parser.position, parser).err();
        }
        parser.jump(parser.comparers.order_by.length);

        let mut orders: Vec<Self> = vec![];
        loop {
            orders.push(Self::parse_single(parser)?);
            parser.next_non_whitespace();

            if parser.current() == ',' {
                parser.next();
                continue;
            }

            if parser.phase > Phase::OrderBy {
                break;
            }

            if parser.check_next_phase() {
                break;
            }

            return ParseError::new("Invalid ORDER BY", parser.position, parser).err();
        }

        Ok(orders)
    }
}
