use serde::Serialize;

use crate::parser::{ParseError, Phase, StatementParser, ast::{Condition, TableSource}};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum JoinType {
    Inner,
    Left,
    Right,
    Full,
}

impl JoinType {
    pub fn parse(parser: &mut StatementParser) -> Result<JoinType, ParseError> {
        parser.next_non_whitespace();

        if parser.comparers.left_outer_join.compare(parser) {
            parser.jump(parser.comparers.left_outer_join.length);
            return Ok(JoinType::Left);
        }

        if parser.comparers.right_outer_join.compare(parser) {
            parser.jump(parser.comparers.right_outer_join.length);
            return Ok(JoinType::Right);
        }

        if parser.comparers.full_outer_join.compare(parser) {
            parser.jump(parser.comparers.full_outer_join.length);
            return Ok(JoinType::Full);
        }

        if parser.comparers.inner_join.compare(parser) {
            parser.jump(parser.comparers.inner_join.length);
            return Ok(JoinType::Inner);
        }

        if parser.comparers.left_join.compare(parser) {
            parser.jump(parser.comparers.left_join.length);
            return Ok(JoinType::Left);
        }

        if parser.comparers.right_join.compare(parser) {
            parser.jump(parser.comparers.right_join.length);
            return Ok(JoinType::Right);
        }

        if parser.comparers.full_join.compare(parser) {
            parser.jump(parser.comparers.full_join.length);
            return Ok(JoinType::Full);
        }

        if parser.comparers.join.compare(parser) {
            parser.jump(parser.comparers.join.length);
            return Ok(JoinType::Inner);
        }

        ParseError::new("Invalid join type", parser.position, parser).err()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct JoinClause {
    pub join_type: JoinType,
    pub source: TableSource,
    pub constraint: Condition,
}

impl JoinClause {
    pub fn parse(parser: &mut StatementParser) -> Result<Vec<JoinClause>, ParseError> {
        let mut joins: Vec<JoinClause> = vec![];

        while parser.phase == Phase::Joins {
            let join_type = JoinType::parse(parser)?;
            let source = TableSource::parse(parser)?;

            parser.next_non_whitespace();
            if !parser.comparers.on.compare(parser) {
                return ParseError::new("Invalid join statement, expected ON", parser.position, parser).err();
            }
            parser.jump(parser.comparers.on.length);

            let constraint = Condition::parse(parser)?;

            joins.push(JoinClause { join_type, source, constraint });

            if parser.phase == Phase::Joins {
                parser.next_non_whitespace();
                if !parser.at_join_keyword() && !parser.check_next_phase() {
                    return ParseError::new("Invalid join statement", parser.position, parser).err();
                }
            }
        }

        Ok(joins)
    }
}

#[cfg(test)]
mod tests {
    use crate::parser::{StatementParser, ast::{JoinClause, JoinType, TableSource}};

    fn source_name(source: &TableSource) -> &str {
        match source {
            TableSource::Table { name, .. } => name,
            TableSource::Derived { .. } => panic!("expected base table"),
        }
    }

    #[test]
    pub fn test_inner_join() {
        let text = "INNER JOIN dept d ON d.id = e.dept_id";

        let mut parser = StatementParser::new(text);
        assert!(parser.check_next_phase());

        let result = JoinClause::parse(&mut parser).expect("Failed to parse join");

        assert_eq!(result.len(), 1);
        assert_eq!(result[0].join_type, JoinType::Inner);
        assert_eq!(source_name(&result[0].source), "dept");
    }

    #[test]
    pub fn test_bare_join_is_inner() {
        let text = "JOIN dept d ON d.id = e.dept_id";

        let mut parser = StatementParser::new(text);
        assert!(parser.check_next_phase());

        let result = JoinClause::parse(&mut parser).expect("Failed to parse join");

        assert_eq!(result.len(), 1);
        assert_eq!(result[0].join_type, JoinType::Inner);
    }

    #[test]
    pub fn test_left_outer_join() {
        let text = "LEFT OUTER JOIN dept d ON d.id = e.dept_id";

        let mut parser = StatementParser::new(text);
        assert!(parser.check_next_phase());

        let result = JoinClause::parse(&mut parser).expect("Failed to parse join");

        assert_eq!(result[0].join_type, JoinType::Left);
    }

    #[test]
    pub fn test_join_sequence() {
        let text = r#"INNER JOIN dept d ON d.id = e.dept_id
        LEFT JOIN loc l ON l.id = d.loc_id
        RIGHT JOIN reg r ON r.id = l.reg_id
        FULL JOIN co c ON c.id = r.co_id"#;

        let mut parser = StatementParser::new(text);
        assert!(parser.check_next_phase());

        let result = JoinClause::parse(&mut parser).expect("Failed to parse join");

        assert_eq!(result.len(), 4);

        let expect_names = ["dept", "loc", "reg", "co"];
        let expect_types = [JoinType::Inner, JoinType::Left, JoinType::Right, JoinType::Full];

        for (i, item) in result.iter().enumerate() {
            assert_eq!(source_name(&item.source), expect_names[i]);
            assert_eq!(item.join_type, expect_types[i]);
        }
    }

    #[test]
    pub fn test_join_missing_on() {
        let text = "INNER JOIN dept d WHERE d.id = 1";

        let mut parser = StatementParser::new(text);
        assert!(parser.check_next_phase());

        let result = JoinClause::parse(&mut parser);

        assert!(result.is_err());
    }

    #[test]
    pub fn test_join_compound_constraint() {
        let text = "INNER JOIN dept d ON d.id = e.dept_id AND d.region = e.region WHERE d.active = 1";

        let mut parser = StatementParser::new(text);
        assert!(parser.check_next_phase());

        let result = JoinClause::parse(&mut parser).expect("Failed to parse join");

        assert_eq!(result.len(), 1);
    }
}
