use crate::parser::StatementComparers;

/// Clauses of a SELECT statement, in source order. The cursor only ever moves
/// forward through these; `check_next_phase` refuses to re-enter an earlier one.
#[derive(Debug, Default, Clone, Copy, PartialEq, PartialOrd)]
pub enum Phase {
    #[default]
    Projection = 0,
    Tables = 1,
    Joins = 2,
    Criteria = 3,
    GroupBy = 4,
    Having = 5,
    OrderBy = 6,
    EOF = 7,
}

/// Character cursor over a single SQL statement.
///
/// Clause parsers advance the cursor and consult `comparers` for keyword
/// matches; `subquery_depth` tracks how many `(SELECT ...)` scopes enclose the
/// current position so a closing parenthesis can terminate the inner statement.
#[derive(Debug, Default)]
pub struct StatementParser {
    pub position: usize,
    pub length: usize,
    pub text_v: Vec<char>,
    pub text: String,
    pub phase: Phase,
    pub subquery_depth: usize,

    pub comparers: StatementComparers,
}

impl StatementParser {
    pub fn new(sql: &str) -> Self {
        // A single trailing terminator is tolerated; anything after it is not.
        let sql = sql.trim_end().trim_end_matches(';').trim_end();
        let text_v: Vec<char> = sql.chars().collect();
        Self {
            position: 0,
            length: text_v.len(),
            text_v,
            text: sql.to_string(),
            comparers: StatementComparers::new(),
            ..Default::default()
        }
    }

    pub fn eof(&self) -> bool {
        self.position >= self.length
    }

    pub fn current(&self) -> char {
        if self.position < self.length {
            return self.text_v[self.position];
        }

        '\0'
    }

    pub fn peek(&self, ahead: usize) -> char {
        if self.position + ahead < self.length {
            return self.text_v[self.position + ahead];
        }

        '\0'
    }

    pub fn next(&mut self) {
        self.position += 1;
    }

    pub fn next_non_whitespace(&mut self) {
        while self.current().is_whitespace() {
            self.next();
        }
    }

    pub fn jump(&mut self, ahead: usize) {
        if self.position + ahead < self.length {
            self.position += ahead;
        } else {
            self.position = self.length;
        }
    }

    pub fn text_from_range(&self, start: usize, end: usize) -> String {
        let mut end = end;
        if end > self.length {
            end = self.length;
        }
        if start >= end {
            return String::new();
        }
        self.text_v[start..end].iter().collect()
    }

    pub fn text_from_pivot(&self, pivot: usize) -> String {
        self.text_from_range(pivot, self.position)
    }

    /// Look at the upcoming token and, when it opens a later clause, advance
    /// `phase` to it. Returns true when the phase changed (or EOF was reached).
    ///
    /// Inside a subquery a closing parenthesis ends the statement: the caller
    /// that opened the scope consumes the `)` and restores its own phase.
    pub fn check_next_phase(&mut self) -> bool {
        self.next_non_whitespace();

        if self.eof() {
            self.phase = Phase::EOF;
            return true;
        }

        if self.subquery_depth > 0 && self.current() == ')' {
            self.phase = Phase::EOF;
            return true;
        }

        if self.phase < Phase::OrderBy && self.comparers.order_by.compare(self) {
            self.phase = Phase::OrderBy;
            return true;
        }

        if self.phase < Phase::Having && self.comparers.having.compare(self) {
            self.phase = Phase::Having;
            return true;
        }

        if self.phase < Phase::GroupBy && self.comparers.group_by.compare(self) {
            self.phase = Phase::GroupBy;
            return true;
        }

        if self.phase < Phase::Criteria && self.comparers.r#where.compare(self) {
            self.phase = Phase::Criteria;
            return true;
        }

        if self.phase <= Phase::Joins && self.at_join_keyword() {
            self.phase = Phase::Joins;
            return true;
        }

        if self.phase < Phase::Tables && self.comparers.from.compare(self) {
            self.phase = Phase::Tables;
            return true;
        }

        false
    }

    pub fn at_join_keyword(&self) -> bool {
        self.comparers.inner_join.compare(self)
            || self.comparers.left_outer_join.compare(self)
            || self.comparers.right_outer_join.compare(self)
            || self.comparers.full_outer_join.compare(self)
            || self.comparers.left_join.compare(self)
            || self.comparers.right_join.compare(self)
            || self.comparers.full_join.compare(self)
            || self.comparers.join.compare(self)
    }
}

#[cfg(test)]
mod tests {
    use crate::parser::{Phase, StatementParser};

    #[test]
    pub fn test_phase_progression() {
        let text = "SELECT a FROM t WHERE a = 1 GROUP BY a ORDER BY a";

        let mut parser = StatementParser::new(text);

        assert_eq!(parser.phase, Phase::Projection);

        parser.jump("SELECT a ".len());
        assert!(parser.check_next_phase());
        assert_eq!(parser.phase, Phase::Tables);

        parser.jump("FROM t ".len());
        assert!(parser.check_next_phase());
        assert_eq!(parser.phase, Phase::Criteria);

        parser.jump("WHERE a = 1 ".len());
        assert!(parser.check_next_phase());
        assert_eq!(parser.phase, Phase::GroupBy);

        parser.jump("GROUP BY a ".len());
        assert!(parser.check_next_phase());
        assert_eq!(parser.phase, Phase::OrderBy);
    }

    #[test]
    pub fn test_phase_eof() {
        let text = "SELECT";

        let mut parser = StatementParser::new(text);
        parser.jump(text.len());

        assert!(parser.check_next_phase());
        assert_eq!(parser.phase, Phase::EOF);
    }

    #[test]
    pub fn test_subquery_close_ends_statement() {
        let text = ") outer_rest";

        let mut parser = StatementParser::new(text);
        parser.subquery_depth = 1;

        assert!(parser.check_next_phase());
        assert_eq!(parser.phase, Phase::EOF);
        assert_eq!(parser.current(), ')');
    }

    #[test]
    pub fn test_text_from_range_clamps() {
        let parser = StatementParser::new("abc");

        assert_eq!(parser.text_from_range(1, 99), "bc");
        assert_eq!(parser.text_from_range(2, 1), "");
    }
}
