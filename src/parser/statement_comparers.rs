use crate::parser::WordComparer;

/// Every keyword and operator the statement parser recognizes, pre-built once
/// per cursor. Multi-word comparers (`GROUP BY`, `IS NOT NULL`, `LEFT OUTER
/// JOIN`) expect single spaces between their words.
#[derive(Debug)]
pub struct StatementComparers {
    pub select: WordComparer,
    pub distinct: WordComparer,
    pub alias: WordComparer,
    pub from: WordComparer,
    pub join: WordComparer,
    pub inner_join: WordComparer,
    pub left_join: WordComparer,
    pub right_join: WordComparer,
    pub full_join: WordComparer,
    pub left_outer_join: WordComparer,
    pub right_outer_join: WordComparer,
    pub full_outer_join: WordComparer,
    pub on: WordComparer,
    pub r#where: WordComparer,
    pub group_by: WordComparer,
    pub having: WordComparer,
    pub order_by: WordComparer,
    pub asc: WordComparer,
    pub desc: WordComparer,
    pub and: WordComparer,
    pub or: WordComparer,
    pub equal: WordComparer,
    pub not_equal_b: WordComparer, // <>
    pub not_equal_c: WordComparer, // !=
    pub greater_than: WordComparer,
    pub greater_than_or_equal: WordComparer,
    pub less_than: WordComparer,
    pub less_than_or_equal: WordComparer,
    pub between: WordComparer,
    pub not_between: WordComparer,
    pub like: WordComparer,
    pub not_like: WordComparer,
    pub is_null: WordComparer,
    pub is_not_null: WordComparer,
    pub r#in: WordComparer,
    pub not_in: WordComparer,
    pub b_true: WordComparer,
    pub b_false: WordComparer,
    pub null: WordComparer,

    // statement types rejected up front
    pub insert: WordComparer,
    pub update: WordComparer,
    pub delete: WordComparer,
    pub merge: WordComparer,
    pub create: WordComparer,
    pub alter: WordComparer,
    pub drop: WordComparer,
    pub truncate: WordComparer,
    pub with: WordComparer,
}

impl Default for StatementComparers {
    fn default() -> Self {
        Self::new()
    }
}

impl StatementComparers {
    pub fn new() -> Self {
        Self {
            select: WordComparer::new("SELECT").with_whitespace_postfix(),
            distinct: WordComparer::new("DISTINCT").with_whitespace_postfix(),
            alias: WordComparer::new("AS").with_whitespace_postfix(),
            from: WordComparer::new("FROM").with_whitespace_postfix(),
            join: WordComparer::new("JOIN").with_whitespace_postfix(),
            inner_join: WordComparer::new("INNER JOIN").with_whitespace_postfix(),
            left_join: WordComparer::new("LEFT JOIN").with_whitespace_postfix(),
            right_join: WordComparer::new("RIGHT JOIN").with_whitespace_postfix(),
            full_join: WordComparer::new("FULL JOIN").with_whitespace_postfix(),
            left_outer_join: WordComparer::new("LEFT OUTER JOIN").with_whitespace_postfix(),
            right_outer_join: WordComparer::new("RIGHT OUTER JOIN").with_whitespace_postfix(),
            full_outer_join: WordComparer::new("FULL OUTER JOIN").with_whitespace_postfix(),
            on: WordComparer::new("ON").with_whitespace_postfix(),
            r#where: WordComparer::new("WHERE").with_whitespace_postfix(),
            group_by: WordComparer::new("GROUP BY").with_whitespace_postfix(),
            having: WordComparer::new("HAVING").with_whitespace_postfix(),
            order_by: WordComparer::new("ORDER BY").with_whitespace_postfix(),
            asc: WordComparer::new("ASC")
                .with_whitespace_postfix()
                .with_eof()
                .with_optional_postfix(',')
                .with_optional_postfix(')'),
            desc: WordComparer::new("DESC")
                .with_whitespace_postfix()
                .with_eof()
                .with_optional_postfix(',')
                .with_optional_postfix(')'),
            and: WordComparer::new("AND").with_whitespace_postfix(),
            or: WordComparer::new("OR").with_whitespace_postfix(),
            equal: WordComparer::new("="),
            not_equal_b: WordComparer::new("<>"),
            not_equal_c: WordComparer::new("!="),
            greater_than: WordComparer::new(">"),
            greater_than_or_equal: WordComparer::new(">="),
            less_than: WordComparer::new("<"),
            less_than_or_equal: WordComparer::new("<="),
            between: WordComparer::new("BETWEEN").with_whitespace_postfix(),
            not_between: WordComparer::new("NOT BETWEEN").with_whitespace_postfix(),
            like: WordComparer::new("LIKE").with_whitespace_postfix(),
            not_like: WordComparer::new("NOT LIKE").with_whitespace_postfix(),
            is_null: WordComparer::new("IS NULL")
                .with_any_delimiter_postfix()
                .with_eof(),
            is_not_null: WordComparer::new("IS NOT NULL")
                .with_any_delimiter_postfix()
                .with_eof(),
            r#in: WordComparer::new("IN").with_whitespace_postfix().with_delimiter('('),
            not_in: WordComparer::new("NOT IN").with_whitespace_postfix().with_delimiter('('),
            b_true: WordComparer::new("TRUE").with_any_delimiter_postfix().with_eof(),
            b_false: WordComparer::new("FALSE").with_any_delimiter_postfix().with_eof(),
            null: WordComparer::new("NULL").with_any_delimiter_postfix().with_eof(),

            insert: WordComparer::new("INSERT").with_whitespace_postfix(),
            update: WordComparer::new("UPDATE").with_whitespace_postfix(),
            delete: WordComparer::new("DELETE").with_whitespace_postfix(),
            merge: WordComparer::new("MERGE").with_whitespace_postfix(),
            create: WordComparer::new("CREATE").with_whitespace_postfix(),
            alter: WordComparer::new("ALTER").with_whitespace_postfix(),
            drop: WordComparer::new("DROP").with_whitespace_postfix(),
            truncate: WordComparer::new("TRUNCATE").with_whitespace_postfix(),
            with: WordComparer::new("WITH").with_whitespace_postfix(),
        }
    }

    /// True when the cursor sits on a statement keyword this engine refuses.
    pub fn at_unsupported_statement(&self, parser: &crate::parser::StatementParser) -> bool {
        self.insert.compare(parser)
            || self.update.compare(parser)
            || self.delete.compare(parser)
            || self.merge.compare(parser)
            || self.create.compare(parser)
            || self.alter.compare(parser)
            || self.drop.compare(parser)
            || self.truncate.compare(parser)
            || self.with.compare(parser)
    }
}
