use std::fmt::Display;

use crate::parser::StatementParser;

/// Failure taxonomy for statement parsing and resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseErrorKind {
    UnsupportedStatementType,
    NestingTooDeep,
    UnresolvedColumnReference { column: String },
    MalformedSyntax,
}

#[derive(Debug, Clone)]
pub struct ParseError {
    pub kind: ParseErrorKind,
    pub message: String,
    pub text: String,
    pub start: usize,
    pub end: usize,
}

impl ParseError {
    pub fn new(message: &str, pivot: usize, parser: &StatementParser) -> Self {
        Self::with_kind(ParseErrorKind::MalformedSyntax, message, pivot, parser)
    }

    pub fn with_kind(kind: ParseErrorKind, message: &str, pivot: usize, parser: &StatementParser) -> Self {
        Self {
            kind,
            message: message.to_string(),
            text: parser.text_from_range(pivot, parser.position + 1),
            start: pivot,
            end: parser.position,
        }
    }

    /// Error raised during resolution, after the cursor is gone.
    pub fn resolution(kind: ParseErrorKind, message: &str) -> Self {
        Self {
            kind,
            message: message.to_string(),
            text: String::new(),
            start: 0,
            end: 0,
        }
    }

    pub fn unresolved_column(column: &str) -> Self {
        Self::resolution(
            ParseErrorKind::UnresolvedColumnReference { column: column.to_string() },
            &format!("column '{}' does not resolve to any table in the statement", column),
        )
    }

    pub fn err<T>(self) -> Result<T, ParseError> {
        Err(self)
    }
}

impl Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.kind {
            ParseErrorKind::UnsupportedStatementType => {
                write!(f, "ParseError: {}", self.message)
            }
            ParseErrorKind::NestingTooDeep => {
                write!(f, "ParseError: {}", self.message)
            }
            ParseErrorKind::UnresolvedColumnReference { column } => {
                write!(f, "ParseError: unresolved column reference '{}'", column)
            }
            ParseErrorKind::MalformedSyntax => {
                write!(
                    f,
                    "ParseError: {}\n  at [{}:{}] -> '{}'",
                    self.message, self.start, self.end, self.text
                )
            }
        }
    }
}

impl std::error::Error for ParseError {}
