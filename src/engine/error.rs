use std::fmt::Display;

use crate::catalog::MetadataError;
use crate::parser::{ParseError, ParsedQuery};

/// Pipeline failure. A metadata failure still carries the successfully
/// parsed query so the caller can show what was understood.
#[derive(Debug, Clone)]
pub enum EngineError {
    Parse(ParseError),
    Metadata { source: MetadataError, parsed_query: ParsedQuery },
}

impl EngineError {
    /// The part of the request that did parse, when parsing got that far.
    pub fn parsed_query(&self) -> Option<&ParsedQuery> {
        match self {
            EngineError::Parse(_) => None,
            EngineError::Metadata { parsed_query, .. } => Some(parsed_query),
        }
    }

    /// HTTP-style status suggestion; the host layer owns the real mapping.
    pub fn status_hint(&self) -> u16 {
        match self {
            EngineError::Parse(_) => 400,
            EngineError::Metadata { source, .. } => match source {
                MetadataError::AccessDenied { .. } => 403,
                MetadataError::TableNotFound { .. } => 404,
                MetadataError::ConnectionUnavailable(_) => 404,
            },
        }
    }
}

impl Display for EngineError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EngineError::Parse(error) => write!(f, "{}", error),
            EngineError::Metadata { source, .. } => write!(f, "{}", source),
        }
    }
}

impl std::error::Error for EngineError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            EngineError::Parse(error) => Some(error),
            EngineError::Metadata { source, .. } => Some(source),
        }
    }
}

impl From<ParseError> for EngineError {
    fn from(error: ParseError) -> Self {
        EngineError::Parse(error)
    }
}
