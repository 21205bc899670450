use std::fmt::Display;

use async_trait::async_trait;

use crate::catalog::{ColumnStatistics, IndexMetadata};
use crate::parser::TableRef;

/// Failures of the catalog boundary. `AccessDenied` and `TableNotFound` are
/// kept distinct so the caller can render an actionable message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MetadataError {
    AccessDenied { table: String },
    TableNotFound { table: String },
    ConnectionUnavailable(String),
}

impl Display for MetadataError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MetadataError::AccessDenied { table } => {
                write!(f, "MetadataError: no catalog read privilege on table '{}'", table)
            }
            MetadataError::TableNotFound { table } => {
                write!(f, "MetadataError: table '{}' does not exist in the target schema", table)
            }
            MetadataError::ConnectionUnavailable(reason) => {
                write!(f, "MetadataError: catalog connection unavailable ({})", reason)
            }
        }
    }
}

impl std::error::Error for MetadataError {}

/// Read-only boundary to the target database's catalog.
///
/// Implementations must scope each call to exactly the requested tables,
/// neither widening nor narrowing the set. The fetches are the only
/// suspension points of an analysis; cancelling the enclosing future aborts
/// them with nothing to roll back.
#[async_trait]
pub trait CatalogMetadataProvider: Send + Sync {
    async fn fetch_indexes(&self, tables: &[TableRef]) -> Result<Vec<IndexMetadata>, MetadataError>;

    async fn fetch_column_statistics(
        &self,
        tables: &[TableRef],
    ) -> Result<Vec<ColumnStatistics>, MetadataError>;
}
