use std::collections::HashSet;

use async_trait::async_trait;
use indexmap::IndexMap;

use crate::catalog::{CatalogMetadataProvider, ColumnStatistics, IndexMetadata, MetadataError};
use crate::parser::TableRef;

/// In-memory catalog for tests and host harnesses. Tables must be registered
/// before they resolve; unknown tables answer `TableNotFound` and denied ones
/// `AccessDenied`, like the real boundary.
#[derive(Debug, Default)]
pub struct MemoryCatalog {
    tables: HashSet<String>,
    denied: HashSet<String>,
    indexes: IndexMap<String, Vec<IndexMetadata>>,
    statistics: IndexMap<String, Vec<ColumnStatistics>>,
}

impl MemoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    fn key(table: &str) -> String {
        table.to_ascii_uppercase()
    }

    pub fn add_table(&mut self, table: &str) -> &mut Self {
        self.tables.insert(Self::key(table));
        self
    }

    pub fn add_index(&mut self, index: IndexMetadata) -> &mut Self {
        let key = Self::key(&index.table);
        self.tables.insert(key.clone());
        self.indexes.entry(key).or_default().push(index);
        self
    }

    pub fn add_statistics(&mut self, statistics: ColumnStatistics) -> &mut Self {
        let key = Self::key(&statistics.table);
        self.tables.insert(key.clone());
        self.statistics.entry(key).or_default().push(statistics);
        self
    }

    /// Simulates a missing catalog read privilege on `table`.
    pub fn deny(&mut self, table: &str) -> &mut Self {
        let key = Self::key(table);
        self.tables.insert(key.clone());
        self.denied.insert(key);
        self
    }

    fn check(&self, table: &TableRef) -> Result<String, MetadataError> {
        let key = Self::key(&table.name);
        if self.denied.contains(&key) {
            return Err(MetadataError::AccessDenied { table: table.qualified_name() });
        }
        if !self.tables.contains(&key) {
            return Err(MetadataError::TableNotFound { table: table.qualified_name() });
        }
        Ok(key)
    }
}

#[async_trait]
impl CatalogMetadataProvider for MemoryCatalog {
    async fn fetch_indexes(&self, tables: &[TableRef]) -> Result<Vec<IndexMetadata>, MetadataError> {
        let mut result: Vec<IndexMetadata> = vec![];
        for table in tables {
            let key = self.check(table)?;
            if let Some(indexes) = self.indexes.get(&key) {
                result.extend(indexes.iter().cloned());
            }
        }
        Ok(result)
    }

    async fn fetch_column_statistics(
        &self,
        tables: &[TableRef],
    ) -> Result<Vec<ColumnStatistics>, MetadataError> {
        let mut result: Vec<ColumnStatistics> = vec![];
        for table in tables {
            let key = self.check(table)?;
            if let Some(statistics) = self.statistics.get(&key) {
                result.extend(statistics.iter().cloned());
            }
        }
        Ok(result)
    }
}
