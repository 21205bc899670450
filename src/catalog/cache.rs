use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use tracing::debug;

use crate::catalog::{CatalogMetadataProvider, ColumnStatistics, IndexMetadata, MetadataError};
use crate::parser::TableRef;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct CacheKey {
    connection: String,
    owner: Option<String>,
    table: String,
}

#[derive(Debug)]
struct Entry<T> {
    at: Instant,
    rows: Vec<T>,
}

/// TTL cache in front of a `CatalogMetadataProvider`, keyed per
/// `(connection, owner, table)`. One instance belongs to one connection;
/// the connection id still participates in the key so entries can never leak
/// across target databases if a cache is ever shared.
///
/// Expired entries are dropped on access; errors are never cached.
pub struct CachedCatalog<P> {
    inner: P,
    connection_id: String,
    ttl: Duration,
    indexes: Mutex<HashMap<CacheKey, Entry<IndexMetadata>>>,
    statistics: Mutex<HashMap<CacheKey, Entry<ColumnStatistics>>>,
}

impl<P> CachedCatalog<P> {
    pub fn new(inner: P, connection_id: &str, ttl: Duration) -> Self {
        Self {
            inner,
            connection_id: connection_id.to_string(),
            ttl,
            indexes: Mutex::new(HashMap::new()),
            statistics: Mutex::new(HashMap::new()),
        }
    }

    fn key(&self, table: &TableRef) -> CacheKey {
        CacheKey {
            connection: self.connection_id.clone(),
            owner: table.owner.as_ref().map(|owner| owner.to_ascii_uppercase()),
            table: table.name.to_ascii_uppercase(),
        }
    }

    /// Splits the requested tables into cached rows and misses.
    fn collect<T: Clone>(
        &self,
        store: &Mutex<HashMap<CacheKey, Entry<T>>>,
        tables: &[TableRef],
    ) -> (Vec<T>, Vec<TableRef>) {
        let mut hits: Vec<T> = vec![];
        let mut misses: Vec<TableRef> = vec![];

        let mut store = store.lock().expect("catalog cache poisoned");
        for table in tables {
            let key = self.key(table);
            match store.get(&key) {
                Some(entry) if entry.at.elapsed() < self.ttl => {
                    hits.extend(entry.rows.iter().cloned());
                }
                Some(_) => {
                    store.remove(&key);
                    misses.push(table.clone());
                }
                None => misses.push(table.clone()),
            }
        }

        (hits, misses)
    }

    fn store_rows<T: Clone>(
        &self,
        store: &Mutex<HashMap<CacheKey, Entry<T>>>,
        misses: &[TableRef],
        fetched: &[T],
        table_of: impl Fn(&T) -> &str,
    ) -> Vec<T> {
        let mut result: Vec<T> = vec![];
        let mut store = store.lock().expect("catalog cache poisoned");
        for table in misses {
            let rows: Vec<T> = fetched
                .iter()
                .filter(|row| table_of(row).eq_ignore_ascii_case(&table.name))
                .cloned()
                .collect();
            store.insert(self.key(table), Entry { at: Instant::now(), rows: rows.clone() });
            result.extend(rows);
        }
        result
    }
}

#[async_trait]
impl<P: CatalogMetadataProvider> CatalogMetadataProvider for CachedCatalog<P> {
    async fn fetch_indexes(&self, tables: &[TableRef]) -> Result<Vec<IndexMetadata>, MetadataError> {
        let (mut result, misses) = self.collect(&self.indexes, tables);
        debug!(hits = tables.len() - misses.len(), misses = misses.len(), "index cache lookup");

        if !misses.is_empty() {
            let fetched = self.inner.fetch_indexes(&misses).await?;
            result.extend(self.store_rows(&self.indexes, &misses, &fetched, |row| &row.table));
        }

        Ok(result)
    }

    async fn fetch_column_statistics(
        &self,
        tables: &[TableRef],
    ) -> Result<Vec<ColumnStatistics>, MetadataError> {
        let (mut result, misses) = self.collect(&self.statistics, tables);
        debug!(hits = tables.len() - misses.len(), misses = misses.len(), "statistics cache lookup");

        if !misses.is_empty() {
            let fetched = self.inner.fetch_column_statistics(&misses).await?;
            result.extend(self.store_rows(&self.statistics, &misses, &fetched, |row| &row.table));
        }

        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    use async_trait::async_trait;

    use crate::catalog::{
        CachedCatalog, CatalogMetadataProvider, ColumnStatistics, IndexMetadata, MemoryCatalog, MetadataError,
    };
    use crate::parser::TableRef;

    struct CountingCatalog {
        inner: MemoryCatalog,
        index_fetches: AtomicUsize,
    }

    #[async_trait]
    impl CatalogMetadataProvider for CountingCatalog {
        async fn fetch_indexes(&self, tables: &[TableRef]) -> Result<Vec<IndexMetadata>, MetadataError> {
            self.index_fetches.fetch_add(1, Ordering::SeqCst);
            self.inner.fetch_indexes(tables).await
        }

        async fn fetch_column_statistics(
            &self,
            tables: &[TableRef],
        ) -> Result<Vec<ColumnStatistics>, MetadataError> {
            self.inner.fetch_column_statistics(tables).await
        }
    }

    fn table_ref(name: &str) -> TableRef {
        TableRef { owner: None, name: name.to_string(), alias: name.to_string() }
    }

    #[tokio::test]
    pub async fn test_second_fetch_hits_cache() {
        let mut inner = MemoryCatalog::new();
        inner.add_index(IndexMetadata::btree("IDX_EMP_DEPT", "emp", &["dept_id"]));
        let counting = CountingCatalog { inner, index_fetches: AtomicUsize::new(0) };
        let cached = CachedCatalog::new(counting, "conn-1", Duration::from_secs(60));

        let first = cached.fetch_indexes(&[table_ref("emp")]).await.expect("Failed to fetch");
        let second = cached.fetch_indexes(&[table_ref("emp")]).await.expect("Failed to fetch");

        assert_eq!(first, second);
        assert_eq!(cached.inner.index_fetches.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    pub async fn test_zero_ttl_always_misses() {
        let mut inner = MemoryCatalog::new();
        inner.add_index(IndexMetadata::btree("IDX_EMP_DEPT", "emp", &["dept_id"]));
        let counting = CountingCatalog { inner, index_fetches: AtomicUsize::new(0) };
        let cached = CachedCatalog::new(counting, "conn-1", Duration::from_secs(0));

        cached.fetch_indexes(&[table_ref("emp")]).await.expect("Failed to fetch");
        cached.fetch_indexes(&[table_ref("emp")]).await.expect("Failed to fetch");

        assert_eq!(cached.inner.index_fetches.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    pub async fn test_error_is_not_cached() {
        let counting = CountingCatalog {
            inner: MemoryCatalog::new(),
            index_fetches: AtomicUsize::new(0),
        };
        let cached = CachedCatalog::new(counting, "conn-1", Duration::from_secs(60));

        let result = cached.fetch_indexes(&[table_ref("ghost")]).await;
        assert!(matches!(result, Err(MetadataError::TableNotFound { .. })));

        let result = cached.fetch_indexes(&[table_ref("ghost")]).await;
        assert!(matches!(result, Err(MetadataError::TableNotFound { .. })));

        assert_eq!(cached.inner.index_fetches.load(Ordering::SeqCst), 2);
    }
}
