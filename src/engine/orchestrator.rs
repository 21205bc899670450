use std::future::Future;
use std::sync::Arc;
use std::time::Instant;

use chrono::Utc;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::analyzer::{IndexCoverageAnalyzer, RecommendationKind, ddl};
use crate::catalog::{CatalogMetadataProvider, MetadataError};
use crate::engine::{
    AnalysisArtifact, AnalysisRequest, AnalysisResponse, EngineConfig, EngineError, ResponseMetadata,
};
use crate::parser::ParsedQuery;

/// Composes one request/response cycle: parse, fetch catalog metadata for
/// exactly the tables found, analyze, assemble. Stateless between calls;
/// the catalog fetch is the only suspension point, so cancelling the future
/// simply abandons the in-flight fetch.
pub struct AnalysisOrchestrator {
    provider: Arc<dyn CatalogMetadataProvider>,
    analyzer: IndexCoverageAnalyzer,
    config: EngineConfig,
}

impl AnalysisOrchestrator {
    pub fn new(provider: Arc<dyn CatalogMetadataProvider>) -> Self {
        Self::with_config(provider, EngineConfig::default())
    }

    pub fn with_config(provider: Arc<dyn CatalogMetadataProvider>, config: EngineConfig) -> Self {
        Self {
            provider,
            analyzer: IndexCoverageAnalyzer::with_params(config.params.clone()),
            config,
        }
    }

    pub async fn analyze(&self, request: &AnalysisRequest) -> Result<AnalysisArtifact, EngineError> {
        let started = Instant::now();

        let mut parsed = ParsedQuery::parse(&request.sql)?;
        if let Some(owner) = request.effective_owner() {
            parsed.qualify_owner(owner);
        }
        debug!(
            tables = parsed.tables.len(),
            predicates = parsed.predicates.len(),
            "statement parsed"
        );

        let indexes = self
            .fetch(self.provider.fetch_indexes(&parsed.tables), &parsed)
            .await?;

        let statistics = if request.options.include_statistics {
            self.fetch(self.provider.fetch_column_statistics(&parsed.tables), &parsed)
                .await?
        } else {
            debug!("statistics fetch skipped by request options");
            vec![]
        };

        let recommendations = self.analyzer.analyze(&parsed, &indexes, &statistics);
        debug!(recommendations = recommendations.len(), "analysis complete");

        let hints = if request.options.include_hints {
            Self::build_hints(&parsed, &recommendations)
        } else {
            vec![]
        };

        Ok(AnalysisArtifact {
            parsed_query: parsed,
            indexes,
            recommendations,
            hints,
            timing_ms: started.elapsed().as_millis() as u64,
            analysis_id: Uuid::new_v4().to_string(),
            analyzed_at: Utc::now(),
        })
    }

    /// Envelope variant of `analyze`; never fails, the host serializes the
    /// result as-is.
    pub async fn run(&self, request: &AnalysisRequest) -> AnalysisResponse {
        let started = Instant::now();

        match self.analyze(request).await {
            Ok(artifact) => {
                let metadata = ResponseMetadata {
                    execution_time_ms: started.elapsed().as_millis() as u64,
                    analyzed_at: artifact.analyzed_at,
                    analysis_id: Some(artifact.analysis_id.clone()),
                };
                AnalysisResponse::success(artifact, metadata)
            }
            Err(error) => {
                warn!(status_hint = error.status_hint(), "analysis failed: {}", error);
                let metadata = ResponseMetadata {
                    execution_time_ms: started.elapsed().as_millis() as u64,
                    analyzed_at: Utc::now(),
                    analysis_id: None,
                };
                AnalysisResponse::failure(&error, metadata)
            }
        }
    }

    async fn fetch<T>(
        &self,
        fetch: impl Future<Output = Result<T, MetadataError>>,
        parsed: &ParsedQuery,
    ) -> Result<T, EngineError> {
        match tokio::time::timeout(self.config.fetch_timeout, fetch).await {
            Ok(Ok(value)) => Ok(value),
            Ok(Err(source)) => Err(EngineError::Metadata {
                source,
                parsed_query: parsed.clone(),
            }),
            Err(_) => Err(EngineError::Metadata {
                source: MetadataError::ConnectionUnavailable(format!(
                    "catalog fetch exceeded {}ms",
                    self.config.fetch_timeout.as_millis()
                )),
                parsed_query: parsed.clone(),
            }),
        }
    }

    /// One optimizer hint per table, taken from its highest-ranked create or
    /// extend recommendation (the list is already sorted).
    fn build_hints(parsed: &ParsedQuery, recommendations: &[crate::analyzer::Recommendation]) -> Vec<String> {
        let mut hints: Vec<String> = vec![];
        let mut seen: Vec<&str> = vec![];

        for recommendation in recommendations {
            if recommendation.kind == RecommendationKind::DropRedundant {
                continue;
            }
            if seen.iter().any(|table| table.eq_ignore_ascii_case(&recommendation.table)) {
                continue;
            }
            seen.push(&recommendation.table);

            let subject = parsed
                .table(&recommendation.table)
                .map(|table| table.alias.clone())
                .unwrap_or_else(|| recommendation.table.clone());
            let index = ddl::index_name(&recommendation.table, &recommendation.columns);
            hints.push(format!("/*+ INDEX({} {}) */", subject, index));
        }

        hints
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use async_trait::async_trait;

    use crate::analyzer::RecommendationKind;
    use crate::catalog::{
        CatalogMetadataProvider, ColumnStatistics, IndexMetadata, MemoryCatalog, MetadataError,
    };
    use crate::engine::{AnalysisOrchestrator, AnalysisOptions, AnalysisRequest, EngineConfig, EngineError};
    use crate::parser::{ParseErrorKind, TableRef};

    fn catalog_with_emp() -> MemoryCatalog {
        let mut catalog = MemoryCatalog::new();
        catalog
            .add_table("emp")
            .add_statistics(ColumnStatistics::new("emp", "dept_id").with_distinct(40))
            .add_statistics(ColumnStatistics::new("emp", "hire_date").with_distinct(2_000));
        catalog
    }

    #[tokio::test]
    pub async fn test_analyze_end_to_end() {
        let orchestrator = AnalysisOrchestrator::new(Arc::new(catalog_with_emp()));
        let request = AnalysisRequest::new(
            "conn-1",
            "SELECT * FROM emp WHERE dept_id = :1 AND hire_date > :2 ORDER BY last_name",
        );

        let artifact = orchestrator.analyze(&request).await.expect("Failed to analyze");

        assert_eq!(artifact.parsed_query.tables.len(), 1);
        assert_eq!(artifact.recommendations.len(), 1);
        assert_eq!(artifact.recommendations[0].kind, RecommendationKind::CreateIndex);
        assert_eq!(
            artifact.recommendations[0].columns,
            vec!["dept_id", "hire_date", "last_name"]
        );
        assert!(!artifact.analysis_id.is_empty());
        assert!(artifact.hints.is_empty());
    }

    #[tokio::test]
    pub async fn test_extend_over_create_with_existing_prefix() {
        let mut catalog = catalog_with_emp();
        catalog.add_index(IndexMetadata::btree("IDX_EMP_DEPT", "emp", &["dept_id"]));
        let orchestrator = AnalysisOrchestrator::new(Arc::new(catalog));
        let request = AnalysisRequest::new(
            "conn-1",
            "SELECT * FROM emp WHERE dept_id = :1 AND hire_date > :2 ORDER BY last_name",
        );

        let artifact = orchestrator.analyze(&request).await.expect("Failed to analyze");

        assert_eq!(artifact.indexes.len(), 1);
        assert_eq!(artifact.recommendations[0].kind, RecommendationKind::ExtendIndex);
    }

    #[tokio::test]
    pub async fn test_parse_failure_is_fail_fast() {
        let orchestrator = AnalysisOrchestrator::new(Arc::new(MemoryCatalog::new()));
        let request = AnalysisRequest::new("conn-1", "UPDATE emp SET salary = salary * 1.1");

        let result = orchestrator.analyze(&request).await;

        match result {
            Err(EngineError::Parse(error)) => {
                assert_eq!(error.kind, ParseErrorKind::UnsupportedStatementType);
            }
            _ => panic!(),
        }
    }

    #[tokio::test]
    pub async fn test_metadata_failure_carries_parsed_query() {
        let orchestrator = AnalysisOrchestrator::new(Arc::new(MemoryCatalog::new()));
        let request = AnalysisRequest::new("conn-1", "SELECT * FROM ghost WHERE id = 1");

        let result = orchestrator.analyze(&request).await;

        match result {
            Err(error @ EngineError::Metadata { .. }) => {
                assert_eq!(error.status_hint(), 404);
                let parsed = error.parsed_query().expect("parsed query attached");
                assert_eq!(parsed.tables[0].name, "ghost");
            }
            _ => panic!(),
        }
    }

    #[tokio::test]
    pub async fn test_skipping_statistics_never_fails() {
        let orchestrator = AnalysisOrchestrator::new(Arc::new(catalog_with_emp()));
        let request = AnalysisRequest::new("conn-1", "SELECT * FROM emp WHERE dept_id = :1")
            .with_options(AnalysisOptions { include_statistics: false, ..Default::default() });

        let artifact = orchestrator.analyze(&request).await.expect("Failed to analyze");

        assert_eq!(artifact.recommendations.len(), 1);
    }

    #[tokio::test]
    pub async fn test_owner_qualifies_tables() {
        let orchestrator = AnalysisOrchestrator::new(Arc::new(catalog_with_emp()));
        let request =
            AnalysisRequest::new("conn-1", "SELECT * FROM emp WHERE dept_id = :1").with_owner("HR");

        let artifact = orchestrator.analyze(&request).await.expect("Failed to analyze");

        assert_eq!(artifact.parsed_query.tables[0].owner.as_deref(), Some("HR"));
    }

    #[tokio::test]
    pub async fn test_hints_generated_on_request() {
        let orchestrator = AnalysisOrchestrator::new(Arc::new(catalog_with_emp()));
        let request = AnalysisRequest::new("conn-1", "SELECT * FROM emp e WHERE e.dept_id = :1")
            .with_options(AnalysisOptions { include_hints: true, ..Default::default() });

        let artifact = orchestrator.analyze(&request).await.expect("Failed to analyze");

        assert_eq!(artifact.hints.len(), 1);
        assert!(artifact.hints[0].starts_with("/*+ INDEX(e "));
    }

    #[tokio::test]
    pub async fn test_run_envelope_success_and_failure() {
        let orchestrator = AnalysisOrchestrator::new(Arc::new(catalog_with_emp()));

        let ok = orchestrator
            .run(&AnalysisRequest::new("conn-1", "SELECT * FROM emp WHERE dept_id = 1"))
            .await;
        assert!(ok.success);
        assert!(ok.data.is_some());
        assert!(ok.metadata.analysis_id.is_some());

        let err = orchestrator
            .run(&AnalysisRequest::new("conn-1", "DROP TABLE emp"))
            .await;
        assert!(!err.success);
        assert!(err.data.is_none());
        assert_eq!(err.status_hint, Some(400));
        assert!(err.error.unwrap().contains("SELECT"));
    }

    #[tokio::test]
    pub async fn test_response_serialization_shape() {
        let orchestrator = AnalysisOrchestrator::new(Arc::new(catalog_with_emp()));
        let response = orchestrator
            .run(&AnalysisRequest::new("conn-1", "SELECT * FROM emp WHERE dept_id = 1"))
            .await;

        let value = serde_json::to_value(&response).expect("Failed to serialize response");

        assert_eq!(value["success"], true);
        assert!(value["metadata"]["executionTimeMs"].is_u64());
        assert!(value["data"]["parsedQuery"]["tables"][0]["name"].is_string());
        assert!(value["data"]["recommendations"][0]["generatedDdl"].is_string());
        assert_eq!(value["data"]["recommendations"][0]["kind"], "CREATE_INDEX");
    }

    struct StalledCatalog;

    #[async_trait]
    impl CatalogMetadataProvider for StalledCatalog {
        async fn fetch_indexes(&self, _tables: &[TableRef]) -> Result<Vec<IndexMetadata>, MetadataError> {
            tokio::time::sleep(Duration::from_secs(600)).await;
            Ok(vec![])
        }

        async fn fetch_column_statistics(
            &self,
            _tables: &[TableRef],
        ) -> Result<Vec<ColumnStatistics>, MetadataError> {
            Ok(vec![])
        }
    }

    #[tokio::test]
    pub async fn test_fetch_timeout_maps_to_connection_unavailable() {
        let config = EngineConfig::new().with_fetch_timeout(Duration::from_millis(20));
        let orchestrator = AnalysisOrchestrator::with_config(Arc::new(StalledCatalog), config);
        let request = AnalysisRequest::new("conn-1", "SELECT * FROM emp WHERE dept_id = 1");

        let result = orchestrator.analyze(&request).await;

        match result {
            Err(EngineError::Metadata { source, parsed_query }) => {
                assert!(matches!(source, MetadataError::ConnectionUnavailable(_)));
                assert_eq!(parsed_query.tables.len(), 1);
            }
            _ => panic!(),
        }
    }
}
