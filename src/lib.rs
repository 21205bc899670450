//! indax — SQL index-coverage analysis engine.
//!
//! Given a SELECT statement and the catalog metadata of an existing schema,
//! the engine parses the statement into a structured representation of its
//! table/column usage, scores existing indexes against the ideal composite
//! column order, and produces ranked create/extend/drop recommendations with
//! generated DDL. It is a library invoked by a host request handler; it never
//! executes DDL and holds no state between calls.

pub mod parser;

pub mod catalog;
pub use catalog::{CachedCatalog, CatalogMetadataProvider, ColumnStatistics, IndexMetadata, MemoryCatalog, MetadataError};

pub mod analyzer;
pub use analyzer::{AnalyzerParams, IndexCoverageAnalyzer, Recommendation, RecommendationKind};

pub mod engine;
pub use engine::{
    AnalysisArtifact, AnalysisOptions, AnalysisOrchestrator, AnalysisRequest, AnalysisResponse,
    EngineConfig, EngineError,
};

pub use parser::{ParseError, ParseErrorKind, ParsedQuery};
