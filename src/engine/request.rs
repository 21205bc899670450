use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::engine::{AnalysisArtifact, EngineError};

fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisOptions {
    /// When false the statistics fetch is skipped entirely and selectivity
    /// scoring falls back to the neutral default; never an error.
    #[serde(default = "default_true")]
    pub include_statistics: bool,
    #[serde(default)]
    pub include_hints: bool,
    /// Overrides the request owner for qualifying unqualified table names.
    #[serde(default)]
    pub target_schema: Option<String>,
}

impl Default for AnalysisOptions {
    fn default() -> Self {
        Self {
            include_statistics: true,
            include_hints: false,
            target_schema: None,
        }
    }
}

/// One analysis request, as consumed from the host API layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisRequest {
    pub connection_id: String,
    pub sql: String,
    #[serde(default)]
    pub owner: Option<String>,
    #[serde(default)]
    pub options: AnalysisOptions,
}

impl AnalysisRequest {
    pub fn new(connection_id: &str, sql: &str) -> Self {
        Self {
            connection_id: connection_id.to_string(),
            sql: sql.to_string(),
            owner: None,
            options: AnalysisOptions::default(),
        }
    }

    pub fn with_owner(mut self, owner: &str) -> Self {
        self.owner = Some(owner.to_string());
        self
    }

    pub fn with_options(mut self, options: AnalysisOptions) -> Self {
        self.options = options;
        self
    }

    /// The schema used to qualify unqualified table names, options taking
    /// precedence over the request-level owner.
    pub fn effective_owner(&self) -> Option<&str> {
        self.options.target_schema.as_deref().or(self.owner.as_deref())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseMetadata {
    pub execution_time_ms: u64,
    pub analyzed_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub analysis_id: Option<String>,
}

/// Host-facing envelope; `run` always produces one, success or not.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<AnalysisArtifact>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status_hint: Option<u16>,
    pub metadata: ResponseMetadata,
}

impl AnalysisResponse {
    pub fn success(artifact: AnalysisArtifact, metadata: ResponseMetadata) -> Self {
        Self {
            success: true,
            data: Some(artifact),
            error: None,
            status_hint: None,
            metadata,
        }
    }

    pub fn failure(error: &EngineError, metadata: ResponseMetadata) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(error.to_string()),
            status_hint: Some(error.status_hint()),
            metadata,
        }
    }
}
