use std::time::Duration;

use crate::analyzer::AnalyzerParams;

/// Engine-level settings: the analyzer tunables plus the budget for the one
/// blocking step of the pipeline, the catalog fetch.
#[derive(Debug, Clone, PartialEq)]
pub struct EngineConfig {
    pub fetch_timeout: Duration,
    pub params: AnalyzerParams,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            fetch_timeout: Duration::from_secs(10),
            params: AnalyzerParams::default(),
        }
    }
}

impl EngineConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_fetch_timeout(mut self, fetch_timeout: Duration) -> Self {
        self.fetch_timeout = fetch_timeout;
        self
    }

    pub fn with_params(mut self, params: AnalyzerParams) -> Self {
        self.params = params;
        self
    }
}
