use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use tracing::{info, warn};

use error_common::{Result, ScribeError};
use extraction_engine::{create_provider, EngineConfig, StructuredExtractor};

use crate::report::{ReportRenderer, TextReportRenderer};

/// Main scribe server state
#[derive(Clone)]
pub struct ScribeServer {
    /// Server configuration
    pub config: ServerConfig,
    /// AI extraction provider; `None` runs sessions heuristic-only
    pub extractor: Option<Arc<dyn StructuredExtractor>>,
    /// Renderer invoked when a finished record is turned into a document
    pub renderer: Arc<dyn ReportRenderer>,
}

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Server name
    pub name: String,
    /// Upper bound on one AI extraction call
    pub ai_timeout: Duration,
    /// Startup timestamp, reported by the health endpoints
    pub started_at: DateTime<Utc>,
}

impl ScribeServer {
    /// Create a new scribe server instance
    ///
    /// A configured-but-broken provider is a fatal configuration error; no
    /// provider at all demotes the AI path and keeps the heuristic path up.
    pub fn new(engine: EngineConfig) -> Result<Self> {
        let extractor = match &engine.provider {
            Some(provider) => {
                let extractor = create_provider(provider)
                    .map_err(|e| ScribeError::ConfigError(e.to_string()))?;
                info!(provider = provider.name(), "AI extraction provider initialized");
                Some(Arc::from(extractor))
            }
            None => {
                warn!("no AI provider configured; sessions run heuristic-only");
                None
            }
        };

        Ok(Self {
            config: ServerConfig {
                name: "Scribe Engine".to_string(),
                ai_timeout: Duration::from_secs(engine.ai_timeout_secs),
                started_at: Utc::now(),
            },
            extractor,
            renderer: Arc::new(TextReportRenderer),
        })
    }

    /// Label of the active AI provider, for health reporting
    pub fn provider_name(&self) -> &'static str {
        self.extractor
            .as_deref()
            .map(|e| e.name())
            .unwrap_or("disabled")
    }
}
