use std::sync::Arc;

use crate::llm_client::LlmGateway;
use crate::profile::store::ProfileStore;

/// Shared application state injected into all route handlers via Axum extractors.
/// Everything here is built once at startup and only read afterwards.
#[derive(Clone)]
pub struct AppState {
    /// Groq-backed gateway used by `/prompt` and the enrichment endpoints.
    pub llm: Arc<dyn LlmGateway>,
    /// OpenAI-backed gateway kept for the legacy `/api` endpoint.
    pub legacy_llm: Arc<dyn LlmGateway>,
    pub store: Arc<dyn ProfileStore>,
}
