use std::sync::Arc;

use crate::ai_client::TextGenerator;
use crate::config::Config;
use crate::extraction::TextExtractor;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Generation backend. Default: `AiClient`.
    pub generator: Arc<dyn TextGenerator>,
    /// Document text backend. Default: `PdfTextExtractor`.
    pub extractor: Arc<dyn TextExtractor>,
}
