pub mod gemini;
pub mod prompt;

use async_trait::async_trait;
use shared::error::ApiError;
use shared::types::Language;

/// Seam between the orchestrator and the hosted endpoint. The orchestrator
/// treats every error as a trigger for offline fallback, never as fatal.
#[async_trait]
pub trait OnlineSimplify: Send + Sync {
    async fn simplify(&self, text: &str, language: Language) -> Result<String, ApiError>;
}
