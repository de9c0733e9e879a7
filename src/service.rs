use crate::{
    prompt, ContentBlock, GenerationResult, GenerativeModel, ModelListing, ProxyError, ProxyResult,
    TextBlock,
};
use std::sync::Arc;

/// Fixed substitute used when the upstream succeeds without usable text.
/// A degraded response is preferred over a failure for this one case.
pub const FALLBACK_TEXT: &str = "Sorry, could not generate tutorial.";

/// Normalization layer between the HTTP surface and the upstream model.
/// Holds no mutable state; cloning shares the model handle, and concurrent
/// requests need no coordination.
#[derive(Clone)]
pub struct TutorialService {
    model: Arc<dyn GenerativeModel>,
}

impl TutorialService {
    #[must_use]
    pub fn new(model: Arc<dyn GenerativeModel>) -> Self {
        Self { model }
    }

    /// Issues exactly one upstream call for `topic` and wraps the first
    /// candidate text into a single text block. No retry on any failure
    /// path. A response with no usable candidate degrades to
    /// [`FALLBACK_TEXT`] instead of failing.
    pub async fn generate_tutorial(&self, topic: &str) -> ProxyResult<GenerationResult> {
        let topic = topic.trim();
        if topic.is_empty() {
            return Err(ProxyError::InvalidInput(
                "topic must not be empty".to_string(),
            ));
        }

        tracing::debug!(provider = self.model.provider(), topic, "generating tutorial");

        let prompt = prompt::tutorial_prompt(topic);
        let text = self.model.generate(&prompt).await?.unwrap_or_else(|| {
            tracing::warn!("upstream returned no candidate text, substituting fallback");
            FALLBACK_TEXT.to_string()
        });

        Ok(GenerationResult {
            content: vec![ContentBlock::Text(TextBlock { text })],
        })
    }

    pub async fn list_models(&self) -> ProxyResult<ModelListing> {
        self.model.list_models().await
    }
}
