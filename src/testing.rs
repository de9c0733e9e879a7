//! Test doubles for the upstream model and the composer backend, with
//! queued results consumed in FIFO order and every call recorded.

use crate::{
    ContentBlock, GenerationResult, GenerativeModel, ModelListing, ProxyError, ProxyResult,
    TextBlock, TutorialBackend,
};
use std::{
    collections::VecDeque,
    sync::Mutex,
    time::Duration,
};

/// Result for a mocked `generate` call.
pub enum MockGenerateResult {
    Text(Option<String>),
    Error(ProxyError),
}

impl MockGenerateResult {
    /// A call that yields the provided candidate text.
    #[must_use]
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text(Some(text.into()))
    }

    /// A call that succeeds with no usable candidate.
    #[must_use]
    pub fn empty() -> Self {
        Self::Text(None)
    }

    /// A call that yields the provided error.
    #[must_use]
    pub fn error(error: ProxyError) -> Self {
        Self::Error(error)
    }
}

/// Queued-result stand-in for the upstream model.
#[derive(Default)]
pub struct MockModel {
    generate_results: Mutex<VecDeque<MockGenerateResult>>,
    list_results: Mutex<VecDeque<ProxyResult<ModelListing>>>,
    prompts: Mutex<Vec<String>>,
}

impl MockModel {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn enqueue_generate(&self, result: MockGenerateResult) {
        self.generate_results.lock().unwrap().push_back(result);
    }

    pub fn enqueue_list(&self, result: ProxyResult<ModelListing>) {
        self.list_results.lock().unwrap().push_back(result);
    }

    /// Prompts received so far, in call order.
    #[must_use]
    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }

    #[must_use]
    pub fn generate_calls(&self) -> usize {
        self.prompts.lock().unwrap().len()
    }
}

#[async_trait::async_trait]
impl GenerativeModel for MockModel {
    fn provider(&self) -> &'static str {
        "mock"
    }

    async fn generate(&self, prompt: &str) -> ProxyResult<Option<String>> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        match self.generate_results.lock().unwrap().pop_front() {
            Some(MockGenerateResult::Text(text)) => Ok(text),
            Some(MockGenerateResult::Error(error)) => Err(error),
            None => Ok(Some("<p>mock tutorial</p>".to_string())),
        }
    }

    async fn list_models(&self) -> ProxyResult<ModelListing> {
        self.list_results
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(ModelListing::Parsed(serde_json::json!({ "models": [] }))))
    }
}

/// Backend double for composer tests. An optional delay holds each call
/// open so tests can overlap submissions deterministically.
#[derive(Default)]
pub struct MockBackend {
    results: Mutex<VecDeque<ProxyResult<GenerationResult>>>,
    topics: Mutex<Vec<String>>,
    delay: Option<Duration>,
}

impl MockBackend {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_delay(delay: Duration) -> Self {
        Self {
            delay: Some(delay),
            ..Self::default()
        }
    }

    pub fn enqueue(&self, result: ProxyResult<GenerationResult>) {
        self.results.lock().unwrap().push_back(result);
    }

    /// Topics received so far, in call order.
    #[must_use]
    pub fn topics(&self) -> Vec<String> {
        self.topics.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl TutorialBackend for MockBackend {
    async fn generate_tutorial(&self, topic: &str) -> ProxyResult<GenerationResult> {
        self.topics.lock().unwrap().push(topic.to_string());
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        self.results.lock().unwrap().pop_front().unwrap_or_else(|| {
            Ok(GenerationResult {
                content: vec![ContentBlock::Text(TextBlock {
                    text: "<p>mock tutorial</p>".to_string(),
                })],
            })
        })
    }
}
