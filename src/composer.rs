use crate::{
    ContentBlock, GenerateTutorialBody, GenerationResult, ProxyError, ProxyResult, FALLBACK_TEXT,
};
use reqwest::Client;
use serde_json::Value;
use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc, Mutex,
};

/// The one call the composer makes against the proxy.
#[async_trait::async_trait]
pub trait TutorialBackend: Send + Sync {
    async fn generate_tutorial(&self, topic: &str) -> ProxyResult<GenerationResult>;
}

/// HTTP implementation of [`TutorialBackend`] targeting the proxy's
/// `/api/generate-tutorial` endpoint.
pub struct ProxyBackend {
    base_url: String,
    client: Client,
}

impl ProxyBackend {
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client: Client::new(),
        }
    }
}

#[async_trait::async_trait]
impl TutorialBackend for ProxyBackend {
    async fn generate_tutorial(&self, topic: &str) -> ProxyResult<GenerationResult> {
        let url = format!("{}/api/generate-tutorial", self.base_url);
        let body = GenerateTutorialBody {
            request: topic.to_string(),
        };

        let response = self.client.post(&url).json(&body).send().await?;
        let status = response.status();
        if status.is_success() {
            Ok(response.json().await?)
        } else {
            // The proxy reports failures as {"error": ...}.
            let text = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<Value>(&text)
                .ok()
                .as_ref()
                .and_then(|value| value.get("error"))
                .and_then(Value::as_str)
                .map_or_else(|| text.trim().to_string(), str::to_string);
            Err(ProxyError::Upstream(status, message))
        }
    }
}

/// Render target of the last completed submission.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum View {
    /// Nothing submitted yet, or a submission is in flight.
    #[default]
    Idle,
    /// Generated HTML, stored for direct rendering. No sanitizer is applied;
    /// the only mitigations are the upstream prompt instruction and fence
    /// stripping, so script content returned by the model would execute in
    /// the viewer's context. Deliberate, documented trust boundary.
    Rendered { html: String },
    /// Inline error text; rendering it never crashes the view.
    Errored { message: String },
}

/// Owns the client-side submission state: current view, loading flag, and
/// the single-flight guard. At most one generation call is in flight per
/// composer; a second `submit` during that window is ignored, not queued.
pub struct Composer {
    backend: Arc<dyn TutorialBackend>,
    in_flight: AtomicBool,
    view: Mutex<View>,
}

impl Composer {
    #[must_use]
    pub fn new(backend: Arc<dyn TutorialBackend>) -> Self {
        Self {
            backend,
            in_flight: AtomicBool::new(false),
            view: Mutex::new(View::Idle),
        }
    }

    #[must_use]
    pub fn view(&self) -> View {
        self.view.lock().unwrap().clone()
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    /// Submits `topic`. No-op when the topic is blank or another submission
    /// is still in flight. Clears the previous result or error before
    /// calling out; the loading flag is released by a drop guard on both
    /// completion paths.
    pub async fn submit(&self, topic: &str) {
        if topic.trim().is_empty() {
            return;
        }
        if self.in_flight.swap(true, Ordering::AcqRel) {
            return;
        }
        let _guard = InFlightGuard(&self.in_flight);

        *self.view.lock().unwrap() = View::Idle;

        let next = match self.backend.generate_tutorial(topic).await {
            Ok(result) => View::Rendered {
                html: strip_code_fences(first_text(&result).unwrap_or(FALLBACK_TEXT)),
            },
            Err(error) => View::Errored {
                message: format!(
                    "Error generating tutorial: {error}. Check the server logs for details."
                ),
            },
        };
        *self.view.lock().unwrap() = next;
    }
}

/// Releases the single-flight guard when the submission path unwinds,
/// success or failure.
struct InFlightGuard<'a>(&'a AtomicBool);

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

fn first_text(result: &GenerationResult) -> Option<&str> {
    result.content.first().map(|block| match block {
        ContentBlock::Text(text) => text.text.as_str(),
    })
}

/// Removes residual markdown fences the model sometimes emits despite the
/// prompt instruction: a leading ```` ```html ```` or ```` ``` ```` and a
/// trailing ```` ``` ````, plus surrounding whitespace.
#[must_use]
pub fn strip_code_fences(text: &str) -> String {
    let mut stripped = text.trim();
    for opener in ["```html", "```"] {
        if let Some(rest) = stripped.strip_prefix(opener) {
            stripped = rest;
            break;
        }
    }
    if let Some(rest) = stripped.strip_suffix("```") {
        stripped = rest;
    }
    stripped.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::strip_code_fences;

    #[test]
    fn strips_html_fence_pair() {
        assert_eq!(strip_code_fences("```html\n<h1>X</h1>\n```"), "<h1>X</h1>");
    }

    #[test]
    fn strips_bare_fence_pair() {
        assert_eq!(strip_code_fences("```\n<p>hi</p>\n```"), "<p>hi</p>");
    }

    #[test]
    fn leaves_unfenced_text_alone() {
        assert_eq!(strip_code_fences("  <h2>ok</h2>\n"), "<h2>ok</h2>");
    }

    #[test]
    fn strips_lone_leading_fence() {
        assert_eq!(strip_code_fences("```html<p>a</p>"), "<p>a</p>");
    }
}
