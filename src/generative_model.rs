use crate::{ModelListing, ProxyResult};

/// Seam between the proxy and the upstream generative API.
///
/// `generate` resolves to the first candidate's first text part, or `None`
/// when the upstream returned no usable candidate. What to do about a
/// missing candidate is the caller's policy, not the transport's.
#[async_trait::async_trait]
pub trait GenerativeModel: Send + Sync {
    fn provider(&self) -> &'static str;

    /// Issue exactly one generation call for `prompt`.
    async fn generate(&self, prompt: &str) -> ProxyResult<Option<String>>;

    /// Pass through the upstream model listing. Diagnostic aid only.
    async fn list_models(&self) -> ProxyResult<ModelListing>;
}
