use super::api::{
    Content, GenerateContentConfig, GenerateContentParameters, GenerateContentResponse, Part,
};
use crate::{client_utils, GenerativeModel, ModelListing, ProxyResult};
use reqwest::Client;

const PROVIDER: &str = "google";
const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Client for the Google Generative Language API. Holds the only copy of
/// the API key; one shared `reqwest::Client` serves all calls.
pub struct GoogleModel {
    model_id: String,
    api_key: String,
    base_url: String,
    client: Client,
    generation_config: GenerateContentConfig,
}

#[derive(Clone, Default)]
pub struct GoogleModelOptions {
    pub api_key: String,
    /// Override the API root, mostly for tests. Defaults to the public
    /// generativelanguage endpoint.
    pub base_url: Option<String>,
    /// Inject a preconfigured client, e.g. one carrying a request timeout.
    /// No deadline is imposed here beyond reqwest's transport defaults, so
    /// an unresponsive upstream stalls that one request.
    pub client: Option<Client>,
    /// Override the generation parameters sent with every call.
    pub generation_config: Option<GenerateContentConfig>,
}

impl GoogleModel {
    #[must_use]
    pub fn new(model_id: impl Into<String>, options: GoogleModelOptions) -> Self {
        let GoogleModelOptions {
            api_key,
            base_url,
            client,
            generation_config,
        } = options;

        let base_url = base_url
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string())
            .trim_end_matches('/')
            .to_string();
        let client = client.unwrap_or_else(Client::new);
        let generation_config = generation_config.unwrap_or(GenerateContentConfig {
            temperature: Some(0.7),
            max_output_tokens: Some(2000),
        });

        Self {
            model_id: model_id.into(),
            api_key,
            base_url,
            client,
            generation_config,
        }
    }
}

#[async_trait::async_trait]
impl GenerativeModel for GoogleModel {
    fn provider(&self) -> &'static str {
        PROVIDER
    }

    async fn generate(&self, prompt: &str) -> ProxyResult<Option<String>> {
        let params = GenerateContentParameters {
            contents: vec![Content {
                parts: Some(vec![Part {
                    text: Some(prompt.to_string()),
                }]),
                role: Some("user".to_string()),
            }],
            generation_config: Some(self.generation_config.clone()),
        };

        let url = format!(
            "{}/models/{}:generateContent?key={}",
            self.base_url, self.model_id, self.api_key
        );

        let response: GenerateContentResponse =
            client_utils::send_json(&self.client, &url, &params).await?;

        if let Some(version) = &response.model_version {
            tracing::debug!(provider = PROVIDER, model_version = %version, "generation completed");
        }

        Ok(response
            .candidates
            .and_then(|candidates| candidates.into_iter().next())
            .and_then(|candidate| candidate.content)
            .and_then(|content| content.parts)
            .and_then(|parts| parts.into_iter().next())
            .and_then(|part| part.text))
    }

    async fn list_models(&self) -> ProxyResult<ModelListing> {
        let url = format!("{}/models?key={}", self.base_url, self.api_key);
        let body = client_utils::get_text(&self.client, &url).await?;

        Ok(match serde_json::from_str(&body) {
            Ok(value) => ModelListing::Parsed(value),
            Err(_) => ModelListing::Raw { raw: body },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::super::api::{Candidate, Content, GenerateContentResponse, Part};

    #[test]
    fn response_deserializes_with_unknown_fields_and_absent_candidates() {
        let body = r#"{"modelVersion":"gemini-2.0-flash-exp","usageMetadata":{"totalTokenCount":12}}"#;
        let response: GenerateContentResponse = serde_json::from_str(body).unwrap();
        assert!(response.candidates.is_none());
        assert_eq!(response.model_version.as_deref(), Some("gemini-2.0-flash-exp"));
    }

    #[test]
    fn candidate_text_survives_round_trip() {
        let response = GenerateContentResponse {
            candidates: Some(vec![Candidate {
                content: Some(Content {
                    parts: Some(vec![Part {
                        text: Some("<h1>Hi</h1>".to_string()),
                    }]),
                    role: Some("model".to_string()),
                }),
                finish_reason: Some("STOP".to_string()),
                ..Default::default()
            }]),
            ..Default::default()
        };
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["candidates"][0]["content"]["parts"][0]["text"], "<h1>Hi</h1>");
        assert_eq!(json["candidates"][0]["finishReason"], "STOP");
    }
}
