use serde::{Deserialize, Serialize};
use serde_json::Value;

/// The normalized unit returned to the client, tagged by kind.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ContentBlock {
    Text(TextBlock),
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TextBlock {
    pub text: String,
}

/// A successful generation: always exactly one text block.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationResult {
    pub content: Vec<ContentBlock>,
}

/// Body of `POST /api/generate-tutorial`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateTutorialBody {
    /// The topic to generate a tutorial for.
    pub request: String,
}

/// Liveness payload for `GET /`.
#[derive(Debug, Clone, Serialize)]
pub struct Health {
    pub status: &'static str,
}

/// Upstream model listing, tagged by whether the body parsed as JSON.
///
/// The upstream schema is owned by the third party and may drift between
/// versions, so an unparseable body is passed through as `{"raw": ...}`
/// instead of being treated as a failure.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(untagged)]
pub enum ModelListing {
    Parsed(Value),
    Raw { raw: String },
}
