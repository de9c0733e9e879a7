//! Stateless proxy and client components for generating HTML tutorial
//! fragments through the Google Generative Language API.
//!
//! The proxy holds the only secret (the API key), issues exactly one
//! upstream call per generation request, and normalizes whatever the
//! upstream returns into a single text content block. The composer owns
//! the client-side submission state and enforces single-flight submission.
//!
//! Returned HTML is rendered by clients without sanitization. The only
//! mitigations are the prompt instruction and residual-fence stripping;
//! this trust boundary is deliberate and documented on [`View::Rendered`].

mod client_utils;
mod composer;
mod config;
mod errors;
mod generative_model;
pub mod google;
mod prompt;
mod server;
mod service;
pub mod testing;
mod types;

pub use composer::{strip_code_fences, Composer, ProxyBackend, TutorialBackend, View};
pub use config::{ProxyConfig, DEFAULT_MODEL_ID};
pub use errors::{ProxyError, ProxyResult};
pub use generative_model::GenerativeModel;
pub use google::{GoogleModel, GoogleModelOptions};
pub use prompt::tutorial_prompt;
pub use server::{router, AppState};
pub use service::{TutorialService, FALLBACK_TEXT};
pub use types::*;
