use crate::{ProxyError, ProxyResult};
use reqwest::Client;
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;

const GENERIC_UPSTREAM_MESSAGE: &str = "Upstream request failed";

/// Create a JSON request, parse the response.
/// Returns an `Upstream` error on non success status code.
pub async fn send_json<T: Serialize, R: DeserializeOwned>(
    client: &Client,
    url: &str,
    data: &T,
) -> ProxyResult<R> {
    let response = client.post(url).json(data).send().await?;
    let status = response.status();
    if status.is_success() {
        Ok(response.json::<R>().await?)
    } else {
        let body = response.text().await.unwrap_or_default();
        Err(ProxyError::Upstream(status, extract_upstream_message(&body)))
    }
}

/// GET and return the raw response body, mapping non-success statuses to
/// `Upstream` the same way `send_json` does. The caller decides how to
/// interpret the body.
pub async fn get_text(client: &Client, url: &str) -> ProxyResult<String> {
    let response = client.get(url).send().await?;
    let status = response.status();
    if status.is_success() {
        Ok(response.text().await?)
    } else {
        let body = response.text().await.unwrap_or_default();
        Err(ProxyError::Upstream(status, extract_upstream_message(&body)))
    }
}

/// Best-effort extraction of a human-readable message from an upstream error
/// body (`{"error": {"message": ...}}`). Falls back to a generic message when
/// the body is not structured that way.
#[must_use]
pub fn extract_upstream_message(body: &str) -> String {
    let parsed: Option<Value> = serde_json::from_str(body).ok();
    parsed
        .as_ref()
        .and_then(|value| value.pointer("/error/message"))
        .and_then(Value::as_str)
        .map_or_else(|| GENERIC_UPSTREAM_MESSAGE.to_string(), str::to_string)
}

#[cfg(test)]
mod tests {
    use super::extract_upstream_message;

    #[test]
    fn extracts_google_error_message() {
        let body = r#"{"error":{"code":429,"message":"Quota exceeded","status":"RESOURCE_EXHAUSTED"}}"#;
        assert_eq!(extract_upstream_message(body), "Quota exceeded");
    }

    #[test]
    fn falls_back_on_unstructured_body() {
        assert_eq!(
            extract_upstream_message("<html>Bad Gateway</html>"),
            "Upstream request failed"
        );
        assert_eq!(extract_upstream_message(""), "Upstream request failed");
    }

    #[test]
    fn falls_back_on_json_without_message() {
        assert_eq!(
            extract_upstream_message(r#"{"error":"rate limited"}"#),
            "Upstream request failed"
        );
    }
}
