//! `SaveTarget` that PUTs drafts to a REST endpoint.
//!
//! The backend answers with an envelope `{"success": bool, "error": string}`;
//! a `false` success flag counts as a rejection even on HTTP 200.

use std::time::Duration;

use rendizy_core::draft::target::SaveTarget;
use rendizy_types::config::RemoteConfig;
use rendizy_types::error::SaveError;
use serde::{Deserialize, Serialize};
use tracing::debug;

const USER_AGENT: &str = concat!("rendizy/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Deserialize)]
struct Envelope {
    success: Option<bool>,
    error: Option<String>,
}

/// Saves one entity's draft with `PUT {base_url}/{entity_id}`.
pub struct HttpSaveTarget {
    client: reqwest::Client,
    url: String,
    api_key: Option<String>,
}

impl HttpSaveTarget {
    pub fn new(config: &RemoteConfig, entity_id: &str) -> Self {
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .unwrap_or_default();

        Self {
            client,
            url: entity_url(&config.base_url, entity_id),
            api_key: config.api_key.clone(),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

impl std::fmt::Debug for HttpSaveTarget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpSaveTarget")
            .field("url", &self.url)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

fn entity_url(base_url: &str, entity_id: &str) -> String {
    format!("{}/{}", base_url.trim_end_matches('/'), entity_id)
}

/// Map an HTTP status and body to the save result.
fn interpret_response(status: u16, body: &str) -> Result<(), SaveError> {
    let envelope = serde_json::from_str::<Envelope>(body).ok();
    let message = envelope.as_ref().and_then(|e| e.error.clone());

    if !(200..300).contains(&status) {
        let detail = message.unwrap_or_else(|| body.trim().to_string());
        return Err(SaveError::Rejected(format!("HTTP {status}: {detail}")));
    }

    match envelope {
        Some(Envelope {
            success: Some(false),
            ..
        }) => Err(SaveError::Rejected(
            message.unwrap_or_else(|| "save rejected by server".to_string()),
        )),
        _ => Ok(()),
    }
}

impl<D: Serialize + Sync> SaveTarget<D> for HttpSaveTarget {
    async fn save(&self, draft: &D) -> Result<(), SaveError> {
        let mut request = self.client.put(&self.url).json(draft);
        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }

        let response = request
            .send()
            .await
            .map_err(|e| SaveError::Transport(format!("HTTP request failed: {e}")))?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| SaveError::Transport(format!("failed to read response: {e}")))?;

        debug!(url = %self.url, status, "draft PUT completed");
        interpret_response(status, &body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn remote(base_url: &str) -> RemoteConfig {
        RemoteConfig {
            base_url: base_url.to_string(),
            api_key: Some("token".to_string()),
            timeout_secs: 5,
        }
    }

    #[test]
    fn test_entity_url_joins_segments() {
        let target = HttpSaveTarget::new(&remote("https://api.rendizy.test/properties/"), "p1");
        assert_eq!(target.url(), "https://api.rendizy.test/properties/p1");
    }

    #[test]
    fn test_debug_redacts_api_key() {
        let target = HttpSaveTarget::new(&remote("https://api.rendizy.test"), "p1");
        let debug = format!("{target:?}");
        assert!(!debug.contains("token"));
        assert!(debug.contains("<redacted>"));
    }

    #[test]
    fn test_success_envelope_is_ok() {
        assert!(interpret_response(200, r#"{"success":true,"data":{}}"#).is_ok());
        assert!(interpret_response(204, "").is_ok());
        assert!(interpret_response(200, "plain text").is_ok());
    }

    #[test]
    fn test_failure_envelope_is_rejected() {
        let err = interpret_response(200, r#"{"success":false,"error":"slug taken"}"#).unwrap_err();
        assert!(matches!(err, SaveError::Rejected(ref m) if m == "slug taken"));

        let err = interpret_response(200, r#"{"success":false}"#).unwrap_err();
        assert!(matches!(err, SaveError::Rejected(_)));
    }

    #[test]
    fn test_non_2xx_is_rejected_with_detail() {
        let err = interpret_response(500, r#"{"success":false,"error":"db down"}"#).unwrap_err();
        assert_eq!(err.to_string(), "save rejected: HTTP 500: db down");

        let err = interpret_response(404, "not found\n").unwrap_err();
        assert_eq!(err.to_string(), "save rejected: HTTP 404: not found");
    }

    #[tokio::test]
    async fn test_unreachable_host_is_transport_error() {
        let target = HttpSaveTarget::new(&remote("http://127.0.0.1:9"), "p1");
        let err = SaveTarget::<serde_json::Value>::save(&target, &serde_json::json!({}))
            .await
            .unwrap_err();
        assert!(matches!(err, SaveError::Transport(_)));
    }
}
