use reqwest::blocking::Client;
use serde_json::Value;
use thiserror::Error;

/// Failure kinds observed at the remote boundary. They are logged here
/// and then collapsed to the `None` sentinel: callers of [`Gateway::get`]
/// and [`Gateway::post`] only ever see "got a value" or "did not".
#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),
    #[error("remote returned status {0}")]
    Status(u16),
    #[error("remote reported error: {0}")]
    Remote(String),
    #[error("response body is not JSON, even after truncation recovery")]
    MalformedBody,
}

/// Client for the backend's query-string action dispatch
/// (`{base}?action=login`, `?action=chapters`, ...).
pub struct Gateway {
    base_url: String,
    client: Client,
}

impl Gateway {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            client: Client::new(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// GET an action. Returns `None` on any failure.
    pub fn get(&self, action: &str) -> Option<Value> {
        self.absorb(action, self.call(action, None))
    }

    /// POST an action with a JSON body. Returns `None` on any failure.
    pub fn post(&self, action: &str, payload: &Value) -> Option<Value> {
        self.absorb(action, self.call(action, Some(payload)))
    }

    fn absorb(&self, action: &str, result: Result<Value, GatewayError>) -> Option<Value> {
        match result {
            Ok(v) => Some(v),
            Err(e) => {
                tracing::warn!(action, error = %e, "remote call failed");
                None
            }
        }
    }

    fn call(&self, action: &str, payload: Option<&Value>) -> Result<Value, GatewayError> {
        let url = format!("{}?action={}", self.base_url.trim_end_matches('?'), action);
        let req = match payload {
            Some(body) => self.client.post(&url).json(body),
            None => self.client.get(&url),
        };
        let resp = req.send()?;
        let status = resp.status();
        // Read the whole body as text; the declared content-type is not
        // trusted (some hosts serve JSON as text/html with junk appended).
        let text = resp.text()?;
        if !status.is_success() {
            return Err(GatewayError::Status(status.as_u16()));
        }
        let value = parse_with_recovery(&text).ok_or(GatewayError::MalformedBody)?;
        if let Some(msg) = value.get("error").and_then(|e| e.as_str()) {
            return Err(GatewayError::Remote(msg.to_string()));
        }
        Ok(value)
    }
}

/// Strict JSON parse, then one retry truncated at the last `}` or `]`.
/// Recovers from hosting environments that append non-JSON trailing bytes
/// (ad scripts, tracking pixels) to otherwise valid output.
pub fn parse_with_recovery(text: &str) -> Option<Value> {
    if let Ok(v) = serde_json::from_str(text) {
        return Some(v);
    }
    let cut = match (text.rfind('}'), text.rfind(']')) {
        (Some(a), Some(b)) => a.max(b),
        (Some(a), None) => a,
        (None, Some(b)) => b,
        (None, None) => return None,
    };
    serde_json::from_str(&text[..=cut]).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn strict_json_parses_unchanged() {
        assert_eq!(
            parse_with_recovery(r#"{"success":true}"#),
            Some(json!({ "success": true }))
        );
    }

    #[test]
    fn trailing_script_tag_is_truncated() {
        let body = r#"{"success":true}<script>window.spy()</script>"#;
        assert_eq!(parse_with_recovery(body), Some(json!({ "success": true })));
    }

    #[test]
    fn trailing_garbage_after_array_is_truncated() {
        let body = "[{\"id\":\"p1\"},{\"id\":\"p2\"}]\n<div>footer</div>";
        let v = parse_with_recovery(body).expect("recovered array");
        assert_eq!(v.as_array().map(|a| a.len()), Some(2));
    }

    #[test]
    fn no_recoverable_close_yields_none() {
        assert_eq!(parse_with_recovery("<html>502 Bad Gateway</html>"), None);
        assert_eq!(parse_with_recovery(r#"{"success":true"#), None);
        assert_eq!(parse_with_recovery(""), None);
    }

    #[test]
    fn garbage_before_the_close_stays_unrecoverable() {
        // Truncation only trims the tail; a corrupt prefix is not repaired.
        assert_eq!(parse_with_recovery("oops{\"success\":true}"), None);
    }
}
