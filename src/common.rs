use anyhow::{Context, Result};
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::time::Duration;

use crate::constants::USER_AGENT;
use crate::error::{Api, QueryError};

pub fn build_http_client(timeout: Duration) -> Result<Client> {
    Client::builder()
        .user_agent(USER_AGENT)
        .timeout(timeout)
        .build()
        .context("Failed creating HTTP client")
}

pub fn truncate_for_log(text: &str) -> String {
    let trimmed = text.trim();
    let max_len = 300usize;
    if trimmed.len() <= max_len {
        return trimmed.to_string();
    }
    let mut cut = max_len;
    while !trimmed.is_char_boundary(cut) {
        cut -= 1;
    }
    format!("{}...", &trimmed[..cut])
}

pub fn value_to_string(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        _ => value.to_string(),
    }
}

/// Sends a request and decodes a JSON body, mapping every non-2xx status to
/// a `QueryError`. 401/403 are credential failures only for keyed APIs.
pub async fn get_json<T: DeserializeOwned>(
    api: Api,
    request: RequestBuilder,
    keyed: bool,
) -> std::result::Result<T, QueryError> {
    let response = request
        .send()
        .await
        .map_err(|error| QueryError::Network { api, error })?;
    let response = check_status(api, response, keyed).await?;
    let body = response
        .text()
        .await
        .map_err(|error| QueryError::Network { api, error })?;
    serde_json::from_str(&body).map_err(|err| QueryError::Decode {
        api,
        message: format!("{err}; body: {}", truncate_for_log(&body)),
    })
}

async fn check_status(
    api: Api,
    response: Response,
    keyed: bool,
) -> std::result::Result<Response, QueryError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    if keyed && matches!(status, StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN) {
        return Err(QueryError::InvalidCredential { api });
    }
    let body = response.text().await.unwrap_or_default();
    Err(QueryError::Upstream {
        api,
        status: status.as_u16(),
        body: truncate_for_log(&body),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn truncate_keeps_short_text() {
        assert_eq!(truncate_for_log("  short body \n"), "short body");
    }

    #[test]
    fn truncate_cuts_long_text_on_char_boundary() {
        let long = "é".repeat(400);
        let out = truncate_for_log(&long);
        assert!(out.ends_with("..."));
        assert!(out.len() <= 303);
    }

    #[test]
    fn json_scalars_become_plain_strings() {
        assert_eq!(value_to_string(&json!(null)), "");
        assert_eq!(value_to_string(&json!("Wayne")), "Wayne");
        assert_eq!(value_to_string(&json!(15)), "15");
        assert_eq!(value_to_string(&json!(2.5)), "2.5");
        assert_eq!(value_to_string(&json!(true)), "true");
    }
}
