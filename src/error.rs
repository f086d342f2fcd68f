//! Failure kinds surfaced by the fetch, credential and selector layers.
//!
//! Commands wrap these in `anyhow` with context; nothing below the command
//! layer retries or recovers locally.

use std::fmt;

use thiserror::Error;

use crate::constants::CENSUS_KEY_SIGNUP_URL;

/// Upstream service a request was sent to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Api {
    Census,
    Places,
    Cms,
    Hrsa,
}

impl fmt::Display for Api {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Api::Census => "Census",
            Api::Places => "CDC PLACES",
            Api::Cms => "CMS",
            Api::Hrsa => "HRSA",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Error)]
pub enum QueryError {
    #[error(
        "No Census API key found.\nRun 'acs_cli login' to save your key, or set CENSUS_API_KEY in .env\nGet a free key at: {}",
        CENSUS_KEY_SIGNUP_URL
    )]
    MissingCredential,

    #[error(
        "{api} API rejected your API key.\nRun 'acs_cli login' to update your key.\nGet a free key at: {}",
        CENSUS_KEY_SIGNUP_URL
    )]
    InvalidCredential { api: Api },

    #[error("{api} API returned {status}{}", detail_suffix(.body))]
    Upstream { api: Api, status: u16, body: String },

    #[error("{api} request failed: {error}")]
    Network {
        api: Api,
        #[source]
        error: reqwest::Error,
    },

    #[error("Invalid {api} response: {message}")]
    Decode { api: Api, message: String },

    #[error("Unknown {kind} '{name}'. Available: {available}")]
    UnknownSelector {
        kind: &'static str,
        name: String,
        available: String,
    },
}

fn detail_suffix(body: &str) -> String {
    if body.is_empty() {
        String::new()
    } else {
        format!(": {body}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn upstream_message_carries_status_and_body() {
        let err = QueryError::Upstream {
            api: Api::Places,
            status: 500,
            body: "Server Error".to_string(),
        };
        assert_eq!(err.to_string(), "CDC PLACES API returned 500: Server Error");
    }

    #[test]
    fn upstream_message_without_body() {
        let err = QueryError::Upstream {
            api: Api::Census,
            status: 404,
            body: String::new(),
        };
        assert_eq!(err.to_string(), "Census API returned 404");
    }

    #[test]
    fn credential_messages_point_at_login() {
        assert!(QueryError::MissingCredential.to_string().contains("CENSUS_API_KEY"));
        let invalid = QueryError::InvalidCredential { api: Api::Census };
        assert!(invalid.to_string().contains("API key"));
        assert!(invalid.to_string().contains("login"));
    }
}
