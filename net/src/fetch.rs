//! The HTTP fetch for one round's target number.

use hilo_types::RoundId;
use serde::Deserialize;
use thiserror::Error;

use crate::config::FetchConfig;

/// Why a round's fetch produced no target.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request timed out after {limit_ms} ms")]
    Timeout { limit_ms: u32 },
    #[error("server answered HTTP {status}")]
    Http { status: u16 },
    #[error("transport failure: {source}")]
    Transport {
        #[source]
        source: reqwest::Error,
    },
    #[error("response body carried no usable value")]
    MalformedBody,
}

impl FetchError {
    /// The pseudo-code shown on the display for this failure.
    ///
    /// HTTP failures surface their status, a timeout surfaces the
    /// configured limit in milliseconds, and anything else maps to zero.
    #[must_use]
    pub fn display_code(&self) -> u32 {
        match self {
            FetchError::Timeout { limit_ms } => *limit_ms,
            FetchError::Http { status } => u32::from(*status),
            FetchError::Transport { .. } | FetchError::MalformedBody => 0,
        }
    }
}

#[derive(Debug, Deserialize)]
struct RandBody {
    value: i64,
}

/// Build the HTTP client used for every round.
pub fn build_client(config: &FetchConfig) -> Result<reqwest::Client, reqwest::Error> {
    reqwest::Client::builder()
        .connect_timeout(config.connect_timeout)
        .timeout(config.read_timeout)
        .build()
}

/// Fetch the target number once.
///
/// Status 200 means the body's `value` field is the target; any other
/// status is a failure carrying that status. Transport failures are logged
/// and surfaced the same way - no automatic retry, the player starts a new
/// round instead.
pub async fn fetch_value(
    client: &reqwest::Client,
    config: &FetchConfig,
) -> Result<u16, FetchError> {
    let response = client
        .get(config.request_url())
        .send()
        .await
        .map_err(|e| classify(e, config))?;

    let status = response.status().as_u16();
    if status != 200 {
        tracing::warn!(status, "target fetch answered with an error status");
        return Err(FetchError::Http { status });
    }

    let body = response.text().await.map_err(|e| classify(e, config))?;
    parse_value(&body)
}

/// One round's tagged outcome, delivered over the round's channel.
#[derive(Debug)]
pub struct RoundOutcome {
    pub round: RoundId,
    pub result: Result<u16, FetchError>,
}

/// Run one round's fetch and tag the outcome with its round id.
///
/// Owned arguments so the future moves cleanly into a spawned task;
/// `reqwest::Client` clones share the connection pool.
pub async fn fetch_round(
    client: reqwest::Client,
    config: FetchConfig,
    round: RoundId,
) -> RoundOutcome {
    let result = fetch_value(&client, &config).await;
    if let Ok(value) = &result {
        tracing::info!(%round, value, "target acquired");
    }
    RoundOutcome { round, result }
}

fn classify(error: reqwest::Error, config: &FetchConfig) -> FetchError {
    if error.is_timeout() {
        tracing::warn!(limit_ms = config.timeout_code(), "target fetch timed out");
        FetchError::Timeout {
            limit_ms: config.timeout_code(),
        }
    } else {
        tracing::warn!(error = %error, "target fetch transport failure");
        FetchError::Transport { source: error }
    }
}

fn parse_value(body: &str) -> Result<u16, FetchError> {
    let parsed: RandBody = serde_json::from_str(body).map_err(|_| FetchError::MalformedBody)?;
    u16::try_from(parsed.value).map_err(|_| FetchError::MalformedBody)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_value_extracts_field() {
        assert_eq!(parse_value(r#"{"value":150}"#).unwrap(), 150);
        assert_eq!(
            parse_value(r#"{"status":"ok","value":7,"extra":true}"#).unwrap(),
            7
        );
    }

    #[test]
    fn test_parse_value_rejects_unusable_bodies() {
        assert!(matches!(
            parse_value(r#"{"other":1}"#),
            Err(FetchError::MalformedBody)
        ));
        assert!(matches!(
            parse_value(r#"{"value":-3}"#),
            Err(FetchError::MalformedBody)
        ));
        assert!(matches!(
            parse_value("not json"),
            Err(FetchError::MalformedBody)
        ));
    }

    #[test]
    fn test_display_codes() {
        assert_eq!(FetchError::Timeout { limit_ms: 5000 }.display_code(), 5000);
        assert_eq!(FetchError::Http { status: 404 }.display_code(), 404);
        assert_eq!(FetchError::MalformedBody.display_code(), 0);
    }
}
