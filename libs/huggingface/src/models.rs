use std::time::Duration;

use anyhow::{anyhow, bail, ensure, Context};
use bytes::Bytes;
use reqwest::{
    header::{HeaderMap, HeaderValue},
    Client, StatusCode,
};
use tracing::{debug, warn};

use crate::error::Error;
use crate::retry::{RetryPolicy, RetryState};

pub mod text_to_image;

static BASE_URL: &str = "https://api-inference.huggingface.co/models";

/// Every attempt gets the same fixed timeout, hosted diffusion models can
/// take well over a minute per image.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(120);

#[derive(Debug, Clone)]
pub struct Models {
    base_url: String,
    client: Client,
    pub(crate) retry: RetryPolicy,
}

impl Models {
    /// Builds a client for the hosted inference API. The token is resolved
    /// by the caller once at startup; a blank token is rejected here rather
    /// than on first use.
    pub fn new(token: &str) -> Result<Self, Error> {
        Self::with_base_url(token, BASE_URL)
    }

    pub fn with_base_url(
        token: &str,
        base_url: impl Into<String>,
    ) -> Result<Self, Error> {
        if token.trim().is_empty() {
            return Err(Error::MissingCredential);
        }

        let mut headers = HeaderMap::new();
        headers.insert("Accept", HeaderValue::from_str("*/*").unwrap());
        headers.insert(
            "Content-Type",
            HeaderValue::from_str("application/json").unwrap(),
        );
        headers.insert(
            "Authorization",
            HeaderValue::from_str(format!("Bearer {}", token).as_str())
                .map_err(|_| Error::MissingCredential)?,
        );

        let client = reqwest::ClientBuilder::new()
            .default_headers(headers)
            .timeout(REQUEST_TIMEOUT)
            .build()
            .unwrap();

        Ok(Self {
            base_url: base_url.into(),
            client,
            retry: RetryPolicy::default(),
        })
    }

    /// POSTs the serialized body to `{base_url}/{model}` until an attempt
    /// succeeds or the retry budget runs out. The payload is returned
    /// exactly as received.
    pub(crate) async fn binary_response_with_retry(
        &self,
        body: String,
        model: &str,
    ) -> Result<Bytes, Error> {
        let url = format!("{}/{}", self.base_url, model);

        let mut state = RetryState::Idle;
        let mut payload = None;
        let mut last_error: Option<anyhow::Error> = None;

        loop {
            state = match state {
                RetryState::Idle => state.begin(),
                RetryState::Attempting { attempt } => {
                    match self.attempt(&url, body.clone()).await {
                        Ok(bytes) => {
                            payload = Some(bytes);
                            state.succeed()
                        }
                        Err(cause) => {
                            warn!(
                                attempt,
                                max_attempts = self.retry.max_attempts,
                                error = %cause,
                                "inference request failed"
                            );
                            last_error = Some(cause);
                            state.retry(&self.retry)
                        }
                    }
                }
                RetryState::BackingOff { attempt, delay } => {
                    debug!(attempt, ?delay, "backing off before next attempt");
                    tokio::time::sleep(delay).await;
                    state.resume()
                }
                RetryState::Succeeded | RetryState::Failed => break,
            };
        }

        match payload {
            Some(bytes) => Ok(bytes),
            None => {
                let cause = last_error
                    .unwrap_or_else(|| anyhow!("request failed with no recorded cause"));
                Err(Error::RequestFailed {
                    attempts: self.retry.max_attempts,
                    source: cause.into(),
                })
            }
        }
    }

    async fn attempt(&self, url: &str, body: String) -> anyhow::Result<Bytes> {
        let response = self.client.post(url).body(body).send().await?;

        let status_code = response.status();
        if status_code == StatusCode::SERVICE_UNAVAILABLE {
            bail!("service unavailable, model may still be loading");
        }
        ensure!(status_code.is_success(), "status code: {}", status_code);

        let bytes = response
            .bytes()
            .await
            .context("failed to get response bytes")?;

        Ok(bytes)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_blank_token_is_rejected() {
        assert!(matches!(Models::new(""), Err(Error::MissingCredential)));
        assert!(matches!(Models::new("   "), Err(Error::MissingCredential)));
    }

    #[test]
    fn test_token_builds_client() {
        assert!(Models::new("hf_test_token").is_ok());
    }
}
