// src/core/net.rs

// JSON GET against the Schulfinder API with timeout + retry.

use std::{thread, time::Duration};

use serde_json::Value;
use ureq::{Agent, AgentBuilder};
use url::form_urlencoded;

use crate::config::consts::{BACKOFF_BASE_MS, BACKOFF_MAX_MS, RETRY_STATUSES, USER_AGENT};
use crate::config::options::FetchOptions;
use crate::error::{ApiError, ApiResult};

#[derive(Clone)]
pub struct ApiClient {
    agent: Agent,
    base_url: String,
    retry_limit: u32,
}

/// `endpoint?k=v&...` with form encoding.
pub fn with_params(endpoint: &str, params: &[(&str, &str)]) -> String {
    if params.is_empty() {
        return endpoint.to_string();
    }
    let query = form_urlencoded::Serializer::new(String::new())
        .extend_pairs(params.iter().copied())
        .finish();
    format!("{endpoint}?{query}")
}

pub fn is_retryable_status(code: u16) -> bool {
    RETRY_STATUSES.contains(&code)
}

/// Delay before retry number `attempt` (1-based).
pub fn backoff(attempt: u32) -> Duration {
    let factor = 1u64.checked_shl(attempt.saturating_sub(1)).unwrap_or(u64::MAX);
    Duration::from_millis(BACKOFF_BASE_MS.saturating_mul(factor).min(BACKOFF_MAX_MS))
}

impl ApiClient {
    pub fn new(opts: &FetchOptions) -> Self {
        let agent = AgentBuilder::new()
            .timeout(opts.timeout)
            .user_agent(USER_AGENT)
            .build();
        let mut base_url = opts.base_url.clone();
        if !base_url.ends_with('/') {
            base_url.push('/');
        }
        Self { agent, base_url, retry_limit: opts.retry_limit }
    }

    pub fn url_for(&self, path_and_query: &str) -> String {
        format!("{}{}", self.base_url, path_and_query.trim_start_matches('/'))
    }

    /// GET `path_and_query` (relative to the base URL) and parse the body as JSON.
    pub fn get_json(&self, path_and_query: &str) -> ApiResult<Value> {
        let url = self.url_for(path_and_query);
        let mut attempt = 0u32;

        loop {
            attempt += 1;
            let failure = match self.agent.get(&url).call() {
                Ok(resp) => {
                    return resp.into_json::<Value>().map_err(|e| ApiError::Shape {
                        endpoint: path_and_query.to_string(),
                        detail: format!("body is not JSON: {e}"),
                    });
                }
                Err(ureq::Error::Status(code, _)) if !is_retryable_status(code) => {
                    return Err(ApiError::Network {
                        endpoint: path_and_query.to_string(),
                        attempts: attempt,
                        message: format!("HTTP {code}"),
                    });
                }
                Err(ureq::Error::Status(code, _)) => format!("HTTP {code}"),
                Err(ureq::Error::Transport(t)) => t.to_string(),
            };

            if attempt > self.retry_limit {
                loge!("GET {url}: giving up after {attempt} attempts: {failure}");
                return Err(ApiError::Network {
                    endpoint: path_and_query.to_string(),
                    attempts: attempt,
                    message: failure,
                });
            }

            let wait = backoff(attempt);
            logd!("GET {url}: {failure}; retry {attempt}/{} in {wait:?}", self.retry_limit);
            thread::sleep(wait);
        }
    }
}
