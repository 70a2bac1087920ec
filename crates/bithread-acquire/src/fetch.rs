use crate::extract::{self, PageText};
use std::time::Duration;
use thiserror::Error;

/// Browser-like identification; some sites refuse unknown clients.
const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
     (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(15);

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    #[error("request to {url} timed out after {}s", .timeout.as_secs_f64())]
    Timeout { url: String, timeout: Duration },

    #[error("request to {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("HTTP {status} for {url}")]
    Status {
        url: String,
        status: reqwest::StatusCode,
    },

    #[error("failed to read response body from {url}: {source}")]
    Body {
        url: String,
        #[source]
        source: reqwest::Error,
    },
}

/// HTTP settings for page fetches.
#[derive(Debug, Clone)]
pub struct FetchOptions {
    pub timeout: Duration,
    pub user_agent: String,
}

impl Default for FetchOptions {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_TIMEOUT,
            user_agent: BROWSER_USER_AGENT.to_string(),
        }
    }
}

/// Fetch a web page and return its readable text (at most
/// [`extract::MAX_CHARS`] characters).
pub async fn fetch(url: &str) -> Result<String, FetchError> {
    Ok(fetch_with(url, &FetchOptions::default()).await?.text)
}

/// Like [`fetch`], with explicit HTTP settings. Also reports the text length
/// before the character cap.
///
/// The body is decoded using the charset declared in `Content-Type`,
/// falling back to UTF-8.
pub async fn fetch_with(url: &str, options: &FetchOptions) -> Result<PageText, FetchError> {
    tracing::info!(url = %url, "Scraping page");
    let html = fetch_page(url, options).await?;
    tracing::debug!(bytes = html.len(), "Received HTML");

    Ok(extract::extract_page(&html))
}

async fn fetch_page(url: &str, options: &FetchOptions) -> Result<String, FetchError> {
    let client = reqwest::Client::builder()
        .user_agent(options.user_agent.as_str())
        .timeout(options.timeout)
        .build()
        .map_err(FetchError::Client)?;

    let response = client
        .get(url)
        .send()
        .await
        .map_err(|e| request_error(url, options.timeout, e))?;

    let status = response.status();
    if !status.is_success() {
        return Err(FetchError::Status {
            url: url.to_string(),
            status,
        });
    }

    response
        .text()
        .await
        .map_err(|e| match request_error(url, options.timeout, e) {
            FetchError::Request { url, source } => FetchError::Body { url, source },
            other => other,
        })
}

fn request_error(url: &str, timeout: Duration, source: reqwest::Error) -> FetchError {
    if source.is_timeout() {
        FetchError::Timeout {
            url: url.to_string(),
            timeout,
        }
    } else {
        FetchError::Request {
            url: url.to_string(),
            source,
        }
    }
}
