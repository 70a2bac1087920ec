use std::time::Duration;

/// Environment variable holding the Gemini API credential.
pub const API_KEY_ENV: &str = "GEMINI_API_KEY";

pub const DEFAULT_MODEL: &str = "gemini-1.5-pro-latest";
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Connection and sampling settings for [`crate::GeminiClient`].
///
/// The API key is optional here: a missing key is only reported when the
/// first request is made.
#[derive(Debug, Clone)]
pub struct GeminiConfig {
    pub api_key: Option<String>,
    pub model: String,
    pub base_url: String,
    pub timeout: Duration,
    pub temperature: f32,
    pub max_output_tokens: u32,
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: DEFAULT_MODEL.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(120),
            temperature: 0.7,
            max_output_tokens: 3000,
        }
    }
}

impl GeminiConfig {
    /// Default settings with the API key read from `GEMINI_API_KEY`.
    ///
    /// Empty values are treated as unset.
    pub fn from_env() -> Self {
        let api_key = std::env::var(API_KEY_ENV)
            .ok()
            .map(|key| key.trim().to_string())
            .filter(|key| !key.is_empty());
        Self {
            api_key,
            ..Self::default()
        }
    }

    pub fn with_api_key(mut self, api_key: impl ToString) -> Self {
        self.api_key = Some(api_key.to_string());
        self
    }

    /// Set the model identifier (defaults to `gemini-1.5-pro-latest`).
    pub fn with_model(mut self, model: impl ToString) -> Self {
        self.model = model.to_string();
        self
    }

    /// Set the API base URL (defaults to the public v1beta endpoint).
    pub fn with_base_url(mut self, base_url: impl ToString) -> Self {
        self.base_url = base_url.to_string();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// `{base_url}/models/{model}:generateContent`
    pub(crate) fn generate_url(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.base_url.trim_end_matches('/'),
            self.model
        )
    }
}
