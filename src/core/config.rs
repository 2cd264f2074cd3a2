use std::env;

const DEFAULT_BIND_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 8000;
const DEFAULT_MODEL: &str = "facebook/bart-large-cnn";
const DEFAULT_INFERENCE_BASE_URL: &str = "https://api-inference.huggingface.co";
const DEFAULT_ALLOWED_ORIGINS: &str = "http://localhost:3000,https://only-mar.github.io";
const DEFAULT_MODEL_LOAD_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub bind_host: String,
    pub port: u16,
    pub model_id: String,
    pub inference_base_url: String,
    pub hf_api_token: Option<String>,
    pub allowed_origins: Vec<String>,
    pub model_load_timeout_secs: u64,
}

impl AppConfig {
    /// Reads configuration from the environment, falling back to defaults
    /// for everything except malformed values.
    ///
    /// # Errors
    ///
    /// Returns an error naming the variable when `PORT` or
    /// `MODEL_LOAD_TIMEOUT_SECS` is set but does not parse.
    pub fn from_env() -> Result<Self, String> {
        let port = match env::var("PORT") {
            Ok(value) => value.parse().map_err(|e| format!("PORT: {e}"))?,
            Err(_) => DEFAULT_PORT,
        };

        let model_load_timeout_secs = match env::var("MODEL_LOAD_TIMEOUT_SECS") {
            Ok(value) => value
                .parse()
                .map_err(|e| format!("MODEL_LOAD_TIMEOUT_SECS: {e}"))?,
            Err(_) => DEFAULT_MODEL_LOAD_TIMEOUT_SECS,
        };

        let allowed_origins =
            env::var("ALLOWED_ORIGINS").unwrap_or_else(|_| DEFAULT_ALLOWED_ORIGINS.to_string());

        Ok(Self {
            bind_host: env::var("BIND_HOST").unwrap_or_else(|_| DEFAULT_BIND_HOST.to_string()),
            port,
            model_id: env::var("SUMMARIZER_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string()),
            inference_base_url: env::var("INFERENCE_BASE_URL")
                .unwrap_or_else(|_| DEFAULT_INFERENCE_BASE_URL.to_string()),
            hf_api_token: env::var("HF_API_TOKEN").ok(),
            allowed_origins: parse_origins(&allowed_origins),
            model_load_timeout_secs,
        })
    }

    /// Socket address the HTTP server binds to.
    #[must_use]
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.bind_host, self.port)
    }

    /// Full Inference API URL for the configured model.
    #[must_use]
    pub fn endpoint_url(&self) -> String {
        format!(
            "{}/models/{}",
            self.inference_base_url.trim_end_matches('/'),
            self.model_id
        )
    }
}

fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|origin| !origin.is_empty())
        .map(std::string::ToString::to_string)
        .collect()
}
