use anyhow::{Context, Result};

use crate::llm_client::{
    DEFAULT_GROQ_MODEL, DEFAULT_OPENAI_MODEL, GROQ_API_URL, MAX_TIMEOUT_SECS, OPENAI_API_URL,
};

/// Application configuration loaded from environment variables.
/// Startup fails if the Supabase credentials are missing; LLM keys are optional and
/// their absence only surfaces when an endpoint actually calls the provider.
#[derive(Debug, Clone)]
pub struct Config {
    pub supabase_url: String,
    pub supabase_anon_key: String,
    pub groq_api_key: Option<String>,
    pub groq_model: String,
    pub groq_api_url: String,
    /// Legacy OpenAI key, only used by `POST /api`.
    pub openai_api_key: Option<String>,
    pub openai_model: String,
    pub openai_api_url: String,
    /// Second CORS origin allowed next to the local Expo dev server.
    pub allow_origin: Option<String>,
    pub llm_timeout_secs: u64,
    pub host: String,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from an arbitrary variable source. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let require = |key: &str| {
            var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
        };

        let llm_timeout_secs = match var("LLM_TIMEOUT_SECS") {
            Some(raw) => raw
                .parse::<u64>()
                .context("LLM_TIMEOUT_SECS must be a whole number of seconds")?,
            None => 30,
        }
        .clamp(1, MAX_TIMEOUT_SECS);

        Ok(Config {
            supabase_url: require("SUPABASE_URL")?
                .trim_end_matches('/')
                .to_string(),
            supabase_anon_key: require("SUPABASE_ANON_KEY")?,
            groq_api_key: var("GROQ_API_KEY"),
            groq_model: var("GROQ_MODEL").unwrap_or_else(|| DEFAULT_GROQ_MODEL.to_string()),
            groq_api_url: var("GROQ_API_URL").unwrap_or_else(|| GROQ_API_URL.to_string()),
            openai_api_key: var("API_KEY"),
            openai_model: var("OPENAI_MODEL").unwrap_or_else(|| DEFAULT_OPENAI_MODEL.to_string()),
            openai_api_url: var("OPENAI_API_URL").unwrap_or_else(|| OPENAI_API_URL.to_string()),
            allow_origin: var("ALLOW_ORIGIN"),
            llm_timeout_secs,
            host: var("HOST").unwrap_or_else(|| "localhost".to_string()),
            port: var("PORT")
                .unwrap_or_else(|| "8003".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: var("RUST_LOG").unwrap_or_else(|| "info".to_string()),
        })
    }
}
