use std::net::SocketAddr;

use crate::EnrichmentPolicy;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

/// Where inference runs. A single accelerator cannot serve concurrent
/// requests, so inference calls are serialized on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InferenceDevice {
    Cpu,
    Accelerator,
}

impl std::fmt::Display for InferenceDevice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InferenceDevice::Cpu => write!(f, "cpu"),
            InferenceDevice::Accelerator => write!(f, "accelerator"),
        }
    }
}

#[derive(Clone)]
pub struct FeedConfig {
    pub api_key: String,
    pub base_url: String,
    pub default_page_size: u32,
    pub default_language: String,
    pub country: String,
    pub timeout_secs: u64,
}

#[derive(Clone)]
pub struct InferenceConfig {
    pub base_url: String,
    pub api_token: Option<String>,
    pub summarization_model: String,
    pub sentiment_model: String,
    pub classification_model: String,
    pub device: InferenceDevice,
    /// Per-call deadline; `None` waits for the model indefinitely.
    pub timeout_secs: Option<u64>,
}

#[derive(Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub bind_addr: SocketAddr,
    pub log_level: String,
    pub feed: FeedConfig,
    pub extract_timeout_secs: u64,
    pub extract_user_agent: String,
    pub extract_min_chars: usize,
    pub inference: InferenceConfig,
    pub policy: EnrichmentPolicy,
    pub enrich_top: usize,
}

impl std::fmt::Debug for FeedConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FeedConfig")
            .field("api_key", &"[redacted]")
            .field("base_url", &self.base_url)
            .field("default_page_size", &self.default_page_size)
            .field("default_language", &self.default_language)
            .field("country", &self.country)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

impl std::fmt::Debug for InferenceConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InferenceConfig")
            .field("base_url", &self.base_url)
            .field("api_token", &self.api_token.as_ref().map(|_| "[redacted]"))
            .field("summarization_model", &self.summarization_model)
            .field("sentiment_model", &self.sentiment_model)
            .field("classification_model", &self.classification_model)
            .field("device", &self.device)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("env", &self.env)
            .field("bind_addr", &self.bind_addr)
            .field("log_level", &self.log_level)
            .field("feed", &self.feed)
            .field("extract_timeout_secs", &self.extract_timeout_secs)
            .field("extract_user_agent", &self.extract_user_agent)
            .field("extract_min_chars", &self.extract_min_chars)
            .field("inference", &self.inference)
            .field("policy", &self.policy)
            .field("enrich_top", &self.enrich_top)
            .finish()
    }
}
