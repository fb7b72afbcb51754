use crate::app_config::{AppConfig, Environment, FeedConfig, InferenceConfig, InferenceDevice};
use crate::policy::{parse_topic_labels, EnrichmentPolicy, DEFAULT_TOPIC_LABELS};
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Decoupled from the process environment so it can be tested with a plain
/// `HashMap` lookup.
#[allow(clippy::too_many_lines)]
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::net::SocketAddr;

    let require = |var: &str| -> Result<String, ConfigError> {
        lookup(var)
            .ok()
            .filter(|v| !v.trim().is_empty())
            .ok_or_else(|| ConfigError::MissingEnvVar(var.to_string()))
    };

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let invalid = |var: &str, reason: String| ConfigError::InvalidEnvVar {
        var: var.to_string(),
        reason,
    };

    let parse_addr = |var: &str, default: &str| -> Result<SocketAddr, ConfigError> {
        or_default(var, default)
            .parse::<SocketAddr>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let parse_u32 = |var: &str, default: &str| -> Result<u32, ConfigError> {
        or_default(var, default)
            .parse::<u32>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let parse_timeout = |var: &str, raw: &str| -> Result<u64, ConfigError> {
        let secs = raw.trim().parse::<u64>().map_err(|e| invalid(var, e.to_string()))?;
        if secs == 0 {
            return Err(invalid(var, "timeout must be at least one second".to_string()));
        }
        Ok(secs)
    };

    let parse_usize = |var: &str, default: &str| -> Result<usize, ConfigError> {
        or_default(var, default)
            .parse::<usize>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let parse_positive = |var: &str, default: &str| -> Result<usize, ConfigError> {
        let value = parse_usize(var, default)?;
        if value == 0 {
            return Err(invalid(var, "must be greater than zero".to_string()));
        }
        Ok(value)
    };

    let optional = |var: &str| -> Option<String> {
        lookup(var).ok().filter(|v| !v.trim().is_empty())
    };

    let news_api_key = require("NEWS_API_KEY")?;

    let env = parse_environment(&or_default("NEWSLENS_ENV", "development"))?;
    let bind_addr = parse_addr("NEWSLENS_BIND_ADDR", "0.0.0.0:8000")?;
    let log_level = or_default("NEWSLENS_LOG_LEVEL", "info");

    let default_page_size = parse_u32("NEWSLENS_FEED_PAGE_SIZE", "5")?;
    if !(1..=100).contains(&default_page_size) {
        return Err(invalid(
            "NEWSLENS_FEED_PAGE_SIZE",
            format!("{default_page_size} is outside 1..=100"),
        ));
    }

    let feed = FeedConfig {
        api_key: news_api_key,
        base_url: or_default("NEWSLENS_NEWS_API_URL", "https://newsapi.org/v2/"),
        default_page_size,
        default_language: or_default("NEWSLENS_FEED_LANGUAGE", "en"),
        country: or_default("NEWSLENS_FEED_COUNTRY", "us"),
        timeout_secs: parse_timeout(
            "NEWSLENS_FEED_TIMEOUT_SECS",
            &or_default("NEWSLENS_FEED_TIMEOUT_SECS", "30"),
        )?,
    };

    let extract_timeout_secs = parse_timeout(
        "NEWSLENS_EXTRACT_TIMEOUT_SECS",
        &or_default("NEWSLENS_EXTRACT_TIMEOUT_SECS", "30"),
    )?;
    let extract_user_agent = or_default(
        "NEWSLENS_EXTRACT_USER_AGENT",
        "newslens/0.1 (article-enrichment)",
    );
    let extract_min_chars = parse_usize("NEWSLENS_EXTRACT_MIN_CHARS", "200")?;

    let timeout_secs = optional("NEWSLENS_INFERENCE_TIMEOUT_SECS")
        .map(|raw| parse_timeout("NEWSLENS_INFERENCE_TIMEOUT_SECS", &raw))
        .transpose()?;

    let inference = InferenceConfig {
        base_url: or_default(
            "NEWSLENS_INFERENCE_URL",
            "https://api-inference.huggingface.co",
        ),
        api_token: optional("NEWSLENS_INFERENCE_TOKEN"),
        summarization_model: or_default("NEWSLENS_SUMMARIZATION_MODEL", "facebook/bart-large-cnn"),
        sentiment_model: or_default(
            "NEWSLENS_SENTIMENT_MODEL",
            "distilbert-base-uncased-finetuned-sst-2-english",
        ),
        classification_model: or_default(
            "NEWSLENS_CLASSIFICATION_MODEL",
            "facebook/bart-large-mnli",
        ),
        device: parse_device(&or_default("NEWSLENS_INFERENCE_DEVICE", "cpu"))?,
        timeout_secs,
    };

    let summary_min_length = parse_u32("NEWSLENS_SUMMARY_MIN_LENGTH", "30")?;
    let summary_max_length = parse_u32("NEWSLENS_SUMMARY_MAX_LENGTH", "130")?;
    if summary_max_length < summary_min_length {
        return Err(invalid(
            "NEWSLENS_SUMMARY_MAX_LENGTH",
            format!("{summary_max_length} is below NEWSLENS_SUMMARY_MIN_LENGTH ({summary_min_length})"),
        ));
    }

    let topic_labels = parse_topic_labels(&or_default(
        "NEWSLENS_TOPIC_LABELS",
        &DEFAULT_TOPIC_LABELS.join(","),
    ));
    if topic_labels.len() < 2 {
        return Err(invalid(
            "NEWSLENS_TOPIC_LABELS",
            "at least two distinct topic labels are required".to_string(),
        ));
    }

    let policy = EnrichmentPolicy {
        summary_input_chars: parse_positive("NEWSLENS_SUMMARY_INPUT_CHARS", "3000")?,
        summary_min_length,
        summary_max_length,
        sentiment_input_chars: parse_positive("NEWSLENS_SENTIMENT_INPUT_CHARS", "512")?,
        topic_input_chars: parse_positive("NEWSLENS_TOPIC_INPUT_CHARS", "1000")?,
        snippet_chars: parse_positive("NEWSLENS_SNIPPET_CHARS", "200")?,
        topic_labels,
    };

    let enrich_top = parse_usize("NEWSLENS_ENRICH_TOP", "2")?;

    Ok(AppConfig {
        env,
        bind_addr,
        log_level,
        feed,
        extract_timeout_secs,
        extract_user_agent,
        extract_min_chars,
        inference,
        policy,
        enrich_top,
    })
}

/// Parse a string into an `Environment` variant.
///
/// # Errors
///
/// Returns `ConfigError::InvalidEnvVar` for anything other than
/// `development`, `test`, or `production`.
fn parse_environment(s: &str) -> Result<Environment, ConfigError> {
    match s {
        "development" => Ok(Environment::Development),
        "test" => Ok(Environment::Test),
        "production" => Ok(Environment::Production),
        other => Err(ConfigError::InvalidEnvVar {
            var: "NEWSLENS_ENV".to_string(),
            reason: format!("unknown environment '{other}'"),
        }),
    }
}

fn parse_device(s: &str) -> Result<InferenceDevice, ConfigError> {
    match s.trim().to_ascii_lowercase().as_str() {
        "cpu" => Ok(InferenceDevice::Cpu),
        "accelerator" | "gpu" | "cuda" => Ok(InferenceDevice::Accelerator),
        other => Err(ConfigError::InvalidEnvVar {
            var: "NEWSLENS_INFERENCE_DEVICE".to_string(),
            reason: format!("unknown device '{other}'"),
        }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
