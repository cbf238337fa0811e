//! Configuration for the Bedrock client.

use serde::{Deserialize, Serialize};

/// Configuration for the Amazon Bedrock Converse client.
///
/// Bedrock uses AWS IAM/STS authentication rather than API keys.
/// Credentials are loaded from the environment via the AWS SDK
/// (environment variables, shared config, IMDS, etc.).
///
/// # Inference Profiles
///
/// Newer Bedrock models require cross-region inference profile IDs
/// (prefixed with `us.` or `global.`) instead of raw model IDs.
///
/// # Example
///
/// ```rust
/// use bedrock_flex_demo::BedrockConfig;
///
/// // Default: us-west-2, Nova 2 Lite via the global inference profile
/// let config = BedrockConfig::default();
///
/// // Custom region and model
/// let config = BedrockConfig::new("us-east-1", "us.amazon.nova-2-lite-v1:0");
///
/// // With a custom endpoint (e.g., a VPC endpoint)
/// let config = BedrockConfig::new("us-west-2", "global.amazon.nova-2-lite-v1:0")
///     .with_endpoint_url("https://vpce-xxx.bedrock-runtime.us-west-2.vpce.amazonaws.com");
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BedrockConfig {
    /// AWS region for the Bedrock endpoint (e.g., `"us-west-2"`).
    pub region: String,
    /// Bedrock model identifier or inference profile ID.
    pub model_id: String,
    /// Optional custom endpoint URL (e.g., a VPC endpoint).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub endpoint_url: Option<String>,
}

impl Default for BedrockConfig {
    fn default() -> Self {
        Self {
            region: "us-west-2".to_string(),
            model_id: "global.amazon.nova-2-lite-v1:0".to_string(),
            endpoint_url: None,
        }
    }
}

impl BedrockConfig {
    /// Create a new Bedrock config with the given region and model ID.
    pub fn new(region: impl Into<String>, model_id: impl Into<String>) -> Self {
        Self { region: region.into(), model_id: model_id.into(), ..Default::default() }
    }

    /// Set a custom endpoint URL (e.g., a VPC endpoint).
    pub fn with_endpoint_url(mut self, url: impl Into<String>) -> Self {
        self.endpoint_url = Some(url.into());
        self
    }

    /// Build a config from the environment, falling back to the defaults.
    ///
    /// Honors `AWS_REGION`, `BEDROCK_MODEL_ID`, and `BEDROCK_ENDPOINT_URL`.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Ok(region) = std::env::var("AWS_REGION") {
            config.region = region;
        }
        if let Ok(model_id) = std::env::var("BEDROCK_MODEL_ID") {
            config.model_id = model_id;
        }
        if let Ok(endpoint_url) = std::env::var("BEDROCK_ENDPOINT_URL") {
            config.endpoint_url = Some(endpoint_url);
        }
        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = BedrockConfig::default();
        assert_eq!(config.region, "us-west-2");
        assert_eq!(config.model_id, "global.amazon.nova-2-lite-v1:0");
        assert!(config.endpoint_url.is_none());
    }

    #[test]
    fn test_new_and_endpoint_url() {
        let config = BedrockConfig::new("eu-west-1", "us.amazon.nova-2-lite-v1:0")
            .with_endpoint_url("https://example.com");
        assert_eq!(config.region, "eu-west-1");
        assert_eq!(config.endpoint_url.as_deref(), Some("https://example.com"));
    }
}
