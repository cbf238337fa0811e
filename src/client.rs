//! Amazon Bedrock client for the Converse API.
//!
//! Credentials are loaded automatically from the environment via
//! `aws-config` (environment variables, shared config, IMDS, etc.).

use crate::config::BedrockConfig;
use crate::convert::{reply_from_bedrock, request_to_bedrock};
use crate::error::{DemoError, Result};
use crate::types::{ConverseReply, ConverseRequest};
use async_trait::async_trait;
use tracing::{debug, info, instrument};

/// A provider that can answer one multimodal Converse request.
///
/// This is the seam between the demo runner and the remote service; tests
/// substitute [`MockConverse`](crate::mock::MockConverse) for the real client.
#[async_trait]
pub trait Converse: Send + Sync {
    fn name(&self) -> &str;
    async fn converse(&self, request: ConverseRequest) -> Result<ConverseReply>;
}

/// Amazon Bedrock client backed by the AWS SDK Converse API.
///
/// Issues a single non-streaming `converse` call per request. The underlying
/// HTTP connection pool is released when the client is dropped, so holding
/// the client in a scope guarantees cleanup on every exit path.
///
/// # Example
///
/// ```rust,ignore
/// use bedrock_flex_demo::{BedrockClient, BedrockConfig};
///
/// let config = BedrockConfig::new("us-west-2", "global.amazon.nova-2-lite-v1:0");
/// let client = BedrockClient::new(config).await?;
/// let reply = client.converse(request).await?;
/// ```
pub struct BedrockClient {
    client: aws_sdk_bedrockruntime::Client,
    model_id: String,
    region: String,
}

impl BedrockClient {
    /// Create a new Bedrock client from the given configuration.
    ///
    /// Loads AWS credentials from the standard credential chain
    /// (environment variables, shared config, IMDS, etc.) and constructs
    /// an `aws_sdk_bedrockruntime::Client`.
    ///
    /// # Errors
    ///
    /// Returns `DemoError::Config` if the AWS SDK configuration fails to load.
    pub async fn new(config: BedrockConfig) -> Result<Self> {
        let region = config.region.clone();
        let model_id = config.model_id.clone();

        let mut sdk_config_loader = aws_config::defaults(aws_config::BehaviorVersion::latest())
            .region(aws_config::Region::new(config.region.clone()));

        if let Some(endpoint_url) = &config.endpoint_url {
            sdk_config_loader = sdk_config_loader.endpoint_url(endpoint_url);
        }

        let sdk_config = sdk_config_loader.load().await;
        let client = aws_sdk_bedrockruntime::Client::new(&sdk_config);

        info!("bedrock client created for region={region}, model={model_id}");

        Ok(Self { client, model_id, region })
    }
}

#[async_trait]
impl Converse for BedrockClient {
    fn name(&self) -> &str {
        &self.model_id
    }

    #[instrument(skip_all, fields(model_id = %self.model_id, region = %self.region))]
    async fn converse(&self, request: ConverseRequest) -> Result<ConverseReply> {
        let input = request_to_bedrock(&request).map_err(|e| {
            DemoError::Model(format!(
                "Bedrock request conversion failed for region={}, model={}: {e}",
                self.region, self.model_id
            ))
        })?;

        debug!("bedrock converse for model={}", self.model_id);

        let response = self
            .client
            .converse()
            .model_id(&self.model_id)
            .set_messages(Some(input.messages))
            .set_inference_config(input.inference_config)
            .set_service_tier(input.service_tier)
            .send()
            .await
            .map_err(|e| {
                DemoError::Model(format!(
                    "Bedrock API error for region={}, model={}: {e}",
                    self.region, self.model_id
                ))
            })?;

        let output = response.output.ok_or_else(|| {
            DemoError::Model(format!(
                "Bedrock response missing output for model={}",
                self.model_id
            ))
        })?;

        Ok(reply_from_bedrock(
            &output,
            &response.stop_reason,
            response.usage.as_ref(),
            response.performance_config.as_ref(),
        ))
    }
}
