//! Type conversions between this crate's request/response shapes and the
//! Bedrock Converse API types used by `aws-sdk-bedrockruntime`.

use crate::types::{
    Content, ConverseReply, ConverseRequest, FinishReason, InferenceConfig, Part, ServiceTier,
    TokenUsage,
};
use aws_sdk_bedrockruntime::types::{
    self as bedrock, ContentBlock, ConversationRole, ConverseOutput, ImageBlock, ImageFormat,
    ImageSource, InferenceConfiguration, Message, StopReason,
};
use aws_smithy_types::Blob;

/// Result of converting a [`ConverseRequest`] into Bedrock Converse API inputs.
#[derive(Debug)]
pub(crate) struct BedrockConverseInput {
    /// Conversation messages (user and assistant turns).
    pub messages: Vec<Message>,
    /// Inference configuration (max tokens, temperature).
    pub inference_config: Option<InferenceConfiguration>,
    /// Requested service tier, if any.
    pub service_tier: Option<bedrock::ServiceTier>,
}

/// Convert a [`ConverseRequest`] into Bedrock Converse API inputs.
pub(crate) fn request_to_bedrock(
    request: &ConverseRequest,
) -> Result<BedrockConverseInput, String> {
    let mut messages = Vec::new();

    for content in &request.contents {
        let role = match content.role.as_str() {
            "model" | "assistant" => ConversationRole::Assistant,
            _ => ConversationRole::User,
        };

        let blocks = parts_to_blocks(&content.parts)?;
        if !blocks.is_empty() {
            let msg = Message::builder()
                .role(role)
                .set_content(Some(blocks))
                .build()
                .map_err(|e| format!("Failed to build Bedrock message: {e}"))?;
            messages.push(msg);
        }
    }

    let inference_config = request.config.as_ref().map(inference_config_to_bedrock);
    let service_tier = request.service_tier.map(tier_to_bedrock).transpose()?;

    Ok(BedrockConverseInput { messages, inference_config, service_tier })
}

/// Convert a [`Part`] list to Bedrock `ContentBlock`s, preserving order.
fn parts_to_blocks(parts: &[Part]) -> Result<Vec<ContentBlock>, String> {
    let mut blocks = Vec::with_capacity(parts.len());

    for part in parts {
        match part {
            Part::Text { text } => {
                if !text.is_empty() {
                    blocks.push(ContentBlock::Text(text.clone()));
                }
            }
            Part::Image { mime_type, data } => {
                let image = ImageBlock::builder()
                    .format(image_format_for(mime_type)?)
                    .source(ImageSource::Bytes(Blob::new(data.clone())))
                    .build()
                    .map_err(|e| format!("Failed to build Bedrock image block: {e}"))?;
                blocks.push(ContentBlock::Image(image));
            }
        }
    }

    Ok(blocks)
}

/// Map a MIME type to the Bedrock image format enum.
fn image_format_for(mime_type: &str) -> Result<ImageFormat, String> {
    match mime_type {
        "image/png" => Ok(ImageFormat::Png),
        "image/jpeg" => Ok(ImageFormat::Jpeg),
        "image/gif" => Ok(ImageFormat::Gif),
        "image/webp" => Ok(ImageFormat::Webp),
        other => Err(format!("Unsupported image MIME type: {other}")),
    }
}

/// Convert [`InferenceConfig`] to Bedrock `InferenceConfiguration`.
fn inference_config_to_bedrock(config: &InferenceConfig) -> InferenceConfiguration {
    let mut builder = InferenceConfiguration::builder();

    if let Some(max_tokens) = config.max_output_tokens {
        builder = builder.max_tokens(max_tokens);
    }
    if let Some(temp) = config.temperature {
        builder = builder.temperature(temp);
    }

    builder.build()
}

/// Convert a [`ServiceTier`] to the Bedrock service tier type.
fn tier_to_bedrock(tier: ServiceTier) -> Result<bedrock::ServiceTier, String> {
    // The SDK calls the on-demand class `Default`.
    let tier_type = match tier {
        ServiceTier::Standard => bedrock::ServiceTierType::Default,
        ServiceTier::Flex => bedrock::ServiceTierType::Flex,
        ServiceTier::Priority => bedrock::ServiceTierType::Priority,
    };

    bedrock::ServiceTier::builder()
        .r#type(tier_type)
        .build()
        .map_err(|e| format!("Failed to build Bedrock service tier: {e}"))
}

/// Convert a Bedrock Converse response to a [`ConverseReply`].
///
/// Extracts the message content, token usage, stop reason, and the optional
/// performance-config latency acknowledgment.
pub(crate) fn reply_from_bedrock(
    output: &ConverseOutput,
    stop_reason: &StopReason,
    usage: Option<&bedrock::TokenUsage>,
    performance_config: Option<&bedrock::PerformanceConfiguration>,
) -> ConverseReply {
    let content = match output {
        ConverseOutput::Message(message) => {
            let parts = blocks_to_parts(&message.content);
            if parts.is_empty() { None } else { Some(Content { role: "model".to_string(), parts }) }
        }
        _ => None,
    };

    let usage = usage.map(|u| TokenUsage {
        input_tokens: u.input_tokens,
        output_tokens: u.output_tokens,
        total_tokens: u.total_tokens,
    });

    // Keep the latency class verbatim so it prints exactly as reported.
    let latency = performance_config.map(|p| p.latency.as_str().to_string());

    ConverseReply { content, usage, finish_reason: stop_reason_to_finish(stop_reason), latency }
}

/// Convert Bedrock `ContentBlock`s back to [`Part`]s. Only text blocks are
/// expected in replies; anything else is skipped.
fn blocks_to_parts(blocks: &[ContentBlock]) -> Vec<Part> {
    blocks
        .iter()
        .filter_map(|block| match block {
            ContentBlock::Text(text) => {
                if text.is_empty() {
                    None
                } else {
                    Some(Part::Text { text: text.clone() })
                }
            }
            _ => None,
        })
        .collect()
}

/// Map the Bedrock `StopReason` to the coarse [`FinishReason`].
fn stop_reason_to_finish(stop_reason: &StopReason) -> FinishReason {
    match stop_reason {
        StopReason::EndTurn => FinishReason::Stop,
        StopReason::MaxTokens => FinishReason::MaxTokens,
        StopReason::ToolUse => FinishReason::Stop,
        StopReason::StopSequence => FinishReason::Stop,
        StopReason::ContentFiltered => FinishReason::Safety,
        StopReason::GuardrailIntervened => FinishReason::Safety,
        _ => FinishReason::Other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn image_and_text_request(tier: Option<ServiceTier>) -> ConverseRequest {
        ConverseRequest {
            contents: vec![
                Content::new("user")
                    .with_image("image/png", vec![0x89, 0x50, 0x4E, 0x47])
                    .with_text("Describe this image."),
            ],
            config: None,
            service_tier: tier,
        }
    }

    #[test]
    fn test_image_then_text_block_order() {
        let result = request_to_bedrock(&image_and_text_request(None)).unwrap();
        assert_eq!(result.messages.len(), 1);

        let blocks = &result.messages[0].content;
        assert_eq!(blocks.len(), 2);
        assert!(matches!(&blocks[0], ContentBlock::Image(_)));
        assert!(matches!(&blocks[1], ContentBlock::Text(t) if t == "Describe this image."));
    }

    #[test]
    fn test_role_mapping() {
        let request = ConverseRequest {
            contents: vec![
                Content::new("user").with_text("Hi"),
                Content::new("model").with_text("Hello"),
                Content::new("assistant").with_text("How can I help?"),
            ],
            config: None,
            service_tier: None,
        };

        let result = request_to_bedrock(&request).unwrap();
        assert_eq!(result.messages.len(), 3);
        assert_eq!(result.messages[0].role, ConversationRole::User);
        assert_eq!(result.messages[1].role, ConversationRole::Assistant);
        assert_eq!(result.messages[2].role, ConversationRole::Assistant);
    }

    #[test]
    fn test_empty_text_part_skipped() {
        let request = ConverseRequest {
            contents: vec![Content::new("user").with_text("")],
            config: None,
            service_tier: None,
        };

        let result = request_to_bedrock(&request).unwrap();
        assert!(result.messages.is_empty());
    }

    #[test]
    fn test_unsupported_mime_type_rejected() {
        let request = ConverseRequest {
            contents: vec![Content::new("user").with_image("audio/wav", vec![0; 4])],
            config: None,
            service_tier: None,
        };

        let err = request_to_bedrock(&request).unwrap_err();
        assert!(err.contains("audio/wav"));
    }

    #[test]
    fn test_inference_config_conversion() {
        let request = ConverseRequest {
            contents: vec![],
            config: Some(InferenceConfig { max_output_tokens: Some(512), temperature: Some(0.7) }),
            service_tier: None,
        };

        let result = request_to_bedrock(&request).unwrap();
        let inf = result.inference_config.unwrap();
        assert_eq!(inf.max_tokens, Some(512));
        assert_eq!(inf.temperature, Some(0.7));
    }

    #[test]
    fn test_service_tier_set_when_requested() {
        let result = request_to_bedrock(&image_and_text_request(Some(ServiceTier::Flex))).unwrap();
        assert!(result.service_tier.is_some());

        let result = request_to_bedrock(&image_and_text_request(None)).unwrap();
        assert!(result.service_tier.is_none());
    }

    #[test]
    fn test_every_tier_converts() {
        for tier in [ServiceTier::Standard, ServiceTier::Flex, ServiceTier::Priority] {
            let result = request_to_bedrock(&image_and_text_request(Some(tier))).unwrap();
            assert!(result.service_tier.is_some(), "tier {tier} failed to convert");
        }
    }

    #[test]
    fn test_stop_reason_mapping() {
        assert_eq!(stop_reason_to_finish(&StopReason::EndTurn), FinishReason::Stop);
        assert_eq!(stop_reason_to_finish(&StopReason::MaxTokens), FinishReason::MaxTokens);
        assert_eq!(stop_reason_to_finish(&StopReason::ToolUse), FinishReason::Stop);
        assert_eq!(stop_reason_to_finish(&StopReason::StopSequence), FinishReason::Stop);
        assert_eq!(stop_reason_to_finish(&StopReason::ContentFiltered), FinishReason::Safety);
        assert_eq!(stop_reason_to_finish(&StopReason::GuardrailIntervened), FinishReason::Safety);
    }

    #[test]
    fn test_reply_extraction() {
        let message = bedrock::Message::builder()
            .role(ConversationRole::Assistant)
            .content(ContentBlock::Text("A red square.".to_string()))
            .build()
            .unwrap();
        let usage = bedrock::TokenUsage::builder()
            .input_tokens(10)
            .output_tokens(20)
            .total_tokens(30)
            .build()
            .unwrap();
        let perf = bedrock::PerformanceConfiguration::builder()
            .latency(bedrock::PerformanceConfigLatency::Standard)
            .build();

        let reply = reply_from_bedrock(
            &ConverseOutput::Message(message),
            &StopReason::EndTurn,
            Some(&usage),
            Some(&perf),
        );

        let content = reply.content.unwrap();
        assert_eq!(content.parts[0].text(), Some("A red square."));
        assert_eq!(reply.usage.unwrap().total_tokens, 30);
        assert_eq!(reply.finish_reason, FinishReason::Stop);
        assert_eq!(reply.latency.as_deref(), Some("standard"));
    }

    #[test]
    fn test_reply_without_performance_config() {
        let message = bedrock::Message::builder()
            .role(ConversationRole::Assistant)
            .content(ContentBlock::Text("hi".to_string()))
            .build()
            .unwrap();

        let reply =
            reply_from_bedrock(&ConverseOutput::Message(message), &StopReason::EndTurn, None, None);
        assert!(reply.latency.is_none());
        assert!(reply.usage.is_none());
    }
}
