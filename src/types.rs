//! Request and response value types for the Converse call.
//!
//! Both shapes are transient: built for a single invocation, read once, and
//! discarded. Nothing here is persisted or shared across calls.

use serde::{Deserialize, Serialize};

/// Maximum allowed size for an inline image payload (10 MB).
/// Prevents accidental embedding of oversized binaries in a request turn.
pub const MAX_IMAGE_SIZE: usize = 10 * 1024 * 1024;

/// One conversation turn: a role plus an ordered list of content parts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Content {
    pub role: String,
    pub parts: Vec<Part>,
}

/// A single content part within a turn.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Part {
    Text {
        text: String,
    },
    /// Raw image bytes tagged with a MIME type (e.g. `"image/png"`).
    ///
    /// The MIME type is mapped to the provider's image-format enum at the
    /// API boundary; unsupported types are rejected there.
    Image {
        mime_type: String,
        data: Vec<u8>,
    },
}

impl Content {
    pub fn new(role: impl Into<String>) -> Self {
        Self { role: role.into(), parts: Vec::new() }
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.parts.push(Part::Text { text: text.into() });
        self
    }

    /// Add raw image bytes.
    ///
    /// # Panics
    /// Panics if `data` exceeds [`MAX_IMAGE_SIZE`] (10 MB).
    pub fn with_image(mut self, mime_type: impl Into<String>, data: Vec<u8>) -> Self {
        assert!(
            data.len() <= MAX_IMAGE_SIZE,
            "Image size {} exceeds maximum allowed size of {} bytes",
            data.len(),
            MAX_IMAGE_SIZE
        );
        self.parts.push(Part::Image { mime_type: mime_type.into(), data });
        self
    }
}

impl Part {
    /// Returns the text content if this is a Text part, None otherwise.
    pub fn text(&self) -> Option<&str> {
        match self {
            Part::Text { text } => Some(text.as_str()),
            _ => None,
        }
    }
}

/// Sampling parameters forwarded to the model.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InferenceConfig {
    pub max_output_tokens: Option<i32>,
    pub temperature: Option<f32>,
}

/// Requested request-handling class: a cost/latency tradeoff.
///
/// `Flex` is the low-cost, best-effort class; `Priority` trades cost for
/// latency guarantees.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ServiceTier {
    Standard,
    Flex,
    Priority,
}

impl std::fmt::Display for ServiceTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            ServiceTier::Standard => "standard",
            ServiceTier::Flex => "flex",
            ServiceTier::Priority => "priority",
        };
        f.write_str(s)
    }
}

/// One multimodal chat request: ordered turns, sampling parameters, and an
/// optional requested service tier.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConverseRequest {
    pub contents: Vec<Content>,
    pub config: Option<InferenceConfig>,
    pub service_tier: Option<ServiceTier>,
}

/// Token counts reported by the service for one call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenUsage {
    pub input_tokens: i32,
    pub output_tokens: i32,
    pub total_tokens: i32,
}

/// Why the model stopped generating output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FinishReason {
    /// Natural end of turn (also covers stop sequences and tool use).
    Stop,
    /// The output token limit was reached.
    MaxTokens,
    /// Content filtering or guardrail intervention.
    Safety,
    Other,
}

impl std::fmt::Display for FinishReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            FinishReason::Stop => "stop",
            FinishReason::MaxTokens => "max_tokens",
            FinishReason::Safety => "safety",
            FinishReason::Other => "other",
        };
        f.write_str(s)
    }
}

/// The model's reply for one Converse call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConverseReply {
    pub content: Option<Content>,
    pub usage: Option<TokenUsage>,
    pub finish_reason: FinishReason,
    /// Latency class the service actually applied, verbatim as reported
    /// (e.g. `"standard"` or `"optimized"`). Absent when the service does
    /// not include a performance-config acknowledgment.
    pub latency: Option<String>,
}

impl ConverseReply {
    pub fn new(content: Content) -> Self {
        Self {
            content: Some(content),
            usage: None,
            finish_reason: FinishReason::Stop,
            latency: None,
        }
    }

    pub fn with_usage(mut self, usage: TokenUsage) -> Self {
        self.usage = Some(usage);
        self
    }

    pub fn with_latency(mut self, latency: impl Into<String>) -> Self {
        self.latency = Some(latency.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_builder_preserves_part_order() {
        let content = Content::new("user").with_image("image/png", vec![1, 2, 3]).with_text("hi");
        assert_eq!(content.role, "user");
        assert_eq!(content.parts.len(), 2);
        assert!(matches!(content.parts[0], Part::Image { .. }));
        assert_eq!(content.parts[1].text(), Some("hi"));
    }

    #[test]
    fn test_part_text_accessor() {
        let text = Part::Text { text: "hello".to_string() };
        let image = Part::Image { mime_type: "image/png".to_string(), data: vec![0] };
        assert_eq!(text.text(), Some("hello"));
        assert_eq!(image.text(), None);
    }

    #[test]
    fn test_reply_builder() {
        let reply = ConverseReply::new(Content::new("model").with_text("ok"))
            .with_usage(TokenUsage { input_tokens: 1, output_tokens: 2, total_tokens: 3 })
            .with_latency("optimized");
        assert_eq!(reply.finish_reason, FinishReason::Stop);
        assert_eq!(reply.usage.unwrap().total_tokens, 3);
        assert_eq!(reply.latency.as_deref(), Some("optimized"));
    }

    #[test]
    fn test_display_impls() {
        assert_eq!(ServiceTier::Flex.to_string(), "flex");
        assert_eq!(FinishReason::MaxTokens.to_string(), "max_tokens");
    }

    #[test]
    #[should_panic(expected = "exceeds maximum")]
    fn test_oversized_image_rejected() {
        let _ = Content::new("user").with_image("image/png", vec![0; MAX_IMAGE_SIZE + 1]);
    }
}
