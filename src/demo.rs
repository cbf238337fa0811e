//! The demo runner: read an image, send one flex-tier Converse request, and
//! print the reply.
//!
//! Output goes through a `Write` so tests can capture it; the binary passes
//! stdout.

use crate::client::Converse;
use crate::error::{DemoError, Result};
use crate::types::{
    Content, ConverseReply, ConverseRequest, InferenceConfig, MAX_IMAGE_SIZE, ServiceTier,
};
use std::fs;
use std::io::Write;
use std::path::Path;
use tracing::debug;

/// Relative path of the demo image read on startup.
pub const DEFAULT_IMAGE_PATH: &str = "images/test1.png";

const PROMPT: &str = "Describe this image in detail.";
const MAX_OUTPUT_TOKENS: i32 = 512;
const TEMPERATURE: f32 = 0.7;

const BANNER: &str = "============================================================";

const USAGE_NOTES: &str = r#"
How to call:

// 1. Read the image
let image_bytes = std::fs::read("image.png")?;

// 2. Build the user turn (image part, then text part)
let request = ConverseRequest {
    contents: vec![
        Content::new("user")
            .with_image("image/png", image_bytes)
            .with_text("Describe this image."),
    ],
    config: None,
    service_tier: Some(ServiceTier::Flex),
};

// 3. Send it with the flex tier applied
let config = BedrockConfig::new("us-west-2", "us.amazon.nova-2-lite-v1:0");
let client = BedrockClient::new(config).await?;
let reply = client.converse(request).await?;
"#;

/// Run the demo against the given provider.
///
/// Straight-line sequence: read the image file, build the fixed flex-tier
/// request, invoke the provider once, print the reply and the usage notes.
/// A file-read failure returns before any remote call is made; a remote
/// failure is returned as-is. Neither is retried.
pub async fn run_demo<C: Converse + ?Sized>(
    client: &C,
    image_path: &Path,
    out: &mut dyn Write,
) -> Result<()> {
    writeln!(out, "{BANNER}")?;
    writeln!(out, "Image inference with Flex Tier + Converse API")?;
    writeln!(out, "{BANNER}")?;

    let image_bytes = fs::read(image_path)?;
    if image_bytes.len() > MAX_IMAGE_SIZE {
        return Err(DemoError::Config(format!(
            "image {} is {} bytes, exceeding the {MAX_IMAGE_SIZE} byte limit",
            image_path.display(),
            image_bytes.len()
        )));
    }
    let mime_type = mime_type_for(image_path)?;
    writeln!(out, "Image: {}\n", image_path.display())?;

    debug!(
        "sending {} byte {mime_type} image to model={} with tier=flex",
        image_bytes.len(),
        client.name()
    );

    let request = ConverseRequest {
        contents: vec![Content::new("user").with_image(mime_type, image_bytes).with_text(PROMPT)],
        config: Some(InferenceConfig {
            max_output_tokens: Some(MAX_OUTPUT_TOKENS),
            temperature: Some(TEMPERATURE),
        }),
        service_tier: Some(ServiceTier::Flex),
    };

    let reply = client.converse(request).await?;
    print_reply(&reply, out)?;

    writeln!(out, "\n{BANNER}")?;
    writeln!(out, "Converse API + Flex Tier usage")?;
    writeln!(out, "{BANNER}")?;
    writeln!(out, "{USAGE_NOTES}")?;

    Ok(())
}

/// Map a file extension to the MIME type sent to the provider.
fn mime_type_for(path: &Path) -> Result<&'static str> {
    let ext = path.extension().and_then(|e| e.to_str()).map(str::to_ascii_lowercase);
    match ext.as_deref() {
        Some("png") => Ok("image/png"),
        Some("jpg") | Some("jpeg") => Ok("image/jpeg"),
        Some("gif") => Ok("image/gif"),
        Some("webp") => Ok("image/webp"),
        _ => Err(DemoError::Config(format!(
            "unsupported image file extension: {}",
            path.display()
        ))),
    }
}

/// Print the reply sections: response text, token usage, stop reason, and
/// the latency line when the service acknowledged a performance config.
fn print_reply(reply: &ConverseReply, out: &mut dyn Write) -> Result<()> {
    writeln!(out, "{BANNER}")?;
    writeln!(out, "Response")?;
    writeln!(out, "{BANNER}")?;

    let text = reply
        .content
        .as_ref()
        .and_then(|c| c.parts.first())
        .and_then(|p| p.text())
        .unwrap_or_default();
    writeln!(out, "\nResponse text:")?;
    writeln!(out, "{text}")?;

    if let Some(usage) = &reply.usage {
        writeln!(out, "\nToken usage:")?;
        writeln!(out, "  Input tokens:  {}", usage.input_tokens)?;
        writeln!(out, "  Output tokens: {}", usage.output_tokens)?;
        writeln!(out, "  Total tokens:  {}", usage.total_tokens)?;
    }

    writeln!(out, "\nStop reason: {}", reply.finish_reason)?;

    if let Some(latency) = &reply.latency {
        writeln!(out, "\nPerformance config:")?;
        writeln!(out, "  Latency: {latency}")?;
    }

    Ok(())
}
