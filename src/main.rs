//! Bedrock Flex Tier Converse demo.
//!
//! Reads `images/test1.png`, sends it with a text instruction to a Bedrock
//! model under the flex service tier, and prints the reply, token usage,
//! stop reason, and applied latency class.
//!
//! ```bash
//! export AWS_REGION=us-west-2            # optional, defaults to us-west-2
//! export BEDROCK_MODEL_ID=global.amazon.nova-2-lite-v1:0   # optional
//! cargo run
//! ```

use anyhow::Result;
use bedrock_flex_demo::{BedrockClient, BedrockConfig, DEFAULT_IMAGE_PATH, DemoError, run_demo};
use std::io;
use std::path::Path;
use tracing::error;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load environment variables from .env if present.
    dotenvy::dotenv().ok();

    let config = BedrockConfig::from_env();
    let client = BedrockClient::new(config).await?;

    match run_demo(&client, Path::new(DEFAULT_IMAGE_PATH), &mut io::stdout()).await {
        Ok(()) => {}
        Err(e @ (DemoError::Io(_) | DemoError::Config(_))) => {
            error!("failed to read image file: {e}");
            eprintln!("Failed to read image file: {e}\n{e:?}");
        }
        Err(e) => {
            error!("bedrock call failed: {e}");
            eprintln!("Bedrock call failed: {e}\n{e:?}");
        }
    }

    // The client drops here on every path, releasing its connections.
    Ok(())
}
