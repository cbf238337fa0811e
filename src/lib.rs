//! # bedrock-flex-demo
//!
//! Image inference demo for the Amazon Bedrock Converse API using the
//! *flex* service tier.
//!
//! ## Overview
//!
//! The binary reads a local PNG, sends a single user turn (image part, then
//! text part) to a Bedrock model with the flex service tier requested, and
//! prints the response text, token usage, stop reason, and the latency class
//! the service actually applied.
//!
//! - [`BedrockClient`] - the real provider, backed by `aws-sdk-bedrockruntime`
//! - [`MockConverse`] - scripted provider for tests
//! - [`run_demo`] - the demo sequence itself
//!
//! ## Authentication
//!
//! Bedrock uses AWS IAM credentials loaded from the standard credential
//! chain (environment variables, `~/.aws/credentials`, IMDS, etc.). No API
//! key is needed.
//!
//! ## Service Tiers
//!
//! The flex tier trades latency guarantees for cost. The response's
//! performance config reports the latency class the service actually
//! applied, which the demo prints verbatim when present.

pub mod client;
pub mod config;
pub(crate) mod convert;
pub mod demo;
pub mod error;
pub mod mock;
pub mod types;

pub use client::{BedrockClient, Converse};
pub use config::BedrockConfig;
pub use demo::{DEFAULT_IMAGE_PATH, run_demo};
pub use error::{DemoError, Result};
pub use mock::MockConverse;
pub use types::{
    Content, ConverseReply, ConverseRequest, FinishReason, InferenceConfig, Part, ServiceTier,
    TokenUsage,
};
