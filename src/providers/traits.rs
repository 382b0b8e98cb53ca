use async_trait::async_trait;

use crate::error::LlmError;
use crate::media::Base64Png;

/// A composed multimodal prompt: system text, user instruction text, and the
/// inline PNG payloads in presentation order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VisionRequest {
    pub system: String,
    pub user_text: String,
    pub images: Vec<Base64Png>,
}

/// Boundary to the hosted vision-capable chat model.
///
/// Implementations own transport, auth, and timeout; they return the model's
/// raw reply text and never interpret it. Schema validation happens on the
/// caller's side of this trait. No retry is performed here.
#[async_trait]
pub trait VisionModel: Send + Sync {
    /// Dispatch one request and return the reply text.
    async fn complete(&self, request: &VisionRequest) -> Result<String, LlmError>;
}
