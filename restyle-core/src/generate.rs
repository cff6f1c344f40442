use serde::{Deserialize, Serialize};

use crate::{Message, RestyleError};

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
pub struct GenerationRequest {
    /// Empty means "use the client's default model".
    pub model: String,
    pub messages: Vec<Message>,
    pub max_tokens: u32,
    /// `None` means "use the client's default temperature".
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
}

/// The sole seam to the remote text service. The service may return several
/// candidate completions; implementations expose only the first one's text.
#[async_trait::async_trait]
pub trait Generator: Send + Sync {
    async fn generate(&self, request: GenerationRequest) -> Result<String, RestyleError>;
}
