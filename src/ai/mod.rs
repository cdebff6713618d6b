pub mod anthropic;
pub mod types;

pub use anthropic::AnthropicProvider;
pub use types::{ChatMessage, ChatRequest, ChatResponse, LlmError, LlmProvider};
