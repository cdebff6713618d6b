use crate::ai::AnthropicProvider;
use crate::chat::ChatAssistant;
use crate::contact::ContactService;
use crate::crm::GhlClient;
use crate::map::Catalog;
use std::sync::Arc;

/// Shared handler state; everything here is immutable after startup.
#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<Catalog>,
    pub contacts: Arc<ContactService<GhlClient>>,
    pub assistant: Arc<ChatAssistant<AnthropicProvider>>,
}
