use crate::ai::{ChatMessage, ChatRequest, LlmProvider};
use crate::storage::repository::ConversationRepository;
use log::{error, warn};
use sea_orm::DatabaseConnection;
use std::sync::Arc;

/// Only the trailing turns of the client-supplied history are forwarded.
pub const HISTORY_LIMIT: usize = 10;

const MAX_TOKENS: u32 = 500;

/// Replies when no provider key is configured.
const UNAVAILABLE_REPLY: &str =
    "I'm currently unavailable. Please email hello@acurioustractor.com for assistance.";

/// Replies when the provider call fails. The endpoint still answers 200;
/// the widget must never show a hard failure mid-conversation.
const TROUBLE_REPLY: &str =
    "Sorry, I'm having trouble right now. Please try again or email hello@acurioustractor.com";

/// Replies when the provider answers but with no usable text.
const UNSURE_REPLY: &str =
    "I'm not sure how to help with that. Please contact hello@acurioustractor.com";

/// Farm knowledge for the chatbot, sent as the system preamble on every call.
const FARM_CONTEXT: &str = r#"
You are the ACT Farm assistant, a helpful guide for visitors to A Curious Tractor Farm in Black Cockatoo Valley, Queensland, Australia.

## About ACT Farm
ACT Farm is a low-impact eco-residency and R&D prototyping hub on Jinibara country. We focus on:
- Regenerative land practices
- Conservation-first experiences
- Artist and maker residencies
- Sustainable technology prototyping

## Key Information

### Location
- Black Cockatoo Valley, Sunshine Coast Hinterland
- On Jinibara traditional lands (always acknowledge Country)
- About 1.5 hours from Brisbane

### Residencies
- Artist Residency: 2-4 week stays for artists, writers, makers
- Maker Residency: For those building sustainable tech/tools
- Research Residency: For academics and conservation researchers
- All residencies include accommodation and workspace

### Accommodation
- June's Patch: Our main eco-cabin
- Low-impact, off-grid design
- Solar powered
- Rainwater collection
- Composting toilets

### Activities
- Land stewardship (regenerative planting)
- Wildlife observation (black cockatoos, wallabies)
- Creative workshops
- Conservation volunteering
- Bush walks and nature connection

### The Land
- Native bushland restoration in progress
- Habitat for endangered black cockatoos
- Creek systems and natural springs
- Food forest development

### Philosophy
- "We don't build more. We wire what exists."
- Minimal intervention, maximum connection
- Technology serves nature, not vice versa
- Community over consumption

## Response Guidelines
1. Be warm and welcoming (Australian friendly tone)
2. Keep responses concise (2-4 sentences usually)
3. Always acknowledge Jinibara country when relevant
4. Direct complex inquiries to hello@acurioustractor.com
5. Be honest about what you don't know
6. Encourage direct contact for bookings
"#;

/// Pass-through bridge between the chat widget and the completion API.
/// Every failure path degrades into a friendly reply; nothing here is
/// allowed to surface an error to the visitor.
pub struct ChatAssistant<P: LlmProvider> {
    provider: Option<P>,
    db: Option<Arc<DatabaseConnection>>,
    model: String,
}

impl<P: LlmProvider> ChatAssistant<P> {
    pub fn new(provider: Option<P>, db: Option<Arc<DatabaseConnection>>, model: String) -> Self {
        Self {
            provider,
            db,
            model,
        }
    }

    pub async fn respond(
        &self,
        message: &str,
        session_id: Option<&str>,
        history: &[ChatMessage],
    ) -> String {
        let Some(provider) = &self.provider else {
            error!("chat provider not configured");
            return UNAVAILABLE_REPLY.to_string();
        };

        let mut messages: Vec<ChatMessage> = history
            .iter()
            .skip(history.len().saturating_sub(HISTORY_LIMIT))
            .cloned()
            .collect();
        messages.push(ChatMessage::user(message));

        let mut system = FARM_CONTEXT.to_string();
        if let Some(extra) = knowledge_context(message) {
            system.push_str("\n\n## Additional Context from Knowledge Base\n");
            system.push_str(&extra);
        }

        let req = ChatRequest {
            model: self.model.clone(),
            system,
            messages,
            max_tokens: MAX_TOKENS,
        };

        let reply = match provider.chat(req).await {
            Ok(resp) if !resp.text.trim().is_empty() => resp.text,
            Ok(_) => UNSURE_REPLY.to_string(),
            Err(e) => {
                error!("chat completion failed: {e}");
                return TROUBLE_REPLY.to_string();
            }
        };

        // Persistence is best-effort; the visitor gets the reply either way.
        if let (Some(db), Some(session_id)) = (&self.db, session_id) {
            if let Err(e) =
                ConversationRepository::append_exchange(db, session_id, message, &reply).await
            {
                warn!("failed to store conversation: {e}");
            }
        }

        reply
    }
}

/// Knowledge-base retrieval extension point. Not implemented yet: there is no
/// indexed knowledge store, so every query answers with no extra context.
fn knowledge_context(_query: &str) -> Option<String> {
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::{ChatResponse, LlmError};
    use async_trait::async_trait;
    use std::sync::Mutex;

    struct ScriptedProvider {
        reply: Result<String, ()>,
        last_request: Mutex<Option<ChatRequest>>,
    }

    impl ScriptedProvider {
        fn replying(text: &str) -> Self {
            Self {
                reply: Ok(text.to_string()),
                last_request: Mutex::new(None),
            }
        }

        fn failing() -> Self {
            Self {
                reply: Err(()),
                last_request: Mutex::new(None),
            }
        }
    }

    #[async_trait]
    impl LlmProvider for ScriptedProvider {
        async fn chat(&self, req: ChatRequest) -> Result<ChatResponse, LlmError> {
            *self.last_request.lock().unwrap() = Some(req);
            match &self.reply {
                Ok(text) => Ok(ChatResponse {
                    text: text.clone(),
                    raw: None,
                }),
                Err(()) => Err(LlmError::Http("502 bad gateway".to_string())),
            }
        }
    }

    #[tokio::test]
    async fn no_provider_key_answers_with_unavailable_text() {
        let assistant: ChatAssistant<ScriptedProvider> =
            ChatAssistant::new(None, None, "m".to_string());
        let reply = assistant.respond("Hello", None, &[]).await;
        assert_eq!(reply, UNAVAILABLE_REPLY);
    }

    #[tokio::test]
    async fn provider_failure_answers_with_friendly_fallback() {
        let assistant =
            ChatAssistant::new(Some(ScriptedProvider::failing()), None, "m".to_string());
        let reply = assistant.respond("Hello", Some("s1"), &[]).await;
        assert_eq!(reply, TROUBLE_REPLY);
    }

    #[tokio::test]
    async fn blank_completion_answers_with_unsure_text() {
        let assistant =
            ChatAssistant::new(Some(ScriptedProvider::replying("  ")), None, "m".to_string());
        let reply = assistant.respond("Hello", None, &[]).await;
        assert_eq!(reply, UNSURE_REPLY);
    }

    #[tokio::test]
    async fn history_is_bounded_to_the_trailing_turns() {
        let provider = ScriptedProvider::replying("G'day!");
        let history: Vec<ChatMessage> = (0..15)
            .map(|i| ChatMessage::user(format!("turn {i}")))
            .collect();
        let assistant = ChatAssistant::new(Some(provider), None, "m".to_string());
        let reply = assistant.respond("latest", None, &history).await;
        assert_eq!(reply, "G'day!");

        let req = assistant
            .provider
            .as_ref()
            .unwrap()
            .last_request
            .lock()
            .unwrap()
            .take()
            .unwrap();
        // 10 trailing history turns plus the new user message.
        assert_eq!(req.messages.len(), HISTORY_LIMIT + 1);
        assert_eq!(req.messages[0].content, "turn 5");
        assert_eq!(req.messages.last().unwrap().content, "latest");
        assert!(req.system.contains("Black Cockatoo Valley"));
        assert_eq!(req.max_tokens, 500);
    }

    #[tokio::test]
    async fn persistence_failure_does_not_change_the_reply() {
        let db = crate::storage::establish_connection("sqlite::memory:")
            .await
            .unwrap();
        // Dropping the table makes every append fail.
        use sea_orm::ConnectionTrait;
        db.execute(sea_orm::Statement::from_string(
            sea_orm::DatabaseBackend::Sqlite,
            "DROP TABLE conversations;".to_string(),
        ))
        .await
        .unwrap();

        let assistant = ChatAssistant::new(
            Some(ScriptedProvider::replying("Still here")),
            Some(Arc::new(db)),
            "m".to_string(),
        );
        let reply = assistant.respond("Hello", Some("s1"), &[]).await;
        assert_eq!(reply, "Still here");
    }
}
