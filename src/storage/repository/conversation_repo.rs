use crate::ai::ChatMessage;
use crate::storage::entity::conversation::{
    ActiveModel as ConversationActiveModel, Entity as Conversation,
};
use chrono::Utc;
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, Set};

pub struct ConversationRepository;

impl ConversationRepository {
    /// Append one user/assistant exchange to a session's history, creating
    /// the row on first contact.
    pub async fn append_exchange(
        db: &DatabaseConnection,
        session_id: &str,
        user_message: &str,
        assistant_reply: &str,
    ) -> Result<(), anyhow::Error> {
        let existing = Conversation::find_by_id(session_id.to_string())
            .one(db)
            .await?;

        let mut history: Vec<ChatMessage> = existing
            .as_ref()
            .and_then(|m| serde_json::from_str(&m.history_json).ok())
            .unwrap_or_default();
        history.push(ChatMessage::user(user_message));
        history.push(ChatMessage::assistant(assistant_reply));

        let now = Utc::now().timestamp();
        let history_json = serde_json::to_string(&history)?;

        match existing {
            Some(_) => {
                let update = ConversationActiveModel {
                    session_id: Set(session_id.to_string()),
                    history_json: Set(history_json),
                    updated_at: Set(now),
                    ..Default::default()
                };
                update.update(db).await?;
            }
            None => {
                let insert = ConversationActiveModel {
                    session_id: Set(session_id.to_string()),
                    interface: Set("chatbot".to_string()),
                    site: Set("act-farm".to_string()),
                    history_json: Set(history_json),
                    updated_at: Set(now),
                };
                insert.insert(db).await?;
            }
        }

        Ok(())
    }

    pub async fn history(
        db: &DatabaseConnection,
        session_id: &str,
    ) -> Result<Vec<ChatMessage>, anyhow::Error> {
        let model = Conversation::find_by_id(session_id.to_string())
            .one(db)
            .await?;
        Ok(model
            .and_then(|m| serde_json::from_str(&m.history_json).ok())
            .unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::establish_connection;

    #[tokio::test]
    async fn appends_across_multiple_exchanges() {
        let db = establish_connection("sqlite::memory:").await.unwrap();

        ConversationRepository::append_exchange(&db, "s1", "Hi there", "Welcome to the valley!")
            .await
            .unwrap();
        ConversationRepository::append_exchange(&db, "s1", "Any cabins?", "June's Patch sleeps two.")
            .await
            .unwrap();

        let history = ConversationRepository::history(&db, "s1").await.unwrap();
        assert_eq!(history.len(), 4);
        assert_eq!(history[0].role, "user");
        assert_eq!(history[3].content, "June's Patch sleeps two.");
    }

    #[tokio::test]
    async fn sessions_are_isolated() {
        let db = establish_connection("sqlite::memory:").await.unwrap();
        ConversationRepository::append_exchange(&db, "a", "q", "r")
            .await
            .unwrap();
        assert!(ConversationRepository::history(&db, "b")
            .await
            .unwrap()
            .is_empty());
    }
}
