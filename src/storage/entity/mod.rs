pub mod conversation;

pub use conversation::Entity as Conversation;
