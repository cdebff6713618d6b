pub mod assistant;

pub use assistant::{ChatAssistant, HISTORY_LIMIT};
