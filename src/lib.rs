//! Site services for ACT Farm / Black Cockatoo Valley: the interactive map
//! catalog, the contact-to-CRM lead-capture flow, and the chat assistant.

pub mod ai;
pub mod api;
pub mod app_state;
pub mod cache;
pub mod chat;
pub mod config;
pub mod contact;
pub mod crm;
pub mod map;
pub mod routing;
pub mod storage;
