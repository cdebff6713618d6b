pub mod client;
pub mod types;
pub mod urls;

pub use client::GhlClient;
pub use types::{ContactUpsert, CrmApi, CrmContact, CrmError, OpportunityCreate};
