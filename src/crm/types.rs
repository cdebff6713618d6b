use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(thiserror::Error, Debug)]
pub enum CrmError {
    #[error("http error: {0}")]
    Http(String),
    #[error("unauthorized")]
    Unauthorized,
    #[error("rate limited")]
    RateLimited,
    #[error("invalid response: {0}")]
    InvalidResponse(String),
}

/// A contact record as the CRM returns it. Only the fields this site reads;
/// the platform stores far more.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CrmContact {
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
}

/// Payload for creating (or platform-side deduplicating) a contact.
#[derive(Clone, Debug)]
pub struct ContactUpsert {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub source: String,
    pub tags: Vec<String>,
    pub custom_fields: HashMap<String, String>,
}

#[derive(Clone, Debug)]
pub struct OpportunityCreate {
    pub contact_id: String,
    pub pipeline_id: String,
    pub pipeline_stage_id: String,
    pub name: String,
    pub status: String,
}

/// The CRM operations the lead-capture flow needs. `GhlClient` is the real
/// implementation; tests substitute their own.
#[async_trait]
pub trait CrmApi: Send + Sync {
    async fn search_contacts_by_email(&self, email: &str) -> Result<Vec<CrmContact>, CrmError>;

    async fn upsert_contact(&self, contact: &ContactUpsert) -> Result<CrmContact, CrmError>;

    async fn update_custom_fields(
        &self,
        contact_id: &str,
        fields: &HashMap<String, String>,
    ) -> Result<CrmContact, CrmError>;

    async fn add_tags(&self, contact_id: &str, tags: &[String]) -> Result<(), CrmError>;

    async fn create_opportunity(&self, opportunity: &OpportunityCreate) -> Result<(), CrmError>;

    async fn trigger_workflow(&self, workflow_id: &str, contact_id: &str) -> Result<(), CrmError>;
}
