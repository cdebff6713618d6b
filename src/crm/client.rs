use crate::config::CrmConfig;
use crate::crm::types::{ContactUpsert, CrmApi, CrmContact, CrmError, OpportunityCreate};
use crate::crm::urls::*;
use async_trait::async_trait;
use log::info;
use reqwest::StatusCode;
use serde_json::{json, Value};
use std::collections::HashMap;

/// GhlClient - bearer-token client for the GoHighLevel-style CRM v2 API.
///
/// One method per endpoint the site touches. Every failure maps into
/// `CrmError`; the caller decides which of them are fatal to a submission.
pub struct GhlClient {
    client: reqwest::Client,
    api_key: String,
    location_id: String,
    base_url: String,
}

impl GhlClient {
    pub fn new(cfg: &CrmConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key: cfg.api_key.clone(),
            location_id: cfg.location_id.clone(),
            base_url: cfg.base_url.clone(),
        }
    }

    fn request(&self, builder: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        builder
            .bearer_auth(&self.api_key)
            .header("Version", GHL_API_VERSION)
            .header("Content-Type", "application/json")
    }

    async fn read_json(&self, resp: reqwest::Response) -> Result<Value, CrmError> {
        match resp.status() {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => return Err(CrmError::Unauthorized),
            StatusCode::TOO_MANY_REQUESTS => return Err(CrmError::RateLimited),
            _ => {}
        }
        let status = resp.status();
        let raw = resp.text().await.map_err(|e| CrmError::Http(e.to_string()))?;
        if !status.is_success() {
            return Err(CrmError::Http(format!("{} {}", status.as_u16(), raw)));
        }
        serde_json::from_str(&raw)
            .map_err(|e| CrmError::InvalidResponse(format!("json parse failed: {e}, raw={raw}")))
    }

    /// The v2 API wants custom fields as `[{key, field_value}]` pairs.
    fn custom_fields_payload(fields: &HashMap<String, String>) -> Vec<Value> {
        let mut keys: Vec<_> = fields.keys().collect();
        keys.sort();
        keys.into_iter()
            .map(|k| json!({ "key": k, "field_value": fields[k] }))
            .collect()
    }

    fn parse_contact(v: &Value) -> Result<CrmContact, CrmError> {
        let node = v.get("contact").unwrap_or(v);
        serde_json::from_value(node.clone())
            .map_err(|e| CrmError::InvalidResponse(format!("unexpected contact shape: {e}")))
    }

    /// The email is user input; let reqwest percent-encode it so addresses
    /// with `+` or other reserved characters survive the query string.
    fn search_request(&self, email: &str) -> Result<reqwest::Request, CrmError> {
        self.request(self.client.get(url_contacts(&self.base_url)))
            .query(&[
                ("locationId", self.location_id.as_str()),
                ("query", email),
            ])
            .build()
            .map_err(|e| CrmError::Http(e.to_string()))
    }
}

#[async_trait]
impl CrmApi for GhlClient {
    async fn search_contacts_by_email(&self, email: &str) -> Result<Vec<CrmContact>, CrmError> {
        let req = self.search_request(email)?;
        let url = req.url().clone();
        let resp = self
            .client
            .execute(req)
            .await
            .map_err(|e| CrmError::Http(e.to_string()))?;
        info!("{} search_contacts_by_email(...) [{}]", self, url);
        let v = self.read_json(resp).await?;
        let contacts = v
            .get("contacts")
            .and_then(|c| c.as_array())
            .ok_or_else(|| CrmError::InvalidResponse("missing contacts array".to_string()))?;
        contacts.iter().map(Self::parse_contact).collect()
    }

    async fn upsert_contact(&self, contact: &ContactUpsert) -> Result<CrmContact, CrmError> {
        let url = url_contacts_upsert(&self.base_url);
        let body = json!({
            "locationId": self.location_id,
            "name": contact.name,
            "email": contact.email,
            "phone": contact.phone,
            "source": contact.source,
            "tags": contact.tags,
            "customFields": Self::custom_fields_payload(&contact.custom_fields),
        });
        let resp = self
            .request(self.client.post(&url))
            .json(&body)
            .send()
            .await
            .map_err(|e| CrmError::Http(e.to_string()))?;
        info!("{} upsert_contact(...) [{}]", self, url);
        let v = self.read_json(resp).await?;
        Self::parse_contact(&v)
    }

    async fn update_custom_fields(
        &self,
        contact_id: &str,
        fields: &HashMap<String, String>,
    ) -> Result<CrmContact, CrmError> {
        let url = url_contacts_contactid(&self.base_url, contact_id);
        let body = json!({ "customFields": Self::custom_fields_payload(fields) });
        let resp = self
            .request(self.client.put(&url))
            .json(&body)
            .send()
            .await
            .map_err(|e| CrmError::Http(e.to_string()))?;
        info!("{} update_custom_fields(...) [{}]", self, url);
        let v = self.read_json(resp).await?;
        Self::parse_contact(&v)
    }

    async fn add_tags(&self, contact_id: &str, tags: &[String]) -> Result<(), CrmError> {
        let url = url_contacts_contactid_tags(&self.base_url, contact_id);
        let resp = self
            .request(self.client.post(&url))
            .json(&json!({ "tags": tags }))
            .send()
            .await
            .map_err(|e| CrmError::Http(e.to_string()))?;
        info!("{} add_tags(...) [{}]", self, url);
        self.read_json(resp).await?;
        Ok(())
    }

    async fn create_opportunity(&self, opportunity: &OpportunityCreate) -> Result<(), CrmError> {
        let url = url_opportunities(&self.base_url);
        let body = json!({
            "locationId": self.location_id,
            "contactId": opportunity.contact_id,
            "pipelineId": opportunity.pipeline_id,
            "pipelineStageId": opportunity.pipeline_stage_id,
            "name": opportunity.name,
            "status": opportunity.status,
        });
        let resp = self
            .request(self.client.post(&url))
            .json(&body)
            .send()
            .await
            .map_err(|e| CrmError::Http(e.to_string()))?;
        info!("{} create_opportunity(...) [{}]", self, url);
        self.read_json(resp).await?;
        Ok(())
    }

    async fn trigger_workflow(&self, workflow_id: &str, contact_id: &str) -> Result<(), CrmError> {
        let url = url_contacts_contactid_workflow(&self.base_url, contact_id, workflow_id);
        let resp = self
            .request(self.client.post(&url))
            .json(&json!({}))
            .send()
            .await
            .map_err(|e| CrmError::Http(e.to_string()))?;
        info!("{} trigger_workflow(...) [{}]", self, url);
        self.read_json(resp).await?;
        Ok(())
    }
}

impl std::fmt::Display for GhlClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "<GhlClient [{}]>", self.location_id)
    }
}

impl std::fmt::Debug for GhlClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "<GhlClient [{}]>", self.location_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CrmConfig;

    #[test]
    fn search_request_percent_encodes_the_email() {
        let client = GhlClient::new(&CrmConfig {
            api_key: "key".to_string(),
            location_id: "loc".to_string(),
            base_url: "https://crm.example".to_string(),
        });
        let req = client.search_request("a+b@x.co").unwrap();
        let url = req.url().as_str();
        // A raw `+` would decode server-side as a space and miss the
        // existing contact, sending the submit flow down the create path.
        assert!(url.contains("query=a%2Bb%40x.co"), "{url}");
        assert!(url.contains("locationId=loc"), "{url}");
    }

    #[test]
    fn custom_fields_payload_uses_key_value_pairs() {
        let mut fields = HashMap::new();
        fields.insert("interest_area".to_string(), "residency".to_string());
        fields.insert("inquiry_type".to_string(), "R&D Residency Inquiry".to_string());
        let payload = GhlClient::custom_fields_payload(&fields);
        assert_eq!(payload.len(), 2);
        assert_eq!(payload[0]["key"], "inquiry_type");
        assert_eq!(payload[1]["field_value"], "residency");
    }

    #[test]
    fn parse_contact_accepts_wrapped_and_bare_shapes() {
        let wrapped = json!({ "contact": { "id": "c1", "email": "a@b.co" } });
        let bare = json!({ "id": "c2", "tags": ["act-farm"] });
        assert_eq!(GhlClient::parse_contact(&wrapped).unwrap().id.as_deref(), Some("c1"));
        let c = GhlClient::parse_contact(&bare).unwrap();
        assert_eq!(c.id.as_deref(), Some("c2"));
        assert_eq!(c.tags, vec!["act-farm"]);
    }
}
