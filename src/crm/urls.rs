/// CRM v2 API base URL (overridable via `GHL_BASE_URL`).
pub const GHL_API_URL: &str = "https://services.leadconnectorhq.com";

/// API version header value required by v2 endpoints.
pub const GHL_API_VERSION: &str = "2021-07-28";

pub fn url_contacts(base: &str) -> String {
    format!("{}/contacts/", base.trim_end_matches('/'))
}

pub fn url_contacts_upsert(base: &str) -> String {
    format!("{}/contacts/upsert", base.trim_end_matches('/'))
}

pub fn url_contacts_contactid(base: &str, contact_id: &str) -> String {
    format!("{}/contacts/{}", base.trim_end_matches('/'), contact_id)
}

pub fn url_contacts_contactid_tags(base: &str, contact_id: &str) -> String {
    format!("{}/contacts/{}/tags", base.trim_end_matches('/'), contact_id)
}

pub fn url_opportunities(base: &str) -> String {
    format!("{}/opportunities/", base.trim_end_matches('/'))
}

pub fn url_contacts_contactid_workflow(base: &str, contact_id: &str, workflow_id: &str) -> String {
    format!(
        "{}/contacts/{}/workflow/{}",
        base.trim_end_matches('/'),
        contact_id,
        workflow_id
    )
}
