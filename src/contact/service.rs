use crate::cache::TtlCache;
use crate::crm::types::{ContactUpsert, CrmApi, CrmContact, CrmError, OpportunityCreate};
use crate::routing::RouteTable;
use chrono::Utc;
use log::{error, warn};
use regex::Regex;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

/// Contact lookups are cached this long; within the window a resubmission
/// skips the remote search entirely.
const CONTACT_CACHE_TTL: Duration = Duration::from_secs(600);

const CONTACT_SOURCE: &str = "ACT Farm Website";

const EMAIL_PATTERN: &str = r"^[^@\s]+@[^@\s]+\.[^@\s]+$";

#[derive(Clone, Debug, Default)]
pub struct ContactSubmission {
    pub name: String,
    pub email: String,
    pub interest: String,
    pub message: String,
}

#[derive(Clone, Debug)]
pub struct ContactOutcome {
    pub contact_id: String,
}

#[derive(thiserror::Error, Debug)]
pub enum SubmitError {
    #[error("{0} is required")]
    MissingField(&'static str),
    #[error("email address is not valid")]
    InvalidEmail,
    #[error(transparent)]
    Crm(#[from] CrmError),
}

impl SubmitError {
    /// Validation errors are the caller's fault; everything else is ours.
    pub fn is_client_error(&self) -> bool {
        matches!(self, SubmitError::MissingField(_) | SubmitError::InvalidEmail)
    }
}

/// The contact-to-CRM lead-capture flow: classify the declared interest,
/// look up the contact by email through the cache, update-or-create, then
/// best-effort pipeline opportunity and workflow trigger.
pub struct ContactService<C: CrmApi> {
    crm: Arc<C>,
    routes: RouteTable,
    cache: TtlCache<Vec<CrmContact>>,
    enable_pipelines: bool,
    email_re: Regex,
}

impl<C: CrmApi> ContactService<C> {
    pub fn new(crm: Arc<C>, routes: RouteTable, enable_pipelines: bool) -> Self {
        Self {
            crm,
            routes,
            cache: TtlCache::new(CONTACT_CACHE_TTL),
            enable_pipelines,
            email_re: Regex::new(EMAIL_PATTERN).expect("constant email pattern"),
        }
    }

    pub async fn submit(&self, sub: ContactSubmission) -> Result<ContactOutcome, SubmitError> {
        let name = sub.name.trim();
        let email = sub.email.trim().to_lowercase();
        let interest = sub.interest.trim();
        if name.is_empty() {
            return Err(SubmitError::MissingField("name"));
        }
        if email.is_empty() {
            return Err(SubmitError::MissingField("email"));
        }
        if interest.is_empty() {
            return Err(SubmitError::MissingField("interest"));
        }
        if !self.email_re.is_match(&email) {
            return Err(SubmitError::InvalidEmail);
        }

        let route = self.routes.classify(interest).clone();

        let mut custom_fields = HashMap::new();
        custom_fields.insert("interest_area".to_string(), interest.to_string());
        custom_fields.insert("initial_message".to_string(), sub.message.clone());
        custom_fields.insert("submission_date".to_string(), Utc::now().to_rfc3339());
        custom_fields.insert("inquiry_type".to_string(), route.inquiry_type.clone());

        // Cache-aside lookup. A failed remote search is logged and treated as
        // not-found so it can never block the submission.
        let cache_key = format!("ghl:contact:{email}");
        let existing = match self.cache.get(&cache_key).await {
            Some(contacts) => contacts,
            None => match self.crm.search_contacts_by_email(&email).await {
                Ok(contacts) => {
                    self.cache.insert(cache_key.clone(), contacts.clone()).await;
                    contacts
                }
                Err(e) => {
                    warn!("contact lookup failed, will create new: {e}");
                    Vec::new()
                }
            },
        };

        // Update the first match rather than creating a duplicate; custom
        // fields are overwritten, tags appended.
        let contact = match existing.first() {
            Some(first) => {
                let id = first.id.clone().ok_or_else(|| {
                    CrmError::InvalidResponse("matched contact has no id".to_string())
                })?;
                let updated = self.crm.update_custom_fields(&id, &custom_fields).await?;
                self.crm.add_tags(&id, &route.tags).await?;
                updated
            }
            None => {
                self.crm
                    .upsert_contact(&ContactUpsert {
                        name: name.to_string(),
                        email: email.clone(),
                        phone: String::new(),
                        source: CONTACT_SOURCE.to_string(),
                        tags: route.tags.clone(),
                        custom_fields,
                    })
                    .await?
            }
        };

        self.cache.insert(cache_key, vec![contact.clone()]).await;

        let contact_id = contact.id.clone().unwrap_or_else(|| "unknown".to_string());

        // Pipeline opportunity is best-effort: a failure here never fails
        // the submission.
        if self.enable_pipelines {
            if let (Some(pipeline), Some(id)) = (&route.pipeline, &contact.id) {
                let opportunity = OpportunityCreate {
                    contact_id: id.clone(),
                    pipeline_id: pipeline.pipeline_id.clone(),
                    pipeline_stage_id: pipeline.initial_stage_id.clone(),
                    name: format!("{} - {}", name, interest),
                    status: "open".to_string(),
                };
                if let Err(e) = self.crm.create_opportunity(&opportunity).await {
                    error!("failed to create opportunity: {e}");
                }
            }
        }

        // Same for the workflow trigger.
        if let (Some(workflow_id), Some(id)) = (&route.workflow_id, &contact.id) {
            if let Err(e) = self.crm.trigger_workflow(workflow_id, id).await {
                error!("failed to trigger workflow: {e}");
            }
        }

        Ok(ContactOutcome { contact_id })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routing::{PipelineRoute, RoutingConfig};
    use async_trait::async_trait;
    use std::sync::Mutex;

    #[derive(Default)]
    struct MockCrm {
        calls: Mutex<Vec<String>>,
        existing: Vec<CrmContact>,
        fail_search: bool,
        fail_opportunity: bool,
        fail_workflow: bool,
    }

    impl MockCrm {
        fn record(&self, call: &str) {
            self.calls.lock().unwrap().push(call.to_string());
        }

        fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl CrmApi for MockCrm {
        async fn search_contacts_by_email(
            &self,
            _email: &str,
        ) -> Result<Vec<CrmContact>, CrmError> {
            self.record("search");
            if self.fail_search {
                return Err(CrmError::Http("503 maintenance".to_string()));
            }
            Ok(self.existing.clone())
        }

        async fn upsert_contact(&self, contact: &ContactUpsert) -> Result<CrmContact, CrmError> {
            self.record("upsert");
            Ok(CrmContact {
                id: Some("new-contact".to_string()),
                email: Some(contact.email.clone()),
                tags: contact.tags.clone(),
                ..Default::default()
            })
        }

        async fn update_custom_fields(
            &self,
            contact_id: &str,
            _fields: &HashMap<String, String>,
        ) -> Result<CrmContact, CrmError> {
            self.record("update");
            Ok(CrmContact {
                id: Some(contact_id.to_string()),
                ..Default::default()
            })
        }

        async fn add_tags(&self, _contact_id: &str, _tags: &[String]) -> Result<(), CrmError> {
            self.record("add_tags");
            Ok(())
        }

        async fn create_opportunity(
            &self,
            _opportunity: &OpportunityCreate,
        ) -> Result<(), CrmError> {
            self.record("opportunity");
            if self.fail_opportunity {
                return Err(CrmError::Http("400 bad pipeline".to_string()));
            }
            Ok(())
        }

        async fn trigger_workflow(
            &self,
            _workflow_id: &str,
            _contact_id: &str,
        ) -> Result<(), CrmError> {
            self.record("workflow");
            if self.fail_workflow {
                return Err(CrmError::RateLimited);
            }
            Ok(())
        }
    }

    fn routes() -> RouteTable {
        RouteTable::new(&RoutingConfig {
            inquiry_pipeline: Some(PipelineRoute {
                pipeline_id: "pl_inq".to_string(),
                initial_stage_id: "new".to_string(),
            }),
            default_workflow_id: Some("wf_default".to_string()),
            ..Default::default()
        })
    }

    fn submission() -> ContactSubmission {
        ContactSubmission {
            name: "Robin".to_string(),
            email: "robin@example.com".to_string(),
            interest: "workshop".to_string(),
            message: "Keen to join a working bee".to_string(),
        }
    }

    fn service(crm: Arc<MockCrm>, enable_pipelines: bool) -> ContactService<MockCrm> {
        ContactService::new(crm, routes(), enable_pipelines)
    }

    #[tokio::test]
    async fn unseen_email_creates_a_contact() {
        let crm = Arc::new(MockCrm::default());
        let svc = service(crm.clone(), true);
        let outcome = svc.submit(submission()).await.unwrap();
        assert_eq!(outcome.contact_id, "new-contact");
        assert_eq!(crm.calls(), vec!["search", "upsert", "opportunity", "workflow"]);
    }

    #[tokio::test]
    async fn existing_email_updates_instead_of_duplicating() {
        let crm = Arc::new(MockCrm {
            existing: vec![CrmContact {
                id: Some("c-42".to_string()),
                email: Some("robin@example.com".to_string()),
                ..Default::default()
            }],
            ..Default::default()
        });
        let svc = service(crm.clone(), false);
        let outcome = svc.submit(submission()).await.unwrap();
        assert_eq!(outcome.contact_id, "c-42");
        let calls = crm.calls();
        assert!(calls.contains(&"update".to_string()));
        assert!(calls.contains(&"add_tags".to_string()));
        assert!(!calls.contains(&"upsert".to_string()));
    }

    #[tokio::test]
    async fn lookup_failure_falls_back_to_create() {
        let crm = Arc::new(MockCrm {
            fail_search: true,
            ..Default::default()
        });
        let svc = service(crm.clone(), false);
        let outcome = svc.submit(submission()).await.unwrap();
        assert_eq!(outcome.contact_id, "new-contact");
        assert!(crm.calls().contains(&"upsert".to_string()));
    }

    #[tokio::test]
    async fn opportunity_and_workflow_failures_are_swallowed() {
        let crm = Arc::new(MockCrm {
            fail_opportunity: true,
            fail_workflow: true,
            ..Default::default()
        });
        let svc = service(crm.clone(), true);
        assert!(svc.submit(submission()).await.is_ok());
        assert_eq!(crm.calls(), vec!["search", "upsert", "opportunity", "workflow"]);
    }

    #[tokio::test]
    async fn second_submission_hits_the_cache() {
        let crm = Arc::new(MockCrm::default());
        let svc = service(crm.clone(), false);
        svc.submit(submission()).await.unwrap();
        svc.submit(submission()).await.unwrap();
        let searches = crm.calls().iter().filter(|c| *c == "search").count();
        assert_eq!(searches, 1);
        // First submission created; the refreshed cache routes the second
        // one down the update path.
        assert!(crm.calls().contains(&"update".to_string()));
    }

    #[tokio::test]
    async fn missing_fields_are_client_errors() {
        let svc = service(Arc::new(MockCrm::default()), false);
        for (field, sub) in [
            ("name", ContactSubmission { name: " ".to_string(), ..submission() }),
            ("email", ContactSubmission { email: String::new(), ..submission() }),
            ("interest", ContactSubmission { interest: String::new(), ..submission() }),
        ] {
            let err = svc.submit(sub).await.unwrap_err();
            assert!(err.is_client_error());
            assert!(err.to_string().contains(field), "{err}");
        }
    }

    #[tokio::test]
    async fn mangled_email_is_rejected_before_any_crm_call() {
        let crm = Arc::new(MockCrm::default());
        let svc = service(crm.clone(), false);
        let err = svc
            .submit(ContactSubmission {
                email: "not-an-email".to_string(),
                ..submission()
            })
            .await
            .unwrap_err();
        assert!(matches!(err, SubmitError::InvalidEmail));
        assert!(crm.calls().is_empty());
    }

    #[tokio::test]
    async fn unknown_interest_still_submits_with_general_route() {
        let crm = Arc::new(MockCrm::default());
        let svc = service(crm.clone(), true);
        let outcome = svc
            .submit(ContactSubmission {
                interest: "alpaca-rides".to_string(),
                ..submission()
            })
            .await
            .unwrap();
        assert_eq!(outcome.contact_id, "new-contact");
        // Fallback still routes to the inquiry pipeline.
        assert!(crm.calls().contains(&"opportunity".to_string()));
    }
}
