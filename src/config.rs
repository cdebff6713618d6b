use crate::crm::urls::GHL_API_URL;
use crate::routing::{PipelineRoute, RoutingConfig};

#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("missing env {0}")]
    MissingEnv(&'static str),
}

#[derive(Clone, Debug)]
pub struct CrmConfig {
    pub api_key: String,
    pub location_id: String,
    pub base_url: String,
}

/// All process configuration, read from the environment exactly once at
/// startup. Request handlers never touch env vars.
#[derive(Clone, Debug)]
pub struct AppConfig {
    pub bind_addr: String,
    pub database_url: String,
    pub crm: CrmConfig,
    pub enable_pipelines: bool,
    pub routing: RoutingConfig,
    pub anthropic_api_key: Option<String>,
    pub anthropic_base_url: String,
    pub chat_model: String,
}

fn required(key: &'static str) -> Result<String, ConfigError> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .ok_or(ConfigError::MissingEnv(key))
}

fn optional(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn optional_or(key: &str, default: &str) -> String {
    optional(key).unwrap_or_else(|| default.to_string())
}

fn pipeline(id_key: &str, stage_key: &str, default_stage: &str) -> Option<PipelineRoute> {
    optional(id_key).map(|pipeline_id| PipelineRoute {
        pipeline_id,
        initial_stage_id: optional_or(stage_key, default_stage),
    })
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            bind_addr: optional_or("BIND_ADDR", "0.0.0.0:8080"),
            database_url: optional_or("DATABASE_URL", "sqlite://actfarm.db?mode=rwc"),
            crm: CrmConfig {
                api_key: required("GHL_API_KEY")?,
                location_id: required("GHL_LOCATION_ID")?,
                base_url: optional_or("GHL_BASE_URL", GHL_API_URL),
            },
            enable_pipelines: optional("GHL_ENABLE_PIPELINES").as_deref() == Some("true"),
            routing: RoutingConfig {
                residency_pipeline: pipeline(
                    "GHL_RESIDENCY_PIPELINE_ID",
                    "GHL_RESIDENCY_INITIAL_STAGE_ID",
                    "inquiry",
                ),
                inquiry_pipeline: pipeline(
                    "GHL_INQUIRY_PIPELINE_ID",
                    "GHL_INQUIRY_INITIAL_STAGE_ID",
                    "new",
                ),
                junes_patch_pipeline: pipeline(
                    "GHL_JUNES_PATCH_PIPELINE_ID",
                    "GHL_JUNES_PATCH_INITIAL_STAGE_ID",
                    "referral",
                ),
                residency_workflow_id: optional("GHL_RESIDENCY_WORKFLOW_ID"),
                junes_patch_workflow_id: optional("GHL_JUNES_PATCH_WORKFLOW_ID"),
                default_workflow_id: optional("GHL_CONTACT_WORKFLOW_ID"),
            },
            anthropic_api_key: optional("ANTHROPIC_API_KEY"),
            anthropic_base_url: optional_or("ANTHROPIC_BASE_URL", "https://api.anthropic.com"),
            chat_model: optional_or("CHAT_MODEL", "claude-sonnet-4-20250514"),
        })
    }
}
