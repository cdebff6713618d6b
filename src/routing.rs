use std::collections::HashMap;

/// Every routed contact carries this tag regardless of interest.
pub const BASE_TAG: &str = "act-farm";

/// Why a visitor says they are reaching out. The contact form posts the
/// kebab-case strings that `parse`/`as_str` map to and from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Interest {
    Residency,
    Workshop,
    JunesPatch,
    Accommodation,
    Partnership,
    Collaboration,
    Other,
}

impl Interest {
    pub const ALL: [Interest; 7] = [
        Interest::Residency,
        Interest::Workshop,
        Interest::JunesPatch,
        Interest::Accommodation,
        Interest::Partnership,
        Interest::Collaboration,
        Interest::Other,
    ];

    /// Non-failing parse; unknown form values route to the fallback instead.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim() {
            "residency" => Some(Interest::Residency),
            "workshop" => Some(Interest::Workshop),
            "junes-patch" => Some(Interest::JunesPatch),
            "accommodation" => Some(Interest::Accommodation),
            "partnership" => Some(Interest::Partnership),
            "collaboration" => Some(Interest::Collaboration),
            "other" => Some(Interest::Other),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Interest::Residency => "residency",
            Interest::Workshop => "workshop",
            Interest::JunesPatch => "junes-patch",
            Interest::Accommodation => "accommodation",
            Interest::Partnership => "partnership",
            Interest::Collaboration => "collaboration",
            Interest::Other => "other",
        }
    }
}

/// Pipeline target for an interest, with the stage new opportunities enter at.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PipelineRoute {
    pub pipeline_id: String,
    pub initial_stage_id: String,
}

/// Everything the CRM needs to know about one interest category, consolidated
/// into a single record instead of parallel per-field lookup tables.
#[derive(Clone, Debug)]
pub struct InterestRoute {
    pub tags: Vec<String>,
    pub inquiry_type: String,
    pub pipeline: Option<PipelineRoute>,
    pub workflow_id: Option<String>,
}

/// Pipeline/workflow identifiers supplied by configuration. Any of them may
/// be absent; routing then simply skips that step.
#[derive(Clone, Debug, Default)]
pub struct RoutingConfig {
    pub residency_pipeline: Option<PipelineRoute>,
    pub inquiry_pipeline: Option<PipelineRoute>,
    pub junes_patch_pipeline: Option<PipelineRoute>,
    pub residency_workflow_id: Option<String>,
    pub junes_patch_workflow_id: Option<String>,
    pub default_workflow_id: Option<String>,
}

/// Interest → tags/inquiry-type/pipeline/workflow, built once at startup.
#[derive(Clone, Debug)]
pub struct RouteTable {
    routes: HashMap<Interest, InterestRoute>,
    fallback: InterestRoute,
}

fn tags(extra: &[&str]) -> Vec<String> {
    std::iter::once(BASE_TAG)
        .chain(extra.iter().copied())
        .map(str::to_string)
        .collect()
}

impl RouteTable {
    pub fn new(cfg: &RoutingConfig) -> Self {
        let default_wf = cfg.default_workflow_id.clone();
        let mut routes = HashMap::new();
        routes.insert(
            Interest::Residency,
            InterestRoute {
                tags: tags(&["interest:residency", "priority:high"]),
                inquiry_type: "R&D Residency Inquiry".to_string(),
                pipeline: cfg.residency_pipeline.clone(),
                workflow_id: cfg.residency_workflow_id.clone().or_else(|| default_wf.clone()),
            },
        );
        routes.insert(
            Interest::Workshop,
            InterestRoute {
                tags: tags(&["interest:workshop", "interest:event"]),
                inquiry_type: "Workshop/Event Inquiry".to_string(),
                pipeline: cfg.inquiry_pipeline.clone(),
                workflow_id: default_wf.clone(),
            },
        );
        routes.insert(
            Interest::JunesPatch,
            InterestRoute {
                tags: tags(&["interest:junes-patch", "healthcare", "priority:high"]),
                inquiry_type: "June's Patch Healthcare Inquiry".to_string(),
                pipeline: cfg.junes_patch_pipeline.clone(),
                workflow_id: cfg
                    .junes_patch_workflow_id
                    .clone()
                    .or_else(|| default_wf.clone()),
            },
        );
        routes.insert(
            Interest::Accommodation,
            InterestRoute {
                tags: tags(&["interest:accommodation", "future-guest"]),
                inquiry_type: "Future Accommodation Inquiry".to_string(),
                pipeline: cfg.inquiry_pipeline.clone(),
                workflow_id: default_wf.clone(),
            },
        );
        routes.insert(
            Interest::Partnership,
            InterestRoute {
                tags: tags(&["interest:partnership", "research", "priority:high"]),
                inquiry_type: "Research Partnership Inquiry".to_string(),
                // Research partnerships share the residency pipeline.
                pipeline: cfg.residency_pipeline.clone(),
                workflow_id: default_wf.clone(),
            },
        );
        routes.insert(
            Interest::Collaboration,
            InterestRoute {
                tags: tags(&["interest:collaboration"]),
                inquiry_type: "General Collaboration Inquiry".to_string(),
                pipeline: cfg.inquiry_pipeline.clone(),
                workflow_id: default_wf.clone(),
            },
        );
        routes.insert(
            Interest::Other,
            InterestRoute {
                tags: tags(&["interest:other"]),
                inquiry_type: "General Inquiry".to_string(),
                pipeline: cfg.inquiry_pipeline.clone(),
                workflow_id: default_wf.clone(),
            },
        );

        Self {
            routes,
            fallback: InterestRoute {
                tags: tags(&["interest:general"]),
                inquiry_type: "General Inquiry".to_string(),
                pipeline: cfg.inquiry_pipeline.clone(),
                workflow_id: default_wf,
            },
        }
    }

    /// Total over arbitrary form input: anything outside the closed enum gets
    /// the general classification rather than an error.
    pub fn classify(&self, raw: &str) -> &InterestRoute {
        match Interest::parse(raw) {
            Some(interest) => &self.routes[&interest],
            None => &self.fallback,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_config() -> RoutingConfig {
        RoutingConfig {
            residency_pipeline: Some(PipelineRoute {
                pipeline_id: "pl_res".to_string(),
                initial_stage_id: "inquiry".to_string(),
            }),
            inquiry_pipeline: Some(PipelineRoute {
                pipeline_id: "pl_inq".to_string(),
                initial_stage_id: "new".to_string(),
            }),
            junes_patch_pipeline: Some(PipelineRoute {
                pipeline_id: "pl_jp".to_string(),
                initial_stage_id: "referral".to_string(),
            }),
            residency_workflow_id: Some("wf_res".to_string()),
            junes_patch_workflow_id: Some("wf_jp".to_string()),
            default_workflow_id: Some("wf_default".to_string()),
        }
    }

    #[test]
    fn every_interest_gets_the_base_tag() {
        let table = RouteTable::new(&full_config());
        for interest in Interest::ALL {
            let route = table.classify(interest.as_str());
            assert!(!route.tags.is_empty());
            assert_eq!(route.tags[0], BASE_TAG, "{:?}", interest);
        }
    }

    #[test]
    fn junes_patch_routes_to_healthcare() {
        let table = RouteTable::new(&full_config());
        let route = table.classify("junes-patch");
        assert!(route.tags.iter().any(|t| t == "healthcare"));
        assert!(route.tags.iter().any(|t| t == "priority:high"));
        assert_eq!(route.inquiry_type, "June's Patch Healthcare Inquiry");
        assert_eq!(route.pipeline.as_ref().unwrap().pipeline_id, "pl_jp");
        assert_eq!(route.pipeline.as_ref().unwrap().initial_stage_id, "referral");
        assert_eq!(route.workflow_id.as_deref(), Some("wf_jp"));
    }

    #[test]
    fn unknown_interest_falls_back_to_general() {
        let table = RouteTable::new(&full_config());
        let route = table.classify("time-travel");
        assert!(route.tags.iter().any(|t| t == "interest:general"));
        assert_eq!(route.inquiry_type, "General Inquiry");
        assert_eq!(route.pipeline.as_ref().unwrap().pipeline_id, "pl_inq");
        assert_eq!(route.workflow_id.as_deref(), Some("wf_default"));
    }

    #[test]
    fn partnership_shares_the_residency_pipeline() {
        let table = RouteTable::new(&full_config());
        let route = table.classify("partnership");
        assert_eq!(route.pipeline.as_ref().unwrap().pipeline_id, "pl_res");
        // But not the residency workflow.
        assert_eq!(route.workflow_id.as_deref(), Some("wf_default"));
    }

    #[test]
    fn specific_workflows_fall_back_to_the_default() {
        let mut cfg = full_config();
        cfg.residency_workflow_id = None;
        let table = RouteTable::new(&cfg);
        assert_eq!(
            table.classify("residency").workflow_id.as_deref(),
            Some("wf_default")
        );
    }

    #[test]
    fn empty_config_yields_no_pipeline_or_workflow() {
        let table = RouteTable::new(&RoutingConfig::default());
        let route = table.classify("workshop");
        assert!(route.pipeline.is_none());
        assert!(route.workflow_id.is_none());
        assert_eq!(route.tags, vec!["act-farm", "interest:workshop", "interest:event"]);
    }
}
