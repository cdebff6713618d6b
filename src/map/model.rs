use serde::{Deserialize, Serialize};

/// Marker category for a point on the property map.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LocationType {
    #[default]
    Building,
    Nature,
    Garden,
    Infrastructure,
    Habitat,
    Activity,
}

/// Background image layers the explorer can switch between.
/// Pin positions are defined against the reference aspect ratio,
/// not against any particular layer's pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ImageLayer {
    #[default]
    DroneCurrent,
    DroneBefore,
    SitePlan,
    HabitatZones,
}

impl ImageLayer {
    pub const ALL: [ImageLayer; 4] = [
        ImageLayer::DroneCurrent,
        ImageLayer::DroneBefore,
        ImageLayer::SitePlan,
        ImageLayer::HabitatZones,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            ImageLayer::DroneCurrent => "Current Drone Photo",
            ImageLayer::DroneBefore => "Before Drone Photo",
            ImageLayer::SitePlan => "Site Plan",
            ImageLayer::HabitatZones => "Habitat Zones",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ImageCategory {
    Before,
    During,
    After,
    General,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageMetadata {
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub caption: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub photographer: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_taken: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<ImageCategory>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum VideoSource {
    Youtube,
    Vimeo,
    Direct,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoEmbed {
    pub id: String,
    pub title: String,
    pub url: String,
    #[serde(rename = "type")]
    pub source: VideoSource,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityInfo {
    pub id: String,
    pub name: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub frequency: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub capacity: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum HabitatStatus {
    Threatened,
    Restored,
    InProgress,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HabitatInfo {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub species: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<HabitatStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LocationStatus {
    #[default]
    Existing,
    Planned,
    InDevelopment,
}

/// A single named point on the property. Immutable static data; the catalog
/// is loaded once at startup and validated there.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Location {
    pub id: String,
    /// Percentage position (0-100) against the reference image width.
    pub x: f64,
    /// Percentage position (0-100) against the reference image height.
    pub y: f64,
    pub title: String,
    #[serde(rename = "type")]
    pub location_type: LocationType,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub overview: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub images: Vec<ImageMetadata>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub videos: Vec<VideoEmbed>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub activities: Vec<ActivityInfo>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub habitat: Option<HabitatInfo>,
    pub status: LocationStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub future_scope: Option<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MapMetadata {
    pub title: String,
    pub description: String,
    pub total_acres: u32,
    pub last_updated: String,
}
