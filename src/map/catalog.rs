use crate::map::model::{
    ActivityInfo, HabitatInfo, HabitatStatus, ImageCategory, ImageMetadata, Location,
    LocationStatus, LocationType, MapMetadata,
};

#[derive(thiserror::Error, Debug)]
pub enum CatalogError {
    #[error("location '{id}' has out-of-range coordinates ({x}, {y})")]
    CoordinateOutOfRange { id: String, x: f64, y: f64 },
    #[error("duplicate location id '{id}'")]
    DuplicateId { id: String },
}

/// The static location catalog for the interactive property map.
///
/// Coordinates come from the pin tool: a pixel click against the reference
/// drone image converted to percentages, so they hold for every layer.
#[derive(Clone, Debug, serde::Serialize)]
pub struct Catalog {
    pub metadata: MapMetadata,
    pub locations: Vec<Location>,
}

/// A positioned marker ready for rendering over the active layer.
#[derive(Clone, Debug, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Marker {
    pub id: String,
    pub x: f64,
    pub y: f64,
    pub title: String,
    #[serde(rename = "type")]
    pub location_type: LocationType,
}

impl Catalog {
    pub fn get(&self, id: &str) -> Option<&Location> {
        self.locations.iter().find(|l| l.id == id)
    }

    pub fn markers(&self) -> Vec<Marker> {
        self.locations
            .iter()
            .map(|loc| Marker {
                id: loc.id.clone(),
                x: loc.x,
                y: loc.y,
                title: loc.title.clone(),
                location_type: loc.location_type,
            })
            .collect()
    }

    /// Coordinate range and id uniqueness. Run once at startup.
    pub fn validate(&self) -> Result<(), CatalogError> {
        let mut seen = std::collections::HashSet::new();
        for loc in &self.locations {
            if !(0.0..=100.0).contains(&loc.x) || !(0.0..=100.0).contains(&loc.y) {
                return Err(CatalogError::CoordinateOutOfRange {
                    id: loc.id.clone(),
                    x: loc.x,
                    y: loc.y,
                });
            }
            if !seen.insert(loc.id.clone()) {
                return Err(CatalogError::DuplicateId { id: loc.id.clone() });
            }
        }
        Ok(())
    }

    /// Black Cockatoo Valley map data.
    pub fn builtin() -> Self {
        Catalog {
            metadata: MapMetadata {
                title: "Black Cockatoo Valley".to_string(),
                description: "150 acres of threatened species habitat on Jinibara lands"
                    .to_string(),
                total_acres: 150,
                last_updated: "2025-12-23".to_string(),
            },
            locations: vec![
                Location {
                    id: "junes-patch".to_string(),
                    x: 35.5,
                    y: 42.0,
                    title: "June's Patch".to_string(),
                    location_type: LocationType::Garden,
                    description:
                        "Healthcare worker wellbeing garden - prescription to nature project"
                            .to_string(),
                    overview: Some(
                        "A food garden and experience subscription for healthcare workers, \
                         providing fresh produce and restorative land experiences. Partnership \
                         with Wishlist community and University of the Sunshine Coast."
                            .to_string(),
                    ),
                    status: LocationStatus::InDevelopment,
                    activities: vec![
                        ActivityInfo {
                            id: "harvest-gatherings".to_string(),
                            name: "Harvest Gatherings".to_string(),
                            description: "Bi-monthly wellness gatherings featuring garden tours, \
                                          fresh produce harvesting, and shared meals"
                                .to_string(),
                            frequency: Some("Bi-monthly".to_string()),
                            capacity: Some("Healthcare workers and partners".to_string()),
                            link: Some("/junes-patch".to_string()),
                        },
                        ActivityInfo {
                            id: "garden-workshops".to_string(),
                            name: "Regenerative Garden Workshops".to_string(),
                            description: "Monthly hands-on sessions focused on growing food that \
                                          nourishes people and strengthens ecosystem health"
                                .to_string(),
                            frequency: Some("Monthly".to_string()),
                            capacity: Some("Max 12 participants".to_string()),
                            ..Default::default()
                        },
                    ],
                    images: vec![ImageMetadata {
                        url: "/images/map/junes-patch-garden.jpg".to_string(),
                        caption: Some("June's Patch garden beds".to_string()),
                        category: Some(ImageCategory::General),
                        ..Default::default()
                    }],
                    future_scope: Some(
                        "Expand to include greenhouse, expanded food forest, and community \
                         kitchen facilities"
                            .to_string(),
                    ),
                    ..Default::default()
                },
                Location {
                    id: "main-residency".to_string(),
                    x: 50.0,
                    y: 35.0,
                    title: "R&D Residency Accommodation".to_string(),
                    location_type: LocationType::Building,
                    description: "Low-impact eco-accommodation for conservation technology and \
                                  regenerative practice residencies"
                        .to_string(),
                    overview: Some(
                        "Private, serene spaces designed for focused prototyping work. Limited \
                         availability to protect threatened species habitat. Accommodates 2-3 \
                         concurrent residencies."
                            .to_string(),
                    ),
                    status: LocationStatus::Existing,
                    activities: vec![
                        ActivityInfo {
                            id: "tech-residencies".to_string(),
                            name: "Conservation Technology R&D".to_string(),
                            description: "Prototyping habitat monitoring tools, ethical AI \
                                          platforms, and biodiversity observation systems"
                                .to_string(),
                            frequency: Some("1-2 week stays".to_string()),
                            link: Some("/residencies".to_string()),
                            ..Default::default()
                        },
                        ActivityInfo {
                            id: "practice-residencies".to_string(),
                            name: "Regenerative Practice Research".to_string(),
                            description: "Deep exploration of regenerative agriculture, native \
                                          species restoration, and ecosystem recovery"
                                .to_string(),
                            frequency: Some("1-4 week stays".to_string()),
                            link: Some("/residencies".to_string()),
                            ..Default::default()
                        },
                    ],
                    images: vec![ImageMetadata {
                        url: "/images/map/residency-cabin.jpg".to_string(),
                        caption: Some("Eco-residency accommodation with valley views".to_string()),
                        category: Some(ImageCategory::General),
                        ..Default::default()
                    }],
                    future_scope: Some(
                        "Additional eco-cabins and yurt accommodations planned".to_string(),
                    ),
                    ..Default::default()
                },
                Location {
                    id: "threatened-habitat-zone-1".to_string(),
                    x: 25.0,
                    y: 60.0,
                    title: "Threatened Species Habitat - Eastern Zone".to_string(),
                    location_type: LocationType::Habitat,
                    description:
                        "Primary conservation area with active restoration and species monitoring"
                            .to_string(),
                    overview: Some(
                        "Native forest corridor connecting to Elaman Creek. Habitat for glossy \
                         black cockatoos and other threatened species. Ongoing weed management \
                         and native species regeneration."
                            .to_string(),
                    ),
                    status: LocationStatus::Existing,
                    habitat: Some(HabitatInfo {
                        species: vec![
                            "Glossy Black Cockatoo".to_string(),
                            "Native forest species".to_string(),
                            "Creek-dependent species".to_string(),
                        ],
                        status: Some(HabitatStatus::InProgress),
                        notes: Some(
                            "Active restoration with quarterly monitoring. Limited access to \
                             protect breeding areas."
                                .to_string(),
                        ),
                    }),
                    images: vec![ImageMetadata {
                        url: "/images/map/habitat-zone-east.jpg".to_string(),
                        caption: Some("Native forest restoration area".to_string()),
                        category: Some(ImageCategory::General),
                        ..Default::default()
                    }],
                    activities: vec![ActivityInfo {
                        id: "habitat-monitoring".to_string(),
                        name: "Species Observation Workshops".to_string(),
                        description: "Small-group field sessions learning monitoring techniques"
                            .to_string(),
                        frequency: Some("Quarterly".to_string()),
                        capacity: Some("Max 8 participants".to_string()),
                        link: Some("/activities".to_string()),
                    }],
                    ..Default::default()
                },
                Location {
                    id: "mary-river-viewpoint".to_string(),
                    x: 15.0,
                    y: 25.0,
                    title: "Mary River Viewpoint".to_string(),
                    location_type: LocationType::Nature,
                    description: "Scenic overlook with views to the top of the Mary River"
                        .to_string(),
                    overview: Some(
                        "Natural observation point offering panoramic views across the valley. \
                         Used for guided nature walks and quiet contemplation. Minimal \
                         infrastructure to preserve natural character."
                            .to_string(),
                    ),
                    status: LocationStatus::Existing,
                    images: vec![ImageMetadata {
                        url: "/images/map/mary-river-view.jpg".to_string(),
                        caption: Some("Views to Mary River from the valley".to_string()),
                        category: Some(ImageCategory::General),
                        ..Default::default()
                    }],
                    activities: vec![ActivityInfo {
                        id: "nature-walks".to_string(),
                        name: "Seasonal Nature Walks".to_string(),
                        description: "Guided walks observing seasonal changes, wildlife, and \
                                      restoration progress"
                            .to_string(),
                        frequency: Some("Quarterly".to_string()),
                        capacity: Some("Max 15 participants".to_string()),
                        link: Some("/activities".to_string()),
                    }],
                    ..Default::default()
                },
                Location {
                    id: "elaman-creek".to_string(),
                    x: 70.0,
                    y: 75.0,
                    title: "Elaman Creek Corridor".to_string(),
                    location_type: LocationType::Nature,
                    description: "Creek system and riparian restoration zone".to_string(),
                    overview: Some(
                        "Natural watercourse flowing through the property. Critical habitat \
                         corridor connecting to broader landscape. Riparian zone restoration in \
                         progress with native plantings."
                            .to_string(),
                    ),
                    status: LocationStatus::Existing,
                    habitat: Some(HabitatInfo {
                        species: vec![
                            "Water-dependent species".to_string(),
                            "Riparian zone flora".to_string(),
                            "Native frogs".to_string(),
                        ],
                        status: Some(HabitatStatus::Restored),
                        notes: Some(
                            "Ongoing riparian planting and weed control. Water quality \
                             monitoring quarterly."
                                .to_string(),
                        ),
                    }),
                    images: vec![ImageMetadata {
                        url: "/images/map/elaman-creek.jpg".to_string(),
                        caption: Some("Elaman Creek riparian zone".to_string()),
                        category: Some(ImageCategory::General),
                        ..Default::default()
                    }],
                    ..Default::default()
                },
                Location {
                    id: "workshop-area".to_string(),
                    x: 45.0,
                    y: 50.0,
                    title: "Workshop & Gathering Space".to_string(),
                    location_type: LocationType::Activity,
                    description:
                        "Outdoor area for small-group workshops and conservation education"
                            .to_string(),
                    overview: Some(
                        "Flexible space for workshops, restoration working bees, and quiet \
                         gatherings. Shaded area with basic facilities. Designed for groups of \
                         8-20 people."
                            .to_string(),
                    ),
                    status: LocationStatus::Existing,
                    activities: vec![
                        ActivityInfo {
                            id: "weed-workshops".to_string(),
                            name: "Weed Management & Regeneration".to_string(),
                            description: "Practical workshops on identifying invasive species \
                                          and supporting native recovery"
                                .to_string(),
                            frequency: Some("Monthly".to_string()),
                            capacity: Some("Max 12 participants".to_string()),
                            link: Some("/activities".to_string()),
                        },
                        ActivityInfo {
                            id: "working-bees".to_string(),
                            name: "Restoration Working Bees".to_string(),
                            description: "Community-led habitat restoration sessions - planting, \
                                          weeding, mulching"
                                .to_string(),
                            frequency: Some("Monthly".to_string()),
                            capacity: Some("Max 20 participants".to_string()),
                            link: Some("/activities".to_string()),
                        },
                    ],
                    images: vec![ImageMetadata {
                        url: "/images/map/workshop-space.jpg".to_string(),
                        caption: Some("Outdoor workshop and gathering area".to_string()),
                        category: Some(ImageCategory::General),
                        ..Default::default()
                    }],
                    ..Default::default()
                },
                Location {
                    id: "future-glamping".to_string(),
                    x: 60.0,
                    y: 40.0,
                    title: "Future Eco-Glamping Site".to_string(),
                    location_type: LocationType::Building,
                    description: "Planned low-impact glamping accommodation".to_string(),
                    overview: Some(
                        "Future site for thoughtfully designed canvas tents with minimal \
                         environmental footprint. Solar power, composting systems, and \
                         integration with restored habitat."
                            .to_string(),
                    ),
                    status: LocationStatus::Planned,
                    future_scope: Some(
                        "Phase 2 development - eco-glamping for 2-4 tents. Pending habitat \
                         impact assessment and community co-design."
                            .to_string(),
                    ),
                    images: vec![ImageMetadata {
                        url: "/images/map/future-glamping-concept.jpg".to_string(),
                        caption: Some("Conceptual eco-glamping design".to_string()),
                        category: Some(ImageCategory::General),
                        ..Default::default()
                    }],
                    ..Default::default()
                },
                Location {
                    id: "native-seed-bank".to_string(),
                    x: 55.0,
                    y: 65.0,
                    title: "Native Seed Collection Area".to_string(),
                    location_type: LocationType::Infrastructure,
                    description: "Seed collection and native plant propagation".to_string(),
                    overview: Some(
                        "Area dedicated to collecting native seeds and propagating plants for \
                         restoration work. Small nursery setup supports ongoing habitat \
                         regeneration across the property."
                            .to_string(),
                    ),
                    status: LocationStatus::Existing,
                    activities: vec![ActivityInfo {
                        id: "propagation-workshops".to_string(),
                        name: "Native Plant Propagation".to_string(),
                        description: "Learn techniques for collecting seeds and growing native \
                                      species"
                            .to_string(),
                        frequency: Some("Seasonal".to_string()),
                        capacity: Some("Max 10 participants".to_string()),
                        ..Default::default()
                    }],
                    ..Default::default()
                },
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_catalog_is_valid() {
        Catalog::builtin().validate().unwrap();
    }

    #[test]
    fn all_coordinates_within_percentage_range() {
        for loc in &Catalog::builtin().locations {
            assert!((0.0..=100.0).contains(&loc.x), "{} x={}", loc.id, loc.x);
            assert!((0.0..=100.0).contains(&loc.y), "{} y={}", loc.id, loc.y);
        }
    }

    #[test]
    fn ids_are_unique() {
        let catalog = Catalog::builtin();
        let mut ids: Vec<_> = catalog.locations.iter().map(|l| l.id.as_str()).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), catalog.locations.len());
    }

    #[test]
    fn rejects_out_of_range_coordinate() {
        let mut catalog = Catalog::builtin();
        catalog.locations[0].x = 104.2;
        assert!(matches!(
            catalog.validate(),
            Err(CatalogError::CoordinateOutOfRange { .. })
        ));
    }

    #[test]
    fn rejects_duplicate_id() {
        let mut catalog = Catalog::builtin();
        let dup = catalog.locations[0].clone();
        catalog.locations.push(dup);
        assert!(matches!(
            catalog.validate(),
            Err(CatalogError::DuplicateId { .. })
        ));
    }

    #[test]
    fn markers_project_identity_and_position() {
        let catalog = Catalog::builtin();
        let markers = catalog.markers();
        assert_eq!(markers.len(), catalog.locations.len());
        let m = markers.iter().find(|m| m.id == "junes-patch").unwrap();
        assert_eq!((m.x, m.y), (35.5, 42.0));
    }

    #[test]
    fn lookup_by_id_returns_exactly_that_location() {
        let catalog = Catalog::builtin();
        let loc = catalog.get("junes-patch").unwrap();
        assert_eq!(loc.title, "June's Patch");
        assert!(catalog.get("no-such-place").is_none());
    }
}
