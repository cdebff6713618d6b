use crate::map::catalog::Catalog;
use crate::map::model::{ImageLayer, Location, LocationType};

/// Reference drone image dimensions. Pin percentages were captured against
/// these, so the display must preserve the 4:3 aspect.
pub const MAP_WIDTH: f64 = 1920.0;
pub const MAP_HEIGHT: f64 = 1440.0;

/// Convert a pixel click on the reference image to stored percentages.
pub fn pixels_to_percentage(pixel_x: f64, pixel_y: f64) -> (f64, f64) {
    (
        (pixel_x / MAP_WIDTH) * 100.0,
        (pixel_y / MAP_HEIGHT) * 100.0,
    )
}

/// Convert stored percentages back to reference pixels (pin tool).
pub fn percentage_to_pixels(percent_x: f64, percent_y: f64) -> (f64, f64) {
    (
        (percent_x / 100.0) * MAP_WIDTH,
        (percent_y / 100.0) * MAP_HEIGHT,
    )
}

impl LocationType {
    /// CSS class for the marker dot.
    pub fn color_class(&self) -> &'static str {
        match self {
            LocationType::Building => "bg-stone-600",
            LocationType::Nature => "bg-emerald-600",
            LocationType::Garden => "bg-green-600",
            LocationType::Infrastructure => "bg-slate-600",
            LocationType::Habitat => "bg-teal-600",
            LocationType::Activity => "bg-amber-600",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            LocationType::Building => "Building",
            LocationType::Nature => "Nature",
            LocationType::Garden => "Garden",
            LocationType::Infrastructure => "Infrastructure",
            LocationType::Habitat => "Habitat",
            LocationType::Activity => "Activity",
        }
    }
}

/// Explorer view state: active background layer plus the selected pin.
/// Pure UI state, no side effects beyond itself.
#[derive(Debug, Default)]
pub struct MapView {
    layer: ImageLayer,
    selected: Option<String>,
}

impl MapView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn layer(&self) -> ImageLayer {
        self.layer
    }

    /// Switch the background layer. Marker positions are unaffected; they are
    /// percentages of the reference aspect ratio, not of any layer's pixels.
    pub fn set_layer(&mut self, layer: ImageLayer) {
        self.layer = layer;
    }

    /// Select a pin for the detail panel, or clear it with `None`.
    /// Returns the full record of the newly selected location.
    pub fn select<'a>(&mut self, catalog: &'a Catalog, id: Option<&str>) -> Option<&'a Location> {
        match id {
            Some(id) => match catalog.get(id) {
                Some(loc) => {
                    self.selected = Some(loc.id.clone());
                    Some(loc)
                }
                None => {
                    self.selected = None;
                    None
                }
            },
            None => {
                self.selected = None;
                None
            }
        }
    }

    pub fn selected<'a>(&self, catalog: &'a Catalog) -> Option<&'a Location> {
        self.selected.as_deref().and_then(|id| catalog.get(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pixel_percentage_round_trip() {
        let (x, y) = pixels_to_percentage(960.0, 720.0);
        assert_eq!((x, y), (50.0, 50.0));
        assert_eq!(percentage_to_pixels(x, y), (960.0, 720.0));
    }

    #[test]
    fn selection_addresses_exactly_one_location() {
        let catalog = Catalog::builtin();
        let mut view = MapView::new();
        let loc = view.select(&catalog, Some("elaman-creek")).unwrap();
        assert_eq!(loc.id, "elaman-creek");
        assert_eq!(view.selected(&catalog).unwrap().id, "elaman-creek");
    }

    #[test]
    fn selecting_none_clears_the_panel() {
        let catalog = Catalog::builtin();
        let mut view = MapView::new();
        view.select(&catalog, Some("junes-patch"));
        assert!(view.select(&catalog, None).is_none());
        assert!(view.selected(&catalog).is_none());
    }

    #[test]
    fn unknown_id_clears_rather_than_conflates() {
        let catalog = Catalog::builtin();
        let mut view = MapView::new();
        view.select(&catalog, Some("junes-patch"));
        assert!(view.select(&catalog, Some("not-a-pin")).is_none());
        assert!(view.selected(&catalog).is_none());
    }

    #[test]
    fn switching_layers_leaves_marker_positions_alone() {
        let catalog = Catalog::builtin();
        let mut view = MapView::new();
        let before = catalog.markers();
        for layer in ImageLayer::ALL {
            view.set_layer(layer);
            let after = catalog.markers();
            for (a, b) in before.iter().zip(after.iter()) {
                assert_eq!((a.x, a.y), (b.x, b.y), "{}", a.id);
            }
        }
        assert_eq!(view.layer(), ImageLayer::HabitatZones);
    }
}
