pub mod catalog;
pub mod model;
pub mod view;

pub use catalog::{Catalog, CatalogError, Marker};
pub use model::{
    ActivityInfo, HabitatInfo, HabitatStatus, ImageLayer, ImageMetadata, Location,
    LocationStatus, LocationType, VideoEmbed,
};
pub use view::{MapView, MAP_HEIGHT, MAP_WIDTH};
