pub mod catalog;
pub mod discovery;
pub mod export;
pub mod garden;
pub mod plant_search;
pub mod recommendations;

pub use catalog::CatalogSource;
pub use garden::GardenStore;
pub use plant_search::PlantSearcher;
pub use recommendations::recommend;
