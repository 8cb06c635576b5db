mod garden;
mod plant;
mod recommendation;

pub use garden::{GardenEntry, GardenPlant, TimeAlive};
pub use plant::{Plant, Temperature};
pub use recommendation::{RecommendationWeights, ScoredResult, UserFilter};
