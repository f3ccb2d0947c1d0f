pub mod carbon;
pub mod plants;

pub use carbon::{CarbonEstimate, CarbonInputs};
pub use plants::{Plant, PlantStats};
