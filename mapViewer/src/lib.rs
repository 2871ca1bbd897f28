// Main module declarations for the map viewer core

// Ranking engine and the view state that drives it
pub mod core {
    pub mod distance;
    pub mod ranking;
    pub mod pan;
    pub mod view_state;
}

// Configuration modules
pub mod config {
    pub mod constants;
    pub mod viewer_config;
}

// Model definitions
pub mod models {
    pub mod poi;
    pub mod ranked;
}

// Data loaders
pub mod data {
    pub mod catalog_loader;
    pub mod sample_catalog;
}

// Presentation of rankings
pub mod analysis {
    pub mod reporting;
    pub mod overlay;
}

// Utility functions
pub mod utils {
    pub mod logging;
    pub mod csv_export;
    pub mod traits;
}

// CLI interface
pub mod cli {
    pub mod cli;
}

// Re-export commonly used items
pub use crate::core::distance::haversine_km;
pub use crate::core::ranking::{rank_nearest, rank_nearest_batch, RankError};
pub use crate::core::view_state::ViewState;
pub use crate::models::poi::{Coordinate, PointOfInterest};
pub use crate::models::ranked::RankedPoi;
