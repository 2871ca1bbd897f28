use std::cmp::Ordering;
use rayon::prelude::*;
use crate::core::distance::haversine_km;
use crate::models::poi::{Coordinate, PointOfInterest, POI};
use crate::models::ranked::RankedPoi;

#[derive(Debug, Clone, PartialEq)]
pub enum RankError {
    InvalidArgument(String),
}

impl std::fmt::Display for RankError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RankError::InvalidArgument(s) => write!(f, "Invalid argument: {}", s),
        }
    }
}

impl std::error::Error for RankError {}

/// Checks a limit coming from signed host input (dropdowns, query strings).
pub fn validate_limit(limit: i64) -> Result<usize, RankError> {
    if limit <= 0 {
        return Err(RankError::InvalidArgument(format!("limit must be at least 1, got {}", limit)));
    }
    usize::try_from(limit)
        .map_err(|_| RankError::InvalidArgument(format!("limit {} does not fit in usize", limit)))
}

/// Returns the `limit` catalog entries closest to `reference`, nearest first.
///
/// Exact distance ties keep their catalog order. A catalog shorter than
/// `limit` is returned whole. The catalog is only read.
pub fn rank_nearest(
    reference: &Coordinate,
    catalog: &[PointOfInterest],
    limit: usize,
) -> Result<Vec<RankedPoi>, RankError> {
    if limit == 0 {
        return Err(RankError::InvalidArgument("limit must be at least 1, got 0".to_string()));
    }

    let mut ranked: Vec<RankedPoi> = catalog
        .iter()
        .map(|poi| RankedPoi::new(poi.clone(), haversine_km(reference, poi.get_coordinate())))
        .collect();

    // sort_by is stable
    ranked.sort_by(|a, b| compare_distance(a.distance_km, b.distance_km));
    ranked.truncate(limit);

    Ok(ranked)
}

// NaN (from garbage coordinates) orders after every real distance
fn compare_distance(a: f64, b: f64) -> Ordering {
    a.partial_cmp(&b)
        .unwrap_or_else(|| a.is_nan().cmp(&b.is_nan()))
}

/// Ranks the catalog against every reference in parallel, preserving order.
pub fn rank_nearest_batch(
    references: &[Coordinate],
    catalog: &[PointOfInterest],
    limit: usize,
) -> Result<Vec<Vec<RankedPoi>>, RankError> {
    if limit == 0 {
        return Err(RankError::InvalidArgument("limit must be at least 1, got 0".to_string()));
    }

    references
        .par_iter()
        .map(|reference| rank_nearest(reference, catalog, limit))
        .collect()
}
