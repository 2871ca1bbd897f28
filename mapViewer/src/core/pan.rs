use indicatif::{ProgressBar, ProgressStyle};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::info;

use crate::config::constants::KM_PER_DEGREE_LAT;
use crate::core::ranking::{rank_nearest_batch, RankError};
use crate::models::poi::{Coordinate, PointOfInterest, POI};
use crate::utils::csv_export::PanStepRecord;
use crate::utils::logging::{self, OperationCategory};

/// Random walk of the map centre: `steps` moves of roughly `step_km` each,
/// starting at `start`. The same seed always gives the same path.
pub fn random_walk(start: Coordinate, steps: usize, step_km: f64, seed: Option<u64>) -> Vec<Coordinate> {
    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let step_km = step_km.max(0.0);
    let mut path = Vec::with_capacity(steps + 1);
    let mut current = start;
    path.push(current);

    for _ in 0..steps {
        let bearing = rng.gen_range(0.0..std::f64::consts::TAU);
        let distance = rng.gen_range(0.0..=step_km);

        let d_lat = distance * bearing.cos() / KM_PER_DEGREE_LAT;
        let km_per_degree_lon = (KM_PER_DEGREE_LAT * current.lat.to_radians().cos()).max(1e-6);
        let d_lon = distance * bearing.sin() / km_per_degree_lon;

        current = Coordinate::new(
            (current.lat + d_lat).clamp(-90.0, 90.0),
            wrap_longitude(current.lon + d_lon),
        );
        path.push(current);
    }

    path
}

fn wrap_longitude(lon: f64) -> f64 {
    let wrapped = (lon + 180.0).rem_euclid(360.0) - 180.0;
    if wrapped == -180.0 && lon > 0.0 { 180.0 } else { wrapped }
}

// Positions ranked per parallel batch between progress updates
const PAN_CHUNK_SIZE: usize = 256;

#[derive(Debug, Clone, PartialEq)]
pub struct PanSummary {
    pub steps: usize,
    pub nearest_changes: usize,
    pub distinct_nearest: usize,
}

/// Ranks every position of a pan (in parallel batches), like a burst of
/// move-end events, and marks the steps where the nearest POI changed.
pub fn simulate_pan(
    path: &[Coordinate],
    catalog: &[PointOfInterest],
    limit: usize,
    show_progress: bool,
) -> Result<Vec<PanStepRecord>, RankError> {
    let _timing = logging::start_timing("simulate_pan", OperationCategory::Ranking);

    if limit == 0 {
        return Err(RankError::InvalidArgument("limit must be at least 1, got 0".to_string()));
    }

    let progress = if show_progress {
        let bar = ProgressBar::new(path.len() as u64);
        if let Ok(style) = ProgressStyle::default_bar()
            .template("{spinner} [{elapsed_precise}] {bar:40} {pos}/{len} positions ranked")
        {
            bar.set_style(style);
        }
        bar
    } else {
        ProgressBar::hidden()
    };

    let mut rankings = Vec::with_capacity(path.len());
    for chunk in path.chunks(PAN_CHUNK_SIZE) {
        rankings.extend(rank_nearest_batch(chunk, catalog, limit)?);
        progress.inc(chunk.len() as u64);
    }
    progress.finish_and_clear();

    let mut records = Vec::with_capacity(rankings.len());
    let mut previous: Option<String> = None;
    for (step, (center, ranked)) in path.iter().zip(rankings).enumerate() {
        let nearest = ranked.first().map(|entry| entry.poi.get_id().to_string());
        let nearest_changed = step > 0 && nearest != previous;
        previous = nearest;
        records.push(PanStepRecord {
            step,
            center: *center,
            ranked,
            nearest_changed,
        });
    }

    info!(positions = records.len(), "Pan simulation ranked");
    Ok(records)
}

pub fn summarize_pan(records: &[PanStepRecord]) -> PanSummary {
    let mut distinct: Vec<&str> = records
        .iter()
        .filter_map(|r| r.ranked.first().map(|entry| entry.poi.get_id()))
        .collect();
    distinct.sort_unstable();
    distinct.dedup();

    PanSummary {
        steps: records.len(),
        nearest_changes: records.iter().filter(|r| r.nearest_changed).count(),
        distinct_nearest: distinct.len(),
    }
}
