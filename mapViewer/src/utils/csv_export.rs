use std::path::{Path, PathBuf};
use chrono::Local;
use csv::Writer;
use tracing::info;

use crate::models::poi::{Coordinate, POI};
use crate::models::ranked::RankedPoi;
use crate::utils::logging::{self, FileIOType, OperationCategory};

/// One map position visited during a pan, with the ranking computed there.
#[derive(Debug, Clone)]
pub struct PanStepRecord {
    pub step: usize,
    pub center: Coordinate,
    pub ranked: Vec<RankedPoi>,
    pub nearest_changed: bool,
}

/// Writes CSV files into a timestamped directory under `output_dir`.
pub struct CsvExporter {
    output_dir: PathBuf,
    timestamp: String,
}

impl CsvExporter {
    pub fn new(output_dir: impl AsRef<Path>) -> std::io::Result<Self> {
        let timestamp = Local::now().format("%Y%m%d_%H%M%S").to_string();
        let full_path = output_dir.as_ref().join(&timestamp);
        std::fs::create_dir_all(&full_path)?;

        Ok(Self {
            output_dir: full_path,
            timestamp,
        })
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    pub fn timestamp(&self) -> &str {
        &self.timestamp
    }

    /// `rank,id,name,address,lat,lon,distance_km` for one query.
    pub fn export_ranking(&self, reference: &Coordinate, ranked: &[RankedPoi]) -> Result<PathBuf, csv::Error> {
        let _timing = logging::start_timing("export_ranking",
            OperationCategory::FileIO { subcategory: FileIOType::ResultsSave });

        let path = self.output_dir.join("nearest.csv");
        let mut writer = Writer::from_path(&path)?;

        writer.write_record(["rank", "id", "name", "address", "lat", "lon", "distance_km", "reference_lat", "reference_lon"])?;
        for (i, entry) in ranked.iter().enumerate() {
            let coordinate = entry.poi.get_coordinate();
            writer.write_record([
                (i + 1).to_string(),
                entry.poi.get_id().to_string(),
                entry.poi.get_name().to_string(),
                entry.poi.get_address().to_string(),
                coordinate.lat.to_string(),
                coordinate.lon.to_string(),
                format!("{:.3}", entry.distance_km),
                reference.lat.to_string(),
                reference.lon.to_string(),
            ])?;
        }
        writer.flush()?;

        info!(path = %path.display(), rows = ranked.len(), "Exported ranking");
        Ok(path)
    }

    /// One row per pan step with the nearest POI at that step.
    pub fn export_pan(&self, steps: &[PanStepRecord]) -> Result<PathBuf, csv::Error> {
        let _timing = logging::start_timing("export_pan",
            OperationCategory::FileIO { subcategory: FileIOType::ResultsSave });

        let path = self.output_dir.join("pan.csv");
        let mut writer = Writer::from_path(&path)?;

        writer.write_record(["step", "center_lat", "center_lon", "nearest_id", "nearest_km", "listed", "nearest_changed"])?;
        for record in steps {
            let (nearest_id, nearest_km) = match record.ranked.first() {
                Some(entry) => (entry.poi.get_id().to_string(), format!("{:.3}", entry.distance_km)),
                None => (String::new(), String::new()),
            };
            writer.write_record([
                record.step.to_string(),
                format!("{:.6}", record.center.lat),
                format!("{:.6}", record.center.lon),
                nearest_id,
                nearest_km,
                record.ranked.len().to_string(),
                record.nearest_changed.to_string(),
            ])?;
        }
        writer.flush()?;

        info!(path = %path.display(), rows = steps.len(), "Exported pan steps");
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::poi::PointOfInterest;

    #[test]
    fn ranking_csv_quotes_addresses() {
        let dir = tempfile::tempdir().unwrap();
        let exporter = CsvExporter::new(dir.path()).unwrap();
        assert!(exporter.output_dir().starts_with(dir.path()));

        let ranked = vec![RankedPoi::new(
            PointOfInterest::new("a", "Alpha", "1 Road, London", Coordinate::new(51.5, -0.1)),
            1.23456,
        )];
        let path = exporter.export_ranking(&Coordinate::new(51.49, -0.1), &ranked).unwrap();

        let mut reader = csv::Reader::from_path(path).unwrap();
        let rows: Vec<csv::StringRecord> = reader.records().map(|r| r.unwrap()).collect();
        assert_eq!(rows.len(), 1);
        assert_eq!(&rows[0][0], "1");
        assert_eq!(&rows[0][3], "1 Road, London");
        assert_eq!(&rows[0][6], "1.235");
    }

    #[test]
    fn pan_csv_has_row_per_step() {
        let dir = tempfile::tempdir().unwrap();
        let exporter = CsvExporter::new(dir.path()).unwrap();
        let steps = vec![
            PanStepRecord { step: 0, center: Coordinate::new(0.0, 0.0), ranked: Vec::new(), nearest_changed: false },
            PanStepRecord { step: 1, center: Coordinate::new(0.0, 0.1), ranked: Vec::new(), nearest_changed: true },
        ];
        let path = exporter.export_pan(&steps).unwrap();
        let contents = std::fs::read_to_string(path).unwrap();
        assert_eq!(contents.lines().count(), 3);
        assert!(contents.lines().nth(2).unwrap().ends_with(",true"));
    }
}
