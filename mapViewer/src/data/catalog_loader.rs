use std::collections::HashSet;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use csv::ReaderBuilder;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::models::poi::{Coordinate, PointOfInterest, POI};
use crate::utils::logging::{self, FileIOType, OperationCategory};

#[derive(Debug)]
pub enum CatalogLoadError {
    IoError(std::io::Error),
    JsonError(serde_json::Error),
    CsvError(csv::Error),
    MissingCoordinate(String),
    MissingId(String),
    InvalidNumber(String),
    DuplicateId(String),
    UnsupportedFormat(String),
    Empty,
}

impl From<std::io::Error> for CatalogLoadError {
    fn from(err: std::io::Error) -> Self {
        CatalogLoadError::IoError(err)
    }
}

impl From<serde_json::Error> for CatalogLoadError {
    fn from(err: serde_json::Error) -> Self {
        CatalogLoadError::JsonError(err)
    }
}

impl From<csv::Error> for CatalogLoadError {
    fn from(err: csv::Error) -> Self {
        CatalogLoadError::CsvError(err)
    }
}

impl std::fmt::Display for CatalogLoadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CatalogLoadError::IoError(e) => write!(f, "IO error: {}", e),
            CatalogLoadError::JsonError(e) => write!(f, "JSON error: {}", e),
            CatalogLoadError::CsvError(e) => write!(f, "CSV error: {}", e),
            CatalogLoadError::MissingCoordinate(s) => write!(f, "Missing coordinate: {}", s),
            CatalogLoadError::MissingId(s) => write!(f, "Missing POI id: {}", s),
            CatalogLoadError::InvalidNumber(s) => write!(f, "Invalid number: {}", s),
            CatalogLoadError::DuplicateId(s) => write!(f, "Duplicate POI id: {}", s),
            CatalogLoadError::UnsupportedFormat(s) => write!(f, "Unsupported catalog format: {}", s),
            CatalogLoadError::Empty => write!(f, "Catalog contains no points of interest"),
        }
    }
}

impl std::error::Error for CatalogLoadError {}

// lat/lon are optional here so a missing one is reported by name, not as a serde error
#[derive(Debug, Deserialize)]
struct PoiRecord {
    id: String,
    name: String,
    #[serde(default)]
    address: String,
    lat: Option<f64>,
    lon: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct PoiList {
    pois: Vec<PoiRecord>,
}

fn record_to_poi(record: PoiRecord) -> Result<PointOfInterest, CatalogLoadError> {
    let lat = record.lat
        .ok_or_else(|| CatalogLoadError::MissingCoordinate(format!("'{}' has no latitude", record.id)))?;
    let lon = record.lon
        .ok_or_else(|| CatalogLoadError::MissingCoordinate(format!("'{}' has no longitude", record.id)))?;

    let coordinate = Coordinate::new(lat, lon);
    if !coordinate.is_in_range() {
        warn!(id = %record.id, lat, lon, "POI coordinate outside valid lat/lon range");
    }

    Ok(PointOfInterest::new(record.id, record.name, record.address, coordinate))
}

/// Rejects empty catalogs, blank ids and duplicate ids.
pub fn validate_catalog(catalog: &[PointOfInterest]) -> Result<(), CatalogLoadError> {
    if catalog.is_empty() {
        return Err(CatalogLoadError::Empty);
    }

    let mut seen = HashSet::new();
    for (index, poi) in catalog.iter().enumerate() {
        if poi.get_id().trim().is_empty() {
            return Err(CatalogLoadError::MissingId(format!("entry {} ('{}')", index + 1, poi.get_name())));
        }
        if !seen.insert(poi.get_id()) {
            return Err(CatalogLoadError::DuplicateId(poi.get_id().to_string()));
        }
    }
    Ok(())
}

pub fn load_catalog_json(path: impl AsRef<Path>) -> Result<Vec<PointOfInterest>, CatalogLoadError> {
    let file = File::open(path)?;
    let reader = BufReader::new(file);
    let list: PoiList = serde_json::from_reader(reader)?;

    let catalog = list.pois
        .into_iter()
        .map(record_to_poi)
        .collect::<Result<Vec<_>, _>>()?;

    validate_catalog(&catalog)?;
    Ok(catalog)
}

// Columns are matched by header name, so their order in the file is free
#[derive(Debug, Deserialize)]
struct CsvRow {
    #[serde(default)]
    id: String,
    #[serde(default)]
    name: String,
    #[serde(default)]
    address: String,
    lat: Option<String>,
    lon: Option<String>,
}

fn parse_coordinate_field(value: Option<&str>, field: &str, row: usize) -> Result<f64, CatalogLoadError> {
    let raw = value.map(str::trim).unwrap_or("");
    if raw.is_empty() {
        return Err(CatalogLoadError::MissingCoordinate(format!("row {} has no {}", row, field)));
    }
    raw.parse()
        .map_err(|_| CatalogLoadError::InvalidNumber(format!("row {} {} '{}'", row, field, raw)))
}

/// Reads rows with an `id,name,address,lat,lon` header (any column order).
pub fn load_catalog_csv(path: impl AsRef<Path>) -> Result<Vec<PointOfInterest>, CatalogLoadError> {
    let mut file = File::open(path)?;
    let mut contents = String::new();
    file.read_to_string(&mut contents)?;

    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(contents.as_bytes());

    let mut catalog = Vec::new();

    for (index, result) in reader.deserialize::<CsvRow>().enumerate() {
        let row = result?;
        let line = index + 1;

        let lat = parse_coordinate_field(row.lat.as_deref(), "latitude", line)?;
        let lon = parse_coordinate_field(row.lon.as_deref(), "longitude", line)?;

        catalog.push(record_to_poi(PoiRecord {
            id: row.id,
            name: row.name,
            address: row.address,
            lat: Some(lat),
            lon: Some(lon),
        })?);
    }

    validate_catalog(&catalog)?;
    Ok(catalog)
}

/// Picks the loader from the file extension.
pub fn load_catalog(path: impl AsRef<Path>) -> Result<Vec<PointOfInterest>, CatalogLoadError> {
    let _timing = logging::start_timing("load_catalog",
        OperationCategory::FileIO { subcategory: FileIOType::DataLoad });

    let path = path.as_ref();
    let extension = path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .unwrap_or_default();

    let catalog = match extension.as_str() {
        "json" => load_catalog_json(path)?,
        "csv" => load_catalog_csv(path)?,
        other => return Err(CatalogLoadError::UnsupportedFormat(format!("{} ({})", path.display(), other))),
    };

    debug!(path = %path.display(), count = catalog.len(), "Loaded catalog");
    Ok(catalog)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::Builder;

    fn write_temp(suffix: &str, contents: &str) -> tempfile::NamedTempFile {
        let mut file = Builder::new().suffix(suffix).tempfile().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn loads_json_catalog() {
        let file = write_temp(".json", r#"{"pois": [
            {"id": "a", "name": "Alpha", "address": "1 Road", "lat": 51.5, "lon": -0.1},
            {"id": "b", "name": "Beta", "lat": 51.6, "lon": -0.2}
        ]}"#);
        let catalog = load_catalog(file.path()).unwrap();
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog[0].get_address(), "1 Road");
        assert_eq!(catalog[1].get_address(), "");
        assert_eq!(catalog[1].get_coordinate(), &Coordinate::new(51.6, -0.2));
    }

    #[test]
    fn json_missing_longitude_is_reported() {
        let file = write_temp(".json", r#"{"pois": [{"id": "a", "name": "Alpha", "lat": 51.5}]}"#);
        let err = load_catalog(file.path()).unwrap_err();
        assert!(matches!(err, CatalogLoadError::MissingCoordinate(ref s) if s.contains("longitude")));
    }

    #[test]
    fn loads_csv_catalog() {
        let file = write_temp(".csv", "id,name,address,lat,lon\n\
            a,Alpha,\"1 Road, London\",51.5,-0.1\n\
            b,Beta,2 Street, 51.6 , -0.2\n");
        let catalog = load_catalog(file.path()).unwrap();
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog[0].get_address(), "1 Road, London");
        assert_eq!(catalog[1].get_coordinate(), &Coordinate::new(51.6, -0.2));
    }

    #[test]
    fn csv_empty_latitude_is_missing_coordinate() {
        let file = write_temp(".csv", "id,name,address,lat,lon\na,Alpha,x,,-0.1\n");
        let err = load_catalog(file.path()).unwrap_err();
        assert!(matches!(err, CatalogLoadError::MissingCoordinate(_)));
    }

    #[test]
    fn csv_garbage_number_is_rejected() {
        let file = write_temp(".csv", "id,name,address,lat,lon\na,Alpha,x,north,-0.1\n");
        let err = load_catalog(file.path()).unwrap_err();
        assert!(matches!(err, CatalogLoadError::InvalidNumber(_)));
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let file = write_temp(".csv", "id,name,address,lat,lon\na,Alpha,x,1,1\na,Again,y,2,2\n");
        let err = load_catalog(file.path()).unwrap_err();
        assert!(matches!(err, CatalogLoadError::DuplicateId(ref id) if id == "a"));
    }

    #[test]
    fn csv_columns_are_read_by_header_name() {
        let file = write_temp(".csv", "id,name,address,lon,lat\na,Alpha,x,-0.0653,51.5175\n");
        let catalog = load_catalog(file.path()).unwrap();
        assert_eq!(catalog[0].get_coordinate(), &Coordinate::new(51.5175, -0.0653));
    }

    #[test]
    fn csv_without_longitude_column_is_missing_coordinate() {
        let file = write_temp(".csv", "id,name,address,lat\na,Alpha,x,51.5\n");
        let err = load_catalog(file.path()).unwrap_err();
        assert!(matches!(err, CatalogLoadError::MissingCoordinate(ref s) if s.contains("longitude")));
    }

    #[test]
    fn csv_blank_id_is_rejected() {
        let file = write_temp(".csv", "id,name,address,lat,lon\n,Alpha,x,51.5,-0.1\n");
        let err = load_catalog(file.path()).unwrap_err();
        assert!(matches!(err, CatalogLoadError::MissingId(ref s) if s.contains("Alpha")));
    }

    #[test]
    fn json_whitespace_id_is_rejected() {
        let file = write_temp(".json", r#"{"pois": [{"id": "  ", "name": "Alpha", "lat": 51.5, "lon": -0.1}]}"#);
        assert!(matches!(load_catalog(file.path()), Err(CatalogLoadError::MissingId(_))));
    }

    #[test]
    fn empty_catalog_is_rejected() {
        let file = write_temp(".json", r#"{"pois": []}"#);
        assert!(matches!(load_catalog(file.path()), Err(CatalogLoadError::Empty)));
    }

    #[test]
    fn unknown_extension_is_rejected() {
        let file = write_temp(".xml", "<pois/>");
        assert!(matches!(load_catalog(file.path()), Err(CatalogLoadError::UnsupportedFormat(_))));
    }
}
