use serde::{Deserialize, Serialize};
use crate::models::poi::{Coordinate, PointOfInterest, POI};

/// A catalog entry annotated with its distance from one query's reference.
///
/// The distance belongs to the query, so it lives here and never on the POI.
#[derive(Debug, Clone, PartialEq)]
pub struct RankedPoi {
    pub poi: PointOfInterest,
    pub distance_km: f64,
}

impl RankedPoi {
    pub fn new(poi: PointOfInterest, distance_km: f64) -> Self {
        Self { poi, distance_km }
    }

    pub fn get_id(&self) -> &str {
        self.poi.get_id()
    }

    pub fn get_coordinate(&self) -> &Coordinate {
        self.poi.get_coordinate()
    }
}

// Flat wire shape: {id, name, address, lat, lon, distanceKm}
#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RankedPoiRecord {
    id: String,
    name: String,
    address: String,
    lat: f64,
    lon: f64,
    distance_km: f64,
}

impl Serialize for RankedPoi {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let coordinate = self.poi.get_coordinate();
        RankedPoiRecord {
            id: self.poi.get_id().to_string(),
            name: self.poi.get_name().to_string(),
            address: self.poi.get_address().to_string(),
            lat: coordinate.lat,
            lon: coordinate.lon,
            distance_km: self.distance_km,
        }
        .serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for RankedPoi {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let record = RankedPoiRecord::deserialize(deserializer)?;
        Ok(RankedPoi {
            poi: PointOfInterest::new(
                record.id,
                record.name,
                record.address,
                Coordinate::new(record.lat, record.lon),
            ),
            distance_km: record.distance_km,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_flat_with_camel_case_distance() {
        let ranked = RankedPoi::new(
            PointOfInterest::new("elm", "East London Mosque", "82-92 Whitechapel Rd", Coordinate::new(51.5175, -0.0653)),
            4.25,
        );
        let value = serde_json::to_value(&ranked).unwrap();
        assert_eq!(value["id"], "elm");
        assert_eq!(value["lat"], 51.5175);
        assert_eq!(value["lon"], -0.0653);
        assert_eq!(value["distanceKm"], 4.25);
        assert!(value.get("coordinate").is_none());
    }
}
