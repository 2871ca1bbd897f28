use serde::Serialize;
use crate::config::viewer_config::LineStyle;
use crate::models::poi::{Coordinate, POI};
use crate::models::ranked::RankedPoi;

/// A straight segment from the map centre to one ranked POI.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConnectingLine {
    pub poi_id: String,
    pub from: Coordinate,
    pub to: Coordinate,
    pub distance_km: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LineOverlay {
    pub style: LineStyle,
    pub lines: Vec<ConnectingLine>,
}

pub fn connecting_lines(center: &Coordinate, ranked: &[RankedPoi]) -> Vec<ConnectingLine> {
    ranked
        .iter()
        .map(|entry| ConnectingLine {
            poi_id: entry.poi.get_id().to_string(),
            from: *center,
            to: *entry.poi.get_coordinate(),
            distance_km: entry.distance_km,
        })
        .collect()
}

impl LineOverlay {
    pub fn new(center: &Coordinate, ranked: &[RankedPoi], style: LineStyle) -> Self {
        Self {
            style,
            lines: connecting_lines(center, ranked),
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::poi::PointOfInterest;

    #[test]
    fn one_line_per_ranked_poi_from_center() {
        let center = Coordinate::new(51.5, -0.1);
        let ranked = vec![
            RankedPoi::new(PointOfInterest::new("a", "A", "", Coordinate::new(51.51, -0.1)), 1.1),
            RankedPoi::new(PointOfInterest::new("b", "B", "", Coordinate::new(51.52, -0.1)), 2.2),
        ];
        let overlay = LineOverlay::new(&center, &ranked, LineStyle::default());
        assert_eq!(overlay.lines.len(), 2);
        assert!(overlay.lines.iter().all(|l| l.from == center));
        assert_eq!(overlay.lines[1].poi_id, "b");
        assert_eq!(overlay.lines[1].to, Coordinate::new(51.52, -0.1));

        let json: serde_json::Value = serde_json::from_str(&overlay.to_json().unwrap()).unwrap();
        assert_eq!(json["style"]["color"], "#22c55e");
        assert_eq!(json["lines"][0]["from"]["lat"], 51.5);
    }
}
