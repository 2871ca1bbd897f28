use std::fmt::Write;
use serde_json::json;
use crate::core::view_state::ViewState;
use crate::models::poi::{PointOfInterest, POI};
use crate::models::ranked::RankedPoi;

/// `"{n}. {name} ({d:.1} km)"` lines, numbered from 1.
pub fn format_nearest_list(ranked: &[RankedPoi], limit: usize) -> Vec<String> {
    ranked
        .iter()
        .take(limit)
        .enumerate()
        .map(|(i, entry)| format!("{}. {} ({:.1} km)", i + 1, entry.poi.get_name(), entry.distance_km))
        .collect()
}

pub fn render_popup(poi: &PointOfInterest) -> String {
    format!(
        "{}\n{} <{}>",
        poi.get_name(),
        poi.get_address(),
        poi.get_coordinate().maps_search_url()
    )
}

/// Detail card for the selected POI. The body is only rendered while the
/// card is shown; collapsed, it is the title and a Show toggle.
pub fn render_card(state: &ViewState) -> Option<String> {
    let selected = state.selected()?;
    let mut out = String::new();

    let toggle = if state.show_card() { "Hide" } else { "Show" };
    let _ = writeln!(out, "{}  [{}]", selected.get_name(), toggle);

    if state.show_card() {
        let _ = writeln!(out, "{}", selected.get_address());
        let _ = writeln!(out, "{}", selected.get_coordinate().maps_search_url());
        let _ = writeln!(out);
        let _ = writeln!(out, "Nearest mosques:");
        for line in format_nearest_list(state.nearest(), state.line_count()) {
            let _ = writeln!(out, "  {}", line);
        }
    }

    Some(out)
}

pub fn print_view_summary(state: &ViewState) {
    let center = state.center();
    println!("\nMap centre ({:.4}, {:.4}), zoom {}", center.lat, center.lon, state.zoom());
    println!("----------------------------------------");
    println!("Filter: {} lines", state.line_count());
    for line in format_nearest_list(state.nearest(), state.line_count()) {
        println!("  {}", line);
    }
    println!("----------------------------------------");

    match render_card(state) {
        Some(card) => print!("{}", card),
        None => println!("No mosque selected"),
    }
}

pub fn print_catalog(catalog: &[PointOfInterest]) {
    println!("\nCatalog ({} entries)", catalog.len());
    println!("----------------------------------------");
    for poi in catalog {
        let coordinate = poi.get_coordinate();
        println!("{:<24} {:<36} ({:.4}, {:.4})", poi.get_id(), poi.get_name(), coordinate.lat, coordinate.lon);
    }
}

pub fn ranking_to_json(ranked: &[RankedPoi]) -> serde_json::Result<String> {
    serde_json::to_string_pretty(ranked)
}

/// One JSON document for the current view: centre, ranking and, when asked,
/// the connecting-line overlay.
pub fn view_to_json(state: &ViewState, include_lines: bool) -> serde_json::Result<String> {
    let center = state.center();
    let mut document = json!({
        "center": { "lat": center.lat, "lon": center.lon },
        "selectedId": state.selected().map(|poi| poi.get_id()),
        "nearest": state.nearest(),
    });
    if include_lines {
        document["overlay"] = serde_json::to_value(state.overlay())?;
    }
    serde_json::to_string_pretty(&document)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::viewer_config::ViewerConfig;
    use crate::models::poi::Coordinate;

    fn state() -> ViewState {
        let catalog = vec![
            PointOfInterest::new("a", "Alpha Mosque", "1 Road", Coordinate::new(0.0, 0.01)),
            PointOfInterest::new("b", "Beta Mosque", "2 Road", Coordinate::new(0.0, 0.05)),
        ];
        let config = ViewerConfig {
            default_center: Coordinate::new(0.0, 0.0),
            line_count: 5,
            ..ViewerConfig::default()
        };
        ViewState::new(catalog, config).unwrap()
    }

    #[test]
    fn list_lines_use_one_decimal() {
        let lines = format_nearest_list(state().nearest(), 5);
        assert_eq!(lines, vec!["1. Alpha Mosque (1.1 km)", "2. Beta Mosque (5.6 km)"]);
    }

    #[test]
    fn collapsed_card_has_title_only() {
        let card = render_card(&state()).unwrap();
        assert_eq!(card, "Alpha Mosque  [Show]\n");
    }

    #[test]
    fn expanded_card_lists_nearest() {
        let mut state = state();
        state.toggle_card();
        let card = render_card(&state).unwrap();
        assert!(card.starts_with("Alpha Mosque  [Hide]\n1 Road\n"));
        assert!(card.contains("https://www.google.com/maps/search/?api=1&query=0,0.01"));
        assert!(card.contains("Nearest mosques:\n  1. Alpha Mosque (1.1 km)\n  2. Beta Mosque (5.6 km)\n"));
    }

    #[test]
    fn view_json_is_a_single_document() {
        let state = state();
        let value: serde_json::Value = serde_json::from_str(&view_to_json(&state, true).unwrap()).unwrap();
        assert_eq!(value["selectedId"], "a");
        assert_eq!(value["nearest"].as_array().unwrap().len(), 2);
        assert_eq!(value["nearest"][0]["id"], "a");
        assert_eq!(value["overlay"]["lines"].as_array().unwrap().len(), 2);

        let bare: serde_json::Value = serde_json::from_str(&view_to_json(&state, false).unwrap()).unwrap();
        assert!(bare.get("overlay").is_none());
    }

    #[test]
    fn popup_links_address() {
        let poi = PointOfInterest::new("a", "Alpha", "1 Road", Coordinate::new(1.5, 2.5));
        assert_eq!(render_popup(&poi), "Alpha\n1 Road <https://www.google.com/maps/search/?api=1&query=1.5,2.5>");
    }
}
