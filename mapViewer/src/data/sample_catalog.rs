use crate::models::poi::{Coordinate, PointOfInterest};

// (id, name, address, lat, lon)
const SAMPLE_MOSQUES: [(&str, &str, &str, f64, f64); 12] = [
    ("east-london", "East London Mosque", "82-92 Whitechapel Rd, London E1 1JQ", 51.5175, -0.0653),
    ("london-central", "London Central Mosque", "146 Park Rd, London NW8 7RG", 51.5287, -0.1675),
    ("brick-lane", "Brick Lane Jamme Masjid", "59 Brick Ln, London E1 6QL", 51.5205, -0.0716),
    ("fazl", "Fazl Mosque", "16 Gressenhall Rd, London SW18 5QL", 51.4526, -0.2033),
    ("baitul-futuh", "Baitul Futuh Mosque", "181 London Rd, Morden SM4 5PT", 51.3967, -0.1957),
    ("finsbury-park", "Finsbury Park Mosque", "7-11 St Thomas's Rd, London N4 2QH", 51.5636, -0.1066),
    ("north-london-central", "North London Central Mosque", "7-11 Station Pl, London N4 2DH", 51.5645, -0.1069),
    ("suleymaniye", "Suleymaniye Mosque", "212-216 Kingsland Rd, London E2 8AX", 51.5349, -0.0767),
    ("shacklewell-lane", "Shacklewell Lane Mosque", "32 Shacklewell Ln, London E8 2EZ", 51.5527, -0.0720),
    ("old-kent-road", "Old Kent Road Mosque", "1 Wade House, London SE1 5QX", 51.4905, -0.0714),
    ("brixton", "Brixton Mosque", "1 Gresham Rd, London SW9 7PH", 51.4654, -0.1126),
    ("stockwell-green", "Stockwell Green Mosque", "40 Stockwell Green, London SW9 9HZ", 51.4702, -0.1197),
];

/// Built-in catalog used when no catalog file is supplied or it fails to load.
pub fn sample_catalog() -> Vec<PointOfInterest> {
    SAMPLE_MOSQUES
        .iter()
        .map(|&(id, name, address, lat, lon)| PointOfInterest::new(id, name, address, Coordinate::new(lat, lon)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::catalog_loader::validate_catalog;

    #[test]
    fn sample_catalog_is_valid() {
        let catalog = sample_catalog();
        assert_eq!(catalog.len(), SAMPLE_MOSQUES.len());
        assert!(validate_catalog(&catalog).is_ok());
    }
}
