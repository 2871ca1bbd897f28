// Geodesy
pub const EARTH_RADIUS_KM: f64 = 6371.0;              // Mean Earth radius, spherical model

// Map view defaults
pub const DEFAULT_CENTER_LAT: f64 = 51.5074;          // London
pub const DEFAULT_CENTER_LON: f64 = -0.1278;
pub const DEFAULT_ZOOM: u8 = 13;
pub const GEOLOCATION_ZOOM: u8 = 13;

// Line count filter
pub const DEFAULT_LINE_COUNT: usize = 10;
pub const LINE_COUNT_OPTIONS: [usize; 4] = [1, 5, 10, 15];

// Basemap
pub const DEFAULT_TILE_URL: &str = "https://{s}.basemaps.cartocdn.com/dark_all/{z}/{x}/{y}{r}.png";
pub const DEFAULT_ATTRIBUTION: &str =
    "&copy; <a href=\"https://www.openstreetmap.org/copyright\">OpenStreetMap</a> contributors";

// Connecting line style
pub const LINE_COLOR: &str = "#22c55e";
pub const LINE_WEIGHT: u32 = 2;
pub const LINE_OPACITY: f64 = 0.4;

// External links
pub const MAPS_SEARCH_URL: &str = "https://www.google.com/maps/search/?api=1&query=";

// Panning simulation
pub const DEFAULT_PAN_STEPS: usize = 200;
pub const DEFAULT_PAN_STEP_KM: f64 = 0.5;
pub const KM_PER_DEGREE_LAT: f64 = 111.32;

