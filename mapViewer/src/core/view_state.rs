use std::fmt;
use std::sync::Arc;
use tracing::{debug, warn};

use crate::analysis::overlay::{connecting_lines, ConnectingLine, LineOverlay};
use crate::config::constants::GEOLOCATION_ZOOM;
use crate::config::viewer_config::{SelectionPolicy, ViewerConfig};
use crate::core::ranking::{rank_nearest, RankError};
use crate::models::poi::{Coordinate, PointOfInterest, POI};
use crate::models::ranked::RankedPoi;
use crate::utils::logging::{self, OperationCategory};
use crate::utils::traits::RankingListener;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionSource {
    /// Picked by recomputation (nearest POI).
    Auto,
    /// Picked by the user clicking a marker.
    Manual,
}

#[derive(Debug, Clone, PartialEq)]
struct Selection {
    poi: PointOfInterest,
    source: SelectionSource,
}

/// UI-owned view state: map centre, filter, selection and panel visibility.
///
/// Every input change that affects the ranking recomputes it through the
/// pure ranking engine and notifies registered listeners. The engine itself
/// never sees this struct, only plain arguments.
pub struct ViewState {
    catalog: Arc<Vec<PointOfInterest>>,
    config: ViewerConfig,
    center: Coordinate,
    zoom: u8,
    line_count: usize,
    nearest: Vec<RankedPoi>,
    selection: Option<Selection>,
    show_card: bool,
    listeners: Vec<Box<dyn RankingListener>>,
}

impl fmt::Debug for ViewState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ViewState")
            .field("catalog_len", &self.catalog.len())
            .field("center", &self.center)
            .field("zoom", &self.zoom)
            .field("line_count", &self.line_count)
            .field("nearest", &self.nearest.len())
            .field("selection", &self.selection)
            .field("show_card", &self.show_card)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

impl ViewState {
    /// Builds the initial view at the configured centre and selects the nearest POI.
    pub fn new(catalog: Vec<PointOfInterest>, config: ViewerConfig) -> Result<Self, RankError> {
        let mut state = Self {
            catalog: Arc::new(catalog),
            center: config.default_center,
            zoom: config.default_zoom,
            line_count: config.line_count,
            config,
            nearest: Vec::new(),
            selection: None,
            show_card: false,
            listeners: Vec::new(),
        };
        state.recompute()?;
        Ok(state)
    }

    pub fn add_listener(&mut self, listener: Box<dyn RankingListener>) {
        self.listeners.push(listener);
    }

    pub fn catalog(&self) -> &[PointOfInterest] {
        &self.catalog
    }

    pub fn config(&self) -> &ViewerConfig {
        &self.config
    }

    pub fn center(&self) -> &Coordinate {
        &self.center
    }

    pub fn zoom(&self) -> u8 {
        self.zoom
    }

    pub fn line_count(&self) -> usize {
        self.line_count
    }

    pub fn nearest(&self) -> &[RankedPoi] {
        &self.nearest
    }

    pub fn selected(&self) -> Option<&PointOfInterest> {
        self.selection.as_ref().map(|s| &s.poi)
    }

    pub fn selection_source(&self) -> Option<SelectionSource> {
        self.selection.as_ref().map(|s| s.source)
    }

    pub fn show_card(&self) -> bool {
        self.show_card
    }

    /// Centre update while the map is still moving: the marker and lines
    /// follow, the ranking waits for `move_center`.
    pub fn drag_center(&mut self, center: Coordinate) {
        self.center = center;
    }

    /// Map pan finished at `center`.
    pub fn move_center(&mut self, center: Coordinate) -> Result<(), RankError> {
        self.center = center;
        self.recompute()
    }

    /// A device location fix arrived: recentre, zoom in, and re-rank.
    pub fn use_location(&mut self, location: Coordinate) -> Result<(), RankError> {
        if !location.is_in_range() {
            warn!(lat = location.lat, lon = location.lon, "Location fix outside valid lat/lon range");
        }
        self.zoom = GEOLOCATION_ZOOM;
        self.move_center(location)
    }

    /// Changes how many nearest POIs are listed. Zero is rejected and
    /// leaves the state untouched.
    pub fn set_line_count(&mut self, line_count: usize) -> Result<(), RankError> {
        if line_count == 0 {
            return Err(RankError::InvalidArgument("line count must be at least 1".to_string()));
        }
        if !self.config.line_count_options.is_empty() && !self.config.line_count_options.contains(&line_count) {
            warn!(line_count, options = ?self.config.line_count_options, "Line count is not one of the filter options");
        }
        self.line_count = line_count;
        self.recompute()
    }

    /// Marker click. Unknown ids leave the selection as it was.
    pub fn select(&mut self, id: &str) -> Option<&PointOfInterest> {
        let poi = self.catalog.iter().find(|poi| poi.get_id() == id)?.clone();
        debug!(id, "Manual selection");
        self.set_selection(Some(Selection { poi, source: SelectionSource::Manual }));
        self.selected()
    }

    pub fn clear_selection(&mut self) {
        self.set_selection(None);
    }

    pub fn toggle_card(&mut self) -> bool {
        self.show_card = !self.show_card;
        self.show_card
    }

    pub fn lines(&self) -> Vec<ConnectingLine> {
        connecting_lines(&self.center, &self.nearest)
    }

    pub fn overlay(&self) -> LineOverlay {
        LineOverlay::new(&self.center, &self.nearest, self.config.line_style.clone())
    }

    fn recompute(&mut self) -> Result<(), RankError> {
        let _timing = logging::start_timing("view_state_recompute", OperationCategory::ViewUpdate);

        let nearest = {
            let _timing = logging::start_timing("rank_nearest", OperationCategory::Ranking);
            rank_nearest(&self.center, &self.catalog, self.line_count)?
        };
        self.nearest = nearest;

        debug!(
            lat = self.center.lat,
            lon = self.center.lon,
            count = self.nearest.len(),
            nearest = self.nearest.first().map(|r| r.get_id()).unwrap_or("-"),
            "Recomputed nearest POIs"
        );

        for listener in self.listeners.iter_mut() {
            listener.on_ranking_changed(&self.center, &self.nearest);
        }

        let keep_current = self.config.selection_policy == SelectionPolicy::KeepManual
            && self.selection_source() == Some(SelectionSource::Manual);
        if !keep_current {
            let auto = self.nearest.first().map(|entry| Selection {
                poi: entry.poi.clone(),
                source: SelectionSource::Auto,
            });
            self.set_selection(auto);
        }

        Ok(())
    }

    fn set_selection(&mut self, selection: Option<Selection>) {
        let changed = self.selection.as_ref().map(|s| s.poi.get_id())
            != selection.as_ref().map(|s| s.poi.get_id());
        self.selection = selection;

        if changed {
            let selected = self.selection.as_ref().map(|s| &s.poi);
            for listener in self.listeners.iter_mut() {
                listener.on_selection_changed(selected);
            }
        }
    }
}
