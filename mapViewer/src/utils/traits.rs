// Hooks the view state uses to tell a host UI that derived data changed

use crate::models::poi::{Coordinate, PointOfInterest};
use crate::models::ranked::RankedPoi;

pub trait RankingListener {
    fn on_ranking_changed(&mut self, reference: &Coordinate, ranked: &[RankedPoi]);

    fn on_selection_changed(&mut self, _selected: Option<&PointOfInterest>) {}
}
