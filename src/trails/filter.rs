#![forbid(unsafe_code)]

use serde::Serialize;

use crate::trails::model::Trail;

// ***************************************************************************
//                               TrailFilter
// ***************************************************************************
/// Criteria submitted with a search.  Empty strings and false flags impose
/// no constraint; everything else must hold for a trail to match.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TrailFilter {
    pub address: String,
    pub difficulty: String,
    pub restrooms: bool,
    pub picnic: bool,
    pub fishing: bool,
    pub fee: bool,
    pub bike_rack: bool,
}

impl TrailFilter {
    /// True when no criterion is active.
    pub fn is_empty(&self) -> bool {
        self.address.is_empty()
            && self.difficulty.is_empty()
            && !self.restrooms
            && !self.picnic
            && !self.fishing
            && !self.fee
            && !self.bike_rack
    }

    pub fn matches(&self, trail: &Trail) -> bool {
        (self.address.is_empty() || trail.address == self.address)
            && (self.difficulty.is_empty() || trail.difficulty == self.difficulty)
            && (!self.restrooms || trail.restrooms)
            && (!self.picnic || trail.picnic)
            && (!self.fishing || trail.fishing)
            && (!self.fee || trail.fee)
            && (!self.bike_rack || trail.bike_rack)
    }
}

// ---------------------------------------------------------------------------
// filter_trails:
// ---------------------------------------------------------------------------
/** Return the trails that satisfy every active criterion, in input order. */
pub fn filter_trails(trails: &[Trail], filter: &TrailFilter) -> Vec<Trail> {
    trails.iter().filter(|t| filter.matches(t)).cloned().collect()
}
