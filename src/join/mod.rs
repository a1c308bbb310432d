//! Left join of registry counts onto boundary districts.

use hashbrown::HashSet;
use tracing::warn;

use crate::models::{District, DistrictKey};
use crate::registry::RegionTally;

/// A district with its joined site count.
#[derive(Debug, Clone)]
pub struct CountedDistrict {
    pub district: District,
    pub count: u64,
}

/// Join diagnostics. The left-join invariant keeps every district in the
/// output regardless of match rate; this report says how well the key
/// contract actually held.
#[derive(Debug, Clone)]
pub struct JoinReport {
    pub districts: usize,
    pub matched: usize,

    /// District keys no registry region pointed at.
    pub unmatched_districts: Vec<DistrictKey>,

    /// Tally keys that matched no district: typos, out-of-county sites, and
    /// the empty key from blank region fields.
    pub orphan_keys: Vec<DistrictKey>,
}

impl JoinReport {
    pub fn match_rate(&self) -> f64 {
        if self.districts == 0 {
            0.0
        } else {
            self.matched as f64 / self.districts as f64
        }
    }
}

/// Left-join tally counts onto districts by composite key. Unmatched
/// districts keep a count of 0.
pub fn join_counts(
    districts: Vec<District>,
    tally: &RegionTally,
) -> (Vec<CountedDistrict>, JoinReport) {
    let mut joined = Vec::with_capacity(districts.len());
    let mut unmatched_districts = Vec::new();
    let mut matched = 0usize;
    let mut used: HashSet<DistrictKey> = HashSet::new();

    for district in districts {
        match tally.get(&district.key) {
            Some(count) => {
                matched += 1;
                used.insert(district.key.clone());
                joined.push(CountedDistrict { district, count });
            }
            None => {
                unmatched_districts.push(district.key.clone());
                joined.push(CountedDistrict { district, count: 0 });
            }
        }
    }

    let mut orphan_keys: Vec<DistrictKey> = tally
        .iter()
        .filter(|(key, _)| !used.contains(*key))
        .map(|(key, _)| key.clone())
        .collect();
    orphan_keys.sort();
    unmatched_districts.sort();

    let report = JoinReport {
        districts: joined.len(),
        matched,
        unmatched_districts,
        orphan_keys,
    };

    if !report.unmatched_districts.is_empty() {
        warn!(
            "{} districts matched no registry region: {:?}",
            report.unmatched_districts.len(),
            report.unmatched_districts
        );
    }
    if !report.orphan_keys.is_empty() {
        warn!(
            "{} registry regions matched no district: {:?}",
            report.orphan_keys.len(),
            report.orphan_keys
        );
    }

    (joined, report)
}
