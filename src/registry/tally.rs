use hashbrown::HashMap;
use tracing::info;

use crate::models::{DistrictKey, HeritageSite, SiteRegion};

/// Expand multi-region rows into one record per region token.
///
/// Splitting on ',' keeps empty tokens: a blank region field yields a single
/// empty-string record, which tallies under an unmatchable empty key.
pub fn expand_regions(sites: &[HeritageSite]) -> Vec<SiteRegion> {
    let mut records = Vec::new();
    for site in sites {
        for token in site.regions.split(',') {
            records.push(SiteRegion {
                site: site.name.clone(),
                region: token.trim().to_string(),
            });
        }
    }
    records
}

/// Per-district site counts keyed by the composite region label.
#[derive(Debug, Clone, Default)]
pub struct RegionTally {
    counts: HashMap<DistrictKey, u64>,
}

impl RegionTally {
    pub fn from_records(records: &[SiteRegion]) -> Self {
        let mut counts: HashMap<DistrictKey, u64> = HashMap::new();
        for record in records {
            *counts
                .entry(DistrictKey::from_label(&record.region))
                .or_insert(0) += 1;
        }
        info!(
            "Tallied {} site records into {} regions",
            records.len(),
            counts.len()
        );
        Self { counts }
    }

    pub fn get(&self, key: &DistrictKey) -> Option<u64> {
        self.counts.get(key).copied()
    }

    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Total number of expanded records behind the tally.
    pub fn total(&self) -> u64 {
        self.counts.values().sum()
    }

    /// Iterate keys and counts in unspecified order.
    pub fn iter(&self) -> impl Iterator<Item = (&DistrictKey, u64)> {
        self.counts.iter().map(|(k, v)| (k, *v))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn site(name: &str, regions: &str) -> HeritageSite {
        HeritageSite {
            name: name.to_string(),
            regions: regions.to_string(),
        }
    }

    #[test]
    fn test_expansion_row_count_matches_token_count() {
        let sites = vec![
            site("孔廟", "臺南市中西區"),
            site("大天后宮", "臺南市東區,臺南市南區"),
            site("五妃廟", "臺南市中西區, 臺南市南區 ,臺南市北區"),
        ];

        let records = expand_regions(&sites);
        assert_eq!(records.len(), 1 + 2 + 3);
        assert!(records
            .iter()
            .all(|r| !r.region.contains(',') && r.region.trim() == r.region));
    }

    #[test]
    fn test_blank_region_field_yields_single_empty_token() {
        let records = expand_regions(&[site("無名", "")]);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].region, "");
    }

    #[test]
    fn test_tally_sum_equals_record_count() {
        let sites = vec![
            site("a", "臺南市東區,臺南市南區"),
            site("b", "臺南市東區"),
            site("c", ""),
        ];
        let records = expand_regions(&sites);
        let tally = RegionTally::from_records(&records);

        assert_eq!(tally.total(), records.len() as u64);
        assert_eq!(tally.get(&DistrictKey::from_label("臺南市東區")), Some(2));
        assert_eq!(tally.get(&DistrictKey::from_label("臺南市南區")), Some(1));
        // The empty token lands in the tally instead of being filtered.
        assert_eq!(tally.get(&DistrictKey::from_label("")), Some(1));
        assert_eq!(tally.len(), 3);
    }
}
