use std::collections::{BTreeMap, HashSet};

use crate::types::{CaseNumber, Page, Record};

/// Starting pages of every record, grouped by volume, plus the set of all
/// record numbers for exact matching.
///
/// Built once per pipeline run and never mutated afterwards. Volumes cover
/// `1..=max_volume`, where `max_volume` is the highest volume in the corpus;
/// volumes with no records read as empty.
#[derive(Debug, Clone, Default)]
pub struct VolumeIndex {
    /// Starting pages of each volume that has records, ordered by
    /// [`Page::sort_key`]. Duplicates are kept in corpus order.
    volumes: BTreeMap<u32, Vec<Page>>,
    max_volume: u32,
    numbers: HashSet<CaseNumber>,
}

impl VolumeIndex {
    /// Builds the index from the corpus.
    pub fn build(records: &[Record]) -> Self {
        let mut volumes: BTreeMap<u32, Vec<Page>> = BTreeMap::new();
        let mut numbers = HashSet::with_capacity(records.len());

        for record in records {
            // Volume 0 is rejected when a number is deserialized, but records
            // can still be built by hand.
            if record.number.volume == 0 {
                tracing::warn!(name = %record.name, "record with volume 0 left out of the index");
                continue;
            }
            volumes
                .entry(record.number.volume)
                .or_default()
                .push(record.number.page.clone());
            numbers.insert(record.number.clone());
        }

        for pages in volumes.values_mut() {
            pages.sort_by_cached_key(Page::sort_key);
        }

        let max_volume = volumes.keys().next_back().copied().unwrap_or(0);

        tracing::debug!(
            max_volume,
            volumes = volumes.len(),
            records = records.len(),
            distinct_numbers = numbers.len(),
            "built volume index"
        );

        Self {
            volumes,
            max_volume,
            numbers,
        }
    }

    /// Highest volume number in the corpus (0 for an empty corpus).
    pub fn max_volume(&self) -> u32 {
        self.max_volume
    }

    /// Sorted starting pages of `volume`, or `None` when the volume lies
    /// outside `1..=max_volume`.
    pub fn pages(&self, volume: u32) -> Option<&[Page]> {
        if volume == 0 || volume > self.max_volume {
            return None;
        }
        Some(self.volumes.get(&volume).map(Vec::as_slice).unwrap_or_default())
    }

    /// Whether a record with exactly this number exists.
    pub fn contains(&self, number: &CaseNumber) -> bool {
        self.numbers.contains(number)
    }

    /// Number of distinct record numbers.
    pub fn len(&self) -> usize {
        self.numbers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.numbers.is_empty()
    }

    /// Record count per non-empty volume, in volume order.
    pub fn volume_counts(&self) -> BTreeMap<u32, usize> {
        self.volumes
            .iter()
            .map(|(&volume, pages)| (volume, pages.len()))
            .collect()
    }
}
