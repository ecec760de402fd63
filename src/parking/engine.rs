use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use tracing::{debug, warn};

use super::cache::DescriptionCache;
use super::model::{merge, AvailabilityRecord, LotDescription, MergedLotStatus};
use super::source::ParkingSource;

/// Lookup, filter and join operations over the cached descriptions and
/// fresh availability.
///
/// No operation returns an error. Upstream failures surface as empty
/// results and a `warn!` diagnostic.
pub struct QueryEngine {
    source: Arc<dyn ParkingSource>,
    cache: DescriptionCache,
}

impl QueryEngine {
    pub fn new(source: Arc<dyn ParkingSource>) -> Self {
        Self::with_cache(source, DescriptionCache::new())
    }

    pub fn with_cache(source: Arc<dyn ParkingSource>, cache: DescriptionCache) -> Self {
        Self { source, cache }
    }

    pub fn cache(&self) -> &DescriptionCache {
        &self.cache
    }

    /// Fetch the description list, de-duplicated by id (first record wins).
    /// Any upstream failure yields an empty list.
    pub async fn fetch_descriptions(&self) -> Vec<LotDescription> {
        match self.source.descriptions().await {
            Ok(lots) => dedup_by_id(lots),
            Err(e) => {
                warn!(error = %e, "description fetch failed; treating as no records");
                Vec::new()
            }
        }
    }

    /// Fetch current availability. Never cached. Any upstream failure
    /// yields an empty list.
    pub async fn fetch_availability(&self) -> Vec<AvailabilityRecord> {
        match self.source.availability().await {
            Ok(records) => records,
            Err(e) => {
                warn!(error = %e, "availability fetch failed; treating as no records");
                Vec::new()
            }
        }
    }

    /// Cached descriptions, fetched on a cache miss.
    pub async fn ensure_descriptions(&self) -> Arc<Vec<LotDescription>> {
        self.cache.get_or_fetch(|| self.fetch_descriptions()).await
    }

    /// Lots whose area contains `area`.
    pub async fn filter_by_area(&self, area: &str) -> Vec<LotDescription> {
        self.ensure_descriptions()
            .await
            .iter()
            .filter(|lot| lot.in_area(area))
            .cloned()
            .collect()
    }

    /// Lots whose name or address contains `keyword`.
    pub async fn search_by_keyword(&self, keyword: &str) -> Vec<LotDescription> {
        self.ensure_descriptions()
            .await
            .iter()
            .filter(|lot| lot.matches_keyword(keyword))
            .cloned()
            .collect()
    }

    /// Description and live availability for one lot.
    ///
    /// Returns `None` for an unknown id without touching the availability
    /// endpoint.
    pub async fn get_full_status(&self, id: &str) -> Option<MergedLotStatus> {
        let descriptions = self.ensure_descriptions().await;
        let description = descriptions.iter().find(|lot| lot.id == id)?;

        let availability = self.fetch_availability().await;
        let record = availability.iter().find(|a| a.id == id);
        if record.is_none() {
            debug!(id, "no availability record for lot");
        }
        Some(merge(description, record))
    }

    /// Every lot in `area` joined with one availability fetch.
    pub async fn get_area_availability(&self, area: &str) -> Vec<MergedLotStatus> {
        let lots = self.filter_by_area(area).await;
        self.join_availability(&lots).await
    }

    /// Every cached lot joined with one availability fetch.
    pub async fn all_availability(&self) -> Vec<MergedLotStatus> {
        let lots = self.ensure_descriptions().await;
        self.join_availability(&lots).await
    }

    async fn join_availability(&self, lots: &[LotDescription]) -> Vec<MergedLotStatus> {
        if lots.is_empty() {
            return Vec::new();
        }

        let availability = self.fetch_availability().await;
        let by_id = index_by_id(&availability);

        lots.iter()
            .map(|lot| merge(lot, by_id.get(lot.id.as_str()).copied()))
            .collect()
    }
}

fn dedup_by_id(lots: Vec<LotDescription>) -> Vec<LotDescription> {
    let mut seen = HashSet::with_capacity(lots.len());
    let total = lots.len();
    let unique: Vec<_> = lots
        .into_iter()
        .filter(|lot| seen.insert(lot.id.clone()))
        .collect();
    if unique.len() < total {
        warn!(dropped = total - unique.len(), "duplicate lot ids in description feed; kept first");
    }
    unique
}

/// Map of id to the first availability record carrying it.
fn index_by_id(records: &[AvailabilityRecord]) -> HashMap<&str, &AvailabilityRecord> {
    let mut map = HashMap::with_capacity(records.len());
    for record in records {
        map.entry(record.id.as_str()).or_insert(record);
    }
    map
}
