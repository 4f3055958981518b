//! Hosted-zone name resolution with a per-run cache.

use std::collections::HashMap;

use tracing::warn;

use awsops_core::{OpsError, Result};

use crate::dns::ZoneService;

/// Per-run cache of resolved zone IDs.
///
/// Owned by the upload driver's scope and passed in explicitly; there is
/// no process-wide state. Nothing invalidates entries short of process
/// exit, which is fine for a tool that runs for seconds.
#[derive(Debug, Default)]
pub struct ZoneCache {
    ids: HashMap<String, String>,
}

impl ZoneCache {
    /// Create an empty cache
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a previously resolved zone ID
    #[must_use]
    pub fn get(&self, zone_name: &str) -> Option<&str> {
        self.ids.get(zone_name).map(String::as_str)
    }

    /// Record a resolved zone ID
    pub fn insert(&mut self, zone_name: &str, zone_id: &str) {
        self.ids
            .insert(zone_name.to_string(), zone_id.to_string());
    }

    /// Number of cached resolutions
    #[must_use]
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Whether nothing has been resolved yet
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

/// Both spellings of a zone name: with and without the trailing dot
fn candidate_forms(zone_name: &str) -> [String; 2] {
    zone_name.strip_suffix('.').map_or_else(
        || [format!("{zone_name}."), zone_name.to_string()],
        |stripped| [zone_name.to_string(), stripped.to_string()],
    )
}

/// Resolve a zone name to its hosted-zone ID.
///
/// Tries an exact match against both name forms first, then falls back to
/// substring containment in either direction. The fallback is deliberately
/// loose and can pick a wrong zone when names overlap (`example.com` is
/// contained in `old-example.com.` too), so treat the result as best-effort,
/// not authoritative.
///
/// A miss is [`OpsError::ZoneNotFound`]. Errors from the zone listing are
/// logged and folded into the same not-found signal: a resolution failure
/// costs one row, never the run. Only successful resolutions are cached.
pub async fn resolve_zone_id<Z: ZoneService + ?Sized>(
    service: &Z,
    zone_name: &str,
    cache: &mut ZoneCache,
) -> Result<String> {
    if let Some(id) = cache.get(zone_name) {
        return Ok(id.to_string());
    }

    let not_found = || OpsError::ZoneNotFound {
        zone: zone_name.to_string(),
    };

    let zones = match service.list_zones().await {
        Ok(zones) => zones,
        Err(err) => {
            warn!(zone = zone_name, error = %err, "failed to list hosted zones");
            return Err(not_found());
        }
    };

    let candidates = candidate_forms(zone_name);

    let exact = zones
        .iter()
        .find(|zone| candidates.iter().any(|c| *c == zone.name));

    let resolved = exact.or_else(|| {
        zones.iter().find(|zone| {
            candidates
                .iter()
                .any(|c| zone.name.contains(c.as_str()) || c.contains(zone.name.as_str()))
        })
    });

    let id = resolved.map(|zone| zone.id.clone()).ok_or_else(not_found)?;
    cache.insert(zone_name, &id);

    Ok(id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use awsops_core::{ChangeBatch, ChangeReceipt, OpsError, Result, ZoneSummary};
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct FakeZones {
        zones: Vec<ZoneSummary>,
        fail_listing: bool,
        list_calls: AtomicUsize,
    }

    impl FakeZones {
        fn with_zones(pairs: &[(&str, &str)]) -> Self {
            Self {
                zones: pairs
                    .iter()
                    .map(|(id, name)| ZoneSummary {
                        id: (*id).to_string(),
                        name: (*name).to_string(),
                    })
                    .collect(),
                fail_listing: false,
                list_calls: AtomicUsize::new(0),
            }
        }

        fn failing() -> Self {
            Self {
                zones: Vec::new(),
                fail_listing: true,
                list_calls: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl ZoneService for FakeZones {
        async fn list_zones(&self) -> Result<Vec<ZoneSummary>> {
            self.list_calls.fetch_add(1, Ordering::SeqCst);
            if self.fail_listing {
                return Err(OpsError::Unauthorized {
                    message: "expired credentials".to_string(),
                });
            }
            Ok(self.zones.clone())
        }

        async fn apply_change(&self, _zone_id: &str, _batch: &ChangeBatch) -> Result<ChangeReceipt> {
            Ok(ChangeReceipt { change_id: None })
        }
    }

    #[tokio::test]
    async fn resolves_undotted_input_against_dotted_listing() {
        let fake = FakeZones::with_zones(&[("Z1", "example.com.")]);
        let mut cache = ZoneCache::new();
        let id = resolve_zone_id(&fake, "example.com", &mut cache).await.unwrap();
        assert_eq!(id, "Z1");
    }

    #[tokio::test]
    async fn resolves_dotted_input_against_dotted_listing() {
        let fake = FakeZones::with_zones(&[("Z1", "example.com.")]);
        let mut cache = ZoneCache::new();
        let id = resolve_zone_id(&fake, "example.com.", &mut cache).await.unwrap();
        assert_eq!(id, "Z1");
    }

    #[tokio::test]
    async fn exact_match_wins_over_containment() {
        // "example.com." is a substring of "old-example.com.", so the exact
        // scan must win even though the looser zone is listed first.
        let fake = FakeZones::with_zones(&[("Z0", "old-example.com."), ("Z1", "example.com.")]);
        let mut cache = ZoneCache::new();
        let id = resolve_zone_id(&fake, "example.com", &mut cache).await.unwrap();
        assert_eq!(id, "Z1");
    }

    #[tokio::test]
    async fn containment_fallback_is_loose_by_design() {
        let fake = FakeZones::with_zones(&[("Z2", "internal.example.com.")]);
        let mut cache = ZoneCache::new();
        let id = resolve_zone_id(&fake, "example.com", &mut cache).await.unwrap();
        assert_eq!(id, "Z2");
    }

    #[tokio::test]
    async fn unrelated_zones_do_not_resolve() {
        let fake = FakeZones::with_zones(&[("Z9", "other.org.")]);
        let mut cache = ZoneCache::new();
        let err = resolve_zone_id(&fake, "example.com", &mut cache).await.unwrap_err();
        assert!(matches!(err, OpsError::ZoneNotFound { .. }));
    }

    #[tokio::test]
    async fn listing_errors_fold_into_not_found() {
        let fake = FakeZones::failing();
        let mut cache = ZoneCache::new();
        let err = resolve_zone_id(&fake, "example.com", &mut cache).await.unwrap_err();
        assert!(matches!(err, OpsError::ZoneNotFound { .. }));
        assert!(cache.is_empty());
    }

    #[tokio::test]
    async fn cache_prevents_repeat_listings() {
        let fake = FakeZones::with_zones(&[("Z1", "example.com.")]);
        let mut cache = ZoneCache::new();

        resolve_zone_id(&fake, "example.com", &mut cache).await.unwrap();
        resolve_zone_id(&fake, "example.com", &mut cache).await.unwrap();

        assert_eq!(fake.list_calls.load(Ordering::SeqCst), 1);
        assert_eq!(cache.len(), 1);
    }

    #[tokio::test]
    async fn misses_are_not_cached() {
        let fake = FakeZones::with_zones(&[("Z9", "other.org.")]);
        let mut cache = ZoneCache::new();

        let _ = resolve_zone_id(&fake, "example.com", &mut cache).await;
        let _ = resolve_zone_id(&fake, "example.com", &mut cache).await;

        assert_eq!(fake.list_calls.load(Ordering::SeqCst), 2);
        assert!(cache.is_empty());
    }
}
