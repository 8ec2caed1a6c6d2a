// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Sources of region rules.
//!
//! Nothing in this crate reaches for a global rules registry: every
//! operation that needs a region's rules takes a
//! [`TimeZoneRulesProvider`] explicitly.
//!
//! | Provider | Behaviour |
//! |----------|-----------|
//! | [`InMemoryProvider`] | A fixed map from region ids to rules |
//! | [`CachingProvider`] | Memoizes the lookups of another provider |

use super::rules::TimeZoneRules;
use crate::error::Error;
use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::sync::{Arc, PoisonError, RwLock};

/// Looks up rules by region id such as `"America/New_York"`.
pub trait TimeZoneRulesProvider: Send + Sync {
    /// Version of the rules data, empty when unversioned.
    fn database_version(&self) -> String {
        String::new()
    }

    fn available_region_ids(&self) -> BTreeSet<String>;

    fn has_rules_for(&self, region_id: &str) -> bool {
        self.available_region_ids().contains(region_id)
    }

    /// Fails with [`Error::RulesNotFound`] for an unknown region.
    fn rules_for(&self, region_id: &str) -> Result<Arc<dyn TimeZoneRules>, Error>;
}

impl<P: TimeZoneRulesProvider + ?Sized> TimeZoneRulesProvider for Arc<P> {
    fn database_version(&self) -> String {
        (**self).database_version()
    }

    fn available_region_ids(&self) -> BTreeSet<String> {
        (**self).available_region_ids()
    }

    fn has_rules_for(&self, region_id: &str) -> bool {
        (**self).has_rules_for(region_id)
    }

    fn rules_for(&self, region_id: &str) -> Result<Arc<dyn TimeZoneRules>, Error> {
        (**self).rules_for(region_id)
    }
}

/// Rules held in memory, keyed by region id.
#[derive(Debug, Clone, Default)]
pub struct InMemoryProvider {
    version: String,
    regions: BTreeMap<String, Arc<dyn TimeZoneRules>>,
}

impl InMemoryProvider {
    pub fn new(version: impl Into<String>) -> InMemoryProvider {
        InMemoryProvider {
            version: version.into(),
            regions: BTreeMap::new(),
        }
    }

    /// Adds or replaces a region.
    pub fn with_region(
        mut self,
        region_id: impl Into<String>,
        rules: impl TimeZoneRules + 'static,
    ) -> InMemoryProvider {
        self.insert(region_id, Arc::new(rules));
        self
    }

    pub fn insert(&mut self, region_id: impl Into<String>, rules: Arc<dyn TimeZoneRules>) {
        self.regions.insert(region_id.into(), rules);
    }
}

impl TimeZoneRulesProvider for InMemoryProvider {
    fn database_version(&self) -> String {
        self.version.clone()
    }

    fn available_region_ids(&self) -> BTreeSet<String> {
        self.regions.keys().cloned().collect()
    }

    fn has_rules_for(&self, region_id: &str) -> bool {
        self.regions.contains_key(region_id)
    }

    fn rules_for(&self, region_id: &str) -> Result<Arc<dyn TimeZoneRules>, Error> {
        self.regions
            .get(region_id)
            .cloned()
            .ok_or_else(|| Error::RulesNotFound {
                region: region_id.to_owned(),
            })
    }
}

/// Memoizes the rules another provider returns.
///
/// Concurrent misses for the same region may each consult the inner
/// provider; the last one to finish wins the cache slot.
#[derive(Debug)]
pub struct CachingProvider<P> {
    inner: P,
    cache: RwLock<HashMap<String, Arc<dyn TimeZoneRules>>>,
}

impl<P: TimeZoneRulesProvider> CachingProvider<P> {
    pub fn new(inner: P) -> CachingProvider<P> {
        CachingProvider {
            inner,
            cache: RwLock::default(),
        }
    }

    pub fn inner(&self) -> &P {
        &self.inner
    }

    /// Number of regions currently cached.
    pub fn cached_regions(&self) -> usize {
        self.cache.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    /// Drops every cached entry.
    pub fn reset(&self) {
        let mut cache = self.cache.write().unwrap_or_else(PoisonError::into_inner);
        info!("dropping {} cached time zone rules", cache.len());
        cache.clear();
    }
}

impl<P: TimeZoneRulesProvider> TimeZoneRulesProvider for CachingProvider<P> {
    fn database_version(&self) -> String {
        self.inner.database_version()
    }

    fn available_region_ids(&self) -> BTreeSet<String> {
        self.inner.available_region_ids()
    }

    fn has_rules_for(&self, region_id: &str) -> bool {
        self.cache
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .contains_key(region_id)
            || self.inner.has_rules_for(region_id)
    }

    fn rules_for(&self, region_id: &str) -> Result<Arc<dyn TimeZoneRules>, Error> {
        if let Some(rules) = self
            .cache
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(region_id)
        {
            return Ok(Arc::clone(rules));
        }
        debug!("time zone rules cache miss for {region_id}");
        let rules = self.inner.rules_for(region_id)?;
        self.cache
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(region_id.to_owned(), Arc::clone(&rules));
        Ok(rules)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::offset::UtcOffset;
    use crate::tz::fixed::FixedTimeZoneRules;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn provider() -> InMemoryProvider {
        InMemoryProvider::new("2026a")
            .with_region("Etc/UTC", FixedTimeZoneRules::UTC)
            .with_region(
                "Asia/Kolkata",
                FixedTimeZoneRules::new(UtcOffset::from_hms(5, 30, 0).unwrap()),
            )
    }

    #[derive(Debug)]
    struct Counting {
        inner: InMemoryProvider,
        lookups: AtomicUsize,
    }

    impl TimeZoneRulesProvider for Counting {
        fn available_region_ids(&self) -> BTreeSet<String> {
            self.inner.available_region_ids()
        }

        fn rules_for(&self, region_id: &str) -> Result<Arc<dyn TimeZoneRules>, Error> {
            self.lookups.fetch_add(1, Ordering::SeqCst);
            self.inner.rules_for(region_id)
        }
    }

    #[test]
    fn in_memory_lookup() {
        let provider = provider();
        assert_eq!(provider.database_version(), "2026a");
        assert!(provider.has_rules_for("Asia/Kolkata"));
        assert_eq!(
            provider.available_region_ids().into_iter().collect::<Vec<_>>(),
            vec!["Asia/Kolkata".to_owned(), "Etc/UTC".to_owned()]
        );
        assert_eq!(
            provider.rules_for("Mars/Olympus").unwrap_err(),
            Error::RulesNotFound {
                region: "Mars/Olympus".to_owned()
            }
        );
    }

    #[test]
    fn caching_consults_inner_once() {
        let caching = CachingProvider::new(Counting {
            inner: provider(),
            lookups: AtomicUsize::new(0),
        });
        let first = caching.rules_for("Asia/Kolkata").unwrap();
        let second = caching.rules_for("Asia/Kolkata").unwrap();
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(caching.inner().lookups.load(Ordering::SeqCst), 1);
        assert_eq!(caching.cached_regions(), 1);

        assert!(caching.rules_for("Nowhere").is_err());
        assert_eq!(caching.cached_regions(), 1);

        caching.reset();
        assert_eq!(caching.cached_regions(), 0);
        caching.rules_for("Asia/Kolkata").unwrap();
        assert_eq!(caching.inner().lookups.load(Ordering::SeqCst), 3);
    }

    #[test]
    fn shared_provider() {
        let shared: Arc<dyn TimeZoneRulesProvider> = Arc::new(provider());
        assert!(shared.has_rules_for("Etc/UTC"));
    }
}
