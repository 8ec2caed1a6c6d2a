// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

use super::fixed::FixedTimeZoneRules;
use super::provider::TimeZoneRulesProvider;
use super::rules::TimeZoneRules;
use crate::error::Error;
use crate::instant::Instant;
use crate::offset::UtcOffset;
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

#[derive(Clone, PartialEq, Eq, Hash)]
enum ZoneId {
    Region(Arc<str>),
    Fixed(UtcOffset),
}

/// A time zone: a fixed offset or a named region, with its rules resolved.
///
/// Region rules are looked up once, when the zone is built, through an
/// explicit [`TimeZoneRulesProvider`]. Zones compare and hash by id only.
#[derive(Clone)]
pub struct TimeZone {
    id: ZoneId,
    rules: Arc<dyn TimeZoneRules>,
}

impl TimeZone {
    pub fn utc() -> TimeZone {
        TimeZone::fixed(UtcOffset::UTC)
    }

    pub fn fixed(offset: UtcOffset) -> TimeZone {
        TimeZone {
            id: ZoneId::Fixed(offset),
            rules: Arc::new(FixedTimeZoneRules::new(offset)),
        }
    }

    /// Resolves a region through `provider`.
    pub fn region(region_id: &str, provider: &dyn TimeZoneRulesProvider) -> Result<TimeZone, Error> {
        let rules = provider.rules_for(region_id)?;
        Ok(TimeZone::with_rules(region_id, rules))
    }

    /// A region backed by already resolved rules.
    pub fn with_rules(region_id: &str, rules: Arc<dyn TimeZoneRules>) -> TimeZone {
        TimeZone {
            id: ZoneId::Region(Arc::from(region_id)),
            rules,
        }
    }

    /// Parses a zone id: `Z` and offsets such as `+05:30` give fixed zones;
    /// anything else is a region and needs a provider, failing with
    /// [`Error::NoRulesProvider`] without one.
    pub fn of(id: &str, provider: Option<&dyn TimeZoneRulesProvider>) -> Result<TimeZone, Error> {
        if id.starts_with(['Z', 'z', '+', '-']) {
            return Ok(TimeZone::fixed(id.parse()?));
        }
        if id.is_empty() {
            return Err(Error::parse("TimeZone", id, "empty zone id"));
        }
        match provider {
            Some(provider) => TimeZone::region(id, provider),
            None => Err(Error::NoRulesProvider {
                region: id.to_owned(),
            }),
        }
    }

    /// The region id, or the offset text for a fixed zone.
    pub fn id(&self) -> String {
        match &self.id {
            ZoneId::Region(region) => region.to_string(),
            ZoneId::Fixed(offset) => offset.to_string(),
        }
    }

    pub fn region_id(&self) -> Option<&str> {
        match &self.id {
            ZoneId::Region(region) => Some(region),
            ZoneId::Fixed(_) => None,
        }
    }

    pub fn fixed_offset(&self) -> Option<UtcOffset> {
        match self.id {
            ZoneId::Fixed(offset) => Some(offset),
            ZoneId::Region(_) => None,
        }
    }

    pub fn is_fixed(&self) -> bool {
        self.fixed_offset().is_some()
    }

    pub fn rules(&self) -> &dyn TimeZoneRules {
        &*self.rules
    }

    /// Replaces a region whose rules never change offset by the equivalent
    /// fixed zone.
    pub fn normalized(&self) -> TimeZone {
        match self.id {
            ZoneId::Region(_) if self.rules.has_fixed_offset() => {
                TimeZone::fixed(self.rules.offset_at(Instant::UNIX_EPOCH))
            }
            _ => self.clone(),
        }
    }
}

impl PartialEq for TimeZone {
    fn eq(&self, other: &TimeZone) -> bool {
        self.id == other.id
    }
}

impl Eq for TimeZone {}

impl Hash for TimeZone {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl PartialOrd for TimeZone {
    fn partial_cmp(&self, other: &TimeZone) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for TimeZone {
    /// Fixed zones by offset, then regions by id text.
    fn cmp(&self, other: &TimeZone) -> Ordering {
        match (&self.id, &other.id) {
            (ZoneId::Fixed(a), ZoneId::Fixed(b)) => a.cmp(b),
            (ZoneId::Fixed(_), ZoneId::Region(_)) => Ordering::Less,
            (ZoneId::Region(_), ZoneId::Fixed(_)) => Ordering::Greater,
            (ZoneId::Region(a), ZoneId::Region(b)) => a.cmp(b),
        }
    }
}

impl fmt::Debug for TimeZone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("TimeZone").field(&self.id()).finish()
    }
}

impl fmt::Display for TimeZone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.id())
    }
}
