// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Time zones, their offset rules, and where rules come from.
//!
//! | Type | Role |
//! |------|------|
//! | [`TimeZoneRules`] | Offset lookups for one zone, including gaps and overlaps |
//! | [`TimeZoneOffsetTransition`] | One discontinuity in a zone's offset |
//! | [`FixedTimeZoneRules`] | A zone that never changes offset |
//! | [`RecurringRules`] | Standard time plus yearly daylight saving |
//! | [`TransitionTableRules`] | Historical changes, optionally continued by recurring rules |
//! | [`TimeZoneRulesProvider`] | Resolves region ids to rules |
//! | [`TimeZone`] | A fixed or region zone with its rules resolved |

mod fixed;
mod provider;
mod recurring;
mod rules;
mod table;
mod zone;

pub use fixed::FixedTimeZoneRules;
pub use provider::{CachingProvider, InMemoryProvider, TimeZoneRulesProvider};
pub use recurring::{DaylightSaving, RecurringRules, RuleDay, TransitionClock, TransitionRule};
pub use rules::{TimeZoneOffsetTransition, TimeZoneRules};
pub use table::{OffsetChange, TransitionTableRules};
pub use zone::TimeZone;
