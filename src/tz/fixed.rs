// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

use super::rules::{TimeZoneOffsetTransition, TimeZoneRules};
use crate::datetime::DateTime;
use crate::duration::Duration;
use crate::instant::Instant;
use crate::offset::UtcOffset;

/// Rules for a zone that is always at one offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FixedTimeZoneRules {
    offset: UtcOffset,
}

impl FixedTimeZoneRules {
    pub const UTC: FixedTimeZoneRules = FixedTimeZoneRules::new(UtcOffset::UTC);

    #[inline]
    pub const fn new(offset: UtcOffset) -> FixedTimeZoneRules {
        FixedTimeZoneRules { offset }
    }

    #[inline]
    pub const fn offset(&self) -> UtcOffset {
        self.offset
    }
}

impl TimeZoneRules for FixedTimeZoneRules {
    fn offset_at(&self, _instant: Instant) -> UtcOffset {
        self.offset
    }

    fn standard_offset_at(&self, _instant: Instant) -> UtcOffset {
        self.offset
    }

    fn next_transition(&self, _instant: Instant) -> Option<TimeZoneOffsetTransition> {
        None
    }

    fn previous_transition(&self, _instant: Instant) -> Option<TimeZoneOffsetTransition> {
        None
    }

    fn has_fixed_offset(&self) -> bool {
        true
    }

    fn valid_offsets_at(&self, _date_time: DateTime) -> Vec<UtcOffset> {
        vec![self.offset]
    }

    fn transition_at(&self, _date_time: DateTime) -> Option<TimeZoneOffsetTransition> {
        None
    }

    fn offset_at_local(&self, _date_time: DateTime) -> UtcOffset {
        self.offset
    }

    fn is_valid_offset(&self, _date_time: DateTime, offset: UtcOffset) -> bool {
        offset == self.offset
    }

    fn is_daylight_savings_at(&self, _instant: Instant) -> bool {
        false
    }

    fn daylight_savings_at(&self, _instant: Instant) -> Duration {
        Duration::ZERO
    }
}
