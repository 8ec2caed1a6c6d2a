// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Zones defined by an explicit history of offset changes.

use super::recurring::RecurringRules;
use super::rules::{TimeZoneOffsetTransition, TimeZoneRules};
use crate::error::Error;
use crate::instant::Instant;
use crate::offset::UtcOffset;

/// The offsets a zone switches to at `at`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct OffsetChange {
    pub at: Instant,
    pub offset: UtcOffset,
    pub standard_offset: UtcOffset,
}

/// Rules given by a table of historical changes, optionally continued by
/// recurring rules after the last entry.
///
/// A change that only alters the standard offset is recorded for
/// [`TimeZoneRules::standard_offset_at`] but is not a transition.
#[derive(Debug, Clone)]
pub struct TransitionTableRules {
    initial_offset: UtcOffset,
    initial_standard_offset: UtcOffset,
    changes: Vec<OffsetChange>,
    transitions: Vec<TimeZoneOffsetTransition>,
    tail: Option<RecurringRules>,
}

impl TransitionTableRules {
    /// `changes` must be in strictly increasing order of `at`.
    pub fn new(
        initial_offset: UtcOffset,
        initial_standard_offset: UtcOffset,
        changes: Vec<OffsetChange>,
        tail: Option<RecurringRules>,
    ) -> Result<TransitionTableRules, Error> {
        if changes.windows(2).any(|pair| pair[0].at >= pair[1].at) {
            return Err(Error::InvalidTransition {
                offset: "changes out of order".to_owned(),
            });
        }
        let mut transitions = Vec::with_capacity(changes.len());
        let mut previous = initial_offset;
        for change in &changes {
            if change.offset != previous {
                transitions.push(TimeZoneOffsetTransition::new(change.at, previous, change.offset)?);
            }
            previous = change.offset;
        }
        Ok(TransitionTableRules {
            initial_offset,
            initial_standard_offset,
            changes,
            transitions,
            tail,
        })
    }

    pub fn changes(&self) -> &[OffsetChange] {
        &self.changes
    }

    pub fn transitions(&self) -> &[TimeZoneOffsetTransition] {
        &self.transitions
    }

    // The recurring tail, when `instant` lies past the last change.
    fn tail_at(&self, instant: Instant) -> Option<&RecurringRules> {
        let tail = self.tail.as_ref()?;
        match self.changes.last() {
            Some(last) if instant <= last.at => None,
            _ => Some(tail),
        }
    }

    fn change_at(&self, instant: Instant) -> Option<&OffsetChange> {
        let index = self.changes.partition_point(|c| c.at <= instant);
        index.checked_sub(1).map(|i| &self.changes[i])
    }
}

impl TimeZoneRules for TransitionTableRules {
    fn offset_at(&self, instant: Instant) -> UtcOffset {
        if let Some(tail) = self.tail_at(instant) {
            return tail.offset_at(instant);
        }
        self.change_at(instant).map_or(self.initial_offset, |c| c.offset)
    }

    fn standard_offset_at(&self, instant: Instant) -> UtcOffset {
        if let Some(tail) = self.tail_at(instant) {
            return tail.standard_offset();
        }
        self.change_at(instant)
            .map_or(self.initial_standard_offset, |c| c.standard_offset)
    }

    fn next_transition(&self, instant: Instant) -> Option<TimeZoneOffsetTransition> {
        let index = self.transitions.partition_point(|t| t.instant() <= instant);
        if let Some(found) = self.transitions.get(index) {
            return Some(*found);
        }
        let tail = self.tail.as_ref()?;
        let from = self.changes.last().map_or(instant, |last| instant.max(last.at));
        tail.next_transition(from)
    }

    fn previous_transition(&self, instant: Instant) -> Option<TimeZoneOffsetTransition> {
        if let Some(tail) = self.tail_at(instant) {
            let found = tail.previous_transition(instant);
            let last = self.changes.last().map(|c| c.at);
            if let Some(t) = found.filter(|t| last.map_or(true, |at| t.instant() > at)) {
                return Some(t);
            }
        }
        let index = self.transitions.partition_point(|t| t.instant() < instant);
        index.checked_sub(1).map(|i| self.transitions[i])
    }

    fn has_fixed_offset(&self) -> bool {
        self.transitions.is_empty() && self.tail.as_ref().map_or(true, |t| t.has_fixed_offset())
    }
}
