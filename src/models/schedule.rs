//! Schedule (solution) model.
//!
//! A schedule maps each subject to an abstract exam slot. Slots are
//! positive integers; the coloring property requires that conflicting
//! subjects never share one. Calendar placement is derived separately.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::conflict_graph::ConflictGraph;
use super::enrollment::SubjectId;

/// An abstract exam period, numbered from 1.
pub type Slot = u32;

/// Subject → slot assignment.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Schedule {
    slots: BTreeMap<SubjectId, Slot>,
}

impl Schedule {
    /// Creates an empty schedule.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a schedule from explicit (subject, slot) assignments.
    pub fn from_assignments<I, S>(assignments: I) -> Self
    where
        I: IntoIterator<Item = (S, Slot)>,
        S: Into<String>,
    {
        Self {
            slots: assignments
                .into_iter()
                .map(|(subject, slot)| (subject.into(), slot))
                .collect(),
        }
    }

    /// Returns a copy with one subject manually reassigned.
    pub fn with_override(&self, subject: impl Into<String>, slot: Slot) -> Self {
        let mut slots = self.slots.clone();
        slots.insert(subject.into(), slot);
        Self { slots }
    }

    /// Slot of a subject, if assigned.
    pub fn slot_of(&self, subject: &str) -> Option<Slot> {
        self.slots.get(subject).copied()
    }

    /// Subjects sharing a slot, in identifier order.
    pub fn subjects_in_slot(&self, slot: Slot) -> Vec<&str> {
        self.slots
            .iter()
            .filter(|(_, s)| **s == slot)
            .map(|(subject, _)| subject.as_str())
            .collect()
    }

    /// Slot → subjects, both ordered.
    pub fn slot_groups(&self) -> BTreeMap<Slot, Vec<&str>> {
        let mut groups: BTreeMap<Slot, Vec<&str>> = BTreeMap::new();
        for (subject, &slot) in &self.slots {
            groups.entry(slot).or_default().push(subject.as_str());
        }
        groups
    }

    /// Iterates (subject, slot) in subject order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, Slot)> {
        self.slots.iter().map(|(s, &slot)| (s.as_str(), slot))
    }

    /// Number of slots used: the largest slot value (0 when empty).
    pub fn total_slots(&self) -> Slot {
        self.slots.values().copied().max().unwrap_or(0)
    }

    /// Whether every given subject has a slot.
    pub fn is_complete<'a>(&self, subjects: impl IntoIterator<Item = &'a str>) -> bool {
        subjects.into_iter().all(|s| self.slots.contains_key(s))
    }

    /// Whether no edge of `graph` joins two subjects in the same slot.
    ///
    /// Unassigned subjects never violate the property.
    pub fn is_proper_coloring(&self, graph: &ConflictGraph) -> bool {
        graph.edges().iter().all(|e| {
            match (self.slot_of(&e.source), self.slot_of(&e.target)) {
                (Some(a), Some(b)) => a != b,
                _ => true,
            }
        })
    }

    /// Number of assigned subjects.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}
