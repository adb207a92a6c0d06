//! Conflict validation for exam schedules.
//!
//! Checks a schedule directly against the enrollment relation: for every
//! student, the slots of all enrolled (and scheduled) subjects must be
//! pairwise distinct. The check never consults the conflict graph or the
//! scheduler, so it also catches faulty graph construction and manual
//! overrides.
//!
//! Subjects without a slot are ignored; completeness is a separate
//! property (see [`Schedule::is_complete`]).

use log::trace;
use serde::Serialize;
use std::collections::BTreeMap;

use crate::models::{Enrollment, Schedule, Slot, StudentId, SubjectId};

/// A student holding two or more exams in the same slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentConflict {
    /// Affected student.
    pub student_id: StudentId,
    /// Display name, if the enrollment carried one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub student_name: Option<String>,
    /// Slots holding more than one of the student's exams, ascending.
    pub duplicated_slots: Vec<Slot>,
    /// The student's subjects that sit in a duplicated slot.
    pub clashing_subjects: Vec<SubjectId>,
}

/// Result of validating a schedule. Empty iff conflict-free.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ConflictReport {
    conflicts: Vec<StudentConflict>,
}

impl ConflictReport {
    /// Whether the schedule respects every student's enrollment.
    pub fn is_empty(&self) -> bool {
        self.conflicts.is_empty()
    }

    /// Number of affected students.
    pub fn len(&self) -> usize {
        self.conflicts.len()
    }

    /// Conflicts, ordered by student ID.
    pub fn conflicts(&self) -> &[StudentConflict] {
        &self.conflicts
    }

    /// Conflict entry for one student.
    pub fn for_student(&self, student_id: &str) -> Option<&StudentConflict> {
        self.conflicts.iter().find(|c| c.student_id == student_id)
    }
}

/// Validates a schedule against an enrollment.
///
/// # Returns
/// A report listing every student whose scheduled subjects share a slot,
/// with the duplicated slot values. An empty report certifies the schedule.
pub fn validate(enrollment: &Enrollment, schedule: &Schedule) -> ConflictReport {
    let mut conflicts = Vec::new();

    for (student, subjects) in enrollment.student_subjects() {
        let mut by_slot: BTreeMap<Slot, Vec<&SubjectId>> = BTreeMap::new();
        for subject in subjects {
            if let Some(slot) = schedule.slot_of(subject) {
                by_slot.entry(slot).or_default().push(subject);
            }
        }

        let scheduled: usize = by_slot.values().map(Vec::len).sum();
        if scheduled == by_slot.len() {
            continue;
        }

        let mut duplicated_slots = Vec::new();
        let mut clashing_subjects = Vec::new();
        for (slot, in_slot) in by_slot.into_iter().filter(|(_, s)| s.len() > 1) {
            duplicated_slots.push(slot);
            clashing_subjects.extend(in_slot.into_iter().cloned());
        }

        trace!(
            "student {} has clashing exams in slot(s) {:?}",
            student,
            duplicated_slots
        );
        conflicts.push(StudentConflict {
            student_id: student.clone(),
            student_name: enrollment.student_name(student).map(str::to_string),
            duplicated_slots,
            clashing_subjects,
        });
    }

    ConflictReport { conflicts }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ConflictGraph, EnrollmentRecord};
    use crate::scheduler::DsaturScheduler;
    use rand::rngs::SmallRng;
    use rand::{Rng, SeedableRng};

    fn sample_enrollment() -> Enrollment {
        Enrollment::from_records(vec![
            EnrollmentRecord::new("S1", "A").with_name("Alice"),
            EnrollmentRecord::new("S1", "B"),
            EnrollmentRecord::new("S2", "B").with_name("Bob"),
            EnrollmentRecord::new("S2", "C"),
        ])
    }

    #[test]
    fn test_valid_schedule() {
        let schedule = Schedule::from_assignments(vec![("A", 2), ("B", 1), ("C", 2)]);
        let report = validate(&sample_enrollment(), &schedule);
        assert!(report.is_empty());
    }

    #[test]
    fn test_override_detected() {
        let schedule = Schedule::from_assignments(vec![("A", 2), ("B", 1), ("C", 2)]);
        let broken = schedule.with_override("C", 1);
        let report = validate(&sample_enrollment(), &broken);

        assert_eq!(report.len(), 1);
        let c = report.for_student("S2").unwrap();
        assert_eq!(c.student_name.as_deref(), Some("Bob"));
        assert_eq!(c.duplicated_slots, vec![1]);
        assert_eq!(c.clashing_subjects, vec!["B".to_string(), "C".to_string()]);
        assert!(report.for_student("S1").is_none());
    }

    #[test]
    fn test_multiple_duplicated_slots() {
        let e = Enrollment::from_pairs(vec![
            ("S1", "A"),
            ("S1", "B"),
            ("S1", "C"),
            ("S1", "D"),
            ("S1", "E"),
        ]);
        let schedule =
            Schedule::from_assignments(vec![("A", 1), ("B", 1), ("C", 2), ("D", 2), ("E", 3)]);
        let report = validate(&e, &schedule);
        let c = report.for_student("S1").unwrap();
        assert_eq!(c.duplicated_slots, vec![1, 2]);
        assert_eq!(c.clashing_subjects.len(), 4);
    }

    #[test]
    fn test_unscheduled_subjects_ignored() {
        let schedule = Schedule::from_assignments(vec![("B", 1)]);
        let report = validate(&sample_enrollment(), &schedule);
        assert!(report.is_empty());
    }

    #[test]
    fn test_empty_inputs() {
        assert!(validate(&Enrollment::new(), &Schedule::new()).is_empty());
        assert!(validate(&sample_enrollment(), &Schedule::new()).is_empty());
    }

    #[test]
    fn test_all_in_one_slot() {
        let schedule = Schedule::from_assignments(vec![("A", 1), ("B", 1), ("C", 1)]);
        let report = validate(&sample_enrollment(), &schedule);
        assert_eq!(report.len(), 2);
        let students: Vec<&str> = report
            .conflicts()
            .iter()
            .map(|c| c.student_id.as_str())
            .collect();
        assert_eq!(students, vec!["S1", "S2"]);
    }

    #[test]
    fn test_random_overrides_match_coloring_check() {
        let mut rng = SmallRng::seed_from_u64(17);
        let mut broken = 0;
        for _ in 0..50 {
            let mut pairs = Vec::new();
            for st in 0..40 {
                for _ in 0..rng.random_range(1..=4) {
                    let sub = rng.random_range(0..15);
                    pairs.push((format!("S{st:03}"), format!("SUB{sub:02}")));
                }
            }
            let e = Enrollment::from_pairs(pairs);
            let g = ConflictGraph::build(&e);
            let schedule = DsaturScheduler::new().color_graph(&g);
            assert!(validate(&e, &schedule).is_empty());

            let subjects: Vec<&str> = g.subjects().collect();
            let subject = subjects[rng.random_range(0..subjects.len())];
            let slot = rng.random_range(1..=schedule.total_slots());
            let overridden = schedule.with_override(subject, slot);

            let report = validate(&e, &overridden);
            assert_eq!(report.is_empty(), overridden.is_proper_coloring(&g));
            if !report.is_empty() {
                broken += 1;
            }
        }
        // Most moves land on a neighbor's slot.
        assert!(broken > 0);
    }
}
