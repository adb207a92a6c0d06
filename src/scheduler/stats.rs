//! Schedule summary statistics.
//!
//! # Metrics
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | Students | Distinct enrolled students |
//! | Subjects | Distinct subjects |
//! | Conflict edges | Half the sum of adjacency sizes |
//! | Total slots | Largest assigned slot |
//! | Total days | ceil(total slots / sessions per day) |

use serde::Serialize;

use crate::error::Result;
use crate::models::{CalendarConfig, ConflictGraph, Enrollment, Schedule, Slot};

/// Summary of a scheduling run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleStats {
    /// Distinct enrolled students.
    pub student_count: usize,
    /// Distinct subjects.
    pub subject_count: usize,
    /// Undirected conflict edges.
    pub conflict_edge_count: usize,
    /// Largest assigned slot (0 when nothing is scheduled).
    pub total_slots: Slot,
    /// Exam days needed for `total_slots`.
    pub total_days: u32,
    /// Sessions per day used to compute `total_days`.
    pub sessions_per_day: u32,
}

impl ScheduleStats {
    /// Computes statistics for a schedule.
    ///
    /// Fails only on an invalid calendar configuration.
    pub fn calculate(
        enrollment: &Enrollment,
        graph: &ConflictGraph,
        schedule: &Schedule,
        config: &CalendarConfig,
    ) -> Result<Self> {
        let total_slots = schedule.total_slots();
        Ok(Self {
            student_count: enrollment.num_students(),
            subject_count: enrollment.num_subjects(),
            conflict_edge_count: graph.num_edges(),
            total_slots,
            total_days: config.days_needed(total_slots)?,
            sessions_per_day: config.sessions_per_day,
        })
    }

    /// Conflict-graph density: edges / possible edges (0.0 for < 2 subjects).
    pub fn conflict_density(&self) -> f64 {
        let n = self.subject_count;
        if n < 2 {
            return 0.0;
        }
        let possible = n * (n - 1) / 2;
        self.conflict_edge_count as f64 / possible as f64
    }
}
