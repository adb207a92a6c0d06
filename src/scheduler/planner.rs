//! End-to-end exam planning.
//!
//! Runs the pipeline Enrollment → ConflictGraph → Schedule →
//! CalendarAssignment, then re-validates the schedule against the
//! enrollment. Each stage produces a new value; nothing is mutated in
//! place, so independent plans may run concurrently.

use log::{error, info};
use std::time::Instant;

use super::{DsaturScheduler, ScheduleStats};
use crate::error::{Error, Result};
use crate::models::{
    to_calendar, CalendarAssignment, CalendarConfig, ConflictGraph, Enrollment, Schedule,
};
use crate::validation::validate;

/// Output of one planning run.
#[derive(Debug, Clone, PartialEq)]
pub struct ExamPlan {
    /// Conflict graph of the planned enrollment.
    pub graph: ConflictGraph,
    /// Subject → slot coloring.
    pub schedule: Schedule,
    /// Subject → (date, session) under `config`.
    pub calendar: CalendarAssignment,
    /// Summary statistics under `config`.
    pub stats: ScheduleStats,
    /// Calendar configuration the plan was laid out with.
    pub config: CalendarConfig,
}

impl ExamPlan {
    /// Re-derives the calendar and statistics under a new configuration.
    ///
    /// The schedule is kept as is; calendar changes never re-color.
    pub fn with_calendar(&self, config: CalendarConfig) -> Result<Self> {
        config.validate()?;
        let calendar = to_calendar(&self.schedule, &config)?;
        let total_slots = self.schedule.total_slots();
        let stats = ScheduleStats {
            total_days: config.days_needed(total_slots)?,
            sessions_per_day: config.sessions_per_day,
            ..self.stats.clone()
        };
        Ok(Self {
            graph: self.graph.clone(),
            schedule: self.schedule.clone(),
            calendar,
            stats,
            config,
        })
    }
}

/// Builds complete exam plans from enrollment snapshots.
///
/// # Example
///
/// ```
/// use chrono::NaiveDate;
/// use exam_schedule::models::{CalendarConfig, Enrollment};
/// use exam_schedule::scheduler::ExamPlanner;
///
/// let enrollment = Enrollment::from_pairs(vec![
///     ("S1", "A"), ("S1", "B"),
///     ("S2", "B"), ("S2", "C"),
/// ]);
/// let config = CalendarConfig::new(2, NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()).unwrap();
///
/// let plan = ExamPlanner::new(config).plan(&enrollment).unwrap();
/// assert_eq!(plan.stats.total_slots, 2);
/// assert_eq!(plan.stats.total_days, 1);
/// assert_eq!(plan.calendar.get("B").unwrap().session, 1);
/// ```
#[derive(Debug, Clone)]
pub struct ExamPlanner {
    config: CalendarConfig,
    scheduler: DsaturScheduler,
}

impl ExamPlanner {
    /// Creates a planner with the given calendar configuration.
    pub fn new(config: CalendarConfig) -> Self {
        Self {
            config,
            scheduler: DsaturScheduler::new(),
        }
    }

    /// Calendar configuration in use.
    pub fn config(&self) -> &CalendarConfig {
        &self.config
    }

    /// Plans an exam period for an enrollment snapshot.
    ///
    /// # Errors
    /// - [`Error::InvalidSessionsPerDay`] before any work is done.
    /// - [`Error::InconsistentSchedule`] if the colored schedule fails
    ///   validation, which indicates a defect rather than bad data.
    /// - [`Error::DateOutOfRange`] if the last slot cannot be dated.
    pub fn plan(&self, enrollment: &Enrollment) -> Result<ExamPlan> {
        self.config.validate()?;
        let start_time = Instant::now();
        info!(
            "Planning exams for {} students, {} subjects, {} enrollments...",
            enrollment.num_students(),
            enrollment.num_subjects(),
            enrollment.num_pairs()
        );

        let graph = ConflictGraph::build(enrollment);
        info!("Conflict graph built with {} edges.", graph.num_edges());

        let schedule = self.scheduler.color_graph(&graph);

        ensure_consistent(enrollment, &schedule)?;

        let calendar = to_calendar(&schedule, &self.config)?;
        let stats = ScheduleStats::calculate(enrollment, &graph, &schedule, &self.config)?;
        info!(
            "Plan ready in {:.2?}: {} slots over {} day(s).",
            start_time.elapsed(),
            stats.total_slots,
            stats.total_days
        );

        Ok(ExamPlan {
            graph,
            schedule,
            calendar,
            stats,
            config: self.config.clone(),
        })
    }
}

/// Fails with [`Error::InconsistentSchedule`] if any student holds two
/// exams in one slot.
///
/// Applied to the scheduler's own output, a failure here is a defect in
/// graph construction or coloring, never a data problem.
pub fn ensure_consistent(enrollment: &Enrollment, schedule: &Schedule) -> Result<()> {
    let report = validate(enrollment, schedule);
    if report.is_empty() {
        return Ok(());
    }
    for conflict in report.conflicts() {
        error!(
            "student {} holds {:?} in shared slot(s) {:?}",
            conflict.student_id, conflict.clashing_subjects, conflict.duplicated_slots
        );
    }
    Err(Error::InconsistentSchedule(report))
}

impl Default for ExamPlanner {
    fn default() -> Self {
        Self::new(CalendarConfig::default())
    }
}
