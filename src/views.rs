//! Structured report views.
//!
//! Read-only projections of a plan for export and display layers. They
//! return typed rows in a fixed order; formatting dates and "session N"
//! labels is left to the consumer.

use chrono::NaiveDate;
use serde::Serialize;

use crate::models::{
    CalendarAssignment, ConflictEdge, ConflictGraph, Enrollment, Schedule, Slot, StudentId,
    SubjectId,
};

/// One exam in the day-by-day timetable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DayScheduleRow {
    /// Exam date.
    pub date: NaiveDate,
    /// Session within the day (1-based).
    pub session: u32,
    /// Underlying slot.
    pub slot: Slot,
    /// Examined subject.
    pub subject: SubjectId,
    /// Students sitting the exam.
    pub student_count: usize,
}

/// One exam in the slot-by-slot timetable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SlotScheduleRow {
    /// Assigned slot.
    pub slot: Slot,
    /// Examined subject.
    pub subject: SubjectId,
    /// Students sitting the exam.
    pub student_count: usize,
}

/// One (student, subject) line of the per-student timetable.
///
/// Placement fields are `None` for subjects without a slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentScheduleRow {
    /// Student identifier.
    pub student_id: StudentId,
    /// Display name, if known.
    pub student_name: Option<String>,
    /// Enrolled subject.
    pub subject: SubjectId,
    /// Assigned slot.
    pub slot: Option<Slot>,
    /// Exam date.
    pub date: Option<NaiveDate>,
    /// Session within the day (1-based).
    pub session: Option<u32>,
}

/// A colored node of the conflict graph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GraphNode {
    /// Subject identifier.
    pub id: SubjectId,
    /// Slot used as the node color; `None` if unscheduled.
    pub slot: Option<Slot>,
}

/// Conflict graph with slot colors, for visualization.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct GraphView {
    /// One node per subject, in identifier order.
    pub nodes: Vec<GraphNode>,
    /// Each conflict once, `source < target`.
    pub edges: Vec<ConflictEdge>,
}

/// Exams ordered by date, session, then subject.
///
/// Subjects sharing a slot each get their own row.
pub fn schedule_by_day(
    enrollment: &Enrollment,
    schedule: &Schedule,
    calendar: &CalendarAssignment,
) -> Vec<DayScheduleRow> {
    let mut rows: Vec<DayScheduleRow> = schedule
        .iter()
        .filter_map(|(subject, slot)| {
            calendar.get(subject).map(|placed| DayScheduleRow {
                date: placed.date,
                session: placed.session,
                slot,
                subject: subject.to_string(),
                student_count: enrollment.student_count(subject),
            })
        })
        .collect();
    rows.sort_by(|a, b| {
        (a.date, a.session, &a.subject).cmp(&(b.date, b.session, &b.subject))
    });
    rows
}

/// Exams ordered by slot, then by student count (largest first), then subject.
pub fn schedule_by_slot(enrollment: &Enrollment, schedule: &Schedule) -> Vec<SlotScheduleRow> {
    let mut rows: Vec<SlotScheduleRow> = schedule
        .iter()
        .map(|(subject, slot)| SlotScheduleRow {
            slot,
            subject: subject.to_string(),
            student_count: enrollment.student_count(subject),
        })
        .collect();
    rows.sort_by(|a, b| {
        a.slot
            .cmp(&b.slot)
            .then_with(|| b.student_count.cmp(&a.student_count))
            .then_with(|| a.subject.cmp(&b.subject))
    });
    rows
}

/// Per-student timetable, optionally filtered.
///
/// `search` matches case-insensitively against the student ID or display
/// name. Rows are ordered by student ID, then subject.
pub fn student_schedule(
    enrollment: &Enrollment,
    schedule: &Schedule,
    calendar: &CalendarAssignment,
    search: Option<&str>,
) -> Vec<StudentScheduleRow> {
    let needle = search
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_lowercase);

    let mut rows = Vec::new();
    for (student, subjects) in enrollment.student_subjects() {
        let name = enrollment.student_name(student);
        if let Some(needle) = &needle {
            let id_hit = student.to_lowercase().contains(needle.as_str());
            let name_hit = name.is_some_and(|n| n.to_lowercase().contains(needle.as_str()));
            if !id_hit && !name_hit {
                continue;
            }
        }

        for subject in subjects {
            let placed = calendar.get(subject);
            rows.push(StudentScheduleRow {
                student_id: student.clone(),
                student_name: name.map(str::to_string),
                subject: subject.clone(),
                slot: schedule.slot_of(subject),
                date: placed.map(|p| p.date),
                session: placed.map(|p| p.session),
            });
        }
    }
    rows
}

/// Conflict graph nodes colored by slot, each edge listed once.
pub fn graph_view(graph: &ConflictGraph, schedule: &Schedule) -> GraphView {
    GraphView {
        nodes: graph
            .subjects()
            .map(|s| GraphNode {
                id: s.to_string(),
                slot: schedule.slot_of(s),
            })
            .collect(),
        edges: graph.edges(),
    }
}
