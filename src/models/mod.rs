//! Exam timetabling domain models.
//!
//! Provides the data types flowing through a planning run, each an
//! immutable snapshot derived from the previous one.
//!
//! # Pipeline
//!
//! | Model | Derived from | Meaning |
//! |-------|--------------|---------|
//! | Enrollment | ingestion records | student ↔ subject relation |
//! | ConflictGraph | Enrollment | subjects sharing a student |
//! | Schedule | ConflictGraph | subject → slot |
//! | CalendarAssignment | Schedule + CalendarConfig | subject → (date, session) |

mod calendar;
mod conflict_graph;
mod enrollment;
mod schedule;

pub use calendar::{to_calendar, CalendarAssignment, CalendarConfig, CalendarSlot};
pub use conflict_graph::{ConflictEdge, ConflictGraph};
pub use enrollment::{Enrollment, EnrollmentRecord, StudentId, SubjectId};
pub use schedule::{Schedule, Slot};
