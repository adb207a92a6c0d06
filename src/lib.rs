//! Exam timetabling core.
//!
//! Assigns each subject an exam slot so that no two subjects sharing an
//! enrolled student sit in the same slot, using as few slots as the DSatur
//! heuristic finds, then lays the slots out over a day/session calendar.
//!
//! # Modules
//!
//! - **`models`**: Domain types — `Enrollment`, `ConflictGraph`, `Schedule`,
//!   `CalendarConfig`, `CalendarAssignment`
//! - **`scheduler`**: `DsaturScheduler`, `ExamPlanner`, `ScheduleStats`
//! - **`validation`**: Independent per-student conflict check
//! - **`views`**: Ordered report rows for export and display layers
//!
//! # Architecture
//!
//! Every stage is a pure function from one immutable snapshot to the next.
//! Ingestion (spreadsheets), export, and presentation live outside this
//! crate; they supply `EnrollmentRecord`s and consume the structured
//! outputs. Logging goes through the `log` facade; the host picks a logger.
//!
//! # References
//!
//! - Brélaz (1979), "New Methods to Color the Vertices of a Graph"
//! - Carter, Laporte & Lee (1996), "Examination Timetabling: Algorithmic
//!   Strategies and Applications"

pub mod error;
pub mod models;
pub mod scheduler;
pub mod validation;
pub mod views;

pub use error::{Error, Result};
