//! Error types.
//!
//! Empty inputs are never errors; they produce empty outputs. What remains
//! is configuration rejected before any date arithmetic, calendar values
//! that cannot be represented, and the internal-consistency failure raised
//! when a freshly colored schedule does not survive validation.

use chrono::NaiveDate;
use thiserror::Error;

use crate::models::Slot;
use crate::validation::ConflictReport;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// `sessions_per_day` must be at least 1.
    #[error("invalid calendar configuration: sessions per day must be at least 1, got {0}")]
    InvalidSessionsPerDay(u32),

    /// Slots are 1-based; slot 0 can only come from a manual override.
    #[error("invalid slot {0}: slots are numbered from 1")]
    InvalidSlot(Slot),

    /// Date arithmetic overflowed the calendar.
    #[error("slot {slot} maps to a date outside the supported range (start date {start_date})")]
    DateOutOfRange {
        /// Slot that could not be dated.
        slot: Slot,
        /// Configured first exam day.
        start_date: NaiveDate,
    },

    /// Decoding a date earlier than the first exam day.
    #[error("date {date} precedes the exam period starting {start_date}")]
    DateBeforeStart {
        /// Date being decoded.
        date: NaiveDate,
        /// Configured first exam day.
        start_date: NaiveDate,
    },

    /// Decoding a session outside the configured day.
    #[error("session {session} is outside 1..={sessions_per_day}")]
    InvalidSession {
        /// Session being decoded.
        session: u32,
        /// Configured sessions per day.
        sessions_per_day: u32,
    },

    /// A schedule produced by the scheduler failed validation against its
    /// own enrollment. This is a defect, never a data problem.
    #[error(
        "internal consistency failure: {} student(s) hold two exams in the same slot",
        .0.len()
    )]
    InconsistentSchedule(ConflictReport),
}

pub type Result<T> = std::result::Result<T, Error>;
