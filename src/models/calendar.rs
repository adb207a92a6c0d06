//! Calendar configuration and slot-to-date mapping.
//!
//! Maps abstract slots onto (date, session) pairs given a daily session
//! capacity and a start date. For slot `k` (1-based):
//!
//! ```text
//! day_offset = (k - 1) / sessions_per_day
//! session    = (k - 1) % sessions_per_day + 1
//! date       = start_date + day_offset days
//! ```
//!
//! # Recomputation
//! A `CalendarAssignment` is a pure view of a schedule plus a config.
//! Changing the config only requires mapping again, never re-coloring.

use chrono::{Days, Local, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::enrollment::SubjectId;
use super::schedule::{Schedule, Slot};
use crate::error::{Error, Result};

/// Exam calendar parameters, supplied by the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarConfig {
    /// Exam sessions per day (at least 1).
    pub sessions_per_day: u32,
    /// Date of the first exam day.
    pub start_date: NaiveDate,
}

impl CalendarConfig {
    /// Creates a validated configuration.
    pub fn new(sessions_per_day: u32, start_date: NaiveDate) -> Result<Self> {
        let config = Self {
            sessions_per_day,
            start_date,
        };
        config.validate()?;
        Ok(config)
    }

    /// Sets the number of sessions per day.
    pub fn with_sessions_per_day(mut self, sessions_per_day: u32) -> Self {
        self.sessions_per_day = sessions_per_day;
        self
    }

    /// Sets the start date.
    pub fn with_start_date(mut self, start_date: NaiveDate) -> Self {
        self.start_date = start_date;
        self
    }

    /// Rejects `sessions_per_day == 0`.
    pub fn validate(&self) -> Result<()> {
        if self.sessions_per_day < 1 {
            return Err(Error::InvalidSessionsPerDay(self.sessions_per_day));
        }
        Ok(())
    }

    /// Places a single slot on the calendar.
    pub fn place(&self, slot: Slot) -> Result<CalendarSlot> {
        self.validate()?;
        if slot == 0 {
            return Err(Error::InvalidSlot(slot));
        }
        let day_offset = (slot - 1) / self.sessions_per_day;
        let session = (slot - 1) % self.sessions_per_day + 1;
        let date = self
            .start_date
            .checked_add_days(Days::new(u64::from(day_offset)))
            .ok_or(Error::DateOutOfRange {
                slot,
                start_date: self.start_date,
            })?;
        Ok(CalendarSlot {
            date,
            session,
            day_offset,
        })
    }

    /// Inverse of [`place`](Self::place): recovers the slot for a
    /// (date, session) pair.
    pub fn slot_for(&self, date: NaiveDate, session: u32) -> Result<Slot> {
        self.validate()?;
        if session < 1 || session > self.sessions_per_day {
            return Err(Error::InvalidSession {
                session,
                sessions_per_day: self.sessions_per_day,
            });
        }
        let day_offset = (date - self.start_date).num_days();
        if day_offset < 0 {
            return Err(Error::DateBeforeStart {
                date,
                start_date: self.start_date,
            });
        }
        let slot = u64::try_from(day_offset)
            .ok()
            .and_then(|d| d.checked_mul(u64::from(self.sessions_per_day)))
            .and_then(|d| d.checked_add(u64::from(session)))
            .and_then(|k| Slot::try_from(k).ok());
        slot.ok_or(Error::DateOutOfRange {
            slot: Slot::MAX,
            start_date: self.start_date,
        })
    }

    /// Exam days needed for `total_slots`: `ceil(total_slots / sessions_per_day)`.
    pub fn days_needed(&self, total_slots: Slot) -> Result<u32> {
        self.validate()?;
        Ok(total_slots.div_ceil(self.sessions_per_day))
    }
}

impl Default for CalendarConfig {
    /// Two sessions a day, starting today.
    fn default() -> Self {
        Self {
            sessions_per_day: 2,
            start_date: Local::now().date_naive(),
        }
    }
}

/// Calendar position of a slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarSlot {
    /// Exam date.
    pub date: NaiveDate,
    /// Session within the day (1-based).
    pub session: u32,
    /// Days after the start date.
    pub day_offset: u32,
}

/// Subject → calendar position.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct CalendarAssignment {
    entries: BTreeMap<SubjectId, CalendarSlot>,
}

impl CalendarAssignment {
    /// Calendar position of a subject.
    pub fn get(&self, subject: &str) -> Option<&CalendarSlot> {
        self.entries.get(subject)
    }

    /// Iterates (subject, position) in subject order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &CalendarSlot)> {
        self.entries.iter().map(|(s, c)| (s.as_str(), c))
    }

    /// Distinct exam dates in use, ascending.
    pub fn dates(&self) -> Vec<NaiveDate> {
        let mut dates: Vec<NaiveDate> = self.entries.values().map(|c| c.date).collect();
        dates.sort_unstable();
        dates.dedup();
        dates
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Maps every scheduled subject onto the calendar.
///
/// The configuration is checked before any date arithmetic; an invalid
/// configuration or unrepresentable date yields an error and no partial
/// result.
pub fn to_calendar(schedule: &Schedule, config: &CalendarConfig) -> Result<CalendarAssignment> {
    config.validate()?;
    let entries = schedule
        .iter()
        .map(|(subject, slot)| Ok((subject.to_string(), config.place(slot)?)))
        .collect::<Result<BTreeMap<_, _>>>()?;
    Ok(CalendarAssignment { entries })
}
