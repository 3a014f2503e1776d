//! The clock of one transform run.

use chrono::{Local, NaiveDate, NaiveDateTime, NaiveTime};

use super::deadline::{compliance_deadline, days_until_deadline};

/// Class attribute of the synthetic card wrapper.
pub const CARD_CLASS: &str = "qa-card";

/// Wall-clock time shared by every transform in a run.
///
/// The clock is read once and frozen here, so the transforms themselves stay
/// pure and a parallel build sees one consistent "today".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FaqContext {
    /// Local wall-clock time of the run.
    pub now: NaiveDateTime,
}

impl FaqContext {
    pub fn at(now: NaiveDateTime) -> Self {
        Self { now }
    }

    /// Local midnight of `today`.
    pub fn on(today: NaiveDate) -> Self {
        Self::at(today.and_time(NaiveTime::MIN))
    }

    /// Reads the local clock.
    pub fn now() -> Self {
        Self::at(Local::now().naive_local())
    }

    #[inline]
    pub fn today(&self) -> NaiveDate {
        self.now.date()
    }

    /// Days left until the compliance deadline, never negative.
    pub fn days_until_deadline(&self) -> i64 {
        days_until_deadline(self.now, compliance_deadline())
    }
}
