//! Window selection for latest-activity metrics
//!
//! The comparison window is either a caller-supplied closed interval or the
//! single most-recent contact date found in the data. Both paths produce
//! the same shape so the dashboard renders uniformly; an empty dataset
//! anchors on the caller's wall-clock date and contains nothing.

use chrono::NaiveDate;
use leadpulse_core::{DateRange, Interaction};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActivityWindow {
    /// Explicit [from, to]; display anchor is `to`.
    Range(DateRange),
    /// Default path: the single most-recent activity date in the data.
    LatestDay(NaiveDate),
    /// No data and no explicit range; anchor falls back to today.
    Empty { today: NaiveDate },
}

impl ActivityWindow {
    /// Choose the window for one request.
    ///
    /// `interactions` is the full unfiltered set for the caller; the latest
    /// contact date is taken from it, not from wall-clock today.
    pub fn select(
        explicit: Option<DateRange>,
        interactions: &[Interaction],
        today: NaiveDate,
    ) -> Self {
        if let Some(range) = explicit {
            return Self::Range(range);
        }
        match interactions.iter().map(|i| i.contact_date).max() {
            Some(latest) => Self::LatestDay(latest),
            None => Self::Empty { today },
        }
    }

    /// The date the dashboard displays for this window.
    pub fn anchor(&self) -> NaiveDate {
        match self {
            Self::Range(range) => range.to,
            Self::LatestDay(day) => *day,
            Self::Empty { today } => *today,
        }
    }

    /// Whether an interaction on `date` counts toward this window.
    pub fn contains(&self, date: NaiveDate) -> bool {
        match self {
            Self::Range(range) => range.contains(date),
            Self::LatestDay(day) => date == *day,
            Self::Empty { .. } => false,
        }
    }
}
