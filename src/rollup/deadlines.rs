//! Deadline rollups.
//!
//! A task that is not complete and whose deadline falls on today's calendar
//! date is due today, even when that instant has already passed. Overdue
//! covers earlier calendar dates only, so the two never count the same task.

use chrono::{DateTime, Duration, FixedOffset, Utc};
use serde::Serialize;

use crate::model::Task;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DeadlineCounts {
    pub overdue: usize,
    pub due_today: usize,
    /// `now < deadline <= now + horizon`; may include tasks also due today
    pub due_this_week: usize,
    pub completed: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DeadlineState {
    Completed,
    Overdue,
    DueToday,
    Upcoming,
}

impl DeadlineState {
    pub fn as_str(&self) -> &'static str {
        match self {
            DeadlineState::Completed => "completed",
            DeadlineState::Overdue => "overdue",
            DeadlineState::DueToday => "due_today",
            DeadlineState::Upcoming => "upcoming",
        }
    }
}

/// Deadline shares `now`'s calendar date, in `now`'s offset.
pub fn is_due_today(deadline: &DateTime<Utc>, now: &DateTime<FixedOffset>) -> bool {
    deadline.with_timezone(now.offset()).date_naive() == now.date_naive()
}

pub fn classify_deadline(task: &Task, now: &DateTime<FixedOffset>) -> DeadlineState {
    if task.is_complete() {
        DeadlineState::Completed
    } else if is_due_today(&task.deadline, now) {
        DeadlineState::DueToday
    } else if task.deadline < *now {
        DeadlineState::Overdue
    } else {
        DeadlineState::Upcoming
    }
}

pub fn compute_deadline_buckets(
    tasks: &[Task],
    now: DateTime<FixedOffset>,
    horizon_days: u32,
) -> DeadlineCounts {
    // Past the representable range the horizon is unbounded.
    let horizon = now.checked_add_signed(Duration::days(i64::from(horizon_days)));
    let mut counts = DeadlineCounts::default();

    for task in tasks {
        match classify_deadline(task, &now) {
            DeadlineState::Completed => {
                counts.completed += 1;
                continue;
            }
            DeadlineState::Overdue => counts.overdue += 1,
            DeadlineState::DueToday => counts.due_today += 1,
            DeadlineState::Upcoming => {}
        }

        let within_horizon = horizon.map_or(true, |limit| task.deadline <= limit);
        if task.deadline > now && within_horizon {
            counts.due_this_week += 1;
        }
    }

    counts
}
