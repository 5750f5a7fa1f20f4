//! Trailing calendar-month series.
//!
//! Bucket `i` (oldest first) spans from local midnight on the first day of
//! the month `window - 1 - i` months before `now`'s month, through the last
//! nanosecond before the following month starts. Both ends are inclusive.

use chrono::{DateTime, Datelike, Days, Duration, FixedOffset, Months, NaiveDate, NaiveTime, TimeZone};
use serde::Serialize;

use crate::model::{Project, Task};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthBucket {
    /// Short English month name, e.g. "Jan"
    pub label: String,
    pub start: DateTime<FixedOffset>,
    pub end: DateTime<FixedOffset>,
    pub tasks_created: usize,
    pub projects_created: usize,
    pub tasks_completed: usize,
}

impl MonthBucket {
    pub fn contains<Tz: TimeZone>(&self, instant: &DateTime<Tz>) -> bool {
        *instant >= self.start && *instant <= self.end
    }
}

pub fn compute_monthly_series(
    tasks: &[Task],
    projects: &[Project],
    now: DateTime<FixedOffset>,
    window_months: u32,
) -> Vec<MonthBucket> {
    let offset = *now.offset();
    let current = first_of_month(now.date_naive());

    (0..window_months)
        .rev()
        .map(|back| {
            let start_date = current
                .checked_sub_months(Months::new(back))
                .unwrap_or(NaiveDate::MIN);
            let next_date = start_date
                .checked_add_months(Months::new(1))
                .unwrap_or(NaiveDate::MAX);

            let mut bucket = MonthBucket {
                label: start_date.format("%b").to_string(),
                start: local_midnight(start_date, offset),
                end: local_midnight(next_date, offset) - Duration::nanoseconds(1),
                tasks_created: 0,
                projects_created: 0,
                tasks_completed: 0,
            };

            for task in tasks {
                if !bucket.contains(&task.created_at) {
                    continue;
                }
                bucket.tasks_created += 1;
                if task.is_complete() {
                    bucket.tasks_completed += 1;
                }
            }
            let projects_created = projects
                .iter()
                .filter(|project| bucket.contains(&project.created_at))
                .count();
            bucket.projects_created = projects_created;

            bucket
        })
        .collect()
}

fn first_of_month(date: NaiveDate) -> NaiveDate {
    date - Days::new(u64::from(date.day0()))
}

fn local_midnight(date: NaiveDate, offset: FixedOffset) -> DateTime<FixedOffset> {
    let local = date.and_time(NaiveTime::MIN);
    let utc = local
        .checked_sub_signed(Duration::seconds(i64::from(offset.local_minus_utc())))
        .unwrap_or(local);
    offset.from_utc_datetime(&utc)
}
