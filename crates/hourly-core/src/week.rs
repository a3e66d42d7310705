use std::collections::BTreeMap;

use chrono::{Datelike, Duration, NaiveDate};

use crate::models::TimesheetEntry;

/// Monday and Sunday of the ISO week containing `date`.
pub fn week_bounds(date: NaiveDate) -> (NaiveDate, NaiveDate) {
    let offset = i64::from(date.weekday().num_days_from_monday());
    let start = date - Duration::days(offset);
    (start, start + Duration::days(6))
}

pub fn week_days(week_start: NaiveDate) -> [NaiveDate; 7] {
    let mut days = [week_start; 7];
    for (index, day) in days.iter_mut().enumerate() {
        *day = week_start + Duration::days(index as i64);
    }
    days
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProjectWeek {
    pub project: String,
    pub daily: [f64; 7],
}

impl ProjectWeek {
    pub fn total(&self) -> f64 {
        self.daily.iter().sum()
    }
}

/// Hours per project per weekday for one week.
#[derive(Debug, Clone, PartialEq)]
pub struct WeekReport {
    pub week_start: NaiveDate,
    pub projects: Vec<ProjectWeek>,
}

impl WeekReport {
    /// Entries outside the week starting at `week_start` are ignored.
    pub fn from_entries(week_start: NaiveDate, entries: &[TimesheetEntry]) -> Self {
        let mut rows: BTreeMap<String, [f64; 7]> = BTreeMap::new();
        for entry in entries {
            let offset = (entry.date - week_start).num_days();
            if !(0..7).contains(&offset) {
                continue;
            }
            let daily = rows.entry(entry.project_label()).or_insert([0.0; 7]);
            daily[offset as usize] += entry.hours;
        }
        Self {
            week_start,
            projects: rows
                .into_iter()
                .map(|(project, daily)| ProjectWeek { project, daily })
                .collect(),
        }
    }

    pub fn daily_totals(&self) -> [f64; 7] {
        let mut totals = [0.0; 7];
        for project in &self.projects {
            for (total, hours) in totals.iter_mut().zip(project.daily.iter()) {
                *total += hours;
            }
        }
        totals
    }

    pub fn total(&self) -> f64 {
        self.projects.iter().map(ProjectWeek::total).sum()
    }
}
