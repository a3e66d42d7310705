use hourly_core::{week_days, Activity, Project, TimesheetEntry, WeekReport};

use crate::modules::system::{format_hours, print_table};

pub(crate) fn print_week_table(report: &WeekReport) {
    let days = week_days(report.week_start);
    let day_headers: Vec<String> = days
        .iter()
        .map(|day| day.format("%a %d").to_string())
        .collect();
    let mut headers = vec!["PROJECT"];
    headers.extend(day_headers.iter().map(String::as_str));
    headers.push("TOTAL");

    let mut rows = Vec::new();
    for project in &report.projects {
        let mut row = vec![project.project.clone()];
        row.extend(project.daily.iter().map(|hours| format_hours(*hours)));
        row.push(format_hours(project.total()));
        rows.push(row);
    }
    let mut totals = vec!["TOTAL".to_string()];
    totals.extend(report.daily_totals().iter().map(|hours| format_hours(*hours)));
    totals.push(format_hours(report.total()));
    rows.push(totals);

    println!("Week of {}", report.week_start);
    print_table(&headers, &rows);
}

pub(crate) fn print_entries_table(entries: &[TimesheetEntry]) {
    let rows: Vec<Vec<String>> = entries
        .iter()
        .map(|entry| {
            vec![
                entry.id.to_string(),
                entry.date.to_string(),
                entry.project_label(),
                entry.activity_name.clone().unwrap_or_default(),
                format!("{:.2}", entry.hours),
                entry.status.clone().unwrap_or_default(),
                entry.description.clone().unwrap_or_default(),
            ]
        })
        .collect();
    print_table(
        &[
            "ID",
            "DATE",
            "PROJECT",
            "ACTIVITY",
            "HOURS",
            "STATUS",
            "DESCRIPTION",
        ],
        &rows,
    );
}

pub(crate) fn print_projects_table(projects: &[Project]) {
    let rows: Vec<Vec<String>> = projects
        .iter()
        .map(|project| {
            vec![
                project.id.to_string(),
                project.name.clone(),
                project.code.clone().unwrap_or_default(),
                project
                    .activities
                    .iter()
                    .map(|activity| activity.name.as_str())
                    .collect::<Vec<_>>()
                    .join(", "),
            ]
        })
        .collect();
    print_table(&["ID", "NAME", "CODE", "ACTIVITIES"], &rows);
}

pub(crate) fn print_activities_table(activities: &[Activity]) {
    let rows: Vec<Vec<String>> = activities
        .iter()
        .map(|activity| {
            vec![
                activity.id.to_string(),
                activity.name.clone(),
                activity.description.clone().unwrap_or_default(),
            ]
        })
        .collect();
    print_table(&["ID", "NAME", "DESCRIPTION"], &rows);
}
