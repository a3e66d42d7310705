use std::io::{self, IsTerminal, Write};

use chrono::{Local, NaiveDate};
use hourly_core::{week_bounds, ClientError, SubmitOutcome, TimesheetEntryRequest, WeekReport};
use reqwest::StatusCode;

use super::format_table::{
    print_activities_table, print_entries_table, print_projects_table, print_week_table,
};
use crate::cli_args::*;
use crate::modules::system::{print_json, CommandContext};

pub(crate) async fn handle_projects(ctx: &mut CommandContext<'_>) -> anyhow::Result<()> {
    let projects = ctx.client.my_projects().await?;
    if projects.is_empty() {
        println!("No projects assigned");
        return Ok(());
    }
    print_projects_table(&projects);
    Ok(())
}

pub(crate) async fn handle_activities(
    args: ActivitiesArgs,
    ctx: &mut CommandContext<'_>,
) -> anyhow::Result<()> {
    let activities = ctx.client.project_activities(args.project_id).await?;
    print_activities_table(&activities);
    Ok(())
}

pub(crate) async fn handle_timesheet(
    command: TimesheetCommand,
    ctx: &mut CommandContext<'_>,
) -> anyhow::Result<()> {
    match command {
        TimesheetCommand::List(args) => {
            let (from, to) = match (args.from, args.to) {
                (Some(from), Some(to)) => (from, to),
                _ => week_bounds(args.week.unwrap_or_else(today)),
            };
            if from > to {
                anyhow::bail!("--from must not be after --to");
            }
            let entries = ctx.client.my_timesheets(Some(from), Some(to)).await?;
            match args.format {
                ListFormat::Json => print_json(&entries)?,
                ListFormat::Entries => print_entries_table(&entries),
                ListFormat::Week => {
                    let (week_start, _) = week_bounds(from);
                    print_week_table(&WeekReport::from_entries(week_start, &entries));
                }
            }
        }
        TimesheetCommand::Add(args) => {
            let payload = entry_request(args)?;
            let entry = ctx.client.create_entry(&payload).await?;
            println!(
                "Logged {:.2}h on {} for {} (entry #{})",
                entry.hours,
                entry.date,
                entry.project_label(),
                entry.id
            );
        }
        TimesheetCommand::Edit(args) => {
            let payload = entry_request(args.entry)?;
            let entry = ctx
                .client
                .update_entry(args.id, &payload)
                .await
                .map_err(|err| entry_error(args.id, err))?;
            println!("Updated entry #{}", entry.id);
        }
        TimesheetCommand::Delete(args) => {
            ctx.client
                .delete_entry(args.id)
                .await
                .map_err(|err| entry_error(args.id, err))?;
            println!("Entry #{} deleted", args.id);
        }
        TimesheetCommand::Submit(args) => {
            let (week_start, _) = week_bounds(args.week.unwrap_or_else(today));
            let mut outcome = ctx.client.submit_week(week_start, args.force).await?;
            if let SubmitOutcome::NeedsConfirmation(_) = outcome {
                eprintln!("The server reported warnings for the week of {week_start}:");
                for warning in outcome.warnings() {
                    eprintln!("  - {warning}");
                }
                if !args.yes && !confirm_prompt("Submit anyway? (y/N): ")? {
                    anyhow::bail!("week submission cancelled");
                }
                outcome = ctx.client.submit_week(week_start, true).await?;
            }
            match outcome {
                SubmitOutcome::Submitted(response) => {
                    let message = response
                        .message
                        .unwrap_or_else(|| format!("Week of {week_start} submitted"));
                    println!("{message}");
                }
                SubmitOutcome::NeedsConfirmation(_) => {
                    anyhow::bail!("server still requires confirmation for the week of {week_start}")
                }
            }
        }
    }
    Ok(())
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}

fn entry_error(id: i64, err: ClientError) -> anyhow::Error {
    if err.status() == Some(StatusCode::NOT_FOUND) {
        return anyhow::anyhow!("entry #{id} not found");
    }
    err.into()
}

fn entry_request(args: TimesheetEntryArgs) -> anyhow::Result<TimesheetEntryRequest> {
    if !(args.hours > 0.0 && args.hours <= 24.0) {
        anyhow::bail!("hours must be greater than 0 and at most 24");
    }
    Ok(TimesheetEntryRequest {
        project: args.project,
        activity: args.activity,
        date: args.date.unwrap_or_else(today),
        hours: args.hours,
        description: args.description,
    })
}

fn confirm_prompt(prompt: &str) -> anyhow::Result<bool> {
    if !io::stdin().is_terminal() {
        return Ok(false);
    }
    print!("{prompt}");
    io::stdout().flush()?;
    let mut input = String::new();
    io::stdin().read_line(&mut input)?;
    let input = input.trim().to_lowercase();
    Ok(input == "y" || input == "yes")
}
