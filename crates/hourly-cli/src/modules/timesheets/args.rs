use chrono::NaiveDate;
use clap::{Args, Subcommand, ValueEnum};

#[derive(Args)]
pub struct ActivitiesArgs {
    #[arg(help = "Project ID")]
    pub project_id: i64,
}

#[derive(Subcommand)]
pub enum TimesheetCommand {
    #[command(about = "Show logged hours for a week or date range")]
    List(TimesheetListArgs),
    #[command(about = "Log hours against a project")]
    Add(TimesheetEntryArgs),
    #[command(about = "Replace an existing entry")]
    Edit(TimesheetEditArgs),
    Delete(TimesheetDeleteArgs),
    #[command(about = "Submit a week for approval")]
    Submit(TimesheetSubmitArgs),
}

#[derive(Clone, Copy, Default, ValueEnum)]
pub enum ListFormat {
    #[default]
    Week,
    Entries,
    Json,
}

#[derive(Args)]
pub struct TimesheetListArgs {
    #[arg(long, help = "Any date inside the week to show (default: today)")]
    pub week: Option<NaiveDate>,
    #[arg(long, requires = "to", conflicts_with = "week")]
    pub from: Option<NaiveDate>,
    #[arg(long, requires = "from", conflicts_with = "week")]
    pub to: Option<NaiveDate>,
    #[arg(long, value_enum, default_value_t = ListFormat::Week)]
    pub format: ListFormat,
}

#[derive(Args)]
pub struct TimesheetEntryArgs {
    #[arg(long)]
    pub project: i64,
    #[arg(long)]
    pub activity: Option<i64>,
    #[arg(long, help = "Day worked (default: today)")]
    pub date: Option<NaiveDate>,
    #[arg(long)]
    pub hours: f64,
    #[arg(long)]
    pub description: Option<String>,
}

#[derive(Args)]
pub struct TimesheetEditArgs {
    #[arg(help = "Entry ID")]
    pub id: i64,
    #[command(flatten)]
    pub entry: TimesheetEntryArgs,
}

#[derive(Args)]
pub struct TimesheetDeleteArgs {
    #[arg(help = "Entry ID")]
    pub id: i64,
}

#[derive(Args)]
pub struct TimesheetSubmitArgs {
    #[arg(long, help = "Any date inside the week to submit (default: today)")]
    pub week: Option<NaiveDate>,
    #[arg(long, help = "Submit even if the server reports warnings")]
    pub force: bool,
    #[arg(long, short = 'y', help = "Confirm warnings without prompting")]
    pub yes: bool,
}
