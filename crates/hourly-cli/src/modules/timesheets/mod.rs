mod actions;
pub(crate) mod args;
mod format_table;

pub(crate) use actions::{handle_activities, handle_projects, handle_timesheet};
pub(crate) use format_table::print_projects_table;
