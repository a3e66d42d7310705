use crate::cli_args::*;
use crate::modules::admin::handle_admin;
use crate::modules::auth::handle_whoami;
use crate::modules::system::CommandContext;
use crate::modules::timesheets::{handle_activities, handle_projects, handle_timesheet};

pub(crate) async fn handle_command(
    command: Command,
    ctx: &mut CommandContext<'_>,
) -> anyhow::Result<()> {
    match command {
        Command::Whoami(args) => handle_whoami(args, ctx).await,
        Command::Projects => handle_projects(ctx).await,
        Command::Activities(args) => handle_activities(args, ctx).await,
        Command::Timesheet(command) => handle_timesheet(command, ctx).await,
        Command::Admin(command) => handle_admin(command, ctx).await,
        Command::Config(_) | Command::Login(_) | Command::Logout | Command::Register(_) => {
            anyhow::bail!("command must be handled before a session is built")
        }
    }
}
