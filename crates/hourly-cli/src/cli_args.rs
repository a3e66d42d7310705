use clap::{ArgAction, Parser, Subcommand};

pub use crate::modules::admin::args::*;
pub use crate::modules::auth::args::*;
pub use crate::modules::system::args::*;
pub use crate::modules::timesheets::args::*;

#[derive(Parser)]
#[command(name = "hourly")]
#[command(about = "Hourly timesheet CLI")]
pub struct Cli {
    #[arg(long, env = "HOURLY_ADDR", help = "Backend base URL")]
    pub addr: Option<String>,
    #[arg(
        long,
        env = "HOURLY_TOKEN",
        help = "Access token to use instead of the keychain session"
    )]
    pub token: Option<String>,
    #[arg(long, env = "HOURLY_CONTEXT")]
    pub context: Option<String>,
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
    #[arg(long, help = "Allow http:// and invalid TLS certificates")]
    pub insecure: bool,
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    Config(ConfigArgs),
    Login(LoginArgs),
    #[command(about = "Forget the session stored for the context")]
    Logout,
    Register(RegisterArgs),
    #[command(about = "Show the logged-in user")]
    Whoami(WhoamiArgs),
    #[command(about = "List projects assigned to you")]
    Projects,
    #[command(about = "List activities of a project")]
    Activities(ActivitiesArgs),
    #[command(subcommand, about = "Log, edit and submit hours")]
    Timesheet(TimesheetCommand),
    #[command(subcommand, about = "Manage users and projects (admin only)")]
    Admin(AdminCommand),
}
