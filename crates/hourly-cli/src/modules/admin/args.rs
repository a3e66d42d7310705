use clap::{Args, Subcommand};

#[derive(Subcommand)]
pub enum AdminCommand {
    #[command(subcommand)]
    Users(AdminUsersCommand),
    #[command(subcommand)]
    Projects(AdminProjectsCommand),
}

#[derive(Subcommand)]
pub enum AdminUsersCommand {
    List,
    Create(CreateUserArgs),
    Update(UpdateUserArgs),
    Delete(AdminIdArgs),
}

#[derive(Subcommand)]
pub enum AdminProjectsCommand {
    List,
    Get(AdminIdArgs),
    Create(CreateProjectArgs),
    Update(UpdateProjectArgs),
    Delete(AdminIdArgs),
    #[command(about = "List users assigned to a project")]
    Assignments(AdminIdArgs),
    #[command(about = "Assign users to a project")]
    Assign(AssignUsersArgs),
}

#[derive(Args)]
pub struct AdminIdArgs {
    pub id: i64,
}

#[derive(Args)]
pub struct CreateUserArgs {
    #[arg(long)]
    pub email: String,
    #[arg(long)]
    pub first_name: String,
    #[arg(long)]
    pub last_name: String,
    #[arg(long, env = "HOURLY_NEW_USER_PASSWORD")]
    pub password: Option<String>,
    #[arg(long)]
    pub role: Option<String>,
}

#[derive(Args)]
pub struct UpdateUserArgs {
    pub id: i64,
    #[arg(long)]
    pub email: Option<String>,
    #[arg(long)]
    pub first_name: Option<String>,
    #[arg(long)]
    pub last_name: Option<String>,
    #[arg(long)]
    pub role: Option<String>,
    #[arg(long)]
    pub active: Option<bool>,
}

#[derive(Args)]
pub struct CreateProjectArgs {
    #[arg(long)]
    pub name: String,
    #[arg(long)]
    pub code: Option<String>,
    #[arg(long)]
    pub description: Option<String>,
}

#[derive(Args)]
pub struct UpdateProjectArgs {
    pub id: i64,
    #[arg(long)]
    pub name: Option<String>,
    #[arg(long)]
    pub code: Option<String>,
    #[arg(long)]
    pub description: Option<String>,
    #[arg(long)]
    pub active: Option<bool>,
}

#[derive(Args)]
pub struct AssignUsersArgs {
    #[arg(help = "Project ID")]
    pub id: i64,
    #[arg(long = "user", required = true, num_args = 1.., help = "User ID (repeatable)")]
    pub users: Vec<i64>,
}
