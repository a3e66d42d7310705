use hourly_core::{CreateUserRequest, ProjectRequest, UpdateUserRequest, User};

use crate::cli_args::*;
use crate::modules::system::{print_json, print_table, CommandContext};
use crate::modules::timesheets::print_projects_table;
use crate::prompt_password;

pub(crate) async fn handle_admin(
    command: AdminCommand,
    ctx: &mut CommandContext<'_>,
) -> anyhow::Result<()> {
    match command {
        AdminCommand::Users(command) => handle_users(command, ctx).await,
        AdminCommand::Projects(command) => handle_projects(command, ctx).await,
    }
}

async fn handle_users(
    command: AdminUsersCommand,
    ctx: &mut CommandContext<'_>,
) -> anyhow::Result<()> {
    match command {
        AdminUsersCommand::List => {
            let users = ctx.client.list_users().await?;
            print_users_table(&users);
        }
        AdminUsersCommand::Create(args) => {
            let password = match args.password {
                Some(password) => password,
                None => prompt_password("Password for new user: ")?,
            };
            let payload = CreateUserRequest {
                email: args.email,
                first_name: args.first_name,
                last_name: args.last_name,
                password,
                role: args.role,
            };
            let user = ctx.client.create_user(&payload).await?;
            println!("Created user #{} ({})", user.id, user.email);
        }
        AdminUsersCommand::Update(args) => {
            let payload = UpdateUserRequest {
                email: args.email,
                first_name: args.first_name,
                last_name: args.last_name,
                role: args.role,
                is_active: args.active,
            };
            let user = ctx.client.update_user(args.id, &payload).await?;
            print_json(&user)?;
        }
        AdminUsersCommand::Delete(args) => {
            ctx.client.delete_user(args.id).await?;
            println!("User #{} deleted", args.id);
        }
    }
    Ok(())
}

async fn handle_projects(
    command: AdminProjectsCommand,
    ctx: &mut CommandContext<'_>,
) -> anyhow::Result<()> {
    match command {
        AdminProjectsCommand::List => {
            let projects = ctx.client.list_projects().await?;
            print_projects_table(&projects);
        }
        AdminProjectsCommand::Get(args) => {
            let project = ctx.client.get_project(args.id).await?;
            print_json(&project)?;
        }
        AdminProjectsCommand::Create(args) => {
            let payload = ProjectRequest {
                name: Some(args.name),
                code: args.code,
                description: args.description,
                is_active: None,
            };
            let project = ctx.client.create_project(&payload).await?;
            println!("Created project #{} ({})", project.id, project.name);
        }
        AdminProjectsCommand::Update(args) => {
            let payload = ProjectRequest {
                name: args.name,
                code: args.code,
                description: args.description,
                is_active: args.active,
            };
            let project = ctx.client.update_project(args.id, &payload).await?;
            print_json(&project)?;
        }
        AdminProjectsCommand::Delete(args) => {
            ctx.client.delete_project(args.id).await?;
            println!("Project #{} deleted", args.id);
        }
        AdminProjectsCommand::Assignments(args) => {
            let assignments = ctx.client.project_assignments(args.id).await?;
            let rows: Vec<Vec<String>> = assignments
                .iter()
                .map(|assignment| {
                    vec![
                        assignment.user.to_string(),
                        assignment.user_email.clone().unwrap_or_default(),
                        assignment.assigned_at.clone().unwrap_or_default(),
                    ]
                })
                .collect();
            print_table(&["USER", "EMAIL", "ASSIGNED"], &rows);
        }
        AdminProjectsCommand::Assign(args) => {
            let count = args.users.len();
            ctx.client.assign_users(args.id, args.users).await?;
            println!("Assigned {count} user(s) to project #{}", args.id);
        }
    }
    Ok(())
}

fn print_users_table(users: &[User]) {
    let rows: Vec<Vec<String>> = users
        .iter()
        .map(|user| {
            vec![
                user.id.to_string(),
                user.email.clone(),
                user.full_name(),
                user.role.clone().unwrap_or_default(),
                match user.is_active {
                    Some(false) => "no".to_string(),
                    _ => "yes".to_string(),
                },
            ]
        })
        .collect();
    print_table(&["ID", "EMAIL", "NAME", "ROLE", "ACTIVE"], &rows);
}
