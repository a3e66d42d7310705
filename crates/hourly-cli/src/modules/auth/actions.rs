use chrono::Utc;
use hourly_core::{AuthenticatedRequestClient, RegisterRequest};
use tracing::info;

use crate::cli_args::*;
use crate::modules::system::{print_json, CliConfig, CliContext, CommandContext};
use crate::{prompt_line, prompt_password};

pub(crate) async fn handle_login(
    args: LoginArgs,
    client: &AuthenticatedRequestClient,
    context_name: &str,
    addr: &str,
    config: &mut CliConfig,
) -> anyhow::Result<()> {
    let email = match args.email {
        Some(email) => email,
        None => prompt_line("Email: ")?,
    };
    let password = match args.password {
        Some(password) => password,
        None => prompt_password("Password: ")?,
    };

    let login = client.login(&email, &password).await?;
    info!(context = %context_name, email = %email, "logged in");

    let entry = config
        .contexts
        .entry(context_name.to_string())
        .or_insert_with(|| CliContext {
            addr: addr.to_string(),
            email: None,
            logged_in_at: None,
        });
    entry.addr = addr.to_string();
    entry.email = Some(email.clone());
    entry.logged_in_at = Some(Utc::now().to_rfc3339());
    config.current_context = Some(context_name.to_string());

    match login.user {
        Some(user) if !user.full_name().is_empty() => {
            println!("Logged in as {} <{}>", user.full_name(), user.email)
        }
        _ => println!("Logged in as {email}"),
    }
    Ok(())
}

pub(crate) fn handle_logout(
    client: &AuthenticatedRequestClient,
    context_name: &str,
    config: &mut CliConfig,
) -> anyhow::Result<()> {
    client.logout()?;
    if let Some(context) = config.contexts.get_mut(context_name) {
        context.email = None;
        context.logged_in_at = None;
    }
    println!("Logged out");
    Ok(())
}

pub(crate) async fn handle_register(
    args: RegisterArgs,
    client: &AuthenticatedRequestClient,
) -> anyhow::Result<()> {
    let password = match args.password {
        Some(password) => password,
        None => prompt_password("Password: ")?,
    };
    let payload = RegisterRequest {
        email: args.email,
        first_name: args.first_name,
        last_name: args.last_name,
        password,
    };
    client.register(&payload).await?;
    println!("Registered {}; run `hourly login` to start a session", payload.email);
    Ok(())
}

pub(crate) async fn handle_whoami(
    args: WhoamiArgs,
    ctx: &mut CommandContext<'_>,
) -> anyhow::Result<()> {
    if args.details {
        let info = ctx.client.user_info().await?;
        return print_json(&info);
    }
    let user = ctx.client.profile().await?;
    println!("{} <{}>", user.full_name(), user.email);
    if user.is_admin() {
        println!("role: admin");
    } else if let Some(role) = user.role.as_deref() {
        println!("role: {role}");
    }
    println!("context: {}", ctx.context_name);
    Ok(())
}
