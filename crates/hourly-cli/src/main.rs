use std::io::{self, Write};
use std::sync::Arc;

use clap::Parser;
use hourly_core::{AuthenticatedRequestClient, ClientError, MemoryTokenStore, TokenStore};
use tracing_subscriber::EnvFilter;

mod cli_args;
mod cli_command;
mod modules;
#[cfg(test)]
mod tests;

use crate::cli_args::*;
use crate::cli_command::handle_command;
use crate::modules::auth::{
    handle_login, handle_logout, handle_register, CliTerminator, KeyringTokenStore,
};
use crate::modules::system::{
    ensure_secure_addr, handle_config_command, load_config, resolve_addr, resolve_context_name,
    save_config, CommandContext,
};

pub(crate) const DEFAULT_ADDR: &str = "https://127.0.0.1:8000/api";
pub(crate) const DEFAULT_CONTEXT: &str = "default";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose)?;
    let http = reqwest::Client::builder()
        .danger_accept_invalid_certs(cli.insecure)
        .build()?;
    let mut config = load_config()?;
    let context_name = resolve_context_name(cli.context.clone(), &config);
    let addr = resolve_addr(cli.addr.clone(), &context_name, &config);
    let command = cli.command;

    if let Command::Config(args) = command {
        handle_config_command(args, &mut config)?;
        save_config(&config)?;
        return Ok(());
    }

    ensure_secure_addr(&addr, cli.insecure)?;
    let store: Arc<dyn TokenStore> = match cli.token.as_deref() {
        Some(token) => Arc::new(MemoryTokenStore::with_credentials(Some(token), None)),
        None => Arc::new(KeyringTokenStore::new(&context_name)),
    };
    let client = AuthenticatedRequestClient::new(http, addr.clone(), store)
        .allow_insecure(cli.insecure)
        .with_terminator(Arc::new(CliTerminator::new(&context_name)));

    match command {
        Command::Login(args) => {
            handle_login(args, &client, &context_name, &addr, &mut config).await?;
            save_config(&config)?;
        }
        Command::Logout => {
            handle_logout(&client, &context_name, &mut config)?;
            save_config(&config)?;
        }
        Command::Register(args) => handle_register(args, &client).await?,
        command => {
            let mut ctx = CommandContext {
                client: &client,
                context_name: context_name.clone(),
            };
            if let Err(err) = handle_command(command, &mut ctx).await {
                let session_lost = err
                    .downcast_ref::<ClientError>()
                    .is_some_and(ClientError::is_session_error);
                if session_lost {
                    return Err(err.context(format!(
                        "not logged in to context '{context_name}'"
                    )));
                }
                return Err(err);
            }
        }
    }

    Ok(())
}

fn init_logging(verbosity: u8) -> anyhow::Result<()> {
    let filter = match verbosity {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_new(filter)?)
        .with_target(false)
        .with_writer(io::stderr)
        .init();
    Ok(())
}

pub(crate) fn prompt_line(prompt: &str) -> anyhow::Result<String> {
    let mut input = String::new();
    print!("{prompt}");
    io::stdout().flush()?;
    io::stdin().read_line(&mut input)?;
    Ok(input.trim().to_string())
}

pub(crate) fn prompt_password(prompt: &str) -> anyhow::Result<String> {
    print!("{prompt}");
    io::stdout().flush()?;
    let password = rpassword::read_password()?;
    if password.trim().is_empty() {
        anyhow::bail!("password is required");
    }
    Ok(password)
}
