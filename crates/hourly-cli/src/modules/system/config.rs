use std::fs;
use std::path::{Path, PathBuf};

use super::types::{CliConfig, CliContext};
use crate::cli_args::{ConfigArgs, ConfigCommand};
use crate::modules::auth::KeyringTokenStore;
use crate::{DEFAULT_ADDR, DEFAULT_CONTEXT};
use hourly_core::TokenStore;

pub(crate) fn handle_config_command(
    args: ConfigArgs,
    config: &mut CliConfig,
) -> anyhow::Result<()> {
    match args.command {
        ConfigCommand::SetContext(args) => {
            let entry = config
                .contexts
                .entry(args.name.clone())
                .or_insert_with(|| CliContext {
                    addr: DEFAULT_ADDR.to_string(),
                    email: None,
                    logged_in_at: None,
                });
            if let Some(addr) = args.addr {
                entry.addr = addr;
            }
            config.current_context = Some(args.name);
        }
        ConfigCommand::UseContext(args) => {
            if !config.contexts.contains_key(&args.name) {
                anyhow::bail!("context not found: {}", args.name);
            }
            config.current_context = Some(args.name);
        }
        ConfigCommand::CurrentContext => {
            if let Some(current) = config.current_context.clone() {
                println!("{current}");
            }
        }
        ConfigCommand::GetContexts => {
            let mut names: Vec<_> = config.contexts.keys().cloned().collect();
            names.sort();
            for name in names {
                let marker = if config.current_context.as_deref() == Some(name.as_str()) {
                    "*"
                } else {
                    " "
                };
                println!("{marker} {name}");
            }
        }
        ConfigCommand::DeleteContext(args) => {
            if config.contexts.remove(&args.name).is_none() {
                anyhow::bail!("context not found: {}", args.name);
            }
            if config.current_context.as_deref() == Some(args.name.as_str()) {
                config.current_context = None;
            }
            KeyringTokenStore::new(&args.name).clear()?;
        }
    }
    Ok(())
}

fn config_path() -> anyhow::Result<PathBuf> {
    let home = std::env::var("HOME")
        .or_else(|_| std::env::var("USERPROFILE"))
        .map_err(|_| anyhow::anyhow!("HOME is not set"))?;
    Ok(Path::new(&home).join(".hourly").join("config.json"))
}

pub(crate) fn load_config() -> anyhow::Result<CliConfig> {
    let path = config_path()?;
    if !path.exists() {
        return Ok(CliConfig::default());
    }
    let contents = fs::read_to_string(path)?;
    let config = serde_json::from_str(&contents)?;
    Ok(config)
}

pub(crate) fn save_config(config: &CliConfig) -> anyhow::Result<()> {
    let path = config_path()?;
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let contents = serde_json::to_string_pretty(config)?;
    fs::write(path, contents)?;
    Ok(())
}

pub(crate) fn resolve_context_name(context_arg: Option<String>, config: &CliConfig) -> String {
    context_arg
        .or_else(|| config.current_context.clone())
        .unwrap_or_else(|| DEFAULT_CONTEXT.to_string())
}

pub(crate) fn resolve_addr(addr_arg: Option<String>, context_name: &str, config: &CliConfig) -> String {
    addr_arg
        .or_else(|| config.contexts.get(context_name).map(|ctx| ctx.addr.clone()))
        .unwrap_or_else(|| DEFAULT_ADDR.to_string())
}

pub(crate) fn ensure_secure_addr(addr: &str, allow_insecure: bool) -> anyhow::Result<()> {
    hourly_core::ensure_secure_addr(addr, allow_insecure)?;
    Ok(())
}
