pub(crate) mod args;
pub(crate) mod config;
pub(crate) mod output;
pub(crate) mod types;

pub(crate) use config::{
    ensure_secure_addr, handle_config_command, load_config, resolve_addr, resolve_context_name,
    save_config,
};
pub(crate) use output::{format_hours, print_json, print_table};
pub(crate) use types::{CliConfig, CliContext, CommandContext};
