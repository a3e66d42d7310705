use hourly_core::AuthenticatedRequestClient;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Serialize, Deserialize, Default)]
pub struct CliConfig {
    #[serde(default)]
    pub current_context: Option<String>,
    #[serde(default)]
    pub contexts: HashMap<String, CliContext>,
}

#[derive(Serialize, Deserialize, Clone)]
pub struct CliContext {
    pub addr: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub logged_in_at: Option<String>,
}

pub struct CommandContext<'a> {
    pub client: &'a AuthenticatedRequestClient,
    pub context_name: String,
}
