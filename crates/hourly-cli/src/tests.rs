use crate::cli_args::*;
use crate::cli_command::handle_command;
use crate::modules::auth::{
    clear_keyring_mock, handle_login, handle_logout, handle_whoami, lock_keyring_tests_async,
    lock_keyring_tests_sync, KeyringTokenStore,
};
use crate::modules::system::{handle_config_command, CliConfig, CliContext, CommandContext};
use clap::CommandFactory;
use hourly_core::{AuthenticatedRequestClient, TokenStore};
use mockito::{Matcher, Server};
use serde_json::json;
use std::sync::Arc;

fn keyring_client(addr: &str, context_name: &str) -> AuthenticatedRequestClient {
    let store: Arc<dyn TokenStore> = Arc::new(KeyringTokenStore::new(context_name));
    AuthenticatedRequestClient::new(reqwest::Client::new(), addr.to_string(), store)
        .allow_insecure(true)
}

#[test]
fn cli_definition_is_consistent() {
    Cli::command().debug_assert();
}

#[test]
fn config_commands_manage_contexts() {
    let _guard = lock_keyring_tests_sync();
    clear_keyring_mock();
    let mut config = CliConfig::default();

    handle_config_command(
        ConfigArgs {
            command: ConfigCommand::SetContext(SetContextArgs {
                name: "work".to_string(),
                addr: Some("https://hours.example.com/api".to_string()),
            }),
        },
        &mut config,
    )
    .expect("set-context");

    let context = config.contexts.get("work").expect("context");
    assert_eq!(context.addr, "https://hours.example.com/api");
    assert_eq!(config.current_context.as_deref(), Some("work"));

    handle_config_command(
        ConfigArgs {
            command: ConfigCommand::SetContext(SetContextArgs {
                name: "staging".to_string(),
                addr: None,
            }),
        },
        &mut config,
    )
    .expect("set-context without addr");
    assert_eq!(
        config.contexts.get("staging").map(|ctx| ctx.addr.as_str()),
        Some(crate::DEFAULT_ADDR)
    );

    handle_config_command(
        ConfigArgs {
            command: ConfigCommand::UseContext(UseContextArgs {
                name: "work".to_string(),
            }),
        },
        &mut config,
    )
    .expect("use-context");
    assert_eq!(config.current_context.as_deref(), Some("work"));

    let missing = handle_config_command(
        ConfigArgs {
            command: ConfigCommand::UseContext(UseContextArgs {
                name: "missing".to_string(),
            }),
        },
        &mut config,
    );
    assert!(missing.is_err());

    KeyringTokenStore::new("work")
        .store_credentials("access", "refresh")
        .expect("store tokens");
    handle_config_command(
        ConfigArgs {
            command: ConfigCommand::DeleteContext(DeleteContextArgs {
                name: "work".to_string(),
            }),
        },
        &mut config,
    )
    .expect("delete-context");

    assert!(!config.contexts.contains_key("work"));
    assert!(config.current_context.is_none());
    let store = KeyringTokenStore::new("work");
    assert_eq!(store.access_token().expect("access"), None);
    assert_eq!(store.refresh_token().expect("refresh"), None);
}

#[tokio::test]
async fn login_stores_tokens_and_updates_context() {
    let _guard = lock_keyring_tests_async().await;
    clear_keyring_mock();
    let mut server = Server::new_async().await;
    let login = server
        .mock("POST", "/auth/login/")
        .match_body(Matcher::PartialJson(json!({
            "email": "ada@example.com",
            "password": "secret"
        })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            json!({
                "access": "access-1",
                "refresh": "refresh-1",
                "user": {
                    "id": 7,
                    "email": "ada@example.com",
                    "first_name": "Ada",
                    "last_name": "Lovelace"
                }
            })
            .to_string(),
        )
        .create_async()
        .await;

    let addr = server.url();
    let client = keyring_client(&addr, "work");
    let mut config = CliConfig::default();
    handle_login(
        LoginArgs {
            email: Some("ada@example.com".to_string()),
            password: Some("secret".to_string()),
        },
        &client,
        "work",
        &addr,
        &mut config,
    )
    .await
    .expect("login");

    login.assert_async().await;
    let store = KeyringTokenStore::new("work");
    assert_eq!(store.access_token().expect("access").as_deref(), Some("access-1"));
    assert_eq!(store.refresh_token().expect("refresh").as_deref(), Some("refresh-1"));
    let context = config.contexts.get("work").expect("context");
    assert_eq!(context.addr, addr);
    assert_eq!(context.email.as_deref(), Some("ada@example.com"));
    assert!(context.logged_in_at.is_some());
    assert_eq!(config.current_context.as_deref(), Some("work"));
}

#[tokio::test]
async fn failed_login_leaves_keyring_empty() {
    let _guard = lock_keyring_tests_async().await;
    clear_keyring_mock();
    let mut server = Server::new_async().await;
    server
        .mock("POST", "/auth/login/")
        .with_status(400)
        .with_header("content-type", "application/json")
        .with_body(json!({"error": "Invalid credentials"}).to_string())
        .create_async()
        .await;

    let addr = server.url();
    let client = keyring_client(&addr, "work");
    let mut config = CliConfig::default();
    let err = handle_login(
        LoginArgs {
            email: Some("ada@example.com".to_string()),
            password: Some("wrong".to_string()),
        },
        &client,
        "work",
        &addr,
        &mut config,
    )
    .await
    .expect_err("login should fail");

    assert!(err.to_string().contains("Invalid credentials"));
    assert!(config.contexts.is_empty());
    assert_eq!(
        KeyringTokenStore::new("work").access_token().expect("access"),
        None
    );
}

#[test]
fn logout_clears_keyring_and_context_email() {
    let _guard = lock_keyring_tests_sync();
    clear_keyring_mock();
    let store = KeyringTokenStore::new("work");
    store
        .store_credentials("access", "refresh")
        .expect("store tokens");
    let mut config = CliConfig::default();
    config.contexts.insert(
        "work".to_string(),
        CliContext {
            addr: "https://hours.example.com/api".to_string(),
            email: Some("ada@example.com".to_string()),
            logged_in_at: Some("2026-01-05T09:00:00Z".to_string()),
        },
    );

    let client = keyring_client("https://hours.example.com/api", "work");
    handle_logout(&client, "work", &mut config).expect("logout");

    assert_eq!(store.access_token().expect("access"), None);
    assert_eq!(store.refresh_token().expect("refresh"), None);
    let context = config.contexts.get("work").expect("context kept");
    assert!(context.email.is_none());
    assert!(context.logged_in_at.is_none());
}

#[tokio::test]
async fn expired_keyring_session_is_refreshed_in_place() {
    let _guard = lock_keyring_tests_async().await;
    clear_keyring_mock();
    KeyringTokenStore::new("work")
        .store_credentials("stale", "refresh-1")
        .expect("store tokens");

    let mut server = Server::new_async().await;
    let profile_body = json!({
        "id": 7,
        "email": "ada@example.com",
        "first_name": "Ada",
        "last_name": "Lovelace"
    });
    server
        .mock("GET", "/auth/profile/")
        .match_header("authorization", "Bearer stale")
        .with_status(401)
        .with_body(json!({"detail": "Token is invalid or expired"}).to_string())
        .create_async()
        .await;
    let refresh = server
        .mock("POST", "/token/refresh/")
        .match_body(Matcher::Json(json!({"refresh": "refresh-1"})))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(json!({"access": "fresh"}).to_string())
        .expect(1)
        .create_async()
        .await;
    server
        .mock("GET", "/auth/profile/")
        .match_header("authorization", "Bearer fresh")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(profile_body.to_string())
        .create_async()
        .await;

    let client = keyring_client(&server.url(), "work");
    let mut ctx = CommandContext {
        client: &client,
        context_name: "work".to_string(),
    };
    handle_whoami(WhoamiArgs { details: false }, &mut ctx)
        .await
        .expect("whoami");

    refresh.assert_async().await;
    let store = KeyringTokenStore::new("work");
    assert_eq!(store.access_token().expect("access").as_deref(), Some("fresh"));
    assert_eq!(store.refresh_token().expect("refresh").as_deref(), Some("refresh-1"));
}

#[tokio::test]
async fn session_commands_are_rejected_by_dispatch() {
    let client = keyring_client("https://hours.example.com/api", "work");
    let mut ctx = CommandContext {
        client: &client,
        context_name: "work".to_string(),
    };
    let err = handle_command(Command::Logout, &mut ctx)
        .await
        .expect_err("logout is not dispatched");
    assert!(err.to_string().contains("before a session is built"));
}
