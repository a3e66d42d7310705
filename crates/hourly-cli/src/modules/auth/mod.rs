mod actions;
pub(crate) mod args;
mod store;

pub(crate) use actions::{handle_login, handle_logout, handle_register, handle_whoami};
pub(crate) use store::{CliTerminator, KeyringTokenStore};
#[cfg(test)]
pub(crate) use store::{clear_keyring_mock, lock_keyring_tests_async, lock_keyring_tests_sync};
