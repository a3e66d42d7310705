#![allow(clippy::pedantic)]
#![allow(clippy::nursery)]
#![deny(clippy::unwrap_used)]
#![allow(clippy::missing_errors_doc)]

pub mod api;
pub mod client;
pub mod constants;
pub mod error;
pub mod models;
pub mod request;
pub mod response;
pub mod session;
pub mod store;
pub mod week;

pub use crate::api::*;
pub use crate::client::*;
pub use crate::constants::*;
pub use crate::error::*;
pub use crate::models::*;
pub use crate::request::*;
pub use crate::response::*;
pub use crate::session::*;
pub use crate::store::*;
pub use crate::week::*;
