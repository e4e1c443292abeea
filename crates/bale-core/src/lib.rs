//! Typed bindings for the Bale bot API.
//!
//! Wire objects, update classification and user shortcuts live here. The
//! HTTP transport sits behind the [`client::BotClient`] port and is
//! implemented elsewhere.

pub mod client;
pub mod config;
pub mod domain;
pub mod errors;
pub mod file_input;
pub mod logging;
pub mod maybe;
pub mod object;
pub mod state;
pub mod types;
pub mod update;

pub use errors::{Error, Result};
pub use maybe::MaybeMissing;
pub use object::{BaleObject, JsonDict};
pub use update::{Update, UpdateKind, UpdateType};
