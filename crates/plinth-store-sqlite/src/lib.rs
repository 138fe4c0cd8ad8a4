//! SQLite backend for the Plinth record store.
//!
//! Wraps [`tokio_rusqlite`] so all database access runs on a dedicated thread
//! pool without blocking the async runtime. Field codecs run at the
//! connection boundary: values are encoded to stored text just before a
//! write and decoded back to logical form immediately after a read.

mod encode;
mod schema;
mod store;

pub mod error;

pub use error::{Error, Result};
pub use store::SqliteStore;
