//! Core types and trait definitions for the Plinth record toolkit.
//!
//! This crate holds the record lifecycle model — timestamps, soft-delete
//! visibility, per-field change snapshots — and the logical value model that
//! field codecs convert to and from storage text. It is deliberately free of
//! I/O dependencies; storage backends and codecs live in sibling crates.

// We intentionally use native `async fn` in traits (stabilised in Rust 1.75).
// Suppress the advisory lint about `Send` bounds on the returned futures.
#![allow(async_fn_in_trait)]

pub mod error;
pub mod lifecycle;
pub mod record;
pub mod schema;
pub mod store;
pub mod value;

pub use error::{Error, FieldError, Result, ValidationError};
