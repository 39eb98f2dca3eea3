//! Timeline fetch collaborator for fundwire.
//!
//! Pulls a watched account's recent posts from the `twttrapi` RapidAPI
//! endpoint and flattens the nested timeline schema into [`fundwire_core::
//! TimelinePost`]s. Failures never propagate: a fetch problem yields an
//! empty batch and a warning.

pub mod client;
pub mod error;

mod parse;

pub use client::TimelineClient;
pub use error::TimelineError;
