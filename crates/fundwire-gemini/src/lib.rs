//! Gemini-backed template validation and rewrite for fundwire.
//!
//! One fixed instruction payload: check a post against the funding
//! announcement template, answer with the `null` sentinel when it does not
//! match, otherwise return the rewrite (labels relocalized, description
//! translated to Bahasa Melayu, everything else preserved).

pub mod client;
pub mod error;
pub mod prompt;
pub mod rewriter;
pub mod types;

pub use client::GeminiClient;
pub use error::GeminiError;
pub use rewriter::GeminiRewriter;
