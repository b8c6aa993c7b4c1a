//! External collaborators backed by a generative text API.
//!
//! Both operations degrade on failure: metadata fetch yields "no result" and
//! review generation yields a fixed fallback sentence. Neither ever surfaces
//! a hard error to the caller.

pub mod client;
pub mod error;
pub mod metadata;
pub mod review;

pub use client::AiClient;
pub use error::EnrichError;
pub use metadata::{fetch_metadata, MediaMetadata};
pub use review::generate_review;
