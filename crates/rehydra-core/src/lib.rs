//! # rehydra-core
//!
//! Core types and corpus model for Rehydra dialogue rehydration.
//!
//! This crate provides the pieces of the pipeline that need no network:
//! - Dehydrated (IDs-only) and rehydrated corpus models
//! - Post text normalization
//! - Anonymous speaker-letter assignment
//! - Assembly of recovered posts into output dialogues

#![warn(missing_docs)]
#![warn(clippy::all)]
#![forbid(unsafe_code)]

pub mod corpus;
pub mod error;
pub mod post;
pub mod rehydrate;
pub mod speaker;
pub mod text;

// Re-exports for convenience
pub use corpus::{DehydratedCorpus, DialogueStats, RehydratedCorpus, Turn};
pub use error::{Error, Result};
pub use post::Post;
pub use rehydrate::assemble;
pub use speaker::SpeakerMap;
pub use text::clean_text;
