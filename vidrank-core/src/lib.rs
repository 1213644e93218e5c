//! vidrank core library: scoring, classification, rendering, and ingest.
//!
//! The main entry point is [`analysis::Analyzer`], which runs the
//! Filter → Score → Classify → Summarize pipeline over one in-memory batch.

pub mod analysis;
pub mod cache;
pub mod classify;
pub mod config;
pub mod discover;
pub mod error;
pub mod ingest;
pub mod render;
pub mod score;
pub mod types;
