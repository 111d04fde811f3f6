//! Stagehand — Content Authoring.
//!
//! Reads an authored scene graph from YAML, checks it for the mistakes
//! authors make, and hands back an in-memory graph ready for play.

pub mod document;
pub mod ingest;

pub use document::ContentDocument;
pub use ingest::{ContentGraph, ingest};
