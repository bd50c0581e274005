//! Evidence pipeline: validate and dedupe hits, score them, summarise
//! confidence, render context, and orchestrate the provider calls.

pub mod context;
pub mod dedup;
pub mod retrieval;
pub mod scoring;
pub mod url_normalize;
