//! finscope: source-attributed research for financial questions.
//!
//! A question goes through the evidence pipeline from `finscope-evidence`:
//! web search (one query, or three concurrent angles in deep mode),
//! normalisation and deduplication, credibility scoring against a curated
//! registry, and a bounded numbered context block. This crate adds the
//! outer layer:
//!
//! - **Config**: TOML file with `[search]` and `[credibility]` sections
//! - **Service**: [`ResearchService`] owns the provider and the registry
//! - **Reports**: [`ResearchReport`] renders as text or JSON

pub mod config;
pub mod error;
pub mod research;

pub use config::{CredibilityConfig, FinscopeConfig};
pub use error::{FinscopeError, Result};
pub use finscope_evidence::RetrievalMode;
pub use research::{ResearchReport, ResearchService};
