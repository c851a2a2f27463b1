//! cms-search: content search and filtering engine for CMS-backed
//! platforms
//!
//! Takes flat request parameters, builds typed per-kind query
//! predicates, ranks the fetched records with a deterministic heuristic
//! scorer and returns a merged, faceted result list with highlight
//! snippets and query suggestions. Persistence is a trait boundary
//! ([`state::ContentStore`]); an in-memory implementation backs the
//! tests and the demo binary.

pub mod config;
pub mod error;
pub mod models;
pub mod search;
pub mod state;

pub use config::Config;
pub use error::{AppError, Result};
