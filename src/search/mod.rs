//! Content search and filtering engine
//!
//! This module turns untyped request parameters into typed, ranked,
//! faceted search results across the platform's content kinds:
//!
//! - **Filter parsing**: query-string parameters into a typed [`FilterSpec`]
//! - **Query building**: per-kind predicates, ordering and pagination
//! - **Relevance scoring**: heuristic ranking plus highlight snippets
//! - **Aggregation**: multi-kind fan-out, facet counts, suggestions
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────┐
//! │              Search Service API                 │
//! ├─────────────────────────────────────────────────┤
//! │  - search()          - SearchRequest builder    │
//! │  - facets            - suggestions              │
//! └─────────────────────────────────────────────────┘
//!                      │
//!                      ▼
//! ┌─────────────────────────────────────────────────┐
//! │        Filter Parser + Query Builder            │
//! ├─────────────────────────────────────────────────┤
//! │  - FilterSpec (typed, lenient parsing)          │
//! │  - ContentQuery (predicate, order, take/skip)   │
//! └─────────────────────────────────────────────────┘
//!                      │
//!                      ▼
//! ┌─────────────────────────────────────────────────┐
//! │         ContentStore (persistence)              │
//! ├─────────────────────────────────────────────────┤
//! │  - find-many per entity kind                    │
//! │  - title listing for suggestions                │
//! └─────────────────────────────────────────────────┘
//! ```
//!
//! Two long-standing behaviors are kept for compatibility rather than
//! elegance. First, the text-search predicate admits a record when *any*
//! term hits *any* searchable field, while the scorer reserves its big
//! bonus for fields containing *all* terms; the database filter is
//! therefore laxer than the ranking, and low-scoring hits at the tail of
//! a result list are expected. Second, each entity kind's fetch is
//! capped at the request limit before the merged list is ranked and
//! sliced, so totals and facet counts are per-kind-capped approximations
//! rather than true global counts.
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use cms_search::search::{SearchConfig, SearchRequest, SearchService};
//! use cms_search::state::InMemoryStore;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let store = Arc::new(InMemoryStore::new());
//!     let service = SearchService::new(store, SearchConfig::default());
//!
//!     let request = SearchRequest::new("hero banner").with_limit(20);
//!     let response = service.search(&request).await?;
//!     println!("{} results", response.total);
//!
//!     Ok(())
//! }
//! ```

mod config;
mod error;
pub mod filter;
pub mod query;
pub mod scorer;
mod service;

pub use config::{SearchConfig, SearchConfigBuilder};
pub use error::{SearchError, SearchResult};
pub use filter::FilterSpec;
pub use query::{query_for, ContentQuery, DateBound, Field, Predicate, SortKey, SortOrder};
pub use service::{
    FacetCount, SearchFacets, SearchHit, SearchRequest, SearchResponse, SearchService,
};
