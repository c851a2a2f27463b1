pub mod memory;

pub use memory::InMemoryStore;

use async_trait::async_trait;

use crate::error::Result;
use crate::models::{EntityKind, MediaAsset, Page, Section, Template};
use crate::search::query::ContentQuery;

/// Read-side contract the search subsystem needs from the persistence
/// layer: one find-many per entity kind plus a lightweight title listing
/// for query suggestions. Transactions, locking and streaming cursors
/// are deliberately absent; nothing here uses them.
///
/// Lookup failures propagate to the caller unchanged. There is no retry
/// and no partial-result recovery at this boundary.
#[async_trait]
pub trait ContentStore: Send + Sync {
    /// Fetch pages matching the query
    async fn find_pages(&self, query: &ContentQuery) -> Result<Vec<Page>>;

    /// Fetch templates matching the query
    async fn find_templates(&self, query: &ContentQuery) -> Result<Vec<Template>>;

    /// Fetch media assets matching the query
    async fn find_media(&self, query: &ContentQuery) -> Result<Vec<MediaAsset>>;

    /// Fetch sections matching the query
    async fn find_sections(&self, query: &ContentQuery) -> Result<Vec<Section>>;

    /// List the title-like column of one entity kind (page titles,
    /// template names, media filenames, section titles)
    async fn list_titles(&self, kind: EntityKind) -> Result<Vec<String>>;
}
