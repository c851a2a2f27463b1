//! Main search service: multi-kind aggregation, facets, suggestions

use std::collections::HashMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::{EntityKind, MediaAsset, Page, Section, Template};
use crate::search::config::SearchConfig;
use crate::search::error::SearchResult;
use crate::search::filter::{FilterSpec, DEFAULT_LIMIT};
use crate::search::query::{query_for, MAX_LIMIT, MIN_LIMIT};
use crate::search::scorer::{extract_highlights, relevance_score};
use crate::state::ContentStore;

/// Entity kinds that feed the suggestion pool: page titles, template
/// names and media filenames. Sections are not a suggestion source.
const SUGGESTION_KINDS: [EntityKind; 3] =
    [EntityKind::Page, EntityKind::Template, EntityKind::Media];

/// A single search hit: the normalized projection of a matched record
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchHit {
    /// Record id
    pub id: Uuid,

    /// Which entity kind the record belongs to
    pub kind: EntityKind,

    /// Title-like text (page title, template name, media filename, ...)
    pub title: String,

    /// Secondary descriptive text
    pub description: Option<String>,

    /// Link target, when the record has one
    pub url: Option<String>,

    /// Thumbnail, when the record has one
    pub thumbnail_url: Option<String>,

    /// Free-form metadata for display and facet counting
    pub metadata: HashMap<String, String>,

    /// Heuristic relevance against the query; results are ordered by
    /// this, descending
    pub relevance_score: u32,

    /// Up to 3 highlighted snippets
    pub highlights: Vec<String>,
}

/// Facet count for one value of one categorical dimension
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FacetCount {
    pub name: String,
    pub count: u64,
}

/// Count breakdowns of a result set, computed from the full
/// (pre-pagination) hit list of one search call
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchFacets {
    /// Hits per entity kind
    pub types: Vec<FacetCount>,

    /// Hits per status value
    pub statuses: Vec<FacetCount>,

    /// Hits per category
    pub categories: Vec<FacetCount>,

    /// Hits per media asset type
    pub asset_types: Vec<FacetCount>,
}

/// A multi-kind search request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchRequest {
    /// Free-text query
    pub query: String,

    /// Which kinds to search; `None` means all four
    pub entity_kinds: Option<Vec<EntityKind>>,

    /// Additional filters applied per kind
    pub filters: FilterSpec,

    /// Result-page size; also caps how many records are fetched per kind
    pub limit: usize,

    /// Offset into the merged, ranked list
    pub offset: usize,
}

impl SearchRequest {
    /// Create a new request with default filters and pagination
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            entity_kinds: None,
            filters: FilterSpec::default(),
            limit: DEFAULT_LIMIT,
            offset: 0,
        }
    }

    /// Restrict the search to specific entity kinds
    pub fn with_kinds(mut self, kinds: Vec<EntityKind>) -> Self {
        self.entity_kinds = Some(kinds);
        self
    }

    /// Set filters
    pub fn with_filters(mut self, filters: FilterSpec) -> Self {
        self.filters = filters;
        self
    }

    /// Set limit
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }

    /// Set offset
    pub fn with_offset(mut self, offset: usize) -> Self {
        self.offset = offset;
        self
    }
}

/// Search response with results and metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResponse {
    /// The requested slice of the ranked hit list
    pub results: Vec<SearchHit>,

    /// Size of the full (unsliced) hit list. Because each kind's fetch is
    /// capped at the request limit, this is a floor, not a true global
    /// count, whenever a kind had more matches than the cap.
    pub total: usize,

    /// Facet counts over the full hit list
    pub facets: SearchFacets,

    /// Query suggestions, present for short queries and empty results
    pub suggestions: Option<Vec<String>>,

    /// The query that was executed
    pub query: String,

    /// Offset used for pagination
    pub offset: usize,

    /// Limit used for pagination
    pub limit: usize,

    /// Search execution time in milliseconds
    pub search_time_ms: u64,
}

/// Main search service
pub struct SearchService {
    /// Content store collaborator
    store: Arc<dyn ContentStore>,

    /// Configuration
    config: SearchConfig,
}

impl SearchService {
    /// Create a new search service
    pub fn new(store: Arc<dyn ContentStore>, config: SearchConfig) -> Self {
        Self { store, config }
    }

    /// Search across entity kinds.
    ///
    /// Kinds are visited in the fixed order page, template, media,
    /// section; score ties keep that order. If any kind's lookup fails
    /// the whole call fails: dropping one kind silently would make the
    /// facet and total counts lie.
    pub async fn search(&self, request: &SearchRequest) -> SearchResult<SearchResponse> {
        let start_time = std::time::Instant::now();

        let limit = request.limit.clamp(MIN_LIMIT, MAX_LIMIT);
        let kinds = self.requested_kinds(request);
        let filters = self.query_filters(request, limit);

        let mut hits: Vec<SearchHit> = Vec::new();
        for kind in &kinds {
            let query = query_for(*kind, &filters);
            match kind {
                EntityKind::Page => {
                    for page in self.store.find_pages(&query).await? {
                        hits.push(self.page_hit(&page, &request.query));
                    }
                }
                EntityKind::Template => {
                    for template in self.store.find_templates(&query).await? {
                        hits.push(self.template_hit(&template, &request.query));
                    }
                }
                EntityKind::Media => {
                    for asset in self.store.find_media(&query).await? {
                        hits.push(self.media_hit(&asset, &request.query));
                    }
                }
                EntityKind::Section => {
                    for section in self.store.find_sections(&query).await? {
                        hits.push(self.section_hit(&section, &request.query));
                    }
                }
            }
        }

        // Stable sort: equal scores keep the kind iteration order
        hits.sort_by(|a, b| b.relevance_score.cmp(&a.relevance_score));

        let facets = compute_facets(&hits);
        let total = hits.len();
        let results: Vec<SearchHit> = hits
            .into_iter()
            .skip(request.offset)
            .take(limit)
            .collect();

        let suggestions = if self.wants_suggestions(&request.query, total) {
            Some(self.suggest(&request.query, &kinds).await?)
        } else {
            None
        };

        let search_time_ms = start_time.elapsed().as_millis() as u64;
        tracing::debug!(
            query = %request.query,
            total,
            returned = results.len(),
            search_time_ms,
            "Search executed"
        );

        Ok(SearchResponse {
            results,
            total,
            facets,
            suggestions,
            query: request.query.clone(),
            offset: request.offset,
            limit,
            search_time_ms,
        })
    }

    /// Requested kinds, reordered into the canonical iteration order
    fn requested_kinds(&self, request: &SearchRequest) -> Vec<EntityKind> {
        match &request.entity_kinds {
            None => EntityKind::ALL.to_vec(),
            Some(subset) => EntityKind::ALL
                .iter()
                .copied()
                .filter(|kind| subset.contains(kind))
                .collect(),
        }
    }

    /// Per-kind query filters: the aggregate query string becomes the
    /// text search, and pagination is pinned to "first page of `limit`"
    /// because the global offset is applied after merging
    fn query_filters(&self, request: &SearchRequest, limit: usize) -> FilterSpec {
        let mut filters = request.filters.clone();
        if !request.query.trim().is_empty() {
            filters.search = Some(request.query.clone());
        }
        filters.limit = limit;
        filters.page = 1;
        filters
    }

    fn wants_suggestions(&self, query: &str, total: usize) -> bool {
        self.config.enable_suggestions
            && (query.chars().count() < self.config.min_query_length || total == 0)
    }

    /// Look up title-like values containing the query, via the store's
    /// simple title listing rather than the full search pipeline
    async fn suggest(&self, query: &str, kinds: &[EntityKind]) -> SearchResult<Vec<String>> {
        let needle = query.trim().to_lowercase();
        let mut suggestions: Vec<String> = Vec::new();

        for kind in kinds {
            if !SUGGESTION_KINDS.contains(kind) {
                continue;
            }
            for title in self.store.list_titles(*kind).await? {
                if title.to_lowercase().contains(&needle) && !suggestions.contains(&title) {
                    suggestions.push(title);
                    if suggestions.len() == self.config.suggestion_limit {
                        return Ok(suggestions);
                    }
                }
            }
        }

        Ok(suggestions)
    }

    fn page_hit(&self, page: &Page, query: &str) -> SearchHit {
        let fields = [Some(page.title.as_str()), page.meta_description.as_deref()];

        let mut metadata = HashMap::new();
        metadata.insert("status".to_string(), page.status.to_string());
        metadata.insert("page_type".to_string(), page.page_type.clone());
        metadata.insert("author_id".to_string(), page.author_id.clone());
        if let Some(ref category) = page.category {
            metadata.insert("category".to_string(), category.clone());
        }

        SearchHit {
            id: page.id,
            kind: EntityKind::Page,
            title: page.title.clone(),
            description: page.meta_description.clone(),
            url: Some(format!("/{}", page.slug)),
            thumbnail_url: None,
            metadata,
            relevance_score: relevance_score(query, &fields),
            highlights: self.highlights(query, &fields),
        }
    }

    fn template_hit(&self, template: &Template, query: &str) -> SearchHit {
        let fields = [Some(template.name.as_str()), template.description.as_deref()];

        let mut metadata = HashMap::new();
        metadata.insert("status".to_string(), template.status.to_string());
        metadata.insert("is_active".to_string(), template.is_active.to_string());
        if let Some(ref category) = template.category {
            metadata.insert("category".to_string(), category.clone());
        }

        SearchHit {
            id: template.id,
            kind: EntityKind::Template,
            title: template.name.clone(),
            description: template.description.clone(),
            url: template.preview_url.clone(),
            thumbnail_url: None,
            metadata,
            relevance_score: relevance_score(query, &fields),
            highlights: self.highlights(query, &fields),
        }
    }

    fn media_hit(&self, asset: &MediaAsset, query: &str) -> SearchHit {
        let fields = [
            Some(asset.original_name.as_str()),
            asset.alt_text.as_deref(),
            asset.caption.as_deref(),
        ];

        let mut metadata = HashMap::new();
        metadata.insert("asset_type".to_string(), asset.asset_type.to_string());
        metadata.insert("mime_type".to_string(), asset.mime_type.clone());
        metadata.insert("file_size".to_string(), asset.file_size.to_string());

        SearchHit {
            id: asset.id,
            kind: EntityKind::Media,
            title: asset.original_name.clone(),
            description: asset.caption.clone(),
            url: Some(asset.url.clone()),
            thumbnail_url: asset.thumbnail_url.clone(),
            metadata,
            relevance_score: relevance_score(query, &fields),
            highlights: self.highlights(query, &fields),
        }
    }

    fn section_hit(&self, section: &Section, query: &str) -> SearchHit {
        let fields = [Some(section.title.as_str()), section.content.as_deref()];

        let mut metadata = HashMap::new();
        metadata.insert("section_type".to_string(), section.section_type.clone());
        metadata.insert("is_visible".to_string(), section.is_visible.to_string());

        SearchHit {
            id: section.id,
            kind: EntityKind::Section,
            title: section.title.clone(),
            description: section.content.clone(),
            url: None,
            thumbnail_url: None,
            metadata,
            relevance_score: relevance_score(query, &fields),
            highlights: self.highlights(query, &fields),
        }
    }

    fn highlights(&self, query: &str, fields: &[Option<&str>]) -> Vec<String> {
        if self.config.enable_highlighting {
            extract_highlights(query, fields)
        } else {
            Vec::new()
        }
    }
}

/// Compute facet counts from the full pre-slice hit list
fn compute_facets(hits: &[SearchHit]) -> SearchFacets {
    SearchFacets {
        types: count_by(hits, |hit| Some(hit.kind.to_string())),
        statuses: count_by(hits, |hit| hit.metadata.get("status").cloned()),
        categories: count_by(hits, |hit| hit.metadata.get("category").cloned()),
        asset_types: count_by(hits, |hit| hit.metadata.get("asset_type").cloned()),
    }
}

fn count_by<F>(hits: &[SearchHit], key: F) -> Vec<FacetCount>
where
    F: Fn(&SearchHit) -> Option<String>,
{
    let mut counts: HashMap<String, u64> = HashMap::new();
    for hit in hits {
        if let Some(name) = key(hit) {
            *counts.entry(name).or_insert(0) += 1;
        }
    }

    let mut facets: Vec<FacetCount> = counts
        .into_iter()
        .map(|(name, count)| FacetCount { name, count })
        .collect();

    // Count descending, then name, for stable output
    facets.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.name.cmp(&b.name)));
    facets
}
