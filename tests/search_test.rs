//! End-to-end tests for the search engine: parameter parsing through
//! query building, store evaluation, ranking, facets and suggestions

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;

use cms_search::error::{AppError, Result};
use cms_search::models::{AssetType, EntityKind, MediaAsset, Page, Section, Template};
use cms_search::search::{
    query_for, ContentQuery, FilterSpec, SearchConfig, SearchError, SearchRequest, SearchService,
};
use cms_search::search::scorer::{extract_highlights, relevance_score};
use cms_search::state::{ContentStore, InMemoryStore};

fn params(pairs: &[(&str, &str)]) -> HashMap<String, String> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

fn page(title: &str, slug: &str) -> Page {
    Page::new(
        title.to_string(),
        slug.to_string(),
        slug.to_string(),
        "author-1".to_string(),
    )
}

/// Store with a few records of every kind, themed so "hero" hits all
/// four kinds
fn seeded_store() -> InMemoryStore {
    let store = InMemoryStore::new();

    let mut hero_page = page("Hero Landing", "hero-landing");
    hero_page.meta_description = Some("Landing page with a hero banner".to_string());
    hero_page.publish();
    store.insert_page(hero_page);

    let mut pricing = page("Pricing", "pricing");
    pricing.category = Some("sales".to_string());
    store.insert_page(pricing);

    let mut template = Template::new("Hero Template".to_string());
    template.description = Some("Reusable hero block".to_string());
    store.insert_template(template);

    let mut image = MediaAsset::new(
        "hero-banner.png".to_string(),
        AssetType::Image,
        "image/png".to_string(),
        120_000,
        "/media/hero-banner.png".to_string(),
        "user-1".to_string(),
    );
    image.alt_text = Some("Hero banner artwork".to_string());
    store.insert_media(image);

    let mut section = Section::new(
        "home-hero".to_string(),
        "Hero Section".to_string(),
        "hero".to_string(),
    );
    section.content = Some("Main hero section content".to_string());
    store.insert_section(section);

    store
}

fn service_over(store: InMemoryStore) -> SearchService {
    SearchService::new(Arc::new(store), SearchConfig::default())
}

#[test]
fn test_parameters_flow_into_pagination() {
    let filters = FilterSpec::from_params(&params(&[
        ("status", "draft,published"),
        ("page", "2"),
        ("limit", "10"),
    ]));

    assert_eq!(filters.status, vec!["draft", "published"]);
    assert_eq!(filters.page, 2);
    assert_eq!(filters.limit, 10);

    let query = query_for(EntityKind::Page, &filters);
    assert_eq!(query.take, 10);
    assert_eq!(query.skip, 10);
}

#[test]
fn test_hero_scoring_vector() {
    let fields = [Some("Hero Section"), Some("Main hero section content")];

    assert_eq!(relevance_score("hero", &fields), 65);
    assert_eq!(relevance_score("hero", &fields), relevance_score("hero", &fields));
    assert!(extract_highlights("hero", &fields).len() <= 3);
}

#[tokio::test]
async fn test_full_pipeline_ranks_across_kinds() {
    let service = service_over(seeded_store());

    let response = service.search(&SearchRequest::new("hero")).await.unwrap();

    assert_eq!(response.total, 4);
    for window in response.results.windows(2) {
        assert!(window[0].relevance_score >= window[1].relevance_score);
    }
    for hit in &response.results {
        assert!(hit.highlights.len() <= 3);
        assert!(hit.relevance_score > 0);
    }

    let kinds: Vec<EntityKind> = response.results.iter().map(|hit| hit.kind).collect();
    assert!(kinds.contains(&EntityKind::Page));
    assert!(kinds.contains(&EntityKind::Template));
    assert!(kinds.contains(&EntityKind::Media));
    assert!(kinds.contains(&EntityKind::Section));
}

#[tokio::test]
async fn test_facets_reflect_pre_slice_results() {
    let service = service_over(seeded_store());

    let request = SearchRequest::new("hero").with_limit(2);
    let response = service.search(&request).await.unwrap();

    assert_eq!(response.results.len(), 2);
    assert_eq!(response.total, 4);

    let type_total: u64 = response.facets.types.iter().map(|f| f.count).sum();
    assert_eq!(type_total, 4);
    assert!(response
        .facets
        .asset_types
        .iter()
        .any(|f| f.name == "image" && f.count == 1));
}

#[tokio::test]
async fn test_media_only_search_with_suggestions() {
    let service = service_over(seeded_store());

    // The asset-type filter empties the result list; the suggestion
    // lookup ignores filters and still sees the filename
    let filters = FilterSpec {
        asset_type: vec!["document".to_string()],
        ..FilterSpec::default()
    };
    let request = SearchRequest::new("banner")
        .with_kinds(vec![EntityKind::Media])
        .with_filters(filters);

    let response = service.search(&request).await.unwrap();

    assert!(response.results.is_empty());
    assert_eq!(response.total, 0);
    assert_eq!(
        response.suggestions.unwrap(),
        vec!["hero-banner.png".to_string()]
    );
}

#[tokio::test]
async fn test_tri_state_boolean_end_to_end() {
    let store = InMemoryStore::new();
    let mut public = page("Public", "public");
    public.is_public = true;
    store.insert_page(public);
    store.insert_page(page("Private", "private"));
    let service = service_over(store);

    // No isPublic parameter: both pages come back
    let filters = FilterSpec::from_params(&params(&[]));
    let request = SearchRequest::new("").with_filters(filters);
    assert_eq!(service.search(&request).await.unwrap().total, 2);

    // isPublic=false constrains to the private page only
    let filters = FilterSpec::from_params(&params(&[("isPublic", "false")]));
    let request = SearchRequest::new("").with_filters(filters);
    let response = service.search(&request).await.unwrap();
    let page_hits: Vec<_> = response
        .results
        .iter()
        .filter(|hit| hit.kind == EntityKind::Page)
        .collect();
    assert_eq!(page_hits.len(), 1);
    assert_eq!(page_hits[0].title, "Private");
}

#[tokio::test]
async fn test_garbage_numeric_filter_does_not_reject_records() {
    let service = service_over(seeded_store());

    let filters = FilterSpec::from_params(&params(&[("minFileSize", "abc")]));
    assert_eq!(filters.min_file_size, Some(0));

    let request = SearchRequest::new("hero")
        .with_kinds(vec![EntityKind::Media])
        .with_filters(filters);
    let response = service.search(&request).await.unwrap();

    // Fallback bound of 0 keeps every asset in range
    assert_eq!(response.total, 1);
}

#[tokio::test]
async fn test_soft_deleted_records_never_surface() {
    let store = seeded_store();
    let mut deleted = page("Hero Outtake", "hero-outtake");
    deleted.soft_delete();
    store.insert_page(deleted);
    let service = service_over(store);

    let response = service.search(&SearchRequest::new("hero")).await.unwrap();

    assert!(response
        .results
        .iter()
        .all(|hit| hit.title != "Hero Outtake"));
}

#[tokio::test]
async fn test_per_kind_cap_bounds_total() {
    let store = InMemoryStore::new();
    for i in 0..30 {
        store.insert_page(page(&format!("Hero {i}"), &format!("hero-{i}")));
    }
    let service = service_over(store);

    let request = SearchRequest::new("hero").with_limit(10);
    let response = service.search(&request).await.unwrap();

    // 30 pages match, but each kind's fetch is capped at the request
    // limit, so the reported total is the capped count
    assert_eq!(response.total, 10);
    assert_eq!(response.results.len(), 10);
}

/// Store whose media lookups always fail, for error-propagation tests
struct BrokenMediaStore {
    inner: InMemoryStore,
}

#[async_trait]
impl ContentStore for BrokenMediaStore {
    async fn find_pages(&self, query: &ContentQuery) -> Result<Vec<Page>> {
        self.inner.find_pages(query).await
    }

    async fn find_templates(&self, query: &ContentQuery) -> Result<Vec<Template>> {
        self.inner.find_templates(query).await
    }

    async fn find_media(&self, _query: &ContentQuery) -> Result<Vec<MediaAsset>> {
        Err(AppError::Database("media table unavailable".to_string()))
    }

    async fn find_sections(&self, query: &ContentQuery) -> Result<Vec<Section>> {
        self.inner.find_sections(query).await
    }

    async fn list_titles(&self, kind: EntityKind) -> Result<Vec<String>> {
        self.inner.list_titles(kind).await
    }
}

#[tokio::test]
async fn test_one_failing_kind_fails_the_whole_search() {
    let store = BrokenMediaStore {
        inner: seeded_store(),
    };
    let service = SearchService::new(Arc::new(store), SearchConfig::default());

    let err = service
        .search(&SearchRequest::new("hero"))
        .await
        .unwrap_err();
    assert!(matches!(err, SearchError::Store(AppError::Database(_))));

    // Kinds before the failing one do not leak out as partial results
    let request = SearchRequest::new("hero").with_kinds(vec![EntityKind::Page]);
    assert!(service.search(&request).await.is_ok());
}
