//! In-memory content store
//!
//! Reference interpreter for [`ContentQuery`] and the store used by the
//! test-suite and the demo binary. Evaluation semantics here define what
//! an external database adapter must reproduce: predicate clauses over
//! typed field values, multi-key ordering, then skip/take pagination.

use std::cmp::Ordering;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use dashmap::DashMap;
use uuid::Uuid;

use crate::error::Result;
use crate::models::{EntityKind, MediaAsset, Page, Section, Template};
use crate::search::query::{ContentQuery, DateBound, Field, Predicate, SortKey, SortOrder};
use crate::state::ContentStore;
use async_trait::async_trait;

/// A field's value as seen by predicate evaluation
#[derive(Debug, Clone, PartialEq)]
enum Value {
    Str(String),
    Int(i64),
    Bool(bool),
    Date(DateTime<Utc>),
    List(Vec<String>),
}

/// Typed field lookup on a content record. Returning `None` means the
/// record has no value there, which fails every comparison except
/// `IsNull`.
trait FieldAccess {
    fn value(&self, field: Field) -> Option<Value>;
    fn record_id(&self) -> Uuid;
}

/// In-memory content store (for tests and the demo binary)
#[derive(Clone, Default)]
pub struct InMemoryStore {
    pages: Arc<DashMap<Uuid, Page>>,
    templates: Arc<DashMap<Uuid, Template>>,
    media: Arc<DashMap<Uuid, MediaAsset>>,
    sections: Arc<DashMap<Uuid, Section>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert_page(&self, page: Page) {
        tracing::debug!(page_id = %page.id, "Page stored");
        self.pages.insert(page.id, page);
    }

    pub fn insert_template(&self, template: Template) {
        tracing::debug!(template_id = %template.id, "Template stored");
        self.templates.insert(template.id, template);
    }

    pub fn insert_media(&self, asset: MediaAsset) {
        tracing::debug!(asset_id = %asset.id, "Media asset stored");
        self.media.insert(asset.id, asset);
    }

    pub fn insert_section(&self, section: Section) {
        tracing::debug!(section_id = %section.id, "Section stored");
        self.sections.insert(section.id, section);
    }

    fn collect<T: FieldAccess + Clone>(map: &DashMap<Uuid, T>, query: &ContentQuery) -> Vec<T> {
        let mut records: Vec<T> = map
            .iter()
            .map(|entry| entry.value().clone())
            .filter(|record| eval(&query.predicate, record))
            .collect();

        // Stable multi-key sort with the record id as the final tiebreak,
        // so results are deterministic across the hash map's iteration
        // order.
        records.sort_by(|a, b| {
            compare_records(a, b, &query.order_by).then_with(|| a.record_id().cmp(&b.record_id()))
        });

        records
            .into_iter()
            .skip(query.skip)
            .take(query.take)
            .collect()
    }
}

#[async_trait]
impl ContentStore for InMemoryStore {
    async fn find_pages(&self, query: &ContentQuery) -> Result<Vec<Page>> {
        let pages = Self::collect(&self.pages, query);
        tracing::debug!(matched = pages.len(), "Page query evaluated");
        Ok(pages)
    }

    async fn find_templates(&self, query: &ContentQuery) -> Result<Vec<Template>> {
        let templates = Self::collect(&self.templates, query);
        tracing::debug!(matched = templates.len(), "Template query evaluated");
        Ok(templates)
    }

    async fn find_media(&self, query: &ContentQuery) -> Result<Vec<MediaAsset>> {
        let assets = Self::collect(&self.media, query);
        tracing::debug!(matched = assets.len(), "Media query evaluated");
        Ok(assets)
    }

    async fn find_sections(&self, query: &ContentQuery) -> Result<Vec<Section>> {
        let sections = Self::collect(&self.sections, query);
        tracing::debug!(matched = sections.len(), "Section query evaluated");
        Ok(sections)
    }

    async fn list_titles(&self, kind: EntityKind) -> Result<Vec<String>> {
        let mut titles: Vec<String> = match kind {
            EntityKind::Page => self
                .pages
                .iter()
                .filter(|entry| entry.value().deleted_at.is_none())
                .map(|entry| entry.value().title.clone())
                .collect(),
            EntityKind::Template => self
                .templates
                .iter()
                .map(|entry| entry.value().name.clone())
                .collect(),
            EntityKind::Media => self
                .media
                .iter()
                .filter(|entry| entry.value().deleted_at.is_none())
                .map(|entry| entry.value().original_name.clone())
                .collect(),
            EntityKind::Section => self
                .sections
                .iter()
                .map(|entry| entry.value().title.clone())
                .collect(),
        };

        titles.sort();
        Ok(titles)
    }
}

/// Evaluate a predicate against one record
fn eval(predicate: &Predicate, record: &dyn FieldAccess) -> bool {
    match predicate {
        Predicate::All(children) => children.iter().all(|child| eval(child, record)),
        Predicate::Any(children) => children.iter().any(|child| eval(child, record)),
        Predicate::Contains { field, needle } => match record.value(*field) {
            Some(Value::Str(text)) => text.to_lowercase().contains(needle),
            Some(Value::List(items)) => items.iter().any(|item| item.to_lowercase().contains(needle)),
            _ => false,
        },
        Predicate::Equals { field, value } => match record.value(*field) {
            Some(Value::Str(text)) => text == *value,
            Some(Value::List(items)) => items.contains(value),
            _ => false,
        },
        Predicate::InSet { field, values } => match record.value(*field) {
            Some(Value::Str(text)) => values.contains(&text),
            Some(Value::List(items)) => items.iter().any(|item| values.contains(item)),
            _ => false,
        },
        Predicate::IsNull(field) => record.value(*field).is_none(),
        Predicate::BoolIs { field, value } => {
            matches!(record.value(*field), Some(Value::Bool(b)) if b == *value)
        }
        Predicate::IntAtLeast { field, value } => {
            matches!(record.value(*field), Some(Value::Int(n)) if n >= *value)
        }
        Predicate::IntAtMost { field, value } => {
            matches!(record.value(*field), Some(Value::Int(n)) if n <= *value)
        }
        // An Invalid bound (unparseable caller input) or a missing
        // timestamp makes the comparison indeterminate: the record fails
        // the range, it does not error.
        Predicate::DateAtLeast { field, bound } => match (record.value(*field), bound) {
            (Some(Value::Date(date)), DateBound::Valid(bound)) => date >= *bound,
            _ => false,
        },
        Predicate::DateAtMost { field, bound } => match (record.value(*field), bound) {
            (Some(Value::Date(date)), DateBound::Valid(bound)) => date <= *bound,
            _ => false,
        },
    }
}

fn compare_records(a: &dyn FieldAccess, b: &dyn FieldAccess, order_by: &[SortKey]) -> Ordering {
    for key in order_by {
        let ordering = compare_values(a.value(key.field), b.value(key.field));
        let ordering = match key.order {
            SortOrder::Ascending => ordering,
            SortOrder::Descending => ordering.reverse(),
        };
        if ordering != Ordering::Equal {
            return ordering;
        }
    }
    Ordering::Equal
}

/// Missing values sort below present ones; mixed types never happen for
/// a well-formed query and compare equal
fn compare_values(a: Option<Value>, b: Option<Value>) -> Ordering {
    match (a, b) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
        (Some(left), Some(right)) => match (left, right) {
            (Value::Str(l), Value::Str(r)) => l.cmp(&r),
            (Value::Int(l), Value::Int(r)) => l.cmp(&r),
            (Value::Bool(l), Value::Bool(r)) => l.cmp(&r),
            (Value::Date(l), Value::Date(r)) => l.cmp(&r),
            (Value::List(l), Value::List(r)) => l.cmp(&r),
            _ => Ordering::Equal,
        },
    }
}

impl FieldAccess for Page {
    fn value(&self, field: Field) -> Option<Value> {
        match field {
            Field::Title => Some(Value::Str(self.title.clone())),
            Field::Slug => Some(Value::Str(self.slug.clone())),
            Field::PageKey => Some(Value::Str(self.page_key.clone())),
            Field::MetaDescription => self.meta_description.clone().map(Value::Str),
            Field::MetaKeywords => self.meta_keywords.clone().map(Value::Str),
            Field::Status => Some(Value::Str(self.status.to_string())),
            Field::PageType => Some(Value::Str(self.page_type.clone())),
            Field::Category => self.category.clone().map(Value::Str),
            Field::AuthorId => Some(Value::Str(self.author_id.clone())),
            Field::IsPublic => Some(Value::Bool(self.is_public)),
            Field::SeoScore => Some(Value::Int(self.seo_score)),
            Field::CreatedAt => Some(Value::Date(self.created_at)),
            Field::UpdatedAt => Some(Value::Date(self.updated_at)),
            Field::PublishedAt => self.published_at.map(Value::Date),
            Field::DeletedAt => self.deleted_at.map(Value::Date),
            _ => None,
        }
    }

    fn record_id(&self) -> Uuid {
        self.id
    }
}

impl FieldAccess for Template {
    fn value(&self, field: Field) -> Option<Value> {
        match field {
            Field::Name => Some(Value::Str(self.name.clone())),
            Field::Description => self.description.clone().map(Value::Str),
            Field::Category => self.category.clone().map(Value::Str),
            Field::Status => Some(Value::Str(self.status.to_string())),
            Field::IsActive => Some(Value::Bool(self.is_active)),
            Field::Order => Some(Value::Int(self.order)),
            Field::CreatedAt => Some(Value::Date(self.created_at)),
            Field::UpdatedAt => Some(Value::Date(self.updated_at)),
            _ => None,
        }
    }

    fn record_id(&self) -> Uuid {
        self.id
    }
}

impl FieldAccess for MediaAsset {
    fn value(&self, field: Field) -> Option<Value> {
        match field {
            Field::OriginalName => Some(Value::Str(self.original_name.clone())),
            Field::AltText => self.alt_text.clone().map(Value::Str),
            Field::Caption => self.caption.clone().map(Value::Str),
            Field::AssetType => Some(Value::Str(self.asset_type.to_string())),
            Field::MimeType => Some(Value::Str(self.mime_type.clone())),
            Field::FileSize => Some(Value::Int(self.file_size)),
            Field::IsPublic => Some(Value::Bool(self.is_public)),
            Field::Tags => Some(Value::List(self.tags.clone())),
            Field::UploaderId => Some(Value::Str(self.uploader_id.clone())),
            Field::CreatedAt => Some(Value::Date(self.created_at)),
            Field::UpdatedAt => Some(Value::Date(self.updated_at)),
            Field::DeletedAt => self.deleted_at.map(Value::Date),
            _ => None,
        }
    }

    fn record_id(&self) -> Uuid {
        self.id
    }
}

impl FieldAccess for Section {
    fn value(&self, field: Field) -> Option<Value> {
        match field {
            Field::Title => Some(Value::Str(self.title.clone())),
            Field::SectionKey => Some(Value::Str(self.section_key.clone())),
            Field::Content => self.content.clone().map(Value::Str),
            Field::SectionType => Some(Value::Str(self.section_type.clone())),
            Field::PageId => self.page_id.map(|id| Value::Str(id.to_string())),
            Field::IsVisible => Some(Value::Bool(self.is_visible)),
            Field::Order => Some(Value::Int(self.order)),
            Field::CreatedAt => Some(Value::Date(self.created_at)),
            Field::UpdatedAt => Some(Value::Date(self.updated_at)),
            _ => None,
        }
    }

    fn record_id(&self) -> Uuid {
        self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AssetType, ContentStatus};
    use crate::search::filter::FilterSpec;
    use crate::search::query::{media_query, page_query, section_query, template_query};
    use std::collections::HashMap;

    fn filters_from(pairs: &[(&str, &str)]) -> FilterSpec {
        let params: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        FilterSpec::from_params(&params)
    }

    fn page(title: &str, slug: &str) -> Page {
        Page::new(
            title.to_string(),
            slug.to_string(),
            slug.to_string(),
            "author-1".to_string(),
        )
    }

    #[tokio::test]
    async fn test_text_search_matches_any_field() {
        let store = InMemoryStore::new();
        let mut about = page("About Us", "about-us");
        about.meta_description = Some("Learn about our consulting agency".to_string());
        store.insert_page(about);
        store.insert_page(page("Pricing", "pricing"));

        let query = page_query(&filters_from(&[("search", "agency")]));
        let pages = store.find_pages(&query).await.unwrap();

        assert_eq!(pages.len(), 1);
        assert_eq!(pages[0].title, "About Us");
    }

    #[tokio::test]
    async fn test_soft_deleted_pages_are_invisible() {
        let store = InMemoryStore::new();
        store.insert_page(page("Visible", "visible"));
        let mut gone = page("Gone", "gone");
        gone.soft_delete();
        store.insert_page(gone);

        let query = page_query(&filters_from(&[]));
        let pages = store.find_pages(&query).await.unwrap();

        assert_eq!(pages.len(), 1);
        assert_eq!(pages[0].title, "Visible");
    }

    #[tokio::test]
    async fn test_status_filter_single_and_multi() {
        let store = InMemoryStore::new();
        let mut live = page("Live", "live");
        live.publish();
        store.insert_page(live);
        store.insert_page(page("Draft", "draft"));
        let mut archived = page("Archived", "archived");
        archived.status = ContentStatus::Archived;
        store.insert_page(archived);

        let query = page_query(&filters_from(&[("status", "published")]));
        assert_eq!(store.find_pages(&query).await.unwrap().len(), 1);

        let query = page_query(&filters_from(&[("status", "draft,archived")]));
        assert_eq!(store.find_pages(&query).await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_unset_boolean_does_not_constrain() {
        let store = InMemoryStore::new();
        let mut public = page("Public", "public");
        public.is_public = true;
        store.insert_page(public);
        store.insert_page(page("Private", "private"));

        let query = page_query(&filters_from(&[]));
        assert_eq!(store.find_pages(&query).await.unwrap().len(), 2);

        let query = page_query(&filters_from(&[("isPublic", "false")]));
        let pages = store.find_pages(&query).await.unwrap();
        assert_eq!(pages.len(), 1);
        assert_eq!(pages[0].title, "Private");
    }

    #[tokio::test]
    async fn test_invalid_date_matches_nothing_without_error() {
        let store = InMemoryStore::new();
        store.insert_page(page("Anything", "anything"));

        let query = page_query(&filters_from(&[("createdAfter", "not-a-date")]));
        let pages = store.find_pages(&query).await.unwrap();
        assert!(pages.is_empty());
    }

    #[tokio::test]
    async fn test_date_range_bounds() {
        let store = InMemoryStore::new();
        store.insert_page(page("Recent", "recent"));

        let query = page_query(&filters_from(&[("createdAfter", "2020-01-01")]));
        assert_eq!(store.find_pages(&query).await.unwrap().len(), 1);

        let query = page_query(&filters_from(&[("createdBefore", "2020-01-01")]));
        assert!(store.find_pages(&query).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_media_tag_and_size_filters() {
        let store = InMemoryStore::new();
        let mut hero = MediaAsset::new(
            "hero-banner.png".to_string(),
            AssetType::Image,
            "image/png".to_string(),
            500_000,
            "/media/hero-banner.png".to_string(),
            "user-1".to_string(),
        );
        hero.tags = vec!["hero".to_string(), "homepage".to_string()];
        store.insert_media(hero);
        store.insert_media(MediaAsset::new(
            "contract.pdf".to_string(),
            AssetType::Document,
            "application/pdf".to_string(),
            80_000,
            "/media/contract.pdf".to_string(),
            "user-2".to_string(),
        ));

        let query = media_query(&filters_from(&[("tags", "hero")]));
        let assets = store.find_media(&query).await.unwrap();
        assert_eq!(assets.len(), 1);
        assert_eq!(assets[0].original_name, "hero-banner.png");

        let query = media_query(&filters_from(&[("minFileSize", "100000")]));
        let assets = store.find_media(&query).await.unwrap();
        assert_eq!(assets.len(), 1);
        assert_eq!(assets[0].original_name, "hero-banner.png");
    }

    #[tokio::test]
    async fn test_template_default_ordering_uses_order_column() {
        let store = InMemoryStore::new();
        let mut second = Template::new("Second".to_string());
        second.order = 2;
        let mut first = Template::new("First".to_string());
        first.order = 1;
        store.insert_template(second);
        store.insert_template(first);

        let query = template_query(&filters_from(&[]));
        let templates = store.find_templates(&query).await.unwrap();

        assert_eq!(templates[0].name, "First");
        assert_eq!(templates[1].name, "Second");
    }

    #[tokio::test]
    async fn test_pagination_skip_take() {
        let store = InMemoryStore::new();
        for i in 0..25 {
            let mut section = Section::new(
                format!("key-{i:02}"),
                format!("Section {i:02}"),
                "hero".to_string(),
            );
            section.order = i;
            store.insert_section(section);
        }

        let query = section_query(&filters_from(&[("page", "2"), ("limit", "10")]));
        let sections = store.find_sections(&query).await.unwrap();

        assert_eq!(sections.len(), 10);
        assert_eq!(sections[0].title, "Section 10");
    }

    #[tokio::test]
    async fn test_list_titles() {
        let store = InMemoryStore::new();
        store.insert_page(page("Beta", "beta"));
        store.insert_page(page("Alpha", "alpha"));
        let mut deleted = page("Deleted", "deleted");
        deleted.soft_delete();
        store.insert_page(deleted);

        let titles = store.list_titles(EntityKind::Page).await.unwrap();
        assert_eq!(titles, vec!["Alpha".to_string(), "Beta".to_string()]);
    }
}
