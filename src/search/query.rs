//! Query building: typed FilterSpec into per-entity-kind query predicates

use std::collections::HashMap;

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use strum::Display;

use crate::models::EntityKind;
use crate::search::filter::FilterSpec;

/// Smallest page size a caller can force
pub const MIN_LIMIT: usize = 1;

/// Largest page size a caller can force
pub const MAX_LIMIT: usize = 100;

/// Sort direction
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum SortOrder {
    Ascending,
    Descending,
}

impl SortOrder {
    /// Lenient parse: "asc" (any case) ascends, everything else descends
    pub fn parse(raw: &str) -> Self {
        if raw.trim().eq_ignore_ascii_case("asc") {
            SortOrder::Ascending
        } else {
            SortOrder::Descending
        }
    }
}

/// A column a predicate or sort key can reference. One namespace across
/// all entity kinds; each kind's builder only emits the fields that kind
/// actually has.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
#[strum(serialize_all = "snake_case")]
pub enum Field {
    // text
    Title,
    Slug,
    PageKey,
    MetaDescription,
    MetaKeywords,
    Name,
    Description,
    OriginalName,
    AltText,
    Caption,
    MimeType,
    Content,
    SectionKey,
    // enumerated / ids
    Status,
    PageType,
    Category,
    AssetType,
    SectionType,
    AuthorId,
    UploaderId,
    PageId,
    Tags,
    // flags
    IsPublic,
    IsActive,
    IsVisible,
    // numeric
    SeoScore,
    FileSize,
    Order,
    // timestamps
    CreatedAt,
    UpdatedAt,
    PublishedAt,
    DeletedAt,
}

/// A parsed date-range bound.
///
/// Unparseable caller input becomes `Invalid`, which no record satisfies:
/// the comparison is consistently indeterminate instead of an error, so a
/// garbage date narrows results to nothing rather than failing the
/// request.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DateBound {
    Valid(DateTime<Utc>),
    Invalid,
}

impl DateBound {
    /// Parse a caller-supplied date string. Accepts RFC 3339, a bare
    /// date, or a bare date-time, all interpreted as UTC.
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();

        if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
            return DateBound::Valid(dt.with_timezone(&Utc));
        }
        if let Ok(dt) = NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%dT%H:%M:%S") {
            return DateBound::Valid(dt.and_utc());
        }
        if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
            if let Some(dt) = date.and_hms_opt(0, 0, 0) {
                return DateBound::Valid(dt.and_utc());
            }
        }

        DateBound::Invalid
    }
}

/// A typed query predicate tree. This is the shape handed to the
/// persistence collaborator; it never contains loosely typed values.
#[derive(Debug, Clone, PartialEq)]
pub enum Predicate {
    /// Every child must hold
    All(Vec<Predicate>),

    /// At least one child must hold
    Any(Vec<Predicate>),

    /// Case-insensitive substring match on a text (or text-list) field
    Contains { field: Field, needle: String },

    /// Exact match. On a list field: any element equals the value.
    Equals { field: Field, value: String },

    /// Membership. On a list field: any element is in the set.
    InSet { field: Field, values: Vec<String> },

    /// The field carries no value (soft-delete markers, optional columns)
    IsNull(Field),

    /// Boolean field equality
    BoolIs { field: Field, value: bool },

    /// Numeric lower bound (inclusive)
    IntAtLeast { field: Field, value: i64 },

    /// Numeric upper bound (inclusive)
    IntAtMost { field: Field, value: i64 },

    /// Timestamp lower bound (inclusive)
    DateAtLeast { field: Field, bound: DateBound },

    /// Timestamp upper bound (inclusive)
    DateAtMost { field: Field, bound: DateBound },
}

/// A single ordering key
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SortKey {
    pub field: Field,
    pub order: SortOrder,
}

/// A complete find-many request for one entity kind: predicate plus
/// ordering plus pagination, ready to hand to the persistence layer.
#[derive(Debug, Clone, PartialEq)]
pub struct ContentQuery {
    pub predicate: Predicate,
    pub order_by: Vec<SortKey>,
    pub take: usize,
    pub skip: usize,
}

/// Text fields searched for pages, most important first
const PAGE_SEARCH_FIELDS: [Field; 5] = [
    Field::Title,
    Field::Slug,
    Field::MetaDescription,
    Field::MetaKeywords,
    Field::PageKey,
];

/// Text fields searched for templates
const TEMPLATE_SEARCH_FIELDS: [Field; 3] = [Field::Name, Field::Description, Field::Category];

/// Text fields searched for media assets
const MEDIA_SEARCH_FIELDS: [Field; 4] = [
    Field::OriginalName,
    Field::AltText,
    Field::Caption,
    Field::MimeType,
];

/// Text fields searched for sections
const SECTION_SEARCH_FIELDS: [Field; 3] = [Field::Title, Field::SectionKey, Field::Content];

/// Caller-facing sort aliases, resolved per entity kind. "title" always
/// maps to the kind's title-like column.
static SORT_ALIASES: Lazy<HashMap<EntityKind, Vec<(&'static str, Field)>>> = Lazy::new(|| {
    HashMap::from([
        (
            EntityKind::Page,
            vec![
                ("title", Field::Title),
                ("slug", Field::Slug),
                ("created", Field::CreatedAt),
                ("updated", Field::UpdatedAt),
                ("published", Field::PublishedAt),
                ("seo", Field::SeoScore),
                ("status", Field::Status),
            ],
        ),
        (
            EntityKind::Template,
            vec![
                ("title", Field::Name),
                ("name", Field::Name),
                ("created", Field::CreatedAt),
                ("updated", Field::UpdatedAt),
                ("order", Field::Order),
                ("category", Field::Category),
            ],
        ),
        (
            EntityKind::Media,
            vec![
                ("title", Field::OriginalName),
                ("name", Field::OriginalName),
                ("size", Field::FileSize),
                ("created", Field::CreatedAt),
                ("updated", Field::UpdatedAt),
                ("type", Field::AssetType),
            ],
        ),
        (
            EntityKind::Section,
            vec![
                ("title", Field::Title),
                ("order", Field::Order),
                ("created", Field::CreatedAt),
                ("updated", Field::UpdatedAt),
                ("type", Field::SectionType),
            ],
        ),
    ])
});

/// Build the query for one entity kind
pub fn query_for(kind: EntityKind, filters: &FilterSpec) -> ContentQuery {
    match kind {
        EntityKind::Page => page_query(filters),
        EntityKind::Template => template_query(filters),
        EntityKind::Media => media_query(filters),
        EntityKind::Section => section_query(filters),
    }
}

/// Build a page query
pub fn page_query(filters: &FilterSpec) -> ContentQuery {
    // Soft-deleted pages are invisible no matter what the caller asks for
    let mut clauses = vec![Predicate::IsNull(Field::DeletedAt)];

    if let Some(text) = text_predicate(&PAGE_SEARCH_FIELDS, filters.search.as_deref()) {
        clauses.push(text);
    }
    push_values(&mut clauses, Field::Status, &filters.status);
    push_values(&mut clauses, Field::PageType, &filters.page_type);
    push_values(&mut clauses, Field::Category, &filters.category);
    if let Some(ref author) = filters.author_id {
        clauses.push(Predicate::Equals {
            field: Field::AuthorId,
            value: author.clone(),
        });
    }
    push_flag(&mut clauses, Field::IsPublic, filters.is_public);
    push_date_range(
        &mut clauses,
        Field::CreatedAt,
        &filters.created_after,
        &filters.created_before,
    );
    push_date_range(
        &mut clauses,
        Field::UpdatedAt,
        &filters.updated_after,
        &filters.updated_before,
    );
    push_date_range(
        &mut clauses,
        Field::PublishedAt,
        &filters.published_after,
        &filters.published_before,
    );
    push_int_range(
        &mut clauses,
        Field::SeoScore,
        filters.min_seo_score,
        filters.max_seo_score,
    );

    let (take, skip) = pagination(filters);
    ContentQuery {
        predicate: Predicate::All(clauses),
        order_by: ordering(
            EntityKind::Page,
            filters,
            vec![
                sort_key(Field::UpdatedAt, SortOrder::Descending),
                sort_key(Field::CreatedAt, SortOrder::Descending),
            ],
        ),
        take,
        skip,
    }
}

/// Build a template query
pub fn template_query(filters: &FilterSpec) -> ContentQuery {
    let mut clauses = Vec::new();

    if let Some(text) = text_predicate(&TEMPLATE_SEARCH_FIELDS, filters.search.as_deref()) {
        clauses.push(text);
    }
    push_values(&mut clauses, Field::Status, &filters.status);
    push_values(&mut clauses, Field::Category, &filters.category);
    push_flag(&mut clauses, Field::IsActive, filters.is_active);
    push_date_range(
        &mut clauses,
        Field::CreatedAt,
        &filters.created_after,
        &filters.created_before,
    );
    push_date_range(
        &mut clauses,
        Field::UpdatedAt,
        &filters.updated_after,
        &filters.updated_before,
    );

    let (take, skip) = pagination(filters);
    ContentQuery {
        predicate: Predicate::All(clauses),
        order_by: ordering(
            EntityKind::Template,
            filters,
            vec![
                sort_key(Field::Order, SortOrder::Ascending),
                sort_key(Field::UpdatedAt, SortOrder::Descending),
            ],
        ),
        take,
        skip,
    }
}

/// Build a media-asset query
pub fn media_query(filters: &FilterSpec) -> ContentQuery {
    // Soft-deleted assets are invisible no matter what the caller asks for
    let mut clauses = vec![Predicate::IsNull(Field::DeletedAt)];

    if let Some(text) = text_predicate(&MEDIA_SEARCH_FIELDS, filters.search.as_deref()) {
        clauses.push(text);
    }
    push_values(&mut clauses, Field::AssetType, &filters.asset_type);
    push_values(&mut clauses, Field::Tags, &filters.tags);
    if let Some(ref uploader) = filters.author_id {
        clauses.push(Predicate::Equals {
            field: Field::UploaderId,
            value: uploader.clone(),
        });
    }
    push_flag(&mut clauses, Field::IsPublic, filters.is_public);
    push_int_range(
        &mut clauses,
        Field::FileSize,
        filters.min_file_size,
        filters.max_file_size,
    );
    push_date_range(
        &mut clauses,
        Field::CreatedAt,
        &filters.created_after,
        &filters.created_before,
    );
    push_date_range(
        &mut clauses,
        Field::UpdatedAt,
        &filters.updated_after,
        &filters.updated_before,
    );

    let (take, skip) = pagination(filters);
    ContentQuery {
        predicate: Predicate::All(clauses),
        order_by: ordering(
            EntityKind::Media,
            filters,
            vec![sort_key(Field::CreatedAt, SortOrder::Descending)],
        ),
        take,
        skip,
    }
}

/// Build a section query
pub fn section_query(filters: &FilterSpec) -> ContentQuery {
    let mut clauses = Vec::new();

    if let Some(text) = text_predicate(&SECTION_SEARCH_FIELDS, filters.search.as_deref()) {
        clauses.push(text);
    }
    push_values(&mut clauses, Field::SectionType, &filters.section_type);
    if let Some(ref page_id) = filters.page_id {
        clauses.push(Predicate::Equals {
            field: Field::PageId,
            value: page_id.clone(),
        });
    }
    push_flag(&mut clauses, Field::IsVisible, filters.is_visible);
    push_date_range(
        &mut clauses,
        Field::CreatedAt,
        &filters.created_after,
        &filters.created_before,
    );
    push_date_range(
        &mut clauses,
        Field::UpdatedAt,
        &filters.updated_after,
        &filters.updated_before,
    );

    let (take, skip) = pagination(filters);
    ContentQuery {
        predicate: Predicate::All(clauses),
        order_by: ordering(
            EntityKind::Section,
            filters,
            vec![sort_key(Field::Order, SortOrder::Ascending)],
        ),
        take,
        skip,
    }
}

/// Free-text search: lowercase, split on whitespace, then OR over every
/// (field, term) pair. Any term matching any searchable field admits the
/// record; ranking all-terms matches higher is the scorer's job, not the
/// predicate's.
fn text_predicate(fields: &[Field], search: Option<&str>) -> Option<Predicate> {
    let raw = search?.trim().to_lowercase();
    if raw.is_empty() {
        return None;
    }

    let mut branches = Vec::new();
    for term in raw.split_whitespace() {
        for field in fields {
            branches.push(Predicate::Contains {
                field: *field,
                needle: term.to_string(),
            });
        }
    }

    Some(Predicate::Any(branches))
}

/// Single value -> equality, several -> set membership, none -> nothing
fn push_values(clauses: &mut Vec<Predicate>, field: Field, values: &[String]) {
    match values {
        [] => {}
        [single] => clauses.push(Predicate::Equals {
            field,
            value: single.clone(),
        }),
        many => clauses.push(Predicate::InSet {
            field,
            values: many.to_vec(),
        }),
    }
}

/// Tri-state boolean: only a set flag constrains the field
fn push_flag(clauses: &mut Vec<Predicate>, field: Field, flag: Option<bool>) {
    if let Some(value) = flag {
        clauses.push(Predicate::BoolIs { field, value });
    }
}

fn push_date_range(
    clauses: &mut Vec<Predicate>,
    field: Field,
    after: &Option<String>,
    before: &Option<String>,
) {
    if let Some(raw) = after {
        clauses.push(Predicate::DateAtLeast {
            field,
            bound: DateBound::parse(raw),
        });
    }
    if let Some(raw) = before {
        clauses.push(Predicate::DateAtMost {
            field,
            bound: DateBound::parse(raw),
        });
    }
}

fn push_int_range(clauses: &mut Vec<Predicate>, field: Field, min: Option<i64>, max: Option<i64>) {
    if let Some(min) = min {
        clauses.push(Predicate::IntAtLeast { field, value: min });
    }
    if let Some(max) = max {
        clauses.push(Predicate::IntAtMost { field, value: max });
    }
}

/// Resolve the caller's sort alias, or fall back to the kind's default
/// ordering when no alias (or an unknown one) was given
fn ordering(kind: EntityKind, filters: &FilterSpec, default: Vec<SortKey>) -> Vec<SortKey> {
    if let Some(ref alias) = filters.sort_by {
        let alias = alias.trim();
        let resolved = SORT_ALIASES
            .get(&kind)
            .and_then(|aliases| aliases.iter().copied().find(|(name, _)| *name == alias));
        if let Some((_, field)) = resolved {
            return vec![SortKey {
                field,
                order: filters.sort_order.unwrap_or(SortOrder::Descending),
            }];
        }
    }
    default
}

/// Clamp the page size and derive the row offset
fn pagination(filters: &FilterSpec) -> (usize, usize) {
    let take = filters.limit.clamp(MIN_LIMIT, MAX_LIMIT);
    let skip = if filters.page > 1 {
        (filters.page as usize - 1) * take
    } else {
        0
    };
    (take, skip)
}

fn sort_key(field: Field, order: SortOrder) -> SortKey {
    SortKey { field, order }
}
