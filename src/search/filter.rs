//! Filter parsing: untyped request parameters into a typed FilterSpec

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::search::query::SortOrder;

/// Default page size when the caller supplies none (or garbage)
pub const DEFAULT_LIMIT: usize = 20;

/// Fallback page number for non-numeric `page` input
const DEFAULT_PAGE: u32 = 1;

/// Parsed, typed representation of a caller's filter request.
///
/// Built once per request from query-string parameters and treated as
/// immutable afterwards. Parsing is deliberately lenient: malformed
/// values narrow or widen the result set instead of failing the request,
/// and unrecognized keys are ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterSpec {
    /// Free-text search string
    pub search: Option<String>,

    /// Status filter (one or more values)
    pub status: Vec<String>,

    /// Page type filter
    pub page_type: Vec<String>,

    /// Media asset type filter
    pub asset_type: Vec<String>,

    /// Section type filter
    pub section_type: Vec<String>,

    /// Category filter
    pub category: Vec<String>,

    /// Tag filter (record matches when it carries any of these)
    pub tags: Vec<String>,

    /// Author / owner user id
    pub author_id: Option<String>,

    /// Owning page id (sections)
    pub page_id: Option<String>,

    /// Date-range bounds, kept as raw strings; the query builder converts
    /// them and absorbs unparseable input
    pub created_after: Option<String>,
    pub created_before: Option<String>,
    pub updated_after: Option<String>,
    pub updated_before: Option<String>,
    pub published_after: Option<String>,
    pub published_before: Option<String>,

    /// Tri-state boolean flags. `None` means "don't filter on this at
    /// all" and must stay distinct from `Some(false)`.
    pub is_public: Option<bool>,
    pub is_active: Option<bool>,
    pub is_visible: Option<bool>,

    /// SEO score range
    pub min_seo_score: Option<i64>,
    pub max_seo_score: Option<i64>,

    /// File size range (bytes)
    pub min_file_size: Option<i64>,
    pub max_file_size: Option<i64>,

    /// Sort key alias, resolved per entity kind by the query builder
    pub sort_by: Option<String>,

    /// Sort direction; defaults to descending when unset
    pub sort_order: Option<SortOrder>,

    /// 1-based page number
    pub page: u32,

    /// Requested page size (clamped later by the query builder)
    pub limit: usize,
}

impl Default for FilterSpec {
    fn default() -> Self {
        Self {
            search: None,
            status: Vec::new(),
            page_type: Vec::new(),
            asset_type: Vec::new(),
            section_type: Vec::new(),
            category: Vec::new(),
            tags: Vec::new(),
            author_id: None,
            page_id: None,
            created_after: None,
            created_before: None,
            updated_after: None,
            updated_before: None,
            published_after: None,
            published_before: None,
            is_public: None,
            is_active: None,
            is_visible: None,
            min_seo_score: None,
            max_seo_score: None,
            min_file_size: None,
            max_file_size: None,
            sort_by: None,
            sort_order: None,
            page: DEFAULT_PAGE,
            limit: DEFAULT_LIMIT,
        }
    }
}

impl FilterSpec {
    /// Parse a flat map of request parameters into a FilterSpec.
    ///
    /// Pure function of its input; unknown keys are ignored.
    pub fn from_params(params: &HashMap<String, String>) -> Self {
        Self {
            search: params.get("search").map(|s| s.to_string()),
            status: multi_value(params, "status"),
            page_type: multi_value(params, "pageType"),
            asset_type: multi_value(params, "assetType"),
            section_type: multi_value(params, "sectionType"),
            category: multi_value(params, "category"),
            tags: multi_value(params, "tags"),
            author_id: params.get("authorId").map(|s| s.to_string()),
            page_id: params.get("pageId").map(|s| s.to_string()),
            created_after: params.get("createdAfter").map(|s| s.to_string()),
            created_before: params.get("createdBefore").map(|s| s.to_string()),
            updated_after: params.get("updatedAfter").map(|s| s.to_string()),
            updated_before: params.get("updatedBefore").map(|s| s.to_string()),
            published_after: params.get("publishedAfter").map(|s| s.to_string()),
            published_before: params.get("publishedBefore").map(|s| s.to_string()),
            is_public: bool_flag(params, "isPublic"),
            is_active: bool_flag(params, "isActive"),
            is_visible: bool_flag(params, "isVisible"),
            min_seo_score: int_with_fallback(params, "minSeoScore", 0),
            max_seo_score: int_with_fallback(params, "maxSeoScore", 0),
            min_file_size: int_with_fallback(params, "minFileSize", 0),
            max_file_size: int_with_fallback(params, "maxFileSize", 0),
            sort_by: params.get("sortBy").map(|s| s.to_string()),
            sort_order: params.get("sortOrder").map(|s| SortOrder::parse(s)),
            page: params
                .get("page")
                .map(|v| v.trim().parse().unwrap_or(DEFAULT_PAGE))
                .unwrap_or(DEFAULT_PAGE),
            limit: params
                .get("limit")
                .map(|v| v.trim().parse().unwrap_or(DEFAULT_LIMIT))
                .unwrap_or(DEFAULT_LIMIT),
        }
    }

    /// Render the active filters as ordered, human-readable lines for UI
    /// display. Never parsed back.
    pub fn summary(&self) -> Vec<String> {
        let mut lines = Vec::new();

        if let Some(ref search) = self.search {
            if !search.trim().is_empty() {
                lines.push(format!("Search: \"{}\"", search));
            }
        }
        push_list(&mut lines, "Status", &self.status);
        push_list(&mut lines, "Page type", &self.page_type);
        push_list(&mut lines, "Asset type", &self.asset_type);
        push_list(&mut lines, "Section type", &self.section_type);
        push_list(&mut lines, "Category", &self.category);
        push_list(&mut lines, "Tags", &self.tags);
        if let Some(ref author) = self.author_id {
            lines.push(format!("Author: {}", author));
        }
        push_range(&mut lines, "Created", &self.created_after, &self.created_before);
        push_range(&mut lines, "Updated", &self.updated_after, &self.updated_before);
        push_range(&mut lines, "Published", &self.published_after, &self.published_before);
        push_flag_line(&mut lines, "Public", self.is_public);
        push_flag_line(&mut lines, "Active", self.is_active);
        push_flag_line(&mut lines, "Visible", self.is_visible);
        push_numeric_range(&mut lines, "SEO score", self.min_seo_score, self.max_seo_score);
        push_numeric_range(&mut lines, "File size", self.min_file_size, self.max_file_size);

        lines
    }
}

/// Split a possibly comma-separated parameter into its values
fn multi_value(params: &HashMap<String, String>, key: &str) -> Vec<String> {
    match params.get(key) {
        Some(raw) => raw
            .split(',')
            .map(|part| part.trim().to_string())
            .filter(|part| !part.is_empty())
            .collect(),
        None => Vec::new(),
    }
}

/// Tri-state boolean: present "true" -> Some(true), any other present
/// value -> Some(false), absent -> None
fn bool_flag(params: &HashMap<String, String>, key: &str) -> Option<bool> {
    params.get(key).map(|v| v.trim() == "true")
}

/// Lenient integer parse: absent -> None, non-numeric -> fallback
fn int_with_fallback(params: &HashMap<String, String>, key: &str, fallback: i64) -> Option<i64> {
    params.get(key).map(|v| v.trim().parse().unwrap_or(fallback))
}

fn push_list(lines: &mut Vec<String>, label: &str, values: &[String]) {
    if !values.is_empty() {
        lines.push(format!("{}: {}", label, values.join(", ")));
    }
}

fn push_range(lines: &mut Vec<String>, label: &str, after: &Option<String>, before: &Option<String>) {
    match (after, before) {
        (Some(a), Some(b)) => lines.push(format!("{}: {} - {}", label, a, b)),
        (Some(a), None) => lines.push(format!("{}: after {}", label, a)),
        (None, Some(b)) => lines.push(format!("{}: before {}", label, b)),
        (None, None) => {}
    }
}

fn push_numeric_range(lines: &mut Vec<String>, label: &str, min: Option<i64>, max: Option<i64>) {
    match (min, max) {
        (Some(min), Some(max)) => lines.push(format!("{}: {} - {}", label, min, max)),
        (Some(min), None) => lines.push(format!("{}: >= {}", label, min)),
        (None, Some(max)) => lines.push(format!("{}: <= {}", label, max)),
        (None, None) => {}
    }
}

fn push_flag_line(lines: &mut Vec<String>, label: &str, flag: Option<bool>) {
    if let Some(value) = flag {
        lines.push(format!("{}: {}", label, if value { "yes" } else { "no" }));
    }
}
