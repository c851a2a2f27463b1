use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::models::ContentStatus;

/// Represents a CMS page
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct Page {
    /// Unique identifier
    pub id: Uuid,

    /// Human-readable title
    #[validate(length(min = 1, max = 500))]
    pub title: String,

    /// URL slug
    #[validate(length(min = 1, max = 255))]
    pub slug: String,

    /// Stable lookup key used by the rendering layer
    #[validate(length(min = 1, max = 255))]
    pub page_key: String,

    /// SEO meta description
    pub meta_description: Option<String>,

    /// SEO meta keywords
    pub meta_keywords: Option<String>,

    /// Publication status
    pub status: ContentStatus,

    /// Page type (landing, blog, service, ...)
    pub page_type: String,

    /// Optional category grouping
    pub category: Option<String>,

    /// Author user id
    pub author_id: String,

    /// Whether the page is publicly reachable
    pub is_public: bool,

    /// SEO audit score, 0-100
    pub seo_score: i64,

    /// Creation timestamp
    pub created_at: DateTime<Utc>,

    /// Last update timestamp
    pub updated_at: DateTime<Utc>,

    /// First publication timestamp
    pub published_at: Option<DateTime<Utc>>,

    /// Soft-delete marker; a non-null value hides the page from all queries
    pub deleted_at: Option<DateTime<Utc>>,
}

impl Page {
    /// Create a new draft page
    pub fn new(title: String, slug: String, page_key: String, author_id: String) -> Self {
        let now = Utc::now();

        Self {
            id: Uuid::new_v4(),
            title,
            slug,
            page_key,
            meta_description: None,
            meta_keywords: None,
            status: ContentStatus::Draft,
            page_type: "standard".to_string(),
            category: None,
            author_id,
            is_public: false,
            seo_score: 0,
            created_at: now,
            updated_at: now,
            published_at: None,
            deleted_at: None,
        }
    }

    /// Publish the page
    pub fn publish(&mut self) {
        let now = Utc::now();
        self.status = ContentStatus::Published;
        self.is_public = true;
        self.published_at.get_or_insert(now);
        self.updated_at = now;
    }

    /// Soft-delete the page
    pub fn soft_delete(&mut self) {
        let now = Utc::now();
        self.deleted_at = Some(now);
        self.updated_at = now;
    }

    /// Check whether the page is live
    pub fn is_live(&self) -> bool {
        self.status == ContentStatus::Published && self.deleted_at.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_creation() {
        let page = Page::new(
            "About Us".to_string(),
            "about-us".to_string(),
            "about".to_string(),
            "user-1".to_string(),
        );

        assert_eq!(page.status, ContentStatus::Draft);
        assert!(!page.is_public);
        assert!(page.published_at.is_none());
        assert!(!page.is_live());
    }

    #[test]
    fn test_page_publish() {
        let mut page = Page::new(
            "Home".to_string(),
            "home".to_string(),
            "home".to_string(),
            "user-1".to_string(),
        );

        page.publish();

        assert_eq!(page.status, ContentStatus::Published);
        assert!(page.is_public);
        assert!(page.published_at.is_some());
        assert!(page.is_live());
    }

    #[test]
    fn test_blank_title_fails_validation() {
        use validator::Validate;

        let mut page = Page::new(
            "Valid".to_string(),
            "valid".to_string(),
            "valid".to_string(),
            "user-1".to_string(),
        );
        assert!(page.validate().is_ok());

        page.title = String::new();
        assert!(page.validate().is_err());
    }

    #[test]
    fn test_soft_delete_hides_live_page() {
        let mut page = Page::new(
            "Old Promo".to_string(),
            "old-promo".to_string(),
            "promo".to_string(),
            "user-2".to_string(),
        );
        page.publish();
        page.soft_delete();

        assert!(page.deleted_at.is_some());
        assert!(!page.is_live());
    }
}
