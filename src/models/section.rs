use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// Represents a reusable content section (hero, testimonial, CTA, ...)
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct Section {
    /// Unique identifier
    pub id: Uuid,

    /// Stable lookup key used by the rendering layer
    #[validate(length(min = 1, max = 255))]
    pub section_key: String,

    /// Section title
    #[validate(length(min = 1, max = 500))]
    pub title: String,

    /// Body content (markdown or rich text, opaque here)
    pub content: Option<String>,

    /// Section type (hero, features, testimonial, ...)
    pub section_type: String,

    /// Owning page, when the section is page-bound
    pub page_id: Option<Uuid>,

    /// Whether the section renders on the site
    pub is_visible: bool,

    /// Render ordinal within the owning page
    pub order: i64,

    /// Creation timestamp
    pub created_at: DateTime<Utc>,

    /// Last update timestamp
    pub updated_at: DateTime<Utc>,
}

impl Section {
    /// Create a new visible section
    pub fn new(section_key: String, title: String, section_type: String) -> Self {
        let now = Utc::now();

        Self {
            id: Uuid::new_v4(),
            section_key,
            title,
            content: None,
            section_type,
            page_id: None,
            is_visible: true,
            order: 0,
            created_at: now,
            updated_at: now,
        }
    }

    /// Hide the section without deleting it
    pub fn hide(&mut self) {
        self.is_visible = false;
        self.updated_at = Utc::now();
    }
}
