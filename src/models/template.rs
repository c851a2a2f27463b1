use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::models::ContentStatus;

/// Represents a reusable page template
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct Template {
    /// Unique identifier
    pub id: Uuid,

    /// Template name
    #[validate(length(min = 1, max = 255))]
    pub name: String,

    /// What the template is for
    pub description: Option<String>,

    /// Category grouping (landing, email, blog, ...)
    pub category: Option<String>,

    /// Publication status
    pub status: ContentStatus,

    /// Whether the template can be applied to new pages
    pub is_active: bool,

    /// Display ordinal in pickers
    pub order: i64,

    /// Preview image URL
    pub preview_url: Option<String>,

    /// Creation timestamp
    pub created_at: DateTime<Utc>,

    /// Last update timestamp
    pub updated_at: DateTime<Utc>,
}

impl Template {
    /// Create a new active template
    pub fn new(name: String) -> Self {
        let now = Utc::now();

        Self {
            id: Uuid::new_v4(),
            name,
            description: None,
            category: None,
            status: ContentStatus::Draft,
            is_active: true,
            order: 0,
            preview_url: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Deactivate the template so it no longer appears in pickers
    pub fn deactivate(&mut self) {
        self.is_active = false;
        self.updated_at = Utc::now();
    }
}
