use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use uuid::Uuid;
use validator::Validate;

/// Broad classification of a media asset
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, EnumString, Display)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum AssetType {
    Image,
    Video,
    Document,
    Audio,
}

/// Represents an uploaded media asset
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct MediaAsset {
    /// Unique identifier
    pub id: Uuid,

    /// Original filename as uploaded
    #[validate(length(min = 1, max = 500))]
    pub original_name: String,

    /// Accessibility alt text
    pub alt_text: Option<String>,

    /// Editorial caption
    pub caption: Option<String>,

    /// Asset classification
    pub asset_type: AssetType,

    /// MIME type reported at upload time
    pub mime_type: String,

    /// File size in bytes
    pub file_size: i64,

    /// Public URL of the stored file
    pub url: String,

    /// Thumbnail URL, when a thumbnail was generated
    pub thumbnail_url: Option<String>,

    /// Whether the asset is publicly reachable
    pub is_public: bool,

    /// Free-form tags
    pub tags: Vec<String>,

    /// Uploading user id
    pub uploader_id: String,

    /// Creation timestamp
    pub created_at: DateTime<Utc>,

    /// Last update timestamp
    pub updated_at: DateTime<Utc>,

    /// Soft-delete marker; a non-null value hides the asset from all queries
    pub deleted_at: Option<DateTime<Utc>>,
}

impl MediaAsset {
    /// Create a new media asset record
    pub fn new(
        original_name: String,
        asset_type: AssetType,
        mime_type: String,
        file_size: i64,
        url: String,
        uploader_id: String,
    ) -> Self {
        let now = Utc::now();

        Self {
            id: Uuid::new_v4(),
            original_name,
            alt_text: None,
            caption: None,
            asset_type,
            mime_type,
            file_size,
            url,
            thumbnail_url: None,
            is_public: true,
            tags: Vec::new(),
            uploader_id,
            created_at: now,
            updated_at: now,
            deleted_at: None,
        }
    }

    /// Soft-delete the asset
    pub fn soft_delete(&mut self) {
        let now = Utc::now();
        self.deleted_at = Some(now);
        self.updated_at = now;
    }
}
