pub mod media;
pub mod page;
pub mod section;
pub mod template;

pub use media::{AssetType, MediaAsset};
pub use page::Page;
pub use section::Section;
pub use template::Template;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// The kinds of content records the platform can search
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, EnumString, Display)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum EntityKind {
    Page,
    Template,
    Media,
    Section,
}

impl EntityKind {
    /// All kinds, in the canonical iteration order used by multi-kind
    /// operations. The order is part of the result-ordering contract:
    /// score ties keep the relative order kinds were searched in.
    pub const ALL: [EntityKind; 4] = [
        EntityKind::Page,
        EntityKind::Template,
        EntityKind::Media,
        EntityKind::Section,
    ];
}

/// Publication status shared by pages and templates
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, EnumString, Display)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum ContentStatus {
    Draft,
    Published,
    Archived,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_entity_kind_roundtrip() {
        assert_eq!(EntityKind::Page.to_string(), "page");
        assert_eq!(EntityKind::from_str("media").unwrap(), EntityKind::Media);
        assert_eq!(EntityKind::from_str("Template").unwrap(), EntityKind::Template);
        assert!(EntityKind::from_str("widget").is_err());
    }

    #[test]
    fn test_kind_order_is_fixed() {
        assert_eq!(
            EntityKind::ALL,
            [
                EntityKind::Page,
                EntityKind::Template,
                EntityKind::Media,
                EntityKind::Section
            ]
        );
    }

    #[test]
    fn test_status_display() {
        assert_eq!(ContentStatus::Draft.to_string(), "draft");
        assert_eq!(ContentStatus::from_str("published").unwrap(), ContentStatus::Published);
    }
}
