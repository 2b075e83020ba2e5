//! Report submission and its validation rules.

use crate::error::{Result, StoreError};
use crate::session::Session;
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use retrievix_core::validation::{ValidationResult, Validator};
use retrievix_match::{Category, Item, ItemStatus, ItemType};
use serde::{Deserialize, Serialize};

/// Longest accepted title, in characters.
pub const MAX_TITLE_CHARS: usize = 120;

/// Longest accepted description, in characters.
pub const MAX_DESCRIPTION_CHARS: usize = 2000;

/// Accepted image data URI prefixes.
pub const IMAGE_PREFIXES: [&str; 7] = [
    "data:image/jpeg",
    "data:image/png",
    "data:image/gif",
    "data:image/tiff",
    "data:image/bmp",
    "data:image/webp",
    "data:image/svg+xml",
];

/// A lost or found report as submitted by a user.
///
/// Carries no id, owner or status: the store assigns the id, the owner comes
/// from the [`Session`], and new reports always start active.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewItem {
    #[serde(rename = "type")]
    pub item_type: ItemType,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub contact_info: String,
    /// Optional image as a data URI
    #[serde(default)]
    pub image: String,
}

impl NewItem {
    pub fn new(item_type: ItemType) -> Self {
        Self {
            item_type,
            title: String::new(),
            category: String::new(),
            description: String::new(),
            location: String::new(),
            date: String::new(),
            contact_info: String::new(),
            image: String::new(),
        }
    }

    /// Every rule, with all failures collected.
    pub fn validate(&self) -> ValidationResult {
        let categories = Category::labels();

        let mut v = Validator::new()
            .required("title", &self.title)
            .max_chars("title", &self.title, MAX_TITLE_CHARS)
            .required("category", &self.category)
            .required("description", &self.description)
            .max_chars("description", &self.description, MAX_DESCRIPTION_CHARS)
            .required("location", &self.location)
            .required("date", &self.date)
            .required("contactInfo", &self.contact_info)
            .warn_if("image", self.image.is_empty(), "no image attached");

        if !self.category.trim().is_empty() {
            v = v.one_of("category", &self.category, &categories);
        }
        if !self.date.trim().is_empty() {
            v = v.date("date", &self.date);
        }
        if !self.image.is_empty() {
            v = v
                .prefixed_by("image", &self.image, &IMAGE_PREFIXES)
                .custom(
                    "image",
                    has_valid_payload(&self.image),
                    "image data is not valid base64",
                );
        }

        v.validate()
    }

    /// Validate, failing with every problem in one message.
    pub fn check(&self) -> Result<()> {
        let report = self.validate();
        if report.is_valid() {
            Ok(())
        } else {
            Err(StoreError::Validation(report.summary()))
        }
    }

    /// The stored record for this report.
    pub fn into_item(self, id: String, session: &Session) -> Item {
        Item {
            id,
            title: self.title.trim().to_string(),
            category: self.category,
            description: self.description.trim().to_string(),
            location: self.location.trim().to_string(),
            item_type: self.item_type,
            date: self.date,
            contact_info: self.contact_info.trim().to_string(),
            user_id: session.user_id.clone(),
            image: self.image,
            status: ItemStatus::Active,
        }
    }
}

/// Base64 data URIs must decode; other encodings (e.g. inline SVG) are only
/// prefix-checked.
fn has_valid_payload(image: &str) -> bool {
    match image.split_once(',') {
        Some((header, payload)) if header.ends_with(";base64") => {
            !payload.is_empty() && STANDARD.decode(payload.trim()).is_ok()
        }
        Some(_) => true,
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wallet() -> NewItem {
        NewItem {
            title: "Brown wallet".into(),
            category: "Accessories".into(),
            description: "leather wallet with two cards".into(),
            location: "Central Station".into(),
            date: "2024-05-02".into(),
            contact_info: "ana@example.com".into(),
            ..NewItem::new(ItemType::Lost)
        }
    }

    #[test]
    fn test_valid_report() {
        let report = wallet().validate();
        assert!(report.is_valid(), "{}", report.summary());
        assert_eq!(report.warnings().len(), 1);
    }

    #[test]
    fn test_missing_fields_all_reported() {
        let err = NewItem::new(ItemType::Found).check().unwrap_err();
        let StoreError::Validation(message) = err else {
            panic!("expected a validation error");
        };
        for field in ["title", "category", "description", "location", "date", "contactInfo"] {
            assert!(message.contains(field), "{field} missing from: {message}");
        }
    }

    #[test]
    fn test_category_must_be_known() {
        let item = NewItem {
            category: "Pets".into(),
            ..wallet()
        };
        assert!(!item.validate().is_valid());
    }

    #[test]
    fn test_date_format() {
        let item = NewItem {
            date: "02/05/2024".into(),
            ..wallet()
        };
        assert_eq!(item.validate().errors()[0].field, "date");
    }

    #[test]
    fn test_length_limits() {
        let item = NewItem {
            title: "x".repeat(MAX_TITLE_CHARS + 1),
            description: "y".repeat(MAX_DESCRIPTION_CHARS + 1),
            ..wallet()
        };
        assert_eq!(item.validate().errors().len(), 2);
    }

    #[test]
    fn test_image_rules() {
        let ok = NewItem {
            image: "data:image/png;base64,iVBORw0KGgo=".into(),
            ..wallet()
        };
        assert!(ok.validate().is_valid());

        let svg = NewItem {
            image: "data:image/svg+xml;utf8,<svg></svg>".into(),
            ..wallet()
        };
        assert!(svg.validate().is_valid());

        let remote = NewItem {
            image: "https://example.org/wallet.png".into(),
            ..wallet()
        };
        assert!(!remote.validate().is_valid());

        let corrupt = NewItem {
            image: "data:image/jpeg;base64,@@not base64@@".into(),
            ..wallet()
        };
        assert!(!corrupt.validate().is_valid());
    }

    #[test]
    fn test_owner_comes_from_session() {
        let item = wallet().into_item("L-1".into(), &Session::new("u-7"));
        assert_eq!(item.user_id, "u-7");
        assert_eq!(item.status, ItemStatus::Active);
        assert_eq!(item.item_type, ItemType::Lost);
    }
}
