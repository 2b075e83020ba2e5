//! Item reports and the closed category set.

use crate::error::MatchError;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

/// Whether a report describes something lost or something found.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemType {
    /// Reported by the owner
    Lost,
    /// Reported by the finder
    Found,
}

impl ItemType {
    /// The type whose items are match candidates for this one.
    pub fn opposite(self) -> Self {
        match self {
            ItemType::Lost => ItemType::Found,
            ItemType::Found => ItemType::Lost,
        }
    }

    /// Lowercase wire name.
    pub fn as_str(self) -> &'static str {
        match self {
            ItemType::Lost => "lost",
            ItemType::Found => "found",
        }
    }
}

impl fmt::Display for ItemType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ItemType {
    type Err = MatchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "lost" => Ok(ItemType::Lost),
            "found" => Ok(ItemType::Found),
            _ => Err(MatchError::UnknownItemType(s.to_string())),
        }
    }
}

/// Report lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemStatus {
    #[default]
    Active,
    Resolved,
}

/// The closed set of item categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Electronics,
    Clothing,
    Accessories,
    Documents,
    Keys,
    Bags,
    Jewelry,
    #[serde(rename = "Sports Equipment")]
    SportsEquipment,
    Books,
    Other,
}

impl Category {
    /// Every category, in display order.
    pub const ALL: [Category; 10] = [
        Category::Electronics,
        Category::Clothing,
        Category::Accessories,
        Category::Documents,
        Category::Keys,
        Category::Bags,
        Category::Jewelry,
        Category::SportsEquipment,
        Category::Books,
        Category::Other,
    ];

    /// Label as stored on items and shown to users.
    pub fn label(self) -> &'static str {
        match self {
            Category::Electronics => "Electronics",
            Category::Clothing => "Clothing",
            Category::Accessories => "Accessories",
            Category::Documents => "Documents",
            Category::Keys => "Keys",
            Category::Bags => "Bags",
            Category::Jewelry => "Jewelry",
            Category::SportsEquipment => "Sports Equipment",
            Category::Books => "Books",
            Category::Other => "Other",
        }
    }

    /// All labels, for validation messages and `one_of` checks.
    pub fn labels() -> Vec<&'static str> {
        Self::ALL.iter().map(|c| c.label()).collect()
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Category {
    type Err = MatchError;

    /// Case-insensitive on the label; surrounding whitespace is ignored.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::ALL
            .into_iter()
            .find(|c| c.label().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| MatchError::UnknownCategory(s.to_string()))
    }
}

/// A lost or found report.
///
/// Only `id` and `type` are required when deserializing. Text fields that are
/// absent or `null` become empty strings, so scoring never has to special-case
/// missing data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    #[serde(alias = "_id")]
    pub id: String,

    #[serde(default, deserialize_with = "text")]
    pub title: String,

    /// Category label; normally one of [`Category::ALL`]
    #[serde(default, deserialize_with = "text")]
    pub category: String,

    #[serde(default, deserialize_with = "text")]
    pub description: String,

    #[serde(default, deserialize_with = "text")]
    pub location: String,

    #[serde(rename = "type")]
    pub item_type: ItemType,

    /// Calendar date, `YYYY-MM-DD`
    #[serde(default, deserialize_with = "text", alias = "dateLost", alias = "dateFound")]
    pub date: String,

    #[serde(default, deserialize_with = "text")]
    pub contact_info: String,

    /// Owning user; not an owning reference
    #[serde(default, deserialize_with = "text")]
    pub user_id: String,

    /// Image as a data URI, empty when none was attached
    #[serde(default, deserialize_with = "text")]
    pub image: String,

    #[serde(default)]
    pub status: ItemStatus,
}

fn text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

impl Item {
    /// A bare item with only identity and type set.
    pub fn new(id: impl Into<String>, item_type: ItemType) -> Self {
        Self {
            id: id.into(),
            title: String::new(),
            category: String::new(),
            description: String::new(),
            location: String::new(),
            item_type,
            date: String::new(),
            contact_info: String::new(),
            user_id: String::new(),
            image: String::new(),
            status: ItemStatus::Active,
        }
    }

    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    #[must_use]
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    #[must_use]
    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = location.into();
        self
    }

    #[must_use]
    pub fn with_date(mut self, date: impl Into<String>) -> Self {
        self.date = date.into();
        self
    }

    #[must_use]
    pub fn with_owner(mut self, user_id: impl Into<String>) -> Self {
        self.user_id = user_id.into();
        self
    }

    /// Parsed category, if the label is one of the closed set.
    pub fn category_kind(&self) -> Option<Category> {
        self.category.parse().ok()
    }

    pub fn is_active(&self) -> bool {
        self.status == ItemStatus::Active
    }

    pub fn is_owned_by(&self, user_id: &str) -> bool {
        !self.user_id.is_empty() && self.user_id == user_id
    }
}
