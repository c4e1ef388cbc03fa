use crate::errors::{StoreError, StoreResult};
use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

/// Desirability tier of a gift, independent of its price or category.
/// Drives display styling only.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    /// Dream gift.
    Sonho,
    /// Dearly wanted.
    Querido,
    /// Would be nice. Also the decode target for unrecognized wire values.
    #[default]
    #[serde(other)]
    Desejo,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Moda,
    Beleza,
    Livros,
    Acessorios,
    /// Catch-all bucket. Also the decode target for unrecognized wire
    /// values.
    #[default]
    #[serde(other)]
    Outros,
}

/// One wishlist entry, as stored.
///
/// `price` is free-form display text and is never parsed as a number.
/// `image` is either a data URI (embedded upload) or an external URL, empty
/// when absent. Timestamps are RFC 3339 strings; `created_at` never changes
/// after creation, `updated_at` is refreshed by every update.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Gift {
    pub id: String,
    pub name: String,
    pub price: String,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub category: Category,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub store_link: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub observation: Option<String>,
    #[serde(default)]
    pub received: bool,
    #[serde(default)]
    pub priority: Priority,
    pub created_at: String,
    pub updated_at: String,
}

/// Caller-supplied fields for a new record. The store assigns `id`,
/// `created_at` and `updated_at` at creation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GiftDraft {
    pub name: String,
    pub price: String,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub category: Category,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub store_link: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub observation: Option<String>,
    #[serde(default)]
    pub received: bool,
    #[serde(default)]
    pub priority: Priority,
}

impl GiftDraft {
    /// Check the fields the UI must fill in before submitting. The stores
    /// themselves accept any draft; this runs above the data-access layer.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::InvalidInput`] when `name` or `price` is empty
    /// or whitespace.
    pub fn validate(&self) -> StoreResult<()> {
        if self.name.trim().is_empty() {
            return Err(StoreError::InvalidInput("name must not be empty".into()));
        }
        if self.price.trim().is_empty() {
            return Err(StoreError::InvalidInput("price must not be empty".into()));
        }
        Ok(())
    }
}

/// Partial update for an existing record. Fields left as `None` keep their
/// stored value; `id` and `created_at` can never be patched. The store
/// refreshes `updated_at` on every update.
#[derive(Debug, Clone, Default, Serialize)]
pub struct GiftPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<Category>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub store_link: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub observation: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub received: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<Priority>,
}

impl GiftPatch {
    /// Merge the set fields onto `gift`, leaving `updated_at` to the caller.
    pub(crate) fn apply(&self, gift: &mut Gift) {
        if let Some(name) = &self.name {
            gift.name = name.clone();
        }
        if let Some(price) = &self.price {
            gift.price = price.clone();
        }
        if let Some(image) = &self.image {
            gift.image = image.clone();
        }
        if let Some(category) = self.category {
            gift.category = category;
        }
        if let Some(store_link) = &self.store_link {
            gift.store_link = Some(store_link.clone());
        }
        if let Some(observation) = &self.observation {
            gift.observation = Some(observation.clone());
        }
        if let Some(received) = self.received {
            gift.received = received;
        }
        if let Some(priority) = self.priority {
            gift.priority = priority;
        }
    }
}

/// Current time as a fixed-width RFC 3339 string, so lexicographic order
/// matches chronological order.
pub(crate) fn now_timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn priority_uses_original_wire_strings() {
        assert_eq!(
            serde_json::to_string(&Priority::Sonho).unwrap(),
            "\"sonho\""
        );
        assert_eq!(
            serde_json::from_str::<Priority>("\"querido\"").unwrap(),
            Priority::Querido
        );
    }

    #[test]
    fn unknown_enum_values_decode_to_defaults() {
        assert_eq!(
            serde_json::from_str::<Priority>("\"urgentissimo\"").unwrap(),
            Priority::Desejo
        );
        assert_eq!(
            serde_json::from_str::<Category>("\"eletronicos\"").unwrap(),
            Category::Outros
        );
    }

    #[test]
    fn patch_serialization_skips_unset_fields() {
        let patch = GiftPatch {
            received: Some(true),
            ..Default::default()
        };
        assert_eq!(
            serde_json::to_string(&patch).unwrap(),
            "{\"received\":true}"
        );
    }

    #[test]
    fn patch_apply_leaves_other_fields_untouched() {
        let mut gift = Gift {
            id: "1".into(),
            name: "Bolsa rosa".into(),
            price: "150,00".into(),
            image: String::new(),
            category: Category::Moda,
            store_link: None,
            observation: None,
            received: false,
            priority: Priority::Sonho,
            created_at: "2026-01-01T00:00:00.000000Z".into(),
            updated_at: "2026-01-01T00:00:00.000000Z".into(),
        };
        let patch = GiftPatch {
            received: Some(true),
            ..Default::default()
        };
        patch.apply(&mut gift);
        assert!(gift.received);
        assert_eq!(gift.name, "Bolsa rosa");
        assert_eq!(gift.priority, Priority::Sonho);
    }

    #[test]
    fn draft_validation_requires_name_and_price() {
        let draft = GiftDraft {
            name: "  ".into(),
            price: "150,00".into(),
            ..Default::default()
        };
        assert!(matches!(
            draft.validate(),
            Err(StoreError::InvalidInput(_))
        ));

        let draft = GiftDraft {
            name: "Bolsa rosa".into(),
            price: String::new(),
            ..Default::default()
        };
        assert!(matches!(
            draft.validate(),
            Err(StoreError::InvalidInput(_))
        ));

        let draft = GiftDraft {
            name: "Bolsa rosa".into(),
            price: "150,00".into(),
            ..Default::default()
        };
        assert!(draft.validate().is_ok());
    }

    #[test]
    fn gift_tolerates_missing_optional_columns() {
        let gift: Gift = serde_json::from_str(
            "{\"id\":\"1\",\"name\":\"Perfume\",\"price\":\"99,90\",\
             \"created_at\":\"2026-01-01T00:00:00.000000Z\",\
             \"updated_at\":\"2026-01-01T00:00:00.000000Z\"}",
        )
        .unwrap();
        assert_eq!(gift.category, Category::Outros);
        assert_eq!(gift.priority, Priority::Desejo);
        assert!(!gift.received);
        assert!(gift.image.is_empty());
        assert!(gift.store_link.is_none());
    }
}
