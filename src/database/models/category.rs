use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::types::deserialize_nullable;

#[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
pub struct Category {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub image: Option<String>,
}

#[derive(Debug, Clone)]
pub struct NewCategory {
    pub name: String,
    pub description: Option<String>,
    pub image: Option<String>,
}

/// Partial update: absent fields stay untouched, `null` clears a nullable field
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CategoryUpdate {
    pub name: Option<String>,
    #[serde(default, deserialize_with = "deserialize_nullable")]
    pub description: Option<Option<String>>,
    #[serde(default, deserialize_with = "deserialize_nullable")]
    pub image: Option<Option<String>>,
}

impl Category {
    pub fn apply(&mut self, update: CategoryUpdate) {
        if let Some(name) = update.name {
            self.name = name;
        }
        if let Some(description) = update.description {
            self.description = description;
        }
        if let Some(image) = update.image {
            self.image = image;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shoes() -> Category {
        Category {
            id: 1,
            name: "Shoes".to_string(),
            description: Some("Footwear".to_string()),
            image: Some("shoes.png".to_string()),
        }
    }

    #[test]
    fn apply_only_touches_present_fields() {
        let mut category = shoes();
        let update: CategoryUpdate =
            serde_json::from_str(r#"{"name": "Boots", "image": null}"#).unwrap();
        category.apply(update);

        assert_eq!(category.name, "Boots");
        assert_eq!(category.description.as_deref(), Some("Footwear"));
        assert_eq!(category.image, None);
    }

    #[test]
    fn empty_update_is_a_no_op() {
        let mut category = shoes();
        category.apply(CategoryUpdate::default());
        assert_eq!(category, shoes());
    }
}
