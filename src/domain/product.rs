//! Product catalog entity

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A catalog product. Prices are in the smallest currency unit.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub price: i64,
    pub category: String,
    pub image: String,
    pub stock: u32,
    pub featured: bool,
    pub created_at: DateTime<Utc>,
}

impl Product {
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        price: i64,
        category: impl Into<String>,
        image: impl Into<String>,
        stock: u32,
        featured: bool,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            description: description.into(),
            price,
            category: category.into(),
            image: image.into(),
            stock,
            featured,
            created_at: Utc::now(),
        }
    }

    /// Conjunctive filter match: every provided criterion must hold.
    pub fn matches(&self, filter: &ProductFilter) -> bool {
        if let Some(category) = &filter.category {
            // "all" is the catch-all category sent by the storefront
            if category != "all" && &self.category != category {
                return false;
            }
        }
        if let Some(featured) = filter.featured {
            if self.featured != featured {
                return false;
            }
        }
        if let Some(search) = &filter.search {
            let needle = search.to_lowercase();
            if !self.name.to_lowercase().contains(&needle)
                && !self.description.to_lowercase().contains(&needle)
            {
                return false;
            }
        }
        true
    }
}

/// Optional listing criteria, combined conjunctively.
#[derive(Clone, Debug, Default)]
pub struct ProductFilter {
    pub category: Option<String>,
    pub featured: Option<bool>,
    pub search: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn widget() -> Product {
        Product::new("Blue Widget", "A very shiny widget", 4500, "widgets", "", 10, true)
    }

    #[test]
    fn filter_is_conjunctive() {
        let p = widget();
        let filter = ProductFilter {
            category: Some("widgets".into()),
            featured: Some(true),
            search: Some("shiny".into()),
        };
        assert!(p.matches(&filter));

        let mut wrong_category = filter.clone();
        wrong_category.category = Some("gadgets".into());
        assert!(!p.matches(&wrong_category));

        let mut wrong_featured = filter.clone();
        wrong_featured.featured = Some(false);
        assert!(!p.matches(&wrong_featured));
    }

    #[test]
    fn search_is_case_insensitive_over_name_and_description() {
        let p = widget();
        assert!(p.matches(&ProductFilter {
            search: Some("BLUE".into()),
            ..Default::default()
        }));
        assert!(p.matches(&ProductFilter {
            search: Some("very shiny".into()),
            ..Default::default()
        }));
        assert!(!p.matches(&ProductFilter {
            search: Some("gadget".into()),
            ..Default::default()
        }));
    }

    #[test]
    fn category_all_matches_everything() {
        let p = widget();
        assert!(p.matches(&ProductFilter {
            category: Some("all".into()),
            ..Default::default()
        }));
    }
}
