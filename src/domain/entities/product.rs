//! Product entities - the static tables the grids are rendered from

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// One product card
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductEntry {
    /// Image file name, relative to the configured image directory
    #[serde(rename = "img")]
    pub image: String,
    pub name: String,
    /// Display price, already formatted
    pub price: String,
}

impl ProductEntry {
    pub fn new(image: impl Into<String>, name: impl Into<String>, price: impl Into<String>) -> Self {
        Self {
            image: image.into(),
            name: name.into(),
            price: price.into(),
        }
    }
}

/// A product card carrying its rank badge
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankedEntry {
    #[serde(flatten)]
    pub product: ProductEntry,
    /// Badge image file name, e.g. `1.png`
    #[serde(rename = "rank")]
    pub rank_badge: String,
}

impl RankedEntry {
    pub fn new(product: ProductEntry, rank_badge: impl Into<String>) -> Self {
        Self {
            product,
            rank_badge: rank_badge.into(),
        }
    }

    /// Alt text for the badge: "Rank " plus the badge's first character
    pub fn badge_alt(&self) -> String {
        match self.rank_badge.chars().next() {
            Some(c) => format!("Rank {}", c),
            None => "Rank".to_string(),
        }
    }
}

/// Category tag -> ordered ranking
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RankingTable {
    categories: BTreeMap<String, Vec<RankedEntry>>,
}

impl RankingTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style category insert
    pub fn with_category(mut self, tag: impl Into<String>, entries: Vec<RankedEntry>) -> Self {
        self.categories.insert(tag.into(), entries);
        self
    }

    /// Entries for a tag, if the tag exists
    pub fn entries(&self, tag: &str) -> Option<&[RankedEntry]> {
        self.categories.get(tag).map(Vec::as_slice)
    }

    pub fn contains(&self, tag: &str) -> bool {
        self.categories.contains_key(tag)
    }

    /// All category tags
    pub fn tags(&self) -> impl Iterator<Item = &str> {
        self.categories.keys().map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }
}

/// Everything the product widgets render
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Catalog {
    #[serde(default)]
    pub new_arrivals: Vec<ProductEntry>,
    #[serde(default)]
    pub rankings: RankingTable,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_badge_alt() {
        let entry = RankedEntry::new(ProductEntry::new("a.jpg", "A", "¥1"), "3.png");
        assert_eq!(entry.badge_alt(), "Rank 3");

        let blank = RankedEntry::new(ProductEntry::new("a.jpg", "A", "¥1"), "");
        assert_eq!(blank.badge_alt(), "Rank");
    }

    #[test]
    fn test_ranking_lookup() {
        let table = RankingTable::new().with_category(
            "gift",
            vec![RankedEntry::new(ProductEntry::new("b.jpg", "B", "¥2"), "1.png")],
        );

        assert!(table.contains("gift"));
        assert_eq!(table.entries("gift").map(|e| e.len()), Some(1));
        assert!(table.entries("bestseller").is_none());
        assert_eq!(table.tags().collect::<Vec<_>>(), vec!["gift"]);
    }

    #[test]
    fn test_catalog_json_shape() {
        let json = r#"{
            "new_arrivals": [{ "img": "p1.jpg", "name": "Blend", "price": "¥1,980" }],
            "rankings": {
                "gift": [{ "img": "p2.jpg", "name": "Set A", "price": "¥3,980", "rank": "1.png" }]
            }
        }"#;

        let catalog: Catalog = serde_json::from_str(json).unwrap();
        assert_eq!(catalog.new_arrivals[0].image, "p1.jpg");
        let gift = catalog.rankings.entries("gift").unwrap();
        assert_eq!(gift[0].product.name, "Set A");
        assert_eq!(gift[0].rank_badge, "1.png");
    }
}
