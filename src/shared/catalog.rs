//! Catalog data - the product tables shipped with the page, plus JSON overrides

use std::path::Path;

use crate::domain::entities::{Catalog, ProductEntry, RankedEntry, RankingTable};
use crate::shared::config::ConfigError;

/// Ranking shown before any tab is clicked
pub const DEFAULT_RANKING_TAB: &str = "bestseller";

impl Catalog {
    /// The tables the page ships with
    pub fn builtin() -> Self {
        let new_arrivals = vec![
            ProductEntry::new("product1.jpg", "果実ブレンド", "¥1,980 (税込)"),
            ProductEntry::new(
                "product2.jpg",
                "[限定 40%OFF] コールドブリューコーヒー (色のボトル) 330ml 1本",
                "¥648 (税込)",
            ),
            ProductEntry::new(
                "product3.jpg",
                "水出しコーヒーパック COLD BREW Refresh (コーヒーパック コールドブリューリフレッシュ) 5パック",
                "¥1,180 (税込)",
            ),
            ProductEntry::new("product4.jpg", "フアンリープレンド", "¥1,780 (税込)"),
            ProductEntry::new("product1.jpg", "コーヒープリン H", "¥1,780 (税込)"),
            ProductEntry::new("product2.jpg", "果実ブレンド", "¥1,980 (税込)"),
            ProductEntry::new("product3.jpg", "[限定 40%OFF] コールドブリューコーヒー", "¥648 (税込)"),
            ProductEntry::new("product4.jpg", "水出しコーヒーパック COLD BREW Refresh", "¥1,180 (税込)"),
        ];

        let bestseller = vec![
            RankedEntry::new(ProductEntry::new("product1.jpg", "果実ブレンド", "¥1,980 (税込)"), "1.png"),
            RankedEntry::new(
                ProductEntry::new(
                    "product2.jpg",
                    "[限定 40%OFF] コールドブリューコーヒー (色のボトル) 330ml 1本",
                    "¥648 (税込)",
                ),
                "2.png",
            ),
            RankedEntry::new(
                ProductEntry::new(
                    "product3.jpg",
                    "水出しコーヒーパック COLD BREW Refresh (コーヒーパック コールドブリューリフレッシュ) 5パック (917g分)",
                    "¥1,180 (税込)",
                ),
                "3.png",
            ),
            RankedEntry::new(ProductEntry::new("product4.jpg", "マンデリープレンド", "¥1,780 (税込)"), "4.png"),
        ];

        let gift = vec![
            RankedEntry::new(ProductEntry::new("product2.jpg", "ギフトセット A", "¥3,980 (税込)"), "1.png"),
            RankedEntry::new(ProductEntry::new("product3.jpg", "ギフトセット B", "¥2,980 (税込)"), "2.png"),
            RankedEntry::new(ProductEntry::new("product1.jpg", "ギフトセット C", "¥4,980 (税込)"), "3.png"),
            RankedEntry::new(ProductEntry::new("product4.jpg", "ギフトセット D", "¥2,480 (税込)"), "4.png"),
        ];

        Self {
            new_arrivals,
            rankings: RankingTable::new()
                .with_category("bestseller", bestseller)
                .with_category("gift", gift),
        }
    }

    /// Parse a catalog from JSON (`{"new_arrivals": [...], "rankings": {...}}`)
    pub fn from_json_str(content: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(content)?)
    }

    pub fn load_from_path(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json_str(&content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_builtin_tables() {
        let catalog = Catalog::builtin();
        assert_eq!(catalog.new_arrivals.len(), 8);
        assert_eq!(catalog.rankings.tags().collect::<Vec<_>>(), vec!["bestseller", "gift"]);
        assert!(catalog.rankings.contains(DEFAULT_RANKING_TAB));

        let gift = catalog.rankings.entries("gift").unwrap();
        assert_eq!(gift.len(), 4);
        assert_eq!(gift[2].product.name, "ギフトセット C");
        assert_eq!(gift[2].badge_alt(), "Rank 3");
    }

    #[test]
    fn test_load_json_override() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{
                "new_arrivals": [{{ "img": "a.jpg", "name": "A", "price": "¥100" }}],
                "rankings": {{ "sale": [{{ "img": "b.jpg", "name": "B", "price": "¥200", "rank": "1.png" }}] }}
            }}"#
        )
        .unwrap();

        let catalog = Catalog::load_from_path(file.path()).unwrap();
        assert_eq!(catalog.new_arrivals[0].image, "a.jpg");
        assert_eq!(catalog.rankings.entries("sale").unwrap()[0].rank_badge, "1.png");

        assert!(matches!(Catalog::from_json_str("{"), Err(ConfigError::Json(_))));
    }
}
