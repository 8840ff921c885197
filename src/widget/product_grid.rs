//! Product cards and the new-arrivals grid
//!
//! Rendering is a full rebuild: the grid's children are replaced by freshly
//! built cards every time.

use crate::application::ports::NodeId;
use crate::domain::entities::{ProductEntry, RankedEntry};
use crate::domain::value_objects::{ElementTemplate, ViewportClass};
use crate::shared::config::{GridConfig, Selectors};
use crate::widget::Surface;

/// Card layout shared by both grids; `badge` is the overlay image
fn card(entry: &ProductEntry, badge: ElementTemplate, config: &GridConfig) -> ElementTemplate {
    ElementTemplate::new("div")
        .class("product-item")
        .child(
            ElementTemplate::new("div")
                .class("product-image-wrapper")
                .child(badge)
                .child(
                    ElementTemplate::new("img")
                        .attr("src", config.image_url(&entry.image))
                        .attr("alt", entry.name.as_str())
                        .class("product-image"),
                ),
        )
        .child(ElementTemplate::new("p").class("product-name").text(entry.name.as_str()))
        .child(ElementTemplate::new("p").class("product-price").text(entry.price.as_str()))
}

/// New-arrival card with the "new" badge
pub fn product_card(entry: &ProductEntry, config: &GridConfig) -> ElementTemplate {
    let badge = ElementTemplate::new("img")
        .attr("src", config.image_url(&config.new_badge))
        .attr("alt", "New")
        .class("new-badge");
    card(entry, badge, config)
}

/// Ranking card with its rank badge
pub fn ranked_card(entry: &RankedEntry, config: &GridConfig) -> ElementTemplate {
    let badge = ElementTemplate::new("img")
        .attr("src", config.image_url(&entry.rank_badge))
        .attr("alt", entry.badge_alt())
        .class("rank-badge");
    card(&entry.product, badge, config)
}

/// Cards for the first `max_count` entries, in table order
pub fn render_cards(entries: &[ProductEntry], max_count: usize, config: &GridConfig) -> Vec<ElementTemplate> {
    entries
        .iter()
        .take(max_count)
        .map(|entry| product_card(entry, config))
        .collect()
}

/// The new-arrivals grid
#[derive(Debug)]
pub struct NewArrivalsGrid {
    grid: NodeId,
    entries: Vec<ProductEntry>,
    config: GridConfig,
}

impl NewArrivalsGrid {
    pub fn mount(
        cx: &mut Surface,
        selectors: &Selectors,
        config: &GridConfig,
        entries: Vec<ProductEntry>,
    ) -> Option<Self> {
        let Some(grid) = cx.document.query(&selectors.product_grid) else {
            log!("NewArrivalsGrid: no '{}' on page, skipping", selectors.product_grid);
            return None;
        };
        Some(Self {
            grid,
            entries,
            config: config.clone(),
        })
    }

    /// How many cards fit the layout
    pub fn max_count(&self, viewport: ViewportClass) -> usize {
        if viewport.is_mobile {
            self.config.mobile_count
        } else {
            self.config.desktop_count
        }
    }

    /// Rebuild the grid for the current viewport; returns the card count
    pub fn render(&self, cx: &mut Surface, viewport: ViewportClass) -> usize {
        let cards = render_cards(&self.entries, self.max_count(viewport), &self.config);
        cx.document.replace_children(self.grid, &cards).len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::Catalog;

    #[test]
    fn test_render_cards_takes_prefix_in_order() {
        let catalog = Catalog::builtin();
        let config = GridConfig::default();

        let four = render_cards(&catalog.new_arrivals, 4, &config);
        assert_eq!(four.len(), 4);
        for (card, entry) in four.iter().zip(&catalog.new_arrivals) {
            let name = card.find_class("product-name").unwrap();
            assert_eq!(name.text.as_deref(), Some(entry.name.as_str()));
        }

        // More room than entries: everything, nothing invented
        assert_eq!(render_cards(&catalog.new_arrivals, 10, &config).len(), 8);
        assert!(render_cards(&[], 10, &config).is_empty());
    }

    #[test]
    fn test_card_structure() {
        let config = GridConfig::default();
        let card = product_card(&ProductEntry::new("p1.jpg", "Blend", "¥1,980"), &config);

        assert_eq!(card.classes, vec!["product-item"]);
        let wrapper = card.find_class("product-image-wrapper").unwrap();
        assert_eq!(wrapper.children.len(), 2);
        assert_eq!(wrapper.children[0].attribute("src"), Some("./images/new.png"));
        assert_eq!(wrapper.children[0].attribute("alt"), Some("New"));
        assert_eq!(wrapper.children[1].attribute("src"), Some("./images/p1.jpg"));
        assert_eq!(wrapper.children[1].attribute("alt"), Some("Blend"));
        assert_eq!(
            card.find_class("product-price").unwrap().text.as_deref(),
            Some("¥1,980")
        );
    }

    #[test]
    fn test_ranked_card_badge() {
        let config = GridConfig::default();
        let entry = RankedEntry::new(ProductEntry::new("p2.jpg", "Gift A", "¥3,980"), "1.png");
        let card = ranked_card(&entry, &config);

        let badge = card.find_class("rank-badge").unwrap();
        assert_eq!(badge.attribute("src"), Some("./images/1.png"));
        assert_eq!(badge.attribute("alt"), Some("Rank 1"));
        assert!(card.find_class("new-badge").is_none());
    }
}
