//! RankingSelector - ranking grid switched by category tabs

use crate::application::ports::NodeId;
use crate::domain::entities::RankingTable;
use crate::shared::config::{GridConfig, Selectors};
use crate::shared::DEFAULT_RANKING_TAB;
use crate::widget::{ranked_card, ActiveGroup, Surface};

/// Attribute naming a tab's category
const TAB_ATTRIBUTE: &str = "data-tab";

#[derive(Debug)]
pub struct RankingSelector {
    grid: Option<NodeId>,
    tabs: ActiveGroup,
    table: RankingTable,
    active_tag: String,
    config: GridConfig,
}

impl RankingSelector {
    pub fn mount(
        cx: &mut Surface,
        selectors: &Selectors,
        config: &GridConfig,
        table: RankingTable,
    ) -> Option<Self> {
        let grid = cx.document.query(&selectors.ranking_grid);
        let tabs = cx.document.query_all(&selectors.ranking_tabs);
        if grid.is_none() && tabs.is_empty() {
            log!("RankingSelector: no ranking grid or tabs, skipping");
            return None;
        }
        Some(Self {
            grid,
            tabs: ActiveGroup::new(tabs),
            table,
            active_tag: DEFAULT_RANKING_TAB.to_string(),
            config: config.clone(),
        })
    }

    pub fn active_tag(&self) -> &str {
        &self.active_tag
    }

    pub fn tabs(&self) -> &[NodeId] {
        self.tabs.nodes()
    }

    /// Tab click: switch to the tab's category. Tabs naming a category the
    /// table does not have change nothing.
    pub fn on_tab_click(&mut self, cx: &mut Surface, tab: NodeId) -> bool {
        let Some(index) = self.tabs.index_of(tab) else {
            return false;
        };
        let Some(tag) = cx.document.attribute(tab, TAB_ATTRIBUTE) else {
            log!("RankingSelector: tab without {}", TAB_ATTRIBUTE);
            return false;
        };
        if !self.table.contains(&tag) {
            log!("RankingSelector: unknown category '{}', ignoring", tag);
            return false;
        }
        self.tabs.show(cx.document, index);
        self.active_tag = tag;
        self.render(cx);
        true
    }

    /// Initial render of the default category
    pub fn on_load(&mut self, cx: &mut Surface) {
        let active = self
            .tabs
            .nodes()
            .iter()
            .position(|t| cx.document.attribute(*t, TAB_ATTRIBUTE).as_deref() == Some(self.active_tag.as_str()));
        if let Some(index) = active {
            self.tabs.show(cx.document, index);
        }
        self.render(cx);
    }

    /// Rebuild the grid for the active category; returns the card count
    pub fn render(&self, cx: &mut Surface) -> usize {
        let Some(grid) = self.grid else {
            return 0;
        };
        let Some(entries) = self.table.entries(&self.active_tag) else {
            log!("RankingSelector: category '{}' missing from table", self.active_tag);
            return 0;
        };
        let cards: Vec<_> = entries.iter().map(|e| ranked_card(e, &self.config)).collect();
        cx.document.replace_children(grid, &cards).len()
    }
}
