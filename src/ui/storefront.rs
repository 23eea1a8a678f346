use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
    Frame,
};

use crate::theme::Theme;

/// Stock at or below this level is flagged
pub const LOW_STOCK: u32 = 3;

/// One row of the inventory list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InventoryItem {
    pub name: String,
    pub sku: String,
    pub stock: u32,
}

impl InventoryItem {
    fn new(name: &str, sku: &str, stock: u32) -> Self {
        Self {
            name: name.to_string(),
            sku: sku.to_string(),
            stock,
        }
    }

    pub fn is_low(&self) -> bool {
        self.stock <= LOW_STOCK
    }
}

/// Inventory screen the toasts are layered over
#[derive(Debug)]
pub struct StorefrontScreen {
    items: Vec<InventoryItem>,
    state: ListState,
}

impl Default for StorefrontScreen {
    fn default() -> Self {
        Self::new(vec![
            InventoryItem::new("Brake pads (front)", "BP-1100", 14),
            InventoryItem::new("Oil filter", "OF-2040", 2),
            InventoryItem::new("Spark plug set", "SP-0404", 9),
            InventoryItem::new("Wiper blades 22\"", "WB-2200", 0),
            InventoryItem::new("Cabin air filter", "CF-3310", 6),
        ])
    }
}

impl StorefrontScreen {
    pub fn new(items: Vec<InventoryItem>) -> Self {
        let mut state = ListState::default();
        if !items.is_empty() {
            state.select(Some(0));
        }
        Self { items, state }
    }

    pub fn selected(&self) -> Option<&InventoryItem> {
        self.state.selected().and_then(|index| self.items.get(index))
    }

    pub fn select_next(&mut self) {
        if self.items.is_empty() {
            return;
        }
        let next = self.state.selected().map_or(0, |i| (i + 1) % self.items.len());
        self.state.select(Some(next));
    }

    pub fn select_previous(&mut self) {
        if self.items.is_empty() {
            return;
        }
        let len = self.items.len();
        let previous = self.state.selected().map_or(0, |i| (i + len - 1) % len);
        self.state.select(Some(previous));
    }

    /// Add `amount` to the selected item's stock and return the updated item
    pub fn restock_selected(&mut self, amount: u32) -> Option<&InventoryItem> {
        let index = self.state.selected()?;
        let item = self.items.get_mut(index)?;
        item.stock = item.stock.saturating_add(amount);
        Some(&*item)
    }

    fn list_area(area: Rect) -> Rect {
        Self::split(area)[0]
    }

    fn split(area: Rect) -> std::rc::Rc<[Rect]> {
        Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(3), Constraint::Length(3)])
            .split(area)
    }

    /// Select the row under a click. Returns whether the selection changed.
    pub fn click(&mut self, area: Rect, column: u16, row: u16) -> bool {
        let list = Self::list_area(area);
        // Skip the block border
        if column <= list.x
            || column >= list.x + list.width.saturating_sub(1)
            || row <= list.y
            || row >= list.y + list.height.saturating_sub(1)
        {
            return false;
        }
        let index = usize::from(row - list.y - 1) + self.state.offset();
        if index >= self.items.len() || self.state.selected() == Some(index) {
            return false;
        }
        self.state.select(Some(index));
        true
    }

    pub fn render(&mut self, frame: &mut Frame, area: Rect, theme: &Theme) {
        let chunks = Self::split(area);

        let items: Vec<ListItem> = self
            .items
            .iter()
            .map(|item| {
                let stock_style = if item.is_low() {
                    theme.base_style().fg(theme.palette.warning)
                } else {
                    theme.muted_style()
                };
                ListItem::new(Line::from(vec![
                    Span::styled(format!("{:<8} ", item.sku), theme.muted_style()),
                    Span::styled(format!("{:<24}", item.name), theme.base_style()),
                    Span::styled(format!("{:>4} in stock", item.stock), stock_style),
                ]))
            })
            .collect();

        let list = List::new(items)
            .block(
                Block::default()
                    .title(Span::styled(" Inventory ", theme.title_style()))
                    .borders(Borders::ALL)
                    .border_style(theme.border_style(true)),
            )
            .style(theme.base_style())
            .highlight_style(theme.base_style().bg(theme.palette.surface))
            .highlight_symbol("› ");
        frame.render_stateful_widget(list, chunks[0], &mut self.state);

        let help = Paragraph::new(Line::from(vec![Span::styled(
            "enter restock · y sync · s/e/i/w toast · p sticky · b burst · d dismiss · q quit",
            theme.muted_style(),
        )]))
        .style(theme.base_style())
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(theme.border_style(false)),
        );
        frame.render_widget(help, chunks[1]);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_selection_wraps() {
        let mut screen = StorefrontScreen::default();
        assert_eq!(screen.selected().unwrap().sku, "BP-1100");

        screen.select_previous();
        assert_eq!(screen.selected().unwrap().sku, "CF-3310");

        screen.select_next();
        screen.select_next();
        assert_eq!(screen.selected().unwrap().sku, "OF-2040");
    }

    #[test]
    fn test_restock_selected() {
        let mut screen = StorefrontScreen::default();
        screen.select_next();
        let item = screen.restock_selected(10).unwrap();
        assert_eq!(item.stock, 12);
        assert!(!item.is_low());
    }

    #[test]
    fn test_click_selects_row() {
        let mut screen = StorefrontScreen::default();
        let area = Rect::new(0, 0, 80, 20);

        // Row 0 is the border, row 3 is the third item
        assert!(screen.click(area, 10, 3));
        assert_eq!(screen.selected().unwrap().sku, "SP-0404");
        assert!(!screen.click(area, 10, 0));
        assert!(!screen.click(area, 10, 15));
    }

    #[test]
    fn test_empty_screen() {
        let mut screen = StorefrontScreen::new(Vec::new());
        screen.select_next();
        assert!(screen.selected().is_none());
        assert!(screen.restock_selected(1).is_none());
    }
}
