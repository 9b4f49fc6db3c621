//! Customer cart
//!
//! Held in client memory until the order is placed. Lines are keyed by menu
//! item id and never drop below a quantity of one; removing a line is an
//! explicit action.

use rust_decimal::Decimal;
use shared::models::{MenuItem, OrderItemRequest, PlaceOrderRequest};

use crate::error::{ClientError, ClientResult};

/// One cart line
#[derive(Debug, Clone, PartialEq)]
pub struct CartLine {
    pub item: MenuItem,
    pub quantity: u32,
}

impl CartLine {
    pub fn subtotal(&self) -> Decimal {
        self.item.price * Decimal::from(self.quantity)
    }
}

#[derive(Debug, Clone, Default)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn quantity_of(&self, item_id: i64) -> u32 {
        self.line(item_id).map_or(0, |line| line.quantity)
    }

    fn line(&self, item_id: i64) -> Option<&CartLine> {
        self.lines.iter().find(|line| line.item.id == item_id)
    }

    fn line_mut(&mut self, item_id: i64) -> Option<&mut CartLine> {
        self.lines.iter_mut().find(|line| line.item.id == item_id)
    }

    /// Add one of `item`, starting a new line if needed
    pub fn add(&mut self, item: &MenuItem) -> ClientResult<()> {
        if !item.is_available {
            return Err(ClientError::Validation(format!(
                "{} is currently unavailable",
                item.name
            )));
        }
        match self.line_mut(item.id) {
            Some(line) => line.quantity += 1,
            None => self.lines.push(CartLine {
                item: item.clone(),
                quantity: 1,
            }),
        }
        Ok(())
    }

    pub fn increment(&mut self, item_id: i64) {
        if let Some(line) = self.line_mut(item_id) {
            line.quantity += 1;
        }
    }

    /// Decrease by one, stopping at one
    pub fn decrement(&mut self, item_id: i64) {
        if let Some(line) = self.line_mut(item_id) {
            line.quantity = line.quantity.saturating_sub(1).max(1);
        }
    }

    pub fn remove(&mut self, item_id: i64) {
        self.lines.retain(|line| line.item.id != item_id);
        tracing::debug!(item_id, "Removed item from cart");
    }

    pub fn clear(&mut self) {
        self.lines.clear();
    }

    pub fn total_items(&self) -> u32 {
        self.lines.iter().map(|line| line.quantity).sum()
    }

    pub fn total_price(&self) -> Decimal {
        self.lines.iter().map(CartLine::subtotal).sum()
    }

    /// Order request for the current lines
    pub fn to_order_request(
        &self,
        restaurant_id: i64,
        table_number: &str,
    ) -> ClientResult<PlaceOrderRequest> {
        if self.is_empty() {
            return Err(ClientError::EmptyCart);
        }
        Ok(PlaceOrderRequest {
            restaurant_id,
            table_number: table_number.to_string(),
            items: self
                .lines
                .iter()
                .map(|line| OrderItemRequest {
                    menu_item_id: line.item.id,
                    quantity: line.quantity,
                })
                .collect(),
        })
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) fn menu_item(id: i64, name: &str, price: Decimal) -> MenuItem {
        MenuItem {
            id,
            name: name.to_string(),
            price,
            description: None,
            is_available: true,
            image_url: None,
        }
    }

    #[test]
    fn test_add_merges_lines() {
        let dosa = menu_item(1, "Dosa", Decimal::new(8050, 2));
        let mut cart = Cart::new();
        cart.add(&dosa).unwrap();
        cart.add(&dosa).unwrap();

        assert_eq!(cart.lines().len(), 1);
        assert_eq!(cart.quantity_of(1), 2);
        assert_eq!(cart.total_price(), Decimal::new(16100, 2));
    }

    #[test]
    fn test_totals_recompute_on_quantity_change() {
        let mut cart = Cart::new();
        cart.add(&menu_item(1, "Dosa", Decimal::new(80, 0))).unwrap();
        cart.add(&menu_item(2, "Chai", Decimal::new(1550, 2))).unwrap();

        cart.increment(2);
        cart.increment(2);
        assert_eq!(cart.total_items(), 4);
        assert_eq!(cart.total_price(), Decimal::new(12650, 2));

        cart.decrement(2);
        assert_eq!(cart.total_price(), Decimal::new(11100, 2));
    }

    #[test]
    fn test_decrement_stops_at_one() {
        let mut cart = Cart::new();
        cart.add(&menu_item(3, "Vada", Decimal::new(30, 0))).unwrap();
        cart.decrement(3);
        cart.decrement(3);
        assert_eq!(cart.quantity_of(3), 1);

        cart.remove(3);
        assert!(cart.is_empty());
        // no-ops on missing lines
        cart.increment(3);
        cart.decrement(3);
        assert!(cart.is_empty());
    }

    #[test]
    fn test_unavailable_item_rejected() {
        let mut item = menu_item(4, "Biryani", Decimal::new(250, 0));
        item.is_available = false;
        let mut cart = Cart::new();
        assert!(matches!(cart.add(&item), Err(ClientError::Validation(_))));
        assert!(cart.is_empty());
    }

    #[test]
    fn test_order_request() {
        let mut cart = Cart::new();
        assert!(matches!(
            cart.to_order_request(1, "A1"),
            Err(ClientError::EmptyCart)
        ));

        let item = menu_item(7, "Lassi", Decimal::new(60, 0));
        cart.add(&item).unwrap();
        cart.add(&item).unwrap();
        let req = cart.to_order_request(1, "A1").unwrap();
        assert_eq!(req.table_number, "A1");
        assert_eq!(
            req.items,
            vec![OrderItemRequest {
                menu_item_id: 7,
                quantity: 2
            }]
        );
    }
}
