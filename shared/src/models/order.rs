//! Order Model
//!
//! Orders move through a fixed progression of stages. The kitchen advances
//! them one stage at a time; every change is pushed back as a full snapshot.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{ValidationError, ValidationResult, require};

/// Order status stage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    New,
    Preparing,
    Completed,
    /// Dismissed from the kitchen board
    Archived,
}

impl OrderStatus {
    /// Stages shown as kitchen board columns, in display order
    pub const BOARD: [OrderStatus; 3] = [Self::New, Self::Preparing, Self::Completed];

    /// The stage following this one
    pub fn next(self) -> Option<Self> {
        match self {
            Self::New => Some(Self::Preparing),
            Self::Preparing => Some(Self::Completed),
            Self::Completed => Some(Self::Archived),
            Self::Archived => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::New => "NEW",
            Self::Preparing => "PREPARING",
            Self::Completed => "COMPLETED",
            Self::Archived => "ARCHIVED",
        }
    }

    /// Column title
    pub fn label(self) -> &'static str {
        match self {
            Self::New => "New",
            Self::Preparing => "Preparing",
            Self::Completed => "Completed",
            Self::Archived => "Archived",
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One line of a placed order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderLine {
    #[serde(default)]
    pub menu_item_id: Option<i64>,
    #[serde(default)]
    pub menu_item_name: String,
    pub quantity: u32,
}

/// Order entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    /// Absent on malformed push messages, which are skipped
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub restaurant_id: Option<i64>,
    pub table_number: String,
    #[serde(default)]
    pub items: Vec<OrderLine>,
    pub status: OrderStatus,
    pub order_time: DateTime<Utc>,
}

impl Order {
    pub fn total_quantity(&self) -> u32 {
        self.items.iter().map(|line| line.quantity).sum()
    }
}

/// Line of an order request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItemRequest {
    pub menu_item_id: i64,
    pub quantity: u32,
}

/// Place order payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaceOrderRequest {
    pub restaurant_id: i64,
    pub table_number: String,
    pub items: Vec<OrderItemRequest>,
}

impl PlaceOrderRequest {
    pub fn validate(&self) -> ValidationResult {
        require("tableNumber", &self.table_number)?;
        if self.items.is_empty() {
            return Err(ValidationError::Required("items"));
        }
        if self.items.iter().any(|item| item.quantity < 1) {
            return Err(ValidationError::OutOfRange {
                field: "quantity",
                reason: "must be at least 1".into(),
            });
        }
        Ok(())
    }
}

/// PATCH body for `/status`
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusUpdate {
    pub new_status: OrderStatus,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_progression() {
        assert_eq!(OrderStatus::New.next(), Some(OrderStatus::Preparing));
        assert_eq!(OrderStatus::Preparing.next(), Some(OrderStatus::Completed));
        assert_eq!(OrderStatus::Completed.next(), Some(OrderStatus::Archived));
        assert_eq!(OrderStatus::Archived.next(), None);
    }

    #[test]
    fn test_order_wire_format() {
        let order: Order = serde_json::from_str(
            r#"{
                "id": 11,
                "tableNumber": "A1",
                "status": "PREPARING",
                "orderTime": "2024-05-01T12:30:00Z",
                "items": [{"menuItemName": "Vada", "quantity": 2}]
            }"#,
        )
        .unwrap();
        assert_eq!(order.id, Some(11));
        assert_eq!(order.status, OrderStatus::Preparing);
        assert_eq!(order.total_quantity(), 2);

        let body = serde_json::to_value(StatusUpdate {
            new_status: OrderStatus::Archived,
        })
        .unwrap();
        assert_eq!(body, serde_json::json!({"newStatus": "ARCHIVED"}));
    }

    #[test]
    fn test_place_order_validation() {
        let mut req = PlaceOrderRequest {
            restaurant_id: 1,
            table_number: "T4".into(),
            items: vec![OrderItemRequest {
                menu_item_id: 2,
                quantity: 1,
            }],
        };
        assert!(req.validate().is_ok());

        req.items[0].quantity = 0;
        assert!(req.validate().is_err());

        req.items.clear();
        assert_eq!(req.validate(), Err(ValidationError::Required("items")));
    }
}
