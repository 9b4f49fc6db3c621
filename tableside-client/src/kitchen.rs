//! Kitchen board
//!
//! Active orders grouped by status stage. The board starts from the REST
//! snapshot and then takes every pushed order as a whole-object replacement
//! keyed by id; the newest change moves to the front.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use shared::models::{Order, OrderStatus};
use tokio::sync::mpsc;

use crate::config::ClientConfig;
use crate::error::{ClientError, ClientResult};
use crate::http::ApiClient;
use crate::live::{FeedEvent, FeedOptions, LiveFeed, SnapshotSource};
use crate::notify::{Notification, NotificationCenter};
use crate::time_ago::format_time_ago;

#[derive(Debug, Clone, Default)]
pub struct KitchenBoard {
    orders: Vec<Order>,
}

impl KitchenBoard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the board with a snapshot, newest first
    pub fn load_snapshot(&mut self, mut orders: Vec<Order>) {
        orders.retain(|order| order.id.is_some() && order.status != OrderStatus::Archived);
        orders.sort_by(|a, b| b.order_time.cmp(&a.order_time));
        tracing::debug!(count = orders.len(), "Loaded kitchen snapshot");
        self.orders = orders;
    }

    /// Apply one pushed order; returns false if it was skipped
    ///
    /// Archived orders leave the board.
    pub fn apply(&mut self, order: Order) -> bool {
        let Some(id) = order.id else {
            tracing::warn!(table = %order.table_number, "Received an order without an ID, skipping update");
            return false;
        };
        self.orders.retain(|existing| existing.id != Some(id));
        if order.status == OrderStatus::Archived {
            tracing::debug!(order_id = id, "Order archived");
            return true;
        }
        tracing::debug!(order_id = id, status = %order.status, "Order updated");
        self.orders.insert(0, order);
        true
    }

    /// Apply a raw push message
    pub fn apply_json(&mut self, value: serde_json::Value) -> bool {
        match serde_json::from_value::<Order>(value) {
            Ok(order) => self.apply(order),
            Err(e) => {
                tracing::warn!("Skipping malformed order message: {e}");
                false
            }
        }
    }

    pub fn orders(&self) -> &[Order] {
        &self.orders
    }

    pub fn get(&self, order_id: i64) -> Option<&Order> {
        self.orders.iter().find(|order| order.id == Some(order_id))
    }

    /// Orders in one column, in board order
    pub fn column(&self, status: OrderStatus) -> Vec<&Order> {
        self.orders
            .iter()
            .filter(|order| order.status == status)
            .collect()
    }

    /// Column sizes for the board stages
    pub fn counts(&self) -> Vec<(OrderStatus, usize)> {
        OrderStatus::BOARD
            .iter()
            .map(|&status| (status, self.column(status).len()))
            .collect()
    }
}

/// Display data for one order card
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderCard {
    pub order_id: Option<i64>,
    pub title: String,
    pub time_ago: String,
    /// "2x Masala Dosa"
    pub lines: Vec<String>,
    /// Next stage and its button label
    pub action: Option<(OrderStatus, &'static str)>,
}

impl OrderCard {
    pub fn new(order: &Order, now: DateTime<Utc>) -> Self {
        Self {
            order_id: order.id,
            title: format!("Table: {}", order.table_number),
            time_ago: format_time_ago(order.order_time, now),
            lines: order
                .items
                .iter()
                .map(|line| format!("{}x {}", line.quantity, line.menu_item_name))
                .collect(),
            action: action_for(order.status),
        }
    }

    pub fn action_label(&self) -> Option<&'static str> {
        self.action.map(|(_, label)| label)
    }
}

/// Button offered for an order in the given stage
pub fn action_for(status: OrderStatus) -> Option<(OrderStatus, &'static str)> {
    match status {
        OrderStatus::New => Some((OrderStatus::Preparing, "Mark as Preparing")),
        OrderStatus::Preparing => Some((OrderStatus::Completed, "Mark as Completed")),
        OrderStatus::Completed => Some((OrderStatus::Archived, "Dismiss")),
        OrderStatus::Archived => None,
    }
}

/// Active orders of a restaurant, fetched after each (re)connect
#[derive(Debug, Clone)]
pub struct ActiveOrders {
    api: ApiClient,
    restaurant_id: i64,
}

impl ActiveOrders {
    pub fn new(api: ApiClient, restaurant_id: i64) -> Self {
        Self { api, restaurant_id }
    }
}

#[async_trait]
impl SnapshotSource for ActiveOrders {
    type Snapshot = Vec<Order>;

    async fn fetch(&self) -> ClientResult<Vec<Order>> {
        self.api.get_active_orders(self.restaurant_id).await
    }
}

/// Kitchen view: board + live feed + status transitions
#[derive(Debug)]
pub struct KitchenHub {
    api: ApiClient,
    restaurant_id: i64,
    board: KitchenBoard,
    notifications: NotificationCenter,
    connected: bool,
    feed: Option<LiveFeed>,
    events: Option<mpsc::Receiver<FeedEvent<Vec<Order>>>>,
}

impl KitchenHub {
    /// Hub without a live feed
    pub fn new(api: ApiClient, restaurant_id: i64) -> Self {
        Self {
            api,
            restaurant_id,
            board: KitchenBoard::new(),
            notifications: NotificationCenter::default(),
            connected: false,
            feed: None,
            events: None,
        }
    }

    /// Open the kitchen view for the logged-in restaurant and start its feed
    pub fn open(api: ApiClient, config: &ClientConfig) -> ClientResult<Self> {
        let auth = api.auth();
        let token = auth.require_auth()?;
        let restaurant_id = auth.restaurant_id().ok_or_else(|| {
            ClientError::Unauthorized("No restaurant ID found in session".into())
        })?;

        let options = FeedOptions::new(
            config,
            shared::topic::restaurant_orders(restaurant_id),
            Some(token),
        );
        let (feed, events) =
            LiveFeed::spawn(options, ActiveOrders::new(api.clone(), restaurant_id));

        let mut hub = Self::new(api, restaurant_id);
        hub.feed = Some(feed);
        hub.events = Some(events);
        Ok(hub)
    }

    pub fn restaurant_id(&self) -> i64 {
        self.restaurant_id
    }

    pub fn board(&self) -> &KitchenBoard {
        &self.board
    }

    pub fn is_connected(&self) -> bool {
        self.connected
    }

    pub fn notifications(&mut self) -> &mut NotificationCenter {
        &mut self.notifications
    }

    pub fn handle_event(&mut self, event: FeedEvent<Vec<Order>>) {
        match event {
            FeedEvent::Connected => self.connected = true,
            FeedEvent::Disconnected => self.connected = false,
            FeedEvent::Snapshot(orders) => self.board.load_snapshot(orders),
            FeedEvent::SnapshotFailed(_) => self.notifications.push(Notification::error(
                "Error: Could not load initial orders. Please refresh.",
            )),
            FeedEvent::Message(value) => {
                self.board.apply_json(value);
            }
            FeedEvent::Error(message) => {
                tracing::warn!(restaurant_id = self.restaurant_id, "Kitchen feed error: {message}");
            }
        }
    }

    /// Wait for and apply the next feed event; false once the feed is gone
    pub async fn next_event(&mut self) -> bool {
        let event = match self.events.as_mut() {
            Some(events) => events.recv().await,
            None => return false,
        };
        match event {
            Some(event) => {
                self.handle_event(event);
                true
            }
            None => false,
        }
    }

    /// Request the next stage for an order
    ///
    /// The board itself changes only when the backend pushes the update.
    pub async fn advance(&mut self, order_id: i64) -> ClientResult<OrderStatus> {
        let order = self
            .board
            .get(order_id)
            .ok_or_else(|| ClientError::NotFound(format!("Order {order_id} is not on the board")))?;
        let (next, _) = action_for(order.status).ok_or_else(|| {
            ClientError::Validation(format!("Order {order_id} has no further stage"))
        })?;

        tracing::info!(order_id, status = %next, "Requesting status update");
        match self.api.update_order_status(order_id, next).await {
            Ok(()) => Ok(next),
            Err(e) => {
                self.notifications.push(Notification::error(
                    "Error: Could not update order. Please check connection.",
                ));
                Err(e)
            }
        }
    }

    /// Tear down the feed (view unmount)
    pub async fn close(mut self) {
        self.connected = false;
        if let Some(feed) = self.feed.take() {
            feed.shutdown().await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use shared::models::OrderLine;

    fn order(id: Option<i64>, status: OrderStatus, minutes_ago: i64) -> Order {
        Order {
            id,
            restaurant_id: Some(1),
            table_number: format!("T{}", id.unwrap_or_default()),
            items: vec![OrderLine {
                menu_item_id: Some(3),
                menu_item_name: "Dosa".into(),
                quantity: 2,
            }],
            status,
            order_time: Utc::now() - Duration::minutes(minutes_ago),
        }
    }

    #[test]
    fn test_snapshot_sorted_newest_first() {
        let mut board = KitchenBoard::new();
        board.load_snapshot(vec![
            order(Some(1), OrderStatus::New, 30),
            order(Some(2), OrderStatus::Preparing, 5),
            order(None, OrderStatus::New, 1),
            order(Some(3), OrderStatus::New, 10),
        ]);
        let ids: Vec<_> = board.orders().iter().map(|o| o.id).collect();
        assert_eq!(ids, vec![Some(2), Some(3), Some(1)]);
    }

    #[test]
    fn test_apply_replaces_and_moves_to_front() {
        let mut board = KitchenBoard::new();
        board.load_snapshot(vec![
            order(Some(1), OrderStatus::New, 10),
            order(Some(2), OrderStatus::New, 5),
        ]);

        assert!(board.apply(order(Some(1), OrderStatus::Preparing, 10)));
        assert_eq!(board.orders().len(), 2);
        assert_eq!(board.orders()[0].id, Some(1));
        assert_eq!(board.column(OrderStatus::New).len(), 1);
        assert_eq!(board.column(OrderStatus::Preparing).len(), 1);
    }

    #[test]
    fn test_apply_skips_missing_id_and_drops_archived() {
        let mut board = KitchenBoard::new();
        assert!(!board.apply(order(None, OrderStatus::New, 0)));
        assert!(board.orders().is_empty());

        board.apply(order(Some(4), OrderStatus::Completed, 0));
        board.apply(order(Some(4), OrderStatus::Archived, 0));
        assert!(board.get(4).is_none());
    }

    #[test]
    fn test_apply_json() {
        let mut board = KitchenBoard::new();
        assert!(board.apply_json(serde_json::json!({
            "id": 8,
            "tableNumber": "A2",
            "status": "NEW",
            "orderTime": "2024-05-01T12:30:00Z",
            "items": []
        })));
        assert!(!board.apply_json(serde_json::json!({"id": 9})));
        assert_eq!(
            board.counts(),
            vec![
                (OrderStatus::New, 1),
                (OrderStatus::Preparing, 0),
                (OrderStatus::Completed, 0)
            ]
        );
    }

    #[test]
    fn test_order_card() {
        let now = Utc::now();
        let mut o = order(Some(5), OrderStatus::Preparing, 0);
        o.order_time = now - Duration::minutes(12);
        let card = OrderCard::new(&o, now);
        assert_eq!(card.title, "Table: T5");
        assert_eq!(card.time_ago, "12 minutes ago");
        assert_eq!(card.lines, vec!["2x Dosa".to_string()]);
        assert_eq!(card.action_label(), Some("Mark as Completed"));
        assert_eq!(action_for(OrderStatus::Completed).map(|a| a.1), Some("Dismiss"));
    }

    #[test]
    fn test_hub_handles_feed_events() {
        let api = ApiClient::new(
            &ClientConfig::new("http://127.0.0.1:9"),
            std::sync::Arc::new(crate::storage::MemoryTokenStore::new()),
        )
        .unwrap();
        let mut hub = KitchenHub::new(api, 1);
        hub.handle_event(FeedEvent::Connected);
        assert!(hub.is_connected());

        hub.handle_event(FeedEvent::Snapshot(vec![order(Some(1), OrderStatus::New, 3)]));
        hub.handle_event(FeedEvent::Message(
            serde_json::to_value(order(Some(2), OrderStatus::New, 0)).unwrap(),
        ));
        assert_eq!(hub.board().column(OrderStatus::New).len(), 2);

        hub.handle_event(FeedEvent::SnapshotFailed("boom".into()));
        assert!(hub.notifications().latest().is_some());

        hub.handle_event(FeedEvent::Disconnected);
        assert!(!hub.is_connected());
    }
}
