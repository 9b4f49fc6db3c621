//! Customer views: the table's menu with its cart, and the order tracker

use async_trait::async_trait;
use rust_decimal::Decimal;
use shared::models::{MenuItem, Order};
use tokio::sync::mpsc;

use crate::cart::Cart;
use crate::config::ClientConfig;
use crate::error::{ClientError, ClientResult};
use crate::http::ApiClient;
use crate::live::{FeedEvent, FeedOptions, LiveFeed, SnapshotSource};
use crate::notify::{Notification, NotificationCenter};

/// Menu of one restaurant as seen from a table
#[derive(Debug)]
pub struct CustomerMenu {
    api: ApiClient,
    restaurant_id: i64,
    table_number: String,
    items: Vec<MenuItem>,
    cart: Cart,
    notifications: NotificationCenter,
}

impl CustomerMenu {
    /// Fetch the menu and start with an empty cart
    pub async fn load(
        api: ApiClient,
        restaurant_id: i64,
        table_number: impl Into<String>,
    ) -> ClientResult<Self> {
        let items = api.get_menu(restaurant_id).await?;
        tracing::debug!(restaurant_id, count = items.len(), "Loaded customer menu");
        Ok(Self::with_items(api, restaurant_id, table_number, items))
    }

    pub fn with_items(
        api: ApiClient,
        restaurant_id: i64,
        table_number: impl Into<String>,
        items: Vec<MenuItem>,
    ) -> Self {
        Self {
            api,
            restaurant_id,
            table_number: table_number.into(),
            items,
            cart: Cart::new(),
            notifications: NotificationCenter::default(),
        }
    }

    pub fn items(&self) -> &[MenuItem] {
        &self.items
    }

    pub fn table_number(&self) -> &str {
        &self.table_number
    }

    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    pub fn total_price(&self) -> Decimal {
        self.cart.total_price()
    }

    pub fn notifications(&mut self) -> &mut NotificationCenter {
        &mut self.notifications
    }

    pub fn add_to_cart(&mut self, item_id: i64) -> ClientResult<()> {
        let item = self
            .items
            .iter()
            .find(|item| item.id == item_id)
            .ok_or_else(|| ClientError::NotFound(format!("Menu item {item_id} not found")))?;
        self.cart.add(item)
    }

    pub fn increment(&mut self, item_id: i64) {
        self.cart.increment(item_id);
    }

    pub fn decrement(&mut self, item_id: i64) {
        self.cart.decrement(item_id);
    }

    pub fn remove(&mut self, item_id: i64) {
        self.cart.remove(item_id);
    }

    /// Send the cart as an order
    ///
    /// An empty cart never reaches the backend. The cart is cleared only
    /// after the order was accepted.
    pub async fn place_order(&mut self) -> ClientResult<Option<Order>> {
        let request = match self.cart.to_order_request(self.restaurant_id, &self.table_number) {
            Ok(request) => request,
            Err(e) => {
                self.notifications.push(Notification::error(e.user_message()));
                return Err(e);
            }
        };

        match self.api.place_order(&request).await {
            Ok(order) => {
                self.notifications
                    .push(Notification::success("Order placed successfully!"));
                self.cart.clear();
                Ok(order)
            }
            Err(e) => {
                self.notifications.push(Notification::error(e.user_message()));
                Err(e)
            }
        }
    }
}

/// Current order of a table session
#[derive(Debug, Clone)]
pub struct SessionOrder {
    api: ApiClient,
    session_id: String,
}

impl SessionOrder {
    pub fn new(api: ApiClient, session_id: impl Into<String>) -> Self {
        Self {
            api,
            session_id: session_id.into(),
        }
    }
}

#[async_trait]
impl SnapshotSource for SessionOrder {
    type Snapshot = Option<Order>;

    async fn fetch(&self) -> ClientResult<Option<Order>> {
        self.api.get_session_order(&self.session_id).await
    }
}

/// Follows the order of one table session
#[derive(Debug, Default)]
pub struct OrderTracker {
    order: Option<Order>,
    connected: bool,
    feed: Option<LiveFeed>,
    events: Option<mpsc::Receiver<FeedEvent<Option<Order>>>>,
}

impl OrderTracker {
    /// Tracker without a live feed
    pub fn new() -> Self {
        Self::default()
    }

    /// Subscribe to the session's topic using the stored session token
    pub fn open(api: ApiClient, config: &ClientConfig, session_id: &str) -> ClientResult<Self> {
        let token = api.auth().session_token().ok_or_else(|| {
            ClientError::Unauthorized("No table session; scan the table code again".into())
        })?;
        let options = FeedOptions::new(config, shared::topic::session_order(session_id), Some(token));
        let (feed, events) = LiveFeed::spawn(options, SessionOrder::new(api, session_id));
        Ok(Self {
            feed: Some(feed),
            events: Some(events),
            ..Self::default()
        })
    }

    pub fn order(&self) -> Option<&Order> {
        self.order.as_ref()
    }

    pub fn is_connected(&self) -> bool {
        self.connected
    }

    /// Whole-object replacement; orders without an id are ignored
    pub fn replace(&mut self, order: Order) -> bool {
        let Some(id) = order.id else {
            tracing::warn!("Received an order without an ID, skipping update");
            return false;
        };
        tracing::debug!(order_id = id, status = %order.status, "Session order updated");
        self.order = Some(order);
        true
    }

    pub fn handle_event(&mut self, event: FeedEvent<Option<Order>>) {
        match event {
            FeedEvent::Connected => self.connected = true,
            FeedEvent::Disconnected => self.connected = false,
            FeedEvent::Snapshot(order) => self.order = order.filter(|o| o.id.is_some()),
            FeedEvent::SnapshotFailed(message) => {
                tracing::warn!("Could not load the session order: {message}");
            }
            FeedEvent::Message(value) => match serde_json::from_value::<Order>(value) {
                Ok(order) => {
                    self.replace(order);
                }
                Err(e) => tracing::warn!("Skipping malformed order message: {e}"),
            },
            FeedEvent::Error(message) => tracing::warn!("Order feed error: {message}"),
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

    pub async fn close(mut self) {
        self.connected = false;
        if let Some(feed) = self.feed.take() {
            feed.shutdown().await;
        }
    }
}
