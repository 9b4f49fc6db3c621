use shared::models::{Order, OrderStatus, PlaceOrderRequest, StatusUpdate};

use crate::error::ClientResult;
use crate::http::{ApiClient, HttpClient};

impl ApiClient {
    /// Submit an order from a table
    pub async fn place_order(&self, request: &PlaceOrderRequest) -> ClientResult<Option<Order>> {
        request.validate()?;
        let order: Option<Order> = self.post("/api/orders", request).await?;
        tracing::info!(
            restaurant_id = request.restaurant_id,
            table = %request.table_number,
            lines = request.items.len(),
            "Order placed"
        );
        Ok(order)
    }

    /// Orders still on the kitchen board
    pub async fn get_active_orders(&self, restaurant_id: i64) -> ClientResult<Vec<Order>> {
        self.get(&format!("/api/orders/restaurant/{restaurant_id}/active"))
            .await
    }

    pub async fn update_order_status(
        &self,
        order_id: i64,
        new_status: OrderStatus,
    ) -> ClientResult<()> {
        let _: Option<serde_json::Value> = self
            .patch(
                &format!("/api/orders/{order_id}/status"),
                &StatusUpdate { new_status },
            )
            .await?;
        Ok(())
    }

    /// Current order of a table session, `None` before the first order
    pub async fn get_session_order(&self, session_id: &str) -> ClientResult<Option<Order>> {
        self.get(&format!("/api/sessions/{session_id}/order")).await
    }
}
