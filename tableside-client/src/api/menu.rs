use shared::models::{AvailabilityUpdate, MenuItem, MenuItemPayload};

use crate::error::ClientResult;
use crate::http::{ApiClient, HttpClient};

impl ApiClient {
    // ========== Public ==========

    /// Menu shown to customers
    pub async fn get_menu(&self, restaurant_id: i64) -> ClientResult<Vec<MenuItem>> {
        self.get(&format!("/api/menu/{restaurant_id}")).await
    }

    // ========== Admin ==========

    pub async fn list_menu_items(&self) -> ClientResult<Vec<MenuItem>> {
        self.get("/api/admin/menu-items").await
    }

    pub async fn get_menu_item(&self, item_id: i64) -> ClientResult<MenuItem> {
        self.get(&format!("/api/admin/menu-items/{item_id}")).await
    }

    pub async fn create_menu_item(&self, payload: &MenuItemPayload) -> ClientResult<Option<MenuItem>> {
        payload.validate()?;
        self.post("/api/admin/menu-items", payload).await
    }

    pub async fn update_menu_item(
        &self,
        item_id: i64,
        payload: &MenuItemPayload,
    ) -> ClientResult<Option<MenuItem>> {
        payload.validate()?;
        self.put(&format!("/api/admin/menu-items/{item_id}"), payload)
            .await
    }

    pub async fn delete_menu_item(&self, item_id: i64) -> ClientResult<()> {
        let _: Option<serde_json::Value> = self
            .delete(&format!("/api/admin/menu-items/{item_id}"))
            .await?;
        Ok(())
    }

    pub async fn set_menu_item_availability(
        &self,
        item_id: i64,
        is_available: bool,
    ) -> ClientResult<()> {
        let _: Option<serde_json::Value> = self
            .patch(
                &format!("/api/admin/menu-items/{item_id}/availability"),
                &AvailabilityUpdate { is_available },
            )
            .await?;
        Ok(())
    }
}
