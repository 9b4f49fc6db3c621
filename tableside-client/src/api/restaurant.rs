use shared::models::{RestaurantDetails, RestaurantUpdate};

use crate::error::ClientResult;
use crate::http::{ApiClient, HttpClient};

impl ApiClient {
    pub async fn get_restaurant_details(&self) -> ClientResult<RestaurantDetails> {
        self.get("/api/admin/restaurant").await
    }

    pub async fn update_restaurant_details(
        &self,
        update: &RestaurantUpdate,
    ) -> ClientResult<Option<RestaurantDetails>> {
        update.validate()?;
        self.put("/api/admin/restaurant", update).await
    }
}
