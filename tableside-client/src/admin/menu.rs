use shared::models::{MenuItem, MenuItemPayload};
use std::fmt;
use std::str::FromStr;

use crate::error::{ClientError, ClientResult};
use crate::http::ApiClient;
use crate::notify::{Notification, NotificationCenter};

/// Availability filter of the menu list
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum AvailabilityFilter {
    #[default]
    All,
    Available,
    Unavailable,
}

impl AvailabilityFilter {
    pub fn matches(self, item: &MenuItem) -> bool {
        match self {
            Self::All => true,
            Self::Available => item.is_available,
            Self::Unavailable => !item.is_available,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Available => "available",
            Self::Unavailable => "unavailable",
        }
    }
}

impl fmt::Display for AvailabilityFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AvailabilityFilter {
    type Err = ClientError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "all" => Ok(Self::All),
            "available" => Ok(Self::Available),
            "unavailable" => Ok(Self::Unavailable),
            other => Err(ClientError::Validation(format!(
                "unknown availability filter: {other}"
            ))),
        }
    }
}

/// Menu management page
#[derive(Debug)]
pub struct MenuManager {
    api: ApiClient,
    items: Vec<MenuItem>,
    notifications: NotificationCenter,
}

impl MenuManager {
    pub async fn load(api: ApiClient) -> ClientResult<Self> {
        api.auth().require_auth()?;
        let items = api.list_menu_items().await?;
        Ok(Self::with_items(api, items))
    }

    pub fn with_items(api: ApiClient, items: Vec<MenuItem>) -> Self {
        Self {
            api,
            items,
            notifications: NotificationCenter::default(),
        }
    }

    pub fn items(&self) -> &[MenuItem] {
        &self.items
    }

    pub fn get(&self, item_id: i64) -> Option<&MenuItem> {
        self.items.iter().find(|item| item.id == item_id)
    }

    pub fn notifications(&mut self) -> &mut NotificationCenter {
        &mut self.notifications
    }

    /// Items whose name contains `search` (case-insensitive) and that pass `filter`
    pub fn filtered(&self, search: &str, filter: AvailabilityFilter) -> Vec<&MenuItem> {
        let needle = search.trim().to_lowercase();
        self.items
            .iter()
            .filter(|item| item.name.to_lowercase().contains(&needle))
            .filter(|item| filter.matches(item))
            .collect()
    }

    /// Flip availability immediately, rolling back if the backend refuses
    pub async fn toggle_availability(&mut self, item_id: i64) -> ClientResult<bool> {
        let item = self
            .items
            .iter_mut()
            .find(|item| item.id == item_id)
            .ok_or_else(|| ClientError::NotFound(format!("Menu item {item_id} not found")))?;
        let previous = item.is_available;
        item.is_available = !previous;

        match self.api.set_menu_item_availability(item_id, !previous).await {
            Ok(()) => Ok(!previous),
            Err(e) => {
                if let Some(item) = self.items.iter_mut().find(|item| item.id == item_id) {
                    item.is_available = previous;
                }
                self.notifications.push(Notification::error(
                    "Failed to update availability. Please try again.",
                ));
                Err(e)
            }
        }
    }

    /// Delete on the backend, then drop the local row
    pub async fn delete(&mut self, item_id: i64) -> ClientResult<()> {
        if let Err(e) = self.api.delete_menu_item(item_id).await {
            self.notifications
                .push(Notification::error("Failed to delete item. Please try again."));
            return Err(e);
        }
        self.items.retain(|item| item.id != item_id);
        tracing::info!(item_id, "Menu item deleted");
        Ok(())
    }

    /// Create (`item_id == None`) or fully update an item from the form
    pub async fn save(
        &mut self,
        item_id: Option<i64>,
        payload: &MenuItemPayload,
    ) -> ClientResult<Option<MenuItem>> {
        let saved = match item_id {
            Some(id) => self.api.update_menu_item(id, payload).await?,
            None => self.api.create_menu_item(payload).await?,
        };
        if let Some(item) = &saved {
            match self.items.iter_mut().find(|existing| existing.id == item.id) {
                Some(existing) => *existing = item.clone(),
                None => self.items.push(item.clone()),
            }
        }
        tracing::info!(?item_id, name = %payload.name, "Menu item saved");
        Ok(saved)
    }

    /// Re-fetch the list (after a save whose response carried no body)
    pub async fn refresh(&mut self) -> ClientResult<()> {
        self.items = self.api.list_menu_items().await?;
        Ok(())
    }
}
