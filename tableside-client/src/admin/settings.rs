use shared::models::RestaurantUpdate;

use crate::error::ClientResult;
use crate::http::ApiClient;
use crate::notify::{Notification, NotificationCenter};

/// Restaurant settings form
#[derive(Debug)]
pub struct SettingsForm {
    api: ApiClient,
    pub form: RestaurantUpdate,
    notifications: NotificationCenter,
}

impl SettingsForm {
    pub async fn load(api: ApiClient) -> ClientResult<Self> {
        api.auth().require_auth()?;
        let details = api.get_restaurant_details().await.inspect_err(|e| {
            tracing::error!("Failed to load restaurant details: {e}");
        })?;
        Ok(Self::with_form(api, RestaurantUpdate::from(&details)))
    }

    pub fn with_form(api: ApiClient, form: RestaurantUpdate) -> Self {
        Self {
            api,
            form,
            notifications: NotificationCenter::default(),
        }
    }

    pub fn notifications(&mut self) -> &mut NotificationCenter {
        &mut self.notifications
    }

    pub async fn save(&mut self) -> ClientResult<()> {
        match self.api.update_restaurant_details(&self.form).await {
            Ok(_) => {
                self.notifications
                    .push(Notification::success("Settings saved successfully!"));
                Ok(())
            }
            Err(e) => {
                self.notifications
                    .push(Notification::error(format!("Error: {}", e.user_message())));
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ClientConfig;
    use crate::notify::NotificationKind;
    use crate::storage::MemoryTokenStore;
    use std::sync::Arc;

    #[tokio::test]
    async fn test_invalid_form_reports_error() {
        let api = ApiClient::new(
            &ClientConfig::new("http://127.0.0.1:9"),
            Arc::new(MemoryTokenStore::new()),
        )
        .unwrap();
        let mut settings = SettingsForm::with_form(api, RestaurantUpdate::default());

        assert!(settings.save().await.is_err());
        let note = settings.notifications().latest().unwrap();
        assert_eq!(note.kind, NotificationKind::Error);
        assert!(note.message.starts_with("Error: "));
    }
}
