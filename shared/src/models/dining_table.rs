//! Dining Table Model

use serde::{Deserialize, Serialize};

use crate::error::{ValidationResult, require};

/// Dining table entity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiningTable {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub restaurant_id: Option<i64>,
}

/// Create dining table payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableCreate {
    pub name: String,
}

impl TableCreate {
    pub fn validate(&self) -> ValidationResult {
        require("name", &self.name)
    }
}

/// Create response: the table plus its provisioning secret
///
/// The secret is only ever returned by this response.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatedTable {
    pub id: i64,
    pub name: String,
    pub restaurant_id: i64,
    pub secret_key: String,
}

impl CreatedTable {
    /// The listing entry, without the secret
    pub fn to_table(&self) -> DiningTable {
        DiningTable {
            id: self.id,
            name: self.name.clone(),
            restaurant_id: Some(self.restaurant_id),
        }
    }

    /// Details entered on the table device's configuration page
    pub fn provisioning(&self, app_origin: &str) -> ProvisioningInfo {
        ProvisioningInfo {
            table_name: self.name.clone(),
            base_url: format!(
                "{}/menu/{}?table={}",
                app_origin.trim_end_matches('/'),
                self.restaurant_id,
                self.id
            ),
            secret_key: self.secret_key.clone(),
        }
    }
}

/// Table device provisioning details
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProvisioningInfo {
    pub table_name: String,
    pub base_url: String,
    pub secret_key: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provisioning_url() {
        let created: CreatedTable = serde_json::from_str(
            r#"{"id":9,"name":"Patio 3","restaurantId":2,"secretKey":"s3cr3t"}"#,
        )
        .unwrap();
        let info = created.provisioning("https://order.example.com/");
        assert_eq!(info.base_url, "https://order.example.com/menu/2?table=9");
        assert_eq!(info.secret_key, "s3cr3t");
        assert_eq!(created.to_table().restaurant_id, Some(2));
    }
}
