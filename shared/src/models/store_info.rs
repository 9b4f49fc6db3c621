//! Restaurant Settings Model

use serde::{Deserialize, Serialize};

use crate::error::{ValidationResult, require};

/// Restaurant details (singleton per admin account)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RestaurantDetails {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub address: Option<String>,
}

/// Update restaurant details payload
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RestaurantUpdate {
    pub name: String,
    #[serde(default)]
    pub address: String,
}

impl RestaurantUpdate {
    pub fn validate(&self) -> ValidationResult {
        require("name", &self.name)
    }
}

impl From<&RestaurantDetails> for RestaurantUpdate {
    fn from(details: &RestaurantDetails) -> Self {
        Self {
            name: details.name.clone(),
            address: details.address.clone().unwrap_or_default(),
        }
    }
}
