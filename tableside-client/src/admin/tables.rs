use shared::models::{DiningTable, ProvisioningInfo};

use crate::config::ClientConfig;
use crate::error::ClientResult;
use crate::http::ApiClient;

/// Table management page
///
/// A created table's secret is handed back once and not kept here.
#[derive(Debug)]
pub struct TableManager {
    api: ApiClient,
    app_origin: String,
    tables: Vec<DiningTable>,
}

impl TableManager {
    pub async fn load(api: ApiClient, config: &ClientConfig) -> ClientResult<Self> {
        api.auth().require_auth()?;
        let tables = api.list_tables().await?;
        Ok(Self::with_tables(api, config, tables))
    }

    pub fn with_tables(api: ApiClient, config: &ClientConfig, tables: Vec<DiningTable>) -> Self {
        Self {
            api,
            app_origin: config.app_origin.clone(),
            tables,
        }
    }

    pub fn tables(&self) -> &[DiningTable] {
        &self.tables
    }

    /// Create a table and return what the table device needs to be set up
    pub async fn create(&mut self, name: &str) -> ClientResult<ProvisioningInfo> {
        let created = self.api.create_table(name).await?;
        tracing::info!(table_id = created.id, name = %created.name, "Table created");
        self.tables.push(created.to_table());
        Ok(created.provisioning(&self.app_origin))
    }
}
