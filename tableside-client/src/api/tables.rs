use shared::models::{CreatedTable, DiningTable, TableCreate};

use crate::error::ClientResult;
use crate::http::{ApiClient, HttpClient};

impl ApiClient {
    pub async fn list_tables(&self) -> ClientResult<Vec<DiningTable>> {
        self.get("/api/admin/tables").await
    }

    /// Create a table; the response is the only place its secret appears
    pub async fn create_table(&self, name: &str) -> ClientResult<CreatedTable> {
        let request = TableCreate {
            name: name.trim().to_string(),
        };
        request.validate()?;
        self.post("/api/admin/tables", &request).await
    }
}
