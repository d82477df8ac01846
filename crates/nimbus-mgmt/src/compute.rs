//! Compute resource-provider operations: the extension image catalog.

use serde::{Deserialize, Serialize};

use crate::client::{ListResult, MgmtClient, MgmtResponse};
use crate::error::Result;

/// A published VM extension image, as the service returns it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ExtensionImage {
    pub id: String,
    pub location: String,
    pub name: String,
    #[serde(default)]
    pub handler_schema: Option<String>,
    #[serde(default)]
    pub operating_system: Option<String>,
    #[serde(default)]
    pub compute_role: Option<String>,
    #[serde(default)]
    pub supports_multiple_extensions: bool,
    #[serde(default)]
    pub scale_set_enabled: bool,
}

/// Selector for a single extension image version.
#[derive(Debug, Clone)]
pub struct ExtensionImageGetParams {
    pub location: String,
    pub publisher: String,
    pub type_name: String,
    pub version: String,
    /// Free-form `$filter` expression, passed through uninterpreted.
    pub filter_expression: Option<String>,
}

/// Handler for extension image catalog calls.
pub struct ExtensionImageHandler {
    client: MgmtClient,
}

impl ExtensionImageHandler {
    pub fn new(client: MgmtClient) -> Self {
        Self { client }
    }

    /// Fetch one extension image version.
    pub async fn get(
        &self,
        params: &ExtensionImageGetParams,
    ) -> Result<MgmtResponse<ExtensionImage>> {
        let path = format!(
            "providers/compute/locations/{}/publishers/{}/types/{}/versions/{}",
            params.location, params.publisher, params.type_name, params.version
        );
        let mut query = Vec::new();
        if let Some(ref filter) = params.filter_expression {
            query.push(("$filter", filter.clone()));
        }
        self.client.get_json(&path, &query).await
    }

    /// List the published versions of an extension type.
    pub async fn list_versions(
        &self,
        location: &str,
        publisher: &str,
        type_name: &str,
    ) -> Result<MgmtResponse<Vec<ExtensionImage>>> {
        let path = format!(
            "providers/compute/locations/{location}/publishers/{publisher}/types/{type_name}/versions"
        );
        let response: MgmtResponse<ListResult<ExtensionImage>> =
            self.client.get_json(&path, &[]).await?;
        Ok(MgmtResponse {
            body: response.body.value,
            status: response.status,
            request_id: response.request_id,
        })
    }
}
