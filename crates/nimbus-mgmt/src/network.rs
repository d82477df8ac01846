//! Network resource-provider operations: application gateways.

use serde::{Deserialize, Serialize};

use crate::client::{MgmtClient, MgmtResponse};
use crate::error::Result;

/// An application gateway resource.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationGateway {
    #[serde(default)]
    pub id: Option<String>,
    pub name: String,
    pub location: String,
    #[serde(default)]
    pub provisioning_state: Option<String>,
    #[serde(default)]
    pub backend_address_pools: Vec<BackendAddressPool>,
    #[serde(default)]
    pub backend_http_settings: Vec<BackendHttpSettings>,
}

/// A named pool of backend targets inside a gateway.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BackendAddressPool {
    #[serde(default)]
    pub id: Option<String>,
    pub name: String,
    #[serde(default)]
    pub backend_addresses: Vec<BackendAddress>,
    #[serde(default)]
    pub backend_ip_configurations: Vec<ResourceRef>,
}

/// One backend target, by IP or FQDN.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BackendAddress {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ip_address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fqdn: Option<String>,
}

/// Reference to another resource by id.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ResourceRef {
    pub id: String,
}

/// Per-pool HTTP settings inside a gateway.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BackendHttpSettings {
    #[serde(default)]
    pub id: Option<String>,
    pub name: String,
    pub port: u16,
    pub protocol: String,
    pub cookie_based_affinity: String,
}

/// Handler for application gateway calls.
pub struct ApplicationGatewayHandler {
    client: MgmtClient,
}

impl ApplicationGatewayHandler {
    pub fn new(client: MgmtClient) -> Self {
        Self { client }
    }

    fn gateway_path(&self, resource_group: &str, name: &str) -> String {
        format!(
            "subscriptions/{}/resource-groups/{}/providers/network/application-gateways/{}",
            self.client.subscription(),
            resource_group,
            name
        )
    }

    pub async fn get(
        &self,
        resource_group: &str,
        name: &str,
    ) -> Result<MgmtResponse<ApplicationGateway>> {
        let path = self.gateway_path(resource_group, name);
        self.client.get_json(&path, &[]).await
    }

    /// PUT the full gateway back to the service.
    pub async fn create_or_update(
        &self,
        resource_group: &str,
        gateway: &ApplicationGateway,
    ) -> Result<MgmtResponse<ApplicationGateway>> {
        let path = self.gateway_path(resource_group, &gateway.name);
        self.client.put_json(&path, gateway).await
    }
}
