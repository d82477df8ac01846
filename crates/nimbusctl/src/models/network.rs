//! Presentation model for application gateways, and the child-collection
//! edits the pipeline commands apply to it.

use nimbus_mgmt::network as wire;
use serde::{Deserialize, Serialize};

use crate::error::{CtlError, Result};

/// Placeholder segments used in child ids until the service assigns real ones
/// on commit.
pub const RESOURCE_GROUP_NOT_SET: &str = "resource-group-not-set";
pub const GATEWAY_NOT_SET: &str = "application-gateway-name-not-set";
pub const BACKEND_POOLS_SEGMENT: &str = "backend-address-pools";
pub const HTTP_SETTINGS_SEGMENT: &str = "backend-http-settings";

/// Gateway as emitted to (and re-read from) the output stream.
///
/// This is the object threaded through a shell pipeline: each child-edit
/// command takes ownership of it, mutates it, and hands it to the next stage.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AppGateway {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    pub location: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provisioning_state: Option<String>,
    #[serde(default)]
    pub backend_address_pools: Vec<BackendPool>,
    #[serde(default)]
    pub backend_http_settings: Vec<HttpSettings>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BackendPool {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    #[serde(default)]
    pub addresses: Vec<PoolAddress>,
    #[serde(default)]
    pub ip_configuration_ids: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PoolAddress {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ip_address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fqdn: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct HttpSettings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    pub port: u16,
    pub protocol: String,
    pub cookie_based_affinity: String,
}

/// The three mutually exclusive ways to specify a pool's targets.
#[derive(Debug, Clone)]
pub enum PoolAddresses {
    Ips(Vec<String>),
    Fqdns(Vec<String>),
    IpConfigurationIds(Vec<String>),
}

/// Placeholder child id; the service assigns the real one on commit.
pub fn resource_not_set_id(subscription: &str, segment: &str, name: &str) -> String {
    format!(
        "/subscriptions/{subscription}/resource-groups/{RESOURCE_GROUP_NOT_SET}\
         /providers/network/application-gateways/{GATEWAY_NOT_SET}/{segment}/{name}"
    )
}

/// Build a pool wholesale from the supplied parameters.
pub fn build_backend_pool(subscription: &str, name: &str, addresses: &PoolAddresses) -> BackendPool {
    let mut pool = BackendPool {
        id: Some(resource_not_set_id(subscription, BACKEND_POOLS_SEGMENT, name)),
        name: name.to_string(),
        addresses: Vec::new(),
        ip_configuration_ids: Vec::new(),
    };
    match addresses {
        PoolAddresses::Ips(ips) => {
            pool.addresses = ips
                .iter()
                .map(|ip| PoolAddress {
                    ip_address: Some(ip.clone()),
                    fqdn: None,
                })
                .collect();
        }
        PoolAddresses::Fqdns(fqdns) => {
            pool.addresses = fqdns
                .iter()
                .map(|fqdn| PoolAddress {
                    ip_address: None,
                    fqdn: Some(fqdn.clone()),
                })
                .collect();
        }
        PoolAddresses::IpConfigurationIds(ids) => {
            pool.ip_configuration_ids = ids.clone();
        }
    }
    pool
}

/// Build an HTTP settings entry wholesale from the supplied parameters.
pub fn build_http_settings(
    subscription: &str,
    name: &str,
    port: u16,
    protocol: &str,
    cookie_based_affinity: &str,
) -> HttpSettings {
    HttpSettings {
        id: Some(resource_not_set_id(subscription, HTTP_SETTINGS_SEGMENT, name)),
        name: name.to_string(),
        port,
        protocol: protocol.to_string(),
        cookie_based_affinity: cookie_based_affinity.to_string(),
    }
}

impl AppGateway {
    /// Case-insensitive pool lookup.
    pub fn find_backend_pool(&self, name: &str) -> Option<usize> {
        self.backend_address_pools
            .iter()
            .position(|pool| pool.name.eq_ignore_ascii_case(name))
    }

    /// Case-insensitive HTTP settings lookup.
    pub fn find_http_settings(&self, name: &str) -> Option<usize> {
        self.backend_http_settings
            .iter()
            .position(|settings| settings.name.eq_ignore_ascii_case(name))
    }

    /// Append a new pool; the name must not already exist.
    pub fn add_backend_pool(&mut self, pool: BackendPool) -> Result<()> {
        if self.find_backend_pool(&pool.name).is_some() {
            return Err(CtlError::InvalidInput {
                message: "backend address pool with the specified name already exists".into(),
            });
        }
        self.backend_address_pools.push(pool);
        Ok(())
    }

    /// Replace a pool by name.
    ///
    /// The lookup only validates existence: the matched entry's contents are
    /// discarded, never merged into the replacement. With `append_duplicate`
    /// the rebuilt pool is appended instead, leaving the matched entry behind.
    pub fn set_backend_pool(&mut self, pool: BackendPool, append_duplicate: bool) -> Result<()> {
        let Some(index) = self.find_backend_pool(&pool.name) else {
            return Err(CtlError::InvalidInput {
                message: "backend address pool with the specified name does not exist".into(),
            });
        };
        if append_duplicate {
            self.backend_address_pools.push(pool);
        } else {
            self.backend_address_pools[index] = pool;
        }
        Ok(())
    }

    /// Drop a pool by name.
    pub fn remove_backend_pool(&mut self, name: &str) -> Result<()> {
        let Some(index) = self.find_backend_pool(name) else {
            return Err(CtlError::InvalidInput {
                message: "backend address pool with the specified name does not exist".into(),
            });
        };
        self.backend_address_pools.remove(index);
        Ok(())
    }

    /// Replace an HTTP settings entry by name; same contract as
    /// [`set_backend_pool`](Self::set_backend_pool).
    pub fn set_http_settings(&mut self, settings: HttpSettings, append_duplicate: bool) -> Result<()> {
        let Some(index) = self.find_http_settings(&settings.name) else {
            return Err(CtlError::InvalidInput {
                message: "backend http settings with the specified name does not exist".into(),
            });
        };
        if append_duplicate {
            self.backend_http_settings.push(settings);
        } else {
            self.backend_http_settings[index] = settings;
        }
        Ok(())
    }
}

impl From<wire::ApplicationGateway> for AppGateway {
    fn from(gateway: wire::ApplicationGateway) -> Self {
        Self {
            id: gateway.id,
            name: gateway.name,
            location: gateway.location,
            provisioning_state: gateway.provisioning_state,
            backend_address_pools: gateway
                .backend_address_pools
                .into_iter()
                .map(Into::into)
                .collect(),
            backend_http_settings: gateway
                .backend_http_settings
                .into_iter()
                .map(Into::into)
                .collect(),
        }
    }
}

impl From<wire::BackendAddressPool> for BackendPool {
    fn from(pool: wire::BackendAddressPool) -> Self {
        Self {
            id: pool.id,
            name: pool.name,
            addresses: pool
                .backend_addresses
                .into_iter()
                .map(|address| PoolAddress {
                    ip_address: address.ip_address,
                    fqdn: address.fqdn,
                })
                .collect(),
            ip_configuration_ids: pool
                .backend_ip_configurations
                .into_iter()
                .map(|r| r.id)
                .collect(),
        }
    }
}

impl From<wire::BackendHttpSettings> for HttpSettings {
    fn from(settings: wire::BackendHttpSettings) -> Self {
        Self {
            id: settings.id,
            name: settings.name,
            port: settings.port,
            protocol: settings.protocol,
            cookie_based_affinity: settings.cookie_based_affinity,
        }
    }
}

impl From<AppGateway> for wire::ApplicationGateway {
    fn from(gateway: AppGateway) -> Self {
        Self {
            id: gateway.id,
            name: gateway.name,
            location: gateway.location,
            provisioning_state: gateway.provisioning_state,
            backend_address_pools: gateway
                .backend_address_pools
                .into_iter()
                .map(|pool| wire::BackendAddressPool {
                    id: pool.id,
                    name: pool.name,
                    backend_addresses: pool
                        .addresses
                        .into_iter()
                        .map(|address| wire::BackendAddress {
                            ip_address: address.ip_address,
                            fqdn: address.fqdn,
                        })
                        .collect(),
                    backend_ip_configurations: pool
                        .ip_configuration_ids
                        .into_iter()
                        .map(|id| wire::ResourceRef { id })
                        .collect(),
                })
                .collect(),
            backend_http_settings: gateway
                .backend_http_settings
                .into_iter()
                .map(|settings| wire::BackendHttpSettings {
                    id: settings.id,
                    name: settings.name,
                    port: settings.port,
                    protocol: settings.protocol,
                    cookie_based_affinity: settings.cookie_based_affinity,
                })
                .collect(),
        }
    }
}
