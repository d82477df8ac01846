//! Presentation model for extension image output.

use nimbus_mgmt::MgmtResponse;
use nimbus_mgmt::compute::ExtensionImage;
use serde::Serialize;

/// Extension image details as emitted to the output stream.
///
/// Carries the response metadata alongside the image fields, and echoes the
/// selector the caller supplied.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ExtensionImageDetails {
    pub request_id: Option<String>,
    pub status_code: u16,
    pub id: String,
    pub location: String,
    pub name: String,
    pub handler_schema: Option<String>,
    pub operating_system: Option<String>,
    pub compute_role: Option<String>,
    pub supports_multiple_extensions: bool,
    pub scale_set_enabled: bool,
    pub publisher: String,
    #[serde(rename = "type")]
    pub type_name: String,
    pub version: Option<String>,
}

impl ExtensionImageDetails {
    /// Pure projection from the wire response.
    pub fn from_response(
        response: &MgmtResponse<ExtensionImage>,
        publisher: &str,
        type_name: &str,
        version: Option<&str>,
    ) -> Self {
        let image = &response.body;
        Self {
            request_id: response.request_id.clone(),
            status_code: response.status,
            id: image.id.clone(),
            location: image.location.clone(),
            name: image.name.clone(),
            handler_schema: image.handler_schema.clone(),
            operating_system: image.operating_system.clone(),
            compute_role: image.compute_role.clone(),
            supports_multiple_extensions: image.supports_multiple_extensions,
            scale_set_enabled: image.scale_set_enabled,
            publisher: publisher.to_string(),
            type_name: type_name.to_string(),
            version: version.map(String::from),
        }
    }
}

/// Normalize a user-supplied location: lowercased, whitespace stripped.
/// "West US" and "westus" name the same region.
pub fn canonical_location(location: &str) -> String {
    location
        .chars()
        .filter(|c| !c.is_whitespace())
        .flat_map(char::to_lowercase)
        .collect()
}
