//! Compute command implementations

use nimbus_mgmt::compute::{ExtensionImageGetParams, ExtensionImageHandler};
use tracing::debug;

use crate::cli::{ComputeCommands, ExtensionImageCommands, OutputFormat};
use crate::commands::utils::{emit, require_non_empty};
use crate::connection::ConnectionManager;
use crate::error::Result as CliResult;
use crate::models::compute::{ExtensionImageDetails, canonical_location};
use crate::output::print_warning;

const DETAIL_DEPRECATION: &str = "'compute extension-image detail' is deprecated and will be \
removed in a future release. Use 'compute extension-image get' instead.";

pub async fn handle_compute_command(
    conn_mgr: &ConnectionManager,
    profile_name: Option<&str>,
    command: &ComputeCommands,
    output_format: OutputFormat,
    query: Option<&str>,
) -> CliResult<()> {
    match command {
        ComputeCommands::ExtensionImage(cmd) => {
            handle_extension_image_command(conn_mgr, profile_name, cmd, output_format, query).await
        }
    }
}

async fn handle_extension_image_command(
    conn_mgr: &ConnectionManager,
    profile_name: Option<&str>,
    command: &ExtensionImageCommands,
    output_format: OutputFormat,
    query: Option<&str>,
) -> CliResult<()> {
    let handler = ExtensionImageHandler::new(conn_mgr.create_client(profile_name)?);

    match command {
        ExtensionImageCommands::Get {
            location,
            publisher,
            type_name,
            version,
            filter_expression,
        } => {
            get_image(
                &handler,
                location,
                publisher,
                type_name,
                version,
                filter_expression.as_deref(),
                output_format,
                query,
            )
            .await
        }

        ExtensionImageCommands::Detail {
            location,
            publisher,
            type_name,
            version,
            filter_expression,
        } => {
            // Deprecated variant: warn, then behave exactly like `get`.
            print_warning(DETAIL_DEPRECATION);
            get_image(
                &handler,
                location,
                publisher,
                type_name,
                version,
                filter_expression.as_deref(),
                output_format,
                query,
            )
            .await
        }

        ExtensionImageCommands::List {
            location,
            publisher,
            type_name,
        } => {
            require_non_empty(location, "location")?;
            require_non_empty(publisher, "publisher")?;
            require_non_empty(type_name, "extension type")?;

            let location = canonical_location(location);
            debug!("Listing extension image versions in {}", location);
            let response = handler
                .list_versions(&location, publisher, type_name)
                .await?;

            let images: Vec<ExtensionImageDetails> = response
                .body
                .iter()
                .map(|image| {
                    ExtensionImageDetails::from_response(
                        &nimbus_mgmt::MgmtResponse {
                            body: image.clone(),
                            status: response.status,
                            request_id: response.request_id.clone(),
                        },
                        publisher,
                        type_name,
                        Some(image.name.as_str()),
                    )
                })
                .collect();
            emit(&images, output_format, query)
        }
    }
}

#[allow(clippy::too_many_arguments)]
async fn get_image(
    handler: &ExtensionImageHandler,
    location: &str,
    publisher: &str,
    type_name: &str,
    version: &str,
    filter_expression: Option<&str>,
    output_format: OutputFormat,
    query: Option<&str>,
) -> CliResult<()> {
    require_non_empty(location, "location")?;
    require_non_empty(publisher, "publisher")?;
    require_non_empty(type_name, "extension type")?;
    require_non_empty(version, "version")?;

    let params = ExtensionImageGetParams {
        location: canonical_location(location),
        publisher: publisher.to_string(),
        type_name: type_name.to_string(),
        version: version.to_string(),
        filter_expression: filter_expression.map(String::from),
    };
    debug!("Fetching extension image {:?}", params);

    let response = handler.get(&params).await?;
    let details =
        ExtensionImageDetails::from_response(&response, publisher, type_name, Some(version));
    emit(&details, output_format, query)
}
