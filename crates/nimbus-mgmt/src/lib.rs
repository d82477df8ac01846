//! # nimbus-mgmt
//!
//! Typed async client for the Nimbus resource-manager REST API.
//!
//! The crate is organized as a thin [`MgmtClient`] carrying the HTTP plumbing
//! (base URL, bearer token, subscription scope) plus one handler per resource
//! kind. Handlers build a request, issue exactly one call, and return the
//! deserialized body inside a [`MgmtResponse`] envelope that also exposes the
//! HTTP status and the service's request id.
//!
//! ```no_run
//! # async fn demo() -> Result<(), nimbus_mgmt::RestError> {
//! use nimbus_mgmt::{MgmtClient, compute::{ExtensionImageGetParams, ExtensionImageHandler}};
//!
//! let client = MgmtClient::builder()
//!     .base_url("https://management.nimbus.example")
//!     .token("...")
//!     .subscription("00000000-1111-2222-3333-444444444444")
//!     .build()?;
//!
//! let handler = ExtensionImageHandler::new(client);
//! let image = handler
//!     .get(&ExtensionImageGetParams {
//!         location: "westus".into(),
//!         publisher: "Nimbus.Diagnostics".into(),
//!         type_name: "TraceCollector".into(),
//!         version: "2.1".into(),
//!         filter_expression: None,
//!     })
//!     .await?;
//! println!("{} ({:?})", image.body.name, image.request_id);
//! # Ok(())
//! # }
//! ```
//!
//! The [`recording`] module holds the cassette format used by scenario tests
//! to record and replay HTTP exchanges; a [`recording::Recorder`] can be
//! attached to the client builder as an additional behavior.

pub mod batch;
pub mod client;
pub mod compute;
pub mod error;
pub mod network;
pub mod recording;

pub use client::{MgmtClient, MgmtClientBuilder, MgmtResponse, REQUEST_ID_HEADER};
pub use error::{RestError, Result};
