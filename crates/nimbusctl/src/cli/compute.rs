//! Compute CLI command definitions

use clap::Subcommand;

#[derive(Subcommand, Debug)]
pub enum ComputeCommands {
    /// Extension image catalog operations
    #[command(subcommand, name = "extension-image")]
    ExtensionImage(ExtensionImageCommands),
}

/// Extension image commands
#[derive(Subcommand, Debug)]
pub enum ExtensionImageCommands {
    /// Get one extension image version
    #[command(after_help = "EXAMPLES:
    nimbusctl compute extension-image get --location westus \\
      --publisher Nimbus.Diagnostics --type TraceCollector --version 2.1
")]
    Get {
        /// Region the image is published in
        #[arg(long)]
        location: String,
        /// Publisher name
        #[arg(long)]
        publisher: String,
        /// Extension type name
        #[arg(long = "type")]
        type_name: String,
        /// Published version
        #[arg(long)]
        version: String,
        /// Free-form $filter expression passed through to the service
        #[arg(long)]
        filter_expression: Option<String>,
    },
    /// List the published versions of an extension type
    List {
        /// Region the images are published in
        #[arg(long)]
        location: String,
        /// Publisher name
        #[arg(long)]
        publisher: String,
        /// Extension type name
        #[arg(long = "type")]
        type_name: String,
    },
    /// Deprecated alias of `get`
    Detail {
        /// Region the image is published in
        #[arg(long)]
        location: String,
        /// Publisher name
        #[arg(long)]
        publisher: String,
        /// Extension type name
        #[arg(long = "type")]
        type_name: String,
        /// Published version
        #[arg(long)]
        version: String,
        /// Free-form $filter expression passed through to the service
        #[arg(long)]
        filter_expression: Option<String>,
    },
}
