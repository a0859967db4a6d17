use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "sfdc-cli")]
#[command(about = "A CLI tool for the Salesforce REST and Metadata APIs")]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Args, Debug, Clone, Default)]
pub struct GlobalArgs {
    /// Read credentials from this .env file instead of the process environment
    #[arg(long, global = true)]
    pub env_file: Option<PathBuf>,

    /// Config file (defaults to the user config directory)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// API version, e.g. 59.0
    #[arg(long, global = true)]
    pub api_version: Option<String>,

    /// Prompt for the password instead of reading SFDC_PASSWORD
    #[arg(long, global = true)]
    pub prompt_password: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create a record and print its identifier
    Create {
        /// Record type, e.g. Account
        record_type: String,
        /// Record fields as a JSON object
        data: String,
    },
    /// Read one record, or describe the record type when no id is given
    Read {
        record_type: String,
        id: Option<String>,
    },
    /// Update fields of a record
    Update {
        record_type: String,
        id: String,
        /// Fields to change as a JSON object
        data: String,
    },
    /// Delete a record
    Delete {
        record_type: String,
        id: String,
    },
    /// List metadata components of a type
    ListMetadata {
        /// Metadata type, e.g. WorkflowRule
        #[arg(long = "type")]
        metadata_type: String,
        /// Folder for folder-based types such as Report
        #[arg(long)]
        folder: Option<String>,
    },
    /// Send a raw request and print the status and body
    Send {
        /// HTTP method
        method: String,
        /// Relative path or absolute URL
        path: String,
        /// Request body
        data: Option<String>,
    },
}
