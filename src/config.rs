//! Configuration for the caption gateway.
//!
//! Options come from command-line arguments via clap, with environment
//! variable fallbacks under the `CAPTIONS_` prefix.
//!
//! # Environment Variables
//!
//! - `CAPTIONS_HOST` - Server bind address (default: 0.0.0.0)
//! - `CAPTIONS_PORT` - Server port (default: 3000)
//! - `CAPTIONS_FLAG_SECRET` - HMAC secret for flag tokens (required)
//! - `CAPTIONS_CONTENT_BASE_URL` - Content repository base URL
//! - `CAPTIONS_CONTENT_DIR` - Local content checkout; overrides the base URL
//! - `CAPTIONS_STORE_URL` - Grist server URL (unset = in-memory store)
//! - `CAPTIONS_STORE_DOC` - Grist document id
//! - `CAPTIONS_STORE_API_KEY` - Grist API key
//! - `CAPTIONS_STORE_TABLE` - Flags table name (default: Flags)
//! - `CAPTIONS_CORS_ORIGINS` - Allowed CORS origins, comma-separated (default: any)

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

use crate::content::DEFAULT_CONTENT_BASE_URL;
use crate::store::DEFAULT_TABLE;

// =============================================================================
// Default Values
// =============================================================================

/// Default server host.
pub const DEFAULT_HOST: &str = "0.0.0.0";

/// Default server port.
pub const DEFAULT_PORT: u16 = 3000;

// =============================================================================
// CLI Arguments
// =============================================================================

/// Caption gateway - video lookup, caption passthrough and signed flags.
#[derive(Parser, Debug, Clone)]
#[command(name = "caption-gateway")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    pub fn into_command(self) -> Command {
        self.command
    }
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Run the HTTP service
    Serve(ServeConfig),

    /// Mint the flag token for a known record id
    Sign(SignConfig),

    /// Check a flag token and print the record id it grants
    Verify(VerifyConfig),
}

/// Options for `serve`.
#[derive(Args, Debug, Clone)]
pub struct ServeConfig {
    // =========================================================================
    // Server Configuration
    // =========================================================================
    /// Host address to bind the server to.
    #[arg(long, default_value = DEFAULT_HOST, env = "CAPTIONS_HOST")]
    pub host: String,

    /// Port to listen on.
    #[arg(short, long, default_value_t = DEFAULT_PORT, env = "CAPTIONS_PORT")]
    pub port: u16,

    // =========================================================================
    // Flag Signing
    // =========================================================================
    /// Secret key for HMAC-SHA256 flag tokens.
    ///
    /// The server refuses to start without it.
    #[arg(long, env = "CAPTIONS_FLAG_SECRET", hide_env_values = true)]
    pub flag_secret: Option<String>,

    // =========================================================================
    // Content Repository
    // =========================================================================
    /// Base URL the talk pages and caption tracks are fetched from.
    #[arg(long, default_value = DEFAULT_CONTENT_BASE_URL, env = "CAPTIONS_CONTENT_BASE_URL")]
    pub content_base_url: String,

    /// Read content from this directory instead of the base URL.
    #[arg(long, env = "CAPTIONS_CONTENT_DIR")]
    pub content_dir: Option<PathBuf>,

    // =========================================================================
    // Record Store
    // =========================================================================
    /// Grist server URL. Without it flags are kept in memory.
    #[arg(long, env = "CAPTIONS_STORE_URL")]
    pub store_url: Option<String>,

    /// Grist document id holding the flags table.
    #[arg(long, env = "CAPTIONS_STORE_DOC")]
    pub store_doc: Option<String>,

    /// Grist API key.
    #[arg(long, env = "CAPTIONS_STORE_API_KEY", hide_env_values = true)]
    pub store_api_key: Option<String>,

    /// Name of the flags table.
    #[arg(long, default_value = DEFAULT_TABLE, env = "CAPTIONS_STORE_TABLE")]
    pub store_table: String,

    // =========================================================================
    // CORS Configuration
    // =========================================================================
    /// Allowed CORS origins (comma-separated).
    ///
    /// If not specified, allows any origin.
    #[arg(long, env = "CAPTIONS_CORS_ORIGINS", value_delimiter = ',')]
    pub cors_origins: Option<Vec<String>>,

    // =========================================================================
    // Logging Configuration
    // =========================================================================
    /// Enable verbose logging (debug level).
    #[arg(short, long, default_value_t = false)]
    pub verbose: bool,

    /// Disable request tracing.
    #[arg(long, default_value_t = false)]
    pub no_tracing: bool,
}

impl ServeConfig {
    /// Validate the configuration and return an error message if invalid.
    pub fn validate(&self) -> Result<(), String> {
        match self.flag_secret.as_deref() {
            None | Some("") => {
                return Err(
                    "No flag secret provided. Set --flag-secret or CAPTIONS_FLAG_SECRET"
                        .to_string(),
                )
            }
            Some(_) => {}
        }

        if self.content_dir.is_none() && self.content_base_url.is_empty() {
            return Err(
                "Content base URL is empty. Set --content-base-url or --content-dir".to_string(),
            );
        }

        if self.store_url.is_some() && self.store_doc.as_deref().unwrap_or("").is_empty() {
            return Err(
                "A store URL is set but no document. Set --store-doc or CAPTIONS_STORE_DOC"
                    .to_string(),
            );
        }

        if self.store_table.is_empty() {
            return Err("store_table must not be empty".to_string());
        }

        Ok(())
    }

    /// Get the server bind address as "host:port".
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Get the flag secret, or an empty string if unset (call validate() first).
    pub fn flag_secret_or_empty(&self) -> &str {
        self.flag_secret.as_deref().unwrap_or("")
    }
}

/// Output format for `sign`.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignOutputFormat {
    /// Print only the token
    Token,
    /// Print a JSON object with the id and token
    Json,
}

/// Options for `sign`.
#[derive(Args, Debug, Clone)]
pub struct SignConfig {
    /// Record id to mint a token for.
    #[arg(long, allow_hyphen_values = true)]
    pub id: i64,

    /// Secret key for HMAC-SHA256 flag tokens.
    #[arg(long, env = "CAPTIONS_FLAG_SECRET", hide_env_values = true)]
    pub secret: String,

    /// Output format.
    #[arg(long, value_enum, default_value_t = SignOutputFormat::Token)]
    pub format: SignOutputFormat,
}

impl SignConfig {
    pub fn validate(&self) -> Result<(), String> {
        if self.secret.is_empty() {
            return Err("Secret must not be empty".to_string());
        }
        Ok(())
    }
}

/// Options for `verify`.
#[derive(Args, Debug, Clone)]
pub struct VerifyConfig {
    /// Flag token to check.
    pub token: String,

    /// Secret key for HMAC-SHA256 flag tokens.
    #[arg(long, env = "CAPTIONS_FLAG_SECRET", hide_env_values = true)]
    pub secret: String,
}

// =============================================================================
// Tests
// =============================================================================
