#[cfg(feature = "cli")]
pub mod cli;
#[cfg(feature = "lambda")]
pub mod lambda;

/// Delivery stream the audit records go to unless configured otherwise.
pub const DEFAULT_DELIVERY_STREAM_NAME: &str = "OrdersAuditFirehose";

#[cfg(feature = "cli")]
pub use cli::CliConfig;
