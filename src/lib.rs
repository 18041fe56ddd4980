pub mod config;
pub mod core;
pub mod domain;
#[cfg(feature = "lambda")]
pub mod handler;
pub mod utils;

#[cfg(feature = "cli")]
pub use crate::config::cli::{CliConfig, LocalSink};

#[cfg(feature = "lambda")]
pub use crate::config::lambda::{FirehoseSink, LambdaConfig};

pub use crate::core::encoding::JsonLineStyle;
pub use crate::core::{engine::ForwardEngine, forwarder::AuditForwarder};
pub use crate::domain::model::{ForwardSummary, OrderAuditEntry, StreamEvent, StreamRecord};
pub use crate::utils::error::{FlattenError, ForwarderError, Result};
