pub mod encoding;
pub mod engine;
pub mod flatten;
pub mod forwarder;

pub use crate::domain::model::{
    AttributeValue, AuditBatch, DeliveryReceipt, ForwardSummary, Item, OrderAuditEntry,
    StreamChange, StreamEvent, StreamRecord,
};
pub use crate::domain::ports::{ConfigProvider, DeliverySink, Pipeline};
pub use crate::utils::error::Result;
