use crate::core::encoding::JsonLineStyle;
use crate::domain::model::{AuditBatch, DeliveryReceipt, StreamRecord};
use crate::utils::error::Result;
use async_trait::async_trait;

/// Append-only endpoint that accepts one opaque record per call.
pub trait DeliverySink: Send + Sync {
    fn put_record(
        &self,
        stream_name: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<DeliveryReceipt>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn delivery_stream_name(&self) -> &str;
    fn line_style(&self) -> JsonLineStyle;
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    fn transform(&self, records: &[StreamRecord]) -> Result<AuditBatch>;
    async fn load(&self, batch: AuditBatch) -> Result<DeliveryReceipt>;
}
