use crate::core::encoding::build_payload;
use crate::core::flatten::flatten_record;
use crate::core::{
    AuditBatch, ConfigProvider, DeliveryReceipt, DeliverySink, Pipeline, StreamRecord,
};
use crate::utils::error::{ForwarderError, Result};

/// Flattens a batch of order stream records and appends it to the delivery stream as one record.
pub struct AuditForwarder<S: DeliverySink, C: ConfigProvider> {
    sink: S,
    config: C,
}

impl<S: DeliverySink, C: ConfigProvider> AuditForwarder<S, C> {
    pub fn new(sink: S, config: C) -> Self {
        Self { sink, config }
    }
}

#[async_trait::async_trait]
impl<S: DeliverySink, C: ConfigProvider> Pipeline for AuditForwarder<S, C> {
    fn transform(&self, records: &[StreamRecord]) -> Result<AuditBatch> {
        let mut entries = Vec::with_capacity(records.len());

        for (index, record) in records.iter().enumerate() {
            let entry = flatten_record(record)
                .map_err(|source| ForwarderError::MalformedRecord { index, source })?;
            entries.push(entry);
        }

        let payload = build_payload(&entries, self.config.line_style())?;
        Ok(AuditBatch { entries, payload })
    }

    async fn load(&self, batch: AuditBatch) -> Result<DeliveryReceipt> {
        if batch.is_empty() {
            tracing::warn!("Batch contained no records, delivering an empty record");
        }

        let stream = self.config.delivery_stream_name();
        tracing::info!(
            records = batch.entries.len(),
            stream,
            "Forwarding audit payload:\n{}",
            batch.payload
        );

        let receipt = self.sink.put_record(stream, batch.payload.as_bytes()).await?;

        tracing::debug!(record_id = %receipt.record_id, "Delivery stream accepted record");
        Ok(receipt)
    }
}
