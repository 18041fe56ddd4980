use crate::core::{ForwardSummary, Pipeline, StreamRecord};
use crate::utils::error::Result;

pub struct ForwardEngine<P: Pipeline> {
    pipeline: P,
}

impl<P: Pipeline> ForwardEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self { pipeline }
    }

    pub fn pipeline(&self) -> &P {
        &self.pipeline
    }

    /// Flattens every record and delivers the batch. Nothing is delivered
    /// unless every record flattens.
    pub async fn run(&self, records: &[StreamRecord]) -> Result<ForwardSummary> {
        tracing::info!("Flattening {} stream records", records.len());
        let batch = self.pipeline.transform(records)?;

        let summary_records = batch.entries.len();
        let bytes = batch.payload.len();

        tracing::debug!("Delivering {} bytes", bytes);
        let receipt = self.pipeline.load(batch).await?;

        Ok(ForwardSummary {
            records: summary_records,
            bytes,
            record_id: receipt.record_id,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{AuditBatch, DeliveryReceipt, OrderAuditEntry};
    use crate::utils::error::ForwarderError;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Default)]
    struct CountingPipeline {
        loads: AtomicUsize,
        reject: bool,
    }

    #[async_trait::async_trait]
    impl Pipeline for CountingPipeline {
        fn transform(&self, records: &[StreamRecord]) -> Result<AuditBatch> {
            if self.reject {
                return Err(ForwarderError::MalformedRecord {
                    index: 0,
                    source: crate::utils::error::FlattenError::MissingNewImage,
                });
            }
            let entries: Vec<OrderAuditEntry> = records
                .iter()
                .map(|_| OrderAuditEntry {
                    order_id: "O1".to_string(),
                    state: "NEW".to_string(),
                    last_updated_date: "1".to_string(),
                })
                .collect();
            Ok(AuditBatch {
                payload: "x\n".repeat(entries.len()),
                entries,
            })
        }

        async fn load(&self, _batch: AuditBatch) -> Result<DeliveryReceipt> {
            self.loads.fetch_add(1, Ordering::SeqCst);
            Ok(DeliveryReceipt {
                record_id: "abc".to_string(),
            })
        }
    }

    #[tokio::test]
    async fn test_run_reports_summary() {
        let engine = ForwardEngine::new(CountingPipeline::default());
        let records = vec![StreamRecord::default(), StreamRecord::default()];

        let summary = engine.run(&records).await.unwrap();

        assert_eq!(
            summary,
            ForwardSummary {
                records: 2,
                bytes: 4,
                record_id: "abc".to_string(),
            }
        );
        assert_eq!(engine.pipeline().loads.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_run_stops_before_load_on_transform_error() {
        let engine = ForwardEngine::new(CountingPipeline {
            reject: true,
            ..Default::default()
        });

        let result = engine.run(&[StreamRecord::default()]).await;

        assert!(result.is_err());
        assert_eq!(engine.pipeline().loads.load(Ordering::SeqCst), 0);
    }
}
