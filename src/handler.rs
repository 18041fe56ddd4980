use crate::core::engine::ForwardEngine;
use crate::core::{Pipeline, StreamEvent};
use lambda_runtime::{Error, LambdaEvent};

/// Entry point for one DynamoDB stream invocation. Any malformed record or
/// delivery failure fails the whole invocation so the event source mapping
/// applies its own retry policy.
pub async fn function_handler<P: Pipeline>(
    engine: &ForwardEngine<P>,
    event: LambdaEvent<StreamEvent>,
) -> Result<(), Error> {
    let request_id = event.context.request_id.clone();
    let records = event.payload.records;

    tracing::info!(
        request_id = %request_id,
        records = records.len(),
        "Received DynamoDB stream batch"
    );

    match engine.run(&records).await {
        Ok(summary) => {
            tracing::info!(
                request_id = %request_id,
                records = summary.records,
                bytes = summary.bytes,
                record_id = %summary.record_id,
                "Audit batch forwarded"
            );
            Ok(())
        }
        Err(e) => {
            tracing::error!(
                request_id = %request_id,
                category = ?e.category(),
                severity = ?e.severity(),
                retryable = e.is_retryable(),
                "Audit batch failed: {}",
                e
            );
            Err(e.into())
        }
    }
}
